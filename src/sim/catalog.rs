//! Eye catalog
//!
//! Every eye is a round element painted with a two-layer radial gradient:
//! an outer iris colour and an inner pupil shape with its own stretch/offset.

use std::fmt;

/// The kinds of eye that can be sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EyeKind {
    /// Green slit pupil
    Feline,
    /// Yellow with a round pupil
    Owl,
    /// Orange, thin horizontal pupil
    Reptile,
    /// Blue iris on white
    Human,
    /// Black with a small highlight near the top
    Spider,
}

impl EyeKind {
    /// Number of kinds in the catalog
    pub const COUNT: usize = 5;

    /// All kinds in catalog order
    pub const ALL: [EyeKind; Self::COUNT] = [
        EyeKind::Feline,
        EyeKind::Owl,
        EyeKind::Reptile,
        EyeKind::Human,
        EyeKind::Spider,
    ];

    /// Kind at `index`, wrapping around the catalog
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    /// CSS background for this kind
    pub fn background(&self) -> &'static str {
        match self {
            EyeKind::Feline => "radial-gradient(25% 65%, #000 50%, #1e3 60%)",
            EyeKind::Owl => "radial-gradient(#000 25%, #fe0 30%)",
            EyeKind::Reptile => "radial-gradient(32% 15%, #000 50%, #fa0 60%)",
            EyeKind::Human => "radial-gradient(#000 25%, #37f 30% 45%, #fee 50%)",
            EyeKind::Spider => "radial-gradient(22% 10% at 50% 24%, #eee 40%, #000 50%)",
        }
    }

    /// Single-letter label for the text board
    pub fn letter(&self) -> char {
        match self {
            EyeKind::Feline => 'F',
            EyeKind::Owl => 'O',
            EyeKind::Reptile => 'R',
            EyeKind::Human => 'H',
            EyeKind::Spider => 'S',
        }
    }
}

impl fmt::Display for EyeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_wraps() {
        assert_eq!(EyeKind::from_index(0), EyeKind::Feline);
        assert_eq!(EyeKind::from_index(4), EyeKind::Spider);
        assert_eq!(EyeKind::from_index(5), EyeKind::Feline);
        assert_eq!(EyeKind::from_index(12), EyeKind::Reptile);
    }

    #[test]
    fn test_backgrounds_are_distinct() {
        for (i, a) in EyeKind::ALL.iter().enumerate() {
            assert!(a.background().starts_with("radial-gradient("));
            assert!(a.background().ends_with(')'));
            for b in &EyeKind::ALL[i + 1..] {
                assert_ne!(a.background(), b.background());
                assert_ne!(a.letter(), b.letter());
            }
        }
    }
}
