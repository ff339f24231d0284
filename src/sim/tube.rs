//! Tubes and the eyes stacked inside them

use glam::Vec2;

use super::catalog::EyeKind;
use crate::consts::EYES_PER_TUBE;

/// A single sortable eye
#[derive(Debug, Clone, PartialEq)]
pub struct Eye {
    /// Session-unique id (maps to the eye's DOM element)
    pub id: u32,
    /// Species; a tube is sorted when all its eyes share one
    pub kind: EyeKind,
    /// Top-left corner, as an offset from the viewport centre (px)
    pub pos: Vec2,
}

impl Eye {
    pub fn new(id: u32, kind: EyeKind) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::ZERO,
        }
    }
}

/// A test tube: a bounded stack whose top is the last element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tube {
    /// Bottom to top, at most `EYES_PER_TUBE`
    pub eyes: Vec<Eye>,
}

impl Tube {
    pub fn new() -> Self {
        Self {
            eyes: Vec::with_capacity(EYES_PER_TUBE),
        }
    }

    pub fn len(&self) -> usize {
        self.eyes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eyes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.eyes.len() >= EYES_PER_TUBE
    }

    /// Kind of the top eye, if any
    pub fn top_kind(&self) -> Option<EyeKind> {
        self.eyes.last().map(|e| e.kind)
    }

    /// Push an eye unless the tube is full; a refused eye is handed back
    pub fn push(&mut self, eye: Eye) -> Result<(), Eye> {
        if self.is_full() {
            return Err(eye);
        }
        self.eyes.push(eye);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Eye> {
        self.eyes.pop()
    }

    /// Every eye matches the top eye's kind (empty tubes qualify)
    pub fn is_homogeneous(&self) -> bool {
        match self.top_kind() {
            Some(top) => self.eyes.iter().all(|e| e.kind == top),
            None => true,
        }
    }
}

/// A board is solved when every tube is homogeneous
pub fn is_solved(tubes: &[Tube]) -> bool {
    tubes.iter().all(Tube::is_homogeneous)
}
