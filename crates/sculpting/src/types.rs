//! Core sculpting types.
//!
//! Small value types shared by the kernel library, the deformation
//! applicator and the preview projector.

use serde::{Deserialize, Serialize};

/// A cell of the interaction grid, `0 <= x, z < divisions`.
///
/// Construct through [`GridSpec::grid_point`](crate::grid::GridSpec::grid_point)
/// to get a bounds-checked point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: u32,
    pub z: u32,
}

impl GridPoint {
    pub fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }
}

/// Whether a deformation raises or lowers the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum SculptMode {
    #[default]
    Raise = 0,
    Lower = 1,
}

impl SculptMode {
    /// Mode selected by the input modifier (alternate = lower).
    pub fn from_alternate(alternate: bool) -> Self {
        if alternate {
            SculptMode::Lower
        } else {
            SculptMode::Raise
        }
    }

    /// Sign applied to kernel values: +1 for raise, -1 for lower.
    pub fn sign(&self) -> f32 {
        match self {
            SculptMode::Raise => 1.0,
            SculptMode::Lower => -1.0,
        }
    }

    /// Strength with the mode's sign applied.
    pub fn signed(&self, strength: f32) -> f32 {
        strength * self.sign()
    }
}

/// Brush orientation in clockwise quarter turns (0..=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8")]
pub struct Rotation(u8);

impl Rotation {
    pub const NONE: Rotation = Rotation(0);

    /// Create a rotation, wrapping the turn count modulo 4.
    pub fn new(quarter_turns: u32) -> Self {
        Self((quarter_turns % 4) as u8)
    }

    /// Number of clockwise quarter turns.
    pub fn quarter_turns(&self) -> u32 {
        self.0 as u32
    }

    /// The next quarter turn, wrapping back to 0 after 3.
    pub fn advanced(&self) -> Self {
        Self((self.0 + 1) % 4)
    }
}

impl From<u8> for Rotation {
    fn from(quarter_turns: u8) -> Self {
        Self::new(quarter_turns as u32)
    }
}
