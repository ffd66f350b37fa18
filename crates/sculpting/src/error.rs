//! Error types for sculpting operations.

use sculpt_config::{MAX_DIVISIONS, MAX_RESOLUTION_MULTIPLIER};

/// Errors raised when sculpting input fails validation.
///
/// Only boundary checks produce errors. Clipping against the terrain edge and
/// transient heightmap size mismatches are handled silently by the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SculptError {
    #[error("Invalid grid divisions: {0} (expected 1..={max})", max = MAX_DIVISIONS)]
    InvalidDivisions(u32),

    #[error(
        "Invalid resolution multiplier: {0} (expected 1..={max})",
        max = MAX_RESOLUTION_MULTIPLIER
    )]
    InvalidResolutionMultiplier(u32),

    #[error("Invalid world size: {0}")]
    InvalidWorldSize(f32),

    #[error("Invalid brush strength: {0} (expected 0 < strength <= 1)")]
    InvalidStrength(f32),

    #[error("Invalid strength scale: {0}")]
    InvalidStrengthScale(f32),

    #[error("Invalid preview height offset: {0}")]
    InvalidPreviewOffset(f32),

    #[error("Cell ({x}, {z}) is outside a {divisions}x{divisions} grid")]
    CellOutOfBounds { x: i64, z: i64, divisions: u32 },

    #[error("Unknown brush id: {0}")]
    UnknownBrush(String),
}
