//! Shared configuration for terrain sculpting
//!
//! This crate provides the single source of truth for the interaction grid,
//! brush tuning and preview settings used by a sculpting session. Values are
//! plain data; range checks happen where the session is built.

use serde::{Deserialize, Serialize};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Default world-space edge length of the square terrain
pub const DEFAULT_WORLD_SIZE: f32 = 100.0;

/// Default number of interaction-grid cells per side
pub const DEFAULT_DIVISIONS: u32 = 20;

/// Upper bound on interaction-grid cells per side
pub const MAX_DIVISIONS: u32 = 100;

/// Default render vertices per interaction cell edge
pub const DEFAULT_RESOLUTION_MULTIPLIER: u32 = 4;

/// Upper bound on render segments per interaction cell edge
pub const MAX_RESOLUTION_MULTIPLIER: u32 = 16;

/// Default brush strength (0.0 exclusive to 1.0 inclusive)
pub const DEFAULT_STRENGTH: f32 = 0.5;

/// Constant factor applied to every kernel value on apply and preview.
/// Not a principled unit - may change.
pub const DEFAULT_STRENGTH_SCALE: f32 = 2.0;

/// Vertical lift of the ghost preview above the terrain surface
pub const DEFAULT_PREVIEW_HEIGHT_OFFSET: f32 = 0.16;

/// Interaction grid and render mesh resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Edge length of the terrain in world units
    pub world_size: f32,
    /// Interaction cells per side
    pub divisions: u32,
    /// Render segments per interaction cell
    pub resolution_multiplier: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            world_size: DEFAULT_WORLD_SIZE,
            divisions: DEFAULT_DIVISIONS,
            resolution_multiplier: DEFAULT_RESOLUTION_MULTIPLIER,
        }
    }
}

impl GridConfig {
    /// Create a grid config with the given divisions and default sizing
    pub fn new(divisions: u32) -> Self {
        Self {
            divisions,
            ..Default::default()
        }
    }

    /// Render segments per side (divisions × multiplier)
    pub fn render_segments(&self) -> u32 {
        self.divisions.saturating_mul(self.resolution_multiplier)
    }
}

/// Brush strength tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Initial brush strength
    pub strength: f32,
    /// Multiplier applied to kernel values in both apply and preview
    pub strength_scale: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            strength: DEFAULT_STRENGTH,
            strength_scale: DEFAULT_STRENGTH_SCALE,
        }
    }
}

/// Ghost preview display settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// World-space height the preview patch floats above the surface
    pub height_offset: f32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            height_offset: DEFAULT_PREVIEW_HEIGHT_OFFSET,
        }
    }
}

/// Complete sculpting session configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct SculptConfig {
    pub grid: GridConfig,
    pub brush: BrushConfig,
    pub preview: PreviewConfig,
}

impl SculptConfig {
    /// Create a config with the given grid divisions and defaults elsewhere
    pub fn with_divisions(divisions: u32) -> Self {
        Self {
            grid: GridConfig::new(divisions),
            ..Default::default()
        }
    }
}
