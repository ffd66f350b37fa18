//! Interaction grid and render mesh geometry.
//!
//! The coarse interaction grid (`divisions` cells per side) is what the user
//! points at. The render mesh subdivides every cell edge into
//! `resolution_multiplier` segments, so it has
//! `divisions × resolution_multiplier + 1` vertices per side.

use sculpt_config::{GridConfig, MAX_DIVISIONS, MAX_RESOLUTION_MULTIPLIER};

use crate::error::SculptError;
use crate::types::GridPoint;

/// Validated grid geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    divisions: u32,
    resolution_multiplier: u32,
    world_size: f32,
}

impl GridSpec {
    /// Validate raw grid parameters
    pub fn new(
        divisions: u32,
        resolution_multiplier: u32,
        world_size: f32,
    ) -> Result<Self, SculptError> {
        if divisions == 0 || divisions > MAX_DIVISIONS {
            return Err(SculptError::InvalidDivisions(divisions));
        }
        // Both caps together bound the heightmap to a few million vertices
        if resolution_multiplier == 0 || resolution_multiplier > MAX_RESOLUTION_MULTIPLIER {
            return Err(SculptError::InvalidResolutionMultiplier(resolution_multiplier));
        }
        if !world_size.is_finite() || world_size <= 0.0 {
            return Err(SculptError::InvalidWorldSize(world_size));
        }
        Ok(Self {
            divisions,
            resolution_multiplier,
            world_size,
        })
    }

    /// Validate a grid config
    pub fn from_config(config: &GridConfig) -> Result<Self, SculptError> {
        Self::new(config.divisions, config.resolution_multiplier, config.world_size)
    }

    /// Same geometry with a different division count
    pub fn with_divisions(&self, divisions: u32) -> Result<Self, SculptError> {
        Self::new(divisions, self.resolution_multiplier, self.world_size)
    }

    #[inline]
    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    #[inline]
    pub fn resolution_multiplier(&self) -> u32 {
        self.resolution_multiplier
    }

    #[inline]
    pub fn world_size(&self) -> f32 {
        self.world_size
    }

    /// Render mesh segments per side
    #[inline]
    pub fn render_segments(&self) -> u32 {
        self.divisions * self.resolution_multiplier
    }

    /// Render mesh vertices per side (fence-post count)
    #[inline]
    pub fn vertices_per_side(&self) -> usize {
        self.render_segments() as usize + 1
    }

    /// World-space edge length of one interaction cell
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.world_size / self.divisions as f32
    }

    /// Whether a point lies on the interaction grid
    #[inline]
    pub fn contains(&self, point: GridPoint) -> bool {
        point.x < self.divisions && point.z < self.divisions
    }

    /// Bounds-checked grid point from signed coordinates
    pub fn grid_point(&self, x: i64, z: i64) -> Result<GridPoint, SculptError> {
        let limit = self.divisions as i64;
        if (0..limit).contains(&x) && (0..limit).contains(&z) {
            Ok(GridPoint::new(x as u32, z as u32))
        } else {
            Err(SculptError::CellOutOfBounds {
                x,
                z,
                divisions: self.divisions,
            })
        }
    }

    /// Interaction cell under a world-space (x, z) position on the terrain plane.
    ///
    /// The terrain is centered on the origin. Returns None off the grid.
    pub fn cell_at_world(&self, world_x: f32, world_z: f32) -> Option<GridPoint> {
        let half = self.world_size / 2.0;
        let cell = self.cell_size();
        let x = ((world_x + half) / cell).floor();
        let z = ((world_z + half) / cell).floor();
        if !x.is_finite() || !z.is_finite() {
            return None;
        }
        self.grid_point(x as i64, z as i64).ok()
    }
}

impl TryFrom<&GridConfig> for GridSpec {
    type Error = SculptError;

    fn try_from(config: &GridConfig) -> Result<Self, Self::Error> {
        Self::from_config(config)
    }
}

/// Check a brush strength is finite and in `(0, 1]`
pub fn validate_strength(strength: f32) -> Result<f32, SculptError> {
    if strength.is_finite() && strength > 0.0 && strength <= 1.0 {
        Ok(strength)
    } else {
        Err(SculptError::InvalidStrength(strength))
    }
}
