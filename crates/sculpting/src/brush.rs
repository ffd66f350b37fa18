//! Brush kernel library.
//!
//! Every brush is a parametric shape evaluated at a requested vertex size, so
//! a kernel can be produced at native resolution (`footprint + 1` vertices per
//! side) and upsampled later, or evaluated directly at a finer size.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SculptError;
use crate::matrix::{HeightMatrix, Kernel};

/// Smallest vertex size any generator will produce.
///
/// Ramp and ridge divide by `size - 1`, and a 1-vertex dome has no radius.
pub const MIN_KERNEL_SIZE: usize = 2;

/// Identifier of a catalog brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BrushId {
    Raise,
    Lower,
    SoftHill,
    Ridge,
    LinearRamp,
    SoftValley,
}

impl BrushId {
    /// All brushes in catalog order.
    pub const ALL: [BrushId; 6] = [
        BrushId::Raise,
        BrushId::Lower,
        BrushId::SoftHill,
        BrushId::Ridge,
        BrushId::LinearRamp,
        BrushId::SoftValley,
    ];

    /// Stable string id
    pub fn as_str(&self) -> &'static str {
        match self {
            BrushId::Raise => "raise",
            BrushId::Lower => "lower",
            BrushId::SoftHill => "softHill",
            BrushId::Ridge => "ridge",
            BrushId::LinearRamp => "linearRamp",
            BrushId::SoftValley => "softValley",
        }
    }

    /// Catalog entry for this brush
    pub fn spec(&self) -> &'static BrushSpec {
        // CATALOG is ordered like ALL
        &CATALOG[*self as usize]
    }
}

impl fmt::Display for BrushId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrushId {
    type Err = SculptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BrushId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| SculptError::UnknownBrush(s.to_string()))
    }
}

/// Parametric height profile of a brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum BrushShape {
    /// Every vertex at `peak`
    Flat = 0,
    /// Radial cosine falloff from the center, zero at the corners
    SoftDome = 1,
    /// Linear rise along z from 0 at the first row to `peak` at the last
    LinearRamp = 2,
    /// Cosine falloff across x, constant along z
    Ridge = 3,
}

impl BrushShape {
    /// Evaluate this shape as a `size × size` kernel with extreme value `peak`.
    ///
    /// `size` is clamped to [`MIN_KERNEL_SIZE`].
    pub fn generate(&self, size: usize, peak: f32) -> Kernel {
        let size = size.max(MIN_KERNEL_SIZE);
        match self {
            BrushShape::Flat => HeightMatrix::filled(size, size, peak),
            BrushShape::SoftDome => soft_dome(size, peak),
            BrushShape::LinearRamp => linear_ramp(size, peak),
            BrushShape::Ridge => ridge(size, peak),
        }
    }
}

/// Cosine falloff: `peak` at distance 0, 0 at `max_dist` and beyond.
#[inline]
pub fn cosine_falloff(dist: f32, max_dist: f32, peak: f32) -> f32 {
    if max_dist <= 0.0 || dist > max_dist {
        return 0.0;
    }
    ((dist / max_dist * PI).cos() + 1.0) / 2.0 * peak
}

fn soft_dome(size: usize, peak: f32) -> Kernel {
    let center = (size - 1) as f32 / 2.0;
    // Normalized to the corner so the dome reaches zero only at the corners
    let max_dist = (2.0 * center * center).sqrt();
    HeightMatrix::from_fn(size, size, |z, x| {
        let dx = x as f32 - center;
        let dz = z as f32 - center;
        cosine_falloff((dx * dx + dz * dz).sqrt(), max_dist, peak)
    })
}

fn linear_ramp(size: usize, peak: f32) -> Kernel {
    let last = (size - 1) as f32;
    HeightMatrix::from_fn(size, size, |z, _| z as f32 / last * peak)
}

fn ridge(size: usize, peak: f32) -> Kernel {
    let center = (size - 1) as f32 / 2.0;
    HeightMatrix::from_fn(size, size, |_, x| {
        cosine_falloff((x as f32 - center).abs(), center, peak)
    })
}

/// A catalog brush: a shape, its extreme value and its cell footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushSpec {
    pub id: BrushId,
    /// Display name
    pub name: &'static str,
    /// Interaction-grid cells covered per axis
    pub footprint_cells: u32,
    pub shape: BrushShape,
    /// Target extreme value at native resolution
    pub peak: f32,
}

impl BrushSpec {
    /// Vertices per side at native resolution (`footprint + 1`)
    pub fn native_size(&self) -> usize {
        self.footprint_cells as usize + 1
    }

    /// Evaluate the brush at the requested vertex size
    pub fn generate(&self, size: usize) -> Kernel {
        self.shape.generate(size, self.peak)
    }

    /// Kernel at native resolution
    pub fn native_kernel(&self) -> Kernel {
        self.generate(self.native_size())
    }

    /// Render the native kernel as a `resolution × resolution` grayscale image.
    ///
    /// Values are normalized over a range that always includes zero, so a
    /// raise and a lower brush of the same shape read as inverses. An all-zero
    /// kernel renders mid-gray (128).
    pub fn thumbnail(&self, resolution: usize) -> Vec<u8> {
        let kernel = self.native_kernel();
        let (lo, hi) = kernel.min_max().unwrap_or((0.0, 0.0));
        let min = lo.min(0.0);
        let range = hi.max(0.0) - min;

        let span = resolution.saturating_sub(1).max(1) as f32;
        let row_scale = (kernel.rows() - 1) as f32 / span;
        let col_scale = (kernel.cols() - 1) as f32 / span;

        let mut pixels = Vec::with_capacity(resolution * resolution);
        for y in 0..resolution {
            for x in 0..resolution {
                let value = kernel.sample_bilinear(y as f32 * row_scale, x as f32 * col_scale);
                let normalized = if range == 0.0 {
                    0.5
                } else {
                    (value - min) / range
                };
                pixels.push((normalized * 255.0).round().clamp(0.0, 255.0) as u8);
            }
        }
        pixels
    }
}

/// The fixed brush catalog, ordered as [`BrushId::ALL`].
pub static CATALOG: [BrushSpec; 6] = [
    BrushSpec {
        id: BrushId::Raise,
        name: "Raise Cell",
        footprint_cells: 1,
        shape: BrushShape::Flat,
        peak: 0.5,
    },
    BrushSpec {
        id: BrushId::Lower,
        name: "Lower Cell",
        footprint_cells: 1,
        shape: BrushShape::Flat,
        peak: -0.5,
    },
    BrushSpec {
        id: BrushId::SoftHill,
        name: "Soft Hill",
        footprint_cells: 3,
        shape: BrushShape::SoftDome,
        peak: 2.0,
    },
    BrushSpec {
        id: BrushId::Ridge,
        name: "Ridge",
        footprint_cells: 3,
        shape: BrushShape::Ridge,
        peak: 1.0,
    },
    BrushSpec {
        id: BrushId::LinearRamp,
        name: "Linear Ramp",
        footprint_cells: 3,
        shape: BrushShape::LinearRamp,
        peak: 1.5,
    },
    BrushSpec {
        id: BrushId::SoftValley,
        name: "Soft Valley",
        footprint_cells: 3,
        shape: BrushShape::SoftDome,
        peak: -2.0,
    },
];
