//! Ghost preview projection.
//!
//! Runs the same kernel pipeline as the deformation applicator and scales the
//! patch by the same amplitude, so the ghost shows exactly what a click would
//! add. The heightmap is never touched.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::deformation::{BrushStroke, footprint_origin, prepare_kernel};
use crate::grid::GridSpec;
use crate::matrix::Kernel;
use crate::types::SculptMode;

/// Color hint for rendering the ghost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviewColor {
    /// Green
    Raise,
    /// Red
    Lower,
}

impl PreviewColor {
    pub fn for_mode(mode: SculptMode) -> Self {
        match mode {
            SculptMode::Raise => PreviewColor::Raise,
            SculptMode::Lower => PreviewColor::Lower,
        }
    }

    /// sRGB bytes
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            PreviewColor::Raise => [0x4a, 0xde, 0x80],
            PreviewColor::Lower => [0xf8, 0x71, 0x71],
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            PreviewColor::Raise => "#4ade80",
            PreviewColor::Lower => "#f87171",
        }
    }
}

/// A non-destructive forecast of a pending deformation.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewPatch {
    /// Patch heights, already scaled by strength, mode and brush scale
    pub heights: Kernel,
    /// World-space center of the patch, lifted above the surface
    pub center: Vec3,
    /// World-space extent along x
    pub width: f32,
    /// World-space extent along z
    pub depth: f32,
    /// Render segments per side
    pub segments: u32,
    pub color: PreviewColor,
}

impl PreviewPatch {
    /// World-space vertex positions, row-major.
    ///
    /// Row `z` runs toward +z, column `x` toward +x, and each height is
    /// added to the patch's lifted y.
    pub fn vertex_positions(&self) -> Vec<Vec3> {
        let rows = self.heights.rows();
        let cols = self.heights.cols();
        let step_x = self.width / cols.saturating_sub(1).max(1) as f32;
        let step_z = self.depth / rows.saturating_sub(1).max(1) as f32;
        let origin = self.center - Vec3::new(self.width / 2.0, 0.0, self.depth / 2.0);

        self.heights
            .iter_rows()
            .enumerate()
            .flat_map(|(z, row)| {
                row.iter().enumerate().map(move |(x, &h)| {
                    origin + Vec3::new(x as f32 * step_x, h, z as f32 * step_z)
                })
            })
            .collect()
    }
}

/// Compute the ghost patch and its placement for a stroke.
pub fn project_preview(
    grid: &GridSpec,
    stroke: &BrushStroke,
    strength_scale: f32,
    height_offset: f32,
) -> PreviewPatch {
    let spec = stroke.spec();
    let multiplier = grid.resolution_multiplier();
    let footprint = spec.footprint_cells;

    let heights = prepare_kernel(spec, stroke.rotation, multiplier)
        .scaled(stroke.amplitude(strength_scale));

    let cell_size = grid.cell_size();
    let half_world = grid.world_size() / 2.0;
    let half_footprint = footprint as f32 / 2.0;
    let (start_x, start_z) = footprint_origin(stroke.cell, footprint);

    let center = Vec3::new(
        (start_x as f32 + half_footprint) * cell_size - half_world,
        height_offset,
        (start_z as f32 + half_footprint) * cell_size - half_world,
    );

    debug!(
        "project_preview: brush={} cell=({}, {}) center=({:.2}, {:.2}, {:.2})",
        stroke.brush, stroke.cell.x, stroke.cell.z, center.x, center.y, center.z
    );

    PreviewPatch {
        heights,
        center,
        width: footprint as f32 * cell_size,
        depth: footprint as f32 * cell_size,
        segments: footprint * multiplier,
        color: PreviewColor::for_mode(stroke.mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::BrushId;
    use crate::deformation::apply_stroke;
    use crate::heightmap::Heightmap;
    use crate::types::{GridPoint, Rotation};

    fn stroke(brush: BrushId, x: u32, z: u32, mode: SculptMode, strength: f32) -> BrushStroke {
        BrushStroke {
            brush,
            rotation: Rotation::new(1),
            cell: GridPoint::new(x, z),
            mode,
            strength,
        }
    }

    #[test]
    fn test_preview_matches_applied_deformation() {
        let grid = GridSpec::new(10, 4, 100.0).unwrap();
        let request = stroke(BrushId::LinearRamp, 5, 6, SculptMode::Lower, 0.7);

        let patch = project_preview(&grid, &request, 2.0, 0.16);
        let mut map = Heightmap::new(grid.vertices_per_side());
        apply_stroke(&mut map, &grid, &request, 2.0);

        // Footprint starts at cell (4, 5) -> vertex (16, 20)
        for z in 0..patch.heights.rows() {
            for x in 0..patch.heights.cols() {
                assert_eq!(patch.heights.get(z, x), map.get(16 + x, 20 + z));
            }
        }
        assert_eq!(patch.segments, 12);
        assert_eq!(patch.color, PreviewColor::Lower);
    }

    #[test]
    fn test_preview_placement() {
        let grid = GridSpec::new(10, 4, 100.0).unwrap();

        // 3-cell footprint centered on its middle cell
        let request = stroke(BrushId::SoftHill, 5, 5, SculptMode::Raise, 1.0);
        let patch = project_preview(&grid, &request, 2.0, 0.16);
        assert!((patch.center - Vec3::new(5.0, 0.16, 5.0)).length() < 1e-5);
        assert!((patch.width - 30.0).abs() < 1e-5);

        // 1-cell footprint sits on the cell center
        let request = stroke(BrushId::Raise, 0, 9, SculptMode::Raise, 1.0);
        let patch = project_preview(&grid, &request, 2.0, 0.5);
        assert!((patch.center - Vec3::new(-45.0, 0.5, 45.0)).length() < 1e-5);
        assert!((patch.depth - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_preview_vertex_positions() {
        let grid = GridSpec::new(4, 1, 4.0).unwrap();
        let request = stroke(BrushId::Raise, 1, 1, SculptMode::Raise, 0.5);
        let patch = project_preview(&grid, &request, 2.0, 0.1);
        let positions = patch.vertex_positions();
        assert_eq!(positions.len(), 4);

        // Cell (1, 1) spans world [-1, 0] on both axes
        assert!((positions[0] - Vec3::new(-1.0, 0.6, -1.0)).length() < 1e-5);
        assert!((positions[3] - Vec3::new(0.0, 0.6, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_preview_color() {
        assert_eq!(PreviewColor::for_mode(SculptMode::Raise).hex(), "#4ade80");
        assert_eq!(PreviewColor::Lower.rgb(), [248, 113, 113]);
    }
}
