//! Deformation applicator.
//!
//! Projects a brush kernel onto the heightmap:
//! 1. Kernel at native resolution, rotated in quarter turns
//! 2. Upsampled to the render mesh resolution
//! 3. Footprint centered on the target cell and converted to vertex coordinates
//! 4. Values accumulated additively, dropping vertices past the terrain edge

use tracing::{debug, trace, warn};

use crate::brush::{BrushId, BrushSpec};
use crate::grid::GridSpec;
use crate::heightmap::{DirtyRegion, Heightmap};
use crate::matrix::Kernel;
use crate::types::{GridPoint, Rotation, SculptMode};

/// A single brush application request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushStroke {
    pub brush: BrushId,
    pub rotation: Rotation,
    /// Interaction cell the footprint is centered on
    pub cell: GridPoint,
    pub mode: SculptMode,
    /// Strength in `(0, 1]`
    pub strength: f32,
}

impl BrushStroke {
    /// Catalog entry of the stroke's brush
    pub fn spec(&self) -> &'static BrushSpec {
        self.brush.spec()
    }

    /// Factor applied to every kernel value: strength with the mode sign and
    /// the constant brush scale
    pub fn amplitude(&self, strength_scale: f32) -> f32 {
        self.mode.signed(self.strength) * strength_scale
    }
}

/// Rotate the native kernel, then upsample it to render resolution.
///
/// Rotating first keeps the transform an exact permutation of the native
/// values.
pub fn prepare_kernel(spec: &BrushSpec, rotation: Rotation, resolution_multiplier: u32) -> Kernel {
    spec.native_kernel()
        .rotated(rotation)
        .upsample(resolution_multiplier)
}

/// Top-left interaction cell of a `footprint`-cell brush centered on `cell`.
///
/// May be negative near the terrain edge.
#[inline]
pub fn footprint_origin(cell: GridPoint, footprint: u32) -> (i64, i64) {
    let half = (footprint / 2) as i64;
    (cell.x as i64 - half, cell.z as i64 - half)
}

/// Apply a stroke to the heightmap.
///
/// Returns the region of vertices that changed, or None when the whole
/// kernel fell outside the terrain or the heightmap does not match the grid
/// resolution (a stale map during a resize; the update is skipped).
pub fn apply_stroke(
    heightmap: &mut Heightmap,
    grid: &GridSpec,
    stroke: &BrushStroke,
    strength_scale: f32,
) -> Option<DirtyRegion> {
    if heightmap.size() != grid.vertices_per_side() {
        warn!(
            "apply_stroke: heightmap has {} vertices per side, grid expects {}; skipping",
            heightmap.size(),
            grid.vertices_per_side()
        );
        return None;
    }

    let spec = stroke.spec();
    let multiplier = grid.resolution_multiplier();
    let kernel = prepare_kernel(spec, stroke.rotation, multiplier);
    let amplitude = stroke.amplitude(strength_scale);

    let (start_cell_x, start_cell_z) = footprint_origin(stroke.cell, spec.footprint_cells);
    let start_x = start_cell_x * multiplier as i64;
    let start_z = start_cell_z * multiplier as i64;

    debug!(
        "apply_stroke: brush={} cell=({}, {}) rotation={} mode={:?} amplitude={:.3} \
         kernel={}x{} start=({}, {})",
        stroke.brush,
        stroke.cell.x,
        stroke.cell.z,
        stroke.rotation.quarter_turns(),
        stroke.mode,
        amplitude,
        kernel.cols(),
        kernel.rows(),
        start_x,
        start_z
    );

    let mut region: Option<DirtyRegion> = None;
    for (z, row) in kernel.iter_rows().enumerate() {
        let map_z = start_z + z as i64;
        for (x, &value) in row.iter().enumerate() {
            let map_x = start_x + x as i64;
            if !heightmap.in_bounds(map_x, map_z) {
                continue;
            }
            let (vx, vz) = (map_x as usize, map_z as usize);
            heightmap.add(vx, vz, value * amplitude);
            match region.as_mut() {
                Some(r) => r.include(vx, vz),
                None => region = Some(DirtyRegion::point(vx, vz)),
            }
        }
    }

    match region {
        Some(r) => trace!(
            "apply_stroke: touched ({}, {})..=({}, {})",
            r.min_x, r.min_z, r.max_x, r.max_z
        ),
        None => trace!("apply_stroke: kernel entirely out of bounds"),
    }
    region
}

#[cfg(test)]
mod tests {
    use super::*;
    use sculpt_config::DEFAULT_STRENGTH_SCALE;

    fn stroke(brush: BrushId, x: u32, z: u32, mode: SculptMode) -> BrushStroke {
        BrushStroke {
            brush,
            rotation: Rotation::NONE,
            cell: GridPoint::new(x, z),
            mode,
            strength: 1.0,
        }
    }

    #[test]
    fn test_flat_raise_single_cell() {
        let grid = GridSpec::new(4, 1, 4.0).unwrap();
        let mut map = Heightmap::new(grid.vertices_per_side());

        let region = apply_stroke(
            &mut map,
            &grid,
            &stroke(BrushId::Raise, 2, 2, SculptMode::Raise),
            DEFAULT_STRENGTH_SCALE,
        )
        .unwrap();

        assert_eq!(
            region,
            DirtyRegion {
                min_x: 2,
                min_z: 2,
                max_x: 3,
                max_z: 3
            }
        );
        for z in 0..5 {
            for x in 0..5 {
                let expected = if (2..=3).contains(&x) && (2..=3).contains(&z) {
                    1.0
                } else {
                    0.0
                };
                assert_eq!(map.get(x, z), Some(expected), "vertex ({}, {})", x, z);
            }
        }
    }

    #[test]
    fn test_repeated_application_accumulates() {
        let grid = GridSpec::new(8, 4, 80.0).unwrap();
        let request = stroke(BrushId::SoftHill, 4, 4, SculptMode::Raise);

        let mut once = Heightmap::new(grid.vertices_per_side());
        apply_stroke(&mut once, &grid, &request, 2.0);

        let mut twice = Heightmap::new(grid.vertices_per_side());
        apply_stroke(&mut twice, &grid, &request, 2.0);
        apply_stroke(&mut twice, &grid, &request, 2.0);

        for (a, b) in once.heights().iter().zip(twice.heights()) {
            assert!((b - 2.0 * a).abs() < 1e-5);
        }
        assert!(once.max_abs() > 0.0);
    }

    #[test]
    fn test_lower_negates_raise() {
        let grid = GridSpec::new(6, 4, 60.0).unwrap();
        for brush in BrushId::ALL {
            let mut raised = Heightmap::new(grid.vertices_per_side());
            let mut lowered = Heightmap::new(grid.vertices_per_side());
            apply_stroke(&mut raised, &grid, &stroke(brush, 3, 2, SculptMode::Raise), 2.0);
            apply_stroke(&mut lowered, &grid, &stroke(brush, 3, 2, SculptMode::Lower), 2.0);
            for (r, l) in raised.heights().iter().zip(lowered.heights()) {
                assert_eq!(*r, -*l, "brush {}", brush);
            }
        }
    }

    #[test]
    fn test_corner_application_clips() {
        let grid = GridSpec::new(5, 4, 50.0).unwrap();
        let mut map = Heightmap::new(grid.vertices_per_side());

        // 3-cell brush at (0, 0) starts one cell off the terrain
        let region = apply_stroke(
            &mut map,
            &grid,
            &stroke(BrushId::Ridge, 0, 0, SculptMode::Raise),
            2.0,
        )
        .unwrap();
        assert_eq!(
            region,
            DirtyRegion {
                min_x: 0,
                min_z: 0,
                max_x: 8,
                max_z: 8
            }
        );

        // The in-bounds part matches the kernel offset by one cell
        let kernel = prepare_kernel(BrushId::Ridge.spec(), Rotation::NONE, 4).scaled(2.0);
        for z in 0..grid.vertices_per_side() {
            for x in 0..grid.vertices_per_side() {
                let expected = if region.contains(x, z) {
                    kernel.get(z + 4, x + 4).unwrap()
                } else {
                    0.0
                };
                assert_eq!(map.get(x, z), Some(expected));
            }
        }
    }

    #[test]
    fn test_far_edge_clips() {
        let grid = GridSpec::new(5, 2, 50.0).unwrap();
        let mut map = Heightmap::new(grid.vertices_per_side());
        let region = apply_stroke(
            &mut map,
            &grid,
            &stroke(BrushId::LinearRamp, 4, 4, SculptMode::Lower),
            2.0,
        )
        .unwrap();
        assert_eq!((region.max_x, region.max_z), (10, 10));
        assert_eq!((region.min_x, region.min_z), (6, 6));
    }

    #[test]
    fn test_rotation_changes_orientation() {
        let grid = GridSpec::new(6, 1, 6.0).unwrap();
        let mut plain = Heightmap::new(grid.vertices_per_side());
        let mut turned = Heightmap::new(grid.vertices_per_side());

        let mut request = stroke(BrushId::LinearRamp, 3, 3, SculptMode::Raise);
        apply_stroke(&mut plain, &grid, &request, 1.0);
        request.rotation = Rotation::new(1);
        apply_stroke(&mut turned, &grid, &request, 1.0);

        // Unrotated ramp rises along z, rotated once it falls along x
        assert!(plain.get(3, 5).unwrap() > plain.get(3, 2).unwrap());
        assert_eq!(plain.get(2, 4), plain.get(5, 4));
        assert!(turned.get(2, 4).unwrap() > turned.get(5, 4).unwrap());
        assert_eq!(turned.get(3, 2), turned.get(3, 5));
    }

    #[test]
    fn test_four_rotations_match_unrotated() {
        let grid = GridSpec::new(6, 4, 60.0).unwrap();
        let mut plain = Heightmap::new(grid.vertices_per_side());
        let mut full_turn = Heightmap::new(grid.vertices_per_side());

        let mut request = stroke(BrushId::LinearRamp, 2, 3, SculptMode::Raise);
        apply_stroke(&mut plain, &grid, &request, 2.0);
        request.rotation = Rotation::new(4);
        apply_stroke(&mut full_turn, &grid, &request, 2.0);
        assert_eq!(plain, full_turn);
    }

    #[test]
    fn test_dimension_mismatch_is_noop() {
        let grid = GridSpec::new(4, 4, 40.0).unwrap();
        let mut stale = Heightmap::new(9);
        let region = apply_stroke(
            &mut stale,
            &grid,
            &stroke(BrushId::Raise, 1, 1, SculptMode::Raise),
            2.0,
        );
        assert!(region.is_none());
        assert!(stale.is_flat());
    }

    #[test]
    fn test_prepare_kernel_size() {
        let kernel = prepare_kernel(BrushId::SoftHill.spec(), Rotation::new(3), 4);
        assert_eq!((kernel.rows(), kernel.cols()), (13, 13));
        let single = prepare_kernel(BrushId::Raise.spec(), Rotation::NONE, 4);
        assert_eq!((single.rows(), single.cols()), (5, 5));
    }

    #[test]
    fn test_footprint_origin() {
        assert_eq!(footprint_origin(GridPoint::new(2, 2), 1), (2, 2));
        assert_eq!(footprint_origin(GridPoint::new(0, 5), 3), (-1, 4));
    }
}
