//! CPU heightmap for the render mesh - the terrain's single source of truth

use tracing::trace;

/// A square grid of vertex heights stored row-major (row = z, column = x).
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    /// Vertices per side
    size: usize,
    heights: Vec<f32>,
}

/// Inclusive rectangle of heightmap vertices touched by a deformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRegion {
    pub min_x: usize,
    pub min_z: usize,
    pub max_x: usize,
    pub max_z: usize,
}

impl DirtyRegion {
    /// Region covering a single vertex
    pub fn point(x: usize, z: usize) -> Self {
        Self {
            min_x: x,
            min_z: z,
            max_x: x,
            max_z: z,
        }
    }

    /// Grow the region to include a vertex
    pub fn include(&mut self, x: usize, z: usize) {
        self.min_x = self.min_x.min(x);
        self.min_z = self.min_z.min(z);
        self.max_x = self.max_x.max(x);
        self.max_z = self.max_z.max(z);
    }

    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    pub fn depth(&self) -> usize {
        self.max_z - self.min_z + 1
    }

    pub fn contains(&self, x: usize, z: usize) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_z..=self.max_z).contains(&z)
    }
}

impl Heightmap {
    /// Create a flat heightmap with `size × size` vertices
    pub fn new(size: usize) -> Self {
        Self {
            size,
            heights: vec![0.0; size * size],
        }
    }

    /// Reset every vertex to zero
    pub fn clear(&mut self) {
        self.heights.fill(0.0);
    }

    /// Vertices per side
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.heights.len()
    }

    /// Whether signed vertex coordinates fall inside the heightmap
    #[inline]
    pub fn in_bounds(&self, x: i64, z: i64) -> bool {
        let size = self.size as i64;
        x >= 0 && z >= 0 && x < size && z < size
    }

    /// Get the height at a vertex.
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get(&self, x: usize, z: usize) -> Option<f32> {
        if x >= self.size || z >= self.size {
            return None;
        }
        Some(self.heights[z * self.size + x])
    }

    /// Set the height at a vertex.
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn set(&mut self, x: usize, z: usize, value: f32) {
        if x >= self.size || z >= self.size {
            return;
        }
        self.heights[z * self.size + x] = value;
    }

    /// Accumulate a delta onto a vertex.
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn add(&mut self, x: usize, z: usize, delta: f32) {
        if x >= self.size || z >= self.size {
            return;
        }
        self.heights[z * self.size + x] += delta;
    }

    /// Row-major heights
    #[inline]
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Iterate rows (constant z) as slices
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.heights.chunks_exact(self.size.max(1))
    }

    /// Largest absolute height, 0.0 for a flat map
    pub fn max_abs(&self) -> f32 {
        self.heights.iter().fold(0.0_f32, |acc, h| acc.max(h.abs()))
    }

    /// Whether every vertex is exactly zero
    pub fn is_flat(&self) -> bool {
        self.heights.iter().all(|&h| h == 0.0)
    }

    /// Get raw height data for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.heights)
    }

    /// Write heights into the height component of a row-major plane vertex buffer.
    ///
    /// The plane lies in local XY with Z as height, so `positions[i][2]` is
    /// replaced. A buffer whose length does not match the vertex count is
    /// left untouched and false is returned; this happens transiently while
    /// the mesh and heightmap are rebuilt at a new resolution.
    pub fn write_to_positions(&self, positions: &mut [[f32; 3]]) -> bool {
        if positions.len() != self.heights.len() {
            trace!(
                "write_to_positions: skipped, {} positions for {} heights",
                positions.len(),
                self.heights.len()
            );
            return false;
        }
        for (position, &height) in positions.iter_mut().zip(&self.heights) {
            position[2] = height;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_heightmap() {
        let map = Heightmap::new(41);
        assert_eq!(map.size(), 41);
        assert_eq!(map.vertex_count(), 41 * 41);
        assert!(map.is_flat());
    }

    #[test]
    fn test_get_set_add() {
        let mut map = Heightmap::new(5);
        map.set(2, 3, 1.5);
        assert_eq!(map.get(2, 3), Some(1.5));

        map.add(2, 3, 0.25);
        map.add(2, 3, 0.25);
        assert_eq!(map.get(2, 3), Some(2.0));

        // Out of bounds is ignored
        map.add(5, 0, 1.0);
        map.set(0, 9, 1.0);
        assert_eq!(map.get(5, 0), None);
        assert_eq!(map.max_abs(), 2.0);
    }

    #[test]
    fn test_in_bounds() {
        let map = Heightmap::new(3);
        assert!(map.in_bounds(0, 0));
        assert!(map.in_bounds(2, 2));
        assert!(!map.in_bounds(-1, 0));
        assert!(!map.in_bounds(0, 3));
    }

    #[test]
    fn test_row_major_layout() {
        let mut map = Heightmap::new(3);
        map.set(1, 2, 7.0);
        assert_eq!(map.heights()[2 * 3 + 1], 7.0);
        assert_eq!(map.rows().nth(2).unwrap(), &[0.0, 7.0, 0.0]);
    }

    #[test]
    fn test_clear() {
        let mut map = Heightmap::new(4);
        map.add(1, 1, -3.0);
        assert!(!map.is_flat());
        map.clear();
        assert!(map.is_flat());
    }

    #[test]
    fn test_as_bytes() {
        let map = Heightmap::new(2);
        // 4 vertices * 4 bytes per f32
        assert_eq!(map.as_bytes().len(), 16);
    }

    #[test]
    fn test_write_to_positions() {
        let mut map = Heightmap::new(2);
        map.set(1, 0, 0.5);
        map.set(0, 1, -0.5);

        let mut positions = vec![[1.0, 2.0, 9.0]; 4];
        assert!(map.write_to_positions(&mut positions));
        assert_eq!(positions[1], [1.0, 2.0, 0.5]);
        assert_eq!(positions[2], [1.0, 2.0, -0.5]);
        assert_eq!(positions[0][2], 0.0);

        let mut stale = vec![[0.0, 0.0, 9.0]; 9];
        assert!(!map.write_to_positions(&mut stale));
        assert!(stale.iter().all(|p| p[2] == 9.0));
    }

    #[test]
    fn test_dirty_region() {
        let mut region = DirtyRegion::point(4, 4);
        region.include(2, 6);
        assert_eq!((region.width(), region.depth()), (3, 3));
        assert!(region.contains(3, 5));
        assert!(!region.contains(5, 5));
    }
}
