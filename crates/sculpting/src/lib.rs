//! Heightmap terrain sculpting engine.
//!
//! This crate provides grid-aligned terrain deformation with:
//! - A fixed catalog of parametric brush kernels
//! - Exact quarter-turn rotation and bilinear upsampling of kernels
//! - A CPU heightmap sized to the render mesh
//! - Additive kernel application with clipping at the terrain edge
//! - Non-destructive ghost previews of a pending deformation
//!
//! # Architecture
//!
//! The user interacts with a coarse grid of `divisions × divisions` cells.
//! The rendered surface is a finer mesh with `resolution_multiplier` segments
//! per cell edge. Brush kernels are generated at native resolution
//! (`footprint + 1` vertices per side), rotated, then upsampled to match the
//! render mesh before they are accumulated into the [`Heightmap`].
//!
//! ## Key Components
//!
//! - **Brush**: Kernel catalog and generators
//! - **Matrix**: Rotation and upsampling
//! - **Heightmap**: Mutable vertex heights
//! - **Deformation**: Kernel → heightmap application
//! - **Preview**: Ghost patch and world placement
//! - **Session**: Owns the heightmap and dispatches input events

pub mod brush;
pub mod deformation;
pub mod error;
pub mod grid;
pub mod heightmap;
pub mod matrix;
pub mod preview;
pub mod session;
pub mod types;

pub use brush::{BrushId, BrushShape, BrushSpec, CATALOG};
pub use deformation::{BrushStroke, apply_stroke, prepare_kernel};
pub use error::SculptError;
pub use grid::{GridSpec, validate_strength};
pub use heightmap::{DirtyRegion, Heightmap};
pub use matrix::{HeightMatrix, Kernel};
pub use preview::{PreviewColor, PreviewPatch, project_preview};
pub use session::{Hover, SculptEvent, SculptNotification, SculptSession};
pub use types::{GridPoint, Rotation, SculptMode};

pub use sculpt_config as config;
