//! Sculpting session and event dispatch.
//!
//! A [`SculptSession`] owns the heightmap and all per-session interaction
//! state (rotation, selected brush, strength, hover, pending resize). The
//! surrounding application resolves raw input into [`SculptEvent`]s and
//! renders from the returned [`SculptNotification`]s. Every event runs to
//! completion before the next one is handled.

use sculpt_config::SculptConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

use crate::brush::BrushId;
use crate::deformation::{BrushStroke, apply_stroke};
use crate::error::SculptError;
use crate::grid::{GridSpec, validate_strength};
use crate::heightmap::{DirtyRegion, Heightmap};
use crate::preview::{PreviewPatch, project_preview};
use crate::types::{GridPoint, Rotation, SculptMode};

/// Input to the session, already resolved to grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SculptEvent {
    /// Pointer hovers a cell; `alternate` selects lower mode
    PointerMoved { cell: GridPoint, alternate: bool },
    /// Pointer left the grid
    PointerLeft,
    /// Click on a cell; `alternate` selects lower mode
    Clicked { cell: GridPoint, alternate: bool },
    /// Advance brush rotation by a quarter turn
    Rotate,
    SelectBrush(BrushId),
    SetStrength(f32),
    /// Ask to change the grid division count
    RequestResize(u32),
    ConfirmResize,
    CancelResize,
    /// Flatten the terrain
    ResetTerrain,
}

/// Output of the session for the rendering collaborator and UI.
#[derive(Debug, Clone, PartialEq)]
pub enum SculptNotification {
    /// Heightmap changed within the region
    TerrainModified(DirtyRegion),
    /// Heightmap was flattened in place
    TerrainReset,
    /// Heightmap was rebuilt at a new resolution
    GridResized { divisions: u32 },
    /// Resizing would discard modifications; the UI should confirm
    ResizeConfirmationRequired { current: u32, requested: u32 },
    PreviewChanged(PreviewPatch),
    PreviewCleared,
}

/// Cell under the pointer and the mode its modifier selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hover {
    pub cell: GridPoint,
    pub mode: SculptMode,
}

/// A terrain sculpting session.
#[derive(Debug)]
#[cfg_attr(feature = "bevy", derive(Resource))]
pub struct SculptSession {
    grid: GridSpec,
    heightmap: Heightmap,
    rotation: Rotation,
    brush: Option<BrushId>,
    strength: f32,
    strength_scale: f32,
    preview_offset: f32,
    hover: Option<Hover>,
    /// Terrain differs from flat since the last resize or reset
    modified: bool,
    pending_divisions: Option<u32>,
}

impl SculptSession {
    /// Create a session with a flat heightmap.
    ///
    /// No brush is selected initially.
    pub fn new(config: &SculptConfig) -> Result<Self, SculptError> {
        let grid = GridSpec::from_config(&config.grid)?;
        let strength = validate_strength(config.brush.strength)?;
        let strength_scale = config.brush.strength_scale;
        if !strength_scale.is_finite() {
            return Err(SculptError::InvalidStrengthScale(strength_scale));
        }
        let preview_offset = config.preview.height_offset;
        if !preview_offset.is_finite() {
            return Err(SculptError::InvalidPreviewOffset(preview_offset));
        }

        info!(
            "SculptSession::new: {}x{} cells, {} vertices per side",
            grid.divisions(),
            grid.divisions(),
            grid.vertices_per_side()
        );

        Ok(Self {
            heightmap: Heightmap::new(grid.vertices_per_side()),
            grid,
            rotation: Rotation::NONE,
            brush: None,
            strength,
            strength_scale,
            preview_offset,
            hover: None,
            modified: false,
            pending_divisions: None,
        })
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn heightmap(&self) -> &Heightmap {
        &self.heightmap
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn brush(&self) -> Option<BrushId> {
        self.brush
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn hover(&self) -> Option<Hover> {
        self.hover
    }

    /// Whether the terrain has been sculpted since the last resize or reset
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Division count awaiting confirmation
    pub fn pending_divisions(&self) -> Option<u32> {
        self.pending_divisions
    }

    /// Current ghost patch, if a brush is selected and the pointer is on the grid
    pub fn preview(&self) -> Option<PreviewPatch> {
        let hover = self.hover?;
        let stroke = self.stroke(hover.cell, hover.mode)?;
        Some(project_preview(
            &self.grid,
            &stroke,
            self.strength_scale,
            self.preview_offset,
        ))
    }

    /// Apply the selected brush at a cell.
    ///
    /// Returns None when no brush is selected or nothing changed.
    pub fn apply(
        &mut self,
        cell: GridPoint,
        mode: SculptMode,
    ) -> Result<Option<DirtyRegion>, SculptError> {
        self.check_cell(cell)?;
        let Some(stroke) = self.stroke(cell, mode) else {
            debug!("apply: no brush selected, ignoring");
            return Ok(None);
        };
        let region = apply_stroke(&mut self.heightmap, &self.grid, &stroke, self.strength_scale);
        if region.is_some() {
            self.modified = true;
        }
        Ok(region)
    }

    /// Handle one input event.
    pub fn handle(&mut self, event: SculptEvent) -> Result<Vec<SculptNotification>, SculptError> {
        debug!("SculptSession::handle: {:?}", event);
        let mut out = Vec::new();

        match event {
            SculptEvent::PointerMoved { cell, alternate } => {
                self.check_cell(cell)?;
                self.hover = Some(Hover {
                    cell,
                    mode: SculptMode::from_alternate(alternate),
                });
                self.push_preview(&mut out);
            }
            SculptEvent::PointerLeft => {
                if self.hover.take().is_some() {
                    out.push(SculptNotification::PreviewCleared);
                }
            }
            SculptEvent::Clicked { cell, alternate } => {
                if let Some(region) = self.apply(cell, SculptMode::from_alternate(alternate))? {
                    out.push(SculptNotification::TerrainModified(region));
                }
            }
            SculptEvent::Rotate => {
                self.rotation = self.rotation.advanced();
                self.push_preview(&mut out);
            }
            SculptEvent::SelectBrush(brush) => {
                self.brush = Some(brush);
                self.push_preview(&mut out);
            }
            SculptEvent::SetStrength(strength) => {
                self.strength = validate_strength(strength)?;
                self.push_preview(&mut out);
            }
            SculptEvent::RequestResize(divisions) => {
                let target = self.grid.with_divisions(divisions)?;
                if divisions == self.grid.divisions() {
                    self.pending_divisions = None;
                } else if self.modified {
                    self.pending_divisions = Some(divisions);
                    out.push(SculptNotification::ResizeConfirmationRequired {
                        current: self.grid.divisions(),
                        requested: divisions,
                    });
                } else {
                    self.resize(target, &mut out);
                }
            }
            SculptEvent::ConfirmResize => {
                if let Some(divisions) = self.pending_divisions.take() {
                    let target = self.grid.with_divisions(divisions)?;
                    self.resize(target, &mut out);
                }
            }
            SculptEvent::CancelResize => {
                self.pending_divisions = None;
            }
            SculptEvent::ResetTerrain => {
                info!("SculptSession: terrain reset");
                self.heightmap.clear();
                self.modified = false;
                out.push(SculptNotification::TerrainReset);
            }
        }

        Ok(out)
    }

    fn stroke(&self, cell: GridPoint, mode: SculptMode) -> Option<BrushStroke> {
        Some(BrushStroke {
            brush: self.brush?,
            rotation: self.rotation,
            cell,
            mode,
            strength: self.strength,
        })
    }

    fn check_cell(&self, cell: GridPoint) -> Result<(), SculptError> {
        self.grid.grid_point(cell.x as i64, cell.z as i64).map(|_| ())
    }

    fn push_preview(&self, out: &mut Vec<SculptNotification>) {
        if let Some(patch) = self.preview() {
            out.push(SculptNotification::PreviewChanged(patch));
        }
    }

    /// Discard the heightmap and rebuild it flat at the new resolution.
    fn resize(&mut self, grid: GridSpec, out: &mut Vec<SculptNotification>) {
        info!(
            "SculptSession: grid resize {} -> {} divisions",
            self.grid.divisions(),
            grid.divisions()
        );
        self.grid = grid;
        self.heightmap = Heightmap::new(grid.vertices_per_side());
        self.modified = false;
        self.pending_divisions = None;
        self.hover = None;
        out.push(SculptNotification::GridResized {
            divisions: grid.divisions(),
        });
        out.push(SculptNotification::PreviewCleared);
    }
}
