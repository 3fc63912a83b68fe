//! Pointer handling for overlay drags.
//!
//! Lock order is drag controller, then layout.

use crate::drag::{ContainerRect, PointerId, PointerInput};
use crate::error::AppError;
use crate::models::{OverlayKind, Position};
use crate::raster::PreviewScene;
use crate::state::{lock_mutex, read_lock, write_lock, Workbench};

impl Workbench {
    /// Start dragging `element`. Returns `false` when a drag is already active.
    pub fn press(&self, element: OverlayKind, pointer: PointerId) -> Result<bool, AppError> {
        let mut drag = lock_mutex(&self.drag, "drag")?;
        let mut layout = write_lock(&self.layout, "layout")?;
        Ok(drag.press(element, pointer, &mut layout))
    }

    /// Press at a point in the preview: start dragging the topmost visible
    /// overlay under it, if any.
    pub fn press_at(
        &self,
        input: &PointerInput,
        rect: ContainerRect,
    ) -> Result<Option<OverlayKind>, AppError> {
        let Some((pointer, x, y)) = input.primary() else {
            return Ok(None);
        };
        let Some(point) = rect.to_percent(x, y) else {
            return Ok(None);
        };
        let hit = {
            let layout = read_lock(&self.layout, "layout")?;
            PreviewScene::compose(&layout, self.collaborators.assets.as_ref(), self.viewport)
                .hit_test(point)
        };
        match hit {
            Some(element) if self.press(element, pointer)? => Ok(Some(element)),
            _ => Ok(None),
        }
    }

    /// Move the dragged overlay. Returns the clamped position written, or
    /// `None` when idle, the pointer is foreign, or the container has no area.
    pub fn pointer_move(
        &self,
        input: &PointerInput,
        rect: ContainerRect,
    ) -> Result<Option<Position>, AppError> {
        let mut drag = lock_mutex(&self.drag, "drag")?;
        if drag.active().is_none() {
            return Ok(None);
        }
        let mut layout = write_lock(&self.layout, "layout")?;
        Ok(drag.pointer_move(input, rect, &mut layout))
    }

    pub fn release(&self, pointer: PointerId) -> Result<(), AppError> {
        lock_mutex(&self.drag, "drag")?.release(pointer);
        Ok(())
    }

    /// End any drag, e.g. when the preview unmounts.
    pub fn cancel_drag(&self) -> Result<(), AppError> {
        lock_mutex(&self.drag, "drag")?.cancel();
        Ok(())
    }

    pub fn active_drag(&self) -> Result<Option<OverlayKind>, AppError> {
        Ok(lock_mutex(&self.drag, "drag")?.active())
    }
}
