//! Pointer/drag controller.
//!
//! An explicit `Idle` / `Dragging` state machine. Move and release listeners
//! exist only while a drag is active: entering `Dragging` asks the
//! [`PointerHost`] for a [`Subscription`], and leaving it drops that
//! subscription, which detaches the listeners.
//!
//! Mouse and touch input are handled identically. A touch drag follows the
//! touch point that started it; any other simultaneous touch is ignored.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::layout::LayoutModel;
use crate::models::{OverlayKind, Position};

/// Identity of the pointer driving a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

/// Raw pointer input in client coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Mouse { x: f64, y: f64 },
    /// All touch points currently on the surface, in arrival order.
    Touch(Vec<TouchPoint>),
}

impl PointerInput {
    /// The pointer that would start a gesture: the mouse, or the first touch.
    pub fn primary(&self) -> Option<(PointerId, f64, f64)> {
        match self {
            PointerInput::Mouse { x, y } => Some((PointerId::Mouse, *x, *y)),
            PointerInput::Touch(points) => points
                .first()
                .map(|t| (PointerId::Touch(t.id), t.x, t.y)),
        }
    }

    /// Coordinates of `pointer` in this input, if it is present.
    fn locate(&self, pointer: PointerId) -> Option<(f64, f64)> {
        match (self, pointer) {
            (PointerInput::Mouse { x, y }, PointerId::Mouse) => Some((*x, *y)),
            (PointerInput::Touch(points), PointerId::Touch(id)) => {
                points.iter().find(|t| t.id == id).map(|t| (t.x, t.y))
            }
            _ => None,
        }
    }
}

/// Bounding rectangle of the preview container, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    /// Convert a client point to a container percentage, unclamped. `None`
    /// for a collapsed container or a non-finite result.
    pub fn to_percent(&self, x: f64, y: f64) -> Option<Position> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        let px = (x - self.left) / self.width * 100.0;
        let py = (y - self.top) / self.height * 100.0;
        (px.is_finite() && py.is_finite()).then(|| Position::new(px, py))
    }
}

// ── Listener lifecycle ────────────────────────────────────────────────────────

/// Detaches listeners when dropped.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// A subscription with nothing to detach.
    pub fn none() -> Self {
        Self { detach: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

/// The surface that delivers global move/release events.
pub trait PointerHost: Send + Sync {
    /// Attach move and release listeners (mouse and touch) until the returned
    /// subscription is dropped.
    fn attach_drag_listeners(&self) -> Subscription;
}

/// Host with no event source; the embedding shell feeds events directly.
#[derive(Debug, Default)]
pub struct DetachedHost;

impl PointerHost for DetachedHost {
    fn attach_drag_listeners(&self) -> Subscription {
        Subscription::none()
    }
}

/// Host that counts attached listener sets.
#[derive(Debug, Default)]
pub struct CountingHost {
    active: Arc<AtomicUsize>,
    attached_total: AtomicUsize,
}

impl CountingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listener sets currently attached.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Listener sets ever attached.
    pub fn attached_total(&self) -> usize {
        self.attached_total.load(Ordering::SeqCst)
    }
}

impl PointerHost for CountingHost {
    fn attach_drag_listeners(&self) -> Subscription {
        self.active.fetch_add(1, Ordering::SeqCst);
        self.attached_total.fetch_add(1, Ordering::SeqCst);
        let active = Arc::clone(&self.active);
        Subscription::new(move || {
            active.fetch_sub(1, Ordering::SeqCst);
        })
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

#[derive(Debug)]
enum DragState {
    Idle,
    Dragging {
        element: OverlayKind,
        pointer: PointerId,
        _listeners: Subscription,
    },
}

pub struct DragController {
    state: DragState,
    host: Arc<dyn PointerHost>,
}

impl std::fmt::Debug for DragController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("state", &self.state)
            .finish()
    }
}

impl DragController {
    pub fn new(host: Arc<dyn PointerHost>) -> Self {
        Self {
            state: DragState::Idle,
            host,
        }
    }

    /// Overlay currently being dragged.
    pub fn active(&self) -> Option<OverlayKind> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { element, .. } => Some(*element),
        }
    }

    /// `Idle → Dragging(element)`. Ignored (returns `false`) while another
    /// drag is active.
    pub fn press(
        &mut self,
        element: OverlayKind,
        pointer: PointerId,
        layout: &mut LayoutModel,
    ) -> bool {
        if let DragState::Dragging { element: current, .. } = &self.state {
            tracing::debug!(?element, ?current, "press ignored, drag already active");
            return false;
        }
        layout.touch();
        self.state = DragState::Dragging {
            element,
            pointer,
            _listeners: self.host.attach_drag_listeners(),
        };
        tracing::debug!(?element, ?pointer, "drag started");
        true
    }

    /// `Dragging(e) → Dragging(e)`: write the clamped position of the active
    /// pointer into overlay `e`. Returns the new position.
    pub fn pointer_move(
        &mut self,
        input: &PointerInput,
        rect: ContainerRect,
        layout: &mut LayoutModel,
    ) -> Option<Position> {
        let DragState::Dragging { element, pointer, .. } = &self.state else {
            return None;
        };
        let (x, y) = input.locate(*pointer)?;
        let position = rect.to_percent(x, y)?.clamp_to_drag_region();
        layout.set_position(*element, position);
        Some(position)
    }

    /// `Dragging → Idle` when `pointer` is the one driving the drag.
    pub fn release(&mut self, pointer: PointerId) {
        if let DragState::Dragging { pointer: active, .. } = &self.state {
            if *active == pointer {
                self.finish("released");
            }
        }
    }

    /// `Dragging → Idle` regardless of pointer (gesture cancelled externally).
    pub fn cancel(&mut self) {
        if matches!(self.state, DragState::Dragging { .. }) {
            self.finish("cancelled");
        }
    }

    fn finish(&mut self, reason: &'static str) {
        // Dropping the old state drops the subscription and detaches listeners.
        let previous = std::mem::replace(&mut self.state, DragState::Idle);
        if let DragState::Dragging { element, .. } = previous {
            tracing::debug!(?element, reason, "drag ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: ContainerRect = ContainerRect {
        left: 100.0,
        top: 50.0,
        width: 400.0,
        height: 400.0,
    };

    fn controller() -> (DragController, Arc<CountingHost>) {
        let host = Arc::new(CountingHost::new());
        (DragController::new(host.clone()), host)
    }

    fn touch(id: u64, x: f64, y: f64) -> TouchPoint {
        TouchPoint { id, x, y }
    }

    #[test]
    fn move_maps_client_point_to_percent() {
        let (mut drag, _) = controller();
        let mut layout = LayoutModel::default();
        drag.press(OverlayKind::Name, PointerId::Mouse, &mut layout);
        let pos = drag
            .pointer_move(&PointerInput::Mouse { x: 340.0, y: 210.0 }, RECT, &mut layout)
            .expect("position");
        assert_eq!(pos, Position::new(60.0, 40.0));
        assert_eq!(layout.element(OverlayKind::Name).position, Position::new(60.0, 40.0));
    }

    #[test]
    fn positions_stay_inside_interior_region() {
        let (mut drag, _) = controller();
        let mut layout = LayoutModel::default();
        drag.press(OverlayKind::Number, PointerId::Mouse, &mut layout);
        let far = [(-5000.0, -5000.0), (9000.0, 9000.0), (100.0, 9000.0), (-1.0, 250.0)];
        for (x, y) in far {
            let pos = drag
                .pointer_move(&PointerInput::Mouse { x, y }, RECT, &mut layout)
                .expect("position");
            assert!((10.0..=90.0).contains(&pos.x), "x out of range: {}", pos.x);
            assert!((10.0..=90.0).contains(&pos.y), "y out of range: {}", pos.y);
        }
    }

    #[test]
    fn listeners_live_only_while_dragging() {
        let (mut drag, host) = controller();
        let mut layout = LayoutModel::default();
        assert_eq!(host.active(), 0);
        drag.press(OverlayKind::Slogan, PointerId::Mouse, &mut layout);
        assert_eq!(host.active(), 1);
        drag.release(PointerId::Mouse);
        assert_eq!(host.active(), 0);
        drag.press(OverlayKind::Name, PointerId::Touch(3), &mut layout);
        drag.cancel();
        assert_eq!(host.active(), 0);
        assert_eq!(host.attached_total(), 2);
    }

    #[test]
    fn second_press_while_dragging_is_ignored() {
        let (mut drag, host) = controller();
        let mut layout = LayoutModel::default();
        assert!(drag.press(OverlayKind::Name, PointerId::Mouse, &mut layout));
        assert!(!drag.press(OverlayKind::Number, PointerId::Touch(1), &mut layout));
        assert_eq!(drag.active(), Some(OverlayKind::Name));
        assert_eq!(host.active(), 1);
    }

    #[test]
    fn press_marks_layout_stale() {
        let (mut drag, _) = controller();
        let mut layout = LayoutModel::default();
        let rev = layout.revision();
        layout.mark_saved(rev, String::new());
        drag.press(OverlayKind::Name, PointerId::Mouse, &mut layout);
        assert!(!layout.is_saved());
    }

    #[test]
    fn touch_drag_follows_the_initiating_touch_only() {
        let (mut drag, _) = controller();
        let mut layout = LayoutModel::default();
        drag.press(OverlayKind::Number, PointerId::Touch(7), &mut layout);

        let input = PointerInput::Touch(vec![touch(9, 500.0, 450.0), touch(7, 300.0, 250.0)]);
        let pos = drag.pointer_move(&input, RECT, &mut layout).expect("position");
        assert_eq!(pos, Position::new(50.0, 50.0));

        // A second finger lifting does not end the drag.
        drag.release(PointerId::Touch(9));
        assert_eq!(drag.active(), Some(OverlayKind::Number));

        // Moves that no longer include the active touch are ignored.
        let stray = PointerInput::Touch(vec![touch(9, 120.0, 60.0)]);
        assert_eq!(drag.pointer_move(&stray, RECT, &mut layout), None);

        drag.release(PointerId::Touch(7));
        assert_eq!(drag.active(), None);
    }

    #[test]
    fn mouse_and_touch_produce_identical_positions() {
        let mut mouse_layout = LayoutModel::default();
        let mut touch_layout = LayoutModel::default();
        let (mut mouse, _) = controller();
        let (mut finger, _) = controller();
        mouse.press(OverlayKind::Name, PointerId::Mouse, &mut mouse_layout);
        finger.press(OverlayKind::Name, PointerId::Touch(1), &mut touch_layout);
        let a = mouse.pointer_move(&PointerInput::Mouse { x: 220.0, y: 330.0 }, RECT, &mut mouse_layout);
        let b = finger.pointer_move(
            &PointerInput::Touch(vec![touch(1, 220.0, 330.0)]),
            RECT,
            &mut touch_layout,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn idle_moves_and_collapsed_containers_do_nothing() {
        let (mut drag, _) = controller();
        let mut layout = LayoutModel::default();
        let input = PointerInput::Mouse { x: 200.0, y: 200.0 };
        assert_eq!(drag.pointer_move(&input, RECT, &mut layout), None);

        drag.press(OverlayKind::Name, PointerId::Mouse, &mut layout);
        let collapsed = ContainerRect {
            width: 0.0,
            ..RECT
        };
        assert_eq!(drag.pointer_move(&input, collapsed, &mut layout), None);
        assert_eq!(layout.element(OverlayKind::Name).position, Position::new(50.0, 35.0));
    }

    #[test]
    fn non_finite_coordinates_leave_position_untouched() {
        let (mut drag, _) = controller();
        let mut layout = LayoutModel::default();
        drag.press(OverlayKind::Name, PointerId::Mouse, &mut layout);
        let input = PointerInput::Mouse { x: 200.0, y: 200.0 };

        let nan_left = ContainerRect {
            left: f64::NAN,
            ..RECT
        };
        assert_eq!(drag.pointer_move(&input, nan_left, &mut layout), None);
        let infinite_top = ContainerRect {
            top: f64::INFINITY,
            ..RECT
        };
        assert_eq!(drag.pointer_move(&input, infinite_top, &mut layout), None);
        let nan_pointer = PointerInput::Mouse { x: f64::NAN, y: 200.0 };
        assert_eq!(drag.pointer_move(&nan_pointer, RECT, &mut layout), None);

        let pos = layout.element(OverlayKind::Name).position;
        assert_eq!(pos, Position::new(50.0, 35.0));
        assert_eq!(drag.active(), Some(OverlayKind::Name));
    }
}
