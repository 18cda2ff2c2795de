use crate::grid::host::{CursorShape, FrameHost};
use crate::grid::layout::LayoutRects;
use crate::grid::model::{Point, Rect, ResizeEdge, MAX_CLIENT_DIM, MIN_CLIENT_DIM};
use crate::grid::settings::AspectRatioState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Moving {
        start_pointer: Point,
        start_origin: Point,
    },
    Resizing {
        edge: ResizeEdge,
        start_pointer: Point,
        start_frame: Rect,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDownOutcome {
    Move,
    Resize(ResizeEdge),
    NotHandled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragUpdate {
    None,
    Moved,
    Resized(ResizeEdge),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEnd {
    None,
    Moved,
    Resized(ResizeEdge),
}

/// Move/resize state machine. Owns the pointer capture: at most one of hover tracking,
/// moving or resizing holds it, and every exit path releases it.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: InteractionState,
    hover_captured: bool,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, InteractionState::Idle)
    }

    pub fn hover_captured(&self) -> bool {
        self.hover_captured
    }

    pub fn pointer_down(
        &mut self,
        host: &mut dyn FrameHost,
        layout: &LayoutRects,
        pos: Point,
    ) -> PointerDownOutcome {
        if !self.is_idle() {
            return PointerDownOutcome::NotHandled;
        }

        let start_pointer = host.client_to_screen(pos);
        let start_frame = host.frame_rect();

        if layout.in_move_handle(pos) {
            self.begin_drag(host);
            self.state = InteractionState::Moving {
                start_pointer,
                start_origin: start_frame.origin(),
            };
            host.set_cursor(CursorShape::Move);
            tracing::debug!(?start_pointer, "move started");
            return PointerDownOutcome::Move;
        }

        if let Some(edge) = layout.handle_at(pos) {
            self.begin_drag(host);
            self.state = InteractionState::Resizing {
                edge,
                start_pointer,
                start_frame,
            };
            tracing::debug!(?edge, ?start_frame, "resize started");
            return PointerDownOutcome::Resize(edge);
        }

        self.track_hover(host, layout, pos);
        PointerDownOutcome::NotHandled
    }

    pub fn pointer_move(
        &mut self,
        host: &mut dyn FrameHost,
        layout: &LayoutRects,
        pos: Point,
        left_down: bool,
        aspect: &AspectRatioState,
        toolbar_height: i32,
    ) -> DragUpdate {
        match self.state {
            InteractionState::Idle => {
                self.track_hover(host, layout, pos);
                DragUpdate::None
            }
            InteractionState::Moving {
                start_pointer,
                start_origin,
            } if left_down => {
                let pointer = host.client_to_screen(pos);
                host.set_frame_position(move_frame(start_origin, start_pointer, pointer));
                DragUpdate::Moved
            }
            InteractionState::Resizing {
                edge,
                start_pointer,
                start_frame,
            } if left_down => {
                let delta = host.client_to_screen(pos).delta_from(start_pointer);
                let next = resize_frame(start_frame, edge, delta, aspect, toolbar_height);
                if next != host.frame_rect() {
                    host.set_frame_rect(next);
                }
                DragUpdate::Resized(edge)
            }
            _ => DragUpdate::None,
        }
    }

    pub fn pointer_up(&mut self, host: &mut dyn FrameHost) -> DragEnd {
        let ended = self.finish(host);
        host.set_cursor(CursorShape::Arrow);
        ended
    }

    /// Capture or focus was taken away; ends any drag without a stuck capture.
    pub fn cancel(&mut self, host: &mut dyn FrameHost) -> DragEnd {
        let ended = self.finish(host);
        host.set_cursor(CursorShape::Arrow);
        if ended != DragEnd::None {
            tracing::debug!(?ended, "drag cancelled");
        }
        ended
    }

    fn finish(&mut self, host: &mut dyn FrameHost) -> DragEnd {
        let ended = match std::mem::take(&mut self.state) {
            InteractionState::Idle => DragEnd::None,
            InteractionState::Moving { .. } => DragEnd::Moved,
            InteractionState::Resizing { edge, .. } => DragEnd::Resized(edge),
        };
        if host.has_capture() {
            host.release_pointer();
        }
        self.hover_captured = false;
        ended
    }

    fn begin_drag(&mut self, host: &mut dyn FrameHost) {
        if !host.has_capture() {
            host.capture_pointer();
        }
        self.hover_captured = false;
    }

    fn track_hover(&mut self, host: &mut dyn FrameHost, layout: &LayoutRects, pos: Point) {
        let inside = layout.in_area(pos);
        if inside {
            if !self.hover_captured {
                host.capture_pointer();
                self.hover_captured = true;
            }
            host.set_cursor(hover_cursor(layout, pos));
        } else if self.hover_captured {
            if host.has_capture() {
                host.release_pointer();
            }
            self.hover_captured = false;
            host.set_cursor(CursorShape::Arrow);
        }
    }
}

pub fn hover_cursor(layout: &LayoutRects, pos: Point) -> CursorShape {
    match layout.handle_at(pos) {
        Some(ResizeEdge::Left | ResizeEdge::Right) => CursorShape::SizeWestEast,
        Some(ResizeEdge::Top | ResizeEdge::Bottom) => CursorShape::SizeNorthSouth,
        None => CursorShape::Arrow,
    }
}

pub fn move_frame(start_origin: Point, start_pointer: Point, pointer: Point) -> Point {
    start_origin.offset_by(pointer.delta_from(start_pointer))
}

/// New frame rectangle for a drag of `edge` by `delta` (screen pixels). The area below the
/// toolbar never shrinks under the minimum dimension; when the ratio is locked the other
/// dimension is derived from the dragged one. Left and top drags keep the opposite edge fixed.
pub fn resize_frame(
    start: Rect,
    edge: ResizeEdge,
    delta: Point,
    aspect: &AspectRatioState,
    toolbar_height: i32,
) -> Rect {
    let min_width = MIN_CLIENT_DIM;
    let min_height = (toolbar_height + MIN_CLIENT_DIM).min(MAX_CLIENT_DIM);
    let max_area_height = (MAX_CLIENT_DIM - toolbar_height).max(MIN_CLIENT_DIM);

    let (mut width, mut height) = (start.width, start.height);
    match edge {
        ResizeEdge::Right => width = width.saturating_add(delta.x),
        ResizeEdge::Bottom => height = height.saturating_add(delta.y),
        ResizeEdge::Left => width = width.saturating_sub(delta.x),
        ResizeEdge::Top => height = height.saturating_sub(delta.y),
    }
    width = width.clamp(min_width, MAX_CLIENT_DIM);
    height = height.clamp(min_height, MAX_CLIENT_DIM);

    if let Some(ratio) = aspect
        .locked
        .then_some(aspect.ratio)
        .and_then(AspectRatioState::clamp_ratio)
    {
        if edge.is_horizontal() {
            let area_height = (width as f64 / ratio).min(MAX_CLIENT_DIM as f64) as i32;
            height = area_height.clamp(MIN_CLIENT_DIM, max_area_height) + toolbar_height;
        } else {
            let area_width = ((height - toolbar_height) as f64 * ratio).min(MAX_CLIENT_DIM as f64);
            width = (area_width as i32).clamp(MIN_CLIENT_DIM, MAX_CLIENT_DIM);
        }
    }

    let x = match edge {
        ResizeEdge::Left => start.right() - width,
        _ => start.x,
    };
    let y = match edge {
        ResizeEdge::Top => start.bottom() - height,
        _ => start.y,
    };
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOOLBAR: i32 = 52;

    fn unlocked() -> AspectRatioState {
        AspectRatioState::default()
    }

    #[test]
    fn right_and_bottom_drags_grow_in_place() {
        let start = Rect::new(100, 100, 300, 252);
        assert_eq!(
            resize_frame(start, ResizeEdge::Right, Point::new(40, 9), &unlocked(), TOOLBAR),
            Rect::new(100, 100, 340, 252)
        );
        assert_eq!(
            resize_frame(start, ResizeEdge::Bottom, Point::new(9, 50), &unlocked(), TOOLBAR),
            Rect::new(100, 100, 300, 302)
        );
    }

    #[test]
    fn left_and_top_drags_move_the_origin() {
        let start = Rect::new(100, 100, 300, 252);
        assert_eq!(
            resize_frame(start, ResizeEdge::Left, Point::new(30, 0), &unlocked(), TOOLBAR),
            Rect::new(130, 100, 270, 252)
        );
        assert_eq!(
            resize_frame(start, ResizeEdge::Top, Point::new(0, -20), &unlocked(), TOOLBAR),
            Rect::new(100, 80, 300, 272)
        );
    }

    #[test]
    fn clamped_left_drag_keeps_right_edge_fixed() {
        let start = Rect::new(100, 100, 300, 252);
        let next = resize_frame(start, ResizeEdge::Left, Point::new(500, 0), &unlocked(), TOOLBAR);
        assert_eq!(next.width, MIN_CLIENT_DIM);
        assert_eq!(next.right(), start.right());
    }

    #[test]
    fn clamped_top_drag_keeps_bottom_edge_fixed() {
        let start = Rect::new(100, 100, 300, 252);
        let next = resize_frame(start, ResizeEdge::Top, Point::new(0, 900), &unlocked(), TOOLBAR);
        assert_eq!(next.height, TOOLBAR + MIN_CLIENT_DIM);
        assert_eq!(next.bottom(), start.bottom());
    }

    #[test]
    fn locked_ratio_derives_the_other_dimension() {
        let locked = AspectRatioState {
            ratio: 1.5,
            locked: true,
        };
        let start = Rect::new(0, 0, 300, 252);

        let wide = resize_frame(start, ResizeEdge::Right, Point::new(100, 0), &locked, TOOLBAR);
        assert_eq!(wide, Rect::new(0, 0, 400, 266 + TOOLBAR));

        let tall = resize_frame(start, ResizeEdge::Bottom, Point::new(0, 100), &locked, TOOLBAR);
        assert_eq!(tall, Rect::new(0, 0, 450, 352));
    }

    #[test]
    fn locked_derivation_respects_minimum() {
        let locked = AspectRatioState {
            ratio: 10.0,
            locked: true,
        };
        let start = Rect::new(0, 0, 300, 82);
        let next = resize_frame(start, ResizeEdge::Left, Point::new(250, 0), &locked, TOOLBAR);
        assert_eq!(next.width, 50);
        assert_eq!(next.height, TOOLBAR + MIN_CLIENT_DIM);
    }

    #[test]
    fn extreme_locked_ratio_stays_within_bounds() {
        let tiny = AspectRatioState {
            ratio: 1e-12,
            locked: true,
        };
        let start = Rect::new(0, 0, 400, 452);
        let next = resize_frame(start, ResizeEdge::Right, Point::new(10, 0), &tiny, TOOLBAR);
        assert_eq!(next.width, 410);
        assert!(next.height > TOOLBAR && next.height <= MAX_CLIENT_DIM);

        let huge = AspectRatioState {
            ratio: 1e12,
            locked: true,
        };
        let next = resize_frame(start, ResizeEdge::Bottom, Point::new(0, 10), &huge, TOOLBAR);
        assert!(next.width >= MIN_CLIENT_DIM && next.width <= MAX_CLIENT_DIM);
        assert_eq!(next.height, 462);
    }

    #[test]
    fn move_applies_pointer_delta() {
        assert_eq!(
            move_frame(Point::new(10, 20), Point::new(100, 100), Point::new(130, 90)),
            Point::new(40, 10)
        );
    }
}
