use crate::grid::model::Point;

/// Window events delivered to the controller, in arrival order. Positions are client
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    PointerDown { pos: Point },
    PointerMove { pos: Point, left_down: bool },
    PointerUp { pos: Point },
    CaptureLost,
    FocusLost,
    Paint,
    Resized,
    CloseRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    UserRequest,
    CloseRequested,
}
