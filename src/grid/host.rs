use crate::grid::model::{GridColor, Point, Rect, Size};
use crate::grid::render::MaskBitmap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Arrow,
    SizeWestEast,
    SizeNorthSouth,
    Move,
}

/// The window the controller drives. Coordinates passed in and out are screen
/// coordinates unless named `client`.
pub trait FrameHost {
    /// Outer window rectangle in screen coordinates. The window has no border,
    /// so its size is also the client size.
    fn frame_rect(&self) -> Rect;

    fn client_size(&self) -> Size {
        self.frame_rect().size()
    }

    fn client_to_screen(&self, client: Point) -> Point {
        self.frame_rect().origin().offset_by(client)
    }

    /// Moves and resizes in one step.
    fn set_frame_rect(&mut self, rect: Rect);

    fn set_frame_position(&mut self, origin: Point) {
        let size = self.frame_rect().size();
        self.set_frame_rect(Rect::from_origin_size(origin, size));
    }

    fn capture_pointer(&mut self);
    fn release_pointer(&mut self);
    fn has_capture(&self) -> bool;
    fn set_cursor(&mut self, cursor: CursorShape);

    /// Excludes every pixel of `mask` equal to `sentinel` from the window.
    /// Returns `false` when the platform could not shape the window.
    fn set_window_clip_region(&mut self, mask: &MaskBitmap, sentinel: GridColor) -> bool;

    /// Shows `mask` as the window content.
    fn present(&mut self, mask: &MaskBitmap);

    fn close(&mut self);
}
