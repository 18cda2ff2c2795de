use crate::grid::model::{Point, Rect, ResizeEdge, Size, HANDLE_SIDE};
use crate::grid::settings::GridConfig;

/// Rectangles derived from the client size, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRects {
    pub client: Rect,
    pub toolbar: Rect,
    /// Everything below the toolbar band.
    pub area: Rect,
    /// Where grid and golden lines are drawn; `area` unless the frame band is shown.
    pub grid: Rect,
    pub right_handle: Rect,
    pub left_handle: Rect,
    pub top_handle: Rect,
    pub bottom_handle: Rect,
    pub move_handle: Rect,
}

impl LayoutRects {
    /// `toolbar_extent` is the x coordinate just past the last toolbar button.
    pub fn compute(
        client: Size,
        toolbar_height: i32,
        config: &GridConfig,
        toolbar_extent: i32,
    ) -> Option<Self> {
        if !client.is_positive() {
            return None;
        }
        let toolbar_height = toolbar_height.clamp(0, client.height);
        let client_rect = Rect::new(0, 0, client.width, client.height);
        let toolbar = Rect::new(0, 0, client.width, toolbar_height);
        let area = Rect::new(0, toolbar_height, client.width, client.height - toolbar_height);
        let grid = if config.show_frame {
            area.inset(config.frame_thickness as i32)
        } else {
            area
        };

        let half = HANDLE_SIDE / 2;
        let mid_x = area.x + area.width / 2;
        let mid_y = area.y + area.height / 2;
        let handle = |cx: i32, cy: i32| Rect::new(cx - half, cy - half, HANDLE_SIDE, HANDLE_SIDE);

        let extent = toolbar_extent.clamp(0, client.width);

        Some(Self {
            client: client_rect,
            toolbar,
            area,
            grid,
            right_handle: handle(area.right() - 1, mid_y),
            left_handle: handle(area.x, mid_y),
            top_handle: handle(mid_x, area.y),
            bottom_handle: handle(mid_x, area.bottom() - 1),
            move_handle: Rect::new(extent, 0, client.width - extent, toolbar_height),
        })
    }

    pub fn handle(&self, edge: ResizeEdge) -> Rect {
        match edge {
            ResizeEdge::Left => self.left_handle,
            ResizeEdge::Right => self.right_handle,
            ResizeEdge::Top => self.top_handle,
            ResizeEdge::Bottom => self.bottom_handle,
        }
    }

    pub fn handles(&self) -> [(ResizeEdge, Rect); 4] {
        [
            (ResizeEdge::Right, self.right_handle),
            (ResizeEdge::Left, self.left_handle),
            (ResizeEdge::Top, self.top_handle),
            (ResizeEdge::Bottom, self.bottom_handle),
        ]
    }

    /// First handle under `point`, checked right, left, top, bottom.
    pub fn handle_at(&self, point: Point) -> Option<ResizeEdge> {
        self.handles()
            .into_iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(edge, _)| edge)
    }

    pub fn in_move_handle(&self, point: Point) -> bool {
        self.move_handle.contains(point)
    }

    pub fn in_area(&self, point: Point) -> bool {
        self.area.contains(point)
    }
}
