use crate::grid::layout::LayoutRects;
use crate::grid::model::{
    GridColor, Rect, Size, GOLDEN_RATIO, NEAR_SENTINEL_COLOR, SENTINEL_COLOR, WHITE,
};
use crate::grid::settings::GridConfig;

const HANDLE_OUTLINE: i32 = 2;

/// Offscreen RGBA buffer; pixels equal to the sentinel color are cut out of the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskBitmap {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl MaskBitmap {
    pub fn new(width: u32, height: u32, fill: GridColor) -> Self {
        let mut rgba = vec![0u8; (width as usize) * (height as usize) * 4];
        for px in rgba.chunks_exact_mut(4) {
            px.copy_from_slice(&[fill.r, fill.g, fill.b, 255]);
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }

    pub fn rgba_pixels(&self) -> &[u8] {
        &self.rgba
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<GridColor> {
        let idx = self.index(x, y)?;
        Some(GridColor::rgb(
            self.rgba[idx],
            self.rgba[idx + 1],
            self.rgba[idx + 2],
        ))
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: GridColor) {
        if let Some(idx) = self.index(x, y) {
            self.rgba[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }

    /// Fills `rect` clipped to the bitmap.
    pub fn fill_rect(&mut self, rect: Rect, color: GridColor) {
        let Some(rect) = rect.intersect(self.bounds()) else {
            return;
        };
        let row = [color.r, color.g, color.b, 255].repeat(rect.width as usize);
        for y in rect.y..rect.bottom() {
            let start = ((y as u32 * self.width + rect.x as u32) * 4) as usize;
            self.rgba[start..start + row.len()].copy_from_slice(&row);
        }
    }

    /// Fills `rect` clipped to both the bitmap and `clip`.
    pub fn fill_rect_clipped(&mut self, rect: Rect, clip: Rect, color: GridColor) {
        if let Some(rect) = rect.intersect(clip) {
            self.fill_rect(rect, color);
        }
    }

    /// Vertical line `thickness` wide, centered on column `x`, spanning `y0..y1`.
    pub fn draw_vline(&mut self, x: i32, y0: i32, y1: i32, thickness: i32, clip: Rect, color: GridColor) {
        let t = thickness.max(1);
        let rect = Rect::new(x - (t - 1) / 2, y0, t, y1 - y0);
        self.fill_rect_clipped(rect, clip, color);
    }

    /// Horizontal line `thickness` high, centered on row `y`, spanning `x0..x1`.
    pub fn draw_hline(&mut self, y: i32, x0: i32, x1: i32, thickness: i32, clip: Rect, color: GridColor) {
        let t = thickness.max(1);
        let rect = Rect::new(x0, y - (t - 1) / 2, x1 - x0, t);
        self.fill_rect_clipped(rect, clip, color);
    }

    /// Outline on the boundary pixels of `rect`; the interior is left untouched.
    pub fn stroke_rect(&mut self, rect: Rect, thickness: i32, clip: Rect, color: GridColor) {
        if rect.is_empty() {
            return;
        }
        let (left, right) = (rect.x, rect.right() - 1);
        let (top, bottom) = (rect.y, rect.bottom() - 1);
        self.draw_hline(top, rect.x, rect.right(), thickness, clip, color);
        self.draw_hline(bottom, rect.x, rect.right(), thickness, clip, color);
        self.draw_vline(left, rect.y, rect.bottom(), thickness, clip, color);
        self.draw_vline(right, rect.y, rect.bottom(), thickness, clip, color);
    }

    /// Outline drawn entirely inside `rect`.
    pub fn outline_inside(&mut self, rect: Rect, thickness: i32, color: GridColor) {
        let t = thickness.max(1).min(rect.width).min(rect.height);
        if t <= 0 {
            return;
        }
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t, rect.width, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y, t, rect.height), color);
        self.fill_rect(Rect::new(rect.right() - t, rect.y, t, rect.height), color);
    }

    /// Copies an RGBA icon at (`x`, `y`); pixels with alpha below 128 are skipped.
    pub fn blit_rgba(&mut self, x: i32, y: i32, width: u32, height: u32, rgba: &[u8]) {
        for row in 0..height as i32 {
            for col in 0..width as i32 {
                let idx = ((row as u32 * width + col as u32) * 4) as usize;
                let Some(px) = rgba.get(idx..idx + 4) else {
                    return;
                };
                if px[3] < 128 {
                    continue;
                }
                let color = GridColor::rgb(px[0], px[1], px[2]).resolve_sentinel_collision();
                self.set_pixel(x + col, y + row, color);
            }
        }
    }

    /// Device-independent bitmap order (BGRA) for the platform blit.
    pub fn to_dib_bgra(&self) -> Vec<u8> {
        let mut dib = vec![0u8; self.rgba.len()];
        convert_rgba_to_dib_bgra(&self.rgba, &mut dib);
        dib
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(((y as u32 * self.width + x as u32) * 4) as usize)
    }
}

pub fn convert_rgba_to_dib_bgra(rgba: &[u8], dib_bgra: &mut [u8]) {
    for (src, dst) in rgba.chunks_exact(4).zip(dib_bgra.chunks_exact_mut(4)) {
        dst[0] = src[2];
        dst[1] = src[1];
        dst[2] = src[0];
        dst[3] = src[3];
    }
}

/// Offsets of the inner grid lines: `len * i / segments` for `i` in `1..segments`, truncated.
pub fn grid_offsets(len: i32, segments: u32) -> Vec<i32> {
    if len <= 0 || segments < 2 {
        return Vec::new();
    }
    (1..segments as i64)
        .map(|i| (len as i64 * i / segments as i64) as i32)
        .collect()
}

/// `round(len / φ)`; the matching line sits at `len - offset`.
pub fn golden_offset(len: i32) -> i32 {
    (len as f64 / GOLDEN_RATIO).round() as i32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMask {
    pub bitmap: MaskBitmap,
    pub layout: LayoutRects,
}

/// Paints the window silhouette for `client`. Returns `None` for a non-positive size so the
/// caller keeps its previous bitmap.
pub fn render_mask(
    client: Size,
    config: &GridConfig,
    toolbar_height: i32,
    toolbar_extent: i32,
) -> Option<RenderedMask> {
    let layout = LayoutRects::compute(client, toolbar_height, config, toolbar_extent)?;
    let mut bitmap = MaskBitmap::new(client.width as u32, client.height as u32, SENTINEL_COLOR);
    let thickness = config.line_thickness.max(1) as i32;

    bitmap.fill_rect(layout.toolbar, config.toolbar_color.resolve_sentinel_collision());

    if config.show_frame {
        bitmap.fill_rect(layout.area, config.frame_color.resolve_sentinel_collision());
        bitmap.fill_rect(layout.grid, SENTINEL_COLOR);
    }

    let grid = layout.grid;
    let clip = layout.area;

    if config.show_grid && config.segments > 1 {
        let color = config.line_color.resolve_sentinel_collision();
        for dx in grid_offsets(grid.width, config.segments) {
            bitmap.draw_vline(grid.x + dx, grid.y, grid.bottom(), thickness, clip, color);
        }
        for dy in grid_offsets(grid.height, config.segments) {
            bitmap.draw_hline(grid.y + dy, grid.x, grid.right(), thickness, clip, color);
        }
    }

    if config.show_golden_lines && !grid.is_empty() {
        let color = config.golden_lines_color.resolve_sentinel_collision();
        let a = golden_offset(grid.width);
        let b = golden_offset(grid.height);
        for dx in [a, grid.width - a] {
            bitmap.draw_vline(grid.x + dx, grid.y, grid.bottom(), thickness, clip, color);
        }
        for dy in [b, grid.height - b] {
            bitmap.draw_hline(grid.y + dy, grid.x, grid.right(), thickness, clip, color);
        }
    }

    bitmap.stroke_rect(grid, thickness, clip, WHITE);

    paint_handles(&mut bitmap, &layout);

    Some(RenderedMask { bitmap, layout })
}

/// White squares with a near-black outline on the four edge midpoints.
pub fn paint_handles(bitmap: &mut MaskBitmap, layout: &LayoutRects) {
    for (_, handle) in layout.handles() {
        bitmap.fill_rect(handle, WHITE);
        bitmap.outline_inside(handle, HANDLE_OUTLINE, NEAR_SENTINEL_COLOR);
    }
}
