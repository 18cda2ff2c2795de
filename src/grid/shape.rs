use crate::grid::host::FrameHost;
use crate::grid::model::{GridColor, Point, Rect};
use crate::grid::render::MaskBitmap;

/// Visible part of a mask as a list of disjoint rectangles. Each row is split into runs of
/// non-sentinel pixels; consecutive rows with identical runs share one rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShapeRegion {
    rects: Vec<Rect>,
}

impl ShapeRegion {
    pub fn from_mask(mask: &MaskBitmap, sentinel: GridColor) -> Self {
        let mut rects = Vec::new();
        let mut open: Vec<Rect> = Vec::new();
        let mut prev_spans: Vec<(i32, i32)> = Vec::new();

        for y in 0..mask.height() as i32 {
            let spans = row_spans(mask, y, sentinel);
            if !open.is_empty() && spans == prev_spans {
                for rect in &mut open {
                    rect.height += 1;
                }
                continue;
            }
            rects.append(&mut open);
            open = spans
                .iter()
                .map(|&(x0, x1)| Rect::new(x0, y, x1 - x0, 1))
                .collect();
            prev_spans = spans;
        }
        rects.append(&mut open);

        Self { rects }
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.rects.iter().any(|rect| rect.contains(point))
    }

    /// Number of visible pixels.
    pub fn area(&self) -> i64 {
        self.rects
            .iter()
            .map(|rect| rect.width as i64 * rect.height as i64)
            .sum()
    }
}

fn row_spans(mask: &MaskBitmap, y: i32, sentinel: GridColor) -> Vec<(i32, i32)> {
    let mut spans = Vec::new();
    let mut start = None;
    let width = mask.width() as i32;
    for x in 0..width {
        let visible = mask.pixel(x, y).is_some_and(|c| c != sentinel);
        match (visible, start) {
            (true, None) => start = Some(x),
            (false, Some(x0)) => {
                spans.push((x0, x));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(x0) = start {
        spans.push((x0, width));
    }
    spans
}

/// Applies the mask as the window shape. A platform failure leaves the window rectangular.
pub fn apply_shape(host: &mut dyn FrameHost, mask: &MaskBitmap, sentinel: GridColor) -> bool {
    let shaped = host.set_window_clip_region(mask, sentinel);
    if !shaped {
        tracing::warn!(
            width = mask.width(),
            height = mask.height(),
            "window shaping failed; continuing with a rectangular window"
        );
    }
    shaped
}
