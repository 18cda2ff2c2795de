use crate::grid::model::{GridColor, Point, Rect, NEAR_SENTINEL_COLOR, WHITE};
use crate::grid::render::MaskBitmap;
use crate::grid::resources::{IconImage, ResourceLocator, ICON_SIZE};
use crate::grid::toolbar_icons::{icon_bitmap, icon_for_tool, icon_resource_name, ToolbarIcon};

pub const TOOLBAR_PADDING: i32 = 5;
pub const BUTTON_SIZE: i32 = ICON_SIZE as i32 + 2 * TOOLBAR_PADDING;
pub const BUTTON_STRIDE: i32 = BUTTON_SIZE + TOOLBAR_PADDING;
pub const TOOLBAR_HEIGHT: i32 = BUTTON_SIZE + 2 * TOOLBAR_PADDING;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    GridOptions,
    SetAspectRatio,
    LockAspectRatio,
    ShowGrid,
    ShowGoldenLines,
    ShowFrame,
    Quit,
}

impl ToolId {
    pub const ALL: [ToolId; 7] = [
        ToolId::GridOptions,
        ToolId::SetAspectRatio,
        ToolId::LockAspectRatio,
        ToolId::ShowGrid,
        ToolId::ShowGoldenLines,
        ToolId::ShowFrame,
        ToolId::Quit,
    ];

    pub fn is_check_tool(self) -> bool {
        matches!(
            self,
            ToolId::LockAspectRatio | ToolId::ShowGrid | ToolId::ShowGoldenLines | ToolId::ShowFrame
        )
    }
}

/// A completed click on a tool. For check tools `checked` is the state after toggling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolEvent {
    pub id: ToolId,
    pub checked: bool,
}

#[derive(Debug, Clone)]
struct ToolButton {
    id: ToolId,
    rect: Rect,
    checked: bool,
}

#[derive(Debug, Clone)]
struct LoadedIcon {
    icon: ToolbarIcon,
    image: IconImage,
}

/// Custom-painted button strip along the top of the window.
#[derive(Debug, Clone)]
pub struct Toolbar {
    buttons: Vec<ToolButton>,
    icons: Vec<LoadedIcon>,
    pressed: Option<ToolId>,
}

impl Toolbar {
    pub fn new(resources: &dyn ResourceLocator) -> Self {
        let buttons = ToolId::ALL
            .into_iter()
            .enumerate()
            .map(|(idx, id)| ToolButton {
                id,
                rect: Rect::new(
                    TOOLBAR_PADDING + idx as i32 * BUTTON_STRIDE,
                    TOOLBAR_PADDING,
                    BUTTON_SIZE,
                    BUTTON_SIZE,
                ),
                checked: false,
            })
            .collect();

        let icons = crate::grid::toolbar_icons::ALL_ICONS
            .into_iter()
            .filter_map(|icon| {
                resources
                    .icon(icon_resource_name(icon))
                    .map(|image| LoadedIcon { icon, image })
            })
            .collect();

        Self {
            buttons,
            icons,
            pressed: None,
        }
    }

    pub fn height(&self) -> i32 {
        TOOLBAR_HEIGHT
    }

    /// X coordinate where the next button would start; the move handle begins here.
    pub fn buttons_extent(&self) -> i32 {
        TOOLBAR_PADDING + self.buttons.len() as i32 * BUTTON_STRIDE
    }

    pub fn button_rect(&self, id: ToolId) -> Option<Rect> {
        self.buttons.iter().find(|b| b.id == id).map(|b| b.rect)
    }

    pub fn set_tool_checked(&mut self, id: ToolId, checked: bool) {
        if let Some(button) = self.buttons.iter_mut().find(|b| b.id == id) {
            button.checked = checked && id.is_check_tool();
        }
    }

    pub fn is_tool_checked(&self, id: ToolId) -> bool {
        self.buttons.iter().any(|b| b.id == id && b.checked)
    }

    pub fn hit_test(&self, point: Point) -> Option<ToolId> {
        self.buttons
            .iter()
            .find(|b| b.rect.contains(point))
            .map(|b| b.id)
    }

    pub fn pressed(&self) -> Option<ToolId> {
        self.pressed
    }

    /// Arms the button under `point`. Returns `true` when a button was hit.
    pub fn press(&mut self, point: Point) -> bool {
        self.pressed = self.hit_test(point);
        self.pressed.is_some()
    }

    /// Fires the armed button if the pointer is released over it.
    pub fn release(&mut self, point: Point) -> Option<ToolEvent> {
        let pressed = self.pressed.take()?;
        if self.hit_test(point) != Some(pressed) {
            return None;
        }
        let button = self.buttons.iter_mut().find(|b| b.id == pressed)?;
        if pressed.is_check_tool() {
            button.checked = !button.checked;
        }
        Some(ToolEvent {
            id: pressed,
            checked: button.checked,
        })
    }

    pub fn cancel_press(&mut self) {
        self.pressed = None;
    }

    pub fn paint(&self, mask: &mut MaskBitmap, background: GridColor) {
        let background = background.resolve_sentinel_collision();
        for button in &self.buttons {
            let fill = if self.pressed == Some(button.id) {
                background.shaded(35)
            } else if button.checked {
                background.shaded(15)
            } else {
                background
            };
            mask.fill_rect(button.rect, fill);
            if button.checked {
                mask.outline_inside(button.rect, 1, WHITE);
            }

            let icon = icon_for_tool(button.id, button.checked);
            let origin = Point::new(
                button.rect.x + TOOLBAR_PADDING,
                button.rect.y + TOOLBAR_PADDING,
            );
            match self.icons.iter().find(|loaded| loaded.icon == icon) {
                Some(loaded) => mask.blit_rgba(
                    origin.x,
                    origin.y,
                    loaded.image.width,
                    loaded.image.height,
                    &loaded.image.rgba,
                ),
                None => paint_glyph(mask, origin, icon),
            }
        }
    }
}

fn paint_glyph(mask: &mut MaskBitmap, origin: Point, icon: ToolbarIcon) {
    let rows = icon_bitmap(icon);
    let cols = rows.iter().map(|row| row.len()).max().unwrap_or(0) as i32;
    let side = cols.max(rows.len() as i32);
    if side == 0 {
        return;
    }
    let scale = ICON_SIZE as i32 / side;
    let offset_x = origin.x + (ICON_SIZE as i32 - cols * scale) / 2;
    let offset_y = origin.y + (ICON_SIZE as i32 - rows.len() as i32 * scale) / 2;
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, bit) in row.bytes().enumerate() {
            if bit != b'1' {
                continue;
            }
            mask.fill_rect(
                Rect::new(
                    offset_x + col_idx as i32 * scale,
                    offset_y + row_idx as i32 * scale,
                    scale,
                    scale,
                ),
                NEAR_SENTINEL_COLOR,
            );
        }
    }
}
