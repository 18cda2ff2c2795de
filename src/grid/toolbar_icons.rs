use crate::grid::toolbar::ToolId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarIcon {
    GridOptions,
    AspectRatio,
    Locked,
    Unlocked,
    Grid,
    GoldenLines,
    Frame,
    Quit,
}

pub fn icon_for_tool(tool: ToolId, checked: bool) -> ToolbarIcon {
    match tool {
        ToolId::GridOptions => ToolbarIcon::GridOptions,
        ToolId::SetAspectRatio => ToolbarIcon::AspectRatio,
        ToolId::LockAspectRatio if checked => ToolbarIcon::Locked,
        ToolId::LockAspectRatio => ToolbarIcon::Unlocked,
        ToolId::ShowGrid => ToolbarIcon::Grid,
        ToolId::ShowGoldenLines => ToolbarIcon::GoldenLines,
        ToolId::ShowFrame => ToolbarIcon::Frame,
        ToolId::Quit => ToolbarIcon::Quit,
    }
}

/// File stem looked up under `icons/` in the resource folders.
pub fn icon_resource_name(icon: ToolbarIcon) -> &'static str {
    match icon {
        ToolbarIcon::GridOptions => "grid_options",
        ToolbarIcon::AspectRatio => "aspect_ratio",
        ToolbarIcon::Locked => "lock",
        ToolbarIcon::Unlocked => "unlock",
        ToolbarIcon::Grid => "show_grid",
        ToolbarIcon::GoldenLines => "golden_lines",
        ToolbarIcon::Frame => "show_frame",
        ToolbarIcon::Quit => "quit",
    }
}

pub const ALL_ICONS: [ToolbarIcon; 8] = [
    ToolbarIcon::GridOptions,
    ToolbarIcon::AspectRatio,
    ToolbarIcon::Locked,
    ToolbarIcon::Unlocked,
    ToolbarIcon::Grid,
    ToolbarIcon::GoldenLines,
    ToolbarIcon::Frame,
    ToolbarIcon::Quit,
];

pub fn icon_bitmap(icon: ToolbarIcon) -> &'static [&'static str] {
    match icon {
        ToolbarIcon::GridOptions => &[
            "0011100", "0100010", "1011101", "1010101", "1011101", "0100010", "0011100",
        ],
        ToolbarIcon::AspectRatio => &[
            "1111111", "1000001", "1011101", "1010101", "1011101", "1000001", "1111111",
        ],
        ToolbarIcon::Locked => &[
            "0011100", "0100010", "0100010", "1111111", "1110111", "1110111", "1111111",
        ],
        ToolbarIcon::Unlocked => &[
            "0011100", "0100010", "0000010", "1111111", "1110111", "1110111", "1111111",
        ],
        ToolbarIcon::Grid => &[
            "1111111", "1001001", "1001001", "1111111", "1001001", "1001001", "1111111",
        ],
        ToolbarIcon::GoldenLines => &[
            "0010100", "0010100", "1111111", "0010100", "1111111", "0010100", "0010100",
        ],
        ToolbarIcon::Frame => &[
            "1111111", "1111111", "1100011", "1100011", "1100011", "1111111", "1111111",
        ],
        ToolbarIcon::Quit => &[
            "1000001", "0100010", "0010100", "0001000", "0010100", "0100010", "1000001",
        ],
    }
}
