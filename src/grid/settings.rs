use crate::grid::model::{GridColor, Size};
use serde::{Deserialize, Serialize};

pub const MIN_SEGMENTS: u32 = 2;
pub const MAX_SEGMENTS: u32 = 100;
pub const MIN_LINE_THICKNESS: u32 = 1;
pub const MAX_LINE_THICKNESS: u32 = 10;
pub const MIN_FRAME_THICKNESS: u32 = 1;
pub const MAX_FRAME_THICKNESS: u32 = 200;
pub const DEFAULT_RATIO: f64 = 1.0;
pub const MIN_RATIO: f64 = 0.01;
pub const MAX_RATIO: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct GridConfig {
    #[serde(default = "default_segments")]
    pub segments: u32,
    #[serde(default = "default_line_thickness")]
    pub line_thickness: u32,
    #[serde(default = "default_line_color")]
    pub line_color: GridColor,
    #[serde(default = "default_golden_lines_color")]
    pub golden_lines_color: GridColor,
    #[serde(default = "default_toolbar_color")]
    pub toolbar_color: GridColor,
    #[serde(default = "default_frame_color")]
    pub frame_color: GridColor,
    #[serde(default = "default_frame_thickness")]
    pub frame_thickness: u32,
    #[serde(default = "default_true")]
    pub show_grid: bool,
    #[serde(default = "default_true")]
    pub show_golden_lines: bool,
    #[serde(default)]
    pub show_frame: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            segments: default_segments(),
            line_thickness: default_line_thickness(),
            line_color: default_line_color(),
            golden_lines_color: default_golden_lines_color(),
            toolbar_color: default_toolbar_color(),
            frame_color: default_frame_color(),
            frame_thickness: default_frame_thickness(),
            show_grid: true,
            show_golden_lines: true,
            show_frame: false,
        }
    }
}

impl GridConfig {
    /// Remaps every configurable color away from the shape sentinel.
    /// Returns `true` when anything changed.
    pub fn sanitize_for_sentinel(&mut self) -> bool {
        let mut changed = false;
        for color in [
            &mut self.line_color,
            &mut self.golden_lines_color,
            &mut self.toolbar_color,
            &mut self.frame_color,
        ] {
            let next = color.resolve_sentinel_collision();
            changed |= next != *color;
            *color = next;
        }
        changed
    }

    pub fn clamp_ranges(&mut self) {
        self.segments = self.segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS);
        self.line_thickness = self
            .line_thickness
            .clamp(MIN_LINE_THICKNESS, MAX_LINE_THICKNESS);
        self.frame_thickness = self
            .frame_thickness
            .clamp(MIN_FRAME_THICKNESS, MAX_FRAME_THICKNESS);
    }
}

/// Width / height of the area below the toolbar, plus the lock flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AspectRatioState {
    #[serde(default = "default_ratio")]
    pub ratio: f64,
    #[serde(default)]
    pub locked: bool,
}

impl Default for AspectRatioState {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_RATIO,
            locked: false,
        }
    }
}

impl AspectRatioState {
    pub fn ratio_from_area(area: Size) -> f64 {
        if area.width <= 0 || area.height <= 0 {
            return DEFAULT_RATIO;
        }
        Self::clamp_ratio(area.width as f64 / area.height as f64).unwrap_or(DEFAULT_RATIO)
    }

    /// `None` for non-finite or non-positive input; otherwise `ratio` limited to
    /// `MIN_RATIO..=MAX_RATIO`.
    pub fn clamp_ratio(ratio: f64) -> Option<f64> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return None;
        }
        Some(ratio.clamp(MIN_RATIO, MAX_RATIO))
    }

    pub fn is_ratio_in_range(ratio: f64) -> bool {
        (MIN_RATIO..=MAX_RATIO).contains(&ratio)
    }

    pub fn normalize(&mut self) {
        self.ratio = Self::clamp_ratio(self.ratio).unwrap_or(DEFAULT_RATIO);
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct LogPrefs {
    #[serde(default)]
    pub debug: bool,
}

/// Everything persisted in the preferences file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct PreferencesDoc {
    #[serde(default)]
    pub size: AspectRatioState,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub log: LogPrefs,
}

impl PreferencesDoc {
    /// Clamps out-of-range values and remaps sentinel colors.
    pub fn sanitize(&mut self) -> bool {
        let before = self.clone();
        self.size.normalize();
        self.grid.clamp_ranges();
        self.grid.sanitize_for_sentinel();
        *self != before
    }
}

fn default_segments() -> u32 {
    3
}

fn default_line_thickness() -> u32 {
    1
}

fn default_line_color() -> GridColor {
    GridColor::rgb(0xFF, 0xFF, 0xFF)
}

fn default_golden_lines_color() -> GridColor {
    GridColor::rgb(0xFF, 0xD7, 0x00)
}

fn default_toolbar_color() -> GridColor {
    GridColor::rgb(0x49, 0xB0, 0x4A)
}

fn default_frame_color() -> GridColor {
    GridColor::rgb(0x2F, 0x2F, 0x2F)
}

fn default_frame_thickness() -> u32 {
    40
}

fn default_ratio() -> f64 {
    DEFAULT_RATIO
}

fn default_true() -> bool {
    true
}
