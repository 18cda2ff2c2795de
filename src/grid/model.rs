use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Pixels painted in this color are cut out of the window shape.
pub const SENTINEL_COLOR: GridColor = GridColor::rgb(0, 0, 0);
/// Visually black, but never matches the sentinel.
pub const NEAR_SENTINEL_COLOR: GridColor = GridColor::rgb(0, 0, 5);
pub const WHITE: GridColor = GridColor::rgb(255, 255, 255);

pub const GOLDEN_RATIO: f64 = 1.618033988749;
pub const MIN_CLIENT_DIM: i32 = 20;
/// Upper bound for either client dimension; keeps the mask allocation bounded.
pub const MAX_CLIENT_DIM: i32 = 16_384;
pub const HANDLE_SIDE: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn delta_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn offset_by(self, delta: Point) -> Point {
        Point::new(self.x + delta.x, self.y + delta.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_positive(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Half-open rectangle: `x..x + width`, `y..y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn contains_rect(self, other: Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Shrinks every side by `amount`, keeping at least a 1x1 rectangle centered
    /// in the original one.
    pub fn inset(self, amount: i32) -> Rect {
        let dx = amount.clamp(0, ((self.width - 1) / 2).max(0));
        let dy = amount.clamp(0, ((self.height - 1) / 2).max(0));
        Rect::new(
            self.x + dx,
            self.y + dy,
            self.width - 2 * dx,
            self.height - 2 * dy,
        )
    }

    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl ResizeEdge {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Opaque RGB color, persisted as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl GridColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_rgb_array(color: [u8; 3]) -> Self {
        Self::rgb(color[0], color[1], color[2])
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.trim().strip_prefix('#').unwrap_or(text.trim());
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn collides_with_sentinel(self) -> bool {
        self == SENTINEL_COLOR
    }

    /// Every user-visible color goes through this before it is painted.
    pub fn resolve_sentinel_collision(self) -> Self {
        if self.collides_with_sentinel() {
            NEAR_SENTINEL_COLOR
        } else {
            self
        }
    }

    /// Used for pressed toolbar buttons.
    pub fn shaded(self, percent: u8) -> Self {
        let scale = |c: u8| ((c as u32 * (100 - percent.min(100) as u32)) / 100) as u8;
        Self::rgb(scale(self.r), scale(self.g), scale(self.b)).resolve_sentinel_collision()
    }
}

impl Serialize for GridColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for GridColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        GridColor::parse_hex(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{text}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_roundtrip_and_accept_lowercase() {
        let gold = GridColor::parse_hex("#ffd700").expect("parse gold");
        assert_eq!(gold, GridColor::rgb(255, 215, 0));
        assert_eq!(gold.to_hex(), "#FFD700");
        assert_eq!(GridColor::parse_hex("49B04A"), Some(GridColor::rgb(0x49, 0xB0, 0x4A)));
    }

    #[test]
    fn malformed_hex_colors_are_rejected() {
        assert_eq!(GridColor::parse_hex(""), None);
        assert_eq!(GridColor::parse_hex("#FFF"), None);
        assert_eq!(GridColor::parse_hex("#GG0000"), None);
        assert_eq!(GridColor::parse_hex("#ÄÄÄ"), None);
    }

    #[test]
    fn sentinel_collision_maps_black_to_near_black() {
        assert_eq!(
            GridColor::rgb(0, 0, 0).resolve_sentinel_collision(),
            NEAR_SENTINEL_COLOR
        );
        assert_eq!(
            GridColor::rgb(0, 0, 1).resolve_sentinel_collision(),
            GridColor::rgb(0, 0, 1)
        );
        assert_ne!(GridColor::rgb(3, 3, 3).shaded(100), SENTINEL_COLOR);
    }

    #[test]
    fn inset_never_collapses_below_one_pixel() {
        let rect = Rect::new(0, 52, 300, 200);
        assert_eq!(rect.inset(40), Rect::new(40, 92, 220, 120));
        let tiny = Rect::new(0, 0, 5, 3).inset(40);
        assert_eq!(tiny, Rect::new(2, 1, 1, 1));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(10, 10, 5, 5);
        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(14, 14)));
        assert!(!rect.contains(Point::new(15, 10)));
        assert!(!rect.contains(Point::new(10, 15)));
    }
}
