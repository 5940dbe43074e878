use serde::{Deserialize, Serialize};

use crate::error::{ConstructionError, SceneResult};

/// Linear RGB colour with components in [0, 1].
///
/// Colour management is off: values are handed to the renderer as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

const NAMED_COLORS: &[(&str, u32)] = &[
    ("white", 0xffffff),
    ("black", 0x000000),
    ("red", 0xff0000),
    ("green", 0x008000),
    ("blue", 0x0000ff),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("yellow", 0xffff00),
    ("cyan", 0x00ffff),
    ("magenta", 0xff00ff),
    ("orange", 0xffa500),
    ("brown", 0xa52a2a),
    ("silver", 0xc0c0c0),
];

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed 0xRRGGBB value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Parse `#rrggbb`, `#rgb` or a CSS colour name.
    pub fn parse(value: &str) -> SceneResult<Self> {
        let trimmed = value.trim();
        let invalid = || ConstructionError::InvalidColor(value.to_string());

        if let Some(digits) = trimmed.strip_prefix('#') {
            if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let expanded = match digits.len() {
                6 => digits.to_string(),
                3 => digits.chars().flat_map(|c| [c, c]).collect(),
                _ => return Err(invalid()),
            };
            return u32::from_str_radix(&expanded, 16)
                .map(Self::from_hex)
                .map_err(|_| invalid());
        }

        let lower = trimmed.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|&(_, hex)| Self::from_hex(hex))
            .ok_or_else(invalid)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
