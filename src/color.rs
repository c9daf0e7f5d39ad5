// RGBA color used as a drawing parameter.
// Stored straight (not premultiplied); serialized as "#rrggbb" or "#rrggbbaa".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color, different opacity.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Pack as 0xAARRGGBB.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub const fn from_argb(px: u32) -> Self {
        Self {
            a: (px >> 24) as u8,
            r: (px >> 16) as u8,
            g: (px >> 8) as u8,
            b: px as u8,
        }
    }

    /// Channel-wise linear interpolation, truncating toward zero like an
    /// integer cast. `t` is not clamped; callers pass [0, 1].
    pub fn lerp(self, other: Color, t: f32) -> Color {
        #[inline]
        fn mix(a: u8, b: u8, t: f32) -> u8 {
            (a as f32 + (b as f32 - a as f32) * t).clamp(0.0, 255.0) as u8
        }
        Color {
            r: mix(self.r, other.r, t),
            g: mix(self.g, other.g, t),
            b: mix(self.b, other.b, t),
            a: mix(self.a, other.a, t),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("color `{s}` must start with '#'"))?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(format!("color `{s}` must be #rrggbb or #rrggbbaa"));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("color `{s}` is not valid hex"))
        };
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Color::rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba_hex() {
        assert_eq!("#4fc3f7".parse::<Color>().unwrap(), Color::rgb(79, 195, 247));
        assert_eq!("#1a1a2e80".parse::<Color>().unwrap(), Color::rgba(26, 26, 46, 128));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!("4fc3f7".parse::<Color>().is_err());
        assert!("#4fc3f".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
    }

    #[test]
    fn display_omits_opaque_alpha() {
        assert_eq!(Color::rgb(22, 33, 62).to_string(), "#16213e");
        assert_eq!(Color::rgba(22, 33, 62, 7).to_string(), "#16213e07");
    }

    #[test]
    fn argb_packing_keeps_channels() {
        let c = Color::rgba(1, 2, 3, 4);
        assert_eq!(c.to_argb(), 0x04_01_02_03);
        assert_eq!(Color::from_argb(c.to_argb()), c);
    }

    #[test]
    fn lerp_truncates_like_int_cast() {
        let top = Color::rgb(26, 26, 46);
        let bot = Color::rgb(22, 33, 62);
        // 26 + (22 - 26) * 0.5 = 24, 26 + 7 * 0.5 = 29.5 -> 29
        assert_eq!(top.lerp(bot, 0.5), Color::rgb(24, 29, 54));
        assert_eq!(top.lerp(bot, 0.0), top);
    }
}
