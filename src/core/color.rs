use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;

/// Represents a 24-bit RGB color
///
/// Parsed from `#rrggbb`, `#rgb` or one of the named colors below.
/// Serialized back as `#rrggbb`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor(pub u8, pub u8, pub u8);

// Subset of the X11 names understood by PIL's ImageColor.
const NAMED_COLORS: &[(&str, RgbColor)] = &[
    ("black", RgbColor(0, 0, 0)),
    ("white", RgbColor(255, 255, 255)),
    ("red", RgbColor(255, 0, 0)),
    ("green", RgbColor(0, 128, 0)),
    ("blue", RgbColor(0, 0, 255)),
    ("yellow", RgbColor(255, 255, 0)),
    ("orange", RgbColor(255, 165, 0)),
    ("gray", RgbColor(128, 128, 128)),
    ("grey", RgbColor(128, 128, 128)),
    ("lightgray", RgbColor(211, 211, 211)),
    ("lightgrey", RgbColor(211, 211, 211)),
    ("darkgray", RgbColor(169, 169, 169)),
    ("darkgrey", RgbColor(169, 169, 169)),
    ("darkseagreen", RgbColor(143, 188, 143)),
    ("seagreen", RgbColor(46, 139, 87)),
    ("navy", RgbColor(0, 0, 128)),
];

impl RgbColor {
    pub const WHITE: RgbColor = RgbColor(255, 255, 255);
    pub const LIGHT_GRAY: RgbColor = RgbColor(211, 211, 211);
    pub const RED: RgbColor = RgbColor(255, 0, 0);
    pub const DARK_SEA_GREEN: RgbColor = RgbColor(143, 188, 143);

    pub fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb([self.0, self.1, self.2])
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl FromStr for RgbColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let invalid = || ConfigError::InvalidColor(s.to_string());

        if let Some(hex) = value.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
            return match hex.len() {
                6 => Ok(RgbColor(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
                // #rgb expands each digit: #abc == #aabbcc
                3 => {
                    let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                    Ok(RgbColor(short(0)?, short(1)?, short(2)?))
                }
                _ => Err(invalid()),
            };
        }

        let lower = value.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, color)| *color)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for RgbColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
