use serde::{Serialize, Serializer};

use crate::error::ColorParseError;

/// RGBA color for filled outlines, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from RGB u8 values.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parse `#RRGGBB` (case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(hex.to_owned());
        let digits = hex.strip_prefix('#').ok_or_else(err)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
        Ok(Self::rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    /// `#RRGGBB`, alpha dropped.
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Parchment, the default ink.
    pub const PARCHMENT: Self = Self::rgb(245.0 / 255.0, 230.0 / 255.0, 200.0 / 255.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::PARCHMENT
    }
}

impl Serialize for VectorColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex() {
        let c = VectorColor::from_hex("#F5E6C8").unwrap();
        assert_eq!(c, VectorColor::PARCHMENT);
        let lower = VectorColor::from_hex("#5bcea6").unwrap();
        assert_eq!(lower.to_hex(), "#5BCEA6");
        assert_eq!(lower.a, 1.0);
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["F5E6C8", "#F5E6C", "#F5E6C8FF", "#GGGGGG", "", "#"] {
            assert_eq!(VectorColor::from_hex(bad), Err(ColorParseError(bad.to_owned())), "{bad}");
        }
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&VectorColor::BLACK).unwrap();
        assert_eq!(json, "\"#000000\"");
    }
}
