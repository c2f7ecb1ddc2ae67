use serde::Deserialize;

use super::color::VectorColor;
use crate::error::OptionsError;

/// Canvas placement and ink settings for one render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub color: VectorColor,
    /// Canvas pixels per glyph unit, before bounds fitting.
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Width and edge wobble strength; 0 gives clean edges.
    pub noise_amount: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: VectorColor::PARCHMENT,
            scale: 200.0,
            offset_x: 0.0,
            offset_y: 0.0,
            noise_amount: 0.3,
        }
    }
}

/// Wire form: every field optional, colour as a hex string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionsJson {
    #[serde(default)]
    color: Option<String>,
    #[serde(default = "default_scale")]
    scale: f64,
    #[serde(default)]
    offset_x: f64,
    #[serde(default)]
    offset_y: f64,
    #[serde(default = "default_noise_amount")]
    noise_amount: f64,
}

fn default_scale() -> f64 {
    200.0
}

fn default_noise_amount() -> f64 {
    0.3
}

impl RenderOptions {
    /// Parse options from JSON such as `{"scale": 120, "color": "#5BCEA6"}`.
    /// Missing fields take their defaults; a blank string gives all defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: OptionsJson = serde_json::from_str(json)?;
        let color = match raw.color {
            Some(hex) => VectorColor::from_hex(&hex)?,
            None => VectorColor::PARCHMENT,
        };
        Ok(Self {
            color,
            scale: raw.scale,
            offset_x: raw.offset_x,
            offset_y: raw.offset_y,
            noise_amount: raw.noise_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_empty_object_are_defaults() {
        assert_eq!(RenderOptions::from_json("").unwrap(), RenderOptions::default());
        assert_eq!(RenderOptions::from_json("{}").unwrap(), RenderOptions::default());
    }

    #[test]
    fn partial_override() {
        let json = r##"{"scale": 120, "offsetY": 8.5, "color": "#5BCEA6"}"##;
        let opts = RenderOptions::from_json(json).unwrap();
        assert_eq!(opts.scale, 120.0);
        assert_eq!(opts.offset_x, 0.0);
        assert_eq!(opts.offset_y, 8.5);
        assert_eq!(opts.noise_amount, 0.3);
        assert_eq!(opts.color.to_hex(), "#5BCEA6");
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(matches!(RenderOptions::from_json("{scale:"), Err(OptionsError::Json(_))));
        assert!(matches!(
            RenderOptions::from_json(r#"{"color": "teal"}"#),
            Err(OptionsError::Color(_))
        ));
    }
}
