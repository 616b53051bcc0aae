// Renderer styling and the TOML chart configuration

use crate::error::{ChartError, Result};
use crate::palette::{ColorPalette, DEFAULT_PALETTE};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// CSS colors used by the chart chrome
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartColors {
    pub background: String,
    pub axis: String,
    pub grid: String,
    pub info_box: String,
    /// Fill outside the rounded background panel
    pub canvas: String,
}

impl Default for ChartColors {
    fn default() -> Self {
        ChartColors {
            background: "#dad7cd".to_string(),
            axis: "#003049".to_string(),
            grid: "#999094".to_string(),
            info_box: "#003049".to_string(),
            canvas: "#ffffff".to_string(),
        }
    }
}

impl ChartColors {
    /// Charcoal panel with a gold axis
    pub fn dark() -> Self {
        ChartColors {
            background: "rgb(51, 51, 55)".to_string(),
            axis: "rgb(218, 179, 63)".to_string(),
            grid: "rgb(139, 174, 102)".to_string(),
            info_box: "rgb(235, 213, 171)".to_string(),
            canvas: "#1b211a".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: f64,
    pub up: f64,
    pub down: f64,
    pub right: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Padding { left: 80.0, up: 30.0, down: 40.0, right: 40.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxisStyle {
    pub padding: Padding,
    /// Gap between the top tick and the top of the axis line
    pub max_value_padding: f64,
    /// Axis line thickness; gridlines use half of it
    pub size: f64,
    pub text_size: f64,
    pub text_offset: f64,
    pub dotted_grid: bool,
    pub dash_length: f64,
    pub gap_length: f64,
}

/// Shortest dash the dotted grid accepts, in pixels
pub const MIN_DASH_LENGTH: f64 = 1.0;

impl AxisStyle {
    /// Each dash must advance at least `MIN_DASH_LENGTH` and leave a visible stroke
    pub fn validate(&self) -> Result<()> {
        if self.dash_length.is_nan() || self.dash_length < MIN_DASH_LENGTH {
            return Err(ChartError::InvalidStyle(format!(
                "axis.dash_length must be at least {}, got {}",
                MIN_DASH_LENGTH, self.dash_length
            )));
        }
        if self.gap_length.is_nan() || self.gap_length < 0.0 || self.gap_length >= self.dash_length {
            return Err(ChartError::InvalidStyle(format!(
                "axis.gap_length must be in 0..{}, got {}",
                self.dash_length, self.gap_length
            )));
        }
        Ok(())
    }
}

impl Default for AxisStyle {
    fn default() -> Self {
        AxisStyle {
            padding: Padding::default(),
            max_value_padding: 20.0,
            size: 2.0,
            text_size: 13.0,
            text_offset: 10.0,
            dotted_grid: true,
            dash_length: 30.0,
            gap_length: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BarStyle {
    /// Distance from a bar's center to either edge
    pub half_width: f64,
}

impl Default for BarStyle {
    fn default() -> Self {
        BarStyle { half_width: 16.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct InfoBoxStyle {
    pub width: f64,
    pub height: f64,
    pub text_size: f64,
}

impl Default for InfoBoxStyle {
    fn default() -> Self {
        InfoBoxStyle { width: 110.0, height: 30.0, text_size: 13.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub colors: ChartColors,
    pub background_rounding: f64,
    pub axis: AxisStyle,
    pub bar: BarStyle,
    pub info_box: InfoBoxStyle,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            colors: ChartColors::default(),
            background_rounding: 25.0,
            axis: AxisStyle::default(),
            bar: BarStyle::default(),
            info_box: InfoBoxStyle::default(),
        }
    }
}

/// Contents of a chart configuration file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub palette: String,
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub style: ChartStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            palette: DEFAULT_PALETTE.to_string(),
            width: 800,
            height: 600,
            style: ChartStyle::default(),
        }
    }
}

impl ChartStyle {
    pub fn validate(&self) -> Result<()> {
        self.axis.validate()
    }
}

impl ChartConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ChartConfig = toml::from_str(text)?;
        config.style.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ChartError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn color_palette(&self) -> Result<ColorPalette> {
        ColorPalette::by_name(&self.palette)
    }
}
