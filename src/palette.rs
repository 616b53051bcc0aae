// Color palettes for grouped data and CSS color parsing

use crate::error::{ChartError, Result};

const FOREST_SAGE: [&str; 10] = ["#1b3022", "#2d4a3e", "#344e41", "#3a5a40", "#4f772d", "#588157", "#90a955", "#a3b18a", "#ccd5ae", "#e9edc9"];
const EARTH_CLAY: [&str; 10] = ["#3d2b1f", "#582f0e", "#7f4f24", "#936639", "#a68a64", "#b6ad90", "#c2c5aa", "#d5bda1", "#e3d5ca", "#f5ebe0"];
const OCEAN_BLUE: [&str; 10] = ["#03045e", "#0077b6", "#0096c7", "#00b4d8", "#48cae4", "#90e0ef", "#ade8f4", "#caf0f8", "#d0f4de", "#e0fbfc"];
const SUNSET_TERRACOTTA: [&str; 10] = ["#6a040f", "#9d0208", "#d00000", "#dc2f02", "#e85d04", "#f48c06", "#faa307", "#ffba08", "#ffca3a", "#ffda3d"];
const SLATE_STONE: [&str; 10] = ["#252422", "#403d39", "#4a4e69", "#6d6875", "#9a8c98", "#b5a4a3", "#c9ada7", "#d8e2dc", "#e5e5e5", "#f8f9fa"];
const LAVENDER_FIELDS: [&str; 10] = ["#240046", "#3c096c", "#5a189a", "#7b2cbf", "#9d4edd", "#c19ee0", "#d8bbff", "#e0aaff", "#efd3ff", "#f7ebff"];
const AUTUMN_HARVEST: [&str; 10] = ["#5e503f", "#764134", "#8a5a44", "#a47148", "#bc8a5f", "#d4a373", "#e9c46a", "#f4a261", "#e76f51", "#f1dca7"];
const BERRY_WINE: [&str; 10] = ["#47126b", "#571089", "#6411ad", "#7122fa", "#822faf", "#9e0059", "#c9184a", "#ff4d6d", "#ff758f", "#ffb3c1"];
const EUCA_MINT: [&str; 10] = ["#084c61", "#177e89", "#2a9d8f", "#48b5a3", "#72c1b0", "#8ecae6", "#98f5e1", "#b9fbc0", "#d8f3dc", "#e8f5e9"];
const DESERT_NIGHT: [&str; 10] = ["#001219", "#005f73", "#0a9396", "#94d2bd", "#e9d8a6", "#ee9b00", "#ca6702", "#bb3e03", "#ae2012", "#9b2226"];
const CATEGORY10: [&str; 10] = ["blue", "orange", "green", "red", "purple", "brown", "pink", "gray", "olive", "cyan"];

/// Names accepted by `ColorPalette::by_name`
pub const PALETTE_NAMES: [&str; 11] = [
    "forest_sage",
    "earth_clay",
    "ocean_blue",
    "sunset_terracotta",
    "slate_stone",
    "lavender_fields",
    "autumn_harvest",
    "berry_wine",
    "euca_mint",
    "desert_night",
    "category10",
];

pub const DEFAULT_PALETTE: &str = "earth_clay";

/// Color palette for categorical data
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    colors: Vec<String>,
}

impl ColorPalette {
    pub fn new(colors: Vec<String>) -> Self {
        ColorPalette { colors }
    }

    /// Look up one of the built-in palettes
    pub fn by_name(name: &str) -> Result<Self> {
        let colors: &[&str] = match name {
            "forest_sage" => &FOREST_SAGE,
            "earth_clay" => &EARTH_CLAY,
            "ocean_blue" => &OCEAN_BLUE,
            "sunset_terracotta" => &SUNSET_TERRACOTTA,
            "slate_stone" => &SLATE_STONE,
            "lavender_fields" => &LAVENDER_FIELDS,
            "autumn_harvest" => &AUTUMN_HARVEST,
            "berry_wine" => &BERRY_WINE,
            "euca_mint" => &EUCA_MINT,
            "desert_night" => &DESERT_NIGHT,
            "category10" => &CATEGORY10,
            _ => return Err(ChartError::UnknownPalette(name.to_string())),
        };
        Ok(ColorPalette::new(colors.iter().map(|c| c.to_string()).collect()))
    }

    /// Create a Category10 color palette (D3-inspired)
    pub fn category10() -> Self {
        ColorPalette::new(CATEGORY10.iter().map(|c| c.to_string()).collect())
    }

    /// Get color for a specific index (wraps around if index > palette size)
    pub fn get_color(&self, index: usize) -> String {
        if self.colors.is_empty() {
            return "black".to_string();
        }
        self.colors[index % self.colors.len()].clone()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        ColorPalette::new(EARTH_CLAY.iter().map(|c| c.to_string()).collect())
    }
}

/// Resolved color with straight alpha in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
}

/// Parse a CSS color: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)`
/// or a basic color keyword.
pub fn parse_color(input: &str) -> Result<Rgba> {
    let s = input.trim();
    let invalid = || ChartError::InvalidColor(input.to_string());

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(invalid);
    }

    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_function(args).ok_or_else(invalid);
    }

    named_color(&lower).ok_or_else(invalid)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let short = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);

    match hex.len() {
        3 => Some(Rgba::rgb(short(0)?, short(1)?, short(2)?)),
        6 => Some(Rgba::rgb(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(Rgba {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: f64::from(channel(6)?) / 255.0,
        }),
        _ => None,
    }
}

fn parse_rgb_function(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |s: &str| s.parse::<f64>().ok().map(|v| v.round().clamp(0.0, 255.0) as u8);
    let a = match parts.get(3) {
        Some(alpha) => alpha.parse::<f64>().ok()?.clamp(0.0, 1.0),
        None => 1.0,
    };
    Some(Rgba {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a,
    })
}

fn named_color(name: &str) -> Option<Rgba> {
    let color = match name {
        "black" => Rgba::BLACK,
        "white" => Rgba::WHITE,
        "transparent" => Rgba { r: 0, g: 0, b: 0, a: 0.0 },
        "blue" => Rgba::rgb(0, 0, 255),
        "orange" => Rgba::rgb(255, 165, 0),
        "green" => Rgba::rgb(0, 128, 0),
        "red" => Rgba::rgb(255, 0, 0),
        "purple" => Rgba::rgb(128, 0, 128),
        "brown" => Rgba::rgb(165, 42, 42),
        "pink" => Rgba::rgb(255, 192, 203),
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        "olive" => Rgba::rgb(128, 128, 0),
        "cyan" => Rgba::rgb(0, 255, 255),
        "yellow" => Rgba::rgb(255, 255, 0),
        "magenta" => Rgba::rgb(255, 0, 255),
        _ => return None,
    };
    Some(color)
}
