//! Icon style: every color and coordinate the renderer uses.
//!
//! Geometry is expressed in design units: one unit is one pixel of the
//! 512-pixel reference layout. The renderer scales everything by
//! `size / DESIGN_SIZE`.
//!
//! Two presets exist. `studio` is the canonical artwork (gradient panel,
//! outlined capsule, cyan waveform). `signal` is the alternate (flat panel
//! with an overlay gradient, glow, filled capsule, fading chevrons).

use crate::color::Color;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Side length of the reference layout.
pub const DESIGN_SIZE: f32 = 512.0;

const WHITE: Color = Color::WHITE;
const CYAN: Color = Color::rgb(79, 195, 247); // #4fc3f7

/// Complete description of one icon.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IconStyle {
    pub background: Background,
    /// Corner radius of the panel silhouette.
    pub corner_radius: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow: Option<Glow>,
    pub capsule: Capsule,
    pub stand: Stand,
    pub marks: Marks,
}

/// Panel fill, before the rounded-rect clip.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    /// Opaque vertical gradient.
    Gradient { top: Color, bottom: Color },
    /// Flat fill with a translucent gradient composited on top.
    Flat { fill: Color, overlay_top: Color, overlay_bottom: Color },
}

/// Soft light behind the capsule.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Glow {
    pub color: Color,
    /// How far the glow shape extends past the capsule outline.
    pub spread: f32,
    /// Blur standard deviation.
    pub sigma: f32,
}

/// Microphone head: a rounded rectangle with radius `width / 2`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Capsule {
    pub center_x: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    /// Outline width; `None` fills the capsule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grille: Option<Grille>,
}

/// Vertical reflection lines with linearly decaying alpha.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Highlight {
    pub color: Color,
    /// Distance of the first line from the capsule's left edge.
    pub offset: f32,
    pub lines: u32,
    pub spacing: f32,
    pub line_width: f32,
    pub start_alpha: u8,
}

/// Horizontal slots inside the capsule's upper dome.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Grille {
    pub color: Color,
    /// Vertical offsets from the dome center.
    pub offsets: Vec<f32>,
    /// Fraction of the chord each line spans.
    pub scale: f32,
    pub line_width: f32,
}

/// Arc, stem and foot under the capsule.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Stand {
    pub color: Color,
    pub stroke: f32,
    pub arc_half_width: f32,
    /// Highest point of the arc.
    pub arc_top: f32,
    /// Baseline the arc ends on; the stem starts here.
    pub arc_bottom: f32,
    pub segments: u32,
    pub stem_bottom: f32,
    pub foot: Foot,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Foot {
    /// Two strokes through three points.
    Chevron { points: [(f32, f32); 3], width: f32 },
    /// Horizontal bar centered under the stem.
    Bar { y: f32, half_width: f32, thickness: f32 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Marks {
    /// Vertical bars with round caps.
    Waveform { color: Color, width: f32, bars: Vec<WaveBar> },
    /// A row of `>` glyphs, one alpha per glyph.
    Chevrons {
        color: Color,
        width: f32,
        y: f32,
        half_width: f32,
        half_height: f32,
        centers: Vec<f32>,
        alphas: Vec<u8>,
    },
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct WaveBar {
    pub x: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Built-in styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    #[default]
    Studio,
    Signal,
}

impl Preset {
    pub fn style(self) -> IconStyle {
        match self {
            Preset::Studio => IconStyle::studio(),
            Preset::Signal => IconStyle::signal(),
        }
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "studio" => Ok(Preset::Studio),
            "signal" => Ok(Preset::Signal),
            other => Err(Error::Usage(format!("unknown preset `{other}` (expected studio or signal)"))),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Preset::Studio => "studio",
            Preset::Signal => "signal",
        })
    }
}

impl Default for IconStyle {
    fn default() -> Self {
        IconStyle::studio()
    }
}

impl IconStyle {
    /// Gradient panel, outlined capsule, chevron foot, cyan waveform.
    pub fn studio() -> Self {
        let bar = |x, bottom, top| WaveBar { x, top, bottom };
        IconStyle {
            background: Background::Gradient {
                top: Color::rgb(26, 26, 46),    // #1a1a2e
                bottom: Color::rgb(22, 33, 62), // #16213e
            },
            corner_radius: 64.0,
            glow: None,
            capsule: Capsule {
                center_x: 256.0,
                top: 100.0,
                width: 80.0,
                height: 160.0,
                color: WHITE,
                stroke: Some(20.0),
                highlight: None,
                grille: None,
            },
            stand: Stand {
                color: WHITE,
                stroke: 20.0,
                arc_half_width: 80.0,
                arc_top: 240.0,
                arc_bottom: 320.0,
                segments: 40,
                stem_bottom: 370.0,
                foot: Foot::Chevron { points: [(220.0, 390.0), (256.0, 370.0), (292.0, 390.0)], width: 12.0 },
            },
            marks: Marks::Waveform {
                color: CYAN,
                width: 14.0,
                bars: vec![
                    bar(180.0, 430.0, 410.0),
                    bar(216.0, 440.0, 400.0),
                    bar(256.0, 445.0, 395.0),
                    bar(296.0, 440.0, 400.0),
                    bar(332.0, 430.0, 410.0),
                ],
            },
        }
    }

    /// Flat panel with glow, filled capsule with highlight and grille,
    /// base bar foot, chevrons fading to the right.
    pub fn signal() -> Self {
        IconStyle {
            background: Background::Flat {
                fill: Color::rgb(18, 18, 32),
                overlay_top: CYAN.with_alpha(48),
                overlay_bottom: CYAN.with_alpha(0),
            },
            corner_radius: 96.0,
            glow: Some(Glow { color: CYAN.with_alpha(110), spread: 18.0, sigma: 14.0 }),
            capsule: Capsule {
                center_x: 256.0,
                top: 96.0,
                width: 96.0,
                height: 164.0,
                color: Color::rgb(236, 240, 246),
                stroke: None,
                highlight: Some(Highlight {
                    color: WHITE,
                    offset: 16.0,
                    lines: 10,
                    spacing: 1.5,
                    line_width: 1.5,
                    start_alpha: 150,
                }),
                grille: Some(Grille {
                    color: Color::rgba(26, 38, 70, 170),
                    offsets: vec![-30.0, -15.0, 0.0, 15.0, 30.0],
                    scale: 0.72,
                    line_width: 5.0,
                }),
            },
            stand: Stand {
                color: WHITE,
                stroke: 18.0,
                arc_half_width: 84.0,
                arc_top: 240.0,
                arc_bottom: 316.0,
                segments: 40,
                stem_bottom: 372.0,
                foot: Foot::Bar { y: 378.0, half_width: 56.0, thickness: 14.0 },
            },
            marks: Marks::Chevrons {
                color: CYAN,
                width: 12.0,
                y: 432.0,
                half_width: 14.0,
                half_height: 20.0,
                centers: vec![196.0, 256.0, 316.0],
                alphas: vec![255, 170, 85],
            },
        }
    }

    /// Read and validate a TOML style file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Style(format!("cannot read {}: {e}", path.display())))?;
        let style = Self::from_toml(&contents)
            .map_err(|e| Error::Style(format!("{}: {e}", path.display())))?;
        log::debug!("loaded style from {}", path.display());
        Ok(style)
    }

    pub fn from_toml(contents: &str) -> Result<Self, Error> {
        let style: IconStyle = toml::from_str(contents).map_err(|e| Error::Style(e.to_string()))?;
        style.validate()?;
        Ok(style)
    }

    pub fn to_toml(&self) -> Result<String, Error> {
        toml::to_string_pretty(self).map_err(|e| Error::Style(e.to_string()))
    }

    /// Reject geometry the renderer cannot draw sensibly.
    pub fn validate(&self) -> Result<(), Error> {
        let bad = |what: &str| Err(Error::Style(what.to_string()));
        if !(self.corner_radius >= 0.0) {
            return bad("corner_radius must be >= 0");
        }
        let cap = &self.capsule;
        if !(cap.width > 0.0 && cap.height > 0.0) {
            return bad("capsule width and height must be positive");
        }
        if cap.stroke.is_some_and(|s| !(s > 0.0)) {
            return bad("capsule stroke must be positive");
        }
        if let Some(h) = &cap.highlight {
            if h.lines == 0 {
                return bad("highlight needs at least one line");
            }
        }
        if let Some(g) = &self.glow {
            if !(g.sigma >= 0.0) {
                return bad("glow sigma must be >= 0");
            }
        }
        let stand = &self.stand;
        if stand.segments == 0 {
            return bad("stand needs at least one arc segment");
        }
        if !(stand.stroke > 0.0) || !(stand.arc_bottom >= stand.arc_top) {
            return bad("stand stroke must be positive and arc_bottom below arc_top");
        }
        match &self.marks {
            Marks::Waveform { bars, .. } if bars.is_empty() => bad("waveform needs at least one bar"),
            Marks::Chevrons { centers, alphas, .. } if centers.is_empty() || centers.len() != alphas.len() => {
                bad("chevrons need one alpha per center")
            }
            _ => Ok(()),
        }
    }
}
