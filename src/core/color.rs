//! Colors for the wait and target phases, and the frames shown to the user.
//!
//! The target hue is always derived from the last wait hue by a roughly
//! opposite shift, so the display visibly changes when the cue appears.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const WAIT_SATURATION: u8 = 70;
pub const WAIT_LIGHTNESS: u8 = 50;
pub const TARGET_SATURATION: u8 = 80;
pub const TARGET_LIGHTNESS: u8 = 45;

/// Largest deviation, in degrees, of the target hue from the exact opposite.
pub const HUE_JITTER: i16 = 45;

/// A color in HSL space. Hue in degrees `[0, 360)`, the rest in percent.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

/// 24-bit color, used by shells that cannot interpret CSS-style colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Hsl {
    pub fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue: hue % 360,
            saturation: saturation.min(100),
            lightness: lightness.min(100),
        }
    }

    /// Convert to RGB using the standard chroma/sector formula.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reflex::core::{Hsl, Rgb};
    ///
    /// assert_eq!(Hsl::new(0, 100, 50).to_rgb(), Rgb::new(255, 0, 0));
    /// assert_eq!(Hsl::new(240, 100, 50).to_rgb(), Rgb::new(0, 0, 255));
    /// ```
    pub fn to_rgb(&self) -> Rgb {
        let s = f64::from(self.saturation) / 100.0;
        let l = f64::from(self.lightness) / 100.0;
        let h = f64::from(self.hue) / 60.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match self.hue / 60 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

        Rgb::new(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Light or dark presentation of the neutral colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Light => "Light Mode",
            Self::Dark => "Dark Mode",
        }
    }

    /// Stored preference value.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn area_background(&self) -> Rgb {
        match self {
            Self::Light => Rgb::new(0xe9, 0xec, 0xef),
            Self::Dark => Rgb::new(0x2b, 0x2d, 0x31),
        }
    }

    fn text(&self) -> Rgb {
        match self {
            Self::Light => Rgb::new(0x21, 0x25, 0x29),
            Self::Dark => Rgb::new(0xf1, 0xf3, 0xf5),
        }
    }
}

/// A display color as emitted by the game.
///
/// The neutral variants stand for theme-dependent colors owned by the
/// surrounding shell; they are independent of any hue state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Color {
    Hsl(Hsl),
    White,
    AreaBackground,
    Text,
}

impl Color {
    /// Resolve to a concrete color under `theme`.
    pub fn resolve(&self, theme: Theme) -> Rgb {
        match self {
            Self::Hsl(hsl) => hsl.to_rgb(),
            Self::White => Rgb::new(255, 255, 255),
            Self::AreaBackground => theme.area_background(),
            Self::Text => theme.text(),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hsl(hsl) => fmt::Display::fmt(hsl, f),
            Self::White => f.write_str("white"),
            Self::AreaBackground => f.write_str("var(--area-bg)"),
            Self::Text => f.write_str("var(--text-color)"),
        }
    }
}

/// One display instruction: text plus background and text colors.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Frame {
    pub text: String,
    pub background: Color,
    pub foreground: Color,
}

impl Frame {
    pub fn new(text: impl Into<String>, background: Color, foreground: Color) -> Self {
        Self {
            text: text.into(),
            background,
            foreground,
        }
    }

    /// Text on the neutral area colors.
    pub fn neutral(text: impl Into<String>) -> Self {
        Self::new(text, Color::AreaBackground, Color::Text)
    }
}

/// Pick a wait hue uniformly from `[0, 360)`.
pub fn draw_wait_hue<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    rng.gen_range(0..360)
}

/// Pick the target jitter uniformly from `[-HUE_JITTER, HUE_JITTER]`.
pub fn draw_hue_jitter<R: Rng + ?Sized>(rng: &mut R) -> i16 {
    rng.gen_range(-HUE_JITTER..=HUE_JITTER)
}

/// Target hue: opposite of `wait_hue`, moved by `jitter` degrees.
///
/// # Example
///
/// ```rust
/// use reflex::core::target_hue;
///
/// assert_eq!(target_hue(0, 0), 180);
/// assert_eq!(target_hue(300, 45), 165);
/// assert_eq!(target_hue(10, -45), 145);
/// ```
pub fn target_hue(wait_hue: u16, jitter: i16) -> u16 {
    let shift = 180 + i32::from(jitter);
    (i32::from(wait_hue) + shift).rem_euclid(360) as u16
}

/// Forward distance in degrees from hue `from` to hue `to`, in `[0, 360)`.
pub fn hue_shift(from: u16, to: u16) -> u16 {
    (i32::from(to) - i32::from(from)).rem_euclid(360) as u16
}

pub fn wait_color(hue: u16) -> Hsl {
    Hsl::new(hue, WAIT_SATURATION, WAIT_LIGHTNESS)
}

pub fn target_color(hue: u16) -> Hsl {
    Hsl::new(hue, TARGET_SATURATION, TARGET_LIGHTNESS)
}
