//! Perceptual color model for chat markup.
//!
//! A [`Color`] is an immutable RGB value that carries its CIE XYZ and CIE
//! L\*a\*b\* coordinates, computed once at construction. Distances are CIE76
//! (Euclidean in Lab), and the two palettes in [`crate::palette`] are searched
//! with that metric to find the closest color name or numeric code.
//!
//! # Examples
//!
//! ## Constructing Colors
//!
//! ```
//! use chatmarkup::color::Color;
//!
//! let red = Color::from_name("red").unwrap();
//! let hex = Color::from_hex("#f00").unwrap();
//! let rgb = Color::from_rgb(255, 0, 0);
//! let code = Color::from_code("\x0304").unwrap();
//!
//! // Equality is perceptual: all four land on the same Lab coordinates.
//! assert_eq!(red, hex);
//! assert_eq!(hex, rgb);
//! assert_eq!(rgb, code);
//! ```
//!
//! ## Snapping to a Palette
//!
//! ```
//! use chatmarkup::color::Color;
//!
//! let picked = Color::from_rgb(250, 10, 10);
//! assert_eq!(picked.nearest_name(), "red");
//! assert_eq!(picked.code(), "04");
//! ```
//!
//! ## Hex Helpers
//!
//! ```
//! use chatmarkup::color::Color;
//!
//! assert_eq!(Color::reduce_hex("#AABBCC"), "#ABC");
//! assert_eq!(Color::reduce_hex("#AABBCD"), "#AABBCD");
//! ```

use lru::LruCache;
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex, OnceLock};

use crate::dialect::COLOR_BYTE;
use crate::error::MarkupError;
use crate::palette;
use crate::sync::lock_recover;

/// Just-noticeable difference: the CIE76 distance below which two colors are
/// treated as the same for name matching.
pub const JND: f64 = 2.3;

/// Reference white (D65, 2°) used for the XYZ to Lab conversion.
const REFERENCE_WHITE: [f64; 3] = [95.047, 100.000, 108.883];

/// CIE XYZ coordinates, scaled so that Y is 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XyzTuple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// CIE L\*a\*b\* coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabTuple {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl LabTuple {
    fn components(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }
}

/// Convert 8-bit sRGB components to CIE XYZ.
#[must_use]
pub fn rgb_to_xyz(red: u8, green: u8, blue: u8) -> XyzTuple {
    let expand = |channel: u8| {
        let n = f64::from(channel) / 255.0;
        let linear = if n > 0.04045 {
            ((n + 0.055) / 1.055).powf(2.4)
        } else {
            n / 12.92
        };
        linear * 100.0
    };
    let (r, g, b) = (expand(red), expand(green), expand(blue));

    XyzTuple {
        x: r * 0.4124 + g * 0.3576 + b * 0.1805,
        y: r * 0.2126 + g * 0.7152 + b * 0.0722,
        z: r * 0.0193 + g * 0.1192 + b * 0.9505,
    }
}

/// Convert CIE XYZ to CIE L\*a\*b\* against the D65 reference white.
#[must_use]
pub fn xyz_to_lab(xyz: XyzTuple) -> LabTuple {
    let pivot = |value: f64, reference: f64| {
        let n = value / reference;
        if n > 0.008_856 {
            n.powf(1.0 / 3.0)
        } else {
            7.787 * n + 16.0 / 116.0
        }
    };
    let x = pivot(xyz.x, REFERENCE_WHITE[0]);
    let y = pivot(xyz.y, REFERENCE_WHITE[1]);
    let z = pivot(xyz.z, REFERENCE_WHITE[2]);

    LabTuple {
        l: 116.0 * y - 16.0,
        a: 500.0 * (x - y),
        b: 200.0 * (y - z),
    }
}

/// Take the absolute value of a component and clamp it into 0-255.
fn clamp_component(value: i64) -> u8 {
    let magnitude = value.unsigned_abs();
    if magnitude > 255 {
        log::trace!("color component {value} clamped to 255");
    }
    u8::try_from(magnitude.min(255)).unwrap_or(u8::MAX)
}

/// An immutable color with cached coordinates in RGB, XYZ and Lab.
///
/// Equality and hashing use the Lab coordinates only, so colors built from a
/// hex string, an RGB triple, a palette name or a numeric code compare equal
/// whenever they describe the same perceptual point.
#[derive(Clone)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
    hex: String,
    xyz: XyzTuple,
    lab: LabTuple,
    /// Palette name this color was constructed from, if any.
    name: Option<&'static str>,
    closest_name: OnceLock<&'static str>,
    closest_code: OnceLock<u8>,
}

impl Color {
    fn from_triplet(red: u8, green: u8, blue: u8) -> Self {
        let xyz = rgb_to_xyz(red, green, blue);
        Self {
            red,
            green,
            blue,
            hex: format!("#{red:02X}{green:02X}{blue:02X}"),
            xyz,
            lab: xyz_to_lab(xyz),
            name: None,
            closest_name: OnceLock::new(),
            closest_code: OnceLock::new(),
        }
    }

    /// Build a named-palette entry; its name is also its closest name.
    pub(crate) fn named(name: &'static str, red: u8, green: u8, blue: u8) -> Self {
        let mut color = Self::from_triplet(red, green, blue);
        color.name = Some(name);
        color.closest_name = OnceLock::from(name);
        color
    }

    /// Build a code-palette entry from a packed `0xRRGGBB` value.
    pub(crate) fn coded(code: u8, packed: u32) -> Self {
        let [_, red, green, blue] = packed.to_be_bytes();
        let mut color = Self::from_triplet(red, green, blue);
        color.closest_code = OnceLock::from(code);
        color
    }

    /// Create a color from RGB components.
    ///
    /// Negative components are negated and components above 255 are clamped
    /// to 255.
    #[must_use]
    pub fn from_rgb(red: i64, green: i64, blue: i64) -> Self {
        Self::from_triplet(
            clamp_component(red),
            clamp_component(green),
            clamp_component(blue),
        )
    }

    /// Create a color from a 3- or 6-digit hex string with an optional `#`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidColorSpec` if the digit count is wrong or a character is
    /// not a hex digit.
    pub fn from_hex(text: &str) -> Result<Self, MarkupError> {
        let invalid = || MarkupError::InvalidColorSpec(text.to_string());
        let digits = text.strip_prefix('#').unwrap_or(text);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded: String = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(invalid()),
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());

        Ok(Self::from_triplet(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Look up a color in the named palette, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `InvalidColorSpec` if no palette entry has that name.
    pub fn from_name(label: &str) -> Result<Self, MarkupError> {
        palette::named_color(label)
            .cloned()
            .ok_or_else(|| MarkupError::InvalidColorSpec(label.to_string()))
    }

    /// Look up a color in the numeric-code palette.
    ///
    /// Accepts a bare code (`"4"`, `"04"`) or the control-byte form
    /// (`"\x0304"`), optionally followed by `,background`, which is ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidColorSpec` if the foreground is missing, not a number
    /// or not in the palette.
    pub fn from_code(text: &str) -> Result<Self, MarkupError> {
        let foreground = text
            .trim_start_matches(COLOR_BYTE)
            .split(',')
            .next()
            .unwrap_or_default();
        foreground
            .parse::<u8>()
            .map_err(|_| MarkupError::InvalidColorSpec(text.to_string()))
            .and_then(Self::from_code_number)
    }

    /// Look up a numeric code in the code palette.
    ///
    /// # Errors
    ///
    /// Returns `InvalidColorSpec` if the code has no palette entry.
    pub fn from_code_number(code: u8) -> Result<Self, MarkupError> {
        palette::code_color(code)
            .cloned()
            .ok_or_else(|| MarkupError::InvalidColorSpec(format!("{code:02}")))
    }

    /// Parse a control-byte color string into foreground and background.
    ///
    /// Either side is `None` if it is missing or out of range, so `",04"`
    /// yields only a background.
    #[must_use]
    pub fn code_pair(text: &str) -> (Option<Self>, Option<Self>) {
        let body = text.trim_start_matches(COLOR_BYTE);
        let (fg, bg) = match body.split_once(',') {
            Some((fg, bg)) => (fg, Some(bg)),
            None => (body, None),
        };
        let lookup = |part: &str| {
            part.parse::<u8>()
                .ok()
                .and_then(|code| Self::from_code_number(code).ok())
        };
        (lookup(fg), bg.and_then(lookup))
    }

    /// Parse a bracket-dialect color value (cached).
    ///
    /// Supported formats, tried in order:
    /// - RGB triple: `255,0,0` (anything after the third component is ignored)
    /// - Hex: `#FF0000`, `#F00`
    /// - Numeric code: `4`, `04`
    /// - Palette name: `red`
    ///
    /// # Errors
    ///
    /// Returns `InvalidColorSpec` if the value matches none of the formats.
    pub fn parse(spec: &str) -> Result<Self, MarkupError> {
        static CACHE: LazyLock<Mutex<LruCache<String, Color>>> =
            LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

        let normalized = spec.trim().to_lowercase();

        if let Some(cached) = lock_recover(&CACHE).get(&normalized) {
            return Ok(cached.clone());
        }

        let result = Self::parse_uncached(&normalized)?;
        lock_recover(&CACHE).put(normalized, result.clone());

        Ok(result)
    }

    fn parse_uncached(spec: &str) -> Result<Self, MarkupError> {
        static RGB_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^([0-9]+),([0-9]+),([0-9]+)").expect("valid regex"));

        if spec.is_empty() {
            return Err(MarkupError::InvalidColorSpec(String::new()));
        }

        if let Some(caps) = RGB_RE.captures(spec) {
            // Digits only, so parsing fails on overflow alone.
            let component = |i: usize| caps[i].parse::<i64>().unwrap_or(i64::MAX);
            return Ok(Self::from_rgb(component(1), component(2), component(3)));
        }

        if spec.starts_with('#') {
            return Self::from_hex(spec);
        }

        if spec.len() <= 2 && spec.bytes().all(|b| b.is_ascii_digit()) {
            return Self::from_code(spec);
        }

        Self::from_name(spec)
    }

    /// CIE76 distance between two colors.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.lab
            .components()
            .iter()
            .zip(other.lab.components())
            .map(|(p1, p2)| (p2 - p1).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Plain Euclidean distance between the RGB components.
    #[must_use]
    pub fn rgb_distance(&self, other: &Self) -> f64 {
        let (r1, g1, b1) = self.to_rgb_tuple();
        let (r2, g2, b2) = other.to_rgb_tuple();
        [(r1, r2), (g1, g2), (b1, b2)]
            .iter()
            .map(|&(c1, c2)| (f64::from(c1) - f64::from(c2)).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Name of the closest entry in the named palette (cached).
    ///
    /// Entries are scanned in table order and the first one within [`JND`] is
    /// returned, even when a later entry is closer. Only if no entry falls
    /// under the threshold is the overall closest entry returned. White, for
    /// example, comes back as `"snow"`, which precedes `"white"` in the table
    /// and is within the threshold.
    #[must_use]
    pub fn nearest_name(&self) -> &'static str {
        *self.closest_name.get_or_init(|| {
            let mut best = ("", f64::INFINITY);
            for (name, other) in palette::named_colors() {
                let dist = self.distance(other);
                if dist <= JND {
                    return name;
                }
                if dist < best.1 {
                    best = (name, dist);
                }
            }
            best.0
        })
    }

    /// Closest entry in the numeric-code palette (cached).
    ///
    /// Always a full scan for the minimum distance; ties go to the lower code.
    #[must_use]
    pub fn nearest_code(&self) -> u8 {
        *self.closest_code.get_or_init(|| {
            let mut best = (0, f64::INFINITY);
            for (code, other) in palette::code_colors() {
                let dist = self.distance(other);
                if dist < best.1 {
                    best = (code, dist);
                }
            }
            best.0
        })
    }

    /// The nearest numeric code as its two-digit wire form, e.g. `"04"`.
    #[must_use]
    pub fn code(&self) -> String {
        format!("{:02}", self.nearest_code())
    }

    /// Palette name at distance exactly zero.
    ///
    /// A color built from a palette name keeps that name (`cyan` stays `cyan`
    /// even though `aqua` comes first).
    #[must_use]
    pub fn exact_name(&self) -> Option<&'static str> {
        self.name.or_else(|| {
            palette::named_colors()
                .find(|(_, other)| *other == self)
                .map(|(name, _)| name)
        })
    }

    /// The palette name this color was constructed from, if any.
    #[must_use]
    pub fn palette_name(&self) -> Option<&'static str> {
        self.name
    }

    /// Uppercase `#RRGGBB` form.
    #[must_use]
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Collapse a 6-digit hex string to 3 digits if every channel is a
    /// repeated digit. Anything else is returned unchanged.
    #[must_use]
    pub fn reduce_hex(hexstr: &str) -> String {
        let (prefix, digits) = match hexstr.strip_prefix('#') {
            Some(digits) => ("#", digits),
            None => ("", hexstr),
        };
        let bytes = digits.as_bytes();
        let reducible = bytes.len() == 6
            && bytes.iter().all(u8::is_ascii_hexdigit)
            && bytes
                .chunks(2)
                .all(|pair| pair[0].eq_ignore_ascii_case(&pair[1]));
        if !reducible {
            return hexstr.to_string();
        }

        let reduced: String = digits.chars().step_by(2).collect();
        format!("{prefix}{reduced}")
    }

    #[must_use]
    pub fn to_rgb_tuple(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    #[must_use]
    pub fn to_xyz_tuple(&self) -> XyzTuple {
        self.xyz
    }

    #[must_use]
    pub fn to_lab_tuple(&self) -> LabTuple {
        self.lab
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.lab == other.lab
    }
}

// Lab coordinates are finite for every 8-bit input.
impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for component in self.lab.components() {
            // Adding zero folds -0.0 into 0.0 so hashing agrees with `==`.
            (component + 0.0).to_bits().hash(state);
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Color")
            .field(&Self::reduce_hex(&self.hex))
            .finish()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nearest_name())
    }
}

impl FromStr for Color {
    type Err = MarkupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::from_triplet(red, green, blue)
    }
}
