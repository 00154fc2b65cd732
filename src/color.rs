// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color parsing and conversion.
//!
//! Hex parsing and the WCAG luminance/contrast formulas, plus the RGB/HSL
//! conversions the contrast fixer works in.

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color in HSL space: hue in degrees [0, 360), saturation and lightness in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Parse a CSS hex color (#rgb, #rrggbb); exactly one leading `#` is required
pub fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let hex = hex.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Rgb { r, g, b })
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgb { r, g, b })
        }
        _ => None,
    }
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to HSL using the max/min channel formulas
    pub fn to_hsl(self) -> Hsl {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;

        if delta == 0.0 {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        Hsl { h, s, l }
    }

    /// Relative luminance per WCAG 2.x
    /// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
    pub fn relative_luminance(self) -> f64 {
        let srgb = [self.r, self.g, self.b].map(|c| {
            let v = c as f64 / 255.0;
            if v <= 0.04045 {
                v / 12.92
            } else {
                ((v + 0.055) / 1.055).powf(2.4)
            }
        });
        0.2126 * srgb[0] + 0.7152 * srgb[1] + 0.0722 * srgb[2]
    }
}

impl Hsl {
    /// Convert back to 8-bit sRGB
    pub fn to_rgb(self) -> Rgb {
        let c = (1.0 - (2.0 * self.l - 1.0).abs()) * self.s;
        let hp = self.h.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = self.l - c / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb::new(channel(r1), channel(g1), channel(b1))
    }

    /// CSS Color 4 `hsl()` notation; every component is truncated, not rounded
    pub fn to_css(self) -> String {
        format!(
            "hsl({} {}% {}%)",
            self.h.trunc() as i64,
            (self.s * 100.0).trunc() as i64,
            (self.l * 100.0).trunc() as i64
        )
    }
}

/// Calculate contrast ratio between two colors
/// Returns a ratio >= 1.0 (e.g., 4.5, 7.0, 21.0)
pub fn contrast_ratio(fg: Rgb, bg: Rgb) -> f64 {
    let l1 = fg.relative_luminance();
    let l2 = bg.relative_luminance();
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#fff"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(parse_hex_color("#000"), Some(Rgb::new(0, 0, 0)));
        assert_eq!(parse_hex_color("#FF0000"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(parse_hex_color(" #00ff00 "), Some(Rgb::new(0, 255, 0)));
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }

    #[test]
    fn test_hex_color_needs_single_hash() {
        assert_eq!(parse_hex_color("777777"), None);
        assert_eq!(parse_hex_color("##777777"), None);
        assert_eq!(parse_hex_color("#777777"), Some(Rgb::new(0x77, 0x77, 0x77)));
    }

    #[test]
    fn test_gray_to_hsl() {
        let hsl = Rgb::new(0x77, 0x77, 0x77).to_hsl();
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert!((hsl.l - 0.4667).abs() < 0.001);
    }

    #[test]
    fn test_primary_hues() {
        assert_eq!(Rgb::new(255, 0, 0).to_hsl().h, 0.0);
        assert!((Rgb::new(0, 255, 0).to_hsl().h - 120.0).abs() < 1e-9);
        assert!((Rgb::new(0, 0, 255).to_hsl().h - 240.0).abs() < 1e-9);
        // Magenta sits on the negative side of the red sector
        assert!((Rgb::new(255, 0, 255).to_hsl().h - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_saturation_of_pure_red() {
        let hsl = Rgb::new(255, 0, 0).to_hsl();
        assert!((hsl.s - 1.0).abs() < 1e-9);
        assert!((hsl.l - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_hsl_back_to_rgb() {
        for rgb in [Rgb::new(0x33, 0x66, 0x99), Rgb::new(200, 10, 70), Rgb::new(0x77, 0x77, 0x77)] {
            assert_eq!(rgb.to_hsl().to_rgb(), rgb);
        }
    }

    #[test]
    fn test_css_truncates() {
        let hsl = Hsl { h: 210.9, s: 0.499, l: 0.16666 };
        assert_eq!(hsl.to_css(), "hsl(210 49% 16%)");
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255));
        assert!((ratio - 21.0).abs() < 0.1, "Black on white should be ~21:1, got {:.2}", ratio);
    }

    #[test]
    fn test_contrast_ratio_same_color() {
        let gray = Rgb::new(128, 128, 128);
        assert!((contrast_ratio(gray, gray) - 1.0).abs() < 0.01);
    }
}
