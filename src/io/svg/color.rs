//! Color mapping utilities for SVG visualization.

use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl fmt::Display for Rgb {
    /// Format as CSS: rgb(r,g,b)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// HSL color: h in degrees, s and l in [0.0, 1.0].
#[derive(Clone, Copy, Debug)]
pub(crate) struct Hsl {
    pub(crate) h: f64,
    pub(crate) s: f64,
    pub(crate) l: f64,
}

impl fmt::Display for Hsl {
    /// Format as CSS HSL:
    ///   hsl({h:.1},{s:.0}%,{l:.0}%)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // normalize hue into [0,360)
        let h = (self.h % 360.0 + 360.0) % 360.0;
        let s = (self.s * 100.0).clamp(0.0, 100.0);
        let l = (self.l * 100.0).clamp(0.0, 100.0);
        write!(f, "hsl({:.1},{:.0}%,{:.0}%)", h, s, l)
    }
}

/// Fill for counties that have geometry but no district.
pub(crate) const UNASSIGNED_FILL: Rgb = Rgb { r: 200, g: 200, b: 200 };

const GOLDEN_ANGLE: f64 = 137.50776405;

/// Well-separated hues for consecutive district indices.
pub(crate) fn golden_angle_color(index: usize) -> Hsl {
    Hsl { h: ((index as f64) * GOLDEN_ANGLE) % 360.0, s: 0.70, l: 0.55 }
}

/// Fill color for a district id.
pub(crate) fn district_color(district: u32) -> Hsl {
    // offset so district 0 does not land on pure red
    golden_angle_color(district as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_formats_as_css() {
        let hsl = Hsl { h: 370.0, s: 0.5, l: 0.25 };
        assert_eq!(hsl.to_string(), "hsl(10.0,50%,25%)");
    }

    #[test]
    fn consecutive_districts_get_distinct_hues() {
        let hues = (0..16).map(|d| format!("{:.1}", district_color(d).h)).collect::<std::collections::HashSet<_>>();
        assert_eq!(hues.len(), 16);
    }
}
