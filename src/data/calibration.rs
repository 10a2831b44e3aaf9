//! Pixel-to-millimeter calibration and the distance readout derived from it.

use std::fmt;

/// Millimeters represented by one canvas pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    mm_per_pixel: f64,
}

impl Calibration {
    pub const DEFAULT_MM_PER_PIXEL: f64 = 0.1;

    /// Build a calibration; `None` unless the factor is finite and positive.
    pub fn new(mm_per_pixel: f64) -> Option<Self> {
        (mm_per_pixel.is_finite() && mm_per_pixel > 0.0).then_some(Self { mm_per_pixel })
    }

    pub fn mm_per_pixel(&self) -> f64 {
        self.mm_per_pixel
    }

    /// Convert a pixel distance into a displayable reading.
    pub fn reading(&self, pixels: f64) -> Reading {
        Reading::from_millimeters(pixels * self.mm_per_pixel)
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            mm_per_pixel: Self::DEFAULT_MM_PER_PIXEL,
        }
    }
}

/// A measured distance, rounded for display.
///
/// Centimeters are rounded once, to one decimal, half away from zero. One
/// tenth of a centimeter is one millimeter, so that is the unrounded
/// millimeter value rounded to an integer. The two-decimal millimeter figure
/// is kept separately for display and never feeds the centimeter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    mm_hundredths: i64,
    cm_tenths: i64,
}

impl Reading {
    pub fn from_millimeters(mm: f64) -> Self {
        Self {
            mm_hundredths: (mm * 100.0).round() as i64,
            cm_tenths: mm.round() as i64,
        }
    }

    /// Millimeters rounded to two decimals.
    pub fn millimeters(&self) -> f64 {
        self.mm_hundredths as f64 / 100.0
    }

    /// Centimeters rounded to one decimal.
    pub fn centimeters(&self) -> f64 {
        self.cm_tenths as f64 / 10.0
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} cm", self.centimeters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centimeters_round_once_from_raw_millimeters() {
        // 0.4951 mm shows as 0.50 mm but is still 0.0 cm.
        let r = Reading::from_millimeters(0.4951);
        assert_eq!(r.millimeters(), 0.5);
        assert_eq!(r.to_string(), "0.0 cm");
    }

    #[test]
    fn half_tenth_rounds_away_from_zero() {
        assert_eq!(Reading::from_millimeters(0.5).to_string(), "0.1 cm");
        assert_eq!(Reading::from_millimeters(12.5).to_string(), "1.3 cm");
        assert_eq!(Reading::from_millimeters(12.49).to_string(), "1.2 cm");
    }
}
