use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Continuous colour scales for bar charts
// ---------------------------------------------------------------------------

/// Named gradients; each chart colours its bars by value along one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    /// Violet → teal (top rated).
    Aurora,
    Magma,
    Viridis,
    Plasma,
    Inferno,
}

impl ColorScale {
    /// Gradient stops as sRGB bytes, evenly spaced over 0..=1.
    fn stops(self) -> &'static [[u8; 3]] {
        match self {
            ColorScale::Aurora => &[[0x7C, 0x3A, 0xED], [0x2D, 0xD4, 0xBF]],
            ColorScale::Magma => &[
                [0x00, 0x00, 0x04],
                [0x51, 0x12, 0x7C],
                [0xB7, 0x37, 0x79],
                [0xFC, 0x89, 0x61],
                [0xFC, 0xFD, 0xBF],
            ],
            ColorScale::Viridis => &[
                [0x44, 0x01, 0x54],
                [0x3B, 0x52, 0x8B],
                [0x21, 0x90, 0x8C],
                [0x5D, 0xC8, 0x63],
                [0xFD, 0xE7, 0x25],
            ],
            ColorScale::Plasma => &[
                [0x0D, 0x08, 0x87],
                [0x7E, 0x03, 0xA8],
                [0xCC, 0x47, 0x78],
                [0xF8, 0x95, 0x40],
                [0xF0, 0xF9, 0x21],
            ],
            ColorScale::Inferno => &[
                [0x00, 0x00, 0x04],
                [0x56, 0x10, 0x6E],
                [0xBB, 0x37, 0x54],
                [0xF9, 0x8C, 0x0A],
                [0xFC, 0xFF, 0xA4],
            ],
        }
    }

    /// Colour at position `t` (clamped to 0..=1), interpolated in linear RGB.
    pub fn color_at(self, t: f64) -> Color32 {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) as f32 } else { 0.0 };
        let segments = (stops.len() - 1) as f32;
        let pos = t * segments;
        let lo = (pos.floor() as usize).min(stops.len() - 2);
        let frac = pos - lo as f32;

        let mixed = to_linear(stops[lo]).mix(to_linear(stops[lo + 1]), frac);
        let rgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }

    /// One colour per value, scaled between the smallest and largest value.
    pub fn colors_for(self, values: &[f64]) -> Vec<Color32> {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        values
            .iter()
            .map(|&v| {
                let t = if range.abs() < f64::EPSILON {
                    1.0
                } else {
                    (v - min) / range
                };
                self.color_at(t)
            })
            .collect()
    }
}

fn to_linear([r, g, b]: [u8; 3]) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color32, b: Color32) -> bool {
        let d = |x: u8, y: u8| x.abs_diff(y) <= 1;
        d(a.r(), b.r()) && d(a.g(), b.g()) && d(a.b(), b.b())
    }

    #[test]
    fn endpoints_hit_the_first_and_last_stop() {
        assert!(close(
            ColorScale::Aurora.color_at(0.0),
            Color32::from_rgb(0x7C, 0x3A, 0xED)
        ));
        assert!(close(
            ColorScale::Aurora.color_at(1.0),
            Color32::from_rgb(0x2D, 0xD4, 0xBF)
        ));
        assert_eq!(ColorScale::Viridis.color_at(7.0), ColorScale::Viridis.color_at(1.0));
        assert_eq!(ColorScale::Viridis.color_at(f64::NAN), ColorScale::Viridis.color_at(0.0));
    }

    #[test]
    fn colors_follow_value_rank() {
        let colors = ColorScale::Aurora.colors_for(&[1.0, 5.0, 3.0]);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], ColorScale::Aurora.color_at(0.0));
        assert_eq!(colors[1], ColorScale::Aurora.color_at(1.0));
        assert_ne!(colors[2], colors[0]);
    }

    #[test]
    fn flat_values_use_the_top_colour() {
        let colors = ColorScale::Magma.colors_for(&[2.0, 2.0]);
        assert!(colors.iter().all(|c| *c == ColorScale::Magma.color_at(1.0)));
        assert!(ColorScale::Magma.colors_for(&[]).is_empty());
    }
}
