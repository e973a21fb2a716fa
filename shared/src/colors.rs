/// Deterministic language swatch color via CRC32 hash of the code.
/// The hash picks a hue; saturation and lightness are fixed so every
/// topolect gets a stable, legible legend color.
pub fn language_color(code: &str) -> (u8, u8, u8) {
    let hue = (crc32fast::hash(code.as_bytes()) % 360) as f64;
    hsl_to_rgb(hue, 0.55, 0.5)
}

/// Convert HSL (h: 0..360, s: 0..1, l: 0..1) to RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    if s.abs() < f64::EPSILON {
        let v = (l * 255.0).round() as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    let h = h / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    (
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::{hsl_to_rgb, language_color};

    #[test]
    fn hsl_to_rgb_pure_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), (0, 0, 255));
    }

    #[test]
    fn hsl_to_rgb_zero_saturation_is_gray() {
        assert_eq!(hsl_to_rgb(42.0, 0.0, 0.5), (128, 128, 128));
    }

    #[test]
    fn language_color_is_deterministic() {
        assert_eq!(language_color("YUE"), language_color("YUE"));
    }

    #[test]
    fn language_color_varies_for_different_codes() {
        assert_ne!(language_color("YUE"), language_color("CMN"));
    }
}
