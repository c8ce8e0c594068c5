use image::Rgba;
use lap_types::Color;

/// True when every channel differs by at most `tolerance`
pub fn matches(a: Color, b: Color, tolerance: u8) -> bool {
    a.channels()
        .into_iter()
        .zip(b.channels())
        .all(|(x, y)| x.abs_diff(y) <= tolerance)
}

/// Drop the alpha channel of a captured pixel
pub fn from_rgba(pixel: &Rgba<u8>) -> Color {
    let [r, g, b, _] = pixel.0;
    Color::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [Color; 6] = [
        Color::new(0, 0, 0),
        Color::new(255, 255, 255),
        Color::new(59, 1, 0),
        Color::new(246, 175, 100),
        Color::new(64, 0, 5),
        Color::new(10, 200, 30),
    ];

    #[test]
    fn test_reflexive_for_any_tolerance() {
        for c in SAMPLES {
            for t in [0, 1, 10, 255] {
                assert!(matches(c, c, t));
            }
        }
    }

    #[test]
    fn test_symmetric() {
        for a in SAMPLES {
            for b in SAMPLES {
                for t in [0, 5, 10, 200] {
                    assert_eq!(matches(a, b, t), matches(b, a, t));
                }
            }
        }
    }

    #[test]
    fn test_zero_tolerance_is_exact_equality() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(matches(a, b, 0), a == b);
            }
        }
    }

    #[test]
    fn test_every_channel_must_be_within_tolerance() {
        let target = Color::new(59, 1, 0);
        assert!(matches(Color::new(64, 0, 5), target, 5));
        assert!(!matches(Color::new(64, 0, 6), target, 5));
        assert!(!matches(Color::new(70, 1, 0), target, 10));
    }

    #[test]
    fn test_from_rgba_ignores_alpha() {
        assert_eq!(from_rgba(&Rgba([1, 2, 3, 0])), Color::new(1, 2, 3));
    }
}
