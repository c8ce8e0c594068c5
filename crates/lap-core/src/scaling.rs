use std::fmt;
use std::str::FromStr;

use crate::error::ResolutionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = ResolutionError;

    /// Accepts `1920x1080`, `1920×1080` and `1920x1080 (Full HD)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let head = s.split('(').next().unwrap_or_default().trim().to_lowercase();
        let (w, h) = head
            .split_once('x')
            .or_else(|| head.split_once('×'))
            .ok_or_else(|| ResolutionError::Format(s.to_string()))?;

        let width: u32 = w.trim().parse().map_err(|_| ResolutionError::Format(s.to_string()))?;
        let height: u32 = h.trim().parse().map_err(|_| ResolutionError::Format(s.to_string()))?;

        if width == 0 || height == 0 {
            return Err(ResolutionError::Zero(width, height));
        }
        Ok(Self { width, height })
    }
}

/// DPI scaling applied to cropped-capture coordinates before clicking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalingFactor {
    #[default]
    None,
    P125,
    P150,
    P175,
    P200,
}

impl ScalingFactor {
    /// Unknown factors mean no scaling
    pub fn from_f64(factor: f64) -> Self {
        const EPS: f64 = 1e-6;
        match factor {
            f if (f - 1.25).abs() < EPS => ScalingFactor::P125,
            f if (f - 1.5).abs() < EPS => ScalingFactor::P150,
            f if (f - 1.75).abs() < EPS => ScalingFactor::P175,
            f if (f - 2.0).abs() < EPS => ScalingFactor::P200,
            _ => ScalingFactor::None,
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            ScalingFactor::None => 1.0,
            ScalingFactor::P125 => 1.25,
            ScalingFactor::P150 => 1.5,
            ScalingFactor::P175 => 1.75,
            ScalingFactor::P200 => 2.0,
        }
    }

    /// Multiplier for coordinates; the values are the calibrated ones, not exact reciprocals
    pub fn ratio(self) -> f64 {
        match self {
            ScalingFactor::None => 1.0,
            ScalingFactor::P125 => 0.80,
            ScalingFactor::P150 => 0.67,
            ScalingFactor::P175 => 0.57,
            ScalingFactor::P200 => 0.50,
        }
    }

    /// Scale one coordinate, truncating toward zero
    pub fn apply(self, value: i32) -> i32 {
        (value as f64 * self.ratio()) as i32
    }
}

impl fmt::Display for ScalingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.factor() * 100.0).round() as u32)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalingGuess {
    pub native: Option<Resolution>,
    pub factor: ScalingFactor,
    pub description: String,
}

// (native, [(scaled width, scaled height, factor, description)])
const COMMON_SCALINGS: &[((u32, u32), &[(u32, u32, ScalingFactor, &str)])] = &[
    (
        (1920, 1080),
        &[
            (1536, 864, ScalingFactor::P125, "125% scaling"),
            (1280, 720, ScalingFactor::P150, "150% scaling"),
            (1097, 617, ScalingFactor::P175, "175% scaling"),
            (960, 540, ScalingFactor::P200, "200% scaling"),
        ],
    ),
    (
        (2560, 1440),
        &[
            (2048, 1152, ScalingFactor::P125, "125% scaling"),
            (1707, 960, ScalingFactor::P150, "150% scaling"),
            (1463, 819, ScalingFactor::P175, "175% scaling"),
            (1280, 720, ScalingFactor::P200, "200% scaling"),
        ],
    ),
    (
        (3840, 2160),
        &[
            (3072, 1728, ScalingFactor::P125, "125% scaling"),
            (2176, 1224, ScalingFactor::P175, "175% scaling"),
        ],
    ),
];

/// Guess DPI scaling from a reported monitor size that looks like a scaled-down native one
pub fn detect_likely_scaling(width: u32, height: u32) -> ScalingGuess {
    for ((native_w, native_h), scaled) in COMMON_SCALINGS {
        for (w, h, factor, description) in scaled.iter() {
            if width.abs_diff(*w) <= 5 && height.abs_diff(*h) <= 5 {
                return ScalingGuess {
                    native: Some(Resolution::new(*native_w, *native_h)),
                    factor: *factor,
                    description: description.to_string(),
                };
            }
        }
    }

    ScalingGuess {
        native: None,
        factor: ScalingFactor::None,
        description: "No scaling detected".to_string(),
    }
}
