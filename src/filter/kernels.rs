use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ResizeError, ResizeResult};

/// Reconstruction filter applied along one axis.
///
/// Kernels are even functions of the sample offset `x` and vanish outside `±support`.
/// The `scale` argument is the inverse upsampling ratio when upsampling and the
/// downsampling ratio when downsampling; only [`Filter::Box`] depends on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Trapezoid that degenerates to exact area averaging.
    Box,
    /// Linear tent, support 1.
    Triangle,
    /// Cubic B-spline (B=1, C=0); smooth, no ringing.
    CubicBSpline,
    /// Catmull-Rom (B=0, C=1/2); interpolating, sharp.
    CatmullRom,
    /// Mitchell-Netravali (B=1/3, C=1/3).
    Mitchell,
}

impl Filter {
    /// Every filter, in declaration order.
    pub const ALL: [Filter; 5] = [
        Self::Box,
        Self::Triangle,
        Self::CubicBSpline,
        Self::CatmullRom,
        Self::Mitchell,
    ];

    /// Kernel weight at offset `x`.
    pub fn kernel(self, x: f32, scale: f32) -> f32 {
        let x = x.abs();
        match self {
            Self::Box => {
                let half = scale * 0.5;
                let t = 0.5 + half;
                if x >= t {
                    0.0
                } else if x <= 0.5 - half {
                    1.0
                } else {
                    (t - x) / scale
                }
            }
            Self::Triangle => {
                if x <= 1.0 {
                    1.0 - x
                } else {
                    0.0
                }
            }
            Self::CubicBSpline => {
                if x < 1.0 {
                    (4.0 + x * x * (3.0 * x - 6.0)) / 6.0
                } else if x < 2.0 {
                    (8.0 + x * (-12.0 + x * (6.0 - x))) / 6.0
                } else {
                    0.0
                }
            }
            Self::CatmullRom => {
                if x < 1.0 {
                    1.0 - x * x * (2.5 - 1.5 * x)
                } else if x < 2.0 {
                    2.0 - x * (4.0 + x * (0.5 * x - 2.5))
                } else {
                    0.0
                }
            }
            Self::Mitchell => {
                if x < 1.0 {
                    (16.0 + x * x * (21.0 * x - 36.0)) / 18.0
                } else if x < 2.0 {
                    (32.0 + x * (-60.0 + x * (36.0 - 7.0 * x))) / 18.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Half-width of the kernel in the units `kernel` is evaluated in.
    pub fn support(self, scale: f32) -> f32 {
        match self {
            Self::Box => 0.5 + scale * 0.5,
            Self::Triangle => 1.0,
            Self::CubicBSpline | Self::CatmullRom | Self::Mitchell => 2.0,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Triangle => "triangle",
            Self::CubicBSpline => "cubic_b_spline",
            Self::CatmullRom => "catmull_rom",
            Self::Mitchell => "mitchell",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Filter {
    type Err = ResizeError;

    fn from_str(s: &str) -> ResizeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "box" | "trapezoid" => Ok(Self::Box),
            "triangle" | "tent" | "linear" => Ok(Self::Triangle),
            "cubic_b_spline" | "cubicbspline" | "bspline" | "cubic" => Ok(Self::CubicBSpline),
            "catmull_rom" | "catmullrom" => Ok(Self::CatmullRom),
            "mitchell" => Ok(Self::Mitchell),
            other => Err(ResizeError::config(format!("unknown filter '{other}'"))),
        }
    }
}

/// Ratios above 1 magnify.
pub(crate) fn is_upsampling(scale: f32) -> bool {
    scale > 1.0
}

/// Number of source-space pixels one filter application touches.
pub(crate) fn filter_pixel_width(filter: Filter, scale: f32) -> usize {
    if is_upsampling(scale) {
        (filter.support(1.0 / scale) * 2.0).ceil() as usize
    } else {
        (filter.support(scale) * 2.0 / scale).ceil() as usize
    }
}

/// Context pixels needed on each side of a scanline.
pub(crate) fn filter_pixel_margin(filter: Filter, scale: f32) -> usize {
    filter_pixel_width(filter, scale) / 2
}

/// Stride of one coefficient group.
pub(crate) fn coefficient_width(filter: Filter, scale: f32) -> usize {
    if is_upsampling(scale) {
        (filter.support(1.0 / scale) * 2.0).ceil() as usize
    } else {
        (filter.support(scale) * 2.0).ceil() as usize
    }
}

/// Upsampling builds one group per output pixel, downsampling one per margined input pixel.
pub(crate) fn contributor_count(
    filter: Filter,
    scale: f32,
    input_size: usize,
    output_size: usize,
) -> usize {
    if is_upsampling(scale) {
        output_size
    } else {
        input_size + filter_pixel_margin(filter, scale) * 2
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/kernels.rs"]
mod tests;
