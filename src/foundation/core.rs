use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ResizeError, ResizeResult};

/// Largest channel count accepted by the resampler.
pub const MAX_CHANNELS: usize = 64;

/// Storage representation of one channel sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Datatype {
    /// 8-bit unsigned integer, normalized by 255.
    U8,
    /// 16-bit unsigned integer, normalized by 65535.
    U16,
    /// 32-bit unsigned integer, normalized by 4294967295.
    U32,
    /// 32-bit float, passed through unchanged.
    F32,
}

impl Datatype {
    /// Size of one sample in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 | Self::F32 => 4,
        }
    }

    /// `true` for the quantized integer representations.
    pub fn is_integer(self) -> bool {
        !matches!(self, Self::F32)
    }

    fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::F32 => "f32",
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Datatype {
    type Err = ResizeError;

    fn from_str(s: &str) -> ResizeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "u8" | "uint8" => Ok(Self::U8),
            "u16" | "uint16" => Ok(Self::U16),
            "u32" | "uint32" => Ok(Self::U32),
            "f32" | "float" => Ok(Self::F32),
            other => Err(ResizeError::config(format!("unknown datatype '{other}'"))),
        }
    }
}

/// Transfer function of the stored samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colorspace {
    /// Samples are linear light.
    #[default]
    Linear,
    /// Samples are sRGB-encoded; filtering happens after conversion to linear.
    Srgb,
}

impl fmt::Display for Colorspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear",
            Self::Srgb => "srgb",
        })
    }
}

impl FromStr for Colorspace {
    type Err = ResizeError;

    fn from_str(s: &str) -> ResizeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "srgb" | "s_rgb" => Ok(Self::Srgb),
            other => Err(ResizeError::config(format!("unknown colorspace '{other}'"))),
        }
    }
}

/// Policy for sample positions outside the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Repeat the nearest edge pixel.
    #[default]
    Clamp,
    /// Mirror the image around its edges.
    Reflect,
    /// Tile the image.
    Wrap,
    /// Treat everything outside the image as zero.
    Zero,
}

impl EdgeMode {
    /// Map a possibly out-of-range index `n` into `[0, max)`.
    ///
    /// `Zero` maps to 0; the decoder overwrites those samples afterwards.
    pub fn resolve(self, n: i32, max: i32) -> i32 {
        if n >= 0 && n < max {
            return n;
        }
        match self {
            Self::Zero => 0,
            Self::Clamp => n.clamp(0, max - 1),
            Self::Reflect => {
                if n < 0 {
                    // -n can still overshoot when the margin exceeds the image.
                    (-n).min(max - 1)
                } else {
                    let max_times_2 = max * 2;
                    if n >= max_times_2 {
                        0
                    } else {
                        max_times_2 - n - 1
                    }
                }
            }
            Self::Wrap => n.rem_euclid(max),
        }
    }
}

impl fmt::Display for EdgeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Clamp => "clamp",
            Self::Reflect => "reflect",
            Self::Wrap => "wrap",
            Self::Zero => "zero",
        })
    }
}

impl FromStr for EdgeMode {
    type Err = ResizeError;

    fn from_str(s: &str) -> ResizeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "reflect" | "mirror" => Ok(Self::Reflect),
            "wrap" | "repeat" => Ok(Self::Wrap),
            "zero" => Ok(Self::Zero),
            other => Err(ResizeError::config(format!("unknown edge mode '{other}'"))),
        }
    }
}

/// Alpha handling switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaFlags {
    /// Color channels are already multiplied by alpha.
    pub premultiplied: bool,
    /// The alpha channel goes through the colorspace transfer function too.
    pub uses_colorspace: bool,
}

impl AlphaFlags {
    /// Straight alpha, linear alpha channel.
    pub const NONE: Self = Self {
        premultiplied: false,
        uses_colorspace: false,
    };

    /// Color is already premultiplied.
    pub const PREMULTIPLIED: Self = Self {
        premultiplied: true,
        uses_colorspace: false,
    };

    /// Alpha is gamma-encoded like the color channels.
    pub const USES_COLORSPACE: Self = Self {
        premultiplied: false,
        uses_colorspace: true,
    };

    /// Union of two flag sets.
    pub const fn union(self, other: Self) -> Self {
        Self {
            premultiplied: self.premultiplied || other.premultiplied,
            uses_colorspace: self.uses_colorspace || other.uses_colorspace,
        }
    }
}

/// Width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create dimensions; both sides must be non-zero.
    pub fn new(width: u32, height: u32) -> ResizeResult<Self> {
        if width == 0 || height == 0 {
            return Err(ResizeError::config(format!(
                "dimensions must be non-zero, got {width}x{height}"
            )));
        }
        if width > i32::MAX as u32 / 2 || height > i32::MAX as u32 / 2 {
            return Err(ResizeError::config(format!(
                "dimensions {width}x{height} exceed the supported range"
            )));
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Dimensions {
    type Err = ResizeError;

    fn from_str(s: &str) -> ResizeResult<Self> {
        let s = s.trim();
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| ResizeError::config(format!("expected WIDTHxHEIGHT, got '{s}'")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|_| ResizeError::config(format!("invalid dimension '{v}' in '{s}'")))
        };
        Self::new(parse(w)?, parse(h)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
