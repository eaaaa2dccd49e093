use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::filter::contributors::{AxisTransform, CoefficientOpts};
use crate::filter::kernels::Filter;
use crate::foundation::core::{AlphaFlags, Colorspace, Dimensions, EdgeMode, MAX_CHANNELS};
use crate::foundation::error::{ResizeError, ResizeResult};

/// 2^-40: lifts zero alpha just enough to keep color recoverable through premultiplication.
pub const DEFAULT_ALPHA_EPSILON: f32 = 9.094_947e-13;

/// Part of the source that is stretched over the whole output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceRegion {
    /// The full input image.
    #[default]
    Whole,
    /// Normalized sub-rectangle: `x0..x1` and `y0..y1` in input widths and heights.
    Normalized {
        /// Region bounds.
        rect: Rect,
    },
    /// Explicit per-axis scale (output pixels per input pixel) and output-space offset.
    Subpixel {
        /// Scale per axis.
        scale: Vec2,
        /// Offset per axis, in output pixels.
        offset: Vec2,
    },
}

impl SourceRegion {
    fn validate(&self) -> ResizeResult<()> {
        match *self {
            Self::Whole => Ok(()),
            Self::Normalized { rect } => {
                let finite = [rect.x0, rect.y0, rect.x1, rect.y1]
                    .iter()
                    .all(|v| v.is_finite());
                if !finite || rect.x1 <= rect.x0 || rect.y1 <= rect.y0 {
                    return Err(ResizeError::config(format!(
                        "source region {rect:?} must be finite with x0 < x1 and y0 < y1"
                    )));
                }
                Ok(())
            }
            Self::Subpixel { scale, offset } => {
                if !scale.is_finite() || scale.x <= 0.0 || scale.y <= 0.0 {
                    return Err(ResizeError::config(format!(
                        "subpixel scale must be finite and > 0, got {scale:?}"
                    )));
                }
                if !offset.is_finite() {
                    return Err(ResizeError::config(format!(
                        "subpixel offset must be finite, got {offset:?}"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Horizontal and vertical output-to-input transforms.
    pub fn transforms(
        &self,
        input: Dimensions,
        output: Dimensions,
    ) -> ResizeResult<(AxisTransform, AxisTransform)> {
        match *self {
            Self::Whole => Ok((
                AxisTransform::from_region(input.width, output.width, 0.0, 1.0)?,
                AxisTransform::from_region(input.height, output.height, 0.0, 1.0)?,
            )),
            Self::Normalized { rect } => Ok((
                AxisTransform::from_region(
                    input.width,
                    output.width,
                    rect.x0 as f32,
                    rect.x1 as f32,
                )?,
                AxisTransform::from_region(
                    input.height,
                    output.height,
                    rect.y0 as f32,
                    rect.y1 as f32,
                )?,
            )),
            Self::Subpixel { scale, offset } => Ok((
                AxisTransform::new(scale.x as f32, offset.x as f32)?,
                AxisTransform::new(scale.y as f32, offset.y as f32)?,
            )),
        }
    }
}

/// Runtime knobs that are not part of an individual image's description.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleOpts {
    /// Filter for magnifying axes without an explicit choice.
    pub upsample_filter: Filter,
    /// Filter for minifying axes without an explicit choice.
    pub downsample_filter: Filter,
    /// Coefficient trimming and sum checks.
    pub coefficients: CoefficientOpts,
    /// Added to alpha of integer sources before premultiplying.
    pub alpha_epsilon: f32,
}

impl Default for ResampleOpts {
    fn default() -> Self {
        Self {
            upsample_filter: Filter::CatmullRom,
            downsample_filter: Filter::Mitchell,
            coefficients: CoefficientOpts::default(),
            alpha_epsilon: DEFAULT_ALPHA_EPSILON,
        }
    }
}

impl ResampleOpts {
    /// Filter used for an axis with the given transform when none was requested.
    pub fn default_filter(&self, transform: AxisTransform) -> Filter {
        if transform.is_upsampling() {
            self.upsample_filter
        } else {
            self.downsample_filter
        }
    }

    fn validate(&self) -> ResizeResult<()> {
        if !self.alpha_epsilon.is_finite() || self.alpha_epsilon < 0.0 {
            return Err(ResizeError::config(format!(
                "alpha_epsilon must be finite and >= 0, got {}",
                self.alpha_epsilon
            )));
        }
        let c = self.coefficients;
        if !c.trim_threshold.is_finite() || c.trim_threshold < 0.0 {
            return Err(ResizeError::config(format!(
                "trim_threshold must be finite and >= 0, got {}",
                c.trim_threshold
            )));
        }
        if c.sum_tolerance.is_nan() || c.sum_tolerance < 0.0 {
            return Err(ResizeError::config(format!(
                "sum_tolerance must be >= 0, got {}",
                c.sum_tolerance
            )));
        }
        Ok(())
    }
}

/// Everything about a resize except the pixels and their sizes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Interleaved channels per pixel, `1..=64`.
    pub channels: usize,
    /// Index of the alpha channel, if any.
    pub alpha_channel: Option<usize>,
    /// Alpha handling.
    pub flags: AlphaFlags,
    /// Horizontal filter; picked from [`ResampleOpts`] when unset.
    pub filter_x: Option<Filter>,
    /// Vertical filter; picked from [`ResampleOpts`] when unset.
    pub filter_y: Option<Filter>,
    /// Horizontal edge policy.
    pub edge_x: EdgeMode,
    /// Vertical edge policy.
    pub edge_y: EdgeMode,
    /// Transfer function of the input samples.
    pub input_colorspace: Colorspace,
    /// Transfer function of the output samples.
    pub output_colorspace: Colorspace,
    /// Source area mapped onto the output.
    pub region: SourceRegion,
    /// Filter defaults and numeric policy.
    pub opts: ResampleOpts,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self::new(4)
    }
}

impl ResizeConfig {
    /// Linear, clamped, no alpha, default filters.
    pub fn new(channels: usize) -> Self {
        Self {
            channels,
            alpha_channel: None,
            flags: AlphaFlags::NONE,
            filter_x: None,
            filter_y: None,
            edge_x: EdgeMode::Clamp,
            edge_y: EdgeMode::Clamp,
            input_colorspace: Colorspace::Linear,
            output_colorspace: Colorspace::Linear,
            region: SourceRegion::Whole,
            opts: ResampleOpts::default(),
        }
    }

    /// Set the alpha channel and its handling.
    pub fn with_alpha(mut self, alpha_channel: Option<usize>, flags: AlphaFlags) -> Self {
        self.alpha_channel = alpha_channel;
        self.flags = flags;
        self
    }

    /// Same filter on both axes.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter_x = Some(filter);
        self.filter_y = Some(filter);
        self
    }

    /// Same edge policy on both axes.
    pub fn with_edge(mut self, edge: EdgeMode) -> Self {
        self.edge_x = edge;
        self.edge_y = edge;
        self
    }

    /// Same colorspace on input and output.
    pub fn with_colorspace(mut self, colorspace: Colorspace) -> Self {
        self.input_colorspace = colorspace;
        self.output_colorspace = colorspace;
        self
    }

    /// Source region.
    pub fn with_region(mut self, region: SourceRegion) -> Self {
        self.region = region;
        self
    }

    /// Check every field that does not depend on image sizes.
    pub fn validate(&self) -> ResizeResult<()> {
        if self.channels == 0 || self.channels > MAX_CHANNELS {
            return Err(ResizeError::config(format!(
                "channel count must be in 1..={MAX_CHANNELS}, got {}",
                self.channels
            )));
        }
        if let Some(alpha) = self.alpha_channel
            && alpha >= self.channels
        {
            return Err(ResizeError::config(format!(
                "alpha channel {alpha} out of range for {} channels",
                self.channels
            )));
        }
        self.region.validate()?;
        self.opts.validate()
    }

    /// Parse a JSON job description; missing fields take their defaults.
    pub fn from_json(json: &str) -> ResizeResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty JSON.
    pub fn to_json(&self) -> ResizeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resize/config.rs"]
mod tests;
