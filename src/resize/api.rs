//! One-call entry points, from "just resize these bytes" to full control.
//!
//! Every function builds a [`ResizePlan`], checks the buffers, and runs it with a single scratch
//! allocation. Nothing is written to `output` unless every check passes.

use kurbo::{Rect, Vec2};

use crate::filter::kernels::Filter;
use crate::foundation::core::{AlphaFlags, Colorspace, EdgeMode};
use crate::foundation::error::ResizeResult;
use crate::foundation::sample::Sample;
use crate::pipeline::arena::ScratchAllocator;
use crate::resize::config::{ResizeConfig, SourceRegion};
use crate::resize::plan::ResizePlan;
use crate::resize::view::{ImageMut, ImageRef};

/// Linear `u8` resize with default filters, clamped edges and no alpha handling.
pub fn resize_u8(
    input: ImageRef<'_, u8>,
    output: ImageMut<'_, u8>,
    channels: usize,
) -> ResizeResult<()> {
    resize(input, output, &ResizeConfig::new(channels))
}

/// Linear `f32` resize with default filters, clamped edges and no alpha handling.
pub fn resize_f32(
    input: ImageRef<'_, f32>,
    output: ImageMut<'_, f32>,
    channels: usize,
) -> ResizeResult<()> {
    resize(input, output, &ResizeConfig::new(channels))
}

/// sRGB `u8` resize: color is filtered in linear light, alpha stays linear unless flagged.
pub fn resize_u8_srgb(
    input: ImageRef<'_, u8>,
    output: ImageMut<'_, u8>,
    channels: usize,
    alpha_channel: Option<usize>,
    flags: AlphaFlags,
) -> ResizeResult<()> {
    resize_u8_srgb_edge(input, output, channels, alpha_channel, flags, EdgeMode::Clamp)
}

/// [`resize_u8_srgb`] with an explicit edge policy for both axes.
pub fn resize_u8_srgb_edge(
    input: ImageRef<'_, u8>,
    output: ImageMut<'_, u8>,
    channels: usize,
    alpha_channel: Option<usize>,
    flags: AlphaFlags,
    edge: EdgeMode,
) -> ResizeResult<()> {
    let config = ResizeConfig::new(channels)
        .with_alpha(alpha_channel, flags)
        .with_edge(edge)
        .with_colorspace(Colorspace::Srgb);
    resize(input, output, &config)
}

/// Knobs of the typed generic entry points.
#[derive(Clone, Copy, Debug)]
pub struct GenericOpts {
    /// Interleaved channels per pixel.
    pub channels: usize,
    /// Alpha channel index, if any.
    pub alpha_channel: Option<usize>,
    /// Alpha handling.
    pub flags: AlphaFlags,
    /// Edge policy for both axes.
    pub edge: EdgeMode,
    /// Filter for both axes; `None` picks per axis.
    pub filter: Option<Filter>,
    /// Colorspace of input and output.
    pub colorspace: Colorspace,
}

impl GenericOpts {
    /// Linear, clamped, no alpha, default filters.
    pub fn new(channels: usize) -> Self {
        Self {
            channels,
            alpha_channel: None,
            flags: AlphaFlags::NONE,
            edge: EdgeMode::Clamp,
            filter: None,
            colorspace: Colorspace::Linear,
        }
    }

    fn config(&self) -> ResizeConfig {
        let mut config = ResizeConfig::new(self.channels)
            .with_alpha(self.alpha_channel, self.flags)
            .with_edge(self.edge)
            .with_colorspace(self.colorspace);
        config.filter_x = self.filter;
        config.filter_y = self.filter;
        config
    }
}

fn resize_generic<S: Sample>(
    input: ImageRef<'_, S>,
    output: ImageMut<'_, S>,
    opts: &GenericOpts,
    allocator: &mut dyn ScratchAllocator,
) -> ResizeResult<()> {
    let plan = ResizePlan::new(input.dimensions()?, output.dimensions()?, &opts.config())?;
    plan.execute_with(input, output, allocator)
}

/// `u8` resize with every option and a caller-chosen allocator.
pub fn resize_u8_generic(
    input: ImageRef<'_, u8>,
    output: ImageMut<'_, u8>,
    opts: &GenericOpts,
    allocator: &mut dyn ScratchAllocator,
) -> ResizeResult<()> {
    resize_generic(input, output, opts, allocator)
}

/// `u16` resize with every option and a caller-chosen allocator.
pub fn resize_u16_generic(
    input: ImageRef<'_, u16>,
    output: ImageMut<'_, u16>,
    opts: &GenericOpts,
    allocator: &mut dyn ScratchAllocator,
) -> ResizeResult<()> {
    resize_generic(input, output, opts, allocator)
}

/// `f32` resize with every option and a caller-chosen allocator.
pub fn resize_f32_generic(
    input: ImageRef<'_, f32>,
    output: ImageMut<'_, f32>,
    opts: &GenericOpts,
    allocator: &mut dyn ScratchAllocator,
) -> ResizeResult<()> {
    resize_generic(input, output, opts, allocator)
}

/// Resize between any two sample types under a full configuration.
pub fn resize<S: Sample, D: Sample>(
    input: ImageRef<'_, S>,
    output: ImageMut<'_, D>,
    config: &ResizeConfig,
) -> ResizeResult<()> {
    let plan = ResizePlan::new(input.dimensions()?, output.dimensions()?, config)?;
    plan.execute(input, output)
}

/// Stretch the normalized source rectangle `region` over the whole output.
///
/// Adjacent regions rendered into adjacent tiles reproduce the whole-image result.
pub fn resize_region<S: Sample, D: Sample>(
    input: ImageRef<'_, S>,
    output: ImageMut<'_, D>,
    config: &ResizeConfig,
    region: Rect,
) -> ResizeResult<()> {
    let config = config
        .clone()
        .with_region(SourceRegion::Normalized { rect: region });
    resize(input, output, &config)
}

/// Resize with an explicit per-axis scale and output-space offset instead of sizes.
pub fn resize_subpixel<S: Sample, D: Sample>(
    input: ImageRef<'_, S>,
    output: ImageMut<'_, D>,
    config: &ResizeConfig,
    scale: Vec2,
    offset: Vec2,
) -> ResizeResult<()> {
    let config = config
        .clone()
        .with_region(SourceRegion::Subpixel { scale, offset });
    resize(input, output, &config)
}
