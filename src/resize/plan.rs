use serde::Serialize;

use crate::filter::contributors::{
    AxisCoefficients, AxisFilter, AxisGeometry, AxisTransform, build_axis, downsample_radius,
    downsample_range, upsample_radius, upsample_range,
};
use crate::foundation::core::Dimensions;
use crate::foundation::error::{ResizeError, ResizeResult};
use crate::foundation::sample::Sample;
use crate::pipeline::{
    arena::{HeapAllocator, MemoryLayout, ScratchAllocator},
    decode::Decoder,
    encode::Encoder,
    ring::RingBuffer,
    scanline::{HorizontalPass, Scanlines},
    surface::{ChannelSpec, DestRows, SourceRows},
};
use crate::resize::config::ResizeConfig;
use crate::resize::view::{ImageMut, ImageRef, stride_in_samples};

/// A validated resize job: geometry of both axes and the exact scratch layout.
///
/// Plans hold no pixel data and can be executed any number of times.
#[derive(Clone, Debug, Serialize)]
pub struct ResizePlan {
    /// Input size.
    pub input: Dimensions,
    /// Output size.
    pub output: Dimensions,
    /// Configuration the plan was built from.
    pub config: ResizeConfig,
    /// Horizontal axis.
    pub horizontal: AxisGeometry,
    /// Vertical axis.
    pub vertical: AxisGeometry,
    /// Scratch block breakdown.
    pub layout: MemoryLayout,
}

impl ResizePlan {
    /// Validate `config` against the sizes and derive everything the passes need.
    #[tracing::instrument(skip(config), fields(channels = config.channels))]
    pub fn new(input: Dimensions, output: Dimensions, config: &ResizeConfig) -> ResizeResult<Self> {
        config.validate()?;
        let (tx, ty) = config.region.transforms(input, output)?;
        let filter_x = config
            .filter_x
            .unwrap_or_else(|| config.opts.default_filter(tx));
        let filter_y = config
            .filter_y
            .unwrap_or_else(|| config.opts.default_filter(ty));

        let horizontal =
            AxisGeometry::new(filter_x, tx, input.width as usize, output.width as usize);
        let vertical =
            AxisGeometry::new(filter_y, ty, input.height as usize, output.height as usize);
        if horizontal.is_upsampling() {
            check_upsample_span("horizontal", &horizontal)?;
        } else {
            check_downsample_cover("horizontal", &horizontal)?;
        }
        if !vertical.is_upsampling() {
            check_downsample_cover("vertical", &vertical)?;
        }

        let layout = memory_layout(config.channels, &horizontal, &vertical);
        tracing::debug!(
            %filter_x,
            %filter_y,
            upsample_x = horizontal.is_upsampling(),
            upsample_y = vertical.is_upsampling(),
            bytes = layout.total_bytes(),
            "resize planned"
        );
        Ok(Self {
            input,
            output,
            config: config.clone(),
            horizontal,
            vertical,
            layout,
        })
    }

    /// Exact scratch size in bytes.
    pub fn memory_required(&self) -> usize {
        self.layout.total_bytes()
    }

    /// Owned coefficient tables for both axes, for inspection.
    pub fn coefficient_tables(&self) -> (AxisCoefficients, AxisCoefficients) {
        let opts = self.config.opts.coefficients;
        (self.horizontal.build(opts), self.vertical.build(opts))
    }

    /// Run with a scratch block from the global heap.
    pub fn execute<S: Sample, D: Sample>(
        &self,
        input: ImageRef<'_, S>,
        output: ImageMut<'_, D>,
    ) -> ResizeResult<()> {
        self.execute_with(input, output, &mut HeapAllocator)
    }

    /// Run with a scratch block obtained from `allocator`.
    pub fn execute_with<S: Sample, D: Sample>(
        &self,
        input: ImageRef<'_, S>,
        output: ImageMut<'_, D>,
        allocator: &mut dyn ScratchAllocator,
    ) -> ResizeResult<()> {
        let strides = self.check_images(&input, &output)?;
        let mut block = allocator
            .allocate(self.layout.total_words())
            .ok_or_else(|| {
                ResizeError::allocation(format!(
                    "allocator refused {} bytes of scratch",
                    self.memory_required()
                ))
            })?;
        self.run(input, output, strides, &mut block)
    }

    /// Run inside caller memory; `scratch` must hold at least [`Self::memory_required`] bytes.
    pub fn execute_in<S: Sample, D: Sample>(
        &self,
        input: ImageRef<'_, S>,
        output: ImageMut<'_, D>,
        scratch: &mut [f32],
    ) -> ResizeResult<()> {
        let strides = self.check_images(&input, &output)?;
        self.run(input, output, strides, scratch)
    }

    fn check_images<S: Sample, D: Sample>(
        &self,
        input: &ImageRef<'_, S>,
        output: &ImageMut<'_, D>,
    ) -> ResizeResult<(usize, usize)> {
        let channels = self.config.channels;
        let in_dims = input.dimensions()?;
        let out_dims = output.dimensions()?;
        if in_dims != self.input || out_dims != self.output {
            return Err(ResizeError::buffer(format!(
                "images are {in_dims} -> {out_dims}, plan is {} -> {}",
                self.input, self.output
            )));
        }
        let src = stride_in_samples(
            "input",
            input.stride_bytes,
            S::DATATYPE.size_bytes(),
            in_dims,
            channels,
            input.pixels.len(),
        )?;
        let dst = stride_in_samples(
            "output",
            output.stride_bytes,
            D::DATATYPE.size_bytes(),
            out_dims,
            channels,
            output.pixels.len(),
        )?;
        Ok((src, dst))
    }

    #[tracing::instrument(
        skip_all,
        fields(input = %self.input, output = %self.output, src = %S::DATATYPE, dst = %D::DATATYPE)
    )]
    fn run<S: Sample, D: Sample>(
        &self,
        input: ImageRef<'_, S>,
        output: ImageMut<'_, D>,
        (src_stride, dst_stride): (usize, usize),
        scratch: &mut [f32],
    ) -> ResizeResult<()> {
        let config = &self.config;
        let channels = config.channels;
        let buffers = self.layout.carve(scratch)?;

        let opts = config.opts.coefficients;
        build_axis(
            &self.horizontal,
            opts,
            buffers.horizontal_contributors,
            buffers.horizontal_coefficients,
        );
        build_axis(
            &self.vertical,
            opts,
            buffers.vertical_contributors,
            buffers.vertical_coefficients,
        );

        let spec = ChannelSpec::new(
            channels,
            config.alpha_channel,
            config.flags,
            config.input_colorspace,
            config.output_colorspace,
        );
        let row_len = self.output.width as usize * channels;
        let mut lines = Scanlines {
            decoder: Decoder {
                src: SourceRows {
                    pixels: input.pixels,
                    width: self.input.width as usize,
                    height: self.input.height as usize,
                    stride: src_stride,
                    channels,
                },
                spec: spec.clone(),
                edge_horizontal: config.edge_x,
                edge_vertical: config.edge_y,
                margin: self.horizontal.pixel_margin,
                alpha_epsilon: config.opts.alpha_epsilon,
            },
            encoder: Encoder { spec },
            dst: DestRows {
                pixels: output.pixels,
                width: self.output.width as usize,
                stride: dst_stride,
                channels,
            },
            horizontal: HorizontalPass {
                filter: AxisFilter {
                    contributors: buffers.horizontal_contributors,
                    coefficients: buffers.horizontal_coefficients,
                    width: self.horizontal.coefficient_width,
                },
                upsampling: self.horizontal.is_upsampling(),
                margin: self.horizontal.pixel_margin,
                channels,
            },
            vertical: AxisFilter {
                contributors: buffers.vertical_contributors,
                coefficients: buffers.vertical_coefficients,
                width: self.vertical.coefficient_width,
            },
            vertical_geometry: self.vertical,
            decode_buffer: buffers.decode,
            horizontal_buffer: buffers.horizontal,
            encode_buffer: buffers.encode,
            ring: RingBuffer::new(buffers.ring, row_len),
        };
        lines.run();
        Ok(())
    }
}

fn memory_layout(
    channels: usize,
    horizontal: &AxisGeometry,
    vertical: &AxisGeometry,
) -> MemoryLayout {
    let row = horizontal.output_size * channels;
    let (horizontal_buffer, encode_buffer) = if vertical.is_upsampling() {
        (0, row)
    } else {
        (row, 0)
    };
    MemoryLayout {
        horizontal_contributors: MemoryLayout::contributor_words(horizontal.contributor_count),
        horizontal_coefficients: horizontal.coefficient_count(),
        vertical_contributors: MemoryLayout::contributor_words(vertical.contributor_count),
        vertical_coefficients: vertical.coefficient_count(),
        decode_buffer: (horizontal.input_size + 2 * horizontal.pixel_margin) * channels,
        horizontal_buffer,
        ring_buffer: row * (vertical.pixel_width + 1),
        encode_buffer,
    }
}

/// Magnifying groups read decoded columns directly, so they must stay inside the margins.
fn check_upsample_span(axis: &str, geom: &AxisGeometry) -> ResizeResult<()> {
    let AxisTransform { scale, shift } = geom.transform;
    let radius = upsample_radius(geom.filter, scale);
    let (lo, _, _) = upsample_range(0, radius, scale, shift);
    let (first, last, _) = upsample_range(geom.output_size as i32 - 1, radius, scale, shift);
    let hi = last.min(first + geom.coefficient_width as i32 - 1);
    let margin = geom.pixel_margin as i32;
    if lo < -margin || hi > geom.input_size as i32 - 1 + margin {
        return Err(ResizeError::config(format!(
            "{axis} transform (scale {scale}, shift {shift}) reads input pixels {lo}..={hi}, \
             outside the {margin}-pixel margin of a {}-pixel input",
            geom.input_size
        )));
    }
    Ok(())
}

/// Minifying passes only visit margined inputs, so every output must be reached from one.
fn check_downsample_cover(axis: &str, geom: &AxisGeometry) -> ResizeResult<()> {
    let AxisTransform { scale, shift } = geom.transform;
    let radius = downsample_radius(geom.filter, scale);
    let margin = geom.pixel_margin as i32;
    let (lo, _, _) = downsample_range(-margin, radius, scale, shift);
    let (_, hi, _) = downsample_range(geom.input_size as i32 + margin - 1, radius, scale, shift);
    if lo > 0 || hi < geom.output_size as i32 - 1 {
        return Err(ResizeError::config(format!(
            "{axis} transform (scale {scale}, shift {shift}) covers output pixels {lo}..={hi}, \
             not all of 0..{}",
            geom.output_size
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/resize/plan.rs"]
mod tests;
