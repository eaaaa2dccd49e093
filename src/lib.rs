//! Separable, memory-bounded image resampling.
//!
//! Images are resized in two one-dimensional passes. Each input row is decoded to linear,
//! premultiplied `f32`, filtered horizontally, and streamed through a small ring of scanlines
//! that the vertical pass reads from (magnification) or scatters into (minification). All
//! scratch memory is sized up front and taken in one allocation per call:
//!
//! - Describe the job with a [`ResizeConfig`]
//! - Build a [`ResizePlan`] to inspect geometry and [`ResizePlan::memory_required`]
//! - Execute it, or use one of the one-call helpers such as [`resize_u8_srgb`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod filter;
mod foundation;
mod pipeline;
mod resize;

pub use crate::filter::contributors::{
    AxisCoefficients, AxisGeometry, AxisTransform, CoefficientOpts, Contributor,
};
pub use crate::filter::kernels::Filter;
pub use crate::foundation::core::{
    AlphaFlags, Colorspace, Datatype, Dimensions, EdgeMode, MAX_CHANNELS,
};
pub use crate::foundation::error::{ResizeError, ResizeResult};
pub use crate::foundation::math::{linear_to_srgb, srgb_to_linear};
pub use crate::foundation::sample::Sample;
pub use crate::pipeline::arena::{BudgetAllocator, HeapAllocator, MemoryLayout, ScratchAllocator};
pub use crate::resize::api::{
    GenericOpts, resize, resize_f32, resize_f32_generic, resize_region, resize_subpixel,
    resize_u8, resize_u8_generic, resize_u8_srgb, resize_u8_srgb_edge, resize_u16_generic,
};
pub use crate::resize::config::{DEFAULT_ALPHA_EPSILON, ResampleOpts, ResizeConfig, SourceRegion};
#[cfg(feature = "image")]
pub use crate::resize::image_ext::resize_image;
pub use crate::resize::plan::ResizePlan;
pub use crate::resize::view::{ImageMut, ImageRef};

pub use kurbo::{Rect, Vec2};
