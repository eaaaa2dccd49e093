use image::{ImageBuffer, Pixel};

use crate::foundation::error::{ResizeError, ResizeResult};
use crate::foundation::sample::Sample;
use crate::resize::api::resize;
use crate::resize::config::ResizeConfig;
use crate::resize::view::{ImageMut, ImageRef};

/// Resize an `image` buffer into a new `width x height` buffer of the same pixel type.
///
/// The channel count comes from the pixel type; every other setting from `config`.
pub fn resize_image<P>(
    src: &ImageBuffer<P, Vec<P::Subpixel>>,
    width: u32,
    height: u32,
    config: &ResizeConfig,
) -> ResizeResult<ImageBuffer<P, Vec<P::Subpixel>>>
where
    P: Pixel,
    P::Subpixel: Sample,
{
    let mut config = config.clone();
    config.channels = usize::from(P::CHANNEL_COUNT);
    if width == 0 || height == 0 {
        return Err(ResizeError::config(format!(
            "target size {width}x{height} must be non-zero"
        )));
    }
    let mut out = ImageBuffer::<P, Vec<P::Subpixel>>::new(width, height);
    resize(
        ImageRef::new(src.as_raw().as_slice(), src.width(), src.height()),
        ImageMut::new(&mut *out, width, height),
        &config,
    )?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/resize/image_ext.rs"]
mod tests;
