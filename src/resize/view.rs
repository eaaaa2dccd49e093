use crate::foundation::core::Dimensions;
use crate::foundation::error::{ResizeError, ResizeResult};

/// Borrowed interleaved input pixels.
#[derive(Clone, Copy, Debug)]
pub struct ImageRef<'a, S> {
    /// Samples, row-major, `channels` per pixel.
    pub pixels: &'a [S],
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row pitch in bytes; 0 means tightly packed.
    pub stride_bytes: usize,
}

impl<'a, S> ImageRef<'a, S> {
    /// Tightly packed image.
    pub fn new(pixels: &'a [S], width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
            stride_bytes: 0,
        }
    }

    /// Same pixels with an explicit row pitch.
    pub fn with_stride(self, stride_bytes: usize) -> Self {
        Self {
            stride_bytes,
            ..self
        }
    }

    /// Validated size.
    pub fn dimensions(&self) -> ResizeResult<Dimensions> {
        Dimensions::new(self.width, self.height)
    }
}

/// Borrowed interleaved output pixels.
#[derive(Debug)]
pub struct ImageMut<'a, D> {
    /// Samples, row-major, `channels` per pixel.
    pub pixels: &'a mut [D],
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row pitch in bytes; 0 means tightly packed.
    pub stride_bytes: usize,
}

impl<'a, D> ImageMut<'a, D> {
    /// Tightly packed image.
    pub fn new(pixels: &'a mut [D], width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
            stride_bytes: 0,
        }
    }

    /// Same pixels with an explicit row pitch.
    pub fn with_stride(self, stride_bytes: usize) -> Self {
        Self {
            stride_bytes,
            ..self
        }
    }

    /// Validated size.
    pub fn dimensions(&self) -> ResizeResult<Dimensions> {
        Dimensions::new(self.width, self.height)
    }
}

/// Row pitch in samples for a `width x height` image stored in `len` samples.
///
/// Fails when the pitch is not whole samples, is shorter than a row, or the
/// storage cannot hold the last row.
pub(crate) fn stride_in_samples(
    what: &str,
    stride_bytes: usize,
    sample_bytes: usize,
    dims: Dimensions,
    channels: usize,
    len: usize,
) -> ResizeResult<usize> {
    let row = dims.width as usize * channels;
    let stride = if stride_bytes == 0 {
        row
    } else {
        if !stride_bytes.is_multiple_of(sample_bytes) {
            return Err(ResizeError::buffer(format!(
                "{what} stride {stride_bytes} is not a multiple of the {sample_bytes}-byte sample size"
            )));
        }
        stride_bytes / sample_bytes
    };
    if stride < row {
        return Err(ResizeError::buffer(format!(
            "{what} stride {stride_bytes} bytes is shorter than a {}-byte row",
            row * sample_bytes
        )));
    }
    let needed = stride * (dims.height as usize - 1) + row;
    if len < needed {
        return Err(ResizeError::buffer(format!(
            "{what} holds {len} samples, {dims} with {channels} channels needs {needed}"
        )));
    }
    Ok(stride)
}
