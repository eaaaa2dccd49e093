use smallvec::SmallVec;

use crate::foundation::core::{AlphaFlags, Colorspace};

/// Channel roles shared by the decoder and the encoder.
#[derive(Clone, Debug)]
pub(crate) struct ChannelSpec {
    pub(crate) channels: usize,
    /// Alpha index when premultiplication has to be applied and undone.
    pub(crate) premultiply_alpha: Option<usize>,
    /// Per channel: does the source transfer function apply.
    pub(crate) decode_transfer: SmallVec<[bool; 4]>,
    /// Per channel: does the destination transfer function apply.
    pub(crate) encode_transfer: SmallVec<[bool; 4]>,
}

impl ChannelSpec {
    pub(crate) fn new(
        channels: usize,
        alpha: Option<usize>,
        flags: AlphaFlags,
        input: Colorspace,
        output: Colorspace,
    ) -> Self {
        let transfer = |space: Colorspace| -> SmallVec<[bool; 4]> {
            (0..channels)
                .map(|c| space == Colorspace::Srgb && (Some(c) != alpha || flags.uses_colorspace))
                .collect()
        };
        Self {
            channels,
            premultiply_alpha: alpha.filter(|_| !flags.premultiplied),
            decode_transfer: transfer(input),
            encode_transfer: transfer(output),
        }
    }
}

/// Read-only row access to a strided source image.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SourceRows<'a, S> {
    pub(crate) pixels: &'a [S],
    pub(crate) width: usize,
    pub(crate) height: usize,
    /// Row pitch in samples.
    pub(crate) stride: usize,
    pub(crate) channels: usize,
}

impl<'a, S> SourceRows<'a, S> {
    pub(crate) fn row(&self, y: usize) -> &'a [S] {
        let start = y * self.stride;
        &self.pixels[start..start + self.width * self.channels]
    }
}

/// Row access to a strided destination image.
#[derive(Debug)]
pub(crate) struct DestRows<'a, D> {
    pub(crate) pixels: &'a mut [D],
    pub(crate) width: usize,
    /// Row pitch in samples.
    pub(crate) stride: usize,
    pub(crate) channels: usize,
}

impl<D> DestRows<'_, D> {
    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [D] {
        let start = y * self.stride;
        &mut self.pixels[start..start + self.width * self.channels]
    }
}
