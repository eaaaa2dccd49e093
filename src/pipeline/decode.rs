use crate::foundation::{core::EdgeMode, sample::Sample};
use crate::pipeline::surface::{ChannelSpec, SourceRows};

/// Turns source rows into premultiplied linear `f32` rows with horizontal context.
#[derive(Clone, Debug)]
pub(crate) struct Decoder<'a, S> {
    pub(crate) src: SourceRows<'a, S>,
    pub(crate) spec: ChannelSpec,
    pub(crate) edge_horizontal: EdgeMode,
    pub(crate) edge_vertical: EdgeMode,
    /// Context pixels on each side of the row.
    pub(crate) margin: usize,
    /// Bias added to alpha before premultiplying integer sources.
    pub(crate) alpha_epsilon: f32,
}

impl<S: Sample> Decoder<'_, S> {
    /// Samples per decoded row, margins included.
    pub(crate) fn row_len(&self) -> usize {
        (self.src.width + 2 * self.margin) * self.spec.channels
    }

    /// Decode scanline `n` (any integer; edges resolved here) into `out`.
    ///
    /// `out[0]` holds column `-margin`.
    pub(crate) fn decode_row(&self, n: i32, out: &mut [f32]) {
        debug_assert_eq!(out.len(), self.row_len());
        let channels = self.spec.channels;
        let width = self.src.width as i32;
        let height = self.src.height as i32;
        let margin = self.margin as i32;

        if self.edge_vertical == EdgeMode::Zero && (n < 0 || n >= height) {
            out.fill(0.0);
            return;
        }

        let row = self
            .src
            .row(self.edge_vertical.resolve(n, height) as usize);
        for (px, x) in out.chunks_exact_mut(channels).zip(-margin..width + margin) {
            let sx = self.edge_horizontal.resolve(x, width) as usize * channels;
            let input = &row[sx..sx + channels];
            for ((v, &s), &transfer) in px.iter_mut().zip(input).zip(&self.spec.decode_transfer) {
                *v = if transfer { s.srgb_to_unit() } else { s.to_unit() };
            }
        }

        if let Some(a) = self.spec.premultiply_alpha {
            let epsilon = if S::DATATYPE.is_integer() {
                self.alpha_epsilon
            } else {
                0.0
            };
            for px in out.chunks_exact_mut(channels) {
                // The bias keeps color recoverable under zero alpha; integer encode discards it.
                let alpha = px[a] + epsilon;
                px[a] = alpha;
                for (c, v) in px.iter_mut().enumerate() {
                    if c != a {
                        *v *= alpha;
                    }
                }
            }
        }

        if self.edge_horizontal == EdgeMode::Zero {
            let edge = self.margin * channels;
            let len = out.len();
            out[..edge].fill(0.0);
            out[len - edge..].fill(0.0);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/decode.rs"]
mod tests;
