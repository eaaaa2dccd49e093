use crate::foundation::sample::Sample;
use crate::pipeline::surface::ChannelSpec;

/// Converts accumulated `f32` rows back into destination samples.
#[derive(Clone, Debug)]
pub(crate) struct Encoder {
    pub(crate) spec: ChannelSpec,
}

impl Encoder {
    /// Unpremultiply `row` in place, then quantize it into `out`.
    pub(crate) fn encode_row<D: Sample>(&self, row: &mut [f32], out: &mut [D]) {
        let channels = self.spec.channels;
        debug_assert_eq!(row.len(), out.len());

        if let Some(a) = self.spec.premultiply_alpha {
            for px in row.chunks_exact_mut(channels) {
                let alpha = px[a];
                let recip = if alpha == 0.0 { 0.0 } else { 1.0 / alpha };
                for (c, v) in px.iter_mut().enumerate() {
                    if c != a {
                        *v *= recip;
                    }
                }
            }
        }

        for (px, dst) in row.chunks_exact(channels).zip(out.chunks_exact_mut(channels)) {
            for ((&v, d), &transfer) in px.iter().zip(dst).zip(&self.spec.encode_transfer) {
                *d = if transfer {
                    D::from_unit_srgb(v)
                } else {
                    D::from_unit(v)
                };
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/encode.rs"]
mod tests;
