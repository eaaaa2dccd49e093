use crate::filter::contributors::{
    AxisFilter, AxisGeometry, AxisTransform, downsample_radius, downsample_range, upsample_radius,
    upsample_range,
};
use crate::foundation::sample::Sample;
use crate::pipeline::{
    decode::Decoder,
    encode::Encoder,
    horizontal::{resample_gather, resample_scatter},
    ring::RingBuffer,
    surface::DestRows,
};

/// One horizontal pass setup.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HorizontalPass<'a> {
    pub(crate) filter: AxisFilter<'a>,
    pub(crate) upsampling: bool,
    pub(crate) margin: usize,
    pub(crate) channels: usize,
}

impl HorizontalPass<'_> {
    /// Resample one decoded row into a zeroed output row.
    pub(crate) fn run(&self, decoded: &[f32], out: &mut [f32]) {
        if self.upsampling {
            resample_gather(self.filter, decoded, self.margin, self.channels, out);
        } else {
            resample_scatter(self.filter, decoded, self.channels, out);
        }
    }
}

/// Drives decode, both passes, and encode over every scanline of one resize.
pub(crate) struct Scanlines<'a, S, D> {
    pub(crate) decoder: Decoder<'a, S>,
    pub(crate) encoder: Encoder,
    pub(crate) dst: DestRows<'a, D>,
    pub(crate) horizontal: HorizontalPass<'a>,
    pub(crate) vertical: AxisFilter<'a>,
    pub(crate) vertical_geometry: AxisGeometry,
    pub(crate) decode_buffer: &'a mut [f32],
    pub(crate) horizontal_buffer: &'a mut [f32],
    pub(crate) encode_buffer: &'a mut [f32],
    pub(crate) ring: RingBuffer<'a>,
}

impl<S: Sample, D: Sample> Scanlines<'_, S, D> {
    pub(crate) fn run(&mut self) {
        if self.vertical_geometry.is_upsampling() {
            self.upsample_rows();
        } else {
            self.downsample_rows();
        }
    }

    /// Output-driven: buffer the input rows each output row reads, then gather.
    fn upsample_rows(&mut self) {
        let geom = self.vertical_geometry;
        let AxisTransform { scale, shift } = geom.transform;
        let radius = upsample_radius(geom.filter, scale);

        for y in 0..geom.output_size {
            let (first, last, _) = upsample_range(y as i32, radius, scale, shift);
            self.ring.pop_below(first, |_, _| {});
            if self.ring.is_empty() {
                self.load_scanline(first);
            }
            while last > self.ring.last() {
                self.load_scanline(self.ring.last() + 1);
            }

            self.encode_buffer.fill(0.0);
            let (c, weights) = self.vertical.group(y);
            debug_assert!(c.n0 >= self.ring.first() && c.n1 <= self.ring.last());
            for (&w, k) in weights.iter().zip(c.n0..) {
                for (e, s) in self.encode_buffer.iter_mut().zip(self.ring.row(k)) {
                    *e += s * w;
                }
            }
            self.encoder
                .encode_row(self.encode_buffer, self.dst.row_mut(y));
        }
    }

    /// Decode input row `n` and resample it straight into a new ring slot.
    fn load_scanline(&mut self, n: i32) {
        self.decoder.decode_row(n, self.decode_buffer);
        let slot = self.ring.push(n);
        self.horizontal.run(self.decode_buffer, slot);
    }

    /// Input-driven: scatter each input row into the output rows it reaches,
    /// encoding output rows as soon as no later input can reach them.
    fn downsample_rows(&mut self) {
        let geom = self.vertical_geometry;
        let AxisTransform { scale, shift } = geom.transform;
        let radius = downsample_radius(geom.filter, scale);
        let margin = geom.pixel_margin as i32;
        let output_height = geom.output_size as i32;

        for y in -margin..geom.input_size as i32 + margin {
            let (first, last, _) = downsample_range(y, radius, scale, shift);
            if last < 0 || first >= output_height {
                continue;
            }
            self.flush_below(first);

            self.decoder.decode_row(y, self.decode_buffer);
            self.horizontal_buffer.fill(0.0);
            self.horizontal
                .run(self.decode_buffer, self.horizontal_buffer);

            if self.ring.is_empty() {
                self.ring.push(first);
            }
            while last > self.ring.last() {
                self.ring.push(self.ring.last() + 1);
            }

            let (c, weights) = self.vertical.group((y + margin) as usize);
            for (&w, k) in weights.iter().zip(c.n0..) {
                for (r, h) in self.ring.row_mut(k).iter_mut().zip(self.horizontal_buffer.iter()) {
                    *r += h * w;
                }
            }
        }
        self.flush_below(output_height);
    }

    /// Encode and drop every buffered output row below `n`.
    fn flush_below(&mut self, n: i32) {
        let output_height = self.vertical_geometry.output_size as i32;
        let encoder = &self.encoder;
        let dst = &mut self.dst;
        self.ring.pop_below(n, |scanline, row| {
            if (0..output_height).contains(&scanline) {
                encoder.encode_row(row, dst.row_mut(scanline as usize));
                tracing::trace!(row = scanline, of = output_height, "flushed output row");
            }
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/scanline.rs"]
mod tests;
