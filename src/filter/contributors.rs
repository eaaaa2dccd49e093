use serde::{Deserialize, Serialize};

use crate::filter::kernels::{
    Filter, coefficient_width, contributor_count, filter_pixel_margin, filter_pixel_width,
    is_upsampling,
};
use crate::foundation::error::{ResizeError, ResizeResult};

/// Mapping from output to input coordinates along one axis.
///
/// `input = (output + shift) / scale`, both measured at pixel centers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisTransform {
    /// Output pixels per input pixel.
    pub scale: f32,
    /// Output-space offset applied before mapping into the input.
    pub shift: f32,
}

impl AxisTransform {
    /// Transform that maps the normalized input span `[lo, hi]` onto the whole output.
    pub fn from_region(input_size: u32, output_size: u32, lo: f32, hi: f32) -> ResizeResult<Self> {
        let texel = hi - lo;
        if !lo.is_finite() || !hi.is_finite() || texel <= 0.0 {
            return Err(ResizeError::config(format!(
                "source region [{lo}, {hi}] must be finite and non-empty"
            )));
        }
        Self::new(
            (output_size as f32 / input_size as f32) / texel,
            lo * output_size as f32 / texel,
        )
    }

    /// Explicit transform; `scale` must be positive and finite.
    pub fn new(scale: f32, shift: f32) -> ResizeResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ResizeError::config(format!(
                "axis scale must be finite and > 0, got {scale}"
            )));
        }
        if !shift.is_finite() {
            return Err(ResizeError::config(format!(
                "axis shift must be finite, got {shift}"
            )));
        }
        Ok(Self { scale, shift })
    }

    /// `true` when this axis magnifies.
    pub fn is_upsampling(self) -> bool {
        is_upsampling(self.scale)
    }
}

/// Everything derived from the filter and transform of one axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AxisGeometry {
    /// Filter applied along the axis.
    pub filter: Filter,
    /// Output/input mapping.
    pub transform: AxisTransform,
    /// Input length in pixels.
    pub input_size: usize,
    /// Output length in pixels.
    pub output_size: usize,
    /// Filter footprint in input pixels.
    pub pixel_width: usize,
    /// Context pixels needed on each side of the input.
    pub pixel_margin: usize,
    /// Stride of one coefficient group.
    pub coefficient_width: usize,
    /// Number of coefficient groups.
    pub contributor_count: usize,
}

impl AxisGeometry {
    /// Derive the geometry of one axis.
    pub fn new(
        filter: Filter,
        transform: AxisTransform,
        input_size: usize,
        output_size: usize,
    ) -> Self {
        let scale = transform.scale;
        Self {
            filter,
            transform,
            input_size,
            output_size,
            pixel_width: filter_pixel_width(filter, scale),
            pixel_margin: filter_pixel_margin(filter, scale),
            coefficient_width: coefficient_width(filter, scale),
            contributor_count: contributor_count(filter, scale, input_size, output_size),
        }
    }

    /// `true` when this axis magnifies.
    pub fn is_upsampling(&self) -> bool {
        self.transform.is_upsampling()
    }

    /// Total coefficient slots across all groups.
    pub fn coefficient_count(&self) -> usize {
        self.contributor_count * self.coefficient_width
    }

    /// Build the coefficient table into owned buffers.
    pub fn build(&self, opts: CoefficientOpts) -> AxisCoefficients {
        let mut contributors = vec![Contributor::default(); self.contributor_count];
        let mut coefficients = vec![0.0f32; self.coefficient_count()];
        build_axis(self, opts, &mut contributors, &mut coefficients);
        AxisCoefficients {
            geometry: *self,
            contributors,
            coefficients,
        }
    }
}

/// Inclusive index range one coefficient group applies to.
///
/// Upsampling groups index input pixels; downsampling groups index output pixels.
/// `n1 < n0` marks a group with nothing left after trimming.
#[repr(C)]
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
pub struct Contributor {
    /// First index, inclusive.
    pub n0: i32,
    /// Last index, inclusive.
    pub n1: i32,
}

impl Contributor {
    /// Number of indices covered.
    pub fn len(&self) -> usize {
        if self.n1 < self.n0 {
            0
        } else {
            (self.n1 - self.n0 + 1) as usize
        }
    }

    /// `true` when no index is covered.
    pub fn is_empty(&self) -> bool {
        self.n1 < self.n0
    }
}

/// Numeric policy for coefficient construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoefficientOpts {
    /// Magnitude at or below which a weight at either end of a group is dropped.
    pub trim_threshold: f32,
    /// Allowed deviation of a normalized column sum from 1.
    ///
    /// Raw sums may miss 1 by more (Triangle minification does); those columns are
    /// renormalized and reported at `trace` level. The normalized sum is asserted only
    /// when `check_invariants` is set, and only in debug builds.
    pub sum_tolerance: f32,
    /// Enable debug assertions on coefficient sums.
    pub check_invariants: bool,
}

impl Default for CoefficientOpts {
    fn default() -> Self {
        Self {
            trim_threshold: 0.0,
            sum_tolerance: 0.1,
            check_invariants: true,
        }
    }
}

/// Owned coefficient table for one axis.
#[derive(Clone, Debug, Serialize)]
pub struct AxisCoefficients {
    /// Geometry the table was built for.
    pub geometry: AxisGeometry,
    /// One entry per group.
    pub contributors: Vec<Contributor>,
    /// `contributors.len() * geometry.coefficient_width` weights.
    pub coefficients: Vec<f32>,
}

impl AxisCoefficients {
    /// Borrow as a resampling view.
    pub(crate) fn view(&self) -> AxisFilter<'_> {
        AxisFilter {
            contributors: &self.contributors,
            coefficients: &self.coefficients,
            width: self.geometry.coefficient_width,
        }
    }

    /// Range and live weights of group `i`.
    pub fn group(&self, i: usize) -> (Contributor, &[f32]) {
        self.view().group(i)
    }
}

/// Borrowed coefficient table consumed by the resamplers.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AxisFilter<'a> {
    pub(crate) contributors: &'a [Contributor],
    pub(crate) coefficients: &'a [f32],
    pub(crate) width: usize,
}

impl<'a> AxisFilter<'a> {
    pub(crate) fn group(&self, i: usize) -> (Contributor, &'a [f32]) {
        let c = self.contributors[i];
        let start = i * self.width;
        (c, &self.coefficients[start..start + c.len()])
    }
}

/// Fill `contributors` and `coefficients` for one axis.
///
/// Both slices must be sized from `geom` (`contributor_count` and `coefficient_count`).
pub(crate) fn build_axis(
    geom: &AxisGeometry,
    opts: CoefficientOpts,
    contributors: &mut [Contributor],
    coefficients: &mut [f32],
) {
    debug_assert_eq!(contributors.len(), geom.contributor_count);
    debug_assert_eq!(coefficients.len(), geom.coefficient_count());

    let width = geom.coefficient_width;
    let groups = contributors
        .iter_mut()
        .zip(coefficients.chunks_exact_mut(width));
    if geom.is_upsampling() {
        for (n, (contributor, group)) in groups.enumerate() {
            *contributor = upsample_group(geom, opts, n as i32, group);
        }
    } else {
        let margin = geom.pixel_margin as i32;
        for (n, (contributor, group)) in groups.enumerate() {
            *contributor = downsample_group(geom, opts, n as i32 - margin, group);
        }
        normalize_downsample(geom, opts, contributors, coefficients);
    }
}

fn is_trimmable(w: f32, threshold: f32) -> bool {
    w.abs() <= threshold
}

/// Input span `[first, last]` read by output pixel `n`, and its center in input space.
pub(crate) fn upsample_range(
    n: i32,
    out_radius: f32,
    scale: f32,
    shift: f32,
) -> (i32, i32, f32) {
    let center = n as f32 + 0.5;
    let lo = (center - out_radius + shift) / scale;
    let hi = (center + out_radius + shift) / scale;
    let in_center = (center + shift) / scale;
    ((lo + 0.5).floor() as i32, (hi - 0.5).floor() as i32, in_center)
}

/// Output span `[first, last]` reached by input pixel `n`, and its center in output space.
pub(crate) fn downsample_range(
    n: i32,
    in_radius: f32,
    scale: f32,
    shift: f32,
) -> (i32, i32, f32) {
    let center = n as f32 + 0.5;
    let lo = (center - in_radius) * scale - shift;
    let hi = (center + in_radius) * scale - shift;
    let out_center = center * scale - shift;
    ((lo + 0.5).floor() as i32, (hi - 0.5).floor() as i32, out_center)
}

/// Output-space radius of the upsampling footprint.
pub(crate) fn upsample_radius(filter: Filter, scale: f32) -> f32 {
    filter.support(1.0 / scale) * scale
}

/// Input-space radius of the downsampling footprint.
pub(crate) fn downsample_radius(filter: Filter, scale: f32) -> f32 {
    filter.support(scale) / scale
}

fn upsample_group(
    geom: &AxisGeometry,
    opts: CoefficientOpts,
    n: i32,
    group: &mut [f32],
) -> Contributor {
    let AxisTransform { scale, shift } = geom.transform;
    let filter = geom.filter;
    let inv_scale = 1.0 / scale;
    let (span_first, last, in_center) =
        upsample_range(n, upsample_radius(filter, scale), scale, shift);
    let last = last.min(span_first + group.len() as i32 - 1);
    let mut first = span_first;
    let weight = |i: i32| filter.kernel(in_center - (i as f32 + 0.5), inv_scale);

    while first <= last && is_trimmable(weight(first), opts.trim_threshold) {
        first += 1;
    }
    group.fill(0.0);
    if first > last {
        // Every weight vanished: keep the first pixel of the footprint.
        group[0] = 1.0;
        return Contributor {
            n0: span_first,
            n1: span_first,
        };
    }

    let mut total = 0.0f32;
    for (slot, i) in group.iter_mut().zip(first..=last) {
        *slot = weight(i);
        total += *slot;
    }
    let norm = 1.0 / total;
    for w in &mut group[..=(last - first) as usize] {
        *w *= norm;
    }

    let mut n1 = last;
    while n1 > first && is_trimmable(group[(n1 - first) as usize], opts.trim_threshold) {
        n1 -= 1;
    }
    Contributor { n0: first, n1 }
}

fn downsample_group(
    geom: &AxisGeometry,
    opts: CoefficientOpts,
    n: i32,
    group: &mut [f32],
) -> Contributor {
    let AxisTransform { scale, shift } = geom.transform;
    let filter = geom.filter;
    let (first, last, out_center) =
        downsample_range(n, downsample_radius(filter, scale), scale, shift);
    let last = last.min(first + group.len() as i32 - 1);

    group.fill(0.0);
    for (slot, o) in group.iter_mut().zip(first..=last) {
        *slot = filter.kernel(o as f32 + 0.5 - out_center, scale) * scale;
    }

    let mut n1 = last;
    while n1 >= first && is_trimmable(group[(n1 - first) as usize], opts.trim_threshold) {
        n1 -= 1;
    }
    Contributor { n0: first, n1 }
}

/// Divide every output column by the weight it actually received, then trim.
///
/// Normalization runs before trimming because it needs the untrimmed `n0`, which is
/// non-decreasing across groups.
fn normalize_downsample(
    geom: &AxisGeometry,
    opts: CoefficientOpts,
    contributors: &mut [Contributor],
    coefficients: &mut [f32],
) {
    let width = geom.coefficient_width;
    let output_size = geom.output_size as i32;

    let mut window_start = 0usize;
    for i in 0..output_size {
        while window_start < contributors.len() && contributors[window_start].n1 < i {
            window_start += 1;
        }

        let mut total = 0.0f32;
        for (j, c) in contributors.iter().enumerate().skip(window_start) {
            if i < c.n0 {
                break;
            }
            if i <= c.n1 {
                total += coefficients[j * width + (i - c.n0) as usize];
            }
        }

        if total == 0.0 {
            continue;
        }
        if (total - 1.0).abs() > opts.sum_tolerance {
            tracing::trace!(column = i, total, "raw column sum renormalized");
        }

        let norm = 1.0 / total;
        let mut normalized = 0.0f32;
        for (j, c) in contributors.iter().enumerate().skip(window_start) {
            if i < c.n0 {
                break;
            }
            if i <= c.n1 {
                let w = &mut coefficients[j * width + (i - c.n0) as usize];
                *w *= norm;
                normalized += *w;
            }
        }
        if opts.check_invariants {
            debug_assert!(
                (normalized - 1.0).abs() <= opts.sum_tolerance,
                "column {i} sums to {normalized} after normalization, outside ±{}",
                opts.sum_tolerance
            );
        }
    }

    for (c, group) in contributors
        .iter_mut()
        .zip(coefficients.chunks_exact_mut(width))
    {
        let mut skip = 0usize;
        while skip < c.len() && is_trimmable(group[skip], opts.trim_threshold) {
            skip += 1;
        }
        c.n0 += skip as i32;
        if c.n0 < 0 {
            skip += (-c.n0) as usize;
            c.n0 = 0;
        }
        if skip > 0 && skip < width {
            group.copy_within(skip.., 0);
        }
        c.n1 = c.n1.min(output_size - 1);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/contributors.rs"]
mod tests;
