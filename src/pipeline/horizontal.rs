use crate::filter::contributors::AxisFilter;

/// Width upsampling: each output pixel gathers from the decoded inputs its group names.
///
/// `decoded[0]` is input column `-margin`; `out` must be zeroed and hold the output row.
pub(crate) fn resample_gather(
    filter: AxisFilter<'_>,
    decoded: &[f32],
    margin: usize,
    channels: usize,
    out: &mut [f32],
) {
    match channels {
        1 => gather_fixed::<1>(filter, decoded, margin, out),
        2 => gather_fixed::<2>(filter, decoded, margin, out),
        3 => gather_fixed::<3>(filter, decoded, margin, out),
        4 => gather_fixed::<4>(filter, decoded, margin, out),
        _ => gather_any(filter, decoded, margin, channels, out),
    }
}

/// Width downsampling: each decoded input pixel scatters into the outputs its group names.
///
/// One group per decoded column, margins included; `out` must be zeroed.
pub(crate) fn resample_scatter(
    filter: AxisFilter<'_>,
    decoded: &[f32],
    channels: usize,
    out: &mut [f32],
) {
    match channels {
        1 => scatter_fixed::<1>(filter, decoded, out),
        2 => scatter_fixed::<2>(filter, decoded, out),
        3 => scatter_fixed::<3>(filter, decoded, out),
        4 => scatter_fixed::<4>(filter, decoded, out),
        _ => scatter_any(filter, decoded, channels, out),
    }
}

fn gather_fixed<const N: usize>(
    filter: AxisFilter<'_>,
    decoded: &[f32],
    margin: usize,
    out: &mut [f32],
) {
    for (x, dst) in out.chunks_exact_mut(N).enumerate() {
        let (c, weights) = filter.group(x);
        if weights.is_empty() {
            continue;
        }
        let start = (c.n0 + margin as i32) as usize * N;
        for (&w, src) in weights.iter().zip(decoded[start..].chunks_exact(N)) {
            for i in 0..N {
                dst[i] += src[i] * w;
            }
        }
    }
}

fn gather_any(
    filter: AxisFilter<'_>,
    decoded: &[f32],
    margin: usize,
    channels: usize,
    out: &mut [f32],
) {
    for (x, dst) in out.chunks_exact_mut(channels).enumerate() {
        let (c, weights) = filter.group(x);
        if weights.is_empty() {
            continue;
        }
        let start = (c.n0 + margin as i32) as usize * channels;
        for (&w, src) in weights.iter().zip(decoded[start..].chunks_exact(channels)) {
            for (d, s) in dst.iter_mut().zip(src) {
                *d += s * w;
            }
        }
    }
}

fn scatter_fixed<const N: usize>(filter: AxisFilter<'_>, decoded: &[f32], out: &mut [f32]) {
    for (x, src) in decoded.chunks_exact(N).enumerate() {
        let (c, weights) = filter.group(x);
        if weights.is_empty() {
            continue;
        }
        let start = c.n0 as usize * N;
        for (&w, dst) in weights.iter().zip(out[start..].chunks_exact_mut(N)) {
            for i in 0..N {
                dst[i] += src[i] * w;
            }
        }
    }
}

fn scatter_any(filter: AxisFilter<'_>, decoded: &[f32], channels: usize, out: &mut [f32]) {
    for (x, src) in decoded.chunks_exact(channels).enumerate() {
        let (c, weights) = filter.group(x);
        if weights.is_empty() {
            continue;
        }
        let start = c.n0 as usize * channels;
        for (&w, dst) in weights.iter().zip(out[start..].chunks_exact_mut(channels)) {
            for (d, s) in dst.iter_mut().zip(src) {
                *d += s * w;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/horizontal.rs"]
mod tests;
