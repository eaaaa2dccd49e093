use super::*;
use crate::filter::contributors::{AxisCoefficients, AxisGeometry, AxisTransform, CoefficientOpts};
use crate::filter::kernels::Filter;

fn axis(filter: Filter, input: u32, output: u32) -> AxisCoefficients {
    let t = AxisTransform::from_region(input, output, 0.0, 1.0).unwrap();
    AxisGeometry::new(filter, t, input as usize, output as usize).build(CoefficientOpts::default())
}

fn decoded_ramp(width: usize, margin: usize, channels: usize) -> Vec<f32> {
    (0..(width + 2 * margin) * channels)
        .map(|i| ((i * 37) % 101) as f32 / 100.0)
        .collect()
}

fn run(a: &AxisCoefficients, decoded: &[f32], channels: usize, generic: bool) -> Vec<f32> {
    let g = a.geometry;
    let mut out = vec![0.0f32; g.output_size * channels];
    match (g.is_upsampling(), generic) {
        (true, false) => resample_gather(a.view(), decoded, g.pixel_margin, channels, &mut out),
        (true, true) => gather_any(a.view(), decoded, g.pixel_margin, channels, &mut out),
        (false, false) => resample_scatter(a.view(), decoded, channels, &mut out),
        (false, true) => scatter_any(a.view(), decoded, channels, &mut out),
    }
    out
}

#[test]
fn fixed_channel_paths_match_generic() {
    for filter in Filter::ALL {
        for (input, output) in [(5u32, 13u32), (13, 5), (8, 8)] {
            let a = axis(filter, input, output);
            for channels in 1..=4 {
                let decoded = decoded_ramp(input as usize, a.geometry.pixel_margin, channels);
                assert_eq!(
                    run(&a, &decoded, channels, false),
                    run(&a, &decoded, channels, true),
                    "{filter} {input}->{output} x{channels}"
                );
            }
        }
    }
}

#[test]
fn box_downsample_averages_pairs() {
    let a = axis(Filter::Box, 4, 2);
    let m = a.geometry.pixel_margin;
    let mut decoded = vec![0.0f32; 4 + 2 * m];
    decoded[m..m + 4].copy_from_slice(&[0.0, 1.0, 0.5, 0.5]);
    let out = run(&a, &decoded, 1, false);
    assert!((out[0] - 0.5).abs() < 1e-6, "{out:?}");
    assert!((out[1] - 0.5).abs() < 1e-6, "{out:?}");
}

#[test]
fn constant_rows_stay_constant() {
    for filter in Filter::ALL {
        for (input, output) in [(3u32, 17u32), (17, 3)] {
            let a = axis(filter, input, output);
            let decoded = vec![0.75f32; (input as usize + 2 * a.geometry.pixel_margin) * 5];
            for v in run(&a, &decoded, 5, false) {
                assert!((v - 0.75).abs() < 1e-4, "{filter} {input}->{output}: {v}");
            }
        }
    }
}
