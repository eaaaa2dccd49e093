use super::*;

fn axis(filter: Filter, input: u32, output: u32) -> AxisCoefficients {
    let t = AxisTransform::from_region(input, output, 0.0, 1.0).unwrap();
    AxisGeometry::new(filter, t, input as usize, output as usize).build(CoefficientOpts::default())
}

fn column_sums(axis: &AxisCoefficients) -> Vec<f32> {
    let mut sums = vec![0.0f32; axis.geometry.output_size];
    for j in 0..axis.contributors.len() {
        let (c, weights) = axis.group(j);
        for (k, w) in weights.iter().enumerate() {
            sums[(c.n0 + k as i32) as usize] += w;
        }
    }
    sums
}

#[test]
fn upsampling_groups_sum_to_one() {
    for filter in Filter::ALL {
        for (input, output) in [(2u32, 3u32), (8, 16), (7, 50), (3, 1000)] {
            let a = axis(filter, input, output);
            assert!(a.geometry.is_upsampling());
            for j in 0..a.contributors.len() {
                let (_, weights) = a.group(j);
                let sum: f32 = weights.iter().sum();
                assert!((sum - 1.0).abs() <= 1e-3, "{filter} {input}->{output} group {j}: {sum}");
            }
        }
    }
}

#[test]
fn downsampling_columns_sum_to_one() {
    for filter in Filter::ALL {
        for (input, output) in [(3u32, 2u32), (16, 8), (50, 7), (1000, 3), (9, 9)] {
            let a = axis(filter, input, output);
            assert!(!a.geometry.is_upsampling());
            for (i, sum) in column_sums(&a).into_iter().enumerate() {
                assert!((sum - 1.0).abs() <= 1e-3, "{filter} {input}->{output} column {i}: {sum}");
            }
        }
    }
}

#[test]
fn trimmed_groups_have_nonzero_ends_and_stay_in_range() {
    for filter in Filter::ALL {
        for (input, output) in [(5u32, 13u32), (13, 5), (4, 4)] {
            let a = axis(filter, input, output);
            let out = a.geometry.output_size as i32;
            for j in 0..a.contributors.len() {
                let (c, weights) = a.group(j);
                if c.is_empty() {
                    continue;
                }
                assert_ne!(weights[0], 0.0, "{filter} group {j} leading zero");
                assert_ne!(weights[weights.len() - 1], 0.0, "{filter} group {j} trailing zero");
                if !a.geometry.is_upsampling() {
                    assert!(c.n0 >= 0 && c.n1 < out, "{filter} group {j}: {c:?}");
                }
            }
        }
    }
}

#[test]
fn same_size_triangle_is_identity_table() {
    let a = axis(Filter::Triangle, 6, 6);
    let margin = a.geometry.pixel_margin;
    for x in 0..6usize {
        let (c, weights) = a.group(x + margin);
        assert_eq!(c, Contributor { n0: x as i32, n1: x as i32 });
        assert_eq!(weights, &[1.0]);
    }
}

#[test]
fn box_three_to_two_averages_by_area() {
    let a = axis(Filter::Box, 3, 2);
    let sums = column_sums(&a);
    assert!((sums[0] - 1.0).abs() < 1e-6);
    // Input pixel 1 straddles both outputs equally.
    let (c, weights) = a.group(1 + a.geometry.pixel_margin);
    assert_eq!((c.n0, c.n1), (0, 1));
    assert!((weights[0] - 1.0 / 3.0).abs() < 1e-5);
    assert!((weights[1] - 1.0 / 3.0).abs() < 1e-5);
    let (c, weights) = a.group(a.geometry.pixel_margin);
    assert_eq!(c.n0, 0);
    assert!((weights[0] - 2.0 / 3.0).abs() < 1e-5);
}

#[test]
fn box_two_to_three_interpolates_middle() {
    let a = axis(Filter::Box, 2, 3);
    let (c, weights) = a.group(0);
    assert_eq!((c.n0, c.n1), (0, 0));
    assert_eq!(weights, &[1.0]);
    let (c, weights) = a.group(1);
    assert_eq!((c.n0, c.n1), (0, 1));
    assert!((weights[0] - 0.5).abs() < 1e-6);
    assert!((weights[1] - 0.5).abs() < 1e-6);
}

#[test]
fn region_shift_reproduces_whole_axis_groups() {
    let whole = axis(Filter::CatmullRom, 8, 16);
    let t = AxisTransform::from_region(8, 8, 0.5, 1.0).unwrap();
    let right = AxisGeometry::new(Filter::CatmullRom, t, 8, 8).build(CoefficientOpts::default());
    for x in 0..8usize {
        assert_eq!(right.group(x), whole.group(x + 8));
    }
}

#[test]
fn transform_rejects_degenerate_input() {
    assert!(AxisTransform::from_region(4, 4, 0.5, 0.5).is_err());
    assert!(AxisTransform::from_region(4, 4, 0.0, f32::NAN).is_err());
    assert!(AxisTransform::new(0.0, 0.0).is_err());
    assert!(AxisTransform::new(2.0, f32::INFINITY).is_err());
    let t = AxisTransform::from_region(10, 20, 0.25, 0.75).unwrap();
    assert_eq!(t.scale, 4.0);
    assert_eq!(t.shift, 10.0);
}

#[test]
fn trim_threshold_drops_tiny_tail_weights() {
    let t = AxisTransform::from_region(10, 3, 0.0, 1.0).unwrap();
    let geom = AxisGeometry::new(Filter::Mitchell, t, 10, 3);
    let exact = geom.build(CoefficientOpts::default());
    let loose = geom.build(CoefficientOpts {
        trim_threshold: 1e-2,
        ..CoefficientOpts::default()
    });
    let total = |a: &AxisCoefficients| -> usize {
        (0..a.contributors.len()).map(|j| a.group(j).0.len()).sum()
    };
    assert!(total(&loose) <= total(&exact));
}

#[test]
fn every_small_minification_normalizes_its_columns() {
    for filter in [Filter::Triangle, Filter::Box] {
        for input in 2u32..=40 {
            for output in 1..input {
                let a = axis(filter, input, output);
                for (i, sum) in column_sums(&a).into_iter().enumerate() {
                    assert!(
                        (sum - 1.0).abs() <= 1e-3,
                        "{filter} {input}->{output} column {i}: {sum}"
                    );
                }
            }
        }
    }
}
