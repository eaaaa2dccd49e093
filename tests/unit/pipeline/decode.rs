use super::*;
use crate::foundation::core::{AlphaFlags, Colorspace};

fn decoder<'a, S: Sample>(
    pixels: &'a [S],
    width: usize,
    height: usize,
    channels: usize,
    alpha: Option<usize>,
    margin: usize,
    edge: EdgeMode,
) -> Decoder<'a, S> {
    Decoder {
        src: SourceRows {
            pixels,
            width,
            height,
            stride: width * channels,
            channels,
        },
        spec: ChannelSpec::new(
            channels,
            alpha,
            AlphaFlags::NONE,
            Colorspace::Linear,
            Colorspace::Linear,
        ),
        edge_horizontal: edge,
        edge_vertical: edge,
        margin,
        alpha_epsilon: 0.0,
    }
}

fn decode<S: Sample>(d: &Decoder<'_, S>, n: i32) -> Vec<f32> {
    let mut out = vec![f32::NAN; d.row_len()];
    d.decode_row(n, &mut out);
    out
}

#[test]
fn clamp_extends_edge_pixels() {
    let px = [0u8, 51, 255];
    let d = decoder(&px, 3, 1, 1, None, 2, EdgeMode::Clamp);
    let row = decode(&d, 0);
    assert_eq!(row, vec![0.0, 0.0, 0.0, 0.2, 1.0, 1.0, 1.0]);
}

#[test]
fn reflect_and_wrap_margins() {
    let px = [0.0f32, 1.0, 2.0];
    let d = decoder(&px, 3, 1, 1, None, 2, EdgeMode::Reflect);
    assert_eq!(decode(&d, 0), vec![2.0, 1.0, 0.0, 1.0, 2.0, 2.0, 1.0]);

    let d = decoder(&px, 3, 1, 1, None, 2, EdgeMode::Wrap);
    assert_eq!(decode(&d, 0), vec![1.0, 2.0, 0.0, 1.0, 2.0, 0.0, 1.0]);
}

#[test]
fn zero_edge_blanks_margins_and_outside_rows() {
    let px = [0.5f32, 0.25, 0.75, 1.0];
    let d = decoder(&px, 2, 2, 1, None, 1, EdgeMode::Zero);
    assert_eq!(decode(&d, 1), vec![0.0, 0.75, 1.0, 0.0]);
    assert_eq!(decode(&d, -1), vec![0.0; 4]);
    assert_eq!(decode(&d, 2), vec![0.0; 4]);
}

#[test]
fn vertical_edge_selects_row() {
    let px = [0.0f32, 1.0, 2.0];
    let d = decoder(&px, 1, 3, 1, None, 0, EdgeMode::Clamp);
    assert_eq!(decode(&d, -5), vec![0.0]);
    assert_eq!(decode(&d, 9), vec![2.0]);
    let d = decoder(&px, 1, 3, 1, None, 0, EdgeMode::Wrap);
    assert_eq!(decode(&d, -1), vec![2.0]);
    assert_eq!(decode(&d, 4), vec![1.0]);
}

#[test]
fn stride_skips_padding() {
    let px = [1.0f32, 2.0, 99.0, 3.0, 4.0, 99.0];
    let mut d = decoder(&px, 2, 2, 1, None, 0, EdgeMode::Clamp);
    d.src.stride = 3;
    assert_eq!(decode(&d, 1), vec![3.0, 4.0]);
}

#[test]
fn straight_alpha_is_premultiplied() {
    let px = [1.0f32, 0.5, 0.5];
    let d = decoder(&px, 1, 1, 3, Some(2), 0, EdgeMode::Clamp);
    assert_eq!(decode(&d, 0), vec![0.5, 0.25, 0.5]);
}

#[test]
fn premultiplied_input_is_left_alone() {
    let px = [1.0f32, 0.5, 0.5];
    let mut d = decoder(&px, 1, 1, 3, Some(2), 0, EdgeMode::Clamp);
    d.spec = ChannelSpec::new(
        3,
        Some(2),
        AlphaFlags::PREMULTIPLIED,
        Colorspace::Linear,
        Colorspace::Linear,
    );
    assert_eq!(decode(&d, 0), vec![1.0, 0.5, 0.5]);
}

#[test]
fn epsilon_applies_to_integer_sources_only() {
    let px = [255u8, 0];
    let mut d = decoder(&px, 1, 1, 2, Some(1), 0, EdgeMode::Clamp);
    d.alpha_epsilon = 0.25;
    assert_eq!(decode(&d, 0), vec![0.25, 0.25]);

    let px = [1.0f32, 0.0];
    let mut d = decoder(&px, 1, 1, 2, Some(1), 0, EdgeMode::Clamp);
    d.alpha_epsilon = 0.25;
    assert_eq!(decode(&d, 0), vec![0.0, 0.0]);
}

#[test]
fn srgb_skips_alpha_unless_flagged() {
    let px = [188u8, 188];
    let mut d = decoder(&px, 1, 1, 2, Some(1), 0, EdgeMode::Clamp);
    d.spec = ChannelSpec::new(
        2,
        Some(1),
        AlphaFlags::PREMULTIPLIED,
        Colorspace::Srgb,
        Colorspace::Linear,
    );
    let row = decode(&d, 0);
    assert!((row[0] - 0.5029).abs() < 1e-3, "{row:?}");
    assert!((row[1] - 188.0 / 255.0).abs() < 1e-6);

    d.spec = ChannelSpec::new(
        2,
        Some(1),
        AlphaFlags::PREMULTIPLIED.union(AlphaFlags::USES_COLORSPACE),
        Colorspace::Srgb,
        Colorspace::Linear,
    );
    let row = decode(&d, 0);
    assert_eq!(row[0], row[1]);
}
