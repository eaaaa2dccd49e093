use super::*;

#[test]
fn integer_samples_round_trip_linear() {
    for v in [0u8, 1, 127, 128, 254, 255] {
        assert_eq!(u8::from_unit(v.to_unit()), v);
    }
    for v in [0u16, 1, 300, 32767, 65535] {
        assert_eq!(u16::from_unit(v.to_unit()), v);
    }
    assert_eq!(u32::from_unit(u32::MAX.to_unit()), u32::MAX);
    assert_eq!(u32::from_unit(0u32.to_unit()), 0);
}

#[test]
fn u8_srgb_uses_table_matching_formula() {
    for v in 0u8..=255 {
        let expect = srgb_to_linear(f32::from(v) / 255.0);
        assert!((v.srgb_to_unit() - expect).abs() < 1e-7);
        assert_eq!(u8::from_unit_srgb(v.srgb_to_unit()), v);
    }
}

#[test]
fn u16_srgb_round_trips_sampled_codes() {
    for v in (0u16..=65535).step_by(257) {
        assert_eq!(u16::from_unit_srgb(v.srgb_to_unit()), v);
    }
}

#[test]
fn integer_encode_saturates() {
    assert_eq!(u8::from_unit(-1.0), 0);
    assert_eq!(u8::from_unit(3.0), 255);
    assert_eq!(u16::from_unit(1.2), 65535);
    assert_eq!(u8::from_unit_srgb(2.0), 255);
}

#[test]
fn floats_pass_through_without_saturation() {
    assert_eq!(f32::from_unit(1.5), 1.5);
    assert_eq!(f32::from_unit(-0.25), -0.25);
    assert_eq!(1.5f32.to_unit(), 1.5);
    assert!(f32::from_unit_srgb(-0.001) < 0.0);
}

#[test]
fn datatype_tags_match() {
    assert_eq!(u8::DATATYPE, Datatype::U8);
    assert_eq!(u16::DATATYPE, Datatype::U16);
    assert_eq!(u32::DATATYPE, Datatype::U32);
    assert_eq!(f32::DATATYPE, Datatype::F32);
}
