use super::*;

#[test]
fn in_range_indices_pass_through_every_mode() {
    for mode in [
        EdgeMode::Clamp,
        EdgeMode::Reflect,
        EdgeMode::Wrap,
        EdgeMode::Zero,
    ] {
        for n in 0..5 {
            assert_eq!(mode.resolve(n, 5), n);
        }
    }
}

#[test]
fn clamp_and_zero_out_of_range() {
    assert_eq!(EdgeMode::Clamp.resolve(-3, 5), 0);
    assert_eq!(EdgeMode::Clamp.resolve(7, 5), 4);
    assert_eq!(EdgeMode::Zero.resolve(-1, 5), 0);
    assert_eq!(EdgeMode::Zero.resolve(9, 5), 0);
}

#[test]
fn reflect_mirrors_around_edges() {
    assert_eq!(EdgeMode::Reflect.resolve(-1, 5), 1);
    assert_eq!(EdgeMode::Reflect.resolve(-2, 5), 2);
    assert_eq!(EdgeMode::Reflect.resolve(5, 5), 4);
    assert_eq!(EdgeMode::Reflect.resolve(6, 5), 3);
    assert_eq!(EdgeMode::Reflect.resolve(10, 5), 0);
    // Margins wider than the image stay in bounds.
    assert_eq!(EdgeMode::Reflect.resolve(-7, 3), 2);
}

#[test]
fn wrap_tiles_in_both_directions() {
    assert_eq!(EdgeMode::Wrap.resolve(-1, 5), 4);
    assert_eq!(EdgeMode::Wrap.resolve(-5, 5), 0);
    assert_eq!(EdgeMode::Wrap.resolve(-6, 5), 4);
    assert_eq!(EdgeMode::Wrap.resolve(5, 5), 0);
    assert_eq!(EdgeMode::Wrap.resolve(12, 5), 2);
}

#[test]
fn enum_names_parse_case_insensitively() {
    assert_eq!(" Reflect ".parse::<EdgeMode>().unwrap(), EdgeMode::Reflect);
    assert_eq!("SRGB".parse::<Colorspace>().unwrap(), Colorspace::Srgb);
    assert_eq!("uint16".parse::<Datatype>().unwrap(), Datatype::U16);
    assert!("mirrored".parse::<EdgeMode>().is_err());
    assert!("rec709".parse::<Colorspace>().is_err());
    assert!("f64".parse::<Datatype>().is_err());
}

#[test]
fn display_round_trips_through_from_str() {
    for d in [Datatype::U8, Datatype::U16, Datatype::U32, Datatype::F32] {
        assert_eq!(d.to_string().parse::<Datatype>().unwrap(), d);
    }
    for e in [
        EdgeMode::Clamp,
        EdgeMode::Reflect,
        EdgeMode::Wrap,
        EdgeMode::Zero,
    ] {
        assert_eq!(e.to_string().parse::<EdgeMode>().unwrap(), e);
    }
}

#[test]
fn dimensions_parse_and_reject_zero() {
    let d: Dimensions = "640x480".parse().unwrap();
    assert_eq!((d.width, d.height), (640, 480));
    assert!("0x10".parse::<Dimensions>().is_err());
    assert!("640".parse::<Dimensions>().is_err());
    assert!(Dimensions::new(3, 0).is_err());
}

#[test]
fn alpha_flags_union_combines_bits() {
    let f = AlphaFlags::PREMULTIPLIED.union(AlphaFlags::USES_COLORSPACE);
    assert!(f.premultiplied);
    assert!(f.uses_colorspace);
    assert_eq!(AlphaFlags::default(), AlphaFlags::NONE);
}
