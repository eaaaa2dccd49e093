use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ResizeError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        ResizeError::buffer("x")
            .to_string()
            .contains("buffer error:")
    );
    assert!(
        ResizeError::allocation("x")
            .to_string()
            .contains("allocation error:")
    );
    assert!(
        ResizeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn errors_convert_into_anyhow_with_message() {
    let err = anyhow::Error::new(ResizeError::buffer("row too short"));
    assert!(err.to_string().contains("row too short"));
    assert!(err.downcast_ref::<ResizeError>().is_some());
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: ResizeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ResizeError::Serde(_)));
}
