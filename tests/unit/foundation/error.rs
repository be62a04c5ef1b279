use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MotionError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MotionError::timeline("x")
            .to_string()
            .contains("timeline error:")
    );
    assert!(
        MotionError::capability("x")
            .to_string()
            .contains("capability error:")
    );
    assert!(MotionError::render("x").to_string().contains("render error:"));
    assert!(
        MotionError::contact("x")
            .to_string()
            .contains("contact error:")
    );
    assert!(
        MotionError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MotionError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: MotionError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, MotionError::Serde(_)));
}
