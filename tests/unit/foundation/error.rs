use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RasterError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RasterError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn resource_errors_name_the_path() {
    let io = RasterError::io(
        "assets/missing.rgb",
        std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
    );
    let msg = io.to_string();
    assert!(msg.contains("assets/missing.rgb"));
    assert!(msg.contains("no such file"));

    let short = RasterError::short_resource("layer.rgba", 64, 10);
    let msg = short.to_string();
    assert!(msg.contains("layer.rgba"));
    assert!(msg.contains("64"));
    assert!(msg.contains("10"));
}

#[test]
fn io_error_exposes_source() {
    use std::error::Error as _;

    let err = RasterError::io("x.rgb", std::io::Error::other("disk gone"));
    let source = err.source().map(|s| s.to_string());
    assert_eq!(source.as_deref(), Some("disk gone"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RasterError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
