use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AdmatError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        AdmatError::backend("x")
            .to_string()
            .contains("render backend failure:")
    );
    assert!(
        AdmatError::capture("x")
            .to_string()
            .contains("capture failure:")
    );
    assert!(
        AdmatError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn external_service_carries_status_and_message() {
    let err = AdmatError::external("dam", Some(503), "unavailable");
    let text = err.to_string();
    assert!(text.contains("dam"));
    assert!(text.contains("503"));
    assert!(text.contains("unavailable"));

    let no_status = AdmatError::external("completion", None, "timed out");
    assert!(no_status.to_string().contains("timed out"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AdmatError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn unknown_layout_names_the_key() {
    assert_eq!(
        AdmatError::UnknownLayout("hero9".to_string()).to_string(),
        "unknown layout 'hero9'"
    );
}
