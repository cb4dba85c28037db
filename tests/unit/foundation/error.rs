use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TrayTintError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        TrayTintError::decode_failure("x")
            .to_string()
            .contains("decode failure:")
    );
    assert!(
        TrayTintError::empty_result("x")
            .to_string()
            .contains("empty result:")
    );
    assert!(
        TrayTintError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(TrayTintError::render("x").to_string().contains("render error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TrayTintError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_input_side_failures_are_recoverable() {
    assert!(TrayTintError::invalid_input("x").is_recoverable());
    assert!(TrayTintError::decode_failure("x").is_recoverable());
    assert!(TrayTintError::empty_result("x").is_recoverable());
    assert!(!TrayTintError::validation("x").is_recoverable());
    assert!(!TrayTintError::render("x").is_recoverable());
}
