use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StampError::render_surface("x")
            .to_string()
            .contains("render surface error:")
    );
    assert!(
        StampError::asset_load("x")
            .to_string()
            .contains("asset load error:")
    );
    assert!(
        StampError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(StampError::encode("x").to_string().contains("encode error:"));
    assert!(
        StampError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StampError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
