use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LyricueError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LyricueError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        LyricueError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        LyricueError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("lyrics.lrc missing");
    let err = LyricueError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("lyrics.lrc missing"));
}
