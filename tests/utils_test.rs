use spotiweb::utils::*;

#[test]
fn test_generate_state() {
    let state = generate_state();

    // Should be exactly 16 characters
    assert_eq!(state.len(), 16);

    // Should contain only alphanumeric characters
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated states should be different
    assert_ne!(state, generate_state());
}

#[test]
fn test_track_uri_from_id() {
    assert_eq!(track_uri("4uLU6hMCjMI75M1A2tKUQC"), "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
}

#[test]
fn test_track_uri_keeps_uris() {
    assert_eq!(track_uri("spotify:track:abc"), "spotify:track:abc");
    assert_eq!(track_uri("spotify:episode:xyz"), "spotify:episode:xyz");
}
