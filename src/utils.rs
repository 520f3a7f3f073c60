use rand::{Rng, distr::Alphanumeric};

/// Generates the random `state` value sent along with the authorization request.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Wraps a bare track id into its Spotify URI. URIs are returned unchanged.
pub fn track_uri(id: &str) -> String {
    if id.starts_with("spotify:") {
        id.to_string()
    } else {
        format!("spotify:track:{id}")
    }
}
