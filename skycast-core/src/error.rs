use thiserror::Error;

/// Errors surfaced by the fetch client and repository.
///
/// Cache-layer failures are never represented here: a missing, stale or
/// corrupt cache record silently falls through to the network path.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(
        "Missing configuration: {0}.\n\
         Hint: run `skycast configure` and enter your OpenWeather API key."
    )]
    Configuration(&'static str),

    #[error("Invalid request URL: {0}")]
    Request(String),

    #[error("OpenWeather request failed with status {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse OpenWeather JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Keep server error bodies readable when they end up in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Back off to a char boundary so multi-byte text cannot panic the
        // slice.
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
