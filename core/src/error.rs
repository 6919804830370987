use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Network(String),
    #[error("feed request returned status {0}")]
    Status(u16),
    #[error("feed is not a valid project list: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("playback blocked by autoplay policy")]
    Blocked,
    #[error("playback interrupted")]
    Aborted,
    #[error("playback failed: {0}")]
    Failed(String),
}

impl PlaybackError {
    /// Classifies a rejected `play()` promise by its DOMException name.
    pub fn from_exception_name(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" => PlaybackError::Blocked,
            "AbortError" => PlaybackError::Aborted,
            _ if message.trim().is_empty() => PlaybackError::Failed(name.to_string()),
            _ => PlaybackError::Failed(format!("{name}: {message}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exception_names_map_to_variants() {
        assert_eq!(
            PlaybackError::from_exception_name("NotAllowedError", "user gesture required"),
            PlaybackError::Blocked
        );
        assert_eq!(
            PlaybackError::from_exception_name("AbortError", ""),
            PlaybackError::Aborted
        );
        assert_eq!(
            PlaybackError::from_exception_name("NotSupportedError", "no source"),
            PlaybackError::Failed("NotSupportedError: no source".to_string())
        );
    }
}
