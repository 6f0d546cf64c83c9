use crate::token::StorageError;

/// Everything a backend call can fail with, from the caller's point of view.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response at all (DNS, refused connection, timeout).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status. `detail` carries the
    /// server's `detail` field when present, otherwise the raw body.
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    /// A 2xx body that did not parse as the expected shape.
    #[error("unreadable response: {0}")]
    Decode(String),

    /// An authenticated call was issued with no stored access token.
    #[error("not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Only transport failures and server-side errors are worth a retry;
    /// 4xx responses will not change on a second attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        let server = ApiError::Status {
            status: 503,
            detail: "unavailable".to_string(),
        };
        let client = ApiError::Status {
            status: 422,
            detail: "bad date".to_string(),
        };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
        assert!(!ApiError::NotAuthenticated.is_retryable());
    }
}
