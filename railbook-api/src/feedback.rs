use crate::error::ApiError;

/// What a screen should do with a failed call. Redirects are control flow,
/// not error displays; empty states are rendered as messaging, not alerts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Non-blocking toast with a message safe to show verbatim.
    Toast(String),
    /// Expired or invalid credentials: surface the logged-out state.
    LoggedOut,
    /// The account lacks the privilege for this area.
    RedirectHome,
    /// Nothing to show here; render the message as an empty state.
    EmptyState(String),
}

const GENERIC_FAILURE: &str = "Something went wrong, please try again";

/// Map the error taxonomy onto user-visible behavior.
pub fn classify(err: &ApiError) -> Feedback {
    match err {
        ApiError::Transport(_) => Feedback::Toast("Network error, please try again".to_string()),
        ApiError::NotAuthenticated => Feedback::LoggedOut,
        ApiError::Status { status: 401, .. } => Feedback::LoggedOut,
        ApiError::Status { status: 403, .. } => Feedback::RedirectHome,
        ApiError::Status { status: 404, detail } => Feedback::EmptyState(detail.clone()),
        // Validation errors carry the server's detail message verbatim.
        ApiError::Status { status, detail } if *status < 500 => Feedback::Toast(detail.clone()),
        ApiError::Status { .. } | ApiError::Decode(_) | ApiError::Storage(_) => {
            Feedback::Toast(GENERIC_FAILURE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, detail: &str) -> ApiError {
        ApiError::Status {
            status,
            detail: detail.to_string(),
        }
    }

    #[test]
    fn test_auth_errors_surface_as_logged_out() {
        assert_eq!(classify(&status(401, "token expired")), Feedback::LoggedOut);
        assert_eq!(classify(&ApiError::NotAuthenticated), Feedback::LoggedOut);
    }

    #[test]
    fn test_validation_detail_is_shown_verbatim() {
        assert_eq!(
            classify(&status(400, "departure date is in the past")),
            Feedback::Toast("departure date is in the past".to_string())
        );
    }

    #[test]
    fn test_forbidden_redirects_instead_of_displaying() {
        assert_eq!(classify(&status(403, "staff only")), Feedback::RedirectHome);
    }

    #[test]
    fn test_not_found_is_an_empty_state() {
        assert_eq!(
            classify(&status(404, "No trips found")),
            Feedback::EmptyState("No trips found".to_string())
        );
    }

    #[test]
    fn test_server_errors_are_generic() {
        assert_eq!(
            classify(&status(500, "stack trace")),
            Feedback::Toast(GENERIC_FAILURE.to_string())
        );
    }
}
