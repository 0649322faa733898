/// Errors surfaced by the gallery REST client
///
/// Variants are kept clonable (payloads reduced to strings) so results can
/// travel inside UI messages. The taxonomy mirrors how failures are shown:
/// server-reported errors carry a message worth putting in a toast,
/// transport and decode problems get a generic line and a log entry.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Network or transport failure (DNS, refused connection, timeout)
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with an error status
    #[error("server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The server answered 200 but flagged the operation as failed
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The response body did not match the expected shape
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text for the user-facing toast.
    ///
    /// Server-reported errors surface the message payload when one was
    /// sent; everything else collapses to a generic line, with the detail
    /// left to the log.
    pub fn notification(&self) -> String {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Status { status, .. } => match status {
                401 | 403 => "You are not allowed to perform this action.".to_string(),
                404 => "The requested record no longer exists.".to_string(),
                _ => format!("The server reported an error ({status})."),
            },
            ApiError::Rejected(message) if !message.is_empty() => message.clone(),
            ApiError::Rejected(_) => "The server rejected the request.".to_string(),
            ApiError::Transport(_) | ApiError::Decode(_) => {
                "Could not reach the server. Please try again.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_when_present() {
        let error = ApiError::Status {
            status: 400,
            message: "Title is required".into(),
        };
        assert_eq!(error.notification(), "Title is required");
    }

    #[test]
    fn known_statuses_map_without_a_payload() {
        let not_found = ApiError::Status {
            status: 404,
            message: String::new(),
        };
        assert_eq!(
            not_found.notification(),
            "The requested record no longer exists."
        );

        let forbidden = ApiError::Status {
            status: 403,
            message: String::new(),
        };
        assert!(forbidden.notification().contains("not allowed"));
    }

    #[test]
    fn transport_failures_stay_generic() {
        let error = ApiError::Transport("dns failure".into());
        assert!(!error.notification().contains("dns"));
    }
}
