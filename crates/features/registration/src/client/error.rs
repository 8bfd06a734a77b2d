use std::borrow::Cow;

#[hustler_derive::hustler_error]
pub enum ApiError {
    /// Connect, timeout, TLS or body decoding failure.
    #[error("Transport error{}: {source}", format_context(.context))]
    Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },

    /// The backend answered with a non-success status.
    #[error(
        "Backend rejected the request with status {status}{}: {}",
        format_context(.context),
        .message.as_deref().unwrap_or("<no message>")
    )]
    Rejected { status: u16, message: Option<String>, context: Option<Cow<'static, str>> },

    #[error("Invalid backend URL{}: {message}", format_context(.context))]
    InvalidUrl { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal client error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ApiError {
    /// The backend's own explanation, when it sent a non-empty one.
    #[must_use]
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message: Some(message), .. } if !message.trim().is_empty() => {
                Some(message)
            },
            _ => None,
        }
    }

    /// `true` when the backend was reached and answered.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_skips_blank_text() {
        let with_text =
            ApiError::Rejected { status: 400, message: Some("Email taken".into()), context: None };
        let blank = ApiError::Rejected { status: 400, message: Some("  ".into()), context: None };
        let internal = ApiError::from("offline");

        assert_eq!(with_text.rejection_message(), Some("Email taken"));
        assert_eq!(blank.rejection_message(), None);
        assert!(blank.is_rejection());
        assert!(!internal.is_rejection());
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = ApiError::Rejected { status: 409, message: None, context: Some("Sign up".into()) };
        assert_eq!(
            err.to_string(),
            "Backend rejected the request with status 409 (Sign up): <no message>"
        );
    }
}
