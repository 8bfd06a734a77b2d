use crate::client::ApiError;
use crate::wizard::{Action, Step};
use std::borrow::Cow;

/// Why a wizard operation did not go through.
///
/// Every variant except [`WizardError::Busy`], [`WizardError::WrongStep`] and
/// [`WizardError::NotPending`] has already been rendered into a notice by the time it is
/// returned, so callers mostly log it.
#[hustler_derive::hustler_error]
pub enum WizardError {
    /// Client-side checks failed before anything was sent.
    #[error("Validation failed{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Another backend request of this wizard has not finished yet.
    #[error("{action} request already in flight{}", format_context(.context))]
    Busy { action: Action, context: Option<Cow<'static, str>> },

    #[error("{action} is not available on the {step} step{}", format_context(.context))]
    WrongStep { action: Action, step: Step, context: Option<Cow<'static, str>> },

    /// The resend link is still counting down.
    #[error("Resend available in {remaining}s{}", format_context(.context))]
    CoolingDown { remaining: u32, context: Option<Cow<'static, str>> },

    /// A `finish_*` call without the matching `begin_*`.
    #[error("No {action} request is pending{}", format_context(.context))]
    NotPending { action: Action, context: Option<Cow<'static, str>> },

    #[error("Backend call failed{}: {source}", format_context(.context))]
    Api { source: ApiError, context: Option<Cow<'static, str>> },

    #[error("Internal wizard error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl WizardError {
    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    /// `true` when the user has something to fix in the form.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
