//! The registration wizard.
//!
//! ```text
//! Personal ──send_otp──▶ Otp ──verify_otp──▶ Academic ──register──▶ Complete
//!                         ▲  │
//!                         └──┘ resend_otp (after the cooldown)
//! ```
//!
//! Failures never move the wizard; they land in the notice slot of the current step and
//! re-arm whatever affordance the action consumed.

use crate::cascade::{Cascade, CascadeLevel};
use crate::client::{ApiError, ApiResult, RegistrationApi};
use crate::countdown::{Countdown, Tick};
use crate::draft::{PersonalForm, RegistrationDraft};
use crate::error::{WizardError, WizardResult};
use crate::validation::{
    MISSING_ACADEMIC_FIELDS, validate_academic, validate_otp, validate_personal,
};
use hustler_domain::api::{
    ApiMessage, CheckUserResponse, RegisterRequest, RegisteredUser, Role, SendOtpRequest,
    VerifyOtpRequest,
};
use hustler_domain::constants::RESEND_COOLDOWN_SECONDS;
use hustler_domain::hierarchy::AcademicOptions;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const NETWORK_ERROR: &str = "Network error. Please try again.";
pub const REGISTER_NETWORK_ERROR: &str = "Network error during registration. Please try again.";
pub const SEND_OTP_FAILED: &str = "Failed to send OTP.";
pub const RESEND_OTP_FAILED: &str = "Failed to resend OTP.";
pub const VERIFY_OTP_FAILED: &str = "OTP verification failed.";
pub const REGISTER_FAILED: &str = "Registration failed.";
pub const OPTIONS_FAILED: &str = "Failed to load academic options. Please try again.";
pub const MISSING_EMAIL: &str = "Email is missing. Please go back to Step 1.";
pub const MISSING_VERIFY_EMAIL: &str =
    "Email data missing for verification. Please go back to Step 1.";
pub const RESENDING_OTP: &str = "Resending OTP...";
pub const REGISTERED: &str = "Registration successful!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Step {
    #[default]
    Personal,
    Otp,
    Academic,
    Complete,
}

impl Step {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Otp => "otp",
            Self::Academic => "academic",
            Self::Complete => "complete",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Personal => "Personal Information",
            Self::Otp => "Verify Your Email",
            Self::Academic => "Academic Information",
            Self::Complete => "Registration Complete",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend-calling action of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    LoadOptions,
    SendOtp,
    ResendOtp,
    VerifyOtp,
    Register,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LoadOptions => "Load options",
            Self::SendOtp => "Send OTP",
            Self::ResendOtp => "Resend OTP",
            Self::VerifyOtp => "Verify OTP",
            Self::Register => "Register",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OptionsState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

/// A message for the user, typed so the front-end can colour it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Info(String),
}

impl Notice {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Error(text) | Self::Info(text) => text,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Per-step message slots. Each handler clears the slots of its step on entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notices {
    personal_error: Option<String>,
    otp_error: Option<String>,
    otp_info: Option<String>,
    academic_error: Option<String>,
}

impl Notices {
    #[must_use]
    pub fn personal_error(&self) -> Option<&str> {
        self.personal_error.as_deref()
    }

    #[must_use]
    pub fn otp_error(&self) -> Option<&str> {
        self.otp_error.as_deref()
    }

    #[must_use]
    pub fn otp_info(&self) -> Option<&str> {
        self.otp_info.as_deref()
    }

    #[must_use]
    pub fn academic_error(&self) -> Option<&str> {
        self.academic_error.as_deref()
    }

    /// What the given step shows, info before errors.
    #[must_use]
    pub fn for_step(&self, step: Step) -> Vec<Notice> {
        let (info, error) = match step {
            Step::Personal => (None, &self.personal_error),
            Step::Otp => (self.otp_info.as_ref(), &self.otp_error),
            Step::Academic => (None, &self.academic_error),
            Step::Complete => return Vec::new(),
        };
        info.cloned()
            .map(Notice::Info)
            .into_iter()
            .chain(error.clone().map(Notice::Error))
            .collect()
    }

    fn set_error(&mut self, slot: Slot, text: impl Into<String>) {
        let text = Some(text.into());
        match slot {
            Slot::Personal => self.personal_error = text,
            Slot::Otp => self.otp_error = text,
            Slot::Academic => self.academic_error = text,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Personal,
    Otp,
    Academic,
}

#[derive(Debug)]
enum Pending {
    SendOtp(Box<RegistrationDraft>),
    ResendOtp,
    VerifyOtp,
    Register,
}

impl Pending {
    const fn action(&self) -> Action {
        match self {
            Self::SendOtp(_) => Action::SendOtp,
            Self::ResendOtp => Action::ResendOtp,
            Self::VerifyOtp => Action::VerifyOtp,
            Self::Register => Action::Register,
        }
    }
}

/// Headless state of one registration attempt.
#[derive(Debug)]
pub struct Wizard {
    step: Step,
    cascade: Cascade,
    countdown: Countdown,
    notices: Notices,
    draft: Option<RegistrationDraft>,
    pending: Option<Pending>,
    options: OptionsState,
    completion: Option<String>,
    existing_account: Option<RegisteredUser>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: Step::Personal,
            cascade: Cascade::new(),
            countdown: Countdown::new(RESEND_COOLDOWN_SECONDS),
            notices: Notices::default(),
            draft: None,
            pending: None,
            options: OptionsState::NotLoaded,
            completion: None,
            existing_account: None,
        }
    }

    // --- Accessors ---

    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub const fn notices(&self) -> &Notices {
        &self.notices
    }

    #[must_use]
    pub const fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    #[must_use]
    pub const fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    #[must_use]
    pub const fn options_state(&self) -> OptionsState {
        self.options
    }

    /// The action currently awaiting its backend reply, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<Action> {
        self.pending.as_ref().map(Pending::action)
    }

    /// E-mail the OTP was sent to.
    #[must_use]
    pub fn display_email(&self) -> Option<&str> {
        self.draft.as_ref().map(RegistrationDraft::email)
    }

    #[must_use]
    pub fn completion_message(&self) -> Option<&str> {
        self.completion.as_deref()
    }

    /// Set when a Telegram id was checked and the backend already knows it.
    #[must_use]
    pub const fn existing_account(&self) -> Option<&RegisteredUser> {
        self.existing_account.as_ref()
    }

    /// The resend link may be clicked.
    #[must_use]
    pub fn can_resend(&self) -> bool {
        self.step == Step::Otp && self.countdown.is_ready() && self.pending.is_none()
    }

    // --- Guards ---

    fn ensure_step(&self, action: Action, expected: Step) -> WizardResult<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep { action, step: self.step, context: None })
        }
    }

    fn ensure_idle(&self) -> WizardResult<()> {
        match &self.pending {
            None => Ok(()),
            Some(pending) => Err(WizardError::Busy { action: pending.action(), context: None }),
        }
    }

    fn take_pending(&mut self, action: Action) -> WizardResult<Pending> {
        match self.pending.take() {
            Some(pending) if pending.action() == action => Ok(pending),
            other => {
                self.pending = other;
                Err(WizardError::NotPending { action, context: None })
            },
        }
    }

    /// Routes a validation failure into `slot` before handing it back.
    fn check<T>(&mut self, slot: Slot, result: WizardResult<T>) -> WizardResult<T> {
        if let Err(WizardError::Validation { message, .. }) = &result {
            debug!(step = %self.step, reason = %message, "Validation failed");
            self.notices.set_error(slot, message.clone().into_owned());
        }
        result
    }

    fn fail(
        &mut self,
        slot: Slot,
        action: Action,
        err: ApiError,
        fallback: &str,
        network: &str,
    ) -> WizardError {
        let text = if err.is_rejection() {
            warn!(%action, step = %self.step, error = %err, "Backend rejected request");
            err.rejection_message().unwrap_or(fallback).to_owned()
        } else {
            error!(%action, step = %self.step, error = %err, "Request failed");
            network.to_owned()
        };
        self.notices.set_error(slot, text);
        WizardError::Api { source: err, context: Some(action.to_string().into()) }
    }

    // --- Academic options ---

    /// Also used to retry after a failed load.
    ///
    /// # Errors
    /// [`WizardError::Busy`] while a previous load is still running.
    pub fn begin_load_options(&mut self) -> WizardResult<()> {
        if self.options == OptionsState::Loading {
            return Err(WizardError::Busy { action: Action::LoadOptions, context: None });
        }
        self.options = OptionsState::Loading;
        Ok(())
    }

    /// # Errors
    /// [`WizardError::NotPending`] without a prior [`Wizard::begin_load_options`], and
    /// [`WizardError::Api`] when the load failed (the academic step shows it).
    pub fn finish_load_options(&mut self, result: ApiResult<AcademicOptions>) -> WizardResult<()> {
        if self.options != OptionsState::Loading {
            return Err(WizardError::NotPending { action: Action::LoadOptions, context: None });
        }
        match result {
            Ok(options) => {
                self.cascade.load(Arc::new(options));
                self.options = OptionsState::Loaded;
                if self.notices.academic_error() == Some(OPTIONS_FAILED) {
                    self.notices.academic_error = None;
                }
                Ok(())
            },
            Err(err) => {
                self.options = OptionsState::Failed;
                error!(error = %err, "Loading academic options failed");
                self.notices.set_error(Slot::Academic, OPTIONS_FAILED);
                Err(WizardError::Api { source: err, context: Some("Loading academic options".into()) })
            },
        }
    }

    // --- Step 1: send OTP ---

    /// Validates `form` and builds the `send_otp` body.
    ///
    /// # Errors
    /// [`WizardError::WrongStep`], [`WizardError::Busy`] or a [`WizardError::Validation`]
    /// that is also shown on the personal step.
    pub fn begin_send_otp(&mut self, form: &PersonalForm) -> WizardResult<SendOtpRequest> {
        self.ensure_step(Action::SendOtp, Step::Personal)?;
        self.ensure_idle()?;

        self.notices.personal_error = None;
        self.notices.otp_error = None;
        self.notices.otp_info = None;

        let validated = validate_personal(form);
        self.check(Slot::Personal, validated)?;

        let draft = RegistrationDraft::from_form(form);
        let request = draft.send_otp_request();
        self.pending = Some(Pending::SendOtp(Box::new(draft)));
        Ok(request)
    }

    /// On success the submitted details become the draft, the wizard moves to the OTP step
    /// and the resend cooldown starts.
    ///
    /// # Errors
    /// [`WizardError::NotPending`], or [`WizardError::Api`] when the send failed.
    pub fn finish_send_otp(&mut self, result: ApiResult<ApiMessage>) -> WizardResult<()> {
        let Pending::SendOtp(draft) = self.take_pending(Action::SendOtp)? else {
            return Err("Pending action does not match Send OTP".into());
        };
        match result {
            Ok(reply) => {
                info!(email = draft.email(), "OTP sent, awaiting verification");
                self.notices.otp_info = reply.message;
                self.draft = Some(*draft);
                self.step = Step::Otp;
                self.countdown.start();
                Ok(())
            },
            Err(err) => Err(self.fail(Slot::Personal, Action::SendOtp, err, SEND_OTP_FAILED, NETWORK_ERROR)),
        }
    }

    // --- OTP step: resend ---

    /// Builds a `send_otp` body from the stored draft.
    ///
    /// # Errors
    /// [`WizardError::CoolingDown`] before the countdown elapses, [`WizardError::Validation`]
    /// when no draft is stored, plus the usual step and in-flight guards.
    pub fn begin_resend_otp(&mut self) -> WizardResult<SendOtpRequest> {
        self.ensure_step(Action::ResendOtp, Step::Otp)?;
        self.ensure_idle()?;
        if let Some(remaining) = self.countdown.remaining() {
            return Err(WizardError::CoolingDown { remaining, context: None });
        }

        let Some(draft) = &self.draft else {
            self.countdown.enable();
            let missing = Err(WizardError::validation(MISSING_EMAIL));
            return self.check(Slot::Otp, missing);
        };
        let request = draft.send_otp_request();

        self.notices.otp_info = Some(RESENDING_OTP.to_owned());
        self.notices.otp_error = None;
        self.pending = Some(Pending::ResendOtp);
        Ok(request)
    }

    /// Restarts the cooldown on success; re-enables the resend link right away on failure.
    ///
    /// # Errors
    /// [`WizardError::NotPending`], or [`WizardError::Api`] when the resend failed.
    pub fn finish_resend_otp(&mut self, result: ApiResult<ApiMessage>) -> WizardResult<()> {
        self.take_pending(Action::ResendOtp)?;
        match result {
            Ok(reply) => {
                info!(email = self.display_email(), "OTP resent");
                self.notices.otp_info = reply.message;
                self.countdown.start();
                Ok(())
            },
            Err(err) => {
                self.notices.otp_info = None;
                self.countdown.enable();
                Err(self.fail(Slot::Otp, Action::ResendOtp, err, RESEND_OTP_FAILED, NETWORK_ERROR))
            },
        }
    }

    // --- OTP step: verify ---

    /// # Errors
    /// [`WizardError::Validation`] for a malformed code or a missing draft, plus the usual
    /// step and in-flight guards.
    pub fn begin_verify_otp(&mut self, code: &str) -> WizardResult<VerifyOtpRequest> {
        self.ensure_step(Action::VerifyOtp, Step::Otp)?;
        self.ensure_idle()?;

        self.notices.otp_error = None;
        self.notices.otp_info = None;

        let email = self.display_email().map(str::to_owned);
        let email = self.check(
            Slot::Otp,
            email.ok_or_else(|| WizardError::validation(MISSING_VERIFY_EMAIL)),
        )?;
        let validated = validate_otp(code);
        self.check(Slot::Otp, validated)?;

        self.pending = Some(Pending::VerifyOtp);
        Ok(VerifyOtpRequest { email, otp_code: code.to_owned() })
    }

    /// Moves to the academic step on success.
    ///
    /// # Errors
    /// [`WizardError::NotPending`], or [`WizardError::Api`] when verification failed.
    pub fn finish_verify_otp(&mut self, result: ApiResult<ApiMessage>) -> WizardResult<()> {
        self.take_pending(Action::VerifyOtp)?;
        match result {
            Ok(reply) => {
                info!(email = self.display_email(), "Email verified");
                self.notices.otp_info = reply.message;
                self.countdown.enable();
                self.step = Step::Academic;
                if self.options != OptionsState::Failed {
                    self.notices.academic_error = None;
                }
                Ok(())
            },
            Err(err) => Err(self.fail(Slot::Otp, Action::VerifyOtp, err, VERIFY_OTP_FAILED, NETWORK_ERROR)),
        }
    }

    // --- Step 2: academic details ---

    /// Applies a dropdown change.
    ///
    /// # Errors
    /// See [`Cascade::select`].
    pub fn select(&mut self, level: CascadeLevel, raw: &str) -> WizardResult<()> {
        self.cascade.select(level, raw)
    }

    /// Builds the `register` body from the stored draft, `role` and the cascade selection.
    ///
    /// # Errors
    /// [`WizardError::Validation`] when a required academic choice is missing or no draft is
    /// stored, plus the usual step and in-flight guards.
    pub fn begin_register(&mut self, role: Option<Role>) -> WizardResult<RegisterRequest> {
        self.ensure_step(Action::Register, Step::Academic)?;
        self.ensure_idle()?;

        self.notices.academic_error = None;

        let selection = self.cascade.selection();
        let role = validate_academic(role, &selection)
            .and_then(|()| role.ok_or_else(|| WizardError::validation(MISSING_ACADEMIC_FIELDS)));
        let role = self.check(Slot::Academic, role)?;

        let request = match &self.draft {
            Some(draft) => Ok(draft.register_request(role, &selection)),
            None => Err(WizardError::validation(MISSING_EMAIL)),
        };
        let request = self.check(Slot::Academic, request)?;

        self.pending = Some(Pending::Register);
        Ok(request)
    }

    /// Completes the flow on success and drops the draft.
    ///
    /// # Errors
    /// [`WizardError::NotPending`], or [`WizardError::Api`] when registration failed.
    pub fn finish_register(&mut self, result: ApiResult<ApiMessage>) -> WizardResult<()> {
        self.take_pending(Action::Register)?;
        match result {
            Ok(reply) => {
                info!(email = self.display_email(), "Registration complete");
                self.completion = Some(
                    reply.message.filter(|m| !m.trim().is_empty()).unwrap_or_else(|| REGISTERED.to_owned()),
                );
                self.draft = None;
                self.step = Step::Complete;
                Ok(())
            },
            Err(err) => Err(self.fail(
                Slot::Academic,
                Action::Register,
                err,
                REGISTER_FAILED,
                REGISTER_NETWORK_ERROR,
            )),
        }
    }

    // --- Countdown ---

    /// Forwards one ticker second to the resend countdown.
    pub const fn tick_countdown(&mut self, generation: u64) -> Tick {
        self.countdown.tick(generation)
    }

    // --- Existing account check ---

    /// Records the `check_user` outcome. Failures are logged and otherwise ignored.
    pub fn apply_registration_check(&mut self, result: ApiResult<CheckUserResponse>) {
        match result {
            Ok(CheckUserResponse { registered: true, user }) => {
                info!("Telegram account is already registered");
                self.existing_account = Some(user.unwrap_or_default());
            },
            Ok(_) => debug!("Telegram account is not registered yet"),
            Err(err) => warn!(error = %err, "Could not check for an existing registration"),
        }
    }

    // --- Async drivers ---

    /// Fetches the academic hierarchy and loads it into the cascade.
    ///
    /// # Errors
    /// See [`Wizard::begin_load_options`] and [`Wizard::finish_load_options`].
    pub async fn load_options<A: RegistrationApi>(&mut self, api: &A) -> WizardResult<()> {
        self.begin_load_options()?;
        let result = api.fetch_options().await;
        self.finish_load_options(result)
    }

    /// # Errors
    /// See [`Wizard::begin_send_otp`] and [`Wizard::finish_send_otp`].
    pub async fn send_otp<A: RegistrationApi>(
        &mut self,
        api: &A,
        form: &PersonalForm,
    ) -> WizardResult<()> {
        let request = self.begin_send_otp(form)?;
        let result = api.send_otp(&request).await;
        self.finish_send_otp(result)
    }

    /// # Errors
    /// See [`Wizard::begin_resend_otp`] and [`Wizard::finish_resend_otp`].
    pub async fn resend_otp<A: RegistrationApi>(&mut self, api: &A) -> WizardResult<()> {
        let request = self.begin_resend_otp()?;
        let result = api.send_otp(&request).await;
        self.finish_resend_otp(result)
    }

    /// # Errors
    /// See [`Wizard::begin_verify_otp`] and [`Wizard::finish_verify_otp`].
    pub async fn verify_otp<A: RegistrationApi>(&mut self, api: &A, code: &str) -> WizardResult<()> {
        let request = self.begin_verify_otp(code)?;
        let result = api.verify_otp(&request).await;
        self.finish_verify_otp(result)
    }

    /// # Errors
    /// See [`Wizard::begin_register`] and [`Wizard::finish_register`].
    pub async fn register<A: RegistrationApi>(
        &mut self,
        api: &A,
        role: Option<Role>,
    ) -> WizardResult<()> {
        let request = self.begin_register(role)?;
        let result = api.register(&request).await;
        self.finish_register(result)
    }

    /// Asks the backend whether `tg_id` already has an account.
    pub async fn check_registration<A: RegistrationApi>(&mut self, api: &A, tg_id: &str) {
        if tg_id.trim().is_empty() {
            return;
        }
        let result = api.check_user(tg_id.trim()).await;
        self.apply_registration_check(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hustler_domain::hierarchy::{College, Course, Department, Institution};

    fn form() -> PersonalForm {
        PersonalForm {
            tg_id: "42".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.org".into(),
            phone: "08012345678".into(),
            gender: "Female".into(),
            password: "engine".into(),
            confirm_password: "engine".into(),
        }
    }

    fn ok(message: &str) -> ApiResult<ApiMessage> {
        Ok(ApiMessage { status: Some("success".into()), message: Some(message.into()), otp_sent: None })
    }

    fn rejected(message: Option<&str>) -> ApiResult<ApiMessage> {
        Err(ApiError::Rejected { status: 400, message: message.map(str::to_owned), context: None })
    }

    fn offline() -> ApiResult<ApiMessage> {
        Err(ApiError::from("connection refused"))
    }

    fn at_otp_step() -> Wizard {
        let mut wizard = Wizard::default();
        assert!(wizard.begin_send_otp(&form()).is_ok());
        assert!(wizard.finish_send_otp(ok("OTP sent")).is_ok());
        wizard
    }

    fn options() -> AcademicOptions {
        AcademicOptions {
            institutions: vec![Institution {
                id: 1,
                name: "X".into(),
                colleges: vec![College {
                    id: 2,
                    name: "Y".into(),
                    departments: vec![Department {
                        id: 3,
                        name: "Z".into(),
                        courses: vec![Course { id: 4, name: "C".into(), levels: vec!["100".into()] }],
                    }],
                }],
            }],
        }
    }

    fn at_academic_step() -> Wizard {
        let mut wizard = at_otp_step();
        assert!(wizard.begin_load_options().is_ok());
        assert!(wizard.finish_load_options(Ok(options())).is_ok());
        assert!(wizard.begin_verify_otp("123456").is_ok());
        assert!(wizard.finish_verify_otp(ok("Verified")).is_ok());
        wizard
    }

    #[test]
    fn invalid_form_never_claims_the_wizard() {
        let mut wizard = Wizard::default();
        let mut bad = form();
        bad.confirm_password = "engines".into();

        let result = wizard.begin_send_otp(&bad);
        assert!(matches!(result, Err(WizardError::Validation { .. })));
        assert_eq!(wizard.notices().personal_error(), Some("Passwords do not match."));
        assert_eq!(wizard.in_flight(), None);
        assert_eq!(wizard.step(), Step::Personal);
    }

    #[test]
    fn successful_send_moves_to_otp_and_starts_cooldown() {
        let wizard = at_otp_step();
        assert_eq!(wizard.step(), Step::Otp);
        assert_eq!(wizard.display_email(), Some("ada@example.org"));
        assert_eq!(wizard.notices().otp_info(), Some("OTP sent"));
        assert_eq!(wizard.countdown().remaining(), Some(30));
        assert!(!wizard.can_resend());
    }

    #[test]
    fn second_begin_while_in_flight_is_busy() {
        let mut wizard = Wizard::default();
        assert!(wizard.begin_send_otp(&form()).is_ok());
        let again = wizard.begin_send_otp(&form());
        assert!(matches!(again, Err(WizardError::Busy { action: Action::SendOtp, .. })));
    }

    #[test]
    fn finish_without_begin_is_refused() {
        let mut wizard = Wizard::default();
        let result = wizard.finish_verify_otp(ok("Verified"));
        assert!(matches!(result, Err(WizardError::NotPending { action: Action::VerifyOtp, .. })));
    }

    #[test]
    fn rejected_send_shows_backend_message_and_stays() {
        let mut wizard = Wizard::default();
        assert!(wizard.begin_send_otp(&form()).is_ok());
        let result = wizard.finish_send_otp(rejected(Some("Email already registered")));

        assert!(matches!(result, Err(WizardError::Api { .. })));
        assert_eq!(wizard.step(), Step::Personal);
        assert_eq!(wizard.notices().personal_error(), Some("Email already registered"));
        assert_eq!(wizard.display_email(), None);
        assert_eq!(wizard.in_flight(), None);
    }

    #[test]
    fn rejection_without_message_uses_fallback() {
        let mut wizard = Wizard::default();
        assert!(wizard.begin_send_otp(&form()).is_ok());
        let _ = wizard.finish_send_otp(rejected(None));
        assert_eq!(wizard.notices().personal_error(), Some(SEND_OTP_FAILED));
    }

    #[test]
    fn resend_is_refused_while_cooling_down() {
        let mut wizard = at_otp_step();
        let result = wizard.begin_resend_otp();
        assert!(matches!(result, Err(WizardError::CoolingDown { remaining: 30, .. })));
    }

    #[test]
    fn failed_resend_re_enables_the_link() {
        let mut wizard = at_otp_step();
        let generation = wizard.countdown().generation();
        for _ in 0..30 {
            wizard.tick_countdown(generation);
        }
        assert!(wizard.can_resend());

        assert!(wizard.begin_resend_otp().is_ok());
        assert_eq!(wizard.notices().otp_info(), Some(RESENDING_OTP));
        assert!(!wizard.can_resend());

        let _ = wizard.finish_resend_otp(offline());
        assert!(wizard.can_resend());
        assert_eq!(wizard.notices().otp_error(), Some(NETWORK_ERROR));
        assert_eq!(wizard.notices().otp_info(), None);
        assert_eq!(wizard.step(), Step::Otp);
    }

    #[test]
    fn malformed_otp_is_rejected_before_sending() {
        let mut wizard = at_otp_step();
        let result = wizard.begin_verify_otp("12ab56");
        assert!(matches!(result, Err(WizardError::Validation { .. })));
        assert_eq!(wizard.notices().otp_error(), Some("Please enter a valid 6-digit OTP."));
        assert_eq!(wizard.in_flight(), None);
    }

    #[test]
    fn verified_wizard_reaches_academic_step() {
        let wizard = at_academic_step();
        assert_eq!(wizard.step(), Step::Academic);
        assert_eq!(wizard.notices().otp_info(), Some("Verified"));
        assert!(wizard.countdown().is_ready());
    }

    #[test]
    fn options_failure_survives_verification() {
        let mut wizard = at_otp_step();
        assert!(wizard.begin_load_options().is_ok());
        let _ = wizard.finish_load_options(Err(ApiError::from("offline")));
        assert!(wizard.begin_verify_otp("123456").is_ok());
        assert!(wizard.finish_verify_otp(ok("Verified")).is_ok());

        assert_eq!(wizard.options_state(), OptionsState::Failed);
        assert_eq!(wizard.notices().academic_error(), Some(OPTIONS_FAILED));
    }

    #[test]
    fn incomplete_academic_form_is_blocked() {
        let mut wizard = at_academic_step();
        assert!(wizard.select(CascadeLevel::Institution, "1").is_ok());

        let result = wizard.begin_register(Some(Role::Student));
        assert!(matches!(result, Err(WizardError::Validation { .. })));
        assert_eq!(wizard.notices().academic_error(), Some(MISSING_ACADEMIC_FIELDS));
    }

    #[test]
    fn register_uses_the_draft_and_completes() -> WizardResult<()> {
        let mut wizard = at_academic_step();
        wizard.select(CascadeLevel::Institution, "1")?;
        wizard.select(CascadeLevel::College, "2")?;
        wizard.select(CascadeLevel::Department, "3")?;
        wizard.select(CascadeLevel::Course, "4")?;
        wizard.select(CascadeLevel::Level, "100")?;

        let request = wizard.begin_register(Some(Role::Student))?;
        assert_eq!(request.email, "ada@example.org");
        assert_eq!(request.tg_id, "42");
        assert_eq!(request.course, "4");

        wizard.finish_register(ok(""))?;
        assert_eq!(wizard.step(), Step::Complete);
        assert_eq!(wizard.completion_message(), Some(REGISTERED));
        assert_eq!(wizard.display_email(), None);
        Ok(())
    }

    #[test]
    fn register_network_failure_uses_its_own_message() -> WizardResult<()> {
        let mut wizard = at_academic_step();
        for (level, value) in [
            (CascadeLevel::Institution, "1"),
            (CascadeLevel::College, "2"),
            (CascadeLevel::Department, "3"),
            (CascadeLevel::Course, "4"),
            (CascadeLevel::Level, "100"),
        ] {
            wizard.select(level, value)?;
        }
        wizard.begin_register(Some(Role::Creator))?;
        let _ = wizard.finish_register(offline());
        assert_eq!(wizard.notices().academic_error(), Some(REGISTER_NETWORK_ERROR));
        assert_eq!(wizard.step(), Step::Academic);
        Ok(())
    }

    #[test]
    fn actions_outside_their_step_are_refused() {
        let mut wizard = Wizard::default();
        assert!(matches!(
            wizard.begin_verify_otp("123456"),
            Err(WizardError::WrongStep { action: Action::VerifyOtp, step: Step::Personal, .. })
        ));
        assert!(matches!(wizard.begin_register(Some(Role::Student)), Err(WizardError::WrongStep { .. })));
    }

    #[test]
    fn notices_are_typed_per_step() {
        let mut wizard = at_otp_step();
        let _ = wizard.begin_verify_otp("1");
        let notices = wizard.notices().for_step(Step::Otp);
        assert_eq!(notices.len(), 1);
        assert!(notices[0].is_error());
        assert_eq!(notices[0].text(), "Please enter a valid 6-digit OTP.");
    }

    #[test]
    fn registration_check_ignores_failures() {
        let mut wizard = Wizard::default();
        wizard.apply_registration_check(Err(ApiError::from("offline")));
        assert!(wizard.existing_account().is_none());

        wizard.apply_registration_check(Ok(CheckUserResponse {
            registered: true,
            user: Some(RegisteredUser { first_name: Some("Ada".into()), wallet: Some(1.5) }),
        }));
        assert_eq!(
            wizard.existing_account().and_then(|u| u.first_name.as_deref()),
            Some("Ada")
        );
    }
}
