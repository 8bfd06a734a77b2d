//! # Registration
//!
//! The sign-up flow of the SurveyHustler client, kept free of any UI toolkit:
//!
//! * [`Wizard`]: the three-step state machine (personal details, OTP confirmation,
//!   academic details) with its notices, in-flight guard and resend countdown.
//! * [`Cascade`]: the five dependent academic dropdowns.
//! * [`Countdown`]: the resend cooldown, advanced one second at a time by the caller.
//! * [`RegistrationApi`]: the backend seam, with [`HttpBackend`] as the production client.
//!
//! Every backend call is split into a synchronous `begin_*` that validates and claims the
//! wizard, the request itself, and a synchronous `finish_*` that applies the reply. The
//! async helpers on [`Wizard`] chain the three for callers that own the wizard exclusively.

pub mod cascade;
pub mod client;
pub mod countdown;
pub mod draft;
mod error;
pub mod validation;
pub mod wizard;

pub use cascade::{AcademicSelection, Cascade, CascadeLevel, Dropdown, DropdownOption};
pub use client::{ApiError, ApiErrorExt, ApiResult, HttpBackend, RegistrationApi};
pub use countdown::{Countdown, Tick};
pub use draft::{PersonalForm, RegistrationDraft};
pub use error::{WizardError, WizardErrorExt, WizardResult};
pub use wizard::{Action, Notice, Notices, OptionsState, Step, Wizard};
