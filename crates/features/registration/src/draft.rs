//! Personal details as typed, and as frozen once an OTP has been sent for them.

use crate::cascade::AcademicSelection;
use hustler_domain::api::{RegisterRequest, Role, SendOtpRequest};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Step-one form buffer, bound to the inputs by the UI.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PersonalForm {
    /// Telegram id from the launch parameters; empty when registering outside Telegram.
    pub tg_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub password: String,
    pub confirm_password: String,
}

impl PersonalForm {
    /// Wipes both password inputs. Called once the draft holds its own copy.
    pub fn clear_passwords(&mut self) {
        self.password.zeroize();
        self.confirm_password.zeroize();
    }
}

impl fmt::Debug for PersonalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonalForm")
            .field("tg_id", &self.tg_id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("gender", &self.gender)
            .finish_non_exhaustive()
    }
}

/// Personal details captured when an OTP was successfully requested.
///
/// Resends and the final registration always use this snapshot, never the live form. The
/// password is wiped from memory when the draft is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RegistrationDraft {
    tg_id: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    gender: String,
    password: String,
}

impl RegistrationDraft {
    /// Snapshot of `form`, field for field as typed.
    #[must_use]
    pub fn from_form(form: &PersonalForm) -> Self {
        Self {
            tg_id: form.tg_id.clone(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            gender: form.gender.clone(),
            password: form.password.clone(),
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn tg_id(&self) -> Option<&str> {
        Some(self.tg_id.as_str()).filter(|id| !id.is_empty())
    }

    #[must_use]
    pub fn send_otp_request(&self) -> SendOtpRequest {
        SendOtpRequest {
            tg_id: self.tg_id().map(str::to_owned),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            gender: self.gender.clone(),
            password: self.password.clone(),
        }
    }

    /// Full registration body. Missing hierarchy ids and level are sent as empty strings.
    #[must_use]
    pub fn register_request(&self, role: Role, selection: &AcademicSelection) -> RegisterRequest {
        let id = |value: Option<i64>| value.map(|id| id.to_string()).unwrap_or_default();
        RegisterRequest {
            tg_id: self.tg_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            gender: self.gender.clone(),
            password: self.password.clone(),
            institution: id(selection.institution),
            role,
            college: id(selection.college),
            level: selection.level.clone().unwrap_or_default(),
            department: id(selection.department),
            course: id(selection.course),
        }
    }
}

impl fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("tg_id", &self.tg_id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}
