//! Wire bodies of the registration backend.
//!
//! Field names follow the backend's snake_case JSON. Request types holding a password
//! redact it in their `Debug` output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role chosen on the academic step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Student,
    Creator,
}

impl Role {
    pub const ALL: [Self; 2] = [Self::Student, Self::Creator];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Creator => "Creator",
        }
    }

    /// Parses the form value; anything unknown (including the empty placeholder) is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == raw.trim())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `POST /api/send_otp`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOtpRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tg_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub password: String,
}

impl fmt::Debug for SendOtpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendOtpRequest")
            .field("tg_id", &self.tg_id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("gender", &self.gender)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `POST /api/verify_otp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp_code: String,
}

/// `POST /api/register`
///
/// Hierarchy ids travel as strings, the way the form posts them; `course` is empty when
/// no course was chosen.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub tg_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub password: String,
    pub institution: String,
    pub role: Role,
    pub college: String,
    pub level: String,
    pub department: String,
    pub course: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("tg_id", &self.tg_id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("institution", &self.institution)
            .field("role", &self.role)
            .field("college", &self.college)
            .field("department", &self.department)
            .field("course", &self.course)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

/// Reply body shared by every POST endpoint, success or failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// `"success"` or `"error"` when the backend sets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp_sent: Option<bool>,
}

impl ApiMessage {
    #[must_use]
    pub fn text(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

/// `GET /api/check_user/{tg_id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckUserResponse {
    #[serde(default)]
    pub registered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<RegisteredUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisteredUser {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub wallet: Option<f64>,
}
