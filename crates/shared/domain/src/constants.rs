//! Fixed strings and limits used across the registration flow.

/// Seconds the resend link stays inactive after an OTP is sent.
pub const RESEND_COOLDOWN_SECONDS: u32 = 30;
/// Number of digits in an emailed one-time code.
pub const OTP_LENGTH: usize = 6;
/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Gender values offered on the personal details step.
pub const GENDERS: &[&str] = &["Male", "Female"];

pub const OPTIONS_PATH: &str = "/api/options";
pub const SEND_OTP_PATH: &str = "/api/send_otp";
pub const VERIFY_OTP_PATH: &str = "/api/verify_otp";
pub const REGISTER_PATH: &str = "/api/register";
pub const CHECK_USER_PATH: &str = "/api/check_user";
