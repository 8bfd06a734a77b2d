//! Client-side form checks. Messages are user-facing and shown verbatim in the step notices.

use crate::cascade::AcademicSelection;
use crate::draft::PersonalForm;
use crate::error::{WizardError, WizardResult};
use hustler_domain::api::Role;
use hustler_domain::constants::{MIN_PASSWORD_LENGTH, OTP_LENGTH};

pub const MISSING_PERSONAL_FIELDS: &str = "Please fill in all personal information fields.";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";
pub const MISSING_ACADEMIC_FIELDS: &str = "Please fill in all required academic information fields.";

/// Presence first, then confirmation, then length.
///
/// A field counts as present when it is non-empty, whitespace included. Password length is
/// measured in UTF-16 code units, the unit browser forms report.
///
/// # Errors
/// [`WizardError::Validation`] with the first failed rule's message.
pub fn validate_personal(form: &PersonalForm) -> WizardResult<()> {
    let required = [
        &form.first_name,
        &form.last_name,
        &form.email,
        &form.phone,
        &form.gender,
        &form.password,
        &form.confirm_password,
    ];
    if required.iter().any(|value| value.is_empty()) {
        return Err(WizardError::validation(MISSING_PERSONAL_FIELDS));
    }
    if form.password != form.confirm_password {
        return Err(WizardError::validation(PASSWORD_MISMATCH));
    }
    if form.password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        return Err(WizardError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long."
        )));
    }
    Ok(())
}

/// The code must be exactly [`OTP_LENGTH`] ASCII digits, with nothing around them.
///
/// # Errors
/// [`WizardError::Validation`] for any other input.
pub fn validate_otp(code: &str) -> WizardResult<()> {
    if code.len() == OTP_LENGTH && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(WizardError::validation(format!("Please enter a valid {OTP_LENGTH}-digit OTP.")))
    }
}

/// Role, institution, college, department and level are required. Course is optional.
///
/// # Errors
/// [`WizardError::Validation`] when a required choice is missing.
pub fn validate_academic(role: Option<Role>, selection: &AcademicSelection) -> WizardResult<()> {
    let complete = role.is_some()
        && selection.institution.is_some()
        && selection.college.is_some()
        && selection.department.is_some()
        && selection.level.as_deref().is_some_and(|level| !level.is_empty());
    if complete { Ok(()) } else { Err(WizardError::validation(MISSING_ACADEMIC_FIELDS)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> PersonalForm {
        PersonalForm {
            tg_id: String::new(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.org".into(),
            phone: "08012345678".into(),
            gender: "Female".into(),
            password: "engine".into(),
            confirm_password: "engine".into(),
        }
    }

    fn message(result: WizardResult<()>) -> String {
        match result {
            Err(WizardError::Validation { message, .. }) => message.into_owned(),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn complete_form_passes() {
        assert!(validate_personal(&filled()).is_ok());
    }

    #[test]
    fn only_empty_fields_count_as_missing() {
        let mut form = filled();
        form.phone = "   ".into();
        assert!(validate_personal(&form).is_ok());

        form.phone.clear();
        assert_eq!(message(validate_personal(&form)), MISSING_PERSONAL_FIELDS);
    }

    #[test]
    fn presence_is_checked_before_mismatch() {
        let mut form = filled();
        form.gender.clear();
        form.confirm_password = "other".into();
        assert_eq!(message(validate_personal(&form)), MISSING_PERSONAL_FIELDS);
    }

    #[test]
    fn mismatch_is_checked_before_length() {
        let mut form = filled();
        form.password = "abc".into();
        form.confirm_password = "abd".into();
        assert_eq!(message(validate_personal(&form)), PASSWORD_MISMATCH);
    }

    #[test]
    fn short_password_reports_the_minimum() {
        let mut form = filled();
        form.password = "abc".into();
        form.confirm_password = "abc".into();
        assert_eq!(
            message(validate_personal(&form)),
            "Password must be at least 6 characters long."
        );
    }

    #[test]
    fn password_length_counts_utf16_units() {
        let mut form = filled();
        form.password = "пароль".into();
        form.confirm_password = "пароль".into();
        assert!(validate_personal(&form).is_ok());

        form.password = "😀😀😀".into();
        form.confirm_password = "😀😀😀".into();
        assert!(validate_personal(&form).is_ok());

        form.password = "😀😀".into();
        form.confirm_password = "😀😀".into();
        assert!(validate_personal(&form).is_err());
    }

    #[test]
    fn otp_must_be_exact_digits() {
        assert!(validate_otp("123456").is_ok());
        for bad in ["", "12345", "1234567", "12a456", "١٢٣٤٥٦", " 123456", "123456 ", "12 3456"] {
            assert_eq!(message(validate_otp(bad)), "Please enter a valid 6-digit OTP.");
        }
    }

    #[test]
    fn academic_requires_everything_but_course() {
        let selection = AcademicSelection {
            institution: Some(1),
            college: Some(2),
            department: Some(3),
            course: None,
            level: Some("100".into()),
        };
        assert!(validate_academic(Some(Role::Student), &selection).is_ok());
        assert_eq!(message(validate_academic(None, &selection)), MISSING_ACADEMIC_FIELDS);

        let no_level = AcademicSelection { level: None, ..selection };
        assert_eq!(
            message(validate_academic(Some(Role::Creator), &no_level)),
            MISSING_ACADEMIC_FIELDS
        );
    }
}
