//! One component per wizard step.

use crate::AppContext;
use crate::app::{load_options, restart_ticker};
use crate::components::{ChoiceField, DropdownField, NoticeList, TextField};
use dioxus::prelude::*;
use hustler::domain::api::Role;
use hustler::domain::constants::GENDERS;
use hustler::registration::{
    CascadeLevel, OptionsState, PersonalForm, RegistrationApi, Step, Wizard,
};
use tracing::debug;

#[component]
pub(crate) fn PersonalStep(
    mut wizard: Signal<Wizard>,
    mut form: Signal<PersonalForm>,
    ticker: Signal<Option<Task>>,
) -> Element {
    let notices = wizard.read().notices().for_step(Step::Personal);
    let busy = wizard.read().in_flight().is_some();
    let current = form.read().clone();

    let send_otp = move |_: MouseEvent| {
        let api = consume_context::<AppContext>().backend;
        async move {
            let request = match wizard.write().begin_send_otp(&form.read()) {
                Ok(request) => request,
                Err(err) => {
                    debug!(%err, "Send OTP not started");
                    return;
                },
            };
            let result = api.send_otp(&request).await;
            let finished = wizard.write().finish_send_otp(result);
            if let Err(err) = finished {
                debug!(%err, "Send OTP failed");
                return;
            }
            form.write().clear_passwords();
            restart_ticker(wizard, ticker);
        }
    };

    rsx! {
        TextField { label: "First Name", kind: "text", value: current.first_name,
            oninput: move |value: String| form.write().first_name = value }
        TextField { label: "Last Name", kind: "text", value: current.last_name,
            oninput: move |value: String| form.write().last_name = value }
        TextField { label: "Email", kind: "email", value: current.email,
            oninput: move |value: String| form.write().email = value }
        TextField { label: "Phone", kind: "tel", value: current.phone,
            oninput: move |value: String| form.write().phone = value }
        ChoiceField {
            label: "Gender",
            placeholder: "Select Gender",
            choices: GENDERS.to_vec(),
            value: current.gender,
            onchange: move |value: String| form.write().gender = value,
        }
        TextField { label: "Password", kind: "password", value: current.password,
            oninput: move |value: String| form.write().password = value }
        TextField { label: "Confirm Password", kind: "password", value: current.confirm_password,
            oninput: move |value: String| form.write().confirm_password = value }
        NoticeList { notices }
        button { disabled: busy, onclick: send_otp, "Send OTP" }
    }
}

#[component]
pub(crate) fn OtpStep(mut wizard: Signal<Wizard>, ticker: Signal<Option<Task>>) -> Element {
    let mut code = use_signal(String::new);
    let notices = wizard.read().notices().for_step(Step::Otp);
    let email = wizard.read().display_email().unwrap_or_default().to_owned();
    let busy = wizard.read().in_flight().is_some();
    let can_resend = wizard.read().can_resend();
    let resend_label = wizard.read().countdown().label();

    let verify = move |_: MouseEvent| {
        let api = consume_context::<AppContext>().backend;
        async move {
            let request = match wizard.write().begin_verify_otp(&code.read()) {
                Ok(request) => request,
                Err(err) => {
                    debug!(%err, "Verify OTP not started");
                    return;
                },
            };
            let result = api.verify_otp(&request).await;
            if let Err(err) = wizard.write().finish_verify_otp(result) {
                debug!(%err, "Verify OTP failed");
            }
        }
    };

    let resend = move |_: MouseEvent| {
        let api = consume_context::<AppContext>().backend;
        async move {
            let request = match wizard.write().begin_resend_otp() {
                Ok(request) => request,
                Err(err) => {
                    debug!(%err, "Resend OTP not started");
                    return;
                },
            };
            let result = api.send_otp(&request).await;
            let finished = wizard.write().finish_resend_otp(result);
            if let Err(err) = finished {
                debug!(%err, "Resend OTP failed");
                return;
            }
            restart_ticker(wizard, ticker);
        }
    };

    rsx! {
        p { "We sent a 6-digit code to " strong { "{email}" } "." }
        TextField { label: "OTP", kind: "text", value: code.read().clone(),
            oninput: move |value: String| code.set(value) }
        NoticeList { notices }
        button { disabled: busy, onclick: verify, "Verify OTP" }
        p {
            a {
                class: if can_resend { "resend active" } else { "resend inactive" },
                onclick: resend,
                "{resend_label}"
            }
        }
    }
}

#[component]
pub(crate) fn AcademicStep(mut wizard: Signal<Wizard>) -> Element {
    let mut role = use_signal(|| None::<Role>);
    let notices = wizard.read().notices().for_step(Step::Academic);
    let busy = wizard.read().in_flight().is_some();
    let options_state = wizard.read().options_state();
    let current_role = role().map(Role::as_str).unwrap_or_default().to_owned();

    // Options that failed at startup are fetched again when the step opens.
    use_hook(move || {
        if wizard.peek().options_state() == OptionsState::Failed {
            spawn(load_options(wizard, consume_context::<AppContext>().backend));
        }
    });

    let retry_options =
        move |_: MouseEvent| load_options(wizard, consume_context::<AppContext>().backend);

    let register = move |_: MouseEvent| {
        let api = consume_context::<AppContext>().backend;
        async move {
            let request = match wizard.write().begin_register(role()) {
                Ok(request) => request,
                Err(err) => {
                    debug!(%err, "Registration not started");
                    return;
                },
            };
            let result = api.register(&request).await;
            if let Err(err) = wizard.write().finish_register(result) {
                debug!(%err, "Registration failed");
            }
        }
    };

    rsx! {
        ChoiceField {
            label: "Role",
            placeholder: "Select Role",
            choices: Role::ALL.map(Role::as_str).to_vec(),
            value: current_role,
            onchange: move |value: String| role.set(Role::parse(&value)),
        }
        for level in CascadeLevel::ALL {
            DropdownField { key: "{level}", wizard, level }
        }
        NoticeList { notices }
        if options_state == OptionsState::Failed {
            button { onclick: retry_options, "Retry loading options" }
        }
        button { disabled: busy, onclick: register, "Complete Registration" }
    }
}

#[component]
pub(crate) fn CompleteStep(wizard: Signal<Wizard>) -> Element {
    let message = wizard.read().completion_message().unwrap_or_default().to_owned();
    rsx! {
        p { class: "notice info", "{message}" }
        p { "You can close this window and return to Telegram." }
    }
}

#[component]
pub(crate) fn RegisteredNotice(first_name: String) -> Element {
    rsx! {
        p { class: "notice info",
            if first_name.is_empty() {
                "This Telegram account is already registered."
            } else {
                "Welcome back, {first_name}! This Telegram account is already registered."
            }
        }
    }
}
