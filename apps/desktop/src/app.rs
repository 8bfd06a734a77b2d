use crate::AppContext;
use crate::steps::{AcademicStep, CompleteStep, OtpStep, PersonalStep, RegisteredNotice};
use dioxus::prelude::*;
use hustler::registration::{HttpBackend, PersonalForm, RegistrationApi, Step, Tick, Wizard};
use std::time::Duration;
use tracing::debug;

/// Root component: owns the wizard, the step-one form and the resend ticker.
#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let wizard = use_signal(Wizard::new);
    let form = use_signal(|| PersonalForm {
        tg_id: ctx.tg_id.clone().unwrap_or_default(),
        ..PersonalForm::default()
    });
    let ticker = use_signal(|| None::<Task>);

    let backend = ctx.backend.clone();
    use_future(move || load_options(wizard, backend.clone()));
    let (backend, tg_id) = (ctx.backend.clone(), ctx.tg_id.clone());
    use_future(move || check_registration(wizard, backend.clone(), tg_id.clone()));

    let step = wizard.read().step();
    let registered = wizard.read().existing_account().cloned();

    rsx! {
        main { class: "wizard",
            h2 { "{step.title()}" }
            if let Some(user) = registered {
                RegisteredNotice { first_name: user.first_name.unwrap_or_default() }
            } else {
                {match step {
                    Step::Personal => rsx! { PersonalStep { wizard, form, ticker } },
                    Step::Otp => rsx! { OtpStep { wizard, ticker } },
                    Step::Academic => rsx! { AcademicStep { wizard } },
                    Step::Complete => rsx! { CompleteStep { wizard } },
                }}
            }
        }
    }
}

pub(crate) async fn load_options(mut wizard: Signal<Wizard>, api: HttpBackend) {
    if wizard.write().begin_load_options().is_err() {
        return;
    }
    let result = api.fetch_options().await;
    if let Err(err) = wizard.write().finish_load_options(result) {
        debug!(%err, "Academic options unavailable");
    }
}

async fn check_registration(mut wizard: Signal<Wizard>, api: HttpBackend, tg_id: Option<String>) {
    let Some(tg_id) = tg_id else {
        return;
    };
    let result = api.check_user(&tg_id).await;
    wizard.write().apply_registration_check(result);
}

/// Replaces the running ticker (if any) with one driving the countdown that just started.
pub(crate) fn restart_ticker(wizard: Signal<Wizard>, mut ticker: Signal<Option<Task>>) {
    if let Some(task) = ticker.take() {
        task.cancel();
    }
    let generation = {
        let wizard = wizard.read();
        if wizard.countdown().is_ready() {
            return;
        }
        wizard.countdown().generation()
    };
    ticker.set(Some(spawn(tick_every_second(wizard, generation))));
}

async fn tick_every_second(mut wizard: Signal<Wizard>, generation: u64) {
    loop {
        tokio::time::sleep(Duration::from_secs(1)).await;
        match wizard.write().tick_countdown(generation) {
            Tick::Counting { .. } => {},
            Tick::Elapsed | Tick::Stale => break,
        }
    }
}
