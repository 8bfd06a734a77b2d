use dioxus::prelude::*;
use hustler::registration::{CascadeLevel, Notice, Wizard};
use tracing::warn;

#[component]
pub(crate) fn TextField(
    label: &'static str,
    kind: &'static str,
    value: String,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        label { class: "field",
            span { "{label}" }
            input {
                r#type: kind,
                value: "{value}",
                oninput: move |event: FormEvent| oninput.call(event.value()),
            }
        }
    }
}

/// A fixed list of choices behind an empty placeholder.
#[component]
pub(crate) fn ChoiceField(
    label: &'static str,
    placeholder: &'static str,
    choices: Vec<&'static str>,
    value: String,
    onchange: EventHandler<String>,
) -> Element {
    rsx! {
        label { class: "field",
            span { "{label}" }
            select {
                value: "{value}",
                onchange: move |event: FormEvent| onchange.call(event.value()),
                option { value: "", "{placeholder}" }
                for choice in choices {
                    option { key: "{choice}", value: choice, selected: value == choice, "{choice}" }
                }
            }
        }
    }
}

/// One level of the academic cascade, rendered straight from the wizard.
#[component]
pub(crate) fn DropdownField(mut wizard: Signal<Wizard>, level: CascadeLevel) -> Element {
    let dropdown = wizard.read().cascade().dropdown(level).clone();
    let selected = dropdown.selected().unwrap_or_default().to_owned();

    rsx! {
        label { class: "field",
            span { "{level}" }
            select {
                disabled: !dropdown.is_enabled(),
                value: "{selected}",
                onchange: move |event: FormEvent| {
                    if let Err(err) = wizard.write().select(level, &event.value()) {
                        warn!(%level, %err, "Dropdown value refused");
                    }
                },
                option { value: "", "{dropdown.placeholder()}" }
                for choice in dropdown.options().iter().cloned() {
                    option {
                        key: "{choice.value}",
                        value: "{choice.value}",
                        selected: choice.value == selected,
                        "{choice.label}"
                    }
                }
            }
        }
    }
}

#[component]
pub(crate) fn NoticeList(notices: Vec<Notice>) -> Element {
    rsx! {
        for (index, notice) in notices.into_iter().enumerate() {
            p {
                key: "{index}",
                class: if notice.is_error() { "notice error" } else { "notice info" },
                "{notice.text()}"
            }
        }
    }
}
