//! Field Input Component
//!
//! Renders one `FieldSpec` with its hide toggle, character counter and
//! inline error. Works for step records and list items alike.

use leptos::prelude::*;

use crate::forms::{char_len, FieldKind, FieldSpec};

/// One labelled field bound to a record
///
/// Every edit produces a new record passed to `on_change`; the field never
/// owns state of its own. Hiding a field keeps its value.
#[component]
pub fn FieldInput<T>(
    field: FieldSpec<T>,
    #[prop(into)] record: Signal<T>,
    #[prop(into)] on_change: Callback<T>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into, optional)] disabled: Signal<bool>,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    let value = move || record.with(|r| field.value(r));
    let hidden = move || record.with(|r| field.is_hidden(r));

    let set_text = move |text: String| {
        let mut next = record.get_untracked();
        field.set_value(&mut next, text);
        on_change.run(next);
    };

    let hide_toggle = field.hide.map(|toggle| {
        view! {
            <label class="hide-toggle">
                <input
                    type="checkbox"
                    prop:checked=move || record.with(|r| (toggle.get)(r))
                    disabled=move || disabled.get()
                    on:change=move |ev| {
                        let mut next = record.get_untracked();
                        field.set_hidden(&mut next, event_target_checked(&ev));
                        on_change.run(next);
                    }
                />
                <span>{toggle.label}</span>
            </label>
        }
    });

    let control = move || match field.kind {
        FieldKind::TextArea => view! {
            <textarea
                class="field-control"
                rows="3"
                placeholder=field.placeholder
                prop:value=value
                disabled=move || disabled.get()
                on:input=move |ev| set_text(event_target_value(&ev))
            />
        }
        .into_any(),
        FieldKind::Checkbox => view! {
            <input
                type="checkbox"
                class="field-check"
                prop:checked=move || record.with(|r| field.flag_value(r))
                disabled=move || disabled.get()
                on:change=move |ev| {
                    let mut next = record.get_untracked();
                    field.set_flag(&mut next, event_target_checked(&ev));
                    on_change.run(next);
                }
            />
        }
        .into_any(),
        kind => {
            let input_type = match kind {
                FieldKind::Date => "date",
                FieldKind::Password => "password",
                FieldKind::Url => "url",
                _ => "text",
            };
            view! {
                <input
                    type=input_type
                    class="field-control"
                    placeholder=field.placeholder
                    prop:value=value
                    disabled=move || disabled.get()
                    on:input=move |ev| set_text(event_target_value(&ev))
                />
            }
            .into_any()
        }
    };

    view! {
        <div class="form-field" class:has-error=move || error.with(|e| e.is_some())>
            <div class="field-header">
                <label class="field-label">
                    {field.label}
                    {field.required.then(|| view! { <span class="required-mark">"*"</span> })}
                </label>
                {hide_toggle}
            </div>
            <Show
                when=move || !hidden()
                fallback=|| view! { <p class="field-hidden-note">"Campo oculto na proposta"</p> }
            >
                {control}
                {field.max.map(|max| view! {
                    <span class="char-counter">{move || format!("{}/{}", char_len(&value()), max)}</span>
                })}
            </Show>
            {move || error.get().map(|message| view! { <p class="field-error">{message}</p> })}
        </div>
    }
}
