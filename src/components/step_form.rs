//! Step Form Component
//!
//! Generic page of the wizard: section toggle, fields, list editors,
//! inline errors with a summary banner, and the navigation buttons.

use leptos::prelude::*;

use crate::accordion::AccordionItem;
use crate::components::{AccordionEditor, FieldInput, ItemExtra};
use crate::context::use_app_context;
use crate::validation::{validate_step, FieldErrors};
use crate::wizard::steps::Step;

/// Error map of the step being rendered, for nested list editors
#[derive(Clone, Copy)]
pub struct StepErrors(pub Signal<FieldErrors>);

/// One wizard page bound to the step record `S`
///
/// Errors appear only after the first "Avançar" click and are then kept
/// up to date on every edit. With `on_submit` the primary button reads
/// "Finalizar" and hands it the valid record instead of advancing.
#[component]
pub fn StepForm<S>(
    #[prop(optional, into)] lists: Option<ViewFn>,
    #[prop(optional)] on_submit: Option<Callback<S>>,
    #[prop(into, optional)] submit_error: Signal<Option<String>>,
) -> impl IntoView
where
    S: Step,
{
    let ctx = use_app_context();
    let wizard = ctx.wizard;

    let record = Signal::derive(move || wizard.with(|w| w.step::<S>().clone()));
    let set_record = Callback::new(move |next: S| {
        wizard.update(|w| w.update_form_data::<S, _>(|s| *s = next));
    });
    let busy = ctx.editing_locked();

    let attempted = RwSignal::new(false);
    let errors = Signal::derive(move || {
        if attempted.get() {
            record.with(|r| validate_step(r))
        } else {
            FieldErrors::new()
        }
    });
    provide_context(StepErrors(errors));

    let section_hidden = move || record.with(|r| r.section_hidden());

    let section_toggle = S::section_toggle().map(|toggle| {
        view! {
            <label class="section-toggle">
                <input
                    type="checkbox"
                    prop:checked=move || record.with(|r| (toggle.get)(r))
                    disabled=move || busy.get()
                    on:change=move |ev| {
                        let mut next = record.get_untracked();
                        (toggle.set)(&mut next, event_target_checked(&ev));
                        set_record.run(next);
                    }
                />
                <span>{toggle.label}</span>
            </label>
        }
    });

    let render_fields = move || {
        S::fields()
            .into_iter()
            .map(|field| {
                let error = Signal::derive(move || errors.with(|e| e.get(field.key).cloned()));
                view! { <FieldInput field=field record=record on_change=set_record error=error disabled=busy /> }
            })
            .collect_view()
    };

    let on_back = move |_| {
        if wizard.with_untracked(|w| w.is_first()) {
            ctx.view.set(crate::context::AppView::TemplateSelect);
        } else {
            wizard.update(|w| w.prev_step());
        }
    };

    let on_next = move |_| {
        attempted.set(true);
        let current = record.get_untracked();
        let found = validate_step(&current);
        if !found.is_empty() {
            log::info!("[WIZARD] step {} has {} invalid field(s)", S::NUMBER, found.len());
            return;
        }
        attempted.set(false);
        match on_submit {
            Some(submit) => submit.run(current),
            None => wizard.update(|w| w.next_step()),
        }
    };

    let primary_label = move || match (on_submit.is_some(), busy.get()) {
        (true, true) => "Finalizando...",
        (true, false) => "Finalizar",
        _ => "Avançar",
    };

    view! {
        <section class="step-form">
            <header class="step-header">
                <span class="step-number">{format!("Etapa {} de 16", S::NUMBER)}</span>
                <h2>{S::TITLE}</h2>
                {section_toggle}
            </header>

            {move || {
                let count = errors.with(|e| e.len());
                (count > 0).then(|| view! {
                    <div class="error-banner" role="alert">
                        {if count == 1 {
                            "Corrija o campo destacado para continuar.".to_string()
                        } else {
                            format!("Corrija os {} campos destacados para continuar.", count)
                        }}
                    </div>
                })
            }}
            {move || submit_error.get().map(|message| view! {
                <div class="error-banner" role="alert">{message}</div>
            })}

            <div class="step-body" class:section-hidden=section_hidden>
                <Show
                    when=move || !section_hidden()
                    fallback=|| view! { <p class="section-hidden-note">"Esta seção não aparecerá na proposta."</p> }
                >
                    {render_fields()}
                    {lists.as_ref().map(|lists| lists.run())}
                </Show>
            </div>

            <footer class="step-actions">
                <button type="button" class="btn btn-secondary" disabled=move || busy.get() on:click=on_back>
                    "Voltar"
                </button>
                <button type="button" class="btn btn-primary" disabled=move || busy.get() on:click=on_next>
                    {primary_label}
                </button>
            </footer>
        </section>
    }
}

/// List editor bound to a `Vec` member of the step record `S`
#[component]
pub fn StepList<S, T>(
    list_key: &'static str,
    get: fn(&S) -> &Vec<T>,
    set: fn(&mut S, Vec<T>),
    #[prop(optional_no_strip)] extra: Option<ItemExtra<T>>,
) -> impl IntoView
where
    S: Step,
    T: AccordionItem,
{
    let ctx = use_app_context();
    let wizard = ctx.wizard;
    let errors = use_context::<StepErrors>().map(|e| e.0).unwrap_or_default();
    let busy = ctx.editing_locked();

    // Read once: the editor owns the list while mounted
    let items = wizard.with_untracked(|w| get(w.step::<S>()).clone());
    let on_change = Callback::new(move |items: Vec<T>| {
        wizard.update(|w| w.update_form_data::<S, _>(|s| set(s, items)));
    });

    view! {
        <div class="step-list">
            <AccordionEditor items=items on_change=on_change list_key=list_key errors=errors disabled=busy extra=extra />
        </div>
    }
}
