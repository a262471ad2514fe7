//! Wizard Shell
//!
//! Template picker shown before step 1, and the frame around the steps
//! with the progress indicator.

use leptos::prelude::*;

use crate::components::render_step;
use crate::context::use_app_context;
use crate::models::TemplateType;
use crate::wizard::steps::STEP_TITLES;

#[component]
pub fn TemplateSelect() -> impl IntoView {
    let ctx = use_app_context();
    let selected = Signal::derive(move || ctx.wizard.with(|w| w.template_type));

    view! {
        <section class="template-select">
            <h2>"Escolha o modelo da proposta"</h2>
            <div class="template-grid">
                {TemplateType::ALL
                    .into_iter()
                    .map(|template| view! {
                        <button
                            type="button"
                            class="template-card"
                            class:active=move || selected.get() == Some(template)
                            on:click=move |_| ctx.wizard.update(|w| w.select_template(template))
                        >
                            <strong>{template.label()}</strong>
                            <span>{template.description()}</span>
                        </button>
                    })
                    .collect_view()}
            </div>
            <footer class="step-actions">
                <button type="button" class="btn btn-secondary" on:click=move |_| ctx.abandon_template_selection()>
                    "Voltar"
                </button>
                <button
                    type="button"
                    class="btn btn-primary"
                    disabled=move || selected.get().is_none()
                    on:click=move |_| ctx.open_wizard()
                >
                    "Avançar"
                </button>
            </footer>
        </section>
    }
}

#[component]
pub fn WizardShell() -> impl IntoView {
    let ctx = use_app_context();
    let wizard = ctx.wizard;
    // Memo so edits inside a step do not rebuild the page
    let current = Memo::new(move |_| wizard.with(|w| w.current_step));
    let furthest = Memo::new(move |_| wizard.with(|w| w.furthest_step));
    let finishing = Memo::new(move |_| wizard.with(|w| w.finishing));

    view! {
        <div class="wizard">
            <nav class="step-indicator">
                {STEP_TITLES
                    .iter()
                    .enumerate()
                    .map(|(i, title)| {
                        let number = i as u8 + 1;
                        view! {
                            <button
                                type="button"
                                class="step-dot"
                                class:current=move || current.get() == number
                                class:done=move || { number < current.get() }
                                disabled=move || { finishing.get() || number > furthest.get() }
                                title=*title
                                on:click=move |_| wizard.update(|w| w.go_to(number))
                            >
                                {number}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="wizard-page">{move || render_step(current.get())}</div>
        </div>
    }
}
