//! Wizard Step Pages
//!
//! Binds each step record to `StepForm`, with the list editors it owns.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::{AccordionEditor, ItemExtra, StepErrors, StepForm, StepList};
use crate::context::use_app_context;
use crate::items::{
    Client, ExpertiseTopic, FaqEntry, Plan, PlanDetail, ProcessTopic, ResultItem, TeamMember,
    TermsEntry, Testimonial,
};
use crate::notify::use_notifier;
use crate::store::{store_set_highlight, use_app_store};
use crate::wizard::steps::*;

/// Page for the given step number
pub fn render_step(step: u8) -> AnyView {
    match step {
        1 => view! { <StepForm<IntroStep> /> }.into_any(),
        2 => view! { <StepForm<AboutUsStep> /> }.into_any(),
        3 => view! {
            <StepForm<TeamStep> lists=|| view! {
                <StepList<TeamStep, TeamMember>
                    list_key="teamMembers"
                    get=|s| &s.team_members
                    set=|s, v| s.team_members = v
                />
            } />
        }
        .into_any(),
        4 => view! {
            <StepForm<ExpertiseStep> lists=|| view! {
                <StepList<ExpertiseStep, ExpertiseTopic>
                    list_key="expertiseTopics"
                    get=|s| &s.expertise_topics
                    set=|s, v| s.expertise_topics = v
                />
            } />
        }
        .into_any(),
        5 => view! {
            <StepForm<ResultsStep> lists=|| view! {
                <StepList<ResultsStep, ResultItem> list_key="results" get=|s| &s.results set=|s, v| s.results = v />
            } />
        }
        .into_any(),
        6 => view! {
            <StepForm<ClientsStep> lists=|| view! {
                <StepList<ClientsStep, Client> list_key="clients" get=|s| &s.clients set=|s, v| s.clients = v />
            } />
        }
        .into_any(),
        7 => view! { <StepForm<CtaStep> /> }.into_any(),
        8 => view! {
            <StepForm<TestimonialsStep> lists=|| view! {
                <StepList<TestimonialsStep, Testimonial>
                    list_key="testimonials"
                    get=|s| &s.testimonials
                    set=|s, v| s.testimonials = v
                />
            } />
        }
        .into_any(),
        9 => view! {
            <StepForm<ProcessStep> lists=|| view! {
                <StepList<ProcessStep, ProcessTopic>
                    list_key="processSteps"
                    get=|s| &s.process_steps
                    set=|s, v| s.process_steps = v
                />
            } />
        }
        .into_any(),
        10 => view! { <StepForm<InvestmentStep> /> }.into_any(),
        11 => view! { <StepForm<DeliverablesStep> /> }.into_any(),
        12 => view! {
            <StepForm<PlansStep> lists=|| view! {
                <StepList<PlansStep, Plan>
                    list_key="plans"
                    get=|s| &s.plans
                    set=|s, v| s.plans = v
                    extra=Some(plan_details_editor())
                />
            } />
        }
        .into_any(),
        13 => view! {
            <StepForm<TermsStep> lists=|| view! {
                <StepList<TermsStep, TermsEntry> list_key="terms" get=|s| &s.terms set=|s, v| s.terms = v />
            } />
        }
        .into_any(),
        14 => view! {
            <StepForm<FaqStep> lists=|| view! {
                <StepList<FaqStep, FaqEntry> list_key="faq" get=|s| &s.faq set=|s, v| s.faq = v />
            } />
        }
        .into_any(),
        15 => view! { <StepForm<FinalMessageStep> /> }.into_any(),
        _ => view! { <AccessForm /> }.into_any(),
    }
}

/// Nested editor for the detail bullets of one plan. Its list lives inside
/// the plan, so reordering never touches other plans.
fn plan_details_editor() -> ItemExtra<Plan> {
    Callback::new(move |(plan, set_plan): (Signal<Plan>, Callback<Plan>)| {
        let errors = use_context::<StepErrors>().map(|e| e.0).unwrap_or_default();
        let ctx = use_app_context();
        let (plan_id, details) = plan.with_untracked(|p| (p.id.clone(), p.plan_details.clone()));
        let on_change = Callback::new(move |details: Vec<PlanDetail>| {
            let mut next = plan.get_untracked();
            next.plan_details = details;
            set_plan.run(next);
        });
        view! {
            <div class="plan-details">
                <h4>"Itens do plano"</h4>
                <AccordionEditor
                    items=details
                    on_change=on_change
                    list_key=format!("plans.{}.planDetails", plan_id)
                    errors=errors
                    disabled=ctx.editing_locked()
                />
            </div>
        }
        .into_any()
    })
}

/// Last step: validates, then persists the whole draft
#[component]
fn AccessForm() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();
    let notifier = use_notifier();
    let submit_error = RwSignal::new(None::<String>);

    let on_submit = Callback::new(move |access: AccessStep| {
        if ctx.wizard.with_untracked(|w| w.finishing) {
            return;
        }
        log::info!("[WIZARD] finishing \"{}\" for {}", access.project_name, access.client_name);
        let (form_data, template_type, project_id) = ctx.wizard.with_untracked(|w| {
            (w.form_data.clone(), w.template_type, w.current_project_id.clone())
        });
        // Earlier steps may have been skipped through the indicator
        if let Some(step) = form_data.first_invalid_step() {
            log::info!("[WIZARD] finish blocked by step {}", step);
            notifier.warn(format!(
                "A etapa {} ({}) tem campos inválidos. Corrija-a antes de finalizar.",
                step,
                STEP_TITLES[step as usize - 1]
            ));
            ctx.wizard.update(|w| w.go_to(step));
            return;
        }
        ctx.wizard.update(|w| w.begin_finish());
        submit_error.set(None);
        let api = api.clone();

        spawn_local(async move {
            match api.finish_project(&form_data, template_type, project_id.as_deref()).await {
                Ok(id) => {
                    log::info!("[WIZARD] finished project {}", id);
                    if let Some(previous) = &project_id {
                        api.invalidate_link(previous);
                    }
                    store_set_highlight(&store, Some(id));
                    ctx.wizard.update(|w| {
                        w.end_finish();
                        w.reset_form();
                        w.template_type = None;
                    });
                    notifier.success("Proposta salva com sucesso");
                    ctx.show_dashboard();
                    ctx.reload();
                }
                Err(err) => {
                    log::error!("[WIZARD] finish failed: {}", err);
                    ctx.wizard.update(|w| w.end_finish());
                    submit_error.set(Some(format!("Não foi possível salvar a proposta: {}", err)));
                }
            }
        });
    });

    view! { <StepForm<AccessStep> on_submit=on_submit submit_error=submit_error /> }
}
