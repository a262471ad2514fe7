//! Propostas Frontend App
//!
//! Root component: provides the shared context and switches between the
//! dashboard, the template picker and the wizard.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::ApiClient;
use crate::components::{DashboardPage, TemplateSelect, WizardShell};
use crate::config::AppConfig;
use crate::context::{AppContext, AppView};
use crate::notify::{NoticeStack, Notifier};
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    let notifier = Notifier::new();
    provide_context(notifier);
    provide_context(Store::new(AppState::default()));
    let ctx = AppContext::new((reload_trigger, set_reload_trigger));
    provide_context(ctx);

    let config = match AppConfig::load() {
        Ok(config) => Some(config),
        Err(err) => {
            log::error!("[APP] configuration error: {}", err);
            None
        }
    };
    let ready = config.is_some();
    if let Some(config) = config {
        log::info!("[APP] api={} limit={}", config.api_base, config.projects_limit);
        provide_context(ApiClient::new(config));
    }

    view! {
        <div class="app-layout">
            {if ready {
                view! {
                    <main class="main-content">
                        {move || match ctx.view.get() {
                            AppView::Dashboard => view! { <DashboardPage /> }.into_any(),
                            AppView::TemplateSelect => view! { <TemplateSelect /> }.into_any(),
                            AppView::Wizard => view! { <WizardShell /> }.into_any(),
                        }}
                    </main>
                }
                .into_any()
            } else {
                view! {
                    <div class="error-banner" role="alert">
                        "Configuração inválida: defina PROPOSTAS_API_BASE."
                    </div>
                }
                .into_any()
            }}
            <NoticeStack />
        </div>
    }
}
