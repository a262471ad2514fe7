//! Dashboard Page
//!
//! Loads the projects and the account, and wires the table's actions to
//! the backend.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{use_api, ApiClient};
use crate::components::ProjectsTable;
use crate::context::use_app_context;
use crate::dashboard::{ActionFuture, BoxFuture, ProjectActions};
use crate::error::ApiResult;
use crate::models::{ProjectLink, ProjectStatus};
use crate::notify::use_notifier;
use crate::store::{
    store_highlight, store_loading, store_projects, store_remove_projects, store_set_highlight,
    store_set_loading, store_set_projects, store_set_status, store_set_user_name, store_user_name,
    use_app_store, AppStore,
};

/// How long a freshly saved proposal stays highlighted
const HIGHLIGHT_MS: u32 = 6_000;

async fn refresh_projects(api: ApiClient, store: AppStore) -> ApiResult<()> {
    store_set_loading(&store, true);
    let outcome = api.list_projects().await;
    store_set_loading(&store, false);
    let projects = outcome?;
    log::info!("[DASHBOARD] loaded {} projects", projects.len());
    store_set_projects(&store, projects);
    Ok(())
}

fn project_actions(api: ApiClient, store: AppStore) -> ProjectActions {
    let status_api = api.clone();
    let duplicate_api = api.clone();
    let delete_api = api.clone();
    let refresh_api = api.clone();
    let link_api = api.clone();
    let load_api = api.clone();
    let save_api = api;

    ProjectActions {
        on_status_update: Arc::new(move |ids: Vec<String>, status: ProjectStatus| -> ActionFuture {
            let api = status_api.clone();
            Box::pin(async move {
                api.set_projects_status(&ids, status).await?;
                store_set_status(&store, &ids, status);
                Ok(())
            })
        }),
        on_bulk_duplicate: Arc::new(move |ids: Vec<String>| -> ActionFuture {
            let api = duplicate_api.clone();
            Box::pin(async move { api.duplicate_projects(&ids).await })
        }),
        on_delete: Arc::new(move |ids: Vec<String>| -> ActionFuture {
            let api = delete_api.clone();
            Box::pin(async move {
                api.delete_projects(&ids).await?;
                for id in &ids {
                    api.invalidate_link(id);
                }
                store_remove_projects(&store, &ids);
                Ok(())
            })
        }),
        on_refresh: Some(Arc::new(move || -> ActionFuture {
            Box::pin(refresh_projects(refresh_api.clone(), store))
        })),
        on_copy_link: Arc::new(move |id: String| -> BoxFuture<ProjectLink> {
            let api = link_api.clone();
            Box::pin(async move { api.copy_link_with_cache(&id).await })
        }),
        on_load_password: Arc::new(move |id: String| -> BoxFuture<String> {
            let api = load_api.clone();
            Box::pin(async move { api.get_page_password(&id).await })
        }),
        on_save_password: Arc::new(move |id: String, password: String| -> ActionFuture {
            let api = save_api.clone();
            Box::pin(async move { api.set_page_password(&id, &password).await })
        }),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();
    let notifier = use_notifier();

    // Reload projects whenever the trigger changes
    let list_api = api.clone();
    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        log::debug!("[DASHBOARD] reload trigger={}", trigger);
        let api = list_api.clone();
        spawn_local(async move {
            if let Err(err) = refresh_projects(api, store).await {
                notifier.error(format!("Não foi possível carregar as propostas: {}", err));
            }
        });
    });

    // Account name, once
    let account_api = api.clone();
    Effect::new(move |_| {
        let api = account_api.clone();
        spawn_local(async move {
            match api.user_account().await {
                Ok(account) => store_set_user_name(&store, Some(account.user_name)),
                Err(err) => log::warn!("[DASHBOARD] user account unavailable: {}", err),
            }
        });
    });

    // Clear the highlight after a while
    Effect::new(move |_| {
        if let Some(id) = store_highlight(&store) {
            spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(HIGHLIGHT_MS).await;
                if store_highlight(&store).as_deref() == Some(id.as_str()) {
                    store_set_highlight(&store, None);
                }
            });
        }
    });

    let edit_api = api.clone();
    let on_edit = Callback::new(move |id: String| {
        let api = edit_api.clone();
        spawn_local(async move {
            match api.get_project(&id).await {
                Ok(project) => {
                    log::info!("[DASHBOARD] editing project {}", project.id);
                    ctx.wizard.update(|w| w.import_project(&project));
                    ctx.open_wizard();
                }
                Err(err) => notifier.error(format!("Não foi possível abrir a proposta: {}", err)),
            }
        });
    });

    let greeting = move || match store_user_name(&store) {
        Some(name) => format!("Olá, {}", name),
        None => "Olá".to_string(),
    };

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <div>
                    <h1>{greeting}</h1>
                    <p class="muted">"Crie, acompanhe e compartilhe suas propostas."</p>
                </div>
                <button class="btn btn-primary" on:click=move |_| ctx.start_new_proposal()>
                    "Nova proposta"
                </button>
            </header>
            <ProjectsTable
                projects=Signal::derive(move || store_projects(&store))
                actions=project_actions(api.clone(), store)
                loading=Signal::derive(move || store_loading(&store))
                highlighted=Signal::derive(move || store_highlight(&store))
                on_edit=on_edit
            />
        </div>
    }
}
