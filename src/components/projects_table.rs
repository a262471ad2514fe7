//! Projects Table Component
//!
//! Desktop table and mobile grouped accordion over the same rows, with
//! selection, bulk actions, a per-row menu and the delete, status and
//! password modals. Every backend call goes through `ProjectActions`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::copy_to_clipboard;
use crate::components::ConfirmModal;
use crate::dashboard::{
    archive_target, check_page_password, format_date, run_action, ActionFuture, ProjectActions,
    SortColumn, TableState, TableView,
};
use crate::error::ApiError;
use crate::models::{Project, ProjectStatus};
use crate::notify::use_notifier;

const COLUMNS: [SortColumn; 5] = [
    SortColumn::Client,
    SortColumn::Project,
    SortColumn::Status,
    SortColumn::VisualizationDate,
    SortColumn::ValidUntil,
];

type Done = Box<dyn FnOnce(Result<(), ApiError>)>;

fn status_class(status: ProjectStatus) -> String {
    format!("status-badge status-{}", status.as_str())
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        one.to_string()
    } else {
        format!("{} {}", count, many)
    }
}

#[component]
pub fn ProjectsTable(
    #[prop(into)] projects: Signal<Vec<Project>>,
    actions: ProjectActions,
    #[prop(into, optional)] loading: Signal<bool>,
    #[prop(into, optional)] highlighted: Signal<Option<String>>,
    #[prop(into)] on_edit: Callback<String>,
) -> impl IntoView {
    let notifier = use_notifier();
    let actions = StoredValue::new(actions);
    let state = RwSignal::new(TableState::default());

    // Forget selections of rows that disappeared after a reload
    Effect::new(move |_| {
        let list = projects.get();
        state.update(|s| s.retain_existing(&list));
    });

    let rows = Memo::new(move |_| projects.with(|list| state.with(|s| s.visible(list))));
    let groups = Memo::new(move |_| projects.with(|list| state.with(|s| s.grouped(list))));

    // ========================
    // Actions
    // ========================

    let perform = move |label: &'static str, action: ActionFuture, done: Done| {
        let refresh = actions.with_value(|a| a.refresh());
        spawn_local(async move {
            let outcome = run_action(label, action, refresh).await;
            done(outcome);
        });
    };

    let duplicate = move |ids: Vec<String>| {
        let count = ids.len();
        let action = actions.with_value(|a| (a.on_bulk_duplicate)(ids));
        perform(
            "duplicate",
            action,
            Box::new(move |outcome| match outcome {
                Ok(()) => {
                    state.update(|s| {
                        s.close_menu();
                        s.clear_selection();
                    });
                    notifier.success(plural(count, "Proposta duplicada", "propostas duplicadas"));
                }
                Err(err) => notifier.error(format!("Não foi possível duplicar: {}", err)),
            }),
        );
    };

    let change_status = move |ids: Vec<String>, status: ProjectStatus| {
        state.update(|s| s.status_saving = true);
        let action = actions.with_value(|a| (a.on_status_update)(ids, status));
        perform(
            "status update",
            action,
            Box::new(move |outcome| {
                let mut failure = None;
                state.update(|s| {
                    failure = s.finish_status_change(&outcome);
                    if failure.is_none() {
                        s.close_menu();
                    }
                });
                match failure {
                    Some(message) => notifier.error(message),
                    None => notifier.success(format!("Status alterado para \"{}\"", status.label())),
                }
            }),
        );
    };

    let confirm_delete = move || {
        let mut pending = None;
        state.update(|s| pending = s.begin_delete());
        let Some(ids) = pending else {
            return;
        };
        let count = ids.len();
        let action = actions.with_value(|a| (a.on_delete)(ids));
        perform(
            "delete",
            action,
            Box::new(move |outcome| {
                let mut failure = None;
                state.update(|s| failure = s.finish_delete(&outcome));
                match failure {
                    Some(message) => notifier.error(message),
                    None => notifier.success(plural(count, "Proposta excluída", "propostas excluídas")),
                }
            }),
        );
    };

    let copy_link = move |id: String| {
        let lookup = actions.with_value(|a| (a.on_copy_link)(id));
        spawn_local(async move {
            let outcome = match lookup.await {
                Ok(link) => copy_to_clipboard(&link.full_url).await.map(|_| link),
                Err(err) => Err(err),
            };
            match outcome {
                Ok(link) => {
                    log::info!("[DASHBOARD] copied {} (cached: {})", link.full_url, link.from_cache);
                    state.update(|s| s.close_menu());
                    notifier.success("Link copiado");
                }
                Err(err) => notifier.error(format!("Não foi possível copiar o link: {}", err)),
            }
        });
    };

    let open_password = move |id: String| {
        state.update(|s| s.open_password(&id));
        let load = actions.with_value(|a| (a.on_load_password)(id));
        spawn_local(async move {
            let outcome = load.await;
            state.update(|s| s.password_loaded(outcome));
        });
    };

    let save_password = move || {
        let Some((id, value)) = state.with_untracked(|s| {
            s.password.as_ref().map(|m| (m.project_id.clone(), m.value.clone()))
        }) else {
            return;
        };
        if let Some(problem) = check_page_password(&value) {
            state.update(|s| {
                if let Some(modal) = s.password.as_mut() {
                    modal.error = Some(problem);
                }
            });
            return;
        }
        state.update(|s| {
            if let Some(modal) = s.password.as_mut() {
                modal.saving = true;
                modal.error = None;
            }
        });
        let action = actions.with_value(|a| (a.on_save_password)(id, value));
        perform(
            "password update",
            action,
            Box::new(move |outcome| {
                let saved = outcome.is_ok();
                state.update(|s| s.finish_password_save(&outcome));
                if saved {
                    notifier.success("Senha atualizada");
                }
            }),
        );
    };

    // ========================
    // Row pieces
    // ========================

    let row_menu = move |id: String, status: ProjectStatus| {
        let id = StoredValue::new(id);
        view! {
            <div class="row-menu-anchor">
                <button
                    type="button"
                    class="row-menu-btn"
                    title="Ações"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        state.update(|s| s.toggle_menu(&id.get_value()));
                    }
                >
                    "⋯"
                </button>
                <Show when=move || state.with(|s| s.is_menu_open(&id.get_value()))>
                    <div class="row-menu" on:click=|ev| ev.stop_propagation()>
                        <button on:click=move |_| {
                            state.update(|s| s.close_menu());
                            on_edit.run(id.get_value());
                        }>"Editar"</button>
                        <button on:click=move |_| copy_link(id.get_value())>"Copiar link"</button>
                        <button on:click=move |_| open_password(id.get_value())>"Senha da página"</button>
                        <button on:click=move |_| state.update(|s| s.request_status_change(vec![id.get_value()]))>
                            "Alterar status"
                        </button>
                        <button on:click=move |_| duplicate(vec![id.get_value()])>"Duplicar"</button>
                        <button on:click=move |_| change_status(vec![id.get_value()], archive_target(status))>
                            {if status.is_archived() { "Restaurar" } else { "Arquivar" }}
                        </button>
                        <button class="danger" on:click=move |_| state.update(|s| s.request_delete(vec![id.get_value()]))>
                            "Excluir"
                        </button>
                    </div>
                </Show>
            </div>
        }
    };

    let select_box = move |id: String| {
        let id = StoredValue::new(id);
        view! {
            <input
                type="checkbox"
                class="row-select"
                prop:checked=move || state.with(|s| s.is_selected(&id.get_value()))
                on:change=move |_| state.update(|s| s.toggle_select(&id.get_value()))
            />
        }
    };

    let is_highlighted = move |id: &str| highlighted.with(|h| h.as_deref() == Some(id));

    // ========================
    // Layout
    // ========================

    let toolbar = view! {
        <div class="table-toolbar">
            <div class="view-tabs">
                <button
                    class:active=move || state.with(|s| s.view == TableView::Active)
                    on:click=move |_| state.update(|s| s.set_view(TableView::Active))
                >
                    "Propostas"
                </button>
                <button
                    class:active=move || state.with(|s| s.view == TableView::Archived)
                    on:click=move |_| state.update(|s| s.set_view(TableView::Archived))
                >
                    "Arquivadas"
                </button>
            </div>
            <input
                type="search"
                class="table-search"
                placeholder="Buscar por cliente ou projeto"
                prop:value=move || state.with(|s| s.search.clone())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    state.update(|s| s.search = text);
                }
            />
            <Show when=move || state.with(|s| s.view == TableView::Active)>
                <select
                    class="status-filter"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        state.update(|s| s.status_filter = ProjectStatus::parse(&value));
                    }
                >
                    <option value="" selected=move || state.with(|s| s.status_filter.is_none())>"Todos os status"</option>
                    {ProjectStatus::ALL
                        .into_iter()
                        .filter(|status| !status.is_archived())
                        .map(|status| view! {
                            <option
                                value=status.as_str()
                                selected=move || state.with(|s| s.status_filter == Some(status))
                            >
                                {status.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </Show>
        </div>
    };

    let bulk_bar = move || {
        let count = state.with(|s| s.selection_count());
        (count > 0).then(|| {
            let archived_view = state.with_untracked(|s| s.view == TableView::Archived);
            let target = if archived_view { ProjectStatus::Draft } else { ProjectStatus::Archived };
            view! {
                <div class="bulk-actions">
                    <span>{plural(count, "1 selecionada", "selecionadas")}</span>
                    <button on:click=move |_| duplicate(state.with_untracked(|s| s.selected_ids()))>"Duplicar"</button>
                    <button on:click=move |_| {
                        let ids = state.with_untracked(|s| s.selected_ids());
                        state.update(|s| s.request_status_change(ids));
                    }>"Alterar status"</button>
                    <button on:click=move |_| change_status(state.with_untracked(|s| s.selected_ids()), target)>
                        {if archived_view { "Restaurar" } else { "Arquivar" }}
                    </button>
                    <button class="danger" on:click=move |_| {
                        let ids = state.with_untracked(|s| s.selected_ids());
                        state.update(|s| s.request_delete(ids));
                    }>"Excluir"</button>
                    <button on:click=move |_| state.update(|s| s.clear_selection())>"Limpar seleção"</button>
                </div>
            }
        })
    };

    let desktop = move || view! {
        <table class="projects-table desktop-only">
            <thead>
                <tr>
                    <th>
                        <input
                            type="checkbox"
                            prop:checked=move || projects.with(|list| state.with(|s| s.all_visible_selected(list)))
                            on:change=move |_| {
                                let list = projects.get_untracked();
                                state.update(|s| s.toggle_select_all(&list));
                            }
                        />
                    </th>
                    {COLUMNS
                        .into_iter()
                        .map(|column| view! {
                            <th>
                                <button class="sort-btn" on:click=move |_| state.update(|s| s.sort_by(column))>
                                    {column.label()}
                                    {move || state.with(|s| {
                                        if s.sort_column != column {
                                            ""
                                        } else if s.sort_ascending {
                                            " ▲"
                                        } else {
                                            " ▼"
                                        }
                                    })}
                                </button>
                            </th>
                        })
                        .collect_view()}
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || rows.get()
                    key=|p| (p.id.clone(), p.project_status, p.client_name.clone(), p.project_name.clone())
                    children=move |project| {
                        let id = project.id.clone();
                        let row_id = id.clone();
                        view! {
                            <tr class:highlighted=move || is_highlighted(&row_id)>
                                <td>{select_box(id.clone())}</td>
                                <td>{project.client_label().to_string()}</td>
                                <td>{project.project_label().to_string()}</td>
                                <td><span class=status_class(project.project_status)>{project.project_status.label()}</span></td>
                                <td>{format_date(project.project_visualization_date.as_deref())}</td>
                                <td>{format_date(project.project_valid_until.as_deref())}</td>
                                <td>{row_menu(id, project.project_status)}</td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    };

    let mobile = move || view! {
        <div class="projects-accordion mobile-only">
            <For
                each=move || groups.get()
                key=|(status, group)| (*status, group.iter().map(|p| p.id.clone()).collect::<Vec<_>>())
                children=move |(status, group)| {
                    let count = group.len();
                    view! {
                        <div class="status-group">
                            <button
                                class="status-group-header"
                                on:click=move |_| state.update(|s| s.toggle_group(status))
                            >
                                <span class=status_class(status)>{status.label()}</span>
                                <span class="group-count">{count}</span>
                            </button>
                            <Show when=move || state.with(|s| s.is_group_expanded(status))>
                                {group
                                    .iter()
                                    .map(|project| {
                                        let id = project.id.clone();
                                        let card_id = id.clone();
                                        view! {
                                            <div class="project-card" class:highlighted=move || is_highlighted(&card_id)>
                                                {select_box(id.clone())}
                                                <div class="project-card-body">
                                                    <strong>{project.project_label().to_string()}</strong>
                                                    <span>{project.client_label().to_string()}</span>
                                                    <span class="muted">
                                                        {format!("Válida até {}", format_date(project.project_valid_until.as_deref()))}
                                                    </span>
                                                </div>
                                                {row_menu(id, project.project_status)}
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </Show>
                        </div>
                    }
                }
            />
        </div>
    };

    // ========================
    // Modals
    // ========================

    let delete_message = move || {
        state.with(|s| {
            let count = s.delete_pending().map(|ids| ids.len()).unwrap_or(0);
            if count == 1 {
                "A proposta será excluída permanentemente.".to_string()
            } else {
                format!("{} propostas serão excluídas permanentemente.", count)
            }
        })
    };

    let status_modal = move || {
        state.with(|s| s.status_pending().map(|ids| ids.to_vec())).map(|ids| {
            let ids = StoredValue::new(ids);
            view! {
                <div class="modal-overlay" on:click=move |_| state.update(|s| s.cancel_status_change())>
                    <div class="modal" role="dialog" on:click=|ev| ev.stop_propagation()>
                        <h3 class="modal-title">"Alterar status"</h3>
                        <div class="status-options">
                            {ProjectStatus::ALL
                                .into_iter()
                                .map(|status| view! {
                                    <button
                                        class=status_class(status)
                                        disabled=move || state.with(|s| s.status_saving)
                                        on:click=move |_| change_status(ids.get_value(), status)
                                    >
                                        {status.label()}
                                    </button>
                                })
                                .collect_view()}
                        </div>
                        <div class="modal-actions">
                            <button
                                class="btn btn-secondary"
                                disabled=move || state.with(|s| s.status_saving)
                                on:click=move |_| state.update(|s| s.cancel_status_change())
                            >
                                "Cancelar"
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    };

    let password_modal = move || {
        state.with(|s| s.password.is_some()).then(|| {
            let modal = move || state.with(|s| s.password.clone().unwrap_or_default());
            view! {
                <div class="modal-overlay" on:click=move |_| state.update(|s| s.close_password())>
                    <div class="modal" role="dialog" on:click=|ev| ev.stop_propagation()>
                        <h3 class="modal-title">"Senha da página"</h3>
                        <Show
                            when=move || !modal().loading
                            fallback=|| view! { <p class="muted">"Carregando..."</p> }
                        >
                            <input
                                type="text"
                                class="field-control"
                                prop:value=move || modal().value
                                disabled=move || modal().saving
                                on:input=move |ev| {
                                    let text = event_target_value(&ev);
                                    state.update(|s| {
                                        if let Some(m) = s.password.as_mut() {
                                            m.value = text;
                                        }
                                    });
                                }
                            />
                        </Show>
                        {move || modal().error.map(|message| view! { <p class="field-error">{message}</p> })}
                        <div class="modal-actions">
                            <button
                                class="btn btn-secondary"
                                disabled=move || modal().saving
                                on:click=move |_| state.update(|s| s.close_password())
                            >
                                "Cancelar"
                            </button>
                            <button
                                class="btn btn-primary"
                                disabled=move || { let m = modal(); m.saving || m.loading }
                                on:click=move |_| save_password()
                            >
                                {move || if modal().saving { "Salvando..." } else { "Salvar" }}
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    };

    view! {
        <div class="projects-table-wrapper" on:click=move |_| state.update(|s| s.close_menu())>
            {toolbar}
            {bulk_bar}
            <Show
                when=move || !(loading.get() && projects.with(|p| p.is_empty()))
                fallback=|| view! { <p class="table-loading">"Carregando propostas..."</p> }
            >
                <Show
                    when=move || !rows.with(|r| r.is_empty())
                    fallback=|| view! { <p class="table-empty">"Nenhuma proposta encontrada."</p> }
                >
                    {desktop()}
                    {mobile()}
                </Show>
            </Show>

            <ConfirmModal
                open=Signal::derive(move || state.with(|s| s.show_delete_modal()))
                title="Excluir propostas"
                message=Signal::derive(delete_message)
                busy=Signal::derive(move || state.with(|s| s.deleting))
                on_confirm=Callback::new(move |_| confirm_delete())
                on_cancel=Callback::new(move |_| state.update(|s| s.cancel_delete()))
            />
            {status_modal}
            {password_modal}
        </div>
    }
}
