//! Accordion Editor Component
//!
//! Reorderable list of collapsible item cards. One card is open at a
//! time, removal goes through the confirm modal, and image-bearing items
//! get an upload control.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{
    create_dnd_signals, make_on_dragend, make_on_dragleave, make_on_dragover, make_on_dragstart,
    make_on_drop,
};

use crate::accordion::{AccordionItem, AccordionList};
use crate::api::use_api;
use crate::components::{ConfirmModal, FieldInput};
use crate::context::AppContext;
use crate::validation::FieldErrors;
use crate::wizard::WizardState;

/// Per-item extra content: receives the item and a setter for it
pub type ItemExtra<T> = Callback<(Signal<T>, Callback<T>), AnyView>;

/// Where a finished upload was stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadLanding {
    /// The editor is still mounted and took the result
    Editor,
    /// The editor was unmounted; the URL went straight into the draft
    Draft,
    Dropped,
}

/// Apply an upload outcome. The editor may have been unmounted while the
/// request was in flight, so its list is only touched through `try_update`.
fn settle_upload<T: AccordionItem>(
    list: RwSignal<AccordionList<T>>,
    wizard: Option<RwSignal<WizardState>>,
    item_id: &str,
    outcome: Result<String, String>,
) -> UploadLanding {
    if list
        .try_update(|l| l.finish_upload(item_id, outcome.clone()))
        .is_some()
    {
        return UploadLanding::Editor;
    }
    let Ok(url) = outcome else {
        return UploadLanding::Dropped;
    };
    match wizard.and_then(|w| w.try_update(|w| w.form_data.apply_image(item_id, &url))) {
        Some(true) => UploadLanding::Draft,
        _ => UploadLanding::Dropped,
    }
}

/// Editor for one ordered list
///
/// # Arguments
/// * `items` - Initial items; the editor owns the list from then on
/// * `on_change` - Receives the full list after every mutation
/// * `list_key` - Error-map key of the list (`teamMembers`, `plans`, ...)
/// * `errors` - Current error map of the surrounding step
/// * `extra` - Optional content rendered under the fields of an open item
#[component]
pub fn AccordionEditor<T>(
    items: Vec<T>,
    #[prop(into)] on_change: Callback<Vec<T>>,
    #[prop(into)] list_key: String,
    #[prop(into, optional)] errors: Signal<FieldErrors>,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(optional_no_strip)] extra: Option<ItemExtra<T>>,
) -> impl IntoView
where
    T: AccordionItem,
{
    let api = use_api();
    let wizard = use_context::<AppContext>().map(|ctx| ctx.wizard);
    let list = RwSignal::new(AccordionList::new(items));
    let dnd = create_dnd_signals(disabled);
    let list_key = StoredValue::new(list_key);

    // Apply a mutation and hand the new list to the owner
    let commit = move |f: &dyn Fn(&mut AccordionList<T>)| {
        list.update(|l| f(l));
        on_change.run(list.with_untracked(|l| l.items().to_vec()));
    };

    let on_move = move |from: usize, to: usize| {
        log::info!("[WIZARD] move {} {} -> {}", T::NOUN, from, to);
        commit(&|l| l.move_item(from, to));
    };

    let list_error = move || errors.with(|e| e.get(&list_key.get_value()).cloned());

    let pending_title = move || {
        list.with(|l| {
            l.pending_removal()
                .and_then(|id| l.get(id))
                .map(|item| format!("Remover \"{}\"? Esta ação não pode ser desfeita.", item.title()))
                .unwrap_or_default()
        })
    };

    view! {
        <div class="accordion-editor">
            <For
                // Keyed by position so drag handlers always see current indices
                each=move || {
                    list.with(|l| {
                        l.items()
                            .iter()
                            .enumerate()
                            .map(|(idx, item)| (idx, item.id().to_string()))
                            .collect::<Vec<_>>()
                    })
                }
                key=|(idx, id)| (*idx, id.clone())
                children=move |(idx, id)| {
                    let id = StoredValue::new(id);
                    let record = Signal::derive(move || {
                        list.with(|l| l.get(&id.get_value()).cloned())
                            .unwrap_or_else(|| T::with_id(id.get_value(), idx as i32))
                    });
                    let set_record = Callback::new(move |next: T| {
                        commit(&|l| l.update(&id.get_value(), |item| *item = next.clone()));
                    });
                    let is_open = move || list.with(|l| l.is_open(&id.get_value()));

                    let fields = T::fields()
                        .into_iter()
                        .map(|field| {
                            let error = Signal::derive(move || {
                                errors.with(|e| {
                                    e.get(&format!("{}.{}.{}", list_key.get_value(), id.get_value(), field.key))
                                        .cloned()
                                })
                            });
                            view! {
                                <FieldInput field=field record=record on_change=set_record error=error disabled=disabled />
                            }
                        })
                        .collect_view();

                    let image = T::HAS_IMAGE.then(|| {
                        let api = api.clone();
                        view! {
                            <div class="item-image">
                                {move || {
                                    record
                                        .with(|r| r.image().map(str::to_string))
                                        .filter(|url| !url.is_empty())
                                        .map(|url| view! { <img class="item-thumb" src=url alt="" /> })
                                }}
                                <input
                                    type="file"
                                    accept="image/*"
                                    disabled=move || disabled.get() || list.with(|l| l.is_uploading(&id.get_value()))
                                    on:change=move |ev| {
                                        let input = event_target::<web_sys::HtmlInputElement>(&ev);
                                        let Some(file) = input.files().and_then(|files| files.get(0)) else {
                                            return;
                                        };
                                        let item_id = id.get_value();
                                        list.update(|l| l.begin_upload(&item_id));
                                        let api = api.clone();
                                        spawn_local(async move {
                                            let outcome = api.upload_image(file).await.map_err(|e| e.to_string());
                                            if let Err(message) = &outcome {
                                                log::warn!("[WIZARD] upload for {} failed: {}", item_id, message);
                                            }
                                            match settle_upload(list, wizard, &item_id, outcome) {
                                                UploadLanding::Editor => {
                                                    on_change.run(list.get_untracked().into_items());
                                                }
                                                UploadLanding::Draft => {
                                                    log::info!("[WIZARD] upload for {} stored after leaving the step", item_id);
                                                }
                                                UploadLanding::Dropped => {
                                                    log::warn!("[WIZARD] upload for {} had nowhere to go", item_id);
                                                }
                                            }
                                        });
                                    }
                                />
                                <Show when=move || list.with(|l| l.is_uploading(&id.get_value()))>
                                    <span class="upload-progress">"Enviando..."</span>
                                </Show>
                                {move || {
                                    list.with(|l| l.upload_error(&id.get_value()).map(str::to_string))
                                        .map(|message| view! { <p class="field-error">{message}</p> })
                                }}
                            </div>
                        }
                    });

                    let extra_view = extra.map(|slot| slot.run((record, set_record)));

                    view! {
                        <div
                            class="accordion-item"
                            class:open=is_open
                            class:dragging=move || dnd.state.with(|s| s.is_dragging(idx))
                            class:drag-over=move || dnd.state.with(|s| s.is_drag_over(idx))
                            on:dragover=make_on_dragover(dnd, idx)
                            on:dragleave=make_on_dragleave(dnd)
                            on:drop=make_on_drop(dnd, idx, on_move)
                        >
                            <div class="accordion-header">
                                <span
                                    class="drag-handle"
                                    draggable=move || if disabled.get() { "false" } else { "true" }
                                    on:dragstart=make_on_dragstart(dnd, idx)
                                    on:dragend=make_on_dragend(dnd)
                                >
                                    "⋮⋮"
                                </span>
                                <button
                                    type="button"
                                    class="accordion-title"
                                    on:click=move |_| list.update(|l| l.toggle(&id.get_value()))
                                >
                                    {move || record.with(|r| r.title())}
                                </button>
                                <button
                                    type="button"
                                    class="trash-btn"
                                    title="Remover"
                                    disabled=move || disabled.get()
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        list.update(|l| l.request_remove(&id.get_value()));
                                    }
                                >
                                    "🗑"
                                </button>
                            </div>
                            <div class="accordion-body" class:hidden=move || !is_open()>
                                {fields}
                                {image}
                                {extra_view}
                            </div>
                        </div>
                    }
                }
            />

            {move || list_error().map(|message| view! { <p class="field-error list-error">{message}</p> })}

            <button
                type="button"
                class="btn btn-add"
                disabled=move || disabled.get()
                on:click=move |_| {
                    let mut new_id = String::new();
                    list.update(|l| new_id = l.add());
                    log::debug!("[WIZARD] added {} {}", T::NOUN, new_id);
                    on_change.run(list.with_untracked(|l| l.items().to_vec()));
                }
            >
                {format!("Adicionar {}", T::NOUN.to_lowercase())}
            </button>

            <ConfirmModal
                open=Signal::derive(move || list.with(|l| l.pending_removal().is_some()))
                title=format!("Remover {}", T::NOUN.to_lowercase())
                message=Signal::derive(pending_title)
                confirm_label="Remover"
                on_confirm=Callback::new(move |_| {
                    if let Some(removed) = list.with_untracked(|l| l.pending_removal().map(str::to_string)) {
                        log::info!("[WIZARD] removed {} {}", T::NOUN, removed);
                    }
                    commit(&|l| {
                        l.confirm_remove();
                    });
                })
                on_cancel=Callback::new(move |_| list.update(|l| l.cancel_remove()))
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::TeamMember;

    fn draft_with_member() -> WizardState {
        let mut state = WizardState::new();
        state.form_data.step3.team_members.push(TeamMember::with_id("m1".into(), 0));
        state
    }

    #[test]
    fn test_upload_lands_in_mounted_editor() {
        let owner = Owner::new();
        let list = owner.with(|| RwSignal::new(AccordionList::new(vec![TeamMember::with_id("m1".into(), 0)])));
        let wizard = RwSignal::new(draft_with_member());
        list.update(|l| l.begin_upload("m1"));

        let landing = settle_upload(list, Some(wizard), "m1", Ok("https://cdn/ana.png".into()));

        assert_eq!(landing, UploadLanding::Editor);
        list.with_untracked(|l| {
            assert!(!l.is_uploading("m1"));
            assert_eq!(l.get("m1").and_then(|m| m.image()), Some("https://cdn/ana.png"));
        });
        // the editor reports through on_change, the draft is untouched here
        assert_eq!(wizard.with_untracked(|w| w.form_data.step3.team_members[0].photo.clone()), "");
    }

    #[test]
    fn test_upload_after_unmount_goes_to_draft() {
        let owner = Owner::new();
        let list = owner.with(|| RwSignal::new(AccordionList::new(vec![TeamMember::with_id("m1".into(), 0)])));
        let wizard = RwSignal::new(draft_with_member());
        list.update(|l| l.begin_upload("m1"));
        drop(owner);

        let landing = settle_upload(list, Some(wizard), "m1", Ok("https://cdn/ana.png".into()));

        assert_eq!(landing, UploadLanding::Draft);
        assert_eq!(
            wizard.with_untracked(|w| w.form_data.step3.team_members[0].photo.clone()),
            "https://cdn/ana.png"
        );
    }

    #[test]
    fn test_failed_upload_after_unmount_is_dropped() {
        let owner = Owner::new();
        let list = owner.with(|| RwSignal::new(AccordionList::new(vec![TeamMember::with_id("m1".into(), 0)])));
        let wizard = RwSignal::new(draft_with_member());
        drop(owner);

        let landing = settle_upload(list, Some(wizard), "m1", Err("timeout".into()));

        assert_eq!(landing, UploadLanding::Dropped);
        assert_eq!(wizard.with_untracked(|w| w.form_data.step3.team_members[0].photo.clone()), "");
    }
}
