//! Confirm Modal Component
//!
//! Blocking yes/no dialog used before destructive actions.

use leptos::prelude::*;

/// Confirmation dialog
///
/// # Arguments
/// * `open` - Whether the modal is shown
/// * `busy` - Confirm request in flight; both buttons are disabled meanwhile
/// * `on_confirm` - Runs when the user confirms. Closing is up to the caller.
/// * `on_cancel` - Runs on "Cancelar" or a backdrop click
#[component]
pub fn ConfirmModal(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] message: Signal<String>,
    #[prop(into, default = "Excluir".to_string())] confirm_label: String,
    #[prop(into, optional)] busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div
                class="modal-overlay"
                on:click=move |_| {
                    if !busy.get_untracked() {
                        on_cancel.run(());
                    }
                }
            >
                <div class="modal confirm-modal" role="dialog" on:click=|ev| ev.stop_propagation()>
                    <h3 class="modal-title">{title.clone()}</h3>
                    <p class="modal-message">{move || message.get()}</p>
                    <div class="modal-actions">
                        <button
                            class="btn btn-secondary"
                            disabled=move || busy.get()
                            on:click=move |_| on_cancel.run(())
                        >
                            "Cancelar"
                        </button>
                        <button
                            class="btn btn-danger"
                            disabled=move || busy.get()
                            on:click=move |_| on_confirm.run(())
                        >
                            {
                                let label = confirm_label.clone();
                                move || if busy.get() { "Aguarde...".to_string() } else { label.clone() }
                            }
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
