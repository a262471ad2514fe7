//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::wizard::WizardState;

/// Top-level screens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Dashboard,
    TemplateSelect,
    Wizard,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload projects from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload projects from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Screen currently shown
    pub view: RwSignal<AppView>,
    /// Wizard controller state
    pub wizard: RwSignal<WizardState>,
}

impl AppContext {
    pub fn new(reload_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            view: RwSignal::new(AppView::Dashboard),
            wizard: RwSignal::new(WizardState::new()),
        }
    }

    /// Trigger a reload of projects
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn show_dashboard(&self) {
        self.view.set(AppView::Dashboard);
    }

    /// Fresh draft, starting at template selection
    pub fn start_new_proposal(&self) {
        self.wizard.update(|w| {
            w.reset_form();
            w.template_type = None;
        });
        self.view.set(AppView::TemplateSelect);
    }

    /// Abandon template selection and go back to an empty draft
    pub fn abandon_template_selection(&self) {
        self.wizard.update(|w| w.reset_form());
        self.view.set(AppView::Dashboard);
    }

    pub fn open_wizard(&self) {
        self.view.set(AppView::Wizard);
    }

    /// True while the draft is being saved. Every editor in the wizard,
    /// nested ones included, disables itself on this signal.
    pub fn editing_locked(&self) -> Signal<bool> {
        let wizard = self.wizard;
        Signal::derive(move || wizard.with(|w| w.finishing))
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
