//! UI Components
//!
//! Reusable Leptos components.

mod accordion_editor;
mod confirm_modal;
mod dashboard_page;
mod field_input;
mod projects_table;
mod step_form;
mod wizard_shell;
mod wizard_steps;

pub use accordion_editor::{AccordionEditor, ItemExtra};
pub use confirm_modal::ConfirmModal;
pub use dashboard_page::DashboardPage;
pub use field_input::FieldInput;
pub use projects_table::ProjectsTable;
pub use step_form::{StepErrors, StepForm, StepList};
pub use wizard_shell::{TemplateSelect, WizardShell};
pub use wizard_steps::render_step;
