//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Project, ProjectStatus};

/// Dashboard-wide data with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Projects as last loaded from the backend
    pub projects: Vec<Project>,
    /// Account name, used in greetings and public links
    pub user_name: Option<String>,
    /// A list request is in flight
    pub loading: bool,
    /// Project just created by the wizard, highlighted once in the table
    pub highlighted_project: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_projects(store: &AppStore, projects: Vec<Project>) {
    *store.projects().write() = projects;
}

pub fn store_projects(store: &AppStore) -> Vec<Project> {
    store.projects().get()
}

pub fn store_set_loading(store: &AppStore, loading: bool) {
    *store.loading().write() = loading;
}

pub fn store_loading(store: &AppStore) -> bool {
    store.loading().get()
}

pub fn store_set_user_name(store: &AppStore, name: Option<String>) {
    *store.user_name().write() = name;
}

pub fn store_user_name(store: &AppStore) -> Option<String> {
    store.user_name().get()
}

pub fn store_set_highlight(store: &AppStore, id: Option<String>) {
    *store.highlighted_project().write() = id;
}

pub fn store_highlight(store: &AppStore) -> Option<String> {
    store.highlighted_project().get()
}

/// Reflect a status change locally until the next reload
pub fn store_set_status(store: &AppStore, ids: &[String], status: ProjectStatus) {
    store
        .projects()
        .write()
        .iter_mut()
        .filter(|p| ids.contains(&p.id))
        .for_each(|p| p.project_status = status);
}

/// Remove projects from the store by ID
pub fn store_remove_projects(store: &AppStore, ids: &[String]) {
    store.projects().write().retain(|p| !ids.contains(&p.id));
}
