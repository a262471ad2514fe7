//! Projects Table State
//!
//! Selection, menus, modals, filtering and sorting for the dashboard table.
//! Persistence stays with the caller: every mutation goes through
//! `ProjectActions`, awaited before the triggering menu or modal closes.

use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::{ApiError, ApiResult};
use crate::models::{Project, ProjectLink, ProjectStatus};

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = ApiResult<T>>>>;
pub type ActionFuture = BoxFuture<()>;
pub type IdsAction = Arc<dyn Fn(Vec<String>) -> ActionFuture + Send + Sync>;
pub type StatusAction = Arc<dyn Fn(Vec<String>, ProjectStatus) -> ActionFuture + Send + Sync>;
pub type RefreshAction = Arc<dyn Fn() -> ActionFuture + Send + Sync>;

/// Caller-supplied backend calls for the table
#[derive(Clone)]
pub struct ProjectActions {
    pub on_status_update: StatusAction,
    pub on_bulk_duplicate: IdsAction,
    pub on_delete: IdsAction,
    pub on_refresh: Option<RefreshAction>,
    pub on_copy_link: Arc<dyn Fn(String) -> BoxFuture<ProjectLink> + Send + Sync>,
    pub on_load_password: Arc<dyn Fn(String) -> BoxFuture<String> + Send + Sync>,
    pub on_save_password: Arc<dyn Fn(String, String) -> ActionFuture + Send + Sync>,
}

impl ProjectActions {
    pub fn refresh(&self) -> Option<ActionFuture> {
        self.on_refresh.as_ref().map(|refresh| refresh())
    }
}

/// `2026-03-01T12:00:00Z` -> `01/03/2026`; anything unparsable is shown as is
pub fn format_date(value: Option<&str>) -> String {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "-".to_string();
    };
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| value.to_string())
}

/// Await the action, then the refresh. The caller closes its menu or modal
/// only on `Ok`. Nothing is retried.
pub async fn run_action<A>(label: &str, action: A, refresh: Option<ActionFuture>) -> ApiResult<()>
where
    A: Future<Output = ApiResult<()>>,
{
    if let Err(err) = action.await {
        log::error!("[DASHBOARD] {} failed: {}", label, err);
        return Err(err);
    }
    if let Some(refresh) = refresh {
        // The action itself succeeded; a stale list is reported, not fatal
        if let Err(err) = refresh.await {
            log::warn!("[DASHBOARD] refresh after {} failed: {}", label, err);
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TableView {
    #[default]
    Active,
    Archived,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Client,
    Project,
    Status,
    VisualizationDate,
    ValidUntil,
    CreatedAt,
}

impl SortColumn {
    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Client => "Cliente",
            SortColumn::Project => "Projeto",
            SortColumn::Status => "Status",
            SortColumn::VisualizationDate => "Visualizada em",
            SortColumn::ValidUntil => "Válida até",
            SortColumn::CreatedAt => "Criada em",
        }
    }
}

/// Password manager modal for one project
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PasswordModal {
    pub project_id: String,
    pub value: String,
    pub loading: bool,
    pub saving: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableState {
    pub view: TableView,
    pub status_filter: Option<ProjectStatus>,
    pub search: String,
    pub sort_column: SortColumn,
    pub sort_ascending: bool,
    selected: BTreeSet<String>,
    open_menu_row_id: Option<String>,
    delete_pending: Option<Vec<String>>,
    pub deleting: bool,
    status_pending: Option<Vec<String>>,
    pub status_saving: bool,
    pub password: Option<PasswordModal>,
    expanded_groups: BTreeSet<ProjectStatus>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            view: TableView::Active,
            status_filter: None,
            search: String::new(),
            sort_column: SortColumn::CreatedAt,
            sort_ascending: false,
            selected: BTreeSet::new(),
            open_menu_row_id: None,
            delete_pending: None,
            deleting: false,
            status_pending: None,
            status_saving: false,
            password: None,
            expanded_groups: BTreeSet::new(),
        }
    }
}

fn sort_key(project: &Project, column: SortColumn) -> String {
    match column {
        SortColumn::Client => project.client_label().to_lowercase(),
        SortColumn::Project => project.project_label().to_lowercase(),
        SortColumn::Status => format!("{:02}", ProjectStatus::ALL.iter().position(|s| *s == project.project_status).unwrap_or(0)),
        SortColumn::VisualizationDate => project.project_visualization_date.clone().unwrap_or_default(),
        SortColumn::ValidUntil => project.project_valid_until.clone().unwrap_or_default(),
        SortColumn::CreatedAt => project.created_at.clone().unwrap_or_default(),
    }
}

impl TableState {
    // ---- listing ----

    fn matches(&self, project: &Project) -> bool {
        let in_view = match self.view {
            TableView::Active => !project.project_status.is_archived(),
            TableView::Archived => project.project_status.is_archived(),
        };
        if !in_view {
            return false;
        }
        if let Some(status) = self.status_filter {
            if project.project_status != status {
                return false;
            }
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || project.client_label().to_lowercase().contains(&needle)
            || project.project_label().to_lowercase().contains(&needle)
    }

    /// Rows for the desktop table, filtered and sorted
    pub fn visible(&self, projects: &[Project]) -> Vec<Project> {
        let mut rows: Vec<Project> = projects.iter().filter(|p| self.matches(p)).cloned().collect();
        let column = self.sort_column;
        rows.sort_by(|a, b| {
            let ord = sort_key(a, column).cmp(&sort_key(b, column)).then_with(|| a.id.cmp(&b.id));
            if self.sort_ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        rows
    }

    /// Rows for the mobile accordion, grouped by status in status order
    pub fn grouped(&self, projects: &[Project]) -> Vec<(ProjectStatus, Vec<Project>)> {
        let rows = self.visible(projects);
        ProjectStatus::ALL
            .into_iter()
            .map(|status| {
                let group: Vec<Project> = rows.iter().filter(|p| p.project_status == status).cloned().collect();
                (status, group)
            })
            .filter(|(_, group)| !group.is_empty())
            .collect()
    }

    /// Click on a header: same column flips direction, new column sorts ascending
    pub fn sort_by(&mut self, column: SortColumn) {
        if self.sort_column == column {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_column = column;
            self.sort_ascending = true;
        }
    }

    pub fn set_view(&mut self, view: TableView) {
        if self.view != view {
            self.view = view;
            self.status_filter = None;
            self.selected.clear();
            self.open_menu_row_id = None;
        }
    }

    pub fn toggle_group(&mut self, status: ProjectStatus) {
        if !self.expanded_groups.remove(&status) {
            self.expanded_groups.insert(status);
        }
    }

    pub fn is_group_expanded(&self, status: ProjectStatus) -> bool {
        self.expanded_groups.contains(&status)
    }

    // ---- selection ----

    pub fn toggle_select(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    pub fn select_all_visible(&mut self, projects: &[Project]) {
        self.selected = self.visible(projects).into_iter().map(|p| p.id).collect();
    }

    /// Header checkbox: select every visible row, or clear if all already are
    pub fn toggle_select_all(&mut self, projects: &[Project]) {
        if self.all_visible_selected(projects) {
            self.selected.clear();
        } else {
            self.select_all_visible(projects);
        }
    }

    pub fn all_visible_selected(&self, projects: &[Project]) -> bool {
        let visible = self.visible(projects);
        !visible.is_empty() && visible.iter().all(|p| self.selected.contains(&p.id))
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Drop selections for rows that no longer exist
    pub fn retain_existing(&mut self, projects: &[Project]) {
        self.selected.retain(|id| projects.iter().any(|p| &p.id == id));
        if let Some(open) = &self.open_menu_row_id {
            if !projects.iter().any(|p| &p.id == open) {
                self.open_menu_row_id = None;
            }
        }
    }

    // ---- row menu (one open at a time) ----

    pub fn toggle_menu(&mut self, id: &str) {
        if self.open_menu_row_id.as_deref() == Some(id) {
            self.open_menu_row_id = None;
        } else {
            self.open_menu_row_id = Some(id.to_string());
        }
    }

    pub fn close_menu(&mut self) {
        self.open_menu_row_id = None;
    }

    pub fn open_menu(&self) -> Option<&str> {
        self.open_menu_row_id.as_deref()
    }

    pub fn is_menu_open(&self, id: &str) -> bool {
        self.open_menu_row_id.as_deref() == Some(id)
    }

    // ---- delete modal ----

    pub fn request_delete(&mut self, ids: Vec<String>) {
        if ids.is_empty() {
            return;
        }
        self.open_menu_row_id = None;
        self.delete_pending = Some(ids);
    }

    pub fn show_delete_modal(&self) -> bool {
        self.delete_pending.is_some()
    }

    pub fn delete_pending(&self) -> Option<&[String]> {
        self.delete_pending.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        if !self.deleting {
            self.delete_pending = None;
        }
    }

    /// Start the request; returns the ids to delete
    pub fn begin_delete(&mut self) -> Option<Vec<String>> {
        if self.deleting {
            return None;
        }
        let ids = self.delete_pending.clone()?;
        self.deleting = true;
        Some(ids)
    }

    /// Apply the outcome. On failure the modal stays open and the message
    /// to show is returned.
    pub fn finish_delete(&mut self, outcome: &Result<(), ApiError>) -> Option<String> {
        self.deleting = false;
        match outcome {
            Ok(()) => {
                if let Some(ids) = self.delete_pending.take() {
                    for id in ids {
                        self.selected.remove(&id);
                    }
                }
                None
            }
            Err(err) => Some(format!("Não foi possível excluir: {}", err)),
        }
    }

    // ---- status modal ----

    pub fn request_status_change(&mut self, ids: Vec<String>) {
        if ids.is_empty() {
            return;
        }
        self.open_menu_row_id = None;
        self.status_pending = Some(ids);
    }

    pub fn status_pending(&self) -> Option<&[String]> {
        self.status_pending.as_deref()
    }

    pub fn cancel_status_change(&mut self) {
        if !self.status_saving {
            self.status_pending = None;
        }
    }

    pub fn finish_status_change(&mut self, outcome: &Result<(), ApiError>) -> Option<String> {
        self.status_saving = false;
        match outcome {
            Ok(()) => {
                self.status_pending = None;
                None
            }
            Err(err) => Some(format!("Não foi possível atualizar o status: {}", err)),
        }
    }

    // ---- password modal ----

    pub fn open_password(&mut self, id: &str) {
        self.open_menu_row_id = None;
        self.password = Some(PasswordModal {
            project_id: id.to_string(),
            loading: true,
            ..Default::default()
        });
    }

    pub fn password_loaded(&mut self, outcome: Result<String, ApiError>) {
        if let Some(modal) = self.password.as_mut() {
            modal.loading = false;
            match outcome {
                Ok(value) => modal.value = value,
                Err(err) => modal.error = Some(err.to_string()),
            }
        }
    }

    pub fn finish_password_save(&mut self, outcome: &Result<(), ApiError>) {
        match outcome {
            Ok(()) => self.password = None,
            Err(err) => {
                if let Some(modal) = self.password.as_mut() {
                    modal.saving = false;
                    modal.error = Some(err.to_string());
                }
            }
        }
    }

    pub fn close_password(&mut self) {
        if !self.password.as_ref().map(|m| m.saving).unwrap_or(false) {
            self.password = None;
        }
    }
}

/// Same bounds as the access step's page password
pub fn check_page_password(value: &str) -> Option<String> {
    let len = crate::forms::char_len(value);
    if len < 6 || len > 20 {
        Some("A senha deve ter entre 6 e 20 caracteres".to_string())
    } else {
        None
    }
}

/// Status a project moves to when archived or restored
pub fn archive_target(current: ProjectStatus) -> ProjectStatus {
    if current.is_archived() {
        ProjectStatus::Draft
    } else {
        ProjectStatus::Archived
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    fn project(id: &str, client: &str, status: ProjectStatus, created: &str) -> Project {
        Project {
            id: id.into(),
            client_name: Some(client.into()),
            project_name: Some(format!("Projeto {}", id)),
            project_status: status,
            created_at: Some(created.into()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Project> {
        vec![
            project("1", "Bruna", ProjectStatus::Draft, "2026-01-03"),
            project("2", "Alice", ProjectStatus::Active, "2026-01-01"),
            project("3", "Carlos", ProjectStatus::Archived, "2026-01-02"),
            project("4", "Daniel", ProjectStatus::Active, "2026-01-04"),
        ]
    }

    fn ids(rows: &[Project]) -> Vec<&str> {
        rows.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_default_view_hides_archived_newest_first() {
        let state = TableState::default();
        assert_eq!(ids(&state.visible(&sample())), vec!["4", "1", "2"]);
    }

    #[test]
    fn test_archived_view() {
        let mut state = TableState::default();
        state.set_view(TableView::Archived);
        assert_eq!(ids(&state.visible(&sample())), vec!["3"]);
    }

    #[test]
    fn test_sort_toggle() {
        let mut state = TableState::default();
        state.sort_by(SortColumn::Client);
        assert_eq!(ids(&state.visible(&sample())), vec!["2", "1", "4"]);
        state.sort_by(SortColumn::Client);
        assert_eq!(ids(&state.visible(&sample())), vec!["4", "1", "2"]);
    }

    #[test]
    fn test_search_and_status_filter() {
        let mut state = TableState::default();
        state.search = "ali".into();
        assert_eq!(ids(&state.visible(&sample())), vec!["2"]);
        state.search.clear();
        state.status_filter = Some(ProjectStatus::Active);
        assert_eq!(ids(&state.visible(&sample())), vec!["4", "2"]);
    }

    #[test]
    fn test_grouped_follows_status_order() {
        let state = TableState::default();
        let groups = state.grouped(&sample());
        let statuses: Vec<ProjectStatus> = groups.iter().map(|(s, _)| *s).collect();
        assert_eq!(statuses, vec![ProjectStatus::Draft, ProjectStatus::Active]);
        assert_eq!(groups[1].1.len(), 2);
    }

    #[test]
    fn test_only_one_menu_open() {
        let mut state = TableState::default();
        state.toggle_menu("1");
        state.toggle_menu("2");
        assert!(state.is_menu_open("2"));
        assert!(!state.is_menu_open("1"));
        state.toggle_menu("2");
        assert_eq!(state.open_menu(), None);
    }

    #[test]
    fn test_select_all_visible() {
        let mut state = TableState::default();
        let projects = sample();
        state.toggle_select_all(&projects);
        assert_eq!(state.selected_ids(), vec!["1", "2", "4"]);
        assert!(state.all_visible_selected(&projects));
        state.toggle_select_all(&projects);
        assert_eq!(state.selection_count(), 0);
    }

    #[test]
    fn test_failed_delete_keeps_modal_open() {
        let mut state = TableState::default();
        state.toggle_menu("1");
        state.request_delete(vec!["1".into()]);
        assert_eq!(state.open_menu(), None);
        let ids = state.begin_delete().unwrap();
        assert!(state.begin_delete().is_none());

        let refreshed = Rc::new(Cell::new(false));
        let flag = refreshed.clone();
        let refresh: ActionFuture = Box::pin(async move {
            flag.set(true);
            Ok(())
        });
        let outcome = block_on(run_action(
            "delete",
            async move {
                assert_eq!(ids, vec!["1".to_string()]);
                Err(ApiError::Network("offline".into()))
            },
            Some(refresh),
        ));

        let toast = state.finish_delete(&outcome);
        assert!(toast.unwrap().contains("offline"));
        assert!(state.show_delete_modal());
        assert!(!state.deleting);
        assert!(!refreshed.get());
    }

    #[test]
    fn test_successful_delete_refreshes_then_closes() {
        let mut state = TableState::default();
        state.toggle_select("1");
        state.toggle_select("2");
        state.request_delete(vec!["1".into()]);
        state.begin_delete();

        let refreshed = Rc::new(Cell::new(false));
        let flag = refreshed.clone();
        let refresh: ActionFuture = Box::pin(async move {
            flag.set(true);
            Ok(())
        });
        let outcome = block_on(run_action("delete", async { Ok(()) }, Some(refresh)));
        assert!(refreshed.get());
        assert_eq!(state.finish_delete(&outcome), None);
        assert!(!state.show_delete_modal());
        assert_eq!(state.selected_ids(), vec!["2"]);
    }

    #[test]
    fn test_refresh_failure_does_not_fail_action() {
        let refresh: ActionFuture = Box::pin(async { Err(ApiError::Status { status: 500 }) });
        assert!(block_on(run_action("duplicate", async { Ok(()) }, Some(refresh))).is_ok());
    }

    #[test]
    fn test_status_modal_stays_on_failure() {
        let mut state = TableState::default();
        state.request_status_change(vec!["1".into(), "2".into()]);
        state.status_saving = true;
        let msg = state.finish_status_change(&Err(ApiError::Rejected("negado".into())));
        assert!(msg.unwrap().contains("negado"));
        assert_eq!(state.status_pending().map(|ids| ids.len()), Some(2));
        state.finish_status_change(&Ok(()));
        assert!(state.status_pending().is_none());
    }

    #[test]
    fn test_password_modal_flow() {
        let mut state = TableState::default();
        state.open_password("1");
        assert!(state.password.as_ref().unwrap().loading);
        state.password_loaded(Ok("abc123".into()));
        assert_eq!(state.password.as_ref().unwrap().value, "abc123");
        state.password.as_mut().unwrap().saving = true;
        state.close_password();
        assert!(state.password.is_some());
        state.finish_password_save(&Err(ApiError::Network("x".into())));
        assert!(state.password.as_ref().unwrap().error.is_some());
        state.finish_password_save(&Ok(()));
        assert!(state.password.is_none());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2026-03-01T12:00:00Z")), "01/03/2026");
        assert_eq!(format_date(Some("2026-12-31")), "31/12/2026");
        assert_eq!(format_date(Some("amanhã")), "amanhã");
        assert_eq!(format_date(None), "-");
    }

    #[test]
    fn test_check_page_password() {
        assert!(check_page_password("12345").is_some());
        assert!(check_page_password("123456").is_none());
        assert!(check_page_password(&"x".repeat(21)).is_some());
    }

    #[test]
    fn test_archive_target() {
        assert_eq!(archive_target(ProjectStatus::Active), ProjectStatus::Archived);
        assert_eq!(archive_target(ProjectStatus::Archived), ProjectStatus::Draft);
    }
}
