//! Project Endpoints
//!
//! Listing, fetching, updating, finishing, duplicating and deleting
//! proposals.

use serde::Serialize;

use super::{into_data, into_unit, read_envelope, ApiClient};
use crate::error::{ApiError, ApiResult};
use crate::models::{FinishedProject, Project, ProjectStatus, TemplateType};
use crate::wizard::FormData;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FinishArgs<'a> {
    form_data: &'a FormData,
    template_type: Option<TemplateType>,
    project_id: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DuplicateArgs<'a> {
    project_ids: &'a [String],
}

impl ApiClient {
    pub async fn list_projects(&self) -> ApiResult<Vec<Project>> {
        let url = self.url("/api/projects");
        let limit = self.config.projects_limit.to_string();
        log::info!("[API] GET {}?limit={}", url, limit);
        let resp = self.http().get(url).query(&[("limit", limit)]).send().await?;
        into_data(read_envelope(resp).await?)
    }

    pub async fn get_project(&self, id: &str) -> ApiResult<Project> {
        let resp = self.http().get(self.url(&format!("/api/projects/{}", id))).send().await?;
        // The single project comes wrapped in an array
        let projects: Vec<Project> = into_data(read_envelope(resp).await?)?;
        projects
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Rejected("Proposta não encontrada".into()))
    }

    /// PUT the full record, unchanged fields included
    pub async fn update_project(&self, project: &Project) -> ApiResult<()> {
        log::info!("[API] PUT project {}", project.id);
        let resp = self
            .http()
            .put(self.url(&format!("/api/projects/{}", project.id)))
            .json(project)
            .send()
            .await?;
        into_unit(read_envelope::<serde_json::Value>(resp).await?)
    }

    pub async fn set_project_status(&self, id: &str, status: ProjectStatus) -> ApiResult<()> {
        let mut project = self.get_project(id).await?;
        project.project_status = status;
        self.update_project(&project).await
    }

    pub async fn get_page_password(&self, id: &str) -> ApiResult<String> {
        Ok(self.get_project(id).await?.page_password.unwrap_or_default())
    }

    pub async fn set_page_password(&self, id: &str, password: &str) -> ApiResult<()> {
        let mut project = self.get_project(id).await?;
        project.page_password = Some(password.to_string());
        self.update_project(&project).await
    }

    /// Finalize the wizard draft. Returns the persisted project id.
    pub async fn finish_project(
        &self,
        form_data: &FormData,
        template_type: Option<TemplateType>,
        project_id: Option<&str>,
    ) -> ApiResult<String> {
        log::info!("[API] POST finish (project={:?})", project_id);
        let args = FinishArgs { form_data, template_type, project_id };
        let resp = self
            .http()
            .post(self.url("/api/projects/finish"))
            .json(&args)
            .send()
            .await?;
        let finished: FinishedProject = into_data(read_envelope(resp).await?)?;
        Ok(finished.id)
    }

    pub async fn duplicate_projects(&self, ids: &[String]) -> ApiResult<()> {
        log::info!("[API] POST duplicate {:?}", ids);
        let resp = self
            .http()
            .post(self.url("/api/projects/duplicate"))
            .json(&DuplicateArgs { project_ids: ids })
            .send()
            .await?;
        into_unit(read_envelope::<serde_json::Value>(resp).await?)
    }

    pub async fn delete_project(&self, id: &str) -> ApiResult<()> {
        log::info!("[API] DELETE project {}", id);
        let resp = self
            .http()
            .delete(self.url(&format!("/api/projects/{}", id)))
            .send()
            .await?;
        into_unit(read_envelope::<serde_json::Value>(resp).await?)
    }

    /// Delete one by one; stops at the first failure
    pub async fn delete_projects(&self, ids: &[String]) -> ApiResult<()> {
        for id in ids {
            self.delete_project(id).await?;
        }
        Ok(())
    }

    /// Apply one status to several projects, one request each
    pub async fn set_projects_status(&self, ids: &[String], status: ProjectStatus) -> ApiResult<()> {
        for id in ids {
            self.set_project_status(id, status).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_payload_shape() {
        let mut form = FormData::default();
        form.step1.company_name = "Estúdio".into();
        let args = FinishArgs {
            form_data: &form,
            template_type: Some(TemplateType::Flash),
            project_id: None,
        };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json["formData"]["step1"]["companyName"], "Estúdio");
        assert_eq!(json["templateType"], "flash");
        assert!(json["projectId"].is_null());
    }

    #[test]
    fn test_duplicate_payload_shape() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let json = serde_json::to_value(DuplicateArgs { project_ids: &ids }).unwrap();
        assert_eq!(json["projectIds"][1], "b");
    }
}
