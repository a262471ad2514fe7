//! Frontend Models
//!
//! Data structures matching the backend API payloads.

use serde::{Deserialize, Serialize};

use crate::items::{
    Client, ExpertiseTopic, FaqEntry, Plan, ProcessTopic, ResultItem, TeamMember, TermsEntry,
    Testimonial,
};

/// Lifecycle status of a persisted proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Active,
    Negotiation,
    Approved,
    Rejected,
    Expired,
    Archived,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 7] = [
        ProjectStatus::Draft,
        ProjectStatus::Active,
        ProjectStatus::Negotiation,
        ProjectStatus::Approved,
        ProjectStatus::Rejected,
        ProjectStatus::Expired,
        ProjectStatus::Archived,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "Rascunho",
            ProjectStatus::Active => "Ativa",
            ProjectStatus::Negotiation => "Em negociação",
            ProjectStatus::Approved => "Aprovada",
            ProjectStatus::Rejected => "Recusada",
            ProjectStatus::Expired => "Expirada",
            ProjectStatus::Archived => "Arquivada",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Active => "active",
            ProjectStatus::Negotiation => "negotiation",
            ProjectStatus::Approved => "approved",
            ProjectStatus::Rejected => "rejected",
            ProjectStatus::Expired => "expired",
            ProjectStatus::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn is_archived(&self) -> bool {
        matches!(self, ProjectStatus::Archived)
    }
}

/// Proposal layout chosen before the wizard starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    #[default]
    Flash,
    Prime,
    Nova,
}

impl TemplateType {
    pub const ALL: [TemplateType; 3] = [TemplateType::Flash, TemplateType::Prime, TemplateType::Nova];

    pub fn label(&self) -> &'static str {
        match self {
            TemplateType::Flash => "Flash",
            TemplateType::Prime => "Prime",
            TemplateType::Nova => "Nova",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateType::Flash => "Direto ao ponto, ideal para propostas rápidas",
            TemplateType::Prime => "Completo, com todas as seções em destaque",
            TemplateType::Nova => "Visual leve, focado em imagens e resultados",
        }
    }
}

/// Section content of a persisted proposal, stored flat by the backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectContent {
    pub company_name: Option<String>,
    pub company_email: Option<String>,
    pub page_title: Option<String>,
    pub page_subtitle: Option<String>,
    pub hide_page_subtitle: Option<bool>,
    pub cta_button_title: Option<String>,
    pub services: Option<String>,
    pub hide_services: Option<bool>,

    pub hide_about_us_section: Option<bool>,
    pub about_us_title: Option<String>,
    pub about_us_subtitle1: Option<String>,
    pub hide_about_us_subtitle1: Option<bool>,
    pub about_us_subtitle2: Option<String>,
    pub hide_about_us_subtitle2: Option<bool>,

    pub hide_team_section: Option<bool>,
    pub team_title: Option<String>,
    pub team_members: Option<Vec<TeamMember>>,

    pub hide_expertise_section: Option<bool>,
    pub expertise_title: Option<String>,
    pub expertise_topics: Option<Vec<ExpertiseTopic>>,

    pub hide_results_section: Option<bool>,
    pub results_title: Option<String>,
    pub results: Option<Vec<ResultItem>>,

    pub hide_clients_section: Option<bool>,
    pub clients_title: Option<String>,
    pub clients: Option<Vec<Client>>,

    pub hide_cta_section: Option<bool>,
    pub cta_title: Option<String>,
    pub cta_background_image: Option<String>,

    pub hide_testimonials_section: Option<bool>,
    pub testimonials: Option<Vec<Testimonial>>,

    pub hide_process_section: Option<bool>,
    pub process_title: Option<String>,
    pub process_introduction: Option<String>,
    pub hide_process_introduction: Option<bool>,
    pub process_steps: Option<Vec<ProcessTopic>>,

    pub hide_investment_section: Option<bool>,
    pub investment_title: Option<String>,
    pub project_scope: Option<String>,
    pub hide_project_scope: Option<bool>,

    pub hide_deliverables_section: Option<bool>,
    pub deliverables_title: Option<String>,
    pub deliverables_description: Option<String>,
    pub hide_deliverables_description: Option<bool>,

    pub hide_plans_section: Option<bool>,
    pub plans: Option<Vec<Plan>>,

    pub hide_terms_section: Option<bool>,
    pub terms: Option<Vec<TermsEntry>>,

    pub hide_faq_section: Option<bool>,
    pub faq: Option<Vec<FaqEntry>>,

    pub hide_final_message_section: Option<bool>,
    pub end_message: Option<String>,
}

/// Persisted proposal (owned by the backend)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub project_status: ProjectStatus,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub project_url: Option<String>,
    #[serde(default)]
    pub project_visualization_date: Option<String>,
    #[serde(default)]
    pub project_valid_until: Option<String>,
    #[serde(default)]
    pub page_password: Option<String>,
    #[serde(default)]
    pub template_type: Option<TemplateType>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub content: ProjectContent,
}

impl Project {
    pub fn client_label(&self) -> &str {
        self.client_name.as_deref().unwrap_or("Sem cliente")
    }

    pub fn project_label(&self) -> &str {
        self.project_name.as_deref().unwrap_or("Sem nome")
    }
}

/// Standard `{ success, data, error }` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload of `GET /api/user-account`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub user_name: String,
}

/// Payload of `POST /api/projects/finish`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FinishedProject {
    pub id: String,
}

/// Payload of the image upload endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

/// Result of the copy-link collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLink {
    pub full_url: String,
    pub from_cache: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_tolerates_nulls_and_missing_fields() {
        let json = r#"{
            "id": "p1",
            "projectStatus": "negotiation",
            "clientName": null,
            "aboutUsTitle": "Sobre",
            "teamMembers": [{"id": "m1", "sortOrder": 0, "name": "Ana"}]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.project_status, ProjectStatus::Negotiation);
        assert_eq!(project.client_name, None);
        assert_eq!(project.content.about_us_title.as_deref(), Some("Sobre"));
        let members = project.content.team_members.unwrap();
        assert_eq!(members[0].name, "Ana");
        assert_eq!(members[0].role, "");
    }

    #[test]
    fn test_status_parse_round() {
        for status in ProjectStatus::ALL {
            assert_eq!(ProjectStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ProjectStatus::parse("unknown"), None);
    }

    #[test]
    fn test_envelope_without_data() {
        let env: ApiEnvelope<UserAccount> =
            serde_json::from_str(r#"{"success": false, "error": "boom"}"#).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.error.as_deref(), Some("boom"));
    }
}
