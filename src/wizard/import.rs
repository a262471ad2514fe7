//! Project Import
//!
//! Fans a persisted project out over all step records so an existing
//! proposal opens in the wizard fully populated.

use leptos_dragdrop::Orderable;

use crate::models::Project;

use super::steps::*;
use super::{FormData, WizardState};

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn flag(value: Option<bool>) -> bool {
    value.unwrap_or(false)
}

/// Items in stored display order; ids and sort orders are kept as stored
fn list<T: Clone + Orderable>(value: &Option<Vec<T>>) -> Vec<T> {
    let mut items = value.clone().unwrap_or_default();
    items.sort_by_key(|i| i.sort_order());
    items
}

impl FormData {
    pub fn from_project(project: &Project) -> Self {
        let c = &project.content;
        FormData {
            step1: IntroStep {
                company_name: text(&c.company_name),
                company_email: text(&c.company_email),
                page_title: text(&c.page_title),
                page_subtitle: text(&c.page_subtitle),
                hide_page_subtitle: flag(c.hide_page_subtitle),
                cta_button_title: text(&c.cta_button_title),
                services: text(&c.services),
                hide_services: flag(c.hide_services),
            },
            step2: AboutUsStep {
                hide_section: flag(c.hide_about_us_section),
                about_us_title: text(&c.about_us_title),
                about_us_subtitle1: text(&c.about_us_subtitle1),
                hide_about_us_subtitle1: flag(c.hide_about_us_subtitle1),
                about_us_subtitle2: text(&c.about_us_subtitle2),
                hide_about_us_subtitle2: flag(c.hide_about_us_subtitle2),
            },
            step3: TeamStep {
                hide_section: flag(c.hide_team_section),
                team_title: text(&c.team_title),
                team_members: list(&c.team_members),
            },
            step4: ExpertiseStep {
                hide_section: flag(c.hide_expertise_section),
                expertise_title: text(&c.expertise_title),
                expertise_topics: list(&c.expertise_topics),
            },
            step5: ResultsStep {
                hide_section: flag(c.hide_results_section),
                results_title: text(&c.results_title),
                results: list(&c.results),
            },
            step6: ClientsStep {
                hide_section: flag(c.hide_clients_section),
                clients_title: text(&c.clients_title),
                clients: list(&c.clients),
            },
            step7: CtaStep {
                hide_section: flag(c.hide_cta_section),
                cta_title: text(&c.cta_title),
                cta_background_image: text(&c.cta_background_image),
            },
            step8: TestimonialsStep {
                hide_section: flag(c.hide_testimonials_section),
                testimonials: list(&c.testimonials),
            },
            step9: ProcessStep {
                hide_section: flag(c.hide_process_section),
                process_title: text(&c.process_title),
                process_introduction: text(&c.process_introduction),
                hide_process_introduction: flag(c.hide_process_introduction),
                process_steps: list(&c.process_steps),
            },
            step10: InvestmentStep {
                hide_section: flag(c.hide_investment_section),
                investment_title: text(&c.investment_title),
                project_scope: text(&c.project_scope),
                hide_project_scope: flag(c.hide_project_scope),
            },
            step11: DeliverablesStep {
                hide_section: flag(c.hide_deliverables_section),
                deliverables_title: text(&c.deliverables_title),
                deliverables_description: text(&c.deliverables_description),
                hide_deliverables_description: flag(c.hide_deliverables_description),
            },
            step12: PlansStep {
                hide_section: flag(c.hide_plans_section),
                plans: list(&c.plans)
                    .into_iter()
                    .map(|mut plan| {
                        plan.plan_details.sort_by_key(|d| d.sort_order);
                        plan
                    })
                    .collect(),
            },
            step13: TermsStep {
                hide_section: flag(c.hide_terms_section),
                terms: list(&c.terms),
            },
            step14: FaqStep {
                hide_section: flag(c.hide_faq_section),
                faq: list(&c.faq),
            },
            step15: FinalMessageStep {
                hide_section: flag(c.hide_final_message_section),
                end_message: text(&c.end_message),
            },
            step16: AccessStep {
                client_name: text(&project.client_name),
                project_name: text(&project.project_name),
                project_url: text(&project.project_url),
                page_password: text(&project.page_password),
                project_valid_until: project
                    .project_valid_until
                    .as_deref()
                    .map(|d| d.get(..10).unwrap_or(d).to_string())
                    .unwrap_or_default(),
            },
        }
    }
}

impl WizardState {
    /// Load a persisted project into the wizard in one operation
    pub fn import_project(&mut self, project: &Project) {
        self.form_data = FormData::from_project(project);
        self.current_project_id = Some(project.id.clone());
        if let Some(template) = project.template_type {
            self.template_type = Some(template);
        }
        self.current_step = super::FIRST_STEP;
        self.furthest_step = super::LAST_STEP;
        self.finishing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Plan, PlanDetail, TeamMember};
    use crate::models::{ProjectContent, TemplateType};

    fn member(id: &str, order: i32, name: &str) -> TeamMember {
        TeamMember {
            id: id.into(),
            sort_order: order,
            name: name.into(),
            role: "Designer".into(),
            photo: format!("https://cdn/{}.png", id),
        }
    }

    fn project() -> Project {
        Project {
            id: "proj-42".into(),
            client_name: Some("Padaria Central".into()),
            project_name: Some("Identidade visual".into()),
            page_password: Some("segredo".into()),
            project_valid_until: Some("2026-12-31T00:00:00Z".into()),
            template_type: Some(TemplateType::Prime),
            content: ProjectContent {
                company_name: Some("Estúdio Sol".into()),
                about_us_title: Some("Sobre".into()),
                hide_about_us_subtitle2: Some(true),
                team_members: Some(vec![member("m1", 0, "Ana"), member("m2", 1, "Bia")]),
                plans: Some(vec![Plan {
                    id: "p1".into(),
                    plan_details: vec![
                        PlanDetail { id: "d2".into(), sort_order: 1, description: "B".into() },
                        PlanDetail { id: "d1".into(), sort_order: 0, description: "A".into() },
                    ],
                    ..Default::default()
                }]),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_import_populates_team_members_verbatim() {
        let source = project();
        let mut state = WizardState::new();
        state.import_project(&source);

        assert_eq!(
            state.form_data.step3.team_members,
            source.content.team_members.clone().unwrap()
        );
        assert_eq!(state.form_data.step3.team_members[1].id, "m2");
        assert_eq!(state.form_data.step3.team_members[1].sort_order, 1);
    }

    #[test]
    fn test_import_fans_out_across_steps() {
        let mut state = WizardState::new();
        state.import_project(&project());

        assert_eq!(state.current_project_id.as_deref(), Some("proj-42"));
        assert_eq!(state.template_type, Some(TemplateType::Prime));
        assert_eq!(state.form_data.step1.company_name, "Estúdio Sol");
        assert_eq!(state.form_data.step2.about_us_title, "Sobre");
        assert!(state.form_data.step2.hide_about_us_subtitle2);
        assert_eq!(state.form_data.step16.client_name, "Padaria Central");
        assert_eq!(state.form_data.step16.project_valid_until, "2026-12-31");
        let details: Vec<&str> = state.form_data.step12.plans[0]
            .plan_details
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(details, vec!["d1", "d2"]);
    }

    #[test]
    fn test_import_unlocks_steps_behind_validation() {
        let mut state = WizardState::new();
        state.import_project(&project());
        assert_eq!(state.furthest_step, crate::wizard::LAST_STEP);

        // the imported intro lacks required fields, so the jump stops there
        state.go_to(16);
        assert_eq!(state.current_step, 1);
        assert_eq!(state.form_data.first_invalid_step(), Some(1));
    }
}
