//! Step Records
//!
//! One typed record per wizard page. Each record knows where it lives in
//! `FormData`, which fields it renders, and which extra rules apply to it.

use serde::{Deserialize, Serialize};

use crate::forms::{FieldKind, FieldSpec, HideToggle};
use crate::items::{
    Client, ExpertiseTopic, FaqEntry, Plan, ProcessTopic, ResultItem, TeamMember, TermsEntry,
    Testimonial,
};
use crate::validation::{self, FieldErrors};
use crate::{hide_toggle, text_field};

use super::FormData;

/// Location of a step record inside `FormData`
pub trait StepSlot: Sized {
    /// Key in the submitted payload (`step1`..`step16`)
    const KEY: &'static str;
    const NUMBER: u8;
    const TITLE: &'static str;

    fn get(form: &FormData) -> &Self;
    fn get_mut(form: &mut FormData) -> &mut Self;
}

/// Behaviour of one wizard page
pub trait Step: StepSlot + Clone + PartialEq + Default + Send + Sync + 'static {
    fn fields() -> Vec<FieldSpec<Self>>;

    /// "Hide section" toggle, for optional sections
    fn section_toggle() -> Option<HideToggle<Self>> {
        None
    }

    /// Rules that span more than one field or cover list items
    fn validate_extra(&self, _errors: &mut FieldErrors) {}

    fn section_hidden(&self) -> bool {
        Self::section_toggle().map(|t| (t.get)(self)).unwrap_or(false)
    }
}

macro_rules! step_slot {
    ($ty:ty, $slot:ident, $number:expr, $title:expr) => {
        impl StepSlot for $ty {
            const KEY: &'static str = stringify!($slot);
            const NUMBER: u8 = $number;
            const TITLE: &'static str = $title;

            fn get(form: &FormData) -> &Self {
                &form.$slot
            }

            fn get_mut(form: &mut FormData) -> &mut Self {
                &mut form.$slot
            }
        }
    };
}

// ========================
// Records
// ========================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntroStep {
    pub company_name: String,
    pub company_email: String,
    pub page_title: String,
    pub page_subtitle: String,
    pub hide_page_subtitle: bool,
    pub cta_button_title: String,
    pub services: String,
    pub hide_services: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutUsStep {
    pub hide_section: bool,
    pub about_us_title: String,
    pub about_us_subtitle1: String,
    pub hide_about_us_subtitle1: bool,
    pub about_us_subtitle2: String,
    pub hide_about_us_subtitle2: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamStep {
    pub hide_section: bool,
    pub team_title: String,
    pub team_members: Vec<TeamMember>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpertiseStep {
    pub hide_section: bool,
    pub expertise_title: String,
    pub expertise_topics: Vec<ExpertiseTopic>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultsStep {
    pub hide_section: bool,
    pub results_title: String,
    pub results: Vec<ResultItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientsStep {
    pub hide_section: bool,
    pub clients_title: String,
    pub clients: Vec<Client>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CtaStep {
    pub hide_section: bool,
    pub cta_title: String,
    pub cta_background_image: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialsStep {
    pub hide_section: bool,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessStep {
    pub hide_section: bool,
    pub process_title: String,
    pub process_introduction: String,
    pub hide_process_introduction: bool,
    pub process_steps: Vec<ProcessTopic>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvestmentStep {
    pub hide_section: bool,
    pub investment_title: String,
    pub project_scope: String,
    pub hide_project_scope: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliverablesStep {
    pub hide_section: bool,
    pub deliverables_title: String,
    pub deliverables_description: String,
    pub hide_deliverables_description: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlansStep {
    pub hide_section: bool,
    pub plans: Vec<Plan>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TermsStep {
    pub hide_section: bool,
    pub terms: Vec<TermsEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqStep {
    pub hide_section: bool,
    pub faq: Vec<FaqEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinalMessageStep {
    pub hide_section: bool,
    pub end_message: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessStep {
    pub client_name: String,
    pub project_name: String,
    pub project_url: String,
    pub page_password: String,
    pub project_valid_until: String,
}

step_slot!(IntroStep, step1, 1, "Introdução");
step_slot!(AboutUsStep, step2, 2, "Sobre nós");
step_slot!(TeamStep, step3, 3, "Time");
step_slot!(ExpertiseStep, step4, 4, "Especialidades");
step_slot!(ResultsStep, step5, 5, "Resultados");
step_slot!(ClientsStep, step6, 6, "Clientes");
step_slot!(CtaStep, step7, 7, "Chamada para ação");
step_slot!(TestimonialsStep, step8, 8, "Depoimentos");
step_slot!(ProcessStep, step9, 9, "Processo");
step_slot!(InvestmentStep, step10, 10, "Investimento");
step_slot!(DeliverablesStep, step11, 11, "Entregas");
step_slot!(PlansStep, step12, 12, "Planos");
step_slot!(TermsStep, step13, 13, "Termos e condições");
step_slot!(FaqStep, step14, 14, "Perguntas frequentes");
step_slot!(FinalMessageStep, step15, 15, "Mensagem final");
step_slot!(AccessStep, step16, 16, "Acesso");

/// Titles in step order, for the progress indicator
pub const STEP_TITLES: [&str; 16] = [
    IntroStep::TITLE,
    AboutUsStep::TITLE,
    TeamStep::TITLE,
    ExpertiseStep::TITLE,
    ResultsStep::TITLE,
    ClientsStep::TITLE,
    CtaStep::TITLE,
    TestimonialsStep::TITLE,
    ProcessStep::TITLE,
    InvestmentStep::TITLE,
    DeliverablesStep::TITLE,
    PlansStep::TITLE,
    TermsStep::TITLE,
    FaqStep::TITLE,
    FinalMessageStep::TITLE,
    AccessStep::TITLE,
];

const HIDE_SECTION: &str = "Ocultar seção";

// ========================
// Step behaviour
// ========================

impl Step for IntroStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(IntroStep, company_name, "companyName", "Nome da empresa").required().max(50),
            text_field!(IntroStep, company_email, "companyEmail", "E-mail").required().max(80),
            text_field!(IntroStep, page_title, "pageTitle", "Título da página").required().min(20).max(60),
            text_field!(IntroStep, page_subtitle, "pageSubtitle", "Subtítulo")
                .required()
                .max(100)
                .hidden_by(hide_toggle!(IntroStep, hide_page_subtitle, "Ocultar subtítulo")),
            text_field!(IntroStep, cta_button_title, "ctaButtonTitle", "Texto do botão").required().max(30),
            text_field!(IntroStep, services, "services", "Serviços")
                .textarea()
                .max(300)
                .placeholder("Separe os serviços por vírgula")
                .hidden_by(hide_toggle!(IntroStep, hide_services, "Ocultar serviços")),
        ]
    }

    fn validate_extra(&self, errors: &mut FieldErrors) {
        if !self.company_email.trim().is_empty() && !validation::looks_like_email(&self.company_email) {
            errors.insert("companyEmail".into(), "E-mail inválido".into());
        }
    }
}

impl Step for AboutUsStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(AboutUsStep, about_us_title, "aboutUsTitle", "O título")
                .textarea()
                .required()
                .min(85)
                .max(155),
            text_field!(AboutUsStep, about_us_subtitle1, "aboutUsSubtitle1", "O subtítulo 1")
                .textarea()
                .required()
                .max(250)
                .hidden_by(hide_toggle!(AboutUsStep, hide_about_us_subtitle1, "Ocultar subtítulo 1")),
            text_field!(AboutUsStep, about_us_subtitle2, "aboutUsSubtitle2", "O subtítulo 2")
                .textarea()
                .required()
                .max(250)
                .hidden_by(hide_toggle!(AboutUsStep, hide_about_us_subtitle2, "Ocultar subtítulo 2")),
        ]
    }

    fn section_toggle() -> Option<HideToggle<Self>> {
        Some(hide_toggle!(AboutUsStep, hide_section, HIDE_SECTION))
    }
}

impl Step for TeamStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        vec![text_field!(TeamStep, team_title, "teamTitle", "Título do time").required().max(55)]
    }

    fn section_toggle() -> Option<HideToggle<Self>> {
        Some(hide_toggle!(TeamStep, hide_section, HIDE_SECTION))
    }

    fn validate_extra(&self, errors: &mut FieldErrors) {
        validation::validate_list("teamMembers", &self.team_members, 1, errors);
    }
}

impl Step for ExpertiseStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        vec![text_field!(ExpertiseStep, expertise_title, "expertiseTitle", "Título").required().max(45)]
    }

    fn section_toggle() -> Option<HideToggle<Self>> {
        Some(hide_toggle!(ExpertiseStep, hide_section, HIDE_SECTION))
    }

    fn validate_extra(&self, errors: &mut FieldErrors) {
        validation::validate_list("expertiseTopics", &self.expertise_topics, 1, errors);
    }
}

impl Step for ResultsStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        vec![text_field!(ResultsStep, results_title, "resultsTitle", "Título").required().max(50)]
    }

    fn section_toggle() -> Option<HideToggle<Self>> {
        Some(hide_toggle!(ResultsStep, hide_section, HIDE_SECTION))
    }

    fn validate_extra(&self, errors: &mut FieldErrors) {
        validation::validate_list("results", &self.results, 1, errors);
    }
}

impl Step for ClientsStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        vec![text_field!(ClientsStep, clients_title, "clientsTitle", "Título").required().max(50)]
    }

    fn section_toggle() -> Option<HideToggle<Self>> {
        Some(hide_toggle!(ClientsStep, hide_section, HIDE_SECTION))
    }

    fn validate_extra(&self, errors: &mut FieldErrors) {
        validation::validate_list("clients", &self.clients, 1, errors);
    }
}

impl Step for CtaStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(CtaStep, cta_title, "ctaTitle", "Chamada").textarea().required().max(60),
            text_field!(CtaStep, cta_background_image, "ctaBackgroundImage", "Imagem de fundo (URL)")
                .kind(FieldKind::Url)
                .max(500),
        ]
    }

    fn section_toggle() -> Option<HideToggle<Self>> {
        Some(hide_toggle!(CtaStep, hide_section, HIDE_SECTION))
    }
}

impl Step for TestimonialsStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        Vec::new()
    }

    fn section_toggle() -> Option<HideToggle<Self>> {
        Some(hide_toggle!(TestimonialsStep, hide_section, HIDE_SECTION))
    }

    fn validate_extra(&self, errors: &mut FieldErrors) {
        validation::validate_list("testimonials", &self.testimonials, 1, errors);
    }
}

impl Step for ProcessStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(ProcessStep, process_title, "processTitle", "Título").required().max(50),
            text_field!(ProcessStep, process_introduction, "processIntroduction", "Introdução")
                .textarea()
                .required()
                .max(100)
                .hidden_by(hide_toggle!(ProcessStep, hide_process_introduction, "Ocultar introdução")),
        ]
    }

    fn section_toggle() -> Option<HideToggle<Self>> {
        Some(hide_toggle!(ProcessStep, hide_section, HIDE_SECTION))
    }

    fn validate_extra(&self, errors: &mut FieldErrors) {
        validation::validate_list("processSteps", &self.process_steps, 1, errors);
    }
}

impl Step for InvestmentStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(InvestmentStep, investment_title, "investmentTitle", "Título").required().max(85),
            text_field!(InvestmentStep, project_scope, "projectScope", "Escopo do projeto")
                .textarea()
                .required()
                .max(500)
                .hidden_by(hide_toggle!(InvestmentStep, hide_project_scope, "Ocultar escopo")),
        ]
    }

    fn section_toggle() -> Option<HideToggle<Self>> {
        Some(hide_toggle!(InvestmentStep, hide_section, HIDE_SECTION))
    }
}

impl Step for DeliverablesStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(DeliverablesStep, deliverables_title, "deliverablesTitle", "Título").required().max(50),
            text_field!(DeliverablesStep, deliverables_description, "deliverablesDescription", "Descrição")
                .textarea()
                .required()
                .max(350)
                .hidden_by(hide_toggle!(DeliverablesStep, hide_deliverables_description, "Ocultar descrição")),
        ]
    }

    fn section_toggle() -> Option<HideToggle<Self>> {
        Some(hide_toggle!(DeliverablesStep, hide_section, HIDE_SECTION))
    }
}

impl Step for PlansStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        Vec::new()
    }

    fn section_toggle() -> Option<HideToggle<Self>> {
        Some(hide_toggle!(PlansStep, hide_section, HIDE_SECTION))
    }

    fn validate_extra(&self, errors: &mut FieldErrors) {
        validation::validate_list("plans", &self.plans, 1, errors);
        for plan in &self.plans {
            let key = format!("plans.{}.planDetails", plan.id);
            validation::validate_list(&key, &plan.plan_details, 1, errors);
        }
    }
}

impl Step for TermsStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        Vec::new()
    }

    fn section_toggle() -> Option<HideToggle<Self>> {
        Some(hide_toggle!(TermsStep, hide_section, HIDE_SECTION))
    }

    fn validate_extra(&self, errors: &mut FieldErrors) {
        validation::validate_list("terms", &self.terms, 1, errors);
    }
}

impl Step for FaqStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        Vec::new()
    }

    fn section_toggle() -> Option<HideToggle<Self>> {
        Some(hide_toggle!(FaqStep, hide_section, HIDE_SECTION))
    }

    fn validate_extra(&self, errors: &mut FieldErrors) {
        validation::validate_list("faq", &self.faq, 1, errors);
    }
}

impl Step for FinalMessageStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        vec![text_field!(FinalMessageStep, end_message, "endMessage", "Mensagem final")
            .textarea()
            .required()
            .max(175)]
    }

    fn section_toggle() -> Option<HideToggle<Self>> {
        Some(hide_toggle!(FinalMessageStep, hide_section, HIDE_SECTION))
    }
}

impl Step for AccessStep {
    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(AccessStep, client_name, "clientName", "Nome do cliente").required().max(50),
            text_field!(AccessStep, project_name, "projectName", "Nome do projeto").required().max(60),
            text_field!(AccessStep, project_url, "projectUrl", "Endereço da proposta")
                .required()
                .max(40)
                .placeholder("minha-proposta"),
            text_field!(AccessStep, page_password, "pagePassword", "Senha da página")
                .kind(FieldKind::Password)
                .required()
                .min(6)
                .max(20),
            text_field!(AccessStep, project_valid_until, "projectValidUntil", "Válida até")
                .kind(FieldKind::Date)
                .required(),
        ]
    }

    fn validate_extra(&self, errors: &mut FieldErrors) {
        if !self.project_url.trim().is_empty() && !validation::is_slug(&self.project_url) {
            errors.insert(
                "projectUrl".into(),
                "Use apenas letras minúsculas, números e hífens".into(),
            );
        }
        if !self.project_valid_until.trim().is_empty()
            && !validation::is_iso_date(&self.project_valid_until)
        {
            errors.insert("projectValidUntil".into(), "Data inválida".into());
        }
    }
}
