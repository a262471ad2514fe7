//! Proposal Wizard State
//!
//! In-memory draft of a proposal while the user walks the 16 steps.
//! Nothing here can fail; network work belongs to the step components.

mod import;
pub mod steps;

use serde::{Deserialize, Serialize};

use crate::accordion::AccordionItem;
use crate::models::TemplateType;
use crate::validation::{validate_step, FieldErrors};
use steps::*;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 16;

/// Draft content, one record per step
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormData {
    pub step1: IntroStep,
    pub step2: AboutUsStep,
    pub step3: TeamStep,
    pub step4: ExpertiseStep,
    pub step5: ResultsStep,
    pub step6: ClientsStep,
    pub step7: CtaStep,
    pub step8: TestimonialsStep,
    pub step9: ProcessStep,
    pub step10: InvestmentStep,
    pub step11: DeliverablesStep,
    pub step12: PlansStep,
    pub step13: TermsStep,
    pub step14: FaqStep,
    pub step15: FinalMessageStep,
    pub step16: AccessStep,
}

/// Set the image of the item with `id`, if `items` holds it
fn set_image_in<T: AccordionItem>(items: &mut [T], id: &str, url: &str) -> bool {
    if !T::HAS_IMAGE {
        return false;
    }
    match items.iter_mut().find(|item| item.id() == id) {
        Some(item) => {
            item.set_image(url.to_string());
            true
        }
        None => false,
    }
}

impl FormData {
    /// Error map of the step with the given number
    pub fn step_errors(&self, step: u8) -> FieldErrors {
        match step {
            1 => validate_step(&self.step1),
            2 => validate_step(&self.step2),
            3 => validate_step(&self.step3),
            4 => validate_step(&self.step4),
            5 => validate_step(&self.step5),
            6 => validate_step(&self.step6),
            7 => validate_step(&self.step7),
            8 => validate_step(&self.step8),
            9 => validate_step(&self.step9),
            10 => validate_step(&self.step10),
            11 => validate_step(&self.step11),
            12 => validate_step(&self.step12),
            13 => validate_step(&self.step13),
            14 => validate_step(&self.step14),
            15 => validate_step(&self.step15),
            16 => validate_step(&self.step16),
            _ => FieldErrors::new(),
        }
    }

    /// Lowest step whose record does not validate
    pub fn first_invalid_step(&self) -> Option<u8> {
        (FIRST_STEP..=LAST_STEP).find(|&step| !self.step_errors(step).is_empty())
    }

    /// Store an uploaded image URL on the list item with `id`.
    /// Returns false when no image-bearing item has that id.
    pub fn apply_image(&mut self, id: &str, url: &str) -> bool {
        set_image_in(&mut self.step3.team_members, id, url)
            || set_image_in(&mut self.step5.results, id, url)
            || set_image_in(&mut self.step6.clients, id, url)
            || set_image_in(&mut self.step8.testimonials, id, url)
    }
}

/// Wizard controller state
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub current_step: u8,
    pub form_data: FormData,
    pub template_type: Option<TemplateType>,
    pub current_project_id: Option<String>,
    /// Finish request in flight; navigation is locked meanwhile
    pub finishing: bool,
    /// Highest step reached, for the clickable progress indicator
    pub furthest_step: u8,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: FIRST_STEP,
            form_data: FormData::default(),
            template_type: None,
            current_project_id: None,
            finishing: false,
            furthest_step: FIRST_STEP,
        }
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_step(&mut self) {
        if self.finishing {
            return;
        }
        self.current_step = (self.current_step + 1).min(LAST_STEP);
        self.furthest_step = self.furthest_step.max(self.current_step);
    }

    pub fn prev_step(&mut self) {
        if self.finishing {
            return;
        }
        self.current_step = self.current_step.saturating_sub(1).max(FIRST_STEP);
    }

    /// Jump to a step already reached. Going forward stops on the first
    /// step on the way that does not validate.
    pub fn go_to(&mut self, step: u8) {
        if self.finishing || step < FIRST_STEP || step > self.furthest_step {
            return;
        }
        self.current_step = if step > self.current_step {
            (self.current_step..step)
                .find(|&n| !self.form_data.step_errors(n).is_empty())
                .unwrap_or(step)
        } else {
            step
        };
    }

    pub fn is_first(&self) -> bool {
        self.current_step == FIRST_STEP
    }

    pub fn is_last(&self) -> bool {
        self.current_step == LAST_STEP
    }

    pub fn step<S: Step>(&self) -> &S {
        S::get(&self.form_data)
    }

    /// Apply a patch to one step record. Fields the patch does not touch,
    /// and every other step, are left as they were.
    pub fn update_form_data<S: Step, F: FnOnce(&mut S)>(&mut self, patch: F) {
        patch(S::get_mut(&mut self.form_data));
    }

    pub fn select_template(&mut self, template: TemplateType) {
        self.template_type = Some(template);
    }

    /// Drop the draft and start over
    pub fn reset_form(&mut self) {
        self.form_data = FormData::default();
        self.current_project_id = None;
        self.current_step = FIRST_STEP;
        self.furthest_step = FIRST_STEP;
        self.finishing = false;
    }

    pub fn begin_finish(&mut self) {
        self.finishing = true;
    }

    /// The finish request returned; on failure the draft is kept as is
    pub fn end_finish(&mut self) {
        self.finishing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Client, TeamMember};

    #[test]
    fn test_update_preserves_siblings_and_other_fields() {
        let mut state = WizardState::new();
        state.update_form_data::<IntroStep, _>(|s| s.company_name = "Estúdio Sol".into());
        state.update_form_data::<AboutUsStep, _>(|s| {
            s.about_us_title = "Título".into();
            s.about_us_subtitle1 = "Sub 1".into();
        });

        state.update_form_data::<AboutUsStep, _>(|s| s.about_us_subtitle2 = "Sub 2".into());

        let about = state.step::<AboutUsStep>();
        assert_eq!(about.about_us_title, "Título");
        assert_eq!(about.about_us_subtitle1, "Sub 1");
        assert_eq!(about.about_us_subtitle2, "Sub 2");
        assert_eq!(state.form_data.step1.company_name, "Estúdio Sol");
        assert_eq!(state.form_data.step3, TeamStep::default());
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut state = WizardState::new();
        state.prev_step();
        assert_eq!(state.current_step, 1);
        for _ in 0..30 {
            state.next_step();
        }
        assert_eq!(state.current_step, LAST_STEP);
        assert!(state.is_last());
    }

    fn valid_intro(state: &mut WizardState) {
        state.update_form_data::<IntroStep, _>(|s| {
            s.company_name = "Estúdio Sol".into();
            s.company_email = "contato@sol.com.br".into();
            s.page_title = "Propostas que encantam clientes".into();
            s.hide_page_subtitle = true;
            s.cta_button_title = "Fale conosco".into();
        });
    }

    #[test]
    fn test_go_to_only_visited_steps() {
        let mut state = WizardState::new();
        state.next_step();
        state.next_step();
        state.go_to(10);
        assert_eq!(state.current_step, 3);
        state.go_to(1);
        assert_eq!(state.current_step, 1);
    }

    #[test]
    fn test_go_to_forward_stops_on_invalid_step() {
        let mut state = WizardState::new();
        for _ in 0..3 {
            state.next_step();
        }
        state.go_to(1);

        // step 1 is still empty
        state.go_to(4);
        assert_eq!(state.current_step, 1);

        valid_intro(&mut state);
        assert!(state.form_data.step_errors(1).is_empty());
        state.go_to(4);
        assert_eq!(state.current_step, 2);
    }

    #[test]
    fn test_first_invalid_step_covers_every_step() {
        let mut form = FormData::default();
        assert_eq!(form.first_invalid_step(), Some(1));
        assert!(!form.step_errors(16).is_empty());
        assert!(form.step_errors(17).is_empty());

        form.step16.client_name = "Cliente".into();
        let mut state = WizardState { form_data: form, ..WizardState::new() };
        valid_intro(&mut state);
        assert_eq!(state.form_data.first_invalid_step(), Some(2));
    }

    #[test]
    fn test_apply_image_targets_item_by_id() {
        let mut form = FormData::default();
        form.step3.team_members.push(TeamMember::with_id("m1".into(), 0));
        form.step6.clients.push(Client::with_id("c1".into(), 0));

        assert!(form.apply_image("c1", "https://cdn/logo.png"));
        assert_eq!(form.step6.clients[0].image(), Some("https://cdn/logo.png"));
        assert_eq!(form.step3.team_members[0], TeamMember::with_id("m1".into(), 0));
        assert!(!form.apply_image("gone", "https://cdn/x.png"));
    }

    #[test]
    fn test_navigation_locked_while_finishing() {
        let mut state = WizardState::new();
        for _ in 0..15 {
            state.next_step();
        }
        state.update_form_data::<AccessStep, _>(|s| s.client_name = "Cliente".into());
        state.begin_finish();
        state.prev_step();
        assert_eq!(state.current_step, LAST_STEP);

        // failed finish keeps everything
        state.end_finish();
        assert_eq!(state.current_step, LAST_STEP);
        assert_eq!(state.form_data.step16.client_name, "Cliente");
    }

    #[test]
    fn test_reset_clears_draft_and_project() {
        let mut state = WizardState::new();
        state.current_project_id = Some("p1".into());
        state.update_form_data::<TeamStep, _>(|s| {
            s.team_members.push(TeamMember::with_id("m".into(), 0));
        });
        state.next_step();
        state.reset_form();
        assert_eq!(state.form_data, FormData::default());
        assert_eq!(state.current_project_id, None);
        assert_eq!(state.current_step, FIRST_STEP);
    }

    #[test]
    fn test_form_data_serialises_by_step_key() {
        let mut form = FormData::default();
        form.step2.about_us_title = "Sobre".into();
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["step2"]["aboutUsTitle"], "Sobre");
        assert_eq!(json["step16"]["pagePassword"], "");
        assert_eq!(AboutUsStep::KEY, "step2");
        assert_eq!(steps::STEP_TITLES[AccessStep::NUMBER as usize - 1], AccessStep::TITLE);
    }
}
