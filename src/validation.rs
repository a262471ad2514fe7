//! Step Validation
//!
//! Builds a fresh error map for a step. Only visible fields are checked:
//! a hidden section or a hidden field never produces an error.

use std::collections::BTreeMap;

use crate::accordion::AccordionItem;
use crate::forms::{char_len, Accessor, FieldSpec};
use crate::wizard::steps::Step;

/// Field key -> message. Keys of list items read `list.itemId.field`.
pub type FieldErrors = BTreeMap<String, String>;

pub const REQUIRED: &str = "Campo obrigatório";

/// Check one field against its length and presence rules
pub fn check_field<T>(record: &T, field: &FieldSpec<T>) -> Option<String> {
    if field.is_hidden(record) {
        return None;
    }
    let Accessor::Text { get, .. } = field.access else {
        return None;
    };
    let value = get(record);
    let len = char_len(&value);
    if len == 0 {
        return field.required.then(|| REQUIRED.to_string());
    }
    if let Some(min) = field.min {
        if len < min {
            return Some(format!("{} deve ter pelo menos {} caracteres", field.label, min));
        }
    }
    if let Some(max) = field.max {
        if len > max {
            return Some(format!("{} deve ter no máximo {} caracteres", field.label, max));
        }
    }
    None
}

/// Validate all fields of `record`, prefixing keys with `prefix`
pub fn check_fields<T>(record: &T, fields: &[FieldSpec<T>], prefix: &str, errors: &mut FieldErrors) {
    for field in fields {
        if let Some(message) = check_field(record, field) {
            errors.insert(format!("{}{}", prefix, field.key), message);
        }
    }
}

/// Require at least `min_items` entries and validate each entry
pub fn validate_list<T: AccordionItem>(key: &str, items: &[T], min_items: usize, errors: &mut FieldErrors) {
    if items.len() < min_items {
        let message = if min_items == 1 {
            format!("Adicione pelo menos um item ({})", T::NOUN.to_lowercase())
        } else {
            format!("Adicione pelo menos {} itens", min_items)
        };
        errors.insert(key.to_string(), message);
    }
    let fields = T::fields();
    for item in items {
        check_fields(item, &fields, &format!("{}.{}.", key, item.id()), errors);
    }
}

/// Full validation run for the "Avançar" click
pub fn validate_step<S: Step>(step: &S) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if step.section_hidden() {
        return errors;
    }
    check_fields(step, &S::fields(), "", &mut errors);
    step.validate_extra(&mut errors);
    errors
}

pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((user, domain)) => {
            !user.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Lowercase letters, digits and single inner hyphens
pub fn is_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// `YYYY-MM-DD` as produced by `<input type="date">`
pub fn is_iso_date(value: &str) -> bool {
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::TeamMember;
    use crate::accordion::AccordionItem;
    use crate::wizard::steps::{AboutUsStep, AccessStep, IntroStep, PlansStep, TeamStep};
    use crate::items::{Plan, PlanDetail};

    fn text(n: usize) -> String {
        "a".repeat(n)
    }

    fn valid_about_us() -> AboutUsStep {
        AboutUsStep {
            about_us_title: text(85),
            about_us_subtitle1: "Primeiro".into(),
            about_us_subtitle2: "Segundo".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_about_us_title_minimum() {
        let mut step = valid_about_us();
        step.about_us_title = text(84);
        let errors = validate_step(&step);
        assert!(errors["aboutUsTitle"].contains("pelo menos 85 caracteres"));

        step.about_us_title = text(85);
        assert!(validate_step(&step).is_empty());
    }

    #[test]
    fn test_about_us_title_maximum() {
        let mut step = valid_about_us();
        step.about_us_title = text(156);
        assert!(validate_step(&step)["aboutUsTitle"].contains("no máximo 155"));
    }

    #[test]
    fn test_hidden_section_never_errors() {
        let step = AboutUsStep { hide_section: true, ..Default::default() };
        assert!(validate_step(&step).is_empty());

        let team = TeamStep { hide_section: true, ..Default::default() };
        assert!(validate_step(&team).is_empty());
    }

    #[test]
    fn test_hidden_field_is_exempt_and_keeps_value() {
        let mut step = valid_about_us();
        step.about_us_subtitle1 = text(300);
        assert!(validate_step(&step).contains_key("aboutUsSubtitle1"));

        step.hide_about_us_subtitle1 = true;
        assert!(validate_step(&step).is_empty());

        step.hide_about_us_subtitle1 = false;
        assert_eq!(step.about_us_subtitle1, text(300));
        assert!(validate_step(&step).contains_key("aboutUsSubtitle1"));
    }

    #[test]
    fn test_empty_required_fields() {
        let errors = validate_step(&IntroStep::default());
        assert_eq!(errors["companyName"], REQUIRED);
        assert_eq!(errors["pageTitle"], REQUIRED);
        // optional field left empty
        assert!(!errors.contains_key("services"));
    }

    #[test]
    fn test_intro_email_rule() {
        let step = IntroStep {
            company_name: "Estúdio".into(),
            company_email: "contato-sem-arroba".into(),
            page_title: "Uma proposta sob medida".into(),
            page_subtitle: "Sub".into(),
            cta_button_title: "Falar".into(),
            ..Default::default()
        };
        assert_eq!(validate_step(&step)["companyEmail"], "E-mail inválido");
        let ok = IntroStep { company_email: "oi@estudio.com".into(), ..step };
        assert!(validate_step(&ok).is_empty());
    }

    #[test]
    fn test_team_requires_members_with_names() {
        let mut step = TeamStep { team_title: "Nosso time".into(), ..Default::default() };
        assert!(validate_step(&step).contains_key("teamMembers"));

        step.team_members.push(TeamMember::with_id("m1".into(), 0));
        let errors = validate_step(&step);
        assert!(!errors.contains_key("teamMembers"));
        assert_eq!(errors["teamMembers.m1.name"], REQUIRED);

        step.team_members[0].name = "Ana".into();
        assert!(validate_step(&step).is_empty());
    }

    #[test]
    fn test_plans_need_details() {
        let mut plan = Plan::with_id("p1".into(), 0);
        plan.title = "Básico".into();
        plan.value = "R$ 900".into();
        let mut step = PlansStep { plans: vec![plan], ..Default::default() };
        assert!(validate_step(&step).contains_key("plans.p1.planDetails"));

        let mut detail = PlanDetail::with_id("d1".into(), 0);
        detail.description = "Uma reunião".into();
        step.plans[0].plan_details.push(detail);
        assert!(validate_step(&step).is_empty());
    }

    #[test]
    fn test_access_rules() {
        let step = AccessStep {
            client_name: "Cliente".into(),
            project_name: "Projeto".into(),
            project_url: "Minha Proposta".into(),
            page_password: "123".into(),
            project_valid_until: "31/12/2026".into(),
        };
        let errors = validate_step(&step);
        assert!(errors.contains_key("projectUrl"));
        assert!(errors["pagePassword"].contains("pelo menos 6"));
        assert_eq!(errors["projectValidUntil"], "Data inválida");

        let ok = AccessStep {
            project_url: "minha-proposta".into(),
            page_password: "segredo1".into(),
            project_valid_until: "2026-12-31".into(),
            ..step
        };
        assert!(validate_step(&ok).is_empty());
    }

    #[test]
    fn test_slug_and_email_helpers() {
        assert!(is_slug("proposta-2026"));
        assert!(!is_slug("-x"));
        assert!(!is_slug("a--b"));
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.com"));
    }
}
