//! Orderable Items
//!
//! Entries of the reorderable lists edited in the wizard.

use serde::{Deserialize, Serialize};

use leptos_dragdrop::Orderable;

use crate::accordion::AccordionItem;
use crate::forms::{FieldKind, FieldSpec};
use crate::{flag_field, text_field};

macro_rules! impl_orderable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Orderable for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
                fn sort_order(&self) -> i32 {
                    self.sort_order
                }
                fn set_sort_order(&mut self, order: i32) {
                    self.sort_order = order;
                }
            }
        )*
    };
}

/// Falls back to a numbered label when the item has no name yet
fn title_or(value: &str, noun: &str, order: i32) -> String {
    if value.trim().is_empty() {
        format!("{} {}", noun, order + 1)
    } else {
        value.trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMember {
    pub id: String,
    pub sort_order: i32,
    pub name: String,
    pub role: String,
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpertiseTopic {
    pub id: String,
    pub sort_order: i32,
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultItem {
    pub id: String,
    pub sort_order: i32,
    pub client: String,
    pub instagram: String,
    pub investment: String,
    pub roi: String,
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    pub id: String,
    pub sort_order: i32,
    pub name: String,
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessTopic {
    pub id: String,
    pub sort_order: i32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    pub id: String,
    pub sort_order: i32,
    pub name: String,
    pub role: String,
    pub testimonial: String,
    pub photo: String,
}

/// One bullet inside a pricing plan
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanDetail {
    pub id: String,
    pub sort_order: i32,
    pub description: String,
}

/// Pricing tier with its own ordered detail list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Plan {
    pub id: String,
    pub sort_order: i32,
    pub title: String,
    pub description: String,
    pub value: String,
    pub plan_period: String,
    pub button_title: String,
    pub recommended: bool,
    pub plan_details: Vec<PlanDetail>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TermsEntry {
    pub id: String,
    pub sort_order: i32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqEntry {
    pub id: String,
    pub sort_order: i32,
    pub question: String,
    pub answer: String,
}

impl_orderable!(
    TeamMember,
    ExpertiseTopic,
    ResultItem,
    Client,
    ProcessTopic,
    Testimonial,
    PlanDetail,
    Plan,
    TermsEntry,
    FaqEntry,
);

impl AccordionItem for TeamMember {
    const ID_PREFIX: &'static str = "member";
    const NOUN: &'static str = "Membro";
    const HAS_IMAGE: bool = true;

    fn with_id(id: String, sort_order: i32) -> Self {
        Self { id, sort_order, ..Default::default() }
    }

    fn title(&self) -> String {
        title_or(&self.name, Self::NOUN, self.sort_order)
    }

    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(TeamMember, name, "name", "Nome").required().max(60),
            text_field!(TeamMember, role, "role", "Cargo").max(60),
        ]
    }

    fn image(&self) -> Option<&str> {
        Some(&self.photo)
    }

    fn set_image(&mut self, url: String) {
        self.photo = url;
    }
}

impl AccordionItem for ExpertiseTopic {
    const ID_PREFIX: &'static str = "expertise";
    const NOUN: &'static str = "Especialidade";

    fn with_id(id: String, sort_order: i32) -> Self {
        Self { id, sort_order, ..Default::default() }
    }

    fn title(&self) -> String {
        title_or(&self.title, Self::NOUN, self.sort_order)
    }

    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(ExpertiseTopic, icon, "icon", "Ícone").placeholder("ex.: DiamondIcon"),
            text_field!(ExpertiseTopic, title, "title", "Título").required().max(30),
            text_field!(ExpertiseTopic, description, "description", "Descrição")
                .textarea()
                .required()
                .max(130),
        ]
    }
}

impl AccordionItem for ResultItem {
    const ID_PREFIX: &'static str = "result";
    const NOUN: &'static str = "Resultado";
    const HAS_IMAGE: bool = true;

    fn with_id(id: String, sort_order: i32) -> Self {
        Self { id, sort_order, ..Default::default() }
    }

    fn title(&self) -> String {
        title_or(&self.client, Self::NOUN, self.sort_order)
    }

    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(ResultItem, client, "client", "Cliente").required().max(50),
            text_field!(ResultItem, instagram, "instagram", "Instagram").max(40),
            text_field!(ResultItem, investment, "investment", "Investimento").max(20),
            text_field!(ResultItem, roi, "roi", "Retorno").max(20),
        ]
    }

    fn image(&self) -> Option<&str> {
        Some(&self.photo)
    }

    fn set_image(&mut self, url: String) {
        self.photo = url;
    }
}

impl AccordionItem for Client {
    const ID_PREFIX: &'static str = "client";
    const NOUN: &'static str = "Cliente";
    const HAS_IMAGE: bool = true;

    fn with_id(id: String, sort_order: i32) -> Self {
        Self { id, sort_order, ..Default::default() }
    }

    fn title(&self) -> String {
        title_or(&self.name, Self::NOUN, self.sort_order)
    }

    fn fields() -> Vec<FieldSpec<Self>> {
        vec![text_field!(Client, name, "name", "Nome").required().max(50)]
    }

    fn image(&self) -> Option<&str> {
        Some(&self.logo)
    }

    fn set_image(&mut self, url: String) {
        self.logo = url;
    }
}

impl AccordionItem for ProcessTopic {
    const ID_PREFIX: &'static str = "process";
    const NOUN: &'static str = "Etapa";

    fn with_id(id: String, sort_order: i32) -> Self {
        Self { id, sort_order, ..Default::default() }
    }

    fn title(&self) -> String {
        title_or(&self.title, Self::NOUN, self.sort_order)
    }

    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(ProcessTopic, title, "title", "Título").required().max(40),
            text_field!(ProcessTopic, description, "description", "Descrição")
                .textarea()
                .required()
                .max(240),
        ]
    }
}

impl AccordionItem for Testimonial {
    const ID_PREFIX: &'static str = "testimonial";
    const NOUN: &'static str = "Depoimento";
    const HAS_IMAGE: bool = true;

    fn with_id(id: String, sort_order: i32) -> Self {
        Self { id, sort_order, ..Default::default() }
    }

    fn title(&self) -> String {
        title_or(&self.name, Self::NOUN, self.sort_order)
    }

    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(Testimonial, name, "name", "Nome").required().max(50),
            text_field!(Testimonial, role, "role", "Cargo / empresa").max(50),
            text_field!(Testimonial, testimonial, "testimonial", "Depoimento")
                .textarea()
                .required()
                .max(400),
        ]
    }

    fn image(&self) -> Option<&str> {
        Some(&self.photo)
    }

    fn set_image(&mut self, url: String) {
        self.photo = url;
    }
}

impl AccordionItem for PlanDetail {
    const ID_PREFIX: &'static str = "plan-detail";
    const NOUN: &'static str = "Item";

    fn with_id(id: String, sort_order: i32) -> Self {
        Self { id, sort_order, ..Default::default() }
    }

    fn title(&self) -> String {
        title_or(&self.description, Self::NOUN, self.sort_order)
    }

    fn fields() -> Vec<FieldSpec<Self>> {
        vec![text_field!(PlanDetail, description, "description", "Descrição").required().max(70)]
    }
}

impl AccordionItem for Plan {
    const ID_PREFIX: &'static str = "plan";
    const NOUN: &'static str = "Plano";

    fn with_id(id: String, sort_order: i32) -> Self {
        Self { id, sort_order, ..Default::default() }
    }

    fn title(&self) -> String {
        title_or(&self.title, Self::NOUN, self.sort_order)
    }

    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(Plan, title, "title", "Título").required().max(25),
            text_field!(Plan, description, "description", "Descrição").textarea().max(110),
            text_field!(Plan, value, "value", "Valor").required().max(12).placeholder("R$ 0,00"),
            text_field!(Plan, plan_period, "planPeriod", "Período").max(20).placeholder("mensal"),
            text_field!(Plan, button_title, "buttonTitle", "Texto do botão").max(25),
            flag_field!(Plan, recommended, "recommended", "Plano recomendado"),
        ]
    }
}

impl AccordionItem for TermsEntry {
    const ID_PREFIX: &'static str = "terms";
    const NOUN: &'static str = "Termo";

    fn with_id(id: String, sort_order: i32) -> Self {
        Self { id, sort_order, ..Default::default() }
    }

    fn title(&self) -> String {
        title_or(&self.title, Self::NOUN, self.sort_order)
    }

    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(TermsEntry, title, "title", "Título").required().max(30),
            text_field!(TermsEntry, description, "description", "Descrição")
                .textarea()
                .required()
                .max(180),
        ]
    }
}

impl AccordionItem for FaqEntry {
    const ID_PREFIX: &'static str = "faq";
    const NOUN: &'static str = "Pergunta";

    fn with_id(id: String, sort_order: i32) -> Self {
        Self { id, sort_order, ..Default::default() }
    }

    fn title(&self) -> String {
        title_or(&self.question, Self::NOUN, self.sort_order)
    }

    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            text_field!(FaqEntry, question, "question", "Pergunta").required().max(100),
            text_field!(FaqEntry, answer, "answer", "Resposta")
                .kind(FieldKind::TextArea)
                .required()
                .max(300),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accordion::AccordionList;
    use leptos_dragdrop::is_contiguous;

    #[test]
    fn test_title_falls_back_to_position() {
        let m = TeamMember::with_id("x".into(), 2);
        assert_eq!(m.title(), "Membro 3");
        let mut f = FaqEntry::with_id("y".into(), 0);
        f.question = "  Qual o prazo?  ".into();
        assert_eq!(f.title(), "Qual o prazo?");
    }

    #[test]
    fn test_reordering_plan_details_is_local_to_the_plan() {
        let mut plans = AccordionList::<Plan>::default();
        let p1 = plans.add();
        let p2 = plans.add();
        for plan_id in [&p1, &p2] {
            plans.update(plan_id, |plan| {
                let mut details = AccordionList::<PlanDetail>::default();
                for text in ["x", "y", "z"] {
                    let id = details.add();
                    details.update(&id, |d| d.description = text.into());
                }
                plan.plan_details = details.into_items();
            });
        }
        let plans_before: Vec<String> = plans.items().iter().map(|p| p.id.clone()).collect();
        let other_before = plans.get(&p2).unwrap().plan_details.clone();

        plans.update(&p1, |plan| {
            let mut details = AccordionList::new(std::mem::take(&mut plan.plan_details));
            details.move_item(0, 2);
            plan.plan_details = details.into_items();
        });

        let moved: Vec<&str> = plans.get(&p1).unwrap().plan_details.iter().map(|d| d.description.as_str()).collect();
        assert_eq!(moved, vec!["y", "z", "x"]);
        assert!(is_contiguous(&plans.get(&p1).unwrap().plan_details));
        assert_eq!(plans.get(&p2).unwrap().plan_details, other_before);
        let plans_after: Vec<String> = plans.items().iter().map(|p| p.id.clone()).collect();
        assert_eq!(plans_after, plans_before);
    }

    #[test]
    fn test_image_items_expose_their_image_slot() {
        let mut c = Client::with_id("c".into(), 0);
        c.set_image("https://cdn/logo.png".into());
        assert_eq!(c.image(), Some("https://cdn/logo.png"));
        assert!(Client::HAS_IMAGE);
        assert!(!FaqEntry::HAS_IMAGE);
        assert_eq!(FaqEntry::with_id("f".into(), 0).image(), None);
    }
}
