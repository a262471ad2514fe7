//! Sector agents: one system prompt plus a prompt per proposal section.

use serde::{Deserialize, Serialize};

/// Proposal sections an agent can write, in wizard order
pub const SECTIONS: [(&str, &str); 15] = [
    ("intro", "a introdução com título, subtítulo e serviços"),
    ("aboutUs", "a seção \"Sobre nós\""),
    ("team", "a apresentação do time"),
    ("expertise", "as especialidades da empresa"),
    ("results", "os resultados obtidos com clientes"),
    ("clients", "a chamada da lista de clientes"),
    ("cta", "a chamada para ação"),
    ("testimonials", "a introdução dos depoimentos"),
    ("process", "as etapas do processo de trabalho"),
    ("investment", "o título e o escopo do investimento"),
    ("deliverables", "as entregas do projeto"),
    ("plans", "os planos e seus itens"),
    ("terms", "os termos e condições"),
    ("faq", "as perguntas frequentes"),
    ("finalMessage", "a mensagem final"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPrompt {
    pub section: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub sector: String,
    pub name: String,
    pub description: String,
    pub system_prompt: String,
    pub section_prompts: Vec<SectionPrompt>,
}

impl Agent {
    fn new(id: &str, sector: &str, name: &str, focus: &str) -> Self {
        let system_prompt = format!(
            "Você é {name}, especialista em propostas comerciais para {sector}. \
             Escreva em português do Brasil, com tom profissional e próximo, \
             destacando {focus}. Respeite os limites de caracteres de cada campo."
        );
        let section_prompts = SECTIONS
            .iter()
            .map(|(section, what)| SectionPrompt {
                section: section.to_string(),
                prompt: format!(
                    "Escreva {what} de uma proposta de {sector} para {{clientName}}, \
                     com base em {{companyName}} e nos serviços {{services}}."
                ),
            })
            .collect();

        Self {
            id: id.to_string(),
            sector: sector.to_string(),
            name: name.to_string(),
            description: format!("Gera propostas de {sector} com foco em {focus}."),
            system_prompt,
            section_prompts,
        }
    }

    pub fn prompt_for(&self, section: &str) -> Option<&str> {
        self.section_prompts
            .iter()
            .find(|p| p.section == section)
            .map(|p| p.prompt.as_str())
    }
}

/// The six sector agents shipped with the product
pub fn all_agents() -> Vec<Agent> {
    vec![
        Agent::new(
            "architecture",
            "arquitetura",
            "Agente de Arquitetura",
            "projeto, acompanhamento de obra e experiência do cliente",
        ),
        Agent::new(
            "photography",
            "fotografia",
            "Agente de Fotografia",
            "ensaios, cobertura de eventos e entrega das imagens",
        ),
        Agent::new(
            "digital-marketing",
            "marketing digital",
            "Agente de Marketing Digital",
            "tráfego pago, conteúdo e retorno sobre investimento",
        ),
        Agent::new(
            "software-development",
            "desenvolvimento de software",
            "Agente de Desenvolvimento",
            "escopo técnico, prazos e suporte após a entrega",
        ),
        Agent::new(
            "consulting",
            "consultoria",
            "Agente de Consultoria",
            "diagnóstico, plano de ação e indicadores de resultado",
        ),
        Agent::new(
            "events",
            "eventos",
            "Agente de Eventos",
            "planejamento, fornecedores e experiência dos convidados",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_six_unique_agents() {
        let agents = all_agents();
        assert_eq!(agents.len(), 6);
        let ids: HashSet<&str> = agents.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_every_agent_covers_every_section() {
        for agent in all_agents() {
            assert_eq!(agent.section_prompts.len(), SECTIONS.len());
            for (section, _) in SECTIONS {
                assert!(agent.prompt_for(section).is_some(), "{} lacks {}", agent.id, section);
            }
        }
    }

    #[test]
    fn test_prompts_keep_placeholders() {
        let agent = &all_agents()[0];
        let prompt = agent.prompt_for("intro").unwrap();
        assert!(prompt.contains("{clientName}"));
        assert!(prompt.contains("arquitetura"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(&all_agents()[1]).unwrap();
        assert!(value.get("systemPrompt").is_some());
        assert!(value["sectionPrompts"][0].get("section").is_some());
    }
}
