//! Deterministic fallback report.
//!
//! Used when no generation backend produced a usable document. The output is
//! already canonical: all six headers, in rendering order, each exactly once.

use repolens_core::defaults::FALLBACK_TOP_LANGUAGES;
use repolens_core::{CanonicalDocument, ReportLanguage, RepositorySnapshot, SectionKey};

/// Fixed strings for one language.
struct Template {
    default_name: &'static str,
    no_languages: &'static str,
    no_topics: &'static str,
    summary: &'static str,
    languages_label: &'static str,
    topics_label: &'static str,
    strengths: [&'static str; 3],
    weaknesses: [&'static str; 3],
    suggestions: [&'static str; 4],
    tasks: [&'static str; 4],
    note: &'static str,
}

const ENGLISH: Template = Template {
    default_name: "repository",
    no_languages: "Not identified",
    no_topics: "No topics defined",
    summary: "with typical structure inferred from GitHub metadata. Detailed architecture \
              could not be evaluated by the AI model due to:",
    languages_label: "Main detected languages:",
    topics_label: "Repository topics:",
    strengths: [
        "Basic repository metadata available for analysis",
        "README present, facilitating onboarding of new contributors",
        "Sufficient organization for initial project analysis",
    ],
    weaknesses: [
        "Deep analysis limited without available AI generation",
        "Dependencies and internal patterns may require manual code reading",
        "Detailed architecture information not available at this time",
    ],
    suggestions: [
        "Add detailed architecture section in README",
        "Include quick setup and troubleshooting guide",
        "Standardize development and testing scripts",
        "Document important architectural decisions (ADRs)",
    ],
    tasks: [
        "Improve installation documentation with practical examples",
        "Create \"good first issue\" issues for new contributors",
        "Cover critical parts with basic tests",
        "Add CI/CD badges and test coverage to README",
    ],
    note: "> **Note:** Analysis generated in fallback mode",
};

const PORTUGUESE: Template = Template {
    default_name: "repositório",
    no_languages: "Não identificado",
    no_topics: "Sem tópicos definidos",
    summary: "com estrutura típica inferida a partir de metadados do GitHub. A arquitetura \
              detalhada não pôde ser avaliada pelo modelo de IA devido a:",
    languages_label: "Linguagens principais detectadas:",
    topics_label: "Tópicos do repositório:",
    strengths: [
        "Metadados básicos do repositório disponíveis para análise",
        "README presente, facilitando onboarding de novos contribuidores",
        "Organização suficiente para análise inicial do projeto",
    ],
    weaknesses: [
        "Análise profunda limitada sem geração IA disponível",
        "Dependências e padrões internos podem exigir leitura manual de código",
        "Informações detalhadas de arquitetura não disponíveis no momento",
    ],
    suggestions: [
        "Adicionar seção de arquitetura detalhada no README",
        "Incluir guia de setup rápido e troubleshooting",
        "Padronizar scripts de desenvolvimento e testes",
        "Documentar decisões arquiteturais importantes (ADRs)",
    ],
    tasks: [
        "Melhorar documentação de instalação com exemplos práticos",
        "Criar issues de \"good first issue\" para novos contribuidores",
        "Cobrir partes críticas com testes básicos",
        "Adicionar badges de CI/CD e cobertura de testes ao README",
    ],
    note: "> **Nota:** Análise gerada em modo fallback",
};

fn bullets(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `"Rust (80.0%), Shell (20.0%)"` for the top languages by byte share.
fn language_summary(snapshot: &RepositorySnapshot, template: &Template) -> String {
    let languages = snapshot.top_languages(FALLBACK_TOP_LANGUAGES);
    if languages.is_empty() {
        return template.no_languages.to_string();
    }
    languages
        .iter()
        .map(|l| format!("{} ({}%)", l.name, l.percent_label()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Synthesize a canonical report from metadata alone.
pub fn synthesize(
    snapshot: &RepositorySnapshot,
    reason_code: &str,
    language: ReportLanguage,
) -> CanonicalDocument {
    let template = match language {
        ReportLanguage::English => &ENGLISH,
        ReportLanguage::Portuguese => &PORTUGUESE,
    };

    let name = if snapshot.name.trim().is_empty() {
        template.default_name
    } else {
        snapshot.name.as_str()
    };
    let topics = if snapshot.topics.is_empty() {
        template.no_topics.to_string()
    } else {
        snapshot.topics.join(", ")
    };
    let project = match language {
        ReportLanguage::English => "Project",
        ReportLanguage::Portuguese => "Projeto",
    };

    let sections = SectionKey::ALL.map(|key| {
        let body = match key {
            SectionKey::ArchitecturalSummary => {
                format!("{} \"{}\" {} {}.", project, name, template.summary, reason_code)
            }
            SectionKey::Stack => format!(
                "{} {}.\n{} {}.",
                template.languages_label,
                language_summary(snapshot, template),
                template.topics_label,
                topics
            ),
            SectionKey::Strengths => bullets(&template.strengths),
            SectionKey::Weaknesses => bullets(&template.weaknesses),
            SectionKey::ImprovementSuggestions => bullets(&template.suggestions),
            SectionKey::BeginnerTasks => bullets(&template.tasks),
        };
        format!("{}\n{}", key.canonical_header(), body)
    });

    CanonicalDocument::from_canonical(format!(
        "{}\n\n{} ({}).",
        sections.join("\n\n"),
        template.note,
        reason_code
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonicalize::canonicalize;
    use crate::completeness::{present_keys, score};
    use std::collections::BTreeMap;

    fn snapshot() -> RepositorySnapshot {
        RepositorySnapshot {
            name: "demo".to_string(),
            languages: BTreeMap::from([
                ("Rust".to_string(), 700),
                ("Shell".to_string(), 100),
                ("C".to_string(), 100),
                ("Go".to_string(), 50),
                ("Python".to_string(), 30),
                ("Lua".to_string(), 20),
            ]),
            topics: vec!["cli".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_all_sections_in_order() {
        let doc = synthesize(&snapshot(), "429", ReportLanguage::English);
        assert_eq!(score(doc.as_str()), 6);
        assert_eq!(present_keys(doc.as_str()).len(), 6);

        let headers: Vec<&str> = doc
            .as_str()
            .lines()
            .filter(|l| l.starts_with("## "))
            .collect();
        let expected: Vec<String> = SectionKey::ALL.iter().map(|k| k.canonical_header()).collect();
        assert_eq!(headers, expected);
    }

    #[test]
    fn test_deterministic() {
        let a = synthesize(&snapshot(), "RESOURCE_EXHAUSTED", ReportLanguage::Portuguese);
        let b = synthesize(&snapshot(), "RESOURCE_EXHAUSTED", ReportLanguage::Portuguese);
        assert_eq!(a.as_str().as_bytes(), b.as_str().as_bytes());
    }

    #[test]
    fn test_top_five_languages_ties_by_name() {
        let doc = synthesize(&snapshot(), "500", ReportLanguage::English);
        assert!(doc
            .as_str()
            .contains("Main detected languages: Rust (70.0%), C (10.0%), Shell (10.0%), Go (5.0%), Python (3.0%)."));
        assert!(!doc.as_str().contains("Lua"));
    }

    #[test]
    fn test_reason_and_note() {
        let doc = synthesize(&snapshot(), "403", ReportLanguage::English);
        assert!(doc.as_str().contains("could not be evaluated by the AI model due to: 403."));
        assert!(doc
            .as_str()
            .ends_with("> **Note:** Analysis generated in fallback mode (403)."));
    }

    #[test]
    fn test_portuguese_placeholders() {
        let snap = RepositorySnapshot::default();
        let doc = synthesize(&snap, "401", ReportLanguage::Portuguese);
        assert!(doc.as_str().contains("Projeto \"repositório\""));
        assert!(doc.as_str().contains("Linguagens principais detectadas: Não identificado."));
        assert!(doc.as_str().contains("Tópicos do repositório: Sem tópicos definidos."));
        assert!(doc.as_str().contains("> **Nota:**"));
    }

    #[test]
    fn test_already_canonical() {
        let doc = synthesize(&snapshot(), "404", ReportLanguage::English);
        assert_eq!(canonicalize(doc.as_str()), doc);
    }
}
