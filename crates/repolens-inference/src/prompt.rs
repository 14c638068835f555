//! Prompt and system instruction construction.

use repolens_core::defaults::{PROMPT_README_CHARS, PROMPT_TOP_LANGUAGES, PROMPT_TREE_LINES};
use repolens_core::{
    GenerationParams, GenerationRequest, ReportLanguage, RepositorySnapshot, SectionKey,
};

/// Localized placeholders for missing snapshot fields.
struct Placeholders {
    no_description: &'static str,
    no_languages: &'static str,
    no_topics: &'static str,
    no_license: &'static str,
    unavailable: &'static str,
}

impl Placeholders {
    fn for_language(language: ReportLanguage) -> Self {
        match language {
            ReportLanguage::Portuguese => Self {
                no_description: "Sem descrição",
                no_languages: "Não identificado",
                no_topics: "Nenhum",
                no_license: "Não especificada",
                unavailable: "Indisponível",
            },
            ReportLanguage::English => Self {
                no_description: "No description",
                no_languages: "Not identified",
                no_topics: "None",
                no_license: "Not specified",
                unavailable: "Unavailable",
            },
        }
    }
}

fn language_instruction(language: ReportLanguage) -> &'static str {
    match language {
        ReportLanguage::Portuguese => "Responda em português brasileiro.",
        ReportLanguage::English => {
            "Write ALL analysis content in American English. The section header KEYS stay \
             exactly as given, but every description, paragraph and bullet point must be in \
             English. Do NOT write any Portuguese."
        }
    }
}

/// Example body for each section in the output template.
fn template_body(key: SectionKey) -> &'static str {
    match key {
        SectionKey::ArchitecturalSummary => {
            "Project X is a Y application that uses Z. The architecture follows the W pattern \
             with components A, B and C that interact via D. [Continue with 2-3 detailed \
             paragraphs about the architecture]"
        }
        SectionKey::Stack => {
            "- **Frontend**: React, TypeScript, etc.\n\
             - **Backend**: Node.js, Express, etc.\n\
             - **Database**: PostgreSQL, etc.\n\
             - **DevOps**: Docker, GitHub Actions, etc."
        }
        SectionKey::Strengths => {
            "- Specific strength with technical justification\n\
             - Another strength with evidence\n\
             - More points (minimum 4)"
        }
        SectionKey::Weaknesses => {
            "- Specific and constructive weakness\n\
             - Another weakness with implicit suggestion\n\
             - More points (minimum 4)"
        }
        SectionKey::ImprovementSuggestions => {
            "- Concrete suggestion with described impact\n\
             - Another suggestion prioritizing feasibility\n\
             - More suggestions (minimum 5)"
        }
        SectionKey::BeginnerTasks => {
            "- Specific task: \"Add unit tests for module X\"\n\
             - Another task: \"Document the REST API in README\"\n\
             - More tasks (minimum 5)"
        }
    }
}

/// `"Rust: 80.0%, Shell: 20.0%"` for the top languages.
fn language_breakdown(snapshot: &RepositorySnapshot) -> String {
    snapshot
        .top_languages(PROMPT_TOP_LANGUAGES)
        .iter()
        .map(|l| format!("{}: {}%", l.name, l.percent_label()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// Build the user prompt for a snapshot.
pub fn build_prompt(snapshot: &RepositorySnapshot, language: ReportLanguage) -> String {
    let ph = Placeholders::for_language(language);
    let first_header = SectionKey::ArchitecturalSummary.canonical_header();

    let languages = language_breakdown(snapshot);
    let topics = snapshot.topics.join(", ");
    let tree: Vec<&str> = snapshot
        .tree_excerpt
        .lines()
        .take(PROMPT_TREE_LINES)
        .collect();
    let tree_section = if tree.is_empty() {
        String::new()
    } else {
        format!("\nRelevant files:\n{}\n", tree.join("\n"))
    };
    let readme = truncate_chars(&snapshot.readme_excerpt, PROMPT_README_CHARS);

    let template = SectionKey::ALL
        .iter()
        .map(|key| format!("{}\n{}", key.canonical_header(), template_body(*key)))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "GitHub repository data for analysis:\n\
         \n\
         Name: {name}\n\
         Description: {description}\n\
         Stars: {stars} | Forks: {forks} | Issues: {issues}\n\
         Languages: {languages}\n\
         Topics: {topics}\n\
         License: {license}\n\
         {tree_section}\n\
         README:\n\
         {readme}\n\
         \n\
         ---\n\
         \n\
         Generate a COMPLETE technical analysis following EXACTLY the format below. \
         Do NOT add text before the first ##. Do NOT use ### or numbering. \
         Start directly with \"{first_header}\" on the first line.\n\
         \n\
         {template}\n\
         \n\
         CRITICAL RULES:\n\
         1. Start DIRECTLY with {first_header} (no text before)\n\
         2. Use EXACTLY \"## \" followed by the section name in UPPERCASE with underscores\n\
         3. NEVER use ### or #### or \"1.\" or \"---\"\n\
         4. Each section must have at least 4 bullet points or 2 paragraphs\n\
         5. Complete ALL {count} sections to the end\n\
         6. {instruction}",
        name = snapshot.name,
        description = or_placeholder(snapshot.description.as_deref().unwrap_or(""), ph.no_description),
        stars = snapshot.stars,
        forks = snapshot.forks,
        issues = snapshot.open_issues,
        languages = or_placeholder(&languages, ph.no_languages),
        topics = or_placeholder(&topics, ph.no_topics),
        license = or_placeholder(snapshot.license.as_deref().unwrap_or(""), ph.no_license),
        tree_section = tree_section,
        readme = or_placeholder(readme, ph.unavailable),
        first_header = first_header,
        template = template,
        count = SectionKey::ALL.len(),
        instruction = language_instruction(language),
    )
}

/// Build the system instruction (only sent on protocol versions that accept one).
pub fn build_system_instruction(language: ReportLanguage) -> String {
    format!(
        "You are a senior software architect who writes technical reports about GitHub \
         repositories. ABSOLUTE RULES: 1) Start the response directly with '{}' without ANY \
         text before. 2) Use ONLY headers with '## ' followed by UPPERCASE_WITH_UNDERSCORES. \
         3) NEVER use ###, ####, numbering (1., 2.), nor --- as separators. 4) Complete ALL {} \
         mandatory sections with substantial content. 5) {}",
        SectionKey::ArchitecturalSummary.canonical_header(),
        SectionKey::ALL.len(),
        language_instruction(language)
    )
}

/// Build a full generation request.
pub fn build_request(
    snapshot: &RepositorySnapshot,
    language: ReportLanguage,
    params: GenerationParams,
) -> GenerationRequest {
    GenerationRequest {
        prompt: build_prompt(snapshot, language),
        system_instruction: Some(build_system_instruction(language)),
        language,
        params,
    }
}
