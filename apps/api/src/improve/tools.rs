//! Improvement tools and the fixed lookup tables offered to the client.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::improve::prompts::*;
use crate::llm_client::prompts::with_plain_text_rules;
use crate::llm_client::PromptPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImprovementTool {
    Wording,
    Ats,
    Keywords,
    Grammar,
    Bullets,
    Summary,
    Skills,
    Matching,
}

impl ImprovementTool {
    pub const ALL: [ImprovementTool; 8] = [
        ImprovementTool::Wording,
        ImprovementTool::Ats,
        ImprovementTool::Keywords,
        ImprovementTool::Grammar,
        ImprovementTool::Bullets,
        ImprovementTool::Summary,
        ImprovementTool::Skills,
        ImprovementTool::Matching,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ImprovementTool::Wording => "wording",
            ImprovementTool::Ats => "ats",
            ImprovementTool::Keywords => "keywords",
            ImprovementTool::Grammar => "grammar",
            ImprovementTool::Bullets => "bullets",
            ImprovementTool::Summary => "summary",
            ImprovementTool::Skills => "skills",
            ImprovementTool::Matching => "matching",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ImprovementTool::Wording => "Resume Wording Improver",
            ImprovementTool::Ats => "ATS Score Analyzer",
            ImprovementTool::Keywords => "Keyword Optimizer",
            ImprovementTool::Grammar => "Grammar & Clarity Enhancer",
            ImprovementTool::Bullets => "Bullet Point Strengthener",
            ImprovementTool::Summary => "Resume Summary Generator",
            ImprovementTool::Skills => "Skills Recommendation",
            ImprovementTool::Matching => "Job Role Matching",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ImprovementTool::Wording => "Rewrite with powerful action verbs",
            ImprovementTool::Ats => "Get your ATS compatibility score",
            ImprovementTool::Keywords => "Find and add missing keywords",
            ImprovementTool::Grammar => "Polish your writing",
            ImprovementTool::Bullets => "Create impactful bullet points",
            ImprovementTool::Summary => "Craft compelling summaries",
            ImprovementTool::Skills => "Discover skills to add",
            ImprovementTool::Matching => "See how well you match",
        }
    }

    /// (system intro, extra system guidelines, user template)
    fn templates(self) -> (&'static str, Option<&'static str>, &'static str) {
        match self {
            ImprovementTool::Wording => (WORDING_SYSTEM, Some(WORDING_GUIDELINES), WORDING_USER),
            ImprovementTool::Ats => (ATS_SYSTEM, None, ATS_USER),
            ImprovementTool::Keywords => (KEYWORDS_SYSTEM, None, KEYWORDS_USER),
            ImprovementTool::Grammar => (GRAMMAR_SYSTEM, None, GRAMMAR_USER),
            ImprovementTool::Bullets => (BULLETS_SYSTEM, None, BULLETS_USER),
            ImprovementTool::Summary => (SUMMARY_SYSTEM, None, SUMMARY_USER),
            ImprovementTool::Skills => (SKILLS_SYSTEM, None, SKILLS_USER),
            ImprovementTool::Matching => (MATCHING_SYSTEM, None, MATCHING_USER),
        }
    }
}

impl fmt::Display for ImprovementTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTool(pub String);

impl FromStr for ImprovementTool {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ImprovementTool::ALL
            .into_iter()
            .find(|tool| tool.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTool(wanted.to_string()))
    }
}

/// Targeting details that parameterise every prompt.
#[derive(Debug, Clone, Copy)]
pub struct Targeting<'a> {
    pub job_role: &'a str,
    pub industry: &'a str,
    pub experience_level: &'a str,
}

/// Builds the system/user prompt pair for `tool`.
pub fn build_prompts(tool: ImprovementTool, targeting: Targeting<'_>, resume: &str) -> PromptPair {
    let (intro, guidelines, user) = tool.templates();
    let vars = [
        ("job_role", targeting.job_role),
        ("industry", targeting.industry),
        ("experience_level", targeting.experience_level),
        ("resume", resume),
    ];

    let mut system = with_plain_text_rules(intro);
    if let Some(guidelines) = guidelines {
        system.push('\n');
        system.push_str(&render(guidelines, &vars));
    }

    PromptPair {
        system,
        user: render(user, &vars),
    }
}

/// Single-pass `{name}` substitution, so substituted values are never rescanned.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            vars.iter()
                .find(|(name, _)| *name == &after[..close])
                .map(|(_, value)| (close, *value))
        });
        match value {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceLevel {
    pub value: &'static str,
    pub label: &'static str,
}

pub const JOB_ROLES: &[&str] = &[
    "Software Engineer",
    "Product Manager",
    "Data Scientist",
    "UX Designer",
    "Marketing Manager",
    "Sales Representative",
    "Project Manager",
    "Business Analyst",
    "DevOps Engineer",
    "Full Stack Developer",
    "Other",
];

pub const INDUSTRIES: &[&str] = &[
    "Technology",
    "Finance",
    "Healthcare",
    "Education",
    "E-commerce",
    "Manufacturing",
    "Consulting",
    "Media & Entertainment",
    "Real Estate",
    "Other",
];

pub const EXPERIENCE_LEVELS: &[ExperienceLevel] = &[
    ExperienceLevel {
        value: "student",
        label: "Student",
    },
    ExperienceLevel {
        value: "fresher",
        label: "Fresher",
    },
    ExperienceLevel {
        value: "professional",
        label: "Professional",
    },
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub tools: Vec<ToolInfo>,
    pub job_roles: &'static [&'static str],
    pub industries: &'static [&'static str],
    pub experience_levels: &'static [ExperienceLevel],
}

pub fn catalog() -> Catalog {
    Catalog {
        tools: ImprovementTool::ALL
            .into_iter()
            .map(|tool| ToolInfo {
                id: tool.id(),
                title: tool.title(),
                description: tool.description(),
            })
            .collect(),
        job_roles: JOB_ROLES,
        industries: INDUSTRIES,
        experience_levels: EXPERIENCE_LEVELS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGETING: Targeting<'static> = Targeting {
        job_role: "DevOps Engineer",
        industry: "Finance",
        experience_level: "professional",
    };

    #[test]
    fn test_tool_ids_round_trip_through_from_str() {
        for tool in ImprovementTool::ALL {
            assert_eq!(tool.id().parse::<ImprovementTool>(), Ok(tool));
        }
        assert_eq!(" ATS ".parse::<ImprovementTool>(), Ok(ImprovementTool::Ats));
    }

    #[test]
    fn test_unknown_tool() {
        assert_eq!(
            "rewrite-everything".parse::<ImprovementTool>(),
            Err(UnknownTool("rewrite-everything".to_string()))
        );
    }

    #[test]
    fn test_every_system_prompt_carries_plain_text_rules() {
        for tool in ImprovementTool::ALL {
            let prompts = build_prompts(tool, TARGETING, "Jane Doe resume");
            assert!(prompts.system.contains("CRITICAL OUTPUT RULES"), "{tool}");
            assert!(prompts.user.contains("Jane Doe resume"), "{tool}");
            assert!(!prompts.user.contains("{resume}"), "{tool}");
        }
    }

    #[test]
    fn test_wording_prompt_is_targeted() {
        let prompts = build_prompts(ImprovementTool::Wording, TARGETING, "resume");
        assert!(prompts
            .system
            .contains("Tailor language for DevOps Engineer in Finance"));
        assert!(prompts.system.contains("Adjust tone for professional level"));
    }

    #[test]
    fn test_summary_prompt_mentions_level_and_role() {
        let prompts = build_prompts(ImprovementTool::Summary, TARGETING, "resume");
        assert!(prompts
            .user
            .starts_with("Create 2-3 powerful professional summary variations for a professional level DevOps Engineer in Finance."));
    }

    #[test]
    fn test_render_does_not_rescan_substituted_values() {
        let out = render(
            "{a} and {b} and {missing}",
            &[("a", "{b}"), ("b", "B")],
        );
        assert_eq!(out, "{b} and B and {missing}");
    }

    #[test]
    fn test_render_keeps_unbalanced_braces() {
        assert_eq!(render("score {X", &[("X", "1")]), "score {X");
    }

    #[test]
    fn test_catalog_tables() {
        let catalog = catalog();
        assert_eq!(catalog.tools.len(), 8);
        assert_eq!(catalog.tools[1].id, "ats");
        assert_eq!(catalog.job_roles.len(), 11);
        assert_eq!(catalog.industries.last(), Some(&"Other"));
        assert_eq!(catalog.experience_levels[0].value, "student");
    }
}
