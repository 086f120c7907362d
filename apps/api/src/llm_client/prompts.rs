// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting output rules.

/// Appended to every system prompt: the client renders output as plain text.
pub const PLAIN_TEXT_RULES: &str = "
CRITICAL OUTPUT RULES:
1. Output ONLY plain text - NO markdown formatting whatsoever
2. REMOVE these symbols: *, **, _, __, #, ###, ~~, •, ◦, ▪, ▫, →, ⇒, ←, —
3. Use simple line breaks between sections (no decorative dividers)
4. Use line-separated sentences instead of bullet points
5. Format must be clean and professional, suitable for direct PDF generation
6. ALWAYS output the ENTIRE resume, not just modified sections";

/// Joins a role-specific system prompt with the shared output rules.
pub fn with_plain_text_rules(system: &str) -> String {
    format!("{system}\n{PLAIN_TEXT_RULES}")
}
