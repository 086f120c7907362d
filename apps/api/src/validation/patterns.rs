//! Fixed pattern tables used by the resume text gate.

use once_cell::sync::Lazy;
use regex::Regex;

/// Markers of PDF object structure that should never survive into readable text.
/// One hit is tolerated; genuine resumes occasionally contain a PDF-like token.
const BINARY_PATTERN_SOURCES: &[&str] = &[
    r"(?i)ReportLab",
    r"%PDF-",
    r"/Type\s*/\w+",
    r"stream\s*\n",
    r"endstream",
    r"endobj",
    r"xref",
    r"trailer",
    r"/Filter\s*/",
    r"/Length\s*\d+",
    r"obj\s*<<",
    r"/FontDescriptor",
    r"/BaseFont",
];

/// Independent signals that a text looks like a resume.
/// Word, digit and boundary classes are ASCII-only.
const RESUME_SIGNAL_SOURCES: &[&str] = &[
    // name-like line start
    r"(?m)^[A-Z][a-z]+\s+[A-Z][a-z]+",
    // email
    r"(?i-u)\b[\w.-]+@[\w.-]+\.\w{2,}\b",
    // phone
    r"(?-u:\b)[0-9]{3}[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}(?-u:\b)",
    r"(?i-u)\b(linkedin|github|portfolio)\b",
    r"(?i-u)\b(education|university|college|degree|bachelor|master|phd|b\.?tech|m\.?tech|bsc|msc|mba)\b",
    r"(?i-u)\b(skills?|technologies|tools|languages|frameworks)\b",
    r"(?i-u)\b(projects?|portfolio)\b",
    r"(?i-u)\b(experience|work|intern|internship|employment|job|position|role|company)\b",
    r"(?i-u)\b(certification|certificate|certified|achievement|award|accomplishment)\b",
    r"(?i-u)\b(summary|objective|profile|about)\b",
];

pub static BINARY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| compile(BINARY_PATTERN_SOURCES));

pub static RESUME_SIGNALS: Lazy<Vec<Regex>> = Lazy::new(|| compile(RESUME_SIGNAL_SOURCES));

fn compile(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|source| Regex::new(source).expect("static validation pattern must compile"))
        .collect()
}

/// Number of distinct PDF-structure patterns present in `text`.
pub fn count_binary_patterns(text: &str) -> usize {
    BINARY_PATTERNS.iter().filter(|p| p.is_match(text)).count()
}

/// Number of distinct resume signals present in `text`.
pub fn count_resume_signals(text: &str) -> usize {
    RESUME_SIGNALS.iter().filter(|p| p.is_match(text)).count()
}

/// Characters a resume plausibly contains. Everything else counts as noise.
pub fn is_plausible_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || c.is_whitespace()
        || matches!(
            c,
            '@' | '.' | ',' | ':' | ';' | '(' | ')' | '-' | '+' | '/' | '%' | '#' | '\'' | '"'
                | '!' | '?' | '&'
        )
}

/// A word is meaningful when it starts with a letter or is built only from
/// letters, digits and `@.-+` (emails, versions, phone fragments).
pub fn is_meaningful_word(word: &str) -> bool {
    let starts_with_letter = word.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_with_letter
        || word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '-' | '+'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(BINARY_PATTERNS.len(), 13);
        assert_eq!(RESUME_SIGNALS.len(), 10);
    }

    #[test]
    fn test_stream_keyword_needs_line_break() {
        assert_eq!(count_binary_patterns("upstream stream processing"), 0);
        assert_eq!(count_binary_patterns("stream\n"), 1);
    }

    #[test]
    fn test_email_and_phone_signals() {
        assert_eq!(count_resume_signals("reach me at jane.doe@mail.com"), 1);
        assert_eq!(count_resume_signals("call 555-123-4567"), 1);
    }

    #[test]
    fn test_signal_classes_are_ascii_only() {
        let arabic_indic_phone = "\u{661}\u{662}\u{663}-\u{664}\u{665}\u{666}-\u{667}\u{668}\u{669}\u{660}";
        assert_eq!(count_resume_signals(arabic_indic_phone), 0);
        assert_eq!(count_resume_signals("josé@exämple.com"), 0);
        // Kelvin sign does not case-fold to `k`
        assert_eq!(count_resume_signals("S\u{212A}ILLS"), 0);
        // a non-ASCII letter next to a keyword still leaves a word boundary
        assert_eq!(count_resume_signals("éskills"), 1);
    }

    #[test]
    fn test_name_signal_is_anchored_to_line_start() {
        assert_eq!(count_resume_signals("Jane Doe"), 1);
        assert_eq!(count_resume_signals("hello Jane Doe"), 0);
        assert_eq!(count_resume_signals("hello\nJane Doe"), 1);
    }

    #[test]
    fn test_meaningful_words() {
        assert!(is_meaningful_word("Rust"));
        assert!(is_meaningful_word("2019"));
        assert!(is_meaningful_word("jane@x.com"));
        assert!(is_meaningful_word("+1-555"));
        assert!(!is_meaningful_word("12:30"));
        assert!(!is_meaningful_word("#$%"));
    }

    #[test]
    fn test_plausible_chars() {
        assert!(is_plausible_char('a'));
        assert!(is_plausible_char('#'));
        assert!(is_plausible_char('\n'));
        assert!(!is_plausible_char('~'));
        assert!(!is_plausible_char('\u{fffd}'));
    }
}
