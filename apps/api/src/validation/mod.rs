//! Resume text gate: decides whether pasted or extracted text is usable resume
//! content or leaked binary noise.
//!
//! Checks run in a fixed order and the first failure wins. The function is pure,
//! so identical input always yields the identical verdict.

pub mod patterns;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use patterns::{count_binary_patterns, count_resume_signals, is_meaningful_word, is_plausible_char};

/// Tunable thresholds of the gate. The defaults are empirical and kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Minimum trimmed length in characters.
    pub min_chars: usize,
    /// Rejection fires at this many distinct PDF-structure matches.
    pub binary_pattern_limit: usize,
    pub min_resume_signals: usize,
    /// Maximum share of non-resume characters over the whole text.
    pub max_noise_ratio: f64,
    pub min_meaningful_ratio: f64,
    /// The gibberish check only applies above this word count.
    pub min_words_for_gibberish: usize,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_chars: 30,
            binary_pattern_limit: 3,
            min_resume_signals: 2,
            max_noise_ratio: 0.4,
            min_meaningful_ratio: 0.4,
            min_words_for_gibberish: 10,
        }
    }
}

/// Why a text was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    #[error("Resume text is too short or empty")]
    TooShort,
    #[error("Text contains PDF binary data or metadata")]
    ContainsBinaryData,
    #[error("Text contains too many special characters")]
    TooManySpecialChars,
    #[error("Text lacks identifiable resume sections")]
    LacksResumeSections,
    #[error("Text appears to be corrupted or unreadable")]
    Gibberish,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Rejection>,
}

impl Verdict {
    fn accept() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    fn reject(reason: Rejection) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }

    pub fn into_result(self) -> Result<(), Rejection> {
        match self.reason {
            Some(reason) => Err(reason),
            None => Ok(()),
        }
    }
}

/// Classifies `text` as plausible resume content or rejects it with a reason.
pub fn validate_resume_text(text: &str, policy: &ValidationPolicy) -> Verdict {
    match check(text, policy) {
        Ok(()) => Verdict::accept(),
        Err(reason) => Verdict::reject(reason),
    }
}

fn check(text: &str, policy: &ValidationPolicy) -> Result<(), Rejection> {
    if text.trim().chars().count() < policy.min_chars {
        return Err(Rejection::TooShort);
    }

    if count_binary_patterns(text) >= policy.binary_pattern_limit {
        return Err(Rejection::ContainsBinaryData);
    }

    let total = text.chars().count();
    let noise = text.chars().filter(|c| !is_plausible_char(*c)).count();
    if noise as f64 / total as f64 > policy.max_noise_ratio {
        return Err(Rejection::TooManySpecialChars);
    }

    if count_resume_signals(text) < policy.min_resume_signals {
        return Err(Rejection::LacksResumeSections);
    }

    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().count() > 1)
        .collect();
    let meaningful = words.iter().filter(|w| is_meaningful_word(w)).count();
    if words.len() > policy.min_words_for_gibberish
        && (meaningful as f64 / words.len() as f64) < policy.min_meaningful_ratio
    {
        return Err(Rejection::Gibberish);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "Jane Doe\n\
        jane.doe@example.com | 555-123-4567 | linkedin.com/in/janedoe\n\
        SUMMARY\nBackend engineer with 6 years of experience building APIs.\n\
        EXPERIENCE\nSenior Engineer, Acme Corp (2019 - present)\n\
        Reduced p99 latency by 40% across 12 services.\n\
        EDUCATION\nBSc Computer Science, State University\n\
        SKILLS\nRust, Go, PostgreSQL, Kubernetes";

    fn verdict(text: &str) -> Verdict {
        validate_resume_text(text, &ValidationPolicy::default())
    }

    #[test]
    fn test_accepts_realistic_resume() {
        assert_eq!(verdict(SAMPLE_RESUME), Verdict::accept());
    }

    #[test]
    fn test_contact_education_skills_line_is_accepted() {
        let text = "Contact: john@x.com Education: BSc Computer Science Skills: Python, SQL";
        let v = verdict(text);
        assert!(v.valid);
        assert!(v.reason.is_none());
    }

    #[test]
    fn test_empty_text_is_too_short() {
        assert_eq!(verdict("").reason, Some(Rejection::TooShort));
        assert_eq!(verdict("   \n\t  ").reason, Some(Rejection::TooShort));
    }

    #[test]
    fn test_length_boundary() {
        let short = "John Smith\nSkills: Python, SQ";
        assert_eq!(short.chars().count(), 29);
        assert_eq!(verdict(short).reason, Some(Rejection::TooShort));

        let exact = "John Smith\nSkills: Python, SQL";
        assert_eq!(exact.chars().count(), 30);
        assert!(verdict(exact).valid);
    }

    #[test]
    fn test_length_is_measured_after_trimming() {
        let padded = format!("   {}   ", "John Smith\nSkills: Python, SQ");
        assert_eq!(verdict(&padded).reason, Some(Rejection::TooShort));
    }

    #[test]
    fn test_pdf_metadata_is_rejected() {
        let text = "%PDF-1.4 /Type /Catalog stream endstream endobj xref trailer";
        let v = verdict(text);
        assert!(!v.valid);
        assert_eq!(v.reason, Some(Rejection::ContainsBinaryData));
        assert_eq!(
            v.reason.unwrap().to_string(),
            "Text contains PDF binary data or metadata"
        );
    }

    #[test]
    fn test_binary_keywords_flip_verdict_at_threshold() {
        let mut text = SAMPLE_RESUME.to_string();
        let mut previous = count_binary_patterns(&text);
        assert_eq!(previous, 0);

        for keyword in ["endobj", "xref"] {
            text.push(' ');
            text.push_str(keyword);
            let current = count_binary_patterns(&text);
            assert!(current > previous);
            previous = current;
            assert!(verdict(&text).valid, "still tolerated after {keyword}");
        }

        text.push_str(" trailer");
        assert_eq!(count_binary_patterns(&text), 3);
        assert_eq!(verdict(&text).reason, Some(Rejection::ContainsBinaryData));
    }

    #[test]
    fn test_noise_characters_are_rejected() {
        let text = format!("John Smith Skills {}", "~".repeat(40));
        assert_eq!(verdict(&text).reason, Some(Rejection::TooManySpecialChars));
    }

    #[test]
    fn test_plain_prose_lacks_resume_sections() {
        let text = "The quick brown fox jumps over the lazy dog near the river bank";
        assert_eq!(verdict(text).reason, Some(Rejection::LacksResumeSections));
    }

    #[test]
    fn test_single_signal_is_not_enough() {
        let text = "my skills are many and varied but nothing else is here";
        assert_eq!(count_resume_signals(text), 1);
        assert_eq!(verdict(text).reason, Some(Rejection::LacksResumeSections));
    }

    #[test]
    fn test_gibberish_words_are_rejected() {
        let text = format!("John Smith\nSkills Education\n{}", "12:30 ".repeat(20));
        assert_eq!(verdict(&text).reason, Some(Rejection::Gibberish));
    }

    #[test]
    fn test_gibberish_check_needs_more_than_ten_words() {
        let text = "John Smith\nSkills 12:30 12:30 12:30 12:30 12:30 12:30";
        assert!(verdict(text).valid);
    }

    #[test]
    fn test_validation_is_deterministic() {
        for text in [SAMPLE_RESUME, "garbage", "%PDF-1.4 endobj xref trailer 1234567890"] {
            assert_eq!(verdict(text), verdict(text));
        }
    }

    #[test]
    fn test_custom_policy_thresholds() {
        let strict = ValidationPolicy {
            min_resume_signals: 8,
            ..ValidationPolicy::default()
        };
        let text = "Contact: john@x.com Education: BSc Computer Science Skills: Python, SQL";
        assert_eq!(
            validate_resume_text(text, &strict).reason,
            Some(Rejection::LacksResumeSections)
        );
    }

    #[test]
    fn test_into_result() {
        assert!(verdict(SAMPLE_RESUME).into_result().is_ok());
        assert_eq!(verdict("short").into_result(), Err(Rejection::TooShort));
    }
}
