//! Heuristic PDF text recovery.
//!
//! This is not a PDF parser. Compressed object streams are never inflated; the
//! raw file is read as Latin-1 and a fixed list of pattern strategies pulls out
//! anything that looks like shown text. Strategies overlap on purpose and the
//! results are deduplicated, so the output order is first-seen byte order, not
//! visual reading order.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::ExtractionError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Above this share of implausible characters the output is treated as garbage.
const MAX_NOISE_RATIO: f64 = 0.35;

/// Longest hex literal (in digits) still considered to be text.
const MAX_HEX_DIGITS: usize = 500;

const SECTION_HEADERS: &[&str] = &[
    "SUMMARY",
    "OBJECTIVE",
    "EXPERIENCE",
    "EDUCATION",
    "SKILLS",
    "PROJECTS",
    "ACHIEVEMENTS",
    "CERTIFICATIONS",
    "CONTACT",
    "PROFILE",
    "ABOUT",
];

/// Generator signatures and stray structure keywords removed from the output.
const BOILERPLATE: &[&str] = &[
    r"(?i)ReportLab Generated PDF document",
    r"(?i)www\.reportlab\.com",
    r"(?i)\bstream\b",
    r"(?i)\bendobj\b",
];

static TEXT_BLOCK: Lazy<Regex> = Lazy::new(|| static_regex(r"(?s)BT\s*(.*?)\s*ET"));
static SHOW_STRING: Lazy<Regex> = Lazy::new(|| static_regex(r"\(([^)]*)\)\s*Tj"));
static SHOW_ARRAY: Lazy<Regex> =
    Lazy::new(|| static_regex(r"(?i)\[((?:[^\[\]]*|\([^)]*\))*)\]\s*TJ"));
static ARRAY_STRING: Lazy<Regex> = Lazy::new(|| static_regex(r"\(([^)]*)\)"));
static DIRECT_SHOW: Lazy<Regex> =
    Lazy::new(|| static_regex(r"\(([^()\\]*(?:\\.[^()\\]*)*)\)\s*Tj"));
static ASCII_RUN: Lazy<Regex> =
    Lazy::new(|| static_regex(r#"\(([A-Za-z][A-Za-z0-9\s.,@\-+:;'"/()]{2,})\)"#));
static HEX_LITERAL: Lazy<Regex> = Lazy::new(|| static_regex(r"<([0-9A-Fa-f\s]+)>"));
static TWO_LETTERS: Lazy<Regex> = Lazy::new(|| static_regex(r"[A-Za-z]{2,}"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| static_regex(r"\s+"));
static HORIZONTAL_WHITESPACE: Lazy<Regex> = Lazy::new(|| static_regex(r"[^\S\n]+"));
static SPACE_AROUND_NEWLINE: Lazy<Regex> = Lazy::new(|| static_regex(r" ?\n ?"));
static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| static_regex(r"\n{3,}"));

static BOILERPLATE_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| BOILERPLATE.iter().map(|p| static_regex(p)).collect());

static SECTION_HEADER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    SECTION_HEADERS
        .iter()
        .map(|h| static_regex(&format!(r"(?i)\s+({h}:?)\s+")))
        .collect()
});

fn static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static PDF pattern must compile")
}

/// Which strategy recovered a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentSource {
    /// `Tj`/`TJ` operands inside a `BT ... ET` text object.
    TextBlock,
    /// `Tj` operands found anywhere, for text objects with broken wrapping.
    DirectShow,
    /// Parenthesised runs of resume-plausible ASCII.
    AsciiRun,
    /// `<...>` hex string literals.
    HexLiteral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    pub text: String,
    pub source: FragmentSource,
}

impl TextFragment {
    fn new(text: impl Into<String>, source: FragmentSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

/// A candidate extractor run over the Latin-1 view of the file.
pub trait FragmentStrategy: Sync {
    fn source(&self) -> FragmentSource;
    fn extract(&self, content: &str) -> Vec<TextFragment>;
}

pub struct TextBlockStrategy;
pub struct DirectShowStrategy;
pub struct AsciiRunStrategy;
pub struct HexLiteralStrategy;

/// Run order matters only for the order of first sightings.
pub const STRATEGIES: &[&dyn FragmentStrategy] = &[
    &TextBlockStrategy,
    &DirectShowStrategy,
    &AsciiRunStrategy,
    &HexLiteralStrategy,
];

impl FragmentStrategy for TextBlockStrategy {
    fn source(&self) -> FragmentSource {
        FragmentSource::TextBlock
    }

    fn extract(&self, content: &str) -> Vec<TextFragment> {
        let mut fragments = Vec::new();
        for block in TEXT_BLOCK.captures_iter(content) {
            let block = &block[1];

            for shown in SHOW_STRING.captures_iter(block) {
                let decoded = decode_pdf_string(&shown[1]);
                if !decoded.is_empty() {
                    fragments.push(TextFragment::new(decoded, self.source()));
                }
            }

            for array in SHOW_ARRAY.captures_iter(block) {
                for item in ARRAY_STRING.captures_iter(&array[1]) {
                    let decoded = decode_pdf_string(&item[1]);
                    if !decoded.is_empty() {
                        fragments.push(TextFragment::new(decoded, self.source()));
                    }
                }
            }
        }
        fragments
    }
}

impl FragmentStrategy for DirectShowStrategy {
    fn source(&self) -> FragmentSource {
        FragmentSource::DirectShow
    }

    fn extract(&self, content: &str) -> Vec<TextFragment> {
        DIRECT_SHOW
            .captures_iter(content)
            .map(|m| decode_pdf_string(&m[1]))
            .filter(|decoded| decoded.chars().any(|c| c.is_ascii_alphabetic()))
            .map(|decoded| TextFragment::new(decoded, self.source()))
            .collect()
    }
}

impl FragmentStrategy for AsciiRunStrategy {
    fn source(&self) -> FragmentSource {
        FragmentSource::AsciiRun
    }

    fn extract(&self, content: &str) -> Vec<TextFragment> {
        ASCII_RUN
            .captures_iter(content)
            .map(|m| m[1].trim().to_string())
            .filter(|text| text.len() >= 2 && TWO_LETTERS.is_match(text))
            .map(|text| TextFragment::new(text, self.source()))
            .collect()
    }
}

impl FragmentStrategy for HexLiteralStrategy {
    fn source(&self) -> FragmentSource {
        FragmentSource::HexLiteral
    }

    fn extract(&self, content: &str) -> Vec<TextFragment> {
        HEX_LITERAL
            .captures_iter(content)
            .filter_map(|m| decode_hex_literal(&m[1]))
            .map(|text| TextFragment::new(text, self.source()))
            .collect()
    }
}

/// Decodes the body of a `<...>` literal, keeping printable ASCII only.
fn decode_hex_literal(raw: &str) -> Option<String> {
    let digits: Vec<u8> = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .filter_map(|c| u8::try_from(c).ok())
        .collect();
    if digits.len() < 4 || digits.len() % 2 != 0 || digits.len() > MAX_HEX_DIGITS {
        return None;
    }

    let decoded: String = digits
        .chunks(2)
        .filter_map(|pair| std::str::from_utf8(pair).ok())
        .filter_map(|pair| u8::from_str_radix(pair, 16).ok())
        .filter(|byte| (32..127).contains(byte))
        .map(char::from)
        .collect();

    (decoded.len() >= 2 && TWO_LETTERS.is_match(&decoded)).then_some(decoded)
}

/// Applies PDF literal-string escapes: `\n \r \t \\`, `\ddd` octal, and `\x` → `x`
/// for anything else. Control characters become spaces and the result is trimmed.
pub fn decode_pdf_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(d @ '0'..='7') => {
                let mut code = d.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(next) => {
                            code = code * 8 + next;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code).unwrap_or(' '));
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out.chars()
        .map(|c| if c.is_ascii_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Runs every strategy in order and collects the raw fragments.
pub fn collect_fragments(content: &str) -> Vec<TextFragment> {
    let mut fragments = Vec::new();
    for strategy in STRATEGIES {
        let found = strategy.extract(content);
        debug!(source = ?strategy.source(), count = found.len(), "PDF strategy finished");
        fragments.extend(found);
    }
    fragments
}

/// Case-insensitive exact dedup, first sighting wins.
pub fn dedup_fragments(fragments: Vec<TextFragment>) -> Vec<String> {
    let mut seen = HashSet::new();
    fragments
        .into_iter()
        .map(|f| f.text.trim().to_string())
        .filter(|text| !text.is_empty() && seen.insert(text.to_lowercase()))
        .collect()
}

/// Extracts best-effort plain text from raw PDF bytes.
///
/// No length floor is applied here; callers decide what is long enough.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ExtractionError::NotAPdf);
    }

    // Latin-1: every byte maps to the code point of the same value.
    let content: String = bytes.iter().map(|&b| char::from(b)).collect();

    let fragments = collect_fragments(&content);
    let unique = dedup_fragments(fragments);
    debug!(fragments = unique.len(), "PDF fragments after dedup");

    let text = assemble(&unique.join(" "));

    if noise_ratio(&text) > MAX_NOISE_RATIO {
        return Err(ExtractionError::CorruptedOutput);
    }

    Ok(text)
}

/// Whitespace cleanup, boilerplate removal and section-break insertion.
fn assemble(joined: &str) -> String {
    let mut text = WHITESPACE.replace_all(joined, " ").replace('\0', "");

    for pattern in BOILERPLATE_PATTERNS.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }

    for pattern in SECTION_HEADER_PATTERNS.iter() {
        text = pattern.replace_all(&text, "\n\n${1}\n").into_owned();
    }

    let text = HORIZONTAL_WHITESPACE.replace_all(&text, " ");
    let text = SPACE_AROUND_NEWLINE.replace_all(&text, "\n");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

fn noise_ratio(text: &str) -> f64 {
    let total = text.chars().count().max(1);
    let noise = text.chars().filter(|c| !is_pdf_text_char(*c)).count();
    noise as f64 / total as f64
}

fn is_pdf_text_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || c.is_whitespace()
        || matches!(
            c,
            '@' | '.' | ',' | ':' | ';' | '(' | ')' | '-' | '+' | '/' | '%' | '\'' | '"' | '!'
                | '?' | '&'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_pdf(content_stream: &str) -> Vec<u8> {
        format!(
            "%PDF-1.4\n1 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n%%EOF\n",
            content_stream.len(),
            content_stream
        )
        .into_bytes()
    }

    #[test]
    fn test_rejects_missing_magic() {
        assert_eq!(
            extract_text(b"Hello, this is not a PDF at all (John Smith) Tj"),
            Err(ExtractionError::NotAPdf)
        );
        assert_eq!(extract_text(b""), Err(ExtractionError::NotAPdf));
        assert_eq!(extract_text(b"%PD"), Err(ExtractionError::NotAPdf));
    }

    #[test]
    fn test_single_text_object() {
        let pdf = minimal_pdf("BT /F1 12 Tf 72 712 Td (John Smith) Tj ET");
        assert_eq!(extract_text(&pdf).unwrap(), "John Smith");
    }

    #[test]
    fn test_tj_array_strings_are_collected() {
        let block = "BT [(Senior) -250 (Engineer)] TJ ET";
        let fragments = TextBlockStrategy.extract(block);
        let texts: Vec<_> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Senior", "Engineer"]);
        assert!(fragments
            .iter()
            .all(|f| f.source == FragmentSource::TextBlock));
    }

    #[test]
    fn test_direct_show_outside_text_object() {
        let fragments = DirectShowStrategy.extract("q (Jane\\(Doe\\)) Tj Q (1234) Tj");
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "Jane(Doe)");
    }

    #[test]
    fn test_ascii_run_requires_two_letters() {
        assert!(AsciiRunStrategy.extract("(a1 2 3)").is_empty());
        let found = AsciiRunStrategy.extract("(Rust, Go, SQL)");
        assert_eq!(found[0].text, "Rust, Go, SQL");
    }

    #[test]
    fn test_hex_literal_decoding() {
        let found = HexLiteralStrategy.extract("<4A6F 686E> <0001> <4A6>");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "John");
        assert_eq!(found[0].source, FragmentSource::HexLiteral);
    }

    #[test]
    fn test_hex_literal_length_limit() {
        let long = format!("<{}>", "41".repeat(251));
        assert!(HexLiteralStrategy.extract(&long).is_empty());
        let fits = format!("<{}>", "41".repeat(250));
        assert_eq!(HexLiteralStrategy.extract(&fits).len(), 1);
    }

    #[test]
    fn test_decode_pdf_string_escapes() {
        assert_eq!(decode_pdf_string(r"Line\nBreak"), "Line Break");
        assert_eq!(decode_pdf_string(r"\101\102C"), "ABC");
        assert_eq!(decode_pdf_string(r"caf\351"), "café");
        assert_eq!(decode_pdf_string(r"a\\b"), r"a\b");
        assert_eq!(decode_pdf_string(r"\(x\)"), "(x)");
        assert_eq!(decode_pdf_string("  padded\u{1}  "), "padded");
        assert_eq!(decode_pdf_string(r"\0101"), "1");
    }

    #[test]
    fn test_dedup_is_case_insensitive_and_ordered() {
        let fragments = vec![
            TextFragment::new("Rust", FragmentSource::TextBlock),
            TextFragment::new("Go", FragmentSource::TextBlock),
            TextFragment::new("RUST", FragmentSource::AsciiRun),
            TextFragment::new("  ", FragmentSource::HexLiteral),
            TextFragment::new("go ", FragmentSource::DirectShow),
        ];
        assert_eq!(dedup_fragments(fragments), vec!["Rust", "Go"]);
    }

    #[test]
    fn test_section_headers_get_breaks() {
        let pdf = minimal_pdf(
            "BT (Jane Doe) Tj ET BT (EXPERIENCE) Tj ET BT (Staff Engineer at Initech) Tj ET \
             BT (Education:) Tj ET BT (MIT) Tj ET",
        );
        let text = extract_text(&pdf).unwrap();
        assert!(text.starts_with("Jane Doe\n\nEXPERIENCE\nStaff Engineer at Initech"));
        assert!(text.contains("\n\nEducation:\nMIT"));
    }

    #[test]
    fn test_boilerplate_is_removed() {
        let pdf = minimal_pdf(
            "BT (ReportLab Generated PDF document http://www.reportlab.com) Tj ET \
             BT (Jane Doe) Tj ET",
        );
        let text = extract_text(&pdf).unwrap();
        assert!(!text.to_lowercase().contains("reportlab"));
        assert!(text.contains("Jane Doe"));
    }

    #[test]
    fn test_noisy_output_is_rejected() {
        let pdf = minimal_pdf("BT (Ab~~~~~~~~~~~~~~~~~~) Tj ET");
        assert_eq!(extract_text(&pdf), Err(ExtractionError::CorruptedOutput));
    }

    #[test]
    fn test_strategies_run_in_fixed_order() {
        let sources: Vec<_> = STRATEGIES.iter().map(|s| s.source()).collect();
        assert_eq!(
            sources,
            vec![
                FragmentSource::TextBlock,
                FragmentSource::DirectShow,
                FragmentSource::AsciiRun,
                FragmentSource::HexLiteral,
            ]
        );
    }
}
