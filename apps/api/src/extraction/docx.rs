//! DOCX text extraction. A DOCX file is a ZIP archive whose main body lives in
//! `word/document.xml`; text runs are pulled out of the WordprocessingML markup.

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::Regex;
use zip::result::ZipError;
use zip::ZipArchive;

use super::ExtractionError;

pub const MAIN_DOCUMENT_ENTRY: &str = "word/document.xml";

/// Inflated size cap for the main document part.
const MAX_DOCUMENT_XML_BYTES: u64 = 32 * 1024 * 1024;

static PARAGRAPH_START: Lazy<Regex> = Lazy::new(|| static_regex(r"<w:p(?:\s[^>]*)?/?>"));
static TEXT_RUN: Lazy<Regex> = Lazy::new(|| static_regex(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>"));
static TAB: Lazy<Regex> = Lazy::new(|| static_regex(r"<w:tab\s*/>"));
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| static_regex(r"<w:br(?:\s[^>]*)?/>"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| static_regex(r"<[^>]+>"));
static HORIZONTAL_WHITESPACE: Lazy<Regex> = Lazy::new(|| static_regex(r"[ \t]+"));
static SPACE_AROUND_NEWLINE: Lazy<Regex> = Lazy::new(|| static_regex(r" ?\n ?"));
static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| static_regex(r"\n{3,}"));

fn static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static DOCX pattern must compile")
}

/// Opens the archive and converts its main document part to plain text.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::InvalidArchive(format!("not a ZIP archive ({e})")))?;

    let mut entry = archive.by_name(MAIN_DOCUMENT_ENTRY).map_err(|e| match e {
        ZipError::FileNotFound => {
            ExtractionError::InvalidArchive(format!("{MAIN_DOCUMENT_ENTRY} not found"))
        }
        other => ExtractionError::InvalidArchive(format!(
            "cannot open {MAIN_DOCUMENT_ENTRY} ({other})"
        )),
    })?;

    let raw = read_capped(&mut entry, MAX_DOCUMENT_XML_BYTES)?;

    Ok(xml_to_text(&String::from_utf8_lossy(&raw)))
}

/// Reads at most `limit` bytes; anything larger is rejected, whatever the
/// archive header claims.
fn read_capped(reader: impl Read, limit: u64) -> Result<Vec<u8>, ExtractionError> {
    let mut raw = Vec::new();
    reader.take(limit + 1).read_to_end(&mut raw).map_err(|e| {
        ExtractionError::InvalidArchive(format!("cannot read {MAIN_DOCUMENT_ENTRY} ({e})"))
    })?;

    if raw.len() as u64 > limit {
        return Err(ExtractionError::InvalidArchive(format!(
            "{MAIN_DOCUMENT_ENTRY} is larger than {limit} bytes"
        )));
    }
    Ok(raw)
}

/// Turns WordprocessingML into plain text with a blank line between paragraphs.
pub fn xml_to_text(xml: &str) -> String {
    let text = PARAGRAPH_START.replace_all(xml, "\n\n");
    let text = TAB.replace_all(&text, "\t");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = TEXT_RUN.replace_all(&text, "${1}");
    let text = ANY_TAG.replace_all(&text, "");
    let text = unescape_xml(&text);
    let text = HORIZONTAL_WHITESPACE.replace_all(&text, " ");
    let text = SPACE_AROUND_NEWLINE.replace_all(&text, "\n");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// `&amp;` goes last so `&amp;lt;` stays `&lt;`.
fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
