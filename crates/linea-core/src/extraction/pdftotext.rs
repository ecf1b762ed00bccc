use crate::error::LineaError;
use crate::extraction::WordExtractor;
use crate::model::{Word, WordSet};
use std::io::Write;
use std::process::Command;
use tracing::debug;

/// Word extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox`, which reports every word with its bounding box.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl WordExtractor for PdftotextExtractor {
    fn extract_words(&self, pdf_bytes: &[u8]) -> Result<WordSet, LineaError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| LineaError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| LineaError::Extraction(e.to_string()))?;

        debug!(path = %tmpfile.path().display(), bytes = pdf_bytes.len(), "running pdftotext -bbox");
        let output = Command::new("pdftotext")
            .arg("-bbox")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    LineaError::PdftotextNotFound
                } else {
                    LineaError::Extraction(format!("pdftotext -bbox failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(LineaError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        let words = parse_bbox_xml(&xml)?;
        debug!(
            words = words.total_words(),
            pages = words.total_pages,
            "parsed pdftotext word boxes"
        );
        Ok(words)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Parse `pdftotext -bbox` XHTML into a word set.
///
/// Pages are numbered by their position in the document, so pages without
/// any `<word>` still count towards `total_pages`. A word whose box cannot
/// be read fails the whole document rather than vanishing from it.
fn parse_bbox_xml(xml: &str) -> Result<WordSet, LineaError> {
    let mut words = Vec::new();
    let mut page_number = 0;

    for raw in xml.lines() {
        let line = raw.trim();

        if line.starts_with("<page ") || line == "<page>" {
            page_number += 1;
            continue;
        }

        if line.starts_with("<word ") && page_number > 0 {
            words.push(parse_word(line, page_number, words.len())?);
        }
    }

    Ok(WordSet::new(words, page_number))
}

fn parse_word(word_tag: &str, page_number: usize, idx: usize) -> Result<Word, LineaError> {
    let text = parse_word_text(word_tag)
        .map(|t| decode_xml_entities(&t))
        .ok_or_else(|| LineaError::MalformedInput {
            page: page_number,
            reason: format!("word {} has no closing </word> tag", idx),
        })?;
    let coord = |name: &str| {
        parse_attr_f64(word_tag, name).ok_or_else(|| LineaError::MalformedInput {
            page: page_number,
            reason: format!(
                "word {} ('{}') has a missing or unparsable {}",
                idx, text, name
            ),
        })
    };
    let (x_left, x_right) = (coord("xMin")?, coord("xMax")?);
    let (y_top, y_bottom) = (coord("yMin")?, coord("yMax")?);
    Ok(Word::new(page_number, text, x_left, x_right, y_top, y_bottom))
}

fn parse_attr_f64(tag: &str, name: &str) -> Option<f64> {
    parse_attr(tag, name)?.parse().ok()
}

fn parse_attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!(" {}=\"", name);
    let start = tag.find(&needle)? + needle.len();
    let rest = &tag[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

fn parse_word_text(word_tag: &str) -> Option<String> {
    let start = word_tag.find('>')? + 1;
    let end = word_tag.rfind("</word>")?;
    Some(word_tag.get(start..end)?.to_string())
}

fn decode_xml_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
