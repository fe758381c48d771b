//! Text Normalizer — strips document-format artifacts and exposes a plain-text
//! view of a résumé. Line structure is preserved well enough that the first
//! non-empty line can serve as a name guess; nothing here depends on columns
//! or layout surviving extraction.

use tracing::warn;

/// Extracts plain text from PDF bytes. A document that cannot be decoded
/// yields an empty string — downstream rules then take their defaults and the
/// record is created low-confidence rather than failing the upload.
pub fn pdf_to_text(bytes: &[u8]) -> String {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => normalize(&text),
        Err(e) => {
            warn!("PDF text extraction failed, falling back to empty text: {e}");
            String::new()
        }
    }
}

/// Normalizes a raw text blob: unified line endings, control characters
/// dropped, trailing per-line whitespace trimmed.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let cleaned: String = unified
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();
    cleaned
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// First non-empty line, truncated to `max_len` characters. Returns `None`
/// when the text has no usable line at all.
pub fn first_line(text: &str, max_len: usize) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(|l| l.chars().take(max_len).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_unifies_line_endings() {
        assert_eq!(normalize("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_normalize_strips_control_chars_keeps_structure() {
        let text = "Jane\u{0} Doe\n\tDesigner  ";
        assert_eq!(normalize(text), "Jane Doe\n\tDesigner");
    }

    #[test]
    fn test_first_line_skips_blank_lines() {
        let text = "\n\n  Jane Doe\nSenior Designer";
        assert_eq!(first_line(text, 60).as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_first_line_truncates() {
        let text = "abcdefghij";
        assert_eq!(first_line(text, 4).as_deref(), Some("abcd"));
    }

    #[test]
    fn test_first_line_none_for_empty_text() {
        assert_eq!(first_line("   \n \n", 60), None);
    }

    #[test]
    fn test_garbage_pdf_bytes_yield_empty_text() {
        assert_eq!(pdf_to_text(b"definitely not a pdf"), "");
    }
}
