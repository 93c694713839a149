//! Reader and writer for the `[SECTION] key = value` settings format.

use crate::app::domain::document::{SettingsDocument, normalize_option};
use crate::app::infrastructure::error::{AppError, Result};

/// Parse INI text into a document.
///
/// Comment lines start with `#` or `;`. Both `=` and `:` are accepted as
/// delimiters. A repeated option keeps the last value. Text after the last
/// `]` of a section header is ignored.
pub fn parse(text: &str) -> Result<SettingsDocument> {
    let mut doc = SettingsDocument::new();
    let mut current: Option<String> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let end = rest.rfind(']').ok_or_else(|| AppError::SettingsParse {
                line: line_no,
                message: format!("unterminated section header '{}'", line),
            })?;
            let name = rest[..end].trim();
            if name.is_empty() {
                return Err(AppError::SettingsParse {
                    line: line_no,
                    message: "empty section name".to_string(),
                });
            }
            doc.section_mut(name);
            current = Some(name.to_string());
            continue;
        }

        let Some(section) = current.as_deref() else {
            return Err(AppError::SettingsParse {
                line: line_no,
                message: "option found before any section header".to_string(),
            });
        };

        let split_at = line.find(['=', ':']).ok_or_else(|| AppError::SettingsParse {
            line: line_no,
            message: format!("expected 'key = value', found '{}'", line),
        })?;
        let (key, value) = line.split_at(split_at);
        let key = normalize_option(key);
        if key.is_empty() {
            return Err(AppError::SettingsParse {
                line: line_no,
                message: "empty option name".to_string(),
            });
        }

        let value = value[1..].trim();
        if let Some(previous) = doc.set(section, &key, value) {
            tracing::warn!(
                "Duplicate option '{}' in section '{}' (line {}); replacing '{}'",
                key,
                section,
                line_no,
                previous
            );
        }
    }

    Ok(doc)
}

/// Check that an entry survives a render/parse round trip unchanged.
///
/// Section names may not contain `]`, option names may not contain a
/// delimiter or start like a comment or header, and nothing may span lines.
/// Values are compared after trimming, as [`parse`] trims them.
pub fn check_entry(section: &str, option: &str, value: &str) -> Result<()> {
    let reject = |reason: &str| Err(AppError::invalid_field(section, option, reason));
    let multiline = |s: &str| s.contains(['\n', '\r']);

    if section.trim().is_empty() || section.trim() != section {
        return reject("section name must be non-empty without surrounding spaces");
    }
    if section.contains(']') || multiline(section) {
        return reject("section name must not contain ']' or line breaks");
    }
    let key = option.trim();
    if key.is_empty() {
        return reject("option name must not be empty");
    }
    if key.contains(['=', ':']) || multiline(key) {
        return reject("option name must not contain '=', ':' or line breaks");
    }
    if key.starts_with(['#', ';', '[']) {
        return reject("option name must not start with '#', ';' or '['");
    }
    if multiline(value) {
        return reject("value must be a single line");
    }
    Ok(())
}

/// Render a document. Output depends only on the document, so rendering the
/// same document twice yields identical bytes.
pub fn render(doc: &SettingsDocument) -> String {
    let mut out = String::new();
    for section in doc.sections() {
        out.push('[');
        out.push_str(section.name());
        out.push_str("]\n");
        for (key, value) in section.entries() {
            out.push_str(key);
            out.push_str(" = ");
            out.push_str(value);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}
