//! Bridge between a settings document and an external editing surface.
//!
//! The surface asks for [`describe_fields`], renders one widget per
//! descriptor, and hands the changed values back to [`commit`]. Persisting the
//! result is the caller's job.

use std::collections::BTreeMap;

use crate::app::domain::document::SettingsDocument;
use crate::app::domain::fields::{
    FieldDescriptor, FieldKey, FieldKind, FieldValue, SCHEMA, TRUE_FALSE, TextRule, is_hidden,
    section_spec,
};
use crate::app::domain::settings::{format_bool, parse_bool};
use crate::app::infrastructure::error::{AppError, Result};

const OTHER_LABEL: &str = "Other";

/// Describe every editable option in `doc`, schema order first.
pub fn describe_fields(doc: &SettingsDocument) -> Vec<FieldDescriptor> {
    let mut out = Vec::new();

    for spec in SCHEMA {
        let Some(section) = doc.section(spec.name) else {
            continue;
        };
        for field in spec.fields {
            if let Some(value) = section.get(field.key) {
                out.push(FieldDescriptor {
                    section: spec.name.to_string(),
                    section_label: spec.label,
                    key: field.key.to_string(),
                    kind: field.kind,
                    current_value: value.to_string(),
                });
            }
        }
        for (key, value) in section.entries() {
            let known = spec.fields.iter().any(|f| f.key == key);
            if known || is_hidden(spec.name, key) {
                continue;
            }
            out.push(FieldDescriptor {
                section: spec.name.to_string(),
                section_label: spec.label,
                key: key.to_string(),
                kind: spec.extra_kind,
                current_value: value.to_string(),
            });
        }
    }

    for section in doc.sections().filter(|s| section_spec(s.name()).is_none()) {
        for (key, value) in section.entries() {
            out.push(FieldDescriptor {
                section: section.name().to_string(),
                section_label: OTHER_LABEL,
                key: key.to_string(),
                kind: FieldKind::Text(TextRule::Any),
                current_value: value.to_string(),
            });
        }
    }

    out
}

/// Apply all edits to a copy of `doc`.
///
/// Either every edit is applied or, on the first bad one, an
/// [`AppError::InvalidFieldValue`] naming it is returned and `doc` is untouched.
pub fn commit(
    edits: &BTreeMap<FieldKey, FieldValue>,
    doc: &SettingsDocument,
) -> Result<SettingsDocument> {
    let mut next = doc.clone();
    for (field, value) in edits {
        let kind = field_kind(doc, &field.section, &field.key).ok_or_else(|| {
            AppError::invalid_field(&field.section, &field.key, "not an editable field")
        })?;
        let stored = normalize(kind, value)
            .map_err(|reason| AppError::invalid_field(&field.section, &field.key, reason))?;
        next.set(&field.section, &field.key, stored);
    }
    tracing::debug!("Committed {} settings edits", edits.len());
    Ok(next)
}

fn field_kind(doc: &SettingsDocument, section: &str, key: &str) -> Option<FieldKind> {
    let key = key.trim().to_ascii_lowercase();
    if is_hidden(section, &key) {
        return None;
    }
    let present = doc.get(section, &key).is_some();
    match section_spec(section) {
        Some(spec) => match spec.fields.iter().find(|f| f.key == key) {
            Some(field) => Some(field.kind),
            None if present => Some(spec.extra_kind),
            None => None,
        },
        None if present => Some(FieldKind::Text(TextRule::Any)),
        None => None,
    }
}

/// Convert a submitted value to its persisted string form.
fn normalize(kind: FieldKind, value: &FieldValue) -> std::result::Result<String, String> {
    match (kind, value) {
        (FieldKind::Text(rule), FieldValue::Text(s)) => {
            let s = s.trim();
            if s.contains(['\n', '\r']) {
                return Err("value must be a single line".to_string());
            }
            match rule {
                TextRule::Any => Ok(s.to_string()),
                TextRule::Path if s.is_empty() => Err("path must not be empty".to_string()),
                TextRule::Path => Ok(s.to_string()),
                TextRule::UnsignedInt => s
                    .parse::<u64>()
                    .map(|n| n.to_string())
                    .map_err(|_| format!("expected a whole number, got '{}'", s)),
            }
        }
        (FieldKind::Text(_), FieldValue::Bool(_)) => {
            Err("expected text, got a boolean".to_string())
        }
        (FieldKind::Boolean, FieldValue::Bool(b)) => Ok(format_bool(*b).to_string()),
        (FieldKind::Boolean, FieldValue::Text(s)) => parse_bool(s)
            .map(|b| format_bool(b).to_string())
            .ok_or_else(|| format!("expected True or False, got '{}'", s.trim())),
        (FieldKind::Choice(options), FieldValue::Text(s)) => options
            .iter()
            .find(|o| o.eq_ignore_ascii_case(s.trim()))
            .map(|o| o.to_string())
            .ok_or_else(|| format!("expected one of {}, got '{}'", options.join(", "), s.trim())),
        (FieldKind::Choice(options), FieldValue::Bool(b)) if options == TRUE_FALSE => {
            Ok(format_bool(*b).to_string())
        }
        (FieldKind::Choice(options), FieldValue::Bool(_)) => {
            Err(format!("expected one of {}", options.join(", ")))
        }
    }
}
