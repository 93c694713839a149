//! Metadata for the editable settings fields.
//!
//! The kind of each field is fixed here, at the data level, so an editing
//! surface only has to pick a widget per [`FieldKind`].

use crate::app::domain::settings::{SECTION_ABOUT, SECTION_APP, SECTION_LOGGING, SECTION_MODULES};

pub const LOG_LEVELS: &[&str] = &["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];
pub const TRUE_FALSE: &[&str] = &["True", "False"];

/// Extra constraint on a free-text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRule {
    Any,
    /// Non-empty file system path.
    Path,
    UnsignedInt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text(TextRule),
    /// Persisted as `True` / `False`.
    Boolean,
    Choice(&'static [&'static str]),
}

/// (section, option) pair identifying one field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldKey {
    pub section: String,
    pub key: String,
}

impl FieldKey {
    pub fn new(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub section: String,
    pub section_label: &'static str,
    pub key: String,
    pub kind: FieldKind,
    pub current_value: String,
}

/// A value submitted by the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

pub(crate) struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
}

pub(crate) struct SectionSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub fields: &'static [FieldSpec],
    /// Options not listed in `fields` default to this kind.
    pub extra_kind: FieldKind,
}

pub(crate) const SCHEMA: &[SectionSpec] = &[
    SectionSpec {
        name: SECTION_ABOUT,
        label: "About Info",
        fields: &[
            FieldSpec {
                key: "name",
                kind: FieldKind::Text(TextRule::Any),
            },
            FieldSpec {
                key: "version",
                kind: FieldKind::Text(TextRule::Any),
            },
            FieldSpec {
                key: "author",
                kind: FieldKind::Text(TextRule::Any),
            },
            FieldSpec {
                key: "website",
                kind: FieldKind::Text(TextRule::Any),
            },
        ],
        extra_kind: FieldKind::Text(TextRule::Any),
    },
    SectionSpec {
        name: SECTION_MODULES,
        label: "Modules",
        fields: &[],
        extra_kind: FieldKind::Boolean,
    },
    SectionSpec {
        name: SECTION_APP,
        label: "App Defaults",
        fields: &[
            FieldSpec {
                key: "start_maximized",
                kind: FieldKind::Choice(TRUE_FALSE),
            },
            FieldSpec {
                key: "screen_width",
                kind: FieldKind::Text(TextRule::UnsignedInt),
            },
            FieldSpec {
                key: "screen_height",
                kind: FieldKind::Text(TextRule::UnsignedInt),
            },
            FieldSpec {
                key: "dark_mode",
                kind: FieldKind::Boolean,
            },
        ],
        extra_kind: FieldKind::Text(TextRule::Any),
    },
    SectionSpec {
        name: SECTION_LOGGING,
        label: "Logging Settings",
        fields: &[
            FieldSpec {
                key: "log_file",
                kind: FieldKind::Text(TextRule::Path),
            },
            FieldSpec {
                key: "max_bytes",
                kind: FieldKind::Text(TextRule::UnsignedInt),
            },
            FieldSpec {
                key: "backup_count",
                kind: FieldKind::Text(TextRule::UnsignedInt),
            },
            FieldSpec {
                key: "level",
                kind: FieldKind::Choice(LOG_LEVELS),
            },
        ],
        extra_kind: FieldKind::Text(TextRule::Any),
    },
];

/// Options that exist in the document but are never offered for editing.
pub(crate) const HIDDEN: &[(&str, &str)] = &[(SECTION_ABOUT, "icon")];

pub(crate) fn section_spec(name: &str) -> Option<&'static SectionSpec> {
    SCHEMA.iter().find(|s| s.name == name)
}

pub(crate) fn is_hidden(section: &str, key: &str) -> bool {
    HIDDEN.iter().any(|(s, k)| *s == section && *k == key)
}
