//! Request body validation for the admin API.
//!
//! Each entity declares an [`EntitySchema`]. A body is checked in three
//! passes and the first failing pass is reported: unknown keys, then
//! missing or empty values, then per-field type and range checks.

use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::model::{parse_calendar_date, ArtworkStatus};

pub const MAX_STRING_LENGTH: usize = 5000;
pub const YEAR_RANGE: RangeInclusive<i64> = 1900..=2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every required field must be present; `id` must be a fresh slug
    Create,
    /// Fields are optional; `id` is accepted and dropped
    Update,
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Non-empty (after trimming) string
    Text,
    /// String that may be empty
    TextAllowEmpty,
    Year,
    Status,
    Bool,
    GridSpan,
    Date,
    Nested(&'static EntitySchema),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldRule {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

#[derive(Debug)]
pub struct EntitySchema {
    /// Records carry a slug `id` fixed at creation
    pub keyed: bool,
    pub fields: &'static [FieldRule],
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    BodyNotObject,

    #[error("Unknown fields: {}", .0.join(", "))]
    UnknownFields(Vec<String>),

    #[error("{0} is required")]
    Missing(String),

    #[error("{0} cannot be empty")]
    Empty(String),

    #[error("{0} must be a string")]
    NotAString(String),

    #[error("{field} exceeds maximum length ({max})")]
    TooLong { field: String, max: usize },

    #[error("id must be a valid slug (lowercase letters, numbers, hyphens only)")]
    InvalidSlug,

    #[error("{0} must be an integer between 1900 and 2100")]
    YearOutOfRange(String),

    #[error("{0} must be one of: available, sold, reserved")]
    InvalidStatus(String),

    #[error("{0} must be a boolean")]
    NotABoolean(String),

    #[error("{0} must be an object with positive integer cols and rows")]
    InvalidGridSpan(String),

    #[error("{0} must be a valid ISO date")]
    InvalidDate(String),

    #[error("{0} must be an object")]
    NotAnObject(String),
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

pub static ARTWORK_SCHEMA: EntitySchema = EntitySchema {
    keyed: true,
    fields: &[
        FieldRule::required("title", FieldKind::Text),
        FieldRule::required("titleEn", FieldKind::Text),
        FieldRule::required("year", FieldKind::Year),
        FieldRule::required("technique", FieldKind::Text),
        FieldRule::required("techniqueEn", FieldKind::Text),
        FieldRule::required("dimensions", FieldKind::Text),
        FieldRule::required("series", FieldKind::TextAllowEmpty),
        FieldRule::required("seriesEn", FieldKind::TextAllowEmpty),
        FieldRule::required("status", FieldKind::Status),
        FieldRule::optional("featured", FieldKind::Bool),
        FieldRule::required("description", FieldKind::Text),
        FieldRule::required("descriptionEn", FieldKind::Text),
        FieldRule::required("imageUrl", FieldKind::Text),
        FieldRule::optional("gridSpan", FieldKind::GridSpan),
    ],
};

pub static EXHIBITION_SCHEMA: EntitySchema = EntitySchema {
    keyed: true,
    fields: &[
        FieldRule::required("title", FieldKind::Text),
        FieldRule::required("titleEn", FieldKind::Text),
        FieldRule::required("venue", FieldKind::Text),
        FieldRule::required("location", FieldKind::Text),
        FieldRule::required("locationEn", FieldKind::Text),
        FieldRule::required("startDate", FieldKind::Date),
        FieldRule::required("endDate", FieldKind::Date),
        FieldRule::required("description", FieldKind::Text),
        FieldRule::required("descriptionEn", FieldKind::Text),
        FieldRule::required("imageUrl", FieldKind::Text),
    ],
};

pub static SERIES_SCHEMA: EntitySchema = EntitySchema {
    keyed: true,
    fields: &[
        FieldRule::required("name", FieldKind::Text),
        FieldRule::required("nameEn", FieldKind::Text),
    ],
};

static INSTAGRAM_SCHEMA: EntitySchema = EntitySchema {
    keyed: false,
    fields: &[
        FieldRule::required("handle", FieldKind::Text),
        FieldRule::required("url", FieldKind::Text),
    ],
};

pub static CONTACT_SCHEMA: EntitySchema = EntitySchema {
    keyed: false,
    fields: &[
        FieldRule::required("email", FieldKind::Text),
        FieldRule::required("instagram", FieldKind::Nested(&INSTAGRAM_SCHEMA)),
    ],
};

/// Validate a request body against `schema`.
///
/// Returns the accepted fields with strings trimmed. In update mode an `id`
/// key on a keyed schema is dropped rather than rejected.
pub fn validate(schema: &EntitySchema, body: &Value, mode: Mode) -> ValidationResult<Map<String, Value>> {
    let Value::Object(fields) = body else {
        return Err(ValidationError::BodyNotObject);
    };
    validate_object(schema, fields, mode, "")
}

fn validate_object(
    schema: &EntitySchema,
    fields: &Map<String, Value>,
    mode: Mode,
    prefix: &str,
) -> ValidationResult<Map<String, Value>> {
    let path = |name: &str| format!("{}{}", prefix, name);

    let unknown: Vec<String> = fields
        .keys()
        .filter(|key| !(schema.keyed && key.as_str() == "id"))
        .filter(|key| !schema.fields.iter().any(|rule| rule.name == key.as_str()))
        .map(|key| path(key.as_str()))
        .collect();
    if !unknown.is_empty() {
        return Err(ValidationError::UnknownFields(unknown));
    }

    if mode == Mode::Create {
        if schema.keyed && !fields.contains_key("id") {
            return Err(ValidationError::Missing("id".to_string()));
        }
        if let Some(rule) = schema
            .fields
            .iter()
            .find(|rule| rule.required && !fields.contains_key(rule.name))
        {
            return Err(ValidationError::Missing(path(rule.name)));
        }
    }

    // Blank strings count as missing, before any type checks
    let id_rule = FieldRule::required("id", FieldKind::Text);
    let id_rule = schema.keyed.then_some(&id_rule);
    for rule in id_rule.into_iter().chain(schema.fields.iter()) {
        if let (FieldKind::Text | FieldKind::Date, Some(Value::String(s))) = (rule.kind, fields.get(rule.name)) {
            if s.trim().is_empty() {
                return Err(ValidationError::Empty(path(rule.name)));
            }
        }
    }

    let mut accepted = Map::new();

    if schema.keyed && mode == Mode::Create {
        if let Some(id) = fields.get("id") {
            let id = check_text(&path("id"), id)?;
            if !is_slug(&id) {
                return Err(ValidationError::InvalidSlug);
            }
            accepted.insert("id".to_string(), Value::String(id));
        }
    }

    for rule in schema.fields {
        if let Some(value) = fields.get(rule.name) {
            let checked = check_field(&path(rule.name), rule.kind, value, mode)?;
            accepted.insert(rule.name.to_string(), checked);
        }
    }

    Ok(accepted)
}

fn check_field(name: &str, kind: FieldKind, value: &Value, mode: Mode) -> ValidationResult<Value> {
    match kind {
        FieldKind::Text => check_text(name, value).map(Value::String),
        FieldKind::TextAllowEmpty => {
            let s = value
                .as_str()
                .ok_or_else(|| ValidationError::NotAString(name.to_string()))?;
            check_length(name, s)?;
            Ok(Value::String(s.trim().to_string()))
        }
        FieldKind::Year => match value.as_i64() {
            Some(year) if YEAR_RANGE.contains(&year) => Ok(Value::from(year)),
            _ => Err(ValidationError::YearOutOfRange(name.to_string())),
        },
        FieldKind::Status => value
            .as_str()
            .and_then(|s| s.parse::<ArtworkStatus>().ok())
            .map(|status| Value::String(status.as_str().to_string()))
            .ok_or_else(|| ValidationError::InvalidStatus(name.to_string())),
        FieldKind::Bool => value
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| ValidationError::NotABoolean(name.to_string())),
        FieldKind::GridSpan => check_grid_span(name, value),
        FieldKind::Date => {
            let s = check_text(name, value)?;
            if parse_calendar_date(&s).is_none() {
                return Err(ValidationError::InvalidDate(name.to_string()));
            }
            Ok(Value::String(s))
        }
        FieldKind::Nested(schema) => {
            let Value::Object(nested) = value else {
                return Err(ValidationError::NotAnObject(name.to_string()));
            };
            validate_object(schema, nested, mode, &format!("{}.", name)).map(Value::Object)
        }
    }
}

fn check_text(name: &str, value: &Value) -> ValidationResult<String> {
    let s = value
        .as_str()
        .ok_or_else(|| ValidationError::NotAString(name.to_string()))?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty(name.to_string()));
    }
    check_length(name, s)?;
    Ok(trimmed.to_string())
}

fn check_length(name: &str, s: &str) -> ValidationResult<()> {
    if s.chars().count() > MAX_STRING_LENGTH {
        return Err(ValidationError::TooLong {
            field: name.to_string(),
            max: MAX_STRING_LENGTH,
        });
    }
    Ok(())
}

fn check_grid_span(name: &str, value: &Value) -> ValidationResult<Value> {
    let invalid = || ValidationError::InvalidGridSpan(name.to_string());
    let Value::Object(span) = value else {
        return Err(invalid());
    };
    if span.len() != 2 {
        return Err(invalid());
    }

    let dimension = |key: &str| {
        span.get(key)
            .and_then(Value::as_u64)
            .filter(|&n| n > 0 && n <= u64::from(u32::MAX))
            .ok_or_else(invalid)
    };
    let cols = dimension("cols")?;
    let rows = dimension("rows")?;

    Ok(serde_json::json!({ "cols": cols, "rows": rows }))
}

/// Lowercase ASCII letters and digits in hyphen-separated runs,
/// e.g. `danza-de-planos`.
pub fn is_slug(s: &str) -> bool {
    !s.is_empty()
        && s.split('-').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}
