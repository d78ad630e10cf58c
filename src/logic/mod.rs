pub mod validate;

pub use validate::{
    is_slug, validate, EntitySchema, FieldKind, FieldRule, Mode, ValidationError,
    ValidationResult, ARTWORK_SCHEMA, CONTACT_SCHEMA, EXHIBITION_SCHEMA, SERIES_SCHEMA,
};
