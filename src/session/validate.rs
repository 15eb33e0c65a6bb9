//! Draft validation against field specs.

use regex::Regex;

use crate::schema::{FieldKind, FieldSpec};

pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Why a draft value fails its spec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Problem {
    Missing,
    BadEmail,
    NotANumber,
}

/// Visual verdict of one field, mapped straight onto input styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldState {
    Neutral,
    Valid,
    Invalid,
}

/// Check one draft value against its spec. `None` means the value passes.
/// Empty optional fields pass; they are simply omitted from wire bodies.
pub fn field_problem(spec: &FieldSpec, value: &str) -> Option<Problem> {
    if value.is_empty() {
        return spec.required.then_some(Problem::Missing);
    }
    match spec.kind {
        FieldKind::Email => (!email_ok(value)).then_some(Problem::BadEmail),
        FieldKind::Number => value.parse::<f64>().is_err().then_some(Problem::NotANumber),
        FieldKind::Text | FieldKind::Select(_) => None,
    }
}

/// Field state shown to the user: everything is Neutral until the first
/// submit attempt marks the form validated.
pub fn visual_state(validated: bool, spec: &FieldSpec, value: &str) -> FieldState {
    if !validated {
        FieldState::Neutral
    } else if field_problem(spec, value).is_some() {
        FieldState::Invalid
    } else {
        FieldState::Valid
    }
}

pub fn email_ok(value: &str) -> bool {
    Regex::new(EMAIL_PATTERN)
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}
