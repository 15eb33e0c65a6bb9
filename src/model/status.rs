//! Record status and its transition table.

use serde::{Deserialize, Serialize};

/// Lifecycle of quotations, invoices and expense reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Saved,
    Validated,
    Transformed,
}

/// Status-changing actions a list row can offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusAction {
    Validate,
    Transform,
}

/// (current, action, next). The only ways a status ever moves.
pub const TRANSITIONS: &[(Status, StatusAction, Status)] = &[
    (Status::Saved, StatusAction::Validate, Status::Validated),
    (Status::Validated, StatusAction::Transform, Status::Transformed),
];

impl Status {
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "SAVED" => Some(Status::Saved),
            "VALIDATED" => Some(Status::Validated),
            "TRANSFORMED" => Some(Status::Transformed),
            _ => None,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Status::Saved => "SAVED",
            Status::Validated => "VALIDATED",
            Status::Transformed => "TRANSFORMED",
        }
    }

    /// Whether `action` is legal from this status.
    pub fn allows(self, action: StatusAction) -> bool {
        TRANSITIONS
            .iter()
            .any(|(from, via, _)| *from == self && *via == action)
    }

    /// Status reached by applying `action`, when the table permits it.
    pub fn apply(self, action: StatusAction) -> Option<Status> {
        TRANSITIONS
            .iter()
            .find(|(from, via, _)| *from == self && *via == action)
            .map(|(_, _, next)| *next)
    }
}

impl StatusAction {
    /// Path segment of the backend action endpoint.
    pub fn path_segment(self) -> &'static str {
        match self {
            StatusAction::Validate => "validate",
            StatusAction::Transform => "transform",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        for status in [Status::Saved, Status::Validated, Status::Transformed] {
            assert_eq!(Status::from_wire(status.as_wire()), Some(status));
        }
        assert_eq!(Status::from_wire("DRAFT"), None);
    }

    #[test]
    fn transitions_follow_the_table() {
        assert!(Status::Saved.allows(StatusAction::Validate));
        assert!(!Status::Saved.allows(StatusAction::Transform));
        assert!(Status::Validated.allows(StatusAction::Transform));
        assert!(!Status::Validated.allows(StatusAction::Validate));
        assert!(!Status::Transformed.allows(StatusAction::Validate));
        assert!(!Status::Transformed.allows(StatusAction::Transform));

        assert_eq!(
            Status::Saved.apply(StatusAction::Validate),
            Some(Status::Validated)
        );
        assert_eq!(
            Status::Validated.apply(StatusAction::Transform),
            Some(Status::Transformed)
        );
        assert_eq!(Status::Transformed.apply(StatusAction::Validate), None);
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&Status::Validated).unwrap();
        assert_eq!(json, "\"VALIDATED\"");
        let back: Status = serde_json::from_str("\"SAVED\"").unwrap();
        assert_eq!(back, Status::Saved);
    }
}
