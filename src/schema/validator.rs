//! Catalog validation: path uniqueness and field references.

use std::collections::HashSet;

use crate::error::SchemaError;
use crate::schema::types::{EntityConfig, FieldPath};

pub fn validate(entities: &[EntityConfig]) -> Result<(), SchemaError> {
    let mut segments = HashSet::new();
    let mut bases = HashSet::new();
    for entity in entities {
        if !segments.insert(entity.path_segment) {
            return Err(SchemaError::DuplicatePathSegment(
                entity.path_segment.to_string(),
            ));
        }
        if !bases.insert(entity.kind.route_base()) {
            return Err(SchemaError::DuplicateRouteBase(
                entity.kind.route_base().to_string(),
            ));
        }

        let mut paths = HashSet::new();
        for field in &entity.fields {
            if !paths.insert(field.path) {
                return Err(SchemaError::DuplicateField(field.path.to_string()));
            }
        }

        let needs_status = !entity.status_actions.is_empty() || entity.status_listed;
        if needs_status && entity.status_field.is_none() {
            return Err(SchemaError::MissingReference {
                kind: "status field",
                id: entity.path_segment.to_string(),
            });
        }
        if let Some(lookup) = &entity.lookup {
            if entity.field(lookup.field).is_none() {
                return Err(SchemaError::UnknownField {
                    entity: entity.path_segment,
                    path: lookup.field.to_string(),
                });
            }
        }
        if entity.auto_customer && entity.field(FieldPath::top("customerId")).is_none() {
            return Err(SchemaError::MissingReference {
                kind: "field",
                id: format!("{}.customerId", entity.path_segment),
            });
        }
    }
    Ok(())
}
