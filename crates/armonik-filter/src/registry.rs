//! Field registry: the static schema of every entity kind.
//!
//! Each entity has a read-only table of [`FieldSpec`]s declared in
//! [`crate::entities`]. Lookups resolve a user-facing path such as `status`,
//! `options.priority`, `options.my_key` or `output.error` to a [`FieldRef`].
//!
//! Nothing is registered at run time; the tables are `static` data and can be
//! shared freely between threads.

use strsim::levenshtein;

use armonik_api_rs::fields::FieldDescriptor;

use crate::entities;
use crate::error::{FilterError, FilterResult};
use crate::field::{Entity, FieldRef, FieldType};

/// Maximum Levenshtein distance to consider a name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Whether and how a field can be filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Filterable {
        field_type: FieldType,
        descriptor: FieldDescriptor,
    },
    /// Present on the entity but rejected by the server's filters.
    NotFilterable,
}

/// One row of an entity table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn filterable(
        name: &'static str,
        field_type: FieldType,
        descriptor: FieldDescriptor,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::Filterable {
                field_type,
                descriptor,
            },
        }
    }

    pub const fn not_filterable(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::NotFilterable,
        }
    }

    pub fn field_type(&self) -> Option<FieldType> {
        match &self.kind {
            FieldKind::Filterable { field_type, .. } => Some(*field_type),
            FieldKind::NotFilterable => None,
        }
    }

    pub fn descriptor(&self) -> Option<&FieldDescriptor> {
        match &self.kind {
            FieldKind::Filterable { descriptor, .. } => Some(descriptor),
            FieldKind::NotFilterable => None,
        }
    }
}

/// A group of fields reached through a dotted prefix, e.g. `options.`.
#[derive(Debug)]
pub struct Composite {
    pub prefix: &'static str,
    pub fields: &'static [FieldSpec],
    /// Builds a STRING descriptor for keys missing from `fields`.
    pub generic: Option<fn(String) -> FieldDescriptor>,
}

/// The schema of one entity kind.
#[derive(Debug)]
pub struct FieldRegistry {
    entity: Entity,
    fields: &'static [FieldSpec],
    composites: &'static [Composite],
}

/// A resolved table row, as listed by [`FieldRegistry::entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    /// Full path, including any composite prefix.
    pub path: String,
    pub spec: &'static FieldSpec,
}

impl FieldRegistry {
    pub(crate) const fn new(
        entity: Entity,
        fields: &'static [FieldSpec],
        composites: &'static [Composite],
    ) -> Self {
        Self {
            entity,
            fields,
            composites,
        }
    }

    /// Returns the registry of an entity kind.
    pub fn of(entity: Entity) -> &'static FieldRegistry {
        match entity {
            Entity::Task => &entities::TASK_REGISTRY,
            Entity::Session => &entities::SESSION_REGISTRY,
            Entity::Result => &entities::RESULT_REGISTRY,
            Entity::Partition => &entities::PARTITION_REGISTRY,
            Entity::Application => &entities::APPLICATION_REGISTRY,
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Resolves a field path.
    ///
    /// # Errors
    ///
    /// [`FilterError::UnknownField`] (with a close-match suggestion when one
    /// exists) or [`FilterError::FieldNotFilterable`].
    pub fn lookup(&self, path: &str) -> FilterResult<FieldRef> {
        if let Some((prefix, key)) = path.split_once('.') {
            if let Some(composite) = self.composites.iter().find(|c| c.prefix == prefix) {
                return self.lookup_composite(composite, path, key);
            }
        }

        match self.fields.iter().find(|spec| spec.name == path) {
            Some(spec) => self.resolve(spec, path.to_string()),
            None => Err(self.unknown(path)),
        }
    }

    fn lookup_composite(
        &self,
        composite: &Composite,
        path: &str,
        key: &str,
    ) -> FilterResult<FieldRef> {
        if let Some(spec) = composite.fields.iter().find(|spec| spec.name == key) {
            return self.resolve(spec, path.to_string());
        }
        match composite.generic {
            Some(generic) if !key.is_empty() => Ok(FieldRef::new(
                self.entity,
                path.to_string(),
                generic(key.to_string()),
                FieldType::String,
            )),
            _ => Err(self.unknown(path)),
        }
    }

    fn resolve(&self, spec: &FieldSpec, path: String) -> FilterResult<FieldRef> {
        match &spec.kind {
            FieldKind::Filterable {
                field_type,
                descriptor,
            } => Ok(FieldRef::new(
                self.entity,
                path,
                descriptor.clone(),
                *field_type,
            )),
            FieldKind::NotFilterable => Err(FilterError::not_filterable(self.entity, path)),
        }
    }

    fn unknown(&self, path: &str) -> FilterError {
        let candidates = self.entries();
        let suggestion = find_similar_name(path, candidates.iter().map(|e| e.path.as_str()));
        FilterError::unknown_field(self.entity, path, suggestion)
    }

    /// Lists every row of the schema, composite fields included.
    pub fn entries(&self) -> Vec<FieldEntry> {
        let mut entries: Vec<FieldEntry> = self
            .fields
            .iter()
            .map(|spec| FieldEntry {
                path: spec.name.to_string(),
                spec,
            })
            .collect();
        for composite in self.composites {
            entries.extend(composite.fields.iter().map(|spec| FieldEntry {
                path: format!("{}.{}", composite.prefix, spec.name),
                spec,
            }));
        }
        entries
    }

    /// Returns the prefixes accepting arbitrary keys (e.g. `options`).
    pub fn generic_prefixes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.composites
            .iter()
            .filter(|c| c.generic.is_some())
            .map(|c| c.prefix)
    }
}

/// Finds the best matching name from a list of candidates using Levenshtein distance.
///
/// Returns the best match if its edit distance is within the threshold,
/// otherwise returns `None`.
pub(crate) fn find_similar_name<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| (name, levenshtein(&query_lower, &name.to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    // A distance of 0 means only the case differs, which is still worth showing.
    if best_distance <= MAX_SUGGESTION_DISTANCE && best_match != query {
        Some(best_match.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_summary_field() {
        let field = FieldRegistry::of(Entity::Task).lookup("status").unwrap();
        assert_eq!(field.entity(), Entity::Task);
        assert_eq!(field.field_type(), FieldType::Status);
        assert_eq!(field.descriptor().name(), "TASK_SUMMARY_ENUM_FIELD_STATUS");
    }

    #[test]
    fn test_lookup_known_option() {
        let field = FieldRegistry::of(Entity::Task)
            .lookup("options.max_duration")
            .unwrap();
        assert_eq!(field.name(), "options.max_duration");
        assert_eq!(field.field_type(), FieldType::Duration);
        assert_eq!(
            field.descriptor(),
            &FieldDescriptor::task_option("TASK_OPTION_ENUM_FIELD_MAX_DURATION")
        );
    }

    #[test]
    fn test_lookup_generic_option() {
        let field = FieldRegistry::of(Entity::Session)
            .lookup("options.gpu_model")
            .unwrap();
        assert_eq!(field.entity(), Entity::Session);
        assert_eq!(field.field_type(), FieldType::String);
        assert_eq!(
            field.descriptor(),
            &FieldDescriptor::task_option_generic("gpu_model")
        );
    }

    #[test]
    fn test_lookup_output_error() {
        let field = FieldRegistry::of(Entity::Task).lookup("output.error").unwrap();
        assert_eq!(field.descriptor().name(), "TASK_SUMMARY_ENUM_FIELD_ERROR");
    }

    #[test]
    fn test_output_has_no_generic_keys() {
        let error = FieldRegistry::of(Entity::Task)
            .lookup("output.eror")
            .unwrap_err();
        assert_eq!(
            error,
            FilterError::unknown_field(Entity::Task, "output.eror", Some("output.error".into()))
        );
    }

    #[test]
    fn test_empty_option_key_is_unknown() {
        let error = FieldRegistry::of(Entity::Task).lookup("options.").unwrap_err();
        assert!(matches!(error, FilterError::UnknownField { .. }));
    }

    #[test]
    fn test_unknown_field_suggests_close_match() {
        let error = FieldRegistry::of(Entity::Result).lookup("sise").unwrap_err();
        assert_eq!(
            error,
            FilterError::unknown_field(Entity::Result, "sise", Some("size".into()))
        );
    }

    #[test]
    fn test_unknown_field_without_close_match() {
        let error = FieldRegistry::of(Entity::Application)
            .lookup("completely_different")
            .unwrap_err();
        assert_eq!(
            error,
            FilterError::unknown_field(Entity::Application, "completely_different", None)
        );
    }

    #[test]
    fn test_not_filterable() {
        for (entity, name) in [
            (Entity::Task, "parent_task_ids"),
            (Entity::Task, "options"),
            (Entity::Task, "output"),
            (Entity::Session, "options"),
            (Entity::Partition, "pod_configuration"),
        ] {
            assert_eq!(
                FieldRegistry::of(entity).lookup(name),
                Err(FilterError::not_filterable(entity, name)),
            );
        }
    }

    #[test]
    fn test_entries_include_composites() {
        let entries = FieldRegistry::of(Entity::Task).entries();
        assert!(entries.iter().any(|e| e.path == "options.priority"));
        assert!(entries.iter().any(|e| e.path == "output.error"));
        assert!(entries.iter().any(|e| e.path == "retry_of_ids" && e.spec.field_type().is_none()));
        let prefixes: Vec<_> = FieldRegistry::of(Entity::Task).generic_prefixes().collect();
        assert_eq!(prefixes, vec!["options"]);
    }

    #[test]
    fn test_every_registry_matches_its_entity() {
        for entity in Entity::ALL {
            let registry = FieldRegistry::of(*entity);
            assert_eq!(registry.entity(), *entity);
            for entry in registry.entries() {
                if entry.spec.field_type().is_some() {
                    assert_eq!(registry.lookup(&entry.path).unwrap().entity(), *entity);
                }
            }
        }
    }

    #[test]
    fn test_find_similar_name_case_only() {
        let names = ["status", "session_id"];
        assert_eq!(
            find_similar_name("STATUS", names.iter().copied()),
            Some("status".to_string())
        );
        assert_eq!(find_similar_name("status", names.iter().copied()), None);
    }
}
