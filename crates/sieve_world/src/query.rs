//! Query engine.
//!
//! Running a [`QueryDescriptor`] happens in two steps:
//!
//! 1. **Resolve**: every required, optional and excluded key is mapped to
//!    its [`ComponentIndex`]. Any unknown key fails the query here, before a
//!    single entity is looked at. Required indices are OR-ed into one mask,
//!    excluded indices into another.
//! 2. **Scan**: the entity index is walked in ascending id order. An entity
//!    matches when `mask & required == required` and `mask & excluded == 0`.
//!    Each match becomes a [`QueryRow`] joining the requested stores.
//!
//! A descriptor with no required types matches nothing; an empty required
//! mask would otherwise select every entity.

use std::any::Any;

use sieve_component::{Component, ComponentIndex, ComponentMask, ComponentMeta, Entity, QueryDescriptor};

use crate::error::WorldError;
use crate::world::World;

/// A resolved query, ready to scan.
#[derive(Debug)]
pub(crate) struct QueryPlan {
    required: ComponentMask,
    excluded: ComponentMask,
    /// Row fields: required types first, then optional types not already
    /// required, each index at most once.
    fields: Vec<ComponentIndex>,
    has_required: bool,
}

impl QueryPlan {
    pub(crate) fn resolve(world: &World, descriptor: &QueryDescriptor) -> Result<Self, WorldError> {
        let resolved = descriptor
            .all_keys()
            .map(|key| world.resolve_key(key))
            .collect::<Result<Vec<_>, _>>()?;
        let (required, rest) = resolved.split_at(descriptor.required.len());
        let (optional, excluded) = rest.split_at(descriptor.optional.len());

        let mut fields: Vec<ComponentIndex> = Vec::with_capacity(required.len() + optional.len());
        for index in required.iter().chain(optional) {
            if !fields.contains(index) {
                fields.push(*index);
            }
        }

        Ok(Self {
            has_required: !required.is_empty(),
            required: required.iter().copied().collect(),
            excluded: excluded.iter().copied().collect(),
            fields,
        })
    }

    pub(crate) fn matches(&self, mask: &ComponentMask) -> bool {
        self.has_required && mask.contains_all(&self.required) && !mask.intersects(&self.excluded)
    }

    pub(crate) fn execute<'w>(&self, world: &'w World) -> QueryResult<'w> {
        if !self.has_required {
            return QueryResult::default();
        }

        let metas: Vec<&'w ComponentMeta> = self
            .fields
            .iter()
            .filter_map(|&index| world.registry().meta(index))
            .collect();

        let rows = world
            .masks()
            .filter(|(_, mask)| self.matches(mask))
            .map(|(entity, _)| QueryRow {
                entity,
                fields: self
                    .fields
                    .iter()
                    .zip(&metas)
                    .map(|(&index, &meta)| QueryField {
                        index,
                        meta,
                        value: world
                            .stores()
                            .erased(index)
                            .and_then(|store| store.get_any(entity)),
                    })
                    .collect(),
            })
            .collect();

        QueryResult { rows }
    }
}

/// One component slot of a [`QueryRow`].
#[derive(Debug, Clone)]
pub struct QueryField<'w> {
    index: ComponentIndex,
    meta: &'w ComponentMeta,
    value: Option<&'w dyn Any>,
}

impl<'w> QueryField<'w> {
    /// The field name: the component name with its first letter lowercased.
    #[must_use]
    pub fn name(&self) -> &'w str {
        let meta: &'w ComponentMeta = self.meta;
        &meta.field_name
    }

    /// The component's registered name.
    #[must_use]
    pub fn component_name(&self) -> &'static str {
        self.meta.name
    }

    #[must_use]
    pub fn index(&self) -> ComponentIndex {
        self.index
    }

    /// Returns `true` if the entity holds this component. Always `true` for
    /// required fields.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// The type-erased component value, if present.
    #[must_use]
    pub fn value(&self) -> Option<&'w dyn Any> {
        self.value
    }

    /// The component value as `T`, if present and of that type.
    #[must_use]
    pub fn downcast<T: Component>(&self) -> Option<&'w T> {
        self.value?.downcast_ref::<T>()
    }

    /// Renders the value as JSON; an absent value renders as `null`.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self.value.and_then(|value| (self.meta.to_json_fn)(value)) {
            Some(encoded) => encoded,
            None => Ok(serde_json::Value::Null),
        }
    }
}

/// One matched entity and its requested components.
#[derive(Debug, Clone)]
pub struct QueryRow<'w> {
    entity: Entity,
    fields: Vec<QueryField<'w>>,
}

impl<'w> QueryRow<'w> {
    #[must_use]
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// The `T` component of this row, if `T` was requested and is present.
    #[must_use]
    pub fn get<T: Component>(&self) -> Option<&'w T> {
        self.fields.iter().find_map(|field| field.downcast::<T>())
    }

    /// The field with the given name (e.g. `"position"`).
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&QueryField<'w>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns `true` if the named field exists on this row and is present.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.field(name).is_some_and(QueryField::is_present)
    }

    /// All fields, required first, then optional.
    #[must_use]
    pub fn fields(&self) -> &[QueryField<'w>] {
        &self.fields
    }

    /// Renders the row as a JSON object: `{"entity": id, "<field>": value, ...}`.
    /// Absent optional fields are `null`.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        let mut object = serde_json::Map::with_capacity(self.fields.len() + 1);
        object.insert("entity".to_string(), self.entity.id().into());
        for field in &self.fields {
            object.insert(field.name().to_string(), field.to_json()?);
        }
        Ok(serde_json::Value::Object(object))
    }
}

/// The rows produced by a query, in ascending entity id order.
#[derive(Debug, Clone, Default)]
pub struct QueryResult<'w> {
    rows: Vec<QueryRow<'w>>,
}

impl<'w> QueryResult<'w> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The matched entities, in row order.
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        self.rows.iter().map(QueryRow::entity).collect()
    }

    /// The row for `entity`, if it matched.
    #[must_use]
    pub fn row(&self, entity: Entity) -> Option<&QueryRow<'w>> {
        self.rows
            .binary_search_by_key(&entity, QueryRow::entity)
            .ok()
            .map(|i| &self.rows[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueryRow<'w>> {
        self.rows.iter()
    }

    #[must_use]
    pub fn rows(&self) -> &[QueryRow<'w>] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<QueryRow<'w>> {
        self.rows
    }

    /// Renders every row, as by [`QueryRow::to_json`], into a JSON array.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        self.rows
            .iter()
            .map(QueryRow::to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(serde_json::Value::Array)
    }
}

impl<'w> IntoIterator for QueryResult<'w> {
    type Item = QueryRow<'w>;
    type IntoIter = std::vec::IntoIter<QueryRow<'w>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, 'w> IntoIterator for &'a QueryResult<'w> {
    type Item = &'a QueryRow<'w>;
    type IntoIter = std::slice::Iter<'a, QueryRow<'w>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
