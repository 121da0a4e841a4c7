use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use super::{FieldType, FieldValue};
use crate::error::FieldsError;

/// String-keyed map of event fields.
///
/// Keys passed to the path operations (`put`, `get_value`, `delete`, ...) are dotted paths:
/// `"data_file.size.bytes"` walks the nested maps `data_file` and `size` and addresses the `bytes`
/// entry of the innermost map. Entries are kept sorted so serialized output is stable.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapStr(BTreeMap<String, FieldValue>);

fn split_key(key: &str) -> (Option<&str>, &str) {
    match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    }
}

fn parent_segments(parents: Option<&str>) -> impl Iterator<Item = (usize, &str)> {
    parents.into_iter().flat_map(|p| {
        p.split('.').scan(None, |end: &mut Option<usize>, segment| {
            let next = end.map_or(segment.len(), |e| e + 1 + segment.len());
            *end = Some(next);
            Some((next, segment))
        })
    })
}

impl MapStr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> BTreeMap<String, FieldValue> {
        self.0
    }

    /// Sets the value at the dotted `key`, creating intermediate maps as needed. Returns the
    /// previous value, if any.
    pub fn put(&mut self, key: &str, value: impl Into<FieldValue>) -> Result<Option<FieldValue>, FieldsError> {
        let (parents, leaf) = split_key(key);
        let mut current = self;
        for (end, segment) in parent_segments(parents) {
            let entry = current
                .0
                .entry(segment.to_string())
                .or_insert_with(|| FieldValue::Map(Self::default()));

            current = match entry {
                FieldValue::Map(map) => map,
                other => {
                    return Err(FieldsError::PathConflict {
                        key: key.to_string(),
                        segment: key[..end].to_string(),
                        actual: other.field_type(),
                    })
                },
            };
        }

        Ok(current.0.insert(leaf.to_string(), value.into()))
    }

    pub fn get_value(&self, key: &str) -> Result<&FieldValue, FieldsError> {
        let (parent, leaf) = self.walk(key)?;
        parent.0.get(leaf).ok_or_else(|| FieldsError::KeyNotFound(key.to_string()))
    }

    pub fn get_value_mut(&mut self, key: &str) -> Result<&mut FieldValue, FieldsError> {
        let (parent, leaf) = self.walk_mut(key)?;
        parent.0.get_mut(leaf).ok_or_else(|| FieldsError::KeyNotFound(key.to_string()))
    }

    /// Typed lookup of a nested map.
    pub fn get_map_str(&self, key: &str) -> Result<&Self, FieldsError> {
        self.get_value(key)?.as_map()
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.get_value(key).is_ok()
    }

    /// Removes and returns the value at the dotted `key`. Intermediate maps left empty are kept.
    pub fn delete(&mut self, key: &str) -> Result<FieldValue, FieldsError> {
        let (parent, leaf) = self.walk_mut(key)?;
        parent.0.remove(leaf).ok_or_else(|| FieldsError::KeyNotFound(key.to_string()))
    }

    /// Shallow merge; top-level entries of `other` replace those of `self`.
    pub fn update(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Recursive merge; where both sides hold a map the maps are merged, otherwise `other` wins.
    pub fn deep_update(&mut self, other: Self) {
        self.merge(other, true);
    }

    /// Recursive merge that only fills in keys absent from `self`.
    pub fn deep_update_no_overwrite(&mut self, other: Self) {
        self.merge(other, false);
    }

    /// Collapses nested maps into a single level keyed by dotted paths. Empty nested maps carry no
    /// leaf and so do not appear in the result.
    pub fn flatten(&self) -> Self {
        let mut result = Self::default();
        self.flatten_into(None, &mut result);
        result
    }

    fn flatten_into(&self, prefix: Option<&str>, acc: &mut Self) {
        for (k, v) in self.0.iter() {
            let key = match prefix {
                Some(p) => format!("{p}.{k}"),
                None => k.clone(),
            };

            match v {
                FieldValue::Map(nested) => nested.flatten_into(Some(key.as_str()), acc),
                leaf => {
                    acc.0.insert(key, leaf.clone());
                },
            }
        }
    }

    fn merge(&mut self, other: Self, overwrite: bool) {
        for (k, v) in other.0 {
            match (self.0.get_mut(&k), v) {
                (Some(FieldValue::Map(dst)), FieldValue::Map(src)) => dst.merge(src, overwrite),
                (Some(current), v) => {
                    if overwrite {
                        *current = v;
                    }
                },
                (None, v) => {
                    self.0.insert(k, v);
                },
            }
        }
    }

    fn walk<'k>(&self, key: &'k str) -> Result<(&Self, &'k str), FieldsError> {
        let (parents, leaf) = split_key(key);
        let mut current = self;
        for (end, segment) in parent_segments(parents) {
            current = match current.0.get(segment) {
                Some(FieldValue::Map(map)) => map,
                Some(other) => return Err(path_conflict(key, end, other.field_type())),
                None => return Err(FieldsError::KeyNotFound(key.to_string())),
            };
        }

        Ok((current, leaf))
    }

    fn walk_mut<'k>(&mut self, key: &'k str) -> Result<(&mut Self, &'k str), FieldsError> {
        let (parents, leaf) = split_key(key);
        let mut current = self;
        for (end, segment) in parent_segments(parents) {
            current = match current.0.get_mut(segment) {
                Some(FieldValue::Map(map)) => map,
                Some(other) => return Err(path_conflict(key, end, other.field_type())),
                None => return Err(FieldsError::KeyNotFound(key.to_string())),
            };
        }

        Ok((current, leaf))
    }
}

fn path_conflict(key: &str, end: usize, actual: FieldType) -> FieldsError {
    FieldsError::PathConflict {
        key: key.to_string(),
        segment: key[..end].to_string(),
        actual,
    }
}

impl fmt::Display for MapStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rep = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{rep}")
    }
}

impl Deref for MapStr {
    type Target = BTreeMap<String, FieldValue>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MapStr {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<BTreeMap<String, FieldValue>> for MapStr {
    fn from(entries: BTreeMap<String, FieldValue>) -> Self {
        Self(entries)
    }
}

impl From<HashMap<String, FieldValue>> for MapStr {
    fn from(entries: HashMap<String, FieldValue>) -> Self {
        entries.into_iter().collect()
    }
}

impl FromIterator<(String, FieldValue)> for MapStr {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for MapStr {
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldValue>;
    type Item = (String, FieldValue);

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
