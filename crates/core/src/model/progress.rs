use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::model::{Catalog, GroupId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("no progress entry for group {0}")]
    UnknownGroup(GroupId),

    #[error("item {index} is out of range for group {group} ({len} items)")]
    OutOfRange {
        group: GroupId,
        index: usize,
        len: usize,
    },

    #[error("stored progress is corrupt: {0}")]
    Corrupt(String),
}

/// Completion flags per group, index-aligned with the group's items.
///
/// Serialized as a flat JSON object of group id to boolean array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap {
    groups: BTreeMap<GroupId, Vec<bool>>,
}

/// Result of decoding a stored value: the recovered map and the keys whose
/// entry was not an array of booleans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedProgress {
    pub map: ProgressMap,
    pub dropped: Vec<String>,
}

impl ProgressMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All-false entries for every group of `catalog`.
    #[must_use]
    pub fn fresh(catalog: &Catalog) -> Self {
        let mut map = Self::new();
        map.backfill(catalog);
        map
    }

    #[must_use]
    pub fn get(&self, group: &str) -> Option<&[bool]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    pub fn insert(&mut self, group: impl Into<GroupId>, flags: Vec<bool>) -> Option<Vec<bool>> {
        self.groups.insert(group.into(), flags)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupId, &[bool])> {
        self.groups.iter().map(|(id, flags)| (id, flags.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether the flag at `index` of `group` is set. Missing entries read as unset.
    #[must_use]
    pub fn is_checked(&self, group: &str, index: usize) -> bool {
        self.get(group)
            .and_then(|flags| flags.get(index))
            .copied()
            .unwrap_or(false)
    }

    /// Add an all-false entry for every catalog group that has none.
    ///
    /// Existing entries are left untouched, including those whose length no
    /// longer matches the catalog and those for groups the catalog dropped.
    /// Returns the number of entries added.
    pub fn backfill(&mut self, catalog: &Catalog) -> usize {
        let mut added = 0;
        for group in catalog.groups() {
            if !self.groups.contains_key(group.id()) {
                self.groups
                    .insert(group.id().clone(), vec![false; group.item_count()]);
                added += 1;
            }
        }
        added
    }

    /// Flip one flag and return its new value.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownGroup` if the group has no entry, or
    /// `ProgressError::OutOfRange` if `index` is past its end. The map is not
    /// modified on error.
    pub fn toggle(&mut self, group: &str, index: usize) -> Result<bool, ProgressError> {
        let flags = self
            .groups
            .get_mut(group)
            .ok_or_else(|| ProgressError::UnknownGroup(GroupId::new(group)))?;
        let len = flags.len();
        let flag = flags.get_mut(index).ok_or_else(|| ProgressError::OutOfRange {
            group: GroupId::new(group),
            index,
            len,
        })?;
        *flag = !*flag;
        Ok(*flag)
    }

    /// Serialize to the stored text form.
    #[must_use]
    pub fn encode(&self) -> String {
        // A map of strings to bool arrays always serializes.
        serde_json::to_string(&self.groups).unwrap_or_else(|_| "{}".to_owned())
    }

    /// Decode a stored value group by group.
    ///
    /// Entries that are not arrays of booleans are dropped and reported; the
    /// other groups are recovered.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Corrupt` if the text is not a JSON object.
    pub fn decode(text: &str) -> Result<DecodedProgress, ProgressError> {
        let value: Value =
            serde_json::from_str(text).map_err(|err| ProgressError::Corrupt(err.to_string()))?;
        let Value::Object(entries) = value else {
            return Err(ProgressError::Corrupt("expected a JSON object".into()));
        };

        let mut decoded = DecodedProgress::default();
        for (key, entry) in entries {
            match bool_array(&entry) {
                Some(flags) => {
                    decoded.map.groups.insert(GroupId::new(key), flags);
                }
                None => decoded.dropped.push(key),
            }
        }
        Ok(decoded)
    }
}

fn bool_array(value: &Value) -> Option<Vec<bool>> {
    value.as_array()?.iter().map(Value::as_bool).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CatalogGroup, CatalogItem, Section};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogGroup::new(
                "bp",
                Section::VitalSigns,
                "Blood Pressure",
                3.0,
                vec![CatalogItem::new("cuff", 1.0), CatalogItem::new("listen", 2.0)],
            ),
            CatalogGroup::new(
                "o2",
                Section::Equipment,
                "Oxygen",
                1.0,
                vec![CatalogItem::new("tank", 1.0)],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn fresh_map_matches_item_counts() {
        let map = ProgressMap::fresh(&catalog());
        assert_eq!(map.get("bp"), Some(&[false, false][..]));
        assert_eq!(map.get("o2"), Some(&[false][..]));
    }

    #[test]
    fn backfill_keeps_existing_and_stale_entries() {
        let mut map = ProgressMap::new();
        map.insert("bp", vec![true]);
        map.insert("retired", vec![true, true]);

        let added = map.backfill(&catalog());

        assert_eq!(added, 1);
        assert_eq!(map.get("bp"), Some(&[true][..]));
        assert_eq!(map.get("retired"), Some(&[true, true][..]));
        assert_eq!(map.get("o2"), Some(&[false][..]));
    }

    #[test]
    fn toggle_twice_restores_map() {
        let original = ProgressMap::fresh(&catalog());
        let mut map = original.clone();
        assert!(map.toggle("bp", 1).unwrap());
        assert!(!map.toggle("bp", 1).unwrap());
        assert_eq!(map, original);
    }

    #[test]
    fn toggle_touches_only_one_flag() {
        let original = ProgressMap::fresh(&catalog());
        let mut map = original.clone();
        map.toggle("bp", 0).unwrap();

        assert_eq!(map.get("bp"), Some(&[true, false][..]));
        assert_eq!(map.get("o2"), original.get("o2"));
    }

    #[test]
    fn toggle_rejects_unknown_group_and_index() {
        let mut map = ProgressMap::fresh(&catalog());
        let before = map.clone();

        assert_eq!(
            map.toggle("nope", 0),
            Err(ProgressError::UnknownGroup(GroupId::new("nope")))
        );
        assert_eq!(
            map.toggle("o2", 1),
            Err(ProgressError::OutOfRange {
                group: GroupId::new("o2"),
                index: 1,
                len: 1,
            })
        );
        assert_eq!(map, before);
    }

    #[test]
    fn encode_is_flat_object() {
        let mut map = ProgressMap::fresh(&catalog());
        map.toggle("o2", 0).unwrap();
        assert_eq!(map.encode(), r#"{"bp":[false,false],"o2":[true]}"#);
    }

    #[test]
    fn decode_recovers_valid_groups() {
        let decoded =
            ProgressMap::decode(r#"{"bp":[true,false],"o2":"oops","x":[1,true]}"#).unwrap();
        assert_eq!(decoded.map.get("bp"), Some(&[true, false][..]));
        assert!(!decoded.map.contains("o2"));
        assert!(!decoded.map.contains("x"));
        let mut dropped = decoded.dropped;
        dropped.sort();
        assert_eq!(dropped, vec!["o2".to_string(), "x".to_string()]);
    }

    #[test]
    fn decode_rejects_non_objects() {
        assert!(matches!(
            ProgressMap::decode("[true]"),
            Err(ProgressError::Corrupt(_))
        ));
        assert!(matches!(
            ProgressMap::decode("{not json"),
            Err(ProgressError::Corrupt(_))
        ));
    }

    #[test]
    fn is_checked_defaults_to_false() {
        let mut map = ProgressMap::new();
        map.insert("bp", vec![true]);
        assert!(map.is_checked("bp", 0));
        assert!(!map.is_checked("bp", 1));
        assert!(!map.is_checked("missing", 0));
    }
}
