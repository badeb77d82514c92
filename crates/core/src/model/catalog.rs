use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{GroupId, Section};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("group {group} in {section} has no `{field}` field")]
    MissingItems {
        group: GroupId,
        section: &'static str,
        field: &'static str,
    },

    #[error("group id {0} appears more than once")]
    DuplicateGroupId(GroupId),

    #[error("group {group} has invalid score {score}; scores must be finite and non-negative")]
    InvalidScore { group: GroupId, score: f64 },
}

//
// ─── CATALOG TYPES ─────────────────────────────────────────────────────────────
//

/// A single assessable checklist entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogItem {
    description: String,
    score: f64,
}

impl CatalogItem {
    #[must_use]
    pub fn new(description: impl Into<String>, score: f64) -> Self {
        Self {
            description: description.into(),
            score,
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// A named cluster of checklist items belonging to one section.
///
/// `score` is the total declared in the source data. It is informational
/// only; point totals are always summed from the items.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogGroup {
    id: GroupId,
    section: Section,
    name: String,
    score: f64,
    items: Vec<CatalogItem>,
}

impl CatalogGroup {
    #[must_use]
    pub fn new(
        id: impl Into<GroupId>,
        section: Section,
        name: impl Into<String>,
        score: f64,
        items: Vec<CatalogItem>,
    ) -> Self {
        Self {
            id: id.into(),
            section,
            name: name.into(),
            score,
            items,
        }
    }

    #[must_use]
    pub fn id(&self) -> &GroupId {
        &self.id
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn declared_score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of the item scores.
    #[must_use]
    pub fn item_points(&self) -> f64 {
        self.items.iter().map(|item| item.score).sum()
    }

    fn check_scores(&self) -> Result<(), CatalogError> {
        let invalid = std::iter::once(self.score)
            .chain(self.items.iter().map(|item| item.score))
            .find(|score| !score.is_finite() || *score < 0.0);
        match invalid {
            Some(score) => Err(CatalogError::InvalidScore {
                group: self.id.clone(),
                score,
            }),
            None => Ok(()),
        }
    }
}

/// The read-only assessment reference data, loaded once per session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    groups: Vec<CatalogGroup>,
    index: HashMap<GroupId, usize>,
}

impl Catalog {
    /// A catalog with no groups; screens render zero items from it.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from groups, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateGroupId` if two groups share an id and
    /// `CatalogError::InvalidScore` if any score is negative or not finite.
    pub fn new(groups: Vec<CatalogGroup>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(groups.len());
        for (pos, group) in groups.iter().enumerate() {
            group.check_scores()?;
            if index.insert(group.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateGroupId(group.id.clone()));
            }
        }
        Ok(Self { groups, index })
    }

    /// Parse the static catalog document.
    ///
    /// A missing section key is read as an empty section.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the text is not a valid document, a group lacks
    /// its section's item field, a score is negative, or group ids collide.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let raw: RawDocument = serde_json::from_str(text)?;
        let mut groups = Vec::new();
        for (section, raw_groups) in [
            (Section::VitalSigns, raw.vital_signs),
            (Section::Drugs, raw.drugs),
            (Section::Equipment, raw.equipment),
        ] {
            for raw_group in raw_groups {
                groups.push(raw_group.into_group(section)?);
            }
        }
        Self::new(groups)
    }

    #[must_use]
    pub fn groups(&self) -> &[CatalogGroup] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, id: &str) -> Option<&CatalogGroup> {
        self.index.get(id).map(|pos| &self.groups[*pos])
    }

    /// Groups of one section in catalog order.
    pub fn section(&self, section: Section) -> impl Iterator<Item = &CatalogGroup> {
        self.groups.iter().filter(move |group| group.section == section)
    }

    #[must_use]
    pub fn section_group_ids(&self, section: Section) -> Vec<GroupId> {
        self.section(section).map(|group| group.id.clone()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(CatalogGroup::item_count).sum()
    }
}

//
// ─── WIRE SHAPE ────────────────────────────────────────────────────────────────
//

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    vital_signs: Vec<RawGroup>,
    #[serde(default)]
    drugs: Vec<RawGroup>,
    #[serde(default)]
    equipment: Vec<RawGroup>,
}

#[derive(Deserialize)]
struct RawGroup {
    id: String,
    name: String,
    #[serde(default)]
    score: f64,
    items: Option<Vec<CatalogItem>>,
    criteria: Option<Vec<CatalogItem>>,
    checklist: Option<Vec<CatalogItem>>,
}

impl RawGroup {
    fn into_group(self, section: Section) -> Result<CatalogGroup, CatalogError> {
        let items = match section {
            Section::VitalSigns => self.items,
            Section::Drugs => self.criteria,
            Section::Equipment => self.checklist,
        };
        let id = GroupId::new(self.id);
        let Some(items) = items else {
            return Err(CatalogError::MissingItems {
                group: id,
                section: section.key(),
                field: section.items_field(),
            });
        };
        Ok(CatalogGroup::new(id, section, self.name, self.score, items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "vital_signs": [
            {"id": "bp", "name": "Blood Pressure", "score": 4,
             "items": [{"description": "Select cuff size", "score": 1},
                       {"description": "Auscultate", "score": 3}]}
        ],
        "drugs": [
            {"id": "aspirin", "name": "Aspirin", "score": 2,
             "criteria": [{"description": "Indications", "score": 2}]}
        ],
        "equipment": [
            {"id": "bvm", "name": "Bag Valve Mask", "score": 5,
             "checklist": [{"description": "Seal check", "score": 5}]}
        ]
    }"#;

    #[test]
    fn parses_all_sections_with_their_item_fields() {
        let catalog = Catalog::from_json(DOC).unwrap();
        assert_eq!(catalog.groups().len(), 3);
        assert_eq!(catalog.item_count(), 4);

        let bp = catalog.group("bp").unwrap();
        assert_eq!(bp.section(), Section::VitalSigns);
        assert_eq!(bp.items()[1].description(), "Auscultate");
        assert!((bp.item_points() - 4.0).abs() < f64::EPSILON);

        assert_eq!(
            catalog.section_group_ids(Section::Drugs),
            vec![GroupId::new("aspirin")]
        );
        assert_eq!(catalog.group("bvm").unwrap().section(), Section::Equipment);
    }

    #[test]
    fn missing_section_reads_as_empty() {
        let catalog = Catalog::from_json(r#"{"drugs": []}"#).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.section(Section::VitalSigns).count(), 0);
    }

    #[test]
    fn rejects_group_using_another_sections_field() {
        let err = Catalog::from_json(
            r#"{"drugs": [{"id": "x", "name": "X", "score": 1, "items": []}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingItems { field: "criteria", .. }
        ));
    }

    #[test]
    fn rejects_duplicate_ids_across_sections() {
        let err = Catalog::from_json(
            r#"{
                "vital_signs": [{"id": "dup", "name": "A", "score": 0, "items": []}],
                "equipment": [{"id": "dup", "name": "B", "score": 0, "checklist": []}]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateGroupId(id) if id.as_str() == "dup"));
    }

    fn single_item_doc(score: &str) -> String {
        format!(
            r#"{{"vital_signs": [{{"id": "a", "name": "A", "score": 1,
                "items": [{{"description": "d", "score": {score}}}]}}]}}"#
        )
    }

    #[test]
    fn accepts_integral_and_fractional_scores() {
        let whole = Catalog::from_json(&single_item_doc("2.0")).unwrap();
        assert!((whole.group("a").unwrap().item_points() - 2.0).abs() < f64::EPSILON);

        let half = Catalog::from_json(&single_item_doc("1.5")).unwrap();
        assert!((half.group("a").unwrap().items()[0].score() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_negative_scores() {
        let err = Catalog::from_json(&single_item_doc("-1")).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidScore { ref group, score } if group.as_str() == "a" && score < 0.0
        ));
    }

    #[test]
    fn rejects_non_finite_scores() {
        let group = CatalogGroup::new(
            "inf",
            Section::Drugs,
            "Inf",
            1.0,
            vec![CatalogItem::new("x", f64::INFINITY)],
        );
        assert!(matches!(
            Catalog::new(vec![group]),
            Err(CatalogError::InvalidScore { .. })
        ));
    }

    #[test]
    fn declared_score_is_kept_but_not_trusted() {
        let group = CatalogGroup::new(
            "g",
            Section::Equipment,
            "G",
            99.0,
            vec![CatalogItem::new("a", 1.0), CatalogItem::new("b", 2.0)],
        );
        assert!((group.declared_score() - 99.0).abs() < f64::EPSILON);
        assert!((group.item_points() - 3.0).abs() < f64::EPSILON);
    }
}
