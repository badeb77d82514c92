//! Display metrics derived from a `Catalog` and a `ProgressMap`.
//!
//! Everything here is a pure read: nothing mutates progress and nothing
//! fails. Empty inputs produce zero counts and a 0% score.

use crate::model::{Catalog, CompetencyLevel, GroupId, ProgressMap, Recommendation, Section};

/// Sections scoring below this percentage are flagged for review.
pub const REVIEW_THRESHOLD: f64 = 75.0;

/// Checked versus total items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupProgress {
    pub checked: usize,
    pub total: usize,
}

impl GroupProgress {
    /// Completion percentage, 0 when there are no items.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.checked as f64 * 100.0 / self.total as f64
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.checked == self.total
    }
}

impl std::ops::Add for GroupProgress {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            checked: self.checked + rhs.checked,
            total: self.total + rhs.total,
        }
    }
}

/// Weighted points for a set of groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionScore {
    pub total_points: f64,
    pub earned_points: f64,
    pub percentage: f64,
    pub competency_level: CompetencyLevel,
}

impl SectionScore {
    #[must_use]
    pub fn from_points(earned_points: f64, total_points: f64) -> Self {
        let percentage = points_percentage(earned_points, total_points);
        Self {
            total_points,
            earned_points,
            percentage,
            competency_level: competency_level(percentage),
        }
    }
}

impl Default for SectionScore {
    fn default() -> Self {
        Self::from_points(0.0, 0.0)
    }
}

/// Every section scored, plus the overall figures shown on the summary screen.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentSummary {
    pub sections: Vec<(Section, SectionScore)>,
    pub overall: SectionScore,
    pub items: GroupProgress,
}

impl AssessmentSummary {
    #[must_use]
    pub fn section(&self, section: Section) -> Option<&SectionScore> {
        self.sections
            .iter()
            .find(|(candidate, _)| *candidate == section)
            .map(|(_, score)| score)
    }

    #[must_use]
    pub fn recommendation(&self) -> Recommendation {
        Recommendation::for_percentage(self.overall.percentage)
    }

    /// Sections with points to earn whose score is below `REVIEW_THRESHOLD`.
    #[must_use]
    pub fn sections_needing_review(&self) -> Vec<Section> {
        self.sections
            .iter()
            .filter(|(_, score)| score.total_points > 0.0 && score.percentage < REVIEW_THRESHOLD)
            .map(|(section, _)| *section)
            .collect()
    }
}

/// Checked and total flags stored for one group; `(0, 0)` if absent.
#[must_use]
pub fn group_progress(progress: &ProgressMap, group: &str) -> GroupProgress {
    progress.get(group).map(flag_progress).unwrap_or_default()
}

/// Sum of `group_progress` over every entry in the map, catalog or not.
#[must_use]
pub fn total_progress(progress: &ProgressMap) -> GroupProgress {
    progress
        .iter()
        .map(|(_, flags)| flag_progress(flags))
        .fold(GroupProgress::default(), |acc, next| acc + next)
}

/// Points earned over `groups`, summed from item scores.
///
/// Flags missing from the map count as unchecked and flags past a group's
/// last item are ignored. Ids unknown to the catalog contribute nothing.
#[must_use]
pub fn section_score<'a>(
    catalog: &Catalog,
    progress: &ProgressMap,
    groups: impl IntoIterator<Item = &'a GroupId>,
) -> SectionScore {
    let mut earned = 0.0;
    let mut total = 0.0;
    for id in groups {
        let Some(group) = catalog.group(id.as_str()) else {
            continue;
        };
        for (index, item) in group.items().iter().enumerate() {
            let points = item.score();
            total += points;
            if progress.is_checked(id.as_str(), index) {
                earned += points;
            }
        }
    }
    SectionScore::from_points(earned, total)
}

#[must_use]
pub fn competency_level(percentage: f64) -> CompetencyLevel {
    CompetencyLevel::from_percentage(percentage)
}

/// Score every section and combine them into the overall figure.
#[must_use]
pub fn assessment_summary(catalog: &Catalog, progress: &ProgressMap) -> AssessmentSummary {
    let sections: Vec<(Section, SectionScore)> = Section::ALL
        .into_iter()
        .map(|section| {
            let ids = catalog.section_group_ids(section);
            (section, section_score(catalog, progress, &ids))
        })
        .collect();

    let (earned, total) = sections
        .iter()
        .fold((0.0, 0.0), |(earned, total), (_, score)| {
            (earned + score.earned_points, total + score.total_points)
        });

    AssessmentSummary {
        sections,
        overall: SectionScore::from_points(earned, total),
        items: total_progress(progress),
    }
}

fn flag_progress(flags: &[bool]) -> GroupProgress {
    GroupProgress {
        checked: flags.iter().filter(|flag| **flag).count(),
        total: flags.len(),
    }
}

fn points_percentage(earned: f64, total: f64) -> f64 {
    if total > 0.0 { earned * 100.0 / total } else { 0.0 }
}
