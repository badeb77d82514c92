use std::fmt;

/// Five-band qualitative label derived from a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompetencyLevel {
    Expert,
    Advanced,
    Intermediate,
    Beginner,
    NeedsReview,
}

impl CompetencyLevel {
    /// Bands from highest to lowest.
    pub const ALL: [CompetencyLevel; 5] = [
        CompetencyLevel::Expert,
        CompetencyLevel::Advanced,
        CompetencyLevel::Intermediate,
        CompetencyLevel::Beginner,
        CompetencyLevel::NeedsReview,
    ];

    /// Classify a percentage. Lower bounds are inclusive.
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            CompetencyLevel::Expert
        } else if percentage >= 75.0 {
            CompetencyLevel::Advanced
        } else if percentage >= 60.0 {
            CompetencyLevel::Intermediate
        } else if percentage >= 40.0 {
            CompetencyLevel::Beginner
        } else {
            CompetencyLevel::NeedsReview
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CompetencyLevel::Expert => "Expert",
            CompetencyLevel::Advanced => "Advanced",
            CompetencyLevel::Intermediate => "Intermediate",
            CompetencyLevel::Beginner => "Beginner",
            CompetencyLevel::NeedsReview => "Needs Review",
        }
    }

    #[must_use]
    pub fn range(self) -> &'static str {
        match self {
            CompetencyLevel::Expert => "90-100%",
            CompetencyLevel::Advanced => "75-89%",
            CompetencyLevel::Intermediate => "60-74%",
            CompetencyLevel::Beginner => "40-59%",
            CompetencyLevel::NeedsReview => "Below 40%",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            CompetencyLevel::Expert => "Mastered all competencies",
            CompetencyLevel::Advanced => "Strong understanding",
            CompetencyLevel::Intermediate => "Moderate understanding",
            CompetencyLevel::Beginner => "Basic understanding",
            CompetencyLevel::NeedsReview => "Requires further study",
        }
    }
}

impl fmt::Display for CompetencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Advice shown under the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Excellent,
    Strong,
    ContinueLearning,
    FurtherStudy,
}

impl Recommendation {
    #[must_use]
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Recommendation::Excellent
        } else if percentage >= 75.0 {
            Recommendation::Strong
        } else if percentage >= 60.0 {
            Recommendation::ContinueLearning
        } else {
            Recommendation::FurtherStudy
        }
    }

    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            Recommendation::Excellent => "Excellent Performance!",
            Recommendation::Strong => "Strong Performance",
            Recommendation::ContinueLearning => "Continue Learning",
            Recommendation::FurtherStudy => "Further Study Recommended",
        }
    }

    #[must_use]
    pub fn advice(self) -> &'static str {
        match self {
            Recommendation::Excellent => {
                "You have demonstrated expert-level competency across all EMT assessment areas. \
                 Continue to maintain these high standards through regular practice \
                 and skill refreshers."
            }
            Recommendation::Strong => {
                "You have achieved advanced competency. \
                 Focus on reviewing any sections below 75% to reach expert level."
            }
            Recommendation::ContinueLearning => {
                "You have intermediate understanding. \
                 Review sections with lower scores and practice the assessment items you missed."
            }
            Recommendation::FurtherStudy => {
                "Review all assessment sections carefully. \
                 Focus on sections with the lowest scores and study the specific items \
                 you need to improve."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(CompetencyLevel::from_percentage(100.0), CompetencyLevel::Expert);
        assert_eq!(CompetencyLevel::from_percentage(90.0), CompetencyLevel::Expert);
        assert_eq!(CompetencyLevel::from_percentage(89.999), CompetencyLevel::Advanced);
        assert_eq!(CompetencyLevel::from_percentage(75.0), CompetencyLevel::Advanced);
        assert_eq!(CompetencyLevel::from_percentage(60.0), CompetencyLevel::Intermediate);
        assert_eq!(CompetencyLevel::from_percentage(59.999), CompetencyLevel::Beginner);
        assert_eq!(CompetencyLevel::from_percentage(40.0), CompetencyLevel::Beginner);
        assert_eq!(CompetencyLevel::from_percentage(39.9), CompetencyLevel::NeedsReview);
        assert_eq!(CompetencyLevel::from_percentage(0.0), CompetencyLevel::NeedsReview);
    }

    #[test]
    fn needs_review_label_has_a_space() {
        assert_eq!(CompetencyLevel::NeedsReview.to_string(), "Needs Review");
        assert_eq!(CompetencyLevel::NeedsReview.range(), "Below 40%");
    }

    #[test]
    fn recommendation_thresholds() {
        assert_eq!(Recommendation::for_percentage(95.0), Recommendation::Excellent);
        assert_eq!(Recommendation::for_percentage(75.0), Recommendation::Strong);
        assert_eq!(Recommendation::for_percentage(74.9), Recommendation::ContinueLearning);
        assert_eq!(Recommendation::for_percentage(10.0), Recommendation::FurtherStudy);
    }
}
