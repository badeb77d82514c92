use std::fmt;

/// The three parallel catalogs. Structurally identical, they differ only in
/// the JSON field holding their items and in display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    VitalSigns,
    Drugs,
    Equipment,
}

impl Section {
    /// All sections in catalog order.
    pub const ALL: [Section; 3] = [Section::VitalSigns, Section::Drugs, Section::Equipment];

    /// Top-level key of this section in the catalog document.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Section::VitalSigns => "vital_signs",
            Section::Drugs => "drugs",
            Section::Equipment => "equipment",
        }
    }

    /// Name of the per-group field carrying the items.
    #[must_use]
    pub fn items_field(self) -> &'static str {
        match self {
            Section::VitalSigns => "items",
            Section::Drugs => "criteria",
            Section::Equipment => "checklist",
        }
    }

    /// Label used when counting a group's items ("3/5 criteria completed").
    #[must_use]
    pub fn items_label(self) -> &'static str {
        self.items_field()
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Section::VitalSigns => "Vital Signs Assessment",
            Section::Drugs => "Medications & Fluids Assessment",
            Section::Equipment => "Medical Equipment Assessment",
        }
    }

    /// Path of the screen rendering this section.
    #[must_use]
    pub fn route(self) -> &'static str {
        match self {
            Section::VitalSigns => "/vital-signs",
            Section::Drugs => "/drugs",
            Section::Equipment => "/equipment",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.key() == key)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_key(section.key()), Some(section));
        }
        assert_eq!(Section::from_key("vitals"), None);
    }

    #[test]
    fn item_fields_differ_per_section() {
        assert_eq!(Section::VitalSigns.items_field(), "items");
        assert_eq!(Section::Drugs.items_field(), "criteria");
        assert_eq!(Section::Equipment.items_field(), "checklist");
    }
}
