use assess_core::model::Section;

/// Screens reachable by direct path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Section(Section),
    Summary,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Home,
        Screen::Section(Section::VitalSigns),
        Screen::Section(Section::Drugs),
        Screen::Section(Section::Equipment),
        Screen::Summary,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Screen::Home => "/",
            Screen::Section(section) => section.route(),
            Screen::Summary => "/summary",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "EMT Daily Skill Assessment",
            Screen::Section(section) => section.title(),
            Screen::Summary => "Assessment Summary",
        }
    }

    /// Accepts `vital-signs`, `/vital-signs` and `home` or `/`.
    #[must_use]
    pub fn from_arg(arg: &str) -> Option<Self> {
        let trimmed = arg.trim().trim_start_matches('/');
        if trimmed.is_empty() || trimmed == "home" {
            return Some(Screen::Home);
        }
        Self::ALL
            .into_iter()
            .find(|screen| screen.path().trim_start_matches('/') == trimmed)
    }

    /// The next screen in the assessment walk-through.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Screen::Home => Screen::Section(Section::VitalSigns),
            Screen::Section(Section::VitalSigns) => Screen::Section(Section::Drugs),
            Screen::Section(Section::Drugs) => Screen::Section(Section::Equipment),
            Screen::Section(Section::Equipment) => Screen::Summary,
            Screen::Summary => Screen::Home,
        }
    }
}
