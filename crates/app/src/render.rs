//! Plain-text rendering of the assessment screens.

use std::fmt::{self, Write};

use assess_core::model::{CompetencyLevel, Section};
use assess_core::scoring::{AssessmentSummary, REVIEW_THRESHOLD};
use services::AssessmentSession;

use crate::routes::Screen;

/// Render `screen` with its navigation footer.
///
/// # Errors
///
/// Returns `fmt::Error` if a formatter fails.
pub fn screen(session: &AssessmentSession, screen: Screen) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_screen(&mut out, session, screen)?;
    Ok(out)
}

fn write_screen(out: &mut String, session: &AssessmentSession, screen: Screen) -> fmt::Result {
    match screen {
        Screen::Home => write_home(out, session)?,
        Screen::Section(section) => write_section(out, session, section)?,
        Screen::Summary => write_summary(out, &session.summary())?,
    }
    write_footer(out, screen)
}

fn write_home(out: &mut String, session: &AssessmentSession) -> fmt::Result {
    writeln!(out, "{}", Screen::Home.title())?;
    writeln!(
        out,
        "Comprehensive checklist for emergency medical technician training and certification"
    )?;
    writeln!(out)?;

    let catalog = session.catalog();
    for section in Section::ALL {
        let groups = catalog.section(section).count();
        let items: usize = catalog.section(section).map(|g| g.item_count()).sum();
        let progress = session.section_progress(section);
        writeln!(
            out,
            "  {:<34} {groups:>3} groups, {items:>4} {:<9} {}/{} done   {}",
            section.title(),
            section.items_label(),
            progress.checked,
            progress.total,
            section.route(),
        )?;
    }

    let total = session.total_progress();
    writeln!(out)?;
    writeln!(
        out,
        "Items completed: {}/{} ({})",
        total.checked,
        total.total,
        percent(total.percentage())
    )
}

fn write_section(out: &mut String, session: &AssessmentSession, section: Section) -> fmt::Result {
    let total = session.total_progress();
    writeln!(out, "{}", section.title())?;
    writeln!(
        out,
        "Overall Progress {}/{} ({})",
        total.checked,
        total.total,
        percent(total.percentage())
    )?;

    let mut groups = session.catalog().section(section).peekable();
    if groups.peek().is_none() {
        writeln!(out)?;
        writeln!(out, "No assessment items available.")?;
    }

    for group in groups {
        let progress = session.group_progress(group.id().as_str());
        writeln!(out)?;
        writeln!(
            out,
            "{} [{}]  {}/{} {} completed, {} points  {}",
            group.name(),
            group.id(),
            progress.checked,
            progress.total,
            section.items_label(),
            group.item_points(),
            percent(progress.percentage()),
        )?;
        for (index, item) in group.items().iter().enumerate() {
            let mark = if session.progress().is_checked(group.id().as_str(), index) {
                'x'
            } else {
                ' '
            };
            writeln!(
                out,
                "  [{mark}] {index:>2}. {} ({} pt)",
                item.description(),
                item.score()
            )?;
        }
    }

    let score = session.section_score(section);
    writeln!(out)?;
    writeln!(
        out,
        "Section score: {} of {} points ({}), {}",
        score.earned_points,
        score.total_points,
        percent(score.percentage),
        score.competency_level
    )
}

fn write_summary(out: &mut String, summary: &AssessmentSummary) -> fmt::Result {
    let overall = &summary.overall;
    writeln!(out, "{}", Screen::Summary.title())?;
    writeln!(out)?;
    writeln!(out, "Overall Score:    {}", percent(overall.percentage))?;
    writeln!(
        out,
        "Points Earned:    {} ({} total)",
        overall.earned_points, overall.total_points
    )?;
    writeln!(out, "Competency Level: {}", overall.competency_level)?;
    writeln!(
        out,
        "Items Completed:  {}/{}",
        summary.items.checked, summary.items.total
    )?;

    writeln!(out)?;
    writeln!(out, "Competency Level Guide")?;
    for level in CompetencyLevel::ALL {
        writeln!(
            out,
            "  {:<13} {:<10} {}",
            level.label(),
            level.range(),
            level.description()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Section Breakdown")?;
    for (section, score) in &summary.sections {
        writeln!(
            out,
            "  {:<34} {:>4}  {} of {} points  {:<13} {}",
            section.title(),
            percent(score.percentage),
            score.earned_points,
            score.total_points,
            score.competency_level.label(),
            section.route(),
        )?;
    }

    let recommendation = summary.recommendation();
    writeln!(out)?;
    writeln!(out, "Recommendations")?;
    writeln!(out, "  {}", recommendation.headline())?;
    writeln!(out, "  {}", recommendation.advice())?;

    let weak = summary.sections_needing_review();
    if !weak.is_empty() {
        let names: Vec<&str> = weak.iter().map(|s| s.title()).collect();
        writeln!(out, "  Below {REVIEW_THRESHOLD}%: {}", names.join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "Next Steps")?;
    for step in [
        "Review any sections where you scored below 75%",
        "Retake the assessment after additional study",
        "Practice hands-on skills with supervision",
        "Seek mentorship from experienced EMTs",
    ] {
        writeln!(out, "  - {step}")?;
    }
    Ok(())
}

fn write_footer(out: &mut String, screen: Screen) -> fmt::Result {
    writeln!(out)?;
    let next = screen.next();
    if next == Screen::Home {
        writeln!(out, "Home: {}", next.path())
    } else {
        writeln!(out, "Next: {} ({})   Home: /", next.title(), next.path())
    }
}

fn percent(value: f64) -> String {
    format!("{}%", value.round())
}
