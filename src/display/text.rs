use std::io::{self, Write};

use super::view::{
    AnnouncementsView, CompanyView, Layout, PlacementsView, ScheduleBody, ScheduleView, SearchView,
    SectionContent, StatusBadge, NO_ANNOUNCEMENTS, NO_CANDIDATES, NO_PLACEMENTS, NO_PLACEMENT_HITS,
    NO_UPDATES,
};
use crate::model::section_label;

fn badge(b: &Option<StatusBadge>) -> String {
    match b {
        Some(b) if b.color.is_empty() => b.text.clone(),
        Some(b) => format!("{} ({})", b.text, b.color),
        None => "-".to_string(),
    }
}

pub fn write_announcements<W: Write>(out: &mut W, view: &AnnouncementsView, visits: &str) -> io::Result<()> {
    writeln!(out, "=== Announcements ===")?;
    match &view.marquee {
        None => writeln!(out, "{}", NO_ANNOUNCEMENTS)?,
        // the marquee repeats itself; print one pass
        Some(lines) => {
            for line in &lines[..lines.len() / 2] {
                writeln!(out, "{} {}", line.kind.icon(), line.text)?;
            }
        }
    }

    writeln!(out, "\n=== Latest Updates ===")?;
    if view.latest.is_empty() {
        writeln!(out, "{}", NO_UPDATES)?;
    }
    for text in &view.latest {
        writeln!(out, "  • {}", text)?;
    }
    writeln!(out, "\nVisits: {}", visits)
}

/// Table layout prints one line per company; card layout prints a block each.
pub fn write_schedule<W: Write>(out: &mut W, view: &ScheduleView) -> io::Result<()> {
    writeln!(out, "=== Day {} Schedule ===", view.day)?;
    let (layout, rows) = match &view.body {
        ScheduleBody::NotAvailable => return writeln!(out, "{}", view.not_available_message()),
        ScheduleBody::Rows { layout, rows } => (layout, rows),
    };

    match layout {
        Layout::Table => {
            for r in rows {
                writeln!(
                    out,
                    "{:>3}  {:<8} {:<28} arrival: {:<18} status: {:<18} {} | {} | {} [{}]",
                    r.sl_no,
                    r.time,
                    r.company,
                    badge(&r.arrival),
                    badge(&r.current),
                    r.programmes,
                    r.venue,
                    r.remarks,
                    r.target.sheet_name
                )?;
            }
        }
        Layout::Cards => {
            for r in rows {
                writeln!(out, "\n{} [{}]", r.company, r.target.sheet_name)?;
                writeln!(out, "  ⏰ {}", r.time)?;
                writeln!(out, "  📍 {}", r.venue)?;
                writeln!(out, "  🎓 {}", r.programmes)?;
                writeln!(out, "  Arrival: {}", badge(&r.arrival))?;
                writeln!(out, "  Status:  {}", badge(&r.current))?;
                if !r.remarks.is_empty() {
                    writeln!(out, "  {}", r.remarks)?;
                }
            }
        }
    }
    Ok(())
}

pub fn write_company<W: Write>(out: &mut W, view: &CompanyView) -> io::Result<()> {
    writeln!(out, "=== {} ===", view.target.company_name)?;
    writeln!(out, "Day {} - {}", view.target.day, view.target.sheet_name)?;

    let tabs: Vec<String> = view
        .visible_tabs()
        .map(|t| if t.active { format!("[{}]", t.label) } else { t.label.to_string() })
        .collect();
    if !tabs.is_empty() {
        writeln!(out, "Sections: {}", tabs.join(" | "))?;
    }
    if let Some(key) = &view.active {
        writeln!(out, "\n{}", section_label(key))?;
    }

    match &view.content {
        SectionContent::Empty => writeln!(out, "{}", NO_CANDIDATES)?,
        SectionContent::Rows(rows) => {
            for c in rows {
                writeln!(
                    out,
                    "{:>4}  {:<28} {:<14} {:<20} {}",
                    c.sl_no, c.student_name, c.roll_no, c.discipline, c.campus
                )?;
            }
        }
    }
    Ok(())
}

pub fn write_placements<W: Write>(out: &mut W, view: &PlacementsView) -> io::Result<()> {
    writeln!(out, "=== Placements (day: {}) ===", view.filter)?;
    if view.rows.is_empty() {
        return writeln!(out, "{}", NO_PLACEMENTS);
    }
    for p in &view.rows {
        let day = p.day.map(|d| d.to_string()).unwrap_or_default();
        writeln!(
            out,
            "Day {}  {} {}  {:<24} {:<24} {:<14} {} / {}  {}  {}",
            day, p.date, p.time, p.company_name, p.student_name, p.roll_no, p.department, p.campus, p.designation, p.ctc
        )?;
    }
    writeln!(out, "Total: {}", view.rows.len())
}

pub fn write_search<W: Write>(out: &mut W, view: &SearchView) -> io::Result<()> {
    let (roll_no, day, shortlists, placements) = match view {
        SearchView::Error(msg) => return writeln!(out, "❌ {}", msg),
        SearchView::Results {
            roll_no,
            day,
            shortlists,
            placements,
        } => (roll_no, day, shortlists, placements),
    };

    writeln!(out, "🔍 Search Results for {}", roll_no)?;
    writeln!(out, "\n📋 Company Shortlists (Day {})", day)?;
    if shortlists.is_empty() {
        writeln!(out, "{}", SearchView::no_shortlists_message(*day))?;
    }
    for hit in shortlists {
        writeln!(out, "  ✓ {} - {}", hit.company, hit.section.label())?;
        writeln!(
            out,
            "    {} ({}), {}, {}",
            hit.candidate.student_name, hit.candidate.roll_no, hit.candidate.discipline, hit.candidate.campus
        )?;
        writeln!(out, "    {} at {}", hit.time, hit.venue)?;
    }

    writeln!(out, "\n🎉 Placements (All Days)")?;
    if placements.is_empty() {
        writeln!(out, "{}", NO_PLACEMENT_HITS)?;
    }
    for p in placements {
        let day = p.day.map(|d| d.to_string()).unwrap_or_default();
        writeln!(out, "  ✅ Day {} - {} at {}: {} ({}), {}", day, p.date, p.time, p.company_name, p.designation, p.ctc)?;
    }
    Ok(())
}
