//! HTML fragments for the web front end. All data text is escaped.

use std::fmt::Write;

use url::form_urlencoded;

use super::view::{
    AnnouncementsView, CompanyTarget, CompanyView, Layout, PlacementsView, ScheduleBody, ScheduleRow,
    ScheduleView, SearchView, SectionContent, StatusBadge, NO_ANNOUNCEMENTS, NO_CANDIDATES,
    NO_PLACEMENTS, NO_PLACEMENT_HITS, NO_UPDATES,
};
use crate::model::{section_label, Day, DayFilter};
use crate::nav::PageName;

/// Escapes text for element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn encode(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect::<String>()
}

/// Percent-encoding for a single path segment.
fn encode_segment(s: &str) -> String {
    encode(s).replace('+', "%20")
}

pub fn company_href(target: &CompanyTarget) -> String {
    format!(
        "/day/{}/company/{}?name={}",
        target.day,
        encode_segment(&target.sheet_name),
        encode(&target.company_name)
    )
}

/// Surrounding page furniture.
pub struct Chrome<'a> {
    pub active: Option<PageName>,
    pub visits: &'a str,
    pub refresh_secs: u64,
    pub rendered_at: &'a str,
    pub search_day: Option<Day>,
}

pub fn page(title: &str, chrome: &Chrome, body: &str) -> String {
    let mut nav = String::new();
    for name in PageName::ALL {
        let class = if chrome.active == Some(name) { "nav-link active" } else { "nav-link" };
        let _ = write!(nav, r#"<a class="{}" href="{}">{}</a>"#, class, name.href(), name.title());
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta http-equiv="refresh" content="{refresh}">
<title>{title}</title>
</head>
<body>
<header><nav>{nav}</nav>{search}</header>
<main>
{body}
</main>
<footer><span id="visit-count">Visits: {visits}</span> <span>Updated {rendered}</span></footer>
</body>
</html>
"#,
        refresh = chrome.refresh_secs,
        title = escape(title),
        nav = nav,
        search = search_form(chrome.search_day, ""),
        body = body,
        visits = escape(chrome.visits),
        rendered = escape(chrome.rendered_at),
    )
}

pub fn search_form(day: Option<Day>, roll_no: &str) -> String {
    let mut options = String::from(r#"<option value="">Day</option>"#);
    for d in Day::all() {
        let selected = if Some(d) == day { " selected" } else { "" };
        let _ = write!(options, r#"<option value="{d}"{selected}>Day {d}</option>"#);
    }
    format!(
        r#"<form class="search" action="/search" method="get"><input name="roll" placeholder="Roll number" value="{}"><select name="day">{}</select><button type="submit">Search</button></form>"#,
        escape(roll_no),
        options
    )
}

pub fn announcements(view: &AnnouncementsView) -> String {
    let Some(lines) = &view.marquee else {
        return format!("<p>{}</p>", NO_ANNOUNCEMENTS);
    };
    let mut html = String::new();
    for line in lines {
        let _ = write!(html, "<p><strong>{} {}</strong></p>", line.kind.icon(), escape(&line.text));
    }
    format!(r#"<div id="announcements-marquee" class="marquee">{}</div>"#, html)
}

pub fn latest_updates(view: &AnnouncementsView) -> String {
    if view.latest.is_empty() {
        return format!("<p>{}</p>", NO_UPDATES);
    }
    let mut html = String::new();
    for text in &view.latest {
        let _ = write!(html, "<p>• {}</p>", escape(text));
    }
    html
}

pub fn home(view: &AnnouncementsView) -> String {
    format!(
        r#"<section><h2>Announcements</h2>{}</section><section><h2>Latest Updates</h2><div id="latest-updates">{}</div></section>"#,
        announcements(view),
        latest_updates(view)
    )
}

fn badge(badge: &Option<StatusBadge>) -> String {
    match badge {
        None => String::new(),
        Some(b) => format!(
            r#"<span class="status-badge {c}"><span class="status-icon {c}"></span>{t}</span>"#,
            c = escape(&b.color),
            t = escape(&b.text)
        ),
    }
}

pub fn schedule(view: &ScheduleView) -> String {
    match &view.body {
        ScheduleBody::NotAvailable => format!(
            r#"<div class="info-message"><h3>ℹ️ Schedule Not Available</h3><p>{}</p></div>"#,
            escape(&view.not_available_message())
        ),
        ScheduleBody::Rows { layout: Layout::Table, rows } => schedule_table(rows),
        ScheduleBody::Rows { layout: Layout::Cards, rows } => schedule_cards(rows),
    }
}

fn schedule_table(rows: &[ScheduleRow]) -> String {
    let mut html = String::from(
        r#"<div class="schedule-table-container"><table class="schedule-table"><thead><tr><th>SL. NO.</th><th>TIME</th><th>COMPANY NAME</th><th>ARRIVAL STATUS</th><th>CURRENT STATUS</th><th>PROGRAMMES</th><th>VENUE</th><th>REMARKS</th></tr></thead><tbody>"#,
    );
    for r in rows {
        let _ = write!(
            html,
            r#"<tr data-sheet="{sheet}"><td>{sl}</td><td>{time}</td><td><a href="{href}"><strong>{company}</strong></a></td><td>{arrival}</td><td>{current}</td><td>{prog}</td><td>{venue}</td><td>{remarks}</td></tr>"#,
            sheet = escape(&r.target.sheet_name),
            sl = escape(&r.sl_no),
            time = escape(&r.time),
            href = escape(&company_href(&r.target)),
            company = escape(&r.company),
            arrival = badge(&r.arrival),
            current = badge(&r.current),
            prog = escape(&r.programmes),
            venue = escape(&r.venue),
            remarks = escape(&r.remarks),
        );
    }
    html.push_str("</tbody></table></div>");
    html
}

fn schedule_cards(rows: &[ScheduleRow]) -> String {
    let mut html = String::from(r#"<div class="company-cards">"#);
    for r in rows {
        let _ = write!(
            html,
            r#"<a class="company-card" data-sheet="{sheet}" href="{href}"><h3>{company}</h3><div class="company-card-info"><div class="info-row"><span>⏰</span><span>{time}</span></div><div class="info-row"><span>📍</span><span>{venue}</span></div><div class="info-row"><span>🎓</span><span>{prog}</span></div><div class="info-row"><span>Arrival:</span>{arrival}</div><div class="info-row"><span>Status:</span>{current}</div></div><p><em>{remarks}</em></p></a>"#,
            sheet = escape(&r.target.sheet_name),
            href = escape(&company_href(&r.target)),
            company = escape(&r.company),
            time = escape(&r.time),
            venue = escape(&r.venue),
            prog = escape(&r.programmes),
            arrival = badge(&r.arrival),
            current = badge(&r.current),
            remarks = escape(&r.remarks),
        );
    }
    html.push_str("</div>");
    html
}

/// Just the candidate table region; the tab bar is left alone.
pub fn company_content(content: &SectionContent) -> String {
    let rows = match content {
        SectionContent::Empty => return format!("<p>{}</p>", NO_CANDIDATES),
        SectionContent::Rows(rows) => rows,
    };
    let mut html = String::from(
        r#"<div class="schedule-table-container"><table class="schedule-table"><thead><tr><th>Sl. No</th><th>Student Name</th><th>Roll No</th><th>Discipline</th><th>Campus</th></tr></thead><tbody>"#,
    );
    for c in rows {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td><strong>{}</strong></td><td>{}</td><td>{}</td></tr>",
            escape(&c.sl_no),
            escape(&c.student_name),
            escape(&c.roll_no),
            escape(&c.discipline),
            escape(&c.campus),
        );
    }
    html.push_str("</tbody></table></div>");
    html
}

pub fn company(view: &CompanyView) -> String {
    let base = company_href(&view.target);
    let mut tabs = String::new();
    for tab in view.visible_tabs() {
        let class = if tab.active { "company-tab-btn active" } else { "company-tab-btn" };
        let _ = write!(
            tabs,
            r#"<a class="{}" data-section="{}" href="{}&amp;section={}">{}</a>"#,
            class,
            tab.section.key(),
            escape(&base),
            tab.section.key(),
            tab.label
        );
    }

    let heading = match &view.active {
        Some(key) => format!("<h3>{}</h3>", escape(section_label(key))),
        None => String::new(),
    };

    format!(
        r#"<a class="back-btn" href="/day/{day}">← Back</a><h2 id="company-name">{name}</h2><p id="company-details">Day {day} - {sheet}</p><nav class="company-tabs">{tabs}</nav><div id="company-content">{heading}{content}</div>"#,
        day = view.target.day,
        name = escape(&view.target.company_name),
        sheet = escape(&view.target.sheet_name),
        tabs = tabs,
        heading = heading,
        content = company_content(&view.content),
    )
}

pub fn placements(view: &PlacementsView) -> String {
    let mut tabs = String::new();
    let filters = std::iter::once(DayFilter::All).chain(Day::all().map(DayFilter::Only));
    for f in filters {
        let class = if f == view.filter { "tab-btn active" } else { "tab-btn" };
        let label = match f {
            DayFilter::All => "All Days".to_string(),
            DayFilter::Only(d) => format!("Day {}", d),
        };
        let _ = write!(tabs, r#"<a class="{}" href="/placements?day={}">{}</a>"#, class, f, label);
    }

    let table = if view.rows.is_empty() {
        format!("<p>{}</p>", NO_PLACEMENTS)
    } else {
        let mut html = String::from(
            r#"<div class="schedule-table-container"><table class="schedule-table"><thead><tr><th>Day</th><th>Date</th><th>Time</th><th>Company</th><th>Student Name</th><th>Roll No</th><th>Department</th><th>Campus</th><th>Designation</th><th>CTC</th></tr></thead><tbody>"#,
        );
        for p in &view.rows {
            let day = p.day.map(|d| d.to_string()).unwrap_or_default();
            let _ = write!(
                html,
                "<tr><td><strong>Day {}</strong></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><strong>{}</strong></td><td>{}</td><td>{}</td><td>{}</td><td><strong>{}</strong></td></tr>",
                day,
                escape(&p.date),
                escape(&p.time),
                escape(&p.company_name),
                escape(&p.student_name),
                escape(&p.roll_no),
                escape(&p.department),
                escape(&p.campus),
                escape(&p.designation),
                escape(&p.ctc),
            );
        }
        html.push_str("</tbody></table></div>");
        html
    };

    format!(
        r#"<nav class="placements-tabs">{}</nav><div id="placements-content">{}</div><p><a href="/placements.csv">Download CSV</a></p>"#,
        tabs, table
    )
}

pub fn search(view: &SearchView) -> String {
    let (roll_no, day, shortlists, placements) = match view {
        SearchView::Error(msg) => {
            return format!(
                r#"<div class="result-section"><p class="error">❌ {}</p></div>"#,
                escape(msg)
            )
        }
        SearchView::Results {
            roll_no,
            day,
            shortlists,
            placements,
        } => (roll_no, day, shortlists, placements),
    };

    let mut html = format!("<h3>🔍 Search Results for {}</h3>", escape(roll_no));

    let _ = write!(html, r#"<div class="result-section"><h3>📋 Company Shortlists (Day {})</h3>"#, day);
    if shortlists.is_empty() {
        let _ = write!(html, "<p>{}</p>", SearchView::no_shortlists_message(*day));
    }
    for hit in shortlists {
        let _ = write!(
            html,
            r#"<div class="result-item"><h4>✓ {}</h4><p><strong>Section:</strong> {}</p><p><strong>Name:</strong> {}</p><p><strong>Roll No:</strong> {}</p><p><strong>Campus:</strong> {}</p><p><strong>Discipline:</strong> {}</p><p><strong>Time:</strong> {}</p><p><strong>Venue:</strong> {}</p></div>"#,
            escape(&hit.company),
            hit.section.label(),
            escape(&hit.candidate.student_name),
            escape(&hit.candidate.roll_no),
            escape(&hit.candidate.campus),
            escape(&hit.candidate.discipline),
            escape(&hit.time),
            escape(&hit.venue),
        );
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="result-section"><h3>🎉 Placements (All Days)</h3>"#);
    if placements.is_empty() {
        let _ = write!(html, "<p>{}</p>", NO_PLACEMENT_HITS);
    }
    for p in placements {
        let day = p.day.map(|d| d.to_string()).unwrap_or_default();
        let _ = write!(
            html,
            r#"<div class="result-item"><h4>✅ Day {} - {} at {}</h4><p><strong>Company:</strong> {}</p><p><strong>Student Name:</strong> {}</p><p><strong>Roll No:</strong> {}</p><p><strong>Designation:</strong> {}</p><p><strong>CTC:</strong> {}</p><p><strong>Campus:</strong> {}</p><p><strong>Department:</strong> {}</p></div>"#,
            day,
            escape(&p.date),
            escape(&p.time),
            escape(&p.company_name),
            escape(&p.student_name),
            escape(&p.roll_no),
            escape(&p.designation),
            escape(&p.ctc),
            escape(&p.campus),
            escape(&p.department),
        );
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<b>"A&B's"</b>"#), "&lt;b&gt;&quot;A&amp;B&#39;s&quot;&lt;/b&gt;");
    }

    #[test]
    fn company_links_are_encoded() {
        let target = CompanyTarget {
            day: Day::new(2).unwrap(),
            sheet_name: "acme corp".into(),
            company_name: "Acme & Sons".into(),
        };
        assert_eq!(company_href(&target), "/day/2/company/acme%20corp?name=Acme+%26+Sons");
    }

    #[test]
    fn search_error_replaces_results() {
        let html = search(&SearchView::error("Please enter a roll number"));
        assert!(html.contains("Please enter a roll number"));
        assert!(!html.contains("Search Results"));
    }
}
