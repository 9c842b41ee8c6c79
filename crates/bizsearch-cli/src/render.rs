//! Plain-text rendering of the results table, pager and suggestions.

use std::fmt::Write as _;

use bizsearch_core::{
    meters_to_miles, Business, Category, FavoritesSet, FetchMode, SearchSession, SortDir,
    SortField,
};

const NAME_WIDTH: usize = 36;
const LOCATION_WIDTH: usize = 26;

fn sort_marker(session: &SearchSession, field: SortField) -> &'static str {
    if session.sort_field() != field {
        return "";
    }
    match session.sort_dir() {
        SortDir::Asc => " \u{25b2}",
        SortDir::Desc => " \u{25bc}",
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width - 3).collect::<String>())
    } else {
        text.to_string()
    }
}

fn fmt_miles(business: &Business) -> String {
    business.distance.map_or_else(
        || "\u{2014}".to_string(),
        |meters| format!("{:.1}", meters_to_miles(meters)),
    )
}

/// Renders the displayed results as a numbered table.
///
/// Row numbers are 1-based and are what the shell's `fav` command accepts.
pub(crate) fn render_results(session: &SearchSession, favorites: &FavoritesSet) -> String {
    let Some(results) = session.results() else {
        return String::new();
    };
    if results.is_empty() {
        let label = session.fetch_mode().map_or("results", FetchMode::label);
        return format!("No {label} are available.\n");
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4}{:<5}{:<name_w$}{:<loc_w$}{:<10}ID",
        "#",
        format!("FAV{}", sort_marker(session, SortField::Favorite)),
        format!("NAME{}", sort_marker(session, SortField::Name)),
        format!("LOCATION{}", sort_marker(session, SortField::Location)),
        format!("MILES{}", sort_marker(session, SortField::Distance)),
        name_w = NAME_WIDTH + 2,
        loc_w = LOCATION_WIDTH + 2,
    );
    for (row, business) in results.iter().enumerate() {
        let star = if favorites.has(&business.id) { "*" } else { "" };
        let _ = writeln!(
            out,
            "{:<4}{:<5}{:<name_w$}{:<loc_w$}{:<10}{}",
            row + 1,
            star,
            truncate(&business.name, NAME_WIDTH),
            truncate(&business.location.display(), LOCATION_WIDTH),
            fmt_miles(business),
            business.id,
            name_w = NAME_WIDTH + 2,
            loc_w = LOCATION_WIDTH + 2,
        );
    }
    out
}

/// Renders the pager line, with paging hints in search mode only.
pub(crate) fn render_pager(session: &SearchSession) -> Option<String> {
    let summary = session.pager_summary().ok()?;
    let mut line = format!(
        "Displaying {} \u{2014} {} of {} {}",
        summary.start, summary.end, summary.total, summary.label
    );
    let links = session.page_links();
    if links.show_prev {
        line.push_str("  [prev]");
    }
    if links.show_next {
        line.push_str("  [next]");
    }
    Some(line)
}

pub(crate) fn render_suggestions(suggestions: &[Category]) -> String {
    if suggestions.is_empty() {
        return "no matching categories\n".to_string();
    }
    let mut out = String::new();
    for (i, category) in suggestions.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {} ({})", i + 1, category.title, category.alias);
    }
    out
}
