/// Rendering of pages, metrics and auth state for the terminal
use admin_core::{AuthIdentity, UserRecord};
use admin_view::{MetricsReport, PageView};
use serde::Serialize;
use std::fmt::Write;

/// Width of the longest chart bar
const CHART_WIDTH: usize = 40;

/// JSON shape of `users list`
#[derive(Debug, Serialize)]
struct PageOutput<'a> {
    page: usize,
    total_pages: usize,
    total_matches: usize,
    users: &'a [&'a UserRecord],
}

/// Login/logout toggle label for the current identity
pub fn affordance(identity: Option<&AuthIdentity>) -> &'static str {
    if identity.is_some() {
        "Logout"
    } else {
        "Login"
    }
}

/// Table of the page's rows followed by "Page X of Y"
pub fn render_page(view: &PageView<'_>) -> String {
    let mut out = String::new();

    if view.is_empty() {
        out.push_str("No users found.\n");
    } else {
        let rows: Vec<[String; 5]> = view
            .rows
            .iter()
            .map(|user| {
                [
                    user.id.to_string(),
                    user.name.clone(),
                    user.email.clone(),
                    user.role.clone(),
                    created_label(user),
                ]
            })
            .collect();
        let header = ["ID", "Name", "Email", "Role", "Created"].map(String::from);

        let mut widths = header.clone().map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(&mut out, &header, &widths);
        for row in &rows {
            write_row(&mut out, row, &widths);
        }
    }

    let _ = writeln!(
        out,
        "Page {} of {}",
        view.page,
        view.total_pages.max(1)
    );
    out
}

pub fn render_page_json(view: &PageView<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&PageOutput {
        page: view.page,
        total_pages: view.total_pages,
        total_matches: view.total_matches,
        users: &view.rows,
    })
}

/// One line per window with its count and a bar
pub fn render_metrics(report: &MetricsReport) -> String {
    let chart = report.chart();
    let bars = chart.bars(CHART_WIDTH);
    let label_width = chart
        .labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);
    let count_width = chart
        .values
        .iter()
        .map(|value| value.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "User registrations as of {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for ((label, value), bar) in chart.labels.iter().zip(&chart.values).zip(bars) {
        let _ = writeln!(
            out,
            "  {label:<label_width$}  {value:>count_width$}  {}",
            "#".repeat(bar)
        );
    }

    if report.malformed > 0 {
        let _ = writeln!(
            out,
            "  ({} of {} users have no usable creation date)",
            report.malformed, report.total
        );
    }
    out
}

pub fn render_metrics_json(report: &MetricsReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "generated_at": report.generated_at,
        "windows": report.windows,
        "total": report.total,
        "malformed": report.malformed,
        "chart": report.chart(),
    }))
}

fn created_label(user: &UserRecord) -> String {
    user.created_at_utc()
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| "-".to_string())
}

fn write_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}
