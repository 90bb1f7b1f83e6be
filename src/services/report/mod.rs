// Text report
// Human-readable export grouped by section, meant for pasting elsewhere.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::entry::{HealthData, TimelineEntry};
use crate::models::section::SECTION_ORDER;
use crate::utils::date::format_display_date;

pub fn export_text(data: &HealthData, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Health Timeline");
    let _ = writeln!(out, "Exported {}", format_display_date(today));
    let _ = writeln!(out, "{} entries", data.entries.len());

    for section in SECTION_ORDER {
        let mut entries: Vec<&TimelineEntry> = data
            .entries
            .iter()
            .filter(|entry| entry.section_type == section)
            .collect();
        if entries.is_empty() {
            continue;
        }
        entries.sort_by_key(|entry| entry.start_date);

        let _ = writeln!(out);
        let _ = writeln!(out, "## {} ({})", section.label(), entries.len());
        for entry in entries {
            let _ = writeln!(out, "- {}: {}", entry.title, describe_dates(entry, today));
            if let Some(description) = entry.description.as_deref().map(str::trim) {
                if !description.is_empty() {
                    let _ = writeln!(out, "  {}", description);
                }
            }
        }
    }
    out
}

fn describe_dates(entry: &TimelineEntry, today: NaiveDate) -> String {
    let start = format_display_date(entry.start_date);
    match entry.end_date {
        None => start,
        Some(end) => {
            let days = (end - entry.start_date).num_days() + 1;
            let ongoing = if end >= today && entry.start_date <= today {
                ", ongoing"
            } else {
                ""
            };
            format!(
                "{} to {} ({} day{}{})",
                start,
                format_display_date(end),
                days,
                if days == 1 { "" } else { "s" },
                ongoing
            )
        }
    }
}
