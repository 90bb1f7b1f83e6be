// Test fixtures - reusable test data
// Provides consistent entries and dates across all test files

#![allow(dead_code)]

use chrono::NaiveDate;
use health_timeline::models::entry::TimelineEntry;
use health_timeline::models::section::SectionType;

pub fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Fixed "today" so layouts are deterministic: mid-June 2024, view spans 2022-2024.
pub fn today() -> NaiveDate {
    d(2024, 6, 15)
}

/// Sample entries for testing
pub mod entries {
    use super::*;

    /// Ten-day symptom in January 2024
    pub fn flu() -> TimelineEntry {
        TimelineEntry::new(SectionType::Symptom, d(2024, 1, 10), "Flu")
            .with_id("flu")
            .with_end_date(d(2024, 1, 20))
            .with_description("Fever, stayed home")
    }

    /// Quarter-long medication course
    pub fn antibiotics() -> TimelineEntry {
        TimelineEntry::new(SectionType::Medication, d(2024, 1, 1), "Antibiotics")
            .with_id("abx")
            .with_end_date(d(2024, 3, 31))
    }

    /// Overlaps [`antibiotics`] completely
    pub fn probiotics() -> TimelineEntry {
        TimelineEntry::new(SectionType::Medication, d(2024, 2, 1), "Probiotics")
            .with_id("pro")
            .with_end_date(d(2024, 2, 28))
    }

    /// Point-in-time event
    pub fn weigh_in() -> TimelineEntry {
        TimelineEntry::new(SectionType::BodyComposition, d(2024, 3, 1), "Weigh-in").with_id("weigh")
    }

    pub fn sample() -> Vec<TimelineEntry> {
        vec![flu(), antibiotics(), probiotics(), weigh_in()]
    }

    /// `count` entries in one section, each `span` days long, starting every `step` days.
    pub fn staggered(section: SectionType, count: usize, span: i64, step: i64) -> Vec<TimelineEntry> {
        (0..count)
            .map(|i| {
                let start = d(2022, 1, 1) + chrono::Duration::days(i as i64 * step);
                TimelineEntry::new(section, start, format!("Entry {}", i))
                    .with_id(format!("e{}", i))
                    .with_end_date(start + chrono::Duration::days(span - 1))
            })
            .collect()
    }
}
