// Benchmark for timeline layout
// Measures row packing and full layout over growing entry sets

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use health_timeline::models::entry::TimelineEntry;
use health_timeline::models::section::SECTION_ORDER;
use health_timeline::services::timeline::layout::compute_layout;
use health_timeline::services::timeline::packer::SectionRows;
use health_timeline::services::timeline::ViewState;

/// Entries spread over ten years and all sections, with plenty of overlap.
fn generate_entries(count: usize) -> Vec<TimelineEntry> {
    let base = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            let start = base + Duration::days((i as i64 * 37) % 3650);
            let section = SECTION_ORDER[i % SECTION_ORDER.len()];
            let entry = TimelineEntry::new(section, start, format!("Entry {}", i))
                .with_id(format!("bench-{}", i));
            if i % 3 == 0 {
                entry
            } else {
                entry.with_end_date(start + Duration::days((i as i64 % 120) + 1))
            }
        })
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let view = ViewState::default();
    let mut group = c.benchmark_group("timeline_layout");

    for count in [100, 1_000, 5_000].iter() {
        let entries = generate_entries(*count);

        group.bench_with_input(BenchmarkId::new("pack_rows", count), &entries, |b, entries| {
            b.iter(|| SectionRows::pack(black_box(entries)));
        });

        group.bench_with_input(BenchmarkId::new("compute_layout", count), &entries, |b, entries| {
            b.iter(|| compute_layout(black_box(entries), &view, today));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
