//! Property-based tests for the view engines
//!
//! Uses proptest to verify the paging, filtering, sorting, and metrics
//! invariants across many random snapshots.

use admin_core::{PageSize, SortDirection, SortKey, UserRecord, ViewState};
use admin_view::{project, ListViewEngine, MetricsAggregator};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

fn arbitrary_user() -> impl Strategy<Value = UserRecord> {
    (
        "[A-Za-z]{1,8}",               // name
        "[a-z]{1,6}@[a-z]{1,5}\\.io",  // email
        "(admin|editor|viewer)",       // role
        proptest::option::of(-48i64..24 * 60), // age in hours, None = missing
    )
        .prop_map(|(name, email, role, age_hours)| {
            let mut user = UserRecord::new("", name, email, role);
            user.created_at = age_hours.map(|h| (reference_now() - Duration::hours(h)).to_rfc3339());
            user
        })
}

/// Snapshot with unique ids assigned in fetch order
fn arbitrary_snapshot() -> impl Strategy<Value = Vec<UserRecord>> {
    prop::collection::vec(arbitrary_user(), 0..80).prop_map(|users| {
        users
            .into_iter()
            .enumerate()
            .map(|(i, mut user)| {
                user.id = i.to_string().into();
                user
            })
            .collect()
    })
}

fn arbitrary_view() -> impl Strategy<Value = ViewState> {
    (
        "[a-zA-Z]{0,2}",
        prop::sample::select(SortKey::ALL.to_vec()),
        prop::bool::ANY,
        0usize..20,
        prop::sample::select(PageSize::OPTIONS.to_vec()),
    )
        .prop_map(|(search, key, descending, page, page_size)| {
            let direction = if descending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            ViewState::default()
                .with_search(search)
                .with_sort(key, direction)
                .with_page(page)
                .with_page_size(page_size)
        })
}

fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
}

fn ids(rows: &[&UserRecord]) -> Vec<String> {
    rows.iter().map(|r| r.id.to_string()).collect()
}

/// Every matching record, sorted, as a single page
fn full_listing<'a>(records: &'a [UserRecord], state: &ViewState) -> Vec<&'a UserRecord> {
    let everything = state.clone().with_page(1).with_page_size(PageSize::Fifty);
    let mut all = Vec::new();
    let mut page = 1;
    loop {
        let view = project(records, &everything.clone().with_page(page));
        all.extend(view.rows);
        if page >= view.total_pages {
            break;
        }
        page += 1;
    }
    all
}

// ===== Property Tests =====

proptest! {
    /// Property: a page never exceeds the page size and is short only on the last page
    #[test]
    fn page_rows_bounded_by_page_size(records in arbitrary_snapshot(), state in arbitrary_view()) {
        let view = project(&records, &state);
        let size = state.page_size.get();

        prop_assert!(view.rows.len() <= size);
        if view.rows.len() < size && view.total_pages > 0 {
            prop_assert_eq!(view.page, view.total_pages, "short page that is not the last");
        }
    }

    /// Property: the effective page is always within [1, max(1, total_pages)]
    #[test]
    fn page_index_always_in_range(records in arbitrary_snapshot(), state in arbitrary_view()) {
        let view = project(&records, &state);

        prop_assert!(view.page >= 1);
        prop_assert!(view.page <= view.total_pages.max(1));
        prop_assert_eq!(view.total_pages, view.total_matches.div_ceil(state.page_size.get()));
    }

    /// Property: walking every page yields each match exactly once
    #[test]
    fn pages_partition_the_matches(records in arbitrary_snapshot(), state in arbitrary_view()) {
        let first = project(&records, &state.clone().with_page(1));
        let mut seen = HashSet::new();

        for page in 1..=first.total_pages {
            for row in project(&records, &state.clone().with_page(page)).rows {
                prop_assert!(seen.insert(row.id.clone()), "row on two pages");
            }
        }
        prop_assert_eq!(seen.len(), first.total_matches);
    }

    /// Property: filtering an already filtered collection changes nothing
    #[test]
    fn filtering_is_idempotent(records in arbitrary_snapshot(), search in "[a-zA-Z]{0,2}") {
        let state = ViewState::default().with_search(search);
        let once: Vec<UserRecord> = records.iter().filter(|r| state.matches(r)).cloned().collect();
        let twice: Vec<UserRecord> = once.iter().filter(|r| state.matches(r)).cloned().collect();

        prop_assert_eq!(once, twice);
    }

    /// Property: re-sorting sorted output is a no-op
    #[test]
    fn sorting_sorted_output_is_a_no_op(records in arbitrary_snapshot(), state in arbitrary_view()) {
        let sorted: Vec<UserRecord> = full_listing(&records, &state).into_iter().cloned().collect();
        let resorted = full_listing(&sorted, &state);

        prop_assert_eq!(ids(&resorted), sorted.iter().map(|r| r.id.to_string()).collect::<Vec<_>>());
    }

    /// Property: flipping direction exactly reverses a tie-free ordering
    #[test]
    fn reversing_direction_reverses_tie_free_order(
        names in prop::collection::hash_set("[a-z]{1,8}", 0..40),
        key in prop::sample::select(vec![SortKey::Name, SortKey::Email]),
    ) {
        let records: Vec<UserRecord> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| UserRecord::new(i.to_string(), name.clone(), format!("{name}@x.io"), "viewer"))
            .collect();

        let asc = ViewState::default().with_sort(key, SortDirection::Ascending);
        let desc = ViewState::default().with_sort(key, SortDirection::Descending);

        let mut forward = ids(&full_listing(&records, &asc));
        forward.reverse();
        prop_assert_eq!(forward, ids(&full_listing(&records, &desc)));
    }

    /// Property: equal keys keep snapshot order
    #[test]
    fn sort_is_stable(records in arbitrary_snapshot(), state in arbitrary_view()) {
        let listing = full_listing(&records, &state);

        for pair in listing.windows(2) {
            if state.sort_key.compare(pair[0], pair[1]).is_eq() {
                let a: usize = pair[0].id.as_str().parse().unwrap();
                let b: usize = pair[1].id.as_str().parse().unwrap();
                prop_assert!(a < b, "tie reordered: {} before {}", a, b);
            }
        }
    }

    /// Property: the engine's state page always equals the projected page
    #[test]
    fn engine_state_tracks_clamped_page(
        records in arbitrary_snapshot(),
        state in arbitrary_view(),
        search in "[a-z]{0,2}",
        size in prop::sample::select(PageSize::OPTIONS.to_vec()),
    ) {
        let mut engine = ListViewEngine::with_snapshot(records.clone(), state);
        engine.set_search(search);
        engine.set_page_size(size);

        let expected = project(&records, engine.state());
        prop_assert_eq!(engine.page(), expected.page);
        prop_assert_eq!(engine.total_pages(), expected.total_pages);
        prop_assert_eq!(ids(&engine.rows().collect::<Vec<_>>()), ids(&expected.rows));
    }

    /// Property: window counts never decrease as the threshold grows
    #[test]
    fn metric_counts_are_monotonic(records in arbitrary_snapshot()) {
        let report = MetricsAggregator::default().aggregate(&records, reference_now());
        let counts = report.counts();

        for pair in counts.windows(2) {
            prop_assert!(pair[0] <= pair[1], "counts not monotonic: {:?}", counts);
        }
        prop_assert!(counts.last().copied().unwrap_or(0) + report.malformed <= records.len());
    }

    /// Property: records without a timestamp never reach any window
    #[test]
    fn missing_timestamps_are_never_counted(records in arbitrary_snapshot()) {
        let dated: Vec<UserRecord> = records.iter().filter(|r| r.created_at.is_some()).cloned().collect();
        let missing = records.len() - dated.len();

        let all = MetricsAggregator::default().aggregate(&records, reference_now());
        let only_dated = MetricsAggregator::default().aggregate(&dated, reference_now());

        prop_assert_eq!(all.counts(), only_dated.counts());
        prop_assert_eq!(all.malformed, missing);
    }
}
