//! End-to-end lookups against an in-memory SQLite news table.

mod common;

use common::{NOW, ids, news, repository};
use news_model::{CallerContext, DateRange, FeaturedFilter, FindOptions, NewsRecord, Source};

fn anonymous() -> CallerContext {
    CallerContext::anonymous()
}

// =============================================================================
// Visibility window
// =============================================================================

fn window_fixtures() -> Vec<NewsRecord> {
    vec![
        news(1),
        NewsRecord {
            published: false,
            ..news(2)
        },
        NewsRecord {
            start: Some(NOW + 60),
            ..news(3)
        },
        NewsRecord {
            stop: Some(NOW - 60),
            ..news(4)
        },
        NewsRecord {
            start: Some(NOW - 60),
            stop: Some(NOW + 60),
            ..news(5)
        },
        NewsRecord {
            start: Some(NOW),
            ..news(6)
        },
        NewsRecord {
            start: Some(0),
            ..news(7)
        },
    ]
}

#[test]
fn anonymous_callers_see_only_the_window() {
    let repo = repository(&window_fixtures());
    let found = repo
        .find_published_by_pids(&[3], FeaturedFilter::Any, 0, 0, &anonymous(), FindOptions::new())
        .unwrap();
    assert_eq!(ids(found), vec![1, 5, 7]);
}

#[test]
fn back_end_preview_sees_everything() {
    let repo = repository(&window_fixtures());
    let found = repo
        .find_published_by_pids(
            &[3],
            FeaturedFilter::Any,
            0,
            0,
            &CallerContext::backend_user(),
            FindOptions::new(),
        )
        .unwrap();
    assert_eq!(ids(found), vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn back_end_render_mode_keeps_feeds_clean() {
    let repo = repository(&window_fixtures());
    let found = repo
        .find_published_by_pids(
            &[3],
            FeaturedFilter::Any,
            0,
            0,
            &CallerContext::backend_render(),
            FindOptions::new(),
        )
        .unwrap();
    assert_eq!(ids(found), vec![1, 5, 7]);

    // counting has no feed to protect
    let count = repo
        .count_published_by_pids(&[3], FeaturedFilter::Any, &CallerContext::backend_render())
        .unwrap();
    assert_eq!(count, 7);
}

#[test]
fn single_archive_lookup_filters_for_everyone() {
    let repo = repository(&window_fixtures());
    for caller in [
        anonymous(),
        CallerContext::backend_user(),
        CallerContext::backend_render(),
    ] {
        let found = repo
            .find_published_by_pid(3, 2, &caller, FindOptions::new())
            .unwrap();
        assert_eq!(ids(found), vec![1, 5]);
    }
}

// =============================================================================
// Parent and featured filters
// =============================================================================

#[test]
fn featured_archive_scenario() {
    let repo = repository(&[
        NewsRecord {
            featured: true,
            ..news(1)
        },
        news(2),
        NewsRecord {
            featured: true,
            pid: 9,
            ..news(3)
        },
        NewsRecord {
            featured: true,
            pid: 7,
            ..news(4)
        },
    ]);
    let list = |featured| {
        repo.find_published_by_pids(&[3, 7], featured, 0, 0, &anonymous(), FindOptions::new())
            .unwrap()
    };

    assert_eq!(ids(list(FeaturedFilter::FeaturedOnly)), vec![1, 4]);
    assert_eq!(ids(list(FeaturedFilter::UnfeaturedOnly)), vec![2]);

    let any = repo
        .count_published_by_pids(&[3, 7], FeaturedFilter::Any, &anonymous())
        .unwrap();
    assert_eq!(any, 3);
}

#[test]
fn paging_and_explicit_order() {
    let repo = repository(&[news(1), news(2), news(3), news(4)]);
    let list = |limit, offset, options| {
        repo.find_published_by_pids(&[3], FeaturedFilter::Any, limit, offset, &anonymous(), options)
            .unwrap()
    };

    assert_eq!(ids(list(2, 1, FindOptions::new())), vec![2, 3]);
    assert_eq!(ids(list(0, 3, FindOptions::new())), vec![4]);

    let oldest_first = FindOptions::new().with_order("date ASC").unwrap();
    assert_eq!(ids(list(0, 0, oldest_first)), vec![4, 3, 2, 1]);
}

// =============================================================================
// Id or alias
// =============================================================================

#[test]
fn alias_lookup_ignores_numeric_id() {
    let repo = repository(&[NewsRecord {
        id: 77,
        pid: 1,
        alias: Some("launch-day".into()),
        ..news(77)
    }]);

    let found = repo
        .find_published_by_parent_and_id_or_alias(
            "launch-day",
            &[1],
            &anonymous(),
            FindOptions::new(),
        )
        .unwrap();
    assert_eq!(found.map(|r| r.id), Some(77));
}

#[test]
fn numeric_lookup_and_parent_scope() {
    let repo = repository(&[news(1), NewsRecord { pid: 4, ..news(2) }]);
    let lookup = |value| {
        repo.find_published_by_parent_and_id_or_alias(value, &[3], &anonymous(), FindOptions::new())
            .unwrap()
    };

    assert_eq!(lookup("1").map(|r| r.id), Some(1));
    assert_eq!(lookup("2"), None);
}

#[test]
fn unpublished_item_only_for_back_end_users() {
    let repo = repository(&[NewsRecord {
        published: false,
        alias: Some("draft".into()),
        ..news(1)
    }]);
    let lookup = |caller: &CallerContext| {
        repo.find_published_by_parent_and_id_or_alias("draft", &[3], caller, FindOptions::new())
            .unwrap()
    };

    assert_eq!(lookup(&anonymous()), None);
    assert_eq!(lookup(&CallerContext::backend_user()).map(|r| r.id), Some(1));
}

#[test]
fn blank_lookup_matches_nothing() {
    let repo = repository(&[news(1)]);
    let found = repo
        .find_published_by_parent_and_id_or_alias("", &[3], &anonymous(), FindOptions::new())
        .unwrap();
    assert_eq!(found, None);
}

// =============================================================================
// Source and date ranges
// =============================================================================

#[test]
fn default_source_only() {
    let repo = repository(&[
        news(1),
        NewsRecord {
            source: Source::External,
            ..news(2)
        },
        NewsRecord {
            source: Source::Internal,
            ..news(3)
        },
        NewsRecord {
            published: false,
            ..news(4)
        },
    ]);

    let found = repo
        .find_published_default_by_pid(3, &anonymous(), FindOptions::new())
        .unwrap();
    assert_eq!(ids(found), vec![1]);

    let editor = repo
        .find_published_default_by_pid(3, &CallerContext::backend_user(), FindOptions::new())
        .unwrap();
    assert_eq!(ids(editor), vec![1, 4]);
}

#[test]
fn date_range_bounds_are_inclusive() {
    let dated = |id, date| NewsRecord { date, ..news(id) };
    let repo = repository(&[
        dated(1, 100),
        dated(2, 150),
        dated(3, 200),
        dated(4, 201),
        dated(5, 99),
    ]);
    let range = DateRange::new(100, 200);

    let found = repo
        .find_published_from_to_by_pids(range, &[3], 0, 0, &anonymous(), FindOptions::new())
        .unwrap();
    assert_eq!(ids(found), vec![3, 2, 1]);

    let count = repo
        .count_published_from_to_by_pids(range, &[3], &anonymous())
        .unwrap();
    assert_eq!(count, 3);
}

#[test]
fn month_archive() {
    let november = DateRange::month(2023, 11).unwrap();
    let dated = |id, date| NewsRecord { date, ..news(id) };
    let repo = repository(&[
        dated(1, november.from),
        dated(2, november.to),
        dated(3, november.to + 1),
    ]);

    let count = repo
        .count_published_from_to_by_pids(november, &[3], &anonymous())
        .unwrap();
    assert_eq!(count, 2);
}

// =============================================================================
// Empty input
// =============================================================================

#[test]
fn empty_parents_return_sentinels() {
    let repo = repository(&[news(1)]);
    let range = DateRange::new(0, NOW);
    let caller = anonymous();

    let one = repo
        .find_published_by_parent_and_id_or_alias("1", &[], &caller, FindOptions::new())
        .unwrap();
    assert_eq!(one, None);

    let list = repo
        .find_published_by_pids(&[], FeaturedFilter::Any, 0, 0, &caller, FindOptions::new())
        .unwrap();
    assert_eq!(list, None);

    let in_range = repo
        .find_published_from_to_by_pids(range, &[], 0, 0, &caller, FindOptions::new())
        .unwrap();
    assert_eq!(in_range, None);

    assert_eq!(
        repo.count_published_by_pids(&[], FeaturedFilter::Any, &caller)
            .unwrap(),
        0
    );
    assert_eq!(
        repo.count_published_from_to_by_pids(range, &[], &caller)
            .unwrap(),
        0
    );
}
