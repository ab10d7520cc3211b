//! Shared fixtures for the news-model integration tests.

#![allow(dead_code)]

use news_model::{
    FixedClock, NewsConfig, NewsRecord, NewsRepository, Source, SqliteRetriever,
};
use rusqlite::params;

/// Timestamp every fixture is evaluated at.
pub const NOW: i64 = 1_700_000_000;

/// A published, unbounded, unfeatured item of archive 3.
pub fn news(id: i64) -> NewsRecord {
    NewsRecord {
        id,
        pid: 3,
        alias: None,
        headline: format!("News {id}"),
        date: NOW - id * 1_000,
        source: Source::Default,
        featured: false,
        published: true,
        start: None,
        stop: None,
    }
}

/// Insert records the way the back end stores them.
pub fn seed(retriever: &SqliteRetriever, records: &[NewsRecord]) {
    let conn = retriever.connection();
    for record in records {
        let bound = |b: Option<i64>| match b {
            Some(ts) => rusqlite::types::Value::Integer(ts),
            None => rusqlite::types::Value::Text(String::new()),
        };
        conn.execute(
            "INSERT INTO tl_news
                 (id, pid, alias, headline, date, source, featured, published, start, stop)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                record.id,
                record.pid,
                record.alias.clone().unwrap_or_default(),
                record.headline,
                record.date,
                record.source.as_str(),
                record.featured,
                record.published,
                bound(record.start),
                bound(record.stop),
            ],
        )
        .expect("insert fixture");
    }
}

/// Repository over an in-memory database holding `records`, frozen at [`NOW`].
pub fn repository(records: &[NewsRecord]) -> NewsRepository<SqliteRetriever, FixedClock> {
    let retriever = SqliteRetriever::open_in_memory("tl_news").expect("open in-memory db");
    seed(&retriever, records);
    NewsRepository::with_clock(NewsConfig::default(), retriever, FixedClock(NOW))
        .expect("default config is valid")
}

/// Ids of a lookup result, in order.
pub fn ids(records: Option<Vec<NewsRecord>>) -> Vec<i64> {
    records
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.id)
        .collect()
}
