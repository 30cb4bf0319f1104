#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use library_catalog::adapters::mock::FixedClock;
use library_catalog::application::catalog::Catalog;
use library_catalog::domain::book::Book;
use library_catalog::domain::commands::{AddBook, AddMember};
use library_catalog::domain::member::Member;
use std::sync::Arc;

/// テスト用の固定時刻
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap()
}

/// 固定時刻の時計を持つ空のカタログを作成
pub fn create_test_catalog() -> (Catalog, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(fixed_instant()));
    (Catalog::new(clock.clone()), clock)
}

pub fn add_book(catalog: &mut Catalog, title: &str, author: &str, year: i32) -> Book {
    catalog.add_book(AddBook {
        title: title.to_string(),
        author: author.to_string(),
        year,
    })
}

pub fn add_member(catalog: &mut Catalog, name: &str) -> Member {
    catalog.add_member(AddMember {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: String::new(),
    })
}
