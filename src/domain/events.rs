use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, MemberId, TransactionId};

/// イベント：書籍情報が更新された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRevised {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
}

/// イベント：会員情報が更新された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRevised {
    pub member_id: MemberId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// イベント：書籍が貸し出された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookBorrowed {
    pub transaction_id: TransactionId,
    pub book_id: BookId,
    pub member_id: MemberId,
    pub date_borrowed: DateTime<Utc>,
}

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReturned {
    pub transaction_id: TransactionId,
    pub book_id: BookId,
    pub member_id: MemberId,
    pub date_returned: DateTime<Utc>,
}
