use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    book::Book,
    commands::{AddBook, AddMember, BorrowBook},
    member::Member,
    transaction::Transaction,
    value_objects::{BookId, MemberId},
};

/// 書籍の登録・更新リクエスト（POST /books, PUT /books/:id）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl BookRequest {
    pub fn to_command(&self) -> AddBook {
        AddBook {
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year,
        }
    }

    /// 更新用のレコードに変換する（`borrowed`はカタログ側で無視される）
    pub fn to_revision(&self, book_id: BookId) -> Book {
        Book {
            id: book_id,
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year,
            borrowed: false,
        }
    }
}

/// 会員の登録・更新リクエスト（POST /members, PUT /members/:id）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRequest {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl MemberRequest {
    pub fn to_command(&self) -> AddMember {
        AddMember {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    pub fn to_revision(&self, member_id: MemberId) -> Member {
        Member {
            id: member_id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// 貸出リクエスト（POST /transactions）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowRequest {
    pub book_id: u64,
    pub member_id: u64,
}

impl BorrowRequest {
    pub fn to_command(&self) -> BorrowBook {
        BorrowBook {
            book_id: BookId::new(self.book_id),
            member_id: MemberId::new(self.member_id),
        }
    }
}

/// 取引レスポンス
///
/// `status`は`date_returned`から導出した値。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub id: u64,
    pub book_id: u64,
    pub member_id: u64,
    pub date_borrowed: DateTime<Utc>,
    pub date_returned: Option<DateTime<Utc>>,
    pub status: String,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id.value(),
            book_id: transaction.book_id.value(),
            member_id: transaction.member_id.value(),
            status: transaction.status().as_str().to_string(),
            date_borrowed: transaction.date_borrowed,
            date_returned: transaction.date_returned,
        }
    }
}

/// 返却レスポンス（POST /transactions/:id/return）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnResponse {
    pub transaction_id: u64,
    pub returned: bool,
}

/// エラーレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
