use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BookBorrowed, BookId, BookReturned, BorrowBookError, MemberId, ReturnBookError,
    TransactionId, book::Book, member::Member,
};

/// 取引ステータス
///
/// 保存はせず、常に`date_returned`から導出する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// 貸出中
    Borrowed,
    /// 返却済み
    Returned,
}

impl TransactionStatus {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Borrowed => "borrowed",
            TransactionStatus::Returned => "returned",
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "borrowed" => Ok(TransactionStatus::Borrowed),
            "returned" => Ok(TransactionStatus::Returned),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

/// 貸出取引 - 1冊の書籍の1回の貸出
///
/// 状態遷移：Borrowed → Returned（1回のみ、Returnedは終端）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    // 他の集約への参照（IDのみ）
    pub book_id: BookId,
    pub member_id: MemberId,

    pub date_borrowed: DateTime<Utc>,
    pub date_returned: Option<DateTime<Utc>>,
}

impl Transaction {
    /// 現在のステータス
    pub fn status(&self) -> TransactionStatus {
        match self.date_returned {
            None => TransactionStatus::Borrowed,
            Some(_) => TransactionStatus::Returned,
        }
    }

    /// 貸出中か
    pub fn is_active(&self) -> bool {
        self.date_returned.is_none()
    }
}

/// 純粋関数：書籍を貸し出す
///
/// ビジネスルール：
/// - 貸出中の書籍は貸し出せない
/// - 新しい取引はBorrowed状態で、返却日時なし
///
/// 副作用なし。新しい取引、貸出中フラグを立てた書籍、イベントを返す。
pub fn borrow_book(
    transaction_id: TransactionId,
    book: &Book,
    member: &Member,
    date_borrowed: DateTime<Utc>,
) -> Result<(Transaction, Book, BookBorrowed), BorrowBookError> {
    if book.borrowed {
        return Err(BorrowBookError::AlreadyBorrowed);
    }

    let transaction = Transaction {
        id: transaction_id,
        book_id: book.id,
        member_id: member.id,
        date_borrowed,
        date_returned: None,
    };

    let borrowed_book = Book {
        borrowed: true,
        ..book.clone()
    };

    let event = BookBorrowed {
        transaction_id,
        book_id: book.id,
        member_id: member.id,
        date_borrowed,
    };

    Ok((transaction, borrowed_book, event))
}

/// 純粋関数：書籍を返却する
///
/// ビジネスルール：
/// - 返却済みの取引は再度返却できない
///
/// 副作用なし。返却済みの取引とイベントを返す。
pub fn return_book(
    transaction: &Transaction,
    date_returned: DateTime<Utc>,
) -> Result<(Transaction, BookReturned), ReturnBookError> {
    if !transaction.is_active() {
        return Err(ReturnBookError::AlreadyReturned);
    }

    let returned = Transaction {
        date_returned: Some(date_returned),
        ..transaction.clone()
    };

    let event = BookReturned {
        transaction_id: transaction.id,
        book_id: transaction.book_id,
        member_id: transaction.member_id,
        date_returned,
    };

    Ok((returned, event))
}
