use std::fmt;
use thiserror::Error;

/// 空になり得るコレクションの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Books,
    Members,
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::Books => f.write_str("books"),
            CollectionKind::Members => f.write_str("members"),
        }
    }
}

/// 蔵書管理アプリケーション層のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// 書籍が存在しない
    #[error("Book not found")]
    BookNotFound,

    /// 会員が存在しない
    #[error("Member not found!")]
    MemberNotFound,

    /// 貸出に必要なコレクションが空
    #[error("No {0} found")]
    EmptyCollection(CollectionKind),

    /// 蔵書のすべてが貸出中
    #[error("No books available for borrowing")]
    NoneAvailable,

    /// 指定された書籍は貸出中
    #[error("Book is already borrowed")]
    AlreadyBorrowed,

    /// 貸出中の書籍は削除できない
    #[error("Book has an active transaction")]
    BookOnLoan,

    /// 貸出中の書籍を持つ会員は削除できない
    #[error("Member has active transactions")]
    MemberHasActiveLoans,
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CatalogError>;
