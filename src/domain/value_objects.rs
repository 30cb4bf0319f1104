use serde::{Deserialize, Serialize};
use std::fmt;

/// 書籍ID - 蔵書コレクション内で一意
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u64);

impl BookId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 会員ID - 会員コレクション内で一意
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(u64);

impl MemberId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 貸出取引ID - 作成順に単調増加
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ID採番器
///
/// 不変条件：一度払い出した値は二度と返さない。
/// コレクションの件数からIDを導出しないため、削除後もIDは再利用されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// 1から採番を開始する
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// 次の値を払い出す
    pub fn next_value(&mut self) -> u64 {
        let value = self.next;
        self.next += 1;
        value
    }

    /// 次に払い出される値（払い出しは行わない）
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_sequence_starts_at_one() {
        let mut seq = IdSequence::new();
        assert_eq!(seq.peek(), 1);
        assert_eq!(seq.next_value(), 1);
    }

    #[test]
    fn test_id_sequence_is_monotonic() {
        let mut seq = IdSequence::new();
        let first = seq.next_value();
        let second = seq.next_value();
        let third = seq.next_value();
        assert!(first < second && second < third);
        assert_eq!(seq.peek(), 4);
    }

    #[test]
    fn test_book_id_value() {
        let id = BookId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&TransactionId::new(7)).unwrap();
        assert_eq!(json, "7");

        let id: MemberId = serde_json::from_str("3").unwrap();
        assert_eq!(id, MemberId::new(3));
    }
}
