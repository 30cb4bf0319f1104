use crate::adapters::SystemClock;
use crate::domain::{
    self,
    book::Book,
    commands::*,
    member::Member,
    transaction::Transaction,
    value_objects::*,
};
use crate::ports::Clock;
use std::sync::Arc;

use super::errors::{CatalogError, CollectionKind, Result};

/// 蔵書カタログ（書籍・会員・貸出取引のインメモリストア）
///
/// 3つのコレクションを排他的に所有し、挿入順を保持する。
/// 参照系は常にスナップショット（クローン）を返すため、
/// 状態の変更は必ず名前付きの操作を経由する。
///
/// 維持する不変条件：
/// - IDは種類ごとの単調増加カウンタから採番し、削除後も再利用しない
/// - 書籍の`borrowed`フラグ ⇔ その書籍を参照する貸出中の取引がちょうど1件
/// - 貸出中の取引が参照する書籍・会員は必ず存在する
pub struct Catalog {
    books: Vec<Book>,
    members: Vec<Member>,
    transactions: Vec<Transaction>,

    book_ids: IdSequence,
    member_ids: IdSequence,
    transaction_ids: IdSequence,

    clock: Arc<dyn Clock>,
}

impl Catalog {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            books: Vec::new(),
            members: Vec::new(),
            transactions: Vec::new(),
            book_ids: IdSequence::new(),
            member_ids: IdSequence::new(),
            transaction_ids: IdSequence::new(),
            clock,
        }
    }

    // ========================================================================
    // 書籍
    // ========================================================================

    /// 書籍を登録する
    ///
    /// 新しいIDを採番して末尾に追加し、保存した書籍を返す。
    pub fn add_book(&mut self, cmd: AddBook) -> Book {
        let id = BookId::new(self.book_ids.next_value());
        let book = domain::book::register_book(id, cmd);
        self.books.push(book.clone());

        tracing::info!(book_id = %id, title = %book.title, "book added");
        book
    }

    /// 全書籍（登録順）
    pub fn books(&self) -> Vec<Book> {
        self.books.clone()
    }

    pub fn book(&self, book_id: BookId) -> Option<Book> {
        self.find_book(book_id).cloned()
    }

    /// 書籍情報を更新する
    ///
    /// IDのみで照合する。`borrowed`フラグは貸出ワークフローが管理するため、
    /// 入力側の値は無視する。
    pub fn update_book(&mut self, revision: Book) -> Result<Book> {
        let index = self
            .book_index(revision.id)
            .ok_or(CatalogError::BookNotFound)?;

        if self.books[index].borrowed != revision.borrowed {
            tracing::debug!(
                book_id = %revision.id,
                "ignoring borrowed flag on book update"
            );
        }

        let (book, event) = domain::book::revise_book(&self.books[index], &revision);
        self.books[index] = book.clone();

        tracing::info!(?event, "book updated");
        Ok(book)
    }

    /// 書籍を削除する
    ///
    /// 貸出中の取引が参照している書籍は削除できない。
    pub fn delete_book(&mut self, book_id: BookId) -> Result<Book> {
        let index = self.book_index(book_id).ok_or(CatalogError::BookNotFound)?;

        if self
            .transactions
            .iter()
            .any(|t| t.is_active() && t.book_id == book_id)
        {
            tracing::warn!(%book_id, "refusing to delete book on loan");
            return Err(CatalogError::BookOnLoan);
        }

        let book = self.books.remove(index);
        tracing::info!(%book_id, "book deleted");
        Ok(book)
    }

    // ========================================================================
    // 会員
    // ========================================================================

    /// 会員を登録する
    pub fn add_member(&mut self, cmd: AddMember) -> Member {
        let id = MemberId::new(self.member_ids.next_value());
        let member = domain::member::register_member(id, cmd);
        self.members.push(member.clone());

        tracing::info!(member_id = %id, name = %member.name, "member added");
        member
    }

    /// 全会員（登録順）
    pub fn members(&self) -> Vec<Member> {
        self.members.clone()
    }

    pub fn member(&self, member_id: MemberId) -> Option<Member> {
        self.find_member(member_id).cloned()
    }

    /// 会員情報を更新する（IDのみで照合）
    pub fn update_member(&mut self, revision: Member) -> Result<Member> {
        let index = self
            .member_index(revision.id)
            .ok_or(CatalogError::MemberNotFound)?;

        let (member, event) = domain::member::revise_member(&self.members[index], &revision);
        self.members[index] = member.clone();

        tracing::info!(?event, "member updated");
        Ok(member)
    }

    /// 会員を削除する
    ///
    /// 貸出中の取引を持つ会員は削除できない。
    pub fn delete_member(&mut self, member_id: MemberId) -> Result<Member> {
        let index = self
            .member_index(member_id)
            .ok_or(CatalogError::MemberNotFound)?;

        if self
            .transactions
            .iter()
            .any(|t| t.is_active() && t.member_id == member_id)
        {
            tracing::warn!(%member_id, "refusing to delete member with active loans");
            return Err(CatalogError::MemberHasActiveLoans);
        }

        let member = self.members.remove(index);
        tracing::info!(%member_id, "member deleted");
        Ok(member)
    }

    /// 会員が現在借りている書籍（貸出中の取引から導出）
    pub fn borrowed_books(&self, member_id: MemberId) -> Result<Vec<Book>> {
        if self.find_member(member_id).is_none() {
            return Err(CatalogError::MemberNotFound);
        }

        Ok(self
            .transactions
            .iter()
            .filter(|t| t.is_active() && t.member_id == member_id)
            .filter_map(|t| self.find_book(t.book_id).cloned())
            .collect())
    }

    // ========================================================================
    // 貸出取引
    // ========================================================================

    /// 書籍を貸し出す
    ///
    /// ビジネスルール（判定順）：
    /// 1. 会員が1人もいなければ不可
    /// 2. 書籍が1冊もなければ不可
    /// 3. 全書籍が貸出中なら不可
    /// 4. 会員・書籍が存在すること
    /// 5. 指定された書籍が貸出中でないこと
    ///
    /// すべての判定は状態変更の前に行うため、失敗時に状態は変わらない。
    pub fn borrow_book(&mut self, cmd: BorrowBook) -> Result<Transaction> {
        if self.members.is_empty() {
            return Err(CatalogError::EmptyCollection(CollectionKind::Members));
        }
        if self.books.is_empty() {
            return Err(CatalogError::EmptyCollection(CollectionKind::Books));
        }
        if self.books.iter().all(|b| b.borrowed) {
            return Err(CatalogError::NoneAvailable);
        }

        let member = self
            .find_member(cmd.member_id)
            .ok_or(CatalogError::MemberNotFound)?;
        let index = self
            .book_index(cmd.book_id)
            .ok_or(CatalogError::BookNotFound)?;

        let transaction_id = TransactionId::new(self.transaction_ids.peek());
        let (transaction, book, event) = domain::transaction::borrow_book(
            transaction_id,
            &self.books[index],
            member,
            self.clock.now(),
        )
        .map_err(|e| match e {
            domain::BorrowBookError::AlreadyBorrowed => CatalogError::AlreadyBorrowed,
        })?;

        self.transaction_ids.next_value();
        self.books[index] = book;
        self.transactions.push(transaction.clone());

        tracing::info!(?event, "book borrowed");
        Ok(transaction)
    }

    /// 書籍を返却する
    ///
    /// 取引が存在しない、または返却済みの場合は`false`を返し、状態は変えない。
    /// 書籍がカタログから消えている場合も取引は閉じ、警告を記録して`true`を返す。
    pub fn return_book(&mut self, transaction_id: TransactionId) -> bool {
        let Some(index) = self
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)
        else {
            tracing::debug!(%transaction_id, "return requested for unknown transaction");
            return false;
        };

        let (returned, event) =
            match domain::transaction::return_book(&self.transactions[index], self.clock.now()) {
                Ok(result) => result,
                Err(domain::ReturnBookError::AlreadyReturned) => {
                    tracing::debug!(%transaction_id, "transaction already returned");
                    return false;
                }
            };

        self.transactions[index] = returned;

        match self.book_index(event.book_id) {
            Some(book_index) => {
                self.books[book_index] = domain::book::release_book(&self.books[book_index]);
            }
            None => {
                tracing::warn!(
                    %transaction_id,
                    book_id = %event.book_id,
                    "returned book is no longer in the catalog"
                );
            }
        }

        tracing::info!(?event, "book returned");
        true
    }

    /// 全取引（作成順）
    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// 貸出中の取引（返却日時なし）
    pub fn active_transactions(&self) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.is_active())
            .cloned()
            .collect()
    }

    pub fn transaction(&self, transaction_id: TransactionId) -> Option<Transaction> {
        self.transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned()
    }

    // ========================================================================
    // ヘルパー
    // ========================================================================

    fn book_index(&self, book_id: BookId) -> Option<usize> {
        self.books.iter().position(|b| b.id == book_id)
    }

    fn member_index(&self, member_id: MemberId) -> Option<usize> {
        self.members.iter().position(|m| m.id == member_id)
    }

    fn find_book(&self, book_id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == book_id)
    }

    fn find_member(&self, member_id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::FixedClock;
    use crate::domain::transaction::TransactionStatus;
    use chrono::{Duration, Utc};

    fn catalog_with_clock() -> (Catalog, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(Utc::now()));
        (Catalog::new(clock.clone()), clock)
    }

    fn add_book(catalog: &mut Catalog, title: &str) -> Book {
        catalog.add_book(AddBook {
            title: title.to_string(),
            author: "Author".to_string(),
            year: 2000,
        })
    }

    fn add_member(catalog: &mut Catalog, name: &str) -> Member {
        catalog.add_member(AddMember {
            name: name.to_string(),
            email: String::new(),
            phone: String::new(),
        })
    }

    #[test]
    fn test_add_book_assigns_sequential_ids() {
        let mut catalog = Catalog::default();
        let first = add_book(&mut catalog, "A");
        let second = add_book(&mut catalog, "B");

        assert_eq!(first.id, BookId::new(1));
        assert_eq!(second.id, BookId::new(2));
        assert_eq!(catalog.books(), vec![first, second]);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut catalog = Catalog::default();
        let first = add_book(&mut catalog, "A");
        let second = add_book(&mut catalog, "B");
        catalog.delete_book(second.id).unwrap();

        let third = add_book(&mut catalog, "C");
        assert_ne!(third.id, second.id);
        assert_ne!(third.id, first.id);
        assert_eq!(third.id, BookId::new(3));
    }

    #[test]
    fn test_books_returns_snapshot() {
        let mut catalog = Catalog::default();
        add_book(&mut catalog, "A");

        let mut snapshot = catalog.books();
        snapshot[0].title = "Mutated".to_string();
        snapshot[0].borrowed = true;

        let stored = &catalog.books()[0];
        assert_eq!(stored.title, "A");
        assert!(!stored.borrowed);
    }

    #[test]
    fn test_update_book_not_found_leaves_catalog_unchanged() {
        let mut catalog = Catalog::default();
        let book = add_book(&mut catalog, "A");
        let before = catalog.books();

        let result = catalog.update_book(Book {
            id: BookId::new(42),
            ..book
        });

        assert_eq!(result.unwrap_err(), CatalogError::BookNotFound);
        assert_eq!(catalog.books(), before);
    }

    #[test]
    fn test_update_book_ignores_borrowed_flag() {
        let mut catalog = Catalog::default();
        let book = add_book(&mut catalog, "A");

        let updated = catalog
            .update_book(Book {
                title: "A (2nd ed.)".to_string(),
                borrowed: true,
                ..book
            })
            .unwrap();

        assert_eq!(updated.title, "A (2nd ed.)");
        assert!(!updated.borrowed);
        assert_eq!(catalog.books()[0], updated);
    }

    #[test]
    fn test_delete_member_not_found() {
        let mut catalog = Catalog::default();
        add_member(&mut catalog, "Alice");

        let result = catalog.delete_member(MemberId::new(7));
        assert_eq!(result.unwrap_err(), CatalogError::MemberNotFound);
        assert_eq!(catalog.members().len(), 1);
    }

    #[test]
    fn test_borrow_records_now_from_clock() {
        let (mut catalog, clock) = catalog_with_clock();
        let book = add_book(&mut catalog, "A");
        let member = add_member(&mut catalog, "Alice");

        let transaction = catalog
            .borrow_book(BorrowBook {
                book_id: book.id,
                member_id: member.id,
            })
            .unwrap();

        assert_eq!(transaction.date_borrowed, clock.now());
        assert_eq!(transaction.status(), TransactionStatus::Borrowed);
    }

    #[test]
    fn test_failed_borrow_does_not_consume_transaction_id() {
        let mut catalog = Catalog::default();
        let first = add_book(&mut catalog, "A");
        let second = add_book(&mut catalog, "B");
        let member = add_member(&mut catalog, "Alice");

        catalog
            .borrow_book(BorrowBook {
                book_id: first.id,
                member_id: member.id,
            })
            .unwrap();
        let refused = catalog.borrow_book(BorrowBook {
            book_id: first.id,
            member_id: member.id,
        });
        assert_eq!(refused.unwrap_err(), CatalogError::AlreadyBorrowed);

        let next = catalog
            .borrow_book(BorrowBook {
                book_id: second.id,
                member_id: member.id,
            })
            .unwrap();
        assert_eq!(next.id, TransactionId::new(2));
    }

    #[test]
    fn test_return_records_now_from_clock() {
        let (mut catalog, clock) = catalog_with_clock();
        let book = add_book(&mut catalog, "A");
        let member = add_member(&mut catalog, "Alice");
        let transaction = catalog
            .borrow_book(BorrowBook {
                book_id: book.id,
                member_id: member.id,
            })
            .unwrap();

        clock.advance(Duration::days(5));
        assert!(catalog.return_book(transaction.id));

        let returned = catalog.transaction(transaction.id).unwrap();
        assert_eq!(returned.date_returned, Some(clock.now()));
        assert_eq!(
            returned.date_returned.unwrap() - returned.date_borrowed,
            Duration::days(5)
        );
    }

    #[test]
    fn test_return_closes_transaction_when_book_is_missing() {
        let mut catalog = Catalog::default();
        let book = add_book(&mut catalog, "A");
        let member = add_member(&mut catalog, "Alice");
        let transaction = catalog
            .borrow_book(BorrowBook {
                book_id: book.id,
                member_id: member.id,
            })
            .unwrap();

        // 公開APIでは削除できないため、内部状態を直接操作する
        catalog.books.clear();

        assert!(catalog.return_book(transaction.id));
        assert!(catalog.active_transactions().is_empty());
    }

    #[test]
    fn test_borrowed_books_derived_from_active_transactions() {
        let mut catalog = Catalog::default();
        let first = add_book(&mut catalog, "A");
        let second = add_book(&mut catalog, "B");
        let alice = add_member(&mut catalog, "Alice");
        let bob = add_member(&mut catalog, "Bob");

        let t1 = catalog
            .borrow_book(BorrowBook {
                book_id: first.id,
                member_id: alice.id,
            })
            .unwrap();
        catalog
            .borrow_book(BorrowBook {
                book_id: second.id,
                member_id: bob.id,
            })
            .unwrap();

        let alice_books = catalog.borrowed_books(alice.id).unwrap();
        assert_eq!(alice_books.len(), 1);
        assert_eq!(alice_books[0].id, first.id);

        catalog.return_book(t1.id);
        assert!(catalog.borrowed_books(alice.id).unwrap().is_empty());

        assert_eq!(
            catalog.borrowed_books(MemberId::new(99)).unwrap_err(),
            CatalogError::MemberNotFound
        );
    }
}
