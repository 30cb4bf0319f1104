use serde::{Deserialize, Serialize};

use super::{BookId, BookRevised, commands::AddBook};

/// 書籍エンティティ
///
/// `borrowed`フラグは貸出・返却ワークフローだけが変更する。
/// 不変条件：`borrowed == true` ⇔ この書籍を参照する貸出中の取引がちょうど1件存在する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(default)]
    pub borrowed: bool,
}

/// 純粋関数：登録コマンドから新しい書籍を作る
///
/// 内容のバリデーションは行わない（空文字列や負の年も受け付ける）。
pub fn register_book(id: BookId, cmd: AddBook) -> Book {
    Book {
        id,
        title: cmd.title,
        author: cmd.author,
        year: cmd.year,
        borrowed: false,
    }
}

/// 純粋関数：書籍情報を更新する
///
/// `title`, `author`, `year`を上書きする。
/// IDと`borrowed`フラグは現在の値を維持する（`revision`側の値は無視）。
pub fn revise_book(current: &Book, revision: &Book) -> (Book, BookRevised) {
    let book = Book {
        title: revision.title.clone(),
        author: revision.author.clone(),
        year: revision.year,
        ..current.clone()
    };

    let event = BookRevised {
        book_id: book.id,
        title: book.title.clone(),
        author: book.author.clone(),
        year: book.year,
    };

    (book, event)
}

/// 純粋関数：貸出中フラグを下ろす
pub fn release_book(book: &Book) -> Book {
    Book {
        borrowed: false,
        ..book.clone()
    }
}
