use crate::application::catalog::{Catalog, CatalogError};
use crate::domain::{
    book::Book,
    member::Member,
    value_objects::{BookId, MemberId, TransactionId},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{
    error::ApiError,
    types::{BookRequest, BorrowRequest, MemberRequest, ReturnResponse, TransactionResponse},
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
///
/// カタログはMutexで保護し、操作を1件ずつ直列に実行する。
pub struct AppState {
    pub catalog: Mutex<Catalog>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Mutex::new(catalog),
        }
    }
}

// ============================================================================
// Books
// ============================================================================

/// GET /books - 全書籍を登録順に取得
pub async fn list_books(State(state): State<Arc<AppState>>) -> Json<Vec<Book>> {
    Json(state.catalog.lock().await.books())
}

/// GET /books/:id - 書籍をIDで取得
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<u64>,
) -> Result<Json<Book>, ApiError> {
    let book = state
        .catalog
        .lock()
        .await
        .book(BookId::new(book_id))
        .ok_or(CatalogError::BookNotFound)?;

    Ok(Json(book))
}

/// POST /books - 書籍を登録
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookRequest>,
) -> (StatusCode, Json<Book>) {
    let book = state.catalog.lock().await.add_book(req.to_command());
    (StatusCode::CREATED, Json(book))
}

/// PUT /books/:id - 書籍情報を更新
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<u64>,
    Json(req): Json<BookRequest>,
) -> Result<Json<Book>, ApiError> {
    let book = state
        .catalog
        .lock()
        .await
        .update_book(req.to_revision(BookId::new(book_id)))?;

    Ok(Json(book))
}

/// DELETE /books/:id - 書籍を削除
///
/// 貸出中の書籍は削除できない。
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<u64>,
) -> Result<Json<Book>, ApiError> {
    let book = state
        .catalog
        .lock()
        .await
        .delete_book(BookId::new(book_id))?;

    Ok(Json(book))
}

// ============================================================================
// Members
// ============================================================================

/// GET /members - 全会員を登録順に取得
pub async fn list_members(State(state): State<Arc<AppState>>) -> Json<Vec<Member>> {
    Json(state.catalog.lock().await.members())
}

/// GET /members/:id - 会員をIDで取得
pub async fn get_member(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<u64>,
) -> Result<Json<Member>, ApiError> {
    let member = state
        .catalog
        .lock()
        .await
        .member(MemberId::new(member_id))
        .ok_or(CatalogError::MemberNotFound)?;

    Ok(Json(member))
}

/// POST /members - 会員を登録
pub async fn create_member(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MemberRequest>,
) -> (StatusCode, Json<Member>) {
    let member = state.catalog.lock().await.add_member(req.to_command());
    (StatusCode::CREATED, Json(member))
}

/// PUT /members/:id - 会員情報を更新
pub async fn update_member(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<u64>,
    Json(req): Json<MemberRequest>,
) -> Result<Json<Member>, ApiError> {
    let member = state
        .catalog
        .lock()
        .await
        .update_member(req.to_revision(MemberId::new(member_id)))?;

    Ok(Json(member))
}

/// DELETE /members/:id - 会員を削除
///
/// 貸出中の書籍がある会員は削除できない。
pub async fn delete_member(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<u64>,
) -> Result<Json<Member>, ApiError> {
    let member = state
        .catalog
        .lock()
        .await
        .delete_member(MemberId::new(member_id))?;

    Ok(Json(member))
}

/// GET /members/:id/borrowed - 会員が現在借りている書籍
pub async fn list_borrowed_books(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<u64>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state
        .catalog
        .lock()
        .await
        .borrowed_books(MemberId::new(member_id))?;

    Ok(Json(books))
}

// ============================================================================
// Transactions
// ============================================================================

/// GET /transactions - 全取引を作成順に取得
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<TransactionResponse>> {
    let transactions = state.catalog.lock().await.transactions();
    Json(transactions.into_iter().map(TransactionResponse::from).collect())
}

/// GET /transactions/active - 貸出中の取引のみ取得
pub async fn list_active_transactions(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<TransactionResponse>> {
    let transactions = state.catalog.lock().await.active_transactions();
    Json(transactions.into_iter().map(TransactionResponse::from).collect())
}

/// POST /transactions - 書籍を貸し出す
///
/// 強制されるビジネスルール:
/// - 会員・書籍がそれぞれ1件以上登録されていること
/// - 貸出可能な書籍が1冊以上あること
/// - 指定された会員・書籍が存在し、書籍が貸出中でないこと
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BorrowRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError> {
    let transaction = state.catalog.lock().await.borrow_book(req.to_command())?;
    Ok((StatusCode::CREATED, Json(TransactionResponse::from(transaction))))
}

/// POST /transactions/:id/return - 書籍を返却
///
/// 取引が存在しない、または返却済みの場合は`returned: false`を返す。
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Path(transaction_id): Path<u64>,
) -> Json<ReturnResponse> {
    let returned = state
        .catalog
        .lock()
        .await
        .return_book(TransactionId::new(transaction_id));

    Json(ReturnResponse {
        transaction_id,
        returned,
    })
}
