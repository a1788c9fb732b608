//! JSON REST API under `/rest/books`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, put};
use axum::{Json, Router};

use super::error::ApiError;
use super::params::{BookForm, IdQuery};
use super::state::AppState;
use crate::models::BookTo;
use crate::service::CatalogError;

/// Body returned by `DELETE /rest/books/deleteAll`
pub const ALL_BOOKS_DELETED: &str = "All books deleted";

/// REST route group
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rest/books", get(get_all_books))
        .route("/rest/books/book", get(get_book_by_id))
        .route("/rest/books/find", get(find_books))
        .route("/rest/books/add", put(add_book))
        .route("/rest/books/edit", put(edit_book))
        .route("/rest/books/delete", delete(delete_book))
        .route("/rest/books/deleteAll", delete(delete_all_books))
}

/// `GET /rest/books`
async fn get_all_books(State(state): State<AppState>) -> Result<Json<Vec<BookTo>>, ApiError> {
    Ok(Json(state.service.find_all_books().await?))
}

/// `GET /rest/books/book?id=N`
async fn get_book_by_id(
    State(state): State<AppState>,
    Query(params): Query<IdQuery>,
) -> Result<Json<BookTo>, ApiError> {
    let id = params.id()?;
    match state.service.find_book_by_id(id).await? {
        Some(book) => Ok(Json(book)),
        None => Err(CatalogError::NotFound(id).into()),
    }
}

/// `GET /rest/books/find?title=&authors=&status=`
async fn find_books(
    State(state): State<AppState>,
    Query(params): Query<BookForm>,
) -> Result<Json<Vec<BookTo>>, ApiError> {
    let criteria = params.criteria()?;
    Ok(Json(state.service.find_books_by_all_fields(&criteria).await?))
}

/// `PUT /rest/books/add`
async fn add_book(
    State(state): State<AppState>,
    payload: Result<Json<BookTo>, JsonRejection>,
) -> Result<(StatusCode, Json<BookTo>), ApiError> {
    let Json(book) = payload.map_err(invalid_body)?;
    let saved = state.service.save_book(book).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// `PUT /rest/books/edit`
async fn edit_book(
    State(state): State<AppState>,
    payload: Result<Json<BookTo>, JsonRejection>,
) -> Result<Json<BookTo>, ApiError> {
    let Json(book) = payload.map_err(invalid_body)?;
    Ok(Json(state.service.save_book(book).await?))
}

/// `DELETE /rest/books/delete?id=N`, responding with the deleted book
async fn delete_book(
    State(state): State<AppState>,
    Query(params): Query<IdQuery>,
) -> Result<Json<BookTo>, ApiError> {
    let id = params.id()?;
    let book = state
        .service
        .find_book_by_id(id)
        .await?
        .ok_or(CatalogError::NotFound(id))?;
    state.service.delete_book(id).await?;
    Ok(Json(book))
}

/// `DELETE /rest/books/deleteAll`
async fn delete_all_books(State(state): State<AppState>) -> Result<Json<&'static str>, ApiError> {
    let books = state.service.find_all_books().await?;
    for id in books.iter().filter_map(|book| book.id) {
        state.service.delete_book(id).await?;
    }
    tracing::info!("Deleted {} books", books.len());
    Ok(Json(ALL_BOOKS_DELETED))
}

fn invalid_body(rejection: JsonRejection) -> ApiError {
    ApiError::InvalidArgument {
        message: rejection.body_text(),
    }
}
