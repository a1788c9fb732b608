//! Server-rendered HTML pages.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use minijinja::context;

use super::error::PageError;
use super::params::{BookForm, IdQuery};
use super::state::AppState;
use super::views::{self, messages, view_names};
use crate::service::CatalogError;

type PageResult = Result<Html<String>, PageError>;

/// Page route group
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/books", get(list))
        .route("/books/all", get(all_books))
        .route("/books/book", get(book_details))
        .route("/books/delete", get(delete_book))
        .route("/books/add", get(add_book_form).post(add_book))
        .route("/books/search", get(search_form).post(search_books))
        .route("/login", get(login))
        .route("/loginfailed", get(login_failed))
        .route("/logout", get(logout))
        .route("/403", get(access_denied))
}

async fn welcome() -> PageResult {
    Ok(views::render(
        view_names::WELCOME,
        context! {
            greeting => messages::WELCOME,
            info => messages::INFO_TEXT,
        },
    )?)
}

async fn list() -> Redirect {
    Redirect::to("/books/all")
}

async fn all_books(State(state): State<AppState>) -> PageResult {
    let books = state.service.find_all_books().await?;
    Ok(views::render(view_names::BOOKS, context! { bookList => books })?)
}

async fn book_details(State(state): State<AppState>, Query(params): Query<IdQuery>) -> PageResult {
    let id = params.id()?;
    let book = state
        .service
        .find_book_by_id(id)
        .await?
        .ok_or(CatalogError::NotFound(id))?;
    Ok(views::render(view_names::BOOK, context! { book => book })?)
}

async fn delete_book(State(state): State<AppState>, Query(params): Query<IdQuery>) -> PageResult {
    let id = params.id()?;
    let book = state
        .service
        .find_book_by_id(id)
        .await?
        .ok_or(CatalogError::NotFound(id))?;
    state.service.delete_book(id).await?;

    Ok(views::render(
        view_names::ADDED_OR_DELETED,
        context! {
            book => book,
            addDeleteTitle => messages::BOOK_DELETED_TITLE,
            addDeleteHeader => messages::BOOK_DELETED_HEADER,
        },
    )?)
}

async fn add_book_form() -> PageResult {
    Ok(views::render(view_names::ADD_BOOK, context! {})?)
}

async fn add_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> Result<Response, PageError> {
    if !form.is_complete() {
        tracing::warn!("Rejected book with empty fields");
        let html = views::render(
            view_names::FORBIDDEN,
            context! { errorMessage => messages::NOT_ALL_FIELDS_FILL },
        )?;
        return Ok((StatusCode::BAD_REQUEST, html).into_response());
    }

    let saved = state.service.save_book(form.to_book()?).await?;
    let html = views::render(
        view_names::ADDED_OR_DELETED,
        context! {
            newBook => saved,
            addDeleteTitle => messages::BOOK_ADDED_TITLE,
            addDeleteHeader => messages::BOOK_ADDED_HEADER,
        },
    )?;
    Ok(html.into_response())
}

async fn search_form() -> PageResult {
    Ok(views::render(view_names::SEARCH, context! {})?)
}

async fn search_books(State(state): State<AppState>, Form(form): Form<BookForm>) -> PageResult {
    let criteria = form.criteria()?;
    let books = state.service.find_books_by_all_fields(&criteria).await?;
    Ok(views::render(view_names::BOOKS, context! { bookList => books })?)
}

async fn login() -> PageResult {
    Ok(views::render(view_names::LOGIN, context! {})?)
}

async fn login_failed() -> PageResult {
    Ok(views::render(view_names::LOGIN, context! { error => "true" })?)
}

async fn logout() -> PageResult {
    Ok(views::render(view_names::LOGIN, context! {})?)
}

async fn access_denied() -> Response {
    match views::render(
        view_names::FORBIDDEN,
        context! { errorMessage => messages::ACCESS_DENIED },
    ) {
        Ok(html) => (StatusCode::FORBIDDEN, html).into_response(),
        Err(e) => PageError::from(e).into_response(),
    }
}
