//! Server-side HTML views.
//!
//! Templates are MiniJinja sources compiled into the binary and looked up by
//! view name (`books` → `books.html`). Every page gets a `view` variable that
//! the layout writes to `<body data-view="...">`.

use axum::response::Html;
use minijinja::{Environment, Value};
use std::sync::OnceLock;

/// View names
pub mod view_names {
    pub const WELCOME: &str = "welcome";
    pub const BOOKS: &str = "books";
    pub const BOOK: &str = "book";
    pub const ADD_BOOK: &str = "addBook";
    pub const ADDED_OR_DELETED: &str = "addedOrDeleted";
    pub const SEARCH: &str = "search";
    pub const LOGIN: &str = "login";
    pub const FORBIDDEN: &str = "403";
    pub const ERROR: &str = "error";
}

/// User-facing messages shown in views
pub mod messages {
    pub const WELCOME: &str = "This is a welcome page";
    pub const INFO_TEXT: &str =
        "Here You shall display information containing informations about newly created TO";
    pub const NOT_ALL_FIELDS_FILL: &str = "All fields must be fill";
    pub const ACCESS_DENIED: &str = "Acces denied";
    pub const BOOK_ADDED_HEADER: &str = "Book Added Correctly";
    pub const BOOK_ADDED_TITLE: &str = "Book Added";
    pub const BOOK_DELETED_HEADER: &str = "Book Deleted Correctly";
    pub const BOOK_DELETED_TITLE: &str = "Book Deleted";
}

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("templates/layout.html")),
    ("welcome.html", include_str!("templates/welcome.html")),
    ("books.html", include_str!("templates/books.html")),
    ("book.html", include_str!("templates/book.html")),
    ("addBook.html", include_str!("templates/addBook.html")),
    ("addedOrDeleted.html", include_str!("templates/addedOrDeleted.html")),
    ("search.html", include_str!("templates/search.html")),
    ("login.html", include_str!("templates/login.html")),
    ("403.html", include_str!("templates/403.html")),
    ("error.html", include_str!("templates/error.html")),
];

static ENVIRONMENT: OnceLock<Environment<'static>> = OnceLock::new();

fn environment() -> &'static Environment<'static> {
    ENVIRONMENT.get_or_init(|| {
        let mut env = Environment::new();
        env.set_loader(load_template);
        env
    })
}

fn load_template(name: &str) -> Result<Option<String>, minijinja::Error> {
    Ok(TEMPLATES
        .iter()
        .find(|(template, _)| *template == name)
        .map(|(_, source)| source.to_string()))
}

/// Render `view` with `ctx`
pub fn render(view: &str, ctx: Value) -> Result<Html<String>, minijinja::Error> {
    let template = environment().get_template(&format!("{view}.html"))?;
    let html = template.render(minijinja::context! { view => view, ..ctx })?;
    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookStatus, BookTo};

    #[test]
    fn test_every_view_renders_with_empty_context() {
        for view in [
            view_names::WELCOME,
            view_names::BOOKS,
            view_names::ADD_BOOK,
            view_names::SEARCH,
            view_names::LOGIN,
            view_names::FORBIDDEN,
            view_names::ERROR,
        ] {
            let html = render(view, minijinja::context! {}).unwrap();
            assert!(
                html.0.contains(&format!("data-view=\"{view}\"")),
                "view {view} should mark itself"
            );
        }
    }

    #[test]
    fn test_books_view_escapes_html() {
        let books = vec![BookTo::new(
            Some(1),
            "<script>alert(1)</script>",
            "Author",
            BookStatus::Free,
        )];
        let html = render(view_names::BOOKS, minijinja::context! { bookList => books }).unwrap();
        assert!(!html.0.contains("<script>"));
        assert!(html.0.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unknown_view_is_an_error() {
        assert!(render("nope", minijinja::context! {}).is_err());
    }
}
