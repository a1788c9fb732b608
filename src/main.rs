use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webstore::config::{find_config_file, get_config, load_config, Config};
use webstore::models::{BookStatus, BookTo, SearchCriteria};
use webstore::repository::{
    seed_books, seed_if_empty, BookRepository, InMemoryBookRepository, JsonFileBookRepository,
};
use webstore::service::{BookService, CatalogService};
use webstore::ui::{self, Status};
use webstore::web::{self, AppState};

/// Webstore - A library catalog with a web UI and a REST API
#[derive(Parser, Debug)]
#[command(name = "webstore")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse, search and edit a library catalog", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Book status as accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StatusArg {
    Free,
    Loan,
    Missing,
}

impl From<StatusArg> for BookStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Free => BookStatus::Free,
            StatusArg::Loan => BookStatus::Loan,
            StatusArg::Missing => BookStatus::Missing,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the web server (pages and REST API)
    #[command(visible_alias = "s")]
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// List every book in the catalog
    #[command(visible_alias = "ls")]
    List,

    /// Show a single book
    Show {
        /// Book id
        id: i64,
    },

    /// Search the catalog by title, authors and status
    Search {
        /// Case-insensitive title fragment
        #[arg(long, short)]
        title: Option<String>,

        /// Author fragment
        #[arg(long, short)]
        authors: Option<String>,

        /// Lending status
        #[arg(long, short, value_enum)]
        status: Option<StatusArg>,
    },

    /// Add a book to the catalog
    Add {
        /// Book title
        #[arg(long, short)]
        title: String,

        /// Author line
        #[arg(long, short)]
        authors: String,

        /// Lending status
        #[arg(long, short, value_enum, default_value_t = StatusArg::Free)]
        status: StatusArg,
    },

    /// Delete a book from the catalog
    #[command(visible_alias = "rm")]
    Delete {
        /// Book id
        id: i64,
    },

    /// Write a starter configuration file
    InitConfig {
        /// Where to write the file
        #[arg(default_value = "webstore.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// Print environment variables that influence the application
fn print_env_vars() {
    println!("Environment variables:");
    let mut found = false;
    for (key, value) in std::env::vars() {
        if key.starts_with("WEBSTORE_") || key == "RUST_LOG" {
            println!("  {}={}", key, value);
            found = true;
        }
    }
    if !found {
        println!("  (none set)");
    }
    println!();
    println!("Overrides use WEBSTORE_<SECTION>__<KEY>, e.g. WEBSTORE_SERVER__PORT=9090");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show environment variables and exit if requested
    if cli.env {
        print_env_vars();
        return Ok(());
    }

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let config = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => get_config().context("Failed to read configuration from environment")?,
    };

    init_tracing(&cli, &config);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    if let Some(Commands::InitConfig { path, force }) = &cli.command {
        return init_config(path, *force);
    }

    let service = build_service(&config).await?;

    // Execute command
    match cli.command {
        Some(Commands::Serve { host, port }) => {
            let mut server = config.server.clone();
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }

            let listener = tokio::net::TcpListener::bind(server.bind_address())
                .await
                .with_context(|| format!("Failed to bind {}", server.bind_address()))?;
            web::serve(listener, AppState::new(service)).await?;
        }
        Some(Commands::List) => {
            let books = service.find_all_books().await?;
            output_books(&books, cli.output);
        }
        Some(Commands::Show { id }) => match service.find_book_by_id(id).await? {
            Some(book) => output_book(&book, cli.output),
            None => {
                ui::print_status(Status::Error, format!("Book {} not found", id));
                std::process::exit(1);
            }
        },
        Some(Commands::Search {
            title,
            authors,
            status,
        }) => {
            let criteria = SearchCriteria::from_fields(
                title.as_deref().unwrap_or_default(),
                authors.as_deref().unwrap_or_default(),
                status.map(BookStatus::from),
            );
            let books = service.find_books_by_all_fields(&criteria).await?;
            if !cli.quiet && is_table(cli.output) {
                ui::print_status(Status::Search, format!("Found {} books", books.len()));
            }
            output_books(&books, cli.output);
        }
        Some(Commands::Add {
            title,
            authors,
            status,
        }) => {
            let book = BookTo::new(None, title, authors, status.into());
            let saved = service.save_book(book).await?;
            if !cli.quiet && is_table(cli.output) {
                ui::print_status(Status::Success, "Book added");
            }
            output_book(&saved, cli.output);
        }
        Some(Commands::Delete { id }) => {
            service.delete_book(id).await?;
            if !cli.quiet {
                ui::print_status(Status::Success, format!("Deleted book {}", id));
            }
        }
        Some(Commands::InitConfig { .. }) => unreachable!("handled before the service is built"),
        None => {
            ui::print_section(&format!("Webstore v{}", webstore::VERSION));
            ui::print_status(
                Status::Info,
                "Run `webstore serve` to start the web server, or `webstore --help`.",
            );
        }
    }

    Ok(())
}

fn init_tracing(cli: &Cli, config: &Config) {
    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| {
            format!("webstore={},tower_http={}", env_filter, env_filter)
        }),
    );

    // Logs go to stderr so command output on stdout stays machine-readable
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        ui::print_status(
            Status::Warning,
            format!("{} already exists (use --force to overwrite)", path.display()),
        );
        return Ok(());
    }

    Config::starter()
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    ui::print_status(Status::Success, format!("Wrote {}", path.display()));
    Ok(())
}

async fn build_service(config: &Config) -> Result<Arc<dyn BookService>> {
    let repository: Arc<dyn BookRepository> = match &config.storage.path {
        Some(path) => {
            let repository = JsonFileBookRepository::open(path)
                .await
                .with_context(|| format!("Failed to open catalog {}", path.display()))?;
            tracing::debug!("Using JSON catalog at {}", repository.path().display());
            Arc::new(repository)
        }
        None => {
            tracing::debug!("Using in-memory catalog");
            Arc::new(InMemoryBookRepository::new())
        }
    };

    if config.storage.seed {
        seed_if_empty(repository.as_ref(), seed_books()).await?;
    }

    Ok(Arc::new(CatalogService::new(repository)))
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if ui::is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn is_table(format: OutputFormat) -> bool {
    resolve_format(format) == OutputFormat::Table
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => ui::print_status(Status::Error, format!("Failed to encode JSON: {}", e)),
    }
}

fn output_book(book: &BookTo, format: OutputFormat) {
    match resolve_format(format) {
        OutputFormat::Json => print_json(book),
        OutputFormat::Plain => println!("{}", plain_line(book)),
        OutputFormat::Table => ui::print_book(book),
        OutputFormat::Auto => unreachable!(),
    }
}

fn output_books(books: &[BookTo], format: OutputFormat) {
    match resolve_format(format) {
        OutputFormat::Json => print_json(books),
        OutputFormat::Plain => {
            for book in books {
                println!("{}", plain_line(book));
            }
        }
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Id", "Title", "Authors", "Status"]);

            for book in books {
                table.add_row(vec![
                    Cell::new(book.id.map(|id| id.to_string()).unwrap_or_default()),
                    Cell::new(ui::truncate_with_ellipsis(&book.title, 50))
                        .add_attribute(Attribute::Bold),
                    Cell::new(ui::truncate_with_ellipsis(&book.authors, 30)),
                    Cell::new(book.status.as_str()),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Auto => unreachable!(),
    }
}

fn plain_line(book: &BookTo) -> String {
    let id = book.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    format!("{}\t{}\t{}\t{}", id, book.title, book.authors, book.status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_values() {
        assert_eq!(OutputFormat::Auto as i32, 0);
        assert_eq!(OutputFormat::Table as i32, 1);
        assert_eq!(OutputFormat::Json as i32, 2);
        assert_eq!(OutputFormat::Plain as i32, 3);
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["webstore"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert_eq!(cli.output, OutputFormat::Auto);
        assert!(cli.config.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::parse_from(["webstore", "-v"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["webstore", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_serve_overrides() {
        let cli = Cli::parse_from(["webstore", "serve", "--host", "0.0.0.0", "-p", "9090"]);
        match cli.command {
            Some(Commands::Serve { host, port }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9090));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_search_arguments() {
        let cli = Cli::parse_from(["webstore", "search", "--title", "book", "--status", "loan"]);
        match cli.command {
            Some(Commands::Search {
                title,
                authors,
                status,
            }) => {
                assert_eq!(title.as_deref(), Some("book"));
                assert!(authors.is_none());
                assert_eq!(status, Some(StatusArg::Loan));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_add_defaults_to_free() {
        let cli = Cli::parse_from(["webstore", "add", "-t", "Lalka", "-a", "Prus"]);
        match cli.command {
            Some(Commands::Add { status, .. }) => {
                assert_eq!(BookStatus::from(status), BookStatus::Free)
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["webstore", "search", "--status", "burnt"]).is_err());
    }

    #[test]
    fn test_global_output_after_subcommand() {
        let cli = Cli::parse_from(["webstore", "list", "-o", "json"]);
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_plain_line() {
        let book = BookTo::new(Some(3), "Lalka", "Prus", BookStatus::Loan);
        assert_eq!(plain_line(&book), "3\tLalka\tPrus\tLOAN");
    }
}
