use std::fmt;
use std::sync::Arc;

use course_core::model::UserId;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    ActivityService, AppServices, Clock, DirectoryContent, EmbeddedContent, LessonContentSource,
    LessonService, ProductService, ProgressService,
};
use storage::remote::RemoteConfig;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite:metodo.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidUser { raw: String },
    InvalidBackend { raw: String },
    MissingUser,
    MissingRemoteConfig,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidUser { raw } => {
                write!(f, "invalid --user value (expected UUID): {raw}")
            }
            ArgsError::InvalidBackend { raw } => {
                write!(f, "invalid --backend value (expected sqlite or remote): {raw}")
            }
            ArgsError::MissingUser => write!(f, "a user id is required (--user or METODO_USER_ID)"),
            ArgsError::MissingRemoteConfig => write!(
                f,
                "remote backend requires METODO_REMOTE_URL and METODO_REMOTE_KEY"
            ),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Sqlite,
    Remote,
}

impl Backend {
    fn parse(raw: &str) -> Result<Self, ArgsError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "local" => Ok(Self::Sqlite),
            "remote" => Ok(Self::Remote),
            _ => Err(ArgsError::InvalidBackend {
                raw: raw.to_string(),
            }),
        }
    }
}

#[derive(Debug)]
struct Args {
    backend: Backend,
    db_url: String,
    user_id: UserId,
}

fn parse_user(raw: String) -> Result<UserId, ArgsError> {
    raw.trim()
        .parse::<UserId>()
        .map_err(|_| ArgsError::InvalidUser { raw })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut backend = env_value("METODO_BACKEND")
            .map(|raw| Backend::parse(&raw))
            .transpose()?
            .unwrap_or(Backend::Sqlite);
        let mut db_url = env_value("METODO_DB_URL").map_or_else(
            || normalize_sqlite_url(DEFAULT_DB_URL.to_string()),
            normalize_sqlite_url,
        );
        let mut user_id = env_value("METODO_USER_ID").map(parse_user).transpose()?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--backend" => {
                    let value = require_value(args, "--backend")?;
                    backend = Backend::parse(&value)?;
                }
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--user" => {
                    let value = require_value(args, "--user")?;
                    user_id = Some(parse_user(value)?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            backend,
            db_url,
            user_id: user_id.ok_or(ArgsError::MissingUser)?,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- --user <uuid> [--backend sqlite|remote] [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --backend sqlite");
    eprintln!("  --db {DEFAULT_DB_URL}   (local state only when --backend remote)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  METODO_USER_ID, METODO_BACKEND, METODO_DB_URL, METODO_CONTENT_DIR");
    eprintln!("  METODO_REMOTE_URL, METODO_REMOTE_KEY, METODO_REMOTE_TOKEN, METODO_REMOTE_TIMEOUT_SECS");
    eprintln!("  RUST_LOG (default: info)");
}

struct DesktopApp {
    user_id: UserId,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn lessons(&self) -> Arc<LessonService> {
        self.services.lessons()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn products(&self) -> Arc<ProductService> {
        self.services.products()
    }

    fn activity(&self) -> Arc<ActivityService> {
        self.services.activity()
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn content_source() -> Arc<dyn LessonContentSource> {
    match DirectoryContent::from_env() {
        Some(dir) => {
            tracing::info!(?dir, "loading lesson content from directory");
            Arc::new(dir)
        }
        None => Arc::new(EmbeddedContent),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    prepare_sqlite_file(&args.db_url)?;
    let clock = Clock::default_clock();
    let content = content_source();
    let services = match args.backend {
        Backend::Sqlite => AppServices::new_sqlite(&args.db_url, clock, content).await?,
        Backend::Remote => {
            let config = RemoteConfig::from_env().ok_or(ArgsError::MissingRemoteConfig)?;
            AppServices::new_remote(config, &args.db_url, clock, content).await?
        }
    };
    tracing::info!(user_id = %args.user_id, backend = ?args.backend, "starting");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        user_id: args.user_id,
        services,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Método M")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> impl Iterator<Item = String> {
        raw.iter().map(ToString::to_string).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn backend_names_parse_case_insensitively() {
        assert_eq!(Backend::parse("SQLite").unwrap(), Backend::Sqlite);
        assert_eq!(Backend::parse(" remote ").unwrap(), Backend::Remote);
        assert!(matches!(
            Backend::parse("postgres"),
            Err(ArgsError::InvalidBackend { .. })
        ));
    }

    #[test]
    fn flags_override_defaults() {
        let parsed = Args::parse(&mut args(&[
            "--backend",
            "remote",
            "--db",
            "sqlite::memory:",
            "--user",
            "00000000-0000-0000-0000-00000000002a",
        ]))
        .unwrap();
        assert_eq!(parsed.backend, Backend::Remote);
        assert_eq!(parsed.db_url, "sqlite::memory:");
        assert_eq!(parsed.user_id.to_string(), "00000000-0000-0000-0000-00000000002a");
    }

    #[test]
    fn bad_user_and_unknown_flags_are_rejected() {
        assert!(matches!(
            Args::parse(&mut args(&["--user", "ana"])),
            Err(ArgsError::InvalidUser { .. })
        ));
        assert!(matches!(
            Args::parse(&mut args(&["--deck-id", "1"])),
            Err(ArgsError::UnknownArg(_))
        ));
        assert!(matches!(
            Args::parse(&mut args(&["--db"])),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/metodo.sqlite3".to_string());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/metodo.sqlite3"), "{url}");
        assert_eq!(
            normalize_sqlite_url("sqlite::memory:".to_string()),
            "sqlite::memory:"
        );
    }

    #[test]
    fn memory_database_needs_no_file() {
        assert!(prepare_sqlite_file("sqlite::memory:").is_ok());
        assert!(prepare_sqlite_file("postgres://x").is_err());
    }
}
