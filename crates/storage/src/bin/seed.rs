use std::fmt;

use chrono::{DateTime, Utc};
use course_core::model::{LESSONS, LessonSlug, ProductDraft, ProductId, ProgressRecord, UserId};
use storage::repository::ProgressRepository;
use storage::sqlite::SqliteRepository;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    user_id: Option<UserId>,
    completed: usize,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidUser { raw: String },
    InvalidCompleted { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidUser { raw } => write!(f, "invalid --user value (expected UUID): {raw}"),
            ArgsError::InvalidCompleted { raw } => write!(
                f,
                "invalid --completed value (expected 0..={}): {raw}",
                LESSONS.len()
            ),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
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

fn parse_user(raw: String) -> Result<UserId, ArgsError> {
    raw.trim()
        .parse::<UserId>()
        .map_err(|_| ArgsError::InvalidUser { raw })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("METODO_DB_URL").unwrap_or_else(|_| "sqlite:metodo.sqlite3".into());
        let mut user_id = match std::env::var("METODO_USER_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_user(raw)?),
            _ => None,
        };
        let mut completed = 0;
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--user" => {
                    let value = require_value(&mut args, "--user")?;
                    user_id = Some(parse_user(value)?);
                }
                "--completed" => {
                    let value = require_value(&mut args, "--completed")?;
                    completed = value
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n <= LESSONS.len())
                        .ok_or_else(|| ArgsError::InvalidCompleted { raw: value.clone() })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            user_id,
            completed,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:metodo.sqlite3)");
    eprintln!("  --user <uuid>             User whose progress is seeded");
    eprintln!("  --completed <n>           Mark the first n lessons completed (default: 0)");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  METODO_DB_URL, METODO_USER_ID");
}

/// Fixed ids keep re-seeding idempotent.
const SAMPLE_PRODUCTS: [(u128, &str, &str, &str, &str); 6] = [
    (
        1,
        "Fibra de Psyllium",
        "Aumenta a saciedade antes das refeições.",
        "saciedade",
        "R$ 49,90",
    ),
    (
        2,
        "Whey Protein Isolado",
        "Proteína de absorção rápida para o café da manhã.",
        "saciedade",
        "R$ 159,00",
    ),
    (
        3,
        "Óculos Bloqueador de Luz Azul",
        "Use 2 horas antes de dormir.",
        "sono",
        "R$ 89,90",
    ),
    (
        4,
        "Magnésio Dimalato",
        "Relaxamento muscular e qualidade do sono.",
        "sono",
        "R$ 59,90",
    ),
    (
        5,
        "Creatina Monohidratada",
        "Energia celular e foco.",
        "energia",
        "R$ 99,90",
    ),
    (
        6,
        "Garrafa Térmica 1L",
        "Hidratação visível o dia inteiro.",
        "habitos",
        "R$ 69,90",
    ),
];

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let repo = SqliteRepository::connect(&args.db_url).await?;
    repo.migrate().await?;
    let now = args.now.unwrap_or_else(Utc::now);

    for (id, title, description, category, price) in SAMPLE_PRODUCTS {
        let product = ProductDraft {
            id: ProductId::new(Uuid::from_u128(id)),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            image_url: None,
            link: format!("https://loja.example.com/p/{id}"),
            price: price.into(),
            active: true,
        }
        .validate()?;
        repo.upsert_product(&product).await?;
    }

    let mut seeded_progress = 0;
    if let Some(user_id) = args.user_id {
        for lesson in LESSONS.iter().take(args.completed) {
            let record = ProgressRecord::completed(user_id, LessonSlug::parse(lesson.slug())?, now);
            repo.mark_complete(&record).await?;
            seeded_progress += 1;
        }
    }

    println!(
        "Seeded {} products and {} completed lessons into {}",
        SAMPLE_PRODUCTS.len(),
        seeded_progress,
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
