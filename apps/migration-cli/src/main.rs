use clap::{Parser, ValueEnum};
use data::{build_pool, EnvSource, PgConfig};
use migration::{migrate, MigrationCommand};
use sea_orm::SqlxPostgresConnector;

#[derive(Clone, ValueEnum)]
enum Command {
    /// Apply all pending migrations
    Up,
    /// Revert the most recent migration
    Down,
    /// Drop everything and re-apply from scratch
    Fresh,
    /// Show applied / pending migrations
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Database migration tool for the starter backend")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    dotenvy::dotenv().ok();

    // Same keys the backend bootstrap validates: postgres.url,
    // postgres.user, postgres.password.
    let config = match PgConfig::load(&EnvSource) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let pool = match build_pool(&config) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let db = SqlxPostgresConnector::from_sqlx_postgres_pool(pool);

    if let Err(e) = migrate(&db, args.command.into()).await {
        eprintln!("❌ migration failed: {e}");
        std::process::exit(1);
    }
}
