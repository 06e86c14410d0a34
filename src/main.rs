//! soccer-sql - runs the query catalog against a SQLite dataset.

use soccer_sql::cli::Cli;
use soccer_sql::config::{Config, Settings};
use soccer_sql::db::{self, DatasetClient};
use soccer_sql::error::Result;
use soccer_sql::logging;
use soccer_sql::output::{self, ReportRenderer};
use soccer_sql::query::{self, QueryRunner};
use tracing::{info, warn};

/// Exit code when the dataset opened but at least one query failed.
const EXIT_QUERY_FAILURES: i32 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse_args();
    logging::init_stderr_logging(logging::level_for(cli.verbose));

    match run(&cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: &Cli) -> Result<i32> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;
    let settings = Settings::resolve(cli, &config)?;

    if settings.list {
        print!("{}", output::render_catalog(query::catalog()));
        return Ok(0);
    }

    // Validate the selection before touching the dataset.
    let entries = query::catalog::select(&settings.only)?;

    let client = db::open(&settings.dataset).await?;
    let outcome = run_with_client(client.as_ref(), &settings, &entries).await;
    // Release the connection whatever happened above.
    if let Err(e) = client.close().await {
        warn!("Failed to close dataset: {e}");
    }
    outcome
}

async fn run_with_client(
    client: &dyn DatasetClient,
    settings: &Settings,
    entries: &[&query::CatalogEntry],
) -> Result<i32> {
    if settings.tables {
        let schema = client.introspect_schema().await?;
        print!("{}", output::render_schema(&schema));
    }

    let report = QueryRunner::new(client)
        .run(entries, settings.fail_fast)
        .await;

    let renderer = ReportRenderer::new(settings.format, settings.max_rows);
    print!("{}", renderer.render(&report));

    Ok(if report.is_success() {
        0
    } else {
        EXIT_QUERY_FAILURES
    })
}
