//! Kennsla server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the course-registration API over
//! HTTP. An optional `--seed` file loads catalog data on startup.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use kennsla_core::{
  course::{CourseInstance, CourseTemplate},
  person::Person,
  service::CourseService,
};
use kennsla_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Kennsla course-registration server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// JSON catalog file loaded into the store before serving.
  #[arg(long)]
  seed: Option<PathBuf>,
}

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  host:       String,
  port:       u16,
  store_path: PathBuf,
}

/// Catalog entities maintained outside the engines; loaded with `--seed`.
#[derive(Debug, Deserialize)]
struct SeedFile {
  #[serde(default)]
  persons:          Vec<Person>,
  #[serde(default)]
  course_templates: Vec<CourseTemplate>,
  #[serde(default)]
  course_instances: Vec<CourseInstance>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("KENNSLA"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open SQLite store.
  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.store_path)
    })?;

  if let Some(path) = &cli.seed {
    seed_catalog(&store, path).await?;
  }

  let service = Arc::new(CourseService::new(store));
  let app = axum::Router::new()
    .nest("/api", kennsla_api::api_router(service))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Load persons, templates and instances from a JSON seed file.
async fn seed_catalog(store: &SqliteStore, path: &PathBuf) -> anyhow::Result<()> {
  let raw = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read seed file {path:?}"))?;
  let seed: SeedFile =
    serde_json::from_str(&raw).context("failed to parse seed file")?;

  for person in &seed.persons {
    store.add_person(person).await?;
  }
  for template in &seed.course_templates {
    store.add_course_template(template).await?;
  }
  for instance in &seed.course_instances {
    store.add_course_instance(instance).await?;
  }

  tracing::info!(
    persons = seed.persons.len(),
    templates = seed.course_templates.len(),
    instances = seed.course_instances.len(),
    "seeded catalog"
  );
  Ok(())
}
