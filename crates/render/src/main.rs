use anyhow::Context;
use breadth_core::config::Settings;
use breadth_core::ingest::file::FileDocumentSource;
use breadth_core::ingest::http::HttpDocumentSource;
use breadth_core::ingest::{load_dashboard, DocumentSource};
use breadth_core::render::html::{error_page, HtmlSurface};
use breadth_core::render::text::TextSurface;
use breadth_core::render::{render, ChartStyle};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PAGE_TITLE: &str = "Market Health";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Html,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "breadth_render")]
struct Args {
    /// Fetch documents over HTTP from this base URL instead of the local data directory.
    #[arg(long)]
    base_url: Option<String>,

    /// Directory the document paths are relative to (ignored with --base-url).
    #[arg(long)]
    data_dir: Option<String>,

    /// Snapshot document path.
    #[arg(long)]
    latest: Option<String>,

    /// History document path.
    #[arg(long)]
    history: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Output file for HTML. Text always goes to stdout.
    #[arg(long, default_value = "dashboard.html")]
    out: PathBuf,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(v) = &self.base_url {
            settings.data_base_url = Some(v.clone());
        }
        if let Some(v) = &self.data_dir {
            settings.data_dir = v.clone();
        }
        if let Some(v) = &self.latest {
            settings.latest_path = v.clone();
        }
        if let Some(v) = &self.history {
            settings.history_path = v.clone();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    args.apply(&mut settings);

    run(&args, &settings).await
}

/// Loads both documents, then renders the dashboard or, on failure, the error page only.
async fn run(args: &Args, settings: &Settings) -> anyhow::Result<()> {
    let style = ChartStyle::from_env();
    let source = build_source(settings)?;
    let paths = settings.document_paths();

    let (snapshot, history) = match load_dashboard(source.as_ref(), &paths).await {
        Ok(docs) => docs,
        Err(err) => {
            let path = err.path().to_string();
            let err = anyhow::Error::new(err);
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(%path, error = %err, "dashboard load failed; nothing rendered");

            if args.format == OutputFormat::Html {
                write_output(&args.out, &error_page(PAGE_TITLE, &format!("{err:#}")))?;
            }
            return Err(err);
        }
    };

    match args.format {
        OutputFormat::Html => {
            let mut surface = HtmlSurface::new(PAGE_TITLE);
            render(snapshot, history, &style, &mut surface);
            write_output(&args.out, &surface.to_html())?;
            tracing::info!(out = %args.out.display(), "dashboard written");
        }
        OutputFormat::Text => {
            let mut surface = TextSurface::new();
            render(snapshot, history, &style, &mut surface);
            print!("{}", surface.to_text());
        }
    }

    Ok(())
}

fn build_source(settings: &Settings) -> anyhow::Result<Box<dyn DocumentSource>> {
    if settings.data_base_url.is_some() {
        let source = HttpDocumentSource::from_settings(settings)?;
        return Ok(Box::new(source));
    }
    Ok(Box::new(FileDocumentSource::from_settings(settings)))
}

fn write_output(out: &std::path::Path, body: &str) -> anyhow::Result<()> {
    std::fs::write(out, body).with_context(|| format!("failed to write {}", out.display()))
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
