use super::handlers::dispatch;
use super::render::Renderer;
use super::setup::Cli;
use clap::Parser;
use console::Term;
use showcase::api::ShowcaseApi;
use showcase::config::ShowcaseConfig;
use showcase::error::Result;
use showcase::store::fs::FileStore;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sets up tracing on stderr. `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_config(cli: &Cli) -> Result<ShowcaseConfig> {
    let mut config = ShowcaseConfig::load(cli.data_dir.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(size) = cli.page_size {
        config.page_size = size;
    }
    Ok(config)
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    debug!(data_dir = %config.data_dir().display(), page_size = config.page_size(), "configuration loaded");

    let use_color = !cli.no_color && Term::stdout().features().colors_supported();
    let out = Renderer::new(use_color)?;

    let store = FileStore::new(config.data_dir());
    let mut api = ShowcaseApi::new(store, config);

    let output = dispatch(&mut api, &out, cli.command)?;
    if output.is_empty() {
        return Ok(());
    }
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
    Ok(())
}
