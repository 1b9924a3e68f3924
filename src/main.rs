use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use snapview::config::parse_offset;
use snapview::{
    APP_NAME, Archive, ChatTime, Clock, Config, PrerenderOptions, ServeOptions, prerender, serve,
};

#[derive(Parser)]
#[command(name = "snapview", version, about = "Browse exported chat archives as HTML")]
struct Cli {
    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prerender one HTML page per archive day
    #[command(name = "render")]
    Render {
        /// Archive root holding index.json and days/
        #[arg(long)]
        data: Option<PathBuf>,
        /// Output directory for the day pages
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        assets_href: Option<String>,
        #[arg(long)]
        styles_href: Option<String>,
        #[arg(long)]
        public_href: Option<String>,
        #[arg(long, value_enum)]
        chat_time: Option<ChatTime>,
        /// Offset for clock times, e.g. +02:00 (default from config, else local)
        #[arg(long)]
        utc_offset: Option<String>,
        /// Also write .html.gz next to every page
        #[arg(long)]
        gzip: bool,
    },

    /// Serve the live viewer
    #[command(name = "serve")]
    Serve {
        #[arg(long)]
        data: Option<PathBuf>,
        /// Directory holding assets/, styles/ and public/
        #[arg(long)]
        web_root: Option<PathBuf>,
        /// Listen address (default from ~/.snapview/config.toml or 127.0.0.1:8080)
        #[arg(long)]
        bind: Option<String>,
        #[arg(long, value_enum)]
        chat_time: Option<ChatTime>,
        #[arg(long)]
        utc_offset: Option<String>,
    },

    /// List the days in an archive
    #[command(name = "days")]
    Days {
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// View or modify config (~/.snapview/config.toml)
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current config
    Show,
    /// Set a config value
    Set {
        /// Key to set (data_dir, html_dir, web_root, bind, assets_href, styles_href,
        /// public_href, chat_time, utc_offset)
        key: String,
        /// Value to set
        value: String,
    },
    /// Reset config to defaults
    Reset,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli.command) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Explicit flag, else config, else local offset, else UTC
fn resolve_offset(flag: Option<String>, config: &Config) -> Result<time::UtcOffset> {
    match flag {
        Some(value) => parse_offset(&value),
        None => config.resolve_offset(),
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Render {
            data,
            out,
            assets_href,
            styles_href,
            public_href,
            chat_time,
            utc_offset,
            gzip,
        } => {
            let config = Config::load().unwrap_or_default();
            let offset = resolve_offset(utc_offset, &config)?;
            let result = prerender(PrerenderOptions {
                data_dir: data.unwrap_or(config.data_dir),
                out_dir: out.unwrap_or(config.html_dir),
                assets_href: assets_href.unwrap_or(config.assets_href),
                styles_href: styles_href.unwrap_or(config.styles_href),
                public_href: public_href.unwrap_or(config.public_href),
                chat_time: chat_time.unwrap_or(config.chat_time),
                clock: Clock::system(offset),
                gzip,
            })?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Serve {
            data,
            web_root,
            bind,
            chat_time,
            utc_offset,
        } => {
            let config = Config::load().unwrap_or_default();
            // the local offset must be read before the runtime starts its threads
            let offset = resolve_offset(utc_offset, &config)?;
            let options = ServeOptions {
                data_dir: data.unwrap_or(config.data_dir),
                web_root: web_root.unwrap_or(config.web_root),
                bind: bind.unwrap_or(config.bind),
                offset,
                chat_time: chat_time.unwrap_or(config.chat_time),
            };
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .thread_name(APP_NAME)
                .build()
                .context("failed to start async runtime")?;
            runtime.block_on(serve(options))?;
        }
        Commands::Days { data } => {
            let config = Config::load().unwrap_or_default();
            let archive = Archive::new(data.unwrap_or(config.data_dir));
            let days = archive.list_days()?;
            println!("{}", serde_json::to_string_pretty(&days)?);
        }
        Commands::Config { action } => {
            handle_config(action)?;
        }
    }
    Ok(())
}

fn handle_config(action: Option<ConfigAction>) -> Result<()> {
    match action {
        None | Some(ConfigAction::Show) => {
            let config = Config::load().unwrap_or_default();
            print!(
                "{}",
                toml::to_string_pretty(&config).context("failed to serialize config")?
            );
        }
        Some(ConfigAction::Set { key, value }) => {
            let mut config = Config::load().unwrap_or_default();
            config.set(&key, value)?;
            let path = config.save()?;
            println!("saved to {}", path.display());
        }
        Some(ConfigAction::Reset) => {
            let config = Config::default();
            let path = config.save()?;
            println!("reset to defaults at {}", path.display());
        }
    }
    Ok(())
}
