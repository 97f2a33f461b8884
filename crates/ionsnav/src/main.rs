//! ionsnav - Site header navigation for IONS

mod cli;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ionsnav_core::{MenuStore, MenuWatcher, NavConfig, CONFIG_FILE};
use ionsnav_web::page::DemoPage;
use ionsnav_web::ServeOptions;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ionsnav",
    version,
    about = "Render and serve the IONS site header",
    long_about = "Renders the IONS site header (desktop bar, hover flyouts, mobile accordion,\n\
                  search and theme toggle) from a JSON, YAML or TOML menu file.\n\
                  \n\
                  Examples:\n\
                    ionsnav render --menu menu.json        # Print the header fragment\n\
                    ionsnav render --page -q s=calcium     # Full demo page, search pre-filled\n\
                    ionsnav serve --port 3000              # Serve the header with live reload\n\
                    ionsnav check                          # Report missing or broken inputs\n\
                    ionsnav tree                           # List items with their element ids\n\
                    ionsnav init                           # Write a default ionsnav.toml\n\
                  \n\
                  Environment Variables:\n\
                    IONSNAV_CONFIG                         # Config file path\n\
                    IONSNAV_MENU                           # Menu file path (overrides config)\n\
                    IONSNAV_NO_COLOR                       # Disable ANSI colors\n\
                    RUST_LOG                               # Log filter (default ionsnav=info)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (default: ./ionsnav.toml, then the user config directory)
    #[arg(long, short = 'c', env = "IONSNAV_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Menu file, overriding the one named in the config
    #[arg(long, short = 'm', env = "IONSNAV_MENU", global = true)]
    menu: Option<PathBuf>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "IONSNAV_NO_COLOR", global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the rendered header
    Render {
        /// Wrap the header in the demo page
        #[arg(long)]
        page: bool,
        /// Incoming query parameter, e.g. `s=calcium` (repeatable)
        #[arg(long = "query", short = 'q', value_parser = cli::parse_query_pair)]
        query: Vec<(String, String)>,
        /// Write to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Serve the header over HTTP
    Serve {
        #[arg(long, env = "IONSNAV_HOST", default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, short = 'p', env = "IONSNAV_PORT", default_value = "3000")]
        port: u16,
        /// Directory with the wasm client bundle
        #[arg(long, env = "IONSNAV_PKG_DIR", default_value = "pkg")]
        pkg_dir: PathBuf,
        /// Do not watch the menu and assets for changes
        #[arg(long)]
        no_watch: bool,
    },
    /// Load everything and report fallbacks and problems
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Exit with an error when anything beyond warnings was reported
        #[arg(long)]
        strict: bool,
    },
    /// List menu items with their element ids
    Tree {
        /// Output the loaded tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a config file with every default spelled out
    Init {
        #[arg(default_value = CONFIG_FILE)]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ionsnav=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .init();

    let no_color = cli.no_color;

    if let Command::Init { path, force } = &cli.command {
        return run_init(path, *force);
    }

    let config = load_config(cli.config.as_deref(), cli.menu)?;

    match cli.command {
        Command::Render {
            page,
            query,
            output,
        } => run_render(config, page, query, output).await,
        Command::Serve {
            host,
            port,
            pkg_dir,
            no_watch,
        } => run_serve(config, SocketAddr::new(host, port), pkg_dir, !no_watch).await,
        Command::Check { json, strict } => run_check(config, json, strict, no_color).await,
        Command::Tree { json } => run_tree(config, json, no_color).await,
        Command::Init { .. } => Ok(()),
    }
}

/// Defaults, then the config file, then command-line overrides
fn load_config(explicit: Option<&std::path::Path>, menu: Option<PathBuf>) -> Result<NavConfig> {
    let (mut config, source) = NavConfig::discover(explicit).context("Failed to load config")?;
    match &source {
        Some(path) => tracing::info!(path = %path.display(), "Using config file"),
        None => tracing::debug!("No config file, using defaults"),
    }

    if let Some(menu) = menu {
        // Relative to where the command runs, not to the config file
        let menu = if menu.is_absolute() {
            menu
        } else {
            std::env::current_dir()
                .context("Could not determine current directory")?
                .join(menu)
        };
        config.menu_path = Some(menu);
    }
    Ok(config)
}

async fn loaded_store(config: NavConfig) -> Arc<MenuStore> {
    let store = Arc::new(MenuStore::new(config));
    store.initial_load().await;
    store
}

async fn run_render(
    config: NavConfig,
    page: bool,
    query: Vec<(String, String)>,
    output: Option<PathBuf>,
) -> Result<()> {
    let store = loaded_store(config).await;
    let header = store.render_header(query).into_string();

    let html = if page {
        DemoPage {
            brand: store.config().brand.clone(),
            header,
            status: store.degraded_state().status(),
            live_reload: false,
        }
        .render()
    } else {
        header
    };

    match output {
        Some(path) => std::fs::write(&path, html)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{html}"),
    }
    Ok(())
}

async fn run_serve(
    config: NavConfig,
    addr: SocketAddr,
    pkg_dir: PathBuf,
    watch: bool,
) -> Result<()> {
    let store = loaded_store(config).await;

    let _watcher = if watch {
        Some(
            MenuWatcher::start(Arc::clone(&store), Default::default())
                .await
                .context("Failed to start file watcher")?,
        )
    } else {
        None
    };

    let options = ServeOptions {
        pkg_dir,
        live_reload: watch,
    };
    ionsnav_web::run(store, options, addr).await
}

async fn run_check(config: NavConfig, json: bool, strict: bool, no_color: bool) -> Result<()> {
    let store = loaded_store(config).await;
    let report = store.last_report();

    println!(
        "{}",
        cli::format_report(&report, &store.degraded_state(), json, no_color)
    );

    let (_, errors, fatal) = report.error_count();
    if strict && errors + fatal > 0 {
        bail!("{} error(s), {} fatal", errors, fatal);
    }
    Ok(())
}

async fn run_tree(config: NavConfig, json: bool, no_color: bool) -> Result<()> {
    let store = loaded_store(config).await;
    if store.last_report().used_fallback_menu {
        eprintln!("Showing the built-in menu (no menu file loaded)");
    }
    println!("{}", cli::format_tree(&store.tree(), json, no_color));
    Ok(())
}

fn run_init(path: &std::path::Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    NavConfig::default().save(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
