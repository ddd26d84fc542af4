use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use url::Url;

use widget_router::config::{load_config, load_loader_config, LoaderConfig, ServerConfig};
use widget_router::profiles::{FileStore, ProfileStore, RuleStore};
use widget_router::routing::calculate_specificity;
use widget_router::snapshot;
use widget_router::widget::{LoaderElement, PageContext, ResolutionPipeline};

#[derive(Parser)]
#[command(name = "widget-cli")]
#[command(about = "Operator CLI for widget profile routing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the denormalized snapshot from the record store
    BuildSnapshot {
        /// Server configuration (store and snapshot paths)
        #[arg(short, long, env = "WIDGET_ROUTER_CONFIG")]
        config: Option<PathBuf>,
        /// Output path, overriding snapshot.path
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Run the loader's resolution pipeline for a page
    Resolve {
        /// URL the loader script is served from
        #[arg(long)]
        script_src: Url,
        /// Page host
        #[arg(long)]
        domain: String,
        /// Page path
        #[arg(long, default_value = "/")]
        path: String,
        /// Loader element attribute, e.g. --attr data-github=me/repo
        #[arg(long = "attr", value_parser = parse_attr)]
        attrs: Vec<(String, String)>,
        /// Loader configuration (TOML)
        #[arg(long)]
        loader_config: Option<PathBuf>,
    },
    /// Print the specificity score of path patterns
    Specificity {
        #[arg(required = true)]
        patterns: Vec<String>,
    },
}

fn parse_attr(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "widget_router=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::BuildSnapshot { config, out } => {
            let config = match config {
                Some(path) => load_config(&path)?,
                None => ServerConfig::default(),
            };
            let store = FileStore::new(&config.store.profiles_dir, &config.store.rules_dir);
            let profiles = ProfileStore::list_all(&store)?;
            let rules = RuleStore::list_all(&store)?;

            let built = snapshot::build(&profiles, &rules);
            let out = out.unwrap_or_else(|| PathBuf::from(&config.snapshot.path));
            snapshot::write(&out, &built)?;

            tracing::info!(
                path = %out.display(),
                rules = built.rules.len(),
                dropped = rules.len() - built.rules.len(),
                "Snapshot built"
            );
        }
        Commands::Resolve {
            script_src,
            domain,
            path,
            attrs,
            loader_config,
        } => {
            let loader_config = match loader_config {
                Some(path) => load_loader_config(&path)?,
                None => LoaderConfig::default(),
            };

            let loader = attrs
                .into_iter()
                .fold(LoaderElement::new(script_src), |el, (k, v)| el.with_attribute(k, v));
            let page = PageContext::new(domain, path, loader);

            let pipeline = ResolutionPipeline::standard(&loader_config)?;
            match pipeline.resolve(&page).await {
                Some(resolved) => println!("{}", serde_json::to_string_pretty(&resolved)?),
                None => eprintln!("No configuration resolved; the widget would not render"),
            }
        }
        Commands::Specificity { patterns } => {
            for pattern in patterns {
                println!("{}\t{}", calculate_specificity(&pattern), pattern);
            }
        }
    }

    Ok(())
}
