//! `site-routes` command line.
//!
//! Loads a policy file, compiles every site's branches into the server's
//! JSON route array and prints or writes it. `watch` keeps recompiling as the
//! policy file changes.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use site_routes::config::watcher::PolicyWatcher;
use site_routes::config::{load_policy, PolicyConfig};
use site_routes::observability::init_logging;
use site_routes::routing::{compile_sites, routes_json, PlatformCollaborators};

#[derive(Parser)]
#[command(name = "site-routes")]
#[command(about = "Compile site and branch policies into reverse-proxy routes", long_about = None)]
struct Cli {
    /// Policy file (TOML).
    #[arg(short, long, default_value = "sites.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile routes and print them as JSON
    Compile {
        /// Only compile this site
        #[arg(long)]
        site: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate the policy file
    Check,
    /// Recompile into a file whenever the policy changes
    Watch {
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let policy = load_policy(&cli.config)?;
    init_logging(&policy.logging)?;

    tracing::info!(
        config = %cli.config.display(),
        sites = policy.sites.len(),
        "Policy loaded"
    );

    match cli.command {
        Commands::Compile {
            site,
            pretty,
            output,
        } => {
            let mut policy = policy;
            if let Some(id) = site {
                policy.sites.retain(|s| s.id == id);
                if policy.sites.is_empty() {
                    return Err(format!("site {:?} not found in {}", id, cli.config.display()).into());
                }
            }
            let json = compile(&policy, pretty)?;
            match output {
                Some(path) => write_output(&path, &json)?,
                None => println!("{}", json),
            }
        }
        Commands::Check => {
            let branches: usize = policy.sites.iter().map(|s| s.branches.len()).sum();
            println!(
                "{}: {} sites, {} branches, ok",
                cli.config.display(),
                policy.sites.len(),
                branches
            );
        }
        Commands::Watch { output, pretty } => {
            write_output(&output, &compile(&policy, pretty)?)?;

            let (watcher, mut updates) = PolicyWatcher::new(&cli.config);
            let _watcher = watcher.run()?;

            loop {
                tokio::select! {
                    update = updates.recv() => {
                        let Some(policy) = update else { break };
                        match compile(&policy, pretty) {
                            Ok(json) => write_output(&output, &json)?,
                            Err(e) => tracing::error!("Failed to compile routes: {}", e),
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Interrupted, stopping watcher");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

fn compile(policy: &PolicyConfig, pretty: bool) -> Result<String, site_routes::routing::CompileError> {
    let collaborators = PlatformCollaborators::new(policy.platform.clone());
    let routes = compile_sites(&policy.sites, &collaborators)?;
    tracing::info!(
        sites = policy.sites.len(),
        routes = routes.len(),
        "Compiled site routes"
    );
    routes_json(&routes, pretty)
}

fn write_output(path: &Path, json: &str) -> std::io::Result<()> {
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), bytes = json.len(), "Routes written");
    Ok(())
}
