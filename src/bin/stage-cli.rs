//! Stage CLI - Command-line front end for the block stage
//!
//! Lists the block palette, prints the default configuration, and plays
//! scene files while streaming the stage's event feed.

use anyhow::Context;
use blockstage::interpreter::palette;
use blockstage::runtime::state::StageEvent;
use blockstage::runtime::storage::{load_config, load_scene};
use blockstage::StageConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::Instant;

#[derive(Parser)]
#[command(name = "stage")]
#[command(about = "Run block programs for concurrently animated stage actors", long_about = None)]
struct Cli {
    /// Stage configuration file (JSON); defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the block palette
    Palette,

    /// Print the effective configuration as JSON
    Config,

    /// Play a scene file and print the run report
    Play {
        /// Scene file (JSON)
        scene: PathBuf,

        /// Suppress the per-patch event feed
        #[arg(short, long)]
        quiet: bool,
    },
}


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => StageConfig::default(),
    };

    match cli.command {
        Commands::Palette => {
            for template in palette() {
                let sample = template.instantiate();
                println!("{:<7} {:?}  {}", template.kind, template.category(), sample);
            }
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }

        Commands::Play { scene, quiet } => {
            let scene = load_scene(&scene)
                .with_context(|| format!("failed to load scene {}", scene.display()))?;
            let stage = scene.build(config)?;

            let mut feed = stage.subscribe();
            let origin = Instant::now();
            let printer = tokio::spawn(async move {
                loop {
                    match feed.recv().await {
                        Ok(event) => {
                            if !quiet {
                                print_event(origin, &event);
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            eprintln!("(skipped {} events)", skipped);
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            });

            let report = stage.play().await?;
            drop(stage);
            printer.await?;

            if let Some(report) = report {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
    }

    Ok(())
}

fn print_event(origin: Instant, event: &StageEvent) {
    match event {
        StageEvent::Patched { actor, patch, at } => {
            let elapsed = at.saturating_duration_since(origin).as_millis();
            match serde_json::to_string(patch) {
                Ok(json) => println!("[{:>6}ms] {} {}", elapsed, actor, json),
                Err(err) => eprintln!("unprintable patch for {}: {}", actor, err),
            }
        }
        StageEvent::ProgramReplaced { actor, program } => {
            let steps: Vec<_> = program.commands().iter().map(|c| c.describe()).collect();
            println!("           {} program reversed: [{}]", actor, steps.join(", "));
        }
        StageEvent::PhaseChanged { phase, at } => {
            let elapsed = at.saturating_duration_since(origin).as_millis();
            println!("[{:>6}ms] phase {:?}", elapsed, phase);
        }
        StageEvent::RosterChanged { actors } => {
            println!("           roster {:?}", actors);
        }
    }
}
