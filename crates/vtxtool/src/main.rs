mod dump;
mod scene;

use clap::{Parser, Subcommand};
use eyre_pretty::{Context, Result};
use pvrgl::pvr::{self, ListType};
use std::{io::Write, path::PathBuf};

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a scene and print the command lists it produces
    Run {
        /// Path to the scene file (.ron)
        #[arg(short, long)]
        scene: PathBuf,
        /// Only print this list
        #[arg(short, long, value_enum)]
        list: Option<scene::List>,
        /// Write the raw bytes of the printed lists to this file
        #[arg(long)]
        raw: Option<PathBuf>,
    },
}

/// A CLI to run vertex array scenes through the submission pipeline.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Action to take
    #[command(subcommand)]
    command: Command,
}

fn setup_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or(EnvFilter::new("vtxtool=info,pvrgl=info,pvr=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn run(scene_path: PathBuf, list: Option<scene::List>, raw: Option<PathBuf>) -> Result<()> {
    let scene = scene::Scene::load(&scene_path)?;
    let buffers = scene.buffers();
    let mut ctx = pvrgl::Context::new(scene.modules()?);

    tracing::info!(
        "running {} commands from {}",
        scene.commands.len(),
        scene_path.display()
    );
    let outcomes = scene.run(&mut ctx, &buffers)?;
    println!("{}", dump::outcomes_table(&scene.commands, &outcomes));

    let lists: Vec<&pvr::CommandList> = match list {
        Some(list) => vec![&ctx.lists()[ListType::from(list)]],
        None => ctx.lists().iter().filter(|l| !l.is_empty()).collect(),
    };

    for list in &lists {
        println!("{:?} list ({} records)", list.list_type(), list.len());
        println!("{}", dump::list_table(list));
    }

    if let Some(raw) = raw {
        let mut file = std::fs::File::create(&raw).context("creating raw output file")?;
        for list in &lists {
            file.write_all(list.as_bytes())
                .context("writing raw output file")?;
        }

        tracing::info!("wrote raw command lists to {}", raw.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    eyre_pretty::install()?;
    setup_tracing();

    let args = Args::parse();
    match args.command {
        Command::Run { scene, list, raw } => run(scene, list, raw),
    }
}
