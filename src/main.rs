mod chain;
mod chord;
mod graph;
mod key;
mod song;

use clap::{Parser, ValueHint};
use std::fs::File;
use std::path::PathBuf;
use anyhow::{Context, Result};
use chain::TransitionChain;
use song::Song;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Chord-pro files, or directories of .cho files
    #[clap(required = true, value_hint = ValueHint::AnyPath)]
    paths: Vec<PathBuf>,

    /// Name of the emitted graph description (<name>.gv)
    #[clap(short, long, default_value = "model")]
    output: String,

    /// Also dump the normalized transition mapping as YAML
    #[clap(short, long, value_hint = ValueHint::FilePath)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let files = song::collect_song_files(&args.paths)?;

    let mut chain = TransitionChain::new();
    for path in &files {
        let song = Song::load(path)?;
        match key::infer_key(&song.chords) {
            Ok(est) => {
                println!("{}: {}", path.display(), est.key);
                for (key, count) in est.votes.iter().filter(|(_, n)| *n > 0) {
                    tracing::debug!("{}: {} votes for {}", path.display(), count, key);
                }
            }
            Err(err) => tracing::warn!("{}: {}", path.display(), err),
        }
        chain.accumulate(&song.chords);
    }

    chain.normalize();

    let dot_path = PathBuf::from(format!("{}.gv", args.output));
    graph::save_dot(&chain, &dot_path)?;
    tracing::info!("wrote {}", dot_path.display());

    if let Some(path) = args.export {
        let file = File::create(&path)
            .with_context(|| format!("could not create {}", path.display()))?;
        serde_yaml::to_writer(file, &chain)?;
        tracing::info!("wrote {}", path.display());
    }

    Ok(())
}
