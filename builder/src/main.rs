use anyhow::Result;
use clap::{Parser, Subcommand};
use engine::persist::{save_catalog, save_meta, SnapshotMeta, SnapshotPaths, SNAPSHOT_VERSION};
use engine::{Catalog, Movie, MovieId};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputMovie {
    #[serde(alias = "movie_id")]
    id: MovieId,
    title: String,
    #[serde(default)]
    overview: String,
    #[serde(default)]
    genres: String,
    #[serde(default)]
    keywords: String,
    #[serde(default, alias = "tags")]
    tag: String,
}

impl From<InputMovie> for Movie {
    fn from(m: InputMovie) -> Self {
        Movie {
            id: m.id,
            title: m.title,
            overview: m.overview,
            genres: m.genres,
            keywords: m.keywords,
            tag: m.tag,
        }
    }
}

#[derive(Parser)]
#[command(name = "builder")]
#[command(about = "Build the movie catalog snapshot from metadata files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the snapshot from input JSON/JSONL files or a directory
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output snapshot directory
        #[arg(long)]
        output: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => build_snapshot(&input, &output),
    }
}

fn build_snapshot(input: &str, output: &str) -> Result<()> {
    let input_path = Path::new(input);

    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
        files.sort();
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    }

    let mut movies: Vec<Movie> = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut movies)?;
        } else {
            read_json(&file, &mut movies)?;
        }
    }

    let catalog = Catalog::new(movies);
    tracing::info!(num_movies = catalog.len(), "ingested movies");

    let paths = SnapshotPaths::new(output);
    save_catalog(&paths, &catalog)?;
    let meta = SnapshotMeta {
        num_movies: catalog.len() as u32,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: SNAPSHOT_VERSION,
    };
    save_meta(&paths, &meta)?;

    tracing::info!(output, "snapshot build complete");
    Ok(())
}

fn read_jsonl(file: &Path, movies: &mut Vec<Movie>) -> Result<()> {
    let f = File::open(file)?;
    let reader = BufReader::new(f);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let movie: InputMovie = serde_json::from_str(&line)?;
        movies.push(movie.into());
    }
    Ok(())
}

fn read_json(file: &Path, movies: &mut Vec<Movie>) -> Result<()> {
    let f = File::open(file)?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let movie: InputMovie = serde_json::from_value(v)?;
                movies.push(movie.into());
            }
        }
        serde_json::Value::Object(_) => {
            let movie: InputMovie = serde_json::from_value(json)?;
            movies.push(movie.into());
        }
        _ => {}
    }
    Ok(())
}
