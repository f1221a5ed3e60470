//! Segno CLI - The `segno` command.
//!
//! Inspects and converts score documents on disk. Documents come in two
//! forms sharing one model: a compact binary stream (`.segno`) and a
//! JSON tree (`.json`); the form is picked by file extension.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use segno_command::CommandRegistry;
use segno_model::{Document, Id, ProcessKind};
use segno_script::ScriptCache;

/// Segno - score document tooling
#[derive(Parser, Debug)]
#[command(name = "segno")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect, convert and replay score documents", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new document with a starting event
    New {
        /// Where to write the document (.segno or .json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Document name; defaults to the file stem
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Summarize a document
    Info {
        /// Path to the document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Also compile every script process and report errors
        #[arg(long)]
        check_scripts: bool,
    },

    /// Convert a document between the binary and JSON forms
    Convert {
        /// Source document
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Destination; the extension picks the output form
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Apply a serialized command history to a document
    Replay {
        /// Document to start from
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Serialized history to apply
        #[arg(value_name = "HISTORY")]
        history: PathBuf,

        /// Where to write the result; defaults to in-place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match args.command {
        Commands::New { file, name } => new_document(&file, name),
        Commands::Info {
            file,
            check_scripts,
        } => info(&file, check_scripts),
        Commands::Convert { input, output } => convert(&input, &output),
        Commands::Replay {
            file,
            history,
            output,
        } => replay(&file, &history, output.as_deref()),
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
}

fn load(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let doc = if is_json(path) {
        let text = String::from_utf8(bytes).context("document is not valid UTF-8")?;
        segno_serial::document_from_json(&text)
    } else {
        segno_serial::load_document(&bytes)
    };
    doc.with_context(|| format!("parsing {}", path.display()))
}

fn save(doc: &Document, path: &Path) -> Result<()> {
    let bytes = if is_json(path) {
        segno_serial::document_to_json(doc)?.into_bytes()
    } else {
        segno_serial::save_document(doc)?
    };
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn new_document(file: &Path, name: Option<String>) -> Result<()> {
    if file.exists() {
        bail!("{} already exists", file.display());
    }
    let name = name.unwrap_or_else(|| {
        file.file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("untitled")
            .to_string()
    });
    let mut doc = Document::new(name);
    doc.create_event_with_timenode(Id::num(1), Id::num(1), "start", 0)?;
    save(&doc, file)?;
    println!("created {}", file.display());
    Ok(())
}

fn info(file: &Path, check_scripts: bool) -> Result<()> {
    let doc = load(file)?;
    println!("document: {}", doc.name);
    println!("  intervals: {}", doc.intervals.len());
    println!("  events:    {}", doc.events.len());
    println!("  timenodes: {}", doc.timenodes.len());
    println!("  cables:    {}", doc.cables.len());
    for interval in &doc.intervals {
        println!(
            "  [{}] \"{}\" {} ticks, {} processes",
            interval.id,
            interval.name,
            interval.duration,
            interval.processes.len()
        );
    }

    if check_scripts {
        let mut cache = ScriptCache::new();
        let mut failures = 0usize;
        for interval in &doc.intervals {
            for process in &interval.processes {
                let ProcessKind::Script { source } = &process.kind else {
                    continue;
                };
                match cache.get_or_compile(source) {
                    Ok(_) => println!("  script {} compiles", process.id),
                    Err(err) => {
                        failures += 1;
                        eprintln!("  script {} fails: {}", process.id, err);
                    }
                }
            }
        }
        if failures > 0 {
            bail!("{} script(s) failed to compile", failures);
        }
    }
    Ok(())
}

fn convert(input: &Path, output: &Path) -> Result<()> {
    let doc = load(input)?;
    save(&doc, output)?;
    println!("wrote {}", output.display());
    Ok(())
}

fn replay(file: &Path, history: &Path, output: Option<&Path>) -> Result<()> {
    let mut doc = load(file)?;
    let bytes = fs::read(history).with_context(|| format!("reading {}", history.display()))?;
    let registry = CommandRegistry::with_builtin_commands();
    let commands = registry
        .read_history(&bytes)
        .with_context(|| format!("parsing {}", history.display()))?;

    for (index, command) in commands.iter().enumerate() {
        log::info!("applying {}: {}", index, command.label());
        command
            .redo(&mut doc)
            .with_context(|| format!("applying command {} ({})", index, command.label()))?;
    }

    let target = output.unwrap_or(file);
    save(&doc, target)?;
    println!("applied {} command(s), wrote {}", commands.len(), target.display());
    Ok(())
}
