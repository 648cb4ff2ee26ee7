//! Command line entry point: converts saved layouts to markup or data.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use formdesign_app::{Command, CommandError, Outcome, ShortcutRegistry, commands};
use formdesign_core::storage::FileStorage;
use formdesign_core::{
    ConfigError, Document, DocumentError, EditorConfig, EditorSession, PageSize, Storage,
    StorageError,
};
use formdesign_render::EstimatingMeasurer;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
    #[error("invalid config file: {0}")]
    Config(ConfigError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("template store: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("unknown page size \"{0}\" (expected a4, letter or legal)")]
    UnknownPageSize(String),
    #[error("no template saved under \"{0}\"")]
    NothingSaved(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Static HTML suitable for PDF conversion.
    Html,
    /// Normalized JSON data export.
    Data,
}

#[derive(Parser, Debug)]
#[command(
    name = "formdesign",
    about = "Convert saved form layouts into static HTML or normalized data"
)]
struct Cli {
    /// Saved document blob. Reads the template store when omitted.
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Write here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Editor configuration (JSON).
    #[arg(long, env = "FORMDESIGN_CONFIG")]
    config: Option<PathBuf>,

    /// Template store directory used when no input is given.
    #[arg(long, env = "FORMDESIGN_STORE")]
    store: Option<PathBuf>,

    /// Override the document's page size.
    #[arg(long)]
    page_size: Option<String>,

    /// List the templates in the store and exit.
    #[arg(long)]
    list: bool,

    /// Print the keyboard shortcut table and exit.
    #[arg(long)]
    shortcuts: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig, CliError> {
    match path {
        Some(path) => EditorConfig::from_json(&read(path)?).map_err(CliError::Config),
        None => Ok(EditorConfig::default()),
    }
}

fn open_store(cli: &Cli) -> Result<FileStorage, CliError> {
    Ok(match &cli.store {
        Some(dir) => FileStorage::new(dir.clone())?,
        None => FileStorage::default_location()?,
    })
}

fn saved_templates(cli: &Cli) -> Result<Vec<String>, CliError> {
    let mut keys = open_store(cli)?.list()?;
    keys.sort();
    Ok(keys)
}

fn open_session(cli: &Cli, config: EditorConfig) -> Result<EditorSession, CliError> {
    let session = EditorSession::new(config).with_measurer(Box::new(EstimatingMeasurer));
    if let Some(input) = &cli.input {
        let document = Document::from_json(&read(input)?)?;
        log::info!("Loaded {} element(s) from {}", document.len(), input.display());
        return Ok(session.with_document(document));
    }

    let mut session = session.with_storage(Box::new(open_store(cli)?));
    if !session.load_saved()? {
        return Err(CliError::NothingSaved(session.config().storage_key.clone()));
    }
    Ok(session)
}

fn run(cli: Cli) -> Result<(), CliError> {
    if cli.shortcuts {
        ShortcutRegistry::print_all();
        return Ok(());
    }
    if cli.list {
        for key in saved_templates(&cli)? {
            println!("{key}");
        }
        return Ok(());
    }

    let config = load_config(cli.config.as_deref())?;
    let mut session = open_session(&cli, config)?;

    if let Some(name) = &cli.page_size {
        let page_size =
            PageSize::parse(name).ok_or_else(|| CliError::UnknownPageSize(name.clone()))?;
        commands::execute(&mut session, Command::SetPageSize(page_size))?;
    }

    let command = match cli.format {
        Format::Html => Command::ExportHtml,
        Format::Data => Command::ExportData,
    };
    let output = match commands::execute(&mut session, command)? {
        Outcome::Markup(text) | Outcome::Data(text) => text,
        other => {
            log::warn!("Unexpected export outcome {other:?}");
            String::new()
        }
    };

    match &cli.out {
        Some(path) => {
            fs::write(path, &output)?;
            log::info!("Wrote {}", path.display());
        }
        None => io::stdout().write_all(output.as_bytes())?,
    }
    Ok(())
}
