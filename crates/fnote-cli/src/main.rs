//! fnote CLI: fuzzy folder-first note creation
//!
//! Commands: new, folders, templates, commands, config, completions

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{ArgAction, CommandFactory, Parser};
use fnote_core::{FolderPath, OpenMode, Settings, ViewTarget};
use fnote_flow::suggest::{self, Suggestion, SuggestionKind};
use fnote_flow::{commands, CreationFlow, Input, NoteCreator, Shell, Step};
use fnote_vault::DiskVault;

const SETTINGS_FILE: &str = ".fnote/settings.json";

#[derive(Parser)]
#[command(name = "fnote")]
#[command(version)]
#[command(about = "Fuzzy folder-first note creation")]
struct Cli {
    /// Vault root directory
    #[arg(long, global = true, default_value = ".")]
    vault: PathBuf,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create a note in FOLDER (created if missing)
    #[command(alias = "n")]
    New {
        /// Target folder, `/` for the vault root
        folder: String,
        /// Note names; more than one needs a bulk mode
        names: Vec<String>,
        /// Name the note by formatting now with this pattern
        #[arg(long)]
        title_template: Option<String>,
        /// Body template document, relative to the vault
        #[arg(long)]
        template: Option<String>,
        /// Open mode
        #[arg(long, default_value = "new-tab")]
        mode: OpenMode,
    },
    /// List folders matching QUERY
    Folders { query: Option<String> },
    /// List title and body templates matching QUERY
    Templates { query: Option<String> },
    /// List the note creation commands
    Commands,
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(clap::Subcommand)]
enum ConfigAction {
    /// Print the settings as JSON
    Show,
    /// Set one setting by its key
    Set { key: String, value: String },
    /// Folders to choose the templates folder from
    TemplateFolders { query: Option<String> },
}

/// Opens documents by printing them; notices go to stderr.
struct TerminalShell<W: Write> {
    out: W,
}

impl<W: Write> Shell for TerminalShell<W> {
    fn open_document(&mut self, path: &str, target: ViewTarget) {
        if let Err(e) = writeln!(self.out, "opened {path} ({target})") {
            tracing::warn!(error = %e, "failed to write to stdout");
        }
    }

    fn show_message(&mut self, text: &str, duration: Duration) {
        tracing::debug!(?duration, "notice");
        eprintln!("{text}");
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn settings_path(vault: &Path) -> PathBuf {
    vault.join(SETTINGS_FILE)
}

fn open_vault(root: &Path) -> anyhow::Result<(DiskVault, Settings)> {
    let vault = DiskVault::open(root)?;
    let settings = Settings::load(&settings_path(root))
        .with_context(|| format!("failed to load settings for {}", root.display()))?;
    Ok((vault, settings))
}

fn cmd_new(
    root: &Path,
    folder: &str,
    names: &[String],
    title_template: Option<&str>,
    template: Option<&str>,
    mode: OpenMode,
) -> anyhow::Result<ExitCode> {
    if names.len() > 1 && !mode.is_bulk() {
        bail!("creating several notes at once needs a bulk mode, e.g. --mode bulk-{mode}");
    }
    let (vault, settings) = open_vault(root)?;
    let mut shell = TerminalShell { out: io::stdout() };
    let mut flow = CreationFlow::new(NoteCreator::new(&vault, &settings), mode);

    flow.choose_folder(FolderPath::new(folder), Input::Pointer);
    if let Some(path) = template {
        let chosen = Suggestion {
            text: path.to_string(),
            kind: SuggestionKind::NoteTemplate,
            query: String::new(),
        };
        flow.choose(&chosen, Input::Pointer, &mut shell);
    }

    let mut failed = false;
    if let Some(pattern) = title_template {
        let chosen = Suggestion {
            text: pattern.to_string(),
            kind: SuggestionKind::TitleTemplate,
            query: String::new(),
        };
        failed |= matches!(flow.choose(&chosen, Input::Pointer, &mut shell), Step::Rejected(_));
    } else if names.is_empty() {
        failed |= matches!(flow.submit("", &mut shell), Step::Rejected(_));
    } else {
        for name in names {
            match flow.submit(name, &mut shell) {
                Step::Rejected(_) => failed = true,
                Step::Ignored => break,
                _ => {}
            }
        }
    }
    flow.cancel();

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn cmd_folders(root: &Path, query: &str) -> anyhow::Result<()> {
    let (vault, _) = open_vault(root)?;
    for folder in suggest::folder_suggestions(&vault, query) {
        println!("{folder}");
    }
    Ok(())
}

fn cmd_templates(root: &Path, query: &str) -> anyhow::Result<()> {
    let (vault, settings) = open_vault(root)?;
    for suggestion in suggest::title_phase_suggestions(&vault, &settings, query, false) {
        let kind = match suggestion.kind {
            SuggestionKind::TitleTemplate => "title",
            SuggestionKind::NoteTemplate => "body",
        };
        println!("{kind}\t{}", suggestion.text);
    }
    Ok(())
}

fn cmd_config(root: &Path, action: ConfigAction) -> anyhow::Result<()> {
    let path = settings_path(root);
    match action {
        ConfigAction::Show => {
            let (_, settings) = open_vault(root)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        ConfigAction::Set { key, value } => {
            let (_, mut settings) = open_vault(root)?;
            settings.set(&key, &value)?;
            settings.save(&path)?;
            tracing::info!(key = %key, path = %path.display(), "saved settings");
            println!("{key} = {}", value.trim());
        }
        ConfigAction::TemplateFolders { query } => {
            let (vault, settings) = open_vault(root)?;
            let query = query.unwrap_or_default();
            for folder in
                suggest::template_folder_suggestions(&vault, &query, settings.folder_suggestion_limit)
            {
                println!("{folder}");
            }
        }
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let root = cli.vault.as_path();
    match cli.command {
        Commands::New {
            folder,
            names,
            title_template,
            template,
            mode,
        } => {
            return cmd_new(
                root,
                &folder,
                &names,
                title_template.as_deref(),
                template.as_deref(),
                mode,
            );
        }
        Commands::Folders { query } => cmd_folders(root, query.as_deref().unwrap_or_default())?,
        Commands::Templates { query } => {
            cmd_templates(root, query.as_deref().unwrap_or_default())?;
        }
        Commands::Commands => {
            for command in commands() {
                println!("{}\t{}", command.id, command.name);
            }
        }
        Commands::Config { action } => cmd_config(root, action)?,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "fnote", &mut io::stdout());
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
