//! Top-level CLI definition and dispatch.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::{Colorize, control};
use serde_json::{Value, json};
use thiserror::Error;

use settings_bundle_reader::builder::SettingsTree;
use settings_bundle_reader::core::config::Config;
use settings_bundle_reader::core::paths::resolve_config_path;
use settings_bundle_reader::model::entry::Entry;
use settings_bundle_reader::search::query::{QueryForm, compile};
use settings_bundle_reader::search::{SearchFilter, SearchOutcome, SearchState};
use settings_bundle_reader::session::SettingsSession;
use settings_bundle_reader::source::BundleSource;
use settings_bundle_reader::store::{JsonFileStore, SharedStore};

/// Inspect, search and edit settings bundle preference schemas.
#[derive(Debug, Parser)]
#[command(
    name = "sbr",
    author,
    version,
    about = "Settings Bundle Reader - preference schema inspector",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Increase verbosity.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Quiet mode (errors only).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Directory containing the `.bundle` (overrides config).
    #[arg(long, global = true, value_name = "DIR")]
    bundle_dir: Option<PathBuf>,
    /// Root preference file name (overrides config).
    #[arg(long, global = true, value_name = "NAME")]
    root: Option<String>,
    /// Value store file (overrides config).
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Print the entry tree.
    Tree,
    /// Print the flat searchable index.
    Index,
    /// Filter the index once with a query.
    Search(SearchArgs),
    /// Read queries from stdin, one per line, through the debounced filter.
    Watch,
    /// Show the current value of a key.
    Get(GetArgs),
    /// Store a value for a key.
    Set(SetArgs),
    /// Restore defaults for every restartable entry.
    Reset,
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args)]
struct SearchArgs {
    /// Query text; `a#b` matches in order, `a@b` in any order.
    #[arg(value_name = "QUERY")]
    query: String,
}

#[derive(Debug, Clone, Args)]
struct GetArgs {
    #[arg(value_name = "KEY")]
    key: String,
}

#[derive(Debug, Clone, Args)]
struct SetArgs {
    #[arg(value_name = "KEY")]
    key: String,
    /// New value; option labels are accepted for pickers.
    #[arg(value_name = "VALUE")]
    value: String,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Shell to generate completion script for.
    #[arg(value_enum)]
    shell: CompletionShell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input at runtime.
    #[error("{0}")]
    User(String),
    /// Library failure.
    #[error(transparent)]
    Library(#[from] settings_bundle_reader::core::errors::SbrError),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Install the `log` backend according to `-v` / `-q`; `RUST_LOG` wins.
pub fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else if cli.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color {
        control::set_override(false);
    }

    if let Command::Completions(args) = &cli.command {
        let mut command = Cli::command();
        let binary_name = command.get_name().to_string();
        generate(args.shell, &mut command, binary_name, &mut io::stdout());
        return Ok(());
    }

    let session = open_session(cli)?;
    let tree = session.load()?;
    match &cli.command {
        Command::Tree => run_tree(cli, &tree),
        Command::Index => run_index(cli, &tree),
        Command::Search(args) => run_search(cli, &session, &tree, &args.query),
        Command::Watch => run_watch(cli, &session),
        Command::Get(args) => run_get(cli, &tree, &args.key),
        Command::Set(args) => run_set(cli, &tree, &args.key, &args.value),
        Command::Reset => run_reset(cli, &session),
        Command::Completions(_) => Ok(()),
    }
}

fn load_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.bundle_dir {
        config.bundle.dir = resolve_config_path(dir);
    }
    if let Some(root) = &cli.root {
        config.bundle.root_file.clone_from(root);
    }
    if let Some(store) = &cli.store {
        config.store.path = resolve_config_path(store);
    }
    config.validate()?;
    Ok(config)
}

fn open_session(cli: &Cli) -> Result<SettingsSession, CliError> {
    let config = load_config(cli)?;
    let source = BundleSource::from_config(&config.bundle);
    log::debug!("reading bundle at {}", source.root().display());
    let store: SharedStore = Arc::new(JsonFileStore::open(&config.store.path));
    Ok(SettingsSession::new(Arc::new(source), store, config))
}

// ──────────────────── tree / index ────────────────────

fn run_tree(cli: &Cli, tree: &SettingsTree) -> Result<(), CliError> {
    match output_mode(cli) {
        OutputMode::Json => write_json_line(&json!({
            "root_file": tree.root_file(),
            "loaded_at": tree.loaded_at().to_rfc3339(),
            "stats": tree.stats(),
            "entries": tree.views(),
        })),
        OutputMode::Human => {
            let mut stdout = io::stdout().lock();
            for entry in tree.roots() {
                print_entry_tree(&mut stdout, entry, 0)?;
            }
            Ok(())
        }
    }
}

fn print_entry_tree(out: &mut impl Write, entry: &Entry, depth: usize) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    match entry {
        Entry::Group(group) => {
            writeln!(out, "{indent}{}", entry.display_name().bold())?;
            if let Some(footer) = &group.footer {
                writeln!(out, "{indent}  {}", footer.dimmed())?;
            }
        }
        Entry::ChildPane(pane) => {
            writeln!(
                out,
                "{indent}{} {}",
                entry.display_name().cyan().bold(),
                format!("→ {}", pane.file).dimmed()
            )?;
        }
        _ => writeln!(out, "{indent}{}", leaf_line(entry))?,
    }
    for child in entry.children() {
        print_entry_tree(out, child, depth + 1)?;
    }
    Ok(())
}

fn leaf_line(entry: &Entry) -> String {
    format!(
        "{} {} = {} {}",
        entry.display_name(),
        format!("({})", entry.key().unwrap_or_default()).dimmed(),
        render_value(entry.current_json().as_ref()).green(),
        format!("[{}]", entry.kind()).dimmed()
    )
}

fn render_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => format!("{s:?}"),
        Some(other) => other.to_string(),
        None => "-".to_string(),
    }
}

fn leaf_json(entry: &Entry) -> Value {
    json!({
        "kind": entry.kind(),
        "title": entry.title(),
        "path": entry.path(),
        "key": entry.key(),
        "value": entry.current_json(),
        "default": entry.default_json(),
        "accessibility_id": entry.accessibility_id(),
    })
}

fn run_index(cli: &Cli, tree: &SettingsTree) -> Result<(), CliError> {
    match output_mode(cli) {
        OutputMode::Json => {
            let entries: Vec<Value> = tree.index().iter().map(|e| leaf_json(e)).collect();
            write_json_line(&Value::Array(entries))
        }
        OutputMode::Human => {
            let mut stdout = io::stdout().lock();
            for entry in tree.index() {
                writeln!(stdout, "{}  {}", entry.path().bold(), leaf_line(entry))?;
            }
            Ok(())
        }
    }
}

// ──────────────────── search ────────────────────

fn form_label(form: &QueryForm) -> &'static str {
    match form {
        QueryForm::Plain => "plain",
        QueryForm::Ordered(_) => "ordered",
        QueryForm::Permutation(_) => "permutation",
    }
}

fn run_search(
    cli: &Cli,
    session: &SettingsSession,
    tree: &SettingsTree,
    query: &str,
) -> Result<(), CliError> {
    let filter = SearchFilter::from_config(&session.config().search);
    let outcome = SearchOutcome {
        query: query.to_string(),
        state: filter.state(query),
        entries: filter.filter(tree, query),
    };
    emit_outcome(output_mode(cli), &outcome)
}

fn emit_outcome(mode: OutputMode, outcome: &SearchOutcome) -> Result<(), CliError> {
    let form = compile(&outcome.query);
    match mode {
        OutputMode::Json => {
            let entries: Vec<Value> = match outcome.state {
                SearchState::Searching => outcome.entries.iter().map(|e| leaf_json(e)).collect(),
                SearchState::NotSearching => outcome
                    .entries
                    .iter()
                    .map(|e| serde_json::to_value(e.view()))
                    .collect::<Result<_, _>>()?,
            };
            write_json_line(&json!({
                "query": outcome.query,
                "state": outcome.state,
                "form": form_label(form.form()),
                "entries": entries,
            }))
        }
        OutputMode::Human => {
            let mut stdout = io::stdout().lock();
            match outcome.state {
                SearchState::NotSearching => {
                    writeln!(
                        stdout,
                        "{} {}",
                        "not searching:".dimmed(),
                        format!("{} top-level entries", outcome.entries.len()).dimmed()
                    )?;
                    for entry in &outcome.entries {
                        print_entry_tree(&mut stdout, entry, 1)?;
                    }
                }
                SearchState::Searching => {
                    writeln!(
                        stdout,
                        "{} {:?} ({}): {} matches",
                        "search".bold(),
                        outcome.query,
                        form_label(form.form()),
                        outcome.entries.len()
                    )?;
                    for entry in &outcome.entries {
                        writeln!(stdout, "  {}  {}", entry.path().bold(), leaf_line(entry))?;
                    }
                }
            }
            Ok(())
        }
    }
}

fn run_watch(cli: &Cli, session: &SettingsSession) -> Result<(), CliError> {
    let mode = output_mode(cli);
    let window = session.config().search.debounce();
    let search = session.search()?;

    let results = search.results().clone();
    let printer = thread::Builder::new()
        .name("sbr-printer".to_string())
        .spawn(move || {
            for outcome in &results {
                if let Err(e) = emit_outcome(mode, &outcome) {
                    log::error!("failed to print search outcome: {e}");
                    break;
                }
            }
        })?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        search.update(line.trim_end_matches('\r'))?;
    }

    // Let the final window elapse so the last query is filtered.
    thread::sleep(window + Duration::from_millis(50));
    search.shutdown();
    if printer.join().is_err() {
        log::error!("printer thread panicked");
    }
    Ok(())
}

// ──────────────────── values ────────────────────

fn find_leaf<'a>(tree: &'a SettingsTree, key: &str) -> Result<&'a Arc<Entry>, CliError> {
    tree.find_by_key(key)
        .ok_or_else(|| CliError::User(format!("no entry with key {key:?} in {}", tree.root_file())))
}

fn run_get(cli: &Cli, tree: &SettingsTree, key: &str) -> Result<(), CliError> {
    let entry = find_leaf(tree, key)?;
    match output_mode(cli) {
        OutputMode::Json => write_json_line(&leaf_json(entry)),
        OutputMode::Human => {
            writeln!(io::stdout(), "{}", render_value(entry.current_json().as_ref()))?;
            Ok(())
        }
    }
}

fn run_set(cli: &Cli, tree: &SettingsTree, key: &str, raw: &str) -> Result<(), CliError> {
    let entry = find_leaf(tree, key)?;
    let Some(stored) = entry.set_from_text(raw) else {
        return Err(CliError::User(format!(
            "{raw:?} is not a valid value for {} entry {key:?}",
            entry.kind()
        )));
    };
    match output_mode(cli) {
        OutputMode::Json => write_json_line(&json!({"key": key, "value": stored})),
        OutputMode::Human => {
            writeln!(
                io::stdout(),
                "{} {key} = {}",
                "set".green().bold(),
                render_value(Some(&stored))
            )?;
            Ok(())
        }
    }
}

fn run_reset(cli: &Cli, session: &SettingsSession) -> Result<(), CliError> {
    let written = session.reset_all()?;
    match output_mode(cli) {
        OutputMode::Json => write_json_line(&json!({"reset": written})),
        OutputMode::Human => {
            writeln!(
                io::stdout(),
                "{} {written} entries to their defaults",
                "reset".green().bold()
            )?;
            Ok(())
        }
    }
}

// ──────────────────── output ────────────────────

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_mode(cli: &Cli) -> OutputMode {
    let env_mode = std::env::var("SBR_OUTPUT_FORMAT").ok();
    resolve_output_mode(cli.json, env_mode.as_deref(), io::stdout().is_terminal())
}

fn resolve_output_mode(json_flag: bool, env_mode: Option<&str>, stdout_is_tty: bool) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }

    let fallback = if stdout_is_tty {
        OutputMode::Human
    } else {
        OutputMode::Json
    };

    match env_mode
        .map(str::trim)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => OutputMode::Json,
        Some("human") => OutputMode::Human,
        _ => fallback,
    }
}
