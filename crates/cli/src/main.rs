use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow, bail};
use clap::{
    Parser, Subcommand,
    builder::{PossibleValue, PossibleValuesParser},
};
use otpview_tui::{THEME_DEFINITIONS, TuiOptions};
use otpview_types::{InputMode, OtpConfig};
use otpview_util::{default_log_path, load_config, resolve_config_path, save_config};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod simulate;

/// One-time password entry field: terminal demo and headless simulator.
#[derive(Parser, Debug)]
#[command(name = "otpview", version, about)]
struct Cli {
    /// Path to the JSON config file (defaults to $OTPVIEW_CONFIG_PATH, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of slots
    #[arg(long, global = true)]
    count: Option<usize>,

    /// Accepted characters: number, password, text or phone
    #[arg(long, global = true)]
    input_mode: Option<InputMode>,

    /// Code treated as correct when the field completes
    #[arg(long, global = true, default_value = "12345")]
    expected: String,

    /// Color theme for the terminal UI
    #[arg(long, value_parser = theme_parser())]
    theme: Option<String>,

    /// Stretch slot spacing to fill the available width
    #[arg(long, global = true)]
    fill_width: bool,

    /// Log file used while the terminal UI is running
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a whitespace-separated input script into a field and print a JSON report
    Simulate {
        /// Tokens: <del>, <tap>, <reset>, <paste:TEXT>, <state:success|error|normal>; anything else is typed
        script: String,
    },
    /// Write the effective configuration (file values plus flags) to the config path
    InitConfig {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

fn theme_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(THEME_DEFINITIONS.iter().map(|definition| {
        PossibleValue::new(definition.id)
            .help(definition.label)
            .aliases(definition.aliases.iter().copied().filter(|alias| *alias != definition.id))
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
            init_tracing(Some(&log_path))?;
            let config = resolve_config(&cli)?;
            info!(log = %log_path.display(), "starting terminal UI");
            otpview_tui::run(TuiOptions {
                config,
                expected_code: cli.expected.clone(),
                theme: cli.theme.clone(),
            })
            .await
        }
        Some(Command::Simulate { script }) => {
            init_tracing(None)?;
            let config = resolve_config(&cli)?;
            let steps = simulate::parse_script(script)?;
            let report = simulate::run_script(config, &cli.expected, steps)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Some(Command::InitConfig { force }) => {
            init_tracing(None)?;
            let path = write_config(&cli, *force)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Saves the resolved configuration where `load_config` will find it.
fn write_config(cli: &Cli, force: bool) -> Result<PathBuf> {
    let path = resolve_config_path(cli.config.as_deref());
    if path.exists() && !force {
        bail!("{} already exists (use --force to replace it)", path.display());
    }
    let config = resolve_config(cli)?;
    save_config(&path, &config).context("failed to write configuration")?;
    info!(path = %path.display(), "configuration written");
    Ok(path)
}

/// Loads the config file and applies command-line overrides.
fn resolve_config(cli: &Cli) -> Result<OtpConfig> {
    let loaded = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    debug!(path = %loaded.path.display(), from_file = loaded.from_file, "configuration resolved");
    let config = apply_overrides(loaded.config, cli);
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn apply_overrides(mut config: OtpConfig, cli: &Cli) -> OtpConfig {
    if let Some(count) = cli.count {
        config.count = count;
    }
    if let Some(mode) = cli.input_mode {
        config.input_mode = mode;
    }
    if cli.fill_width {
        config.fill_width = true;
    }
    config
}

/// Installs the global subscriber. With a log file, output is appended there
/// so it cannot corrupt the alternate screen; otherwise it goes to stderr.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    result.map_err(|error| anyhow!(error))
}
