//! knotwork - styled terminal text and interactive menus
//!
//! Command-line front end for the library: prints styled text, pages
//! files, and runs menus and the date picker, printing the choice.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use knotwork::{Cli, Command, Config, Menu, StdTerminal, StyledText, Terminal, display_width, strip_formatting, wrap};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{Level, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Exit status after Ctrl+C, as a shell reports SIGINT
const INTERRUPTED_EXIT: i32 = 130;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let exe_dir = get_executable_dir()?;
    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| get_log_path(&exe_dir, &cli));

    // The terminal belongs to the UI, so logs only go to the file
    let guard = setup_logging(&cli, &log_path)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        command = cli.command.name(),
        "knotwork starting"
    );

    let config = load_config(&cli, &exe_dir)?;
    if cli.verbose {
        info!(?config, "Configuration loaded");
    }

    let mut term = StdTerminal::new();
    match run(&cli, &config, &mut term) {
        Ok(()) => Ok(()),
        Err(knotwork::Error::Interrupted) => {
            info!("Interrupted by user");
            drop(guard);
            std::process::exit(INTERRUPTED_EXIT);
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            Err(e.into())
        }
    }
}

/// Execute the selected subcommand
fn run<T: Terminal>(cli: &Cli, config: &Config, term: &mut T) -> knotwork::Result<()> {
    match &cli.command {
        Command::Menu { options, header } => {
            let chosen = Menu::from_config(&config.menu).interactive(term, options.as_slice(), header.as_deref())?;
            info!(chosen = %strip_formatting(&chosen), "Menu choice");
            StyledText::new(chosen).writeln(term)
        }
        Command::Horizontal { options, header } => {
            let chosen = Menu::from_config(&config.menu).horizontal(term, options.as_slice(), header.as_deref())?;
            info!(chosen = %strip_formatting(&chosen), "Menu choice");
            StyledText::new(chosen).writeln(term)
        }
        Command::Date { date, header } => {
            let picked = Menu::from_config(&config.menu).date_picker(term, date, header.as_deref())?;
            info!(%picked, "Date choice");
            term.write_stdout(&format!("{}\n", picked))?;
            Ok(())
        }
        Command::Page { file } => {
            let content = read_input(file.as_deref())?;
            StyledText::new(content).page_reserving(term, config.pager.reserved_rows)
        }
        Command::Print {
            text,
            color,
            background,
            style,
            align,
            wrap,
            level,
            reverse,
        } => {
            let mut styled = StyledText::new(text.as_str()).align(*align).styles(style.iter().copied());
            if let Some(color) = color {
                styled = styled.color(*color);
            }
            if let Some(background) = background {
                styled = styled.background_color(*background);
            }
            if *wrap {
                styled = styled.wrap();
            }
            match level {
                Some(level) => styled.log(term, *level, *reverse),
                None => styled.writeln(term),
            }
        }
        Command::Wrap { width, text } => {
            let expanded = StyledText::new(text.as_str()).render_at(*width).unwrap_or_default();
            term.write_stdout(&format!("{}\n", wrap(&expanded, *width)))?;
            Ok(())
        }
        Command::Strip { text } => {
            term.write_stdout(&format!("{}\n", strip_formatting(text)))?;
            Ok(())
        }
        Command::Width { text } => {
            let expanded = StyledText::new(text.as_str()).render_at(usize::MAX).unwrap_or_default();
            term.write_stdout(&format!("{}\n", display_width(&expanded)))?;
            Ok(())
        }
        Command::SampleConfig { output } => match output {
            Some(path) => {
                std::fs::write(path, Config::sample_config())?;
                info!(path = %path.display(), "Sample configuration written");
                Ok(())
            }
            None => {
                term.write_stdout(&Config::sample_config())?;
                Ok(())
            }
        },
    }
}

/// Read a file, or stdin when no file is given
fn read_input(file: Option<&Path>) -> knotwork::Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

/// Get the directory where the executable is located
fn get_executable_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe()?;
    Ok(exe_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Determine the log file path based on config file or command name
fn get_log_path(exe_dir: &Path, cli: &Cli) -> PathBuf {
    let log_dir = exe_dir.join("Log");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    if let Some(config_name) = cli.config_name() {
        let config_log_dir = log_dir.join(&config_name);
        let log_filename = format!("{}_{}_{}.log", config_name, cli.command.name(), timestamp);
        config_log_dir.join(log_filename)
    } else {
        let log_filename = format!("{}_{}.log", cli.command.name(), timestamp);
        log_dir.join(log_filename)
    }
}

/// Find a theme file: the path itself, then with `.toml` added, then by
/// name in the `themes` directory next to the binary
fn resolve_config_path(exe_dir: &Path, config_path: &Path) -> PathBuf {
    let toml_name = config_path.with_extension("toml");
    let themes_dir = exe_dir.join("themes");
    let candidates = [
        config_path.to_path_buf(),
        toml_name.clone(),
        themes_dir.join(toml_name.file_name().unwrap_or(config_path.as_os_str())),
    ];

    candidates
        .into_iter()
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| config_path.to_path_buf())
}

/// Load configuration from file, with command-line overrides applied
fn load_config(cli: &Cli, exe_dir: &Path) -> Result<Config> {
    let config = match cli.config {
        Some(ref config_path) => {
            let resolved_path = resolve_config_path(exe_dir, config_path);
            info!(config_file = %resolved_path.display(), "Loading configuration from file");
            Config::load_from_file(&resolved_path)
                .with_context(|| format!("Unable to use configuration '{}'", config_path.display()))?
        }
        None => Config::default(),
    };

    Ok(cli.merge_with_config(config))
}

/// Setup file-only logging; the terminal is reserved for the UI
fn setup_logging(cli: &Cli, log_path: &Path) -> Result<WorkerGuard> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("Unable to open log file '{}'", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if cli.json_log {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .init();
    }

    Ok(guard)
}
