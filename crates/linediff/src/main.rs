use anyhow::{bail, Context, Result};
use clap::Parser;
use linediff_core::{DiffSettings, FileDiff, Preferences};
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info, warn};

mod app;
mod cli;
mod config;
mod logging;
mod prefs;
mod render;
mod tui;
mod views;

use app::App;
use cli::Cli;
use config::{ColorMode, Config};
use prefs::FileStore;
use render::PrintOptions;

const FALLBACK_WIDTH: usize = 120;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.tui);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("linediff: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;

    let mut prefs = if cli.no_prefs { None } else { open_prefs()? };
    let mut settings = config.diff.settings();
    if let Some(prefs) = &prefs {
        settings = prefs
            .apply(settings)
            .context("invalid stored preferences")?;
    }
    let settings = cli.apply(settings);
    debug!(?settings, "effective settings");

    let (settings, code) = if cli.tui {
        run_interactive(cli, &config, settings)?
    } else {
        run_once(cli, &config, settings)?
    };

    if cli.remember {
        match prefs.as_mut() {
            Some(prefs) => {
                prefs.save(settings).context("failed to save preferences")?;
                info!("saved preferences");
            }
            None => warn!("preferences are disabled, --remember has no effect"),
        }
    }

    Ok(code)
}

fn open_prefs() -> Result<Option<Preferences<FileStore>>> {
    let Some(path) = FileStore::default_path() else {
        debug!("no data directory, preferences disabled");
        return Ok(None);
    };
    let store = FileStore::open(&path)
        .with_context(|| format!("failed to open preferences {}", path.display()))?;
    debug!(path = %store.path().display(), "using preference store");
    Ok(Some(Preferences::new(store)))
}

struct Input {
    path: Option<String>,
    text: String,
}

fn read_input(arg: &str) -> Result<Input> {
    if arg == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(Input { path: None, text });
    }
    let text =
        std::fs::read_to_string(arg).with_context(|| format!("failed to read {}", arg))?;
    Ok(Input {
        path: Some(arg.to_string()),
        text,
    })
}

fn check_stdin_use(left: Option<&str>, right: Option<&str>) -> Result<()> {
    if left == Some("-") && right == Some("-") {
        bail!("only one input can be read from stdin");
    }
    Ok(())
}

/// Diff two inputs and print the result
fn run_once(
    cli: &Cli,
    config: &Config,
    settings: DiffSettings,
) -> Result<(DiffSettings, ExitCode)> {
    let (Some(left), Some(right)) = (cli.left.as_deref(), cli.right.as_deref()) else {
        bail!("two inputs are required (use --tui to start from empty editors)");
    };
    check_stdin_use(Some(left), Some(right))?;

    let engine = settings.engine();
    let diff = if left != "-" && right != "-" {
        engine.diff_files(Path::new(left), Path::new(right))?
    } else {
        let left = read_input(left)?;
        let right = read_input(right)?;
        FileDiff {
            left_path: left.path,
            right_path: right.path,
            result: engine.diff_strings(&left.text, &right.text),
        }
    };

    let color = match cli.color.unwrap_or(config.display.color) {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal(),
    };
    let width = cli
        .width
        .or(config.display.width)
        .or_else(|| {
            crossterm::terminal::size()
                .ok()
                .map(|(cols, _)| cols as usize)
        })
        .unwrap_or(FALLBACK_WIDTH);
    let opts = PrintOptions {
        format: cli.format.unwrap_or(config.display.format),
        color,
        width,
        line_numbers: config.display.line_numbers && !cli.no_line_numbers,
        tab_width: config.display.tab_width,
    };

    let mut out = io::stdout().lock();
    let printed = render::print(
        &mut out,
        &diff,
        settings.options,
        settings.algorithm,
        &opts,
    )
    .and_then(|()| out.flush());
    match printed {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            debug!("stdout closed early");
        }
        other => other.context("failed to write output")?,
    }

    let code = ExitCode::from(exit_status(diff.result.has_changes()));
    Ok((settings, code))
}

/// Open the editors, returning the settings the session ended with
fn run_interactive(
    cli: &Cli,
    config: &Config,
    settings: DiffSettings,
) -> Result<(DiffSettings, ExitCode)> {
    check_stdin_use(cli.left.as_deref(), cli.right.as_deref())?;
    let load = |arg: Option<&str>| -> Result<String> {
        let input = arg.map(read_input).transpose()?;
        Ok(input.map(|input| input.text).unwrap_or_default())
    };
    let left = load(cli.left.as_deref())?;
    let right = load(cli.right.as_deref())?;

    let mut app = App::new(&left, &right, settings, config.theme.resolve()?);
    app.line_numbers = config.display.line_numbers && !cli.no_line_numbers;
    app.tab_width = config.display.tab_width;

    let app = tui::run(app)?;
    let code = ExitCode::from(exit_status(app.diff.has_changes()));
    Ok((app.settings, code))
}

/// diff(1) convention: 0 when the inputs match, 1 when they differ
fn exit_status(has_changes: bool) -> u8 {
    u8::from(has_changes)
}
