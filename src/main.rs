//! elogv - Terminal Viewer for Portage elog Files

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use elogv::config::{CliOverrides, ViewerConfig};
use elogv::input::{CrosstermEventSource, InputService};
use elogv::render::{ColorTheme, TerminalUI};
use elogv::Application;
use std::fs::File;
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("elogv")
        .version(elogv::VERSION)
        .about("A terminal viewer for Portage elog files")
        .long_about(
            "elogv lists the elog files Portage writes after each merge, newest first, and \
             shows the selected one in a pager. Logs can be sorted, searched by package \
             name and deleted in ranges.",
        )
        .arg(
            Arg::new("dir")
                .help("Directory holding the elog files")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("monochrome")
                .long("monochrome")
                .short('m')
                .help("Draw without colors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help("Write diagnostics (see RUST_LOG) to PATH")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Cannot create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let cli = CliOverrides {
        log_dir: matches.get_one::<PathBuf>("dir").cloned(),
        monochrome: matches.get_flag("monochrome"),
        log_file: matches.get_one::<PathBuf>("log-file").cloned(),
    };
    init_logging(cli.log_file.as_ref())?;
    let config = ViewerConfig::from_environment(cli)?;
    log::debug!("configuration: {:?}", config);

    let theme = if config.monochrome {
        ColorTheme::monochrome()
    } else {
        ColorTheme::default()
    };
    let ui_renderer = Box::new(TerminalUI::with_theme(theme)?);
    let input = InputService::new(Box::new(CrosstermEventSource::new()));

    let mut app = Application::new(&config, ui_renderer, input)?;
    app.run()?;

    Ok(())
}
