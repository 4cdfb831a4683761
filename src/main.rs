use std::process::ExitCode;

use clap::Parser;

use devops_validate::cli::Cli;
use devops_validate::config::{self, types::OutputFormat};
use devops_validate::pipeline::{self, CancellationToken};
use devops_validate::report;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == clap::error::ErrorKind::DisplayHelp
            || err.kind() == clap::error::ErrorKind::DisplayVersion =>
        {
            print!("{err}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            // clap's own exit codes don't line up with the engine's; surface
            // unparseable flags as the same user-input exit code as a bad path.
            eprint!("{err}");
            return ExitCode::from(64);
        }
    };
    cli.init_logging();

    let path = cli.path.clone();
    if !path.exists() {
        eprintln!("error: path '{}' does not exist", path.display());
        return ExitCode::from(64);
    }

    let loaded = match config::load_config_from(&path, cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(64);
        }
    };
    let mut config = loaded.config;
    let mut startup_findings = loaded.findings;

    config.analyzers_enabled = cli.scoped_analyzers(&config.analyzers_enabled);
    if cli.strict {
        config.strict_mode = true;
    }
    if cli.json {
        config.output_format = OutputFormat::Json;
    }
    if let Some(color) = cli.color {
        config.color = color;
    }
    // NO_COLOR (https://no-color.org) overrides every other color setting,
    // CLI flag included.
    if std::env::var_os("NO_COLOR").is_some() {
        config.color = devops_validate::config::types::ColorMode::Never;
    }
    if cli.check_versions {
        config.doc_lookup_enabled = true;
    }

    let cancellation = CancellationToken::new();
    let handler_token = cancellation.clone();
    if let Err(err) = ctrlc::set_handler(move || handler_token.cancel()) {
        log::warn!("failed to install Ctrl-C handler: {err}");
    }

    let mut run = pipeline::run(&path, &config, &cancellation);
    run.findings.append(&mut startup_findings);
    run.findings = devops_validate::finding::dedup_and_sort(run.findings);

    match config.output_format {
        OutputFormat::Json => println!("{}", report::render_json(&run, &config)),
        OutputFormat::Human => print!("{}", report::render_human(&run, &config)),
    }

    ExitCode::from(report::exit_code(&run, &config) as u8)
}
