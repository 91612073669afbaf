//! Survey compiler CLI.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use survey_compile::cli::{Cli, Command, LogFormatArg};
use survey_compile::commands::{run_compile, run_data_groups, run_navigate};
use survey_compile::logging::{LogConfig, LogFormat, init_logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&log_config_from_cli(&cli));

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Compile(args) => println!("{}", run_compile(&args)?),
        Command::Navigate(args) => match run_navigate(&args)? {
            Some(next) => println!("{next}"),
            None => println!("(end of task)"),
        },
        Command::DataGroups(args) => {
            let (groups, changed) = run_data_groups(&args)?;
            let groups: Vec<String> = groups.into_iter().collect();
            println!("{}", groups.join(","));
            if !changed {
                eprintln!("data groups unchanged");
            }
        }
        Command::Examples => {
            for name in example_surveys::NAMES {
                println!("{name}");
            }
        }
    }
    Ok(())
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    LogConfig::from_verbosity(cli.verbose)
        .with_format(format)
        .with_ansi(!cli.no_color && io::stderr().is_terminal())
}
