//TODO: update clap to remove the need for this
#![allow(dangerous_implicit_autorefs)]

use std::io;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{
    crate_authors, crate_description, crate_name, crate_version, App, AppSettings, Arg, ArgMatches,
    SubCommand,
};
use log::{info, LevelFilter};
use ustar::{extract, show, ExtractOptions};

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn archive_path<'a>(matches: &'a ArgMatches) -> anyhow::Result<&'a str> {
    matches
        .value_of("archive")
        .ok_or_else(|| anyhow!("no archive given"))
}

fn main() -> anyhow::Result<()> {
    let arg_archive = Arg::with_name("archive")
        .help("Archive file, or '-' to read standard input")
        .required(true)
        .value_name("FILE");

    let arg_verbose = Arg::with_name("verbose")
        .help("Log each entry as it is processed")
        .short("v")
        .long("verbose");

    let matches = App::new(crate_name!())
        .author(crate_authors!(", "))
        .about(crate_description!())
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("extract")
                .about("Extract archive")
                .arg(&arg_archive)
                .arg(
                    Arg::with_name("extract-path")
                        .help("Only extract this path and what lies below it")
                        .short("e")
                        .long("extract-path")
                        .takes_value(true)
                        .value_name("SUBTREE"),
                )
                .arg(
                    Arg::with_name("output")
                        .help("Directory to extract to (defaults to '.')")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .value_name("DIR"),
                )
                .arg(&arg_verbose),
        )
        .subcommand(
            SubCommand::with_name("show")
                .about("List archive members")
                .arg(&arg_archive)
                .arg(&arg_verbose),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("extract") {
        let verbose = matches.is_present("verbose");
        init_logger(verbose);

        let mut options = ExtractOptions {
            subtree: matches.value_of("extract-path").map(PathBuf::from),
            verbose,
            ..ExtractOptions::default()
        };
        if let Some(output) = matches.value_of("output") {
            options.output_dir = PathBuf::from(output);
        }
        let count = extract(archive_path(matches)?, &options)?;
        info!("extracted {} entries", count);
        Ok(())
    } else if let Some(matches) = matches.subcommand_matches("show") {
        init_logger(matches.is_present("verbose"));
        show(archive_path(matches)?, io::stdout().lock())?;
        Ok(())
    } else {
        Ok(())
    }
}
