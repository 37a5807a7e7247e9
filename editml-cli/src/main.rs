//! Command-line interface for EditML
//! This binary renders EditML documents: the Clean View by default, or a dump of the parsed nodes.
//!
//! Usage:
//!   editml `[path]` [--format `<format>`] [--config `<file>`]   - Render a file (stdin when absent or `-`)
//!   editml --list-formats                                        - List all available formats
//!
//! Settings come from the built-in defaults, `./.editml.toml`, `--config`, `EDITML_*`
//! environment variables and flags, each layer overriding the previous ones.
//!
//! The rendered document goes to stdout; issues, logs and `--debug` output go to stderr.
//! The exit status is 1 when any error was reported or a structural conflict stopped
//! rendering.

mod transforms;

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use editml_config::{EditmlConfig, Loader, OutputFormat};
use std::io::Read;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let matches = Command::new("editml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render EditML documents")
        .arg(
            Arg::new("path")
                .help("Path to the EditML file ('-' or absent for stdin)")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default: rendering.format from config)")
                .value_parser(PossibleValuesParser::new(
                    OutputFormat::ALL.iter().map(|format| format.name()),
                )),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the defaults and ./.editml.toml"),
        )
        .arg(
            Arg::new("keep-comments")
                .long("keep-comments")
                .help("Do not strip %% debug-comment lines")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .help("Deepest allowed nesting of structural blocks")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Print the input, parsed nodes and issues to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return ExitCode::SUCCESS;
    }

    match handle_render_command(&matches) {
        Ok(code) => code,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn load_config(matches: &ArgMatches) -> Result<EditmlConfig, String> {
    let mut loader = Loader::new();
    if let Ok(cwd) = std::env::current_dir() {
        loader = loader.with_project_file(cwd);
    }
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader = loader.with_env();
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader
            .set_override("rendering.format", format.as_str())
            .map_err(|e| e.to_string())?;
    }
    if matches.get_flag("keep-comments") {
        loader = loader
            .set_override("parsing.strip_debug_comments", false)
            .map_err(|e| e.to_string())?;
    }
    if let Some(depth) = matches.get_one::<u32>("max-depth") {
        loader = loader
            .set_override("rendering.max_nesting_depth", i64::from(*depth))
            .map_err(|e| e.to_string())?;
    }
    loader
        .build()
        .map_err(|e| format!("Invalid configuration: {}", e))
}

fn read_input(path: Option<&String>) -> Result<String, String> {
    match path.map(String::as_str) {
        None | Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("Cannot read stdin: {}", e))?;
            Ok(buffer)
        }
        Some(path) => {
            std::fs::read_to_string(path).map_err(|e| format!("Cannot read {}: {}", path, e))
        }
    }
}

/// Handle the render command
fn handle_render_command(matches: &ArgMatches) -> Result<ExitCode, String> {
    let config = load_config(matches)?;
    let source = read_input(matches.get_one::<String>("path"))?;
    debug!(
        bytes = source.len(),
        format = %config.rendering.format,
        "rendering input"
    );

    let transformed = transforms::execute(&source, &config)?;

    if matches.get_flag("debug") {
        eprint!("{}", transforms::debug_dump(&source, &transformed, &config));
    } else {
        for issue in transformed.issues() {
            eprintln!("{}", issue);
        }
    }

    if let Some(output) = &transformed.output {
        print!("{}", output);
    }

    Ok(if transformed.failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available output formats:\n");
    for (name, description) in transforms::available_formats() {
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}
