use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use webui_build::context::{Invocation, parse_invocation};

mod cmd;
mod output;

use output::print_error;

const PARAMS_HELP: &str = "\
Modes:
  dev        Debug native build, launch it, then start the bundler dev server
  build      Release native build, production bundle copied into the build dir
  help       Show this help

Params:
  no-cpp     Skip the native (C++) build
  no-reload  Skip regenerating the CMake project";

/// webui - build and run WebUI desktop apps
#[derive(Parser)]
#[command(name = "webui")]
#[command(author, version, about, long_about = None)]
#[command(after_help = PARAMS_HELP)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,

  /// Project root that config paths resolve against (default: current directory)
  #[arg(long, env = "WEBUI_ROOT")]
  root: Option<PathBuf>,

  /// Build configuration file (default: <root>/scripts/webui.config.json)
  #[arg(short, long, env = "WEBUI_CONFIG")]
  config: Option<PathBuf>,

  /// Run mode: dev, build or help
  mode: Option<String>,

  /// Params for the run mode
  #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
  params: Vec<String>,
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn usage_error(reason: &str) -> ExitCode {
  print_error(&format!("Unknown usage ({}). Type 'help' for help.", reason));
  ExitCode::FAILURE
}

fn main() -> ExitCode {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
      if let Err(e) = e.print() {
        print_error(&format!("Failed to print help: {}", e));
        return ExitCode::FAILURE;
      }
      return ExitCode::SUCCESS;
    }
    Err(e) => {
      let rendered = e.to_string();
      let reason = rendered.lines().next().unwrap_or_default();
      return usage_error(reason.trim_start_matches("error: "));
    }
  };
  init_tracing(cli.verbose);

  let ctx = match parse_invocation(cli.mode.as_deref(), &cli.params) {
    Ok(Invocation::Run(ctx)) => ctx,
    Ok(Invocation::Help) => {
      if let Err(e) = Cli::command().print_help() {
        print_error(&format!("Failed to print help: {}", e));
        return ExitCode::FAILURE;
      }
      println!();
      return ExitCode::SUCCESS;
    }
    Err(e) => return usage_error(&e.to_string()),
  };

  match cmd::cmd_run(cli.root.as_deref(), cli.config.as_deref(), &ctx) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
