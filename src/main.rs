//! Binary entry point: parse arguments and dispatch to a command.

use filmlog::args::{self, CliAction, ParsedArgs};
use filmlog::commands;
use filmlog::config;
use filmlog::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use filmlog::log_error_exit;
use filmlog::logger::Log;

fn main() {
    let parsed_args = ParsedArgs::from_env();
    let code = run(parsed_args);
    std::process::exit(code);
}

/// Runs the parsed action and returns the exit code. The file logger guard
/// lives in here so it is flushed before `process::exit`.
fn run(parsed_args: ParsedArgs) -> i32 {
    Log::set_debug(parsed_args.debug_enabled);

    let _log_guard = match parsed_args.log_file {
        Some(path) => match Log::start_file_logging(path) {
            Ok(guard) => Some(guard),
            Err(e) => {
                log_error_exit!("Failed to start file logging: {e}");
                return EXIT_FAILURE;
            }
        },
        None => None,
    };

    if let Err(e) = config::set_config_dir(parsed_args.config_dir) {
        log_error_exit!("{e}");
        return EXIT_FAILURE;
    }

    let result = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            return EXIT_FAILURE;
        }
        CliAction::Exposure {
            ev,
            film,
            base_iso,
            push_pull_stops,
        } => commands::exposure::handle_exposure_command(
            ev,
            film.as_deref(),
            base_iso,
            push_pull_stops,
        ),
        CliAction::Sun {
            latitude,
            longitude,
            at,
            show_path,
        } => commands::sun::handle_sun_command(latitude, longitude, at.as_deref(), show_path),
        CliAction::Moon { at } => commands::moon::handle_moon_command(at.as_deref()),
        CliAction::Films => commands::films::handle_films_command(),
        CliAction::Help { command } => commands::help::run_help_command(command.as_deref()),
    };

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            log_error_exit!("{e:#}");
            EXIT_FAILURE
        }
    }
}
