//! Command-line argument parsing.
//!
//! Global flags (`--debug`, `--config`, `--log`, `--help`, `--version`) are accepted
//! anywhere on the command line. The first remaining word picks the command;
//! everything after it belongs to that command. Negative numbers such as an
//! EV of `-2` are values, not flags.

/// What the binary should do.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Compute exposure for a metered EV
    Exposure {
        ev: f64,
        film: Option<String>,
        base_iso: Option<f64>,
        push_pull_stops: Option<f64>,
    },
    /// Sun position, times and optionally the daily path
    Sun {
        latitude: Option<f64>,
        longitude: Option<f64>,
        at: Option<String>,
        show_path: bool,
    },
    /// Moon phase
    Moon { at: Option<String> },
    /// List the film catalog
    Films,
    /// `help [COMMAND]`
    Help { command: Option<String> },

    ShowHelp,
    ShowVersion,
    /// Bad arguments; the reason was already logged
    ShowHelpDueToError,
}

/// Parsed command line.
#[derive(Debug, PartialEq)]
pub struct ParsedArgs {
    pub action: CliAction,
    pub debug_enabled: bool,
    pub config_dir: Option<String>,
    /// Write output to this file instead of the terminal
    pub log_file: Option<String>,
}

impl ParsedArgs {
    /// Parse arguments including the program name in position 0.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut debug_enabled = false;
        let mut config_dir = None;
        let mut log_file = None;
        let mut display_help = false;
        let mut display_version = false;
        let mut invalid = false;
        let mut rest = Vec::new();

        let mut i = 0;
        while i < args_vec.len() {
            match args_vec[i].as_str() {
                "--debug" | "-d" => debug_enabled = true,
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--config" | "-c" => match args_vec.get(i + 1) {
                    Some(dir) if !dir.starts_with('-') => {
                        config_dir = Some(dir.clone());
                        i += 1;
                    }
                    _ => {
                        log_warning!("Missing directory for --config. Usage: --config <directory>");
                        invalid = true;
                    }
                },
                "--log" | "-l" => match args_vec.get(i + 1) {
                    Some(file) if !file.starts_with('-') => {
                        log_file = Some(file.clone());
                        i += 1;
                    }
                    _ => {
                        log_warning!("Missing file for --log. Usage: --log <file>");
                        invalid = true;
                    }
                },
                _ => rest.push(args_vec[i].clone()),
            }
            i += 1;
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if display_help {
            CliAction::ShowHelp
        } else if invalid {
            CliAction::ShowHelpDueToError
        } else {
            parse_command(&rest)
        };

        ParsedArgs {
            action,
            debug_enabled,
            config_dir,
            log_file,
        }
    }

    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

fn is_flag(arg: &str) -> bool {
    arg.starts_with('-') && arg.parse::<f64>().is_err()
}

/// Value following the flag at `*i`, advancing past it.
fn take_value(rest: &[String], i: &mut usize, flag: &str) -> Option<String> {
    match rest.get(*i + 1) {
        Some(value) if !is_flag(value) => {
            *i += 1;
            Some(value.clone())
        }
        _ => {
            log_warning!("Missing value for {flag}");
            None
        }
    }
}

fn take_number(rest: &[String], i: &mut usize, flag: &str) -> Option<f64> {
    let value = take_value(rest, i, flag)?;
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Some(number),
        _ => {
            log_warning!("Invalid number for {flag}: {value}");
            None
        }
    }
}

fn parse_command(rest: &[String]) -> CliAction {
    let Some(command) = rest.first() else {
        return CliAction::ShowHelp;
    };

    let parsed = match command.as_str() {
        "exposure" | "e" => parse_exposure(rest),
        "sun" | "s" => parse_sun(rest),
        "moon" | "m" => parse_moon(rest),
        "films" | "f" => match rest.get(1) {
            None => Some(CliAction::Films),
            Some(extra) => {
                log_warning!("Unexpected argument for films: {extra}");
                None
            }
        },
        "help" | "h" => Some(CliAction::Help {
            command: rest.get(1).cloned(),
        }),
        unknown => {
            log_warning!("Unknown command: {unknown}");
            None
        }
    };

    parsed.unwrap_or(CliAction::ShowHelpDueToError)
}

fn parse_exposure(rest: &[String]) -> Option<CliAction> {
    let mut ev = None;
    let mut film = None;
    let mut base_iso = None;
    let mut push_pull_stops = None;

    let mut i = 1;
    while i < rest.len() {
        let arg = rest[i].as_str();
        match arg {
            "--film" | "-f" => film = Some(take_value(rest, &mut i, arg)?),
            "--iso" | "-i" => base_iso = Some(take_number(rest, &mut i, arg)?),
            "--push" | "-p" => push_pull_stops = Some(take_number(rest, &mut i, arg)?),
            _ if is_flag(arg) => {
                log_warning!("Unknown option for exposure: {arg}");
                return None;
            }
            _ if ev.is_some() => {
                log_warning!("Unexpected argument for exposure: {arg}");
                return None;
            }
            _ => match arg.parse::<f64>() {
                Ok(value) if value.is_finite() => ev = Some(value),
                _ => {
                    log_warning!("Invalid EV value: {arg}");
                    return None;
                }
            },
        }
        i += 1;
    }

    let Some(ev) = ev else {
        log_warning!("Missing EV. Usage: filmlog exposure <EV> [--film NAME] [--iso BASE] [--push STOPS]");
        return None;
    };

    Some(CliAction::Exposure {
        ev,
        film,
        base_iso,
        push_pull_stops,
    })
}

fn parse_sun(rest: &[String]) -> Option<CliAction> {
    let mut latitude = None;
    let mut longitude = None;
    let mut at = None;
    let mut show_path = false;

    let mut i = 1;
    while i < rest.len() {
        let arg = rest[i].as_str();
        match arg {
            "--lat" => latitude = Some(take_number(rest, &mut i, arg)?),
            "--lon" => longitude = Some(take_number(rest, &mut i, arg)?),
            "--at" => at = Some(take_value(rest, &mut i, arg)?),
            "--path" => show_path = true,
            _ => {
                log_warning!("Unexpected argument for sun: {arg}");
                return None;
            }
        }
        i += 1;
    }

    if latitude.is_some() != longitude.is_some() {
        log_warning!("--lat and --lon must be given together");
        return None;
    }

    Some(CliAction::Sun {
        latitude,
        longitude,
        at,
        show_path,
    })
}

fn parse_moon(rest: &[String]) -> Option<CliAction> {
    let mut at = None;

    let mut i = 1;
    while i < rest.len() {
        let arg = rest[i].as_str();
        match arg {
            "--at" => at = Some(take_value(rest, &mut i, arg)?),
            _ => {
                log_warning!("Unexpected argument for moon: {arg}");
                return None;
            }
        }
        i += 1;
    }

    Some(CliAction::Moon { at })
}

pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("filmlog [OPTIONS] <COMMAND>");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-l, --log <file>       Write output to a file instead of the terminal");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("exposure, e <EV>       Exposure settings for a metered EV");
    log_indented!("sun, s                 Sun position and today's light");
    log_indented!("moon, m                Moon phase and illumination");
    log_indented!("films, f               List known film stocks");
    log_indented!("help, h [COMMAND]      Show detailed help for a command");
    log_end!();
}
