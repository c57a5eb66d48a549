//! `filmlog help [COMMAND]`.

use anyhow::Result;

pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("exposure") | Some("e") => super::exposure::display_help(),
        Some("sun") | Some("s") => super::sun::display_help(),
        Some("moon") | Some("m") => super::moon::display_help(),
        Some("films") | Some("f") => super::films::display_help(),
        Some("help") | Some("h") => display_help_help(),
        Some(unknown) => {
            log_warning_standalone!("Unknown command: {unknown}");
            display_general_help();
        }
    }
    Ok(())
}

fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("exposure, e <EV>       Exposure settings for a metered EV");
    log_indented!("sun, s                 Sun position and today's light");
    log_indented!("moon, m                Moon phase and illumination");
    log_indented!("films, f               List known film stocks");
    log_indented!("help, h [COMMAND]      Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'filmlog help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'filmlog --help' to see all options and general usage.");
    log_end!();
}

fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: filmlog help [COMMAND]");
    log_block_start!("Examples:");
    log_indented!("filmlog help");
    log_indented!("filmlog help exposure");
    log_end!();
}
