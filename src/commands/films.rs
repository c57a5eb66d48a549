//! `filmlog films`: list built-in and configured film stocks.

use anyhow::Result;

use crate::constants::DEFAULT_FILM;

pub fn handle_films_command() -> Result<()> {
    let config = super::load_config()?;
    let default_film = config.default_film.as_deref().unwrap_or(DEFAULT_FILM);

    log_version!();
    log_block_start!("Film stocks (reciprocity: c · t^p):");
    for stock in config.film_catalog() {
        let film = &stock.characteristics;
        let marker = if stock.name.eq_ignore_ascii_case(default_film) {
            " (default)"
        } else {
            ""
        };
        log_indented!(
            "{:<14} ISO {:<5} c={:<4} p={:<4}{}",
            stock.name,
            film.iso_rating,
            film.reciprocity_constant,
            film.reciprocity_exponent,
            marker
        );
    }
    log_end!();
    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("films - List known film stocks");
    log_block_start!("Usage: filmlog films");
    log_block_start!("Custom stocks come from [films.\"Name\"] tables in filmlog.toml");
    log_end!();
}
