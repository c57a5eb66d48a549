use super::validation::validate_config;
use super::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn parse(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

fn with_config_home<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", dir);
    }

    let result = f();

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
    result
}

#[test]
#[serial]
fn test_config_load_default_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("filmlog").join("filmlog.toml");

    let result = with_config_home(temp_dir.path(), Config::load);

    let config = result.expect("default config should load");
    assert!(config_path.exists());
    assert_eq!(config.base_iso(), 100.0);
    assert_eq!(config.coordinates(), None);
    assert!(!config.prefer_remote());
    assert_eq!(config.resolve_film(None).unwrap().name, "HP5 Plus");
}

#[test]
#[serial]
fn test_config_load_existing_file() {
    let temp_dir = tempdir().unwrap();
    let config_dir = temp_dir.path().join("filmlog");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("filmlog.toml"),
        "base_iso = 200\nlatitude = 51.5\nlongitude = -0.1\n",
    )
    .unwrap();

    let config = with_config_home(temp_dir.path(), Config::load).unwrap();
    assert_eq!(config.base_iso(), 200.0);
    assert_eq!(config.coordinates(), Some((51.5, -0.1)));
}

#[test]
fn test_load_from_missing_path_fails() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("nope.toml");
    assert!(Config::load_from_path(&missing).is_err());
    assert!(!missing.exists());
}

#[test]
fn test_load_from_path_rejects_invalid_toml() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("filmlog.toml");
    fs::write(&path, "base_iso = [not toml").unwrap();
    assert!(Config::load_from_path(&path).is_err());
}

#[test]
fn test_generated_default_parses() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("nested").join("filmlog.toml");
    create_default_config(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("#[Exposure]"));
    assert!(content.contains("default_film = \"HP5 Plus\""));
    assert!(content.contains("#latitude = 51.5074"));

    let config = Config::load_from_path(&path).unwrap();
    assert_eq!(config.base_iso, Some(100.0));
    assert!(config.films.is_empty());
}

#[test]
fn test_builder_aligns_comments() {
    let content = builder::ConfigBuilder::new()
        .add_section("A")
        .add_setting("x", "1", "short key")
        .add_setting("longer_key", "2", "long key")
        .build();

    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "#[A]");
    assert_eq!(lines[1].find('#'), lines[2].find('#'));
}

#[test]
fn test_empty_config_is_valid() {
    let config = parse("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_base_iso_validation() {
    assert!(parse("base_iso = 400").is_ok());
    assert!(parse("base_iso = 0").is_err());
    assert!(parse("base_iso = -100").is_err());
}

#[test]
fn test_coordinate_validation() {
    assert!(parse("latitude = 90\nlongitude = 180").is_ok());
    assert!(parse("latitude = 91\nlongitude = 0").is_err());
    assert!(parse("latitude = 0\nlongitude = -180.5").is_err());

    let err = parse("latitude = 45").unwrap_err();
    assert!(err.to_string().contains("together"));
}

#[test]
fn test_custom_film_validation() {
    let valid = r#"
        [films."Fomapan 200"]
        iso = 200
        reciprocity_constant = 1.0
        reciprocity_exponent = 1.5
    "#;
    assert!(parse(valid).is_ok());

    assert!(parse("[films.\"Bad\"]\niso = 0").is_err());
    assert!(parse("[films.\"Bad\"]\niso = 100\nreciprocity_constant = 0.5").is_err());
    assert!(parse("[films.\"Bad\"]\niso = 100\nreciprocity_exponent = 0.9").is_err());
    assert!(parse("[films.\"Bad\"]\niso = 100\npush_pull_stops = 5").is_err());
    assert!(parse("[films.\"Ok\"]\niso = 100\npush_pull_stops = -4").is_ok());
    assert!(parse("[films.\" \"]\niso = 100").is_err());
}

#[test]
fn test_default_film_must_resolve() {
    assert!(parse("default_film = \"tri-x 400\"").is_ok());
    assert!(parse("default_film = \"Imaginary 800\"").is_err());
    assert!(parse("default_film = \"\"").is_err());

    let custom = r#"
        default_film = "Fomapan 200"
        [films."Fomapan 200"]
        iso = 200
    "#;
    let config = parse(custom).unwrap();
    let film = config.resolve_film(None).unwrap();
    assert_eq!(film.name, "Fomapan 200");
    assert_eq!(film.characteristics.reciprocity_exponent, 1.0);
}

#[test]
fn test_custom_film_overrides_builtin() {
    let config = parse(
        r#"
        [films."hp5 plus"]
        iso = 800
        push_pull_stops = 1
        "#,
    )
    .unwrap();

    let catalog = config.film_catalog();
    let matches: Vec<_> = catalog
        .iter()
        .filter(|s| s.name.eq_ignore_ascii_case("HP5 Plus"))
        .collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].characteristics.iso_rating, 800.0);
    assert_eq!(matches[0].characteristics.push_pull_stops, 1.0);
}

#[test]
fn test_resolve_film_by_name() {
    let config = Config::default();
    assert_eq!(config.resolve_film(Some("Portra 400")).unwrap().name, "Portra 400");
    assert!(config.resolve_film(Some("Unknown")).is_err());
}
