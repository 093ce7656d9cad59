// src/config/loader.rs

use std::path::Path;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::{RawConfigFile, ReactConfig};
use crate::errors::Result;
use crate::fs::FileSystem;

/// Load a configuration file and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** check that the
/// result is usable. Use [`load_and_validate`] or [`resolve`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it on its own.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<ReactConfig> {
    let raw = load_from_path(fs, path)?;
    ReactConfig::try_from(raw)
}

/// Build the effective configuration for a run.
///
/// - Reads `--config` (if given) as the base layer.
/// - Overlays whatever the command line sets.
/// - Validates the merged result.
pub fn resolve(args: &CliArgs, fs: &dyn FileSystem) -> Result<ReactConfig> {
    let base = match &args.config {
        Some(path) => {
            debug!(config = %path, "loading config file");
            load_from_path(fs, path)?
        }
        None => RawConfigFile::default(),
    };

    let merged = base.overlay(RawConfigFile::from(args));
    ReactConfig::try_from(merged)
}

impl From<&CliArgs> for RawConfigFile {
    fn from(args: &CliArgs) -> Self {
        RawConfigFile {
            paths: args.paths.clone(),
            regex: args.regex.clone(),
            pattern: args.pattern.clone(),
            command: args.command.clone(),
            clear_screen: args.no_clear.then_some(false),
            on_interrupt: args.on_interrupt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ReactError;
    use crate::fs::mock::MockFileSystem;
    use crate::types::InterruptPolicy;
    use clap::Parser;
    use std::path::PathBuf;

    fn args(argv: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("watchreact").chain(argv.iter().copied()))
    }

    #[test]
    fn file_only_config() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "/cfg/Watchreact.toml",
            r#"
paths = ["/w", "/v"]
pattern = "*.py"
command = "pytest $f"
on_interrupt = "kill"
"#,
        );

        let cfg = resolve(&args(&["--config", "/cfg/Watchreact.toml"]), &fs).unwrap();
        assert_eq!(cfg.roots(), &[PathBuf::from("/w"), PathBuf::from("/v")]);
        assert_eq!(cfg.command().template(), "pytest $f");
        assert_eq!(cfg.on_interrupt(), InterruptPolicy::Kill);
        assert!(cfg.predicate().is_match(std::path::Path::new("/w/a.py")));
    }

    #[test]
    fn cli_overrides_file_values() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "/cfg/Watchreact.toml",
            r#"
paths = ["/w"]
regex = ".*\\.rs"
command = "cargo test"
"#,
        );

        let cfg = resolve(
            &args(&["/other", "-p", "*.md", "--no-clear", "--config", "/cfg/Watchreact.toml"]),
            &fs,
        )
        .unwrap();

        assert_eq!(cfg.roots(), &[PathBuf::from("/other")]);
        assert_eq!(cfg.predicate().source(), "*.md");
        assert_eq!(cfg.command().template(), "cargo test");
        assert!(!cfg.clear_screen());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let fs = MockFileSystem::new();
        fs.add_file("/cfg/bad.toml", "paths = [\"/w\"]\ncommnd = \"echo\"\n");

        let err = load_from_path(&fs, "/cfg/bad.toml").unwrap_err();
        assert!(matches!(err, ReactError::TomlError(_)));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let fs = MockFileSystem::new();
        let err = resolve(&args(&["--config", "/nope.toml", "-c", "echo"]), &fs).unwrap_err();
        assert!(matches!(err, ReactError::Other(_)));
    }

    #[test]
    fn load_and_validate_checks_file_on_its_own() {
        let fs = MockFileSystem::new();
        fs.add_file("/cfg/partial.toml", "paths = [\"/w\"]\n");

        let err = load_and_validate(&fs, "/cfg/partial.toml").unwrap_err();
        assert!(matches!(err, ReactError::ConfigError(_)));
    }
}
