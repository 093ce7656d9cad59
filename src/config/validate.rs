// src/config/validate.rs

use std::path::PathBuf;

use crate::config::model::{RawConfigFile, ReactConfig};
use crate::errors::{ReactError, Result};
use crate::exec::ReactionCommand;
use crate::watch::MatchPredicate;

impl TryFrom<RawConfigFile> for ReactConfig {
    type Error = ReactError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_paths(&raw)?;
        let predicate = build_predicate(&raw)?;
        let command = build_command(&raw)?;

        let roots = raw.paths.iter().map(PathBuf::from).collect();

        Ok(ReactConfig::new_unchecked(
            roots,
            predicate,
            command,
            raw.clear_screen.unwrap_or(true),
            raw.on_interrupt.unwrap_or_default(),
        ))
    }
}

fn ensure_has_paths(cfg: &RawConfigFile) -> Result<()> {
    if cfg.paths.is_empty() {
        return Err(ReactError::ConfigError(
            "at least one path to watch is required".to_string(),
        ));
    }
    if let Some(blank) = cfg.paths.iter().find(|p| p.trim().is_empty()) {
        return Err(ReactError::ConfigError(format!(
            "watch path must not be blank (got {blank:?})"
        )));
    }
    Ok(())
}

fn build_predicate(cfg: &RawConfigFile) -> Result<MatchPredicate> {
    match (&cfg.regex, &cfg.pattern) {
        (Some(_), Some(_)) => Err(ReactError::ConfigError(
            "`regex` and `pattern` are mutually exclusive".to_string(),
        )),
        (Some(regex), None) => MatchPredicate::from_regex(regex),
        (None, Some(pattern)) => MatchPredicate::from_glob(pattern),
        (None, None) => MatchPredicate::match_all(),
    }
}

fn build_command(cfg: &RawConfigFile) -> Result<ReactionCommand> {
    match &cfg.command {
        Some(template) => ReactionCommand::new(template.as_str()),
        None => Err(ReactError::ConfigError(
            "a command to run is required".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InterruptPolicy;
    use std::path::Path;

    fn raw(paths: &[&str], command: Option<&str>) -> RawConfigFile {
        RawConfigFile {
            paths: paths.iter().map(|s| s.to_string()).collect(),
            command: command.map(str::to_string),
            ..RawConfigFile::default()
        }
    }

    #[test]
    fn defaults_are_applied() {
        let cfg = ReactConfig::try_from(raw(&["/w"], Some("echo $f"))).unwrap();
        assert_eq!(cfg.roots(), &[PathBuf::from("/w")]);
        assert!(cfg.predicate().is_match(Path::new("/w/anything")));
        assert!(cfg.clear_screen());
        assert_eq!(cfg.on_interrupt(), InterruptPolicy::Wait);
    }

    #[test]
    fn missing_paths_is_an_error() {
        let err = ReactConfig::try_from(raw(&[], Some("echo"))).unwrap_err();
        assert!(matches!(err, ReactError::ConfigError(msg) if msg.contains("path")));
    }

    #[test]
    fn missing_command_is_an_error() {
        let err = ReactConfig::try_from(raw(&["/w"], None)).unwrap_err();
        assert!(matches!(err, ReactError::ConfigError(msg) if msg.contains("command")));
    }

    #[test]
    fn regex_and_pattern_are_exclusive() {
        let mut cfg = raw(&["/w"], Some("echo"));
        cfg.regex = Some(".*".to_string());
        cfg.pattern = Some("*.py".to_string());
        let err = ReactConfig::try_from(cfg).unwrap_err();
        assert!(matches!(err, ReactError::ConfigError(msg) if msg.contains("mutually exclusive")));
    }

    #[test]
    fn invalid_regex_surfaces_pattern_error() {
        let mut cfg = raw(&["/w"], Some("echo"));
        cfg.regex = Some("(".to_string());
        assert!(matches!(
            ReactConfig::try_from(cfg),
            Err(ReactError::Pattern(_))
        ));
    }
}
