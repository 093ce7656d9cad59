// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::cli::CliArgs;
use crate::config::ReactConfig;
use crate::engine::{shutdown_channel, ReactionLoop};
use crate::exec::ProcessRunner;
use crate::fs::RealFileSystem;
use crate::watch::NotifyBackend;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution (file + CLI flags)
/// - the `notify` watch backend
/// - the process runner
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = config::resolve(&args, &RealFileSystem)?;

    if args.dry_run {
        write_dry_run(&cfg, &mut io::stdout().lock())?;
        debug!("dry-run complete (no watching)");
        return Ok(());
    }

    // Ctrl-C -> graceful shutdown.
    let (handle, signal) = shutdown_channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            return;
        }
        handle.request();
    });

    let reaction_loop = ReactionLoop::new(Arc::new(cfg), NotifyBackend, ProcessRunner, signal);
    reaction_loop.run().await?;
    Ok(())
}

/// Dry-run output: the resolved configuration, one setting per line.
fn write_dry_run(cfg: &ReactConfig, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "watchreact dry-run")?;
    writeln!(out, "  paths:")?;
    for root in cfg.roots() {
        writeln!(out, "    - {}", root.display())?;
    }
    writeln!(out, "  match: {}", cfg.predicate().source())?;
    writeln!(out, "  command: {}", cfg.command().template())?;
    writeln!(out, "  clear_screen: {}", cfg.clear_screen())?;
    writeln!(out, "  on_interrupt: {:?}", cfg.on_interrupt())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawConfigFile;

    #[test]
    fn dry_run_lists_resolved_settings() {
        let cfg = ReactConfig::try_from(RawConfigFile {
            paths: vec!["src".into(), "tests".into()],
            pattern: Some("*.py".into()),
            command: Some("pytest $f".into()),
            ..RawConfigFile::default()
        })
        .unwrap();

        let mut out = Vec::new();
        write_dry_run(&cfg, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "watchreact dry-run\n  paths:\n    - src\n    - tests\n  match: *.py\n  \
             command: pytest $f\n  clear_screen: true\n  on_interrupt: Wait\n"
        );
    }

    #[test]
    fn dry_run_shows_match_all_default() {
        let cfg = ReactConfig::try_from(RawConfigFile {
            paths: vec!["/w".into()],
            command: Some("make".into()),
            ..RawConfigFile::default()
        })
        .unwrap();

        let mut out = Vec::new();
        write_dry_run(&cfg, &mut out).unwrap();

        assert!(String::from_utf8(out).unwrap().contains("  match: .*\n"));
    }
}
