// src/exec/command.rs

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::mem;
use std::path::Path;

use crate::errors::{ReactError, Result};

/// Token replaced with the triggering path.
pub const PLACEHOLDER: &str = "$f";

/// Command template run on every matching write, e.g. `make -C $f`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionCommand {
    template: String,
}

impl ReactionCommand {
    /// Rejects templates without a single non-whitespace token, since there
    /// would be no program to run.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if template.split_whitespace().next().is_none() {
            return Err(ReactError::ConfigError(
                "command must not be empty".to_string(),
            ));
        }
        Ok(Self { template })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Replace every `$f` with `target`, then split on whitespace.
    ///
    /// The result is the same as substituting into the line and splitting
    /// it afterwards (a target containing spaces ends up as several
    /// arguments), but the target's bytes are passed through untouched, so
    /// paths that are not valid UTF-8 still name the file that was written.
    pub fn invocation_for(&self, target: &Path) -> Invocation {
        let mut tokens = Tokenizer::default();
        for (i, text) in self.template.split(PLACEHOLDER).enumerate() {
            if i > 0 {
                tokens.push_path(target.as_os_str());
            }
            tokens.push_text(text);
        }
        tokens.finish()
    }
}

/// A concrete process invocation: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn from_line(line: &str) -> Self {
        let mut tokens = Tokenizer::default();
        tokens.push_text(line);
        tokens.finish()
    }

    /// The invocation as a single space-separated line, as shown in the
    /// banner and in logs. Lossy for non-UTF-8 arguments.
    pub fn command_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Whitespace tokenizer over a mix of template text and raw paths.
#[derive(Default)]
struct Tokenizer {
    tokens: Vec<OsString>,
    current: OsString,
}

impl Tokenizer {
    fn push_text(&mut self, text: &str) {
        let mut rest = text;
        while let Some(ws) = rest.find(char::is_whitespace) {
            self.current.push(&rest[..ws]);
            self.flush();
            let ws_len = rest[ws..].chars().next().map_or(1, char::len_utf8);
            rest = &rest[ws + ws_len..];
        }
        self.current.push(rest);
    }

    /// Paths are split on ASCII whitespace only.
    fn push_path(&mut self, path: &OsStr) {
        for (i, part) in split_ascii_whitespace(path).into_iter().enumerate() {
            if i > 0 {
                self.flush();
            }
            self.current.push(part);
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.tokens.push(mem::take(&mut self.current));
        }
    }

    fn finish(mut self) -> Invocation {
        self.flush();
        let mut tokens = self.tokens.into_iter();
        Invocation {
            program: tokens.next().unwrap_or_default(),
            args: tokens.collect(),
        }
    }
}

/// Pieces of `path` between ASCII whitespace bytes, empty pieces included so
/// leading and trailing whitespace still separates tokens.
#[cfg(unix)]
fn split_ascii_whitespace(path: &OsStr) -> Vec<OsString> {
    use std::os::unix::ffi::OsStrExt;

    path.as_bytes()
        .split(u8::is_ascii_whitespace)
        .map(|part| OsStr::from_bytes(part).to_os_string())
        .collect()
}

#[cfg(not(unix))]
fn split_ascii_whitespace(path: &OsStr) -> Vec<OsString> {
    path.to_string_lossy()
        .split(|c: char| c.is_ascii_whitespace())
        .map(OsString::from)
        .collect()
}
