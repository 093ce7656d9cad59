// src/exec/console.rs

//! Terminal output around each reaction.
//!
//! Stdout belongs to the user here: the banner, the reaction command's own
//! output and the separator. Logs go to stderr.

use std::fmt;
use std::io::{self, Write};

use crate::exec::command::Invocation;

/// ANSI "erase display" + "cursor home".
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Printed after every reaction.
pub const SEPARATOR: &str = "------------------------";

pub struct Console {
    out: Box<dyn Write + Send>,
    clear_screen: bool,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("clear_screen", &self.clear_screen)
            .finish_non_exhaustive()
    }
}

impl Console {
    pub fn new(out: Box<dyn Write + Send>, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn stdout(clear_screen: bool) -> Self {
        Self::new(Box::new(io::stdout()), clear_screen)
    }

    /// Clear the terminal (if enabled) and announce the command.
    ///
    /// Flushed before returning so the banner is never interleaved after the
    /// child's own output.
    pub fn banner(&mut self, invocation: &Invocation) -> io::Result<()> {
        if self.clear_screen {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        writeln!(self.out, "executing script: {invocation}")?;
        self.out.flush()
    }

    pub fn separator(&mut self) -> io::Result<()> {
        writeln!(self.out, "{SEPARATOR}")?;
        self.out.flush()
    }
}
