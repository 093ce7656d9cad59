#![allow(dead_code)]

use watchreact::config::{RawConfigFile, ReactConfig};
use watchreact::types::InterruptPolicy;

/// Builder for `ReactConfig` to simplify test setup.
pub struct ConfigBuilder {
    raw: RawConfigFile,
}

impl ConfigBuilder {
    pub fn new(command: &str) -> Self {
        Self {
            raw: RawConfigFile {
                command: Some(command.to_string()),
                // Escape codes only get in the way of output assertions.
                clear_screen: Some(false),
                ..RawConfigFile::default()
            },
        }
    }

    pub fn path(mut self, path: &str) -> Self {
        self.raw.paths.push(path.to_string());
        self
    }

    pub fn pattern(mut self, pattern: &str) -> Self {
        self.raw.pattern = Some(pattern.to_string());
        self
    }

    pub fn regex(mut self, regex: &str) -> Self {
        self.raw.regex = Some(regex.to_string());
        self
    }

    pub fn clear_screen(mut self, val: bool) -> Self {
        self.raw.clear_screen = Some(val);
        self
    }

    pub fn on_interrupt(mut self, policy: InterruptPolicy) -> Self {
        self.raw.on_interrupt = Some(policy);
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.raw
    }

    pub fn build(self) -> ReactConfig {
        ReactConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}
