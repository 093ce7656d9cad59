use clap::ValueEnum;
use serde::Deserialize;

/// What to do with a reaction command that is still running when an
/// interrupt arrives.
///
/// - `Wait`: let the command finish (its separator line is still printed),
///   then stop watching. Default.
/// - `Kill`: kill the child process and stop immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InterruptPolicy {
    #[default]
    Wait,
    Kill,
}
