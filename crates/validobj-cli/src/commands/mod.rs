//! CLI commands

mod check;
mod list;

pub use check::{check, CheckArgs};
pub use list::{list, ListArgs};

/// Exit status when a document has validation errors.
pub const EXIT_INVALID: u8 = 1;

/// Exit status when the expression or the input is unusable.
pub const EXIT_USAGE: u8 = 2;

/// Output format shared by the commands.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per message
    #[default]
    Text,
    /// JSON report
    Json,
}
