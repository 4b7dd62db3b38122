//! Usage collection: one-level size queries and their parsed results.

mod du;
mod entry;
mod native;
mod parse;

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use du::{classify, DuCommand, PERMISSION_DENIED};
pub use entry::{percent_of, DirectorySize, UsageReport};
pub use native::{allocated_bytes, NativeScan};
pub use parse::{parse_line, parse_output};

/// Anything that can size the immediate subdirectories of a target.
pub trait UsageSource {
    /// Query `target` one level deep.
    ///
    /// Permission errors produce an empty report with `permission_denied`
    /// set. Every other failure is returned as an error.
    fn collect(&self, target: &Path) -> Result<UsageReport>;
}

/// Which [`UsageSource`] to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Run the external du utility
    #[default]
    Du,
    /// Walk the directory in-process
    Native,
}

impl Backend {
    /// Build the source for this backend. `program` is only used by `Du`.
    pub fn source(self, program: &str) -> Box<dyn UsageSource> {
        match self {
            Backend::Du => Box::new(DuCommand::new(program)),
            Backend::Native => Box::new(NativeScan::new()),
        }
    }
}
