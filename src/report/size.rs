const SUFFIXES: &[&str] = &["KiB", "MiB", "GiB", "TiB", "PiB"];

/// Format a count of 1024-byte blocks with a binary suffix.
///
/// Divides by 1024 while the value is at least 1024, stopping at PiB.
pub fn format_blocks(blocks: u128, decimals: usize) -> String {
    let mut value = blocks as f64;
    let mut idx = 0;

    while value >= 1024.0 && idx < SUFFIXES.len() - 1 {
        value /= 1024.0;
        idx += 1;
    }

    format!("{:.*} {}", decimals, value, SUFFIXES[idx])
}

/// Exact byte count of `blocks` with a `B` unit
pub fn format_raw_bytes(blocks: u128) -> String {
    format!("{}B", blocks.saturating_mul(1024))
}

/// How sizes are shown in a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeDisplay {
    /// Exact bytes, e.g. `524288B`
    #[default]
    Raw,
    /// Binary suffixes, e.g. `512.00 KiB`
    Human { decimals: usize },
}

impl SizeDisplay {
    pub fn new(human_readable: bool, decimals: usize) -> Self {
        if human_readable {
            SizeDisplay::Human { decimals }
        } else {
            SizeDisplay::Raw
        }
    }

    pub fn format(&self, blocks: impl Into<u128>) -> String {
        let blocks = blocks.into();
        match *self {
            SizeDisplay::Raw => format_raw_bytes(blocks),
            SizeDisplay::Human { decimals } => format_blocks(blocks, decimals),
        }
    }
}
