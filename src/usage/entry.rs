use serde::Serialize;

/// Size of one path as reported by a one-level query, in 1024-byte blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorySize {
    /// Path exactly as the query printed it
    pub path: String,

    /// Allocated size in 1024-byte blocks
    pub blocks: u64,
}

impl DirectorySize {
    pub fn new(path: impl Into<String>, blocks: u64) -> Self {
        Self {
            path: path.into(),
            blocks,
        }
    }

    /// Size in bytes
    pub fn bytes(&self) -> u64 {
        self.blocks.saturating_mul(1024)
    }
}

/// Share of `blocks` in `total` as a percentage, 0 when the total is 0
pub fn percent_of(blocks: u64, total: u128) -> f64 {
    if total == 0 {
        0.0
    } else {
        blocks as f64 / total as f64 * 100.0
    }
}

/// Entries of one query, in the order the query produced them.
///
/// A report collected while permission errors occurred carries no entries and
/// has `permission_denied` set; its total is zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageReport {
    pub entries: Vec<DirectorySize>,
    pub permission_denied: bool,
}

impl UsageReport {
    pub fn new(entries: Vec<DirectorySize>) -> Self {
        Self {
            entries,
            permission_denied: false,
        }
    }

    /// Empty report for a query that hit permission errors
    pub fn permission_denied() -> Self {
        Self {
            entries: Vec::new(),
            permission_denied: true,
        }
    }

    /// Sum of every entry, in 1024-byte blocks. Widened so any number of
    /// `u64` entries sums without overflow.
    pub fn total(&self) -> u128 {
        self.entries.iter().map(|e| u128::from(e.blocks)).sum()
    }

    /// Entries paired with their percentage of the total
    pub fn shares(&self) -> impl Iterator<Item = (&DirectorySize, f64)> + '_ {
        let total = self.total();
        self.entries.iter().map(move |e| (e, percent_of(e.blocks, total)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
