//! Parser for `du` output: one `<blocks>\t<path>` record per line.

use crate::error::{DuimError, Result};

use super::entry::DirectorySize;

/// Parse a single `du` line.
///
/// du separates the size from the path with a single tab. Everything after
/// that tab is the path, kept verbatim apart from the line terminator, so
/// paths that start with spaces survive. Lines without a tab are split at
/// the first whitespace run instead, and then leading whitespace of the path
/// is lost.
pub fn parse_line(line: &str) -> Result<DirectorySize> {
    let record = line.trim_end_matches(['\n', '\r']).trim_start();

    let malformed = || DuimError::MalformedLine {
        line: line.to_string(),
    };

    let (size, path) = match record.split_once('\t') {
        Some((size, path)) => (size.trim_end(), path),
        None => {
            let split = record.find(char::is_whitespace).ok_or_else(malformed)?;
            let (size, rest) = record.split_at(split);
            (size, rest.trim_start())
        }
    };
    if path.is_empty() {
        return Err(malformed());
    }

    let blocks = size.parse::<u64>().map_err(|_| malformed())?;
    Ok(DirectorySize::new(path, blocks))
}

/// Parse the whole output of a one-level `du`, skipping blank lines.
pub fn parse_output(output: &str) -> Result<Vec<DirectorySize>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}
