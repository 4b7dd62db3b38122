mod bar;
mod formatter;
mod size;

pub use bar::{render_bar, BarStyle, MAX_BAR_WIDTH};
pub use formatter::{format_json, format_report, ReportOptions};
pub use size::{format_blocks, format_raw_bytes, SizeDisplay};
