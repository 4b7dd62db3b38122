//! Report command implementation

use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::report::{format_json, format_report, BarStyle, ReportOptions, SizeDisplay};
use crate::usage::{Backend, UsageSource};

/// Line written to stderr when permission errors cut a query short
pub const PERMISSION_WARNING: &str = "Warning: Permission denied errors encountered.";

/// Everything a run needs, after merging flags over the config file
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub target: PathBuf,
    pub options: ReportOptions,
    pub backend: Backend,
    pub program: String,
    pub json: bool,
}

impl ReportSettings {
    /// Command-line flags win over the config file, which wins over defaults.
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let report = &config.report;
        let size = SizeDisplay::new(cli.human_readable || report.human_readable, report.decimals);

        Self {
            target: cli.target.clone(),
            options: ReportOptions::new()
                .with_width(cli.length.unwrap_or(report.length))
                .with_size(size)
                .with_bar(BarStyle::new(report.fill, report.blank)),
            backend: cli.backend.unwrap_or(config.collector.backend),
            program: config.collector.program.clone(),
            json: cli.json,
        }
    }
}

/// Run the report against the configured backend, printing to stdout/stderr
pub fn run(settings: &ReportSettings) -> Result<()> {
    let source = settings.backend.source(&settings.program);
    run_with(
        settings,
        source.as_ref(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}

/// Collect, then write the report.
///
/// Nothing reaches `out` unless collection succeeds.
pub fn run_with<S, W, E>(settings: &ReportSettings, source: &S, out: &mut W, err: &mut E) -> Result<()>
where
    S: UsageSource + ?Sized,
    W: Write,
    E: Write,
{
    let report = source.collect(&settings.target)?;

    if report.permission_denied {
        writeln!(err, "{}", PERMISSION_WARNING)?;
    }

    let target = settings.target.display().to_string();
    let output = if settings.json {
        format_json(&target, &report, &settings.options)?
    } else {
        format_report(&target, &report, &settings.options)?
    };

    tracing::debug!(
        entries = report.entries.len(),
        total = %report.total(),
        "Report ready"
    );

    if settings.json {
        writeln!(out, "{}", output)?;
    } else {
        out.write_all(output.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DuimError;
    use crate::usage::{classify, UsageReport};
    use clap::Parser;
    use std::path::Path;

    /// Replays a canned du result
    struct CannedDu {
        success: bool,
        stdout: &'static str,
        stderr: &'static str,
    }

    impl UsageSource for CannedDu {
        fn collect(&self, target: &Path) -> Result<UsageReport> {
            classify(target, self.success, self.stdout, self.stderr)
        }
    }

    fn settings(args: &[&str]) -> ReportSettings {
        let mut argv = vec!["duim"];
        argv.extend_from_slice(args);
        ReportSettings::resolve(&Cli::parse_from(argv), &Config::default())
    }

    fn run_canned(settings: &ReportSettings, du: CannedDu) -> (Result<()>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run_with(settings, &du, &mut out, &mut err);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_resolve_defaults() {
        let s = settings(&[]);
        assert_eq!(s.target, PathBuf::from("."));
        assert_eq!(s.options.width, 20);
        assert_eq!(s.options.size, SizeDisplay::Raw);
        assert_eq!(s.backend, Backend::Du);
        assert_eq!(s.program, "du");
    }

    #[test]
    fn test_resolve_flags_override_config() {
        let mut config = Config::default();
        config.report.length = 50;
        config.report.decimals = 1;
        config.collector.backend = Backend::Native;

        let cli = Cli::parse_from(["duim", "-l", "8", "-H", "--backend", "du"]);
        let s = ReportSettings::resolve(&cli, &config);
        assert_eq!(s.options.width, 8);
        assert_eq!(s.options.size, SizeDisplay::Human { decimals: 1 });
        assert_eq!(s.backend, Backend::Du);

        let s = ReportSettings::resolve(&Cli::parse_from(["duim"]), &config);
        assert_eq!(s.options.width, 50);
        assert_eq!(s.backend, Backend::Native);
    }

    #[test]
    fn test_run_prints_report() {
        let du = CannedDu {
            success: true,
            stdout: "512\t./a\n1024\t./b\n",
            stderr: "",
        };
        let (result, out, err) = run_canned(&settings(&[]), du);
        assert!(result.is_ok());
        assert!(err.is_empty());
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "Disk usage for: .");
        assert!(lines[1].starts_with("33% ["));
        assert!(lines[2].starts_with("67% ["));
        assert_eq!(lines[3], "Total: 1572864B");
    }

    #[test]
    fn test_run_permission_denied_warns_once() {
        let du = CannedDu {
            success: false,
            stdout: "8\t./ok\n",
            stderr: "du: cannot read directory './a': Permission denied\n\
                     du: cannot read directory './b': Permission denied\n",
        };
        let (result, out, err) = run_canned(&settings(&["-H"]), du);
        assert!(result.is_ok());
        assert_eq!(err, format!("{}\n", PERMISSION_WARNING));
        assert_eq!(out, "Disk usage for: .\nTotal: 0.00 KiB\n");
    }

    #[test]
    fn test_run_fatal_failure_prints_nothing() {
        let du = CannedDu {
            success: false,
            stdout: "",
            stderr: "du: cannot access 'missing': No such file or directory\n",
        };
        let (result, out, _) = run_canned(&settings(&["missing"]), du);
        assert!(matches!(result, Err(DuimError::QueryFailed { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_json() {
        let du = CannedDu {
            success: true,
            stdout: "4\t./x\n4\t.\n",
            stderr: "",
        };
        let (result, out, _) = run_canned(&settings(&["--json"]), du);
        assert!(result.is_ok());
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["total_blocks"], 8);
        assert_eq!(json["entries"][0]["percent"], 50.0);
    }
}
