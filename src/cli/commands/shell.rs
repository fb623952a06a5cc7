//! Shell and script command handlers

use logger::{error, info, verbose};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use uni_records::config::Config;
use uni_records::core::report::ReportKind;
use uni_records::core::Registry;
use uni_records::shell::{RunSummary, Session};

/// Start the interactive shell, optionally preloading a script
pub fn interactive(load: Option<&Path>, config: &Config) {
    let stdout = io::stdout();
    let mut session = Session::new(stdout.lock()).with_echo(config.shell.echo);

    if let Some(script) = load {
        match run_file(&mut session, script) {
            Ok(summary) => report_summary(script, summary),
            Err(e) => {
                eprintln!("✗ Failed to load {}: {e}", script.display());
                std::process::exit(1);
            }
        }
    }

    println!("University records shell {}. Type 'help' for commands, 'exit' to leave.", uni_records::get_version());
    let stdin = io::stdin();
    if let Err(e) = session.run(stdin.lock(), Some(&config.shell.prompt)) {
        error!("Shell I/O failed: {e}");
        std::process::exit(1);
    }
    println!();
}

/// Run a script non-interactively and write the requested reports
///
/// Exits with status 1 if the script cannot be read, a report cannot be
/// written, or any command in the script was rejected.
pub fn run(script: &Path, reports: &[ReportKind], config: &Config) {
    let stdout = io::stdout();
    let mut session = Session::new(stdout.lock()).with_echo(config.shell.echo);

    let summary = match run_file(&mut session, script) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("✗ Failed to run {}: {e}", script.display());
            std::process::exit(1);
        }
    };
    report_summary(script, summary);

    if !reports.is_empty() {
        let reports_dir = PathBuf::from(&config.paths.reports_dir);
        match write_reports(session.registry(), reports, &reports_dir) {
            Ok(paths) => {
                for path in paths {
                    println!("✓ Report generated: {}", path.display());
                }
            }
            Err(e) => {
                eprintln!("✗ {e}");
                std::process::exit(1);
            }
        }
    }

    if summary.failures > 0 {
        std::process::exit(1);
    }
}

fn run_file<W: io::Write>(session: &mut Session<W>, script: &Path) -> io::Result<RunSummary> {
    info!("Running script {}", script.display());
    let file = File::open(script)?;
    session.run(BufReader::new(file), None)
}

fn report_summary(script: &Path, summary: RunSummary) {
    verbose!(
        "{}: {} command(s), {} rejected",
        script.display(),
        summary.commands,
        summary.failures
    );
    if summary.failures > 0 {
        eprintln!(
            "✗ {} of {} command(s) in {} were rejected",
            summary.failures,
            summary.commands,
            script.display()
        );
    }
}

/// Render each report kind into `dir`, creating it if needed
///
/// Files are named after the report kind, e.g. `enrollment_report.txt`.
///
/// # Errors
/// Returns a message if the directory cannot be created, a template fails to
/// render, or a file cannot be written
pub fn write_reports(
    registry: &Registry,
    kinds: &[ReportKind],
    dir: &Path,
) -> Result<Vec<PathBuf>, String> {
    fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create reports directory {}: {e}", dir.display()))?;

    kinds
        .iter()
        .map(|kind| {
            let text = kind
                .render(registry)
                .map_err(|e| format!("Failed to render {kind} report: {e}"))?;
            let path = dir.join(format!("{}.txt", kind.file_stem()));
            fs::write(&path, text)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            info!("Wrote {kind} report to {}", path.display());
            Ok(path)
        })
        .collect()
}
