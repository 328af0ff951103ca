use crate::config::STDOUT_PATH;
use crate::errors::{AppError, AppResult};
use crate::layout::{compose, LayoutConfig, Paginator, ReportSummary};
use crate::model::Record;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Lays out `records` in order and writes the report to `out`.
pub fn render<W: Write>(
    records: &[Record],
    config: &LayoutConfig,
    out: W,
) -> io::Result<(W, ReportSummary)> {
    let mut paginator = Paginator::new(out, config);
    for record in records {
        paginator.push(&compose(record, config))?;
    }
    paginator.finish()
}

/// Renders the whole report into memory.
pub fn render_to_string(records: &[Record], config: &LayoutConfig) -> io::Result<String> {
    let (buf, _) = render(records, config, Vec::new())?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes the report to the file at `path`, or to stdout for `-`.
pub fn write_report(
    records: &[Record],
    config: &LayoutConfig,
    path: &Path,
) -> AppResult<ReportSummary> {
    let io_error = |source| AppError::Io {
        path: path.to_path_buf(),
        source,
    };

    let summary = if path.as_os_str() == STDOUT_PATH {
        let stdout = io::stdout();
        let (_, summary) = render(records, config, BufWriter::new(stdout.lock())).map_err(io_error)?;
        summary
    } else {
        let file = File::create(path).map_err(io_error)?;
        let (_, summary) = render(records, config, BufWriter::new(file)).map_err(io_error)?;
        summary
    };

    info!(
        output = %path.display(),
        records = summary.records,
        pages = summary.pages,
        lines = summary.lines,
        "report written"
    );
    Ok(summary)
}
