//! CSV export of a view.
//!
//! Export is pure formatting over the pipeline's output: rows are written in
//! the order given, with a fixed column order. [`Exporter`] guards against
//! overlapping exports; a request made while another export is in flight is
//! ignored and reported as [`ExportOutcome::Busy`].

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use opptrack_model::models::Application;
use thiserror::Error;

/// Column headers, in output order.
pub const EXPORT_HEADERS: [&str; 11] = [
    "ID",
    "Title",
    "Agency",
    "NAICS",
    "Set-Aside",
    "Vehicle",
    "Due Date",
    "Status",
    "% Complete",
    "Fit Score",
    "Ceiling",
];

/// Simulated latency before the export file is written.
pub const EXPORT_LATENCY: Duration = Duration::from_millis(100);

/// Errors that can occur while writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output directory.
    #[error("failed to create export directory '{path}': {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write the export file.
    #[error("failed to write export file '{path}': {source}")]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Result of an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The file was written.
    Written {
        /// Path of the export file.
        path: PathBuf,
        /// Number of data rows written.
        rows: usize,
    },
    /// Another export was already running; nothing was done.
    Busy,
}

/// Formats applications as CSV: a header row then one row per application,
/// rows separated by `\n`.
pub fn format_csv<'a, I>(apps: I) -> String
where
    I: IntoIterator<Item = &'a Application>,
{
    let mut lines = vec![EXPORT_HEADERS.join(",")];
    lines.extend(apps.into_iter().map(format_row));
    lines.join("\n")
}

fn format_row(app: &Application) -> String {
    let fields = [
        escape_field(&app.id),
        escape_field(&app.title),
        escape_field(&app.agency),
        escape_field(&app.naics),
        escape_field(&app.set_aside.join(", ")).into_owned().into(),
        escape_field(&app.vehicle),
        escape_field(&app.due_date),
        Cow::Borrowed(app.status.as_str()),
        Cow::Owned(app.percent_complete.to_string()),
        Cow::Owned(app.fit_score.to_string()),
        Cow::Owned(app.ceiling.to_string()),
    ];
    fields.join(",")
}

/// Quotes a field that contains a comma, quote or line break.
fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Returns the export file name for the given date.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("gsa-applications-{}.csv", date.format("%Y-%m-%d"))
}

/// Resets the in-flight flag when an export finishes, however it finishes.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Writes CSV exports, one at a time.
#[derive(Debug, Clone)]
pub struct Exporter {
    in_flight: Arc<AtomicBool>,
    latency: Duration,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter {
    /// Creates an exporter with the default latency.
    pub fn new() -> Self {
        Self::with_latency(EXPORT_LATENCY)
    }

    /// Creates an exporter with a custom latency.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            in_flight: Arc::new(AtomicBool::new(false)),
            latency,
        }
    }

    /// Returns true while an export is running.
    pub fn is_exporting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn try_begin(&self) -> Option<InFlightGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                flag: Arc::clone(&self.in_flight),
            })
    }

    /// Writes `apps` as CSV into `dir`, named after `date`.
    ///
    /// The rows are captured before the simulated latency, so the file
    /// reflects the view at the time of the request.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] if the directory cannot be created or the
    /// file cannot be written. The in-flight flag is cleared either way.
    pub async fn export_to_dir(
        &self,
        apps: &[&Application],
        dir: &Path,
        date: NaiveDate,
    ) -> Result<ExportOutcome, ExportError> {
        let Some(_guard) = self.try_begin() else {
            tracing::debug!("export already in flight, ignoring request");
            return Ok(ExportOutcome::Busy);
        };

        let csv = format_csv(apps.iter().copied());
        let rows = apps.len();
        let path = dir.join(export_file_name(date));

        tokio::time::sleep(self.latency).await;

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| ExportError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        tokio::fs::write(&path, csv)
            .await
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::info!(path = %path.display(), rows, "exported applications");
        Ok(ExportOutcome::Written { path, rows })
    }
}
