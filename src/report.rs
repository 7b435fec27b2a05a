use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::transfer::{TransferError, TransferReport, UnresolvedTrack};

#[derive(Debug, thiserror::Error)]
#[error("failed to write {}: {source}", .path.display())]
pub struct OutputWriteError {
    path: PathBuf,
    source: io::Error,
}

pub fn stage(message: &str) -> String {
    format!("[+] {message}")
}

pub fn detail(message: &str) -> String {
    format!(" \u{2570}\u{2500} {message}")
}

pub fn unresolved_line(track: &UnresolvedTrack) -> String {
    detail(&format!(
        "Song number {} : {} was not found",
        track.ordinal, track.descriptor,
    ))
}

fn matching_report(result: &Result<TransferReport, TransferError>) -> Option<&TransferReport> {
    result.as_ref().map_or_else(TransferError::report, Some)
}

/// Console lines describing how a transfer ended. Failures before matching
/// render nothing here; they are returned to the caller as errors.
pub fn render(playlist_name: &str, result: &Result<TransferReport, TransferError>) -> Vec<String> {
    let Some(report) = matching_report(result) else {
        return Vec::new();
    };

    let mut lines = vec![
        detail(&format!("Found {} tracks in the playlist", report.total)),
        stage("Searching for the indexed tracks in Apple Music..."),
    ];
    lines.extend(report.unresolved.iter().map(unresolved_line));
    lines.push(detail(&format!(
        "Matched {} of {} tracks",
        report.resolved_ids.len(),
        report.total,
    )));

    match result {
        Ok(_) => {
            lines.push(stage("Adding tracks to the Apple Music playlist"));
            lines.push(detail(&format!(
                "Playlist '{playlist_name}' created successfully!",
            )));
        }
        Err(TransferError::Creation { .. }) => {
            lines.push(stage("Adding tracks to the Apple Music playlist"));
            lines.push(detail(&capitalize(&result_error(result))));
        }
        Err(_) => lines.push(format!("[-] {}", capitalize(&result_error(result)))),
    }
    lines
}

fn result_error(result: &Result<TransferReport, TransferError>) -> String {
    result.as_ref().err().map(ToString::to_string).unwrap_or_default()
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One `{name} by {artist}` record per line, in source order
pub fn write_unresolved<W: Write>(mut sink: W, unresolved: &[UnresolvedTrack]) -> io::Result<()> {
    for track in unresolved {
        writeln!(sink, "{}", track.descriptor)?;
    }
    sink.flush()
}

pub fn write_unresolved_file(
    path: &Path,
    unresolved: &[UnresolvedTrack],
) -> Result<(), OutputWriteError> {
    File::create(path)
        .and_then(|file| write_unresolved(BufWriter::new(file), unresolved))
        .map_err(|source| OutputWriteError {
            path: path.to_owned(),
            source,
        })
}

/// Writes the unresolved tracks of any transfer that got as far as matching.
/// Returns whether a file was written.
pub fn persist_unresolved(
    path: &Path,
    result: &Result<TransferReport, TransferError>,
) -> Result<bool, OutputWriteError> {
    let Some(report) = matching_report(result) else {
        return Ok(false);
    };
    write_unresolved_file(path, &report.unresolved)?;
    Ok(true)
}
