//! Plain-text CSV import and export.
//!
//! Three fixed layouts, all comma-separated with a header line:
//!
//! | Function | Header |
//! |----------|--------|
//! | [`write_processes`] / [`read_processes`] | `id,burst_time,priority,arrival_time` |
//! | [`write_results`] | process columns + `waiting_time,turnaround_time,completion_time` |
//! | [`write_gantt`] | `id,start,end` (idle intervals omitted) |
//!
//! Fields are bare integers, so no quoting or escaping is involved.

use std::io::{BufRead, Write};

use crate::error::CsvError;
use crate::models::{Process, Timeline};

/// Columns of a process input file.
pub const PROCESS_COLUMNS: [&str; 4] = ["id", "burst_time", "priority", "arrival_time"];

/// Columns of a results file.
pub const RESULT_COLUMNS: [&str; 7] = [
    "id",
    "burst_time",
    "priority",
    "arrival_time",
    "waiting_time",
    "turnaround_time",
    "completion_time",
];

/// Columns of a Gantt file.
pub const GANTT_COLUMNS: [&str; 3] = ["id", "start", "end"];

/// Writes process definitions.
pub fn write_processes<W: Write>(mut writer: W, processes: &[Process]) -> Result<(), CsvError> {
    writeln!(writer, "{}", PROCESS_COLUMNS.join(","))?;
    for p in processes {
        writeln!(
            writer,
            "{},{},{},{}",
            p.id, p.burst_time, p.priority, p.arrival_time
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes per-process results of a run.
///
/// An unfinished process leaves `completion_time` empty.
pub fn write_results<W: Write>(mut writer: W, processes: &[Process]) -> Result<(), CsvError> {
    writeln!(writer, "{}", RESULT_COLUMNS.join(","))?;
    for p in processes {
        let completion = p.completion_time.map(|t| t.to_string()).unwrap_or_default();
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            p.id,
            p.burst_time,
            p.priority,
            p.arrival_time,
            p.waiting_time,
            p.turnaround_time,
            completion
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the execution slices of a timeline.
pub fn write_gantt<W: Write>(mut writer: W, timeline: &Timeline) -> Result<(), CsvError> {
    writeln!(writer, "{}", GANTT_COLUMNS.join(","))?;
    for entry in timeline.entries() {
        if let Some(id) = entry.slot.process_id() {
            writeln!(writer, "{},{},{}", id, entry.start, entry.end)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Reads process definitions written by [`write_processes`].
///
/// Surrounding whitespace is trimmed and blank lines are skipped. Values
/// are not range-checked; see [`crate::validation`].
pub fn read_processes<R: BufRead>(reader: R) -> Result<Vec<Process>, CsvError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)));

    let header = loop {
        match lines.next() {
            Some(line) => {
                let (_, text) = line?;
                if !text.trim().is_empty() {
                    break text;
                }
            }
            None => return Err(CsvError::MissingHeader),
        }
    };

    let found: Vec<&str> = header.split(',').map(str::trim).collect();
    if found != PROCESS_COLUMNS {
        return Err(CsvError::UnexpectedHeader {
            expected: PROCESS_COLUMNS.join(","),
            found: header.trim().to_string(),
        });
    }

    let mut processes = Vec::new();
    for line in lines {
        let (number, text) = line?;
        if text.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = text.split(',').map(str::trim).collect();
        if fields.len() != PROCESS_COLUMNS.len() {
            return Err(CsvError::FieldCount {
                line: number,
                expected: PROCESS_COLUMNS.len(),
                found: fields.len(),
            });
        }

        processes.push(Process::new(
            parse_field(fields[0], number, "id")?,
            parse_field(fields[1], number, "burst_time")?,
            parse_field(fields[2], number, "priority")?,
            parse_field(fields[3], number, "arrival_time")?,
        ));
    }

    log::debug!("read {} processes", processes.len());
    Ok(processes)
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    line: usize,
    column: &'static str,
) -> Result<T, CsvError> {
    value.parse().map_err(|_| CsvError::InvalidField {
        line,
        column,
        value: value.to_string(),
    })
}
