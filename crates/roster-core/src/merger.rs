//! Merge engine: header emission and per-file row merging
//!
//! The output file is truncated once when the header is written, then
//! each input is merged in a separate open/append/close cycle. Rows
//! already flushed for earlier files survive a failure in a later one.

use crate::error::{Error, Result};
use crate::header::{extract_subjects, read_header};
use crate::schema::{plan_column_order, ColumnOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Sequential id source for output rows
///
/// Starts at 1 and is never reset between input files; each emitted row
/// consumes exactly one value. Threaded through the merge calls
/// explicitly so there is no hidden global state.
#[derive(Debug)]
pub struct IdCounter {
    next: u64,
}

impl IdCounter {
    /// Create a counter starting at 1
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Take the next id
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// How many ids have been handed out so far
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-source row count from a merge run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRows {
    /// Input file path
    pub path: PathBuf,
    /// Data rows merged from this file
    pub rows: u64,
}

/// Summary of a completed merge run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeSummary {
    /// The merged output file
    pub output: PathBuf,
    /// Number of columns in the canonical order
    pub columns: usize,
    /// Total data rows written
    pub total_rows: u64,
    /// Per-source row counts, in merge order
    pub sources: Vec<SourceRows>,
}

/// Write the canonical header line, truncating/creating the output file
///
/// This is the output's only header line; the merge steps append data
/// rows after it.
pub fn write_header<P: AsRef<Path>>(order: &ColumnOrder, output: P) -> Result<()> {
    let path = output.as_ref();
    let file = File::create(path).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    write_header_to(order, BufWriter::new(file), path)
}

/// Write the canonical header line to any writer
pub fn write_header_to<W: Write>(order: &ColumnOrder, writer: W, path: &Path) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    csv_writer.write_record(order.names()).map_err(|e| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    csv_writer.flush()?;

    Ok(())
}

/// Merge one input file's rows into the output file
///
/// The output is opened in append mode and closed again before this
/// function returns. Returns the number of data rows written.
pub fn merge_file<P, Q>(
    input: P,
    order: &ColumnOrder,
    output: Q,
    ids: &mut IdCounter,
) -> Result<u64>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();

    let in_file = File::open(input).map_err(|e| Error::FileRead {
        path: input.to_path_buf(),
        source: e,
    })?;
    let out_file = OpenOptions::new().append(true).open(output).map_err(|e| Error::FileWrite {
        path: output.to_path_buf(),
        source: e,
    })?;

    merge_rows(
        BufReader::new(in_file),
        input,
        order,
        BufWriter::new(out_file),
        ids,
    )
}

/// Merge rows from any reader into any writer (useful for testing)
///
/// Reads the source's own header to build its local column layout, then
/// maps every data row into the canonical order: the next generated id
/// first, then for every canonical column except `id` the source value,
/// or an empty string when the source lacks the column or the cell is
/// empty. Values are carried verbatim.
pub fn merge_rows<R: Read, W: Write>(
    reader: R,
    source: &Path,
    order: &ColumnOrder,
    writer: W,
    ids: &mut IdCounter,
) -> Result<u64> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    // This file's own column layout. Headers are assumed unique within
    // one file; a repeated name keeps its last position.
    let headers = csv_reader.headers().map_err(|e| Error::Csv {
        path: source.to_path_buf(),
        source: e,
    })?;
    let local: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_string(), i))
        .collect();

    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    let mut written = 0;
    for result in csv_reader.records() {
        let record = result.map_err(|e| Error::Csv {
            path: source.to_path_buf(),
            source: e,
        })?;

        let mut fields: Vec<&str> = Vec::with_capacity(order.len());
        let id = ids.next_id().to_string();
        fields.push(&id);

        for column in order.columns() {
            if column.name == "id" {
                continue;
            }
            let value = local
                .get(&column.name)
                .and_then(|&i| record.get(i))
                .filter(|v| !v.is_empty())
                .unwrap_or("");
            fields.push(value);
        }

        csv_writer.write_record(&fields).map_err(|e| Error::Csv {
            path: source.to_path_buf(),
            source: e,
        })?;
        written += 1;
    }

    csv_writer.flush()?;

    Ok(written)
}

/// Merge a set of input files into a single id-assigned output file
///
/// Headers are read up front to plan the canonical column order (the
/// subject columns come from the first input's header only), the output
/// is truncated and given its header line, then each input is merged in
/// order, sharing one id counter. A failure aborts the run and leaves
/// whatever was already flushed on disk.
pub fn merge_files<P, Q>(inputs: &[P], output: Q) -> Result<MergeSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    if inputs.is_empty() {
        return Err(Error::NoInputs);
    }

    let output = output.as_ref();

    let mut headers = Vec::with_capacity(inputs.len());
    for input in inputs {
        headers.push(read_header(input)?);
    }

    let subjects = extract_subjects(&headers[0]);
    let order = plan_column_order(&subjects, &headers);

    write_header(&order, output)?;

    let mut ids = IdCounter::new();
    let mut sources = Vec::with_capacity(inputs.len());
    for input in inputs {
        let rows = merge_file(input, &order, output, &mut ids)?;
        sources.push(SourceRows {
            path: input.as_ref().to_path_buf(),
            rows,
        });
    }

    Ok(MergeSummary {
        output: output.to_path_buf(),
        columns: order.len(),
        total_rows: ids.issued(),
        sources,
    })
}
