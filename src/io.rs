//! Tab-separated loading and saving of string-keyed frames.
//!
//! The first header cell names the row-id column; every other header cell is
//! a column key. Cells that do not parse as numbers become NaN.

use std::collections::HashSet;
use std::fmt::{Debug, Display};
use std::fs::File;
use std::hash::Hash;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use flate2::{
    read::{GzDecoder, MultiGzDecoder},
    write::GzEncoder,
    Compression,
};
use log::debug;
use ndarray::Array2;
use tar::{Archive, Builder, Header};

use crate::error::{Error, Result};
use crate::frame::Frame;

pub fn read_tsv<R: Read>(reader: R) -> Result<Frame<String, String>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.len() < 2 {
        return Err(Error::Format {
            line: 1,
            message: "header needs a row-id column and at least one value column".to_string(),
        });
    }
    let col_keys: Vec<String> = headers.iter().skip(1).map(|h| h.trim().to_string()).collect();

    let mut row_keys = Vec::new();
    let mut seen = HashSet::new();
    let mut values = Vec::new();

    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let line = idx + 2; // header offset

        let row_id = record.get(0).unwrap_or("").trim();
        if row_id.is_empty() {
            return Err(Error::Format {
                line,
                message: "empty row id".to_string(),
            });
        }
        if !seen.insert(row_id.to_string()) {
            return Err(Error::Format {
                line,
                message: format!("duplicate row id '{}'", row_id),
            });
        }
        if record.len() != headers.len() {
            return Err(Error::Format {
                line,
                message: format!("expected {} fields, found {}", headers.len(), record.len()),
            });
        }

        values.extend(
            record
                .iter()
                .skip(1)
                .map(|s| s.trim().parse().unwrap_or(f64::NAN)),
        );
        row_keys.push(row_id.to_string());
    }

    let shape = (row_keys.len(), col_keys.len());
    let values = Array2::from_shape_vec(shape, values).map_err(|_| Error::InconsistentShape {
        rows: shape.0,
        cols: shape.1,
        found_rows: shape.0,
        found_cols: shape.1,
    })?;
    Frame::new(row_keys, col_keys, values)
}

/// Reads a plain, `.gz` or `.tar.gz` table. For archives the first regular
/// file is used.
pub fn read_path<P: AsRef<Path>>(path: P) -> Result<Frame<String, String>> {
    let path = path.as_ref();
    let name = path.to_string_lossy();
    debug!("reading {}", path.display());

    if name.ends_with(".tar.gz") {
        let mut archive = Archive::new(GzDecoder::new(File::open(path)?));
        for entry in archive.entries()? {
            let entry = entry?;
            if entry.header().entry_type().is_file() {
                return read_tsv(entry);
            }
        }
        Err(Error::EmptyArchive(path.to_path_buf()))
    } else if name.ends_with(".gz") {
        read_tsv(MultiGzDecoder::new(File::open(path)?))
    } else {
        read_tsv(File::open(path)?)
    }
}

pub fn write_tsv<R, C, W>(frame: &Frame<R, C>, writer: W) -> Result<()>
where
    R: Clone + Eq + Hash + Debug + Display,
    C: Clone + Eq + Hash + Debug + Display,
    W: Write,
{
    let mut wtr = WriterBuilder::new().delimiter(b'\t').from_writer(writer);

    let header: Vec<String> = frame.col_keys().iter().map(ToString::to_string).collect();
    wtr.write_record(std::iter::once("").chain(header.iter().map(String::as_str)))?;

    let values = frame.values();
    for (i, row_id) in frame.row_keys().iter().enumerate() {
        let row_vals: Vec<String> = values.row(i).iter().map(|&r| r.to_string()).collect();
        let row_id = row_id.to_string();
        wtr.write_record(std::iter::once(row_id.as_str()).chain(row_vals.iter().map(String::as_str)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `frame` as a single TSV entry named `entry_name` inside a gzipped
/// tar archive at `path`.
pub fn write_tar_gz<R, C, P>(frame: &Frame<R, C>, path: P, entry_name: &str) -> Result<()>
where
    R: Clone + Eq + Hash + Debug + Display,
    C: Clone + Eq + Hash + Debug + Display,
    P: AsRef<Path>,
{
    let mut csv_buf = Vec::<u8>::new();
    write_tsv(frame, &mut csv_buf)?;

    let enc = GzEncoder::new(File::create(path.as_ref())?, Compression::default());
    let mut tar_builder = Builder::new(enc);

    let mut header = Header::new_gnu();
    header.set_size(csv_buf.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();

    tar_builder.append_data(&mut header, entry_name, &mut Cursor::new(csv_buf))?;
    tar_builder.into_inner()?.finish()?;
    debug!("wrote {} to {}", entry_name, path.as_ref().display());
    Ok(())
}
