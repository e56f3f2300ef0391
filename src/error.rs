// Copyright 2026 The json2kml Authors
//
// This file is part of json2kml.
//
// json2kml is free software: you can redistribute it and/or modify it under
// the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// json2kml is distributed in the hope that it will be useful, but WITHOUT ANY
// WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for
// more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with json2kml. If not, see <https://www.gnu.org/licenses/>.

//! Error types for the converter.

use std::io;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// Error returned from the [`convert`](crate::convert) function.
///
/// Every variant is terminal for the run. When reading the input fails, no
/// output file has been created yet.
#[derive(Error, Debug)]
pub enum Error {
    /// The input file does not exist or could not be opened.
    #[error("cannot read `{}`: {source}", .path.display())]
    FileNotReadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The input file is not well-formed JSON.
    #[error("`{}` is not valid JSON: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Catch-all for read failures that are neither a missing file nor
    /// malformed JSON, e.g. non-UTF-8 content or a top level that is not an
    /// array of records.
    #[error("reading `{}` failed: {reason}", .path.display())]
    UnknownRead { path: PathBuf, reason: String },
    /// Writing the assembled document failed.
    #[error("writing `{}` failed: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reason a single record was dropped from the output.
///
/// Unlike [`Error`], this never aborts the run: the record is skipped with a
/// warning and processing continues with the next one.
#[derive(Error, Debug)]
pub enum PointError {
    /// The array element is not a JSON object.
    #[error("record is not a JSON object")]
    NotAnObject,
    /// `time` held a non-string value with content; blank values (`null`,
    /// zero, `false`, empty containers) read as unset instead.
    #[error("`time` is not a string: {0}")]
    TimeNotAString(Value),
}
