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

//! Library for converting JSON location logs to
//! [KML](https://developers.google.com/kml).
//!
//! It reads an array of recorded location points and renders one KML
//! document containing the whole track as a path plus one descriptive
//! marker per point.
//!
//! See [`convert`] for information on how to use this library.

mod error;
mod point;
mod time;

use std::fs;
use std::io;
use std::path::Path;

use log::warn;
use serde_json::error::Category;
use serde_json::Value;

pub use crate::error::{Error, PointError};

/// Document preamble up to and including the path's opening `<coordinates>`
/// tag: XML declaration, document metadata, the one static line style, and
/// the opening of the track placemark.
const DOCUMENT_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>轨迹数据</name>
    <description>从JSON转换的地理轨迹</description>
    <Style id="pathStyle">
      <LineStyle>
        <color>ff0000ff</color>
        <width>3</width>
      </LineStyle>
    </Style>
    <Placemark>
      <name>轨迹</name>
      <description>记录的路线</description>
      <styleUrl>#pathStyle</styleUrl>
      <LineString>
        <extrude>true</extrude>
        <tessellate>true</tessellate>
        <altitudeMode>relativeToGround</altitudeMode>
        <coordinates>
"#;

/// Closes the coordinate list, the `LineString`, and the track placemark.
const PATH_CLOSE: &str = r#"
        </coordinates>
      </LineString>
    </Placemark>
"#;

/// Opens the folder holding the per-point markers.
const FOLDER_OPEN: &str = r#"
    <Folder>
      <name>地点标记</name>
"#;

/// Closes the marker folder.
const FOLDER_CLOSE: &str = r#"
    </Folder>
"#;

/// Closes the document.
const DOCUMENT_CLOSE: &str = r#"
  </Document>
</kml>
"#;

/// Totals for one conversion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Records that contributed a coordinate triple and a marker.
    pub rendered: usize,
    /// Records dropped after a per-record error.
    pub skipped: usize,
}

/// Read a JSON location log and write a KML file.
///
/// The file at `input` must hold a JSON array of location records. The
/// assembled document is written to `output` in a single operation, so
/// nothing is created there unless the input was read successfully. Records
/// that cannot be rendered are skipped with a warning and counted in the
/// returned [`Summary`]; the relative order of the remaining records is
/// preserved.
///
/// # Example
/// ```
/// use json2kml::convert;
///
/// let output = std::env::temp_dir().join("json2kml-doc-example.kml");
/// let summary = convert("tests/fixtures/track.json", &output).expect("conversion failed");
/// assert_eq!(summary.rendered, 3);
///
/// let kml = std::fs::read_to_string(&output).expect("KML data is not valid UTF-8");
/// assert!(kml.contains("<kml"));
/// assert!(kml.contains("116.3974"));
/// # std::fs::remove_file(output).unwrap();
/// ```
pub fn convert(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Summary, Error> {
    let output = output.as_ref();

    let records = load(input.as_ref())?;
    let (document, summary) = render(&records);

    fs::write(output, document).map_err(|source| Error::Write {
        path: output.to_path_buf(),
        source,
    })?;

    Ok(summary)
}

/// Read `path` and parse its content as a JSON array of records.
fn load(path: &Path) -> Result<Vec<Value>, Error> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => Error::FileNotReadable {
            path: path.to_path_buf(),
            source,
        },
        _ => Error::UnknownRead {
            path: path.to_path_buf(),
            reason: source.to_string(),
        },
    })?;

    serde_json::from_str(&text).map_err(|source| match source.classify() {
        Category::Syntax | Category::Eof => Error::InvalidJson {
            path: path.to_path_buf(),
            source,
        },
        _ => Error::UnknownRead {
            path: path.to_path_buf(),
            reason: source.to_string(),
        },
    })
}

/// Render the document for a parsed track.
///
/// Folds over the records in input order: every success appends one
/// coordinate triple and one marker, every failure logs a warning with the
/// offending record and contributes nothing.
fn render(records: &[Value]) -> (String, Summary) {
    let mut coordinates = Vec::new();
    let mut markers = String::new();
    let mut summary = Summary::default();

    for record in records {
        match point::render(record) {
            Ok(fragments) => {
                coordinates.push(fragments.coordinate);
                markers.push_str(&fragments.marker);
                summary.rendered += 1;
            }
            Err(reason) => {
                warn!("skipping record: {reason}; record: {record}");
                summary.skipped += 1;
            }
        }
    }

    let coordinates = coordinates.join("\n");
    let document = [
        DOCUMENT_HEAD,
        coordinates.as_str(),
        PATH_CLOSE,
        FOLDER_OPEN,
        markers.as_str(),
        FOLDER_CLOSE,
        DOCUMENT_CLOSE,
    ]
    .concat();

    (document, summary)
}
