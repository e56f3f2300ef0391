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

//! Timestamp reformatting for marker names and descriptions.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Display format for recognized timestamps.
const DISPLAY: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Datetime shapes accepted besides RFC 3339: a `T` or space separator,
/// seconds optional, fractional seconds tolerated.
const NAIVE_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Reformat an ISO-8601 timestamp as `"YYYY-MM-DD HH:MM:SS UTC"`.
///
/// Accepts RFC 3339 (a trailing `Z` reads as UTC offset), offset-less
/// datetimes, and bare dates (taken as midnight). Anything unparseable is
/// returned unchanged.
///
/// The clock time is displayed exactly as parsed: an explicit offset is not
/// converted to UTC before formatting, so `10:00:00+05:00` still displays as
/// `10:00:00 UTC`.
pub(crate) fn reformat(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format(DISPLAY).to_string();
    }

    for pattern in NAIVE_PATTERNS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, pattern) {
            return parsed.format(DISPLAY).to_string();
        }
    }

    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = parsed.and_hms_opt(0, 0, 0) {
            return midnight.format(DISPLAY).to_string();
        }
    }

    raw.to_string()
}
