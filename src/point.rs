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

//! Per-record field extraction and rendering.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::error::PointError;
use crate::time;

/// Fallback applied when a record omits a key entirely.
///
/// `lon` and `lat` have no fallback: the raw lookup result is rendered
/// as-is, so an absent coordinate shows up as `null` in the output. `time`
/// is also bare here; [`timestamp`] substitutes `N/A` for a missing value.
const FIELD_DEFAULTS: &[(&str, Option<&str>)] = &[
    ("lon", None),
    ("lat", None),
    ("elevation", Some("0.0")),
    ("time", None),
    ("annotation", Some("无备注")),
    ("speed", Some("N/A")),
    ("battery", Some("N/A")),
    ("accuracy", Some("N/A")),
    ("satellites", Some("N/A")),
    ("provider", Some("N/A")),
];

/// One record rendered to its two output fragments.
#[derive(Debug)]
pub(crate) struct Fragments {
    /// `lon,lat,elevation` line for the path's coordinate list.
    pub coordinate: String,
    /// Complete `<Placemark>` block for the marker folder.
    pub marker: String,
}

/// Render one element of the input array.
///
/// Success contributes exactly one coordinate triple and one marker; failure
/// contributes neither, so callers can skip the record and continue.
pub(crate) fn render(record: &Value) -> Result<Fragments, PointError> {
    let record = record.as_object().ok_or(PointError::NotAnObject)?;

    let lon = field(record, "lon");
    let lat = field(record, "lat");
    // Present-but-empty elevation counts as absent.
    let elevation = match record.get("elevation") {
        Some(Value::String(s)) if s.is_empty() => Cow::Borrowed("0.0"),
        _ => field(record, "elevation"),
    };
    let coordinate = format!("{lon},{lat},{elevation}");

    let time = timestamp(record)?;
    let annotation = field(record, "annotation");
    let speed = field(record, "speed");
    let battery = field(record, "battery");
    let accuracy = field(record, "accuracy");
    let satellites = field(record, "satellites");
    let provider = field(record, "provider");

    let marker = format!(
        r#"
      <Placemark>
        <name>时间: {time}</name>
        <description><![CDATA[
          <b>经度:</b> {lon}<br/>
          <b>纬度:</b> {lat}<br/>
          <b>海拔:</b> {elevation} 米<br/>
          <b>速度:</b> {speed} 米/秒<br/>
          <b>精度:</b> {accuracy} 米<br/>
          <b>卫星数量:</b> {satellites}<br/>
          <b>提供者:</b> {provider}<br/>
          <b>电量:</b> {battery}%<br/>
          <b>备注:</b> {annotation}
        ]]></description>
        <Point>
          <coordinates>{coordinate}</coordinates>
        </Point>
      </Placemark>
"#
    );

    Ok(Fragments { coordinate, marker })
}

/// Look up `key` in `record`, falling back to the default table when absent.
fn field<'a>(record: &'a Map<String, Value>, key: &str) -> Cow<'a, str> {
    match record.get(key) {
        Some(value) => raw(value),
        None => Cow::Borrowed(fallback(key).unwrap_or("null")),
    }
}

/// Fallback for `key` from [`FIELD_DEFAULTS`].
fn fallback(key: &str) -> Option<&'static str> {
    FIELD_DEFAULTS
        .iter()
        .find(|(name, _)| *name == key)
        .and_then(|(_, default)| *default)
}

/// Render a JSON value the way it appears in the document: strings bare
/// (unquoted), everything else in its JSON spelling.
fn raw(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Display timestamp for a record: `N/A` when `time` is absent or blank,
/// otherwise the reformatted (or verbatim) string.
fn timestamp(record: &Map<String, Value>) -> Result<String, PointError> {
    match record.get("time") {
        None => Ok("N/A".to_string()),
        Some(value) if blank(value) => Ok("N/A".to_string()),
        Some(Value::String(s)) => Ok(time::reformat(s)),
        Some(other) => Err(PointError::TimeNotAString(other.clone())),
    }
}

/// A blank `time` counts as never recorded: `null`, the empty string, zero,
/// `false`, and empty arrays or objects all display as `N/A` and keep the
/// record. Only a non-string with content fails it.
fn blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_full_record() {
        let fragments = render(&json!({
            "lon": 116.3974,
            "lat": 39.9093,
            "elevation": "44.2",
            "time": "2024-01-01T10:00:00Z",
            "annotation": "east gate",
            "speed": 1.8,
            "battery": 87,
            "accuracy": 4.0,
            "satellites": 11,
            "provider": "gps",
        }))
        .unwrap();

        assert_eq!(fragments.coordinate, "116.3974,39.9093,44.2");
        assert!(fragments.marker.contains("<name>时间: 2024-01-01 10:00:00 UTC</name>"));
        assert!(fragments.marker.contains("<![CDATA["));
        assert!(fragments.marker.contains("]]></description>"));
        assert!(fragments.marker.contains("<b>经度:</b> 116.3974<br/>"));
        assert!(fragments.marker.contains("<b>纬度:</b> 39.9093<br/>"));
        assert!(fragments.marker.contains("<b>海拔:</b> 44.2 米<br/>"));
        assert!(fragments.marker.contains("<b>速度:</b> 1.8 米/秒<br/>"));
        assert!(fragments.marker.contains("<b>精度:</b> 4.0 米<br/>"));
        assert!(fragments.marker.contains("<b>卫星数量:</b> 11<br/>"));
        assert!(fragments.marker.contains("<b>提供者:</b> gps<br/>"));
        assert!(fragments.marker.contains("<b>电量:</b> 87%<br/>"));
        assert!(fragments.marker.contains("<b>备注:</b> east gate"));
        assert!(fragments.marker.contains("<coordinates>116.3974,39.9093,44.2</coordinates>"));
    }

    #[test]
    fn test_empty_record_uses_defaults() {
        let fragments = render(&json!({})).unwrap();

        assert_eq!(fragments.coordinate, "null,null,0.0");
        assert!(fragments.marker.contains("<name>时间: N/A</name>"));
        assert!(fragments.marker.contains("<b>备注:</b> 无备注"));
        assert!(fragments.marker.contains("<b>速度:</b> N/A 米/秒<br/>"));
        assert!(fragments.marker.contains("<b>电量:</b> N/A%<br/>"));
        assert!(fragments.marker.contains("<b>提供者:</b> N/A<br/>"));
    }

    #[test]
    fn test_elevation_fallbacks() {
        let absent = render(&json!({"lon": 1, "lat": 2})).unwrap();
        assert_eq!(absent.coordinate, "1,2,0.0");

        let empty = render(&json!({"lon": 1, "lat": 2, "elevation": ""})).unwrap();
        assert_eq!(empty.coordinate, "1,2,0.0");

        let string = render(&json!({"lon": 1, "lat": 2, "elevation": "12.5"})).unwrap();
        assert_eq!(string.coordinate, "1,2,12.5");

        let number = render(&json!({"lon": 1, "lat": 2, "elevation": 12.5})).unwrap();
        assert_eq!(number.coordinate, "1,2,12.5");

        // Only the empty string is coerced; null passes through raw.
        let null = render(&json!({"lon": 1, "lat": 2, "elevation": null})).unwrap();
        assert_eq!(null.coordinate, "1,2,null");
    }

    #[test]
    fn test_time_fallbacks() {
        let absent = render(&json!({})).unwrap();
        assert!(absent.marker.contains("<name>时间: N/A</name>"));

        let null = render(&json!({"time": null})).unwrap();
        assert!(null.marker.contains("<name>时间: N/A</name>"));

        let empty = render(&json!({"time": ""})).unwrap();
        assert!(empty.marker.contains("<name>时间: N/A</name>"));

        let garbage = render(&json!({"time": "not-a-date"})).unwrap();
        assert!(garbage.marker.contains("<name>时间: not-a-date</name>"));
    }

    #[test]
    fn test_blank_time_values_read_as_unset() {
        for time in [json!(0), json!(0.0), json!(false), json!([]), json!({})] {
            let fragments = render(&json!({"lon": 1, "lat": 2, "time": time})).unwrap();
            assert_eq!(fragments.coordinate, "1,2,0.0");
            assert!(fragments.marker.contains("<name>时间: N/A</name>"));
        }
    }

    #[test]
    fn test_non_string_time_with_content_fails_the_record() {
        let err = render(&json!({"lon": 1, "lat": 2, "time": 1704103200})).unwrap_err();
        assert!(matches!(err, PointError::TimeNotAString(_)));
        assert!(err.to_string().contains("1704103200"));

        for time in [json!(true), json!(0.5), json!([1, 2]), json!({"unix": 1})] {
            let err = render(&json!({"time": time})).unwrap_err();
            assert!(matches!(err, PointError::TimeNotAString(_)));
        }
    }

    #[test]
    fn test_non_object_fails_the_record() {
        for element in [json!("just a string"), json!(42), json!([1.0, 2.0]), json!(null)] {
            let err = render(&element).unwrap_err();
            assert!(matches!(err, PointError::NotAnObject));
        }
    }

    #[test]
    fn test_raw_rendering() {
        assert_eq!(raw(&json!("plain")), "plain");
        assert_eq!(raw(&json!(12.5)), "12.5");
        assert_eq!(raw(&json!(7)), "7");
        assert_eq!(raw(&json!(true)), "true");
        assert_eq!(raw(&json!(null)), "null");
        assert_eq!(raw(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_default_table() {
        assert_eq!(fallback("lon"), None);
        assert_eq!(fallback("lat"), None);
        assert_eq!(fallback("elevation"), Some("0.0"));
        assert_eq!(fallback("time"), None);
        assert_eq!(fallback("annotation"), Some("无备注"));
        for key in ["speed", "battery", "accuracy", "satellites", "provider"] {
            assert_eq!(fallback(key), Some("N/A"));
        }
        assert_eq!(fallback("unknown"), None);
    }
}
