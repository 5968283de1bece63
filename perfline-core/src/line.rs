//! Line-protocol assembly.
//!
//! One line per metric point:
//! `measurement,tag=value,... field=value,... timestamp`. The serializer owns
//! the escaping policy: the delimiters `,`, ` ` and `=` are backslash-escaped
//! in tag keys, tag values, field keys and text field values, so no input can
//! shift the boundaries of the rendered line.

use crate::field::FieldValue;

/// Escape the line-protocol delimiters in a tag key, tag value or field key.
pub fn escape_component(s: &str) -> String {
    s.replace(',', "\\,").replace('=', "\\=").replace(' ', "\\ ")
}

/// Escape a measurement name. `=` is not a delimiter in measurement position.
pub fn escape_measurement(s: &str) -> String {
    s.replace(',', "\\,").replace(' ', "\\ ")
}

/// Builder for a single line.
///
/// Tags and fields are emitted in insertion order. An empty field set renders
/// as an empty middle segment and a missing timestamp as an empty final token;
/// the ingest backend then stamps the point at submission time.
#[derive(Debug, Clone)]
pub struct LineBuilder {
    measurement: String,
    tags: Vec<(String, String)>,
    fields: Vec<(String, FieldValue)>,
    timestamp: Option<String>,
}

impl LineBuilder {
    pub fn new(measurement: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
            tags: Vec::new(),
            fields: Vec::new(),
            timestamp: None,
        }
    }

    /// Append a tag.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }

    /// Append a field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Set the point timestamp, passed through verbatim.
    pub fn timestamp(mut self, ts: impl Into<String>) -> Self {
        self.timestamp = Some(ts.into());
        self
    }

    /// Render the line. Pure: repeated calls yield identical strings.
    pub fn build(&self) -> String {
        let mut line = escape_measurement(&self.measurement);
        for (key, value) in &self.tags {
            line.push(',');
            line.push_str(&escape_component(key));
            line.push('=');
            line.push_str(&escape_component(value));
        }
        line.push(' ');
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            line.push_str(&escape_component(key));
            line.push('=');
            value.write_to(&mut line);
        }
        line.push(' ');
        if let Some(ref ts) = self.timestamp {
            line.push_str(ts);
        }
        line
    }
}
