use crate::config::SourceInfo;
use crate::field::FieldValue;
use crate::line::LineBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default measurement name for benchmark publication lines.
pub const MEASUREMENT: &str = "perf";

/// A single benchmark observation, rendered as one line-protocol line.
///
/// Branch and commit timestamp come from a [`SourceInfo`] snapshot taken at
/// the call site. Once the builder chain is finished the instance is
/// immutable; rendering is a pure function of its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    measurement: String,
    benchmark: String,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    fields: Vec<(String, FieldValue)>,
    #[serde(default)]
    timestamp: Option<String>,
}

impl Metric {
    /// A metric under the default `perf` measurement.
    pub fn new(benchmark: impl Into<String>, source: &SourceInfo) -> Self {
        Self::with_measurement(MEASUREMENT, benchmark, source)
    }

    pub fn with_measurement(
        measurement: impl Into<String>,
        benchmark: impl Into<String>,
        source: &SourceInfo,
    ) -> Self {
        Self {
            measurement: measurement.into(),
            benchmark: benchmark.into(),
            branch: source.branch.clone(),
            fields: Vec::new(),
            timestamp: source.commit_timestamp.clone(),
        }
    }

    /// Append one field; insertion order is preserved in the rendered line.
    pub fn field(mut self, label: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push((label.into(), value.into()));
        self
    }

    /// Append many fields at once, preserving iteration order.
    pub fn fields<I, K>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: Into<String>,
    {
        for (label, value) in fields {
            self.fields.push((label.into(), value));
        }
        self
    }

    pub fn benchmark(&self) -> &str {
        &self.benchmark
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    pub fn field_values(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    /// Render the canonical line-protocol form:
    /// `perf,benchmark=<b>,branch=<branch> <l1>=<v1>,... <timestamp>`.
    ///
    /// The branch tag is always emitted, with an empty value when no branch
    /// was captured; a missing timestamp renders as an empty final token so
    /// the backend stamps the point at submission time.
    pub fn to_line(&self) -> String {
        let mut builder = LineBuilder::new(self.measurement.as_str())
            .tag("benchmark", self.benchmark.as_str())
            .tag("branch", self.branch.as_deref().unwrap_or(""));
        for (label, value) in &self.fields {
            builder = builder.field(label.as_str(), value.clone());
        }
        if let Some(ref ts) = self.timestamp {
            builder = builder.timestamp(ts.as_str());
        }
        builder.build()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}
