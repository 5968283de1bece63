use perfline_core::Metric;

/// Accumulates rendered metric lines into a submission body.
///
/// Ingest endpoints accept a newline-separated batch of lines as the request
/// body; assembling that body is all this type does. Transport lives with the
/// caller.
#[derive(Debug, Default, Clone)]
pub struct Payload {
    lines: Vec<String>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render and append one metric.
    pub fn push(&mut self, metric: &Metric) {
        self.lines.push(metric.to_line());
    }

    /// Append an already-rendered line.
    pub fn push_line(&mut self, line: String) {
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Newline-terminated body text, one line per metric, in push order.
    pub fn body(&self) -> String {
        let mut body = String::new();
        for line in &self.lines {
            body.push_str(line);
            body.push('\n');
        }
        body
    }
}
