use perfline_core::{Metric, PerflineError};
use std::io::Write;
use tracing::debug;

/// A sink for rendered metrics.
///
/// Implementations decide where lines go. The crate ships an [`io::Write`]
/// adapter; network submission lives with the caller.
///
/// [`io::Write`]: std::io::Write
pub trait Report {
    type Error;

    /// Report a single metric.
    fn report(&mut self, metric: &Metric) -> Result<(), Self::Error>;
}

/// Writes each reported metric as one line-protocol line.
pub struct WriteReport<W: Write> {
    writer: W,
}

impl<W: Write> WriteReport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink and hand back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Report for WriteReport<W> {
    type Error = PerflineError;

    fn report(&mut self, metric: &Metric) -> Result<(), Self::Error> {
        let line = metric.to_line();
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        debug!(benchmark = metric.benchmark(), "reported metric line");
        Ok(())
    }
}
