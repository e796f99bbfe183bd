use std::io::{self, Write};

/// Destination for engine output.
///
/// One line per call, flushed immediately; nothing is buffered across
/// turns. A write failure is fatal to the run.
pub trait Sink {
    /// Writes one command line to the primary stream.
    fn command(&mut self, line: &str) -> io::Result<()>;
    /// Writes one diagnostic line to the secondary stream.
    fn diagnostic(&mut self, line: &str) -> io::Result<()>;
}

/// [`Sink`] over two byte streams: stdout/stderr in production, recording
/// buffers in tests.
pub struct StreamSink<W, E> {
    out: W,
    err: E,
}

impl<W: Write, E: Write> StreamSink<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }
}

impl<W: Write, E: Write> Sink for StreamSink<W, E> {
    fn command(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }

    fn diagnostic(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.err, "{}", line)?;
        self.err.flush()
    }
}
