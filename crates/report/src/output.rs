use std::io::Write;

use bytes::Bytes;

/// Append-only capture of one execution's stdout and stderr.
///
/// The executor writes chunks as they arrive, each stream separately. Once
/// the process is done, the buffer is frozen into an immutable
/// [`RunOutput`]. No size limit is imposed here; truncation belongs to the
/// capture side.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_stdout(&mut self, chunk: &[u8]) {
        self.stdout.extend_from_slice(chunk);
    }

    pub fn append_stderr(&mut self, chunk: &[u8]) {
        self.stderr.extend_from_slice(chunk);
    }

    /// Finish capturing. From here on the streams can only be replayed.
    #[must_use]
    pub fn freeze(self) -> RunOutput {
        RunOutput {
            stdout: Bytes::from(self.stdout),
            stderr: Bytes::from(self.stderr),
        }
    }
}

/// Immutable captured streams. Every read starts at offset zero, so
/// draining into a sink is repeatable and needs no cursor state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOutput {
    stdout: Bytes,
    stderr: Bytes,
}

impl RunOutput {
    pub fn new(stdout: impl Into<Bytes>, stderr: impl Into<Bytes>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }

    /// Captured stdout as text. Invalid UTF-8 is replaced, not rejected.
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Captured stderr as text. Invalid UTF-8 is replaced, not rejected.
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Drain both streams into `sink`: stdout first, then stderr, verbatim.
    pub fn copy_to<W: Write + ?Sized>(&self, sink: &mut W) -> std::io::Result<()> {
        sink.write_all(&self.stdout)?;
        sink.write_all(&self.stderr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_keep_per_stream_order() {
        let mut buffer = OutputBuffer::new();
        buffer.append_stdout(b"one ");
        buffer.append_stderr(b"warn ");
        buffer.append_stdout(b"two");
        buffer.append_stderr(b"more");

        let output = buffer.freeze();
        assert_eq!(output.stdout(), b"one two");
        assert_eq!(output.stderr(), b"warn more");
    }

    #[test]
    fn copy_to_writes_stdout_then_stderr() {
        let output = RunOutput::new("out\n".as_bytes().to_vec(), "err\n".as_bytes().to_vec());
        let mut sink = Vec::new();
        output.copy_to(&mut sink).unwrap();
        assert_eq!(sink, b"out\nerr\n");
    }

    #[test]
    fn copy_to_is_repeatable() {
        let output = RunOutput::new(b"alpha".to_vec(), b"beta".to_vec());
        let mut first = Vec::new();
        let mut second = Vec::new();
        output.copy_to(&mut first).unwrap();
        output.copy_to(&mut second).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, b"alphabeta");
    }

    #[test]
    fn copy_to_preserves_raw_bytes() {
        let output = RunOutput::new(vec![0xffu8, 0xfe, 0x00], vec![0x01u8]);
        let mut sink = Vec::new();
        output.copy_to(&mut sink).unwrap();
        assert_eq!(sink, vec![0xff, 0xfe, 0x00, 0x01]);
    }

    #[test]
    fn lossy_text_replaces_invalid_utf8() {
        let output = RunOutput::new(vec![b'h', b'i', 0xff], Vec::<u8>::new());
        assert_eq!(output.stdout_lossy(), "hi\u{fffd}");
        assert_eq!(output.stderr_lossy(), "");
    }

    #[test]
    fn empty_capture_freezes_to_empty_streams() {
        let output = OutputBuffer::new().freeze();
        assert!(output.stdout().is_empty());
        assert!(output.stderr().is_empty());
    }
}
