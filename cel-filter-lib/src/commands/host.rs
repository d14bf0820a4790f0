use std::io::Write;

/// Output streams and process exit, as seen by a command
///
/// Commands never touch stdout, stderr or `process::exit` directly, so a test can hand them a
/// host that buffers output and remembers the exit code.
pub trait Host: Send + Sync {
    /// Report and result stream
    fn output(&mut self) -> impl Write;

    /// Diagnostic stream
    fn error(&mut self) -> impl Write;

    /// Stop with `code`; a test host only records it.
    fn exit(&mut self, code: i32);
}

/// Buffers both streams and records the exit code
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
}

#[cfg(test)]
impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
