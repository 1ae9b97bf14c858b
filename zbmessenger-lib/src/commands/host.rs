use std::io::{Read, Write};

/// Abstract the host environment to enable testing
pub trait Host: Send + Sync {
    // where reports are read from when no input file is given (e.g., stdin)
    fn input(&mut self) -> impl Read;

    // where to send normal output (e.g., stdout)
    fn output(&mut self) -> impl Write;

    // where to send error output (e.g., stderr)
    fn error(&mut self) -> impl Write;

    /// Terminate the process (although in a test environment this might just set a flag and return).
    fn exit(&mut self, code: i32);
}

/// Test host that feeds input from and captures output to in-memory buffers
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestHost {
    pub input_buf: Vec<u8>,
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
}

#[cfg(test)]
impl TestHost {
    pub fn with_input(input: &str) -> Self {
        Self {
            input_buf: input.as_bytes().to_vec(),
            ..Self::default()
        }
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
    fn input(&mut self) -> impl Read {
        self.input_buf.as_slice()
    }

    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        // In tests, don't actually exit
        self.exit_code = Some(code);
    }
}
