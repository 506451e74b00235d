// src/exec/result.rs

/// Outcome of one executed command: exit code plus the captured text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    exit_code: i32,
    output: String,
}

impl ProcessResult {
    pub fn new(exit_code: i32, output: String) -> Self {
        Self { exit_code, output }
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn into_output(self) -> String {
        self.output
    }
}
