use log::info;

/// Diagnostic lines emitted while an experiment is assembled, kept for the
/// configuration printout and forwarded to the log facade as they arrive.
#[derive(Debug, Clone, Default)]
pub struct BuildLog {
    lines: Vec<String>,
}

impl BuildLog {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn record(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.lines.push(message);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
