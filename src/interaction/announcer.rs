use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Politeness {
    Polite,
    Assertive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Error,
}

/// Screen-reader live region fed by the keyboard state machine.
///
/// `generation` increments on every announcement so hosts can re-announce
/// identical text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveRegion {
    text: String,
    politeness: Politeness,
    severity: Severity,
    generation: u64,
}

impl Default for LiveRegion {
    fn default() -> Self {
        Self {
            text: String::new(),
            politeness: Politeness::Assertive,
            severity: Severity::Info,
            generation: 0,
        }
    }
}

impl LiveRegion {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn politeness(&self) -> Politeness {
        self.politeness
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn announce(&mut self, text: impl Into<String>, severity: Severity) {
        self.text = text.into();
        self.severity = severity;
        self.politeness = Politeness::Assertive;
        self.generation += 1;
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.announce(text, Severity::Info);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.announce(text, Severity::Error);
    }
}
