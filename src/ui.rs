//! Progress and diagnostics surface.
//!
//! The loader reports through the `Ui` trait so the binary can print to the
//! console while tests run silently.

/// Phases shown while a command runs
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Parsing,
    Loading,
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parsing => write!(f, "Parsing dataset"),
            Phase::Loading => write!(f, "Loading recipes"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn log(&mut self, message: impl Into<String>);
    fn warn(&mut self, message: impl Into<String>);
}

/// Console implementation used by the binary
#[derive(Default)]
pub struct ConsoleUi;

impl ConsoleUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for ConsoleUi {
    fn set_phase(&mut self, phase: Phase) {
        println!("{}...", phase);
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        println!("  [{}/{}] {}", current, total, label.into());
    }

    fn log(&mut self, message: impl Into<String>) {
        println!("{}", message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        eprintln!("{}", message.into());
    }
}

/// Silent implementation for testing and non-interactive use
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn log(&mut self, _message: impl Into<String>) {}
    fn warn(&mut self, _message: impl Into<String>) {}
}
