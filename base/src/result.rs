pub type DocverError = anyhow::Error;

pub use anyhow::anyhow as err;
pub use anyhow::{Context, bail};
use std::fmt::{Debug, Display, Formatter};

pub type DocverResult<T> = Result<T, DocverError>;

/// Carries a rendered-later miette diagnostic through an anyhow error chain
pub struct MietteReportError {
    report: miette::Report,
}

impl MietteReportError {
    pub fn report(&self) -> &miette::Report {
        &self.report
    }
}

impl From<miette::Report> for MietteReportError {
    fn from(report: miette::Report) -> Self {
        Self { report }
    }
}

impl Debug for MietteReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.report, f)
    }
}

impl Display for MietteReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.report, f)
    }
}

impl std::error::Error for MietteReportError {}

/// Error context that is printed as a trailing "Help:" line
#[derive(Debug)]
pub struct HelpError {
    pub help_message: String,
}

impl HelpError {
    pub fn new(help_message: impl Into<String>) -> Self {
        Self {
            help_message: help_message.into(),
        }
    }
}

impl Display for HelpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.help_message)
    }
}

impl std::error::Error for HelpError {}
