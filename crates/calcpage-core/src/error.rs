//! Errors surfaced by page operations.

use thiserror::Error;

use crate::driver::DriverError;

/// Errors returned by [`CalculatorPage`](crate::page::CalculatorPage) operations.
#[derive(Error, Debug)]
pub enum PageError {
    /// No selector in the chain matched a visible element.
    ///
    /// `last_error` holds the error from the last selector that failed to
    /// resolve, or `None` when every selector resolved but none was displayed.
    #[error("Could not locate {target} with any of {tried} selector(s){}", last_error_suffix(.last_error))]
    NotFound {
        /// Name of the UI target, e.g. `"plus button"`.
        target: String,
        /// How many selectors were tried.
        tried: usize,
        /// The most recent resolution failure, if any.
        #[source]
        last_error: Option<DriverError>,
    },

    /// The element was located but waiting, clicking, or reading it failed.
    #[error("Interaction with {target} failed: {source}")]
    Interaction {
        /// Name of the UI target.
        target: String,
        /// The driver error from the final attempt.
        source: DriverError,
    },

    /// A digit argument was not an ASCII digit.
    #[error("Invalid digit '{0}': expected 0-9")]
    InvalidDigit(char),

    /// A number argument was empty.
    #[error("Number must contain at least one digit")]
    EmptyNumber,
}

impl PageError {
    /// Returns the underlying driver error, if there is one.
    pub fn driver_error(&self) -> Option<&DriverError> {
        match self {
            PageError::NotFound { last_error, .. } => last_error.as_ref(),
            PageError::Interaction { source, .. } => Some(source),
            PageError::InvalidDigit(_) | PageError::EmptyNumber => None,
        }
    }
}

fn last_error_suffix(last_error: &Option<DriverError>) -> String {
    match last_error {
        Some(e) => format!(" (last error: {})", e),
        None => String::new(),
    }
}
