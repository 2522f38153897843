//! UI automation driver seam.
//!
//! This module defines the [`UiDriver`] and [`ElementHandle`] traits, the
//! capabilities this crate needs from an external UI automation backend
//! (an Appium/UiAutomator2 session, a WebdriverIO bridge, an in-process mock).
//! The page object only ever talks to these traits, so any backend that can
//! resolve a selector string to an element can drive it.
//!
//! Selector strings are opaque here. Both accessibility-id shorthand
//! (`~plus`) and structured queries
//! (`android=new UiSelector().resourceId("...")`) are passed to the backend
//! untouched.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use calcpage_core::driver::UiDriver;
//!
//! async fn tap_seven(driver: &dyn UiDriver) -> Result<(), calcpage_core::driver::DriverError> {
//!     let element = driver.resolve("~7").await?;
//!     element.wait_for_displayed(Duration::from_millis(5000)).await?;
//!     element.click().await
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a UI automation backend.
///
/// This enum unifies errors from all backends behind a single type so the
/// locator and retry logic can treat them uniformly.
#[derive(Error, Debug)]
pub enum DriverError {
    /// No element matches the selector.
    #[error("No element matches selector '{selector}'")]
    NoSuchElement {
        /// The selector that was resolved.
        selector: String,
    },

    /// The element exists but is not displayed.
    #[error("Element is not displayed")]
    NotDisplayed,

    /// Waiting for the element timed out.
    #[error("Timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// A command or operation failed with the given message.
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// The backend is not available or not connected.
    #[error("Not connected to automation backend")]
    NotConnected,

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A resolved on-screen element.
///
/// Handles are created by [`UiDriver::resolve`] and live only for the
/// duration of one page operation.
#[async_trait]
pub trait ElementHandle: Send + Sync {
    /// Whether the element is currently displayed.
    async fn is_displayed(&self) -> Result<bool, DriverError>;

    /// Wait until the element is displayed.
    ///
    /// Backends return [`DriverError::Timeout`] (or another error) if the
    /// element does not become visible within `timeout`.
    async fn wait_for_displayed(&self, timeout: Duration) -> Result<(), DriverError>;

    /// Click the element.
    async fn click(&self) -> Result<(), DriverError>;

    /// Read the element's visible text.
    async fn text(&self) -> Result<String, DriverError>;
}

/// Trait for backend-agnostic element resolution.
///
/// Implementors map a selector string to an [`ElementHandle`]. Resolution
/// failures are reported as errors; the locator decides whether they are
/// fatal.
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Resolve a selector to an element.
    ///
    /// # Arguments
    ///
    /// * `selector` - The backend-specific selector string
    async fn resolve(&self, selector: &str) -> Result<Box<dyn ElementHandle>, DriverError>;
}
