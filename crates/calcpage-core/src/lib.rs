//! # calcpage-core
//!
//! Page object for driving a mobile calculator app in end-to-end tests.
//!
//! This crate locates on-screen buttons through ranked fallback selector
//! chains and clicks them with bounded retry and exponential backoff. It does
//! not talk to a device itself: callers plug in any backend that implements
//! [`driver::UiDriver`].
//!
//! ## Modules
//!
//! - [`driver`] - The [`UiDriver`](driver::UiDriver) / [`ElementHandle`](driver::ElementHandle) seam to the automation backend
//! - [`locator`] - Selector chains and first-visible-match lookup
//! - [`retry`] - Exponential-backoff retry policy and runner
//! - [`interaction`] - Wait-then-click with nested retry
//! - [`page`] - The [`CalculatorPage`](page::CalculatorPage) operations
//! - [`config`] - Selector chains, timeouts and retry policy from `~/.calcpage/config.json`
//! - [`error`] - Errors surfaced by page operations
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use calcpage_core::config::PageConfig;
//! use calcpage_core::driver::UiDriver;
//! use calcpage_core::page::CalculatorPage;
//!
//! async fn run(driver: Arc<dyn UiDriver>) -> Result<(), calcpage_core::error::PageError> {
//!     let page = CalculatorPage::with_config(driver, PageConfig::load());
//!     page.click_number('7').await?;
//!     page.click_plus().await?;
//!     page.click_number('5').await?;
//!     page.click_equals().await?;
//!     println!("7 + 5 = {}", page.read_result().await?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod interaction;
pub mod locator;
pub mod page;
pub mod retry;
