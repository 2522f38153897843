//! Calculator page object.
//!
//! [`CalculatorPage`] exposes the calculator's buttons and result label as
//! async operations over any [`UiDriver`]. Buttons are located through their
//! fallback selector chains and clicked with nested retry; the result label
//! is read directly with no fallback or retry.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use calcpage_core::driver::UiDriver;
//! use calcpage_core::page::CalculatorPage;
//!
//! async fn two_plus_three(driver: Arc<dyn UiDriver>) -> Result<(), calcpage_core::error::PageError> {
//!     let page = CalculatorPage::new(driver);
//!     let result = page.add("2", "3").await?;
//!     assert_eq!(result, "5");
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info_span, Instrument};

use crate::config::PageConfig;
use crate::driver::UiDriver;
use crate::error::PageError;
use crate::interaction::click_with_retry;
use crate::locator::{locate, SelectorChain};

/// Page object for the calculator screen.
///
/// Holds the driver and the selector configuration. Operations share no
/// mutable state, so a page can be reused across a whole test.
pub struct CalculatorPage {
    driver: Arc<dyn UiDriver>,
    config: PageConfig,
}

impl CalculatorPage {
    /// Creates a page with the default selector configuration.
    pub fn new(driver: Arc<dyn UiDriver>) -> Self {
        Self::with_config(driver, PageConfig::default())
    }

    /// Creates a page with an explicit configuration.
    pub fn with_config(driver: Arc<dyn UiDriver>, config: PageConfig) -> Self {
        Self { driver, config }
    }

    /// Returns a reference to the underlying driver.
    pub fn driver(&self) -> &Arc<dyn UiDriver> {
        &self.driver
    }

    /// Returns the selector configuration.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Clicks the button for `digit`.
    pub async fn click_number(&self, digit: char) -> Result<(), PageError> {
        if !digit.is_ascii_digit() {
            return Err(PageError::InvalidDigit(digit));
        }
        let chain = self.config.digit_chain(digit);
        instrumented("click_number", self.click_chain(&chain)).await
    }

    /// Clicks the plus button.
    pub async fn click_plus(&self) -> Result<(), PageError> {
        let chain = self.config.plus_chain();
        instrumented("click_plus", self.click_chain(&chain)).await
    }

    /// Clicks the equals button.
    pub async fn click_equals(&self) -> Result<(), PageError> {
        let chain = self.config.equals_chain();
        instrumented("click_equals", self.click_chain(&chain)).await
    }

    /// Reads the text of the result label.
    ///
    /// The label is resolved by its single configured selector; there is no
    /// fallback, visibility check, or retry.
    pub async fn read_result(&self) -> Result<String, PageError> {
        instrumented("read_result", async {
            let selector = &self.config.result_selector;
            let element = self
                .driver
                .resolve(selector)
                .await
                .map_err(|e| PageError::NotFound {
                    target: "result label".to_string(),
                    tried: 1,
                    last_error: Some(e),
                })?;
            element.text().await.map_err(|source| PageError::Interaction {
                target: "result label".to_string(),
                source,
            })
        })
        .await
    }

    /// Clicks each digit of `number` in order.
    ///
    /// The whole string is validated before the first click.
    pub async fn enter_number(&self, number: &str) -> Result<(), PageError> {
        if number.is_empty() {
            return Err(PageError::EmptyNumber);
        }
        if let Some(bad) = number.chars().find(|c| !c.is_ascii_digit()) {
            return Err(PageError::InvalidDigit(bad));
        }
        for digit in number.chars() {
            self.click_number(digit).await?;
        }
        Ok(())
    }

    /// Enters `a + b =` and returns the displayed result.
    pub async fn add(&self, a: &str, b: &str) -> Result<String, PageError> {
        self.enter_number(a).await?;
        self.click_plus().await?;
        self.enter_number(b).await?;
        self.click_equals().await?;
        self.read_result().await
    }

    async fn click_chain(&self, chain: &SelectorChain) -> Result<(), PageError> {
        let element = locate(self.driver.as_ref(), chain).await?;
        click_with_retry(
            element.as_ref(),
            chain.target(),
            self.config.wait_timeout(),
            &self.config.retry,
        )
        .await
    }
}

async fn instrumented<T, F>(action: &'static str, fut: F) -> Result<T, PageError>
where
    F: Future<Output = Result<T, PageError>>,
{
    let span = info_span!("page_action", action = action);
    async {
        let start = Instant::now();
        let result = fut.await;
        let elapsed = start.elapsed();
        debug!(elapsed_ms = elapsed.as_millis() as u64, success = result.is_ok(), "action complete");
        result
    }
    .instrument(span)
    .await
}
