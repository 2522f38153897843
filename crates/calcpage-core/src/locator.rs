//! Ranked fallback element lookup.
//!
//! UI identifiers drift across platform versions and locales, so each target
//! is described by a [`SelectorChain`]: selectors in order of preference. The
//! locator tries them one at a time and returns the first element that both
//! resolves and is displayed.

use tracing::debug;

use crate::driver::{DriverError, ElementHandle, UiDriver};
use crate::error::PageError;

/// Placeholder substituted by [`SelectorChain::from_templates`].
pub const DIGIT_PLACEHOLDER: &str = "{digit}";

/// An ordered list of selectors for one logical UI target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorChain {
    target: String,
    selectors: Vec<String>,
}

impl SelectorChain {
    /// Creates a chain for `target` from selectors in preference order.
    pub fn new<I, S>(target: impl Into<String>, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target: target.into(),
            selectors: selectors.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a chain by replacing `{digit}` in each template with `digit`.
    pub fn from_templates(target: impl Into<String>, templates: &[String], digit: char) -> Self {
        let digit = digit.to_string();
        Self::new(
            target,
            templates.iter().map(|t| t.replace(DIGIT_PLACEHOLDER, &digit)),
        )
    }

    /// Name of the target, used in errors and logs.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The selectors in the order they are tried.
    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    /// Number of selectors in the chain.
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// True if the chain has no selectors.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

/// Returns the first element in `chain` that resolves and is displayed.
///
/// A selector that fails to resolve, or whose visibility check fails, is
/// skipped and its error kept. When nothing matches, the error from the last
/// failing selector becomes the source of [`PageError::NotFound`]; if every
/// selector resolved but none was displayed, the error has no source.
pub async fn locate(
    driver: &dyn UiDriver,
    chain: &SelectorChain,
) -> Result<Box<dyn ElementHandle>, PageError> {
    let mut last_error: Option<DriverError> = None;

    for selector in chain.selectors() {
        match try_selector(driver, selector).await {
            Ok(Some(element)) => {
                debug!(target_name = chain.target(), selector = %selector, "selector matched");
                return Ok(element);
            }
            Ok(None) => {
                debug!(target_name = chain.target(), selector = %selector, "selector resolved but not displayed");
            }
            Err(e) => {
                debug!(target_name = chain.target(), selector = %selector, error = %e, "selector failed");
                last_error = Some(e);
            }
        }
    }

    Err(PageError::NotFound {
        target: chain.target().to_string(),
        tried: chain.len(),
        last_error,
    })
}

async fn try_selector(
    driver: &dyn UiDriver,
    selector: &str,
) -> Result<Option<Box<dyn ElementHandle>>, DriverError> {
    let element = driver.resolve(selector).await?;
    if element.is_displayed().await? {
        Ok(Some(element))
    } else {
        Ok(None)
    }
}
