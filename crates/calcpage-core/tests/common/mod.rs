//! Shared test helpers for calcpage-core integration tests.
//!
//! This module provides a scripted in-memory [`UiDriver`] whose elements fail
//! or succeed on a per-call basis, so locator and retry behavior can be
//! exercised without a device.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use calcpage_core::driver::{DriverError, ElementHandle, UiDriver};

/// Install a test-friendly tracing subscriber (idempotent).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ---------------------------------------------------------------------------
// Per-call outcomes
// ---------------------------------------------------------------------------

/// What a single wait or click call should do.
#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    /// Succeed.
    Ok,
    /// Fail with [`DriverError::Timeout`] for the requested timeout.
    Timeout,
    /// Fail with [`DriverError::CommandFailed`] carrying the message.
    Fail(&'static str),
}

impl Outcome {
    fn into_result(self, timeout: Option<Duration>) -> Result<(), DriverError> {
        match self {
            Outcome::Ok => Ok(()),
            Outcome::Timeout => Err(DriverError::Timeout {
                timeout_ms: timeout.map_or(0, |t| t.as_millis() as u64),
            }),
            Outcome::Fail(msg) => Err(DriverError::CommandFailed(msg.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptedElement
// ---------------------------------------------------------------------------

/// An element whose wait and click calls follow a script.
///
/// Scripted outcomes are consumed one per call; once a script runs out, the
/// `then` outcome repeats forever.
pub struct ScriptedElement {
    displayed: bool,
    text: String,
    waits_script: Mutex<VecDeque<Outcome>>,
    waits_then: Outcome,
    clicks_script: Mutex<VecDeque<Outcome>>,
    clicks_then: Outcome,
    text_fails: bool,
    wait_calls: AtomicUsize,
    click_calls: AtomicUsize,
    text_calls: AtomicUsize,
    last_wait_timeout: Mutex<Option<Duration>>,
}

impl ScriptedElement {
    /// A displayed element that waits and clicks successfully.
    pub fn visible() -> Self {
        Self {
            displayed: true,
            text: String::new(),
            waits_script: Mutex::new(VecDeque::new()),
            waits_then: Outcome::Ok,
            clicks_script: Mutex::new(VecDeque::new()),
            clicks_then: Outcome::Ok,
            text_fails: false,
            wait_calls: AtomicUsize::new(0),
            click_calls: AtomicUsize::new(0),
            text_calls: AtomicUsize::new(0),
            last_wait_timeout: Mutex::new(None),
        }
    }

    /// An element that resolves but reports itself as not displayed.
    pub fn hidden() -> Self {
        Self {
            displayed: false,
            ..Self::visible()
        }
    }

    /// Set the text returned by `text()`.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Make `text()` fail.
    pub fn with_failing_text(mut self) -> Self {
        self.text_fails = true;
        self
    }

    /// Script the wait calls, then repeat `then`.
    pub fn with_waits(mut self, script: Vec<Outcome>, then: Outcome) -> Self {
        self.waits_script = Mutex::new(script.into());
        self.waits_then = then;
        self
    }

    /// Script the click calls, then repeat `then`.
    pub fn with_clicks(mut self, script: Vec<Outcome>, then: Outcome) -> Self {
        self.clicks_script = Mutex::new(script.into());
        self.clicks_then = then;
        self
    }

    /// Wrap in an [`Arc`] for sharing with a [`ScriptedDriver`].
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn wait_calls(&self) -> usize {
        self.wait_calls.load(Ordering::SeqCst)
    }

    pub fn click_calls(&self) -> usize {
        self.click_calls.load(Ordering::SeqCst)
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn last_wait_timeout(&self) -> Option<Duration> {
        *self.last_wait_timeout.lock().unwrap()
    }

    fn next(script: &Mutex<VecDeque<Outcome>>, then: Outcome) -> Outcome {
        script.lock().unwrap().pop_front().unwrap_or(then)
    }
}

/// Handle given out by [`ScriptedDriver::resolve`].
struct ScriptedHandle(Arc<ScriptedElement>);

#[async_trait]
impl ElementHandle for ScriptedHandle {
    async fn is_displayed(&self) -> Result<bool, DriverError> {
        Ok(self.0.displayed)
    }

    async fn wait_for_displayed(&self, timeout: Duration) -> Result<(), DriverError> {
        self.0.wait_calls.fetch_add(1, Ordering::SeqCst);
        *self.0.last_wait_timeout.lock().unwrap() = Some(timeout);
        ScriptedElement::next(&self.0.waits_script, self.0.waits_then).into_result(Some(timeout))
    }

    async fn click(&self) -> Result<(), DriverError> {
        self.0.click_calls.fetch_add(1, Ordering::SeqCst);
        ScriptedElement::next(&self.0.clicks_script, self.0.clicks_then).into_result(None)
    }

    async fn text(&self) -> Result<String, DriverError> {
        self.0.text_calls.fetch_add(1, Ordering::SeqCst);
        if self.0.text_fails {
            Err(DriverError::CommandFailed("stale element reference".to_string()))
        } else {
            Ok(self.0.text.clone())
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptedDriver
// ---------------------------------------------------------------------------

/// A driver that resolves a fixed set of selectors.
///
/// Unknown selectors fail with [`DriverError::NoSuchElement`]. Selectors
/// registered with [`failing`](Self::failing) fail with
/// [`DriverError::CommandFailed`]. Every resolve call is recorded in order.
#[derive(Default)]
pub struct ScriptedDriver {
    elements: HashMap<String, Arc<ScriptedElement>>,
    failures: HashMap<String, &'static str>,
    resolved: Mutex<Vec<String>>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element for `selector`.
    pub fn with(mut self, selector: &str, element: Arc<ScriptedElement>) -> Self {
        self.elements.insert(selector.to_string(), element);
        self
    }

    /// Make resolving `selector` fail with a command error.
    pub fn failing(mut self, selector: &str, message: &'static str) -> Self {
        self.failures.insert(selector.to_string(), message);
        self
    }

    /// Selectors passed to `resolve`, in call order.
    pub fn resolved(&self) -> Vec<String> {
        self.resolved.lock().unwrap().clone()
    }

    /// Wrap in an [`Arc`] for use as `Arc<dyn UiDriver>`.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl UiDriver for ScriptedDriver {
    async fn resolve(&self, selector: &str) -> Result<Box<dyn ElementHandle>, DriverError> {
        self.resolved.lock().unwrap().push(selector.to_string());
        if let Some(message) = self.failures.get(selector) {
            return Err(DriverError::CommandFailed(message.to_string()));
        }
        match self.elements.get(selector) {
            Some(element) => Ok(Box::new(ScriptedHandle(Arc::clone(element)))),
            None => Err(DriverError::NoSuchElement {
                selector: selector.to_string(),
            }),
        }
    }
}
