//! Mock gateway for testing and offline demos.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::ProviderError;
use crate::input::CapturedImage;

use super::provider::{DocumentHandle, GatewayResult, InferenceGateway};

/// Mock gateway that returns scripted responses and counts calls.
///
/// Each stage can be switched to fail at any time, which lets tests model a
/// provider outage followed by recovery.
pub struct MockGateway {
    identification: String,
    regulation: String,
    register_delay: Duration,
    fail_identify: AtomicBool,
    fail_register: AtomicBool,
    fail_lookup: AtomicBool,
    identify_calls: AtomicUsize,
    register_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockGateway {
    /// Create a new mock gateway with default responses.
    pub fn new() -> Self {
        Self {
            identification: "Northern Pike, a freshwater predator with a long body and \
                             duck-bill shaped jaws."
                .to_string(),
            regulation: "Zone 15: open season May–October, limit 2".to_string(),
            register_delay: Duration::ZERO,
            fail_identify: AtomicBool::new(false),
            fail_register: AtomicBool::new(false),
            fail_lookup: AtomicBool::new(false),
            identify_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
            lookup_calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Text returned by `identify`.
    pub fn with_identification(mut self, text: impl Into<String>) -> Self {
        self.identification = text.into();
        self
    }

    /// Text returned by `lookup_regulation`.
    pub fn with_regulation(mut self, text: impl Into<String>) -> Self {
        self.regulation = text.into();
        self
    }

    /// Sleep inside `register_document`, widening race windows in tests.
    pub fn with_register_delay(mut self, delay: Duration) -> Self {
        self.register_delay = delay;
        self
    }

    pub fn set_fail_identify(&self, fail: bool) {
        self.fail_identify.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_register(&self, fail: bool) {
        self.fail_register.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_lookup(&self, fail: bool) {
        self.fail_lookup.store(fail, Ordering::SeqCst);
    }

    pub fn identify_calls(&self) -> usize {
        self.identify_calls.load(Ordering::SeqCst)
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    /// Total calls across all operations.
    pub fn total_calls(&self) -> usize {
        self.identify_calls() + self.register_calls() + self.lookup_calls()
    }

    /// The prompt passed to the most recent `lookup_regulation` call.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .map(|prompt| prompt.clone())
            .unwrap_or_default()
    }

    fn injected(operation: &str) -> ProviderError {
        ProviderError::Transport {
            provider: "mock".to_string(),
            message: format!("injected {} failure", operation),
        }
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceGateway for MockGateway {
    fn identify(&self, _image: &CapturedImage, _max_tokens: usize) -> GatewayResult<String> {
        self.identify_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_identify.load(Ordering::SeqCst) {
            return Err(Self::injected("identify"));
        }
        Ok(self.identification.clone())
    }

    fn register_document(&self, _file_name: &str, _bytes: &[u8]) -> GatewayResult<DocumentHandle> {
        let n = self.register_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.register_delay.is_zero() {
            std::thread::sleep(self.register_delay);
        }
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(Self::injected("register"));
        }
        Ok(DocumentHandle::new(format!("file-mock-{}", n)))
    }

    fn lookup_regulation(&self, prompt: &str, _max_tokens: usize) -> GatewayResult<String> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(Self::injected("lookup"));
        }
        Ok(self.regulation.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
