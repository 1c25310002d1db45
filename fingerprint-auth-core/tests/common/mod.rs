//! Common test utilities shared across integration tests.

use std::sync::{Arc, Mutex, MutexGuard};

use fingerprint_auth_core::{
    AuthCallback, AuthenticationResponder, BiometricPlatform, DialogConfig, DialogLocale,
    PermissionResponder, PlatformError,
};
use serde_json::Value;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// What the fake device reports.
#[derive(Debug, Clone, Copy)]
pub struct Device {
    pub platform_version: u32,
    pub permission_granted: bool,
    pub hardware_detected: bool,
    pub enrolled: bool,
    pub keyguard_secure: bool,
    pub refuses_queries: bool,
}

impl Device {
    /// A modern device with an enrolled fingerprint and a PIN.
    pub const fn enrolled() -> Self {
        Self {
            platform_version: 30,
            permission_granted: true,
            hardware_detected: true,
            enrolled: true,
            keyguard_secure: true,
            refuses_queries: false,
        }
    }

    /// A device with a sensor but no enrolled fingerprint.
    pub const fn without_fingerprints(keyguard_secure: bool) -> Self {
        Self {
            enrolled: false,
            keyguard_secure,
            ..Self::enrolled()
        }
    }
}

/// Everything the bridge asked of the fake platform.
#[derive(Default)]
pub struct Calls {
    pub platform_queries: usize,
    pub locales: Vec<DialogLocale>,
    pub permission_requests: Vec<Arc<PermissionResponder>>,
    pub prompts: Vec<(DialogConfig, Arc<AuthenticationResponder>)>,
    pub credential_flows: Vec<Arc<AuthenticationResponder>>,
}

/// Scriptable [`BiometricPlatform`] that records calls and keeps responders
/// so tests can play the platform's side of the exchange.
pub struct FakePlatform {
    device: Device,
    calls: Mutex<Calls>,
}

impl FakePlatform {
    pub fn new(device: Device) -> Arc<Self> {
        Arc::new(Self {
            device,
            calls: Mutex::new(Calls::default()),
        })
    }

    pub fn calls(&self) -> MutexGuard<'_, Calls> {
        self.calls.lock().unwrap()
    }

    pub fn permission_responder(&self) -> Arc<PermissionResponder> {
        self.calls()
            .permission_requests
            .last()
            .cloned()
            .expect("no permission request")
    }

    pub fn prompt(&self) -> (DialogConfig, Arc<AuthenticationResponder>) {
        self.calls().prompts.last().cloned().expect("no prompt shown")
    }

    pub fn credential_flow(&self) -> Arc<AuthenticationResponder> {
        self.calls()
            .credential_flows
            .last()
            .cloned()
            .expect("no credential flow started")
    }

    fn query(&self, answer: bool) -> Result<bool, PlatformError> {
        self.calls().platform_queries += 1;
        if self.device.refuses_queries {
            return Err(PlatformError::Security(
                "USE_FINGERPRINT not granted".to_string(),
            ));
        }
        Ok(answer)
    }
}

impl BiometricPlatform for FakePlatform {
    fn platform_version(&self) -> u32 {
        self.device.platform_version
    }

    fn has_fingerprint_permission(&self) -> bool {
        self.calls().platform_queries += 1;
        self.device.permission_granted
    }

    fn request_fingerprint_permission(&self, responder: Arc<PermissionResponder>) {
        self.calls().permission_requests.push(responder);
    }

    fn is_hardware_detected(&self) -> Result<bool, PlatformError> {
        self.query(self.device.hardware_detected)
    }

    fn has_enrolled_fingerprints(&self) -> Result<bool, PlatformError> {
        self.query(self.device.enrolled)
    }

    fn is_keyguard_secure(&self) -> bool {
        self.calls().platform_queries += 1;
        self.device.keyguard_secure
    }

    fn apply_locale(&self, locale: DialogLocale) {
        self.calls().locales.push(locale);
    }

    fn show_fingerprint_prompt(
        &self,
        dialog: DialogConfig,
        responder: Arc<AuthenticationResponder>,
    ) {
        self.calls().prompts.push((dialog, responder));
    }

    fn start_device_credential_flow(&self, responder: Arc<AuthenticationResponder>) -> bool {
        // mirrors a null confirmation intent
        if !self.device.keyguard_secure {
            return false;
        }
        self.calls().credential_flows.push(responder);
        true
    }
}

/// A reply the host received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Success(Value),
    Error(String),
}

/// [`AuthCallback`] that records every reply.
#[derive(Default)]
pub struct RecordingCallback {
    replies: Mutex<Vec<Reply>>,
}

impl RecordingCallback {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replies(&self) -> Vec<Reply> {
        self.replies.lock().unwrap().clone()
    }

    /// Asserts exactly one reply arrived and returns it.
    pub fn single(&self) -> Reply {
        let replies = self.replies();
        assert_eq!(replies.len(), 1, "expected exactly one reply: {replies:?}");
        replies[0].clone()
    }
}

impl AuthCallback for RecordingCallback {
    fn success(&self, payload: String) {
        let value = serde_json::from_str(&payload).expect("payload is JSON");
        self.replies.lock().unwrap().push(Reply::Success(value));
    }

    fn error(&self, code: String) {
        self.replies.lock().unwrap().push(Reply::Error(code));
    }
}
