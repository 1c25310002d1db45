//! The bridge between host commands and the platform adapter.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, PoisonError, Weak,
};

use crate::{
    callback::PendingRequest,
    responder::{availability, start_credential_flow},
    AuthAction, AuthCallback, AuthOptions, AuthResult, AuthenticationResponder,
    BiometricPlatform, BridgeConfig, BridgeError, BridgeResult, DialogConfig,
    PermissionResponder, PluginErrorKind, RequestPhase,
};

/// Translates host actions into platform calls and platform outcomes into a
/// single callback per request.
///
/// Requests are expected one at a time. Issuing a new request while an older
/// one is still unresolved is logged; the older one still resolves through its
/// own responder.
#[derive(uniffi::Object)]
pub struct BiometricAuthBridge {
    platform: Arc<dyn BiometricPlatform>,
    config: BridgeConfig,
    next_request_id: AtomicU64,
    last_request: Mutex<Weak<PendingRequest>>,
}

#[uniffi::export]
impl BiometricAuthBridge {
    /// Creates a bridge over `platform` with the given defaults.
    #[uniffi::constructor]
    #[must_use]
    pub fn new(platform: Arc<dyn BiometricPlatform>, config: BridgeConfig) -> Self {
        Self {
            platform,
            config,
            next_request_id: AtomicU64::new(1),
            last_request: Mutex::new(Weak::new()),
        }
    }

    /// Creates a bridge over `platform` with [`BridgeConfig::default`].
    #[uniffi::constructor]
    #[must_use]
    pub fn with_defaults(platform: Arc<dyn BiometricPlatform>) -> Self {
        Self::new(platform, BridgeConfig::default())
    }

    /// Runs a host command.
    ///
    /// `args` is the host's JSON argument array; its first element, if any, is
    /// the options object. The outcome is delivered through `callback`, either
    /// before this returns or later from a responder.
    ///
    /// # Errors
    /// Returns [`BridgeError::UnknownAction`] without touching `callback` if
    /// `action` is not one this bridge implements.
    pub fn execute(
        &self,
        action: String,
        args: String,
        callback: Arc<dyn AuthCallback>,
    ) -> BridgeResult<()> {
        let Ok(parsed) = action.parse::<AuthAction>() else {
            log::error!("Unknown action: {action}");
            return Err(BridgeError::UnknownAction(action));
        };

        let Some(request) = self.admit(parsed, callback) else {
            return Ok(());
        };

        match AuthOptions::from_args(&args) {
            Ok(options) => self.perform(parsed, &options, request),
            Err(kind) => {
                request.resolve(kind.into());
            }
        }
        Ok(())
    }

    /// Reports hardware presence and enrollment, requesting the fingerprint
    /// permission first when it is not granted yet.
    pub fn check_availability(&self, callback: Arc<dyn AuthCallback>) {
        self.run(AuthAction::Availability, &AuthOptions::default(), callback);
    }

    /// Authenticates with the fingerprint prompt, or with the lock screen when
    /// fingerprint authentication is unusable.
    pub fn authenticate(&self, options: AuthOptions, callback: Arc<dyn AuthCallback>) {
        self.run(AuthAction::Authenticate, &options, callback);
    }

    /// Goes straight to the confirm-device-credential flow.
    pub fn use_lock_screen_fallback(&self, callback: Arc<dyn AuthCallback>) {
        self.run(AuthAction::UseLockScreen, &AuthOptions::default(), callback);
    }

    /// Returns whether a secure lock screen is configured.
    ///
    /// Always `false` below the minimum platform version, where the lock-screen
    /// flow is unsupported.
    #[must_use]
    pub fn is_lock_screen_fallback_available(&self) -> bool {
        if !self.supports_platform_version() {
            return false;
        }
        self.platform.is_keyguard_secure()
    }

    /// Returns the phase of the most recent request, or `None` once every
    /// holder of that request has released it.
    #[must_use]
    pub fn last_request_phase(&self) -> Option<RequestPhase> {
        let request = self
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .upgrade();
        request.map(|request| request.phase())
    }
}

impl BiometricAuthBridge {
    /// Returns the configuration this bridge applies to every request.
    #[must_use]
    pub const fn config(&self) -> &BridgeConfig {
        &self.config
    }

    fn supports_platform_version(&self) -> bool {
        let version = self.platform.platform_version();
        if version < self.config.min_platform_version {
            log::error!(
                "Platform version {version} is below the required {}",
                self.config.min_platform_version
            );
            return false;
        }
        true
    }

    fn run(&self, action: AuthAction, options: &AuthOptions, callback: Arc<dyn AuthCallback>) {
        if let Some(request) = self.admit(action, callback) {
            self.perform(action, options, request);
        }
    }

    /// Registers a new request and applies the platform version gate.
    ///
    /// Returns `None` if the request was already answered by the gate.
    fn admit(
        &self,
        action: AuthAction,
        callback: Arc<dyn AuthCallback>,
    ) -> Option<Arc<PendingRequest>> {
        let id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        let request = Arc::new(PendingRequest::new(id, action, callback));

        let previous = std::mem::replace(
            &mut *self
                .last_request
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
            Arc::downgrade(&request),
        );
        if let Some(previous) = previous.upgrade() {
            let phase = previous.phase();
            if phase != RequestPhase::Resolved {
                log::warn!(
                    "Request {id} ({action}) issued while request {} is still {phase:?}",
                    previous.id()
                );
            }
        }

        if !self.supports_platform_version() {
            request.resolve(PluginErrorKind::UnsupportedPlatformVersion.into());
            return None;
        }

        log::debug!("Request {id}: {action}");
        Some(request)
    }

    fn perform(&self, action: AuthAction, options: &AuthOptions, request: Arc<PendingRequest>) {
        match action {
            AuthAction::Availability => self.availability(request),
            AuthAction::Authenticate => self.authenticate_request(options, request),
            AuthAction::UseLockScreen => {
                start_credential_flow(self.platform.as_ref(), self.responder(request, false));
            }
            AuthAction::IsLockScreenAvailable => {
                request.resolve(AuthResult::LockScreenAvailability {
                    available: self.platform.is_keyguard_secure(),
                });
            }
        }
    }

    fn availability(&self, request: Arc<PendingRequest>) {
        if self.platform.has_fingerprint_permission() {
            request.resolve(availability(self.platform.as_ref()));
            return;
        }

        request.advance(RequestPhase::PermissionPending);
        let responder = PermissionResponder::new(request, Arc::clone(&self.platform));
        self.platform
            .request_fingerprint_permission(Arc::new(responder));
    }

    fn authenticate_request(&self, options: &AuthOptions, request: Arc<PendingRequest>) {
        let dialog = DialogConfig::resolve(&self.config, options);
        log::debug!("Applying locale {}", dialog.locale);
        self.platform.apply_locale(dialog.locale.clone());

        let usable = match availability(self.platform.as_ref()) {
            AuthResult::Available {
                hardware_detected,
                enrolled,
            } => hardware_detected && enrolled,
            other => {
                request.resolve(other);
                return;
            }
        };

        let disable_backup = dialog.disable_backup;
        if usable {
            request.advance(RequestPhase::PromptShown);
            let responder = self.responder(request, disable_backup);
            self.platform.show_fingerprint_prompt(dialog, responder);
            return;
        }

        if !disable_backup && self.platform.is_keyguard_secure() {
            log::debug!("Fingerprint unusable, falling back to the lock screen");
            start_credential_flow(self.platform.as_ref(), self.responder(request, false));
            return;
        }

        log::error!("Fingerprint authentication not available");
        request.resolve(PluginErrorKind::NotAvailable.into());
    }

    fn responder(
        &self,
        request: Arc<PendingRequest>,
        disable_backup: bool,
    ) -> Arc<AuthenticationResponder> {
        Arc::new(AuthenticationResponder::new(
            request,
            Arc::clone(&self.platform),
            disable_backup,
        ))
    }
}
