//! Objects handed to the platform for each asynchronous step of a request.
//!
//! Each responder owns its request. Whatever the platform reports first
//! resolves it. Later reports are logged and dropped.

use std::sync::Arc;

use crate::{
    callback::PendingRequest, platform::query_availability, AuthResult, BiometricPlatform,
    PluginErrorKind, RequestPhase,
};

/// Receives the outcome of a fingerprint permission request.
#[derive(uniffi::Object)]
pub struct PermissionResponder {
    request: Arc<PendingRequest>,
    platform: Arc<dyn BiometricPlatform>,
}

impl PermissionResponder {
    pub(crate) fn new(request: Arc<PendingRequest>, platform: Arc<dyn BiometricPlatform>) -> Self {
        Self { request, platform }
    }
}

#[uniffi::export]
impl PermissionResponder {
    /// Reports whether the user granted the permission.
    ///
    /// A grant runs the deferred availability check. A denial resolves the
    /// request with `FINGERPRINT_PERMISSION_DENIED`.
    pub fn on_permission_result(&self, granted: bool) {
        if !granted {
            log::error!("Fingerprint permission denied");
            self.request.resolve(PluginErrorKind::PermissionDenied.into());
            return;
        }

        self.request.resolve(availability(self.platform.as_ref()));
    }

    /// Returns the phase of the request this responder answers.
    #[must_use]
    pub fn phase(&self) -> RequestPhase {
        self.request.phase()
    }
}

/// Receives the outcome of the fingerprint prompt or the lock-screen flow.
#[derive(uniffi::Object)]
pub struct AuthenticationResponder {
    request: Arc<PendingRequest>,
    platform: Arc<dyn BiometricPlatform>,
    disable_backup: bool,
}

impl AuthenticationResponder {
    pub(crate) fn new(
        request: Arc<PendingRequest>,
        platform: Arc<dyn BiometricPlatform>,
        disable_backup: bool,
    ) -> Self {
        Self {
            request,
            platform,
            disable_backup,
        }
    }
}

#[uniffi::export]
impl AuthenticationResponder {
    /// The fingerprint matched.
    pub fn on_authenticated(&self) {
        self.request.resolve(AuthResult::Authenticated {
            via_fingerprint: true,
        });
    }

    /// The user dismissed the prompt.
    pub fn on_cancelled(&self) {
        self.request.resolve(AuthResult::Cancelled);
    }

    /// The sensor subsystem failed, e.g. too many attempts or a lockout.
    pub fn on_error(&self, message: String) {
        log::error!("Fingerprint prompt error: {message}");
        self.request.resolve(PluginErrorKind::HardwareError.into());
    }

    /// Reports the result code of the confirm-device-credential flow.
    pub fn on_credential_result(&self, confirmed: bool) {
        if confirmed {
            self.request.resolve(AuthResult::Authenticated {
                via_fingerprint: false,
            });
        } else {
            self.request.resolve(AuthResult::Cancelled);
        }
    }

    /// The user chose the prompt's backup action: switch this request over to
    /// the confirm-device-credential flow.
    ///
    /// A request made with `disableBackup` resolves with
    /// `FINGERPRINT_NOT_AVAILABLE` instead.
    pub fn use_backup(self: Arc<Self>) {
        if self.disable_backup {
            log::warn!(
                "Request {}: backup action used with backup disabled",
                self.request.id()
            );
            self.request.resolve(PluginErrorKind::NotAvailable.into());
            return;
        }

        let platform = Arc::clone(&self.platform);
        start_credential_flow(platform.as_ref(), self);
    }

    /// Returns the phase of the request this responder answers.
    #[must_use]
    pub fn phase(&self) -> RequestPhase {
        self.request.phase()
    }
}

/// Builds the availability outcome, mapping a refused query to its error kind.
pub(crate) fn availability(platform: &dyn BiometricPlatform) -> AuthResult {
    match query_availability(platform) {
        Ok((hardware_detected, enrolled)) => AuthResult::Available {
            hardware_detected,
            enrolled,
        },
        Err(err) => {
            log::error!("Availability query failed: {err}");
            PluginErrorKind::from(err).into()
        }
    }
}

/// Hands the request to the lock-screen flow, reporting `NOT_AVAILABLE` when
/// the platform has no confirmation intent to show. Answered requests never
/// reach the platform.
pub(crate) fn start_credential_flow(
    platform: &dyn BiometricPlatform,
    responder: Arc<AuthenticationResponder>,
) {
    let request = Arc::clone(&responder.request);
    if request.phase() == RequestPhase::Resolved {
        log::warn!(
            "Request {} already answered, not starting the credential flow",
            request.id()
        );
        return;
    }
    request.advance(RequestPhase::CredentialFlowShown);

    if !platform.start_device_credential_flow(responder) {
        log::error!(
            "Request {}: no confirm-credential intent, lock screen is not secure",
            request.id()
        );
        request.resolve(PluginErrorKind::NotAvailable.into());
    }
}
