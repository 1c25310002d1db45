//! Platform adapter the host implements over its biometric, permission and
//! keyguard APIs.
//!
//! # Threading
//!
//! The bridge calls these methods on whatever thread the host invoked it on.
//! Implementations must post anything that touches UI (the permission dialog,
//! the fingerprint prompt, the confirm-credential activity) to the platform's
//! UI thread themselves. Responders may be called back from any thread.
//!
//! # Android
//!
//! - `platform_version`: `Build.VERSION.SDK_INT`
//! - `has_fingerprint_permission` / `request_fingerprint_permission`:
//!   `USE_FINGERPRINT` through the activity's permission API
//! - `is_hardware_detected` / `has_enrolled_fingerprints`: `FingerprintManager`
//! - `is_keyguard_secure` / `start_device_credential_flow`: `KeyguardManager`
//!   and `createConfirmDeviceCredentialIntent`

use std::sync::Arc;

use crate::{
    AuthenticationResponder, DialogConfig, DialogLocale, PermissionResponder, PlatformError,
};

/// Host-side access to the device's biometric and lock-screen facilities.
#[uniffi::export(with_foreign)]
pub trait BiometricPlatform: Send + Sync {
    /// Returns the platform API level the app is running on.
    fn platform_version(&self) -> u32;

    /// Returns whether the fingerprint permission is already granted.
    fn has_fingerprint_permission(&self) -> bool;

    /// Shows the platform's permission request.
    ///
    /// The outcome must be reported through `responder`. The bridge answers
    /// nothing for the request until then.
    fn request_fingerprint_permission(&self, responder: Arc<PermissionResponder>);

    /// Returns whether a fingerprint sensor is present.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Security`] if the platform refuses the query.
    fn is_hardware_detected(&self) -> Result<bool, PlatformError>;

    /// Returns whether at least one fingerprint is enrolled.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Security`] if the platform refuses the query.
    fn has_enrolled_fingerprints(&self) -> Result<bool, PlatformError>;

    /// Returns whether a PIN, pattern or password protects the device.
    fn is_keyguard_secure(&self) -> bool;

    /// Applies `locale` to the resources the prompt is rendered from.
    fn apply_locale(&self, locale: DialogLocale);

    /// Displays the fingerprint prompt on the UI thread.
    ///
    /// The prompt reports its outcome through `responder`. If the user picks
    /// the prompt's backup action, call [`AuthenticationResponder::use_backup`].
    fn show_fingerprint_prompt(
        &self,
        dialog: DialogConfig,
        responder: Arc<AuthenticationResponder>,
    );

    /// Starts the confirm-device-credential flow.
    ///
    /// Returns `false` without retaining `responder` when the platform provides
    /// no confirmation intent, i.e. no secure lock screen is configured.
    /// Otherwise the flow's result is reported through
    /// [`AuthenticationResponder::on_credential_result`].
    fn start_device_credential_flow(&self, responder: Arc<AuthenticationResponder>) -> bool;
}

/// Queries hardware and enrollment state.
pub(crate) fn query_availability(
    platform: &dyn BiometricPlatform,
) -> Result<(bool, bool), PlatformError> {
    let hardware_detected = platform.is_hardware_detected()?;
    let enrolled = platform.has_enrolled_fingerprints()?;
    Ok((hardware_detected, enrolled))
}
