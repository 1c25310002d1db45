use strum::{EnumString, IntoStaticStr};
use thiserror::Error;

/// Result type for bridge operations that fail synchronously.
pub type BridgeResult<T, E = BridgeError> = std::result::Result<T, E>;

/// Outcome codes delivered to the host through the error path of an
/// [`crate::AuthCallback`].
///
/// The string form of each kind is the code existing JavaScript callers
/// already match on, so it is kept stable regardless of the variant name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Error,
    EnumString,
    IntoStaticStr,
    uniffi::Enum,
)]
pub enum PluginErrorKind {
    /// The user dismissed the prompt or the lock-screen flow.
    #[error("FINGERPRINT_CANCELLED")]
    #[strum(serialize = "FINGERPRINT_CANCELLED")]
    Cancelled,
    /// The sensor subsystem reported an error while the prompt was shown.
    #[error("FINGERPRINT_ERROR")]
    #[strum(serialize = "FINGERPRINT_ERROR")]
    HardwareError,
    /// Neither fingerprint authentication nor a secure lock screen is usable.
    #[error("FINGERPRINT_NOT_AVAILABLE")]
    #[strum(serialize = "FINGERPRINT_NOT_AVAILABLE")]
    NotAvailable,
    /// The user refused the fingerprint permission.
    #[error("FINGERPRINT_PERMISSION_DENIED")]
    #[strum(serialize = "FINGERPRINT_PERMISSION_DENIED")]
    PermissionDenied,
    /// The request arguments or the result payload could not be (de)serialized.
    #[error("JSON_EXCEPTION")]
    #[strum(serialize = "JSON_EXCEPTION")]
    MarshalingError,
    /// The device runs a platform version below the configured minimum.
    #[error("MINIMUM_SDK")]
    #[strum(serialize = "MINIMUM_SDK")]
    UnsupportedPlatformVersion,
    /// The platform refused an availability query.
    #[error("SECURITY_EXCEPTION")]
    #[strum(serialize = "SECURITY_EXCEPTION")]
    SecurityError,
}

impl PluginErrorKind {
    /// Returns the error code string sent to the host.
    #[must_use]
    pub fn code(self) -> &'static str {
        self.into()
    }
}

/// Errors returned synchronously from bridge entry points.
#[derive(Debug, Error, uniffi::Error)]
pub enum BridgeError {
    /// The host invoked an action this bridge does not implement.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// The bridge configuration could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Unexpected `UniFFI` callback error.
    #[error("unexpected uniffi callback error: {0}")]
    UnexpectedUniFFICallbackError(String),
}

impl From<uniffi::UnexpectedUniFFICallbackError> for BridgeError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFFICallbackError(error.reason)
    }
}

/// Errors a [`crate::BiometricPlatform`] implementation reports from its queries.
#[derive(Debug, Error, uniffi::Error)]
pub enum PlatformError {
    /// The platform refused the query, typically because a permission is missing.
    #[error("security error: {0}")]
    Security(String),

    /// Unexpected `UniFFI` callback error.
    #[error("unexpected uniffi callback error: {0}")]
    UnexpectedUniFFICallbackError(String),
}

impl From<uniffi::UnexpectedUniFFICallbackError> for PlatformError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFFICallbackError(error.reason)
    }
}

impl From<PlatformError> for PluginErrorKind {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::Security(_) => Self::SecurityError,
            PlatformError::UnexpectedUniFFICallbackError(_) => Self::HardwareError,
        }
    }
}
