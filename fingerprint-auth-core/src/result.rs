//! Outcomes of a request and their JSON form on the host side.

use serde::Serialize;

use crate::PluginErrorKind;

/// The single outcome delivered for a request.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum AuthResult {
    /// Fingerprint hardware and enrollment state.
    Available {
        /// A fingerprint sensor is present.
        hardware_detected: bool,
        /// At least one fingerprint is enrolled.
        enrolled: bool,
    },
    /// The user proved their identity.
    Authenticated {
        /// `true` for the fingerprint prompt, `false` for the lock screen.
        via_fingerprint: bool,
    },
    /// Whether a secure lock screen is configured.
    LockScreenAvailability {
        /// The device has a PIN, pattern or password.
        available: bool,
    },
    /// The user dismissed the prompt or the lock-screen flow.
    Cancelled,
    /// The request failed.
    Error {
        /// What went wrong.
        kind: PluginErrorKind,
    },
}

impl From<PluginErrorKind> for AuthResult {
    fn from(kind: PluginErrorKind) -> Self {
        match kind {
            PluginErrorKind::Cancelled => Self::Cancelled,
            kind => Self::Error { kind },
        }
    }
}

/// What the host's callback receives: a JSON payload or an error code.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum Delivery {
    /// Serialized JSON object for the success path.
    Success {
        /// The JSON payload.
        payload: String,
    },
    /// Error kind for the error path.
    Failure {
        /// The error kind; its code is what the host sees.
        kind: PluginErrorKind,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityPayload {
    is_available: bool,
    is_hardware_detected: bool,
    has_enrolled_fingerprints: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FingerprintPayload {
    with_fingerprint: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupPayload {
    with_backup: bool,
}

// The key keeps the spelling JavaScript callers already read.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LockScreenPayload {
    is_luck_screen: bool,
}

impl AuthResult {
    /// Converts the outcome into what the host callback receives.
    ///
    /// A payload that fails to serialize is logged and delivered as
    /// [`PluginErrorKind::MarshalingError`].
    #[must_use]
    pub fn into_delivery(self) -> Delivery {
        let payload = match self {
            Self::Available {
                hardware_detected,
                enrolled,
            } => serde_json::to_string(&AvailabilityPayload {
                is_available: hardware_detected && enrolled,
                is_hardware_detected: hardware_detected,
                has_enrolled_fingerprints: enrolled,
            }),
            Self::Authenticated {
                via_fingerprint: true,
            } => serde_json::to_string(&FingerprintPayload {
                with_fingerprint: true,
            }),
            Self::Authenticated {
                via_fingerprint: false,
            } => serde_json::to_string(&BackupPayload { with_backup: true }),
            Self::LockScreenAvailability { available } => {
                serde_json::to_string(&LockScreenPayload {
                    is_luck_screen: available,
                })
            }
            Self::Cancelled => {
                return Delivery::Failure {
                    kind: PluginErrorKind::Cancelled,
                }
            }
            Self::Error { kind } => return Delivery::Failure { kind },
        };

        match payload {
            Ok(payload) => Delivery::Success { payload },
            Err(err) => {
                log::error!("Failed to serialize result payload: {err}");
                Delivery::Failure {
                    kind: PluginErrorKind::MarshalingError,
                }
            }
        }
    }
}
