//! Inbound commands: action names and the options object the host passes.

use serde::Deserialize;
use serde_json::Value;
use strum::{Display, EnumString};

use crate::PluginErrorKind;

/// An action the host runtime can invoke on the bridge.
///
/// The `Luck` spellings are accepted because published JavaScript wrappers
/// still send them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, uniffi::Enum)]
pub enum AuthAction {
    /// Report hardware presence and enrollment.
    #[strum(to_string = "availability")]
    Availability,
    /// Show the fingerprint prompt, falling back to the lock screen.
    #[strum(to_string = "authenticate")]
    Authenticate,
    /// Go straight to the device-credential flow.
    #[strum(to_string = "useLockScreen", serialize = "useLuckScreen")]
    UseLockScreen,
    /// Report whether a secure lock screen is configured.
    #[strum(to_string = "isLockScreenAvailable", serialize = "isLuckScreenAvailable")]
    IsLockScreenAvailable,
}

/// Options object carried as the first element of the host's argument array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, uniffi::Record)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthOptions {
    /// Locale string for the prompt, e.g. `zh_HK` or `de`.
    pub locale: Option<String>,
    /// Overrides [`crate::BridgeConfig::disable_backup`] for this request.
    pub disable_backup: Option<bool>,
    /// Overrides [`crate::BridgeConfig::max_attempts`] for this request.
    pub max_attempts: Option<u32>,
    /// Prompt title for this request.
    pub dialog_title: Option<String>,
    /// Prompt message for this request.
    pub dialog_message: Option<String>,
    /// Prompt hint for this request.
    pub dialog_hint: Option<String>,
}

impl AuthOptions {
    /// Extracts the options from the host's JSON argument array.
    ///
    /// An empty string, an empty array and a `null` first element all yield
    /// the default options. A bare object is accepted in place of the array.
    ///
    /// # Errors
    /// Returns [`PluginErrorKind::MarshalingError`] if the arguments are not
    /// valid JSON, the first element is not an object, or an option has the
    /// wrong type.
    pub fn from_args(args: &str) -> Result<Self, PluginErrorKind> {
        if args.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_str(args).map_err(|err| {
            log::error!("Malformed action arguments: {err}");
            PluginErrorKind::MarshalingError
        })?;

        let options = match value {
            Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
            other => other,
        };

        match options {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(options).map_err(|err| {
                log::error!("Malformed action options: {err}");
                PluginErrorKind::MarshalingError
            }),
            other => {
                log::error!("Expected an options object, got {other}");
                Err(PluginErrorKind::MarshalingError)
            }
        }
    }
}
