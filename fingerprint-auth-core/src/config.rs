//! Bridge defaults and the per-call prompt configuration derived from them.

use serde::{Deserialize, Serialize};

use crate::{AuthOptions, BridgeError, BridgeResult, DialogLocale};

/// Lowest platform API level with fingerprint and confirm-credential support.
pub const MIN_PLATFORM_VERSION: u32 = 23;

/// Locale applied when a request does not name one.
pub const DEFAULT_LOCALE: &str = "en_US";

/// One more than the platform's own attempt limit, so the platform's lockout
/// error is the only callback the prompt produces.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Defaults applied to every request handled by a [`crate::BiometricAuthBridge`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Requests on a platform older than this fail with `MINIMUM_SDK`.
    pub min_platform_version: u32,
    /// Locale string used when a request does not carry one.
    pub default_locale: String,
    /// Failed fingerprint attempts before the prompt reports an error.
    pub max_attempts: u32,
    /// When set, `authenticate` never falls back to the lock screen.
    pub disable_backup: bool,
    /// Prompt title, `None` for the platform's default text.
    pub dialog_title: Option<String>,
    /// Prompt message, `None` for the platform's default text.
    pub dialog_message: Option<String>,
    /// Prompt hint, `None` for the platform's default text.
    pub dialog_hint: Option<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            min_platform_version: MIN_PLATFORM_VERSION,
            default_locale: DEFAULT_LOCALE.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            disable_backup: false,
            dialog_title: None,
            dialog_message: None,
            dialog_hint: None,
        }
    }
}

impl BridgeConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`BridgeError::InvalidConfig`] if the JSON is malformed or a
    /// field has the wrong type.
    pub fn from_json(json: &str) -> BridgeResult<Self> {
        serde_json::from_str(json).map_err(|err| BridgeError::InvalidConfig(err.to_string()))
    }
}

/// Returns the default bridge configuration.
#[uniffi::export]
#[must_use]
pub fn default_bridge_config() -> BridgeConfig {
    BridgeConfig::default()
}

/// Parses a bridge configuration from JSON.
///
/// # Errors
/// See [`BridgeConfig::from_json`].
#[uniffi::export]
pub fn bridge_config_from_json(json: &str) -> BridgeResult<BridgeConfig> {
    BridgeConfig::from_json(json)
}

/// Everything the platform needs to render one fingerprint prompt.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct DialogConfig {
    /// Locale the prompt's resources are rendered in.
    pub locale: DialogLocale,
    /// Prompt title, `None` for the platform's default text.
    pub title: Option<String>,
    /// Prompt message, `None` for the platform's default text.
    pub message: Option<String>,
    /// Prompt hint, `None` for the platform's default text.
    pub hint: Option<String>,
    /// Failed attempts before the prompt reports an error.
    pub max_attempts: u32,
    /// Whether the prompt must hide its "use backup" action.
    pub disable_backup: bool,
}

impl DialogConfig {
    /// Overlays the request's options on the bridge defaults.
    #[must_use]
    pub fn resolve(defaults: &BridgeConfig, options: &AuthOptions) -> Self {
        let locale = options
            .locale
            .as_deref()
            .unwrap_or(&defaults.default_locale);

        Self {
            locale: DialogLocale::parse(locale),
            title: options
                .dialog_title
                .clone()
                .or_else(|| defaults.dialog_title.clone()),
            message: options
                .dialog_message
                .clone()
                .or_else(|| defaults.dialog_message.clone()),
            hint: options
                .dialog_hint
                .clone()
                .or_else(|| defaults.dialog_hint.clone()),
            max_attempts: options.max_attempts.unwrap_or(defaults.max_attempts),
            disable_backup: options.disable_backup.unwrap_or(defaults.disable_backup),
        }
    }
}
