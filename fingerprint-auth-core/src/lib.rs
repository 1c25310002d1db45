#![deny(clippy::all, clippy::pedantic, clippy::nursery)]

//! Fingerprint authentication bridge for hybrid apps.
//!
//! The host runtime forwards its plugin commands to a [`BiometricAuthBridge`]
//! and implements [`BiometricPlatform`] over the device's fingerprint,
//! permission and keyguard APIs. Every command is answered exactly once
//! through the [`AuthCallback`] it was issued with.
//!
//! ```rust,ignore
//! let bridge = BiometricAuthBridge::with_defaults(platform);
//! bridge.execute("authenticate".into(), r#"[{"locale": "zh_HK"}]"#.into(), callback)?;
//! ```

mod bridge;
pub use bridge::*;

mod callback;
pub use callback::{AuthCallback, ChannelCallback, RequestPhase};

mod config;
pub use config::*;

mod error;
pub use error::*;

mod locale;
pub use locale::*;

mod platform;
pub use platform::BiometricPlatform;

mod request;
pub use request::*;

mod responder;
pub use responder::{AuthenticationResponder, PermissionResponder};

mod result;
pub use result::*;

pub mod logger;

uniffi::setup_scaffolding!("fingerprint_auth_core");
