//! Result delivery: the host's callback handle and the per-request slot that
//! guarantees it is answered exactly once.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

use crate::{AuthAction, AuthResult, Delivery, PluginErrorKind};

/// Channel used to deliver a request's single result to the host runtime.
///
/// Exactly one of the two methods is called, exactly once, per request.
#[uniffi::export(with_foreign)]
pub trait AuthCallback: Send + Sync {
    /// Delivers a JSON object on the success path.
    fn success(&self, payload: String);

    /// Delivers an error code such as `FINGERPRINT_CANCELLED`.
    fn error(&self, code: String);
}

/// Where a request is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum RequestPhase {
    /// Received, nothing shown yet.
    Idle,
    /// Waiting on the platform's permission dialog.
    PermissionPending,
    /// The fingerprint prompt is displayed.
    PromptShown,
    /// The device-credential flow is displayed.
    CredentialFlowShown,
    /// The callback has been answered.
    Resolved,
}

struct Slot {
    phase: RequestPhase,
    callback: Option<Arc<dyn AuthCallback>>,
}

/// A request awaiting its single result.
///
/// The request is shared between the bridge and whichever responder the
/// platform currently holds. If every holder releases it without resolving,
/// it resolves itself as cancelled.
pub(crate) struct PendingRequest {
    id: u64,
    action: AuthAction,
    slot: Mutex<Slot>,
}

impl PendingRequest {
    pub(crate) fn new(id: u64, action: AuthAction, callback: Arc<dyn AuthCallback>) -> Self {
        Self {
            id,
            action,
            slot: Mutex::new(Slot {
                phase: RequestPhase::Idle,
                callback: Some(callback),
            }),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) const fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn phase(&self) -> RequestPhase {
        self.slot().phase
    }

    /// Moves an unresolved request to `phase`. Resolved requests stay resolved.
    pub(crate) fn advance(&self, phase: RequestPhase) {
        let mut slot = self.slot();
        if slot.phase == RequestPhase::Resolved {
            return;
        }
        log::debug!(
            "Request {} ({}): {:?} -> {phase:?}",
            self.id,
            self.action,
            slot.phase
        );
        slot.phase = phase;
    }

    /// Delivers `result` unless the request was already answered.
    ///
    /// Returns whether this call delivered the result.
    pub(crate) fn resolve(&self, result: AuthResult) -> bool {
        let callback = {
            let mut slot = self.slot();
            slot.phase = RequestPhase::Resolved;
            slot.callback.take()
        };

        let Some(callback) = callback else {
            log::warn!(
                "Request {} ({}) already answered, dropping {result:?}",
                self.id,
                self.action
            );
            return false;
        };

        log::debug!("Request {} ({}) resolved: {result:?}", self.id, self.action);
        deliver(callback.as_ref(), result);
        true
    }
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        let slot = self.slot.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(callback) = slot.callback.take() {
            log::warn!(
                "Request {} ({}) released in {:?} without an outcome, reporting cancellation",
                self.id,
                self.action,
                slot.phase
            );
            slot.phase = RequestPhase::Resolved;
            deliver(callback.as_ref(), AuthResult::Cancelled);
        }
    }
}

fn deliver(callback: &dyn AuthCallback, result: AuthResult) {
    match result.into_delivery() {
        Delivery::Success { payload } => callback.success(payload),
        Delivery::Failure { kind } => callback.error(kind.code().to_string()),
    }
}

/// An [`AuthCallback`] that forwards the delivery into a oneshot channel, for
/// Rust callers that want to `await` the outcome.
pub struct ChannelCallback {
    sender: Mutex<Option<oneshot::Sender<Delivery>>>,
}

impl ChannelCallback {
    /// Creates the callback and the receiver its delivery arrives on.
    #[must_use]
    pub fn new() -> (Arc<Self>, oneshot::Receiver<Delivery>) {
        let (sender, receiver) = oneshot::channel();
        let callback = Arc::new(Self {
            sender: Mutex::new(Some(sender)),
        });
        (callback, receiver)
    }

    fn send(&self, delivery: Delivery) {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sender {
            Some(sender) => {
                if sender.send(delivery).is_err() {
                    log::debug!("Delivery receiver dropped before the result arrived");
                }
            }
            None => log::warn!("Channel callback invoked twice, dropping {delivery:?}"),
        }
    }
}

impl AuthCallback for ChannelCallback {
    fn success(&self, payload: String) {
        self.send(Delivery::Success { payload });
    }

    fn error(&self, code: String) {
        let kind = code.parse().unwrap_or_else(|_| {
            log::error!("Unrecognized error code {code}");
            PluginErrorKind::MarshalingError
        });
        self.send(Delivery::Failure { kind });
    }
}
