//! Completion signal and cancellation token for camera transitions.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::channel::oneshot;

use super::runner::TransitionReport;
use crate::error::CameramanError;

/// Identifier of a requested transition, unique per Cameraman.
pub type TransitionId = u64;

/// How a transition ended.
#[derive(Debug)]
pub enum TransitionOutcome {
    /// The camera reached the end pose.
    Completed(TransitionReport),
    /// Cancelled (explicitly, via token, or superseded by a newer request).
    /// The camera stays at the last sampled pose.
    Cancelled(TransitionReport),
    /// A queued request could not be planned when its turn came.
    Failed(CameramanError),
    /// No outcome left to deliver: the Cameraman was dropped before the
    /// transition resolved, or the outcome was already taken from the
    /// handle.
    Abandoned,
}

impl TransitionOutcome {
    /// Whether the camera arrived at its destination.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Report for completed or cancelled transitions.
    #[must_use]
    pub fn report(&self) -> Option<&TransitionReport> {
        match self {
            Self::Completed(r) | Self::Cancelled(r) => Some(r),
            Self::Failed(_) | Self::Abandoned => None,
        }
    }
}

/// Shared flag requesting cancellation of one transition.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Request cancellation. Takes effect on the next tick.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Caller side of a transition: resolves exactly once with its outcome.
///
/// Await it, or poll with [`try_outcome`](Self::try_outcome) from a frame
/// loop, but not both: the outcome is delivered once, so awaiting a handle
/// whose outcome was already taken yields [`TransitionOutcome::Abandoned`].
#[derive(Debug)]
pub struct TransitionHandle {
    id: TransitionId,
    receiver: oneshot::Receiver<TransitionOutcome>,
    cancel: CancelToken,
    taken: bool,
}

impl TransitionHandle {
    /// Transition identifier.
    #[must_use]
    pub fn id(&self) -> TransitionId {
        self.id
    }

    /// Token that cancels this transition.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Shorthand for `cancel_token().cancel()`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Take the outcome if the transition has resolved.
    ///
    /// Returns `Some` at most once; later calls return `None`.
    pub fn try_outcome(&mut self) -> Option<TransitionOutcome> {
        if self.taken {
            return None;
        }
        let outcome = match self.receiver.try_recv() {
            Ok(outcome) => outcome?,
            Err(oneshot::Canceled) => TransitionOutcome::Abandoned,
        };
        self.taken = true;
        Some(outcome)
    }
}

impl Future for TransitionHandle {
    type Output = TransitionOutcome;

    fn poll(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Self::Output> {
        if self.taken {
            return Poll::Ready(TransitionOutcome::Abandoned);
        }
        let polled = Pin::new(&mut self.receiver).poll(cx);
        if polled.is_ready() {
            self.taken = true;
        }
        polled.map(|r| r.unwrap_or(TransitionOutcome::Abandoned))
    }
}

/// Animator side of a transition.
#[derive(Debug)]
pub(crate) struct Completer {
    id: TransitionId,
    sender: oneshot::Sender<TransitionOutcome>,
    cancel: CancelToken,
}

impl Completer {
    pub(crate) fn id(&self) -> TransitionId {
        self.id
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Deliver the outcome. A dropped handle is not an error.
    pub(crate) fn resolve(self, outcome: TransitionOutcome) {
        let _ = self.sender.send(outcome);
    }
}

/// Paired handle and completer for transition `id`.
pub(crate) fn channel(id: TransitionId) -> (TransitionHandle, Completer) {
    let (sender, receiver) = oneshot::channel();
    let cancel = CancelToken::default();
    (
        TransitionHandle {
            id,
            receiver,
            cancel: cancel.clone(),
            taken: false,
        },
        Completer { id, sender, cancel },
    )
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn resolves_exactly_once() {
        let (mut handle, completer) = channel(3);
        assert!(handle.try_outcome().is_none());
        completer.resolve(TransitionOutcome::Failed(
            CameramanError::TransitionInProgress,
        ));
        assert!(matches!(
            handle.try_outcome(),
            Some(TransitionOutcome::Failed(_))
        ));
        assert!(handle.try_outcome().is_none());
    }

    #[test]
    fn dropped_completer_is_abandoned() {
        let (handle, completer) = channel(1);
        drop(completer);
        assert!(matches!(block_on(handle), TransitionOutcome::Abandoned));
    }

    #[test]
    fn awaiting_after_try_outcome_is_abandoned() {
        let (mut handle, completer) = channel(4);
        completer.resolve(TransitionOutcome::Failed(
            CameramanError::TransitionInProgress,
        ));
        assert!(handle.try_outcome().is_some());
        assert!(matches!(block_on(handle), TransitionOutcome::Abandoned));
    }

    #[test]
    fn cancel_token_is_shared() {
        let (handle, completer) = channel(9);
        assert_eq!(completer.id(), handle.id());
        assert!(!completer.is_cancelled());
        handle.cancel_token().cancel();
        assert!(completer.is_cancelled());
    }
}
