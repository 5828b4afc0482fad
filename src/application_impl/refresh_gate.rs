use crate::application_port::ApiError;
use crate::domain_model::AccessToken;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefreshFailure {
    #[error("no refresh token available")]
    NoRefreshToken,
    #[error("token refresh rejected: {0}")]
    Rejected(String),
    #[error("token refresh abandoned")]
    Abandoned,
}

impl From<RefreshFailure> for ApiError {
    fn from(failure: RefreshFailure) -> Self {
        match failure {
            RefreshFailure::NoRefreshToken => ApiError::NoRefreshToken,
            RefreshFailure::Rejected(reason) => ApiError::RefreshRejected(reason),
            RefreshFailure::Abandoned => ApiError::RefreshRejected("refresh abandoned".to_string()),
        }
    }
}

pub type RefreshOutcome = Result<AccessToken, RefreshFailure>;

/// Single-flight guard for token refresh.
///
/// The first caller to `enter` while idle becomes the leader and owns the
/// refresh until its lease is settled or dropped. Callers entering meanwhile
/// are queued and receive the leader's outcome in arrival order.
#[derive(Debug, Default)]
pub struct RefreshGate {
    state: Mutex<GateState>,
}

#[derive(Debug, Default)]
struct GateState {
    in_progress: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

pub enum RefreshTicket<'a> {
    Leader(RefreshLease<'a>),
    Follower(oneshot::Receiver<RefreshOutcome>),
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn enter(&self) -> RefreshTicket<'_> {
        let mut state = self.lock();
        if state.in_progress {
            let (tx, rx) = oneshot::channel();
            state.waiters.push(tx);
            RefreshTicket::Follower(rx)
        } else {
            state.in_progress = true;
            RefreshTicket::Leader(RefreshLease {
                gate: self,
                settled: false,
            })
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.lock().in_progress
    }

    pub fn queued(&self) -> usize {
        self.lock().waiters.len()
    }

    fn settle(&self, outcome: &RefreshOutcome) -> usize {
        let waiters = {
            let mut state = self.lock();
            state.in_progress = false;
            std::mem::take(&mut state.waiters)
        };
        let count = waiters.len();
        for waiter in waiters {
            // a follower that gave up has dropped its receiver
            let _ = waiter.send(outcome.clone());
        }
        count
    }
}

/// Ownership of the in-flight refresh. Dropping it unsettled releases the
/// gate and fails every queued caller with `RefreshFailure::Abandoned`.
pub struct RefreshLease<'a> {
    gate: &'a RefreshGate,
    settled: bool,
}

impl RefreshLease<'_> {
    /// Hands `outcome` to every queued caller and clears the in-progress
    /// flag. Returns how many callers were released.
    pub fn settle(mut self, outcome: &RefreshOutcome) -> usize {
        self.settled = true;
        self.gate.settle(outcome)
    }
}

impl Drop for RefreshLease<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.gate.settle(&Err(RefreshFailure::Abandoned));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> AccessToken {
        AccessToken(s.to_string())
    }

    #[tokio::test]
    async fn only_first_entrant_leads() {
        let gate = RefreshGate::new();
        let lease = match gate.enter() {
            RefreshTicket::Leader(lease) => lease,
            RefreshTicket::Follower(_) => panic!("idle gate must hand out a lease"),
        };
        assert!(gate.is_refreshing());

        let mut followers = Vec::new();
        for _ in 0..3 {
            match gate.enter() {
                RefreshTicket::Follower(rx) => followers.push(rx),
                RefreshTicket::Leader(_) => panic!("second leader while refreshing"),
            }
        }
        assert_eq!(gate.queued(), 3);

        assert_eq!(lease.settle(&Ok(token("new"))), 3);
        assert!(!gate.is_refreshing());
        assert_eq!(gate.queued(), 0);
        for rx in followers {
            assert_eq!(rx.await.unwrap(), Ok(token("new")));
        }
    }

    #[tokio::test]
    async fn failure_reaches_every_follower() {
        let gate = RefreshGate::new();
        let RefreshTicket::Leader(lease) = gate.enter() else {
            panic!("expected leader");
        };
        let RefreshTicket::Follower(rx) = gate.enter() else {
            panic!("expected follower");
        };

        lease.settle(&Err(RefreshFailure::NoRefreshToken));
        assert_eq!(rx.await.unwrap(), Err(RefreshFailure::NoRefreshToken));
    }

    #[tokio::test]
    async fn dropped_lease_releases_gate() {
        let gate = RefreshGate::new();
        let rx = {
            let RefreshTicket::Leader(_lease) = gate.enter() else {
                panic!("expected leader");
            };
            let RefreshTicket::Follower(rx) = gate.enter() else {
                panic!("expected follower");
            };
            rx
        };

        assert!(!gate.is_refreshing());
        assert_eq!(rx.await.unwrap(), Err(RefreshFailure::Abandoned));
        assert!(matches!(gate.enter(), RefreshTicket::Leader(_)));
    }

    #[test]
    fn failures_map_to_distinct_api_errors() {
        assert!(matches!(
            ApiError::from(RefreshFailure::NoRefreshToken),
            ApiError::NoRefreshToken
        ));
        let err = ApiError::from(RefreshFailure::Rejected("invalid_grant".to_string()));
        assert!(err.is_session_expired());
        assert_eq!(err.to_string(), "token refresh rejected: invalid_grant");
    }
}
