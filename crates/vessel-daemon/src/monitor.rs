//! Restart-monitor boundary.
//!
//! The background task enforcing restart policies runs its own
//! scheduling loop; the daemon core only hands it new policy values.
//! The hand-off is fire-and-forget: it never blocks on the monitor's
//! internal scheduling.

use std::sync::mpsc;

use vessel_common::types::{ContainerId, RestartPolicy};

/// Receives restart-policy changes for enforcement on future exits.
pub trait RestartMonitor: Send + Sync {
    /// Hands the monitor a container's new restart policy.
    ///
    /// Subsequent exit handling for the container must use the new
    /// policy. Non-blocking.
    fn restart_policy_changed(&self, id: &ContainerId, policy: &RestartPolicy);
}

/// A restart-policy change in flight to the monitor task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyChange {
    /// Container whose policy changed.
    pub id: ContainerId,
    /// The policy now in force.
    pub policy: RestartPolicy,
}

/// [`RestartMonitor`] forwarding changes over a channel to whatever task
/// owns the restart scheduling loop.
#[derive(Debug)]
pub struct ChannelMonitor {
    tx: mpsc::Sender<PolicyChange>,
}

impl ChannelMonitor {
    /// Creates the monitor hand-off, returning the receiving end for the
    /// monitor task to drain.
    #[must_use]
    pub fn new() -> (Self, mpsc::Receiver<PolicyChange>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl RestartMonitor for ChannelMonitor {
    fn restart_policy_changed(&self, id: &ContainerId, policy: &RestartPolicy) {
        let change = PolicyChange {
            id: id.clone(),
            policy: policy.clone(),
        };
        if self.tx.send(change).is_err() {
            // Monitor task is gone; the policy still takes effect from
            // the persisted record when it comes back.
            tracing::warn!(id = %id, "restart monitor unavailable; policy change not delivered");
        } else {
            tracing::debug!(id = %id, policy = %policy, "restart policy handed to monitor");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_change_is_delivered() {
        let (monitor, rx) = ChannelMonitor::new();
        let id = ContainerId::new("c1");
        monitor.restart_policy_changed(&id, &RestartPolicy::Always);

        let change = rx.try_recv().expect("change delivered");
        assert_eq!(change.id, id);
        assert_eq!(change.policy, RestartPolicy::Always);
    }

    #[test]
    fn dropped_receiver_does_not_panic() {
        let (monitor, rx) = ChannelMonitor::new();
        drop(rx);
        monitor.restart_policy_changed(&ContainerId::new("c2"), &RestartPolicy::No);
    }
}
