// ============================================================================
// Roster Core - Admin Gate
// File: crates/roster-core/src/services/admin_gate.rs
// Description: Shared-passcode gate in front of the dashboard
// ============================================================================
//! The gate keeps casual users out of the dashboard. It is not access
//! control: the passcode is a shared cleartext value.

use std::time::Duration;

use tracing::{info, warn};

use roster_shared::constants::{
    DEFAULT_ADMIN_PASSCODE, GATE_CHECK_PAUSE_MS, GATE_DENIED_PAUSE_MS, GATE_GRANTED_PAUSE_MS,
};

use super::pacing::Pacer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateStatus {
    #[default]
    Idle,
    Checking,
    Granted,
    Denied,
}

impl GateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateStatus::Idle => "Authorize Access",
            GateStatus::Checking => "Authenticating",
            GateStatus::Granted => "Access Granted",
            GateStatus::Denied => "Invalid Credentials",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTimings {
    pub check: Duration,
    pub granted: Duration,
    pub denied: Duration,
}

impl Default for GateTimings {
    fn default() -> Self {
        Self {
            check: Duration::from_millis(GATE_CHECK_PAUSE_MS),
            granted: Duration::from_millis(GATE_GRANTED_PAUSE_MS),
            denied: Duration::from_millis(GATE_DENIED_PAUSE_MS),
        }
    }
}

pub struct AdminGate {
    passcode: String,
    timings: GateTimings,
}

impl AdminGate {
    pub fn new(passcode: impl Into<String>, timings: GateTimings) -> Self {
        Self {
            passcode: passcode.into(),
            timings,
        }
    }

    /// Case-insensitive comparison against the shared passcode.
    pub fn verify(&self, input: &str) -> bool {
        input.to_uppercase() == self.passcode.to_uppercase()
    }

    /// Checking -> Granted | Denied, after the check pause.
    pub async fn check<P: Pacer + ?Sized>(&self, pacer: &P, input: &str) -> GateStatus {
        pacer.pause(self.timings.check).await;
        if self.verify(input) {
            info!("Admin gate opened");
            GateStatus::Granted
        } else {
            warn!("Admin gate rejected passcode");
            GateStatus::Denied
        }
    }

    /// Holds a verdict on screen, then returns where the gate lands:
    /// Granted stays Granted (caller opens the dashboard), Denied returns to Idle.
    pub async fn settle<P: Pacer + ?Sized>(&self, pacer: &P, status: GateStatus) -> GateStatus {
        match status {
            GateStatus::Granted => {
                pacer.pause(self.timings.granted).await;
                GateStatus::Granted
            }
            GateStatus::Denied => {
                pacer.pause(self.timings.denied).await;
                GateStatus::Idle
            }
            other => other,
        }
    }
}

impl Default for AdminGate {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_PASSCODE, GateTimings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pacing::InstantPacer;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPacer {
        pauses: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Pacer for RecordingPacer {
        async fn pause(&self, duration: Duration) {
            self.pauses.lock().unwrap().push(duration);
        }
    }

    #[test]
    fn test_verify_ignores_case() {
        let gate = AdminGate::default();
        assert!(gate.verify("NOVA2025"));
        assert!(gate.verify("nova2025"));
        assert!(gate.verify("NoVa2025"));
        assert!(!gate.verify("nova2026"));
        assert!(!gate.verify(""));
    }

    #[tokio::test]
    async fn test_granted_flow_pauses_check_then_granted() {
        let gate = AdminGate::default();
        let pacer = RecordingPacer::default();

        let verdict = gate.check(&pacer, "nova2025").await;
        assert_eq!(verdict, GateStatus::Granted);
        assert_eq!(gate.settle(&pacer, verdict).await, GateStatus::Granted);

        let pauses = pacer.pauses.lock().unwrap().clone();
        assert_eq!(
            pauses,
            vec![Duration::from_millis(1500), Duration::from_millis(1000)]
        );
    }

    #[tokio::test]
    async fn test_denied_flow_returns_to_idle() {
        let gate = AdminGate::new("orbit", GateTimings::default());
        let pacer = RecordingPacer::default();

        let verdict = gate.check(&pacer, "wrong").await;
        assert_eq!(verdict, GateStatus::Denied);
        assert_eq!(gate.settle(&pacer, verdict).await, GateStatus::Idle);

        let pauses = pacer.pauses.lock().unwrap().clone();
        assert_eq!(pauses.last(), Some(&Duration::from_millis(2000)));
    }

    #[tokio::test]
    async fn test_configured_passcode_replaces_default() {
        let gate = AdminGate::new("orbit", GateTimings::default());
        assert_eq!(gate.check(&InstantPacer, "ORBIT").await, GateStatus::Granted);
        assert_eq!(gate.check(&InstantPacer, "NOVA2025").await, GateStatus::Denied);
    }
}
