use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use roster_core::domain::{Participant, RegistrationPhase};
use roster_core::error::DomainError;
use roster_core::repositories::RosterStore;
use roster_core::services::{AdminGate, GateStatus, Pacer, RandomSource, RosterService};
use roster_shared::constants::{
    EXPECTED_PARTICIPANTS_STEP, MAX_EXPECTED_PARTICIPANTS, MAX_TARGET_GROUP_SIZE,
    MIN_EXPECTED_PARTICIPANTS, MIN_TARGET_GROUP_SIZE,
};

pub const MAX_NAME_INPUT: usize = 100;
pub const MAX_PASSCODE_INPUT: usize = 32;

/// Screen states for the TUI state machine
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Registration,
    AdminGate,
    Dashboard,
    ConfirmClear,
    Message(String, bool), // Message, is_error
}

/// Dashboard parameter under keyboard focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parameter {
    ExpectedParticipants,
    TargetGroupSize,
}

impl Parameter {
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::ExpectedParticipants => "Total Expected Participants",
            Parameter::TargetGroupSize => "Target Participants Per Group",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Parameter::ExpectedParticipants => Parameter::TargetGroupSize,
            Parameter::TargetGroupSize => Parameter::ExpectedParticipants,
        }
    }
}

/// Work that runs after the next frame is drawn, so the in-progress state is
/// visible during the pause.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingAction {
    Register(String),
    GateCheck,
    GateSettle(GateStatus),
}

/// Application state
pub struct App<S: RosterStore, R: RandomSource, P: Pacer> {
    pub screen: Screen,
    pub should_quit: bool,
    pub pending: Option<PendingAction>,
    message_return: Screen,

    pub roster: RosterService<S, R, P>,
    gate: AdminGate,
    pacer: Arc<P>,
    export_path: PathBuf,

    // Registration form
    pub name_input: String,
    pub registration: RegistrationPhase,

    // Admin gate
    pub passcode_input: String,
    pub gate_status: GateStatus,

    // Dashboard
    pub focus: Parameter,
    pub group_offset: usize,
}

impl<S: RosterStore, R: RandomSource, P: Pacer> App<S, R, P> {
    pub fn new(
        roster: RosterService<S, R, P>,
        gate: AdminGate,
        pacer: Arc<P>,
        export_path: PathBuf,
    ) -> Self {
        Self {
            screen: Screen::Registration,
            should_quit: false,
            pending: None,
            message_return: Screen::Registration,
            roster,
            gate,
            pacer,
            export_path,
            name_input: String::new(),
            registration: RegistrationPhase::Idle,
            passcode_input: String::new(),
            gate_status: GateStatus::Idle,
            focus: Parameter::ExpectedParticipants,
            group_offset: 0,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn show_message(&mut self, message: impl Into<String>, is_error: bool) {
        if !matches!(self.screen, Screen::Message(_, _)) {
            self.message_return = match self.screen {
                Screen::ConfirmClear => Screen::Dashboard,
                ref other => other.clone(),
            };
        }
        self.screen = Screen::Message(message.into(), is_error);
    }

    pub fn dismiss_message(&mut self) {
        self.screen = self.message_return.clone();
    }

    /// Screen drawn underneath an open message popup.
    pub fn message_backdrop(&self) -> &Screen {
        &self.message_return
    }

    // Registration form

    pub fn push_name_char(&mut self, c: char) {
        if matches!(self.registration, RegistrationPhase::DuplicateRejected(_)) {
            self.registration = RegistrationPhase::Idle;
        }
        if self.name_input.chars().count() < MAX_NAME_INPUT {
            self.name_input.push(c);
        }
    }

    pub fn pop_name_char(&mut self) {
        if matches!(self.registration, RegistrationPhase::DuplicateRejected(_)) {
            self.registration = RegistrationPhase::Idle;
        }
        self.name_input.pop();
    }

    pub fn can_submit_name(&self) -> bool {
        !self.name_input.trim().is_empty() && !self.registration.is_busy()
    }

    /// Idle -> Validating, or straight to DuplicateRejected.
    pub fn submit_registration(&mut self) {
        if !self.can_submit_name() {
            return;
        }

        match self.roster.validate_name(&self.name_input) {
            Ok(name) => {
                self.registration = RegistrationPhase::Validating(name);
                self.pending = Some(PendingAction::Register(self.name_input.clone()));
            }
            Err(DomainError::DuplicateName(name)) => {
                self.registration = RegistrationPhase::DuplicateRejected(name);
            }
            Err(e) => self.show_message(e.to_string(), true),
        }
    }

    /// "New Registration" after a success card.
    pub fn reset_registration(&mut self) {
        self.registration = RegistrationPhase::Idle;
        self.name_input.clear();
    }

    pub fn registered(&self) -> Option<&Participant> {
        match &self.registration {
            RegistrationPhase::Success(p) => Some(p),
            _ => None,
        }
    }

    // Admin gate

    pub fn open_gate(&mut self) {
        self.passcode_input.clear();
        self.gate_status = GateStatus::Idle;
        self.screen = Screen::AdminGate;
    }

    pub fn gate_accepts_input(&self) -> bool {
        matches!(self.gate_status, GateStatus::Idle | GateStatus::Denied) && !self.is_busy()
    }

    pub fn push_passcode_char(&mut self, c: char) {
        if self.gate_accepts_input() && self.passcode_input.len() < MAX_PASSCODE_INPUT {
            self.passcode_input.push(c);
        }
    }

    pub fn pop_passcode_char(&mut self) {
        if self.gate_accepts_input() {
            self.passcode_input.pop();
        }
    }

    pub fn submit_passcode(&mut self) {
        if !self.gate_accepts_input() {
            return;
        }
        self.gate_status = GateStatus::Checking;
        self.pending = Some(PendingAction::GateCheck);
    }

    // Dashboard

    pub fn leave_dashboard(&mut self) {
        self.reset_registration();
        self.group_offset = 0;
        self.screen = Screen::Registration;
    }

    pub fn groups_up(&mut self) {
        self.group_offset = self.group_offset.saturating_sub(1);
    }

    pub fn groups_down(&mut self) {
        let last = self.roster.config().active_group_count.saturating_sub(1) as usize;
        if self.group_offset < last {
            self.group_offset += 1;
        }
    }

    pub async fn adjust_focused(&mut self, increase: bool) -> anyhow::Result<()> {
        let config = self.roster.config();
        let result = match self.focus {
            Parameter::ExpectedParticipants => {
                let next = step(
                    config.expected_participant_count,
                    EXPECTED_PARTICIPANTS_STEP,
                    increase,
                    MIN_EXPECTED_PARTICIPANTS,
                    MAX_EXPECTED_PARTICIPANTS,
                );
                self.roster.set_expected(next).await
            }
            Parameter::TargetGroupSize => {
                let next = step(
                    config.target_group_size,
                    1,
                    increase,
                    MIN_TARGET_GROUP_SIZE,
                    MAX_TARGET_GROUP_SIZE,
                );
                self.roster.set_group_size(next).await
            }
        };

        match result {
            Ok(updated) => {
                let last = updated.active_group_count.saturating_sub(1) as usize;
                self.group_offset = self.group_offset.min(last);
            }
            Err(e) => {
                error!("Failed to update configuration: {}", e);
                self.show_message(format!("Failed to save settings: {}", e), true);
            }
        }
        Ok(())
    }

    pub async fn export_roster(&mut self) -> anyhow::Result<()> {
        let csv = self.roster.export_csv();
        let rows = self.roster.participants().len();

        match tokio::fs::write(&self.export_path, csv).await {
            Ok(()) => {
                info!("Exported {} rows to {}", rows, self.export_path.display());
                self.show_message(
                    format!("Exported {} participants to {}", rows, self.export_path.display()),
                    false,
                );
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.show_message(format!("Export failed: {}", e), true);
            }
        }
        Ok(())
    }

    pub async fn clear_roster(&mut self) -> anyhow::Result<()> {
        match self.roster.clear().await {
            Ok(count) => {
                self.group_offset = 0;
                self.show_message(format!("Purged {} registrations", count), false);
            }
            Err(e) => self.show_message(format!("Clear failed: {}", e), true),
        }
        Ok(())
    }

    /// Runs the paced action queued by the last key press.
    pub async fn run_pending(&mut self) -> anyhow::Result<()> {
        let Some(action) = self.pending.take() else {
            return Ok(());
        };

        match action {
            PendingAction::Register(input) => match self.roster.register(&input).await {
                Ok(participant) => {
                    self.registration = RegistrationPhase::Success(participant);
                    self.name_input.clear();
                }
                Err(DomainError::DuplicateName(name)) => {
                    self.registration = RegistrationPhase::DuplicateRejected(name);
                }
                Err(e) => {
                    error!("Registration failed: {}", e);
                    self.registration = RegistrationPhase::Idle;
                    self.show_message(format!("Registration failed: {}", e), true);
                }
            },
            PendingAction::GateCheck => {
                let verdict = self.gate.check(self.pacer.as_ref(), &self.passcode_input).await;
                self.gate_status = verdict;
                self.pending = Some(PendingAction::GateSettle(verdict));
            }
            PendingAction::GateSettle(verdict) => {
                let landing = self.gate.settle(self.pacer.as_ref(), verdict).await;
                self.passcode_input.clear();
                self.gate_status = GateStatus::Idle;
                if landing == GateStatus::Granted {
                    self.group_offset = 0;
                    self.screen = Screen::Dashboard;
                }
            }
        }
        Ok(())
    }
}

/// Slider step with clamping to `min..=max`.
fn step(current: u32, by: u32, increase: bool, min: u32, max: u32) -> u32 {
    let next = if increase {
        current.saturating_add(by)
    } else {
        current.saturating_sub(by)
    };
    next.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::step;

    #[test]
    fn test_step_clamps_to_slider_range() {
        assert_eq!(step(50, 5, true, 10, 500), 55);
        assert_eq!(step(10, 5, false, 10, 500), 10);
        assert_eq!(step(498, 5, true, 10, 500), 500);
        assert_eq!(step(2, 1, false, 2, 20), 2);
        assert_eq!(step(20, 1, true, 2, 20), 20);
    }
}
