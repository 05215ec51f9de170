//! Partitioning participants into numbered groups

use crate::domain::{Group, Participant};

/// Buckets `participants` into exactly `group_count` groups numbered
/// `1..=group_count`, preserving input order within each group.
///
/// Participants whose stored number falls outside the current count are left
/// out of every group. They stay in storage; see [`stale_participants`].
pub fn partition(participants: &[Participant], group_count: u32) -> Vec<Group> {
    let mut groups: Vec<Group> = (1..=group_count).map(Group::new).collect();

    for participant in participants {
        if participant.is_stale(group_count) {
            continue;
        }
        groups[(participant.group_number - 1) as usize]
            .members
            .push(participant.clone());
    }

    groups
}

/// The participants [`partition`] drops for this group count.
pub fn stale_participants(participants: &[Participant], group_count: u32) -> Vec<&Participant> {
    participants
        .iter()
        .filter(|p| p.is_stale(group_count))
        .collect()
}
