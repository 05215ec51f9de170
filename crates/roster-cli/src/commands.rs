//! One-shot subcommands. Each handler writes its report to `out` so the
//! output can be captured in tests.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context};
use tracing::info;

use roster_core::error::DomainError;
use roster_core::repositories::RosterStore;
use roster_core::services::{AdminGate, Pacer, RandomSource, RosterService};

/// Rejects admin commands whose passcode does not open the gate.
pub fn authorize(gate: &AdminGate, passcode: Option<&str>) -> anyhow::Result<()> {
    match passcode {
        Some(code) if gate.verify(code) => Ok(()),
        Some(_) => bail!("Invalid credentials"),
        None => bail!("This command requires --passcode"),
    }
}

pub async fn register<S, R, P>(
    roster: &mut RosterService<S, R, P>,
    name: &str,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    match roster.register(name).await {
        Ok(participant) => {
            writeln!(out, "Registered {} as {}", participant.name, participant.id)?;
            writeln!(out, "Group #{}", participant.group_number)?;
            Ok(())
        }
        Err(DomainError::DuplicateName(name)) => bail!("Identity already registered: {}", name),
        Err(e) => Err(e).context("Registration failed"),
    }
}

/// Plain-text rendition of the group view.
pub fn groups<S, R, P>(roster: &RosterService<S, R, P>, out: &mut impl Write) -> anyhow::Result<()>
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    let config = roster.config();
    writeln!(
        out,
        "Active groups: {} | Registered: {} / {}",
        config.active_group_count,
        roster.participants().len(),
        config.expected_participant_count
    )?;

    if roster.participants().is_empty() {
        writeln!(out, "Awaiting registrations")?;
        return Ok(());
    }

    for group in roster.groups() {
        writeln!(out)?;
        writeln!(out, "Group #{} ({} members)", group.number, group.len())?;
        if group.is_empty() {
            writeln!(out, "  Empty")?;
        }
        for member in &group.members {
            writeln!(out, "  {}  {}", member.id, member.name)?;
        }
    }

    let stale = roster.stale_count();
    if stale > 0 {
        writeln!(out)?;
        writeln!(
            out,
            "{} participants hold a group number above the active count and are not shown",
            stale
        )?;
    }
    Ok(())
}

/// Writes the CSV roster to `path`, or to `out` when no path is given.
pub async fn export<S, R, P>(
    roster: &RosterService<S, R, P>,
    path: Option<&Path>,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    let csv = roster.export_csv();
    match path {
        Some(path) => {
            tokio::fs::write(path, csv)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Exported {} rows to {}", roster.participants().len(), path.display());
            writeln!(
                out,
                "Exported {} participants to {}",
                roster.participants().len(),
                path.display()
            )?;
        }
        None => writeln!(out, "{}", csv)?,
    }
    Ok(())
}

pub async fn config<S, R, P>(
    roster: &mut RosterService<S, R, P>,
    expected: Option<u32>,
    group_size: Option<u32>,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    if let Some(n) = expected {
        roster.set_expected(n).await.context("Failed to save settings")?;
    }
    if let Some(n) = group_size {
        roster.set_group_size(n).await.context("Failed to save settings")?;
    }

    let config = roster.config();
    writeln!(out, "Expected participants: {}", config.expected_participant_count)?;
    writeln!(out, "Target group size:     {}", config.target_group_size)?;
    writeln!(out, "Active groups:         {}", config.active_group_count)?;
    Ok(())
}

pub async fn clear<S, R, P>(
    roster: &mut RosterService<S, R, P>,
    confirmed: bool,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    if !confirmed {
        bail!("Refusing to purge registrations without --yes");
    }
    let count = roster.clear().await.context("Clear failed")?;
    writeln!(out, "Purged {} registrations", count)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::services::{GateTimings, InstantPacer, SeededRandom};
    use roster_infrastructure::MemoryRosterStore;
    use std::sync::Arc;

    type TestRoster = RosterService<MemoryRosterStore, SeededRandom, InstantPacer>;

    async fn roster(store: Arc<MemoryRosterStore>) -> TestRoster {
        RosterService::open(store, SeededRandom::new(11), Arc::new(InstantPacer))
            .await
            .unwrap()
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_authorize() {
        let gate = AdminGate::new("NOVA2025", GateTimings::default());
        assert!(authorize(&gate, Some("nova2025")).is_ok());
        assert!(authorize(&gate, Some("wrong")).is_err());
        assert!(authorize(&gate, None).is_err());
    }

    #[tokio::test]
    async fn test_register_and_duplicate() {
        let store = Arc::new(MemoryRosterStore::new());
        let mut roster = roster(store.clone()).await;

        let mut out = Vec::new();
        register(&mut roster, "Alex Rivera", &mut out).await.unwrap();
        let text = output(out);
        assert!(text.starts_with("Registered ALEX RIVERA as ST-"));

        let err = register(&mut roster, "alex rivera", &mut Vec::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ALEX RIVERA"));
        assert_eq!(store.snapshot().unwrap().participants.len(), 1);
    }

    #[tokio::test]
    async fn test_groups_lists_every_group() {
        let mut roster = roster(Arc::new(MemoryRosterStore::new())).await;
        register(&mut roster, "Jordan", &mut Vec::new()).await.unwrap();

        let mut out = Vec::new();
        groups(&roster, &mut out).unwrap();
        let text = output(out);

        assert!(text.starts_with("Active groups: 5 | Registered: 1 / 50"));
        for n in 1..=5 {
            assert!(text.contains(&format!("Group #{} (", n)));
        }
        assert!(text.contains("JORDAN"));
    }

    #[tokio::test]
    async fn test_groups_empty_roster() {
        let roster = roster(Arc::new(MemoryRosterStore::new())).await;
        let mut out = Vec::new();
        groups(&roster, &mut out).unwrap();
        assert!(output(out).contains("Awaiting registrations"));
    }

    #[tokio::test]
    async fn test_export_to_file_and_stdout() {
        let mut roster = roster(Arc::new(MemoryRosterStore::new())).await;
        register(&mut roster, "Sam", &mut Vec::new()).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        export(&roster, Some(&path), &mut Vec::new()).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("ID,Name,GroupNumber\nST-"));
        assert!(!written.ends_with('\n'));

        let mut out = Vec::new();
        export(&roster, None, &mut out).await.unwrap();
        assert_eq!(output(out), format!("{}\n", written));
    }

    #[tokio::test]
    async fn test_config_updates_and_reports() {
        let store = Arc::new(MemoryRosterStore::new());
        let mut roster = roster(store.clone()).await;

        let mut out = Vec::new();
        config(&mut roster, None, Some(7), &mut out).await.unwrap();
        assert!(output(out).contains("Active groups:         8"));
        assert_eq!(store.snapshot().unwrap().config.active_group_count, 8);
    }

    #[tokio::test]
    async fn test_clear_requires_confirmation() {
        let store = Arc::new(MemoryRosterStore::new());
        let mut roster = roster(store.clone()).await;
        register(&mut roster, "Casey", &mut Vec::new()).await.unwrap();

        assert!(clear(&mut roster, false, &mut Vec::new()).await.is_err());
        assert_eq!(roster.participants().len(), 1);

        let mut out = Vec::new();
        clear(&mut roster, true, &mut out).await.unwrap();
        assert_eq!(output(out), "Purged 1 registrations\n");
        assert!(roster.participants().is_empty());
    }
}
