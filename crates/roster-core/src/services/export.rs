//! Roster export

use crate::domain::Participant;

pub const ROSTER_CSV_HEADER: &str = "ID,Name,GroupNumber";

/// Comma-separated roster in collection order.
///
/// Fields are written as-is: a name containing a comma produces an extra
/// column. Rows are joined by `\n` with no trailing newline.
pub fn render_roster_csv(participants: &[Participant]) -> String {
    let mut lines = Vec::with_capacity(participants.len() + 1);
    lines.push(ROSTER_CSV_HEADER.to_string());
    lines.extend(
        participants
            .iter()
            .map(|p| format!("{},{},{}", p.id, p.name, p.group_number)),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn participant(id: &str, name: &str, group_number: u32) -> Participant {
        Participant {
            id: id.to_string(),
            name: name.to_string(),
            group_number,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_empty_roster_is_header_only() {
        assert_eq!(render_roster_csv(&[]), "ID,Name,GroupNumber");
    }

    #[test]
    fn test_rows_follow_collection_order() {
        let csv = render_roster_csv(&[
            participant("ST-2002", "ROBIN", 4),
            participant("ST-1001", "CASEY", 1),
        ]);
        assert_eq!(csv, "ID,Name,GroupNumber\nST-2002,ROBIN,4\nST-1001,CASEY,1");
    }

    #[test]
    fn test_commas_are_not_escaped() {
        let csv = render_roster_csv(&[participant("ST-3003", "LEE, JORDAN", 2)]);
        assert_eq!(csv.lines().nth(1), Some("ST-3003,LEE, JORDAN,2"));
    }
}
