// Duplicate contact removal
//
// Contest rule: a repeat contact between the same ordered station pair on
// the same band and mode scores again only after the cooldown has elapsed
// since the previous contact. Duplicate chains propagate through
// intermediate contacts, so a run whose consecutive gaps are each under
// the cooldown collapses to its earliest contact even when the ends of
// the run are further apart than the cooldown itself.
//
// Input must be in canonical (station_a, station_b, mode, band, timestamp)
// order, which makes every run contiguous; the scan is a single forward
// pass building a fresh sequence, never mutating its input.

use chrono::Duration;

use crate::model::Contact;

/// Collapse each duplicate run to its earliest contact
pub fn deduplicate(contacts: &[Contact], cooldown: Duration) -> Vec<Contact> {
    let mut kept = Vec::with_capacity(contacts.len());
    let mut previous: Option<&Contact> = None;
    for contact in contacts {
        let duplicate = previous.map_or(false, |prev| {
            prev.station_a == contact.station_a
                && prev.station_b == contact.station_b
                && prev.mode == contact.mode
                && prev.band == contact.band
                && contact.timestamp - prev.timestamp < cooldown
        });
        if !duplicate {
            kept.push(contact.clone());
        }
        // The chain window advances over every record seen, kept or not
        previous = Some(contact);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContestConfig;
    use crate::model::contact::tests::raw;
    use crate::pipeline::ingest::ingest;

    fn cooldown() -> Duration {
        Duration::minutes(10)
    }

    fn contacts_at(minutes: &[i64]) -> Vec<Contact> {
        let rows: Vec<_> = minutes
            .iter()
            .map(|m| {
                raw(
                    "W2ABC",
                    "K1XYZ",
                    "CW",
                    14,
                    &format!("2017-08-21 14:{:02}:00", m),
                    "FN20",
                    "FN42",
                    "seqp_logs",
                )
            })
            .collect();
        ingest(&rows, &ContestConfig::default()).contacts
    }

    #[test]
    fn test_empty_input() {
        assert!(deduplicate(&[], cooldown()).is_empty());
    }

    #[test]
    fn test_single_contact_survives() {
        let contacts = contacts_at(&[5]);
        assert_eq!(deduplicate(&contacts, cooldown()), contacts);
    }

    #[test]
    fn test_chain_collapses_past_the_window() {
        // 0, 9, 18: each consecutive gap is under 10 minutes, so the whole
        // chain is one group even though 18 - 0 exceeds the cooldown
        let kept = deduplicate(&contacts_at(&[0, 9, 18]), cooldown());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].timestamp.format("%M").to_string(), "00");
    }

    #[test]
    fn test_chain_breaks_at_full_cooldown() {
        // 0, 9, 19: the 9 -> 19 gap reaches the cooldown, so 19 opens a
        // new group
        let kept = deduplicate(&contacts_at(&[0, 9, 19]), cooldown());
        let minutes: Vec<String> = kept
            .iter()
            .map(|c| c.timestamp.format("%M").to_string())
            .collect();
        assert_eq!(minutes, vec!["00", "19"]);
    }

    #[test]
    fn test_key_change_always_starts_a_group() {
        let rows = vec![
            raw("W2ABC", "K1XYZ", "CW", 14, "2017-08-21 14:00:00", "FN20", "FN42", "seqp_logs"),
            raw("W2ABC", "K1XYZ", "CW", 7, "2017-08-21 14:01:00", "FN20", "FN42", "seqp_logs"),
            raw("W2ABC", "K1XYZ", "SSB", 14, "2017-08-21 14:02:00", "FN20", "FN42", "seqp_logs"),
            raw("W2ABC", "N0CALL", "CW", 14, "2017-08-21 14:03:00", "FN20", "EM48", "seqp_logs"),
        ];
        let contacts = ingest(&rows, &ContestConfig::default()).contacts;
        assert_eq!(deduplicate(&contacts, cooldown()).len(), 4);
    }

    #[test]
    fn test_last_record_is_evaluated() {
        // The final record must be checked for group membership, not
        // passed through
        let kept = deduplicate(&contacts_at(&[0, 5]), cooldown());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let contacts = contacts_at(&[0, 9, 18, 30, 33, 50]);
        let once = deduplicate(&contacts, cooldown());
        let twice = deduplicate(&once, cooldown());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_is_untouched() {
        let contacts = contacts_at(&[0, 5, 30]);
        let before = contacts.clone();
        let _ = deduplicate(&contacts, cooldown());
        assert_eq!(contacts, before);
    }
}
