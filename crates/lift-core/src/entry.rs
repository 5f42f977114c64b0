use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One recorded observation: a load lifted for an exercise on a calendar date.
///
/// `date` is an ISO `YYYY-MM-DD` string. Collections are ordered by comparing
/// these strings lexically, which matches calendar order only because the
/// format is fixed-width.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: String,
    pub date: String,
    pub exercise: String,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
}

/// Stable sort by ascending date. Entries sharing a date keep their relative order.
pub fn sort_by_date(entries: &mut [Entry]) {
    entries.sort_by(|a, b| a.date.cmp(&b.date));
}

/// Bring an arbitrary list into collection form: unique ids, ascending dates.
///
/// When two entries share an id the later one wins, the same outcome an
/// upsert-by-id produces on the remote table.
#[must_use]
pub fn normalize(entries: Vec<Entry>) -> Vec<Entry> {
    let mut seen = HashSet::new();
    let mut kept: Vec<Entry> = entries
        .into_iter()
        .rev()
        .filter(|entry| seen.insert(entry.id.clone()))
        .collect();
    kept.reverse();
    sort_by_date(&mut kept);
    kept
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mk(id: &str, date: &str, weight: f64) -> Entry {
        Entry {
            id: id.into(),
            date: date.into(),
            exercise: "Kniebeuge".into(),
            weight,
            reps: None,
        }
    }

    #[test]
    fn sort_is_stable_for_equal_dates() {
        let mut entries = vec![
            mk("b", "2024-01-02", 2.0),
            mk("a", "2024-01-01", 1.0),
            mk("c", "2024-01-02", 3.0),
        ];
        sort_by_date(&mut entries);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn normalize_keeps_last_duplicate() {
        let entries = vec![
            mk("x", "2024-03-01", 50.0),
            mk("y", "2024-01-01", 60.0),
            mk("x", "2024-02-01", 70.0),
        ];
        let normalized = normalize(entries);
        assert_eq!(
            normalized,
            vec![mk("y", "2024-01-01", 60.0), mk("x", "2024-02-01", 70.0)]
        );
    }

    #[test]
    fn reps_are_omitted_from_json_when_absent() {
        let json = serde_json::to_value(mk("a", "2024-01-01", 80.0)).unwrap();
        assert!(json.get("reps").is_none());

        let with_reps = Entry {
            reps: Some(5),
            ..mk("a", "2024-01-01", 80.0)
        };
        let json = serde_json::to_value(with_reps).unwrap();
        assert_eq!(json["reps"], 5);
    }

    #[test]
    fn missing_reps_deserializes_as_none() {
        let entry: Entry = serde_json::from_str(
            r#"{"id":"a","date":"2024-01-01","exercise":"Rudern","weight":42.5}"#,
        )
        .unwrap();
        assert_eq!(entry.reps, None);
        assert!((entry.weight - 42.5).abs() < f64::EPSILON);
    }
}
