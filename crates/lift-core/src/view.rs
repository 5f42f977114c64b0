//! Derived views over an entry snapshot.
//!
//! Everything here is a pure function of an `&[Entry]` snapshot and the
//! selected exercise.
//! Nothing is cached; callers recompute after every change.

use serde::Serialize;

use crate::entry::Entry;

/// One chart sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint<'a> {
    pub date: &'a str,
    pub weight: f64,
}

/// Lazy `{date, weight}` sequence for one exercise.
///
/// Cloning a `Series` yields an independent cursor, so a consumer can walk the
/// same series any number of times without touching the snapshot again.
#[derive(Debug, Clone)]
pub struct Series<'a> {
    selected: Vec<&'a Entry>,
    pos: usize,
}

impl<'a> Iterator for Series<'a> {
    type Item = SeriesPoint<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.selected.get(self.pos)?;
        self.pos += 1;
        Some(SeriesPoint {
            date: &entry.date,
            weight: entry.weight,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.selected.len().saturating_sub(self.pos);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Series<'_> {}

/// Chart series for `exercise`, ascending by date.
///
/// Entries on the same date keep their snapshot order.
#[must_use]
pub fn filtered_series<'a>(entries: &'a [Entry], exercise: &str) -> Series<'a> {
    let mut selected: Vec<&Entry> = entries.iter().filter(|e| e.exercise == exercise).collect();
    if !selected.is_sorted_by(|a, b| a.date <= b.date) {
        selected.sort_by(|a, b| a.date.cmp(&b.date));
    }
    Series { selected, pos: 0 }
}

/// Headline numbers for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseSummary {
    pub exercise: String,
    pub count: usize,
    pub first_date: String,
    pub last_date: String,
    pub min_weight: f64,
    pub max_weight: f64,
    pub latest_weight: f64,
}

/// Summarize the series for `exercise`. `None` when nothing was logged for it.
#[must_use]
pub fn exercise_summary(entries: &[Entry], exercise: &str) -> Option<ExerciseSummary> {
    let mut series = filtered_series(entries, exercise);
    let first = series.next()?;

    let mut summary = ExerciseSummary {
        exercise: exercise.to_string(),
        count: 1,
        first_date: first.date.to_string(),
        last_date: first.date.to_string(),
        min_weight: first.weight,
        max_weight: first.weight,
        latest_weight: first.weight,
    };

    for point in series {
        summary.count += 1;
        summary.min_weight = summary.min_weight.min(point.weight);
        summary.max_weight = summary.max_weight.max(point.weight);
        summary.latest_weight = point.weight;
        point.date.clone_into(&mut summary.last_date);
    }

    Some(summary)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mk(date: &str, exercise: &str, weight: f64) -> Entry {
        Entry {
            id: format!("ent-{date}-{exercise}"),
            date: date.into(),
            exercise: exercise.into(),
            weight,
            reps: None,
        }
    }

    fn sample() -> Vec<Entry> {
        vec![
            mk("2024-01-01", "Kniebeuge", 75.0),
            mk("2024-01-02", "Kreuzheben", 120.0),
            mk("2024-01-05", "Kniebeuge", 80.0),
            mk("2024-01-09", "Kniebeuge", 77.5),
        ]
    }

    #[test]
    fn series_selects_only_matching_exercise() {
        let entries = sample();
        let points: Vec<SeriesPoint<'_>> = filtered_series(&entries, "Kniebeuge").collect();
        assert_eq!(
            points,
            vec![
                SeriesPoint { date: "2024-01-01", weight: 75.0 },
                SeriesPoint { date: "2024-01-05", weight: 80.0 },
                SeriesPoint { date: "2024-01-09", weight: 77.5 },
            ]
        );
    }

    #[test]
    fn series_is_restartable_via_clone() {
        let entries = sample();
        let series = filtered_series(&entries, "Kniebeuge");
        let first_pass: Vec<_> = series.clone().collect();
        let second_pass: Vec<_> = series.collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass.len(), 3);
    }

    #[test]
    fn series_is_date_ordered_for_unsorted_input() {
        let entries = vec![
            mk("2024-01-09", "Kniebeuge", 77.5),
            mk("2024-01-02", "Kreuzheben", 120.0),
            mk("2024-01-01", "Kniebeuge", 75.0),
            mk("2024-01-05", "Kniebeuge", 80.0),
        ];
        let dates: Vec<&str> = filtered_series(&entries, "Kniebeuge").map(|p| p.date).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-05", "2024-01-09"]);
    }

    #[test]
    fn series_for_unknown_exercise_is_empty() {
        let entries = sample();
        assert_eq!(filtered_series(&entries, "Dips").count(), 0);
    }

    #[test]
    fn summary_tracks_extremes_and_latest() {
        let entries = sample();
        let summary = exercise_summary(&entries, "Kniebeuge").unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.first_date, "2024-01-01");
        assert_eq!(summary.last_date, "2024-01-09");
        assert!((summary.min_weight - 75.0).abs() < f64::EPSILON);
        assert!((summary.max_weight - 80.0).abs() < f64::EPSILON);
        assert!((summary.latest_weight - 77.5).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_none_without_entries() {
        assert!(exercise_summary(&[], "Kniebeuge").is_none());
    }
}
