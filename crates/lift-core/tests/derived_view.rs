//! Derived view behaviour over a realistic snapshot.

use lift_core::entry::{Entry, normalize};
use lift_core::{BUILTIN_EXERCISES, exercise_catalog, filtered_series};

fn entry(id: &str, date: &str, exercise: &str, weight: f64, reps: Option<u32>) -> Entry {
    Entry {
        id: id.into(),
        date: date.into(),
        exercise: exercise.into(),
        weight,
        reps,
    }
}

#[test]
fn series_of_normalized_snapshot_is_date_ordered() {
    let snapshot = normalize(vec![
        entry("a", "2024-03-01", "Bankdrücken", 70.0, Some(5)),
        entry("b", "2024-01-15", "Bankdrücken", 65.0, Some(8)),
        entry("c", "2024-02-01", "Rudern", 50.0, None),
        entry("d", "2024-02-10", "Bankdrücken", 67.5, None),
    ]);

    let dates: Vec<&str> = filtered_series(&snapshot, "Bankdrücken")
        .map(|point| point.date)
        .collect();
    assert_eq!(dates, vec!["2024-01-15", "2024-02-10", "2024-03-01"]);
}

#[test]
fn series_serializes_as_chart_points() {
    let snapshot = vec![entry("a", "2024-01-01", "Dips", 10.0, None)];
    let points: Vec<_> = filtered_series(&snapshot, "Dips").collect();
    let json = serde_json::to_value(&points).unwrap();
    assert_eq!(json, serde_json::json!([{ "date": "2024-01-01", "weight": 10.0 }]));
}

#[test]
fn catalog_always_starts_with_builtins() {
    let snapshot = vec![
        entry("a", "2024-01-01", "Face Pulls", 15.0, None),
        entry("b", "2024-01-02", "Face Pulls", 17.5, None),
    ];
    let catalog = exercise_catalog(&snapshot);
    assert!(
        catalog
            .iter()
            .zip(BUILTIN_EXERCISES)
            .all(|(name, builtin)| name == *builtin)
    );
    assert_eq!(catalog.last().map(String::as_str), Some("Face Pulls"));
    assert_eq!(catalog.len(), BUILTIN_EXERCISES.len() + 1);
}
