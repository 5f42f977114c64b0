use std::collections::HashSet;

use crate::entry::Entry;

/// Exercises offered even before anything has been logged.
pub const BUILTIN_EXERCISES: &[&str] = &[
    "Kniebeuge",
    "Kreuzheben",
    "Bankdrücken",
    "Schulterdrücken",
    "Klimmzüge",
    "Rudern",
    "Dips",
    "Beinpresse",
];

/// Selectable exercise names: the built-ins followed by every distinct name in
/// `entries`, each exactly once, in first-seen order.
///
/// Names are compared exactly; `"kniebeuge"` and `"Kniebeuge"` are distinct.
#[must_use]
pub fn exercise_catalog(entries: &[Entry]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    BUILTIN_EXERCISES
        .iter()
        .copied()
        .chain(entries.iter().map(|entry| entry.exercise.as_str()))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mk(exercise: &str) -> Entry {
        Entry {
            id: format!("ent-{exercise}"),
            date: "2024-01-01".into(),
            exercise: exercise.into(),
            weight: 1.0,
            reps: None,
        }
    }

    #[test]
    fn empty_collection_yields_builtins() {
        let catalog = exercise_catalog(&[]);
        assert_eq!(catalog, BUILTIN_EXERCISES.to_vec());
    }

    #[test]
    fn custom_names_appended_once() {
        let entries = vec![mk("Curls"), mk("Kniebeuge"), mk("Curls"), mk("Ausfallschritt")];
        let catalog = exercise_catalog(&entries);
        assert_eq!(catalog.len(), BUILTIN_EXERCISES.len() + 2);
        assert_eq!(&catalog[BUILTIN_EXERCISES.len()..], ["Curls", "Ausfallschritt"]);
        assert_eq!(catalog.iter().filter(|n| *n == "Kniebeuge").count(), 1);
    }

    #[test]
    fn case_variants_are_distinct() {
        let catalog = exercise_catalog(&[mk("kniebeuge")]);
        assert!(catalog.contains(&"kniebeuge".to_string()));
        assert!(catalog.contains(&"Kniebeuge".to_string()));
    }
}
