//! JSON file import and export.

use std::collections::HashSet;

use chrono::NaiveDate;
use lift_core::Entry;
use lift_core::ids::{PREFIX_ENTRY, generate_unique_id};
use serde_json::Value;

use crate::error::{ImportError, StoreError};

/// A serialized collection ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// `liftlog-export-YYYY-MM-DD.json`
    pub file_name: String,
    /// Pretty-printed JSON array of entries.
    pub contents: String,
}

impl Export {
    /// Serialize `entries` as an export dated `date`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialize` if serialization fails.
    pub fn new(entries: &[Entry], date: NaiveDate) -> Result<Self, StoreError> {
        Ok(Self {
            file_name: format!("liftlog-export-{}.json", date.format("%Y-%m-%d")),
            contents: serde_json::to_string_pretty(entries)?,
        })
    }
}

/// Parse an import file into clean entries.
///
/// Elements lacking a non-empty date, a non-empty exercise or a finite numeric
/// weight are dropped. Elements without a usable id get a fresh one that
/// collides with no id in the file. `reps` survives only as a positive
/// integer. Duplicates are left for the caller to resolve.
///
/// # Errors
///
/// Returns `ImportError::InvalidJson` if `contents` is not JSON and
/// `ImportError::NotAnArray` if the top level is anything but an array.
pub fn parse_import(contents: &str) -> Result<Vec<Entry>, StoreError> {
    let value: Value =
        serde_json::from_str(contents).map_err(|e| ImportError::InvalidJson(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(ImportError::NotAnArray.into());
    };

    let candidates: Vec<(Option<String>, Entry)> = items.iter().filter_map(clean).collect();
    let mut taken: HashSet<String> = candidates
        .iter()
        .filter_map(|(id, _)| id.clone())
        .collect();

    let mut entries = Vec::with_capacity(candidates.len());
    for (id, mut entry) in candidates {
        entry.id = match id {
            Some(id) => id,
            None => {
                let fresh = generate_unique_id(PREFIX_ENTRY, |c| taken.contains(c))?;
                taken.insert(fresh.clone());
                fresh
            }
        };
        entries.push(entry);
    }
    Ok(entries)
}

/// One array element to an entry with its id (if usable) split out.
fn clean(item: &Value) -> Option<(Option<String>, Entry)> {
    let date = non_blank(item.get("date")?)?;
    let exercise = non_blank(item.get("exercise")?)?;
    let weight = item.get("weight")?.as_f64().filter(|w| w.is_finite())?;
    let reps = item
        .get("reps")
        .and_then(Value::as_u64)
        .filter(|r| *r > 0)
        .and_then(|r| u32::try_from(r).ok());
    let id = item.get("id").and_then(non_blank);

    Some((
        id,
        Entry {
            id: String::new(),
            date,
            exercise,
            weight,
            reps,
        },
    ))
}

fn non_blank(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
