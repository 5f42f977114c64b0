//! Plain-text bar chart for a weight series.

use lift_core::{ExerciseSummary, Series};

const BAR: char = '█';

/// One line per point: date, a bar scaled to the heaviest lift, the weight.
#[must_use]
pub fn render_bars(series: &Series<'_>, width: u16) -> String {
    let max = series.clone().map(|point| point.weight).fold(0.0_f64, f64::max);

    series
        .clone()
        .map(|point| {
            let bar = BAR.to_string().repeat(bar_len(point.weight, max, width));
            format!("{}  {bar} {}", point.date, point.weight)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn render_heading(summary: &ExerciseSummary) -> String {
    format!(
        "{}: {} entries, {} → {}, {}–{} kg (latest {} kg)",
        summary.exercise,
        summary.count,
        summary.first_date,
        summary.last_date,
        summary.min_weight,
        summary.max_weight,
        summary.latest_weight
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_len(weight: f64, max: f64, width: u16) -> usize {
    if max <= 0.0 || weight <= 0.0 {
        return 0;
    }
    ((weight / max) * f64::from(width)).round() as usize
}

#[cfg(test)]
mod tests {
    use lift_core::{Entry, exercise_summary, filtered_series};
    use pretty_assertions::assert_eq;

    use super::*;

    fn mk(date: &str, weight: f64) -> Entry {
        Entry {
            id: format!("ent-{date}"),
            date: date.into(),
            exercise: "Kniebeuge".into(),
            weight,
            reps: None,
        }
    }

    #[test]
    fn bars_scale_to_heaviest() {
        let entries = vec![mk("2024-01-01", 50.0), mk("2024-01-05", 100.0)];
        let chart = render_bars(&filtered_series(&entries, "Kniebeuge"), 10);
        assert_eq!(
            chart,
            "2024-01-01  █████ 50\n2024-01-05  ██████████ 100"
        );
    }

    #[test]
    fn zero_weight_has_empty_bar() {
        let entries = vec![mk("2024-01-01", 0.0)];
        let chart = render_bars(&filtered_series(&entries, "Kniebeuge"), 10);
        assert_eq!(chart, "2024-01-01   0");
    }

    #[test]
    fn other_exercises_are_not_charted() {
        let entries = vec![mk("2024-01-01", 50.0)];
        assert_eq!(render_bars(&filtered_series(&entries, "Dips"), 10), "");
    }

    #[test]
    fn heading_lists_range() {
        let entries = vec![mk("2024-01-01", 75.0), mk("2024-01-05", 80.0)];
        let summary = exercise_summary(&entries, "Kniebeuge").unwrap();
        assert_eq!(
            render_heading(&summary),
            "Kniebeuge: 2 entries, 2024-01-01 → 2024-01-05, 75–80 kg (latest 80 kg)"
        );
    }
}
