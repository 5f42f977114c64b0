//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_exercise() -> String {
    "Kniebeuge".to_string()
}

/// Default width of the text bar chart, in columns.
const fn default_chart_width() -> u16 {
    40
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Exercise preselected by `chart` when none is given.
    #[serde(default = "default_exercise")]
    pub default_exercise: String,

    /// Maximum bar length of the text chart.
    #[serde(default = "default_chart_width")]
    pub chart_width: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_exercise: default_exercise(),
            chart_width: default_chart_width(),
        }
    }
}
