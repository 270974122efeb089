//! User-visible strings, embedded from `res/labels.json`.

use serde::Deserialize;
use tracing::error;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub tooltip: String,
    pub desktop: String,
    pub autorun: String,
    pub exit: String,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            tooltip: "Virtual Desktop Indicator".to_string(),
            desktop: "Desktop".to_string(),
            autorun: "Start application at Windows startup".to_string(),
            exit: "Exit".to_string(),
        }
    }
}

impl Labels {
    /// Tray tooltip, with the desktop number once it is known.
    pub fn tooltip_for(&self, desktop: Option<u32>) -> String {
        match desktop {
            Some(n) => format!("{} - {} {}", self.tooltip, self.desktop, n),
            None => self.tooltip.clone(),
        }
    }
}

/// Loads the embedded string table, falling back to built-in English text.
pub fn load() -> Labels {
    parse(include_str!("../../res/labels.json"))
}

fn parse(content: &str) -> Labels {
    serde_json::from_str(content).unwrap_or_else(|e| {
        error!("failed to parse label table: {e}");
        Labels::default()
    })
}
