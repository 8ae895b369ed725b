use serde::{Deserialize, Serialize};

/// Day counts offered by the settings screens for expiry reminders.
pub const STANDARD_REMINDER_DAYS: [u32; 4] = [90, 60, 30, 7];

/// A single "remind me N days before expiry" toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderThreshold {
    pub days: u32,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

impl ReminderThreshold {
    pub const fn on(days: u32) -> Self {
        Self {
            days,
            enabled: true,
        }
    }

    pub const fn off(days: u32) -> Self {
        Self {
            days,
            enabled: false,
        }
    }
}

/// Expiry monitoring settings attached to a key-number type or document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub reminders: Vec<ReminderThreshold>,
}

impl MonitoringConfig {
    pub fn new(enabled: bool, reminders: Vec<ReminderThreshold>) -> Self {
        Self { enabled, reminders }
    }

    pub fn disabled() -> Self {
        Self::new(false, Vec::new())
    }

    /// Build the 90/60/30/7 toggle set used by document types.
    pub fn from_day_flags(enabled: bool, d90: bool, d60: bool, d30: bool, d7: bool) -> Self {
        let reminders = STANDARD_REMINDER_DAYS
            .into_iter()
            .zip([d90, d60, d30, d7])
            .map(|(days, on)| ReminderThreshold { days, enabled: on })
            .collect();
        Self::new(enabled, reminders)
    }

    /// Largest switched-on reminder threshold, or 0 when monitoring is off or
    /// nothing is switched on.
    pub fn effective_window(&self) -> u32 {
        self.active_thresholds().first().copied().unwrap_or(0)
    }

    /// Switched-on thresholds, largest first, without duplicates.
    pub fn active_thresholds(&self) -> Vec<u32> {
        if !self.enabled {
            return Vec::new();
        }

        let mut days: Vec<u32> = self
            .reminders
            .iter()
            .filter(|reminder| reminder.enabled)
            .map(|reminder| reminder.days)
            .collect();
        days.sort_unstable_by(|a, b| b.cmp(a));
        days.dedup();
        days
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self::from_day_flags(true, false, false, true, false)
    }
}

fn enabled_by_default() -> bool {
    true
}
