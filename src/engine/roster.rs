use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::model::shift::ShiftProfile;

use super::EngineConfig;

/// Immutable lookup of per-employee shift profiles, loaded once at startup
/// from the roster JSON. A missing file is a configuration error and fails
/// the load; a missing employee entry is routine and falls back to the
/// configured defaults.
#[derive(Debug, Clone)]
pub struct ShiftRoster {
    by_code: HashMap<u64, ShiftProfile>,
    default_hours: f64,
    default_sunday_duty: bool,
}

impl ShiftRoster {
    pub fn load(path: &Path, cfg: &EngineConfig) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("unable to read shift roster {}", path.display()))?;
        let profiles: Vec<ShiftProfile> = serde_json::from_str(&raw)
            .with_context(|| format!("shift roster {} is not valid JSON", path.display()))?;

        tracing::info!(count = profiles.len(), path = %path.display(), "Shift roster loaded");
        Ok(Self::from_profiles(profiles, cfg))
    }

    pub fn from_profiles(profiles: Vec<ShiftProfile>, cfg: &EngineConfig) -> Self {
        let mut by_code = HashMap::with_capacity(profiles.len());
        for p in profiles {
            if let Some(prev) = by_code.insert(p.employee_code, p) {
                tracing::warn!(
                    employee_code = prev.employee_code,
                    "Duplicate roster entry, keeping the later one"
                );
            }
        }
        Self {
            by_code,
            default_hours: cfg.default_shift_hours,
            default_sunday_duty: cfg.default_sunday_duty,
        }
    }

    /// Resolves `(standard_hours, sunday_duty)` for one employee. Never
    /// fails past this boundary.
    pub fn resolve(&self, employee_code: u64) -> (f64, bool) {
        match self.by_code.get(&employee_code) {
            Some(p) => (p.working_hours, p.sunday_duty),
            None => (self.default_hours, self.default_sunday_duty),
        }
    }

    pub fn profile_for(&self, employee_code: u64) -> ShiftProfile {
        let (working_hours, sunday_duty) = self.resolve(employee_code);
        ShiftProfile {
            employee_code,
            working_hours,
            sunday_duty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> ShiftRoster {
        ShiftRoster::from_profiles(
            vec![
                ShiftProfile {
                    employee_code: 1042,
                    working_hours: 8.5,
                    sunday_duty: true,
                },
                ShiftProfile {
                    employee_code: 1043,
                    working_hours: 10.0,
                    sunday_duty: false,
                },
            ],
            &EngineConfig::default(),
        )
    }

    #[test]
    fn known_employee_resolves_its_profile() {
        assert_eq!(roster().resolve(1042), (8.5, true));
    }

    #[test]
    fn unknown_employee_falls_back_to_defaults() {
        assert_eq!(roster().resolve(9999), (10.0, false));
    }

    #[test]
    fn missing_roster_file_is_a_load_error() {
        let err = ShiftRoster::load(
            Path::new("/nonexistent/shift_roster.json"),
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("unable to read shift roster"));
    }
}
