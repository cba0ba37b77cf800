use crate::data::employee::Employee;
use crate::data::persistence::Persistable;
use anyhow::{Result, bail};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Time-entry defaults and week-view bounds. Loaded once at startup and handed
/// to whatever needs it; written back explicitly on exit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub default_start: NaiveTime,
    pub default_end: NaiveTime,
    pub break_minutes: u32,
    /// First hour row shown in the week view.
    pub day_start_hour: u8,
    /// Last hour row shown in the week view (inclusive).
    pub day_end_hour: u8,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            default_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            default_end: NaiveTime::from_hms_opt(17, 30, 0).unwrap_or_default(),
            break_minutes: 30,
            day_start_hour: 7,
            day_end_hour: 19,
        }
    }
}

impl AppSettings {
    pub fn validate(&self) -> Result<()> {
        if self.default_end <= self.default_start {
            bail!(
                "default_end {} must be after default_start {}",
                self.default_end,
                self.default_start
            );
        }
        if self.day_start_hour > self.day_end_hour || self.day_end_hour > 23 {
            bail!(
                "week view hours {}..{} must be ascending and within 0-23",
                self.day_start_hour,
                self.day_end_hour
            );
        }
        Ok(())
    }

    /// Net minutes of a default working day after the break.
    pub fn default_work_minutes(&self) -> i64 {
        let gross = (self.default_end - self.default_start).num_minutes();
        (gross - self.break_minutes as i64).max(0)
    }

    /// Hours shown as rows in the week view.
    pub fn hours(&self) -> std::ops::RangeInclusive<u8> {
        self.day_start_hour..=self.day_end_hour
    }
}

/// Shape of config.yaml: the settings block plus the employee record.
/// Both halves are read and written together so saving one never drops the other.
#[derive(Serialize, Deserialize, Default, Debug)]
pub struct ConfigFile {
    #[serde(default)]
    pub settings: AppSettings,
    #[serde(default)]
    pub employee: Employee,
}

impl Persistable for ConfigFile {
    fn filename() -> &'static str {
        "config.yaml"
    }
    fn is_json() -> bool {
        false
    }
}

impl ConfigFile {
    pub fn load_checked() -> Result<Self> {
        let config = Self::load()?;
        config.settings.validate()?;
        Ok(config)
    }
}

/// Saves updated settings while preserving the employee section already on disk.
/// Fails without writing when the existing file cannot be read or parsed.
pub fn save_settings_to(settings: &AppSettings, dir: &Path) -> Result<()> {
    let mut config = ConfigFile::load_from(dir)?;
    config.settings = settings.clone();
    config.save_to(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_app_settings_default_values() {
        let s = AppSettings::default();
        assert_eq!(s.default_start, t(9, 0));
        assert_eq!(s.default_end, t(17, 30));
        assert_eq!(s.break_minutes, 30);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_default_work_minutes() {
        let s = AppSettings::default();
        assert_eq!(s.default_work_minutes(), 480);
    }

    #[test]
    fn test_validate_rejects_end_before_start() {
        let s = AppSettings {
            default_start: t(17, 0),
            default_end: t(9, 0),
            ..AppSettings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_hours() {
        let s = AppSettings {
            day_start_hour: 20,
            day_end_hour: 8,
            ..AppSettings::default()
        };
        assert!(s.validate().is_err());
        let s = AppSettings {
            day_end_hour: 24,
            ..AppSettings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_hours_range() {
        let s = AppSettings::default();
        assert_eq!(s.hours().count(), 13);
    }

    #[test]
    fn test_config_missing_sections_use_defaults() {
        let config: ConfigFile = serde_norway::from_str("{}").unwrap();
        assert_eq!(config.settings, AppSettings::default());
        assert_eq!(config.employee, Employee::default());
    }

    #[test]
    fn test_save_settings_preserves_employee() {
        let tmp = TempDir::new().unwrap();
        let config = ConfigFile {
            settings: AppSettings::default(),
            employee: Employee {
                name: "Ada".to_string(),
                vacation_balance: 17.5,
                ..Employee::default()
            },
        };
        config.save_to(tmp.path()).unwrap();

        let updated = AppSettings {
            break_minutes: 45,
            ..AppSettings::default()
        };
        save_settings_to(&updated, tmp.path()).unwrap();

        let loaded = ConfigFile::load_from(tmp.path()).unwrap();
        assert_eq!(loaded.settings.break_minutes, 45);
        assert_eq!(loaded.employee.name, "Ada");
        assert_eq!(loaded.employee.vacation_balance, 17.5);
    }

    #[test]
    fn test_save_settings_refuses_unreadable_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        let original = "employee:\n  name: Ada\n  vacation_balance: 2.5\n  work_days: [mon, tue, funday]\n";
        std::fs::write(&path, original).unwrap();

        assert!(save_settings_to(&AppSettings::default(), tmp.path()).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_save_settings_creates_missing_config() {
        let tmp = TempDir::new().unwrap();
        save_settings_to(&AppSettings::default(), tmp.path()).unwrap();
        let loaded = ConfigFile::load_from(tmp.path()).unwrap();
        assert_eq!(loaded.employee, Employee::default());
    }
}
