//! Shift Model (排班班次)

use super::staff::StaffId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type ShiftId = i64;

/// Shift status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    /// 準備就緒
    Ready,
    /// 進行中
    Ongoing,
    /// 待排班
    #[default]
    Pending,
}

impl ShiftStatus {
    /// Label shown in the schedule table and the CSV export
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready => "準備就緒",
            Self::Ongoing => "進行中",
            Self::Pending => "待排班",
        }
    }
}

/// Hour + minute of a shift boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub const MAX_HOUR: u8 = 23;
    pub const MAX_MINUTE: u8 = 59;

    /// `None` when hour > 23 or minute > 59
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > Self::MAX_HOUR || minute > Self::MAX_MINUTE {
            None
        } else {
            Some(Self { hour, minute })
        }
    }

    /// Clamp raw form input into range, as the time inputs do while typing
    pub fn clamped(hour: i64, minute: i64) -> Self {
        Self {
            hour: hour.clamp(0, Self::MAX_HOUR as i64) as u8,
            minute: minute.clamp(0, Self::MAX_MINUTE as i64) as u8,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Shift template: supplies the display label and the default time window
///
/// Any other `shiftType` value loads as [`ShiftPreset::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShiftPreset {
    #[default]
    Morning,
    Noon,
    Evening,
    /// 未知班別，標籤為空
    #[serde(other)]
    Other,
}

impl ShiftPreset {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "早班",
            Self::Noon => "午班",
            Self::Evening => "晚班",
            Self::Other => "",
        }
    }

    pub fn default_start(&self) -> TimeOfDay {
        match self {
            Self::Morning | Self::Other => TimeOfDay { hour: 8, minute: 0 },
            Self::Noon => TimeOfDay { hour: 12, minute: 0 },
            Self::Evening => TimeOfDay { hour: 17, minute: 0 },
        }
    }

    pub fn default_end(&self) -> TimeOfDay {
        match self {
            Self::Morning | Self::Other => TimeOfDay { hour: 12, minute: 0 },
            Self::Noon => TimeOfDay { hour: 17, minute: 0 },
            Self::Evening => TimeOfDay { hour: 22, minute: 0 },
        }
    }
}

/// Shift record
///
/// Field names on the wire match the merchant schedule document
/// (`shiftType`, `staffNeeded`, `startHour`, `assignedStaffIds`, ...).
/// The display name is derived and never stored; a legacy `shiftName`
/// field in older documents is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: ShiftId,
    /// Calendar date as entered (YYYY-MM-DD), no time-zone semantics
    pub date: String,
    #[serde(default)]
    pub shift_type: ShiftPreset,
    /// Function needed for this shift (外場服務, 內場廚房, ...)
    pub role: String,
    pub staff_needed: u32,
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
    /// Insertion order is display order only
    #[serde(default)]
    pub assigned_staff_ids: Vec<StaffId>,
    #[serde(default)]
    pub status: ShiftStatus,
}

impl Shift {
    pub fn start(&self) -> TimeOfDay {
        TimeOfDay {
            hour: self.start_hour,
            minute: self.start_minute,
        }
    }

    pub fn end(&self) -> TimeOfDay {
        TimeOfDay {
            hour: self.end_hour,
            minute: self.end_minute,
        }
    }

    /// `"08:00 - 12:00"`
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start(), self.end())
    }

    /// `"早班 (08:00 - 12:00)"`
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.shift_type.label(), self.time_range())
    }
}

/// Shift form input (create or update)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftInput {
    pub date: String,
    pub shift_type: ShiftPreset,
    pub role: String,
    pub staff_needed: u32,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub assigned_staff_ids: Vec<StaffId>,
    pub status: ShiftStatus,
}

impl Default for ShiftInput {
    fn default() -> Self {
        Self::with_preset(ShiftPreset::default())
    }
}

impl ShiftInput {
    /// Empty form using `preset` and its default time window
    pub fn with_preset(preset: ShiftPreset) -> Self {
        Self {
            date: String::new(),
            shift_type: preset,
            role: String::new(),
            staff_needed: 1,
            start: preset.default_start(),
            end: preset.default_end(),
            assigned_staff_ids: Vec::new(),
            status: ShiftStatus::default(),
        }
    }

    /// Switch preset, resetting the time window to the preset defaults
    pub fn set_preset(&mut self, preset: ShiftPreset) {
        self.shift_type = preset;
        self.start = preset.default_start();
        self.end = preset.default_end();
    }
}

impl From<&Shift> for ShiftInput {
    fn from(shift: &Shift) -> Self {
        Self {
            date: shift.date.clone(),
            shift_type: shift.shift_type,
            role: shift.role.clone(),
            staff_needed: shift.staff_needed,
            start: shift.start(),
            end: shift.end(),
            assigned_staff_ids: shift.assigned_staff_ids.clone(),
            status: shift.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_shift() -> Shift {
        Shift {
            id: 1,
            date: "2025-11-21".into(),
            shift_type: ShiftPreset::Evening,
            role: "內場廚房".into(),
            staff_needed: 2,
            start_hour: 17,
            start_minute: 5,
            end_hour: 22,
            end_minute: 0,
            assigned_staff_ids: vec![3, 4],
            status: ShiftStatus::Ongoing,
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(sample_shift().display_name(), "晚班 (17:05 - 22:00)");
    }

    #[test]
    fn test_time_of_day_bounds() {
        assert!(TimeOfDay::new(23, 59).is_some());
        assert!(TimeOfDay::new(24, 0).is_none());
        assert!(TimeOfDay::new(0, 60).is_none());
        assert_eq!(TimeOfDay::clamped(99, -4), TimeOfDay { hour: 23, minute: 0 });
        assert_eq!(TimeOfDay::clamped(7, 75).to_string(), "07:59");
    }

    #[test]
    fn test_default_form_matches_morning_preset() {
        let input = ShiftInput::default();
        assert_eq!(input.shift_type, ShiftPreset::Morning);
        assert_eq!(input.start.to_string(), "08:00");
        assert_eq!(input.end.to_string(), "12:00");
        assert_eq!(input.staff_needed, 1);
        assert_eq!(input.status, ShiftStatus::Pending);
        assert!(input.date.is_empty() && input.role.is_empty());
    }

    #[test]
    fn test_set_preset_resets_window() {
        let mut input = ShiftInput::default();
        input.start = TimeOfDay::clamped(9, 30);
        input.set_preset(ShiftPreset::Noon);
        assert_eq!(input.start, ShiftPreset::Noon.default_start());
        assert_eq!(input.end.to_string(), "17:00");
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(sample_shift()).unwrap();
        assert_eq!(json["shiftType"], "evening");
        assert_eq!(json["staffNeeded"], 2);
        assert_eq!(json["startMinute"], 5);
        assert_eq!(json["assignedStaffIds"], serde_json::json!([3, 4]));
        assert_eq!(json["status"], "ongoing");
        assert!(json.get("shiftName").is_none());
    }

    #[test]
    fn test_legacy_record_with_shift_name_loads() {
        let json = r#"{
            "id": 1763700000000,
            "date": "2025-11-21",
            "shiftType": "morning",
            "role": "外場服務",
            "staffNeeded": 3,
            "startHour": 8,
            "startMinute": 0,
            "endHour": 12,
            "endMinute": 0,
            "assignedStaffIds": [],
            "status": "pending",
            "shiftName": "早班 (08:00 - 12:00)"
        }"#;
        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.display_name(), "早班 (08:00 - 12:00)");
        assert_eq!(shift.status.label(), "待排班");
    }

    #[test]
    fn test_unknown_shift_type_loads_with_empty_label() {
        let json = r#"{
            "id": 7, "date": "2025-11-21", "shiftType": "night", "role": "吧台",
            "staffNeeded": 1, "startHour": 22, "startMinute": 0,
            "endHour": 23, "endMinute": 30
        }"#;
        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.shift_type, ShiftPreset::Other);
        assert_eq!(shift.display_name(), " (22:00 - 23:30)");
        assert!(shift.assigned_staff_ids.is_empty());
    }
}
