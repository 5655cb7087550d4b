use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayClass {
    Weekday,
    Weekend,
}

impl DayClass {
    pub fn label(&self) -> &'static str {
        match self {
            DayClass::Weekday => "工作日",
            DayClass::Weekend => "周末",
        }
    }
}

/// Win/lose counts for one (day class, hour of day) slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyBucket {
    pub day_class: DayClass,
    pub hour: u32,
    pub total: u32,
    pub win_count: u32,
    pub lose_count: u32,
    pub win_rate: u32,
    pub lose_rate: u32,
}

impl HourlyBucket {
    pub fn new(day_class: DayClass, hour: u32) -> Self {
        Self {
            day_class,
            hour,
            total: 0,
            win_count: 0,
            lose_count: 0,
            win_rate: 0,
            lose_rate: 0,
        }
    }

    /// e.g. "周末 21:00-22:00"
    pub fn description(&self) -> String {
        format!(
            "{} {}:00-{}:00",
            self.day_class.label(),
            self.hour,
            self.hour + 1
        )
    }
}
