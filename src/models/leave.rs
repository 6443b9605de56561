//! Read/write shapes for vacations, overtime and medical leave, and the
//! day-count rules derived from their date ranges.
//!
//! The two rules differ: vacations count working days, overtime counts
//! calendar days. The difference is kept as observed rather than unified.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::entities::{medical_leaves, overtimes, vacations};

/// Working days (Monday to Friday) in `[start, end]`, both inclusive.
/// An inverted range counts zero days.
#[must_use]
pub fn vacation_days(start: NaiveDate, end: NaiveDate) -> i64 {
    let count = start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .count();

    i64::try_from(count).unwrap_or(i64::MAX)
}

/// Calendar days in `[start, end]` without weekend exclusion.
/// An inverted range yields zero or a negative count, unclamped.
#[must_use]
pub fn overtime_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationDto {
    #[serde(default)]
    pub id: i32,
    pub employee_id: i32,
    #[serde(default)]
    pub employee_full_name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub vacation_type_id: i32,
    #[serde(default)]
    pub vacation_type: Option<String>,
    /// Computed on read, ignored on write.
    #[serde(default)]
    pub number_of_days: i64,
}

impl VacationDto {
    #[must_use]
    pub fn from_model(
        model: vacations::Model,
        employee_full_name: Option<String>,
        vacation_type: Option<String>,
    ) -> Self {
        Self {
            number_of_days: vacation_days(model.start_date, model.end_date),
            id: model.id,
            employee_id: model.employee_id,
            employee_full_name,
            start_date: model.start_date,
            end_date: model.end_date,
            vacation_type_id: model.vacation_type_id,
            vacation_type,
        }
    }

    #[must_use]
    pub const fn to_model(&self) -> vacations::Model {
        vacations::Model {
            id: self.id,
            employee_id: self.employee_id,
            start_date: self.start_date,
            end_date: self.end_date,
            vacation_type_id: self.vacation_type_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeDto {
    #[serde(default)]
    pub id: i32,
    pub employee_id: i32,
    #[serde(default)]
    pub employee_full_name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub overtime_type_id: i32,
    #[serde(default)]
    pub overtime_type: Option<String>,
    #[serde(default)]
    pub number_of_days: i64,
}

impl OvertimeDto {
    #[must_use]
    pub fn from_model(
        model: overtimes::Model,
        employee_full_name: Option<String>,
        overtime_type: Option<String>,
    ) -> Self {
        Self {
            number_of_days: overtime_days(model.start_date, model.end_date),
            id: model.id,
            employee_id: model.employee_id,
            employee_full_name,
            start_date: model.start_date,
            end_date: model.end_date,
            overtime_type_id: model.overtime_type_id,
            overtime_type,
        }
    }

    #[must_use]
    pub const fn to_model(&self) -> overtimes::Model {
        overtimes::Model {
            id: self.id,
            employee_id: self.employee_id,
            start_date: self.start_date,
            end_date: self.end_date,
            overtime_type_id: self.overtime_type_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalLeaveDto {
    #[serde(default)]
    pub id: i32,
    pub employee_id: i32,
    #[serde(default)]
    pub employee_full_name: Option<String>,
    pub date: NaiveDate,
    pub medical_diagnose: String,
    pub medical_recommendation: String,
}

impl MedicalLeaveDto {
    #[must_use]
    pub fn from_model(model: medical_leaves::Model, employee_full_name: Option<String>) -> Self {
        Self {
            id: model.id,
            employee_id: model.employee_id,
            employee_full_name,
            date: model.date,
            medical_diagnose: model.medical_diagnose,
            medical_recommendation: model.medical_recommendation,
        }
    }

    #[must_use]
    pub fn to_model(&self) -> medical_leaves::Model {
        medical_leaves::Model {
            id: self.id,
            employee_id: self.employee_id,
            date: self.date,
            medical_diagnose: self.medical_diagnose.clone(),
            medical_recommendation: self.medical_recommendation.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_vacation_days_skip_one_weekend() {
        // Friday through Monday
        assert_eq!(vacation_days(date(2024, 3, 15), date(2024, 3, 18)), 2);
        // Monday through the next Friday
        assert_eq!(vacation_days(date(2024, 3, 11), date(2024, 3, 22)), 10);
    }

    #[test]
    fn test_vacation_days_edges() {
        assert_eq!(vacation_days(date(2024, 3, 13), date(2024, 3, 13)), 1);
        assert_eq!(vacation_days(date(2024, 3, 16), date(2024, 3, 17)), 0);
        assert_eq!(vacation_days(date(2024, 3, 20), date(2024, 3, 18)), 0);
    }

    #[test]
    fn test_overtime_days_include_weekends() {
        assert_eq!(overtime_days(date(2024, 3, 15), date(2024, 3, 18)), 4);
        assert_eq!(overtime_days(date(2024, 3, 15), date(2024, 3, 15)), 1);
    }

    #[test]
    fn test_vacation_dto_computes_days_on_read() {
        let model = vacations::Model {
            id: 7,
            employee_id: 3,
            start_date: date(2024, 3, 15),
            end_date: date(2024, 3, 18),
            vacation_type_id: 1,
        };

        let dto = VacationDto::from_model(model.clone(), Some("Jane Doe".into()), None);
        assert_eq!(dto.number_of_days, 2);
        assert_eq!(dto.to_model(), model);
    }
}
