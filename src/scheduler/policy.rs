use crate::calendar;
use crate::model::StaffingPolicy;
use chrono::NaiveDate;

impl StaffingPolicy {
    pub fn is_public_holiday(&self, date: NaiveDate) -> bool {
        self.public_holidays.contains(&date)
    }

    /// Samedi/dimanche, ou jour férié quand les fériés comptent comme week-end.
    pub fn is_policy_weekend(&self, date: NaiveDate) -> bool {
        calendar::day_of_week(date).is_weekend()
            || (self.treat_public_holidays_as_weekends && self.is_public_holiday(date))
    }

    /// Effectifs requis `(jour, nuit)` pour `date`.
    pub fn required_staffing(&self, date: NaiveDate) -> (u32, u32) {
        if self.is_policy_weekend(date) {
            (self.weekend_day, self.weekend_night)
        } else {
            (self.weekday_day, self.weekday_night)
        }
    }
}
