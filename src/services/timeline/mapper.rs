//! Bidirectional mapping between calendar days and horizontal pixel offsets.
//!
//! Static layout uses an exact fractional-month distance (day of month over
//! days in that month). Pointer drags use a coarser rule: one month-width of
//! pointer travel is always 30 days, whatever the calendar month length.

use chrono::NaiveDate;

use crate::utils::date::{
    date_from_month_index, first_of_month, fractional_months_between, month_index,
};

/// Days per month-width of pointer travel when translating drags.
pub const DRAG_DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateMapper {
    view_start: NaiveDate,
    month_width: f32,
}

impl DateMapper {
    pub fn new(view_start: NaiveDate, month_width: f32) -> Self {
        Self {
            view_start,
            month_width,
        }
    }

    pub fn view_start(&self) -> NaiveDate {
        self.view_start
    }

    pub fn month_width(&self) -> f32 {
        self.month_width
    }

    /// Pixel offset of the start of `date` from the view origin.
    pub fn to_offset(&self, date: NaiveDate) -> f32 {
        (fractional_months_between(self.view_start, date) * self.month_width as f64) as f32
    }

    /// Calendar day containing the pixel offset, rounded to the nearest day boundary.
    pub fn to_date(&self, offset: f32) -> NaiveDate {
        if self.month_width <= 0.0 {
            return self.view_start;
        }
        let months = offset as f64 / self.month_width as f64;
        date_from_month_index(month_index(self.view_start) + months)
    }

    /// First day of the month cell containing the pixel offset.
    pub fn month_at(&self, offset: f32) -> NaiveDate {
        if self.month_width <= 0.0 {
            return first_of_month(self.view_start);
        }
        let cells = (offset as f64 / self.month_width as f64).floor();
        date_from_month_index(month_index(self.view_start).floor() + cells)
    }

    /// Whole-day delta for a horizontal pointer displacement.
    pub fn drag_delta_days(&self, pixel_delta: f32) -> i64 {
        if self.month_width <= 0.0 {
            return 0;
        }
        let months = pixel_delta as f64 / self.month_width as f64;
        (months * DRAG_DAYS_PER_MONTH).round() as i64
    }

    /// Pixel displacement that [`drag_delta_days`](Self::drag_delta_days) maps back to `days`.
    pub fn pixels_for_drag_days(&self, days: i64) -> f32 {
        (days as f64 / DRAG_DAYS_PER_MONTH * self.month_width as f64) as f32
    }
}
