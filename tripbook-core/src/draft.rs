use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{format_date_range, split_date_range};
use crate::infer::infer_listing;
use crate::models::{Booking, BookingType};

/// Title given to a housing booking when neither the user nor the link supplies one
pub const UNTITLED_STAY: &str = "Untitled stay";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Start date is required")]
    MissingDate,

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Unvalidated booking fields as entered in the form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingDraft {
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub price: String,
}

impl BookingDraft {
    pub fn new(booking_type: BookingType) -> Self {
        Self {
            booking_type,
            title: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            details: String::new(),
            link: String::new(),
            city: String::new(),
            price: String::new(),
        }
    }

    /// Prefills a draft from a stored booking, for the edit form
    pub fn from_booking(booking: &Booking) -> Self {
        let (start_date, end_date) = split_date_range(&booking.date);
        Self {
            booking_type: booking.booking_type,
            title: booking.title.clone(),
            start_date,
            end_date,
            details: booking.details.clone().unwrap_or_default(),
            link: booking.link.clone().unwrap_or_default(),
            city: booking.city.clone().unwrap_or_default(),
            price: booking.price.clone().unwrap_or_default(),
        }
    }

    /// Fills blank title and city from the listing link. Returns true if anything changed.
    pub fn apply_link_suggestion(&mut self) -> bool {
        if self.link.trim().is_empty() {
            return false;
        }
        let guess = infer_listing(&self.link);
        let mut changed = false;
        if self.title.trim().is_empty() {
            if let Some(name) = guess.name {
                self.title = name;
                changed = true;
            }
        }
        if self.city.trim().is_empty() {
            if let Some(city) = guess.city {
                self.city = city;
                changed = true;
            }
        }
        changed
    }

    /// Validates the draft and builds a booking with a fresh id.
    pub fn into_booking(mut self) -> Result<Booking, ValidationError> {
        let start = parse_date(&self.start_date)?.ok_or(ValidationError::MissingDate)?;
        let end = parse_date(&self.end_date)?.unwrap_or(start);

        let housing = self.booking_type.is_housing();
        if housing {
            self.apply_link_suggestion();
        }

        let mut title = self.title.trim().to_string();
        if title.is_empty() {
            if !housing {
                return Err(ValidationError::TitleRequired);
            }
            title = UNTITLED_STAY.to_string();
        }

        let mut booking = Booking::new(self.booking_type, title, format_date_range(start, end));
        booking.details = non_blank(self.details);
        if housing {
            booking.link = non_blank(self.link);
            booking.city = non_blank(self.city);
            booking.price = non_blank(self.price);
        }
        Ok(booking)
    }
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
