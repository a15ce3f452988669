use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of reservation a booking tracks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BookingType {
    Flight,
    Hotel,
    Housing,
    Train,
    #[serde(rename = "Car Rental")]
    CarRental,
    Activity,
}

impl BookingType {
    pub const ALL: [BookingType; 6] = [
        BookingType::Flight,
        BookingType::Hotel,
        BookingType::Housing,
        BookingType::Train,
        BookingType::CarRental,
        BookingType::Activity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BookingType::Flight => "Flight",
            BookingType::Hotel => "Hotel",
            BookingType::Housing => "Housing",
            BookingType::Train => "Train",
            BookingType::CarRental => "Car Rental",
            BookingType::Activity => "Activity",
        }
    }

    /// Hotel and Housing both carry a listing link, city and price
    pub fn is_housing(&self) -> bool {
        matches!(self, BookingType::Hotel | BookingType::Housing)
    }
}

impl fmt::Display for BookingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown booking type: {0}")]
pub struct UnknownBookingType(pub String);

impl FromStr for BookingType {
    type Err = UnknownBookingType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BookingType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownBookingType(wanted.to_string()))
    }
}

/// One tracked reservation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    pub title: String,
    pub city: Option<String>,
    /// `YYYY-MM-DD`, or `start → end` when the range spans several days
    pub date: String,
    pub details: Option<String>,
    pub link: Option<String>,
    pub price: Option<String>,
}

impl Booking {
    pub fn new(booking_type: BookingType, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_type,
            title: title.into(),
            city: None,
            date: date.into(),
            details: None,
            link: None,
            price: None,
        }
    }
}
