use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A rentable car. Cars are seeded once at startup and never mutated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Car {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub car_type: String,
    pub price_per_day: Price,
}

/// Daily rental price. Non-negative; the catalog seed is the only producer.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Panics in debug builds when given a negative value; prices are only
    /// ever constructed from the catalog seed.
    pub fn new(value: f64) -> Self {
        debug_assert!(value >= 0.0, "price per day must be non-negative");
        Price(value)
    }

    pub fn inner(&self) -> f64 {
        self.0
    }
}

/// A reservation linking one user, one car and a date range.
/// Once stored, the end date is never before the start date.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Booking {
    pub id: u32,
    pub user_id: u32,
    pub car_id: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateBooking {
    pub user_id: u32,
    pub car_id: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
