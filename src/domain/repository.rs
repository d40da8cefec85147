use crate::domain::models::{Booking, Car, CreateBooking, Price};
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;

/// The catalog. Identifiers are assigned by the repository in insertion
/// order, starting at 1.
#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn add(&self, name: &str, car_type: &str, price_per_day: Price) -> Result<Car>;
    async fn find_by_id(&self, id: u32) -> Result<Option<Car>>;
    async fn list(&self) -> Result<Vec<Car>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn add(&self, name: &str, email: &str) -> Result<User>;
    async fn find_by_id(&self, id: u32) -> Result<Option<User>>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Stores the booking unless its range overlaps an existing booking for
    /// the same car. Check and insert must be atomic: concurrent callers
    /// must never both succeed for overlapping ranges.
    async fn add_if_available(&self, req: CreateBooking) -> Result<Booking>;
    async fn list(&self) -> Result<Vec<Booking>>;
}
