use crate::domain::error::DomainError;
use crate::domain::models::{Booking, Car, CreateBooking, Price};
use crate::domain::repository::{BookingRepository, CarRepository};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

// Entities are append-only in this prototype, so a Vec keeps insertion order
// and the next identifier is always len + 1.

#[derive(Clone)]
pub struct InMemoryCarRepository {
    storage: Arc<RwLock<Vec<Car>>>,
}

impl InMemoryCarRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryCarRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarRepository for InMemoryCarRepository {
    #[instrument(skip(self))]
    async fn add(&self, name: &str, car_type: &str, price_per_day: Price) -> Result<Car> {
        let mut storage = self.storage.write().await;
        let car = Car {
            id: storage.len() as u32 + 1,
            name: name.to_string(),
            car_type: car_type.to_string(),
            price_per_day,
        };
        storage.push(car.clone());
        debug!(car_id = car.id, name = %car.name, "Car added to catalog");
        Ok(car)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: u32) -> Result<Option<Car>> {
        let storage = self.storage.read().await;
        Ok(storage.iter().find(|c| c.id == id).cloned())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Car>> {
        trace!("Acquiring read lock for car storage");
        let storage = self.storage.read().await;
        Ok(storage.clone())
    }
}

#[derive(Clone)]
pub struct InMemoryBookingRepository {
    storage: Arc<RwLock<Vec<Booking>>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    #[instrument(skip(self), fields(user_id = req.user_id, car_id = req.car_id))]
    async fn add_if_available(&self, req: CreateBooking) -> Result<Booking> {
        // Availability test and insert share one write-lock section so two
        // concurrent requests for the same car cannot both pass the check.
        let mut storage = self.storage.write().await;
        let overlaps = storage.iter().any(|b| {
            b.car_id == req.car_id && req.start_date <= b.end_date && b.start_date <= req.end_date
        });
        if overlaps {
            debug!(car_id = req.car_id, "Car already booked for the period");
            return Err(DomainError::CarUnavailable.into());
        }
        let booking = Booking {
            id: storage.len() as u32 + 1,
            user_id: req.user_id,
            car_id: req.car_id,
            start_date: req.start_date,
            end_date: req.end_date,
        };
        storage.push(booking.clone());
        debug!(booking_id = booking.id, "Booking stored");
        Ok(booking)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Booking>> {
        trace!("Acquiring read lock for booking storage");
        let storage = self.storage.read().await;
        Ok(storage.clone())
    }
}
