use crate::domain::error::DomainError;
use crate::domain::models::{Booking, Car, CreateBooking, Price};
use crate::domain::repository::{BookingRepository, CarRepository, UserRepository};
use crate::domain::user::{RegisterUser, User};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Demonstration fleet loaded at startup. The catalog has no write endpoint,
/// so this is the only source of cars.
const SEED_CARS: [(&str, &str, f64); 3] = [
    ("Peugeot 208", "Economy", 45.0),
    ("BMW X5", "SUV", 120.0),
    ("Tesla Model 3", "Electric", 150.0),
];

pub struct RentalService<C, U, B> {
    cars: Arc<C>,
    users: Arc<U>,
    bookings: Arc<B>,
}

impl<C, U, B> RentalService<C, U, B>
where
    C: CarRepository,
    U: UserRepository,
    B: BookingRepository,
{
    pub fn new(cars: Arc<C>, users: Arc<U>, bookings: Arc<B>) -> Self {
        Self {
            cars,
            users,
            bookings,
        }
    }

    /// Populates the catalog with the demonstration fleet.
    pub async fn seed_catalog(&self) -> Result<()> {
        for (name, car_type, price) in SEED_CARS {
            let car = self.cars.add(name, car_type, Price::new(price)).await?;
            info!(car_id = car.id, name = %car.name, "Seeded catalog car");
        }
        Ok(())
    }

    pub async fn list_cars(&self) -> Result<Vec<Car>> {
        self.cars.list().await
    }

    #[instrument(skip(self), fields(email = %req.email))]
    pub async fn register_user(&self, req: RegisterUser) -> Result<User> {
        if req.name.trim().is_empty() || req.email.trim().is_empty() {
            warn!("Registration rejected, missing name or email");
            return Err(DomainError::Validation("Missing name or email".to_string()).into());
        }

        // No duplicate-email check: the prototype deliberately allows
        // multiple registrations with the same address.
        let user = self.users.add(&req.name, &req.email).await?;
        info!(user_id = user.id, email = %user.email, "User registered successfully");
        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = req.user_id, car_id = req.car_id))]
    pub async fn create_booking(&self, req: CreateBooking) -> Result<Booking> {
        // Range check comes first: an inverted range is rejected even when
        // the identifiers are also bad.
        if req.end_date < req.start_date {
            warn!(
                start = %req.start_date,
                end = %req.end_date,
                "Booking rejected, end date precedes start date"
            );
            return Err(DomainError::InvalidDateRange.into());
        }

        if self.users.find_by_id(req.user_id).await?.is_none() {
            return Err(DomainError::NotFound(format!(
                "User with id {} does not exist",
                req.user_id
            ))
            .into());
        }

        if self.cars.find_by_id(req.car_id).await?.is_none() {
            return Err(DomainError::NotFound(format!(
                "Car with id {} does not exist",
                req.car_id
            ))
            .into());
        }

        // The repository performs the availability check and the insert in
        // one critical section, so concurrent requests for the same car
        // cannot both claim an overlapping range.
        let booking = self.bookings.add_if_available(req).await?;
        info!(
            booking_id = booking.id,
            user_id = booking.user_id,
            car_id = booking.car_id,
            "Booking created successfully"
        );
        Ok(booking)
    }

    pub async fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.bookings.list().await
    }
}
