use crate::domain::models::{Booking, Car, CreateBooking};
use crate::domain::user::{RegisterUser, User};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Default deployment target. Override per environment via
/// `RentalClient::new`.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Error body shape produced by the backend.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct RentalClient {
    base_url: String,
    http: reqwest::Client,
}

impl RentalClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    pub fn with_default_base_url() -> Result<Self, ClientError> {
        Self::new(DEFAULT_BASE_URL)
    }

    #[instrument(skip(self))]
    pub async fn list_cars(&self) -> Result<Vec<Car>, ClientError> {
        let resp = self.http.get(self.url("/cars")).send().await?;
        Self::parse(resp).await
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn register_user(&self, req: &RegisterUser) -> Result<User, ClientError> {
        let resp = self.http.post(self.url("/users")).json(req).send().await?;
        Self::parse(resp).await
    }

    #[instrument(skip(self, req), fields(user_id = req.user_id, car_id = req.car_id))]
    pub async fn create_booking(&self, req: &CreateBooking) -> Result<Booking, ClientError> {
        let resp = self.http.post(self.url("/book")).json(req).send().await?;
        Self::parse(resp).await
    }

    #[instrument(skip(self))]
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, ClientError> {
        let resp = self.http.get(self.url("/bookings")).send().await?;
        Self::parse(resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Request succeeded");
            return Ok(resp.json::<T>().await?);
        }
        // 4xx bodies carry {"error": message}; fall back to the status text
        // when the body is not parseable.
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let client = RentalClient::new("http://10.0.0.5:9000/api").unwrap();
        assert_eq!(client.url("/cars"), "http://10.0.0.5:9000/api/cars");
    }

    #[test]
    fn test_default_base_url_targets_local_server() {
        let client = RentalClient::with_default_base_url().unwrap();
        assert_eq!(client.url("/book"), format!("{DEFAULT_BASE_URL}/book"));
    }

    #[test]
    fn test_api_error_display_includes_status_and_message() {
        let err = ClientError::Api {
            status: 404,
            message: "Car with id 999 does not exist".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Server returned 404: Car with id 999 does not exist"
        );
    }
}
