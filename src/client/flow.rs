use crate::domain::models::{Car, CreateBooking};
use chrono::NaiveDate;

/// The client-side booking screen, modelled as an explicit state machine.
/// All transitions are pure; network effects live in the drivers in
/// `client::mod` and report back via `catalog_loaded`, `catalog_failed`,
/// `submission_succeeded` and `submission_failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Idle,
    LoadingCatalog,
    CatalogDisplayed {
        cars: Vec<Car>,
    },
    SelectingDates {
        cars: Vec<Car>,
        car_id: u32,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Submitting {
        cars: Vec<Car>,
        car_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    },
}

#[derive(Debug)]
pub struct BookingFlow {
    user_id: u32,
    state: FlowState,
    last_error: Option<String>,
}

impl BookingFlow {
    pub fn new(user_id: u32) -> Self {
        Self {
            user_id,
            state: FlowState::Idle,
            last_error: None,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Message from the most recent failure, kept for display until the next
    /// successful transition.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn load_catalog(&mut self) {
        if matches!(self.state, FlowState::Idle) {
            self.state = FlowState::LoadingCatalog;
        }
    }

    pub fn catalog_loaded(&mut self, cars: Vec<Car>) {
        if matches!(self.state, FlowState::LoadingCatalog) {
            self.last_error = None;
            self.state = FlowState::CatalogDisplayed { cars };
        }
    }

    pub fn catalog_failed(&mut self, message: String) {
        if matches!(self.state, FlowState::LoadingCatalog) {
            self.last_error = Some(message);
            self.state = FlowState::Idle;
        }
    }

    /// Starts date selection for a displayed car. Unknown identifiers are
    /// ignored.
    pub fn select_car(&mut self, car_id: u32) {
        let state = std::mem::replace(&mut self.state, FlowState::Idle);
        self.state = match state {
            FlowState::CatalogDisplayed { cars } if cars.iter().any(|c| c.id == car_id) => {
                FlowState::SelectingDates {
                    cars,
                    car_id,
                    start: None,
                    end: None,
                }
            }
            other => other,
        };
    }

    /// Sets the start date. A start date later than a previously chosen end
    /// date clears the end date.
    pub fn pick_start_date(&mut self, date: NaiveDate) {
        if let FlowState::SelectingDates { start, end, .. } = &mut self.state {
            *start = Some(date);
            if end.is_some_and(|e| e < date) {
                *end = None;
            }
        }
    }

    pub fn pick_end_date(&mut self, date: NaiveDate) {
        if let FlowState::SelectingDates { end, .. } = &mut self.state {
            *end = Some(date);
        }
    }

    /// Moves to the submitting state and returns the outgoing payload, or
    /// `None` when either date is missing (submission is disabled).
    pub fn submit(&mut self) -> Option<CreateBooking> {
        let state = std::mem::replace(&mut self.state, FlowState::Idle);
        match state {
            FlowState::SelectingDates {
                cars,
                car_id,
                start: Some(start),
                end: Some(end),
            } => {
                let payload = CreateBooking {
                    user_id: self.user_id,
                    car_id,
                    start_date: start,
                    end_date: end,
                };
                self.state = FlowState::Submitting {
                    cars,
                    car_id,
                    start,
                    end,
                };
                Some(payload)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Clears transient state and returns to the previous screen.
    pub fn submission_succeeded(&mut self) {
        if matches!(self.state, FlowState::Submitting { .. }) {
            self.last_error = None;
            self.state = FlowState::Idle;
        }
    }

    /// Returns to date selection with both dates intact so the user can
    /// retry.
    pub fn submission_failed(&mut self, message: String) {
        let state = std::mem::replace(&mut self.state, FlowState::Idle);
        self.state = match state {
            FlowState::Submitting {
                cars,
                car_id,
                start,
                end,
            } => {
                self.last_error = Some(message);
                FlowState::SelectingDates {
                    cars,
                    car_id,
                    start: Some(start),
                    end: Some(end),
                }
            }
            other => other,
        };
    }
}
