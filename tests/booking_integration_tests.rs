use actix_web::{App, test, web};
use car_rental_api::application::service::RentalService;
use car_rental_api::data::memory::{InMemoryBookingRepository, InMemoryCarRepository};
use car_rental_api::data::user_repository::InMemoryUserRepository;
use car_rental_api::domain::models::{Booking, CreateBooking};
use car_rental_api::domain::user::{RegisterUser, User};
use car_rental_api::presentation::handlers::{
    AppState, create_booking, json_error_handler, list_bookings, register_user,
};
use chrono::NaiveDate;
use std::sync::Arc;

macro_rules! setup_test {
    () => {{
        let cars = Arc::new(InMemoryCarRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let bookings = Arc::new(InMemoryBookingRepository::new());

        let service = RentalService::new(cars, users, bookings);
        service.seed_catalog().await.unwrap();

        let state = web::Data::new(AppState { service });

        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .route("/users", web::post().to(register_user))
                .route("/book", web::post().to(create_booking))
                .route("/bookings", web::get().to(list_bookings)),
        )
        .await;

        // One registered user; the catalog is seeded with three cars.
        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(&RegisterUser {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            })
            .to_request();
        let user: User = test::call_and_read_body_json(&app, req).await;

        (app, user)
    }};
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn booking_payload(user_id: u32, car_id: u32, start: &str, end: &str) -> CreateBooking {
    CreateBooking {
        user_id,
        car_id,
        start_date: date(start),
        end_date: date(end),
    }
}

macro_rules! booking_count {
    ($app:expr) => {{
        let req = test::TestRequest::get().uri("/bookings").to_request();
        let bookings: Vec<Booking> = test::call_and_read_body_json($app, req).await;
        bookings.len()
    }};
}

#[actix_web::test]
async fn test_valid_booking_is_created_and_echoes_input() {
    let (app, user) = setup_test!();

    let req = test::TestRequest::post()
        .uri("/book")
        .set_json(&booking_payload(user.id, 2, "2024-06-01", "2024-06-05"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 201);
    let booking: Booking = test::read_body_json(resp).await;
    assert_eq!(booking.id, 1);
    assert_eq!(booking.user_id, user.id);
    assert_eq!(booking.car_id, 2);
    assert_eq!(booking.start_date, date("2024-06-01"));
    assert_eq!(booking.end_date, date("2024-06-05"));

    assert_eq!(booking_count!(&app), 1);
}

#[actix_web::test]
async fn test_inverted_date_range_is_rejected() {
    let (app, user) = setup_test!();

    let req = test::TestRequest::post()
        .uri("/book")
        .set_json(&booking_payload(user.id, 2, "2024-06-01", "2024-05-30"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("start date"));

    assert_eq!(booking_count!(&app), 0);
}

#[actix_web::test]
async fn test_unknown_car_is_not_found() {
    let (app, user) = setup_test!();

    let req = test::TestRequest::post()
        .uri("/book")
        .set_json(&booking_payload(user.id, 999, "2024-06-01", "2024-06-05"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("999"));

    assert_eq!(booking_count!(&app), 0);
}

#[actix_web::test]
async fn test_unknown_user_is_not_found() {
    let (app, _user) = setup_test!();

    let req = test::TestRequest::post()
        .uri("/book")
        .set_json(&booking_payload(42, 1, "2024-06-01", "2024-06-05"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
    assert_eq!(booking_count!(&app), 0);
}

#[actix_web::test]
async fn test_overlapping_booking_is_a_conflict() {
    let (app, user) = setup_test!();

    let req = test::TestRequest::post()
        .uri("/book")
        .set_json(&booking_payload(user.id, 1, "2024-06-01", "2024-06-05"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/book")
        .set_json(&booking_payload(user.id, 1, "2024-06-03", "2024-06-07"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 409);
    assert_eq!(booking_count!(&app), 1);
}

#[actix_web::test]
async fn test_same_range_on_another_car_is_allowed() {
    let (app, user) = setup_test!();

    for car_id in [1, 2] {
        let req = test::TestRequest::post()
            .uri("/book")
            .set_json(&booking_payload(user.id, car_id, "2024-06-01", "2024-06-05"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);
    }

    assert_eq!(booking_count!(&app), 2);
}

#[actix_web::test]
async fn test_malformed_date_is_rejected_before_business_logic() {
    let (app, user) = setup_test!();

    let req = test::TestRequest::post()
        .uri("/book")
        .set_json(&serde_json::json!({
            "user_id": user.id,
            "car_id": 1,
            "start_date": "not-a-date",
            "end_date": "2024-06-05"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid request payload"));

    assert_eq!(booking_count!(&app), 0);
}

#[actix_web::test]
async fn test_booking_list_grows_only_on_success() {
    let (app, user) = setup_test!();

    assert_eq!(booking_count!(&app), 0);

    // Failure leaves the list unchanged
    let req = test::TestRequest::post()
        .uri("/book")
        .set_json(&booking_payload(user.id, 999, "2024-06-01", "2024-06-05"))
        .to_request();
    test::call_service(&app, req).await;
    assert_eq!(booking_count!(&app), 0);

    // Each success adds exactly one record, in insertion order
    for (i, (start, end)) in [("2024-06-01", "2024-06-05"), ("2024-06-06", "2024-06-09")]
        .iter()
        .enumerate()
    {
        let req = test::TestRequest::post()
            .uri("/book")
            .set_json(&booking_payload(user.id, 1, start, end))
            .to_request();
        let booking: Booking = test::call_and_read_body_json(&app, req).await;
        assert_eq!(booking.id, i as u32 + 1);
        assert_eq!(booking_count!(&app), i + 1);
    }
}
