mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::TestApp;
use serde_json::{json, Value};

fn booking_ids(hotel: &Value) -> Vec<String> {
    hotel["bookings"].as_array().unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap().to_string())
        .collect()
}

async fn hotel_version(app: &TestApp, hotel_id: &str) -> i64 {
    sqlx::query_scalar("SELECT version FROM hotels WHERE id = ?")
        .bind(hotel_id)
        .fetch_one(&app.pool).await.unwrap()
}

#[tokio::test]
async fn test_create_booking_prices_the_stay() {
    let app = TestApp::new().await;
    let owner = app.register("owner@example.com", "password1").await;
    let guest = app.register("guest@example.com", "password1").await;
    let hotel = app.create_hotel(&owner, "Riverside").await;
    let hotel_id = hotel["id"].as_str().unwrap();

    let res = app.book(&guest, hotel_id, 10, 3).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["hotelId"], hotel_id);
    assert_eq!(res.body["userId"], app.user_id(&guest).await.as_str());
    assert_eq!(res.body["totalCost"], 300);

    let expected_check_in = (Utc::now() + Duration::days(10)).date_naive().to_string();
    assert_eq!(res.body["checkIn"], expected_check_in.as_str());
}

#[tokio::test]
async fn test_create_booking_validation() {
    let app = TestApp::new().await;
    let owner = app.register("owner@example.com", "password1").await;
    let guest = app.register("guest@example.com", "password1").await;
    let hotel = app.create_hotel(&owner, "Riverside").await;
    let hotel_id = hotel["id"].as_str().unwrap();

    // Zero nights
    assert_eq!(app.book(&guest, hotel_id, 5, 0).await.status, StatusCode::BAD_REQUEST);
    // Check-in already passed
    assert_eq!(app.book(&guest, hotel_id, -3, 2).await.status, StatusCode::BAD_REQUEST);
    // Unknown hotel
    assert_eq!(app.book(&guest, "missing-hotel", 5, 2).await.status, StatusCode::NOT_FOUND);

    let check_in = (Utc::now() + Duration::days(5)).date_naive();
    let res = app.request("POST", &format!("/api/hotels/{}/bookings", hotel_id), Some(&guest), Some(json!({
        "firstName": "Test",
        "lastName": "Guest",
        "email": "guest@example.com",
        "adultCount": 9,
        "childCount": 0,
        "checkIn": check_in.to_string(),
        "checkOut": (check_in + Duration::days(1)).to_string()
    }))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Guest count exceeds hotel capacity");

    let res = app.request("POST", &format!("/api/hotels/{}/bookings", hotel_id), Some(&guest), Some(json!({
        "firstName": "Test",
        "lastName": "Guest",
        "email": "guest@example.com",
        "adultCount": 1,
        "checkIn": "next tuesday",
        "checkOut": check_in.to_string()
    }))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["fields"][0]["field"], "checkIn");

    // Anonymous callers cannot book
    let res = app.request("POST", &format!("/api/hotels/{}/bookings", hotel_id), None, Some(json!({}))).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
        .fetch_one(&app.pool).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_my_bookings_only_shows_own_bookings() {
    let app = TestApp::new().await;
    let owner = app.register("owner@example.com", "password1").await;
    let u1 = app.register("u1@example.com", "password1").await;
    let u2 = app.register("u2@example.com", "password1").await;

    let hotel = app.create_hotel(&owner, "Shared").await;
    let hotel_id = hotel["id"].as_str().unwrap().to_string();

    let b1 = app.book_ok(&u1, &hotel_id, 10).await;
    let b2 = app.book_ok(&u2, &hotel_id, 20).await;
    let b1_id = b1["id"].as_str().unwrap().to_string();
    let b2_id = b2["id"].as_str().unwrap().to_string();

    let res = app.request("GET", "/api/my-bookings", Some(&u1), None).await;
    assert_eq!(res.status, StatusCode::OK);
    let hotels = res.body.as_array().unwrap();
    assert_eq!(hotels.len(), 1);
    assert_eq!(hotels[0]["id"], hotel_id.as_str());
    assert_eq!(hotels[0]["name"], "Shared");
    assert_eq!(booking_ids(&hotels[0]), vec![b1_id.clone()]);

    // U1 cancels B1; the hotel disappears from U1's view and B2 is untouched
    let res = app.request("DELETE", &format!("/api/my-bookings/{}?hotelId={}", b1_id, hotel_id), Some(&u1), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Booking cancelled successfully");

    let res = app.request("GET", "/api/my-bookings", Some(&u1), None).await;
    assert_eq!(res.body, json!([]));

    let res = app.request("GET", "/api/my-bookings", Some(&u2), None).await;
    let hotels = res.body.as_array().unwrap();
    assert_eq!(hotels.len(), 1);
    assert_eq!(booking_ids(&hotels[0]), vec![b2_id.clone()]);

    let res = app.request("DELETE", &format!("/api/my-bookings/{}?hotelId={}", b2_id, hotel_id), Some(&u2), None).await;
    assert_eq!(res.status, StatusCode::OK);
    let res = app.request("GET", "/api/my-bookings", Some(&u2), None).await;
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn test_my_bookings_groups_by_hotel() {
    let app = TestApp::new().await;
    let owner = app.register("owner@example.com", "password1").await;
    let guest = app.register("guest@example.com", "password1").await;

    let first = app.create_hotel(&owner, "First").await;
    let second = app.create_hotel(&owner, "Second").await;
    app.create_hotel(&owner, "Never Booked").await;

    let first_id = first["id"].as_str().unwrap();
    let second_id = second["id"].as_str().unwrap();

    app.book_ok(&guest, first_id, 5).await;
    app.book_ok(&guest, first_id, 15).await;
    app.book_ok(&guest, second_id, 25).await;

    let res = app.request("GET", "/api/my-bookings", Some(&guest), None).await;
    let hotels = res.body.as_array().unwrap();
    assert_eq!(hotels.len(), 2);

    for hotel in hotels {
        let expected = if hotel["id"] == first_id { 2 } else { 1 };
        assert_eq!(booking_ids(hotel).len(), expected);
    }

    let res = app.request("GET", "/api/my-bookings", None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cancel_booking_edge_cases() {
    let app = TestApp::new().await;
    let owner = app.register("owner@example.com", "password1").await;
    let guest = app.register("guest@example.com", "password1").await;
    let stranger = app.register("stranger@example.com", "password1").await;

    let hotel = app.create_hotel(&owner, "Riverside").await;
    let other_hotel = app.create_hotel(&owner, "Hillside").await;
    let hotel_id = hotel["id"].as_str().unwrap();
    let other_hotel_id = other_hotel["id"].as_str().unwrap();

    let booking = app.book_ok(&guest, hotel_id, 7).await;
    let booking_id = booking["id"].as_str().unwrap();

    // Missing hotelId
    let res = app.request("DELETE", &format!("/api/my-bookings/{}", booking_id), Some(&guest), None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    // Unknown hotel
    let res = app.request("DELETE", &format!("/api/my-bookings/{}?hotelId=missing", booking_id), Some(&guest), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "Hotel not found");

    // Booking belongs to a different hotel
    let res = app.request("DELETE", &format!("/api/my-bookings/{}?hotelId={}", booking_id, other_hotel_id), Some(&guest), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    // Somebody else's booking
    let res = app.request("DELETE", &format!("/api/my-bookings/{}?hotelId={}", booking_id, hotel_id), Some(&stranger), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "Booking not found");

    // Unauthenticated
    let res = app.request("DELETE", &format!("/api/my-bookings/{}?hotelId={}", booking_id, hotel_id), None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.request("DELETE", &format!("/api/my-bookings/{}?hotelId={}", booking_id, hotel_id), Some(&guest), None).await;
    assert_eq!(res.status, StatusCode::OK);

    // Repeat cancellation
    let res = app.request("DELETE", &format!("/api/my-bookings/{}?hotelId={}", booking_id, hotel_id), Some(&guest), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_failed_cancel_leaves_hotel_version_alone() {
    let app = TestApp::new().await;
    let owner = app.register("owner@example.com", "password1").await;
    let guest = app.register("guest@example.com", "password1").await;
    let hotel = app.create_hotel(&owner, "Riverside").await;
    let hotel_id = hotel["id"].as_str().unwrap();

    app.book_ok(&guest, hotel_id, 3).await;
    let before = hotel_version(&app, hotel_id).await;

    let res = app.request("DELETE", &format!("/api/my-bookings/unknown?hotelId={}", hotel_id), Some(&guest), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(hotel_version(&app, hotel_id).await, before);
}

#[tokio::test]
async fn test_out_of_range_inputs_are_rejected_without_writes() {
    let app = TestApp::new().await;
    let owner = app.register("owner@example.com", "password1").await;
    let guest = app.register("guest@example.com", "password1").await;

    let res = app.request("POST", "/api/my-hotels", Some(&owner), Some(json!({
        "name": "Gold Plated",
        "city": "Monaco",
        "country": "Monaco",
        "description": "Priced beyond reason",
        "type": "Palace",
        "adultCount": 100000,
        "childCount": 0,
        "facilities": ["Butler"],
        "pricePerNight": i64::MAX,
        "starRating": 5,
        "imageUrls": []
    }))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = res.body["fields"].as_array().unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["adultCount", "pricePerNight"]);

    let hotels: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hotels")
        .fetch_one(&app.pool).await.unwrap();
    assert_eq!(hotels, 0);

    let hotel = app.create_hotel(&owner, "Riverside").await;
    let hotel_id = hotel["id"].as_str().unwrap();

    // Check-out years ahead
    let res = app.book(&guest, hotel_id, 5, 4000).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Stays are limited to 365 nights");

    // Guest counts far above any hotel capacity
    let check_in = (Utc::now() + Duration::days(5)).date_naive();
    let res = app.request("POST", &format!("/api/hotels/{}/bookings", hotel_id), Some(&guest), Some(json!({
        "firstName": "Test",
        "lastName": "Guest",
        "email": "guest@example.com",
        "adultCount": i32::MAX,
        "childCount": i32::MAX,
        "checkIn": check_in.to_string(),
        "checkOut": (check_in + Duration::days(2)).to_string()
    }))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = res.body["fields"].as_array().unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["adultCount", "childCount"]);

    let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
        .fetch_one(&app.pool).await.unwrap();
    assert_eq!(bookings, 0);
    assert_eq!(hotel_version(&app, hotel_id).await, 0);
}

#[tokio::test]
async fn test_longest_stay_at_highest_rate_is_priced() {
    let app = TestApp::new().await;
    let owner = app.register("owner@example.com", "password1").await;
    let guest = app.register("guest@example.com", "password1").await;

    let hotel = app.create_hotel(&owner, "Riverside").await;
    let hotel_id = hotel["id"].as_str().unwrap();

    let mut update = hotel.clone();
    update["pricePerNight"] = json!(1_000_000);
    let res = app.request("PUT", &format!("/api/my-hotels/{}", hotel_id), Some(&owner), Some(update)).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.book(&guest, hotel_id, 1, 365).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["totalCost"], 365_000_000i64);
}
