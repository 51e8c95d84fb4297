use booking::wizard::{BookingBackend, BookingRequest, WheelCount};
use booking::{ApiClient, BookingConfig, ServiceError};
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = BookingConfig::default().with_api_url(format!("{}/api/", server.uri()));
    ApiClient::new(&config)
}

fn booking_request() -> BookingRequest {
    BookingRequest {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        vehicle_id: 10,
        start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
    }
}

#[tokio::test]
async fn test_categories_query_by_wheel_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles/categories"))
        .and(query_param("wheelCount", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Sedan", "wheelCount": 4},
            {"id": 2, "name": "SUV", "wheelCount": 4}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let categories = tokio_test::assert_ok!(client.categories(WheelCount::Four).await);

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Sedan");
    assert_eq!(categories[1].id, 2);
    assert_eq!(categories[1].wheel_count, WheelCount::Four);
}

#[tokio::test]
async fn test_models_query_by_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles/models"))
        .and(query_param("categoryId", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 10, "modelName": "Civic", "category": {"id": 1, "name": "Sedan", "wheelCount": 4}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let models = client_for(&server).models(1).await.unwrap();

    assert_eq!(models.len(), 1);
    assert_eq!(models[0].model_name, "Civic");
    assert_eq!(models[0].category.name, "Sedan");
}

#[tokio::test]
async fn test_booking_posts_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/vehicles/booking"))
        .and(body_json(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "vehicleId": 10,
            "startDate": "2025-06-01",
            "endDate": "2025-06-05"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Booked!"})))
        .expect(1)
        .mount(&server)
        .await;

    let confirmation = client_for(&server).book(booking_request()).await.unwrap();
    assert_eq!(confirmation.message.as_deref(), Some("Booked!"));
}

#[tokio::test]
async fn test_booking_success_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/vehicles/booking"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let confirmation = client_for(&server).book(booking_request()).await.unwrap();
    assert_eq!(confirmation.message, None);
}

#[tokio::test]
async fn test_error_status_carries_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/vehicles/booking"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Vehicle unavailable"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).book(booking_request()).await.unwrap_err();

    assert_eq!(err.user_message(), Some("Vehicle unavailable"));
    match err {
        ServiceError::Status { status, .. } => assert_eq!(status, StatusCode::BAD_REQUEST),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_without_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles/categories"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .categories(WheelCount::Two)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Status { message: None, .. }));
    assert_eq!(err.user_message(), None);
}

#[tokio::test]
async fn test_malformed_lookup_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Tricycle", "wheelCount": 3}
        ])))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .categories(WheelCount::Four)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Decode { .. }));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let config = BookingConfig::default().with_api_url("http://127.0.0.1:9/api");
    let err = ApiClient::new(&config)
        .categories(WheelCount::Four)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Transport { .. }));
}
