//! Drives the controller against a mock HTTP service end to end.

use std::sync::Arc;
use std::time::Duration;

use booking::wizard::{CompletionKind, DraftField, Settled, WheelCount, WizardStep};
use booking::{BookingConfig, BookingController, ChannelNotifier, Notification, Severity};
use chrono::NaiveDate;
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connect(server: &MockServer) -> (BookingController, UnboundedReceiver<Notification>) {
    let config = BookingConfig::default().with_api_url(format!("{}/api", server.uri()));
    let (notifier, notifications) = ChannelNotifier::new();
    (booking::connect(&config, Arc::new(notifier)), notifications)
}

async fn mount_lookups(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/vehicles/categories"))
        .and(query_param("wheelCount", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Sedan", "wheelCount": 4},
            {"id": 2, "name": "SUV", "wheelCount": 4}
        ])))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/vehicles/models"))
        .and(query_param("categoryId", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 10, "modelName": "Civic", "category": {"id": 1, "name": "Sedan", "wheelCount": 4}}
        ])))
        .expect(1)
        .mount(server)
        .await;
}

async fn walk_to_date_range(controller: &mut BookingController) {
    controller.set_field(DraftField::FirstName("Grace".to_string()));
    controller.set_field(DraftField::LastName("Hopper".to_string()));
    controller.advance().unwrap();

    controller.set_field(DraftField::WheelCount(Some(WheelCount::Four)));
    controller.settle().await;
    controller.advance().unwrap();
    let names: Vec<_> = controller
        .state()
        .categories
        .items()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, ["Sedan", "SUV"]);

    controller.set_field(DraftField::Category(Some(1)));
    controller.settle().await;
    controller.advance().unwrap();
    assert_eq!(controller.state().models.items()[0].model_name, "Civic");

    controller.set_field(DraftField::Vehicle(Some(10)));
    controller.advance().unwrap();

    controller.set_field(DraftField::StartDate(NaiveDate::from_ymd_opt(2025, 6, 1)));
    controller.set_field(DraftField::EndDate(NaiveDate::from_ymd_opt(2025, 6, 5)));
    assert_eq!(controller.state().step, WizardStep::DateRange);
}

#[tokio::test]
async fn test_booking_walkthrough_resets_on_success() {
    let server = MockServer::start().await;
    mount_lookups(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/vehicles/booking"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Booked!"})))
        .expect(1)
        .mount(&server)
        .await;

    let (mut controller, mut notifications) = connect(&server);
    walk_to_date_range(&mut controller).await;

    controller.submit().await.unwrap();

    let state = controller.state();
    assert_eq!(state.step, WizardStep::Identity);
    assert!(state.draft.is_empty());
    assert!(state.categories.is_empty());
    assert!(state.models.is_empty());

    let notification = notifications.recv().await.unwrap();
    assert_eq!(notification.severity, Severity::Success);
    assert_eq!(notification.text, "Booked!");
}

#[tokio::test]
async fn test_rejected_booking_keeps_draft() {
    let server = MockServer::start().await;
    mount_lookups(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/vehicles/booking"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Vehicle unavailable"})),
        )
        .mount(&server)
        .await;

    let (mut controller, mut notifications) = connect(&server);
    walk_to_date_range(&mut controller).await;

    assert!(controller.submit().await.is_err());

    let state = controller.state();
    assert_eq!(state.step, WizardStep::DateRange);
    assert_eq!(state.draft.vehicle_id, Some(10));
    assert_eq!(state.draft.start_date, NaiveDate::from_ymd_opt(2025, 6, 1));
    assert_eq!(state.draft.end_date, NaiveDate::from_ymd_opt(2025, 6, 5));

    let notification = notifications.recv().await.unwrap();
    assert_eq!(notification.severity, Severity::Error);
    assert_eq!(notification.text, "Vehicle unavailable");
}

#[tokio::test]
async fn test_slow_superseded_lookup_does_not_win() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles/categories"))
        .and(query_param("wheelCount", "4"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1, "name": "Sedan", "wheelCount": 4}]))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles/categories"))
        .and(query_param("wheelCount", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 7, "name": "Scooter", "wheelCount": 2}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (mut controller, _notifications) = connect(&server);
    controller.set_field(DraftField::WheelCount(Some(WheelCount::Four)));
    controller.set_field(DraftField::WheelCount(Some(WheelCount::Two)));

    let settled = controller.settle().await;
    assert_eq!(settled.len(), 2);
    assert!(settled.contains(&Settled::Discarded(CompletionKind::Categories)));

    let categories = controller.state().categories.items();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Scooter");
    assert_eq!(categories[0].wheel_count, WheelCount::Two);
}

#[tokio::test]
async fn test_failed_lookup_notifies_and_stays_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles/models"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (mut controller, mut notifications) = connect(&server);
    controller.set_field(DraftField::Category(Some(3)));
    controller.settle().await;

    assert!(controller.state().models.is_empty());
    let notification = notifications.recv().await.unwrap();
    assert_eq!(notification.severity, Severity::Warning);
    assert_eq!(notification.title, "Could not load vehicle models");
}
