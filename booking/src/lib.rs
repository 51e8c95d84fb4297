//! Multi-step vehicle booking wizard.
//!
//! [`wizard::BookingController`] holds the step and the draft, fetches the
//! categories for the chosen wheel count and the models for the chosen
//! category, and submits the booking. Frontends render from
//! [`wizard::WizardState`] and drive the controller with
//! [`wizard::BookingAction`]s.

pub mod config;
pub mod error;
pub mod http_client;
pub mod notify;
pub mod wizard;

use std::sync::Arc;

pub use config::BookingConfig;
pub use error::{BookingError, ConfigError, ServiceError};
pub use http_client::ApiClient;
pub use notify::{ChannelNotifier, Notification, Notifier, Severity};
pub use wizard::BookingController;

/// Controller wired to the HTTP services described by `config`.
pub fn connect(config: &BookingConfig, notifier: Arc<dyn Notifier>) -> BookingController {
    tracing::info!("Using booking service at {}", config.base_url());
    BookingController::new(Arc::new(ApiClient::new(config)), notifier)
}
