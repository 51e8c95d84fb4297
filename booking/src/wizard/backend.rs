use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::state::{BookingDraft, CategoryId, Vehicle, VehicleCategory, VehicleId, WheelCount};
use crate::error::{BookingError, ServiceError};

/// Remote collaborators the controller talks to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingBackend: Send + Sync {
    async fn categories(&self, wheel_count: WheelCount) -> Result<Vec<VehicleCategory>, ServiceError>;

    async fn models(&self, category_id: CategoryId) -> Result<Vec<Vehicle>, ServiceError>;

    async fn book(&self, request: BookingRequest) -> Result<BookingConfirmation, ServiceError>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub first_name: String,
    pub last_name: String,
    pub vehicle_id: VehicleId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TryFrom<&BookingDraft> for BookingRequest {
    type Error = BookingError;

    fn try_from(draft: &BookingDraft) -> Result<Self, Self::Error> {
        if draft.first_name.is_empty() {
            return Err(BookingError::MissingField("firstName"));
        }
        if draft.last_name.is_empty() {
            return Err(BookingError::MissingField("lastName"));
        }

        Ok(Self {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            vehicle_id: draft.vehicle_id.ok_or(BookingError::MissingField("vehicleId"))?,
            start_date: draft.start_date.ok_or(BookingError::MissingField("startDate"))?,
            end_date: draft.end_date.ok_or(BookingError::MissingField("endDate"))?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingConfirmation {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the booking service returns alongside a non-2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
