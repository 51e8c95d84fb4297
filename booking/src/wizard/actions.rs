use chrono::NaiveDate;

use super::state::{CategoryId, VehicleId, WheelCount};

/// One assignment to a draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    FirstName(String),
    LastName(String),
    WheelCount(Option<WheelCount>),
    Category(Option<CategoryId>),
    Vehicle(Option<VehicleId>),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
}

impl DraftField {
    pub fn name(&self) -> &'static str {
        match self {
            DraftField::FirstName(_) => "firstName",
            DraftField::LastName(_) => "lastName",
            DraftField::WheelCount(_) => "wheelCount",
            DraftField::Category(_) => "categoryId",
            DraftField::Vehicle(_) => "vehicleId",
            DraftField::StartDate(_) => "startDate",
            DraftField::EndDate(_) => "endDate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingAction {
    // Workflow control
    Advance,
    Retreat,
    Reset,

    // Data updates
    SetField(DraftField),

    Submit,
}

impl BookingAction {
    pub fn description(&self) -> &'static str {
        match self {
            BookingAction::Advance => "Advancing to next step",
            BookingAction::Retreat => "Going back to previous step",
            BookingAction::Reset => "Resetting booking",
            BookingAction::SetField(_) => "Updating booking field",
            BookingAction::Submit => "Submitting booking",
        }
    }
}
