use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lookup::Lookup;

pub type CategoryId = i64;
pub type VehicleId = i64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WizardStep {
    #[default]
    Identity,
    WheelCount,
    Category,
    Model,
    DateRange,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Identity,
        WizardStep::WheelCount,
        WizardStep::Category,
        WizardStep::Model,
        WizardStep::DateRange,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Previous step, floored at `Identity`.
    pub fn previous(self) -> WizardStep {
        match self.index() {
            0 => WizardStep::Identity,
            i => Self::ALL[i - 1],
        }
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Identity => "Your name",
            WizardStep::WheelCount => "Number of wheels",
            WizardStep::Category => "Vehicle type",
            WizardStep::Model => "Vehicle model",
            WizardStep::DateRange => "Rental dates",
        }
    }

    pub fn progress_percentage(self) -> u8 {
        match self {
            WizardStep::Identity => 20,
            WizardStep::WheelCount => 40,
            WizardStep::Category => 60,
            WizardStep::Model => 80,
            WizardStep::DateRange => 100,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::Identity => "identity",
            WizardStep::WheelCount => "wheel count",
            WizardStep::Category => "category",
            WizardStep::Model => "model",
            WizardStep::DateRange => "date range",
        };
        f.write_str(name)
    }
}

/// Wheel counts the lookup service knows about. Serialized as a bare number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum WheelCount {
    Two,
    Four,
}

impl WheelCount {
    pub const ALL: [WheelCount; 2] = [WheelCount::Two, WheelCount::Four];

    pub fn as_u8(self) -> u8 {
        match self {
            WheelCount::Two => 2,
            WheelCount::Four => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WheelCount::Two => "2 Wheels",
            WheelCount::Four => "4 Wheels",
        }
    }
}

impl TryFrom<u8> for WheelCount {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(WheelCount::Two),
            4 => Ok(WheelCount::Four),
            other => Err(format!("unsupported wheel count {other}")),
        }
    }
}

impl From<WheelCount> for u8 {
    fn from(value: WheelCount) -> Self {
        value.as_u8()
    }
}

impl fmt::Display for WheelCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleCategory {
    pub id: CategoryId,
    pub name: String,
    pub wheel_count: WheelCount,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub model_name: String,
    pub category: VehicleCategory,
}

/// Everything collected across the wizard steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub first_name: String,
    pub last_name: String,
    pub wheel_count: Option<WheelCount>,
    pub category_id: Option<CategoryId>,
    pub vehicle_id: Option<VehicleId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl BookingDraft {
    pub fn is_empty(&self) -> bool {
        *self == BookingDraft::default()
    }

    /// Completion predicate for `step`. No cross-field checks, end may precede start.
    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Identity => !self.first_name.is_empty() && !self.last_name.is_empty(),
            WizardStep::WheelCount => self.wheel_count.is_some(),
            WizardStep::Category => self.category_id.is_some(),
            WizardStep::Model => self.vehicle_id.is_some(),
            WizardStep::DateRange => self.start_date.is_some() && self.end_date.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LookupStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LookupStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LookupStatus::Loading)
    }
}

/// Read-only snapshot the frontends render from.
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    pub step: WizardStep,
    pub draft: BookingDraft,

    pub categories: Lookup<WheelCount, VehicleCategory>,
    pub models: Lookup<CategoryId, Vehicle>,

    // Workflow control
    pub can_proceed: bool,
    pub can_go_back: bool,
    pub submitting: bool,
    pub progress_percentage: u8,

    // Rejected actions, cleared on the next dispatched action
    pub validation_errors: Vec<String>,
}

impl WizardState {
    pub fn new() -> Self {
        let mut state = Self::default();
        state.refresh_controls();
        state
    }

    pub fn has_errors(&self) -> bool {
        !self.validation_errors.is_empty()
    }

    pub fn is_current_step_complete(&self) -> bool {
        self.draft.is_step_complete(self.step)
    }

    pub fn can_submit(&self) -> bool {
        self.step.is_last() && self.is_current_step_complete() && !self.submitting
    }

    pub fn selected_category(&self) -> Option<&VehicleCategory> {
        let id = self.draft.category_id?;
        self.categories.items().iter().find(|c| c.id == id)
    }

    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        let id = self.draft.vehicle_id?;
        self.models.items().iter().find(|v| v.id == id)
    }

    pub(crate) fn refresh_controls(&mut self) {
        self.can_proceed = if self.step.is_last() {
            self.can_submit()
        } else {
            self.is_current_step_complete()
        };
        self.can_go_back = self.step != WizardStep::Identity;
        self.progress_percentage = self.step.progress_percentage();
    }
}
