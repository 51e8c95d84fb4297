pub mod actions;
pub mod backend;
pub mod controller;
pub mod lookup;
pub mod state;


pub use actions::{BookingAction, DraftField};
pub use backend::{BookingBackend, BookingConfirmation, BookingRequest};
pub use controller::{BookingController, CompletionKind, Settled};
pub use lookup::{Lookup, Ticket};
pub use state::{
    BookingDraft, CategoryId, LookupStatus, Vehicle, VehicleCategory, VehicleId, WheelCount,
    WizardState, WizardStep,
};

// Re-export for convenience
pub mod prelude {
    pub use super::actions::{BookingAction, DraftField};
    pub use super::backend::BookingBackend;
    pub use super::controller::{BookingController, Settled};
    pub use super::state::{
        BookingDraft, LookupStatus, Vehicle, VehicleCategory, WheelCount, WizardState, WizardStep,
    };
}
