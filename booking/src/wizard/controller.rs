use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::mpsc;

use super::actions::{BookingAction, DraftField};
use super::backend::{BookingBackend, BookingConfirmation, BookingRequest};
use super::lookup::Ticket;
use super::state::{CategoryId, Vehicle, VehicleCategory, WheelCount, WizardState, WizardStep};
use crate::error::{BookingError, ServiceError};
use crate::notify::{Notification, Notifier, Severity};

pub const SUCCESS_TITLE: &str = "Booking Successful";
pub const FAILURE_TITLE: &str = "Booking Failed";
pub const SUCCESS_FALLBACK: &str = "Your booking has been confirmed";
pub const FAILURE_FALLBACK: &str = "Booking request failed";

/// What an awaited completion turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    Categories,
    Models,
    Submission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied(CompletionKind),
    /// A lookup response that arrived after its key was superseded.
    Discarded(CompletionKind),
}

enum Completion {
    Categories(Ticket<WheelCount>, Result<Vec<VehicleCategory>, ServiceError>),
    Models(Ticket<CategoryId>, Result<Vec<Vehicle>, ServiceError>),
    Submission(Result<BookingConfirmation, ServiceError>),
}

/// Owns the wizard state and wires the draft to the remote lookups.
///
/// Lookups and dispatched submissions run on spawned tasks and report back
/// over a channel; only the controller writes state. Responses are applied by
/// [`update`](Self::update), [`poll`](Self::poll) or the `settle*` methods.
pub struct BookingController {
    // Current state - single source of truth
    state: WizardState,

    backend: Arc<dyn BookingBackend>,
    notifier: Arc<dyn Notifier>,

    // Action queue for sequential processing
    pending_actions: VecDeque<BookingAction>,

    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl BookingController {
    pub fn new(backend: Arc<dyn BookingBackend>, notifier: Arc<dyn Notifier>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: WizardState::new(),
            backend,
            notifier,
            pending_actions: VecDeque::new(),
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    /// UI reads this - immutable reference
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Number of lookups and submissions whose response has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Check if there is queued or outstanding work (for UI repaint requests)
    pub fn has_pending_work(&self) -> bool {
        !self.pending_actions.is_empty() || self.in_flight > 0
    }

    /// UI calls this - synchronous, just queues the action
    pub fn dispatch(&mut self, action: BookingAction) {
        tracing::debug!("Dispatching action: {}", action.description());
        self.pending_actions.push_back(action);
    }

    /// Call this each frame: processes queued actions, then applies whatever
    /// responses have already arrived. Never blocks.
    pub fn update(&mut self) {
        while let Some(action) = self.pending_actions.pop_front() {
            self.handle_action(action);
        }
        self.poll();
    }

    /// Applies every completion that is ready without waiting.
    pub fn poll(&mut self) -> Vec<Settled> {
        let mut settled = Vec::new();
        while let Ok(completion) = self.completions_rx.try_recv() {
            settled.push(self.apply(completion));
        }
        settled
    }

    /// Waits for the next lookup or submission to finish and applies it.
    /// Returns `None` when nothing is in flight.
    pub async fn settle_next(&mut self) -> Option<Settled> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.completions_rx.recv().await?;
        Some(self.apply(completion))
    }

    /// Waits until nothing is in flight.
    pub async fn settle(&mut self) -> Vec<Settled> {
        let mut settled = Vec::new();
        while let Some(s) = self.settle_next().await {
            settled.push(s);
        }
        settled
    }

    pub fn advance(&mut self) -> Result<WizardStep, BookingError> {
        let current = self.state.step;
        let next = current.next().ok_or(BookingError::NoNextStep)?;

        if !self.state.draft.is_step_complete(current) {
            return Err(BookingError::StepIncomplete(current));
        }

        self.state.step = next;
        self.state.refresh_controls();
        tracing::info!("Advanced to step: {:?}", next);
        Ok(next)
    }

    pub fn retreat(&mut self) -> WizardStep {
        self.state.step = self.state.step.previous();
        self.state.refresh_controls();
        tracing::info!("Went back to step: {:?}", self.state.step);
        self.state.step
    }

    pub fn set_field(&mut self, field: DraftField) {
        tracing::debug!(field = field.name(), "Updating draft field");

        match field {
            DraftField::FirstName(value) => self.state.draft.first_name = value,
            DraftField::LastName(value) => self.state.draft.last_name = value,
            DraftField::WheelCount(value) => {
                if self.state.draft.wheel_count != value {
                    self.state.draft.wheel_count = value;
                    // Category ids are not stable across wheel counts
                    self.state.draft.category_id = None;
                    self.state.draft.vehicle_id = None;
                    self.state.models.invalidate();

                    match value {
                        Some(wheel_count) => self.fetch_categories_for(wheel_count),
                        None => self.state.categories.invalidate(),
                    }
                }
            }
            DraftField::Category(value) => {
                if self.state.draft.category_id != value {
                    self.state.draft.category_id = value;
                    self.state.draft.vehicle_id = None;

                    match value {
                        Some(category_id) => self.fetch_models_for(category_id),
                        None => self.state.models.invalidate(),
                    }
                }
            }
            DraftField::Vehicle(value) => self.state.draft.vehicle_id = value,
            DraftField::StartDate(value) => self.state.draft.start_date = value,
            DraftField::EndDate(value) => self.state.draft.end_date = value,
        }

        self.state.refresh_controls();
    }

    /// Sends the draft to the booking service and waits for the answer.
    pub async fn submit(&mut self) -> Result<BookingConfirmation, BookingError> {
        let request = self.prepare_submission()?;
        let result = self.backend.book(request).await;
        let outcome = self.finish_submission(result);
        self.state.refresh_controls();
        outcome
    }

    /// Starts a submission on a spawned task; the outcome is applied by a
    /// later `update`, `poll` or `settle`.
    pub fn begin_submit(&mut self) -> Result<(), BookingError> {
        let request = self.prepare_submission()?;
        let backend = Arc::clone(&self.backend);

        let spawned = self.spawn_completion(async move {
            Completion::Submission(backend.book(request).await)
        });
        if let Err(e) = spawned {
            tracing::error!("Cannot submit booking without an async runtime: {}", e);
            self.state.submitting = false;
            self.state.refresh_controls();
            self.notifier.notify(Notification::new(
                Severity::Error,
                FAILURE_TITLE,
                FAILURE_FALLBACK,
            ));
            return Err(BookingError::NoRuntime);
        }
        Ok(())
    }

    /// Back to an empty draft at the first step. Lookups still in flight are
    /// discarded when they land. Refused while a submission is in flight so
    /// its outcome is reported against the draft that was sent.
    pub fn reset(&mut self) -> Result<(), BookingError> {
        if self.state.submitting {
            return Err(BookingError::SubmissionInFlight);
        }
        self.state.categories.invalidate();
        self.state.models.invalidate();

        let categories = std::mem::take(&mut self.state.categories);
        let models = std::mem::take(&mut self.state.models);
        self.state = WizardState {
            categories,
            models,
            ..WizardState::new()
        };
        self.state.refresh_controls();
        tracing::info!("Booking state reset");
        Ok(())
    }

    fn handle_action(&mut self, action: BookingAction) {
        tracing::debug!("Processing action: {}", action.description());
        self.state.validation_errors.clear();

        let result = match action {
            BookingAction::Advance => self.advance().map(|_| ()),
            BookingAction::Retreat => {
                self.retreat();
                Ok(())
            }
            BookingAction::Reset => self.reset().map(|()| self.pending_actions.clear()),
            BookingAction::SetField(field) => {
                self.set_field(field);
                Ok(())
            }
            BookingAction::Submit => self.begin_submit(),
        };

        if let Err(e) = result {
            tracing::warn!("Action rejected: {}", e);
            self.state.validation_errors.push(e.to_string());
        }
    }

    fn fetch_categories_for(&mut self, wheel_count: WheelCount) {
        let ticket = self.state.categories.begin(wheel_count);
        let backend = Arc::clone(&self.backend);
        tracing::debug!(wheel_count = %wheel_count, "Fetching vehicle categories");

        let spawned = self.spawn_completion(async move {
            Completion::Categories(ticket, backend.categories(wheel_count).await)
        });
        if let Err(e) = spawned {
            self.state.categories.accept(&ticket, Err::<Vec<VehicleCategory>, _>(e));
        }
    }

    fn fetch_models_for(&mut self, category_id: CategoryId) {
        let ticket = self.state.models.begin(category_id);
        let backend = Arc::clone(&self.backend);
        tracing::debug!(category_id, "Fetching vehicle models");

        let spawned = self.spawn_completion(async move {
            Completion::Models(ticket, backend.models(category_id).await)
        });
        if let Err(e) = spawned {
            self.state.models.accept(&ticket, Err::<Vec<Vehicle>, _>(e));
        }
    }

    fn spawn_completion<F>(&mut self, request: F) -> Result<(), TryCurrentError>
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let handle = Handle::try_current()?;
        let tx = self.completions_tx.clone();
        handle.spawn(async move {
            // The receiver lives as long as the controller
            let _ = tx.send(request.await);
        });
        self.in_flight += 1;
        Ok(())
    }

    fn apply(&mut self, completion: Completion) -> Settled {
        self.in_flight = self.in_flight.saturating_sub(1);

        let settled = match completion {
            Completion::Categories(ticket, result) => {
                let failure = result.as_ref().err().map(ToString::to_string);
                if self.state.categories.accept(&ticket, result) {
                    if let Some(reason) = failure {
                        self.lookup_failed("Could not load vehicle categories", reason);
                    }
                    Settled::Applied(CompletionKind::Categories)
                } else {
                    tracing::debug!(wheel_count = %ticket.key, "Discarding stale categories response");
                    Settled::Discarded(CompletionKind::Categories)
                }
            }
            Completion::Models(ticket, result) => {
                let failure = result.as_ref().err().map(ToString::to_string);
                if self.state.models.accept(&ticket, result) {
                    if let Some(reason) = failure {
                        self.lookup_failed("Could not load vehicle models", reason);
                    }
                    Settled::Applied(CompletionKind::Models)
                } else {
                    tracing::debug!(category_id = ticket.key, "Discarding stale models response");
                    Settled::Discarded(CompletionKind::Models)
                }
            }
            Completion::Submission(result) => {
                // Already reported through the notifier
                let _ = self.finish_submission(result);
                Settled::Applied(CompletionKind::Submission)
            }
        };

        self.state.refresh_controls();
        settled
    }

    fn lookup_failed(&self, title: &str, reason: String) {
        tracing::warn!("{}: {}", title, reason);
        self.notifier
            .notify(Notification::new(Severity::Warning, title, reason));
    }

    fn prepare_submission(&mut self) -> Result<BookingRequest, BookingError> {
        if self.state.submitting {
            return Err(BookingError::SubmissionInFlight);
        }
        if !self.state.step.is_last() || !self.state.is_current_step_complete() {
            return Err(BookingError::NotReadyToSubmit);
        }

        let request = BookingRequest::try_from(&self.state.draft)?;
        self.state.submitting = true;
        self.state.refresh_controls();
        tracing::info!(vehicle_id = request.vehicle_id, "Submitting booking");
        Ok(request)
    }

    fn finish_submission(
        &mut self,
        result: Result<BookingConfirmation, ServiceError>,
    ) -> Result<BookingConfirmation, BookingError> {
        self.state.submitting = false;

        match result {
            Ok(confirmation) => {
                let text = confirmation
                    .message
                    .clone()
                    .unwrap_or_else(|| SUCCESS_FALLBACK.to_string());
                tracing::info!("Booking confirmed: {}", text);
                self.notifier
                    .notify(Notification::new(Severity::Success, SUCCESS_TITLE, text));
                // submitting was cleared above, so the reset is accepted
                self.reset()?;
                Ok(confirmation)
            }
            Err(e) => {
                let text = e.user_message().unwrap_or(FAILURE_FALLBACK).to_string();
                tracing::error!("Booking failed: {}", e);
                self.notifier
                    .notify(Notification::new(Severity::Error, FAILURE_TITLE, text));
                Err(e.into())
            }
        }
    }
}
