//! Interactive terminal wizard on top of [`BookingController`].

use anyhow::Result;
use booking::wizard::{BookingController, DraftField, LookupStatus, WheelCount, WizardStep};
use booking::{BookingError, Notification, Severity};
use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use tokio::sync::mpsc::UnboundedReceiver;

const BACK: &str = "← Back";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// What the user chose at a prompt.
enum Answer<T> {
    Value(T),
    Back,
    Quit,
}

pub async fn run_wizard(
    mut controller: BookingController,
    mut notifications: UnboundedReceiver<Notification>,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        let step = controller.state().step;
        println!(
            "\n[{}/{}] {} ({}%)",
            step.index() + 1,
            WizardStep::ALL.len(),
            step.title(),
            controller.state().progress_percentage
        );

        let answer = match step {
            WizardStep::Identity => identity(&theme, &mut controller)?,
            WizardStep::WheelCount => wheel_count(&theme, &mut controller)?,
            WizardStep::Category => category(&theme, &mut controller).await?,
            WizardStep::Model => model(&theme, &mut controller).await?,
            WizardStep::DateRange => date_range(&theme, &mut controller)?,
        };
        drain(&mut notifications);

        match answer {
            Answer::Quit => {
                println!("Booking abandoned.");
                return Ok(());
            }
            Answer::Back => {
                controller.retreat();
            }
            Answer::Value(()) if step.is_last() => {
                if !Confirm::with_theme(&theme)
                    .with_prompt("Submit this booking?")
                    .default(true)
                    .interact()?
                {
                    continue;
                }
                let submitted = controller.submit().await;
                drain(&mut notifications);
                match submitted {
                    Ok(_) => return Ok(()),
                    // Already reported as a notification
                    Err(BookingError::Service(_)) => {}
                    Err(e) => println!("⚠️  {e}"),
                }
                // Draft is kept so the user can adjust and retry
                if !Confirm::with_theme(&theme)
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()?
                {
                    return Ok(());
                }
            }
            Answer::Value(()) => {
                if let Err(e) = controller.advance() {
                    println!("⚠️  {e}");
                }
            }
        }
    }
}

fn drain(notifications: &mut UnboundedReceiver<Notification>) {
    while let Ok(notification) = notifications.try_recv() {
        let icon = match notification.severity {
            Severity::Success => "✅",
            Severity::Error => "❌",
            Severity::Warning => "⚠️ ",
        };
        println!("{icon} {notification}");
    }
}

fn identity(theme: &ColorfulTheme, controller: &mut BookingController) -> Result<Answer<()>> {
    let draft = controller.state().draft.clone();
    let first = text(theme, "First name", &draft.first_name)?;
    let last = text(theme, "Last name", &draft.last_name)?;

    controller.set_field(DraftField::FirstName(first));
    controller.set_field(DraftField::LastName(last));
    Ok(Answer::Value(()))
}

fn text(theme: &ColorfulTheme, prompt: &str, initial: &str) -> Result<String> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true);
    if !initial.is_empty() {
        input = input.with_initial_text(initial);
    }
    Ok(input.interact_text()?)
}

fn wheel_count(theme: &ColorfulTheme, controller: &mut BookingController) -> Result<Answer<()>> {
    let labels: Vec<&str> = WheelCount::ALL.iter().map(|w| w.label()).collect();
    let current = controller
        .state()
        .draft
        .wheel_count
        .and_then(|w| WheelCount::ALL.iter().position(|c| *c == w));

    match choose(theme, "Number of wheels", &labels, current)? {
        Answer::Value(i) => {
            controller.set_field(DraftField::WheelCount(Some(WheelCount::ALL[i])));
            Ok(Answer::Value(()))
        }
        Answer::Back => Ok(Answer::Back),
        Answer::Quit => Ok(Answer::Quit),
    }
}

async fn category(
    theme: &ColorfulTheme,
    controller: &mut BookingController,
) -> Result<Answer<()>> {
    controller.settle().await;
    let state = controller.state();
    if let LookupStatus::Failed(reason) = state.categories.status() {
        println!("Could not load categories: {reason}");
    }
    let labels: Vec<String> = state
        .categories
        .items()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    let current = state
        .draft
        .category_id
        .and_then(|id| state.categories.items().iter().position(|c| c.id == id));
    if labels.is_empty() {
        println!("No categories available, go back to pick another wheel count.");
    }

    match choose(theme, "Vehicle type", &labels, current)? {
        Answer::Value(i) => {
            let id = controller.state().categories.items()[i].id;
            controller.set_field(DraftField::Category(Some(id)));
            Ok(Answer::Value(()))
        }
        Answer::Back => Ok(Answer::Back),
        Answer::Quit => Ok(Answer::Quit),
    }
}

async fn model(theme: &ColorfulTheme, controller: &mut BookingController) -> Result<Answer<()>> {
    controller.settle().await;
    let state = controller.state();
    if let LookupStatus::Failed(reason) = state.models.status() {
        println!("Could not load models: {reason}");
    }
    let labels: Vec<String> = state
        .models
        .items()
        .iter()
        .map(|v| v.model_name.clone())
        .collect();
    let current = state
        .draft
        .vehicle_id
        .and_then(|id| state.models.items().iter().position(|v| v.id == id));
    if labels.is_empty() {
        println!("No models available, go back to pick another type.");
    }

    match choose(theme, "Specific model", &labels, current)? {
        Answer::Value(i) => {
            let id = controller.state().models.items()[i].id;
            controller.set_field(DraftField::Vehicle(Some(id)));
            Ok(Answer::Value(()))
        }
        Answer::Back => Ok(Answer::Back),
        Answer::Quit => Ok(Answer::Quit),
    }
}

fn date_range(theme: &ColorfulTheme, controller: &mut BookingController) -> Result<Answer<()>> {
    let draft = controller.state().draft.clone();
    let start = match date(theme, "Start date (YYYY-MM-DD, `back` to go back)", draft.start_date)? {
        Answer::Value(d) => d,
        other => return Ok(other.map_unit()),
    };
    controller.set_field(DraftField::StartDate(Some(start)));

    let end = match date(theme, "End date (YYYY-MM-DD, `back` to go back)", draft.end_date)? {
        Answer::Value(d) => d,
        other => return Ok(other.map_unit()),
    };
    controller.set_field(DraftField::EndDate(Some(end)));
    Ok(Answer::Value(()))
}

fn date(theme: &ColorfulTheme, prompt: &str, initial: Option<NaiveDate>) -> Result<Answer<NaiveDate>> {
    let initial = initial
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default();
    loop {
        let raw = text(theme, prompt, &initial)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "back" => return Ok(Answer::Back),
            "quit" | "cancel" => return Ok(Answer::Quit),
            value => match NaiveDate::parse_from_str(value, DATE_FORMAT) {
                Ok(d) => return Ok(Answer::Value(d)),
                Err(_) => println!("Enter a date like 2025-06-01."),
            },
        }
    }
}

/// Selection list with a trailing back entry. Esc quits the wizard.
fn choose<S: ToString>(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[S],
    current: Option<usize>,
) -> Result<Answer<usize>> {
    let mut labels: Vec<String> = items.iter().map(|i| i.to_string()).collect();
    labels.push(BACK.to_string());

    let picked = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(current.unwrap_or(0))
        .interact_opt()?;

    Ok(match picked {
        None => Answer::Quit,
        Some(i) if i == items.len() => Answer::Back,
        Some(i) => Answer::Value(i),
    })
}

impl<T> Answer<T> {
    fn map_unit(self) -> Answer<()> {
        match self {
            Answer::Value(_) => Answer::Value(()),
            Answer::Back => Answer::Back,
            Answer::Quit => Answer::Quit,
        }
    }
}
