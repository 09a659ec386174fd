//! Poll loop and change tracking.
//!
//! Each cycle fetches submissions changed since the checkpoint, validates the
//! payload, translates the newest record and notifies the chat when the text
//! differs from the last delivered message. Failures become error
//! notifications under the same de-duplication rule; only a delivered status
//! update moves the checkpoint.

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::{
    domain::{now_timestamp, Timestamp},
    errors::Error,
    notifier::Notifier,
    ports::ReviewApi,
    review::{translate, validate},
    Result,
};

/// Loop-local state threaded through every cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollState {
    /// `from_date` of the next query.
    pub checkpoint: Timestamp,
    /// Last successfully delivered text (status or error).
    pub last_notified: Option<String>,
}

impl PollState {
    pub fn new(checkpoint: Timestamp) -> Self {
        Self {
            checkpoint,
            last_notified: None,
        }
    }

    pub fn starting_now() -> Self {
        Self::new(now_timestamp())
    }

    fn already_sent(&self, text: &str) -> bool {
        self.last_notified.as_deref() == Some(text)
    }
}

/// What a single cycle did.
#[derive(Debug)]
pub enum CycleOutcome {
    /// No submissions changed in the window.
    Idle,
    /// Latest status matches the last delivered message.
    Unchanged,
    /// A new status notification went out and the checkpoint advanced.
    Delivered,
    /// A new status was found but could not be delivered.
    DeliveryFailed,
    /// Fetch, validation or translation failed. `reported` tells whether the
    /// error notification was delivered in this cycle.
    Failed { error: Error, reported: bool },
}

struct StatusUpdate {
    text: String,
    current_date: Timestamp,
}

/// Text sent to the chat when a cycle fails.
pub fn failure_message(error: &Error) -> String {
    format!("Program failure: {error}")
}

/// Run one cycle and hand back the updated state.
pub async fn run_cycle(
    api: &dyn ReviewApi,
    notifier: &Notifier,
    mut state: PollState,
) -> (PollState, CycleOutcome) {
    let update = match check_for_update(api, state.checkpoint).await {
        Ok(Some(update)) => update,
        Ok(None) => return (state, CycleOutcome::Idle),
        Err(error) => {
            let reported = report_failure(notifier, &mut state, &error).await;
            return (state, CycleOutcome::Failed { error, reported });
        }
    };

    if state.already_sent(&update.text) {
        tracing::debug!("status unchanged, nothing to send");
        return (state, CycleOutcome::Unchanged);
    }

    if !notifier.deliver(&update.text).await {
        // Same window is queried again next cycle.
        return (state, CycleOutcome::DeliveryFailed);
    }

    state.checkpoint = state.checkpoint.max(update.current_date);
    state.last_notified = Some(update.text);
    (state, CycleOutcome::Delivered)
}

async fn check_for_update(
    api: &dyn ReviewApi,
    checkpoint: Timestamp,
) -> Result<Option<StatusUpdate>> {
    let payload = api.fetch(checkpoint).await?;
    let snapshot = validate(&payload)?;
    let Some(latest) = snapshot.latest() else {
        tracing::debug!("no status changes since {checkpoint}");
        return Ok(None);
    };
    let text = translate(latest)?;
    Ok(Some(StatusUpdate {
        text,
        current_date: snapshot.current_date,
    }))
}

async fn report_failure(notifier: &Notifier, state: &mut PollState, error: &Error) -> bool {
    let message = failure_message(error);
    tracing::error!(kind = error.kind(), "{message}");

    if state.already_sent(&message) {
        tracing::debug!("same failure already reported, not sending again");
        return false;
    }
    if notifier.deliver(&message).await {
        state.last_notified = Some(message);
        return true;
    }
    false
}

/// Drives `run_cycle` forever with a fixed pause after every outcome.
pub struct Poller {
    api: Arc<dyn ReviewApi>,
    notifier: Notifier,
    interval: Duration,
}

impl Poller {
    pub fn new(api: Arc<dyn ReviewApi>, notifier: Notifier, interval: Duration) -> Self {
        Self {
            api,
            notifier,
            interval,
        }
    }

    /// Loop until `cancel` fires. Cancellation is observed during the sleep,
    /// so an in-flight cycle always completes.
    pub async fn run(&self, mut state: PollState, cancel: CancellationToken) -> PollState {
        tracing::info!(
            "polling started: checkpoint={}, interval={}s, chat={}",
            state.checkpoint,
            self.interval.as_secs(),
            self.notifier.recipient()
        );

        loop {
            let (next, outcome) = run_cycle(self.api.as_ref(), &self.notifier, state).await;
            state = next;
            match &outcome {
                CycleOutcome::Failed { error, reported } => tracing::warn!(
                    kind = error.kind(),
                    reported = *reported,
                    "cycle failed, retrying after {}s",
                    self.interval.as_secs()
                ),
                other => tracing::debug!(
                    checkpoint = state.checkpoint,
                    "cycle finished: {other:?}"
                ),
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("polling stopped");
                    return state;
                }
                _ = sleep(self.interval) => {}
            }
        }
    }
}
