//! UI-facing conversion state, validation, and persistence hand-off.

use std::sync::Arc;

use shared::{
    domain::{ConversionRecord, LengthUnit},
    error::ValidationError,
    format::format_decimal,
};
use storage::{LastConversionStore, LastConversionSubscription};
use thiserror::Error;
use tokio::{
    sync::{broadcast, mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    engine::{ConversionEngine, EngineError},
    Clipboard,
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterState {
    pub input: String,
    pub from_unit: LengthUnit,
    pub to_unit: LengthUnit,
    pub result: String,
}

impl Default for ConverterState {
    fn default() -> Self {
        Self {
            input: String::new(),
            from_unit: LengthUnit::Meters,
            to_unit: LengthUnit::Feet,
            result: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    StateChanged(ConverterState),
    /// Transient user-facing message, e.g. a validation toast.
    Notice(String),
}

enum PersistCommand {
    Save(ConversionRecord),
    Flush(oneshot::Sender<()>),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ConvertError {
    pub fn user_message(&self) -> String {
        match self {
            ConvertError::Validation(err) => err.user_message().to_string(),
            ConvertError::Engine(err) => format!("Conversion failed: {err}"),
        }
    }
}

pub struct ConversionController {
    engine: ConversionEngine,
    store: Arc<LastConversionStore>,
    state: ConverterState,
    events: broadcast::Sender<ControllerEvent>,
    persist_tx: mpsc::UnboundedSender<PersistCommand>,
    persist_worker: JoinHandle<()>,
}

impl ConversionController {
    /// Must be called from within a tokio runtime; the persistence worker is
    /// spawned onto it.
    pub fn new(store: Arc<LastConversionStore>) -> Self {
        Self::with_engine(ConversionEngine::default(), store)
    }

    pub fn with_engine(engine: ConversionEngine, store: Arc<LastConversionStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        let persist_worker = tokio::spawn(run_persistence(Arc::clone(&store), persist_rx));
        Self {
            engine,
            store,
            state: ConverterState::default(),
            events,
            persist_tx,
            persist_worker,
        }
    }

    pub fn state(&self) -> &ConverterState {
        &self.state
    }

    pub fn input(&self) -> &str {
        &self.state.input
    }

    pub fn from_unit(&self) -> LengthUnit {
        self.state.from_unit
    }

    pub fn to_unit(&self) -> LengthUnit {
        self.state.to_unit
    }

    pub fn result(&self) -> &str {
        &self.state.result
    }

    pub fn units(&self) -> Vec<LengthUnit> {
        self.engine.table().units()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input = text.into();
        self.publish_state();
    }

    pub fn set_from_unit(&mut self, unit: LengthUnit) {
        self.state.from_unit = unit;
        self.publish_state();
    }

    pub fn set_to_unit(&mut self, unit: LengthUnit) {
        self.state.to_unit = unit;
        self.publish_state();
    }

    /// Exchanges the units; `result` is left as-is until the next `convert`.
    pub fn swap_units(&mut self) {
        std::mem::swap(&mut self.state.from_unit, &mut self.state.to_unit);
        self.publish_state();
    }

    /// Validates the input, updates `result` immediately, and queues the
    /// record for persistence without waiting for it. On error nothing
    /// changes and a notice is emitted.
    pub fn convert(&mut self) -> Result<ConversionRecord, ConvertError> {
        let record = match self.compute() {
            Ok(record) => record,
            Err(err) => {
                debug!(error = %err, input = %self.state.input, "conversion rejected");
                let _ = self.events.send(ControllerEvent::Notice(err.user_message()));
                return Err(err);
            }
        };

        self.state.result = format!("{} {}", format_decimal(record.converted_value), record.to_unit);
        self.publish_state();

        if self.persist_tx.send(PersistCommand::Save(record)).is_err() {
            warn!("persistence worker stopped; last conversion not saved");
        }
        Ok(record)
    }

    pub fn last_conversion(&self) -> Option<ConversionRecord> {
        self.store.current()
    }

    pub fn subscribe_last_conversion(&self) -> LastConversionSubscription {
        self.store.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    /// Copies the history line of the stored conversion. The outcome is
    /// reported as a notice; returns whether anything was copied.
    pub fn copy_last_conversion(&self, clipboard: &dyn Clipboard) -> bool {
        let Some(record) = self.store.current() else {
            let _ = self
                .events
                .send(ControllerEvent::Notice("No conversion to copy yet".to_string()));
            return false;
        };

        match clipboard.copy(&record.formatted()) {
            Ok(()) => {
                let _ = self
                    .events
                    .send(ControllerEvent::Notice("Copied to clipboard!".to_string()));
                true
            }
            Err(err) => {
                warn!(error = %err, "clipboard copy failed");
                let _ = self
                    .events
                    .send(ControllerEvent::Notice(format!("Copy failed: {err}")));
                false
            }
        }
    }

    /// Waits until every conversion queued so far has been saved or failed.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.persist_tx.send(PersistCommand::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }

    /// Closes the persistence queue and waits for queued saves to finish.
    pub async fn shutdown(self) {
        drop(self.persist_tx);
        if let Err(err) = self.persist_worker.await {
            warn!(error = %err, "persistence worker ended abnormally");
        }
    }

    fn compute(&self) -> Result<ConversionRecord, ConvertError> {
        let value = parse_input(&self.state.input)?;
        let (from, to) = (self.state.from_unit, self.state.to_unit);
        let converted = self.engine.convert(value, from, to)?;
        Ok(ConversionRecord::new(value, from, converted, to))
    }

    fn publish_state(&self) {
        let _ = self
            .events
            .send(ControllerEvent::StateChanged(self.state.clone()));
    }
}

pub(crate) fn parse_input(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber),
    }
}

async fn run_persistence(
    store: Arc<LastConversionStore>,
    mut queue: mpsc::UnboundedReceiver<PersistCommand>,
) {
    while let Some(command) = queue.recv().await {
        match command {
            PersistCommand::Save(record) => {
                store.save(record).await;
            }
            PersistCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    info!("persistence queue closed");
}
