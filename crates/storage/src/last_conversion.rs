//! Durable single-slot store for the most recent conversion.
//!
//! The slot lives under one fixed key of a [`KeyValueMedium`]. Subscribers get
//! the latest record first and then every later successful save, in order.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use futures::{stream, Stream, StreamExt};
use shared::domain::ConversionRecord;
use tokio::sync::{
    broadcast::{self, error::RecvError},
    Mutex as AsyncMutex,
};
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, warn};

use crate::KeyValueMedium;

pub const LAST_CONVERSION_KEY: &str = "last_conversion_json";

const UPDATE_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Persisted,
    Failed,
}

struct Slot {
    current: Option<ConversionRecord>,
    updates: broadcast::Sender<ConversionRecord>,
}

pub struct LastConversionStore {
    medium: Arc<dyn KeyValueMedium>,
    slot: Mutex<Slot>,
    write_gate: AsyncMutex<()>,
}

impl LastConversionStore {
    /// Reads the stored record once to seed the observable value. Missing,
    /// unreadable or undecodable values all seed `None`.
    pub async fn open(medium: Arc<dyn KeyValueMedium>) -> Self {
        let current = match medium.get(LAST_CONVERSION_KEY).await {
            Ok(Some(raw)) => decode_record(&raw),
            Ok(None) => None,
            Err(err) => {
                warn!(key = LAST_CONVERSION_KEY, error = %err, "failed to read last conversion");
                None
            }
        };
        debug!(has_record = current.is_some(), "opened last conversion store");

        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            medium,
            slot: Mutex::new(Slot { current, updates }),
            write_gate: AsyncMutex::new(()),
        }
    }

    /// Replaces the stored record. Failures are logged and swallowed; the
    /// previous record stays current and no update is published.
    pub async fn save(&self, record: ConversionRecord) -> SaveOutcome {
        let _gate = self.write_gate.lock().await;

        let persisted = match encode_record(&record) {
            Ok(encoded) => self.medium.put(LAST_CONVERSION_KEY, &encoded).await,
            Err(err) => Err(err),
        };
        if let Err(err) = persisted {
            warn!(key = LAST_CONVERSION_KEY, error = %err, "failed to persist last conversion");
            return SaveOutcome::Failed;
        }

        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.current = Some(record);
        let delivered = slot.updates.send(record).unwrap_or(0);
        debug!(subscribers = delivered, "published last conversion");
        SaveOutcome::Persisted
    }

    pub fn current(&self) -> Option<ConversionRecord> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current
    }

    pub fn subscribe(&self) -> LastConversionSubscription {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        LastConversionSubscription {
            initial: Some(slot.current),
            updates: slot.updates.subscribe(),
        }
    }
}

/// Replay-last view of the store: yields the latest record (or `None`) first,
/// then each later save.
pub struct LastConversionSubscription {
    initial: Option<Option<ConversionRecord>>,
    updates: broadcast::Receiver<ConversionRecord>,
}

impl LastConversionSubscription {
    /// Returns `None` only once the store has been dropped.
    pub async fn next(&mut self) -> Option<Option<ConversionRecord>> {
        if let Some(initial) = self.initial.take() {
            return Some(initial);
        }
        loop {
            match self.updates.recv().await {
                Ok(record) => return Some(Some(record)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "last conversion subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = Option<ConversionRecord>> + Send + 'static {
        let updates = BroadcastStream::new(self.updates).filter_map(|item| async move {
            match item {
                Ok(record) => Some(Some(record)),
                Err(err) => {
                    warn!(error = %err, "last conversion subscriber lagged");
                    None
                }
            }
        });
        stream::iter(self.initial).chain(updates)
    }
}

pub fn encode_record(record: &ConversionRecord) -> Result<String> {
    serde_json::to_string(record).context("failed to encode conversion record")
}

/// Undecodable values are treated as absent.
pub fn decode_record(raw: &str) -> Option<ConversionRecord> {
    match serde_json::from_str::<ConversionRecord>(raw) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(key = LAST_CONVERSION_KEY, error = %err, "discarding undecodable last conversion");
            None
        }
    }
}
