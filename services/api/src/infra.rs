use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;

use excuse_ai::workflows::delays::{
    DelayHistoryEntry, DelayId, DelayRecord, DelayRepository, EmployeeId, RepositoryError,
    ScoringConfig,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
pub(crate) struct InMemoryDelayRepository {
    records: Mutex<HashMap<DelayId, DelayRecord>>,
    history: Mutex<HashMap<EmployeeId, Vec<DelayHistoryEntry>>>,
}

impl DelayRepository for InMemoryDelayRepository {
    fn insert(&self, record: DelayRecord) -> Result<DelayRecord, RepositoryError> {
        let mut records = self.records.lock().expect("repository mutex poisoned");
        if records.contains_key(record.delay_id()) {
            return Err(RepositoryError::Conflict);
        }
        records.insert(record.delay_id().clone(), record.clone());

        let mut history = self.history.lock().expect("history mutex poisoned");
        history
            .entry(record.employee_id.clone())
            .or_default()
            .insert(0, record.to_history_entry());

        Ok(record)
    }

    fn fetch(&self, id: &DelayId) -> Result<Option<DelayRecord>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records.get(id).cloned())
    }

    fn history(
        &self,
        employee: &EmployeeId,
        limit: usize,
    ) -> Result<Vec<DelayHistoryEntry>, RepositoryError> {
        let history = self.history.lock().expect("history mutex poisoned");
        Ok(history
            .get(employee)
            .map(|entries| entries.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    fn delay_count(&self, employee: &EmployeeId) -> Result<u32, RepositoryError> {
        let history = self.history.lock().expect("history mutex poisoned");
        Ok(history
            .get(employee)
            .map(|entries| entries.len() as u32)
            .unwrap_or(0))
    }
}

pub(crate) fn default_scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as RFC 3339 ({err})"))
}
