use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::workflows::delays::domain::{
    DelayHistoryEntry, DelayId, DelaySubmission, EmployeeId, RiskLevel, TaskSnapshot,
};
use crate::workflows::delays::repository::{DelayRecord, DelayRepository, RepositoryError};
use crate::workflows::delays::scoring::ScoringConfig;
use crate::workflows::delays::service::DelayReviewService;
use crate::workflows::delays::signal::{FixedSignalProvider, SignalError, TextSignalProvider};

pub(super) fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 10, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn submitted_at() -> DateTime<Utc> {
    at(9)
}

pub(super) fn employee() -> EmployeeId {
    EmployeeId("emp-101".to_string())
}

pub(super) fn submission() -> DelaySubmission {
    DelaySubmission {
        employee_id: employee(),
        task: TaskSnapshot {
            task_id: "task-report-17".to_string(),
            title: "Quarterly compliance report".to_string(),
            priority: "High".to_string(),
            deadline: Some(submitted_at() + Duration::hours(20)),
        },
        reason_text: "Server crashed at 10am yesterday, I contacted IT and restarted the \
                      service, and I will add monitoring alerts to prevent recurrence"
            .to_string(),
        has_proof: false,
        submitted_at: Some(submitted_at()),
    }
}

pub(super) fn history_entry(reason: &str, risk: RiskLevel) -> DelayHistoryEntry {
    DelayHistoryEntry {
        reason_text: reason.to_string(),
        risk_level: risk,
        score_authenticity: Some(60),
        submitted_at: at(8),
        deadline: None,
        is_after_deadline: Some(false),
        delay_duration_minutes: 0,
    }
}

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<DelayId, DelayRecord>>,
    history: Mutex<HashMap<EmployeeId, Vec<DelayHistoryEntry>>>,
}

impl MemoryRepository {
    /// Seed prior submissions for an employee, newest first.
    pub(super) fn seed_history(&self, employee: &EmployeeId, entries: Vec<DelayHistoryEntry>) {
        let mut guard = self.history.lock().expect("history mutex poisoned");
        guard.insert(employee.clone(), entries);
    }
}

impl DelayRepository for MemoryRepository {
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
        Ok(history.get(employee).map(|entries| entries.len() as u32).unwrap_or(0))
    }
}

pub(super) struct FailingSignalProvider;

impl TextSignalProvider for FailingSignalProvider {
    fn assess(&self, _reason: &str) -> Result<i64, SignalError> {
        Err(SignalError::Unavailable(
            "analysis backend offline".to_string(),
        ))
    }
}

pub(super) fn build_service() -> (
    DelayReviewService<MemoryRepository, FixedSignalProvider>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let signal = Arc::new(FixedSignalProvider(10));
    let service = DelayReviewService::new(repository.clone(), signal, scoring_config());
    (service, repository)
}
