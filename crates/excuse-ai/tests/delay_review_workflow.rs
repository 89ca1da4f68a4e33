//! Integration specifications for the delay excuse review workflow.
//!
//! Scenarios run end-to-end through the public service facade and HTTP
//! router so scoring, pattern detection, and penalty application are
//! validated without reaching into private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use excuse_ai::workflows::delays::{
        DelayHistoryEntry, DelayId, DelayRecord, DelayRepository, DelayReviewService,
        DelaySubmission, EmployeeId, FixedSignalProvider, RepositoryError, RiskLevel,
        ScoringConfig, TaskSnapshot,
    };

    pub(super) fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    pub(super) fn employee() -> EmployeeId {
        EmployeeId("emp-204".to_string())
    }

    pub(super) fn submission() -> DelaySubmission {
        DelaySubmission {
            employee_id: employee(),
            task: TaskSnapshot {
                task_id: "task-billing-42".to_string(),
                title: "Reconcile billing exports".to_string(),
                priority: "High".to_string(),
                deadline: Some(at(9) + Duration::hours(20)),
            },
            reason_text: "Server crashed at 10am yesterday, I contacted IT and restarted the \
                          service, and I will add monitoring alerts to prevent recurrence"
                .to_string(),
            has_proof: false,
            submitted_at: Some(at(9)),
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

    #[derive(Default)]
    pub(super) struct MemoryRepository {
        records: Mutex<HashMap<DelayId, DelayRecord>>,
        history: Mutex<HashMap<EmployeeId, Vec<DelayHistoryEntry>>>,
    }

    impl MemoryRepository {
        pub(super) fn seed_history(
            &self,
            employee: &EmployeeId,
            entries: Vec<DelayHistoryEntry>,
        ) {
            let mut guard = self.history.lock().expect("history mutex poisoned");
            guard.insert(employee.clone(), entries);
        }
    }

    impl DelayRepository for MemoryRepository {
        fn insert(&self, record: DelayRecord) -> Result<DelayRecord, RepositoryError> {
            let mut records = self.records.lock().expect("lock");
            if records.contains_key(record.delay_id()) {
                return Err(RepositoryError::Conflict);
            }
            records.insert(record.delay_id().clone(), record.clone());

            let mut history = self.history.lock().expect("lock");
            history
                .entry(record.employee_id.clone())
                .or_default()
                .insert(0, record.to_history_entry());

            Ok(record)
        }

        fn fetch(&self, id: &DelayId) -> Result<Option<DelayRecord>, RepositoryError> {
            let records = self.records.lock().expect("lock");
            Ok(records.get(id).cloned())
        }

        fn history(
            &self,
            employee: &EmployeeId,
            limit: usize,
        ) -> Result<Vec<DelayHistoryEntry>, RepositoryError> {
            let history = self.history.lock().expect("lock");
            Ok(history
                .get(employee)
                .map(|entries| entries.iter().take(limit).cloned().collect())
                .unwrap_or_default())
        }

        fn delay_count(&self, employee: &EmployeeId) -> Result<u32, RepositoryError> {
            let history = self.history.lock().expect("lock");
            Ok(history
                .get(employee)
                .map(|entries| entries.len() as u32)
                .unwrap_or(0))
        }
    }

    pub(super) fn build_service(
        signal: i64,
    ) -> (
        DelayReviewService<MemoryRepository, FixedSignalProvider>,
        Arc<MemoryRepository>,
    ) {
        let repository = Arc::new(MemoryRepository::default());
        let service = DelayReviewService::new(
            repository.clone(),
            Arc::new(FixedSignalProvider(signal)),
            ScoringConfig::default(),
        );
        (service, repository)
    }
}

mod review {
    use super::common::*;
    use excuse_ai::workflows::delays::{DelayRepository, PatternFlag, RiskLevel};

    #[test]
    fn credible_first_excuse_is_low_risk_with_no_flags() {
        let (service, repository) = build_service(10);

        let assessment = service.review(submission()).expect("review succeeds");

        assert_eq!(assessment.final_score, 100);
        assert_eq!(assessment.risk, RiskLevel::Low);
        assert_eq!(assessment.avoidance_score, 0);
        assert!(assessment.flags.is_empty());

        let stored = repository
            .fetch(&assessment.delay_id)
            .expect("repo fetch")
            .expect("record present");
        assert_eq!(stored.assessment, assessment);
    }

    #[test]
    fn recycled_generic_excuse_is_penalized() {
        let (service, _) = build_service(0);
        let mut first = submission();
        first.reason_text = "Network issue prevented upload".to_string();
        service.review(first).expect("first review succeeds");

        let mut second = submission();
        second.reason_text = "Network issue prevented my upload".to_string();
        let assessment = service.review(second).expect("second review succeeds");

        assert!(assessment.flags.contains(&PatternFlag::RepeatedExcuse));
        assert!(assessment.flags.contains(&PatternFlag::GenericPhraseReuse));
        assert!(assessment.final_score < assessment.breakdown.total);
    }

    #[test]
    fn escalating_history_downgrades_a_low_tier_to_medium() {
        let (service, repository) = build_service(0);
        repository.seed_history(
            &employee(),
            vec![
                history_entry(
                    "A contractor invoice dispute consumed the whole review window",
                    RiskLevel::Medium,
                ),
                history_entry(
                    "The staging environment was reserved for the release rehearsal",
                    RiskLevel::Low,
                ),
            ],
        );

        let assessment = service.review(submission()).expect("review succeeds");

        assert_eq!(assessment.breakdown.risk, RiskLevel::Low);
        assert!(assessment.flags.contains(&PatternFlag::RiskEscalation));
        assert_eq!(assessment.risk, RiskLevel::Medium);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use excuse_ai::workflows::delays::delay_router;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn post_delay_returns_created_assessment() {
        let (service, _) = build_service(10);
        let router = delay_router(Arc::new(service));

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/delays")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&submission()).expect("serialize submission"),
            ))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload.get("risk").and_then(Value::as_str), Some("Low"));
        assert_eq!(
            payload.get("authenticity_score").and_then(Value::as_u64),
            Some(100)
        );
    }

    #[tokio::test]
    async fn unknown_delay_is_a_not_found_payload() {
        let (service, _) = build_service(0);
        let router = delay_router(Arc::new(service));

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/delays/delay-does-not-exist")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
