use crate::infra::{default_scoring_config, InMemoryDelayRepository};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use std::sync::Arc;

use excuse_ai::error::AppError;
use excuse_ai::workflows::delays::{
    apply_penalties, DelayAssessment, DelayContext, DelayRepository, DelayReviewService,
    DelaySubmission, EmployeeId, FixedSignalProvider, PatternDetector, ScoreBreakdown,
    ScoringEngine, TaskSnapshot,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Excuse text to score
    #[arg(long)]
    pub(crate) reason: String,
    /// Prior delay count for the employee
    #[arg(long, default_value_t = 0)]
    pub(crate) delay_count: u32,
    /// Task priority label (High/Medium/Low)
    #[arg(long, default_value = "Medium")]
    pub(crate) priority: String,
    /// Whole hours until the deadline (negative when overdue)
    #[arg(long, default_value_t = 24)]
    pub(crate) hours_left: i64,
    /// The excuse has a supporting attachment
    #[arg(long)]
    pub(crate) has_proof: bool,
    /// The submission happened after the deadline
    #[arg(long)]
    pub(crate) after_deadline: bool,
    /// External text-signal contribution (clamped into 0..=15)
    #[arg(long, default_value_t = 0)]
    pub(crate) external_signal: i64,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Pin the demo clock (RFC 3339). Defaults to the current time.
    #[arg(long, value_parser = crate::infra::parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// External text-signal contribution used for every submission
    #[arg(long, default_value_t = 8)]
    pub(crate) external_signal: i64,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let engine = ScoringEngine::new(default_scoring_config());
    let detector = PatternDetector;

    let context = DelayContext {
        reason_text: args.reason.clone(),
        delay_count: args.delay_count,
        priority: args.priority.clone(),
        hours_left: args.hours_left,
        has_proof: args.has_proof,
        is_after_deadline: args.after_deadline,
        external_signal: args.external_signal,
    };

    let breakdown = engine.score(&context);
    let flags = detector.detect(&args.reason, args.hours_left, args.after_deadline, &[]);
    let final_score = apply_penalties(breakdown.total, &flags);
    let risk = engine.config().classify(final_score);

    println!("Excuse scoring (no history on record)");
    print_breakdown(&breakdown);
    if !flags.is_empty() {
        println!("Pattern flags:");
        for flag in &flags {
            println!("  - {} (-{})", flag.label(), flag.penalty());
        }
    }
    println!(
        "Final: {final_score}/100 -> {} risk (avoidance {})",
        risk.label(),
        engine.config().max_score() - final_score
    );

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let now = args.now.unwrap_or_else(Utc::now);

    println!("Delay review demo");
    println!("Clock pinned to {now}");

    let repository = Arc::new(InMemoryDelayRepository::default());
    let signal = Arc::new(FixedSignalProvider(args.external_signal));
    let service = Arc::new(DelayReviewService::new(
        repository.clone(),
        signal,
        default_scoring_config(),
    ));

    let employee = EmployeeId("emp-001".to_string());

    let submissions = vec![
        (
            "specific excuse, submitted with a day in hand",
            DelaySubmission {
                employee_id: employee.clone(),
                task: task("task-101", "Prepare onboarding pack", "High", now, 30),
                reason_text: "Server crashed at 10am yesterday, I contacted IT and restarted \
                              the service, and I will add monitoring alerts to prevent \
                              recurrence"
                    .to_string(),
                has_proof: true,
                submitted_at: Some(now),
            },
        ),
        (
            "vague excuse, already past the deadline",
            DelaySubmission {
                employee_id: employee.clone(),
                task: task("task-102", "Publish sprint summary", "High", now, -2),
                reason_text: "Network issue prevented upload".to_string(),
                has_proof: false,
                submitted_at: Some(now),
            },
        ),
        (
            "the same excuse again, minutes before the deadline",
            DelaySubmission {
                employee_id: employee.clone(),
                task: task("task-103", "Close out review comments", "Medium", now, 0),
                reason_text: "Network issue prevented the upload".to_string(),
                has_proof: false,
                submitted_at: Some(now),
            },
        ),
    ];

    let mut last: Option<DelayAssessment> = None;
    for (label, submission) in submissions {
        println!("\nSubmission: {label}");
        match service.review(submission) {
            Ok(assessment) => {
                print_breakdown(&assessment.breakdown);
                if assessment.flags.is_empty() {
                    println!("Pattern flags: none");
                } else {
                    println!("Pattern flags:");
                    for flag in &assessment.flags {
                        println!("  - {} (-{})", flag.label(), flag.penalty());
                    }
                }
                println!(
                    "Final: {}/100 -> {} risk (avoidance {})",
                    assessment.final_score,
                    assessment.risk.label(),
                    assessment.avoidance_score
                );
                last = Some(assessment);
            }
            Err(err) => println!("  Review unavailable: {err}"),
        }
    }

    if let Some(assessment) = last {
        match repository.fetch(&assessment.delay_id) {
            Ok(Some(record)) => match serde_json::to_string_pretty(&record.assessment_view()) {
                Ok(json) => println!("\nPublic assessment payload:\n{json}"),
                Err(err) => println!("\nPublic assessment payload unavailable: {err}"),
            },
            Ok(None) => println!("\nRepository lookup returned no record"),
            Err(err) => println!("\nRepository unavailable: {err}"),
        }
    }

    Ok(())
}

fn task(
    task_id: &str,
    title: &str,
    priority: &str,
    now: DateTime<Utc>,
    deadline_hours_from_now: i64,
) -> TaskSnapshot {
    TaskSnapshot {
        task_id: task_id.to_string(),
        title: title.to_string(),
        priority: priority.to_string(),
        deadline: Some(now + Duration::hours(deadline_hours_from_now)),
    }
}

fn print_breakdown(breakdown: &ScoreBreakdown) {
    println!(
        "Signals: text {}/30 | history {}/20 | task {}/20 | proof {}/15 | timing {}/15 | external {}/15",
        breakdown.text,
        breakdown.history,
        breakdown.task,
        breakdown.proof,
        breakdown.timing,
        breakdown.external_signal
    );
    println!(
        "Base score: {}/100 ({} risk before pattern penalties)",
        breakdown.total,
        breakdown.risk.label()
    );
}
