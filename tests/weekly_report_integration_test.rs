//! End-to-end weekly report tests with scripted text generators.
//!
//! Each test drives request → simulation → trend analysis → insights through
//! `WeeklyReportBuilder`, swapping the remote collaborator for a stub so the
//! remote path and every fallback trigger can be observed via `insight_source`.

use breathometer::core::InsightError;
use breathometer::insights::fallback::OUTDOOR_AVOIDANCE_RECOMMENDATION;
use breathometer::insights::{Disease, InsightGenerator, InsightSource, RemoteStrategy};
use breathometer::testkit::{
    asthmatic_request, polluted_elderly_smoker_request, smoker_request, valid_remote_payload,
    StubTextGenerator,
};
use breathometer::{rng_from_seed, WeeklyReport, WeeklyReportBuilder};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn builder_with(stub: StubTextGenerator, timeout: Duration) -> WeeklyReportBuilder {
    WeeklyReportBuilder::new(InsightGenerator::with_remote(Box::new(RemoteStrategy::new(
        stub, timeout,
    ))))
}

fn assert_complete(report: &WeeklyReport) {
    assert_eq!(report.daily_risks.len(), 7);
    assert_eq!(report.disease_risks.len(), 8);
    assert!(report.insights.len() <= 2);
    assert!(!report.recommendation.is_empty());
    assert!(report
        .disease_risks
        .windows(2)
        .all(|w| w[0].risk_percentage >= w[1].risk_percentage));
}

#[tokio::test]
async fn test_valid_remote_answer_is_used() {
    let stub = StubTextGenerator::fixed(valid_remote_payload());
    let calls = stub.clone();
    let builder = builder_with(stub, Duration::from_secs(1));

    let report = builder
        .build(&asthmatic_request(), &mut rng_from_seed(Some(3)))
        .await
        .unwrap();

    assert_complete(&report);
    assert_eq!(report.insight_source, InsightSource::Remote);
    assert_eq!(report.disease_risks[0].name, Disease::AsthmaExacerbation);
    assert_eq!(report.disease_risks[0].risk_percentage, 61.5);
    assert_eq!(calls.calls(), 1);
}

#[tokio::test]
async fn test_malformed_answer_falls_back_without_retry() {
    let stub = StubTextGenerator::malformed();
    let calls = stub.clone();
    let builder = builder_with(stub, Duration::from_secs(1));

    let report = builder
        .build(&smoker_request(), &mut rng_from_seed(Some(3)))
        .await
        .unwrap();

    assert_complete(&report);
    assert_eq!(report.insight_source, InsightSource::Fallback);
    assert_eq!(report.insights.len(), 2);
    assert_eq!(calls.calls(), 1);
}

#[tokio::test]
async fn test_collaborator_error_falls_back() {
    let stub = StubTextGenerator::failing(InsightError::collaborator(Some(503), "overloaded"));
    let builder = builder_with(stub, Duration::from_secs(1));

    let report = builder
        .build(&smoker_request(), &mut rng_from_seed(Some(8)))
        .await
        .unwrap();

    assert_complete(&report);
    assert_eq!(report.insight_source, InsightSource::Fallback);
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let stub = StubTextGenerator::slow(Duration::from_secs(5), valid_remote_payload());
    let builder = builder_with(stub, Duration::from_millis(25));

    let report = builder
        .build(&asthmatic_request(), &mut rng_from_seed(Some(8)))
        .await
        .unwrap();

    assert_complete(&report);
    assert_eq!(report.insight_source, InsightSource::Fallback);
}

#[tokio::test]
async fn test_remote_and_fallback_share_the_same_schema() {
    let request = asthmatic_request();
    let remote = builder_with(
        StubTextGenerator::fixed(valid_remote_payload()),
        Duration::from_secs(1),
    )
    .build(&request, &mut rng_from_seed(Some(4)))
    .await
    .unwrap();
    let fallback = WeeklyReportBuilder::new(InsightGenerator::offline())
        .build(&request, &mut rng_from_seed(Some(4)))
        .await
        .unwrap();

    let keys = |report: &WeeklyReport| -> Vec<String> {
        let value = serde_json::to_value(report).unwrap();
        value.as_object().unwrap().keys().cloned().collect()
    };
    assert_eq!(keys(&remote), keys(&fallback));

    // Same seed, same simulated week regardless of where insights came from.
    assert_eq!(remote.daily_risks, fallback.daily_risks);
    assert_eq!(remote.trend, fallback.trend);
}

#[tokio::test]
async fn test_polluted_week_recommends_staying_indoors() {
    let report = WeeklyReportBuilder::new(InsightGenerator::offline())
        .build(&polluted_elderly_smoker_request(), &mut rng_from_seed(Some(21)))
        .await
        .unwrap();

    // A 300 base with at most -40 noise keeps every day above 260.
    assert!(report.avg_aqi > 150.0);
    assert_eq!(report.recommendation, OUTDOOR_AVOIDANCE_RECOMMENDATION);
    assert_eq!(report.daily_risks[6], 60.0);
}
