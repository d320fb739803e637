mod common;

use common::{comment, issue, MemoryDestination};
use issue_migrator::issues::PLACEHOLDER_TITLE;
use issue_migrator::{
    AssignmentStatus, Destination, DryRunDestination, IssueOutcome, MigrationError,
    MigrationIssue, Migrator, NormalizedIssue, RateLimitPolicy, ResumePoint, TextRenderer,
    WriteError, Writer,
};
use std::time::Duration;
use tokio::time::Instant;

async fn migrate_all(
    destination: &dyn Destination,
    issues: Vec<NormalizedIssue>,
) -> Result<Vec<IssueOutcome>, MigrationError> {
    let renderer = TextRenderer::new();
    let resume = ResumePoint::detect(destination).await.unwrap();
    let writer = Writer::new(
        destination,
        &renderer,
        RateLimitPolicy::default(),
        Duration::ZERO,
    );
    let mut migrator = Migrator::new(writer, resume);

    let mut outcomes = Vec::new();
    for issue in issues {
        outcomes.push(migrator.migrate(issue).await?);
    }
    Ok(outcomes)
}

fn issues(ids: &[u64]) -> Vec<NormalizedIssue> {
    ids.iter().copied().map(issue).collect()
}

#[tokio::test]
async fn fills_gaps_with_placeholders() {
    let destination = MemoryDestination::new();

    let outcomes = migrate_all(&destination, issues(&[1, 2, 5])).await.unwrap();

    let stored = destination.issues();
    assert_eq!(
        stored.iter().map(|issue| issue.number).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5]
    );
    for number in [3, 4] {
        let placeholder = destination.issue(number);
        assert_eq!(placeholder.title, PLACEHOLDER_TITLE);
        assert!(placeholder.closed);
        assert!(placeholder.labels.is_empty());
    }
    assert_eq!(destination.issue(5).title, "Issue 5");
    assert_eq!(outcomes[2].placeholders, vec![3, 4]);
    assert!(outcomes[0].placeholders.is_empty());
}

#[tokio::test]
async fn resumed_runs_continue_without_duplicates() {
    let source = [1, 2, 5, 6];
    let destination = MemoryDestination::new();

    // Interrupted after two issues.
    migrate_all(&destination, issues(&source[..2])).await.unwrap();

    let resume = ResumePoint::detect(&destination).await.unwrap();
    assert_eq!(resume.source_offset(), 2);
    let remaining = source[resume.source_offset()..].to_vec();
    migrate_all(&destination, issues(&remaining)).await.unwrap();

    let resume = ResumePoint::detect(&destination).await.unwrap();
    assert_eq!(resume.existing, 6);
    assert_eq!(resume.placeholders, 2);
    assert_eq!(resume.source_offset(), source.len());

    // Nothing left: a third run writes nothing.
    let remaining = source[resume.source_offset()..].to_vec();
    let outcomes = migrate_all(&destination, issues(&remaining)).await.unwrap();
    assert!(outcomes.is_empty());
    assert_eq!(destination.issues().len(), 6);
}

#[tokio::test]
async fn out_of_order_issue_is_fatal() {
    let destination = MemoryDestination::new().with_titles(&["a", "b", "c"]);

    let result = migrate_all(&destination, issues(&[2])).await;

    assert!(matches!(
        result,
        Err(MigrationError::OutOfOrder {
            expected: 4,
            found: 2
        })
    ));
    assert_eq!(destination.issues().len(), 3);
}

#[tokio::test]
async fn renumbering_destination_is_detected() {
    let destination = MemoryDestination::new().with_number_offset(10);

    let result = migrate_all(&destination, issues(&[1, 2])).await;

    assert!(matches!(
        result,
        Err(MigrationError::IdMismatch {
            expected: 1,
            created: 11
        })
    ));
    assert_eq!(destination.issues().len(), 1);
}

#[tokio::test]
async fn renumbered_issue_gets_no_follow_up_writes() {
    let destination = MemoryDestination::new().with_number_offset(10);
    let mut closed = issue(1);
    closed.open = false;
    closed.owner = Some("@alice".to_string());
    closed.comments = vec![comment("first", "alice"), comment("second", "bob")];

    let result = migrate_all(&destination, vec![closed]).await;

    assert!(matches!(
        result,
        Err(MigrationError::IdMismatch {
            expected: 1,
            created: 11
        })
    ));
    let stored = destination.issue(11);
    assert!(stored.comments.is_empty());
    assert!(!stored.closed);
    assert!(stored.assignees.is_empty());
}

#[tokio::test]
async fn write_failure_names_the_issue() {
    let destination = MemoryDestination::new().failing_comments();
    let mut second = issue(2);
    second.comments = vec![comment("hello", "alice")];

    let result = migrate_all(&destination, vec![issue(1), second]).await;

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        MigrationError::Write {
            issue_id: 2,
            source: WriteError::Destination(_)
        }
    ));
    assert!(err.to_string().contains("issue 2"));
    assert_eq!(destination.issues().len(), 2);
}

#[tokio::test]
async fn comments_keep_source_order() {
    let destination = MemoryDestination::new();
    let mut first = issue(1);
    first.comments = vec![
        comment("first", "alice"),
        comment("second", "bob"),
        comment("third", "alice"),
    ];

    let outcomes = migrate_all(&destination, vec![first]).await.unwrap();

    let stored = destination.issue(1);
    assert_eq!(outcomes[0].report.comments, 3);
    assert_eq!(stored.comments.len(), 3);
    for (body, (text, author)) in stored
        .comments
        .iter()
        .zip([("first", "alice"), ("second", "bob"), ("third", "alice")])
    {
        assert!(body.ends_with(text));
        assert!(body.contains(&format!("<code>{author}</code>")));
    }
}

#[tokio::test]
async fn closes_resolved_issues_and_applies_labels() {
    let destination = MemoryDestination::new();
    let mut fixed = issue(1);
    fixed.open = false;
    fixed.labels = ["bug".to_string(), "prio-high".to_string()].into();

    migrate_all(&destination, vec![fixed, issue(2)]).await.unwrap();

    let fixed = destination.issue(1);
    assert!(fixed.closed);
    assert_eq!(fixed.labels, vec!["bug", "prio-high"]);
    assert_eq!(fixed.body, "Body of 1");
    assert!(!destination.issue(2).closed);
}

#[tokio::test]
async fn failed_assignment_does_not_stop_migration() {
    let destination = MemoryDestination::new().rejecting("ghost");
    let mut first = issue(1);
    first.owner = Some("@ghost".to_string());
    let mut second = issue(2);
    second.owner = Some("@alice".to_string());
    let mut third = issue(3);
    third.owner = Some("Bob Smith".to_string());

    let outcomes = migrate_all(&destination, vec![first, second, third])
        .await
        .unwrap();

    assert!(outcomes[0].report.assignment.is_failed());
    assert_eq!(
        outcomes[1].report.assignment,
        AssignmentStatus::Assigned {
            login: "alice".to_string()
        }
    );
    assert_eq!(outcomes[2].report.assignment, AssignmentStatus::NotRequested);
    assert!(destination.issue(1).assignees.is_empty());
    assert_eq!(destination.issue(2).assignees, vec!["alice"]);
    assert_eq!(destination.issues().len(), 3);
}

#[tokio::test]
async fn milestones_are_reused_and_created_once() {
    let destination = MemoryDestination::new().with_milestone(1, "1.0");
    let mut batch = issues(&[1, 2, 3, 4]);
    batch[0].milestone = Some("1.0".to_string());
    batch[1].milestone = Some("2.0".to_string());
    batch[2].milestone = Some("2.0".to_string());

    migrate_all(&destination, batch).await.unwrap();

    assert_eq!(
        destination
            .issues()
            .iter()
            .map(|issue| issue.milestone)
            .collect::<Vec<_>>(),
        vec![Some(1), Some(2), Some(2), None]
    );
    let state = destination.state();
    assert_eq!(state.milestone_listings, 1);
    assert_eq!(state.milestones.len(), 2);
}

#[tokio::test]
async fn every_write_checks_the_quota() {
    let destination = MemoryDestination::new();
    let mut first = issue(1);
    first.open = false;
    first.comments = vec![comment("a", "alice"), comment("b", "bob")];

    migrate_all(&destination, vec![first]).await.unwrap();

    // create, two comments, close
    assert_eq!(destination.state().rate_limit_queries, 4);
}

#[tokio::test]
async fn dry_run_writes_nothing() {
    let inner = MemoryDestination::new().with_titles(&["existing"]);
    let destination = DryRunDestination::new(Box::new(inner.clone()));
    let mut third = issue(3);
    third.milestone = Some("1.2".to_string());
    third.comments = vec![comment("hello", "alice")];

    let outcomes = migrate_all(&destination, vec![issue(2), third]).await.unwrap();

    assert_eq!(outcomes[0].report.number, 2);
    assert_eq!(outcomes[1].report.number, 3);
    assert_eq!(inner.issues().len(), 1);
    assert!(inner.state().milestones.is_empty());
}

fn writer<'a>(
    destination: &'a MemoryDestination,
    renderer: &'a TextRenderer,
    policy: RateLimitPolicy,
    comment_delay: Duration,
) -> Writer<'a> {
    Writer::new(destination, renderer, policy, comment_delay)
}

#[tokio::test(start_paused = true)]
async fn exhausted_quota_waits_for_reset_then_writes() {
    let destination = MemoryDestination::new().with_low_quota(&[(0, 90)]);
    let renderer = TextRenderer::new();
    let writer = writer(
        &destination,
        &renderer,
        RateLimitPolicy::default(),
        Duration::ZERO,
    );
    let start = Instant::now();

    let report = writer
        .insert(&MigrationIssue::from(issue(1)), None)
        .await
        .unwrap();

    assert!(start.elapsed() >= Duration::from_secs(89));
    assert_eq!(report.number, 1);
    assert_eq!(destination.issues().len(), 1);
    // low answer, then the refreshed quota
    assert_eq!(destination.state().rate_limit_queries, 2);
}

#[tokio::test(start_paused = true)]
async fn distant_reset_is_waited_out_in_capped_steps() {
    let destination = MemoryDestination::new().with_low_quota(&[(3, 3600), (3, 3600)]);
    let renderer = TextRenderer::new();
    let policy = RateLimitPolicy {
        low_water_mark: 10,
        max_wait: Duration::from_secs(30),
    };
    let writer = writer(&destination, &renderer, policy, Duration::ZERO);
    let start = Instant::now();

    writer
        .insert(&MigrationIssue::from(issue(1)), None)
        .await
        .unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(60));
    assert!(elapsed < Duration::from_secs(90));
    assert_eq!(destination.state().rate_limit_queries, 3);
    assert_eq!(destination.issues().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn comments_are_paced_and_ordered() {
    let destination = MemoryDestination::new();
    let renderer = TextRenderer::new();
    let writer = writer(
        &destination,
        &renderer,
        RateLimitPolicy::default(),
        Duration::from_secs(2),
    );
    let mut first = issue(1);
    first.comments = vec![
        comment("C1", "alice"),
        comment("C2", "bob"),
        comment("C3", "alice"),
    ];
    let start = Instant::now();

    writer
        .insert(&MigrationIssue::from(first), None)
        .await
        .unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(4));
    assert!(elapsed < Duration::from_secs(6));
    let comments = destination.issue(1).comments;
    assert_eq!(comments.len(), 3);
    for (body, expected) in comments.iter().zip(["C1", "C2", "C3"]) {
        assert!(body.ends_with(expected));
    }
}
