mod common;

use chorebank_core::{ApprovalDecision, CoreError, SubmitChoreInput};
use chorebank_domain::{Principal, QualityScore, Role, SubmissionStatus};
use common::{build_fixture, dec, default_fixture, test_day, FixtureOptions};
use rust_decimal::Decimal;
use uuid::Uuid;

fn score(v: i16) -> Option<QualityScore> {
    Some(QualityScore::new(v).unwrap())
}

fn submit(fx: &common::Fixture) -> Uuid {
    fx.submissions()
        .submit(
            &fx.child,
            SubmitChoreInput {
                assignment_id: fx.assignment_id,
                day: test_day(),
            },
        )
        .expect("submit chore")
        .submission
        .id
}

#[test]
fn submission_starts_pending_with_no_award() {
    let fx = default_fixture();
    let receipt = fx
        .submissions()
        .submit(
            &fx.child,
            SubmitChoreInput {
                assignment_id: fx.assignment_id,
                day: test_day(),
            },
        )
        .unwrap();
    assert_eq!(receipt.submission.status, SubmissionStatus::Pending);
    assert!(receipt.awarded.is_none());
    assert_eq!(fx.balance(fx.child.user_id).available_points, Decimal::ZERO);
}

#[test]
fn duplicate_submission_for_same_day_conflicts() {
    let fx = default_fixture();
    submit(&fx);
    let err = fx
        .submissions()
        .submit(
            &fx.child,
            SubmitChoreInput {
                assignment_id: fx.assignment_id,
                day: test_day(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, CoreError::Conflict(_)));
    assert_eq!(fx.store.snapshot().unwrap().submissions.len(), 1);
}

#[test]
fn approval_awards_score_scaled_points() {
    let fx = default_fixture();
    let submission_id = submit(&fx);

    let outcome = fx
        .approvals()
        .score_submission(&fx.parent, submission_id, ApprovalDecision::approve(score(80)))
        .unwrap();
    assert_eq!(outcome.points_awarded, dec("8.0"));
    assert_eq!(outcome.delta, dec("8.0"));
    assert_eq!(outcome.status, SubmissionStatus::Approved);

    let balance = fx.balance(fx.child.user_id);
    assert_eq!(balance.available_points, dec("8.0"));
    assert_eq!(balance.lifetime_points, dec("8.0"));

    let state = fx.store.snapshot().unwrap();
    assert_eq!(state.submissions[0].points_awarded, dec("8.0"));
    assert_eq!(state.submissions[0].score, Some(80));
    assert_eq!(state.approvals.len(), 1);
    assert_eq!(state.approvals[0].original_points, dec("10"));
}

#[test]
fn rescoring_with_same_score_is_idempotent() {
    let fx = default_fixture();
    let submission_id = submit(&fx);
    let approvals = fx.approvals();

    approvals
        .score_submission(&fx.parent, submission_id, ApprovalDecision::approve(score(80)))
        .unwrap();
    let second = approvals
        .score_submission(&fx.parent, submission_id, ApprovalDecision::approve(score(80)))
        .unwrap();

    assert_eq!(second.delta, Decimal::ZERO);
    assert_eq!(fx.balance(fx.child.user_id).available_points, dec("8.0"));
}

#[test]
fn rescoring_applies_only_the_delta() {
    let fx = default_fixture();
    let submission_id = submit(&fx);
    let approvals = fx.approvals();

    approvals
        .score_submission(&fx.parent, submission_id, ApprovalDecision::approve(score(100)))
        .unwrap();
    assert_eq!(fx.balance(fx.child.user_id).available_points, dec("10.0"));

    let rescore = approvals
        .score_submission(&fx.parent, submission_id, ApprovalDecision::approve(score(60)))
        .unwrap();
    assert_eq!(rescore.previous_points, dec("10.0"));
    assert_eq!(rescore.delta, dec("-4.0"));
    // initial + B, never initial + A + B
    assert_eq!(fx.balance(fx.child.user_id).available_points, dec("6.0"));
}

#[test]
fn lifetime_points_never_decrease_across_rescoring() {
    let fx = default_fixture();
    let submission_id = submit(&fx);
    let approvals = fx.approvals();

    approvals
        .score_submission(&fx.parent, submission_id, ApprovalDecision::approve(score(100)))
        .unwrap();
    approvals
        .score_submission(&fx.parent, submission_id, ApprovalDecision::approve(score(60)))
        .unwrap();
    let balance = fx.balance(fx.child.user_id);
    assert_eq!(balance.available_points, dec("6.0"));
    assert_eq!(balance.lifetime_points, dec("10.0"));

    approvals
        .score_submission(&fx.parent, submission_id, ApprovalDecision::approve(score(150)))
        .unwrap();
    let balance = fx.balance(fx.child.user_id);
    assert_eq!(balance.available_points, dec("15.0"));
    assert_eq!(balance.lifetime_points, dec("19.0"));
}

#[test]
fn denying_required_chore_without_score_costs_full_base() {
    let fx = build_fixture(FixtureOptions {
        chore_required: true,
        ..FixtureOptions::default()
    });
    let submission_id = submit(&fx);

    let outcome = fx
        .approvals()
        .score_submission(&fx.parent, submission_id, ApprovalDecision::deny(None))
        .unwrap();
    assert_eq!(outcome.points_awarded, dec("-10.0"));
    assert_eq!(outcome.effective_score.value(), -100);

    let balance = fx.balance(fx.child.user_id);
    assert_eq!(balance.available_points, dec("-10.0"));
    assert_eq!(balance.lifetime_points, Decimal::ZERO);
}

#[test]
fn denying_optional_chore_without_score_awards_nothing() {
    let fx = default_fixture();
    let submission_id = submit(&fx);

    let outcome = fx
        .approvals()
        .score_submission(&fx.parent, submission_id, ApprovalDecision::deny(None))
        .unwrap();
    assert_eq!(outcome.points_awarded, Decimal::ZERO);
    assert_eq!(fx.balance(fx.child.user_id).available_points, Decimal::ZERO);
}

#[test]
fn approved_then_denied_without_score_still_applies_penalty_path() {
    let fx = build_fixture(FixtureOptions {
        chore_required: true,
        ..FixtureOptions::default()
    });
    let submission_id = submit(&fx);
    let approvals = fx.approvals();

    approvals
        .score_submission(&fx.parent, submission_id, ApprovalDecision::approve(None))
        .unwrap();
    assert_eq!(fx.balance(fx.child.user_id).available_points, dec("10.0"));

    let denied = approvals
        .score_submission(&fx.parent, submission_id, ApprovalDecision::deny(None))
        .unwrap();
    assert_eq!(denied.points_awarded, dec("-10.0"));
    assert_eq!(denied.delta, dec("-20.0"));

    let balance = fx.balance(fx.child.user_id);
    assert_eq!(balance.available_points, dec("-10.0"));
    assert_eq!(balance.lifetime_points, dec("10.0"));
}

#[test]
fn rescoring_keeps_a_single_approval_row() {
    let fx = default_fixture();
    let submission_id = submit(&fx);
    let approvals = fx.approvals();

    for s in [100, 40, 120] {
        approvals
            .score_submission(&fx.parent, submission_id, ApprovalDecision::approve(score(s)))
            .unwrap();
    }
    let state = fx.store.snapshot().unwrap();
    assert_eq!(state.approvals.len(), 1);
    assert_eq!(state.approvals[0].score, 120);
    assert_eq!(state.approvals[0].points_awarded, dec("12.0"));
}

#[test]
fn auto_approval_pays_out_and_is_attributed_to_a_parent() {
    let fx = build_fixture(FixtureOptions {
        auto_approve: true,
        ..FixtureOptions::default()
    });
    let receipt = fx
        .submissions()
        .submit(
            &fx.child,
            SubmitChoreInput {
                assignment_id: fx.assignment_id,
                day: test_day(),
            },
        )
        .unwrap();

    assert_eq!(receipt.submission.status, SubmissionStatus::AutoApproved);
    let awarded = receipt.awarded.expect("auto-approval pays out");
    assert_eq!(awarded.points_awarded, dec("10.0"));
    assert_eq!(fx.balance(fx.child.user_id).available_points, dec("10.0"));

    let state = fx.store.snapshot().unwrap();
    assert_eq!(state.approvals.len(), 1);
    assert_eq!(state.approvals[0].approved_by, fx.parent.user_id);
    assert_eq!(state.approvals[0].score, 100);
}

#[test]
fn auto_approval_without_a_parent_rolls_back_entirely() {
    let fx = build_fixture(FixtureOptions {
        auto_approve: true,
        with_parent: false,
        ..FixtureOptions::default()
    });
    let err = fx
        .submissions()
        .submit(
            &fx.child,
            SubmitChoreInput {
                assignment_id: fx.assignment_id,
                day: test_day(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    let state = fx.store.snapshot().unwrap();
    assert!(state.submissions.is_empty());
    assert!(state.approvals.is_empty());
    assert_eq!(fx.balance(fx.child.user_id).available_points, Decimal::ZERO);
}

#[test]
fn scoring_requires_a_parent_of_the_same_family() {
    let fx = default_fixture();
    let submission_id = submit(&fx);

    let err = fx
        .approvals()
        .score_submission(&fx.child, submission_id, ApprovalDecision::approve(None))
        .unwrap_err();
    assert!(matches!(err, CoreError::Forbidden));

    let stranger = Principal::new(Uuid::new_v4(), Role::Parent, Uuid::new_v4());
    let err = fx
        .approvals()
        .score_submission(&stranger, submission_id, ApprovalDecision::approve(None))
        .unwrap_err();
    assert!(matches!(err, CoreError::Forbidden));
}

#[test]
fn scoring_unknown_submission_is_not_found() {
    let fx = default_fixture();
    let missing = Uuid::new_v4();
    let err = fx
        .approvals()
        .score_submission(&fx.parent, missing, ApprovalDecision::approve(None))
        .unwrap_err();
    assert!(matches!(err, CoreError::SubmissionNotFound(id) if id == missing));
}

#[test]
fn out_of_range_scores_are_rejected_at_the_boundary() {
    let err = ApprovalDecision::from_raw(true, Some(151), None).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert!(ApprovalDecision::from_raw(false, Some(-100), None).is_ok());
}

#[test]
fn pending_queue_lists_unreviewed_submissions_for_parents_only() {
    let fx = default_fixture();
    let submission_id = submit(&fx);

    let pending = fx.submissions().pending_for_family(&fx.parent).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, submission_id);

    assert!(matches!(
        fx.submissions().pending_for_family(&fx.child),
        Err(CoreError::Forbidden)
    ));

    fx.approvals()
        .score_submission(&fx.parent, submission_id, ApprovalDecision::approve(None))
        .unwrap();
    assert!(fx
        .submissions()
        .pending_for_family(&fx.parent)
        .unwrap()
        .is_empty());
}
