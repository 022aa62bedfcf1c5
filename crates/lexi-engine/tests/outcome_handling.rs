//! Inbound outcome scenarios: dispatch, answer, and the benign failure paths.

mod common;

use chrono::Duration;
use pretty_assertions::assert_eq;

use lexi_core::action::InboundAction;
use lexi_core::enums::Outcome;
use lexi_core::ids::TenantId;
use lexi_core::responses::{QuizPrompt, Reply};
use lexi_engine::DispatchOutcome;

use common::Harness;

const T: TenantId = TenantId(100);

async fn send_one(h: &Harness) -> QuizPrompt {
    match h.engine.dispatcher().dispatch_tenant(T).await.unwrap() {
        DispatchOutcome::Sent(prompt) => prompt,
        DispatchOutcome::NoWords => panic!("expected a prompt"),
    }
}

async fn batch_all(h: &Harness) {
    h.engine.maintainer().maintain_tenant(T).await.unwrap();
}

fn payload(outcome: Outcome, prompt: &QuizPrompt) -> String {
    InboundAction::new(outcome, prompt.token.clone()).to_string()
}

#[tokio::test]
async fn answer_within_ttl_updates_streak_and_retires_token() {
    let h = Harness::new().await;
    h.seed(T, "wort", 1).await;
    batch_all(&h).await;

    let prompt = send_one(&h).await;
    h.clock.advance(Duration::days(6));

    let reply = h
        .engine
        .outcomes()
        .handle(T, &payload(Outcome::Correct, &prompt))
        .await;
    assert_eq!(
        reply,
        Reply::Acknowledged {
            word: "wort0".into(),
            translation: "t0".into(),
            streak: 1,
            to_review: false,
            learned: false,
        }
    );
    assert_eq!(h.streak(T, "wort0").await, 1);
    assert!(
        h.db.resolve_callback(T, &prompt.token, h.clock_now())
            .await
            .unwrap()
            .is_none()
    );

    // a second press of the same button is stale
    let again = h
        .engine
        .outcomes()
        .handle(T, &payload(Outcome::Correct, &prompt))
        .await;
    assert_eq!(again, Reply::TooMuchTimePassed);
    assert_eq!(h.streak(T, "wort0").await, 1);
}

#[tokio::test]
async fn never_issued_token_is_stale_and_mutates_nothing() {
    let h = Harness::new().await;
    h.seed(T, "wort", 1).await;
    h.db.update_streak(T, "wort0", 4, h.clock_now()).await.unwrap();
    let before = h.db.find_word(T, "wort0").await.unwrap().unwrap();

    let reply = h
        .engine
        .outcomes()
        .handle(T, "incorrect:0123456789abcdef0123456789abcdef")
        .await;
    assert_eq!(reply, Reply::TooMuchTimePassed);
    assert_eq!(h.db.find_word(T, "wort0").await.unwrap().unwrap(), before);
}

#[tokio::test]
async fn expired_token_is_stale_even_before_sweep() {
    let h = Harness::new().await;
    h.seed(T, "wort", 1).await;
    batch_all(&h).await;
    let prompt = send_one(&h).await;

    h.clock.advance(Duration::days(7) + Duration::seconds(1));
    let reply = h
        .engine
        .outcomes()
        .handle(T, &payload(Outcome::Correct, &prompt))
        .await;
    assert_eq!(reply, Reply::TooMuchTimePassed);
    assert_eq!(h.streak(T, "wort0").await, 0);
}

#[tokio::test]
async fn malformed_payload_is_something_went_wrong() {
    let h = Harness::new().await;
    for payload in ["", "correct", "skip:0123456789abcdef0123456789abcdef", "correct:xyz"] {
        assert_eq!(
            h.engine.outcomes().handle(T, payload).await,
            Reply::SomethingWentWrong,
            "payload {payload:?}"
        );
    }
}

#[tokio::test]
async fn token_of_another_tenant_is_stale() {
    let h = Harness::new().await;
    h.seed(T, "wort", 1).await;
    batch_all(&h).await;
    let prompt = send_one(&h).await;

    let reply = h
        .engine
        .outcomes()
        .handle(TenantId(999), &payload(Outcome::Correct, &prompt))
        .await;
    assert_eq!(reply, Reply::TooMuchTimePassed);
    // still answerable by its owner
    let reply = h
        .engine
        .outcomes()
        .handle(T, &payload(Outcome::Correct, &prompt))
        .await;
    assert!(matches!(reply, Reply::Acknowledged { .. }));
}

#[tokio::test]
async fn incorrect_resets_streak_to_zero() {
    let h = Harness::new().await;
    h.seed(T, "wort", 1).await;
    batch_all(&h).await;
    h.db.update_streak(T, "wort0", 9, h.clock_now()).await.unwrap();

    let prompt = send_one(&h).await;
    let reply = h
        .engine
        .outcomes()
        .handle(T, &payload(Outcome::Incorrect, &prompt))
        .await;
    assert!(matches!(reply, Reply::Acknowledged { streak: 0, .. }));
    assert_eq!(h.streak(T, "wort0").await, 0);
}

#[tokio::test]
async fn review_flag_keeps_streak_and_lists_word() {
    let h = Harness::new().await;
    h.seed(T, "wort", 1).await;
    batch_all(&h).await;
    h.db.update_streak(T, "wort0", 3, h.clock_now()).await.unwrap();

    let prompt = send_one(&h).await;
    let reply = h
        .engine
        .outcomes()
        .handle(T, &payload(Outcome::FlagForReview, &prompt))
        .await;
    assert!(matches!(
        reply,
        Reply::Acknowledged {
            streak: 3,
            to_review: true,
            ..
        }
    ));
    let review = h.db.list_words_to_review(T).await.unwrap();
    assert_eq!(review.len(), 1);
    assert_eq!(review[0].word, "wort0");
}

#[tokio::test]
async fn deleted_word_consumes_token_and_is_stale() {
    let h = Harness::new().await;
    h.seed(T, "wort", 1).await;
    batch_all(&h).await;
    let prompt = send_one(&h).await;
    h.db.delete_word(T, "wort0").await.unwrap();

    let reply = h
        .engine
        .outcomes()
        .handle(T, &payload(Outcome::Correct, &prompt))
        .await;
    assert_eq!(reply, Reply::TooMuchTimePassed);
    assert_eq!(h.db.count_callbacks(Some(T)).await.unwrap(), 0);
}

#[tokio::test]
async fn concurrent_duplicates_are_applied_once() {
    let h = Harness::new().await;
    h.seed(T, "wort", 1).await;
    batch_all(&h).await;
    let prompt = send_one(&h).await;
    let payload = payload(Outcome::Correct, &prompt);

    let mut handles = Vec::new();
    for _ in 0..6 {
        let handler = h.engine.outcomes();
        let payload = payload.clone();
        handles.push(tokio::spawn(async move { handler.handle(T, &payload).await }));
    }
    let mut acknowledged = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Reply::Acknowledged { .. } => acknowledged += 1,
            other => assert_eq!(other, Reply::TooMuchTimePassed),
        }
    }
    assert_eq!(acknowledged, 1);
    assert_eq!(h.streak(T, "wort0").await, 1);
}

#[tokio::test]
async fn reaching_threshold_reports_learned() {
    let h = Harness::new().await;
    h.seed(T, "wort", 1).await;
    batch_all(&h).await;
    h.db.update_streak(T, "wort0", 14, h.clock_now()).await.unwrap();

    let prompt = send_one(&h).await;
    let reply = h
        .engine
        .outcomes()
        .handle(T, &payload(Outcome::Correct, &prompt))
        .await;
    assert!(matches!(
        reply,
        Reply::Acknowledged {
            streak: 15,
            learned: true,
            ..
        }
    ));
}
