/*!
 * Tests for request defaults and parameter checks
 */

use std::sync::Arc;

use quizbank::app_config::QuizConfig;
use quizbank::database::Difficulty;
use quizbank::errors::QuizError;
use quizbank::quiz::AnswerSubmission;
use quizbank::Controller;
use crate::common::mock_store::{MockQuestionStore, StoreCall};

fn store() -> Arc<MockQuestionStore> {
    Arc::new(
        MockQuestionStore::new()
            .with_question(1, "Capital of France?", Difficulty::Easy, &["Paris", "Lyon"], Some(0))
            .with_question(2, "12 * 12?", Difficulty::Medium, &["144", "124"], Some(0))
            .with_question(3, "Speed of light?", Difficulty::Hard, &["299792 km/s"], Some(0)),
    )
}

#[tokio::test]
async fn test_randomQuestions_withNoArguments_shouldUseConfiguredDefaults() {
    let store = store();
    let config = QuizConfig {
        default_difficulty: Difficulty::Medium,
        default_limit: 7,
        ..QuizConfig::default()
    };
    let controller = Controller::with_store(store.clone(), config);

    let questions = controller.random_questions(None, None).await.expect("Request failed");

    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].question_id, 2);
    assert_eq!(
        store.calls()[0],
        StoreCall::SampleIds { difficulty: Difficulty::Medium, limit: 7 }
    );
}

#[tokio::test]
async fn test_randomQuestions_shouldAcceptAnyCaseDifficulty() {
    let controller = Controller::with_store(store(), QuizConfig::default());

    let questions = controller
        .random_questions(Some("HARD"), Some(1))
        .await
        .expect("Request failed");

    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].question_id, 3);
}

#[tokio::test]
async fn test_randomQuestions_withUnknownDifficulty_shouldListChoices() {
    let store = store();
    let controller = Controller::with_store(store.clone(), QuizConfig::default());

    let err = controller.random_questions(Some("expert"), None).await.unwrap_err();

    match err {
        QuizError::InvalidInput(message) => {
            assert!(message.contains("expert"));
            assert!(message.contains("easy, medium, hard"));
        }
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_randomQuestions_withDisabledDifficulty_shouldBeInvalidInput() {
    let config = QuizConfig {
        valid_difficulties: vec![Difficulty::Easy, Difficulty::Medium],
        ..QuizConfig::default()
    };
    let controller = Controller::with_store(store(), config);

    let err = controller.random_questions(Some("hard"), None).await.unwrap_err();

    assert!(err.is_invalid_input());
}

#[tokio::test]
async fn test_randomQuestions_withLimitOutOfBounds_shouldBeInvalidInput() {
    let controller = Controller::with_store(store(), QuizConfig::default());

    for limit in [0, 51, 1000] {
        let err = controller.random_questions(None, Some(limit)).await.unwrap_err();
        assert!(err.to_string().contains("between 1 and 50"), "limit {}: {}", limit, err);
    }

    assert!(controller.random_questions(None, Some(50)).await.is_ok());
}

#[tokio::test]
async fn test_validateAnswers_shouldAttachIqEstimate() {
    let controller = Controller::with_store(store(), QuizConfig::default());

    let outcome = controller
        .validate_answers(
            &[AnswerSubmission::new(1, "Paris"), AnswerSubmission::new(2, "124")],
            Some("easy"),
        )
        .await
        .expect("Validation failed");

    // 100 + (1 - 20) / 5 * 15 = 43
    assert_eq!(outcome.score, 1);
    assert_eq!(outcome.iq, 43);
    assert_eq!(outcome.percentile, "21th");
    assert_eq!(outcome.results.len(), 2);
}

#[tokio::test]
async fn test_validateAnswers_shouldSerializeLikeOriginalResponse() {
    let controller = Controller::with_store(store(), QuizConfig::default());

    let outcome = controller
        .validate_answers(&[AnswerSubmission::new(99, "X")], None)
        .await
        .expect("Validation failed");

    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["score"], 0);
    assert_eq!(value["results"][0]["questionId"], 99);
    assert!(value["results"][0]["correctAnswer"].is_null());
    assert_eq!(value["results"][0]["isCorrect"], false);
}

#[tokio::test]
async fn test_validateAnswers_withEmptyBatch_shouldBeInvalidInput() {
    let controller = Controller::with_store(store(), QuizConfig::default());

    let err = controller.validate_answers(&[], None).await.unwrap_err();

    assert!(err.is_invalid_input());
}

#[tokio::test]
async fn test_stats_withoutRepository_shouldReturnNone() {
    let controller = Controller::with_store(store(), QuizConfig::default());

    assert!(controller.stats().await.expect("Stats failed").is_none());
}
