/*!
 * Integration tests running the quiz core against SQLite
 */

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

use quizbank::app_config::{Config, QuizConfig};
use quizbank::database::{Difficulty, Repository};
use quizbank::quiz::{AnswerSubmission, AnswerValidator, RandomQuestionSampler};
use quizbank::Controller;
use crate::common;

#[tokio::test]
async fn test_sample_fromSqlite_shouldReturnTwoOfThreeEasyQuestions() -> Result<()> {
    let repo = common::sample_repository()?;
    let sampler = RandomQuestionSampler::new(Arc::new(repo), &QuizConfig::default());

    let aggregates = sampler.sample(Difficulty::Easy, 2).await?;

    assert_eq!(aggregates.len(), 2);
    assert!(aggregates[0].question_id < aggregates[1].question_id);
    for aggregate in &aggregates {
        let expected: &[&str] = match aggregate.question_id {
            1 => &["Paris", "Lyon"],
            2 => &["Munich", "Berlin", "Hamburg"],
            3 => &["Jupiter"],
            other => panic!("question {} is not easy", other),
        };
        assert_eq!(aggregate.options, expected);
    }
    Ok(())
}

#[tokio::test]
async fn test_sample_fromSqlite_withNoMatches_shouldReturnEmpty() -> Result<()> {
    let repo = common::sample_repository()?;
    let sampler = RandomQuestionSampler::new(Arc::new(repo), &QuizConfig::default());

    let aggregates = sampler.sample(Difficulty::Hard, 10).await?;

    assert!(aggregates.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_sample_fromSqlite_shouldNotFavourQuestionsWithManyOptions() -> Result<()> {
    let repo = Repository::new_in_memory()?;
    let mut sql = String::from(
        "INSERT INTO Question (QuestionID, QuestionText, Difficulty) VALUES (1, 'Few', 'easy'), (2, 'Many', 'easy');
         INSERT INTO Option (OptionID, QuestionID, OptionText) VALUES (1, 1, 'only');",
    );
    for option_id in 100..120 {
        sql.push_str(&format!(
            "INSERT INTO Option (OptionID, QuestionID, OptionText) VALUES ({}, 2, 'opt{}');",
            option_id, option_id
        ));
    }
    common::seed(&repo, &sql)?;

    let sampler = RandomQuestionSampler::new(Arc::new(repo), &QuizConfig::default());
    let mut counts: HashMap<i64, usize> = HashMap::new();
    let draws = 1000;

    for _ in 0..draws {
        let aggregates = sampler.sample(Difficulty::Easy, 1).await?;
        assert_eq!(aggregates.len(), 1);
        *counts.entry(aggregates[0].question_id).or_default() += 1;
    }

    // A join-then-sample approach would pick question 2 about 95% of the time
    let few = counts.get(&1).copied().unwrap_or(0);
    assert!(
        (350..=650).contains(&few),
        "question with one option drawn {} times out of {}",
        few,
        draws
    );
    Ok(())
}

#[tokio::test]
async fn test_validate_fromSqlite_shouldMatchRecordedAnswers() -> Result<()> {
    let repo = common::sample_repository()?;
    let validator = AnswerValidator::new(Arc::new(repo));

    let report = validator
        .validate(&[
            AnswerSubmission::new(1, "Paris"),
            AnswerSubmission::new(2, "Munich"),
            AnswerSubmission::new(3, "Jupiter"),
            AnswerSubmission::new(99, "X"),
            AnswerSubmission::new(1, "Paris"),
        ])
        .await?;

    let summary: Vec<(i64, Option<&str>, bool)> = report
        .results
        .iter()
        .map(|r| (r.question_id, r.correct_answer.as_deref(), r.is_correct))
        .collect();

    assert_eq!(
        summary,
        vec![
            (1, Some("Paris"), true),
            (2, Some("Berlin"), false),
            (3, None, false),
            (99, None, false),
            (1, Some("Paris"), true),
        ]
    );
    assert_eq!(report.score, 2);
    Ok(())
}

#[tokio::test]
async fn test_controller_withConfigFile_shouldServeFromDatabaseFile() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let db_path = common::sample_database_file(dir.path())?;

    let config = Config {
        database_path: db_path,
        ..Config::default()
    };
    let controller = Controller::with_config(config)?;

    let questions = controller.random_questions(Some("medium"), Some(5)).await?;
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].question_text, "What is 12 * 12?");
    assert_eq!(questions[0].options, vec!["144", "124"]);

    let outcome = controller
        .validate_answers(&[AnswerSubmission::new(4, "144")], Some("medium"))
        .await?;
    assert_eq!(outcome.score, 1);

    let stats = controller.stats().await?.expect("file-backed controller has stats");
    assert_eq!(stats.question_count, 4);
    assert_eq!(stats.answer_count, 3);
    assert!(stats.file_size_bytes > 0);
    Ok(())
}

#[tokio::test]
async fn test_concurrentRequests_shouldShareOneRepository() -> Result<()> {
    let repo = common::sample_repository()?;
    let controller = Arc::new(Controller::with_store(Arc::new(repo), QuizConfig::default()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let controller = controller.clone();
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                controller.random_questions(Some("easy"), Some(3)).await.map(|q| q.len())
            } else {
                controller
                    .validate_answers(&[AnswerSubmission::new(2, "Berlin")], None)
                    .await
                    .map(|o| o.score)
            }
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let value = handle.await??;
        assert_eq!(value, if i % 2 == 0 { 3 } else { 1 });
    }
    Ok(())
}
