/*!
 * Quiz core: question sampling, answer scoring and IQ estimation.
 *
 * - `store`: the query capability the core depends on
 * - `sampler`: random question selection grouped into aggregates
 * - `validator`: batch answer scoring
 * - `scoring`: IQ estimate for a validated score
 */

pub mod models;
pub mod sampler;
pub mod scoring;
pub mod store;
pub mod validator;

pub use models::{AnswerResult, AnswerSubmission, QuestionAggregate, ValidationReport};
pub use sampler::RandomQuestionSampler;
pub use scoring::{estimate_iq, IqEstimate};
pub use store::QuestionStore;
pub use validator::AnswerValidator;
