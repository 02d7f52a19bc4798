use std::time::Duration;

use thiserror::Error;

use crate::request::RequestError;

/// Why the orchestrator returned no layout.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid request: {}", join(.0))]
    InvalidRequest(Vec<RequestError>),

    #[error("could not generate a valid layout after {attempts} attempts")]
    Exhausted {
        attempts: u32,
        /// Validation messages of the final rejected candidate.
        last_errors: Vec<String>,
    },

    #[error("time budget of {budget:?} exceeded after {attempts} attempts")]
    DeadlineExceeded { attempts: u32, budget: Duration },
}

fn join(errors: &[RequestError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_lists_every_error() {
        let e = GenerationError::InvalidRequest(vec![RequestError::NoFloors, RequestError::NoBedrooms]);
        assert_eq!(
            e.to_string(),
            "invalid request: a house needs at least one floor; totalBedrooms must be positive"
        );
    }

    #[test]
    fn exhausted_mentions_attempts() {
        let e = GenerationError::Exhausted {
            attempts: 100,
            last_errors: vec!["x".into()],
        };
        assert!(e.to_string().contains("after 100 attempts"));
    }
}
