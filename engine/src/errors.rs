use thiserror::Error;

use crate::types::{ID, PIN};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("no component with id {0}")]
    UnknownComponent(ID),
    #[error("component kind '{0}' is not defined")]
    UndefinedGate(String),
    #[error("there are only {available} pins, can't access {pin}")]
    PinOutOfRange { pin: PIN, available: usize },
    #[error("component {0} is not a clocked component")]
    NotClocked(ID),
    #[error("component {0} is not an input")]
    NotAnInput(ID),
    #[error("circuit did not settle after {0} updates")]
    Unstable(usize),
    #[error("bench has no control named '{0}'")]
    UnknownControl(String),
    #[error("'{option}' is not a valid option for '{control}'")]
    InvalidOption { control: String, option: String },
}

/// Raised by a step criterion that cannot judge the current snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CriterionError {
    #[error("context has no value for '{0}'")]
    MissingKey(String),
    #[error("context value '{key}' is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_out_of_range_message() {
        let err = EngineError::PinOutOfRange {
            pin: 3,
            available: 2,
        };
        assert_eq!(err.to_string(), "there are only 2 pins, can't access 3");
    }

    #[test]
    fn missing_key_message() {
        let err = CriterionError::MissingKey("count".into());
        assert_eq!(err.to_string(), "context has no value for 'count'");
    }
}
