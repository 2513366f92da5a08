use thiserror::Error;

/// Recoverable rejections from the wallet, the inventory and both engines.
/// Every variant leaves the state it was raised against untouched, and the
/// display strings are written to read well in the message feed.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("not enough credits: need {need}₵, have {have}₵")]
    InsufficientFunds { need: u64, have: u64 },

    #[error("{action} is already in progress")]
    Busy { action: &'static str },

    #[error("no {kind} with id '{id}'")]
    NotFound { kind: &'static str, id: String },

    #[error("{reason}")]
    InvalidInput { reason: String },
}

impl GameError {
    pub fn not_found(kind: &'static str, id: &str) -> Self {
        GameError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        GameError::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_strings_name_the_problem() {
        let err = GameError::InsufficientFunds { need: 250, have: 40 };
        assert_eq!(err.to_string(), "not enough credits: need 250₵, have 40₵");

        let err = GameError::Busy {
            action: "a case opening",
        };
        assert_eq!(err.to_string(), "a case opening is already in progress");

        let err = GameError::not_found("case", "mystery_case");
        assert_eq!(err.to_string(), "no case with id 'mystery_case'");
    }
}
