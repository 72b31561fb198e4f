use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartUrlError {
    #[error("unknown generator type `{0}`")]
    UnknownGenerator(String),
    #[error("fragment {index} is malformed: {reason}")]
    MalformedFragment { index: usize, reason: String },
    #[error("start url spec is missing string field `{0}`")]
    MissingField(&'static str),
    #[error("generator `{generator}` cannot expand value: {reason}")]
    InvalidValue { generator: String, reason: String },
}

impl StartUrlError {
    pub fn malformed_fragment(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedFragment {
            index,
            reason: reason.into(),
        }
    }

    pub fn invalid_value(generator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            generator: generator.into(),
            reason: reason.into(),
        }
    }
}
