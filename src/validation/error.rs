//! Validation error taxonomy

use thiserror::Error;

/// A single failed field check recorded by the [`Validator`](super::Validator)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required field absent or explicitly null
    #[error("missing required parameter: {0}")]
    MissingRequired(String),

    /// Field present but its shape does not coerce to the requested type
    #[error("invalid parameter type: {0}")]
    InvalidType(String),

    /// The argument bag itself is not an object
    #[error("invalid arguments: expected an object")]
    InvalidArguments,

    /// Caller-injected business rule spanning more than one field
    #[error("{0}")]
    CrossField(String),
}

impl ValidationError {
    /// Build a cross-field error from any message
    pub fn cross_field(message: impl Into<String>) -> Self {
        Self::CrossField(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::MissingRequired("name".to_string()).to_string(),
            "missing required parameter: name"
        );
        assert_eq!(
            ValidationError::InvalidType("email".to_string()).to_string(),
            "invalid parameter type: email"
        );
        assert_eq!(
            ValidationError::cross_field("payment_amount is required when fixed_amount is true")
                .to_string(),
            "payment_amount is required when fixed_amount is true"
        );
    }
}
