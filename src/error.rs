//! Error types for the connect layer.
//!
//! Every variant is a programmer-contract violation, not a transient runtime
//! condition: nothing here is retried, and a failing connect leaves the
//! component uninitialized rather than partially rendered.

use thiserror::Error;

/// Errors that can occur while connecting a component or recomputing its
/// derived options.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// A state projector or factory-form dispatch mapper returned something
    /// other than a map of options.
    #[error("{context} must return a map of options; {actual} returned instead")]
    InvalidReturnType {
        context: &'static str,
        actual: &'static str,
    },

    /// The connect behavior was invoked twice on the same component instance.
    #[error("component is already connected through \"{behavior}\"")]
    AlreadyConnected { behavior: String },

    /// The dispatch mapper is neither a map of action creators nor a factory
    /// function.
    #[error("dispatch mapper must be a map of action creators or a factory function; got {actual}")]
    UnsupportedMapperType { actual: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_return_type_names_the_offender() {
        let err = ConnectError::InvalidReturnType {
            context: "state projector",
            actual: "string",
        };
        let msg = err.to_string();
        assert!(msg.contains("state projector"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn already_connected_names_the_behavior() {
        let err = ConnectError::AlreadyConnected {
            behavior: "reduxConnect".to_string(),
        };
        assert!(err.to_string().contains("reduxConnect"));
    }
}
