mod prism;

pub use prism::{ApiErrorBody, ApiErrorObject, PrismError};

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}
