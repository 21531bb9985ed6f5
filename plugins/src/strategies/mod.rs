pub mod retry;

pub use retry::{ExponentialBackoffStrategy, LinearRetryStrategy};
