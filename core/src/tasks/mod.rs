pub mod outcome;
pub mod reconcile;
pub mod retry;
pub mod submit;

pub use outcome::{TaskOutcome, TaskReport};
pub use reconcile::{reconcile, wait_gracefully};
pub use retry::{NoRetry, RetryStrategy};
pub use submit::{submit_updates, UpdateTask};
