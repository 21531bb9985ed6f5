pub mod plain;
pub mod rich;

pub use plain::PlainTaskReporter;
pub use rich::RichTaskReporter;
