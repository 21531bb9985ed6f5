pub mod traits;
pub mod types;

pub use traits::{SearchEngine, SearchIndex};
pub use types::{TaskError, Task, TaskInfo, TaskStatus, TaskUid, WaitOptions, WaitTimedOut};
