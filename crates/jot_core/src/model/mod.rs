mod task;

pub use task::{Filter, Task};
