pub mod group;
pub mod search;
pub mod task_ops;
