pub mod issue;
pub mod link;
pub mod task;
