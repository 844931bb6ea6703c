mod batch;

pub use batch::{Batch, BatchOptions};
