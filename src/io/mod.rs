//! Job files: parsing operands, running the operation, writing the result

pub mod format;
pub mod job;

pub use format::{read_job, write_result, MAX_DIM};
pub use job::{Job, Operand, Operation};
