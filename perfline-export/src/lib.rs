pub mod payload;
pub mod report;

pub use payload::Payload;
pub use report::{Report, WriteReport};
