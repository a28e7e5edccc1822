pub mod initialize;
pub mod report;
pub mod transaction;
