pub mod correction;
pub mod report;
