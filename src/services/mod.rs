pub mod chart;
pub mod excel;
pub mod pipeline;
pub mod statistics;
pub mod store;
