pub mod chart;
pub mod dataset;
pub mod per_capita;
pub mod pipeline;
pub mod series;
