// Domain layer - Series and chart state models
pub mod chart;
pub mod series;
