// Domain layer - sensor catalog, series and chart models
pub mod chart;
pub mod sensor;
pub mod series;
