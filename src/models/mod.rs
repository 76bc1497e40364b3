/// ML модели

pub mod forest;
pub mod metrics;

pub use forest::RandomForestRegressor;
