/// Модуль предобработки данных

pub mod encoding;
pub mod imputation;
pub mod schema;

pub use encoding::OneHotEncoder;
pub use imputation::MeanImputer;
pub use schema::FeatureSchema;
