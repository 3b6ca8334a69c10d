pub mod forecast;
pub mod insights;
pub mod prediction_types;
