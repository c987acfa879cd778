/// Matching subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("lower bound {value} outside (0, 1]")]
    InvalidThreshold { value: f64 },

    #[error("no similarity fields configured")]
    NoFields,

    #[error("field '{field}' has non-positive weight {weight}")]
    InvalidWeight { field: String, weight: f64 },

    #[error("date similarity for '{field}' needs max_days > 0")]
    InvalidDateDecay { field: String },

    #[error("blocking part references unknown column '{column}'")]
    UnknownBlockColumn { column: String },
}
