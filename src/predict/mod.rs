mod error;
mod ground_station;
mod propagation;
mod types;

pub use error::PredictError;
pub use ground_station::GroundStation;
pub use propagation::Satellite;
pub use types::Topocentric;
