mod diarization;
mod health;

pub use diarization::diarization_handler;
pub use health::health_handler;
