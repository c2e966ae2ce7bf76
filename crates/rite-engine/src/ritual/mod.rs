pub mod breath;
pub mod mirror;
pub mod phase;
pub mod portal;
pub mod whisper;
