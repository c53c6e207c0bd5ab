pub mod speed;

pub use speed::SpeedTuning;
