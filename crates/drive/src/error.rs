use thiserror::Error;
use track::TrackError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriveError {
    #[error("invalid track: {0}")]
    Track(#[from] TrackError),
    #[error("drive parameter {field} is out of range: {value}")]
    InvalidConfig { field: &'static str, value: f64 },
    #[error("unknown variant `{0}`, expected one of: bounded, straight, segmented")]
    UnknownVariant(String),
    #[error("action {0} is outside the action set 0..2")]
    InvalidAction(usize),
    #[error("episode has terminated, call reset before stepping again")]
    EpisodeTerminated,
}
