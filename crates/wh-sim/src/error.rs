use thiserror::Error;
use wh_layout::LayoutError;
use wh_schedule::ScheduleError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("warehouse configuration error: {0}")]
    Config(String),

    #[error("requested {requested} packages but the layout only has {shelves} shelf cells")]
    TooManyPackages {
        requested: usize,
        shelves:   usize,
    },

    #[error("robot positions length {got} does not match robot count {expected}")]
    RobotCountMismatch {
        expected: usize,
        got:      usize,
    },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

pub type SimResult<T> = Result<T, SimError>;
