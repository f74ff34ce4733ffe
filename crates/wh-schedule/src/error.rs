use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("spawn schedule configuration error: {0}")]
    Config(String),

    #[error("requested {requested} spawn slots but only {available} shelf cells exist")]
    NotEnoughShelves {
        requested: usize,
        available: usize,
    },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
