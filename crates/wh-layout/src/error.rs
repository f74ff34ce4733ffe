use thiserror::Error;

use wh_core::Position;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout configuration error: {0}")]
    Config(String),

    #[error("position {0} is outside the map")]
    OutOfBounds(Position),

    #[error("position {0} is not a shelf cell")]
    NotAShelf(Position),

    #[error("shelf {0} already holds a package")]
    ShelfOccupied(Position),

    #[error("position {0} is not a drop zone")]
    NotADropZone(Position),

    #[error("drop zone {0} lies on a shelf cell")]
    DropOnShelf(Position),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
