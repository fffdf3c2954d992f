use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must hold a positive, even number of cards")]
    InvalidBoardSize,
    #[error("Card list does not match declared board size")]
    InvalidBoardShape,
    #[error("Every card value must appear exactly twice")]
    UnpairedValue,
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;
