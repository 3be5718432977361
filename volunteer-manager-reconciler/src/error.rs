use thiserror::Error;

use crate::model::UserId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("the hotel preference of user {user_id} references room {room_id} which does not exist")]
    UnknownHotelRoom { user_id: UserId, room_id: i32 },
    #[error(
        "the training preference of user {user_id} references training {training_id} which does \
         not exist"
    )]
    UnknownTraining { user_id: UserId, training_id: i32 },
    #[error("shift {shift_id} references category {category_id} which does not exist")]
    UnknownShiftCategory { shift_id: i32, category_id: i32 },
    #[error("invalid colour {0:?}")]
    InvalidColour(String),
    #[error(transparent)]
    UnknownValue(#[from] UnknownValue),
}

/// A stored enumeration value that this version does not know about.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognised {kind} {value:?}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValue {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
