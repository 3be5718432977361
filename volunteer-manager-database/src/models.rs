use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use volunteer_manager_reconciler::hotels::{HotelAssignment, HotelPreference, HotelRoom};
use volunteer_manager_reconciler::outbox::OutboxMessage;
use volunteer_manager_reconciler::shifts::{Shift, ShiftCategory, Team};
use volunteer_manager_reconciler::trainings::{
    ExtraParticipant, Training, TrainingAssignment, TrainingPreference,
};

use crate::schema::{
    events, hotel_assignments, hotel_preferences, hotel_rooms, outbox_messages, shift_categories,
    shifts, teams, training_assignments, training_extra_participants, training_preferences,
    trainings,
};

#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EventRow {
    pub event_id: i32,
    pub slug: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = hotel_rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HotelRoomRow {
    pub hotel_room_id: i32,
    pub hotel_name: String,
    pub room_name: String,
    pub visible: bool,
}

impl From<HotelRoomRow> for HotelRoom {
    fn from(row: HotelRoomRow) -> Self {
        Self {
            id: row.hotel_room_id,
            hotel_name: row.hotel_name,
            room_name: row.room_name,
            visible: row.visible,
        }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = hotel_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HotelAssignmentRow {
    pub assignment_id: i32,
    pub hotel_room_id: Option<i32>,
    pub user_id: Option<i32>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl From<HotelAssignmentRow> for HotelAssignment {
    fn from(row: HotelAssignmentRow) -> Self {
        Self {
            id: row.assignment_id,
            room_id: row.hotel_room_id,
            user_id: row.user_id,
            check_in: row.check_in,
            check_out: row.check_out,
        }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = hotel_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HotelPreferenceRow {
    pub user_id: i32,
    pub hotel_room_id: Option<i32>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub updated: DateTime<Utc>,
}

impl From<HotelPreferenceRow> for HotelPreference {
    fn from(row: HotelPreferenceRow) -> Self {
        Self {
            user_id: row.user_id,
            room_id: row.hotel_room_id,
            check_in: row.check_in,
            check_out: row.check_out,
            updated: row.updated,
        }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = trainings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TrainingRow {
    pub training_id: i32,
    pub address: String,
    pub start: DateTime<Utc>,
    pub capacity: i32,
    pub visible: bool,
}

impl From<TrainingRow> for Training {
    fn from(row: TrainingRow) -> Self {
        Self {
            id: row.training_id,
            address: row.address,
            start: row.start,
            capacity: row.capacity,
            visible: row.visible,
        }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = training_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TrainingAssignmentRow {
    pub assignment_id: i32,
    pub training_id: i32,
    pub user_id: Option<i32>,
}

impl From<TrainingAssignmentRow> for TrainingAssignment {
    fn from(row: TrainingAssignmentRow) -> Self {
        Self {
            id: row.assignment_id,
            training_id: row.training_id,
            user_id: row.user_id,
        }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = training_extra_participants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ExtraParticipantRow {
    pub extra_id: i32,
    pub training_id: i32,
    pub name: String,
}

impl From<ExtraParticipantRow> for ExtraParticipant {
    fn from(row: ExtraParticipantRow) -> Self {
        Self {
            id: row.extra_id,
            training_id: row.training_id,
            name: row.name,
        }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = training_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TrainingPreferenceRow {
    pub user_id: i32,
    pub training_id: Option<i32>,
    pub updated: DateTime<Utc>,
}

impl From<TrainingPreferenceRow> for TrainingPreference {
    fn from(row: TrainingPreferenceRow) -> Self {
        Self {
            user_id: row.user_id,
            training_id: row.training_id,
            updated: row.updated,
        }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TeamRow {
    pub team_id: i32,
    pub name: String,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Self {
            id: row.team_id,
            name: row.name,
        }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = shift_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShiftCategoryRow {
    pub category_id: i32,
    pub name: String,
    pub colour: String,
}

impl From<ShiftCategoryRow> for ShiftCategory {
    fn from(row: ShiftCategoryRow) -> Self {
        Self {
            id: row.category_id,
            name: row.name,
            colour: row.colour,
        }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = shifts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShiftRow {
    pub shift_id: i32,
    pub team_id: i32,
    pub category_id: i32,
    pub name: String,
    pub colour: Option<String>,
    pub demand: String,
}

impl From<ShiftRow> for Shift {
    fn from(row: ShiftRow) -> Self {
        Self {
            id: row.shift_id,
            team_id: row.team_id,
            category_id: row.category_id,
            name: row.name,
            colour: row.colour,
            demand: row.demand,
        }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = outbox_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OutboxMessageRow {
    pub message_id: i32,
    pub channel: String,
    pub status: String,
    pub created: DateTime<Utc>,
}

impl From<OutboxMessageRow> for OutboxMessage {
    fn from(row: OutboxMessageRow) -> Self {
        Self {
            id: row.message_id,
            channel: row.channel,
            status: row.status,
            created: row.created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_missing_references() {
        let assignment = HotelAssignment::from(HotelAssignmentRow {
            assignment_id: 4,
            hotel_room_id: None,
            user_id: Some(12),
            check_in: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        });
        assert_eq!(assignment.id, 4);
        assert_eq!(assignment.room_id, None);
        assert_eq!(assignment.user_id, Some(12));

        let shift = Shift::from(ShiftRow {
            shift_id: 1,
            team_id: 2,
            category_id: 3,
            name: "Bar".to_owned(),
            colour: None,
            demand: "[]".to_owned(),
        });
        assert_eq!((shift.team_id, shift.category_id), (2, 3));
        assert_eq!(shift.colour, None);
    }
}
