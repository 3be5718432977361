//! One bulk read per table, everything scoped to a single event.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;
use volunteer_manager_reconciler::hotels::HotelData;
use volunteer_manager_reconciler::outbox::OutboxMessage;
use volunteer_manager_reconciler::shifts::ShiftData;
use volunteer_manager_reconciler::trainings::TrainingData;
use volunteer_manager_reconciler::Volunteer;

use crate::error::DatabaseError;
use crate::models::{
    EventRow, ExtraParticipantRow, HotelAssignmentRow, HotelPreferenceRow, HotelRoomRow,
    OutboxMessageRow, ShiftCategoryRow, ShiftRow, TeamRow, TrainingAssignmentRow,
    TrainingPreferenceRow, TrainingRow,
};
use crate::schema::{
    applications, events, hotel_assignments, hotel_preferences, hotel_rooms, outbox_messages,
    shift_categories, shifts, teams, training_assignments, training_extra_participants,
    training_preferences, trainings, users,
};

fn into_all<Row, Value: From<Row>>(rows: Vec<Row>) -> Vec<Value> {
    rows.into_iter().map(Value::from).collect()
}

pub async fn list_events(
    connection: &mut AsyncPgConnection,
) -> Result<Vec<EventRow>, DatabaseError> {
    Ok(events::table
        .order((events::start_date.desc(), events::event_id))
        .select(EventRow::as_select())
        .load(connection)
        .await?)
}

pub async fn find_event(
    connection: &mut AsyncPgConnection,
    slug: &str,
) -> Result<Option<EventRow>, DatabaseError> {
    Ok(events::table
        .filter(events::slug.eq(slug))
        .select(EventRow::as_select())
        .first(connection)
        .await
        .optional()?)
}

/// Everybody who applied, whatever their status. An unknown status aborts the
/// load.
pub async fn load_volunteers(
    connection: &mut AsyncPgConnection,
    event_id: i32,
) -> Result<Vec<Volunteer>, DatabaseError> {
    let rows: Vec<(i32, String, String)> = applications::table
        .inner_join(users::table)
        .filter(applications::event_id.eq(event_id))
        .select((users::user_id, users::name, applications::status))
        .load(connection)
        .await?;
    rows.into_iter()
        .map(|(id, name, status)| -> Result<Volunteer, DatabaseError> {
            Ok(Volunteer {
                id,
                name,
                status: status.parse()?,
            })
        })
        .collect()
}

pub async fn load_hotel_data(
    connection: &mut AsyncPgConnection,
    event_id: i32,
) -> Result<HotelData, DatabaseError> {
    let rooms: Vec<HotelRoomRow> = hotel_rooms::table
        .filter(hotel_rooms::event_id.eq(event_id))
        .order(hotel_rooms::hotel_room_id)
        .select(HotelRoomRow::as_select())
        .load(connection)
        .await?;
    let assignments: Vec<HotelAssignmentRow> = hotel_assignments::table
        .filter(hotel_assignments::event_id.eq(event_id))
        .order(hotel_assignments::assignment_id)
        .select(HotelAssignmentRow::as_select())
        .load(connection)
        .await?;
    let preferences: Vec<HotelPreferenceRow> = hotel_preferences::table
        .filter(hotel_preferences::event_id.eq(event_id))
        .order(hotel_preferences::user_id)
        .select(HotelPreferenceRow::as_select())
        .load(connection)
        .await?;
    let volunteers = load_volunteers(connection, event_id).await?;
    debug!(
        event_id,
        rooms = rooms.len(),
        assignments = assignments.len(),
        preferences = preferences.len(),
        "loaded hotel data"
    );
    Ok(HotelData {
        rooms: into_all(rooms),
        assignments: into_all(assignments),
        preferences: into_all(preferences),
        volunteers,
    })
}

pub async fn load_training_data(
    connection: &mut AsyncPgConnection,
    event_id: i32,
) -> Result<TrainingData, DatabaseError> {
    let sessions: Vec<TrainingRow> = trainings::table
        .filter(trainings::event_id.eq(event_id))
        .order((trainings::start, trainings::training_id))
        .select(TrainingRow::as_select())
        .load(connection)
        .await?;
    let assignments: Vec<TrainingAssignmentRow> = training_assignments::table
        .filter(training_assignments::event_id.eq(event_id))
        .order(training_assignments::assignment_id)
        .select(TrainingAssignmentRow::as_select())
        .load(connection)
        .await?;
    let extra_participants: Vec<ExtraParticipantRow> = training_extra_participants::table
        .filter(training_extra_participants::event_id.eq(event_id))
        .order(training_extra_participants::extra_id)
        .select(ExtraParticipantRow::as_select())
        .load(connection)
        .await?;
    let preferences: Vec<TrainingPreferenceRow> = training_preferences::table
        .filter(training_preferences::event_id.eq(event_id))
        .order(training_preferences::user_id)
        .select(TrainingPreferenceRow::as_select())
        .load(connection)
        .await?;
    let volunteers = load_volunteers(connection, event_id).await?;
    debug!(
        event_id,
        trainings = sessions.len(),
        assignments = assignments.len(),
        "loaded training data"
    );
    Ok(TrainingData {
        trainings: into_all(sessions),
        assignments: into_all(assignments),
        extra_participants: into_all(extra_participants),
        preferences: into_all(preferences),
        volunteers,
    })
}

pub async fn load_shift_data(
    connection: &mut AsyncPgConnection,
    event_id: i32,
) -> Result<ShiftData, DatabaseError> {
    let team_rows: Vec<TeamRow> = teams::table
        .filter(teams::event_id.eq(event_id))
        .order(teams::team_id)
        .select(TeamRow::as_select())
        .load(connection)
        .await?;
    let categories: Vec<ShiftCategoryRow> = shift_categories::table
        .filter(shift_categories::event_id.eq(event_id))
        .order(shift_categories::category_id)
        .select(ShiftCategoryRow::as_select())
        .load(connection)
        .await?;
    // the order decides the position along the category gradient
    let shift_rows: Vec<ShiftRow> = shifts::table
        .filter(shifts::event_id.eq(event_id))
        .order(shifts::shift_id)
        .select(ShiftRow::as_select())
        .load(connection)
        .await?;
    Ok(ShiftData {
        teams: into_all(team_rows),
        categories: into_all(categories),
        shifts: into_all(shift_rows),
    })
}

pub async fn load_outbox_messages(
    connection: &mut AsyncPgConnection,
    event_id: i32,
) -> Result<Vec<OutboxMessage>, DatabaseError> {
    let rows: Vec<OutboxMessageRow> = outbox_messages::table
        .filter(outbox_messages::event_id.eq(event_id))
        .order(outbox_messages::message_id)
        .select(OutboxMessageRow::as_select())
        .load(connection)
        .await?;
    Ok(into_all(rows))
}
