use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::ReconcileError;
use crate::model::{
    sort_by_name, sort_warnings, Roster, SelectOption, UserId, Volunteer, Warning,
};
use crate::nights::{format_nights, nights};

pub type RoomId = i32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotelRoom {
    pub id: RoomId,
    pub hotel_name: String,
    pub room_name: String,
    pub visible: bool,
}

impl HotelRoom {
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}: {}", self.hotel_name, self.room_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelAssignment {
    pub id: i32,
    pub room_id: Option<RoomId>,
    pub user_id: Option<UserId>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// What a volunteer asked for. `room_id == None` means they don't need a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelPreference {
    pub user_id: UserId,
    pub room_id: Option<RoomId>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct HotelData {
    pub rooms: Vec<HotelRoom>,
    pub assignments: Vec<HotelAssignment>,
    pub preferences: Vec<HotelPreference>,
    pub volunteers: Vec<Volunteer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnassignedHotelRequest {
    pub user_id: UserId,
    pub name: String,
    pub room: HotelRoom,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotelReconciliation {
    pub unassigned: Vec<UnassignedHotelRequest>,
    pub warnings: Vec<Warning>,
}

struct Index<'a> {
    rooms: HashMap<RoomId, &'a HotelRoom>,
    preferences: HashMap<UserId, &'a HotelPreference>,
    roster: Roster<'a>,
}

impl<'a> Index<'a> {
    fn new(data: &'a HotelData) -> Self {
        Self {
            rooms: data.rooms.iter().map(|room| (room.id, room)).collect(),
            preferences: data
                .preferences
                .iter()
                .map(|preference| (preference.user_id, preference))
                .collect(),
            roster: Roster::new(&data.volunteers),
        }
    }

    fn room_label(&self, room_id: RoomId) -> String {
        self.rooms
            .get(&room_id)
            .map_or_else(|| format!("room #{room_id}"), |room| room.label())
    }
}

pub fn reconcile(data: &HotelData) -> Result<HotelReconciliation, ReconcileError> {
    let index = Index::new(data);
    let unassigned = compile_unassigned_requests(data, &index)?;
    let warnings = compile_warnings(data, &index);
    Ok(HotelReconciliation {
        unassigned,
        warnings,
    })
}

fn compile_unassigned_requests(
    data: &HotelData,
    index: &Index<'_>,
) -> Result<Vec<UnassignedHotelRequest>, ReconcileError> {
    let assigned: HashSet<UserId> = data
        .assignments
        .iter()
        .filter_map(|assignment| assignment.user_id)
        .collect();

    let mut requests = Vec::new();
    for preference in &data.preferences {
        let (Some(room_id), Some(check_in), Some(check_out)) = (
            preference.room_id,
            preference.check_in,
            preference.check_out,
        ) else {
            continue;
        };
        if assigned.contains(&preference.user_id) {
            continue;
        }
        let room = index
            .rooms
            .get(&room_id)
            .ok_or(ReconcileError::UnknownHotelRoom {
                user_id: preference.user_id,
                room_id,
            })?;
        requests.push(UnassignedHotelRequest {
            user_id: preference.user_id,
            name: index.roster.name(preference.user_id),
            room: (*room).clone(),
            check_in,
            check_out,
            updated: preference.updated,
        });
    }
    sort_by_name(&mut requests, |request| request.name.as_str());
    Ok(requests)
}

fn compile_warnings(data: &HotelData, index: &Index<'_>) -> Vec<Warning> {
    let mut warnings = Vec::new();
    // grouped per volunteer, in the order they first show up
    let mut users = Vec::new();
    let mut by_user: HashMap<UserId, Vec<&HotelAssignment>> = HashMap::new();

    for assignment in &data.assignments {
        let warn = |message: String| match assignment.user_id {
            Some(user_id) => index.roster.warning(user_id, message),
            None => Warning {
                user_id: None,
                name: None,
                message,
            },
        };

        match assignment.room_id {
            None => warnings.push(warn(format!(
                "Booking #{} is not linked to a hotel room",
                assignment.id
            ))),
            Some(room_id) if !index.rooms.contains_key(&room_id) => warnings.push(warn(format!(
                "The assigned hotel room (#{room_id}) no longer exists"
            ))),
            Some(_) => {}
        }

        let Some(user_id) = assignment.user_id else {
            continue;
        };
        by_user
            .entry(user_id)
            .or_insert_with(|| {
                users.push(user_id);
                Vec::new()
            })
            .push(assignment);

        if !index.roster.is_participating(user_id) {
            warnings.push(warn(
                "Has a hotel room but no longer participates in the event".to_owned(),
            ));
        }

        if let Some(preference) = index.preferences.get(&user_id) {
            match (preference.room_id, assignment.room_id) {
                (None, _) => warnings.push(warn(
                    "Has a hotel room but indicated that they don't need one".to_owned(),
                )),
                (Some(preferred), Some(assigned)) if preferred != assigned => {
                    warnings.push(warn(format!(
                        "Assigned to {} but prefers {}",
                        index.room_label(assigned),
                        index.room_label(preferred)
                    )));
                }
                _ => {}
            }
        }
    }

    for user_id in users {
        let assignments = by_user.remove(&user_id).unwrap_or_default();
        let mut booked = BTreeSet::new();
        let mut double_booked = BTreeSet::new();
        for assignment in assignments {
            for night in nights(assignment.check_in, assignment.check_out) {
                if !booked.insert(night) {
                    double_booked.insert(night);
                }
            }
        }

        let expected: BTreeSet<NaiveDate> = index
            .preferences
            .get(&user_id)
            .and_then(|preference| {
                preference.room_id?;
                Some(nights(preference.check_in?, preference.check_out?).collect())
            })
            .unwrap_or_default();

        if !double_booked.is_empty() {
            warnings.push(index.roster.warning(
                user_id,
                format!("Booked into multiple rooms for {}", format_nights(&double_booked)),
            ));
        }
        let excess: BTreeSet<_> = booked.difference(&expected).copied().collect();
        if !excess.is_empty() {
            warnings.push(index.roster.warning(
                user_id,
                format!("Booked for nights they didn't request: {}", format_nights(&excess)),
            ));
        }
        let missing: BTreeSet<_> = expected.difference(&booked).copied().collect();
        if !missing.is_empty() {
            warnings.push(index.roster.warning(
                user_id,
                format!("Requested nights that aren't booked: {}", format_nights(&missing)),
            ));
        }
    }

    sort_warnings(&mut warnings);
    warnings
}

#[must_use]
pub fn request_options(reconciliation: &HotelReconciliation) -> Vec<SelectOption> {
    reconciliation
        .unassigned
        .iter()
        .map(|request| SelectOption {
            value: request.user_id,
            label: format!(
                "{} ({}, {} to {})",
                request.name,
                request.room.label(),
                request.check_in,
                request.check_out
            ),
        })
        .collect()
}

#[must_use]
pub fn room_options(data: &HotelData) -> Vec<SelectOption> {
    data.rooms
        .iter()
        .filter(|room| room.visible)
        .map(|room| SelectOption {
            value: room.id,
            label: room.label(),
        })
        .collect()
}
