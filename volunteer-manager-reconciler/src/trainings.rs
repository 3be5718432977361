use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ReconcileError;
use crate::model::{
    sort_by_name, sort_warnings, Roster, SelectOption, UserId, Volunteer, Warning,
};

pub type TrainingId = i32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Training {
    pub id: TrainingId,
    pub address: String,
    pub start: DateTime<Utc>,
    pub capacity: i32,
    pub visible: bool,
}

impl Training {
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.start.format("%Y-%m-%d %H:%M"), self.address)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingAssignment {
    pub id: i32,
    pub training_id: TrainingId,
    pub user_id: Option<UserId>,
}

/// Somebody who isn't a volunteer, e.g. a supervisor, attending a training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraParticipant {
    pub id: i32,
    pub training_id: TrainingId,
    pub name: String,
}

/// `training_id == None` means the volunteer doesn't want to attend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingPreference {
    pub user_id: UserId,
    pub training_id: Option<TrainingId>,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct TrainingData {
    pub trainings: Vec<Training>,
    pub assignments: Vec<TrainingAssignment>,
    pub extra_participants: Vec<ExtraParticipant>,
    pub preferences: Vec<TrainingPreference>,
    pub volunteers: Vec<Volunteer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnassignedTrainingRequest {
    pub user_id: UserId,
    pub name: String,
    pub training: Training,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingSession {
    pub training: Training,
    pub volunteers: usize,
    pub extra_participants: usize,
    pub over_capacity: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingReconciliation {
    pub unassigned: Vec<UnassignedTrainingRequest>,
    pub warnings: Vec<Warning>,
    pub sessions: Vec<TrainingSession>,
}

pub fn reconcile(data: &TrainingData) -> Result<TrainingReconciliation, ReconcileError> {
    let trainings: HashMap<TrainingId, &Training> = data
        .trainings
        .iter()
        .map(|training| (training.id, training))
        .collect();
    let preferences: HashMap<UserId, &TrainingPreference> = data
        .preferences
        .iter()
        .map(|preference| (preference.user_id, preference))
        .collect();
    let roster = Roster::new(&data.volunteers);

    let assigned: HashSet<UserId> = data
        .assignments
        .iter()
        .filter_map(|assignment| assignment.user_id)
        .collect();
    let mut unassigned = Vec::new();
    for preference in &data.preferences {
        let Some(training_id) = preference.training_id else {
            continue;
        };
        if assigned.contains(&preference.user_id) {
            continue;
        }
        let training = trainings
            .get(&training_id)
            .ok_or(ReconcileError::UnknownTraining {
                user_id: preference.user_id,
                training_id,
            })?;
        unassigned.push(UnassignedTrainingRequest {
            user_id: preference.user_id,
            name: roster.name(preference.user_id),
            training: (*training).clone(),
            updated: preference.updated,
        });
    }
    sort_by_name(&mut unassigned, |request| request.name.as_str());

    let training_label = |training_id: TrainingId| {
        trainings.get(&training_id).map_or_else(
            || format!("training #{training_id}"),
            |training| training.label(),
        )
    };

    let mut warnings = Vec::new();
    let mut users = Vec::new();
    let mut per_user: HashMap<UserId, usize> = HashMap::new();
    for assignment in &data.assignments {
        let missing_training = !trainings.contains_key(&assignment.training_id);
        let Some(user_id) = assignment.user_id else {
            let mut message = format!(
                "Training assignment #{} is not linked to a volunteer",
                assignment.id
            );
            if missing_training {
                message.push_str(&format!(
                    " and its training (#{}) no longer exists",
                    assignment.training_id
                ));
            }
            warnings.push(Warning {
                user_id: None,
                name: None,
                message,
            });
            continue;
        };
        *per_user.entry(user_id).or_insert_with(|| {
            users.push(user_id);
            0
        }) += 1;

        if missing_training {
            warnings.push(roster.warning(
                user_id,
                format!(
                    "The assigned training (#{}) no longer exists",
                    assignment.training_id
                ),
            ));
        }
        if !roster.is_participating(user_id) {
            warnings.push(roster.warning(
                user_id,
                "Is assigned to a training but no longer participates in the event".to_owned(),
            ));
        }
        match preferences.get(&user_id) {
            None => warnings.push(roster.warning(
                user_id,
                "Is assigned to a training but has no training preference on file".to_owned(),
            )),
            Some(TrainingPreference {
                training_id: None, ..
            }) => warnings.push(roster.warning(
                user_id,
                "Is assigned to a training but indicated that they don't want to attend one"
                    .to_owned(),
            )),
            Some(TrainingPreference {
                training_id: Some(preferred),
                ..
            }) if *preferred != assignment.training_id => warnings.push(roster.warning(
                user_id,
                format!(
                    "Assigned to {} but prefers {}",
                    training_label(assignment.training_id),
                    training_label(*preferred)
                ),
            )),
            Some(_) => {}
        }
    }
    for user_id in users {
        let count = per_user[&user_id];
        if count > 1 {
            warnings.push(roster.warning(
                user_id,
                format!("Is assigned to {count} trainings"),
            ));
        }
    }
    for extra in &data.extra_participants {
        if !trainings.contains_key(&extra.training_id) {
            warnings.push(Warning {
                user_id: None,
                name: Some(extra.name.clone()),
                message: format!(
                    "The training of this extra participant (#{}) no longer exists",
                    extra.training_id
                ),
            });
        }
    }
    sort_warnings(&mut warnings);

    let mut sessions: Vec<TrainingSession> = data
        .trainings
        .iter()
        .map(|training| {
            let volunteers = data
                .assignments
                .iter()
                .filter(|assignment| assignment.training_id == training.id)
                .count();
            let extra_participants = data
                .extra_participants
                .iter()
                .filter(|extra| extra.training_id == training.id)
                .count();
            let capacity = usize::try_from(training.capacity).unwrap_or_default();
            TrainingSession {
                training: training.clone(),
                volunteers,
                extra_participants,
                over_capacity: volunteers + extra_participants > capacity,
            }
        })
        .collect();
    sessions.sort_by_key(|session| (session.training.start, session.training.id));

    Ok(TrainingReconciliation {
        unassigned,
        warnings,
        sessions,
    })
}

#[must_use]
pub fn request_options(reconciliation: &TrainingReconciliation) -> Vec<SelectOption> {
    reconciliation
        .unassigned
        .iter()
        .map(|request| SelectOption {
            value: request.user_id,
            label: format!("{} ({})", request.name, request.training.label()),
        })
        .collect()
}

#[must_use]
pub fn training_options(data: &TrainingData) -> Vec<SelectOption> {
    data.trainings
        .iter()
        .filter(|training| training.visible)
        .map(|training| SelectOption {
            value: training.id,
            label: training.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::ApplicationStatus;

    fn training(id: TrainingId, capacity: i32, visible: bool) -> Training {
        Training {
            id,
            address: "Main Hall".to_owned(),
            start: Utc.with_ymd_and_hms(2024, 1, id.unsigned_abs(), 10, 0, 0).unwrap(),
            capacity,
            visible,
        }
    }

    fn volunteer(id: UserId, name: &str, status: ApplicationStatus) -> Volunteer {
        Volunteer {
            id,
            name: name.to_owned(),
            status,
        }
    }

    fn preference(user_id: UserId, training_id: Option<TrainingId>) -> TrainingPreference {
        TrainingPreference {
            user_id,
            training_id,
            updated: DateTime::from_timestamp(0, 0).unwrap(),
        }
    }

    fn assignment(id: i32, training_id: TrainingId, user_id: Option<UserId>) -> TrainingAssignment {
        TrainingAssignment {
            id,
            training_id,
            user_id,
        }
    }

    fn messages(warnings: &[Warning]) -> Vec<&str> {
        warnings.iter().map(|warning| warning.message.as_str()).collect()
    }

    #[test]
    fn unassigned_preferences_sorted_by_name() {
        let data = TrainingData {
            trainings: vec![training(1, 10, true)],
            preferences: vec![preference(1, Some(1)), preference(2, Some(1)), preference(3, None)],
            volunteers: vec![
                volunteer(1, "Zack", ApplicationStatus::Accepted),
                volunteer(2, "amy", ApplicationStatus::Accepted),
                volunteer(3, "Bob", ApplicationStatus::Accepted),
            ],
            ..TrainingData::default()
        };
        let result = reconcile(&data).unwrap();
        let names: Vec<_> = result.unassigned.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["amy", "Zack"]);
    }

    #[test]
    fn preference_for_unknown_training_is_fatal() {
        let data = TrainingData {
            preferences: vec![preference(1, Some(4))],
            ..TrainingData::default()
        };
        assert_eq!(
            reconcile(&data),
            Err(ReconcileError::UnknownTraining {
                user_id: 1,
                training_id: 4
            })
        );
    }

    #[test]
    fn flags_orphans_missing_preferences_and_deleted_sessions() {
        let data = TrainingData {
            trainings: vec![training(1, 10, true)],
            assignments: vec![
                assignment(1, 1, None),
                assignment(2, 1, Some(1)),
                assignment(3, 2, Some(2)),
                assignment(4, 1, Some(3)),
            ],
            extra_participants: vec![ExtraParticipant {
                id: 1,
                training_id: 3,
                name: "Dora".to_owned(),
            }],
            preferences: vec![preference(2, Some(2)), preference(3, Some(1))],
            volunteers: vec![
                volunteer(1, "Anna", ApplicationStatus::Accepted),
                volunteer(2, "Bert", ApplicationStatus::Accepted),
                volunteer(3, "Carl", ApplicationStatus::Rejected),
            ],
        };
        let result = reconcile(&data).unwrap();
        assert_eq!(
            messages(&result.warnings),
            [
                "Training assignment #1 is not linked to a volunteer",
                "Is assigned to a training but has no training preference on file",
                "The assigned training (#2) no longer exists",
                "Is assigned to a training but no longer participates in the event",
                "The training of this extra participant (#3) no longer exists",
            ]
        );
    }

    #[test]
    fn double_assignment_is_reported() {
        let data = TrainingData {
            trainings: vec![training(1, 10, true), training(2, 10, true)],
            assignments: vec![assignment(1, 1, Some(1)), assignment(2, 2, Some(1))],
            preferences: vec![preference(1, Some(1))],
            volunteers: vec![volunteer(1, "Anna", ApplicationStatus::Accepted)],
            ..TrainingData::default()
        };
        let result = reconcile(&data).unwrap();
        assert_eq!(
            messages(&result.warnings),
            [
                "Assigned to 2024-01-02 10:00 (Main Hall) but prefers 2024-01-01 10:00 (Main \
                 Hall)",
                "Is assigned to 2 trainings",
            ]
        );
    }

    #[test]
    fn assignment_of_unknown_user_is_flagged() {
        let data = TrainingData {
            trainings: vec![training(1, 10, true)],
            assignments: vec![assignment(1, 1, Some(9))],
            volunteers: vec![volunteer(1, "Anna", ApplicationStatus::Accepted)],
            ..TrainingData::default()
        };
        let result = reconcile(&data).unwrap();
        assert_eq!(
            messages(&result.warnings),
            [
                "Is assigned to a training but no longer participates in the event",
                "Is assigned to a training but has no training preference on file",
            ]
        );
        assert!(result
            .warnings
            .iter()
            .all(|warning| warning.name.as_deref() == Some("Unknown user #9")));
    }

    #[test]
    fn double_assignments_of_namesakes_keep_assignment_order() {
        let data = TrainingData {
            trainings: vec![training(1, 10, true), training(2, 10, true)],
            assignments: vec![
                assignment(1, 1, Some(2)),
                assignment(2, 1, Some(1)),
                assignment(3, 2, Some(2)),
                assignment(4, 2, Some(1)),
                assignment(5, 1, Some(1)),
            ],
            preferences: vec![preference(1, Some(1)), preference(2, Some(1))],
            volunteers: vec![
                volunteer(1, "Anna", ApplicationStatus::Accepted),
                volunteer(2, "Anna", ApplicationStatus::Accepted),
            ],
            ..TrainingData::default()
        };
        let result = reconcile(&data).unwrap();
        let counts: Vec<_> = result
            .warnings
            .iter()
            .filter(|warning| warning.message.starts_with("Is assigned to "))
            .map(|warning| (warning.user_id, warning.message.as_str()))
            .collect();
        assert_eq!(
            counts,
            [
                (Some(2), "Is assigned to 2 trainings"),
                (Some(1), "Is assigned to 3 trainings"),
            ]
        );
    }

    #[test]
    fn sessions_count_extras_against_capacity() {
        let data = TrainingData {
            trainings: vec![training(2, 1, true), training(1, 5, false)],
            assignments: vec![assignment(1, 2, Some(1))],
            extra_participants: vec![ExtraParticipant {
                id: 1,
                training_id: 2,
                name: "Dora".to_owned(),
            }],
            ..TrainingData::default()
        };
        let result = reconcile(&data).unwrap();
        let sessions: Vec<_> = result
            .sessions
            .iter()
            .map(|s| (s.training.id, s.volunteers, s.extra_participants, s.over_capacity))
            .collect();
        assert_eq!(sessions, [(1, 0, 0, false), (2, 1, 1, true)]);
        assert_eq!(training_options(&data).len(), 1);
    }
}
