use bytes::Bytes;
use http::Response;
use http_body_util::Full;
use maud::{html, Markup};
use serde::Serialize;
use tracing::info;
use volunteer_manager_database::loaders::load_training_data;
use volunteer_manager_database::models::EventRow;
use volunteer_manager_database::AsyncPgConnection;
use volunteer_manager_reconciler::trainings::{self, TrainingReconciliation};
use volunteer_manager_reconciler::SelectOption;

use crate::components::main::main;
use crate::components::{section, select, table, warnings};
use crate::error::AppError;
use crate::routes::{respond, Format};
use crate::tables::EventSummary;

#[derive(Debug, Serialize)]
pub struct TrainingsPage {
    pub event: EventSummary,
    #[serde(flatten)]
    pub reconciliation: TrainingReconciliation,
    pub request_options: Vec<SelectOption>,
    pub training_options: Vec<SelectOption>,
}

pub async fn trainings(
    connection: &mut AsyncPgConnection,
    event: &EventRow,
    format: Format,
) -> Result<Response<Full<Bytes>>, AppError> {
    let data = load_training_data(connection, event.event_id).await?;
    let reconciliation = trainings::reconcile(&data)?;
    info!(
        event_id = event.event_id,
        unassigned = reconciliation.unassigned.len(),
        warnings = reconciliation.warnings.len(),
        "reconciled trainings"
    );
    let page = TrainingsPage {
        event: event.into(),
        request_options: trainings::request_options(&reconciliation),
        training_options: trainings::training_options(&data),
        reconciliation,
    };
    respond(format, &page, render)
}

pub fn render(page: &TrainingsPage) -> Markup {
    let sessions = table(
        &["Training", "Volunteers", "Extra participants", "Capacity", ""],
        page.reconciliation.sessions.iter().map(|session| {
            [
                session.training.label(),
                session.volunteers.to_string(),
                session.extra_participants.to_string(),
                session.training.capacity.to_string(),
                if session.over_capacity {
                    "Over capacity".to_owned()
                } else {
                    String::new()
                },
            ]
        }),
    );
    let unassigned = table(
        &["Volunteer", "Preferred training", "Updated"],
        page.reconciliation.unassigned.iter().map(|request| {
            [
                request.name.clone(),
                request.training.label(),
                request.updated.format("%Y-%m-%d %H:%M").to_string(),
            ]
        }),
    );

    let assign = html! {
        (select("request", &page.request_options))
        (select("training", &page.training_options))
    };
    main(
        &format!("{} trainings", page.event.name),
        Some(&page.event.slug),
        html! {
            (section("Sessions", sessions))
            (section("Unassigned requests", unassigned))
            (section("Warnings", warnings(&page.reconciliation.warnings)))
            (section("Assign a training", assign))
        },
    )
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use volunteer_manager_reconciler::trainings::{
        ExtraParticipant, Training, TrainingAssignment, TrainingData, TrainingPreference,
    };
    use volunteer_manager_reconciler::{ApplicationStatus, Volunteer};

    use super::*;

    fn page() -> TrainingsPage {
        let updated = DateTime::from_timestamp(1_720_000_000, 0).unwrap();
        let volunteer = |id, name: &str| Volunteer {
            id,
            name: name.to_owned(),
            status: ApplicationStatus::Accepted,
        };
        let preference = |user_id| TrainingPreference {
            user_id,
            training_id: Some(1),
            updated,
        };
        let data = TrainingData {
            trainings: vec![Training {
                id: 1,
                address: "Town hall".to_owned(),
                start: Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap(),
                capacity: 1,
                visible: true,
            }],
            assignments: vec![TrainingAssignment {
                id: 3,
                training_id: 1,
                user_id: Some(7),
            }],
            extra_participants: vec![ExtraParticipant {
                id: 1,
                training_id: 1,
                name: "Coach".to_owned(),
            }],
            preferences: vec![preference(7), preference(8)],
            volunteers: vec![volunteer(7, "Ada"), volunteer(8, "Bo")],
        };
        let reconciliation = trainings::reconcile(&data).unwrap();
        TrainingsPage {
            event: EventSummary {
                slug: "summer".to_owned(),
                name: "Summer".to_owned(),
                start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
            },
            request_options: trainings::request_options(&reconciliation),
            training_options: trainings::training_options(&data),
            reconciliation,
        }
    }

    #[test]
    fn renders_sessions_and_requests() {
        let html = render(&page()).into_string();
        assert!(html.contains(
            "<td>2024-07-01 10:00 (Town hall)</td><td>1</td><td>1</td><td>1</td><td>Over \
             capacity</td>"
        ));
        assert!(html.contains("<td>Bo</td><td>2024-07-01 10:00 (Town hall)</td>"));
        assert!(html.contains("<option value=\"8\">Bo (2024-07-01 10:00 (Town hall))</option>"));
    }

    #[test]
    fn json_contains_sessions() {
        let json = serde_json::to_value(page()).unwrap();
        assert_eq!(json["sessions"][0]["over_capacity"], true);
        assert_eq!(json["unassigned"][0]["user_id"], 8);
        assert_eq!(json["warnings"].as_array().unwrap().len(), 0);
        assert_eq!(json["training_options"][0]["value"], 1);
    }
}
