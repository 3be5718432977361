use bytes::Bytes;
use http::Response;
use http_body_util::Full;
use maud::{html, Markup};
use serde::Serialize;
use tracing::info;
use volunteer_manager_database::loaders::load_hotel_data;
use volunteer_manager_database::models::EventRow;
use volunteer_manager_database::AsyncPgConnection;
use volunteer_manager_reconciler::hotels::{self, HotelReconciliation};
use volunteer_manager_reconciler::SelectOption;

use crate::components::main::main;
use crate::components::{section, select, table, warnings};
use crate::error::AppError;
use crate::routes::{respond, Format};
use crate::tables::EventSummary;

#[derive(Debug, Serialize)]
pub struct HotelsPage {
    pub event: EventSummary,
    #[serde(flatten)]
    pub reconciliation: HotelReconciliation,
    pub request_options: Vec<SelectOption>,
    pub room_options: Vec<SelectOption>,
}

pub async fn hotels(
    connection: &mut AsyncPgConnection,
    event: &EventRow,
    format: Format,
) -> Result<Response<Full<Bytes>>, AppError> {
    let data = load_hotel_data(connection, event.event_id).await?;
    let reconciliation = hotels::reconcile(&data)?;
    info!(
        event_id = event.event_id,
        unassigned = reconciliation.unassigned.len(),
        warnings = reconciliation.warnings.len(),
        "reconciled hotels"
    );
    let page = HotelsPage {
        event: event.into(),
        request_options: hotels::request_options(&reconciliation),
        room_options: hotels::room_options(&data),
        reconciliation,
    };
    respond(format, &page, render)
}

pub fn render(page: &HotelsPage) -> Markup {
    let unassigned = table(
        &["Volunteer", "Room", "Check-in", "Check-out", "Updated"],
        page.reconciliation.unassigned.iter().map(|request| {
            [
                request.name.clone(),
                request.room.label(),
                request.check_in.to_string(),
                request.check_out.to_string(),
                request.updated.format("%Y-%m-%d %H:%M").to_string(),
            ]
        }),
    );
    let assign = html! {
        (select("request", &page.request_options))
        (select("room", &page.room_options))
    };
    main(
        &format!("{} hotels", page.event.name),
        Some(&page.event.slug),
        html! {
            (section("Unassigned requests", unassigned))
            (section("Warnings", warnings(&page.reconciliation.warnings)))
            (section("Assign a room", assign))
        },
    )
}
