use bytes::Bytes;
use http::Response;
use http_body_util::Full;
use maud::{html, Markup};
use volunteer_manager_database::loaders::list_events;
use volunteer_manager_database::AsyncPgConnection;

use crate::components::main::main;
use crate::error::AppError;
use crate::routes::html_response;
use crate::tables::EventSummary;

pub async fn index(connection: &mut AsyncPgConnection) -> Result<Response<Full<Bytes>>, AppError> {
    let events: Vec<EventSummary> = list_events(connection)
        .await?
        .iter()
        .map(EventSummary::from)
        .collect();
    html_response(render(&events).into_string())
}

pub fn render(events: &[EventSummary]) -> Markup {
    let inner = html! {
        @if events.is_empty() {
            p { "There are no events yet." }
        } @else {
            ul {
                @for event in events {
                    li {
                        a href={ "/events/" (event.slug) "/hotels" } { (event.name) }
                        " " (event.start_date.to_string()) " to " (event.end_date.to_string())
                    }
                }
            }
        }
    };
    main("Events", None, inner)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn links_every_event() {
        let html = render(&[EventSummary {
            slug: "summer-2024".to_owned(),
            name: "Summer <Festival>".to_owned(),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        }])
        .into_string();
        assert!(html.contains(
            "<a href=\"/events/summer-2024/hotels\">Summer &lt;Festival&gt;</a> 2024-06-01 to \
             2024-06-03"
        ));
    }

    #[test]
    fn no_events() {
        assert!(render(&[]).into_string().contains("There are no events yet."));
    }
}
