pub mod hotels;
pub mod index;
pub mod outbox;
pub mod shifts;
pub mod trainings;

use bytes::Bytes;
use http::{header, Method, Response, StatusCode};
use http_body_util::Full;
use maud::Markup;
use serde::Serialize;
use tracing::debug;
use volunteer_manager_database::loaders::find_event;
use volunteer_manager_database::models::EventRow;
use volunteer_manager_database::AsyncPgConnection;

use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Hotels,
    Trainings,
    Shifts,
    Outbox,
}

impl Page {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "hotels" => Some(Self::Hotels),
            "trainings" => Some(Self::Trainings),
            "shifts" => Some(Self::Shifts),
            "outbox" => Some(Self::Outbox),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    Event {
        slug: String,
        page: Page,
        format: Format,
    },
}

impl Route {
    /// Unknown paths are rejected before the method is looked at.
    pub fn parse(method: &Method, path: &str) -> Result<Self, AppError> {
        let route = Self::parse_path(path).ok_or_else(|| AppError::NotFound(path.to_owned()))?;
        if method != Method::GET {
            return Err(AppError::MethodNotAllowed(method.clone()));
        }
        Ok(route)
    }

    fn parse_path(path: &str) -> Option<Self> {
        if path == "/" {
            return Some(Self::Index);
        }
        let mut segments = path.strip_prefix("/events/")?.split('/');
        let slug = segments.next().filter(|slug| !slug.is_empty())?;
        let last = segments.next()?;
        if segments.next().is_some() {
            return None;
        }
        let (segment, format) = match last.strip_suffix(".json") {
            Some(segment) => (segment, Format::Json),
            None => (last, Format::Html),
        };
        Some(Self::Event {
            slug: slug.to_owned(),
            page: Page::from_segment(segment)?,
            format,
        })
    }
}

pub async fn dispatch(state: &AppState, route: Route) -> Result<Response<Full<Bytes>>, AppError> {
    let mut connection = state.pool.get().await?;
    match route {
        Route::Index => index::index(&mut connection).await,
        Route::Event { slug, page, format } => {
            let event = load_event(&mut connection, &slug).await?;
            match page {
                Page::Hotels => hotels::hotels(&mut connection, &event, format).await,
                Page::Trainings => trainings::trainings(&mut connection, &event, format).await,
                Page::Shifts => shifts::shifts(&mut connection, &event, format).await,
                Page::Outbox => outbox::outbox(&mut connection, &event, format).await,
            }
        }
    }
}

async fn load_event(connection: &mut AsyncPgConnection, slug: &str) -> Result<EventRow, AppError> {
    let event = find_event(connection, slug)
        .await?
        .ok_or_else(|| AppError::EventNotFound(slug.to_owned()))?;
    debug!(event_id = event.event_id, slug, "found event");
    Ok(event)
}

pub fn html_response(body: String) -> Result<Response<Full<Bytes>>, AppError> {
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Full::new(Bytes::from(body)))?)
}

pub fn json_response<T: Serialize>(value: &T) -> Result<Response<Full<Bytes>>, AppError> {
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(serde_json::to_vec(value)?)))?)
}

pub fn respond<T: Serialize>(
    format: Format,
    page: &T,
    render: impl FnOnce(&T) -> Markup,
) -> Result<Response<Full<Bytes>>, AppError> {
    match format {
        Format::Html => html_response(render(page).into_string()),
        Format::Json => json_response(page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(slug: &str, page: Page, format: Format) -> Route {
        Route::Event {
            slug: slug.to_owned(),
            page,
            format,
        }
    }

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse(&Method::GET, "/").unwrap(), Route::Index);
        assert_eq!(
            Route::parse(&Method::GET, "/events/summer/hotels").unwrap(),
            event("summer", Page::Hotels, Format::Html)
        );
        assert_eq!(
            Route::parse(&Method::GET, "/events/summer/trainings.json").unwrap(),
            event("summer", Page::Trainings, Format::Json)
        );
        assert_eq!(
            Route::parse(&Method::GET, "/events/x/shifts").unwrap(),
            event("x", Page::Shifts, Format::Html)
        );
        assert_eq!(
            Route::parse(&Method::GET, "/events/x/outbox.json").unwrap(),
            event("x", Page::Outbox, Format::Json)
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        for path in [
            "",
            "/index.json",
            "/events",
            "/events/",
            "/events/summer",
            "/events//hotels",
            "/events/summer/hotels/",
            "/events/summer/hotels.xml",
            "/events/summer/rooms",
            "/events/summer/hotels/extra",
        ] {
            assert!(
                matches!(Route::parse(&Method::GET, path), Err(AppError::NotFound(_))),
                "{path}"
            );
        }
    }

    #[test]
    fn only_get_is_allowed() {
        assert!(matches!(
            Route::parse(&Method::POST, "/events/summer/hotels"),
            Err(AppError::MethodNotAllowed(Method::POST))
        ));
        assert!(matches!(
            Route::parse(&Method::DELETE, "/"),
            Err(AppError::MethodNotAllowed(_))
        ));
        assert!(matches!(
            Route::parse(&Method::POST, "/nope"),
            Err(AppError::NotFound(_))
        ));
    }
}
