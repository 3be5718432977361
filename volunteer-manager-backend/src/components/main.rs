use maud::{html, Markup, DOCTYPE};

const EVENT_PAGES: [(&str, &str); 4] = [
    ("hotels", "Hotels"),
    ("trainings", "Trainings"),
    ("shifts", "Shifts"),
    ("outbox", "Outbox"),
];

/// Wraps a rendered page body into the shared layout.
pub fn main(page_title: &str, event_slug: Option<&str>, inner: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page_title) }
            }
            body {
                nav {
                    span { "Volunteer Manager" }
                    ul {
                        li {
                            a href="/" { "Events" }
                        }
                        @if let Some(slug) = event_slug {
                            @for (page, label) in EVENT_PAGES {
                                li {
                                    a href={ "/events/" (slug) "/" (page) } { (label) }
                                }
                            }
                        }
                    }
                }
                main {
                    h1 { (page_title) }
                    (inner)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use maud::PreEscaped;

    use super::*;

    #[test]
    fn title_is_escaped() {
        let html = main("Tom & Jerry <3", None, PreEscaped("<p>body</p>".to_owned())).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Tom &amp; Jerry &lt;3</title>"));
        assert!(html.contains("<p>body</p>"));
        assert!(!html.contains("/events/"));
    }

    #[test]
    fn event_navigation() {
        let html = main("Hotels", Some("summer-2024"), html! {}).into_string();
        assert!(html.contains(r#"<a href="/events/summer-2024/shifts">Shifts</a>"#));
        assert!(html.contains(r#"<a href="/events/summer-2024/outbox">Outbox</a>"#));
    }
}
