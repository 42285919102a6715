//! Page routes: landing page and per-station pages.
//!
//! Pages are deliberately bare; they exist so a browser can open a station
//! and so the routing layer rejects invalid seats before the socket layer
//! ever sees them.

use std::fmt::Write as _;

use axum::Router;
use axum::extract::Path;
use axum::response::Html;
use axum::routing::get;

use crate::app_state::AppState;
use crate::domain::StationId;
use crate::domain::station::parse_seat;
use crate::error::RelayError;

/// `GET /` — Landing page with a link to every station page.
pub async fn index_handler() -> Html<String> {
    let mut links = String::new();
    for station in StationId::ALL {
        if let Some((alliance, slot)) = station.seat() {
            let _ = writeln!(
                links,
                r#"<li><a href="/station/{alliance}/{slot}" target="_blank">{station}</a></li>"#
            );
        }
    }
    Html(render_page(
        "Station Relay",
        StationId::Server,
        &format!("<ul>\n{links}</ul>"),
    ))
}

/// `GET /station/{alliance}/{slot}` — Page for a single scouting seat.
///
/// # Errors
///
/// Returns [`RelayError::InvalidSeat`] if the alliance is not `red`/`blue`
/// or the slot is outside `1..=3`.
pub async fn station_handler(
    Path((alliance, slot)): Path<(String, String)>,
) -> Result<Html<String>, RelayError> {
    let station = parse_seat(&alliance, &slot)?;
    Ok(Html(render_page(
        &format!("Station {station}"),
        station,
        &format!("<p>Connected as <strong>{station}</strong>.</p>"),
    )))
}

/// Wraps `body` in a page that carries its station token in a hidden
/// `#station` element and a `#log` element for received frames.
fn render_page(title: &str, station: StationId, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<h1>{title}</h1>
<div id="station" hidden>{station}</div>
{body}
<pre id="log"></pre>
</body>
</html>
"#
    )
}

/// Page routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/station/{alliance}/{slot}", get(station_handler))
        .route("/station/{alliance}/{slot}/", get(station_handler))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn index_links_every_seat() {
        let Html(page) = index_handler().await;
        for station in StationId::ALL {
            if let Some((alliance, slot)) = station.seat() {
                assert!(page.contains(&format!("/station/{alliance}/{slot}")));
            }
        }
        assert!(page.contains(r#"<div id="station" hidden>server</div>"#));
    }

    #[tokio::test]
    async fn station_page_embeds_token() {
        let result = station_handler(Path(("blue".to_string(), "2".to_string()))).await;
        let Ok(Html(page)) = result else {
            panic!("expected page");
        };
        assert!(page.contains(r#"<div id="station" hidden>blue-2</div>"#));
    }

    #[tokio::test]
    async fn station_page_rejects_bad_seat() {
        let result = station_handler(Path(("red".to_string(), "0".to_string()))).await;
        assert!(matches!(result, Err(RelayError::InvalidSeat { .. })));
    }
}
