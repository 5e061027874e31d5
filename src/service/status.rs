use crate::Session;

use super::{Response, json_error};

/// Handle the `/status` endpoint: load state and data quality counters.
pub(super) fn handle_status(session: &Session) -> Response {
    match serde_json::to_string(&session.stats()) {
        Ok(body) => Response::new(200, body),
        Err(err) => Response::new(500, json_error(&err.to_string())),
    }
}
