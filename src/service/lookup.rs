use serde_json::json;
use tracing::debug;

use crate::{INVALID_INPUT_MESSAGE, LookupOutcome, NOT_FOUND_MESSAGE, RawForm, Session};

use super::{Response, json_error};

/// Handle the `/lookup` endpoint using `sector`, `subdistrict`, `gender` and `sejjel`.
pub(super) fn handle_lookup(session: &Session, query: &str) -> Response {
    let form = match RawForm::from_query(query) {
        Ok(form) => form,
        Err(err) => {
            debug!(error = %err, "undecodable lookup query");
            return Response::new(400, json_error(INVALID_INPUT_MESSAGE));
        }
    };

    match session.lookup(&form) {
        LookupOutcome::Found { record, matches } => {
            let body = json!({
                "center": record.center,
                "place": record.place,
                "matches": matches,
            });
            Response::new(200, body.to_string())
        }
        LookupOutcome::NoMatch | LookupOutcome::NotFound => {
            Response::new(404, json_error(NOT_FOUND_MESSAGE))
        }
        LookupOutcome::Invalid(_) => Response::new(400, json_error(INVALID_INPUT_MESSAGE)),
        LookupOutcome::NotReady => Response::new(503, json_error("data not yet loaded")),
        LookupOutcome::Unavailable => Response::new(503, json_error("data failed to load")),
    }
}
