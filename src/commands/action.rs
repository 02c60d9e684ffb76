//! Confirmed-action Commands

use shoplist_sync::{ActionResponse, SyncError};

use super::post;

/// POST to a URL supplied by the triggering control (delete, leave, ...)
pub async fn post_action(url: &str, csrf_token: &str) -> Result<ActionResponse, SyncError> {
    post(url, csrf_token).await
}
