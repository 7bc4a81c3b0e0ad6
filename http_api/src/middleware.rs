use std::sync::Arc;

use axum::extract::{Request, State};

use crate::{error::Error, misc::SyncedStatus};

pub async fn is_synced(
    State(is_synced): State<Arc<SyncedStatus>>,
    request: Request,
) -> Result<Request, Error> {
    is_synced
        .get()
        .then_some(request)
        .ok_or(Error::NodeIsSyncing)
}
