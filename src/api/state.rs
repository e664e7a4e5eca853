use std::sync::Arc;

use crate::snapshot::DataSnapshot;

#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<DataSnapshot>,
}

impl AppState {
    pub fn new(snapshot: DataSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }
}
