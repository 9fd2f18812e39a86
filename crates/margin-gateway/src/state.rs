use std::sync::Arc;

use margin_core::Sharer;

#[derive(Clone)]
pub struct AppState {
    sharer: Arc<dyn Sharer>,
}

impl AppState {
    pub fn new(sharer: Arc<dyn Sharer>) -> Self {
        Self { sharer }
    }

    pub fn sharer(&self) -> &dyn Sharer {
        self.sharer.as_ref()
    }
}
