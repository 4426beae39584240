use crate::{algebra::client::SalesapClient, logic::duplicate::process_webhook};
use salesap_domain::DealId;
use std::sync::Mutex;

/// Hands an accepted deal over to background processing. Implementations
/// must return immediately and never report back to the caller.
pub trait DispatchDuplication {
    fn dispatch(&self, deal_id: DealId);
}

/// Spawns one detached tokio task per accepted webhook.
pub struct TaskDispatcher {
    client: SalesapClient,
}

impl TaskDispatcher {
    pub fn new(client: SalesapClient) -> Self {
        Self { client }
    }
}

impl DispatchDuplication for TaskDispatcher {
    fn dispatch(&self, deal_id: DealId) {
        tokio::spawn(process_webhook(self.client.clone(), deal_id));
    }
}

/// Keeps dispatched ids in memory instead of running them.
#[derive(Default)]
pub struct RecordingDispatcher {
    dispatched: Mutex<Vec<DealId>>,
}

impl RecordingDispatcher {
    pub fn dispatched(&self) -> Vec<DealId> {
        self.dispatched
            .lock()
            .map(|ids| ids.clone())
            .unwrap_or_default()
    }
}

impl DispatchDuplication for RecordingDispatcher {
    fn dispatch(&self, deal_id: DealId) {
        if let Ok(mut ids) = self.dispatched.lock() {
            ids.push(deal_id);
        }
    }
}
