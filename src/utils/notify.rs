use serde::Serialize;
use uuid::Uuid;

/// Payload handed to the notification sink after a lifecycle transition.
#[derive(Debug, Clone, Serialize)]
pub struct LeaveEvent {
    pub event_id: String,
    pub tenant_id: u64,
    pub request_id: u64,
    pub user_id: u64,
    pub status: String,
    pub actor_id: u64,
    pub comments: Option<String>,
}

impl LeaveEvent {
    pub fn new(
        tenant_id: u64,
        request_id: u64,
        user_id: u64,
        status: String,
        actor_id: u64,
        comments: Option<String>,
    ) -> Self {
        LeaveEvent {
            event_id: Uuid::new_v4().to_string(),
            tenant_id,
            request_id,
            user_id,
            status,
            actor_id,
            comments,
        }
    }
}

/// Fire-and-forget delivery. The transition already committed; a sink
/// failure is logged and dropped, never propagated.
pub fn dispatch(event: LeaveEvent) {
    actix_web::rt::spawn(async move {
        match serde_json::to_string(&event) {
            Ok(payload) => {
                tracing::info!(
                    target: "leave_events",
                    event_id = %event.event_id,
                    request_id = event.request_id,
                    status = %event.status,
                    payload = %payload,
                    "leave event dispatched"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, request_id = event.request_id, "failed to serialize leave event");
            }
        }
    });
}
