use crate::model::id::{EventId, RegistrationId, UserId};
use derive_new::new;

#[derive(new)]
pub struct CreateRegistration {
    pub event_id: EventId,
    pub registered_by: UserId,
    pub ticket_count: i32,
}

#[derive(new)]
pub struct CancelRegistration {
    pub registration_id: RegistrationId,
    pub requested_user: UserId,
}
