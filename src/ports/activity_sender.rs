//! ActivitySender port - Delivery of analytics app activities.

use async_trait::async_trait;

use super::messenger_client::MessengerError;
use crate::domain::analytics::{ActivityAck, AppActivity};

/// Port for posting app activities to the analytics endpoint.
#[async_trait]
pub trait ActivitySender: Send + Sync {
    async fn send_activity(&self, activity: &AppActivity) -> Result<ActivityAck, MessengerError>;
}
