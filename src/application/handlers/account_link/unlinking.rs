//! Unlink: mark the sender's mapping unlinked and remove its user.

use crate::domain::linking::AccountLinkingEvent;

use super::{AccountLinkError, AccountLinkHandler, LinkContext, LinkStepError};

impl AccountLinkHandler {
    /// Completes an `unlinked` event.
    ///
    /// The mapping is kept with its new status; the user it points at is
    /// deleted. Returns the sender id on success.
    pub async fn do_unlinking(
        &self,
        event: &AccountLinkingEvent,
    ) -> Result<String, AccountLinkError> {
        tracing::debug!(
            sender_id = %event.sender_id,
            recipient_id = %event.recipient_id,
            "Account unlinking started"
        );

        let mut ctx = LinkContext::default();
        match self.unlink(event, &mut ctx).await {
            Ok(()) => {
                tracing::info!(sender_id = %event.sender_id, "Account unlinked");
                Ok(event.sender_id.clone())
            }
            Err(cause) => {
                let err = AccountLinkError::UnlinkFailed {
                    sender_id: event.sender_id.clone(),
                    cause,
                };
                if err.is_no_mapping() {
                    tracing::debug!(
                        sender_id = %event.sender_id,
                        "No mapping for sender, nothing to unlink"
                    );
                } else {
                    tracing::warn!(
                        sender_id = %event.sender_id,
                        step = ctx.step,
                        mapping_written = ctx.mapping.is_some(),
                        error = %err.cause(),
                        "Account unlinking failed"
                    );
                }
                Err(err)
            }
        }
    }

    async fn unlink(
        &self,
        event: &AccountLinkingEvent,
        ctx: &mut LinkContext,
    ) -> Result<(), LinkStepError> {
        let field = self.user_id_field.as_str();

        ctx.enter("get mapping");
        let mut mapping = self
            .stores
            .mappings
            .get_by_id(&event.sender_id)
            .await?
            .ok_or(LinkStepError::NoMapping)?;
        let user_id = mapping.user_id(field);

        ctx.enter("update mapping");
        mapping.status = event.status;
        let updated = self
            .stores
            .mappings
            .update(mapping)
            .await?
            .ok_or(LinkStepError::NotFound("no mapping"))?;
        ctx.mapping = Some(updated);

        ctx.enter("delete user");
        let user_id = user_id.ok_or_else(|| LinkStepError::MissingUserId {
            field: field.to_string(),
        })?;
        if !self.stores.users.delete(&user_id).await? {
            return Err(LinkStepError::DeleteRejected {
                collection: "user",
                id: user_id,
            });
        }

        Ok(())
    }
}
