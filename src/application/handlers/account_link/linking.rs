//! Link: consume a linking record and bind the sender to its user.

use crate::domain::linking::{AccountLinkingEvent, MappingRecord, StoredRecord, UserRecord};
use crate::ports::LinkingHook;

use super::{AccountLinkError, AccountLinkHandler, LinkContext, LinkStepError};

impl AccountLinkHandler {
    /// Completes a `linked` event.
    ///
    /// Steps, in order: read the linking record for the authorization code,
    /// create or refresh the user it names, create or refresh the sender's
    /// mapping, then delete the linking record. `hook` runs on the user draft
    /// only when the user is created.
    ///
    /// Returns the sender id on success.
    pub async fn do_linking(
        &self,
        event: &AccountLinkingEvent,
        hook: Option<&dyn LinkingHook>,
    ) -> Result<String, AccountLinkError> {
        tracing::debug!(
            sender_id = %event.sender_id,
            recipient_id = %event.recipient_id,
            "Account linking started"
        );

        let mut ctx = LinkContext::default();
        match self.link(event, hook, &mut ctx).await {
            Ok(()) => {
                tracing::info!(
                    sender_id = %event.sender_id,
                    recipient_id = %event.recipient_id,
                    "Account linked"
                );
                Ok(event.sender_id.clone())
            }
            Err(cause) => {
                tracing::warn!(
                    sender_id = %event.sender_id,
                    step = ctx.step,
                    user_written = ctx.user.is_some(),
                    mapping_written = ctx.mapping.is_some(),
                    error = %cause,
                    "Account linking failed"
                );
                Err(AccountLinkError::LinkFailed {
                    sender_id: event.sender_id.clone(),
                    cause,
                })
            }
        }
    }

    async fn link(
        &self,
        event: &AccountLinkingEvent,
        hook: Option<&dyn LinkingHook>,
        ctx: &mut LinkContext,
    ) -> Result<(), LinkStepError> {
        let field = self.user_id_field.as_str();

        // 1. Linking record for the authorization code
        ctx.enter("get linking");
        let code = event
            .authorization_code
            .as_deref()
            .ok_or(LinkStepError::NotFound("no linking"))?;
        let linking = self
            .stores
            .linking
            .get_by_id(code)
            .await?
            .ok_or(LinkStepError::NotFound("no linking"))?;
        ctx.linking = Some(linking.clone());

        // 2. User named by the linking record
        ctx.enter("get user");
        let user_id = linking
            .user_id(field)
            .ok_or_else(|| LinkStepError::MissingUserId {
                field: field.to_string(),
            })?;
        let existing = self.stores.users.get_by_id(&user_id).await?;

        // 3-4. Create or refresh the user
        let stored = match existing {
            None => {
                ctx.enter("add user");
                let mut draft = UserRecord::new(user_id, linking.auth_code.clone());
                if let Some(hook) = hook {
                    hook.update_fb_user(&mut draft, &linking);
                }
                self.stores.users.add(draft).await?
            }
            Some(mut user) => {
                ctx.enter("update user");
                user.auth_code = linking.auth_code.clone();
                self.stores.users.update(user).await?
            }
        };
        ctx.user = Some(stored.ok_or(LinkStepError::NotFound("no user"))?);

        // 5. Sender mapping
        ctx.enter("get mapping");
        let existing = self.stores.mappings.get_by_id(&event.sender_id).await?;

        // 6-7. Create or refresh the mapping
        let stored = match existing {
            None => {
                ctx.enter("add mapping");
                let mapping = MappingRecord::new(
                    event.sender_id.clone(),
                    event.recipient_id.clone(),
                    event.status,
                    field,
                    linking.attributes.get(field),
                );
                self.stores.mappings.add(mapping).await?
            }
            Some(mut mapping) => {
                ctx.enter("update mapping");
                mapping.page_id = event.recipient_id.clone();
                mapping.status = event.status;
                self.stores.mappings.update(mapping).await?
            }
        };
        ctx.mapping = Some(stored.ok_or(LinkStepError::NotFound("no mapping"))?);

        // 8-9. Consume the linking record
        ctx.enter("delete linking");
        let linking_id = linking.id().to_string();
        if !self.stores.linking.delete(&linking_id).await? {
            return Err(LinkStepError::DeleteRejected {
                collection: "linking",
                id: linking_id,
            });
        }

        Ok(())
    }
}
