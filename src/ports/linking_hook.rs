//! LinkingHook port - Caller extension point for first-time links.

use crate::domain::linking::{LinkingRecord, UserRecord};

/// Hook invoked while a new user record is being drafted.
///
/// Called synchronously on the create path of a link only, after the draft
/// holds its id and authorization code and before it is persisted. Mutating
/// `draft` in place is the only output channel; typical use is copying extra
/// profile fields out of the linking record.
pub trait LinkingHook: Send + Sync {
    fn update_fb_user(&self, draft: &mut UserRecord, linking: &LinkingRecord);
}

/// Hook that copies the named linking attributes onto the new user.
#[derive(Debug, Clone, Default)]
pub struct CopyAttributesHook {
    fields: Vec<String>,
}

impl CopyAttributesHook {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

impl LinkingHook for CopyAttributesHook {
    fn update_fb_user(&self, draft: &mut UserRecord, linking: &LinkingRecord) {
        for field in &self.fields {
            if let Some(value) = linking.attributes.get(field) {
                draft.set_attribute(field.clone(), value.clone());
            }
        }
    }
}
