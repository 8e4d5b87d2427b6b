//! Notification routing.
//!
//! Notifications are either addressed to a single user or broadcast to a
//! role; [`Notification::visible_to`] decides which a viewer sees. All
//! read-state mutations are visibility-gated, so one viewer can never mark
//! another viewer's notifications.

use chrono::Utc;

use washlytics_core::{Notification, NotificationId, Role, User, UserId};

use crate::cache::{CacheError, CollectionCache};
use crate::ids;
use crate::store::collections;

/// A notification about to be delivered. The cache assigns the ID and
/// timestamp and marks it unread.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub user_id: Option<UserId>,
    pub role_target: Option<Role>,
    pub message: String,
    pub link: Option<String>,
    pub related_record_id: Option<String>,
}

impl CollectionCache {
    /// Deliver a notification.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Store` if the write does not complete.
    pub async fn add_notification(
        &self,
        draft: NotificationDraft,
    ) -> Result<Notification, CacheError> {
        let notification = Notification {
            id: NotificationId::new(ids::generate(ids::NOTIFICATION_PREFIX)),
            user_id: draft.user_id,
            role_target: draft.role_target,
            message: draft.message,
            timestamp: Utc::now(),
            read: false,
            link: draft.link,
            related_record_id: draft.related_record_id,
        };

        let mut notifications = self.notifications.write().await;
        let mut next = Vec::with_capacity(notifications.len() + 1);
        next.push(notification.clone());
        next.extend(notifications.iter().cloned());
        self.store
            .replace_all(collections::NOTIFICATIONS, &next)
            .await?;
        *notifications = next;

        tracing::debug!(notification_id = %notification.id, "notification delivered");
        Ok(notification)
    }

    /// The notifications the viewer can see, most recent first.
    pub async fn notifications_for(&self, viewer: &User) -> Vec<Notification> {
        self.notifications
            .read()
            .await
            .iter()
            .filter(|n| n.visible_to(viewer))
            .cloned()
            .collect()
    }

    /// How many visible notifications the viewer has not read.
    pub async fn unread_count(&self, viewer: &User) -> usize {
        self.notifications
            .read()
            .await
            .iter()
            .filter(|n| n.visible_to(viewer) && !n.read)
            .count()
    }

    /// Mark one of the viewer's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no visible notification has this ID, or
    /// `Store` if the write does not complete.
    pub async fn mark_notification_read(
        &self,
        viewer: &User,
        id: &NotificationId,
    ) -> Result<Notification, CacheError> {
        let mut notifications = self.notifications.write().await;
        let target = notifications
            .iter()
            .find(|n| &n.id == id && n.visible_to(viewer))
            .ok_or_else(|| CacheError::NotFound(id.to_string()))?;

        let mut updated = target.clone();
        updated.read = true;

        let next: Vec<Notification> = notifications
            .iter()
            .map(|n| if &n.id == id { updated.clone() } else { n.clone() })
            .collect();
        self.store
            .replace_all(collections::NOTIFICATIONS, &next)
            .await?;
        *notifications = next;

        Ok(updated)
    }

    /// Mark every notification the viewer can see as read. Returns how many
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the write does not complete.
    pub async fn mark_all_read(&self, viewer: &User) -> Result<usize, CacheError> {
        let mut notifications = self.notifications.write().await;

        let mut changed = 0;
        let next: Vec<Notification> = notifications
            .iter()
            .map(|n| {
                if n.visible_to(viewer) && !n.read {
                    changed += 1;
                    let mut updated = n.clone();
                    updated.read = true;
                    updated
                } else {
                    n.clone()
                }
            })
            .collect();

        if changed > 0 {
            self.store
                .replace_all(collections::NOTIFICATIONS, &next)
                .await?;
            *notifications = next;
        }

        Ok(changed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use washlytics_core::Email;

    use crate::store::DocumentStore;

    use super::*;

    fn owner() -> User {
        User {
            id: "owner-001".into(),
            username: "App Owner".to_owned(),
            email: Email::parse("owner@washlytics.com").unwrap(),
            role: Role::Owner,
        }
    }

    fn staff() -> User {
        User {
            id: "staff-001".into(),
            username: "Staff Member".to_owned(),
            email: Email::parse("staff@washlytics.com").unwrap(),
            role: Role::Staff,
        }
    }

    async fn empty_cache() -> CollectionCache {
        CollectionCache::load(DocumentStore::memory()).await.unwrap()
    }

    fn direct(user: &User, message: &str) -> NotificationDraft {
        NotificationDraft {
            user_id: Some(user.id.clone()),
            role_target: None,
            message: message.to_owned(),
            link: None,
            related_record_id: None,
        }
    }

    fn broadcast(role: Role, message: &str) -> NotificationDraft {
        NotificationDraft {
            user_id: None,
            role_target: Some(role),
            message: message.to_owned(),
            link: None,
            related_record_id: None,
        }
    }

    #[tokio::test]
    async fn test_visibility_separates_viewers() {
        let cache = empty_cache().await;
        cache.add_notification(direct(&staff(), "for staff")).await.unwrap();
        cache
            .add_notification(broadcast(Role::Owner, "for owners"))
            .await
            .unwrap();

        let staff_view = cache.notifications_for(&staff()).await;
        assert_eq!(staff_view.len(), 1);
        assert_eq!(staff_view.first().unwrap().message, "for staff");

        let owner_view = cache.notifications_for(&owner()).await;
        assert_eq!(owner_view.len(), 1);
        assert_eq!(owner_view.first().unwrap().message, "for owners");
    }

    #[tokio::test]
    async fn test_newest_first_ordering() {
        let cache = empty_cache().await;
        cache.add_notification(direct(&staff(), "first")).await.unwrap();
        cache.add_notification(direct(&staff(), "second")).await.unwrap();

        let view = cache.notifications_for(&staff()).await;
        assert_eq!(view.first().unwrap().message, "second");
        assert_eq!(view.last().unwrap().message, "first");
    }

    #[tokio::test]
    async fn test_mark_read_is_visibility_gated() {
        let cache = empty_cache().await;
        let delivered = cache.add_notification(direct(&staff(), "for staff")).await.unwrap();

        let err = cache
            .mark_notification_read(&owner(), &delivered.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CacheError::NotFound(_)));

        let marked = cache
            .mark_notification_read(&staff(), &delivered.id)
            .await
            .unwrap();
        assert!(marked.read);
        assert_eq!(cache.unread_count(&staff()).await, 0);
    }

    #[tokio::test]
    async fn test_mark_all_read_leaves_other_viewers_unread() {
        let cache = empty_cache().await;
        cache.add_notification(direct(&staff(), "a")).await.unwrap();
        cache.add_notification(direct(&staff(), "b")).await.unwrap();
        cache
            .add_notification(broadcast(Role::Owner, "c"))
            .await
            .unwrap();

        assert_eq!(cache.mark_all_read(&staff()).await.unwrap(), 2);
        assert_eq!(cache.unread_count(&staff()).await, 0);
        assert_eq!(cache.unread_count(&owner()).await, 1);

        // Nothing left to mark.
        assert_eq!(cache.mark_all_read(&staff()).await.unwrap(), 0);
    }
}
