//! The collection cache.
//!
//! Mirrors every collection fully in memory and keeps the mirror consistent
//! with the backing store: each mutation validates the actor's role, writes
//! the updated collection to the store, and only then commits the local
//! copy. A failed store write therefore leaves the mirror exactly matching
//! what is persisted - the cache is never optimistically ahead.
//!
//! Role denials are explicit [`CacheError::Denied`] values (and a `warn`
//! log), never silent drops; callers decide how to surface them.
//!
//! Lock order when an operation needs more than one collection:
//! services, washes, billing, notifications.

use chrono::Utc;
use tokio::sync::RwLock;

use washlytics_core::money::{discounted_total, subtotal};
use washlytics_core::validate::{BillingRequestForm, EditWashForm, ServiceForm, WashForm};
use washlytics_core::{
    BillingChangeRequest, CarDetails, Notification, RequestId, RequestStatus, Role, Service,
    ServiceId, User, WashId, WashRecord,
};

use crate::ids;
use crate::notify::NotificationDraft;
use crate::store::{DocumentStore, StoreError, collections};

/// Errors returned by cache mutations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The acting user does not hold the role the operation requires.
    #[error("{action} requires the {required} role")]
    Denied {
        action: &'static str,
        required: Role,
    },

    /// No document with the given ID exists in the collection.
    #[error("not found: {0}")]
    NotFound(String),

    /// The requested billing status change is not allowed.
    #[error("cannot change billing request status from {from} to {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    /// The backing store rejected the write; local state is unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Full in-memory mirrors of the four collections.
pub struct CollectionCache {
    pub(crate) store: DocumentStore,
    pub(crate) services: RwLock<Vec<Service>>,
    pub(crate) washes: RwLock<Vec<WashRecord>>,
    pub(crate) billing: RwLock<Vec<BillingChangeRequest>>,
    pub(crate) notifications: RwLock<Vec<Notification>>,
}

impl CollectionCache {
    /// Load every collection from the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if any collection cannot be read.
    pub async fn load(store: DocumentStore) -> Result<Self, StoreError> {
        let services = store.read_all(collections::SERVICES).await?;
        let washes = store.read_all(collections::WASH_RECORDS).await?;
        let billing = store.read_all(collections::BILLING_REQUESTS).await?;
        let notifications = store.read_all(collections::NOTIFICATIONS).await?;

        tracing::info!(
            services = services.len(),
            washes = washes.len(),
            billing_requests = billing.len(),
            notifications = notifications.len(),
            "collections loaded"
        );

        Ok(Self {
            store,
            services: RwLock::new(services),
            washes: RwLock::new(washes),
            billing: RwLock::new(billing),
            notifications: RwLock::new(notifications),
        })
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Snapshot of the wash records, most recent first.
    pub async fn wash_records(&self) -> Vec<WashRecord> {
        self.washes.read().await.clone()
    }

    /// Snapshot of the service catalog.
    pub async fn services(&self) -> Vec<Service> {
        self.services.read().await.clone()
    }

    /// Snapshot of the billing change requests.
    pub async fn billing_requests(&self) -> Vec<BillingChangeRequest> {
        self.billing.read().await.clone()
    }

    // =========================================================================
    // Wash records
    // =========================================================================

    /// Record a new wash. Open to any authenticated user.
    ///
    /// The total is the sum of the selected services' catalog prices at this
    /// moment; new submissions never carry a discount.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Store` if the write does not complete.
    pub async fn add_wash_record(
        &self,
        actor: &User,
        form: WashForm,
    ) -> Result<WashRecord, CacheError> {
        let total = {
            let catalog = self.services.read().await;
            subtotal(&form.selected_services, &catalog)
        };

        let record = WashRecord {
            wash_id: WashId::new(ids::generate(ids::WASH_PREFIX)),
            customer_name: form.customer_name,
            car: CarDetails {
                make: form.car_make,
                model: form.car_model,
                year: form.car_year,
                condition: form.car_condition,
            },
            customer_preferences: form.customer_preferences,
            owner_notes: form.owner_notes,
            selected_services: form.selected_services,
            total_cost: total,
            discount_percentage: rust_decimal::Decimal::ZERO,
            created_at: Utc::now(),
        };

        tracing::info!(wash_id = %record.wash_id, actor = %actor.id, "wash record added");

        let mut washes = self.washes.write().await;
        let mut next = Vec::with_capacity(washes.len() + 1);
        next.push(record.clone());
        next.extend(washes.iter().cloned());
        self.store
            .replace_all(collections::WASH_RECORDS, &next)
            .await?;
        *washes = next;

        Ok(record)
    }

    /// Apply an owner edit to a wash record.
    ///
    /// The stored total becomes the current subtotal less the discount.
    ///
    /// # Errors
    ///
    /// Returns `Denied` for non-owners, `NotFound` for unknown IDs, or
    /// `Store` if the write does not complete.
    pub async fn update_wash_record(
        &self,
        actor: &User,
        id: &WashId,
        form: EditWashForm,
    ) -> Result<WashRecord, CacheError> {
        require_role(actor, Role::Owner, "updating a wash record")?;

        let total = {
            let catalog = self.services.read().await;
            discounted_total(
                subtotal(&form.wash.selected_services, &catalog),
                form.discount_percentage,
            )
        };

        let mut washes = self.washes.write().await;
        let existing = washes
            .iter()
            .find(|r| &r.wash_id == id)
            .ok_or_else(|| CacheError::NotFound(id.to_string()))?;

        let updated = WashRecord {
            wash_id: existing.wash_id.clone(),
            customer_name: form.wash.customer_name,
            car: CarDetails {
                make: form.wash.car_make,
                model: form.wash.car_model,
                year: form.wash.car_year,
                condition: form.wash.car_condition,
            },
            customer_preferences: form.wash.customer_preferences,
            owner_notes: form.wash.owner_notes,
            selected_services: form.wash.selected_services,
            total_cost: total,
            discount_percentage: form.discount_percentage,
            created_at: existing.created_at,
        };

        let next: Vec<WashRecord> = washes
            .iter()
            .map(|r| {
                if &r.wash_id == id {
                    updated.clone()
                } else {
                    r.clone()
                }
            })
            .collect();
        self.store
            .replace_all(collections::WASH_RECORDS, &next)
            .await?;
        *washes = next;

        tracing::info!(wash_id = %id, actor = %actor.id, "wash record updated");
        Ok(updated)
    }

    /// Delete a wash record.
    ///
    /// # Errors
    ///
    /// Returns `Denied` for non-owners, `NotFound` for unknown IDs, or
    /// `Store` if the write does not complete.
    pub async fn delete_wash_record(&self, actor: &User, id: &WashId) -> Result<(), CacheError> {
        require_role(actor, Role::Owner, "deleting a wash record")?;

        let mut washes = self.washes.write().await;
        if !washes.iter().any(|r| &r.wash_id == id) {
            return Err(CacheError::NotFound(id.to_string()));
        }

        let next: Vec<WashRecord> = washes
            .iter()
            .filter(|r| &r.wash_id != id)
            .cloned()
            .collect();
        self.store
            .replace_all(collections::WASH_RECORDS, &next)
            .await?;
        *washes = next;

        tracing::info!(wash_id = %id, actor = %actor.id, "wash record deleted");
        Ok(())
    }

    // =========================================================================
    // Service catalog
    // =========================================================================

    /// Add a service to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `Denied` for non-owners or `Store` if the write fails.
    pub async fn add_service(&self, actor: &User, form: ServiceForm) -> Result<Service, CacheError> {
        require_role(actor, Role::Owner, "adding a service")?;

        let service = Service {
            id: ServiceId::new(ids::generate(ids::SERVICE_PREFIX)),
            name: form.name,
            price: form.price,
            description: form.description,
            category: form.category,
        };

        let mut services = self.services.write().await;
        let mut next = services.clone();
        next.push(service.clone());
        self.store.replace_all(collections::SERVICES, &next).await?;
        *services = next;

        tracing::info!(service_id = %service.id, actor = %actor.id, "service added");
        Ok(service)
    }

    /// Update a catalog service in place. Historical wash records keep the
    /// totals they were saved with.
    ///
    /// # Errors
    ///
    /// Returns `Denied` for non-owners, `NotFound` for unknown IDs, or
    /// `Store` if the write fails.
    pub async fn update_service(
        &self,
        actor: &User,
        id: &ServiceId,
        form: ServiceForm,
    ) -> Result<Service, CacheError> {
        require_role(actor, Role::Owner, "updating a service")?;

        let mut services = self.services.write().await;
        if !services.iter().any(|s| &s.id == id) {
            return Err(CacheError::NotFound(id.to_string()));
        }

        let updated = Service {
            id: id.clone(),
            name: form.name,
            price: form.price,
            description: form.description,
            category: form.category,
        };

        let next: Vec<Service> = services
            .iter()
            .map(|s| if &s.id == id { updated.clone() } else { s.clone() })
            .collect();
        self.store.replace_all(collections::SERVICES, &next).await?;
        *services = next;

        tracing::info!(service_id = %id, actor = %actor.id, "service updated");
        Ok(updated)
    }

    /// Remove a service from the catalog.
    ///
    /// Wash records referencing the service keep their reference; consumers
    /// render the raw ID when no catalog entry resolves.
    ///
    /// # Errors
    ///
    /// Returns `Denied` for non-owners, `NotFound` for unknown IDs, or
    /// `Store` if the write fails.
    pub async fn delete_service(&self, actor: &User, id: &ServiceId) -> Result<(), CacheError> {
        require_role(actor, Role::Owner, "deleting a service")?;

        let mut services = self.services.write().await;
        if !services.iter().any(|s| &s.id == id) {
            return Err(CacheError::NotFound(id.to_string()));
        }

        let next: Vec<Service> = services.iter().filter(|s| &s.id != id).cloned().collect();
        self.store.replace_all(collections::SERVICES, &next).await?;
        *services = next;

        tracing::info!(service_id = %id, actor = %actor.id, "service deleted");
        Ok(())
    }

    // =========================================================================
    // Billing change requests
    // =========================================================================

    /// File a billing change request. Staff only.
    ///
    /// Side effect: broadcasts a notification to the owner role. The
    /// notification write is independent of the request write; if it fails
    /// the request stands and the failure is logged.
    ///
    /// # Errors
    ///
    /// Returns `Denied` for non-staff or `Store` if the request write fails.
    pub async fn add_billing_request(
        &self,
        actor: &User,
        form: BillingRequestForm,
    ) -> Result<BillingChangeRequest, CacheError> {
        require_role(actor, Role::Staff, "filing a billing change request")?;

        let request = BillingChangeRequest {
            id: RequestId::new(ids::generate(ids::REQUEST_PREFIX)),
            wash_id: form.wash_id,
            staff_id: actor.id.clone(),
            staff_name: actor.username.clone(),
            request_details: form.request_details,
            requested_at: Utc::now(),
            status: RequestStatus::Pending,
        };

        {
            let mut billing = self.billing.write().await;
            let mut next = billing.clone();
            next.push(request.clone());
            self.store
                .replace_all(collections::BILLING_REQUESTS, &next)
                .await?;
            *billing = next;
        }

        tracing::info!(request_id = %request.id, actor = %actor.id, "billing change request filed");

        let draft = NotificationDraft {
            user_id: None,
            role_target: Some(Role::Owner),
            message: format!(
                "New billing change request from {} for wash {}",
                request.staff_name, request.wash_id
            ),
            link: Some("/dashboard?tab=requests".to_owned()),
            related_record_id: Some(request.wash_id.to_string()),
        };
        if let Err(e) = self.add_notification(draft).await {
            tracing::error!(request_id = %request.id, error = %e, "billing request notification failed");
        }

        Ok(request)
    }

    /// Resolve a pending billing change request. Owner only.
    ///
    /// Side effect: notifies the requesting staff member. As with filing,
    /// the notification write is independent and its failure is only logged.
    ///
    /// # Errors
    ///
    /// Returns `Denied` for non-owners, `NotFound` for unknown IDs,
    /// `InvalidTransition` unless the request is pending and the target is
    /// terminal, or `Store` if the status write fails.
    pub async fn update_billing_request_status(
        &self,
        actor: &User,
        id: &RequestId,
        status: RequestStatus,
    ) -> Result<BillingChangeRequest, CacheError> {
        require_role(actor, Role::Owner, "resolving a billing change request")?;

        let updated = {
            let mut billing = self.billing.write().await;
            let existing = billing
                .iter()
                .find(|r| &r.id == id)
                .ok_or_else(|| CacheError::NotFound(id.to_string()))?;

            if !existing.status.can_transition_to(status) {
                return Err(CacheError::InvalidTransition {
                    from: existing.status,
                    to: status,
                });
            }

            let mut updated = existing.clone();
            updated.status = status;

            let next: Vec<BillingChangeRequest> = billing
                .iter()
                .map(|r| if &r.id == id { updated.clone() } else { r.clone() })
                .collect();
            self.store
                .replace_all(collections::BILLING_REQUESTS, &next)
                .await?;
            *billing = next;
            updated
        };

        tracing::info!(request_id = %id, status = %status, actor = %actor.id, "billing change request resolved");

        let draft = NotificationDraft {
            user_id: Some(updated.staff_id.clone()),
            role_target: None,
            message: format!(
                "Your billing change request for wash {} was {}",
                updated.wash_id, status
            ),
            link: Some("/dashboard?tab=history".to_owned()),
            related_record_id: Some(updated.wash_id.to_string()),
        };
        if let Err(e) = self.add_notification(draft).await {
            tracing::error!(request_id = %id, error = %e, "billing status notification failed");
        }

        Ok(updated)
    }
}

/// The role gate applied by every restricted mutation.
pub(crate) fn require_role(
    actor: &User,
    required: Role,
    action: &'static str,
) -> Result<(), CacheError> {
    if actor.role == required {
        Ok(())
    } else {
        tracing::warn!(actor = %actor.id, role = %actor.role, action, "operation denied");
        Err(CacheError::Denied { action, required })
    }
}
