//! The aggregate store: the single writer of dealerships, vehicles,
//! customers and notifications.
//!
//! Every mutation that reaches the form API runs in two phases. Phase one
//! awaits the remote submission without touching state. Phase two applies the
//! local change synchronously inside one `watch::Sender::send_modify`, so
//! subscribers never observe a half-applied change. A failed phase one leaves
//! state exactly as it was.

use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use dealerdesk_common::log_error;

use crate::aggregates::ScreenAggregates;
use crate::clock::Clock;
use crate::error::{CrmError, BOOTSTRAP_FAILED_MESSAGE};
use crate::models::{
    initials_for, Customer, CustomerDraft, Dealership, Notification, NotificationKind, Vehicle,
    VehicleDraft, VehicleStatus,
};
use crate::ports::{ConfirmationGate, DataProvider, FormSubmission, SubmissionKind};

pub const DELETE_VEHICLE_PROMPT: &str = "Are you sure you want to delete this vehicle?";

const VIN_LENGTH: usize = 17;

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// A shared collection tagged with a revision.
///
/// Revisions are unique across the process, so a cache keyed by revision can
/// never confuse two stores. Cloning is cheap; writing copies on demand.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    value: Arc<T>,
    revision: u64,
}

impl<T: Clone> Versioned<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(value),
            revision: next_revision(),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn shared(&self) -> Arc<T> {
        Arc::clone(&self.value)
    }

    /// Mutable access; always bumps the revision.
    fn make_mut(&mut self) -> &mut T {
        self.revision = next_revision();
        Arc::make_mut(&mut self.value)
    }

    fn replace(&mut self, value: T) {
        self.value = Arc::new(value);
        self.revision = next_revision();
    }
}

impl<T: Clone + Default> Default for Versioned<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Everything the store holds at one point in time.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub status: BootstrapStatus,
    pub dealerships: Versioned<Vec<Dealership>>,
    pub customers: Versioned<Vec<Customer>>,
    pub notifications: Versioned<Vec<Notification>>,
    pub active_dealership_id: Option<String>,
    pub aggregates: Option<Arc<ScreenAggregates>>,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            status: BootstrapStatus::Loading,
            dealerships: Versioned::default(),
            customers: Versioned::default(),
            notifications: Versioned::default(),
            active_dealership_id: None,
            aggregates: None,
        }
    }
}

impl StoreSnapshot {
    pub fn dealership(&self, id: &str) -> Option<&Dealership> {
        self.dealerships.get().iter().find(|d| d.id == id)
    }

    /// The dealership whose inventory contains `vehicle_id`.
    pub fn owner_of(&self, vehicle_id: &str) -> Option<&Dealership> {
        self.dealerships
            .get()
            .iter()
            .find(|d| d.vehicles.iter().any(|v| v.id == vehicle_id))
    }
}

pub struct AggregateStore {
    provider: Arc<dyn DataProvider>,
    submissions: Arc<dyn FormSubmission>,
    clock: Arc<dyn Clock>,
    state: watch::Sender<StoreSnapshot>,
    torn_down: AtomicBool,
}

impl AggregateStore {
    pub fn new(
        provider: Arc<dyn DataProvider>,
        submissions: Arc<dyn FormSubmission>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (state, _) = watch::channel(StoreSnapshot::default());
        Self {
            provider,
            submissions,
            clock,
            state,
            torn_down: AtomicBool::new(false),
        }
    }

    /// The current state. Cheap: collections are shared, not copied.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.borrow().clone()
    }

    /// Receive every committed state change.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.state.subscribe()
    }

    /// Mark the owning context as gone. Bootstrap results that arrive later
    /// are dropped. In-flight requests are not aborted.
    pub fn teardown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// Load all seven collections concurrently and apply them together.
    ///
    /// On any failure nothing is applied and the status becomes
    /// [`BootstrapStatus::Failed`]. May be called again to retry.
    pub async fn bootstrap(&self) -> Result<(), CrmError> {
        if self.is_torn_down() {
            return Ok(());
        }
        self.state.send_if_modified(|s| {
            let changed = s.status != BootstrapStatus::Loading;
            s.status = BootstrapStatus::Loading;
            changed
        });

        let provider = &self.provider;
        let result = tokio::try_join!(
            provider.fetch_dealerships(),
            provider.fetch_customers(),
            provider.fetch_dashboard(),
            provider.fetch_customer_dashboard(),
            provider.fetch_sales_analytics(),
            provider.fetch_document_vault(),
            provider.fetch_reports(),
        );

        if self.is_torn_down() {
            debug!("Discarding bootstrap results after teardown");
            return Ok(());
        }

        match result {
            Ok((
                dealerships,
                customers,
                dashboard,
                customer_dashboard,
                sales_analytics,
                document_vault,
                reports,
            )) => {
                let first_id = dealerships.first().map(|d| d.id.clone());
                info!(
                    "Loaded {} dealerships and {} customers",
                    dealerships.len(),
                    customers.len()
                );
                self.state.send_modify(|s| {
                    s.dealerships.replace(dealerships);
                    s.customers.replace(customers);
                    s.aggregates = Some(Arc::new(ScreenAggregates {
                        dashboard,
                        customer_dashboard,
                        sales_analytics,
                        document_vault,
                        reports,
                    }));
                    if s.active_dealership_id.is_none() {
                        s.active_dealership_id = first_id;
                    }
                    s.status = BootstrapStatus::Ready;
                });
                Ok(())
            }
            Err(cause) => {
                error!("Failed to load CRM data: {}", cause);
                self.state.send_modify(|s| {
                    s.status = BootstrapStatus::Failed(BOOTSTRAP_FAILED_MESSAGE.to_string());
                });
                Err(CrmError::Bootstrap {
                    cause: Box::new(cause),
                })
            }
        }
    }

    pub fn select_dealership(&self, dealership_id: &str) {
        self.state.send_if_modified(|s| {
            if s.active_dealership_id.as_deref() == Some(dealership_id) {
                return false;
            }
            s.active_dealership_id = Some(dealership_id.to_string());
            true
        });
    }

    /// Publish a new listing to `dealership_id`.
    ///
    /// Fails with [`CrmError::Precondition`] before any network call when no
    /// dealership is given or it is not loaded.
    pub async fn add_vehicle(
        &self,
        dealership_id: Option<&str>,
        draft: VehicleDraft,
    ) -> Result<Vehicle, CrmError> {
        let dealership_id = dealership_id
            .ok_or_else(|| CrmError::precondition("Select a dealership before adding vehicles."))?
            .to_string();
        let dealership_name = self
            .snapshot()
            .dealership(&dealership_id)
            .map(|d| d.name.clone())
            .ok_or_else(|| {
                CrmError::precondition(format!("Dealership {} is not available.", dealership_id))
            })?;

        let mut payload = to_object(&draft)?;
        payload.insert("dealershipId".into(), Value::String(dealership_id.clone()));
        payload.insert("dealershipName".into(), Value::String(dealership_name.clone()));

        if let Err(err) = self
            .submissions
            .submit_vehicle(Value::Object(payload), SubmissionKind::VehicleListing)
            .await
        {
            log_error(&err, "Failed to persist vehicle listing submission");
            return Err(err);
        }

        let stamp = self.clock.stamp();
        let vehicle = Vehicle {
            id: format!("v{}", stamp),
            make: draft.make,
            model: draft.model,
            year: draft.year,
            price: draft.price,
            mileage: draft.mileage,
            status: VehicleStatus::Available,
            image_url: format!("https://picsum.photos/seed/{}/400/300", stamp),
            vin: placeholder_vin(stamp),
            details: draft.details,
        };
        let notification = Notification {
            id: format!("notif-{}", self.clock.stamp()),
            title: "New Vehicle Listed".to_string(),
            message: format!(
                "A {} {} was added to {}.",
                vehicle.make, vehicle.model, dealership_name
            ),
            timestamp: self.clock.now(),
            read: false,
            kind: NotificationKind::Vehicle,
        };

        self.state.send_modify(|s| {
            let position = s
                .dealerships
                .get()
                .iter()
                .position(|d| d.id == dealership_id);
            match position {
                Some(di) => s.dealerships.make_mut()[di].vehicles.push(vehicle.clone()),
                None => warn!(
                    "Dealership {} disappeared before vehicle {} was applied",
                    dealership_id, vehicle.id
                ),
            }
            s.notifications.make_mut().insert(0, notification);
        });

        info!("Listed vehicle {} at {}", vehicle.id, dealership_id);
        Ok(vehicle)
    }

    /// Replace a vehicle in place after the update is recorded remotely.
    ///
    /// Requires an active dealership. The edit lands in the dealership that
    /// owns the vehicle, which may differ from the active one when the
    /// vehicle was reached through search. No notification is produced.
    pub async fn update_vehicle(&self, vehicle: Vehicle) -> Result<(), CrmError> {
        let snapshot = self.snapshot();
        let active_id = snapshot
            .active_dealership_id
            .clone()
            .ok_or_else(|| CrmError::precondition("Select a dealership before updating vehicles."))?;
        let target_id = snapshot
            .owner_of(&vehicle.id)
            .map(|d| d.id.clone())
            .unwrap_or(active_id);

        let mut payload = to_object(&vehicle)?;
        payload.insert("dealershipId".into(), Value::String(target_id.clone()));
        payload.insert("updatedFromInventory".into(), Value::Bool(true));

        if let Err(err) = self
            .submissions
            .submit_vehicle(Value::Object(payload), SubmissionKind::VehicleUpdate)
            .await
        {
            log_error(&err, "Failed to persist vehicle update submission");
            return Err(err);
        }

        let vehicle_id = vehicle.id.clone();
        self.state.send_if_modified(|s| {
            let position = s
                .dealerships
                .get()
                .iter()
                .position(|d| d.id == target_id)
                .and_then(|di| {
                    s.dealerships.get()[di]
                        .vehicles
                        .iter()
                        .position(|v| v.id == vehicle.id)
                        .map(|vi| (di, vi))
                });
            match position {
                Some((di, vi)) => {
                    s.dealerships.make_mut()[di].vehicles[vi] = vehicle;
                    true
                }
                None => false,
            }
        });

        info!("Updated vehicle {} at {}", vehicle_id, target_id);
        Ok(())
    }

    /// Remove a vehicle after the gate confirms. Local only, no undo.
    ///
    /// Returns whether a vehicle was removed. No dealership, a declined
    /// prompt or an unknown vehicle id are all no-ops.
    pub fn delete_vehicle(
        &self,
        dealership_id: Option<&str>,
        vehicle_id: &str,
        gate: &dyn ConfirmationGate,
    ) -> bool {
        let Some(dealership_id) = dealership_id else {
            return false;
        };
        if !gate.confirm(DELETE_VEHICLE_PROMPT) {
            return false;
        }

        let removed = self.state.send_if_modified(|s| {
            let position = s
                .dealerships
                .get()
                .iter()
                .position(|d| d.id == dealership_id)
                .and_then(|di| {
                    s.dealerships.get()[di]
                        .vehicles
                        .iter()
                        .position(|v| v.id == vehicle_id)
                        .map(|vi| (di, vi))
                });
            match position {
                Some((di, vi)) => {
                    s.dealerships.make_mut()[di].vehicles.remove(vi);
                    true
                }
                None => false,
            }
        });

        if removed {
            info!("Deleted vehicle {} from {}", vehicle_id, dealership_id);
        }
        removed
    }

    /// Record a new customer remotely, then prepend it locally.
    pub async fn add_customer(&self, draft: CustomerDraft) -> Result<Customer, CrmError> {
        let payload = Value::Object(to_object(&draft)?);
        if let Err(err) = self.submissions.submit_customer(payload).await {
            log_error(&err, "Failed to persist customer form submission");
            return Err(err);
        }

        let now = self.clock.now();
        let customer = Customer {
            id: format!("c{}", self.clock.stamp()),
            initials: initials_for(&draft.name),
            name: draft.name,
            company: draft.company,
            email: draft.email,
            phone: draft.phone,
            location: draft.location,
            customer_type: draft.customer_type,
            status: draft.status,
            total_spent: 0,
            purchases: 0,
            enquiries: 1,
            last_contact: now.format("%b %-d, %Y").to_string(),
        };
        let notification = Notification {
            id: format!("notif-{}", self.clock.stamp()),
            title: "New Customer Added".to_string(),
            message: format!("{} from {} is now a customer.", customer.name, customer.company),
            timestamp: now,
            read: false,
            kind: NotificationKind::Customer,
        };

        self.state.send_modify(|s| {
            s.customers.make_mut().insert(0, customer.clone());
            s.notifications.make_mut().insert(0, notification);
        });

        info!("Added customer {}", customer.id);
        Ok(customer)
    }

    /// Mark every notification read. A no-op when none are unread.
    pub fn mark_all_notifications_read(&self) {
        self.state.send_if_modified(|s| {
            if s.notifications.get().iter().all(|n| n.read) {
                return false;
            }
            for notification in s.notifications.make_mut().iter_mut() {
                notification.read = true;
            }
            true
        });
    }
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, CrmError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CrmError::Server("Submission payload is not an object".to_string())),
        Err(err) => Err(CrmError::Server(format!("Unable to encode submission: {}", err))),
    }
}

/// A 17 character upper-case placeholder, not a checksummed VIN.
fn placeholder_vin(stamp: i64) -> String {
    let mut vin = format!("VIN{:014}", stamp.unsigned_abs());
    vin.truncate(VIN_LENGTH);
    vin.to_uppercase()
}
