//! Doubles shared by the unit tests.

use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::aggregates::{
    CustomerDashboardData, DashboardData, DocumentVaultData, ReportsData, SalesAnalyticsData,
};
use crate::clock::FixedClock;
use crate::error::CrmError;
use crate::models::{
    Customer, CustomerDraft, CustomerStatus, CustomerType, Dealership, Vehicle, VehicleDetails,
    VehicleDraft, VehicleStatus,
};
use crate::ports::{BoxFuture, DataProvider, FormSubmission, SubmissionKind, SubmissionReceipt};
use crate::provider::MockDataProvider;
use crate::store::AggregateStore;

/// 2023-11-14T22:13:20Z
pub const NOW_MILLIS: i64 = 1_700_000_000_000;

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Vehicle(SubmissionKind, Value),
    Customer(Value),
}

/// Records every submission and answers with a receipt or a configured error.
#[derive(Default)]
pub struct RecordingSubmissions {
    calls: Mutex<Vec<Recorded>>,
    failure: Mutex<Option<CrmError>>,
    hold: Mutex<Option<Arc<Notify>>>,
}

impl RecordingSubmissions {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_with(&self, err: CrmError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn succeed(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// Vehicle submissions stay in flight until `gate` is notified.
    pub fn hold_until(&self, gate: Arc<Notify>) {
        *self.hold.lock().unwrap() = Some(gate);
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: Recorded, form_type: &str) -> Result<SubmissionReceipt, CrmError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(SubmissionReceipt {
            id: format!("sub-{}", calls.len()),
            form_type: form_type.to_string(),
        })
    }
}

impl FormSubmission for RecordingSubmissions {
    fn submit_vehicle(&self, payload: Value, kind: SubmissionKind) -> BoxFuture<'_, SubmissionReceipt> {
        let form_type = match kind {
            SubmissionKind::VehicleListing => "VEHICLE_LISTING",
            SubmissionKind::VehicleUpdate => "VEHICLE_UPDATE",
        };
        let hold = self.hold.lock().unwrap().clone();
        let result = self.answer(Recorded::Vehicle(kind, payload), form_type);
        Box::pin(async move {
            if let Some(gate) = hold {
                gate.notified().await;
            }
            result
        })
    }

    fn submit_customer(&self, payload: Value) -> BoxFuture<'_, SubmissionReceipt> {
        let result = self.answer(Recorded::Customer(payload), "CUSTOMER_CREATE");
        Box::pin(async move { result })
    }
}

/// Serves the bundled fixtures unless overridden, and can fail one resource,
/// hold the dealership fetch until released or answer later dealership
/// fetches with a different list.
#[derive(Default)]
pub struct TestProvider {
    dealerships: Option<Vec<Dealership>>,
    customers: Option<Vec<Customer>>,
    fail_on: Option<&'static str>,
    gate: Option<Arc<Notify>>,
    reload: Option<Vec<Dealership>>,
    dealership_fetches: AtomicUsize,
    fixtures: MockDataProvider,
}

impl TestProvider {
    pub fn fixtures() -> Self {
        Self::default()
    }

    pub fn with_dealerships(mut self, dealerships: Vec<Dealership>) -> Self {
        self.dealerships = Some(dealerships);
        self
    }

    pub fn with_customers(mut self, customers: Vec<Customer>) -> Self {
        self.customers = Some(customers);
        self
    }

    pub fn failing_on(mut self, resource: &'static str) -> Self {
        self.fail_on = Some(resource);
        self
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn reloading_with(mut self, dealerships: Vec<Dealership>) -> Self {
        self.reload = Some(dealerships);
        self
    }

    fn check(&self, resource: &str) -> Result<(), CrmError> {
        match self.fail_on {
            Some(failing) if failing == resource => Err(CrmError::provider(resource, "offline")),
            _ => Ok(()),
        }
    }
}

impl DataProvider for TestProvider {
    fn fetch_dealerships(&self) -> BoxFuture<'_, Vec<Dealership>> {
        Box::pin(async move {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.check("dealerships")?;
            let reloading = self.dealership_fetches.fetch_add(1, Ordering::SeqCst) > 0;
            if let (true, Some(reload)) = (reloading, &self.reload) {
                return Ok(reload.clone());
            }
            match &self.dealerships {
                Some(dealerships) => Ok(dealerships.clone()),
                None => self.fixtures.fetch_dealerships().await,
            }
        })
    }

    fn fetch_customers(&self) -> BoxFuture<'_, Vec<Customer>> {
        Box::pin(async move {
            self.check("customers")?;
            match &self.customers {
                Some(customers) => Ok(customers.clone()),
                None => self.fixtures.fetch_customers().await,
            }
        })
    }

    fn fetch_dashboard(&self) -> BoxFuture<'_, DashboardData> {
        Box::pin(async move {
            self.check("dashboard")?;
            self.fixtures.fetch_dashboard().await
        })
    }

    fn fetch_customer_dashboard(&self) -> BoxFuture<'_, CustomerDashboardData> {
        Box::pin(async move {
            self.check("customer dashboard")?;
            self.fixtures.fetch_customer_dashboard().await
        })
    }

    fn fetch_sales_analytics(&self) -> BoxFuture<'_, SalesAnalyticsData> {
        Box::pin(async move {
            self.check("sales analytics")?;
            self.fixtures.fetch_sales_analytics().await
        })
    }

    fn fetch_document_vault(&self) -> BoxFuture<'_, DocumentVaultData> {
        Box::pin(async move {
            self.check("document vault")?;
            self.fixtures.fetch_document_vault().await
        })
    }

    fn fetch_reports(&self) -> BoxFuture<'_, ReportsData> {
        Box::pin(async move {
            self.check("reports")?;
            self.fixtures.fetch_reports().await
        })
    }
}

pub fn store_with(provider: TestProvider, submissions: Arc<RecordingSubmissions>) -> AggregateStore {
    AggregateStore::new(
        Arc::new(provider),
        submissions,
        Arc::new(FixedClock::at_millis(NOW_MILLIS)),
    )
}

/// A store bootstrapped from the bundled fixtures.
pub async fn ready_store() -> (Arc<AggregateStore>, Arc<RecordingSubmissions>) {
    let submissions = RecordingSubmissions::new();
    let store = Arc::new(store_with(TestProvider::fixtures(), submissions.clone()));
    store.bootstrap().await.unwrap();
    (store, submissions)
}

pub fn vehicle(id: &str, make: &str, model: &str) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        year: 2022,
        price: 30_000,
        mileage: 10_000,
        status: VehicleStatus::Available,
        image_url: format!("https://picsum.photos/seed/{}/400/300", id),
        vin: format!("TESTVIN{:0>10}", id.to_uppercase()),
        details: VehicleDetails::default(),
    }
}

pub fn dealership(id: &str, name: &str, vehicles: Vec<Vehicle>) -> Dealership {
    Dealership {
        id: id.to_string(),
        name: name.to_string(),
        location: "Austin, TX".to_string(),
        vehicles,
    }
}

pub fn customer(id: &str, name: &str, company: &str) -> Customer {
    Customer {
        id: id.to_string(),
        initials: crate::models::initials_for(name),
        name: name.to_string(),
        company: company.to_string(),
        email: format!("{}@example.com", id),
        phone: "(555) 010-0000".to_string(),
        location: "Lagos".to_string(),
        customer_type: CustomerType::Individual,
        status: CustomerStatus::Active,
        total_spent: 0,
        purchases: 0,
        enquiries: 0,
        last_contact: "Jan 15, 2024".to_string(),
    }
}

pub fn vehicle_draft(make: &str, model: &str) -> VehicleDraft {
    VehicleDraft {
        make: make.to_string(),
        model: model.to_string(),
        year: 2024,
        price: 25_000,
        mileage: 0,
        details: VehicleDetails {
            contact_email: Some("sales@example.com".to_string()),
            ..VehicleDetails::default()
        },
    }
}

pub fn customer_draft(name: &str, company: &str) -> CustomerDraft {
    CustomerDraft {
        name: name.to_string(),
        company: company.to_string(),
        email: "ada@okafor.example".to_string(),
        phone: "(555) 010-2020".to_string(),
        location: "Austin, TX".to_string(),
        customer_type: CustomerType::Business,
        status: CustomerStatus::Lead,
    }
}
