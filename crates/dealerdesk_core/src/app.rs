//! Application shell: owns the store, tracks the selected view and search
//! query, and turns the current state into the [`Screen`] to show.

use std::fmt;
use std::sync::Arc;

use dealerdesk_config::{resolve_api_base_url, AppConfig};
use tracing::debug;

use crate::aggregates::{
    CustomerDashboardData, DashboardData, DocumentVaultData, ReportsData, SalesAnalyticsData,
};
use crate::clock::SystemClock;
use crate::error::CrmError;
use crate::models::{Customer, CustomerDraft, Dealership, Vehicle, VehicleDraft};
use crate::ports::ConfirmationGate;
use crate::provider::DataProviderKind;
use crate::search::SearchResults;
use crate::store::{AggregateStore, BootstrapStatus};
use crate::submission::HttpFormSubmissionClient;
use crate::views::{DashboardStats, DerivedViews, InventoryStats};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Analytics,
    Inventory,
    Customers,
    DocumentVault,
    Reports,
    ListCar,
    SearchResults,
    /// A navigation target with no screen yet.
    Other(String),
}

impl View {
    pub fn from_key(key: &str) -> Self {
        match key {
            "dashboard" => View::Dashboard,
            "analytics" => View::Analytics,
            "inventory" => View::Inventory,
            "customers" => View::Customers,
            "documentVault" => View::DocumentVault,
            "reports" => View::Reports,
            "listCar" => View::ListCar,
            "searchResults" => View::SearchResults,
            other => View::Other(other.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            View::Dashboard => "dashboard",
            View::Analytics => "analytics",
            View::Inventory => "inventory",
            View::Customers => "customers",
            View::DocumentVault => "documentVault",
            View::Reports => "reports",
            View::ListCar => "listCar",
            View::SearchResults => "searchResults",
            View::Other(key) => key,
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::Reports
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What the main area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Initializing,
    BootstrapError(String),
    /// The view's data is not available yet.
    Loading(&'static str),
    Dashboard {
        dealership: Dealership,
        stats: DashboardStats,
        data: DashboardData,
    },
    Analytics(SalesAnalyticsData),
    Inventory {
        dealership: Dealership,
        stats: InventoryStats,
    },
    Customers {
        customers: Arc<Vec<Customer>>,
        overview: CustomerDashboardData,
    },
    DocumentVault(DocumentVaultData),
    Reports(ReportsData),
    ListCar,
    SearchResults {
        query: String,
        results: SearchResults,
    },
    ComingSoon,
}

impl Screen {
    /// The text of a placeholder screen, `None` for screens with content.
    pub fn message(&self) -> Option<&str> {
        match self {
            Screen::Initializing => Some("Initializing CRM data..."),
            Screen::BootstrapError(message) => Some(message),
            Screen::Loading(message) => Some(message),
            Screen::ComingSoon => Some("Coming Soon"),
            _ => None,
        }
    }
}

pub struct CrmApp {
    store: Arc<AggregateStore>,
    views: DerivedViews,
    active_view: View,
    search_query: String,
}

impl CrmApp {
    pub fn new(store: Arc<AggregateStore>) -> Self {
        Self {
            store,
            views: DerivedViews::new(),
            active_view: View::default(),
            search_query: String::new(),
        }
    }

    /// Wire the store from configuration: the configured data provider, the
    /// HTTP form client at the resolved API base URL and the system clock.
    pub fn from_config(config: &AppConfig, page_origin: Option<&str>) -> Self {
        let provider = DataProviderKind::from_key(&config.client.data_provider).build();
        let base_url = resolve_api_base_url(config.client.api_base_url.as_deref(), page_origin);
        debug!("Form submissions go to {}", base_url);
        let submissions = Arc::new(HttpFormSubmissionClient::new(base_url));
        Self::new(Arc::new(AggregateStore::new(
            provider,
            submissions,
            SystemClock::shared(),
        )))
    }

    pub fn store(&self) -> &Arc<AggregateStore> {
        &self.store
    }

    pub async fn start(&self) -> Result<(), CrmError> {
        self.store.bootstrap().await
    }

    pub fn active_view(&self) -> &View {
        &self.active_view
    }

    pub fn navigate(&mut self, view: View) {
        debug!("Navigating to {}", view);
        self.active_view = view;
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Show search results unless the query is blank. Returns whether the
    /// view changed.
    pub fn submit_search(&mut self) -> bool {
        if self.search_query.trim().is_empty() {
            return false;
        }
        self.navigate(View::SearchResults);
        true
    }

    pub fn start_listing(&mut self) {
        self.navigate(View::ListCar);
    }

    pub fn cancel_listing(&mut self) {
        self.navigate(View::Dashboard);
    }

    /// Publish a listing to the active dealership and show its inventory.
    /// On failure the view stays on the form.
    pub async fn publish_listing(&mut self, draft: VehicleDraft) -> Result<Vehicle, CrmError> {
        let active_id = self.store.snapshot().active_dealership_id;
        let vehicle = self.store.add_vehicle(active_id.as_deref(), draft).await?;
        self.navigate(View::Inventory);
        Ok(vehicle)
    }

    pub async fn update_vehicle(&self, vehicle: Vehicle) -> Result<(), CrmError> {
        self.store.update_vehicle(vehicle).await
    }

    /// Delete from the active dealership's inventory.
    pub fn delete_vehicle(&self, vehicle_id: &str, gate: &dyn ConfirmationGate) -> bool {
        let active_id = self.store.snapshot().active_dealership_id;
        self.store
            .delete_vehicle(active_id.as_deref(), vehicle_id, gate)
    }

    pub async fn add_customer(&self, draft: CustomerDraft) -> Result<Customer, CrmError> {
        self.store.add_customer(draft).await
    }

    pub fn select_dealership(&self, dealership_id: &str) {
        self.store.select_dealership(dealership_id);
    }

    /// Opening the notification panel marks everything read.
    pub fn open_notifications(&self) {
        self.store.mark_all_notifications_read();
    }

    pub fn unread_count(&mut self) -> usize {
        let snapshot = self.store.snapshot();
        self.views.unread_count(&snapshot)
    }

    pub fn render(&mut self) -> Screen {
        let snapshot = self.store.snapshot();
        match &snapshot.status {
            BootstrapStatus::Loading => return Screen::Initializing,
            BootstrapStatus::Failed(message) => return Screen::BootstrapError(message.clone()),
            BootstrapStatus::Ready => {}
        }

        let aggregates = snapshot.aggregates.clone();
        match &self.active_view {
            View::ListCar => Screen::ListCar,
            View::SearchResults => Screen::SearchResults {
                query: self.search_query.clone(),
                results: self.views.search(&snapshot, &self.search_query),
            },
            View::Dashboard => {
                let stats = self.views.dashboard_stats(&snapshot);
                match (self.views.active_dealership(&snapshot), stats, aggregates) {
                    (Some(dealership), Some(stats), Some(aggregates)) => Screen::Dashboard {
                        dealership: dealership.clone(),
                        stats,
                        data: aggregates.dashboard.clone(),
                    },
                    _ => Screen::Loading("Loading dashboard data..."),
                }
            }
            View::Analytics => match aggregates {
                Some(aggregates) => Screen::Analytics(aggregates.sales_analytics.clone()),
                None => Screen::Loading("Loading analytics..."),
            },
            View::Inventory => {
                let stats = self.views.inventory_stats(&snapshot);
                match (self.views.active_dealership(&snapshot), stats) {
                    (Some(dealership), Some(stats)) => Screen::Inventory {
                        dealership: dealership.clone(),
                        stats,
                    },
                    _ => Screen::Loading("Loading inventory..."),
                }
            }
            View::Customers => match aggregates {
                Some(aggregates) => Screen::Customers {
                    customers: snapshot.customers.shared(),
                    overview: aggregates.customer_dashboard.clone(),
                },
                None => Screen::Loading("Loading customers..."),
            },
            View::DocumentVault => match aggregates {
                Some(aggregates) => Screen::DocumentVault(aggregates.document_vault.clone()),
                None => Screen::Loading("Loading documents..."),
            },
            View::Reports => match aggregates {
                Some(aggregates) => Screen::Reports(aggregates.reports.clone()),
                None => Screen::Loading("Loading reports..."),
            },
            View::Other(_) => Screen::ComingSoon,
        }
    }
}
