use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::aggregates::{
    CustomerDashboardData, DashboardData, DocumentVaultData, ReportsData, SalesAnalyticsData,
};
use crate::error::CrmError;
use crate::models::{Customer, Dealership};
use crate::ports::{BoxFuture, DataProvider};

struct Fixtures {
    dealerships: Vec<Dealership>,
    customers: Vec<Customer>,
    dashboard: DashboardData,
    customer_dashboard: CustomerDashboardData,
    sales_analytics: SalesAnalyticsData,
    document_vault: DocumentVaultData,
    reports: ReportsData,
}

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> Result<T, CrmError> {
    serde_json::from_str(raw).map_err(|e| CrmError::provider(name, e))
}

fn load_fixtures() -> Result<Fixtures, CrmError> {
    debug!("Parsing bundled fixture data");
    Ok(Fixtures {
        dealerships: parse("dealerships", include_str!("../../fixtures/dealerships.json"))?,
        customers: parse("customers", include_str!("../../fixtures/customers.json"))?,
        dashboard: parse("dashboard", include_str!("../../fixtures/dashboard.json"))?,
        customer_dashboard: parse(
            "customer dashboard",
            include_str!("../../fixtures/customer_dashboard.json"),
        )?,
        sales_analytics: parse(
            "sales analytics",
            include_str!("../../fixtures/sales_analytics.json"),
        )?,
        document_vault: parse(
            "document vault",
            include_str!("../../fixtures/document_vault.json"),
        )?,
        reports: parse("reports", include_str!("../../fixtures/reports.json"))?,
    })
}

// Parsed once per process; every fetch hands out a clone.
static FIXTURES: Lazy<Result<Fixtures, CrmError>> = Lazy::new(load_fixtures);

/// Serves the bundled fixture data.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockDataProvider;

impl MockDataProvider {
    pub fn new() -> Self {
        Self
    }

    fn copy_of<T: Clone>(select: impl FnOnce(&Fixtures) -> &T) -> Result<T, CrmError> {
        match FIXTURES.as_ref() {
            Ok(fixtures) => Ok(select(fixtures).clone()),
            Err(err) => Err(err.clone()),
        }
    }
}

impl DataProvider for MockDataProvider {
    fn fetch_dealerships(&self) -> BoxFuture<'_, Vec<Dealership>> {
        Box::pin(async { Self::copy_of(|f| &f.dealerships) })
    }

    fn fetch_customers(&self) -> BoxFuture<'_, Vec<Customer>> {
        Box::pin(async { Self::copy_of(|f| &f.customers) })
    }

    fn fetch_dashboard(&self) -> BoxFuture<'_, DashboardData> {
        Box::pin(async { Self::copy_of(|f| &f.dashboard) })
    }

    fn fetch_customer_dashboard(&self) -> BoxFuture<'_, CustomerDashboardData> {
        Box::pin(async { Self::copy_of(|f| &f.customer_dashboard) })
    }

    fn fetch_sales_analytics(&self) -> BoxFuture<'_, SalesAnalyticsData> {
        Box::pin(async { Self::copy_of(|f| &f.sales_analytics) })
    }

    fn fetch_document_vault(&self) -> BoxFuture<'_, DocumentVaultData> {
        Box::pin(async { Self::copy_of(|f| &f.document_vault) })
    }

    fn fetch_reports(&self) -> BoxFuture<'_, ReportsData> {
        Box::pin(async { Self::copy_of(|f| &f.reports) })
    }
}
