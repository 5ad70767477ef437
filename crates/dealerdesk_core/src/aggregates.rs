//! Read-mostly bundles fetched once at startup, one per screen.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// --- Dashboard ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub total_revenue: u64,
    pub system_users: u32,
    /// Percentage, e.g. 98.7
    pub system_health: f64,
    pub alerts: Vec<SystemAlert>,
    pub quick_actions: DashboardQuickActions,
    pub recent_actions: Vec<RecentAction>,
    pub department_performance: Vec<DepartmentPerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemAlert {
    pub level: String,
    #[serde(rename = "type")]
    pub alert_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    pub description: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuickActions {
    pub pending_approvals: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub user: String,
    pub role: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPerformance {
    pub name: String,
    pub target: u32,
    pub achieved: u32,
    pub budget: u64,
    pub change: f64,
}

// --- Customer overview ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDashboardData {
    pub total_customers: u32,
    pub active_customers: u32,
    pub vip_customers: u32,
    pub active_leads: u32,
    pub total_revenue: u64,
}

// --- Sales analytics ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesAnalyticsData {
    pub kpis: SalesKpis,
    pub sales_trend: Vec<SalesTrendPoint>,
    pub vehicle_categories: Vec<VehicleCategoryShare>,
    pub team_performance: Vec<TeamMemberPerformance>,
    pub sales_funnel: Vec<FunnelStage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesKpis {
    pub total_revenue: KpiValue,
    pub vehicles_sold: KpiValue,
    pub conversion_rate: KpiValue,
    pub avg_deal_size: KpiValue,
}

/// A headline figure and its percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiValue {
    pub value: f64,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTrendPoint {
    pub month: String,
    pub vehicles: u32,
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleCategoryShare {
    pub name: String,
    pub vehicles: u32,
    pub percentage: u32,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMemberPerformance {
    pub initials: String,
    pub name: String,
    pub role: String,
    pub sales: u32,
    pub revenue: u64,
    /// Percent of target reached.
    pub target: u32,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub stage: String,
    pub value: u32,
    pub percentage: u32,
}

// --- Document vault ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVaultData {
    pub kpis: DocumentKpis,
    pub insights: DocumentInsights,
    pub documents: Vec<DocumentRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentKpis {
    pub total: u32,
    pub total_size: String,
    pub active: u32,
    pub archived: u32,
    pub storage_used: f64,
    pub storage_limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInsights {
    pub expiring: Insight,
    pub compliance: Insight,
    pub security: Insight,
}

/// Metadata about a stored document; the file itself is not handled here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub name: String,
    pub size: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub document_type: String,
    pub description: String,
}

// --- Reports ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsData {
    pub kpis: ReportKpis,
    pub insights: ReportInsights,
    /// Report templates grouped by category name.
    pub available_reports: BTreeMap<String, Vec<AvailableReport>>,
    pub recent_reports: Vec<RecentReport>,
    pub quick_actions: Vec<ReportQuickAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportKpis {
    pub generated: u32,
    pub downloads: u32,
    pub scheduled: u32,
    pub storage_used: f64,
    pub storage_limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInsights {
    pub auto_generated: Insight,
    pub smart_scheduling: Insight,
    pub storage_optimization: Insight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableReport {
    pub name: String,
    pub frequency: String,
    pub description: String,
    pub last_run: String,
    pub format: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentReport {
    pub name: String,
    pub category: String,
    pub category_color: String,
    pub status: String,
    pub date: String,
    pub format: String,
    pub downloads: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportQuickActionIcon {
    TrendingUp,
    Car,
    Users,
    ChartBar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportQuickAction {
    pub name: String,
    pub icon: ReportQuickActionIcon,
    pub active: bool,
}

/// Every screen aggregate, loaded together by bootstrap.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenAggregates {
    pub dashboard: DashboardData,
    pub customer_dashboard: CustomerDashboardData,
    pub sales_analytics: SalesAnalyticsData,
    pub document_vault: DocumentVaultData,
    pub reports: ReportsData,
}
