//! Read-only projections over a [`StoreSnapshot`], recomputed only when the
//! collection they read has a new revision.

use serde::Serialize;
use std::sync::Arc;

use crate::models::{Dealership, Vehicle, VehicleStatus};
use crate::search::{search, SearchResults};
use crate::store::StoreSnapshot;

/// Headline figures for the dashboard screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: u64,
    pub system_users: u32,
    /// Live size of the active dealership's inventory.
    pub vehicle_inventory: usize,
    pub system_health: f64,
}

/// Counts shown above the inventory table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_vehicles: usize,
    pub available: usize,
    pub sold: usize,
}

impl InventoryStats {
    fn of(vehicles: &[Vehicle]) -> Self {
        let with_status =
            |status: VehicleStatus| vehicles.iter().filter(|v| v.status == status).count();
        Self {
            total_vehicles: vehicles.len(),
            available: with_status(VehicleStatus::Available),
            sold: with_status(VehicleStatus::Sold),
        }
    }
}

type SelectionKey = (u64, Option<String>);

#[derive(Debug, Default)]
pub struct DerivedViews {
    all_vehicles: Option<(u64, Arc<Vec<Vehicle>>)>,
    active_position: Option<(SelectionKey, Option<usize>)>,
    inventory: Option<(SelectionKey, InventoryStats)>,
    unread: Option<(u64, usize)>,
}

impl DerivedViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every vehicle, dealership by dealership, each in inventory order.
    pub fn all_vehicles(&mut self, snapshot: &StoreSnapshot) -> Arc<Vec<Vehicle>> {
        let revision = snapshot.dealerships.revision();
        if let Some((cached, vehicles)) = &self.all_vehicles {
            if *cached == revision {
                return Arc::clone(vehicles);
            }
        }

        let vehicles: Arc<Vec<Vehicle>> = Arc::new(
            snapshot
                .dealerships
                .get()
                .iter()
                .flat_map(|d| d.vehicles.iter().cloned())
                .collect(),
        );
        self.all_vehicles = Some((revision, Arc::clone(&vehicles)));
        vehicles
    }

    /// The selected dealership, or `None` when nothing is selected or the
    /// selected id is not loaded.
    pub fn active_dealership<'s>(&mut self, snapshot: &'s StoreSnapshot) -> Option<&'s Dealership> {
        let key = (
            snapshot.dealerships.revision(),
            snapshot.active_dealership_id.clone(),
        );
        if let Some((cached, position)) = &self.active_position {
            if *cached == key {
                return position.and_then(|i| snapshot.dealerships.get().get(i));
            }
        }

        let position = key.1.as_deref().and_then(|id| {
            snapshot
                .dealerships
                .get()
                .iter()
                .position(|d| d.id == id)
        });
        self.active_position = Some((key, position));
        position.and_then(|i| snapshot.dealerships.get().get(i))
    }

    pub fn unread_count(&mut self, snapshot: &StoreSnapshot) -> usize {
        let revision = snapshot.notifications.revision();
        if let Some((cached, count)) = self.unread {
            if cached == revision {
                return count;
            }
        }

        let count = snapshot
            .notifications
            .get()
            .iter()
            .filter(|n| !n.read)
            .count();
        self.unread = Some((revision, count));
        count
    }

    /// Needs both the dashboard aggregate and an active dealership.
    pub fn dashboard_stats(&mut self, snapshot: &StoreSnapshot) -> Option<DashboardStats> {
        let aggregates = snapshot.aggregates.as_ref()?;
        let dealership = self.active_dealership(snapshot)?;
        Some(DashboardStats {
            total_revenue: aggregates.dashboard.total_revenue,
            system_users: aggregates.dashboard.system_users,
            vehicle_inventory: dealership.vehicles.len(),
            system_health: aggregates.dashboard.system_health,
        })
    }

    /// Stock counts for the active dealership, `None` without one.
    pub fn inventory_stats(&mut self, snapshot: &StoreSnapshot) -> Option<InventoryStats> {
        let key = (
            snapshot.dealerships.revision(),
            snapshot.active_dealership_id.clone(),
        );
        if let Some((cached, stats)) = &self.inventory {
            if *cached == key {
                return Some(*stats);
            }
        }

        let stats = InventoryStats::of(&self.active_dealership(snapshot)?.vehicles);
        self.inventory = Some((key, stats));
        Some(stats)
    }

    /// Search all vehicles and customers.
    pub fn search(&mut self, snapshot: &StoreSnapshot, query: &str) -> SearchResults {
        let vehicles = self.all_vehicles(snapshot);
        search(query, &vehicles, snapshot.customers.get())
    }
}
