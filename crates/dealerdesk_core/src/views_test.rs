use std::sync::Arc;

use crate::test_support::{
    customer_draft, dealership, ready_store, store_with, vehicle_draft, RecordingSubmissions,
    TestProvider,
};
use crate::models::VehicleStatus;
use crate::views::{DerivedViews, InventoryStats};

#[tokio::test]
async fn all_vehicles_follow_dealership_order() {
    let (store, _) = ready_store().await;
    let mut views = DerivedViews::new();

    let ids: Vec<_> = views
        .all_vehicles(&store.snapshot())
        .iter()
        .map(|v| v.id.clone())
        .collect();

    assert_eq!(
        ids,
        ["v1", "v2", "v3", "v4", "v5", "v6", "v7", "v8", "v9", "v10", "v11"]
    );
}

#[tokio::test]
async fn all_vehicles_is_reused_until_dealerships_change() {
    let (store, _) = ready_store().await;
    let mut views = DerivedViews::new();

    let first = views.all_vehicles(&store.snapshot());
    store.mark_all_notifications_read();
    store.select_dealership("dealer-2");
    let second = views.all_vehicles(&store.snapshot());
    assert!(Arc::ptr_eq(&first, &second));

    store
        .add_vehicle(Some("dealer-2"), vehicle_draft("Kia", "EV6"))
        .await
        .unwrap();
    let third = views.all_vehicles(&store.snapshot());
    assert!(!Arc::ptr_eq(&second, &third));
    assert_eq!(third.len(), 12);
    assert_eq!(third[9].make, "Kia");
}

#[tokio::test]
async fn active_dealership_tracks_selection() {
    let store = store_with(TestProvider::fixtures(), RecordingSubmissions::new());
    let mut views = DerivedViews::new();
    assert!(views.active_dealership(&store.snapshot()).is_none());

    store.bootstrap().await.unwrap();
    let snapshot = store.snapshot();
    assert_eq!(
        views.active_dealership(&snapshot).map(|d| d.name.as_str()),
        Some("Prestige Motors")
    );

    store.select_dealership("dealer-3");
    let snapshot = store.snapshot();
    assert_eq!(
        views.active_dealership(&snapshot).map(|d| d.name.as_str()),
        Some("Sunset Imports")
    );

    store.select_dealership("dealer-9");
    assert!(views.active_dealership(&store.snapshot()).is_none());
}

#[tokio::test]
async fn single_empty_dealership_becomes_active() {
    let store = store_with(
        TestProvider::fixtures().with_dealerships(vec![dealership("d1", "Solo Motors", Vec::new())]),
        RecordingSubmissions::new(),
    );
    store.bootstrap().await.unwrap();

    let snapshot = store.snapshot();
    let mut views = DerivedViews::new();
    let active = views.active_dealership(&snapshot).unwrap();
    assert_eq!(active.id, "d1");
    assert!(active.vehicles.is_empty());
    assert!(views.all_vehicles(&snapshot).is_empty());
}

#[tokio::test]
async fn unread_count_follows_notifications() {
    let (store, _) = ready_store().await;
    let mut views = DerivedViews::new();
    assert_eq!(views.unread_count(&store.snapshot()), 0);

    store
        .add_customer(customer_draft("Ada Okafor", "Okafor Logistics"))
        .await
        .unwrap();
    store
        .add_vehicle(Some("dealer-1"), vehicle_draft("Toyota", "Corolla"))
        .await
        .unwrap();
    assert_eq!(views.unread_count(&store.snapshot()), 2);

    store.mark_all_notifications_read();
    assert_eq!(views.unread_count(&store.snapshot()), 0);
}

#[tokio::test]
async fn dashboard_stats_count_live_inventory() {
    let (store, _) = ready_store().await;
    let mut views = DerivedViews::new();

    let stats = views.dashboard_stats(&store.snapshot()).unwrap();
    assert_eq!(stats.total_revenue, 245_600_000);
    assert_eq!(stats.system_users, 42);
    assert_eq!(stats.vehicle_inventory, 6);

    assert!(store.delete_vehicle(Some("dealer-1"), "v1", &|_: &str| true));
    let stats = views.dashboard_stats(&store.snapshot()).unwrap();
    assert_eq!(stats.vehicle_inventory, 5);

    store.select_dealership("dealer-3");
    let stats = views.dashboard_stats(&store.snapshot()).unwrap();
    assert_eq!(stats.vehicle_inventory, 2);
}

fn stock(total_vehicles: usize, available: usize, sold: usize) -> Option<InventoryStats> {
    Some(InventoryStats {
        total_vehicles,
        available,
        sold,
    })
}

#[tokio::test]
async fn inventory_stats_follow_every_vehicle_mutation() {
    let (store, _) = ready_store().await;
    let mut views = DerivedViews::new();
    assert_eq!(views.inventory_stats(&store.snapshot()), stock(6, 4, 1));

    store
        .add_vehicle(Some("dealer-1"), vehicle_draft("Kia", "EV6"))
        .await
        .unwrap();
    assert_eq!(views.inventory_stats(&store.snapshot()), stock(7, 5, 1));

    let mut sold = store.snapshot().dealership("dealer-1").unwrap().vehicles[1].clone();
    sold.status = VehicleStatus::Sold;
    store.update_vehicle(sold).await.unwrap();
    assert_eq!(views.inventory_stats(&store.snapshot()), stock(7, 4, 2));

    assert!(store.delete_vehicle(Some("dealer-1"), "v3", &|_: &str| true));
    assert_eq!(views.inventory_stats(&store.snapshot()), stock(6, 4, 1));

    store.select_dealership("dealer-2");
    assert_eq!(views.inventory_stats(&store.snapshot()), stock(3, 2, 1));
    store.select_dealership("dealer-9");
    assert_eq!(views.inventory_stats(&store.snapshot()), None);
}

#[tokio::test]
async fn dashboard_stats_wait_for_data() {
    let store = store_with(TestProvider::fixtures(), RecordingSubmissions::new());
    let mut views = DerivedViews::new();
    assert!(views.dashboard_stats(&store.snapshot()).is_none());

    let empty = store_with(
        TestProvider::fixtures().with_dealerships(Vec::new()),
        RecordingSubmissions::new(),
    );
    empty.bootstrap().await.unwrap();
    assert!(views.dashboard_stats(&empty.snapshot()).is_none());
}

#[tokio::test]
async fn search_covers_every_dealership_and_new_customers() {
    let (store, _) = ready_store().await;
    let mut views = DerivedViews::new();

    let results = views.search(&store.snapshot(), "tesla");
    let ids: Vec<_> = results.vehicles.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, ["v5", "v7"]);

    store
        .add_customer(customer_draft("Ada Okafor", "Okafor Logistics"))
        .await
        .unwrap();
    let results = views.search(&store.snapshot(), "okafor");
    let names: Vec<_> = results.customers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Ada Okafor", "Chukwuma Okafor"]);
}
