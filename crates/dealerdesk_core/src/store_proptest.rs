#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::future::Future;

    use crate::error::CrmError;
    use crate::models::initials_for;
    use crate::search::{customer_matches, search, vehicle_matches};
    use crate::test_support::{
        customer, customer_draft, dealership, store_with, vehicle, vehicle_draft,
        RecordingSubmissions, TestProvider,
    };
    use crate::views::DerivedViews;

    fn block_on<F: Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    // Two dealerships with `first` and `second` vehicles each
    fn provider(first: usize, second: usize) -> TestProvider {
        let stock = |prefix: &str, count: usize| {
            (0..count)
                .map(|i| vehicle(&format!("{}{}", prefix, i), "Ford", "Focus"))
                .collect::<Vec<_>>()
        };
        TestProvider::fixtures().with_dealerships(vec![
            dealership("d1", "North Lot", stock("n", first)),
            dealership("d2", "South Lot", stock("s", second)),
        ])
    }

    proptest! {
        // Listings are appended after everything already there, ids never repeat
        #[test]
        fn listings_extend_inventory(
            first in 0..4usize,
            second in 0..4usize,
            targets in proptest::collection::vec(prop::bool::ANY, 1..6),
        ) {
            let store = store_with(provider(first, second), RecordingSubmissions::new());
            let listed = block_on(async {
                store.bootstrap().await.unwrap();
                let mut listed = Vec::new();
                for to_first in &targets {
                    let id = if *to_first { "d1" } else { "d2" };
                    listed.push(store.add_vehicle(Some(id), vehicle_draft("Kia", "EV6")).await.unwrap());
                }
                listed
            });

            let snapshot = store.snapshot();
            let all = DerivedViews::new().all_vehicles(&snapshot);
            prop_assert_eq!(all.len(), first + second + targets.len());

            let ids: HashSet<_> = all.iter().map(|v| v.id.clone()).collect();
            prop_assert_eq!(ids.len(), all.len());

            for vehicle in &listed {
                prop_assert_eq!(vehicle.vin.len(), 17);
                prop_assert_eq!(vehicle.vin.to_uppercase(), vehicle.vin.clone());
                prop_assert!(all.contains(vehicle));
            }

            let to_first = targets.iter().filter(|t| **t).count();
            prop_assert_eq!(snapshot.dealership("d1").unwrap().vehicles.len(), first + to_first);
            prop_assert_eq!(snapshot.notifications.get().len(), targets.len());
        }

        // A rejected submission leaves every collection untouched
        #[test]
        fn rejected_mutations_change_nothing(
            make in "[A-Za-z]{0,8}",
            name in "[A-Za-z]{1,8}( [A-Za-z]{1,8})?",
        ) {
            let submissions = RecordingSubmissions::new();
            let store = store_with(provider(2, 1), submissions.clone());
            block_on(store.bootstrap()).unwrap();
            submissions.fail_with(CrmError::Validation("rejected".to_string()));
            let before = store.snapshot();

            let vehicle_result = block_on(store.add_vehicle(Some("d1"), vehicle_draft(&make, "X")));
            let customer_result = block_on(store.add_customer(customer_draft(&name, "Acme")));
            prop_assert!(vehicle_result.is_err());
            prop_assert!(customer_result.is_err());

            let after = store.snapshot();
            prop_assert_eq!(after.dealerships.revision(), before.dealerships.revision());
            prop_assert_eq!(after.customers.revision(), before.customers.revision());
            prop_assert_eq!(after.notifications.revision(), before.notifications.revision());
        }

        // Marking everything read twice is the same as once
        #[test]
        fn mark_all_read_twice(customers in 0..5usize) {
            let store = store_with(provider(1, 1), RecordingSubmissions::new());
            block_on(async {
                store.bootstrap().await.unwrap();
                for i in 0..customers {
                    store.add_customer(customer_draft(&format!("Customer {}", i), "Acme")).await.unwrap();
                }
            });

            store.mark_all_notifications_read();
            let once = store.snapshot();
            store.mark_all_notifications_read();
            let twice = store.snapshot();

            prop_assert!(twice.notifications.get().iter().all(|n| n.read));
            prop_assert_eq!(twice.notifications.get().len(), customers);
            prop_assert_eq!(once.notifications.revision(), twice.notifications.revision());
        }

        // Deleting an id that is not in the inventory is a no-op
        #[test]
        fn deleting_unknown_ids(id in "x[0-9]{1,4}") {
            let store = store_with(provider(3, 2), RecordingSubmissions::new());
            block_on(store.bootstrap()).unwrap();
            let before = store.snapshot();

            prop_assert!(!store.delete_vehicle(Some("d1"), &id, &|_: &str| true));
            prop_assert_eq!(store.snapshot().dealerships.revision(), before.dealerships.revision());
        }

        // Updating keeps the vehicle at its index
        #[test]
        fn update_keeps_position(count in 1..6usize, pick in 0..6usize, price in 1..500_000u64) {
            let store = store_with(provider(count, 0), RecordingSubmissions::new());
            block_on(store.bootstrap()).unwrap();
            let index = pick % count;
            let mut edited = store.snapshot().dealership("d1").unwrap().vehicles[index].clone();
            edited.price = price;

            block_on(store.update_vehicle(edited.clone())).unwrap();

            let snapshot = store.snapshot();
            let vehicles = &snapshot.dealership("d1").unwrap().vehicles;
            prop_assert_eq!(vehicles.len(), count);
            prop_assert_eq!(&vehicles[index], &edited);
        }

        // Initials take the first letter of the first and last word
        #[test]
        fn initials_from_words(words in proptest::collection::vec("[a-z][a-z]{0,6}", 1..5)) {
            let name = words.join(" ");
            let initials = initials_for(&name);

            prop_assert_eq!(initials.chars().count(), words.len().min(2));
            prop_assert_eq!(initials.to_uppercase(), initials.clone());
            prop_assert!(initials.starts_with(&words[0][..1].to_uppercase()));
        }

        // Every hit really contains the query, and nothing is missed
        #[test]
        fn search_hits_match(query in "[a-zA-Z0-9 ]{0,4}") {
            let vehicles = vec![
                vehicle("v1", "Tesla", "Model 3"),
                vehicle("v2", "BMW", "X5"),
                vehicle("v3", "Ford", "Bronco"),
            ];
            let customers = vec![
                customer("c1", "Ada Okafor", "Okafor Logistics"),
                customer("c2", "Tunde Bakare", "Ministry of Agriculture"),
            ];
            let results = search(&query, &vehicles, &customers);

            if query.is_empty() {
                prop_assert!(results.is_empty());
            } else {
                let needle = query.to_lowercase();
                let expected_vehicles = vehicles.iter().filter(|v| vehicle_matches(v, &needle)).count();
                let expected_customers = customers.iter().filter(|c| customer_matches(c, &needle)).count();
                prop_assert_eq!(results.vehicles.len(), expected_vehicles);
                prop_assert_eq!(results.customers.len(), expected_customers);
            }
        }
    }
}
