use crate::{
    FormSubmissionRepository, FormType, InMemoryFormSubmissionRepository, NewFormSubmission,
};
use serde_json::json;

#[test]
fn form_type_uses_wire_names() {
    assert_eq!(FormType::VehicleListing.as_str(), "VEHICLE_LISTING");
    assert_eq!(
        serde_json::to_value(FormType::CustomerCreate).unwrap(),
        json!("CUSTOMER_CREATE")
    );
    assert_eq!("VEHICLE_UPDATE".parse::<FormType>().unwrap(), FormType::VehicleUpdate);
    assert!("vehicle_update".parse::<FormType>().is_err());
}

#[tokio::test]
async fn in_memory_repository_assigns_ids_and_keeps_order() {
    let repo = InMemoryFormSubmissionRepository::new();
    repo.init_schema().await.unwrap();
    assert!(repo.is_empty().await);

    let first = repo
        .create(NewFormSubmission::new(
            FormType::VehicleListing,
            json!({ "make": "Tesla" }),
        ))
        .await
        .unwrap();
    let second = repo
        .create(NewFormSubmission::new(
            FormType::CustomerCreate,
            json!({ "name": "Ada Okafor" }),
        ))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(uuid::Uuid::parse_str(&first.id).unwrap().get_version_num(), 4);
    assert_eq!(repo.len().await, 2);

    let all = repo.find_all().await.unwrap();
    assert_eq!(all, vec![first.clone(), second]);

    let found = repo.find_by_id(&first.id).await.unwrap();
    assert_eq!(found, Some(first));
    assert_eq!(repo.find_by_id("missing").await.unwrap(), None);
}

#[tokio::test]
async fn clones_share_storage() {
    let repo = InMemoryFormSubmissionRepository::new();
    let handle = repo.clone();
    handle
        .create(NewFormSubmission::new(FormType::VehicleUpdate, json!({})))
        .await
        .unwrap();
    assert_eq!(repo.len().await, 1);
}
