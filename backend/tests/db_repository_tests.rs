mod support;

use fes_rust::api::Authority;
use fes_rust::db::repositories::LocalRepository;
use fes_rust::db::services::{health_check, store_documents};
use fes_rust::db::{DocumentFilter, DocumentRepository, FullRepository};

use support::{processing_statement, storage_document, test_postcode_lookup};

async fn seeded_repository() -> LocalRepository {
    let repo = LocalRepository::with_postcode_lookup(test_postcode_lookup);
    let documents = vec![
        processing_statement(
            "GBR-PS-1",
            "2024-03-01T00:00:00Z",
            Some("AB10 1AA"),
            &[("FCC-051", "cod", 100.0, 400.0)],
        ),
        storage_document(
            "GBR-SD-1",
            "2024-03-05T00:00:00Z",
            Some("CF10 1AA"),
            &[("FCC-052", "haddock", 20.0, 200.0)],
        ),
        storage_document(
            "GBR-SD-2",
            "2024-03-09T00:00:00Z",
            None,
            &[("FCC-051", "cod", 30.0, 400.0)],
        ),
    ];
    store_documents(&repo, &documents).await.unwrap();
    repo
}

#[tokio::test]
async fn test_health_check() {
    let repo = LocalRepository::new();
    assert!(health_check(&repo).await.unwrap());
}

#[tokio::test]
async fn test_fetch_all_sorted_by_creation() {
    let repo = seeded_repository().await;

    let documents = repo
        .fetch_documents(&DocumentFilter::default())
        .await
        .unwrap();
    let numbers: Vec<&str> = documents.iter().map(|d| d.document_number()).collect();
    assert_eq!(numbers, vec!["GBR-PS-1", "GBR-SD-1", "GBR-SD-2"]);
}

#[tokio::test]
async fn test_filter_by_document_number() {
    let repo = seeded_repository().await;

    let filter = DocumentFilter {
        document_number: Some("GBR-SD-1".into()),
        ..Default::default()
    };
    let documents = repo.fetch_documents(&filter).await.unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].document_number(), "GBR-SD-1");
}

#[tokio::test]
async fn test_exporter_search_is_case_insensitive() {
    let repo = seeded_repository().await;

    let filter = DocumentFilter {
        exporter_name_contains: Some("gbr-ps-1 exports".into()),
        ..Default::default()
    };
    let documents = repo.fetch_documents(&filter).await.unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].document_number(), "GBR-PS-1");
}

#[tokio::test]
async fn test_filter_by_inclusive_date_range() {
    let repo = seeded_repository().await;

    let filter = DocumentFilter {
        created_from: Some("2024-03-05T00:00:00Z".parse().unwrap()),
        created_to: Some("2024-03-09T00:00:00Z".parse().unwrap()),
        ..Default::default()
    };
    let documents = repo.fetch_documents(&filter).await.unwrap();
    let numbers: Vec<&str> = documents.iter().map(|d| d.document_number()).collect();
    assert_eq!(numbers, vec!["GBR-SD-1", "GBR-SD-2"]);
}

#[tokio::test]
async fn test_filter_by_authority() {
    let repo = seeded_repository().await;

    let filter = DocumentFilter {
        authorities: vec![Authority::Scotland, Authority::Wales],
        ..Default::default()
    };
    let documents = repo.fetch_documents(&filter).await.unwrap();
    let numbers: Vec<&str> = documents.iter().map(|d| d.document_number()).collect();
    assert_eq!(numbers, vec!["GBR-PS-1", "GBR-SD-1"]);

    // Documents without exporter details fall back to England.
    let filter = DocumentFilter {
        authorities: vec![Authority::England],
        ..Default::default()
    };
    let documents = repo.fetch_documents(&filter).await.unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].document_number(), "GBR-SD-2");
}

#[tokio::test]
async fn test_filter_by_certificate_numbers_ignores_case() {
    let repo = seeded_repository().await;

    let filter = DocumentFilter {
        certificate_numbers: vec!["fcc-051".into()],
        ..Default::default()
    };
    let documents = repo.fetch_documents(&filter).await.unwrap();
    let numbers: Vec<&str> = documents.iter().map(|d| d.document_number()).collect();
    assert_eq!(numbers, vec!["GBR-PS-1", "GBR-SD-2"]);
}

#[tokio::test]
async fn test_filter_by_status_defaults_to_complete() {
    let repo = seeded_repository().await;

    let filter = DocumentFilter {
        statuses: vec!["COMPLETE".into()],
        ..Default::default()
    };
    let documents = repo.fetch_documents(&filter).await.unwrap();
    assert_eq!(documents.len(), 3);

    let filter = DocumentFilter {
        statuses: vec!["VOID".into()],
        ..Default::default()
    };
    assert!(repo.fetch_documents(&filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_replacing_document_updates_payload() {
    let repo = seeded_repository().await;

    let replacement = storage_document(
        "GBR-SD-2",
        "2024-03-09T00:00:00Z",
        None,
        &[("FCC-051", "cod", 75.0, 400.0)],
    );
    repo.store_document(&replacement).await.unwrap();

    let documents = repo
        .fetch_documents(&DocumentFilter::default())
        .await
        .unwrap();
    assert_eq!(documents.len(), 3);

    let fetched = repo.fetch_document("GBR-SD-2").await.unwrap().unwrap();
    match fetched {
        fes_rust::models::RawDocument::StorageDocument(sd) => {
            assert_eq!(
                sd.catches[0].product_weight.as_ref().unwrap().as_kg(),
                Some(75.0)
            );
        }
        other => panic!("unexpected document: {:?}", other),
    }
}

#[tokio::test]
async fn test_unhealthy_repository_reports_false() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);
    assert!(!FullRepository::health_check(&repo).await.unwrap());

    repo.set_healthy(true);
    assert!(FullRepository::health_check(&repo).await.unwrap());
}
