#[cfg(test)]
mod tests {
    use crate::api::{Authority, DocumentType};
    use crate::models::{
        AuditEvent, ExporterDetails, ProcessingCatch, ProcessingStatement, RawDocument,
        StorageCatch, StorageDocument, WeightField,
    };
    use crate::services::unwind::{unwind_all, unwind_document};

    fn no_lookup(_postcode: &str) -> Option<Authority> {
        None
    }

    fn scottish_lookup(postcode: &str) -> Option<Authority> {
        if postcode.starts_with("AB") {
            Some(Authority::Scotland)
        } else {
            None
        }
    }

    fn processing_statement(document_number: &str) -> ProcessingStatement {
        ProcessingStatement {
            document_number: document_number.to_string(),
            status: None,
            created_at: "2024-03-01T08:30:00Z".parse().unwrap(),
            exporter: None,
            audit_trail: None,
            investigation: None,
            document_url: None,
            catches: vec![],
        }
    }

    fn storage_document(document_number: &str) -> StorageDocument {
        StorageDocument {
            document_number: document_number.to_string(),
            status: None,
            created_at: "2024-03-02T10:00:00Z".parse().unwrap(),
            exporter: None,
            audit_trail: None,
            investigation: None,
            document_url: None,
            date_of_unloading: None,
            place_of_unloading: None,
            transport_unloaded_from: None,
            supporting_documents: None,
            catches: vec![],
        }
    }

    fn ps_catch(certificate: &str, species: &str) -> ProcessingCatch {
        ProcessingCatch {
            catch_certificate_type: Some("nonUK".into()),
            catch_certificate_number: Some(certificate.into()),
            species: Some(species.into()),
            scientific_name: None,
            export_weight_before_processing: Some(WeightField::Text("120.5".into())),
            export_weight_after_processing: None,
            total_weight_landed: Some(WeightField::Number(400.0)),
        }
    }

    #[test]
    fn test_processing_statement_unwind() {
        let mut statement = processing_statement("GBR-PS-1");
        statement.catches = vec![ps_catch("FCC-051", "Atlantic cod")];
        let document = RawDocument::ProcessingStatement(statement);

        let catches = unwind_document(&document, &no_lookup);
        assert_eq!(catches.len(), 1);

        let flattened = &catches[0];
        assert_eq!(flattened.document_type, DocumentType::ProcessingStatement);
        assert_eq!(flattened.status, "COMPLETE");
        assert_eq!(flattened.certificate_number, "FCC-051");
        assert_eq!(flattened.weight, 120.5);
        assert_eq!(flattened.weight_on_cc, 400.0);
        assert_eq!(flattened.commodity_code.as_deref(), Some("N/A"));
        assert!(flattened.weight_after_processing.is_none());
        assert!(flattened.extended.storage.is_none());
    }

    #[test]
    fn test_line_item_order_preserved() {
        let mut statement = processing_statement("GBR-PS-2");
        statement.catches = vec![
            ps_catch("FCC-051", "Atlantic cod"),
            ps_catch("FCC-052", "Haddock"),
            ps_catch("FCC-051", "Haddock"),
        ];
        let document = RawDocument::ProcessingStatement(statement);

        let species: Vec<String> = unwind_document(&document, &no_lookup)
            .into_iter()
            .map(|c| format!("{}/{}", c.certificate_number, c.species))
            .collect();
        assert_eq!(
            species,
            vec!["FCC-051/Atlantic cod", "FCC-052/Haddock", "FCC-051/Haddock"]
        );
    }

    #[test]
    fn test_malformed_weights_degrade_to_zero() {
        let mut statement = processing_statement("GBR-PS-3");
        statement.catches = vec![ProcessingCatch {
            catch_certificate_type: None,
            catch_certificate_number: Some("FCC-051".into()),
            species: Some("Atlantic cod".into()),
            scientific_name: None,
            export_weight_before_processing: Some(WeightField::Text("not-a-number".into())),
            export_weight_after_processing: Some(WeightField::Text("also bad".into())),
            total_weight_landed: None,
        }];
        let document = RawDocument::ProcessingStatement(statement);

        let catches = unwind_document(&document, &no_lookup);
        assert_eq!(catches[0].weight, 0.0);
        assert_eq!(catches[0].weight_on_cc, 0.0);
        assert!(catches[0].weight_after_processing.is_none());
    }

    #[test]
    fn test_status_passthrough_when_present() {
        let mut statement = processing_statement("GBR-PS-4");
        statement.status = Some("VOID".into());
        statement.catches = vec![ps_catch("FCC-051", "Atlantic cod")];
        let document = RawDocument::ProcessingStatement(statement);

        assert_eq!(unwind_document(&document, &no_lookup)[0].status, "VOID");
    }

    #[test]
    fn test_authority_from_postcode_lookup() {
        let mut statement = processing_statement("GBR-PS-5");
        statement.exporter = Some(ExporterDetails {
            company_name: Some("North Quay Fish Ltd".into()),
            postcode: Some("AB10 1AA".into()),
            ..Default::default()
        });
        statement.catches = vec![ps_catch("FCC-051", "Atlantic cod")];
        let document = RawDocument::ProcessingStatement(statement);

        let catches = unwind_document(&document, &scottish_lookup);
        assert_eq!(catches[0].da, Authority::Scotland);
        assert_eq!(
            catches[0].extended.exporter_company_name.as_deref(),
            Some("North Quay Fish Ltd")
        );
    }

    #[test]
    fn test_authority_defaults_to_england() {
        // No exporter at all
        let mut statement = processing_statement("GBR-PS-6");
        statement.catches = vec![ps_catch("FCC-051", "Atlantic cod")];
        let document = RawDocument::ProcessingStatement(statement);
        assert_eq!(unwind_document(&document, &no_lookup)[0].da, Authority::England);

        // Postcode unknown to the lookup
        let mut statement = processing_statement("GBR-PS-7");
        statement.exporter = Some(ExporterDetails {
            postcode: Some("ZZ99 9ZZ".into()),
            ..Default::default()
        });
        statement.catches = vec![ps_catch("FCC-051", "Atlantic cod")];
        let document = RawDocument::ProcessingStatement(statement);
        assert_eq!(
            unwind_document(&document, &scottish_lookup)[0].da,
            Authority::England
        );
    }

    #[test]
    fn test_most_recent_audit_actor_wins() {
        let mut statement = processing_statement("GBR-PS-8");
        statement.audit_trail = Some(vec![
            AuditEvent {
                event_type: "VOIDED".into(),
                triggered_by: "first@fes.gov.uk".into(),
                timestamp: "2024-03-01T09:00:00Z".parse().unwrap(),
            },
            AuditEvent {
                event_type: "PRE_APPROVED".into(),
                triggered_by: "approver@fes.gov.uk".into(),
                timestamp: "2024-03-01T10:00:00Z".parse().unwrap(),
            },
            AuditEvent {
                event_type: "VOIDED".into(),
                triggered_by: "second@fes.gov.uk".into(),
                timestamp: "2024-03-02T09:00:00Z".parse().unwrap(),
            },
        ]);
        statement.catches = vec![ps_catch("FCC-051", "Atlantic cod")];
        let document = RawDocument::ProcessingStatement(statement);

        let extended = &unwind_document(&document, &no_lookup)[0].extended;
        assert_eq!(extended.voided_by.as_deref(), Some("second@fes.gov.uk"));
        assert_eq!(
            extended.pre_approved_by.as_deref(),
            Some("approver@fes.gov.uk")
        );
    }

    #[test]
    fn test_storage_document_unwind() {
        let mut storage = storage_document("GBR-SD-1");
        storage.supporting_documents = Some(vec!["inv-1".into(), "inv-2".into()]);
        storage.date_of_unloading = Some("2024-02-28".into());
        storage.catches = vec![StorageCatch {
            certificate_type: Some("nonUK".into()),
            certificate_number: Some("FCC-051".into()),
            product: Some("Atlantic cod".into()),
            scientific_name: Some("Gadus morhua".into()),
            commodity_code: Some("0302 51".into()),
            product_weight: Some(WeightField::Number(80.0)),
            weight_on_cc: None,
        }];
        let document = RawDocument::StorageDocument(storage);

        let catches = unwind_document(&document, &no_lookup);
        let flattened = &catches[0];
        assert_eq!(flattened.document_type, DocumentType::StorageDocument);
        assert_eq!(flattened.species, "Atlantic cod");
        assert_eq!(flattened.commodity_code.as_deref(), Some("0302 51"));
        assert_eq!(flattened.weight, 80.0);
        // weightOnCC degrades to 0 when absent
        assert_eq!(flattened.weight_on_cc, 0.0);

        let storage_details = flattened.extended.storage.as_ref().unwrap();
        assert_eq!(
            storage_details.supporting_documents.as_deref(),
            Some("inv-1,inv-2")
        );
        assert_eq!(storage_details.date_of_unloading.as_deref(), Some("2024-02-28"));
    }

    #[test]
    fn test_unwind_all_preserves_document_order() {
        let mut first = processing_statement("GBR-PS-9");
        first.catches = vec![ps_catch("FCC-051", "Atlantic cod")];
        let mut second = storage_document("GBR-SD-2");
        second.catches = vec![StorageCatch {
            certificate_type: None,
            certificate_number: Some("FCC-051".into()),
            product: Some("Atlantic cod".into()),
            scientific_name: None,
            commodity_code: None,
            product_weight: Some(WeightField::Number(10.0)),
            weight_on_cc: Some(WeightField::Number(400.0)),
        }];

        let documents = vec![
            RawDocument::ProcessingStatement(first),
            RawDocument::StorageDocument(second),
        ];
        let numbers: Vec<String> = unwind_all(&documents, &no_lookup)
            .into_iter()
            .map(|c| c.document_number)
            .collect();
        assert_eq!(numbers, vec!["GBR-PS-9", "GBR-SD-2"]);
    }
}
