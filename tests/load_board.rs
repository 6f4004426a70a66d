//! End-to-end checks of the brokerage core through its public API: dataset
//! loading, load lookup and search, carrier verification, and call
//! classification.

use std::io::Write;
use std::sync::Arc;

use freight_desk::brokerage::calls::{
    CallClassifier, CallDetails, CallOutcome, FixedDuration, Sentiment,
};
use freight_desk::brokerage::carriers::{CarrierStatus, CarrierVerifier, StaticCarrierRegistry};
use freight_desk::brokerage::loads::{LoadCatalog, LoadSearch};
use freight_desk::error::ServiceError;

fn csv_catalog() -> LoadCatalog {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("temp file");
    write!(
        file,
        "load_id,origin,destination,equipment_type,loadboard_rate,commodity_type\n\
         L100,\"Los Angeles, CA\",\"Phoenix, AZ\",Dry Van,1850,Electronics\n\
         L101,\"Fresno, CA\",\"Los Angeles, CA\",Reefer,1000,Produce\n\
         L102,\"Reno, NV\",\"Salt Lake City, UT\",Flatbed,1000,Lumber\n\
         L103,\"Long Beach, CA\",\"Las Vegas, NV\",dry van,1250,Furniture\n"
    )
    .expect("write fixture");

    LoadCatalog::from_path(file.path()).expect("csv catalog loads")
}

#[test]
fn every_load_is_retrievable_by_its_identifier() {
    let catalog = csv_catalog();
    assert_eq!(catalog.len(), 4);
    for load in catalog.get_all() {
        assert_eq!(catalog.get_by_id(&load.load_id).expect("present"), load);
    }
    assert!(matches!(
        catalog.get_by_id("L999"),
        Err(ServiceError::NotFound { .. })
    ));
}

#[test]
fn search_combines_lane_equipment_and_rate() {
    let catalog = csv_catalog();

    let all = catalog.search(&LoadSearch::default());
    assert_eq!(all.count, catalog.len());

    let dry_vans = catalog.search(&LoadSearch {
        equipment_type: Some("Dry Van".to_string()),
        ..LoadSearch::default()
    });
    let ids: Vec<&str> = dry_vans.loads.iter().map(|l| l.load_id.as_str()).collect();
    assert_eq!(ids, ["L100", "L103"]);

    let into_la = catalog.search(&LoadSearch {
        destination: Some("LOS ANGELES".to_string()),
        max_rate: Some(1000.0),
        ..LoadSearch::default()
    });
    assert_eq!(into_la.count, 1);
    assert_eq!(into_la.loads[0].load_id, "L101");

    let exact = catalog.search(&LoadSearch {
        min_rate: Some(1000.0),
        max_rate: Some(1000.0),
        ..LoadSearch::default()
    });
    let ids: Vec<&str> = exact.loads.iter().map(|l| l.load_id.as_str()).collect();
    assert_eq!(ids, ["L101", "L102"]);
}

#[test]
fn csv_extras_are_kept_as_attributes() {
    let catalog = csv_catalog();
    let load = catalog.get_by_id("L102").expect("present");
    assert_eq!(load.attributes["commodity_type"], "Lumber");
}

#[tokio::test]
async fn carrier_verification_follows_the_allow_list() {
    let verifier = CarrierVerifier::new(Arc::new(StaticCarrierRegistry::default()));

    let active = verifier.verify(Some("345678")).await.expect("verifies");
    assert_eq!(active.status, CarrierStatus::Active);
    assert!(active.is_valid);

    let invalid = verifier.verify(Some("999999")).await.expect("verifies");
    assert_eq!(invalid.status, CarrierStatus::Invalid);

    assert!(matches!(
        verifier.verify(None).await,
        Err(ServiceError::InvalidInput(_))
    ));
}

#[test]
fn classification_rules_apply_in_order() {
    let classifier = CallClassifier::new(Arc::new(FixedDuration(61)));

    let closed = classifier.classify(&CallDetails {
        call_transcript: Some("no deal".to_string()),
        final_price: Some(1200.0),
        negotiation_rounds: Some(1),
    });
    assert_eq!(
        (closed.outcome, closed.sentiment),
        (CallOutcome::Success, Sentiment::Positive)
    );
    assert_eq!(closed.extracted_data.call_duration, 61);

    let stalled = classifier.classify(&CallDetails {
        call_transcript: Some("yes".to_string()),
        final_price: None,
        negotiation_rounds: Some(4),
    });
    assert_eq!(
        (stalled.outcome, stalled.sentiment),
        (CallOutcome::NegotiationFailed, Sentiment::Negative)
    );

    let warm = classifier.classify(&CallDetails {
        call_transcript: Some("Carrier was very interested and accepted".to_string()),
        final_price: None,
        negotiation_rounds: Some(1),
    });
    assert_eq!(
        (warm.outcome, warm.sentiment),
        (CallOutcome::Unknown, Sentiment::Positive)
    );

    let silent = classifier.classify(&CallDetails::default());
    assert_eq!(
        (silent.outcome, silent.sentiment),
        (CallOutcome::Unknown, Sentiment::Neutral)
    );
}
