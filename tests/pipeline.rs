//! End-to-end transform tests with a mock geocoding resolver.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde_json::{json, Value};

use biodiv_etl::error::EtlError;
use biodiv_etl::geocode::{AdminLocation, GeoResolver};
use biodiv_etl::models::RawItem;
use biodiv_etl::pipeline::transform;

struct FixedResolver;

#[async_trait]
impl GeoResolver for FixedResolver {
    async fn resolve(&self, _lat: f64, _lon: f64) -> Result<AdminLocation, EtlError> {
        Ok(AdminLocation {
            region: "Auvergne-Rhône-Alpes".to_string(),
            departement: "Isère".to_string(),
            country: "France".to_string(),
        })
    }
}

struct FailingResolver;

#[async_trait]
impl GeoResolver for FailingResolver {
    async fn resolve(&self, lat: f64, lon: f64) -> Result<AdminLocation, EtlError> {
        Err(EtlError::Geocode {
            lat,
            lon,
            message: "no match".to_string(),
        })
    }
}

fn raw_item(id: i64, period: Value, practices: Value) -> RawItem {
    serde_json::from_value(json!({
        "id": id,
        "description": {"fr": "<p>Zone <b>sensible</b></p>"},
        "name": {"fr": "Aiguilles Rouges"},
        "structure": "Parc national",
        "practices": practices,
        "geometry": {"type": "Polygon", "coordinates": [[[5.0, 45.0], [5.1, 45.1]]]},
        "period": period,
        "create_datetime": "2024-01-01T10:30:00.000000+01:00",
        "update_datetime": "2024-06-15T08:00:00.000000+02:00"
    }))
    .expect("valid raw item")
}

fn january_december() -> Value {
    let mut period = vec![0; 12];
    period[0] = 1;
    period[11] = 1;
    json!(period)
}

#[tokio::test]
async fn expands_period_and_practices_into_four_rows() {
    let item = raw_item(7, january_december(), json!(["hiking", "climbing"]));

    let rows = transform(&[item], &FixedResolver).await.unwrap();
    assert_eq!(rows.len(), 4);

    let combos: BTreeSet<(String, String)> = rows
        .iter()
        .map(|r| {
            (
                r["months"].as_str().unwrap().to_string(),
                r["practices"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    let expected: BTreeSet<(String, String)> = [
        ("janvier", "hiking"),
        ("janvier", "climbing"),
        ("decembre", "hiking"),
        ("decembre", "climbing"),
    ]
    .iter()
    .map(|(m, p)| (m.to_string(), p.to_string()))
    .collect();
    assert_eq!(combos, expected);

    for row in &rows {
        assert_eq!(row["id"], json!("7"));
        assert_eq!(row["create_datetime"], json!("2024-01-01"));
        assert_eq!(row["update_datetime"], json!("2024-06-15"));
        assert_eq!(row["description"], json!("Zone sensible"));
        assert_eq!(row["region"], json!("Auvergne-Rhône-Alpes"));
        assert_eq!(row["departement"], json!("Isère"));
        assert_eq!(row["Pays"], json!("France"));
        // species_id was absent from the source record
        assert_eq!(row["species_id"], json!("zr"));
    }
}

#[tokio::test]
async fn output_id_set_equals_input_id_set() {
    let items = vec![
        raw_item(1, january_december(), json!([4, 5])),
        raw_item(2, json!(null), json!([])),
        raw_item(3, json!([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]), json!([9])),
    ];

    let rows = transform(&items, &FixedResolver).await.unwrap();

    let output_ids: BTreeSet<String> = rows
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    let input_ids: BTreeSet<String> =
        ["1", "2", "3"].iter().map(|s| s.to_string()).collect();
    assert_eq!(output_ids, input_ids);
}

#[tokio::test]
async fn record_with_empty_axes_still_produces_a_row() {
    let item = raw_item(11, json!("toute l'année"), json!([]));

    let rows = transform(&[item], &FixedResolver).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], json!("11"));
    assert_eq!(rows[0]["months"], json!(""));
    assert_eq!(rows[0]["practices"], json!(""));
}

#[tokio::test]
async fn numeric_practices_become_text() {
    let item = raw_item(5, json!(null), json!([4, 9]));

    let rows = transform(&[item], &FixedResolver).await.unwrap();
    assert_eq!(rows.len(), 2);

    let practices: BTreeSet<String> = rows
        .iter()
        .map(|r| r["practices"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        practices,
        ["4", "9"]
            .iter()
            .map(|s| s.to_string())
            .collect::<BTreeSet<String>>()
    );
}

#[tokio::test]
async fn rows_for_one_record_are_contiguous() {
    let items = vec![
        raw_item(1, january_december(), json!(["a", "b"])),
        raw_item(2, january_december(), json!(["a"])),
    ];

    let rows = transform(&items, &FixedResolver).await.unwrap();
    assert_eq!(rows.len(), 6);

    let ids: Vec<&str> = rows.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["1", "1", "1", "1", "2", "2"]);
}

#[tokio::test]
async fn geocoding_failure_aborts_the_batch() {
    let item = raw_item(1, january_december(), json!(["a"]));

    let result = transform(&[item], &FailingResolver).await;
    assert!(matches!(result, Err(EtlError::Geocode { .. })));
}

#[tokio::test]
async fn malformed_date_becomes_sentinel_not_error() {
    let mut item = raw_item(1, json!(null), json!(["a"]));
    item.create_datetime = "not-a-date".to_string();

    let rows = transform(&[item], &FixedResolver).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0]["create_datetime"],
        json!(biodiv_etl::transform::INVALID_DATE)
    );
    // The other date is untouched
    assert_eq!(rows[0]["update_datetime"], json!("2024-06-15"));
}

#[tokio::test]
async fn multipolygon_geometry_uses_first_vertex() {
    let item: RawItem = serde_json::from_value(json!({
        "id": 99,
        "description": {"fr": "zone"},
        "name": {"fr": "zone"},
        "structure": "Parc",
        "practices": ["vol libre"],
        "geometry": {
            "type": "MultiPolygon",
            "coordinates": [[[[2.3, 48.8], [2.4, 48.9]]]]
        },
        "period": null,
        "create_datetime": "2024-01-01T10:30:00.000000+01:00",
        "update_datetime": "2024-01-01T10:30:00.000000+01:00"
    }))
    .unwrap();

    // A resolver that asserts on what it receives
    struct AssertingResolver;

    #[async_trait]
    impl GeoResolver for AssertingResolver {
        async fn resolve(&self, lat: f64, lon: f64) -> Result<AdminLocation, EtlError> {
            assert_eq!((lon, lat), (2.3, 48.8));
            Ok(AdminLocation::default())
        }
    }

    let rows = transform(&[item], &AssertingResolver).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["region"], json!(""));
}
