use crate::e2e::helpers;

use chrono::Utc;
use helpers::assertions::{assert_experience, has_more, page_ids};
use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use std::collections::HashSet;
use test_context::test_context;
use uuid::Uuid;

fn ids(products: &[helpers::fixtures::TestProduct]) -> Vec<String> {
    products.iter().map(|p| p.id.to_string()).collect()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_newest_products_with_default_limit(ctx: &TestContext) {
    let catalog = ctx.fixtures.create_catalog(6).await.unwrap();

    let response = ctx.client.get("/api/products").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();

    assert_eq!(page_ids(body), ids(&catalog[..4]));
    assert!(has_more(body));

    let experiences = body["experiences"].as_array().unwrap();
    assert_experience(&experiences[0], &catalog[0]);
    assert_eq!(experiences[0]["producerName"], json!("Catalog Producer"));
    assert_eq!(experiences[0]["price"], json!(10.0));
    assert_eq!(experiences[0]["imageUrl"], json!("https://img.example.com/0.jpg"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_never_return_excluded_products(ctx: &TestContext) {
    let catalog = ctx.fixtures.create_catalog(5).await.unwrap();
    let excluded = format!("{},{}", catalog[0].id, catalog[2].id);

    let response = ctx
        .client
        .get(&format!("/api/products?limit=10&exclude={}", excluded))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();

    assert_eq!(
        page_ids(body),
        vec![
            catalog[1].id.to_string(),
            catalog[3].id.to_string(),
            catalog[4].id.to_string()
        ]
    );
    assert!(!has_more(body));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_merge_loaded_ids_with_exclude(ctx: &TestContext) {
    let catalog = ctx.fixtures.create_catalog(3).await.unwrap();

    let response = ctx
        .client
        .get(&format!(
            "/api/products?limit=5&exclude={}&loadedIds={}",
            catalog[0].id, catalog[1].id
        ))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        page_ids(response.body.as_ref().unwrap()),
        vec![catalog[2].id.to_string()]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_has_more_exactly_at_the_end(ctx: &TestContext) {
    let catalog = ctx.fixtures.create_catalog(4).await.unwrap();

    let response = ctx.client.get("/api/products?limit=4").await.unwrap();
    let body = response.body.as_ref().unwrap();

    assert_eq!(page_ids(body).len(), catalog.len());
    assert!(!has_more(body));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_page_through_the_whole_store_without_repeats(ctx: &TestContext) {
    let catalog = ctx.fixtures.create_catalog(7).await.unwrap();
    let mut seen: Vec<String> = Vec::new();

    loop {
        let path = if seen.is_empty() {
            "/api/products?limit=3".to_string()
        } else {
            format!("/api/products?limit=3&exclude={}", seen.join(","))
        };
        let response = ctx.client.get(&path).await.unwrap();
        response.assert_status(StatusCode::OK);

        let body = response.body.as_ref().unwrap();
        seen.extend(page_ids(body));
        if !has_more(body) {
            break;
        }
    }

    let unique: HashSet<&String> = seen.iter().collect();
    assert_eq!(unique.len(), seen.len(), "A product was returned twice");
    assert_eq!(seen, ids(&catalog));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_place_the_target_first(ctx: &TestContext) {
    let catalog = ctx.fixtures.create_catalog(5).await.unwrap();

    let response = ctx
        .client
        .get(&format!("/api/products?limit=3&p={}", catalog[3].uid))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(
        page_ids(body),
        vec![
            catalog[3].id.to_string(),
            catalog[0].id.to_string(),
            catalog[1].id.to_string()
        ]
    );
    assert!(has_more(body));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_resolve_the_target_by_id(ctx: &TestContext) {
    let catalog = ctx.fixtures.create_catalog(3).await.unwrap();

    let response = ctx
        .client
        .get(&format!("/api/products?limit=1&p={}", catalog[2].id))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        page_ids(response.body.as_ref().unwrap()),
        vec![catalog[2].id.to_string()]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_skip_an_excluded_target(ctx: &TestContext) {
    let catalog = ctx.fixtures.create_catalog(3).await.unwrap();

    let response = ctx
        .client
        .get(&format!(
            "/api/products?limit=2&p={}&exclude={}",
            catalog[2].uid, catalog[2].id
        ))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        page_ids(response.body.as_ref().unwrap()),
        ids(&catalog[..2])
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_when_the_target_is_unknown(ctx: &TestContext) {
    let catalog = ctx.fixtures.create_catalog(2).await.unwrap();

    let response = ctx
        .client
        .get("/api/products?p=does-not-exist")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(page_ids(response.body.as_ref().unwrap()), ids(&catalog));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_an_empty_page_for_an_empty_store(ctx: &TestContext) {
    let response = ctx.client.get("/api/products").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.as_ref().unwrap(),
        &json!({ "experiences": [], "hasMore": false })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fill_defaults_for_sparse_bodies(ctx: &TestContext) {
    let producer_id = ctx.fixtures.create_producer("Sparse Co").await.unwrap();
    ctx.fixtures
        .create_product(producer_id, "bare", json!({}), Utc::now())
        .await
        .unwrap();

    let response = ctx.client.get("/api/products").await.unwrap();
    let experience = &response.body.as_ref().unwrap()["experiences"][0];

    assert_eq!(experience["uid"], json!("bare"));
    assert_eq!(experience["price"], json!(0.0));
    assert_eq!(experience["currency"], json!("€"));
    assert_eq!(experience["imageUrl"], json!("/placeholder.jpg"));
    assert_eq!(experience["description"], json!(""));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_exclusion_ids(ctx: &TestContext) {
    let response = ctx
        .client
        .get(&format!("/api/products?exclude={},42", Uuid::new_v4()))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid product id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_out_of_range_limits(ctx: &TestContext) {
    for limit in ["0", "-3", "51", "many"] {
        let response = ctx
            .client
            .get(&format!("/api/products?limit={}", limit))
            .await
            .unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("limit");
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_targets(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/products?p=drop%20table")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid product reference");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_answer_json_for_malformed_query_strings(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/products?limit=2&limit=3")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_header("content-type", "application/json")
        .assert_error_message("duplicate field");
}
