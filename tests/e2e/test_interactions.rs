use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;
use uuid::Uuid;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_record_an_anonymous_like(ctx: &TestContext) {
    let catalog = ctx.fixtures.create_catalog(1).await.unwrap();
    let product = &catalog[0];

    let response = ctx
        .client
        .post_with_headers(
            "/api/interactions",
            &json!({ "productId": product.id, "liked": true, "action": "LIKE" }),
            &[("user-agent", "TuuuraTest/1.0")],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap(), &json!({ "success": true }));

    let rows = ctx.fixtures.interactions_for(product.id).await.unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.product_id, product.id);
    assert_eq!(row.user_id, None);
    assert_eq!(row.liked, Some(true));
    assert_eq!(row.disliked, None);
    assert_eq!(row.action, "LIKE");
    assert_eq!(
        row.anonymous_data,
        Some(json!({ "userAgent": "TuuuraTest/1.0" }))
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_record_a_signed_in_user_without_anonymous_data(ctx: &TestContext) {
    let catalog = ctx.fixtures.create_catalog(1).await.unwrap();
    let user_id = ctx.fixtures.create_user("shopper@example.com").await.unwrap();

    let response = ctx
        .client
        .post(
            "/api/interactions",
            &json!({
                "productId": catalog[0].id,
                "userId": user_id,
                "clickedBuy": true,
                "action": "User clicked buy button"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let rows = ctx.fixtures.interactions_for(catalog[0].id).await.unwrap();
    assert_eq!(rows[0].user_id, Some(user_id));
    assert!(rows[0].clicked_buy);
    assert_eq!(rows[0].action, "CLICK_BUY");
    assert_eq!(rows[0].anonymous_data, None);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_derive_the_action_from_flags(ctx: &TestContext) {
    let catalog = ctx.fixtures.create_catalog(1).await.unwrap();

    ctx.client
        .post(
            "/api/interactions",
            &json!({ "productId": catalog[0].id, "clickedShare": true }),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    ctx.client
        .post("/api/interactions", &json!({ "productId": catalog[0].id }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let rows = ctx.fixtures.interactions_for(catalog[0].id).await.unwrap();
    let actions: Vec<&str> = rows.iter().map(|r| r.action.as_str()).collect();
    assert!(actions.contains(&"SHARE"));
    assert!(actions.contains(&"VIEW"));
    assert!(rows.iter().any(|r| r.clicked_share));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_append_every_event(ctx: &TestContext) {
    let catalog = ctx.fixtures.create_catalog(1).await.unwrap();

    for action in ["VIEW", "VIEW_DETAILS", "VIEW"] {
        ctx.client
            .post(
                "/api/interactions",
                &json!({ "productId": catalog[0].id, "action": action }),
            )
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }

    let count = ctx.fixtures.count_interactions(catalog[0].id).await.unwrap();
    assert_eq!(count, 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_a_product_id(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/interactions", &json!({ "liked": true }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Product ID is required");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_malformed_product_id(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/interactions", &json!({ "productId": "abc" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid product ID");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_json(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/api/interactions", "{\"productId\": ")
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.body.as_ref().unwrap().get("error").is_some());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_products(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/interactions",
            &json!({ "productId": Uuid::new_v4(), "action": "LIKE" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Product not found");
}
