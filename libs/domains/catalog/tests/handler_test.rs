use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use core_config::media::MediaConfig;
use domain_catalog::{CatalogService, InMemoryCatalogRepository, Product, Unit, handlers};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

fn app(products: Vec<Product>) -> Router {
    let repo = InMemoryCatalogRepository::with_products(products);
    handlers::router(CatalogService::new(repo, MediaConfig::default()))
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn shirt() -> Product {
    Product::new("Linen shirt")
        .with_tags(["summer", "linen"])
        .with_unit(Unit::new("LS-S", 4500).with_property("size", "S"))
        .with_unit(
            Unit::new("LS-M", 4500)
                .with_property("size", "M")
                .with_image("product_images/ls-m-back.jpg", false)
                .with_image("product_images/ls-m-front.jpg", true),
        )
}

#[tokio::test]
async fn test_list_products() {
    let response = app(vec![shirt(), Product::new("Mystery box")])
        .oneshot(get("/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let items = json.as_array().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Linen shirt");
    assert_eq!(items[0]["tags"], serde_json::json!(["summer", "linen"]));
    assert_eq!(items[0]["image"], "/media/product_images/ls-m-front.jpg");
    assert_eq!(items[1]["image"], "product_images/empty.jpg");
    assert!(items[0].get("units").is_none());
}

#[tokio::test]
async fn test_list_products_filters_by_tag_and_pages() {
    let app = app(vec![shirt(), Product::new("Coat").with_tags(["winter"])]);

    let response = app.clone().oneshot(get("/?tag=winter")).await.unwrap();
    let json = json_body(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Coat");

    let response = app.oneshot(get("/?limit=1&offset=1")).await.unwrap();
    let json = json_body(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Coat");
}

#[tokio::test]
async fn test_get_product_detail() {
    let product = shirt();
    let id = product.id;

    let response = app(vec![product])
        .oneshot(get(&format!("/{}", id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;

    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["image"], "/media/product_images/ls-m-front.jpg");
    assert_eq!(json["units"][0]["sku"], "LS-S");
    assert_eq!(json["units"][0]["images"], serde_json::json!(["product_images/empty.jpg"]));
    assert_eq!(json["units"][1]["price"], 4500);
    assert_eq!(
        json["units"][1]["images"],
        serde_json::json!([
            "/media/product_images/ls-m-back.jpg",
            "/media/product_images/ls-m-front.jpg"
        ])
    );
    assert_eq!(json["units"][1]["properties"][0]["name"], "size");
}

#[tokio::test]
async fn test_get_product_unknown_id_is_404() {
    let response = app(vec![shirt()])
        .oneshot(get(&format!("/{}", Uuid::now_v7())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert_eq!(json["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_product_malformed_id_is_400() {
    let response = app(vec![]).oneshot(get("/not-a-uuid")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "INVALID_UUID");
}
