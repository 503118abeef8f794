// server/src/web/tests.rs

use actix_web::{http::StatusCode, test, web as actix_data, App};
use serde_json::{json, Value};
use std::sync::Arc;
use storefront::{CatalogStore, MemoryStore, NewCategory, NewProduct, NewSubcategory, ProductId};
use uuid::Uuid;

use super::handlers::cart_handlers::USER_ID_HEADER;
use crate::config::AppConfig;
use crate::state::AppState;

struct Seeded {
  state: AppState,
  apple: ProductId,
  tea: ProductId,
}

async fn seeded_state(extra_products: usize) -> Seeded {
  let store = Arc::new(MemoryStore::new());
  let category = store
    .create_category(NewCategory { name: "Groceries".into(), slug: None, image: Some("categories/g.png".into()) })
    .await
    .unwrap();
  let sub = store
    .create_subcategory(NewSubcategory { name: "Fruit".into(), slug: None, image: None, category_id: category.id })
    .await
    .unwrap();

  let product = |name: String, price: &str| NewProduct {
    name,
    slug: None,
    image_small: None,
    image_medium: None,
    image_large: None,
    price: price.parse().unwrap(),
    subcategory_id: sub.id,
    category_id: Some(category.id),
  };
  let apple = store.create_product(product("Apple".into(), "1.50")).await.unwrap();
  let tea = store.create_product(product("Tea".into(), "4.25")).await.unwrap();
  for i in 0..extra_products {
    store.create_product(product(format!("Extra {:02}", i), "0.10")).await.unwrap();
  }

  let state = AppState::new(store.clone(), store, Arc::new(AppConfig::default()));
  Seeded { state, apple: apple.id, tea: tea.id }
}

macro_rules! app {
  ($state:expr) => {
    test::init_service(
      App::new()
        .app_data(actix_data::Data::new($state))
        .configure(super::configure_app_routes),
    )
    .await
  };
}

#[actix_web::test]
async fn cart_routes_require_user_header() {
  let seeded = seeded_state(0).await;
  let app = app!(seeded.state);

  let req = test::TestRequest::get().uri("/api/v1/cart/summary").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "Authentication credentials were not provided.");

  let req = test::TestRequest::get()
    .uri("/api/v1/cart/summary")
    .insert_header((USER_ID_HEADER, "not-a-uuid"))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn cart_lifecycle() {
  let seeded = seeded_state(0).await;
  let app = app!(seeded.state);
  let user = Uuid::new_v4().to_string();

  // add
  let req = test::TestRequest::post()
    .uri("/api/v1/cart/add-item")
    .insert_header((USER_ID_HEADER, user.as_str()))
    .set_json(json!({ "product": seeded.apple.0, "quantity": 2 }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["product"], seeded.apple.0);
  assert_eq!(body["quantity"], 2);
  assert_eq!(body["total_price"], "3.00");

  // duplicate add
  let req = test::TestRequest::post()
    .uri("/api/v1/cart/add-item")
    .insert_header((USER_ID_HEADER, user.as_str()))
    .set_json(json!({ "product": seeded.apple.0, "quantity": 1 }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "This product is already in the cart!");

  let req = test::TestRequest::post()
    .uri("/api/v1/cart/add-item")
    .insert_header((USER_ID_HEADER, user.as_str()))
    .set_json(json!({ "product": seeded.tea.0, "quantity": 1 }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

  // update
  let req = test::TestRequest::patch()
    .uri(&format!("/api/v1/cart/update-item/{}", seeded.tea.0))
    .insert_header((USER_ID_HEADER, user.as_str()))
    .set_json(json!({ "quantity": 3 }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["quantity"], 3);
  assert_eq!(body["total_price"], "12.75");

  // summary
  let req = test::TestRequest::get()
    .uri("/api/v1/cart/summary")
    .insert_header((USER_ID_HEADER, user.as_str()))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["total_items"], 2);
  assert_eq!(body["total_cost"], "15.75");
  assert_eq!(body["items"].as_array().map(Vec::len), Some(2));

  // remove
  let req = test::TestRequest::delete()
    .uri(&format!("/api/v1/cart/remove-item/{}", seeded.apple.0))
    .insert_header((USER_ID_HEADER, user.as_str()))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

  let req = test::TestRequest::delete()
    .uri(&format!("/api/v1/cart/remove-item/{}", seeded.apple.0))
    .insert_header((USER_ID_HEADER, user.as_str()))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "Product not found in cart!");

  // clear
  let req = test::TestRequest::delete()
    .uri("/api/v1/cart/clear")
    .insert_header((USER_ID_HEADER, user.as_str()))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

  let req = test::TestRequest::get()
    .uri("/api/v1/cart/summary")
    .insert_header((USER_ID_HEADER, user.as_str()))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["total_items"], 0);
  assert_eq!(body["total_cost"], "0.00");
}

#[actix_web::test]
async fn add_item_rejects_bad_input() {
  let seeded = seeded_state(0).await;
  let app = app!(seeded.state);
  let user = Uuid::new_v4().to_string();

  let req = test::TestRequest::post()
    .uri("/api/v1/cart/add-item")
    .insert_header((USER_ID_HEADER, user.as_str()))
    .set_json(json!({ "product": 9999, "quantity": 1 }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "Invalid product id 9999: object does not exist");

  let req = test::TestRequest::post()
    .uri("/api/v1/cart/add-item")
    .insert_header((USER_ID_HEADER, user.as_str()))
    .set_json(json!({ "product": seeded.apple.0, "quantity": 0 }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

  let req = test::TestRequest::patch()
    .uri("/api/v1/cart/update-item/9999")
    .insert_header((USER_ID_HEADER, user.as_str()))
    .set_json(json!({ "quantity": 2 }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_bodies_and_paths_use_the_error_shape() {
  let seeded = seeded_state(0).await;
  let app = app!(seeded.state);
  let user = Uuid::new_v4().to_string();

  let bodies = [
    json!({ "product": seeded.apple.0, "quantity": -1 }),
    json!({ "product": seeded.apple.0 }),
    json!({ "product": "apple", "quantity": 1 }),
  ];
  for body in bodies {
    let req = test::TestRequest::post()
      .uri("/api/v1/cart/add-item")
      .insert_header((USER_ID_HEADER, user.as_str()))
      .set_json(&body)
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {}", body);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid request body.");
  }

  let req = test::TestRequest::post()
    .uri("/api/v1/cart/add-item")
    .insert_header((USER_ID_HEADER, user.as_str()))
    .insert_header(("content-type", "application/json"))
    .set_payload("{not json")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "Invalid request body.");

  let req = test::TestRequest::patch()
    .uri(&format!("/api/v1/cart/update-item/{}", seeded.apple.0))
    .insert_header((USER_ID_HEADER, user.as_str()))
    .set_json(json!({ "quantity": -3 }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

  let requests = [
    test::TestRequest::delete()
      .uri("/api/v1/cart/remove-item/abc")
      .insert_header((USER_ID_HEADER, user.as_str())),
    test::TestRequest::get().uri("/api/v1/products/abc"),
    test::TestRequest::get().uri("/api/v1/categories/1x"),
  ];
  for req in requests {
    let req = req.to_request();
    let uri = req.uri().path().to_string();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Not found.", "{}", uri);
  }
}

#[actix_web::test]
async fn carts_are_per_user() {
  let seeded = seeded_state(0).await;
  let app = app!(seeded.state);
  let alice = Uuid::new_v4().to_string();
  let bob = Uuid::new_v4().to_string();

  let req = test::TestRequest::post()
    .uri("/api/v1/cart/add-item")
    .insert_header((USER_ID_HEADER, alice.as_str()))
    .set_json(json!({ "product": seeded.apple.0, "quantity": 1 }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

  let req = test::TestRequest::get()
    .uri("/api/v1/cart/summary")
    .insert_header((USER_ID_HEADER, bob.as_str()))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["total_items"], 0);
}

#[actix_web::test]
async fn product_listing_is_paginated() {
  // 2 base products + 10 extras = 12, two pages of 10.
  let seeded = seeded_state(10).await;
  let app = app!(seeded.state);

  let req = test::TestRequest::get().uri("/api/v1/products").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["count"], 12);
  assert_eq!(body["results"].as_array().map(Vec::len), Some(10));
  assert_eq!(body["next"], "/api/v1/products?page=2");
  assert!(body["previous"].is_null());

  let req = test::TestRequest::get().uri("/api/v1/products?page=last").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["results"].as_array().map(Vec::len), Some(2));
  assert_eq!(body["previous"], "/api/v1/products?page=1");

  for bad in ["3", "0", "abc"] {
    let req = test::TestRequest::get().uri(&format!("/api/v1/products?page={}", bad)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND, "page={}", bad);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid page.");
  }
}

#[actix_web::test]
async fn product_and_category_detail() {
  let seeded = seeded_state(0).await;
  let app = app!(seeded.state);

  let req = test::TestRequest::get().uri(&format!("/api/v1/products/{}", seeded.tea.0)).to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["name"], "Tea");
  assert_eq!(body["slug"], "tea");
  assert_eq!(body["price"], "4.25");
  assert_eq!(body["subcategory"]["slug"], "fruit");
  assert_eq!(body["category"]["image"], "/media/categories/g.png");

  let req = test::TestRequest::get().uri("/api/v1/products/424242").to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

  let req = test::TestRequest::get().uri("/api/v1/categories").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["count"], 1);
  let id = body["results"][0]["id"].as_i64().unwrap();

  let req = test::TestRequest::get().uri(&format!("/api/v1/categories/{}", id)).to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["slug"], "groceries");
  assert_eq!(body["subcategories"][0]["name"], "Fruit");

  let req = test::TestRequest::get().uri("/api/v1/categories/77").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "Not found.");
}

#[actix_web::test]
async fn health_endpoint() {
  let seeded = seeded_state(0).await;
  let app = app!(seeded.state);
  let req = test::TestRequest::get().uri("/api/v1/health").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["status"], "ok");
}
