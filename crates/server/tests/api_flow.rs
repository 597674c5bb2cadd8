use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use migration::MigratorTrait;
use serde_json::json;
use tower::ServiceExt;

use server::auth::{ServerAuthConfig, ServerState};
use server::routes;

async fn build_app() -> anyhow::Result<(Router, String)> {
    let db = models::db::connect_memory().await?;
    migration::Migrator::up(&db, None).await?;
    let state = ServerState {
        db,
        auth: ServerAuthConfig { jwt_secret: "test-secret".into(), session_ttl_secs: 3600 },
    };
    let app = routes::build_router(tower_http::cors::CorsLayer::very_permissive(), state);

    let resp = app
        .clone()
        .oneshot(post_json(
            "/auth/register",
            None,
            json!({"login": "tester", "password": "password123", "access_right": "admin"}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            None,
            json!({"login": "tester", "password": "password123"}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()?
        .split(';')
        .next()
        .unwrap()
        .to_string();
    Ok((app, cookie))
}

fn post_json(uri: &str, cookie: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::from(serde_json::to_vec(&body).unwrap())).unwrap()
}

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder().uri(uri).header("cookie", cookie).body(Body::empty()).unwrap()
}

async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create(
    app: &Router,
    cookie: &str,
    uri: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let resp = app.clone().oneshot(post_json(uri, Some(cookie), body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED, "create at {} failed", uri);
    json_body(resp).await
}

#[tokio::test]
async fn crud_and_filtering_over_http() -> anyhow::Result<()> {
    let (app, cookie) = build_app().await?;

    for (name, email) in
        [("Anna Kovalenko", "anna@example.com"), ("Borys Tkachuk", "borys@sample.org")]
    {
        create(
            &app,
            &cookie,
            "/api/clients",
            json!({
                "full_name": name,
                "document_id": format!("DOC-{}", name.len()),
                "date_of_birth": "1990-04-01",
                "phone_number": "+380501112233",
                "email": email,
            }),
        )
        .await;
    }

    // case-insensitive like on a text column
    let resp = app
        .clone()
        .oneshot(get(
            "/api/clients?filter_cols=email&filter_ops=like&filter_vals=EXAMPLE",
            &cookie,
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let rows = json_body(resp).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["full_name"], "Anna Kovalenko");

    // an unknown filter column is dropped, not an error
    let resp = app
        .clone()
        .oneshot(get("/api/clients?filter_cols=nope&filter_ops=eq&filter_vals=1", &cookie))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let rows = json_body(resp).await;
    assert_eq!(rows.as_array().unwrap().len(), 2);

    // sorting descending
    let resp = app
        .clone()
        .oneshot(get("/api/clients?sort_by=full_name&sort_order=desc", &cookie))
        .await?;
    let rows = json_body(resp).await;
    assert_eq!(rows[0]["full_name"], "Borys Tkachuk");
    Ok(())
}

#[tokio::test]
async fn lift_link_accounting_over_http() -> anyhow::Result<()> {
    let (app, cookie) = build_app().await?;

    let client = create(
        &app,
        &cookie,
        "/api/clients",
        json!({
            "full_name": "Anna Kovalenko",
            "document_id": "DOC-1",
            "date_of_birth": "1990-04-01",
            "phone_number": "+380501112233",
            "email": "anna@example.com",
        }),
    )
    .await;
    let pass_type = create(
        &app,
        &cookie,
        "/api/pass-types",
        json!({"name": "10 lifts", "limit_lifts": 10, "price": 1500}),
    )
    .await;
    let pass = create(
        &app,
        &cookie,
        "/api/passes",
        json!({
            "client_id": client["id"],
            "pass_type_id": pass_type["id"],
            "purchase_date": "2024-01-10",
            "valid_from": "2024-01-10",
            "valid_to": "2024-03-31",
        }),
    )
    .await;
    assert_eq!(pass["remaining_lifts"], 10);

    let lift = create(&app, &cookie, "/api/lifts", json!({"name": "North Chair", "height": 1200}))
        .await;
    let usage = create(
        &app,
        &cookie,
        "/api/lift-usages",
        json!({
            "client_id": client["id"],
            "lift_id": lift["id"],
            "usage_date": "2024-01-15",
            "usage_time_start": "10:00:00",
            "usage_time_end": "10:06:00",
        }),
    )
    .await;

    create(
        &app,
        &cookie,
        "/api/pass-lift-usages",
        json!({"pass_id": pass["id"], "lift_usage_id": usage["id"]}),
    )
    .await;

    let resp = app
        .clone()
        .oneshot(get(&format!("/api/passes/{}", pass["id"]), &cookie))
        .await?;
    let fetched = json_body(resp).await;
    assert_eq!(fetched["remaining_lifts"], 9);

    // unlink refunds the ride
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/pass-lift-usages/{}/{}", pass["id"], usage["id"]))
                .header("cookie", &cookie)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .clone()
        .oneshot(get(&format!("/api/passes/{}", pass["id"]), &cookie))
        .await?;
    let fetched = json_body(resp).await;
    assert_eq!(fetched["remaining_lifts"], 10);
    Ok(())
}

#[tokio::test]
async fn exhausted_pass_conflicts_over_http() -> anyhow::Result<()> {
    let (app, cookie) = build_app().await?;

    let client = create(
        &app,
        &cookie,
        "/api/clients",
        json!({
            "full_name": "Borys Tkachuk",
            "document_id": "DOC-2",
            "date_of_birth": "1985-12-20",
            "phone_number": "+380671112233",
            "email": "borys@example.com",
        }),
    )
    .await;
    let pass_type = create(
        &app,
        &cookie,
        "/api/pass-types",
        json!({"name": "1 lift", "limit_lifts": 1, "price": 200}),
    )
    .await;
    let pass = create(
        &app,
        &cookie,
        "/api/passes",
        json!({
            "client_id": client["id"],
            "pass_type_id": pass_type["id"],
            "purchase_date": "2024-01-10",
            "valid_from": "2024-01-10",
            "valid_to": "2024-03-31",
        }),
    )
    .await;
    let lift =
        create(&app, &cookie, "/api/lifts", json!({"name": "Summit", "height": 2400})).await;

    let mut usage_ids = Vec::new();
    for start in ["09:00:00", "11:00:00"] {
        let usage = create(
            &app,
            &cookie,
            "/api/lift-usages",
            json!({
                "client_id": client["id"],
                "lift_id": lift["id"],
                "usage_date": "2024-01-15",
                "usage_time_start": start,
                "usage_time_end": "12:00:00",
            }),
        )
        .await;
        usage_ids.push(usage["id"].clone());
    }

    create(
        &app,
        &cookie,
        "/api/pass-lift-usages",
        json!({"pass_id": pass["id"], "lift_usage_id": usage_ids[0]}),
    )
    .await;

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/pass-lift-usages",
            Some(&cookie),
            json!({"pass_id": pass["id"], "lift_usage_id": usage_ids[1]}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn missing_rows_are_404() -> anyhow::Result<()> {
    let (app, cookie) = build_app().await?;
    let resp = app.clone().oneshot(get("/api/clients/999", &cookie)).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/rentals/999")
                .header("cookie", &cookie)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}
