//! Integration tests for the overview page, exports and uploads.

use dynamic_pricing_integration_tests::{TestContext, markers};
use reqwest::{StatusCode, multipart};

#[tokio::test]
async fn test_overview_shows_stats_and_filters() {
    let ctx = TestContext::new().await;
    let page = ctx.signed_in("alice").await;

    assert!(page.contains("Total Products"));
    assert!(page.contains("Avg Margin"));
    assert!(page.contains(r#"name="margin_min""#));
    assert!(page.contains(r#"value="0.20""#));
    assert!(page.contains(r#"value="0.60""#));
}

#[tokio::test]
async fn test_overview_applies_query_filters() {
    let ctx = TestContext::new().await;
    ctx.signed_in("bob").await;

    let resp = ctx.get("/?sku=sku-105&margin_min=0&margin_max=1").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = resp.text().await.unwrap();

    assert!(page.contains("10 products match"));
    assert!(page.contains("SKU-1050"));
    assert!(!page.contains("SKU-1049"));
}

#[tokio::test]
async fn test_overview_tolerates_blank_bounds() {
    let ctx = TestContext::new().await;
    ctx.signed_in("carol").await;

    let resp = ctx.get("/?sku=&margin_min=&margin_max=").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains(markers::OVERVIEW));
}

#[tokio::test]
async fn test_export_requires_login() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/export/csv").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = ctx.get("/export/xlsx").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_csv_export_of_filtered_set() {
    let ctx = TestContext::new().await;
    ctx.signed_in("dave").await;

    let resp = ctx
        .get("/export/csv?sku=SKU-100&margin_min=0&margin_max=1")
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/csv")
    );
    assert_eq!(
        resp.headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=\"suggested_prices.csv\"")
    );

    let body = resp.text().await.unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(
        lines.first().copied(),
        Some("sku,total_quantity,suggested_price,total_sales,cost,margin")
    );
    // SKU-1000 through SKU-1009
    assert_eq!(lines.len(), 11);
}

#[tokio::test]
async fn test_xlsx_export() {
    let ctx = TestContext::new().await;
    ctx.signed_in("erin").await;

    let resp = ctx.get("/export/xlsx").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=\"suggested_prices.xlsx\"")
    );

    let body = resp.bytes().await.unwrap();
    assert!(body.starts_with(b"PK"));
}

#[tokio::test]
async fn test_refresh_predictions() {
    let ctx = TestContext::new().await;
    ctx.signed_in("frank").await;

    let page = ctx.submit("/overview/refresh", &[]).await;
    assert!(page.contains("Predictions refreshed successfully!"));
    assert!(page.contains(markers::OVERVIEW));
}

#[tokio::test]
async fn test_upload_is_acknowledged() {
    let ctx = TestContext::new().await;
    ctx.signed_in("grace").await;

    let part = multipart::Part::bytes(b"sku,qty\nSKU-1,5\nSKU-2,7\n".to_vec())
        .file_name("sales.csv")
        .mime_str("text/csv")
        .unwrap();
    let form = multipart::Form::new().part("file", part);

    let resp = ctx
        .client
        .post(ctx.url("/overview/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let page = ctx.page().await;
    assert!(page.contains("Uploaded: sales.csv (2 rows)"));
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/static/css/dashboard.css").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains(".bar"));
}
