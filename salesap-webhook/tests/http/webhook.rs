use crate::context::{wait_until_matched, TestServer, API_TOKEN};
use http::{Method, StatusCode};
use mockito::Matcher;
use salesap_domain::{SalesapError, Unit};
use serde_json::{json, Value};
use std::{collections::HashMap, time::Duration};

fn bearer() -> String {
    format!("Bearer {API_TOKEN}")
}

#[tokio::test]
async fn test_webhook_duplicates_and_links_deal() -> Result<Unit, SalesapError> {
    let mut server = TestServer::new().await?;
    let base = server.base_path();

    let fetch = server
        .mock_server
        .mock("GET", format!("{base}/deals/42").as_str())
        .match_header("authorization", bearer().as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "42",
                "title": "Sale A",
                "status_id": 2,
                "price": 500,
                "custom_fields": [],
                "responsible_user_id": 7
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let create = server
        .mock_server
        .mock("POST", format!("{base}/deals").as_str())
        .match_header("authorization", bearer().as_str())
        .match_body(Matcher::Json(json!({
            "title": "Sale A (Дубль)",
            "status_id": 2,
            "price": 500,
            "custom_fields": [],
            "responsible_user_id": 7
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "1042" }).to_string())
        .expect(1)
        .create_async()
        .await;
    let link = server
        .mock_server
        .mock("POST", format!("{base}/relations").as_str())
        .match_header("authorization", bearer().as_str())
        .match_body(Matcher::Json(json!({
            "from_type": "deal",
            "from_id": "42",
            "to_type": "deal",
            "to_id": "1042",
            "relation_type": "linked"
        })))
        .with_status(201)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let res = server
        .send_request::<Value, Value>(
            &format!("webhook?token={API_TOKEN}"),
            Method::POST,
            Some(&json!({ "deal_id": "42" })),
            None,
        )
        .await?;

    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(res.data, json!({ "status": "received" }));

    assert!(wait_until_matched(&link).await);
    fetch.assert_async().await;
    create.assert_async().await;
    link.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_webhook_acknowledges_before_failed_fetch() -> Result<Unit, SalesapError> {
    let mut server = TestServer::new().await?;
    let base = server.base_path();

    let fetch = server
        .mock_server
        .mock("GET", format!("{base}/deals/7").as_str())
        .with_status(404)
        .with_body("not found")
        .expect(1)
        .create_async()
        .await;
    let create = server
        .mock_server
        .mock("POST", format!("{base}/deals").as_str())
        .expect(0)
        .create_async()
        .await;
    let link = server
        .mock_server
        .mock("POST", format!("{base}/relations").as_str())
        .expect(0)
        .create_async()
        .await;

    let headers = HashMap::from([("Authorization".to_string(), bearer())]);
    let res = server
        .send_request::<Value, Value>(
            "webhook",
            Method::POST,
            Some(&json!({ "id": 7 })),
            Some(&headers),
        )
        .await?;

    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(res.data, json!({ "status": "received" }));

    assert!(wait_until_matched(&fetch).await);
    tokio::time::sleep(Duration::from_millis(200)).await;
    fetch.assert_async().await;
    create.assert_async().await;
    link.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_rejected_webhook_never_reaches_crm() -> Result<Unit, SalesapError> {
    let mut server = TestServer::new().await?;
    let base = server.base_path();

    let fetch = server
        .mock_server
        .mock("GET", Matcher::Regex(format!("^{base}/deals/.*")))
        .expect(0)
        .create_async()
        .await;

    let res = server
        .send_request::<Value, Value>(
            "webhook",
            Method::POST,
            Some(&json!({ "deal_id": "42", "token": "not-the-token" })),
            None,
        )
        .await?;

    assert_eq!(res.code, StatusCode::FORBIDDEN);
    assert_eq!(res.data, json!({ "error": "invalid token" }));

    let res = server
        .send_request::<Value, Value>(
            "webhook",
            Method::POST,
            Some(&json!({ "token": API_TOKEN })),
            None,
        )
        .await?;

    assert_eq!(res.code, StatusCode::BAD_REQUEST);
    assert_eq!(res.data, json!({ "error": "no deal id" }));

    tokio::time::sleep(Duration::from_millis(200)).await;
    fetch.assert_async().await;

    Ok(())
}
