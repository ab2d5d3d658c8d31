//! Full pipeline runs: guard pass, base-unit conversion, submission through
//! the execution proxy, and classification of execution failures.

use {
    super::{Gateway, mock},
    serde_json::json,
    std::time::Duration,
};

#[tokio::test]
async fn buy_without_bound_executes_base_unit_amount() {
    let external = mock::setup(vec![
        mock::Expectation::Post {
            path: "/route",
            req: json!({
                "tokenIn": "0x2222222222222222222222222222222222222222",
                "tokenOut": "0x1111111111111111111111111111111111111111",
            }),
            res: json!({
                "pairs": ["0xpool-a"],
                "midPrice": "0.005",
            }),
        },
        mock::Expectation::Post {
            path: "/execute",
            req: json!({
                "kind": "buy",
                "tokenIn": "0x2222222222222222222222222222222222222222",
                "tokenOut": "0x1111111111111111111111111111111111111111",
                // 1 base token scaled by 10^18.
                "amount": "1000000000000000000",
                "swaps": ["0xpool-a"],
                "signerKey": "0x0101010101010101010101010101010101010101010101010101010101010101",
            }),
            res: json!({
                "txHash": "0xabababababababababababababababababababababababababababababababab",
                "gasUsed": 98765,
                "status": "success",
            }),
        },
    ])
    .await;
    let gateway = Gateway::start(external, Duration::from_secs(5)).await;

    let (status, body) = gateway
        .post(
            "/amm/buy",
            json!({
                "base": "TOKEN_A",
                "quote": "TOKEN_B",
                "amount": "1",
                "privateKey": "0x0101010101010101010101010101010101010101010101010101010101010101",
            }),
        )
        .await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["price"], "200.00000");
    assert_eq!(body["expectedIn"], "200.00000");
    assert_eq!(body["gasUsed"], 98765);
    assert_eq!(
        body["txHash"],
        "0xabababababababababababababababababababababababababababababababab",
    );
    assert_eq!(body["status"], "SUCCESS");
}

#[tokio::test]
async fn gas_price_override_is_forwarded() {
    let external = mock::setup(vec![
        mock::Expectation::Post {
            path: "/route",
            req: json!({
                "tokenIn": "0x1111111111111111111111111111111111111111",
                "tokenOut": "0x2222222222222222222222222222222222222222",
            }),
            res: json!({
                "pairs": ["0xpool-a"],
                "midPrice": "150",
            }),
        },
        mock::Expectation::Post {
            path: "/execute",
            req: json!({
                "kind": "sell",
                "tokenIn": "0x1111111111111111111111111111111111111111",
                "tokenOut": "0x2222222222222222222222222222222222222222",
                "amount": "500000000000000000",
                "swaps": ["0xpool-a"],
                "signerKey": "0x0101010101010101010101010101010101010101010101010101010101010101",
                "gasPrice": "25000000000",
            }),
            res: json!({
                "txHash": "0xcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcd",
                "gasUsed": 134521,
                "status": "success",
            }),
        },
    ])
    .await;
    let gateway = Gateway::start(external, Duration::from_secs(5)).await;

    let (status, body) = gateway
        .post(
            "/amm/sell",
            json!({
                "base": "TOKEN_A",
                "quote": "TOKEN_B",
                "amount": "0.5",
                "gasPrice": "25000000000",
                "privateKey": "0x0101010101010101010101010101010101010101010101010101010101010101",
            }),
        )
        .await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["status"], "SUCCESS");
}

#[tokio::test]
async fn revert_reason_is_surfaced_verbatim() {
    let external = mock::setup(vec![
        mock::Expectation::Post {
            path: "/route",
            req: json!({
                "tokenIn": "0x1111111111111111111111111111111111111111",
                "tokenOut": "0x2222222222222222222222222222222222222222",
            }),
            res: json!({
                "pairs": ["0xpool-a"],
                "midPrice": "150",
            }),
        },
        mock::Expectation::PostError {
            path: "/execute",
            status: 500,
            res: json!({"error": "UniswapV2: INSUFFICIENT_OUTPUT_AMOUNT"}),
        },
    ])
    .await;
    let gateway = Gateway::start(external, Duration::from_secs(5)).await;

    let (status, body) = gateway
        .post(
            "/amm/sell",
            json!({
                "base": "TOKEN_A",
                "quote": "TOKEN_B",
                "amount": "1",
                "privateKey": "0x0101010101010101010101010101010101010101010101010101010101010101",
            }),
        )
        .await;

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "UniswapV2: INSUFFICIENT_OUTPUT_AMOUNT");
}

#[tokio::test]
async fn reverted_receipt_is_classified_as_execution_failure() {
    let external = mock::setup(vec![
        mock::Expectation::Post {
            path: "/route",
            req: json!({
                "tokenIn": "0x1111111111111111111111111111111111111111",
                "tokenOut": "0x2222222222222222222222222222222222222222",
            }),
            res: json!({
                "pairs": ["0xpool-a"],
                "midPrice": "150",
            }),
        },
        mock::Expectation::Post {
            path: "/execute",
            req: json!({
                "kind": "sell",
                "tokenIn": "0x1111111111111111111111111111111111111111",
                "tokenOut": "0x2222222222222222222222222222222222222222",
                "amount": "1000000000000000000",
                "swaps": ["0xpool-a"],
                "signerKey": "0x0101010101010101010101010101010101010101010101010101010101010101",
            }),
            res: json!({
                "txHash": "0xabababababababababababababababababababababababababababababababab",
                "gasUsed": 54321,
                "status": "failure",
                "revertReason": "STF",
            }),
        },
    ])
    .await;
    let gateway = Gateway::start(external, Duration::from_secs(5)).await;

    let (status, body) = gateway
        .post(
            "/amm/sell",
            json!({
                "base": "TOKEN_A",
                "quote": "TOKEN_B",
                "amount": "1",
                "privateKey": "0x0101010101010101010101010101010101010101010101010101010101010101",
            }),
        )
        .await;

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "STF");
}

#[tokio::test]
async fn unconfirmed_submission_times_out_without_retry() {
    let external = mock::setup(vec![
        mock::Expectation::Post {
            path: "/route",
            req: json!({
                "tokenIn": "0x1111111111111111111111111111111111111111",
                "tokenOut": "0x2222222222222222222222222222222222222222",
            }),
            res: json!({
                "pairs": ["0xpool-a"],
                "midPrice": "150",
            }),
        },
        // The proxy accepts the submission but never reports a receipt. No
        // retry must happen: a second submission would fail the mock.
        mock::Expectation::Hang { path: "/execute" },
    ])
    .await;
    let gateway = Gateway::start(external, Duration::from_millis(250)).await;

    let (status, body) = gateway
        .post(
            "/amm/sell",
            json!({
                "base": "TOKEN_A",
                "quote": "TOKEN_B",
                "amount": "1",
                "privateKey": "0x0101010101010101010101010101010101010101010101010101010101010101",
            }),
        )
        .await;

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "operation_error");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("unknown"), "message: {message}");
}
