//! RPC transport: line-delimited JSON framing, boolean collapsing of engine
//! errors, and null results for misses.

mod common;

use cinema_booking::{rpc, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

struct RpcClient {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
    next_id: u64,
}

impl RpcClient {
    async fn connect(state: Arc<AppState>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            rpc::serve(state, listener).await.unwrap();
        });

        let stream = TcpStream::connect(addr).await.unwrap();
        let (reader, writer) = stream.into_split();
        Self {
            lines: BufReader::new(reader).lines(),
            writer,
            next_id: 1,
        }
    }

    async fn call(&mut self, method: &str, params: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;

        let request = json!({"id": id, "method": method, "params": params});
        let mut frame = serde_json::to_vec(&request).unwrap();
        frame.push(b'\n');
        self.writer.write_all(&frame).await.unwrap();

        let line = self.lines.next_line().await.unwrap().unwrap();
        let response: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(response["id"].as_u64(), Some(id));
        response
    }
}

fn ann_params(movie_id: i64, row: i64, col: i64) -> Value {
    json!([movie_id, row, col, "Ann", "ann@x.com", "081234567890"])
}

#[tokio::test]
async fn get_movies_returns_the_seeded_catalog() {
    let state = common::test_state().await;
    let mut client = RpcClient::connect(state).await;

    let response = client.call("get_movies", json!([])).await;
    let movies = response["result"].as_array().unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0]["title"], json!("The Matrix Reloaded"));
}

#[tokio::test]
async fn get_movie_by_id_returns_null_for_unknown_movies() {
    let state = common::test_state().await;
    let mut client = RpcClient::connect(state).await;

    let response = client.call("get_movie_by_id", json!([2])).await;
    assert_eq!(response["result"]["title"], json!("Inception"));

    let response = client.call("get_movie_by_id", json!([99])).await;
    assert!(response["result"].is_null());
}

#[tokio::test]
async fn book_seat_collapses_to_booleans() {
    let state = common::test_state().await;
    let mut client = RpcClient::connect(state).await;

    let response = client.call("book_seat", ann_params(1, 0, 0)).await;
    assert_eq!(response["result"], json!(true));

    // Same seat again: false, not an error.
    let response = client.call("book_seat", ann_params(1, 0, 0)).await;
    assert_eq!(response["result"], json!(false));
    assert!(response.get("error").is_none());

    // Out-of-grid position also collapses to false.
    let response = client.call("book_seat", ann_params(1, 9, 9)).await;
    assert_eq!(response["result"], json!(false));

    let response = client.call("get_seat_map", json!([1])).await;
    assert_eq!(response["result"][0][0], json!(1));
    assert_eq!(response["result"][0][1], json!(0));
}

#[tokio::test]
async fn booking_details_and_cancel_round_trip() {
    let state = common::test_state().await;
    let mut client = RpcClient::connect(state).await;

    client.call("book_seat", ann_params(1, 2, 2)).await;

    let response = client.call("get_booking_details", json!([1, 2, 2])).await;
    assert_eq!(response["result"]["customer_name"], json!("Ann"));
    assert_eq!(response["result"]["movie_title"], json!("The Matrix Reloaded"));

    let response = client.call("cancel_booking", json!([1, 2, 2])).await;
    assert_eq!(response["result"], json!(true));

    let response = client.call("cancel_booking", json!([1, 2, 2])).await;
    assert_eq!(response["result"], json!(false));

    let response = client.call("get_booking_details", json!([1, 2, 2])).await;
    assert!(response["result"].is_null());
}

#[tokio::test]
async fn unknown_methods_and_bad_params_yield_errors_without_dropping_the_connection() {
    let state = common::test_state().await;
    let mut client = RpcClient::connect(state).await;

    let response = client.call("steal_seat", json!([])).await;
    assert!(response["error"].as_str().unwrap().contains("unknown method"));

    let response = client.call("book_seat", json!(["one", 0, 0])).await;
    assert!(response["error"].as_str().unwrap().contains("param 0"));

    // The connection still works afterwards.
    let response = client.call("get_movies", json!([])).await;
    assert_eq!(response["result"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn rpc_and_shared_engine_agree_on_seat_state() {
    let state = common::test_state().await;
    let engine = state.engine.clone();
    let mut client = RpcClient::connect(state).await;

    let response = client.call("book_seat", ann_params(1, 4, 4)).await;
    assert_eq!(response["result"], json!(true));

    // The other transport's engine view sees the committed booking.
    let booking = engine.booking_details(1, 4, 4).await.unwrap();
    assert_eq!(booking.customer_name, "Ann");
}
