//! Remote-procedure transport for the desktop client: newline-delimited JSON
//! over TCP, one request object per line. Boolean-returning methods collapse
//! the engine's structured errors to false; callers wanting the reason query
//! booking details separately. Store faults are never collapsed — they come
//! back as an explicit error payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, warn};

use crate::error::BookingError;
use crate::models::Customer;
use crate::AppState;

#[derive(Debug, Deserialize)]
struct RpcRequest {
    id: Option<u64>,
    method: String,
    #[serde(default)]
    params: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct RpcResponse {
    id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl RpcResponse {
    fn result(id: Option<u64>, result: Value) -> Self {
        Self { id, result: Some(result), error: None }
    }

    fn error(id: Option<u64>, message: impl Into<String>) -> Self {
        Self { id, result: None, error: Some(message.into()) }
    }
}

/// Accept loop. Each connection gets its own task; a failed connection never
/// takes the listener down.
pub async fn serve(state: Arc<AppState>, listener: TcpListener) -> std::io::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        debug!("rpc client connected from {peer}");
        let state = state.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, state).await {
                warn!("rpc connection {peer} closed with error: {e}");
            }
        });
    }
}

async fn handle_connection(stream: TcpStream, state: Arc<AppState>) -> std::io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<RpcRequest>(&line) {
            Ok(request) => dispatch(&state, request).await,
            Err(e) => RpcResponse::error(None, format!("malformed request: {e}")),
        };

        let mut payload = serde_json::to_vec(&response)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;
        payload.push(b'\n');
        writer.write_all(&payload).await?;
    }

    Ok(())
}

async fn dispatch(state: &AppState, request: RpcRequest) -> RpcResponse {
    let id = request.id;
    debug!("rpc call: {}({:?})", request.method, request.params);

    let outcome = match request.method.as_str() {
        "get_movies" => get_movies(state).await,
        "get_movie_by_id" => get_movie_by_id(state, &request.params).await,
        "get_seat_map" => get_seat_map(state, &request.params).await,
        "book_seat" => book_seat(state, &request.params).await,
        "get_booking_details" => get_booking_details(state, &request.params).await,
        "cancel_booking" => cancel_booking(state, &request.params).await,
        other => Err(RpcFault::BadRequest(format!("unknown method: {other}"))),
    };

    match outcome {
        Ok(result) => RpcResponse::result(id, result),
        Err(RpcFault::BadRequest(msg)) => RpcResponse::error(id, msg),
        Err(RpcFault::Store(e)) => {
            tracing::error!("rpc store error: {e:?}");
            RpcResponse::error(id, "storage unavailable")
        }
    }
}

/// RPC-level failures. Business rejections never land here; they fold into
/// the method's normal return value.
enum RpcFault {
    BadRequest(String),
    Store(sqlx::Error),
}

async fn get_movies(state: &AppState) -> Result<Value, RpcFault> {
    let movies = state.catalog.list_movies().await.map_err(fold_read)?;
    Ok(serde_json::json!(movies))
}

async fn get_movie_by_id(state: &AppState, params: &[Value]) -> Result<Value, RpcFault> {
    let movie_id = param_i64(params, 0)?;
    match state.catalog.movie_details(movie_id).await {
        Ok(movie) => Ok(serde_json::json!(movie)),
        Err(BookingError::NotFound(_)) => Ok(Value::Null),
        Err(e) => Err(fold_read(e)),
    }
}

async fn get_seat_map(state: &AppState, params: &[Value]) -> Result<Value, RpcFault> {
    let movie_id = param_i64(params, 0)?;
    let grid = state.catalog.seat_map(movie_id).await.map_err(fold_read)?;
    Ok(serde_json::json!(grid))
}

async fn book_seat(state: &AppState, params: &[Value]) -> Result<Value, RpcFault> {
    let movie_id = param_i64(params, 0)?;
    let row = param_i64(params, 1)?;
    let col = param_i64(params, 2)?;
    let customer = Customer {
        name: param_str(params, 3)?,
        email: param_str(params, 4)?,
        phone: param_str(params, 5)?,
    };

    match state.engine.book_seat(movie_id, row, col, &customer).await {
        Ok(_) => Ok(Value::Bool(true)),
        Err(BookingError::Store(e)) => Err(RpcFault::Store(e)),
        Err(_) => Ok(Value::Bool(false)),
    }
}

async fn get_booking_details(state: &AppState, params: &[Value]) -> Result<Value, RpcFault> {
    let movie_id = param_i64(params, 0)?;
    let row = param_i64(params, 1)?;
    let col = param_i64(params, 2)?;

    match state.engine.booking_details(movie_id, row, col).await {
        Ok(booking) => Ok(serde_json::json!(booking)),
        Err(BookingError::NotFound(_)) => Ok(Value::Null),
        Err(e) => Err(fold_read(e)),
    }
}

async fn cancel_booking(state: &AppState, params: &[Value]) -> Result<Value, RpcFault> {
    let movie_id = param_i64(params, 0)?;
    let row = param_i64(params, 1)?;
    let col = param_i64(params, 2)?;

    match state.engine.cancel_booking(movie_id, row, col).await {
        Ok(()) => Ok(Value::Bool(true)),
        Err(BookingError::Store(e)) => Err(RpcFault::Store(e)),
        Err(_) => Ok(Value::Bool(false)),
    }
}

fn fold_read(err: BookingError) -> RpcFault {
    match err {
        BookingError::Store(e) => RpcFault::Store(e),
        other => RpcFault::BadRequest(other.to_string()),
    }
}

fn param_i64(params: &[Value], index: usize) -> Result<i64, RpcFault> {
    params
        .get(index)
        .and_then(Value::as_i64)
        .ok_or_else(|| RpcFault::BadRequest(format!("param {index} must be an integer")))
}

fn param_str(params: &[Value], index: usize) -> Result<String, RpcFault> {
    params
        .get(index)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RpcFault::BadRequest(format!("param {index} must be a string")))
}
