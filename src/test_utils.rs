// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Test fixtures: an in-memory node, a local JSON-RPC node and log capture.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use alloy::primitives::U256;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing_subscriber::fmt::MakeWriter;

use crate::batch::BalanceSource;
use crate::blockchain::{NativeBalance, QueryError};

/// Wei for `milli` thousandths of an ETH.
pub(crate) fn eth_milli(milli: u64) -> U256 {
    U256::from(milli) * U256::from(1_000_000_000_000_000u64)
}

type Answer = Result<U256, QueryError>;

/// Fake node with scripted answers per address.
///
/// Addresses without a `0x` prefix are rejected as invalid, unknown addresses
/// get an RPC error. Every call is logged.
#[derive(Debug, Default)]
pub(crate) struct FakeNode {
    answers: RefCell<HashMap<String, VecDeque<Answer>>>,
    calls: RefCell<Vec<String>>,
}

impl FakeNode {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_balance(self, address: &str, wei: U256) -> Self {
        self.with_sequence(address, vec![Ok(wei)])
    }

    pub(crate) fn with_failure(self, address: &str, error: QueryError) -> Self {
        self.with_sequence(address, vec![Err(error)])
    }

    /// Answers are consumed in order; the last one repeats.
    pub(crate) fn with_sequence(self, address: &str, answers: Vec<Answer>) -> Self {
        self.answers
            .borrow_mut()
            .insert(address.to_string(), answers.into());
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn next_answer(&self, address: &str) -> Answer {
        if !address.starts_with("0x") {
            return Err(QueryError::InvalidAddress(format!("{address}: missing 0x prefix")));
        }

        let mut answers = self.answers.borrow_mut();
        match answers.get_mut(address) {
            Some(queue) if queue.len() > 1 => queue
                .pop_front()
                .unwrap_or_else(|| Err(QueryError::Rpc("empty script".into()))),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(QueryError::Rpc("empty script".into()))),
            None => Err(QueryError::Rpc(format!("no scripted answer for {address}"))),
        }
    }
}

impl BalanceSource for FakeNode {
    async fn fetch_balance(&self, address: &str) -> Result<NativeBalance, QueryError> {
        self.calls.borrow_mut().push(address.to_string());
        self.next_answer(address).map(|wei| NativeBalance::eth(wei, 4))
    }
}

/// Chain id reported by [`spawn_rpc_node`].
pub(crate) const RPC_NODE_CHAIN_ID: &str = "0x1";

/// Start a JSON-RPC node over HTTP on a random local port.
///
/// Answers `eth_chainId`, `eth_blockNumber` and `eth_getBalance`. Balances are
/// keyed by lowercase hex address; unknown accounts hold zero.
pub(crate) async fn spawn_rpc_node(balances: &[(&str, U256)]) -> SocketAddr {
    let balances: Arc<HashMap<String, U256>> = Arc::new(
        balances
            .iter()
            .map(|(address, wei)| (address.to_ascii_lowercase(), *wei))
            .collect(),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(serve_rpc(stream, Arc::clone(&balances)));
        }
    });
    addr
}

/// Start a node that accepts connections and never answers.
pub(crate) async fn spawn_silent_node() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    addr
}

/// Serve keep-alive HTTP/1.1 requests on one connection.
async fn serve_rpc(mut stream: TcpStream, balances: Arc<HashMap<String, U256>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let header_end = loop {
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        };

        let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
        let body_len = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        while buf.len() < header_end + body_len {
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }

        let body: Vec<u8> = buf.drain(..header_end + body_len).skip(header_end).collect();
        let payload = rpc_answer(&body, &balances);
        let reply = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{payload}",
            payload.len()
        );
        if stream.write_all(reply.as_bytes()).await.is_err() {
            return;
        }
    }
}

fn rpc_answer(body: &[u8], balances: &HashMap<String, U256>) -> String {
    let request: Value = serde_json::from_slice(body).unwrap_or_default();
    let id = request["id"].clone();

    let result = match request["method"].as_str() {
        Some("eth_chainId") => json!(RPC_NODE_CHAIN_ID),
        Some("eth_blockNumber") => json!("0x10"),
        Some("eth_getBalance") => {
            let address = request["params"][0]
                .as_str()
                .unwrap_or_default()
                .to_ascii_lowercase();
            let wei = balances.get(&address).copied().unwrap_or(U256::ZERO);
            json!(format!("0x{wei:x}"))
        }
        _ => {
            return json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {"code": -32601, "message": "method not found"}
            })
            .to_string()
        }
    };

    json!({"jsonrpc": "2.0", "id": id, "result": result}).to_string()
}

/// In-memory log sink for asserting on emitted events.
#[derive(Debug, Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Subscriber writing plain-text events at `info` and above into this sink.
    pub(crate) fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .finish()
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
