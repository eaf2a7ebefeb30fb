// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ethereum client for native balance lookups.

use std::fmt;
use std::future::IntoFuture;
use std::str::FromStr;
use std::time::Duration;

use alloy::{
    network::Ethereum,
    primitives::Address,
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, ProviderBuilder, RootProvider, WsConnect,
    },
};
use tokio::time::timeout;
use url::Url;

use super::types::*;
use crate::batch::BalanceSource;
use crate::error::CheckerError;

/// Provider type produced by `ProviderBuilder::new()` for both transports.
type NodeProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// Connection to a remote Ethereum JSON-RPC node.
///
/// Construction verifies liveness, so every `EthClient` in hand has answered
/// at least one request.
pub struct EthClient {
    /// Scheme, host and port of the endpoint. Path and query are never kept.
    endpoint: String,
    /// Alloy provider
    provider: NodeProvider,
    /// Upper bound for each request
    request_timeout: Duration,
    /// Fractional digits kept when formatting balances
    precision: u8,
}

impl fmt::Debug for EthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthClient")
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .field("precision", &self.precision)
            .finish_non_exhaustive()
    }
}

impl EthClient {
    /// Connect to the node at `node_url` and verify it answers `eth_chainId`.
    pub async fn connect(
        node_url: &str,
        request_timeout: Duration,
        precision: u8,
    ) -> Result<Self, CheckerError> {
        let (url, kind) = parse_node_url(node_url)?;
        let endpoint = endpoint_label(&url);

        let provider = match kind {
            EndpointKind::Http => ProviderBuilder::new().connect_http(url),
            EndpointKind::WebSocket => {
                let handshake = ProviderBuilder::new().connect_ws(WsConnect::new(url.as_str()));
                timeout(request_timeout, handshake)
                    .await
                    .map_err(|_| {
                        CheckerError::Connection(format!(
                            "{endpoint}: handshake timed out after {}s",
                            request_timeout.as_secs()
                        ))
                    })?
                    .map_err(|e| CheckerError::Connection(format!("{endpoint}: {e}")))?
            }
        };

        let client = Self {
            endpoint,
            provider,
            request_timeout,
            precision,
        };
        client.verify().await?;
        Ok(client)
    }

    /// Liveness check: the node must report its chain id and head block.
    async fn verify(&self) -> Result<(), CheckerError> {
        let chain_id = self
            .bounded(self.provider.get_chain_id())
            .await
            .map_err(|e| CheckerError::Connection(format!("{}: {e}", self.endpoint)))?;
        let head_block = self
            .bounded(self.provider.get_block_number())
            .await
            .map_err(|e| CheckerError::Connection(format!("{}: {e}", self.endpoint)))?;

        tracing::info!(
            endpoint = %self.endpoint,
            chain_id,
            head_block,
            "Connected to Ethereum node"
        );
        Ok(())
    }

    /// Get the native ETH balance for an address.
    pub async fn get_native_balance(&self, address: &str) -> Result<NativeBalance, QueryError> {
        let addr = Address::from_str(address)
            .map_err(|e| QueryError::InvalidAddress(e.to_string()))?;

        let wei = self.bounded(self.provider.get_balance(addr)).await?;
        Ok(NativeBalance::eth(wei, self.precision))
    }

    /// Scheme and host of the connected endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one RPC call under the request timeout.
    async fn bounded<F, T, E>(&self, call: F) -> Result<T, QueryError>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: fmt::Display,
    {
        match timeout(self.request_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(QueryError::Rpc(e.to_string())),
            Err(_) => Err(QueryError::Timeout(self.request_timeout)),
        }
    }
}

impl BalanceSource for EthClient {
    async fn fetch_balance(&self, address: &str) -> Result<NativeBalance, QueryError> {
        self.get_native_balance(address).await
    }
}

/// Parse and classify a node URL. Only HTTP(S) and WebSocket endpoints are accepted.
fn parse_node_url(raw: &str) -> Result<(Url, EndpointKind), CheckerError> {
    let url: Url = raw
        .trim()
        .parse()
        .map_err(|e: url::ParseError| CheckerError::InvalidNodeUrl(e.to_string()))?;

    let kind = EndpointKind::from_scheme(url.scheme()).ok_or_else(|| {
        CheckerError::InvalidNodeUrl(format!(
            "unsupported scheme `{}` (expected http, https, ws or wss)",
            url.scheme()
        ))
    })?;

    Ok((url, kind))
}

/// `scheme://host[:port]`, safe to log.
fn endpoint_label(url: &Url) -> String {
    let host = url.host_str().unwrap_or("unknown-host");
    match url.port() {
        Some(port) => format!("{}://{host}:{port}", url.scheme()),
        None => format!("{}://{host}", url.scheme()),
    }
}

/// Errors for a single balance lookup.
///
/// These never abort a batch; they are recorded against the address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The input could not be parsed as an account address. The payload holds
    /// the parser's detail; the display text is fixed.
    #[error("invalid address")]
    InvalidAddress(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}
