// This file is part of Feestimi.
//
// Feestimi is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Feestimi is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Feestimi.
// If not, see https://www.gnu.org/licenses/.


use std::time::Duration;

use alloy_provider::{network::Ethereum, Provider as AlloyProvider, RootProvider};
use alloy_rpc_client::ClientBuilder;
use anyhow::Context;
use evm::AlloyEvmProvider;
use metrics::AlloyMetricLayer;
use provider_timeout::ProviderTimeoutLayer;
use url::Url;

use crate::EvmProvider;

pub(crate) mod evm;
pub(crate) mod metrics;
mod provider_timeout;

/// Create a new alloy evm provider from a given RPC URL
pub(crate) fn new_alloy_evm_provider(
    rpc_url: &str,
    provider_client_timeout_seconds: u64,
) -> anyhow::Result<impl EvmProvider + Clone> {
    let provider = new_alloy_provider(rpc_url, provider_client_timeout_seconds)?;
    Ok(AlloyEvmProvider::new(provider))
}

/// Create a new alloy provider from a given RPC URL
pub(crate) fn new_alloy_provider(
    rpc_url: &str,
    provider_client_timeout_seconds: u64,
) -> anyhow::Result<impl AlloyProvider + Clone> {
    let url = Url::parse(rpc_url).context("invalid rpc url")?;
    let metric_layer = AlloyMetricLayer::default();
    // rate limit responses are retried, a large compute unit budget disables throttling
    let retry_layer = alloy_transport::layers::RetryBackoffLayer::new(10, 500, 1_000_000);
    let timeout_layer =
        ProviderTimeoutLayer::new(Duration::from_secs(provider_client_timeout_seconds));
    let client = ClientBuilder::default()
        .layer(retry_layer)
        .layer(metric_layer)
        .layer(timeout_layer)
        .http(url);
    Ok(RootProvider::<Ethereum>::new(client))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use alloy_primitives::{address, Bytes};
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;
    use crate::{ProviderError, TransactionBuilder, TransactionRequest};

    // Accepts connections and answers every request with `body` after `delay`
    async fn serve(delay: Duration, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let (mut socket, _) = listener.accept().await.unwrap();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 8192];
                    let _ = socket.read(&mut buf).await;
                    tokio::time::sleep(delay).await;
                    let response = format!(
                        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                });
            }
        });
        format!("http://{addr}")
    }

    fn request() -> TransactionRequest {
        TransactionRequest::default()
            .with_to(address!("0000000000000000000000000000000000000001"))
            .with_input(Bytes::from_static(&[0x12, 0x34]))
    }

    #[tokio::test]
    async fn test_call() {
        let url = serve(
            Duration::ZERO,
            r#"{"jsonrpc":"2.0","id":0,"result":"0x00000000000000000000000000000000000000000000000000000000000003e8"}"#,
        )
        .await;
        let provider = new_alloy_evm_provider(&url, 5).unwrap();
        let ret = provider.call(request(), None).await.unwrap();
        assert_eq!(ret.len(), 32);
        assert_eq!(&ret[30..], &[0x03, 0xe8]);
    }

    #[tokio::test]
    async fn test_revert() {
        let url = serve(
            Duration::ZERO,
            r#"{"jsonrpc":"2.0","id":0,"error":{"code":3,"message":"execution reverted","data":"0x"}}"#,
        )
        .await;
        let provider = new_alloy_evm_provider(&url, 5).unwrap();
        let err = provider.estimate_gas(request(), None).await.unwrap_err();
        assert!(matches!(err, ProviderError::Revert { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_timeout() {
        let url = serve(
            Duration::from_secs(30),
            r#"{"jsonrpc":"2.0","id":0,"result":"0x5208"}"#,
        )
        .await;
        let provider = new_alloy_evm_provider(&url, 1).unwrap();
        let start = Instant::now();
        let err = provider.estimate_gas(request(), None).await.unwrap_err();
        assert!(matches!(err, ProviderError::RPC(_)), "{err:?}");
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_url() {
        assert!(new_alloy_evm_provider("not a url", 1).is_err());
    }
}
