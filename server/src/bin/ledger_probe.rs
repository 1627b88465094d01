//! Latency and race probe against a running ledger server.

use std::error::Error;
use std::time::Instant;

use clap::Parser;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "ledger-probe", about = "Measure charge latency and check concurrent charges for lost updates")]
struct Args {
    #[arg(long, default_value = "http://localhost:3000")]
    base_url: String,
    #[arg(long, default_value = "account")]
    account: String,
    #[arg(long, default_value_t = 10)]
    charge: i64,
    /// Charges in the race run; all but the last are sent concurrently.
    #[arg(long, default_value_t = 6)]
    requests: usize,
    /// Balance the server resets accounts to.
    #[arg(long, default_value_t = 100)]
    initial_balance: i64,
}

#[derive(Error, Debug)]
enum ProbeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned {status}, expected {expected}")]
    UnexpectedStatus {
        endpoint: &'static str,
        status: StatusCode,
        expected: StatusCode,
    },

    #[error("expected remaining balance {expected}, got {actual}")]
    BalanceMismatch { expected: i64, actual: i64 },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChargeReply {
    is_authorized: bool,
    remaining_balance: i64,
}

struct Probe {
    client: Client,
    args: Args,
}

impl Probe {
    async fn reset(&self) -> Result<(), ProbeError> {
        let response = self
            .client
            .post(format!("{}/reset", self.args.base_url))
            .json(&json!({ "account": self.args.account }))
            .send()
            .await?;
        expect_status("/reset", response.status(), StatusCode::NO_CONTENT)
    }

    async fn charge(&self) -> Result<ChargeReply, ProbeError> {
        let response = self
            .client
            .post(format!("{}/charge", self.args.base_url))
            .json(&json!({ "account": self.args.account, "charges": self.args.charge }))
            .send()
            .await?;
        expect_status("/charge", response.status(), StatusCode::OK)?;
        Ok(response.json().await?)
    }

    async fn latency(&self) -> Result<(), ProbeError> {
        self.reset().await?;

        let start = Instant::now();
        for _ in 0..5 {
            self.charge().await?;
        }
        info!("Latency: {} ms", start.elapsed().as_millis());
        Ok(())
    }

    async fn race(&self) -> Result<(), ProbeError> {
        self.reset().await?;

        let concurrent = self.args.requests.saturating_sub(1);
        let replies = join_all((0..concurrent).map(|_| self.charge())).await;
        for reply in &replies {
            if let Err(e) = reply {
                warn!("Concurrent charge failed: {}", e);
            }
        }

        let last = self.charge().await?;
        let expected = self.expected_balance();
        info!("Expected: {}", expected);
        info!(
            "Actual: {} (last charge authorized: {})",
            last.remaining_balance, last.is_authorized
        );

        if last.remaining_balance == expected {
            Ok(())
        } else {
            Err(ProbeError::BalanceMismatch {
                expected,
                actual: last.remaining_balance,
            })
        }
    }

    fn expected_balance(&self) -> i64 {
        let charge = self.args.charge;
        let initial = self.args.initial_balance;
        if charge <= 0 {
            return initial - charge * self.args.requests as i64;
        }
        let affordable = (initial / charge).min(self.args.requests as i64);
        initial - affordable * charge
    }
}

fn expect_status(
    endpoint: &'static str,
    status: StatusCode,
    expected: StatusCode,
) -> Result<(), ProbeError> {
    if status == expected {
        Ok(())
    } else {
        Err(ProbeError::UnexpectedStatus {
            endpoint,
            status,
            expected,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().compact().with_target(false).init();

    let probe = Probe {
        client: Client::new(),
        args: Args::parse(),
    };

    probe.latency().await?;
    probe.race().await?;
    Ok(())
}
