//! Batch comparison sharded over blocking worker tasks.

use crate::input::ComparePair;
use anyhow::Result;
use likeness_core::{FaceMatcher, MatchResult};
use serde::Serialize;

/// One output line: the pair's id with either its result or the reason it
/// was rejected.
#[derive(Debug, Serialize)]
pub struct BatchLine {
    pub id: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn compare_pair(matcher: &FaceMatcher, pair: ComparePair) -> BatchLine {
    match matcher.compare(&pair.a, &pair.b) {
        Ok(result) => BatchLine {
            id: pair.id,
            result: Some(result),
            error: None,
        },
        Err(e) => {
            tracing::warn!(id = %pair.id, error = %e, "pair rejected");
            BatchLine {
                id: pair.id,
                result: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Compare every pair, splitting the input into at most `workers` contiguous
/// shards. Output order matches input order.
pub async fn run_batch(
    matcher: FaceMatcher,
    pairs: Vec<ComparePair>,
    workers: usize,
) -> Result<Vec<BatchLine>> {
    if pairs.is_empty() {
        return Ok(Vec::new());
    }

    let total = pairs.len();
    let shard_size = total.div_ceil(workers.max(1));
    let mut handles = Vec::new();
    let mut pairs = pairs.into_iter();

    loop {
        let shard: Vec<ComparePair> = pairs.by_ref().take(shard_size).collect();
        if shard.is_empty() {
            break;
        }
        handles.push(tokio::task::spawn_blocking(move || {
            shard
                .into_iter()
                .map(|pair| compare_pair(&matcher, pair))
                .collect::<Vec<_>>()
        }));
    }

    tracing::info!(pairs = total, shards = handles.len(), "batch started");

    let mut lines = Vec::with_capacity(total);
    for handle in handles {
        lines.extend(handle.await?);
    }

    let rejected = lines.iter().filter(|l| l.error.is_some()).count();
    tracing::info!(pairs = total, rejected, "batch finished");
    Ok(lines)
}
