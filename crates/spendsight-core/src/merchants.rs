//! Merchant normalization and fuzzy grouping
//!
//! Clusters transactions belonging to the same real-world payee despite
//! string variation in the raw merchant field ("NETFLIX.COM", "Netflix com",
//! "NETFLX COM 0042").

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Transaction;
use crate::stats::levenshtein;

/// Canonicalize a merchant name: lowercase, trim, strip characters that are
/// neither alphanumeric nor whitespace, collapse internal whitespace.
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Edit-distance similarity in [0, 1]: `1 - levenshtein / max(len)`.
/// Two empty strings are defined as identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// A group of transactions judged to belong to the same payee.
/// Ephemeral: recomputed per analysis call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantCluster {
    /// Raw merchant string of the seeding transaction.
    pub representative_name: String,
    /// Normalized form used for similarity comparisons.
    pub normalized_name: String,
    pub category: String,
    pub transactions: Vec<Transaction>,
}

impl MerchantCluster {
    fn seed(tx: &Transaction, normalized: String) -> Self {
        Self {
            representative_name: tx.merchant.clone(),
            normalized_name: normalized,
            category: tx.category().to_string(),
            transactions: vec![tx.clone()],
        }
    }

    pub fn amounts(&self) -> Vec<f64> {
        self.transactions.iter().map(|t| t.amount).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.transactions.iter().map(|t| t.date).collect()
    }
}

/// Group transactions into merchant clusters by normalized-name similarity.
///
/// Each transaction is assigned to the first existing cluster (in cluster
/// creation order) whose normalized representative scores at least
/// `similarity_threshold`; otherwise it seeds a new cluster. First-match, not
/// best-match, so the result depends on input order: callers supply a stable,
/// chronologically ascending sequence. Clusters with fewer than `min_members`
/// transactions are discarded.
pub fn group_transactions(
    transactions: &[Transaction],
    similarity_threshold: f64,
    min_members: usize,
) -> Vec<MerchantCluster> {
    let mut clusters: Vec<MerchantCluster> = Vec::new();

    for tx in transactions {
        let key = normalize(&tx.merchant);
        let matched = clusters
            .iter_mut()
            .find(|c| similarity(&c.normalized_name, &key) >= similarity_threshold);

        match matched {
            Some(cluster) => cluster.transactions.push(tx.clone()),
            None => clusters.push(MerchantCluster::seed(tx, key)),
        }
    }

    let formed = clusters.len();
    clusters.retain(|c| c.transactions.len() >= min_members);
    debug!(
        formed,
        retained = clusters.len(),
        min_members,
        "Grouped transactions into merchant clusters"
    );

    clusters
}
