//! Request dispatch over an immutable, fully loaded dataset.
//!
//! RULE: A QueryService only exists after MigrationDataset::load has
//! succeeded, so every request sees the complete snapshot. The dataset
//! sits behind an Arc and is never mutated; clones of the service can
//! answer requests from any thread without locking.

use crate::{
    catalog,
    config::QueryLimits,
    dataset::MigrationDataset,
    error::DataResult,
    network,
    query::{self, CategoryFilter, FlowQuery, QueryParams, RecordQuery},
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Parameters as sent by a client. Numbers and booleans are accepted and
/// read as their JSON text, so `{"minFlow": 500}` and `{"minFlow": "500"}`
/// are the same request.
pub type RawParams = BTreeMap<String, Value>;

/// One request on the read surface.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum QueryRequest {
    MigrationFlows {
        #[serde(default)]
        params: RawParams,
    },
    StateSummary {
        #[serde(default)]
        params: RawParams,
    },
    TimeSeries {
        #[serde(default)]
        params: RawParams,
    },
    Demographics,
    Infodemic {
        #[serde(default)]
        params: RawParams,
    },
    Policies {
        #[serde(default)]
        params: RawParams,
    },
    Resilience {
        #[serde(default)]
        params: RawParams,
    },
    Emotions {
        #[serde(default)]
        params: RawParams,
    },
    GravityNetwork {
        #[serde(default)]
        params: RawParams,
    },
    CausalityNetwork,
    States,
    Quarters,
    Health,
    Quit,
}

fn normalize(raw: &RawParams) -> QueryParams {
    raw.iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Null => return None,
                other => other.to_string(),
            };
            Some((key.clone(), text))
        })
        .collect()
}

#[derive(Clone)]
pub struct QueryService {
    dataset: Arc<MigrationDataset>,
    limits:  QueryLimits,
}

impl QueryService {
    pub fn new(dataset: MigrationDataset, limits: QueryLimits) -> Self {
        Self {
            dataset: Arc::new(dataset),
            limits,
        }
    }

    pub fn dataset(&self) -> &MigrationDataset {
        &self.dataset
    }

    pub fn limits(&self) -> &QueryLimits {
        &self.limits
    }

    /// Answer one request as a JSON value.
    pub fn handle(&self, request: &QueryRequest) -> DataResult<Value> {
        let data = self.dataset.as_ref();
        let limits = &self.limits;
        let value = match request {
            QueryRequest::MigrationFlows { params } => {
                let q = FlowQuery::from_params(&normalize(params));
                serde_json::to_value(query::list_flows(data, &q, limits))?
            }
            QueryRequest::StateSummary { params } => {
                let c = CategoryFilter::from_params(&normalize(params));
                serde_json::to_value(query::state_summary(data, &c))?
            }
            QueryRequest::TimeSeries { params } => {
                let c = CategoryFilter::from_params(&normalize(params));
                serde_json::to_value(query::time_series(data, &c))?
            }
            QueryRequest::Demographics => {
                serde_json::to_value(query::demographics_breakdown(data, limits))?
            }
            QueryRequest::Infodemic { params } => {
                let q = RecordQuery::from_params(&normalize(params));
                serde_json::to_value(query::list_records(&data.infodemic, &q, limits))?
            }
            QueryRequest::Policies { params } => {
                let q = RecordQuery::from_params(&normalize(params));
                serde_json::to_value(query::list_records(&data.policies, &q, limits))?
            }
            QueryRequest::Resilience { params } => {
                let q = RecordQuery::from_params(&normalize(params));
                serde_json::to_value(query::list_records(&data.resilience, &q, limits))?
            }
            QueryRequest::Emotions { params } => {
                let q = RecordQuery::from_params(&normalize(params));
                serde_json::to_value(query::list_records(&data.emotions, &q, limits))?
            }
            QueryRequest::GravityNetwork { params } => {
                let params = normalize(params);
                let c = CategoryFilter::from_params(&params);
                let quarter = network::network_quarter(&params);
                serde_json::to_value(network::gravity_network(data, &c, quarter, limits))?
            }
            QueryRequest::CausalityNetwork => serde_json::to_value(network::causality_network())?,
            QueryRequest::States => serde_json::to_value(&data.states)?,
            QueryRequest::Quarters => serde_json::to_value(catalog::QUARTERS)?,
            QueryRequest::Health => serde_json::to_value(query::health(data))?,
            QueryRequest::Quit => serde_json::json!({ "status": "bye" }),
        };
        log::debug!("handled {request:?}");
        Ok(value)
    }

    /// Parse and answer one request line. Malformed lines yield an error
    /// object instead of failing, so a bad client never stops the loop.
    pub fn handle_line(&self, line: &str) -> Value {
        let request: QueryRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => return serde_json::json!({ "error": e.to_string() }),
        };
        match self.handle(&request) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("request failed: {e}");
                serde_json::json!({ "error": e.to_string() })
            }
        }
    }
}

/// True when `line` is a well-formed `quit` request. The loop still answers
/// it through `handle_line` before stopping.
pub fn is_quit(line: &str) -> bool {
    matches!(serde_json::from_str::<QueryRequest>(line), Ok(QueryRequest::Quit))
}
