//! Generation manifest: what a generation run wrote and how.
//!
//! Written last, after every collection, so its presence means the
//! data directory is complete.

use crate::{store::ArtifactEncoding, types::Seed};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub name:     String,
    pub items:    usize,
    pub encoding: ArtifactEncoding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationManifest {
    pub generation_id: String,
    pub generated_at:  DateTime<Utc>,
    pub seed:          Seed,
    pub artifacts:     Vec<ArtifactEntry>,
}

impl GenerationManifest {
    pub fn new(seed: Seed) -> Self {
        Self {
            generation_id: uuid::Uuid::new_v4().to_string(),
            generated_at:  Utc::now(),
            seed,
            artifacts:     Vec::new(),
        }
    }

    pub fn record(&mut self, name: &str, items: usize, encoding: ArtifactEncoding) {
        self.artifacts.push(ArtifactEntry {
            name: name.to_string(),
            items,
            encoding,
        });
    }

    pub fn entry(&self, name: &str) -> Option<&ArtifactEntry> {
        self.artifacts.iter().find(|a| a.name == name)
    }
}
