//! Loading of the JSON share document.
//!
//! ```json
//! {
//!   "keys": { "n": 4, "k": 3 },
//!   "1": { "base": "10", "value": "4" },
//!   "2": { "base": "2", "value": "111" }
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Parameters;
use crate::error::{RecoveryError, Result};
use crate::share::{Share, ShareId};

/// A parsed input document: the threshold parameters and the raw shares.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Document {
    pub parameters: Parameters,
    pub shares: Vec<Share>,
}

// Top-level entries in document order, duplicates kept.
struct Entries(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Entries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Entries, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, serde_json::Value>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Base {
    Number(u32),
    Text(String),
}

#[derive(Deserialize)]
struct RawShare {
    base: Base,
    value: String,
}

impl Document {
    pub fn new(parameters: Parameters, shares: Vec<Share>) -> Self {
        Document { parameters, shares }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        text.parse()
    }

    pub fn share_ids(&self) -> Vec<ShareId> {
        self.shares.iter().map(|share| share.id).collect()
    }

    fn parse_share(id: ShareId, value: serde_json::Value) -> Result<Share> {
        // serde messages may quote the offending value, so they are replaced.
        let raw: RawShare = serde_json::from_value(value).map_err(|_| RecoveryError::Document {
            reason: format!("share {id} must be an object with a base and a string value"),
        })?;
        let base = match raw.base {
            Base::Number(base) => base,
            Base::Text(text) => text.trim().parse().map_err(|_| RecoveryError::Document {
                reason: format!("share {id} has a non-numeric base"),
            })?,
        };
        Ok(Share::new(id, base, raw.value))
    }
}

impl FromStr for Document {
    type Err = RecoveryError;

    fn from_str(text: &str) -> Result<Self> {
        let Entries(entries) = serde_json::from_str(text)?;

        let mut parameters: Option<Parameters> = None;
        let mut seen = HashSet::new();
        let mut shares = Vec::new();

        for (key, value) in entries {
            if key == "keys" {
                if parameters.is_some() {
                    return Err(RecoveryError::Document {
                        reason: "more than one keys object".to_string(),
                    });
                }
                parameters = Some(serde_json::from_value(value)?);
                continue;
            }

            let id: ShareId = match key.trim().parse() {
                Ok(0) => {
                    return Err(RecoveryError::Document {
                        reason: "share ids start at 1".to_string(),
                    })
                }
                Ok(id) => id,
                Err(_) => {
                    warn!(key = %key, "skipping entry that is not a share id");
                    continue;
                }
            };
            if !seen.insert(id) {
                return Err(RecoveryError::DuplicateShareId(id));
            }
            shares.push(Self::parse_share(id, value)?);
        }

        let parameters = parameters.ok_or_else(|| RecoveryError::Document {
            reason: "missing keys object".to_string(),
        })?;
        parameters.validate()?;

        for share in &shares {
            if share.id as usize > parameters.total_shares {
                warn!(
                    share = share.id,
                    declared = parameters.total_shares,
                    "share id exceeds the declared share count"
                );
            }
        }
        debug!(
            threshold = parameters.threshold,
            declared = parameters.total_shares,
            present = shares.len(),
            "loaded document"
        );

        Ok(Document { parameters, shares })
    }
}
