use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::errors::ContainerError;

/// Key of a value stored through [Registry::cache](crate::Registry::cache)
///
/// The caller's key and the parameter digest are kept apart, so no key can
/// collide with another key's parameterized entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct MemoKey {
    key: String,
    /// None = parameters serialized to nothing
    digest: Option<[u8; 32]>,
}
impl Display for MemoKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key)?;
        if let Some(digest) = &self.digest {
            f.write_str("#")?;
            for byte in digest {
                write!(f, "{byte:02x}")?;
            }
        }
        Ok(())
    }
}

/// Derives the key used by [Registry::cache](crate::Registry::cache)
///
/// Parameters that serialize to nothing (unit, empty map or list) carry no
/// digest. Otherwise the digest is the SHA-256 of the parameters' canonical
/// JSON, so equal parameters always map to the same entry.
pub(crate) fn cache_key<P: Serialize + ?Sized>(
    key: &str,
    parameters: &P,
) -> Result<MemoKey, ContainerError> {
    let value = serde_json::to_value(parameters).map_err(|source| ContainerError::CacheKey {
        key: key.to_string(),
        source,
    })?;

    let empty = match &value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    };
    let digest = if empty {
        None
    } else {
        let digest: [u8; 32] = Sha256::digest(canonical(value).to_string().as_bytes()).into();
        Some(digest)
    };

    Ok(MemoKey {
        key: key.to_string(),
        digest,
    })
}

/// Sorts object keys recursively, independent of serde_json's map ordering
fn canonical(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, canonical(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonical).collect()),
        other => other,
    }
}
