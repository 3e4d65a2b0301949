//! Synthetic display keys.
//!
//! Backend ids are unique only within a record kind, and stale paginated
//! responses can surface the same row twice. Every rendered record therefore
//! gets a synthetic key `kind-backendId`, extended to `kind-backendId~seq`
//! when reconciliation detects a collision. `~` is reserved as the collision
//! separator precisely because backend ids never contain it — text ids may
//! contain `-`, so a dash suffix would be ambiguous. The key exists purely
//! for addressing rows in the UI; it is never sent to the backend — mutation
//! paths call [`recover_backend_id`] to strip it back down first.

use crate::error::CoreError;
use crate::record::{BackendId, RecordKind};

/// A globally unique key for one rendered record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayKey {
    kind: RecordKind,
    id: BackendId,
    /// Collision disambiguator assigned by reconciliation; `None` for the
    /// first occurrence of an identity.
    seq: Option<u32>,
}

impl DisplayKey {
    /// Key for the first occurrence of `(kind, id)`.
    pub fn new(kind: RecordKind, id: BackendId) -> Self {
        DisplayKey { kind, id, seq: None }
    }

    /// Key for a subsequent occurrence of an already-seen identity.
    pub(crate) fn with_seq(kind: RecordKind, id: BackendId, seq: u32) -> Self {
        DisplayKey {
            kind,
            id,
            seq: Some(seq),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn backend_id(&self) -> &BackendId {
        &self.id
    }

    /// Parse a key string back into its parts.
    ///
    /// An optional `~<seq>` collision suffix is split off first; the
    /// remainder after the kind token is then the backend id verbatim.
    /// Numeric-id kinds require an `i64` id; text-id kinds take the full
    /// remainder, dashes included.
    pub fn parse(key: &str) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidIdentifier {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        let (base, seq) = match key.rsplit_once('~') {
            Some((base, suffix)) => {
                let seq: u32 = suffix
                    .parse()
                    .map_err(|_| invalid("non-numeric collision suffix"))?;
                (base, Some(seq))
            }
            None => (key, None),
        };

        let kind = RecordKind::ALL
            .into_iter()
            .find(|k| {
                base.strip_prefix(k.token())
                    .is_some_and(|rest| rest.starts_with('-'))
            })
            .ok_or_else(|| invalid("unrecognized kind prefix"))?;
        let rest = &base[kind.token().len() + 1..];
        if rest.is_empty() {
            return Err(invalid("missing backend id"));
        }

        let id = if kind.has_numeric_ids() {
            BackendId::Numeric(
                rest.parse()
                    .map_err(|_| invalid("non-numeric backend id"))?,
            )
        } else {
            BackendId::Text(rest.to_string())
        };
        Ok(DisplayKey { kind, id, seq })
    }
}

impl std::fmt::Display for DisplayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.seq {
            Some(seq) => write!(f, "{}-{}~{}", self.kind.token(), self.id, seq),
            None => write!(f, "{}-{}", self.kind.token(), self.id),
        }
    }
}

impl std::str::FromStr for DisplayKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayKey::parse(s)
    }
}

/// Recover the original backend identity from a display-key string.
///
/// Every mutation entry point (edit-save, delete, merge) must go through
/// this before any network call; a failure here means the key never came
/// from reconciliation and must be surfaced locally, not sent to the server.
pub fn recover_backend_id(key: &str) -> Result<(RecordKind, BackendId), CoreError> {
    let parsed = DisplayKey::parse(key)?;
    Ok((parsed.kind, parsed.id))
}
