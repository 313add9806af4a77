use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::digest::DocumentDigest;
use crate::name::ParticipantName;
use crate::txref::TxRef;

/// The sole persisted entity: one notarized document.
///
/// A record is created only after the notarizing transaction has been
/// confirmed on chain, and is immutable from then on. The store is an
/// append-only history: the same participant may accumulate many records,
/// and verification always consults the most recent one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Validated name extracted from the document.
    pub participant_name: ParticipantName,
    /// SHA-256 digest of the exact bytes submitted at notarization time.
    pub document_hash: DocumentDigest,
    /// Ledger-returned reference for the notarizing transaction.
    pub tx_ref: TxRef,
    /// Creation time, second resolution.
    pub timestamp: DateTime<Utc>,
}

impl DocumentRecord {
    /// Create a record stamped with the current time.
    pub fn new(participant_name: ParticipantName, document_hash: DocumentDigest, tx_ref: TxRef) -> Self {
        Self {
            participant_name,
            document_hash,
            tx_ref,
            timestamp: Utc::now().trunc_subsecs(0),
        }
    }

    /// Create a record with an explicit timestamp (truncated to seconds).
    pub fn with_timestamp(
        participant_name: ParticipantName,
        document_hash: DocumentDigest,
        tx_ref: TxRef,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            participant_name,
            document_hash,
            tx_ref,
            timestamp: timestamp.trunc_subsecs(0),
        }
    }
}
