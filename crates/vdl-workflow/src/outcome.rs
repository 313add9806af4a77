use vdl_types::{DocumentDigest, DocumentRecord, ParticipantName};

/// On-chain corroboration of a digest match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainStatus {
    /// Receipt found with success status: full verification.
    Confirmed,
    /// Receipt found but the notarizing transaction itself failed —
    /// the stored record exists but its chain anchor does not hold.
    Stale,
    /// The ledger could not be consulted; the digest match stands alone.
    Unknown,
}

/// Terminal result of the verification workflow.
///
/// Every expected outcome is a value here; only infrastructure failures
/// (extraction, store I/O) surface as errors.
#[derive(Clone, Debug)]
pub enum VerifyOutcome {
    /// Computed digest matches the stored record.
    Verified {
        record: DocumentRecord,
        chain: ChainStatus,
    },
    /// A record exists for the participant but its digest differs: the
    /// document was modified or is not the notarized original.
    HashMismatch {
        record: DocumentRecord,
        computed: DocumentDigest,
    },
    /// No record exists for the extracted name.
    NoRecord { name: ParticipantName },
}

impl VerifyOutcome {
    /// Returns `true` only for a digest match with on-chain confirmation.
    pub fn is_fully_verified(&self) -> bool {
        matches!(
            self,
            Self::Verified {
                chain: ChainStatus::Confirmed,
                ..
            }
        )
    }

    /// The participant name this outcome concerns.
    pub fn participant_name(&self) -> &ParticipantName {
        match self {
            Self::Verified { record, .. } | Self::HashMismatch { record, .. } => {
                &record.participant_name
            }
            Self::NoRecord { name } => name,
        }
    }
}
