//! Values published to the player during a session.

use crate::crypto::{Commitment, Secret};
use crate::error::GameError;
use crate::protocol::{Outcome, SessionId};
use serde::{Deserialize, Serialize};

/// Published at session start, before the player chooses
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommitAnnouncement {
    pub session_id: SessionId,
    pub commitment: Commitment,
}

/// Everything revealed when the session resolves
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub player_index: usize,
    pub player_move: String,
    pub opponent_index: usize,
    pub opponent_move: String,
    /// From the player's side
    pub outcome: Outcome,
    /// Revealed key, lowercase hex
    pub key: String,
    pub commitment: Commitment,
}

impl Resolution {
    /// The triple an auditor needs to check the opponent's move
    pub fn proof(&self) -> FairnessProof {
        FairnessProof {
            commitment: self.commitment,
            key: self.key.clone(),
            claimed_move: self.opponent_move.clone(),
        }
    }
}

/// Commitment, revealed key and claimed move
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairnessProof {
    pub commitment: Commitment,
    pub key: String,
    #[serde(rename = "move")]
    pub claimed_move: String,
}

impl FairnessProof {
    /// Recompute the commitment from the revealed key and claimed move
    pub fn verify(&self) -> Result<(), GameError> {
        let secret = Secret::from_hex(&self.key)?;
        self.commitment
            .check(&secret, self.claimed_move.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proof_for(secret: &Secret, committed: &str, claimed: &str) -> FairnessProof {
        FairnessProof {
            commitment: Commitment::new(secret, committed.as_bytes()),
            key: secret.to_hex(),
            claimed_move: claimed.to_string(),
        }
    }

    #[test]
    fn test_proof_verifies() {
        let secret = Secret::random().unwrap();

        assert!(proof_for(&secret, "rock", "rock").verify().is_ok());
    }

    #[test]
    fn test_swapped_move_is_fairness_violation() {
        let secret = Secret::random().unwrap();

        assert!(matches!(
            proof_for(&secret, "rock", "paper").verify(),
            Err(GameError::FairnessViolation { .. })
        ));
    }

    #[test]
    fn test_malformed_key_is_not_fairness_violation() {
        let secret = Secret::random().unwrap();
        let mut proof = proof_for(&secret, "rock", "rock");
        proof.key = "xyz".into();

        assert!(matches!(proof.verify(), Err(GameError::InvalidHex(_))));
    }

    #[test]
    fn test_proof_serialization() {
        let secret = Secret::random().unwrap();
        let proof = proof_for(&secret, "rock", "rock");

        let json = serde_json::to_string(&proof).unwrap();
        assert!(json.contains("\"move\":\"rock\""));
        assert!(json.contains(&proof.commitment.to_hex()));

        let deserialized: FairnessProof = serde_json::from_str(&json).unwrap();
        assert_eq!(proof, deserialized);
        assert!(deserialized.verify().is_ok());
    }

    #[test]
    fn test_announcement_serialization() {
        let secret = Secret::random().unwrap();
        let announcement = CommitAnnouncement {
            session_id: SessionId::new(),
            commitment: Commitment::new(&secret, b"rock"),
        };

        let json = serde_json::to_string(&announcement).unwrap();
        let deserialized: CommitAnnouncement = serde_json::from_str(&json).unwrap();

        assert_eq!(announcement.session_id, deserialized.session_id);
        assert_eq!(announcement.commitment, deserialized.commitment);
    }
}
