use thiserror::Error;

/// 抽奖引擎错误
///
/// 除两个 `*InvariantViolation` 外，全部是在任何状态变更之前检测到的前置条件失败，
/// 调用方调整输入后即可重试。`SessionHalted` 需要先重置会话。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("No prize selected")]
    NoPrizeSelected,

    #[error("Session halted after an internal consistency failure; reset required")]
    SessionHalted,

    #[error("Unknown prize: {prize_id}")]
    UnknownPrize { prize_id: String },

    #[error("Prize {prize_id} has no remaining slots")]
    PrizeDepleted { prize_id: String },

    #[error("No eligible participants for the current filter")]
    NoEligibleParticipants,

    #[error("Only {eligible} eligible participants for {remaining} remaining slots")]
    InsufficientEligibleParticipants { eligible: usize, remaining: u32 },

    #[error("Cannot pick from an empty pool")]
    EmptyPool,

    #[error("Cannot pick {requested} from a pool of {available}")]
    InsufficientPool { requested: usize, available: usize },

    #[error("Participant {participant_id} has already won")]
    DuplicateWinnerInvariantViolation { participant_id: String },

    #[error("Prize {prize_id} would exceed its quota ({awarded}/{quota})")]
    QuotaInvariantViolation {
        prize_id: String,
        awarded: u32,
        quota: u32,
    },
}

impl DrawError {
    /// 内部一致性被破坏，应当中止会话而不是重试
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DrawError::DuplicateWinnerInvariantViolation { .. }
                | DrawError::QuotaInvariantViolation { .. }
        )
    }

    pub fn code(&self) -> &'static str {
        match self {
            DrawError::NoPrizeSelected => "NO_PRIZE_SELECTED",
            DrawError::SessionHalted => "SESSION_HALTED",
            DrawError::UnknownPrize { .. } => "UNKNOWN_PRIZE",
            DrawError::PrizeDepleted { .. } => "PRIZE_DEPLETED",
            DrawError::NoEligibleParticipants => "NO_ELIGIBLE_PARTICIPANTS",
            DrawError::InsufficientEligibleParticipants { .. } => {
                "INSUFFICIENT_ELIGIBLE_PARTICIPANTS"
            }
            DrawError::EmptyPool => "EMPTY_POOL",
            DrawError::InsufficientPool { .. } => "INSUFFICIENT_POOL",
            DrawError::DuplicateWinnerInvariantViolation { .. } => "DUPLICATE_WINNER",
            DrawError::QuotaInvariantViolation { .. } => "QUOTA_EXCEEDED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_kinds() {
        assert!(
            DrawError::DuplicateWinnerInvariantViolation {
                participant_id: "participant-0".into()
            }
            .is_fatal()
        );
        assert!(
            DrawError::QuotaInvariantViolation {
                prize_id: "prize-0".into(),
                awarded: 2,
                quota: 1
            }
            .is_fatal()
        );
        assert!(!DrawError::NoEligibleParticipants.is_fatal());
        assert!(!DrawError::SessionHalted.is_fatal());
        assert!(!DrawError::PrizeDepleted { prize_id: "prize-0".into() }.is_fatal());
    }
}
