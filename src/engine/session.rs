use super::eligibility::eligible_participants;
use super::ledger::{DrawLedger, DrawOutcome};
use super::sampler::RandomSource;
use super::tags::{TagDictionary, normalize_tags};
use super::DrawError;
use crate::models::{DrawRecord, Participant, Prize};

/// 抽奖会话: 名单、奖项、标签字典、当前选择的奖项与账本的聚合
pub struct Session {
    participants: Vec<Participant>,
    ledger: DrawLedger,
    tags: TagDictionary,
    selected_prize_id: Option<String>,
    rng: Box<dyn RandomSource>,
    halted: bool,
}

impl Session {
    pub fn new(rng: Box<dyn RandomSource>) -> Self {
        Self {
            participants: Vec::new(),
            ledger: DrawLedger::default(),
            tags: TagDictionary::new(),
            selected_prize_id: None,
            rng,
            halted: false,
        }
    }

    /// 整体替换参与者名单，并重置会话（含奖项选择）
    pub fn load_participants(&mut self, participants: Vec<Participant>) {
        self.participants = participants;
        self.rebuild_tags();
        self.reset();
        self.selected_prize_id = None;
    }

    /// 整体替换奖项，并重置会话（含奖项选择）
    pub fn load_prizes(&mut self, prizes: Vec<Prize>) {
        self.ledger = DrawLedger::new(prizes);
        self.rebuild_tags();
        self.reset();
        self.selected_prize_id = None;
    }

    fn rebuild_tags(&mut self) {
        let participant_tags = self
            .participants
            .iter()
            .flat_map(|p| p.tags.iter().map(String::as_str));
        let prize_tags = self
            .ledger
            .prizes()
            .iter()
            .flat_map(|p| p.tags.iter().map(String::as_str));
        self.tags = TagDictionary::rebuild(participant_tags.chain(prize_tags));
    }

    /// 选择奖项；已抽完的奖项不可选，`None` 取消选择
    pub fn select_prize(&mut self, prize_id: Option<&str>) -> Result<(), DrawError> {
        let Some(prize_id) = prize_id else {
            self.selected_prize_id = None;
            return Ok(());
        };
        let prize = self
            .ledger
            .prize(prize_id)
            .ok_or_else(|| DrawError::UnknownPrize {
                prize_id: prize_id.to_string(),
            })?;
        if prize.remaining() == 0 {
            return Err(DrawError::PrizeDepleted {
                prize_id: prize_id.to_string(),
            });
        }
        self.selected_prize_id = Some(prize_id.to_string());
        Ok(())
    }

    /// 对当前选择的奖项抽奖
    ///
    /// 出现内部一致性错误时会话进入暂停状态，此后的抽奖返回 `SessionHalted`，
    /// 直到重置或重新导入。
    pub fn draw<S: AsRef<str>>(
        &mut self,
        extra_filter_tags: &[S],
        bulk: bool,
    ) -> Result<DrawOutcome, DrawError> {
        if self.halted {
            return Err(DrawError::SessionHalted);
        }
        let extra = normalize_tags(extra_filter_tags);
        let result = self.ledger.draw(
            &self.participants,
            self.selected_prize_id.as_deref(),
            &extra,
            bulk,
            self.rng.as_mut(),
        );
        if let Err(e) = &result
            && e.is_fatal()
        {
            self.halted = true;
        }
        result
    }

    /// 当前选择奖项在给定额外标签下的候选名单（不改变状态）
    pub fn eligible_pool<S: AsRef<str>>(
        &self,
        extra_filter_tags: &[S],
    ) -> Result<(&Prize, Vec<String>, Vec<&Participant>), DrawError> {
        let prize = self.selected_prize().ok_or(DrawError::NoPrizeSelected)?;
        let extra = normalize_tags(extra_filter_tags);
        let required = normalize_tags(prize.normalized_tags.iter().chain(&extra));
        let eligible =
            eligible_participants(&self.participants, self.ledger.winner_ids(), &required);
        Ok((prize, required, eligible))
    }

    /// 清空抽奖结果；保留名单、奖项与当前选择
    pub fn reset(&mut self) {
        self.ledger.reset();
        self.halted = false;
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, participant_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == participant_id)
    }

    pub fn prizes(&self) -> &[Prize] {
        self.ledger.prizes()
    }

    pub fn prize(&self, prize_id: &str) -> Option<&Prize> {
        self.ledger.prize(prize_id)
    }

    pub fn selected_prize_id(&self) -> Option<&str> {
        self.selected_prize_id.as_deref()
    }

    pub fn selected_prize(&self) -> Option<&Prize> {
        self.selected_prize_id
            .as_deref()
            .and_then(|id| self.ledger.prize(id))
    }

    pub fn history(&self) -> &[DrawRecord] {
        self.ledger.history()
    }

    pub fn winner_count(&self) -> usize {
        self.ledger.winner_count()
    }

    pub fn total_quantity(&self) -> u64 {
        self.ledger.total_quantity()
    }

    pub fn total_remaining(&self) -> u64 {
        self.ledger.total_remaining()
    }

    pub fn tags(&self) -> &TagDictionary {
        &self.tags
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// 仍有未中奖者、仍有剩余名额，且所选奖项可抽
    pub fn can_draw(&self) -> bool {
        let has_participants = self.participants.len() > self.winner_count();
        let has_prize = self.total_remaining() > 0;
        let prize_available = self.selected_prize().is_some_and(|p| p.remaining() > 0);
        !self.halted && has_participants && has_prize && prize_available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SeededRandom;
    use crate::engine::sampler::tests::ScriptedRandom;
    use crate::models::PrizeState;

    fn roster() -> Vec<Participant> {
        vec![
            Participant::new("participant-0".into(), "Alice".into(), vec!["VIP".into()]),
            Participant::new("participant-1".into(), "Bob".into(), vec![]),
            Participant::new(
                "participant-2".into(),
                "Carol".into(),
                vec!["vip".into(), "Staff".into()],
            ),
        ]
    }

    fn prizes() -> Vec<Prize> {
        vec![
            Prize::new("prize-0".into(), "Grand".into(), 1, vec!["Vip".into()]),
            Prize::new("prize-1".into(), "Mug".into(), 2, vec![]),
        ]
    }

    fn session() -> Session {
        let mut session = Session::new(Box::new(SeededRandom::new(11)));
        session.load_participants(roster());
        session.load_prizes(prizes());
        session
    }

    const NO_TAGS: &[&str] = &[];

    #[test]
    fn test_draw_requires_selection() {
        let mut session = session();
        assert_eq!(
            session.draw(NO_TAGS, false).unwrap_err(),
            DrawError::NoPrizeSelected
        );
        assert!(!session.can_draw());
    }

    #[test]
    fn test_select_unknown_and_depleted_prize() {
        let mut session = session();
        assert_eq!(
            session.select_prize(Some("prize-7")).unwrap_err(),
            DrawError::UnknownPrize {
                prize_id: "prize-7".into()
            }
        );

        session.select_prize(Some("prize-0")).unwrap();
        session.draw(NO_TAGS, false).unwrap();
        assert_eq!(
            session.select_prize(Some("prize-0")).unwrap_err(),
            DrawError::PrizeDepleted {
                prize_id: "prize-0".into()
            }
        );

        session.select_prize(None).unwrap();
        assert_eq!(session.selected_prize_id(), None);
    }

    #[test]
    fn test_tag_dictionary_rebuilt_on_load() {
        let session = session();
        let entries: Vec<(&str, &str)> = session.tags().iter().collect();
        assert_eq!(entries, vec![("vip", "VIP"), ("staff", "Staff")]);
    }

    #[test]
    fn test_extra_filter_tags_are_normalized() {
        let mut session = Session::new(Box::new(ScriptedRandom::new(vec![0])));
        session.load_participants(roster());
        session.load_prizes(prizes());
        session.select_prize(Some("prize-0")).unwrap();

        let (_, required, pool) = session.eligible_pool(&[" STAFF ", ""]).unwrap();
        assert_eq!(required, vec!["vip", "staff"]);
        assert_eq!(pool.len(), 1);

        let outcome = session.draw(&[" STAFF "], false).unwrap();
        assert_eq!(outcome.winners[0].name, "Carol");
        assert_eq!(outcome.prize.state(), PrizeState::Depleted);
    }

    #[test]
    fn test_reset_keeps_selection_but_load_clears_it() {
        let mut session = session();
        session.select_prize(Some("prize-1")).unwrap();
        session.draw(NO_TAGS, true).unwrap();
        assert_eq!(session.winner_count(), 2);

        session.reset();
        assert_eq!(session.winner_count(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.selected_prize_id(), Some("prize-1"));
        assert!(session.prizes().iter().all(|p| p.state() == PrizeState::Open));

        session.load_participants(roster());
        assert_eq!(session.selected_prize_id(), None);
    }

    #[test]
    fn test_can_draw_tracks_remaining_participants() {
        let mut session = Session::new(Box::new(SeededRandom::new(3)));
        session.load_participants(vec![Participant::new(
            "participant-0".into(),
            "Solo".into(),
            vec![],
        )]);
        session.load_prizes(prizes());
        session.select_prize(Some("prize-1")).unwrap();
        assert!(session.can_draw());

        session.draw(NO_TAGS, false).unwrap();
        assert!(!session.can_draw());
        assert_eq!(
            session.draw(NO_TAGS, false).unwrap_err(),
            DrawError::NoEligibleParticipants
        );
        assert!(!session.is_halted());
    }

    /// 两个参与者共用同一 id，批次抽奖时提交阶段会检测到重复中奖
    fn halted_session() -> Session {
        let mut session = Session::new(Box::new(ScriptedRandom::new(vec![0, 0])));
        session.load_participants(vec![
            Participant::new("participant-0".into(), "Alice".into(), vec![]),
            Participant::new("participant-0".into(), "Alice (dup)".into(), vec![]),
            Participant::new("participant-2".into(), "Carol".into(), vec![]),
        ]);
        session.load_prizes(vec![Prize::new(
            "prize-0".into(),
            "Mug".into(),
            2,
            vec![],
        )]);
        session.select_prize(Some("prize-0")).unwrap();

        let err = session.draw(NO_TAGS, true).unwrap_err();
        assert_eq!(
            err,
            DrawError::DuplicateWinnerInvariantViolation {
                participant_id: "participant-0".into()
            }
        );
        session
    }

    #[test]
    fn test_fatal_error_halts_until_reset() {
        let mut session = halted_session();
        assert!(session.is_halted());
        assert!(!session.can_draw());
        assert_eq!(session.winner_count(), 0);
        assert!(session.history().is_empty());

        assert_eq!(
            session.draw(NO_TAGS, false).unwrap_err(),
            DrawError::SessionHalted
        );
        assert_eq!(session.winner_count(), 0);

        session.reset();
        assert!(!session.is_halted());
        assert!(session.can_draw());
        let outcome = session.draw(NO_TAGS, false).unwrap();
        assert_eq!(outcome.winners.len(), 1);
    }

    #[test]
    fn test_reload_clears_halt() {
        let mut session = halted_session();
        session.load_participants(roster());
        assert!(!session.is_halted());

        let mut session = halted_session();
        session.load_prizes(prizes());
        assert!(!session.is_halted());
        session.select_prize(Some("prize-1")).unwrap();
        assert!(session.draw(NO_TAGS, false).is_ok());
    }
}
