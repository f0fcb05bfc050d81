//! 抽奖账本: 持有全部可变状态（各奖项已抽数、中奖者集合、抽奖记录），
//! 以全有或全无的方式提交抽奖结果。

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::eligibility::eligible_participants;
use super::sampler::{RandomSource, pick_many, pick_one};
use super::tags::normalize_tags;
use super::DrawError;
use crate::models::{DrawRecord, Participant, Prize};

/// 一次成功提交的抽奖结果
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    pub winners: Vec<Participant>,
    /// 提交后的奖品快照
    pub prize: Prize,
    /// 先奖品标签，后额外筛选标签，去重
    pub applied_tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct DrawLedger {
    prizes: Vec<Prize>,
    winner_ids: HashSet<String>,
    history: Vec<DrawRecord>,
}

impl DrawLedger {
    /// 以新的奖品列表建立账本，已抽数全部归零
    pub fn new(prizes: Vec<Prize>) -> Self {
        let mut ledger = Self {
            prizes,
            ..Default::default()
        };
        ledger.reset();
        ledger
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn prize(&self, prize_id: &str) -> Option<&Prize> {
        self.prizes.iter().find(|p| p.id == prize_id)
    }

    pub fn winner_ids(&self) -> &HashSet<String> {
        &self.winner_ids
    }

    pub fn winner_count(&self) -> usize {
        self.winner_ids.len()
    }

    /// 按提交顺序排列的抽奖记录
    pub fn history(&self) -> &[DrawRecord] {
        &self.history
    }

    pub fn total_quantity(&self) -> u64 {
        self.prizes.iter().map(|p| u64::from(p.quota)).sum()
    }

    pub fn total_remaining(&self) -> u64 {
        self.prizes.iter().map(|p| u64::from(p.remaining())).sum()
    }

    /// 抽奖
    ///
    /// 流程:
    /// 1. 解析奖项
    /// 2. 检查剩余名额
    /// 3. 合并奖品标签与额外筛选标签
    /// 4. 计算候选名单
    /// 5. 批次模式下候选人数必须覆盖全部剩余名额
    /// 6. 随机抽取
    /// 7. 原子提交
    ///
    /// 第 1-6 步失败时账本不发生任何变化。
    pub fn draw(
        &mut self,
        participants: &[Participant],
        prize_id: Option<&str>,
        extra_filter_tags: &[String],
        bulk: bool,
        rng: &mut dyn RandomSource,
    ) -> Result<DrawOutcome, DrawError> {
        let prize_index = prize_id
            .and_then(|id| self.prizes.iter().position(|p| p.id == id))
            .ok_or(DrawError::NoPrizeSelected)?;
        let prize = &self.prizes[prize_index];

        let remaining = prize.remaining();
        if remaining == 0 {
            return Err(DrawError::PrizeDepleted {
                prize_id: prize.id.clone(),
            });
        }

        let required_tags = normalize_tags(prize.normalized_tags.iter().chain(extra_filter_tags));

        let eligible = eligible_participants(participants, &self.winner_ids, &required_tags);
        if eligible.is_empty() {
            return Err(DrawError::NoEligibleParticipants);
        }

        let winners = if bulk {
            if eligible.len() < remaining as usize {
                return Err(DrawError::InsufficientEligibleParticipants {
                    eligible: eligible.len(),
                    remaining,
                });
            }
            pick_many(&eligible, remaining as usize, rng)?
        } else {
            vec![pick_one(&eligible, rng)?]
        };

        let timestamp = Utc::now();
        self.commit(prize_index, &winners, &required_tags, timestamp)?;

        Ok(DrawOutcome {
            winners: winners.into_iter().cloned().collect(),
            prize: self.prizes[prize_index].clone(),
            applied_tags: required_tags,
            timestamp,
        })
    }

    /// 先校验再写入，校验失败时不做任何修改
    fn commit(
        &mut self,
        prize_index: usize,
        winners: &[&Participant],
        filter_tags: &[String],
        timestamp: DateTime<Utc>,
    ) -> Result<(), DrawError> {
        let mut batch: HashSet<&str> = HashSet::with_capacity(winners.len());
        for winner in winners {
            if self.winner_ids.contains(&winner.id) || !batch.insert(winner.id.as_str()) {
                return Err(DrawError::DuplicateWinnerInvariantViolation {
                    participant_id: winner.id.clone(),
                });
            }
        }

        let prize = &self.prizes[prize_index];
        let awarded = u32::try_from(winners.len())
            .ok()
            .and_then(|n| prize.awarded.checked_add(n))
            .filter(|&awarded| awarded <= prize.quota)
            .ok_or_else(|| DrawError::QuotaInvariantViolation {
                prize_id: prize.id.clone(),
                awarded: prize.awarded.saturating_add(winners.len() as u32),
                quota: prize.quota,
            })?;
        let prize_id = prize.id.clone();

        self.prizes[prize_index].awarded = awarded;
        for winner in winners {
            self.winner_ids.insert(winner.id.clone());
            self.history.push(DrawRecord {
                winner_id: winner.id.clone(),
                prize_id: prize_id.clone(),
                filter_tags: filter_tags.to_vec(),
                timestamp,
            });
        }
        Ok(())
    }

    /// 清空中奖者与记录，全部奖项已抽数归零
    pub fn reset(&mut self) {
        self.winner_ids.clear();
        self.history.clear();
        for prize in &mut self.prizes {
            prize.awarded = 0;
        }
    }
}
