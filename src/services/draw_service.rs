use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};

use crate::config::DrawConfig;
use crate::engine::{RandomSource, Session, random_source};
use crate::error::{AppError, AppResult};
use crate::models::{
    DrawRequest, DrawResponse, EligiblePoolResponse, EligibleQuery, HistoryEntryResponse,
    HistoryQuery, LoadParticipantsRequest, LoadParticipantsResponse, LoadPrizesRequest,
    LoadPrizesResponse, ParticipantResponse, PrizeListResponse, PrizeResponse,
    SelectPrizeRequest, SessionStatusResponse, TagListResponse, TagResponse,
};
use crate::services::import_service;
use crate::utils::{PaginatedResponse, PaginationParams};

/// 抽奖服务
///
/// 会话由互斥锁保护；另有一把"抽奖闸门"保证同一时间只有一次抽奖（含结果揭晓延迟）
/// 在进行，期间的抽奖、重置、名单导入请求直接返回 `DrawInProgress`。
#[derive(Clone)]
pub struct DrawService {
    session: Arc<Mutex<Session>>,
    draw_gate: Arc<Mutex<()>>,
    reveal_delay: Duration,
}

impl DrawService {
    pub fn new(config: &DrawConfig) -> Self {
        Self::with_random_source(
            random_source(config.rng_seed),
            Duration::from_millis(config.reveal_delay_ms),
        )
    }

    pub fn with_random_source(rng: Box<dyn RandomSource>, reveal_delay: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new(rng))),
            draw_gate: Arc::new(Mutex::new(())),
            reveal_delay,
        }
    }

    fn enter_gate(&self) -> AppResult<MutexGuard<'_, ()>> {
        self.draw_gate
            .try_lock()
            .map_err(|_| AppError::DrawInProgress)
    }

    /// 导入参与者名单（整体替换并重置会话）
    pub async fn load_participants(
        &self,
        request: LoadParticipantsRequest,
    ) -> AppResult<LoadParticipantsResponse> {
        let participants = import_service::parse_participants(&request.participants)?;
        let _gate = self.enter_gate()?;
        let mut session = self.session.lock().await;
        session.load_participants(participants);

        let mut seen = HashSet::new();
        let tags: Vec<String> = session
            .participants()
            .iter()
            .flat_map(|p| p.tags.iter())
            .filter(|t| seen.insert(t.as_str()))
            .cloned()
            .collect();

        log::info!(
            "Loaded {} participants ({} distinct tags)",
            session.participants().len(),
            tags.len()
        );
        Ok(LoadParticipantsResponse {
            count: session.participants().len(),
            tags,
        })
    }

    /// 导入奖项（整体替换并重置会话）
    pub async fn load_prizes(&self, request: LoadPrizesRequest) -> AppResult<LoadPrizesResponse> {
        let prizes = import_service::parse_prizes(&request.prizes)?;
        let _gate = self.enter_gate()?;
        let mut session = self.session.lock().await;
        session.load_prizes(prizes);

        log::info!(
            "Loaded {} prizes, {} slots in total",
            session.prizes().len(),
            session.total_quantity()
        );
        Ok(LoadPrizesResponse {
            count: session.prizes().len(),
            total_quantity: session.total_quantity(),
        })
    }

    /// 标签字典（筛选项按展示文字排序）
    pub async fn list_tags(&self) -> TagListResponse {
        let session = self.session.lock().await;
        let mut tags: Vec<TagResponse> = session
            .tags()
            .iter()
            .map(|(key, display)| TagResponse {
                key: key.to_string(),
                display: display.to_string(),
            })
            .collect();
        tags.sort_by(|a, b| a.display.cmp(&b.display));

        let mut seen = HashSet::new();
        let participant_tags = session
            .participants()
            .iter()
            .flat_map(|p| p.tags.iter())
            .filter(|t| seen.insert(t.as_str()))
            .cloned()
            .collect();

        TagListResponse {
            tags,
            participant_tags,
        }
    }

    pub async fn list_prizes(&self) -> PrizeListResponse {
        let session = self.session.lock().await;
        PrizeListResponse {
            prizes: session.prizes().iter().map(PrizeResponse::from).collect(),
            total_quantity: session.total_quantity(),
            total_remaining: session.total_remaining(),
            selected_prize_id: session.selected_prize_id().map(str::to_string),
        }
    }

    pub async fn select_prize(
        &self,
        request: SelectPrizeRequest,
    ) -> AppResult<Option<PrizeResponse>> {
        let mut session = self.session.lock().await;
        session.select_prize(request.prize_id.as_deref())?;
        let selected = session.selected_prize().map(PrizeResponse::from);
        log::debug!("Selected prize: {:?}", session.selected_prize_id());
        Ok(selected)
    }

    /// 当前奖项在额外标签下的候选名单（不改变状态）
    ///
    /// `tags` 仅按逗号分隔，与抽奖请求中的 `extra_filter_tags` 得到同一组键。
    pub async fn eligible_pool(&self, query: EligibleQuery) -> AppResult<EligiblePoolResponse> {
        let extra: Vec<&str> = query
            .tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let session = self.session.lock().await;
        let (prize, required, pool) = session.eligible_pool(extra.as_slice())?;

        Ok(EligiblePoolResponse {
            prize_id: prize.id.clone(),
            count: pool.len(),
            names: pool.iter().map(|p| p.name.clone()).collect(),
            filter_tags: required
                .iter()
                .map(|key| session.tags().display_for(key).to_string())
                .collect(),
        })
    }

    /// 抽奖
    ///
    /// 计算与提交同步完成；揭晓延迟在提交之后、闸门释放之前进行，只推迟响应。
    pub async fn draw(&self, request: DrawRequest) -> AppResult<DrawResponse> {
        let _gate = self.enter_gate()?;

        let response = {
            let mut session = self.session.lock().await;
            let outcome = session
                .draw(request.extra_filter_tags.as_slice(), request.bulk)
                .inspect_err(|e| {
                    if e.is_fatal() {
                        log::error!("Halting draw session: {e}");
                    }
                })?;

            let filter_tags: Vec<String> = outcome
                .applied_tags
                .iter()
                .map(|key| session.tags().display_for(key).to_string())
                .collect();
            log::info!(
                "Drew {} winner(s) for {} ({}/{}), filter tags: {:?}",
                outcome.winners.len(),
                outcome.prize.name,
                outcome.prize.awarded,
                outcome.prize.quota,
                filter_tags
            );

            DrawResponse {
                winners: outcome.winners.iter().map(ParticipantResponse::from).collect(),
                prize: PrizeResponse::from(&outcome.prize),
                filter_tags,
                timestamp: outcome.timestamp,
            }
        };

        if !self.reveal_delay.is_zero() {
            tokio::time::sleep(self.reveal_delay).await;
        }
        Ok(response)
    }

    pub async fn status(&self) -> SessionStatusResponse {
        let session = self.session.lock().await;
        SessionStatusResponse {
            participant_count: session.participants().len(),
            winner_count: session.winner_count(),
            prize_count: session.prizes().len(),
            total_quantity: session.total_quantity(),
            total_remaining: session.total_remaining(),
            selected_prize_id: session.selected_prize_id().map(str::to_string),
            can_draw: session.can_draw(),
            halted: session.is_halted(),
        }
    }

    /// 抽奖记录（最新在前，分页）
    pub async fn history(&self, query: HistoryQuery) -> PaginatedResponse<HistoryEntryResponse> {
        let params = PaginationParams::new(query.page, query.per_page);
        let session = self.session.lock().await;

        let entries = session.history().iter().rev().map(|record| {
            let winner = session.participant(&record.winner_id);
            HistoryEntryResponse {
                winner_id: record.winner_id.clone(),
                winner: winner
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| record.winner_id.clone()),
                prize_id: record.prize_id.clone(),
                prize: session
                    .prize(&record.prize_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| record.prize_id.clone()),
                filter_tags: record
                    .filter_tags
                    .iter()
                    .map(|key| session.tags().display_for(key).to_string())
                    .collect(),
                participant_tags: winner.map(|p| p.tags.clone()).unwrap_or_default(),
                timestamp: record.timestamp,
            }
        });
        PaginatedResponse::from_items(entries, &params)
    }

    /// 重置抽奖结果（保留名单、奖项与当前选择）
    pub async fn reset(&self) -> AppResult<SessionStatusResponse> {
        {
            let _gate = self.enter_gate()?;
            let mut session = self.session.lock().await;
            session.reset();
            log::info!("Draw session reset");
        }
        Ok(self.status().await)
    }
}
