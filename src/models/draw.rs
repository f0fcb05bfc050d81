use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ParticipantResponse, PrizeResponse};

/// 抽奖记录（只追加，创建后不可变）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub winner_id: String,
    pub prize_id: String,
    /// 本次实际使用的规范化标签: 先奖品标签，后额外筛选标签，去重
    pub filter_tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// 抽奖请求
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct DrawRequest {
    /// 一次抽完所选奖项的全部剩余名额
    #[serde(default)]
    pub bulk: bool,
    /// 额外筛选标签（大小写、空白不敏感）
    #[serde(default)]
    pub extra_filter_tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResponse {
    pub winners: Vec<ParticipantResponse>,
    /// 提交后的奖品状态
    pub prize: PrizeResponse,
    /// 条件标签（展示形式）
    pub filter_tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// 候选名单预览查询
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct EligibleQuery {
    /// 逗号分隔的额外筛选标签
    pub tags: Option<String>,
}

/// 候选名单（供滚动名单动画使用）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EligiblePoolResponse {
    pub prize_id: String,
    pub count: usize,
    pub names: Vec<String>,
    pub filter_tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryEntryResponse {
    pub winner_id: String,
    pub winner: String,
    pub prize_id: String,
    pub prize: String,
    /// 条件标签（展示形式）
    pub filter_tags: Vec<String>,
    /// 得奖者标签
    pub participant_tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct HistoryQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionStatusResponse {
    pub participant_count: usize,
    pub winner_count: usize,
    pub prize_count: usize,
    pub total_quantity: u64,
    pub total_remaining: u64,
    pub selected_prize_id: Option<String>,
    /// 当前是否可以抽奖
    pub can_draw: bool,
    /// 检测到内部不一致后会话被暂停，需重置
    pub halted: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TagResponse {
    pub key: String,
    pub display: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TagListResponse {
    /// 筛选用标签，按展示文字排序
    pub tags: Vec<TagResponse>,
    /// 参与者名单中的标签，首次出现顺序
    pub participant_tags: Vec<String>,
}
