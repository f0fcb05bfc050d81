use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::normalize_tags;

/// 奖品状态: 仍有名额 / 已抽完
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PrizeState {
    Open,
    Depleted,
}

/// 奖品
///
/// `awarded` 只由 `DrawLedger` 修改，且始终满足 `awarded <= quota`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prize {
    pub id: String,
    pub name: String,
    pub quota: u32,
    pub awarded: u32,
    pub tags: Vec<String>,
    /// 去重后的规范化键，保持导入顺序
    pub normalized_tags: Vec<String>,
    /// 仅用于展示
    pub image_url: Option<String>,
}

impl Prize {
    pub fn new(id: String, name: String, quota: u32, tags: Vec<String>) -> Self {
        let normalized_tags = normalize_tags(&tags);
        Self {
            id,
            name,
            quota,
            awarded: 0,
            tags,
            normalized_tags,
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    pub fn remaining(&self) -> u32 {
        self.quota.saturating_sub(self.awarded)
    }

    pub fn state(&self) -> PrizeState {
        if self.remaining() == 0 {
            PrizeState::Depleted
        } else {
            PrizeState::Open
        }
    }
}

/// 导入用的奖品记录
///
/// `quantity` 缺失、非数字或不大于 0 时按 1 处理。
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PrizeRecord {
    #[schema(value_type = String)]
    pub name: serde_json::Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub quantity: Option<serde_json::Value>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub tags: serde_json::Value,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoadPrizesRequest {
    pub prizes: Vec<PrizeRecord>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoadPrizesResponse {
    /// 奖项数量
    pub count: usize,
    /// 总份数
    pub total_quantity: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    pub id: String,
    pub name: String,
    pub quota: u32,
    pub awarded: u32,
    pub remaining: u32,
    pub tags: Vec<String>,
    pub state: PrizeState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<&Prize> for PrizeResponse {
    fn from(p: &Prize) -> Self {
        PrizeResponse {
            id: p.id.clone(),
            name: p.name.clone(),
            quota: p.quota,
            awarded: p.awarded,
            remaining: p.remaining(),
            tags: p.tags.clone(),
            state: p.state(),
            image_url: p.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeListResponse {
    pub prizes: Vec<PrizeResponse>,
    pub total_quantity: u64,
    pub total_remaining: u64,
    pub selected_prize_id: Option<String>,
}

/// 选择奖项；`prize_id` 为空表示取消选择
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SelectPrizeRequest {
    #[serde(default)]
    pub prize_id: Option<String>,
}
