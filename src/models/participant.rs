use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::normalize_tag;

/// 参与者（导入后不可变）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub name: String,
    /// 展示用标签，保持导入顺序
    pub tags: Vec<String>,
    pub normalized_tags: HashSet<String>,
}

impl Participant {
    pub fn new(id: String, name: String, tags: Vec<String>) -> Self {
        let normalized_tags = tags
            .iter()
            .map(|t| normalize_tag(t))
            .filter(|t| !t.is_empty())
            .collect();
        Self {
            id,
            name,
            tags,
            normalized_tags,
        }
    }

    /// 是否具备全部要求的标签（空键忽略）
    pub fn has_all_tags(&self, required: &[String]) -> bool {
        required
            .iter()
            .filter(|tag| !tag.is_empty())
            .all(|tag| self.normalized_tags.contains(tag))
    }
}

/// 导入用的参与者记录
///
/// `tags` 可以是字符串数组，也可以是以空白、逗号、分号、顿号分隔的文本。
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ParticipantRecord {
    #[schema(value_type = String)]
    pub name: serde_json::Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub tags: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoadParticipantsRequest {
    pub participants: Vec<ParticipantRecord>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoadParticipantsResponse {
    /// 有效参与者数量
    pub count: usize,
    /// 名单中出现过的标签（展示形式，首次出现顺序）
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantResponse {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
}

impl From<&Participant> for ParticipantResponse {
    fn from(p: &Participant) -> Self {
        ParticipantResponse {
            id: p.id.clone(),
            name: p.name.clone(),
            tags: p.tags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_normalizes_tags() {
        let p = Participant::new(
            "participant-0".into(),
            "Alice".into(),
            vec![" VIP".into(), "Staff ".into()],
        );
        assert!(p.normalized_tags.contains("vip"));
        assert!(p.normalized_tags.contains("staff"));
        assert_eq!(p.tags, vec![" VIP".to_string(), "Staff ".to_string()]);
    }

    #[test]
    fn test_has_all_tags() {
        let p = Participant::new("participant-0".into(), "Alice".into(), vec!["vip".into()]);
        assert!(p.has_all_tags(&["vip".to_string()]));
        assert!(!p.has_all_tags(&["vip".to_string(), "staff".to_string()]));
        assert!(p.has_all_tags(&[]));
    }
}
