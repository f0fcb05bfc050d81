use std::collections::HashSet;

use crate::models::Participant;

/// 计算可参与抽奖的名单
///
/// 条件: 尚未中奖，且标签集合包含 `required_tags` 中的全部键（为空时不限）。
/// 输出保持原名单顺序。
pub fn eligible_participants<'a>(
    participants: &'a [Participant],
    winner_ids: &HashSet<String>,
    required_tags: &[String],
) -> Vec<&'a Participant> {
    participants
        .iter()
        .filter(|p| !winner_ids.contains(&p.id))
        .filter(|p| p.has_all_tags(required_tags))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(index: usize, name: &str, tags: &[&str]) -> Participant {
        Participant::new(
            format!("participant-{index}"),
            name.to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    fn keys(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tagged_participant_is_eligible() {
        let roster = vec![participant(0, "Alice", &["VIP"]), participant(1, "Bob", &[])];
        let eligible = eligible_participants(&roster, &HashSet::new(), &keys(&["vip"]));
        let names: Vec<&str> = eligible.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice"]);
    }

    #[test]
    fn test_empty_requirement_is_unrestricted() {
        let roster = vec![participant(0, "Alice", &["vip"]), participant(1, "Bob", &[])];
        let eligible = eligible_participants(&roster, &HashSet::new(), &[]);
        assert_eq!(eligible.len(), 2);
    }

    #[test]
    fn test_compound_filter_requires_superset() {
        let roster = vec![
            participant(0, "Alice", &["vip"]),
            participant(1, "Bob", &["vip", "staff"]),
            participant(2, "Carol", &["Staff", "VIP", "remote"]),
            participant(3, "Dan", &["staff"]),
        ];
        let eligible = eligible_participants(&roster, &HashSet::new(), &keys(&["vip", "staff"]));
        let names: Vec<&str> = eligible.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Carol"]);
    }

    #[test]
    fn test_winners_are_excluded_and_order_is_stable() {
        let roster = vec![
            participant(0, "Alice", &[]),
            participant(1, "Bob", &[]),
            participant(2, "Carol", &[]),
        ];
        let winners: HashSet<String> = ["participant-1".to_string()].into_iter().collect();
        let eligible = eligible_participants(&roster, &winners, &[]);
        let ids: Vec<&str> = eligible.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["participant-0", "participant-2"]);
    }
}
