//! 导入记录 -> 引擎记录
//!
//! 身份按提交列表中的位置生成 (`participant-{row}` / `prize-{row}`)，
//! 名称为空的行跳过但仍占用行号。

use crate::error::{AppError, AppResult};
use crate::models::{Participant, ParticipantRecord, Prize, PrizeRecord};
use crate::utils::{cell_link, cell_text, parse_quantity, split_tags};

pub fn parse_participants(records: &[ParticipantRecord]) -> AppResult<Vec<Participant>> {
    let participants: Vec<Participant> = records
        .iter()
        .enumerate()
        .filter_map(|(row, record)| {
            let name = cell_text(&record.name);
            if name.is_empty() {
                return None;
            }
            Some(Participant::new(
                format!("participant-{row}"),
                name,
                split_tags(&record.tags),
            ))
        })
        .collect();

    if participants.is_empty() {
        return Err(AppError::ValidationError(
            "No valid participant records found".into(),
        ));
    }
    Ok(participants)
}

pub fn parse_prizes(records: &[PrizeRecord]) -> AppResult<Vec<Prize>> {
    let prizes: Vec<Prize> = records
        .iter()
        .enumerate()
        .filter_map(|(row, record)| {
            let name = cell_text(&record.name);
            if name.is_empty() {
                return None;
            }
            let image_url = record
                .image_url
                .as_ref()
                .map(cell_link)
                .filter(|url| !url.is_empty());
            Some(
                Prize::new(
                    format!("prize-{row}"),
                    name,
                    parse_quantity(record.quantity.as_ref()),
                    split_tags(&record.tags),
                )
                .with_image_url(image_url),
            )
        })
        .collect();

    if prizes.is_empty() {
        return Err(AppError::ValidationError(
            "No valid prize records found".into(),
        ));
    }
    Ok(prizes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn participant_records(value: serde_json::Value) -> Vec<ParticipantRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn prize_records(value: serde_json::Value) -> Vec<PrizeRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_participants_skips_blank_names() {
        let records = participant_records(json!([
            { "name": " Alice ", "tags": "VIP, Staff" },
            { "name": "", "tags": "VIP" },
            { "name": "Bob" },
            { "name": 1024, "tags": ["Remote"] }
        ]));
        let participants = parse_participants(&records).unwrap();

        let ids: Vec<&str> = participants.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["participant-0", "participant-2", "participant-3"]);
        assert_eq!(participants[0].name, "Alice");
        assert_eq!(participants[0].tags, vec!["VIP", "Staff"]);
        assert!(participants[1].tags.is_empty());
        assert_eq!(participants[2].name, "1024");
    }

    #[test]
    fn test_parse_participants_rejects_empty_roster() {
        let records = participant_records(json!([{ "name": "  " }]));
        assert!(matches!(
            parse_participants(&records),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_parse_prizes_quantity_defaults() {
        let records = prize_records(json!([
            { "name": "Grand", "quantity": 3, "tags": "VIP" },
            { "name": "Mug", "quantity": "many" },
            { "name": "Pen" },
            { "name": "Cap", "quantity": "2 份", "image_url": " https://example.com/cap.png " }
        ]));
        let prizes = parse_prizes(&records).unwrap();

        let quotas: Vec<u32> = prizes.iter().map(|p| p.quota).collect();
        assert_eq!(quotas, vec![3, 1, 1, 2]);
        assert_eq!(prizes[0].normalized_tags, vec!["vip"]);
        assert!(prizes.iter().all(|p| p.awarded == 0));
        assert_eq!(
            prizes[3].image_url.as_deref(),
            Some("https://example.com/cap.png")
        );
    }

    #[test]
    fn test_parse_prizes_reads_hyperlink_image_cells() {
        let records = prize_records(json!([
            { "name": "Cap", "image_url": { "text": "cap", "hyperlink": "https://example.com/cap.png" } },
            { "name": "Mug", "image_url": { "formula": "=A1" } }
        ]));
        let prizes = parse_prizes(&records).unwrap();
        assert_eq!(
            prizes[0].image_url.as_deref(),
            Some("https://example.com/cap.png")
        );
        assert_eq!(prizes[1].image_url, None);
    }

    #[test]
    fn test_parse_prizes_rejects_empty_list() {
        assert!(parse_prizes(&[]).is_err());
    }
}
