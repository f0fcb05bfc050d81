//! 导入记录的单元格值解析

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// 标签分隔符: 空白、逗号、分号、全角逗号、顿号
fn tag_separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"[\s,;，、]+").expect("valid tag separator regex"))
}

/// 单元格值转文本并去除首尾空白（null 视为空）
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => String::new(),
    }
}

/// 链接单元格: 超链接对象依次取 `hyperlink` / `text` / `Target`，其余按普通文本处理
pub fn cell_link(value: &Value) -> String {
    match value {
        Value::Object(cell) => ["hyperlink", "text", "Target"]
            .iter()
            .filter_map(|key| cell.get(*key))
            .map(cell_text)
            .find(|text| !text.is_empty())
            .unwrap_or_default(),
        other => cell_text(other),
    }
}

/// 解析标签单元格: 数组逐项取文本，文本按分隔符拆分；空项丢弃
pub fn split_tags(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(cell_text)
            .filter(|t| !t.is_empty())
            .collect(),
        other => tag_separator()
            .split(&cell_text(other))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// 解析数量: 取开头的整数部分；缺失、非数字或不大于 0 时返回 1
pub fn parse_quantity(value: Option<&Value>) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => leading_integer(s),
        _ => None,
    };
    match parsed {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_tags_from_text() {
        assert_eq!(
            split_tags(&json!("VIP, Staff;Remote、主管，新人 ;  ")),
            vec!["VIP", "Staff", "Remote", "主管", "新人"]
        );
        assert_eq!(split_tags(&json!("a;b  c")), vec!["a", "b", "c"]);
        assert!(split_tags(&json!("")).is_empty());
        assert!(split_tags(&Value::Null).is_empty());
    }

    #[test]
    fn test_split_tags_from_array() {
        assert_eq!(
            split_tags(&json!([" VIP ", "", 42, "Staff"])),
            vec!["VIP", "42", "Staff"]
        );
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(Some(&json!(3))), 3);
        assert_eq!(parse_quantity(Some(&json!("5"))), 5);
        assert_eq!(parse_quantity(Some(&json!(" 3 份"))), 3);
        assert_eq!(parse_quantity(Some(&json!(2.9))), 2);
    }

    #[test]
    fn test_parse_quantity_defaults_to_one() {
        assert_eq!(parse_quantity(None), 1);
        assert_eq!(parse_quantity(Some(&Value::Null)), 1);
        assert_eq!(parse_quantity(Some(&json!("abc"))), 1);
        assert_eq!(parse_quantity(Some(&json!(0))), 1);
        assert_eq!(parse_quantity(Some(&json!("-4"))), 1);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!("  Alice ")), "Alice");
        assert_eq!(cell_text(&json!(1024)), "1024");
        assert_eq!(cell_text(&Value::Null), "");
    }

    #[test]
    fn test_cell_link_from_hyperlink_cell() {
        assert_eq!(
            cell_link(&json!({ "text": "Cap", "hyperlink": " https://example.com/cap.png " })),
            "https://example.com/cap.png"
        );
        assert_eq!(
            cell_link(&json!({ "hyperlink": "", "text": "https://example.com/mug.png" })),
            "https://example.com/mug.png"
        );
        assert_eq!(
            cell_link(&json!({ "Target": "https://example.com/pen.png" })),
            "https://example.com/pen.png"
        );
        assert_eq!(cell_link(&json!({ "formula": "=A1" })), "");
        assert_eq!(cell_link(&json!(" https://example.com/a.png ")), "https://example.com/a.png");
    }
}
