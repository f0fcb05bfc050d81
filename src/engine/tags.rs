//! 标签规范化与展示字典

use std::collections::HashMap;

/// 规范化标签: 去除首尾空白并转小写，作为所有比较的键
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// 规范化一组标签: 丢弃空键，去重并保持首次出现的顺序
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut keys: Vec<String> = Vec::new();
    for tag in tags {
        let key = normalize_tag(tag.as_ref());
        if !key.is_empty() && !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// 规范化键 -> 首次出现的展示形式（保持插入顺序）
#[derive(Debug, Clone, Default)]
pub struct TagDictionary {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl TagDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从参与者与奖品的展示标签重建字典（先参与者，后奖品）
    pub fn rebuild<'a, I>(tags: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut dictionary = Self::new();
        for tag in tags {
            dictionary.register(tag);
        }
        dictionary
    }

    /// 登记标签；同一规范化键只保留第一次出现的展示形式
    pub fn register(&mut self, tag: &str) {
        let key = normalize_tag(tag);
        if key.is_empty() || self.index.contains_key(&key) {
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, tag.trim().to_string()));
    }

    /// 返回展示形式；未登记时回退为键本身
    pub fn display_for<'a>(&'a self, key: &'a str) -> &'a str {
        self.index
            .get(key)
            .map(|&i| self.entries[i].1.as_str())
            .unwrap_or(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序遍历 (key, display)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d.as_str()))
    }
}
