//! Fixed-tier alias data
//!
//! The curated name map, the national broadcaster ordinal table and the
//! provincial alias sets. This tier is authoritative: it always wins over the
//! learned tier and over rule-based matching.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Curated display-name → canonical identity pairs.
pub const FIXED_ALIASES: &[(&str, &str)] = &[
    ("CCTV-1", "CCTV-1综合"),
    ("CCTV1", "CCTV-1综合"),
    ("央视综合", "CCTV-1综合"),
    ("CCTV-2", "CCTV-2财经"),
    ("CCTV2", "CCTV-2财经"),
    ("央视财经", "CCTV-2财经"),
    ("CCTV-3", "CCTV-3娱乐"),
    ("CCTV3", "CCTV-3娱乐"),
    ("央视娱乐", "CCTV-3娱乐"),
    ("CCTV-4", "CCTV-4中文国际"),
    ("CCTV4", "CCTV-4中文国际"),
    ("央视中文国际", "CCTV-4中文国际"),
    ("CCTV-5", "CCTV-5体育"),
    ("CCTV5", "CCTV-5体育"),
    ("央视体育", "CCTV-5体育"),
    ("CCTV-6", "CCTV-6电影"),
    ("CCTV6", "CCTV-6电影"),
    ("央视电影", "CCTV-6电影"),
    ("CCTV-7", "CCTV-7国防军事"),
    ("CCTV7", "CCTV-7国防军事"),
    ("CCTV-8", "CCTV-8电视剧"),
    ("CCTV8", "CCTV-8电视剧"),
    ("央视电视剧", "CCTV-8电视剧"),
    ("CCTV-9", "CCTV-9纪录"),
    ("CCTV9", "CCTV-9纪录"),
    ("央视纪录", "CCTV-9纪录"),
    ("CCTV-10", "CCTV-10科教"),
    ("CCTV10", "CCTV-10科教"),
    ("央视科教", "CCTV-10科教"),
    ("CCTV-11", "CCTV-11戏曲"),
    ("CCTV11", "CCTV-11戏曲"),
    ("央视戏曲", "CCTV-11戏曲"),
    ("CCTV-12", "CCTV-12社会与法"),
    ("CCTV12", "CCTV-12社会与法"),
    ("央视社会与法", "CCTV-12社会与法"),
    ("CCTV-13", "CCTV-13新闻"),
    ("CCTV13", "CCTV-13新闻"),
    ("央视新闻", "CCTV-13新闻"),
    ("CCTV-14", "CCTV-14少儿"),
    ("CCTV14", "CCTV-14少儿"),
    ("央视少儿", "CCTV-14少儿"),
    ("CCTV-15", "CCTV-15音乐"),
    ("CCTV15", "CCTV-15音乐"),
    ("央视音乐", "CCTV-15音乐"),
];

/// Ordinal → channel label for the CCTV family. Ordinals outside this table
/// are not resolved by the numeric rule.
pub const CCTV_LABELS: &[(u32, &str)] = &[
    (1, "综合"),
    (2, "财经"),
    (3, "娱乐"),
    (4, "中文国际"),
    (5, "体育"),
    (6, "电影"),
    (7, "国防军事"),
    (8, "电视剧"),
    (9, "纪录"),
    (10, "科教"),
    (11, "戏曲"),
    (12, "社会与法"),
    (13, "新闻"),
    (14, "少儿"),
    (15, "音乐"),
];

/// Canonical display order of the national broadcaster category. Identities
/// not listed here sort after all listed ones.
pub const CCTV_ORDER: &[&str] = &[
    "CCTV-1综合",
    "CCTV-2财经",
    "CCTV-3娱乐",
    "CCTV-4中文国际",
    "CCTV-5体育",
    "CCTV-6电影",
    "CCTV-7国防军事",
    "CCTV-8电视剧",
    "CCTV-9纪录",
    "CCTV-10科教",
    "CCTV-11戏曲",
    "CCTV-12社会与法",
    "CCTV-13新闻",
    "CCTV-14少儿",
    "CCTV-15音乐",
];

/// (canonical identity, alias tokens) for provincial satellite channels.
/// Tokens are matched case-insensitively, ignoring spaces and hyphens, as
/// substrings of the cleaned display name.
pub const PROVINCE_ALIASES: &[(&str, &[&str])] = &[
    ("北京卫视", &["北京卫视", "BTV卫视"]),
    ("天津卫视", &["天津卫视"]),
    ("河北卫视", &["河北卫视"]),
    ("山西卫视", &["山西卫视"]),
    ("内蒙古卫视", &["内蒙古卫视", "内蒙卫视"]),
    ("辽宁卫视", &["辽宁卫视"]),
    ("吉林卫视", &["吉林卫视"]),
    ("黑龙江卫视", &["黑龙江卫视", "龙江卫视"]),
    ("东方卫视", &["东方卫视", "上海卫视"]),
    ("江苏卫视", &["江苏卫视"]),
    ("浙江卫视", &["浙江卫视"]),
    ("安徽卫视", &["安徽卫视"]),
    ("东南卫视", &["东南卫视", "福建卫视"]),
    ("江西卫视", &["江西卫视"]),
    ("山东卫视", &["山东卫视"]),
    ("河南卫视", &["河南卫视"]),
    ("湖北卫视", &["湖北卫视"]),
    ("湖南卫视", &["湖南卫视", "芒果台"]),
    ("广东卫视", &["广东卫视"]),
    ("广西卫视", &["广西卫视"]),
    ("海南卫视", &["海南卫视", "旅游卫视"]),
    ("重庆卫视", &["重庆卫视"]),
    ("四川卫视", &["四川卫视"]),
    ("贵州卫视", &["贵州卫视"]),
    ("云南卫视", &["云南卫视"]),
    ("西藏卫视", &["西藏卫视"]),
    ("陕西卫视", &["陕西卫视"]),
    ("甘肃卫视", &["甘肃卫视"]),
    ("青海卫视", &["青海卫视"]),
    ("宁夏卫视", &["宁夏卫视"]),
    ("新疆卫视", &["新疆卫视"]),
];

/// Lookup map over [`FIXED_ALIASES`], built once.
pub fn fixed_alias_map() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| FIXED_ALIASES.iter().copied().collect())
}

/// Label for a CCTV ordinal, if the ordinal is within the known range.
pub fn cctv_label(ordinal: u32) -> Option<&'static str> {
    CCTV_LABELS
        .iter()
        .find(|(n, _)| *n == ordinal)
        .map(|(_, label)| *label)
}

/// Position of an identity in the canonical CCTV sequence.
pub fn cctv_rank(identity: &str) -> Option<usize> {
    CCTV_ORDER.iter().position(|name| *name == identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_map_covers_both_spellings() {
        let map = fixed_alias_map();
        assert_eq!(map.get("CCTV-1"), Some(&"CCTV-1综合"));
        assert_eq!(map.get("CCTV1"), Some(&"CCTV-1综合"));
        assert_eq!(map.get("央视新闻"), Some(&"CCTV-13新闻"));
    }

    #[test]
    fn ordinal_range_is_bounded() {
        assert_eq!(cctv_label(1), Some("综合"));
        assert_eq!(cctv_label(15), Some("音乐"));
        assert_eq!(cctv_label(0), None);
        assert_eq!(cctv_label(16), None);
    }

    #[test]
    fn order_and_labels_agree() {
        for (ordinal, label) in CCTV_LABELS {
            let identity = format!("CCTV-{}{}", ordinal, label);
            assert_eq!(cctv_rank(&identity), Some(*ordinal as usize - 1));
        }
    }
}
