//! Channel categorisation
//!
//! Every resolved identity lands in exactly one category. Categories are
//! tested in declaration order with case-insensitive keyword substring
//! matching, first match wins; the order is a deliberate tie-break and must
//! not be rearranged. An ultra-high-definition marker overrides everything
//! else and routes straight to the 4K category.

use serde::{Deserialize, Serialize};

/// Output grouping for curated channels.
///
/// Declaration order is both the classification priority order and the order
/// category files are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// National broadcaster channels (CCTV family)
    National,
    /// Provincial satellite channels
    Provincial,
    /// Geographic/local stations
    Local,
    /// Hong Kong and Taiwan channels
    CrossBorder,
    /// International networks
    International,
    /// Ultra-high-definition variants
    UltraHd,
    /// Web streaming platforms
    Streaming,
    /// Everything else
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::National,
        Category::Provincial,
        Category::Local,
        Category::CrossBorder,
        Category::International,
        Category::UltraHd,
        Category::Streaming,
        Category::Other,
    ];

    /// Display label used for `group-title` and output file names.
    pub fn label(&self) -> &'static str {
        match self {
            Category::National => "央视",
            Category::Provincial => "卫视",
            Category::Local => "地方",
            Category::CrossBorder => "港台",
            Category::International => "国际",
            Category::UltraHd => "4K",
            Category::Streaming => "网络直播",
            Category::Other => "其他",
        }
    }

    /// Keyword tokens that place an identity into this category.
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::National => &["CCTV", "央视"],
            Category::Provincial => &["卫视"],
            Category::Local => &[
                "山东", "江苏", "浙江", "广东", "北京", "上海", "天津", "湖南", "济南", "南京",
                "深圳", "重庆", "四川", "湖北", "陕西", "福建", "贵州", "云南", "广西", "海南",
                "内蒙古", "宁夏", "青海", "吉林", "辽宁", "黑龙江", "安徽", "江西", "河南",
            ],
            Category::CrossBorder => &["香港", "TVB", "台湾", "台视", "中视", "华视", "翡翠", "三立"],
            Category::International => &["BBC", "CNN", "NHK", "FOX", "HBO", "Discovery"],
            Category::UltraHd => &[],
            Category::Streaming => &["斗鱼", "虎牙", "Bilibili", "哔哩"],
            Category::Other => &[],
        }
    }
}

/// Marker that forces an identity into the ultra-high-definition category.
const ULTRA_HD_MARKER: &str = "4k";

/// Assign a canonical identity to exactly one category.
pub fn classify(identity: &str) -> Category {
    let lowered = identity.to_lowercase();

    // Content-type override: 4K variants beat every keyword rule.
    if lowered.contains(ULTRA_HD_MARKER) {
        return Category::UltraHd;
    }

    for category in Category::ALL {
        if category
            .keywords()
            .iter()
            .any(|kw| lowered.contains(&kw.to_lowercase()))
        {
            return category;
        }
    }

    Category::Other
}
