//! Source attribution: which health authority issued a document
//!
//! # Resolution Order
//!
//! 1. Publisher meta tags (`source`, `origin`, `publisher`, `og:site_name`)
//! 2. An in-page `来源：` / `发布单位：` label
//! 3. The listing site's URL against the known agency domain table
//! 4. A region short code among the listing site's host labels
//! 5. `国家卫健委`
//!
//! Names read from the page (steps 1 and 2) are normalized with
//! [`clean_source_name`]; names derived from the URL are used as-is.

use crate::crawler::extract::{compile_patterns, extract_source_from_meta, first_capture};
use crate::crawler::parser::page_text;
use crate::url::host_segments;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

/// Agency returned when nothing else resolves
pub const DEFAULT_SOURCE: &str = "国家卫健委";

/// Result of normalizing an empty name
pub const UNKNOWN_SOURCE: &str = "未知来源";

/// In-page publisher labels, highest priority first
const SOURCE_LABEL_PATTERNS: [&str; 2] = [
    r"来源[:：]\s*([^\s，。]+)",
    r"发布单位[:：]\s*([^\s，。]+)",
];

/// Characters stripped from page-derived names
const NOISE_CHARS: [char; 13] = [
    '【', '】', '[', ']', '<', '>', '（', '）', '(', ')', '|', '\u{a0}', '\u{3000}',
];

/// Agency name variants collapsed to the short form, applied in order
const SYNONYMS: [(&str, &str); 6] = [
    ("卫生健康委员会", "卫健委"),
    ("卫生健康委", "卫健委"),
    ("卫生和计划生育委员会", "卫健委"),
    ("卫生局", "卫健委"),
    ("卫生厅", "卫健委"),
    ("卫生健康厅", "卫健委"),
];

/// Domain fragments of known health authorities, checked in order
const AGENCY_DOMAINS: [(&str, &str); 56] = [
    // national
    ("nhc.gov.cn", "国家卫健委"),
    // municipalities
    ("beijing.gov.cn", "北京市卫健委"),
    ("sh.gov.cn", "上海市卫健委"),
    ("tj.gov.cn", "天津市卫健委"),
    ("cq.gov.cn", "重庆市卫健委"),
    // provinces and autonomous regions
    ("hebei.gov.cn", "河北省卫健委"),
    ("shanxi.gov.cn", "山西省卫健委"),
    ("neimenggu.gov.cn", "内蒙古自治区卫健委"),
    ("nmg.gov.cn", "内蒙古自治区卫健委"),
    ("liaoning.gov.cn", "辽宁省卫健委"),
    ("ln.gov.cn", "辽宁省卫健委"),
    ("jl.gov.cn", "吉林省卫健委"),
    ("heilongjiang.gov.cn", "黑龙江省卫健委"),
    ("hlj.gov.cn", "黑龙江省卫健委"),
    ("jiangsu.gov.cn", "江苏省卫健委"),
    ("js.gov.cn", "江苏省卫健委"),
    ("zhejiang.gov.cn", "浙江省卫健委"),
    ("zj.gov.cn", "浙江省卫健委"),
    ("ah.gov.cn", "安徽省卫健委"),
    ("fujian.gov.cn", "福建省卫健委"),
    ("fj.gov.cn", "福建省卫健委"),
    ("jiangxi.gov.cn", "江西省卫健委"),
    ("jx.gov.cn", "江西省卫健委"),
    ("shandong.gov.cn", "山东省卫健委"),
    ("sd.gov.cn", "山东省卫健委"),
    ("henan.gov.cn", "河南省卫健委"),
    ("ha.gov.cn", "河南省卫健委"),
    ("hubei.gov.cn", "湖北省卫健委"),
    ("hb.gov.cn", "湖北省卫健委"),
    ("hunan.gov.cn", "湖南省卫健委"),
    ("hn.gov.cn", "湖南省卫健委"),
    ("guangdong.gov.cn", "广东省卫健委"),
    ("gd.gov.cn", "广东省卫健委"),
    ("gx.gov.cn", "广西壮族自治区卫健委"),
    ("hainan.gov.cn", "海南省卫健委"),
    ("sc.gov.cn", "四川省卫健委"),
    ("guizhou.gov.cn", "贵州省卫健委"),
    ("gz.gov.cn", "贵州省卫健委"),
    ("yunnan.gov.cn", "云南省卫健委"),
    ("yn.gov.cn", "云南省卫健委"),
    ("xizang.gov.cn", "西藏自治区卫健委"),
    ("xz.gov.cn", "西藏自治区卫健委"),
    ("shaanxi.gov.cn", "陕西省卫健委"),
    ("sn.gov.cn", "陕西省卫健委"),
    ("gansu.gov.cn", "甘肃省卫健委"),
    ("gs.gov.cn", "甘肃省卫健委"),
    ("qinghai.gov.cn", "青海省卫健委"),
    ("qh.gov.cn", "青海省卫健委"),
    ("ningxia.gov.cn", "宁夏回族自治区卫健委"),
    ("nx.gov.cn", "宁夏回族自治区卫健委"),
    ("xinjiang.gov.cn", "新疆维吾尔自治区卫健委"),
    ("xj.gov.cn", "新疆维吾尔自治区卫健委"),
    // special administrative regions
    ("chp.gov.hk", "香港卫生防护中心"),
    ("health.gov.hk", "香港卫生署"),
    ("ssm.gov.mo", "澳门卫生局"),
    ("health.gov.mo", "澳门卫生局"),
];

/// Host label short codes and the region they stand for
const REGION_CODES: [(&str, &str); 31] = [
    ("bj", "北京"),
    ("sh", "上海"),
    ("tj", "天津"),
    ("cq", "重庆"),
    ("heb", "河北"),
    ("sx", "山西"),
    ("nm", "内蒙古"),
    ("ln", "辽宁"),
    ("jl", "吉林"),
    ("hlj", "黑龙江"),
    ("js", "江苏"),
    ("zj", "浙江"),
    ("ah", "安徽"),
    ("fj", "福建"),
    ("jx", "江西"),
    ("sd", "山东"),
    ("ha", "河南"),
    ("hb", "湖北"),
    ("hn", "湖南"),
    ("gd", "广东"),
    ("gx", "广西"),
    ("hi", "海南"),
    ("sc", "四川"),
    ("gz", "贵州"),
    ("yn", "云南"),
    ("xz", "西藏"),
    ("sn", "陕西"),
    ("gs", "甘肃"),
    ("qh", "青海"),
    ("nx", "宁夏"),
    ("xj", "新疆"),
];

/// Regions whose authority is a municipal commission
const MUNICIPALITIES: [&str; 4] = ["北京", "上海", "天津", "重庆"];

static SOURCE_LABELS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&SOURCE_LABEL_PATTERNS));

/// One step of the resolution chain
type SourceStrategy = fn(&Html, &str) -> Option<String>;

const RESOLUTION_CHAIN: [SourceStrategy; 4] =
    [from_meta, from_page_label, from_agency_domain, from_region_code];

/// Resolves the issuing agency of a document
///
/// # Arguments
///
/// * `document` - The parsed document page
/// * `website_url` - The listing page URL the document was discovered on
///
/// # Returns
///
/// The first name produced by the resolution chain, or `国家卫健委`.
pub fn extract_source(document: &Html, website_url: &str) -> String {
    RESOLUTION_CHAIN
        .iter()
        .find_map(|strategy| strategy(document, website_url))
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string())
}

/// Resolves an agency from a site URL alone (steps 3 and 4)
///
/// # Examples
///
/// ```
/// use policy_crawler::crawler::source_from_url;
///
/// assert_eq!(source_from_url("http://www.zj.gov.cn/art/1.html"), Some("浙江省卫健委".to_string()));
/// assert_eq!(source_from_url("https://wsjkw.hi.example.org/"), Some("海南省卫健委".to_string()));
/// assert_eq!(source_from_url("https://example.org/"), None);
/// ```
pub fn source_from_url(website_url: &str) -> Option<String> {
    agency_for_domain(website_url).or_else(|| agency_for_region_code(website_url))
}

/// Normalizes a page-derived agency name
///
/// Strips bracket noise and non-breaking spaces, then collapses long agency
/// names to `卫健委`. Idempotent. An empty input yields `未知来源`.
///
/// # Examples
///
/// ```
/// use policy_crawler::clean_source_name;
///
/// assert_eq!(clean_source_name("浙江省卫生健康委员会"), "浙江省卫健委");
/// assert_eq!(clean_source_name("浙江省卫健委"), "浙江省卫健委");
/// assert_eq!(clean_source_name("【广东省卫生厅】"), "广东省卫健委");
/// ```
pub fn clean_source_name(source_name: &str) -> String {
    let trimmed = source_name.trim();
    if trimmed.is_empty() {
        return UNKNOWN_SOURCE.to_string();
    }

    let mut name: String = trimmed
        .replace("&nbsp;", "")
        .chars()
        .filter(|c| !NOISE_CHARS.contains(c))
        .collect();

    for (long, short) in SYNONYMS {
        name = name.replace(long, short);
    }

    name.trim().to_string()
}

/// Normalizes a page-derived name, discarding it if nothing usable remains
fn usable_name(raw: &str) -> Option<String> {
    let name = clean_source_name(raw);
    (!name.is_empty() && name != UNKNOWN_SOURCE).then_some(name)
}

fn from_meta(document: &Html, _website_url: &str) -> Option<String> {
    extract_source_from_meta(document).and_then(|raw| usable_name(&raw))
}

fn from_page_label(document: &Html, _website_url: &str) -> Option<String> {
    first_capture(&SOURCE_LABELS, &page_text(document)).and_then(|raw| usable_name(&raw))
}

fn from_agency_domain(_document: &Html, website_url: &str) -> Option<String> {
    agency_for_domain(website_url)
}

fn from_region_code(_document: &Html, website_url: &str) -> Option<String> {
    agency_for_region_code(website_url)
}

/// First agency whose domain fragment occurs anywhere in the URL
fn agency_for_domain(website_url: &str) -> Option<String> {
    let lower = website_url.to_lowercase();
    AGENCY_DOMAINS
        .iter()
        .find(|(fragment, _)| lower.contains(fragment))
        .map(|(_, agency)| agency.to_string())
}

/// Agency for the first host label that is a region short code
fn agency_for_region_code(website_url: &str) -> Option<String> {
    let segments = host_segments(website_url);
    if segments.len() < 2 {
        return None;
    }

    segments.iter().find_map(|segment| {
        let (_, region) = REGION_CODES.iter().find(|(code, _)| *code == segment.as_str())?;
        let suffix = if MUNICIPALITIES.contains(region) {
            "市卫健委"
        } else {
            "省卫健委"
        };
        Some(format!("{}{}", region, suffix))
    })
}
