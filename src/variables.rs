//! Template variables for the article generator.
//!
//! The record is serialized with its Japanese labels, in declaration order,
//! and every field is always present in the output.

use crate::results::PageMeta;
use chrono::{Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Product name used when the page title yields nothing
pub const PRODUCT_NAME_PLACEHOLDER: &str = "サンプル商品";

/// Feature keyword used when no keyword was selected
pub const DEFAULT_FEATURE_KEYWORD: &str = "スキンケア";

/// Concern keyword used when no keyword was selected
pub const DEFAULT_CONCERN_KEYWORD: &str = "肌荒れ";

/// Maximum length of a derived product name, in characters
pub const PRODUCT_NAME_MAX_CHARS: usize = 60;

const DAYS_CONTINUED: &str = "14日";
const RECOMMENDED_PERIOD: &str = "14日〜4週間";
const PRODUCT_FORM: &str = "サプリ/美容液/クリーム など";
const USAGE_TIMING: &str = "朝/夜";
const PITFALL_AVOIDANCE: &str = "飲み忘れアラーム/パッチテスト など";
const CONCLUSION_TEASER: &str = "無理なく続ければ体感しやすいポイントがいくつかありました";
const PRODUCT_PRICE: &str = "¥◯◯◯〜（ポイント◯倍時）";
const CAUTION_INGREDIENTS: &str = "ビタミンA/ピーリング/薬の飲み合わせ など";

/// Serialized key set, in output order
pub const KEYS: [&str; 52] = [
    "商品名",
    "ブランド名",
    "特集キーワード",
    "悩みキーワード",
    "更新日",
    "継続日数",
    "推奨期間",
    "主成分",
    "形状",
    "内容量",
    "使用タイミング",
    "用量",
    "併用スキンケア",
    "失敗回避",
    "変化_日",
    "感じた変化_日",
    "変化_週",
    "感じた変化_週",
    "変化_月",
    "感じた変化_月",
    "結論チラ見せ",
    "学術メモ本文",
    "豆知識1",
    "豆知識2",
    "豆知識3",
    "特徴_本品",
    "価格_本品",
    "比較商品A_名称",
    "比較商品A_特徴",
    "比較商品A_成分量",
    "比較商品A_価格",
    "比較商品B_名称",
    "比較商品B_特徴",
    "比較商品B_成分量",
    "比較商品B_価格",
    "良い口コミ1",
    "良い口コミ1_属性",
    "良い口コミ2",
    "良い口コミ2_属性",
    "悪い口コミ1",
    "悪い口コミ2",
    "レビュー件数",
    "目安期間",
    "注意成分",
    "商品画像URL1",
    "商品画像URL2",
    "楽天_最安候補",
    "楽天_販売ページA",
    "楽天_比較A",
    "楽天_比較B",
    "楽天_レビュー多い店舗",
    "楽天_価格比較まとめ",
];

// Bracketed promo segments anywhere, and everything from the first pipe on
static TITLE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【.*?】|\|.*$").expect("title noise pattern is valid"));

/// Variables substituted into the article template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableMap {
    #[serde(rename = "商品名")]
    pub product_name: String,
    #[serde(rename = "ブランド名")]
    pub brand_name: String,
    #[serde(rename = "特集キーワード")]
    pub feature_keyword: String,
    #[serde(rename = "悩みキーワード")]
    pub concern_keyword: String,
    /// YYYY/MM/DD
    #[serde(rename = "更新日")]
    pub updated_on: String,
    #[serde(rename = "継続日数")]
    pub days_continued: String,
    #[serde(rename = "推奨期間")]
    pub recommended_period: String,
    #[serde(rename = "主成分")]
    pub main_ingredient: String,
    #[serde(rename = "形状")]
    pub form: String,
    #[serde(rename = "内容量")]
    pub volume: String,
    #[serde(rename = "使用タイミング")]
    pub usage_timing: String,
    #[serde(rename = "用量")]
    pub dosage: String,
    #[serde(rename = "併用スキンケア")]
    pub paired_skincare: String,
    #[serde(rename = "失敗回避")]
    pub pitfall_avoidance: String,

    // Observed changes after a day / week / month count
    #[serde(rename = "変化_日")]
    pub change_days: String,
    #[serde(rename = "感じた変化_日")]
    pub felt_change_days: String,
    #[serde(rename = "変化_週")]
    pub change_weeks: String,
    #[serde(rename = "感じた変化_週")]
    pub felt_change_weeks: String,
    #[serde(rename = "変化_月")]
    pub change_months: String,
    #[serde(rename = "感じた変化_月")]
    pub felt_change_months: String,

    #[serde(rename = "結論チラ見せ")]
    pub conclusion_teaser: String,
    #[serde(rename = "学術メモ本文")]
    pub academic_note: String,
    #[serde(rename = "豆知識1")]
    pub trivia_1: String,
    #[serde(rename = "豆知識2")]
    pub trivia_2: String,
    #[serde(rename = "豆知識3")]
    pub trivia_3: String,
    #[serde(rename = "特徴_本品")]
    pub product_features: String,
    #[serde(rename = "価格_本品")]
    pub product_price: String,

    #[serde(rename = "比較商品A_名称")]
    pub compare_a_name: String,
    #[serde(rename = "比較商品A_特徴")]
    pub compare_a_features: String,
    #[serde(rename = "比較商品A_成分量")]
    pub compare_a_ingredient_amount: String,
    #[serde(rename = "比較商品A_価格")]
    pub compare_a_price: String,
    #[serde(rename = "比較商品B_名称")]
    pub compare_b_name: String,
    #[serde(rename = "比較商品B_特徴")]
    pub compare_b_features: String,
    #[serde(rename = "比較商品B_成分量")]
    pub compare_b_ingredient_amount: String,
    #[serde(rename = "比較商品B_価格")]
    pub compare_b_price: String,

    #[serde(rename = "良い口コミ1")]
    pub positive_review_1: String,
    #[serde(rename = "良い口コミ1_属性")]
    pub positive_review_1_reviewer: String,
    #[serde(rename = "良い口コミ2")]
    pub positive_review_2: String,
    #[serde(rename = "良い口コミ2_属性")]
    pub positive_review_2_reviewer: String,
    #[serde(rename = "悪い口コミ1")]
    pub negative_review_1: String,
    #[serde(rename = "悪い口コミ2")]
    pub negative_review_2: String,
    #[serde(rename = "レビュー件数")]
    pub review_count: String,

    #[serde(rename = "目安期間")]
    pub guideline_period: String,
    #[serde(rename = "注意成分")]
    pub caution_ingredients: String,
    #[serde(rename = "商品画像URL1")]
    pub image_url_1: String,
    #[serde(rename = "商品画像URL2")]
    pub image_url_2: String,

    // Affiliate link slots, all filled with the same link
    #[serde(rename = "楽天_最安候補")]
    pub rakuten_lowest_price: String,
    #[serde(rename = "楽天_販売ページA")]
    pub rakuten_sales_page_a: String,
    #[serde(rename = "楽天_比較A")]
    pub rakuten_compare_a: String,
    #[serde(rename = "楽天_比較B")]
    pub rakuten_compare_b: String,
    #[serde(rename = "楽天_レビュー多い店舗")]
    pub rakuten_most_reviewed_shop: String,
    #[serde(rename = "楽天_価格比較まとめ")]
    pub rakuten_price_summary: String,
}

impl VariableMap {
    /// Serializes the record as JSON, leaving non-ASCII text unescaped
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Derives a product name from a page title
///
/// Strips `【...】` segments and any `|` suffix, trims, and keeps at most
/// [`PRODUCT_NAME_MAX_CHARS`] characters. Falls back to
/// [`PRODUCT_NAME_PLACEHOLDER`] when nothing is left.
pub fn product_name(title: &str) -> String {
    let stripped = TITLE_NOISE.replace_all(title, "");
    let name: String = stripped
        .trim()
        .chars()
        .take(PRODUCT_NAME_MAX_CHARS)
        .collect();

    if name.is_empty() {
        PRODUCT_NAME_PLACEHOLDER.to_string()
    } else {
        name
    }
}

/// Builds the template variables for today's date
pub fn build_variables(meta: &PageMeta, affiliate_link: &str, keyword: &str) -> VariableMap {
    build_variables_on(meta, affiliate_link, keyword, Local::now().date_naive())
}

/// Builds the template variables for a given update date
pub fn build_variables_on(
    meta: &PageMeta,
    affiliate_link: &str,
    keyword: &str,
    date: NaiveDate,
) -> VariableMap {
    let keyword_or = |default: &str| {
        if keyword.is_empty() {
            default.to_string()
        } else {
            keyword.to_string()
        }
    };
    let link = || affiliate_link.to_string();

    VariableMap {
        product_name: product_name(&meta.title),
        feature_keyword: keyword_or(DEFAULT_FEATURE_KEYWORD),
        concern_keyword: keyword_or(DEFAULT_CONCERN_KEYWORD),
        updated_on: date.format("%Y/%m/%d").to_string(),
        days_continued: DAYS_CONTINUED.to_string(),
        recommended_period: RECOMMENDED_PERIOD.to_string(),
        form: PRODUCT_FORM.to_string(),
        usage_timing: USAGE_TIMING.to_string(),
        pitfall_avoidance: PITFALL_AVOIDANCE.to_string(),
        change_days: "7".to_string(),
        change_weeks: "2".to_string(),
        change_months: "1".to_string(),
        conclusion_teaser: CONCLUSION_TEASER.to_string(),
        product_price: PRODUCT_PRICE.to_string(),
        guideline_period: RECOMMENDED_PERIOD.to_string(),
        caution_ingredients: CAUTION_INGREDIENTS.to_string(),
        image_url_1: meta.image.clone(),
        image_url_2: meta.image.clone(),
        rakuten_lowest_price: link(),
        rakuten_sales_page_a: link(),
        rakuten_compare_a: link(),
        rakuten_compare_b: link(),
        rakuten_most_reviewed_shop: link(),
        rakuten_price_summary: link(),
        ..VariableMap::default()
    }
}
