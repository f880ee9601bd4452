//! # Catalog Line Parser
//!
//! Splits supplier catalog lines such as `【焼酎】赤霧島　900ml` into a product name and a
//! volume. Parsing never fails: a line that does not fit the expected shape becomes a product
//! whose name is the whole line and whose volume is `"-"`.
//!
//! The per-catalog differences (extra unit words, whether the category tag stays in the name, an
//! optional name translation table) live in [`ParserConfig`], which can be loaded from JSON:
//!
//! ```json
//! {
//!   "unit_keywords": ["タル", "ガロン", "ボンベ", "缶", "箱", "瓶"],
//!   "keep_category": true,
//!   "translations": { "竹鶴": "Taketsuru" }
//! }
//! ```

use crate::model::NO_VOLUME;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

static CATEGORY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^【(.*?)】\s*").expect("category tag regex"));

static TOKEN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s　]+").expect("separator regex"));

// ASCII digits only; `\d` would also accept full-width digits.
static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(19|20)[0-9]{2}$").expect("year regex"));

/// Unit words every catalog recognises as a volume token.
pub const BASE_UNIT_KEYWORDS: [&str; 4] = ["タル", "ガロン", "ボンベ", "缶"];

/// Per-catalog parser settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Words that mark the last token as a volume even without any ASCII letter or digit.
    pub unit_keywords: Vec<String>,
    /// Re-prepend the stripped `【category】` tag to the name.
    pub keep_category: bool,
    /// Name → localized name. A hit appends ` (localized)` to the name.
    pub translations: HashMap<String, String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            unit_keywords: BASE_UNIT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            keep_category: false,
            translations: HashMap::new(),
        }
    }
}

impl ParserConfig {
    /// Parses a JSON config. Missing fields fall back to [`ParserConfig::default`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unit_keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn keep_category(mut self, keep: bool) -> Self {
        self.keep_category = keep;
        self
    }

    pub fn with_translation(mut self, name: impl Into<String>, localized: impl Into<String>) -> Self {
        self.translations.insert(name.into(), localized.into());
        self
    }

    fn looks_like_volume(&self, token: &str) -> bool {
        token.chars().any(|c| c.is_ascii_alphanumeric())
            || self
                .unit_keywords
                .iter()
                .any(|k| !k.is_empty() && token.contains(k.as_str()))
            || token.contains("ml")
            || token.contains('l')
            || token.contains('ℓ')
    }
}

/// One parsed catalog line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLine {
    pub name: String,
    pub volume: String,
}

impl ParsedLine {
    fn without_volume(name: String) -> Self {
        Self {
            name,
            volume: NO_VOLUME.to_string(),
        }
    }
}

/// Parses a single line. Returns `None` only for blank lines.
pub fn parse_line(line: &str, config: &ParserConfig) -> Option<ParsedLine> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let category = CATEGORY_TAG
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|c| !c.is_empty());
    let content = CATEGORY_TAG.replace(line, "");

    let tokens: Vec<&str> = TOKEN_SEPARATOR
        .split(&content)
        .filter(|t| !t.is_empty())
        .collect();

    let mut parsed = match tokens.as_slice() {
        // Nothing after the tag: keep the line as it was written.
        [] => ParsedLine::without_volume(line.to_string()),
        [only] => ParsedLine::without_volume(only.to_string()),
        [rest @ .., last] => {
            if YEAR.is_match(last) || !config.looks_like_volume(last) {
                ParsedLine::without_volume(tokens.join(" "))
            } else {
                ParsedLine {
                    name: rest.join(" "),
                    volume: last.to_string(),
                }
            }
        }
    };

    if let Some(localized) = config.translations.get(&parsed.name) {
        parsed.name = format!("{} ({})", parsed.name, localized);
    }
    if config.keep_category && !tokens.is_empty() {
        if let Some(category) = category {
            parsed.name = format!("【{}】{}", category, parsed.name);
        }
    }

    Some(parsed)
}

/// Parses a whole catalog, one product per non-blank line, in input order.
pub fn parse_catalog(text: &str, config: &ParserConfig) -> Vec<ParsedLine> {
    text.lines()
        .filter_map(|line| parse_line(line, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ParsedLine {
        parse_line(line, &ParserConfig::default()).expect("non-blank line")
    }

    fn pair(name: &str, volume: &str) -> ParsedLine {
        ParsedLine {
            name: name.to_string(),
            volume: volume.to_string(),
        }
    }

    #[test]
    fn test_category_is_discarded_and_volume_split() {
        assert_eq!(parse("【焼酎】赤霧島　900ml"), pair("赤霧島", "900ml"));
    }

    #[test]
    fn test_single_token_has_no_volume() {
        assert_eq!(parse("竹鶴"), pair("竹鶴", "-"));
        assert_eq!(parse("【その他】5キロガスボンベ"), pair("5キロガスボンベ", "-"));
    }

    #[test]
    fn test_trailing_year_is_part_of_the_name() {
        assert_eq!(parse("シャトー マルゴー 2015"), pair("シャトー マルゴー 2015", "-"));
        assert_eq!(parse("ヴィンテージ 1998"), pair("ヴィンテージ 1998", "-"));
        // 21xx is not a year
        assert_eq!(parse("樽 2100"), pair("樽", "2100"));
    }

    #[test]
    fn test_multi_word_name_is_joined_with_one_space() {
        assert_eq!(
            parse("【ウイスキー】サントリー　シングルモルト　新・山崎　700ml"),
            pair("サントリー シングルモルト 新・山崎", "700ml")
        );
        assert_eq!(
            parse("  キリン  一番搾り　樽15000ml  "),
            pair("キリン 一番搾り", "樽15000ml")
        );
    }

    #[test]
    fn test_unit_keywords_mark_volume() {
        assert_eq!(parse("生ビール タル"), pair("生ビール", "タル"));
        assert_eq!(parse("黒霧島 一升瓶"), pair("黒霧島 一升瓶", "-"));

        let extended = ParserConfig::default().with_keywords(["瓶", "紙パック"]);
        assert_eq!(
            parse_line("黒霧島 一升瓶", &extended),
            Some(pair("黒霧島", "一升瓶"))
        );
    }

    #[test]
    fn test_full_width_digits_are_not_a_volume() {
        assert_eq!(parse("獺祭 四合"), pair("獺祭 四合", "-"));
        assert_eq!(parse("獺祭 ７２０"), pair("獺祭 ７２０", "-"));
    }

    #[test]
    fn test_category_retention_and_translation() {
        let config = ParserConfig::default()
            .keep_category(true)
            .with_translation("カンパリ", "Campari");

        assert_eq!(
            parse_line("【リキュール】カンパリ　1000ml", &config),
            Some(pair("【リキュール】カンパリ (Campari)", "1000ml"))
        );
        // Empty tag is not re-prepended
        assert_eq!(
            parse_line("【】カンパリ 1000ml", &config),
            Some(pair("カンパリ (Campari)", "1000ml"))
        );
    }

    #[test]
    fn test_tag_only_line_keeps_the_whole_line() {
        assert_eq!(parse("【その他】"), pair("【その他】", "-"));
    }

    #[test]
    fn test_parse_catalog_skips_blank_lines() {
        let text = "\n【焼酎】赤霧島　900ml\n   \n竹鶴\n";
        let parsed = parse_catalog(text, &ParserConfig::default());
        assert_eq!(parsed, vec![pair("赤霧島", "900ml"), pair("竹鶴", "-")]);
    }

    #[test]
    fn test_config_from_json_fills_defaults() {
        let config = ParserConfig::from_json(r#"{ "keep_category": true }"#).unwrap();
        assert!(config.keep_category);
        assert_eq!(config.unit_keywords.len(), BASE_UNIT_KEYWORDS.len());
        assert!(config.translations.is_empty());

        let config =
            ParserConfig::from_json(r#"{ "unit_keywords": ["箱"], "translations": {"竹鶴": "Taketsuru"} }"#)
                .unwrap();
        assert_eq!(config.unit_keywords, vec!["箱".to_string()]);
        assert_eq!(
            parse_line("竹鶴", &config),
            Some(pair("竹鶴 (Taketsuru)", "-"))
        );
    }
}
