/*!
 * Tests for extracting translations from raw dictionary text
 */

use nametrans::translation::cleaner::{RuleAction, TranslationCleaner};
use nametrans::translation::clean_translation;

#[test]
fn test_clean_withPersonEntry_shouldReturnFirstChineseRun() {
    assert_eq!(clean_translation("Smith斯米特[法、英]；史密斯[英]"), Some("斯米特".to_string()));
}

#[test]
fn test_clean_withPlaceEntry_shouldReturnMarkedTranslation() {
    assert_eq!(clean_translation("Paris 【国家】法 【译名】巴黎"), Some("巴黎".to_string()));
}

#[test]
fn test_clean_withMarkerAndUnrelatedChinese_shouldPreferMarker() {
    assert_eq!(clean_translation("法国首都，人口众多 【译名】巴黎 另见 巴黎市"), Some("巴黎".to_string()));
}

#[test]
fn test_clean_withEmptyMarker_shouldReturnNone() {
    assert_eq!(clean_translation("Paris 【译名】"), None);
    assert_eq!(clean_translation("<b>Paris</b> 【译名】<br/>"), None);
    assert_eq!(clean_translation("法国首都 【译名】 "), None);
}

#[test]
fn test_clean_withPureChinese_shouldBeIdempotent() {
    for text in ["巴黎", "史密斯", "约翰·史密斯"] {
        let once = clean_translation(text);
        assert_eq!(once.as_deref(), Some(text));
        assert_eq!(clean_translation(once.as_deref().unwrap()), once);
    }
}

#[test]
fn test_clean_withHtml_shouldStripTags() {
    assert_eq!(clean_translation("<div><b>伦敦</b> London</div>"), Some("伦敦".to_string()));
}

#[test]
fn test_clean_withOnlyMarkup_shouldReturnNone() {
    assert_eq!(clean_translation("<div><br/></div>"), None);
    assert_eq!(clean_translation("   "), None);
}

#[test]
fn test_clean_withoutChinese_shouldReturnNone() {
    assert_eq!(clean_translation("Smith, a surname"), None);
}

#[test]
fn test_clean_withNoisePrefix_shouldSkipNoise() {
    // Without stripping, 查看更多 would be the leftmost Chinese run
    assert_eq!(clean_translation("查看更多 伦敦"), Some("伦敦".to_string()));
    assert_eq!(clean_translation("<a>返回顶部</a> Back to top 柏林"), Some("柏林".to_string()));
}

#[test]
fn test_clean_withNoiseOnly_shouldReturnNone() {
    assert_eq!(clean_translation("返回顶部 查看更多"), None);
}

#[test]
fn test_clean_withNoiseBeforeMarker_shouldReturnMarkedTranslation() {
    assert_eq!(clean_translation("返回顶部【译名】罗马"), Some("罗马".to_string()));
}

#[test]
fn test_clean_withAnnotation_shouldKeepAnnotation() {
    assert_eq!(clean_translation("York 约克(郡) [英]"), Some("约克(郡)".to_string()));
    assert_eq!(clean_translation("约克（郡）"), Some("约克（郡）".to_string()));
}

#[test]
fn test_clean_withSingleLeadingIdeograph_shouldFallBackToLongerRun() {
    assert_eq!(clean_translation("A 法 then 马德里"), Some("马德里".to_string()));
}

#[test]
fn test_clean_withSingleIdeographOnly_shouldReturnNone() {
    assert_eq!(clean_translation("Li 李"), None);
}

#[test]
fn test_rules_shouldBeInspectable() {
    let cleaner = TranslationCleaner::default();
    let rules = cleaner.rules();

    assert_eq!(rules.len(), 5);
    assert_eq!(rules[0].action, RuleAction::Remove);
    assert_eq!(rules[2].name, "place-name-marker");
    assert_eq!(rules[2].action, RuleAction::Capture);
    assert_eq!(rules[4].action, RuleAction::Extract { min_chars: 2 });
}

#[test]
fn test_custom_rules_withoutMarkerRule_shouldIgnoreMarker() {
    let rules = TranslationCleaner::default()
        .rules()
        .iter()
        .filter(|r| r.name != "place-name-marker")
        .cloned()
        .collect();
    let cleaner = TranslationCleaner::with_rules(rules);

    assert_eq!(cleaner.clean("法国首都 【译名】巴黎"), Some("法国首都".to_string()));
}
