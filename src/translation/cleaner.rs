/*!
 * Extraction of a clean translation from raw dictionary definitions.
 *
 * The dictionaries return three kinds of text without saying which one:
 * - person-name entries inline, e.g. `Smith斯米特[法、英]；史密斯[英]`
 * - place-name entries with tags, e.g. `Paris 【国家】法 【译名】巴黎`
 * - general entries wrapped in HTML and page chrome
 *
 * Cleaning is an ordered list of rules. Rewrite rules change the working
 * text; extract rules return on their first success. Noise stripping runs
 * before the place-name marker is looked for.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker introducing the canonical translation in place-name entries
pub const PLACE_NAME_MARKER: &str = "【译名】";

/// Navigation text the dictionary pages prepend to some definitions
pub const NOISE_PREFIXES: &[&str] = &["返回顶部", "回到顶部", "查看更多", "Back to top", "View more"];

/// What a rule does with its pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Delete every match and trim the working text
    Remove,
    /// Return capture group 1 if the pattern matches. A match ends
    /// cleaning even when the group is empty.
    Capture,
    /// Return the leftmost match if it spans at least `min_chars` characters
    Extract { min_chars: usize },
}

/// One cleaning rule
#[derive(Debug, Clone)]
pub struct CleanRule {
    /// Short rule name, for logs and tests
    pub name: &'static str,
    /// Pattern the action applies to
    pub pattern: Regex,
    /// Action taken on matches
    pub action: RuleAction,
}

/// Outcome of applying one rule
enum RuleOutcome {
    Continue,
    Found(String),
    Stop,
}

impl CleanRule {
    fn new(name: &'static str, pattern: &str, action: RuleAction) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            action,
        }
    }

    fn apply(&self, text: &mut String) -> RuleOutcome {
        match self.action {
            RuleAction::Remove => {
                let rewritten = self.pattern.replace_all(text.as_str(), "").trim().to_string();
                *text = rewritten;
                RuleOutcome::Continue
            }
            RuleAction::Capture => match self.pattern.captures(text.as_str()) {
                None => RuleOutcome::Continue,
                Some(caps) => caps.get(1)
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|s| !s.is_empty())
                    .map_or(RuleOutcome::Stop, RuleOutcome::Found),
            },
            RuleAction::Extract { min_chars } => self.pattern.find(text.as_str())
                .map(|m| m.as_str().to_string())
                .filter(|s| s.chars().count() >= min_chars)
                .map_or(RuleOutcome::Continue, RuleOutcome::Found),
        }
    }
}

fn noise_prefix_pattern() -> String {
    let alternatives: Vec<String> = NOISE_PREFIXES.iter().map(|p| regex::escape(p)).collect();
    format!(r"^(?:(?:{})\s*)+", alternatives.join("|"))
}

/// The standard rule list, in application order
static DEFAULT_RULES: Lazy<Vec<CleanRule>> = Lazy::new(|| {
    vec![
        // Markup tags
        CleanRule::new("strip-markup", r"<[^>]+>", RuleAction::Remove),

        // Page chrome before the definition
        CleanRule::new("strip-noise", &noise_prefix_pattern(), RuleAction::Remove),

        // Place-name dictionary format; the marker alone means no translation
        CleanRule::new(
            "place-name-marker",
            &format!(r"{}\s*(\S*)", regex::escape(PLACE_NAME_MARKER)),
            RuleAction::Capture,
        ),

        // Name with an optional parenthesized annotation, e.g. 约翰(约克)
        CleanRule::new(
            "cjk-with-annotation",
            r"[\x{4E00}-\x{9FFF}·]+(?:[(（][\x{4E00}-\x{9FFF}·]+[)）])?",
            RuleAction::Extract { min_chars: 2 },
        ),

        // Any run of at least two ideographs
        CleanRule::new("cjk-run", r"[\x{4E00}-\x{9FFF}·]{2,}", RuleAction::Extract { min_chars: 2 }),
    ]
});

/// Ordered rule list turning raw definitions into translations
#[derive(Debug, Clone)]
pub struct TranslationCleaner {
    rules: Vec<CleanRule>,
}

impl Default for TranslationCleaner {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.clone(),
        }
    }
}

impl TranslationCleaner {
    /// Cleaner with a custom rule list
    pub fn with_rules(rules: Vec<CleanRule>) -> Self {
        Self { rules }
    }

    /// Rules in application order
    pub fn rules(&self) -> &[CleanRule] {
        &self.rules
    }

    /// Extract a translation from `raw`, or `None` if it holds no Chinese text
    pub fn clean(&self, raw: &str) -> Option<String> {
        let mut text = raw.trim().to_string();

        for rule in &self.rules {
            if text.is_empty() {
                return None;
            }
            match rule.apply(&mut text) {
                RuleOutcome::Continue => {}
                RuleOutcome::Found(translation) => return Some(translation),
                RuleOutcome::Stop => return None,
            }
        }

        None
    }
}

/// Clean `raw` with the standard rules
pub fn clean_translation(raw: &str) -> Option<String> {
    static CLEANER: Lazy<TranslationCleaner> = Lazy::new(TranslationCleaner::default);
    CLEANER.clean(raw)
}
