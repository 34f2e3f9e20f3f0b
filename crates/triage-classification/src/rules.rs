//! Classification rules: the built-in table and TOML-defined extensions.
//!
//! Rules are evaluated in declaration order. Each rule carries a category,
//! a priority, and a signed score contribution.
//!
//! ```toml
//! [[rules]]
//! id = "crash-keywords"
//! category = "bug"
//! priority = "high"
//! score = 30
//! kind = "keyword"
//! keywords = ["crash", "panic"]
//! fields = "title"
//! ```

use std::collections::HashSet;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::info;

use triage_core::config::defaults::DEFAULT_STALE_AFTER_DAYS;
use triage_core::config::RulesConfig;
use triage_core::constants::MAX_RULE_CONTRIBUTION;
use triage_core::errors::ConfigError;
use triage_core::{Category, Priority};

/// Which text fields a keyword or pattern rule looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFields {
    Title,
    Body,
    #[default]
    Both,
}

impl TextFields {
    pub fn includes_title(self) -> bool {
        matches!(self, Self::Title | Self::Both)
    }

    pub fn includes_body(self) -> bool {
        matches!(self, Self::Body | Self::Both)
    }
}

/// What a rule matches on.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Case-insensitive substring match of any keyword.
    Keyword {
        keywords: Vec<String>,
        fields: TextFields,
    },
    /// Exact membership of any listed label in the issue's label set.
    Label { labels: Vec<String> },
    /// Open issue not updated for at least `days`.
    Staleness { days: u32 },
    /// Case-insensitive regular expression.
    Pattern { regex: Regex, fields: TextFields },
}

impl RuleKind {
    pub fn keywords<S: AsRef<str>>(keywords: &[S]) -> Self {
        Self::Keyword {
            keywords: keywords.iter().map(|k| k.as_ref().to_string()).collect(),
            fields: TextFields::Both,
        }
    }

    pub fn title_keywords<S: AsRef<str>>(keywords: &[S]) -> Self {
        Self::Keyword {
            keywords: keywords.iter().map(|k| k.as_ref().to_string()).collect(),
            fields: TextFields::Title,
        }
    }

    pub fn labels<S: AsRef<str>>(labels: &[S]) -> Self {
        Self::Label {
            labels: labels.iter().map(|l| l.as_ref().to_string()).collect(),
        }
    }

    pub fn stale_after_days(days: u32) -> Self {
        Self::Staleness { days }
    }

    /// Compile a case-insensitive pattern rule.
    pub fn pattern(pattern: &str, fields: TextFields) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self::Pattern { regex, fields })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Keyword { .. } => "keyword",
            Self::Label { .. } => "label",
            Self::Staleness { .. } => "staleness",
            Self::Pattern { .. } => "pattern",
        }
    }
}

/// A single pattern → category/priority/score mapping.
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    pub id: String,
    pub category: Category,
    pub priority: Priority,
    /// Signed contribution, within ±`MAX_RULE_CONTRIBUTION`.
    pub score: i32,
    pub kind: RuleKind,
}

impl ClassificationRule {
    pub fn new(
        id: impl Into<String>,
        category: Category,
        priority: Priority,
        score: i32,
        kind: RuleKind,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            priority,
            score,
            kind,
        }
    }

    fn invalid(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::InvalidRule {
            rule_id: self.id.clone(),
            message: message.into(),
        }
    }

    /// Check structural constraints and normalize keywords to lowercase.
    fn validated(mut self) -> Result<Self, ConfigError> {
        if self.id.trim().is_empty() {
            return Err(self.invalid("rule id must not be empty"));
        }
        if self.category == Category::Uncategorized {
            return Err(self.invalid("rules cannot target the uncategorized category"));
        }
        if !(-MAX_RULE_CONTRIBUTION..=MAX_RULE_CONTRIBUTION).contains(&self.score) {
            return Err(self.invalid(format!(
                "score {} is outside -{MAX_RULE_CONTRIBUTION}..={MAX_RULE_CONTRIBUTION}",
                self.score
            )));
        }

        let problem = match &mut self.kind {
            RuleKind::Keyword { keywords, .. } => {
                for keyword in keywords.iter_mut() {
                    *keyword = keyword.trim().to_lowercase();
                }
                keywords.retain(|k| !k.is_empty());
                keywords.is_empty().then_some("keyword list is empty")
            }
            RuleKind::Label { labels } => {
                labels.retain(|l| !l.trim().is_empty());
                labels.is_empty().then_some("label list is empty")
            }
            RuleKind::Staleness { days } => (*days == 0).then_some("staleness days must be > 0"),
            RuleKind::Pattern { .. } => None,
        };
        match problem {
            Some(message) => Err(self.invalid(message)),
            None => Ok(self),
        }
    }
}

/// Ordered, read-only set of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<ClassificationRule>,
}

impl RuleSet {
    /// Validate and wrap a list of rules. Rule ids must be unique.
    pub fn new(rules: Vec<ClassificationRule>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut validated = Vec::with_capacity(rules.len());
        for rule in rules {
            let rule = rule.validated()?;
            if !seen.insert(rule.id.clone()) {
                return Err(rule.invalid("duplicate rule id"));
            }
            validated.push(rule);
        }
        Ok(Self { rules: validated })
    }

    /// No rules: every issue classifies as uncategorized.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in rule table.
    pub fn default_rules() -> Self {
        Self {
            rules: default_rule_table(),
        }
    }

    /// Load `[[rules]]` entries from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Self::parse(toml_str, "<string>")
    }

    /// Load `[[rules]]` entries from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = path.display().to_string();
        let _span = triage_observability::rules_load_span!(source).entered();

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: source.clone(),
        })?;
        let rules = Self::parse(&content, &source)?;
        info!(rules = rules.len(), "loaded rule file");
        Ok(rules)
    }

    /// Build the effective rule set: built-in rules (if enabled) followed by
    /// the configured rule file (if any).
    pub fn from_config(config: &RulesConfig) -> Result<Self, ConfigError> {
        let base = if config.include_defaults {
            Self::default_rules()
        } else {
            Self::empty()
        };
        match &config.path {
            Some(path) => base.extend(Self::from_file(path)?),
            None => Ok(base),
        }
    }

    /// Append `other` after `self`, rejecting id collisions.
    pub fn extend(self, other: RuleSet) -> Result<Self, ConfigError> {
        let mut rules = self.rules;
        rules.extend(other.rules);
        Self::new(rules)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassificationRule> {
        self.rules.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ClassificationRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn parse(toml_str: &str, source: &str) -> Result<Self, ConfigError> {
        let file: RuleFile = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: source.to_string(),
            message: e.to_string(),
        })?;

        let rules = file
            .rules
            .into_iter()
            .filter(|def| def.enabled != Some(false))
            .map(RuleDef::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rules)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a ClassificationRule;
    type IntoIter = std::slice::Iter<'a, ClassificationRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// A collection of TOML rule definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<RuleDef>,
}

/// A TOML-defined rule, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RuleDef {
    id: String,
    category: String,
    #[serde(default = "default_priority")]
    priority: String,
    score: i32,
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(flatten)]
    kind: RuleKindDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum RuleKindDef {
    Keyword {
        keywords: Vec<String>,
        #[serde(default)]
        fields: TextFields,
    },
    Label {
        labels: Vec<String>,
    },
    Staleness {
        days: u32,
    },
    Pattern {
        regex: String,
        #[serde(default)]
        fields: TextFields,
    },
}

fn default_priority() -> String {
    Priority::Medium.as_str().to_string()
}

impl RuleDef {
    fn compile(self) -> Result<ClassificationRule, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidRule {
            rule_id: self.id.clone(),
            message,
        };

        let category = Category::parse_str(&self.category)
            .ok_or_else(|| invalid(format!("unknown category '{}'", self.category)))?;
        let priority = Priority::parse_str(&self.priority)
            .ok_or_else(|| invalid(format!("unknown priority '{}'", self.priority)))?;

        let kind = match &self.kind {
            RuleKindDef::Keyword { keywords, fields } => RuleKind::Keyword {
                keywords: keywords.clone(),
                fields: *fields,
            },
            RuleKindDef::Label { labels } => RuleKind::Label {
                labels: labels.clone(),
            },
            RuleKindDef::Staleness { days } => RuleKind::Staleness { days: *days },
            RuleKindDef::Pattern { regex, fields } => RuleKind::pattern(regex, *fields)
                .map_err(|e| invalid(format!("regex error: {e}")))?,
        };

        Ok(ClassificationRule::new(
            self.id.clone(),
            category,
            priority,
            self.score,
            kind,
        ))
    }
}

/// Built-in rules. Keywords are already lowercase.
fn default_rule_table() -> Vec<ClassificationRule> {
    use Category::*;
    use Priority::*;

    vec![
        ClassificationRule::new(
            "security-label",
            Security,
            Critical,
            50,
            RuleKind::labels(&["security", "vulnerability"]),
        ),
        ClassificationRule::new(
            "security-keywords",
            Security,
            Critical,
            30,
            RuleKind::keywords(&["vulnerability", "cve-", "security issue", "xss", "injection"]),
        ),
        ClassificationRule::new(
            "bug-label",
            Bug,
            High,
            40,
            RuleKind::labels(&["bug", "type: bug", "regression"]),
        ),
        ClassificationRule::new(
            "bug-keywords",
            Bug,
            High,
            30,
            RuleKind::keywords(&["crash", "exception", "panic", "broken", "regression", "stack trace"]),
        ),
        ClassificationRule::new(
            "feature-label",
            Feature,
            Medium,
            40,
            RuleKind::labels(&["enhancement", "feature", "feature request"]),
        ),
        ClassificationRule::new(
            "feature-keywords",
            Feature,
            Medium,
            25,
            RuleKind::keywords(&["feature request", "add support", "would be nice", "proposal"]),
        ),
        ClassificationRule::new(
            "docs-label",
            Documentation,
            Low,
            40,
            RuleKind::labels(&["documentation", "docs"]),
        ),
        ClassificationRule::new(
            "docs-keywords",
            Documentation,
            Low,
            25,
            RuleKind::title_keywords(&["readme", "documentation", "typo", "docs"]),
        ),
        ClassificationRule::new(
            "maintenance-label",
            Maintenance,
            Low,
            35,
            RuleKind::labels(&["chore", "dependencies", "maintenance", "refactor", "ci"]),
        ),
        ClassificationRule::new(
            "maintenance-keywords",
            Maintenance,
            Low,
            20,
            RuleKind::title_keywords(&["bump", "upgrade", "refactor", "deprecat", "cleanup"]),
        ),
        ClassificationRule::new(
            "question-label",
            Question,
            Low,
            35,
            RuleKind::labels(&["question", "help wanted", "support"]),
        ),
        ClassificationRule::new(
            "question-keywords",
            Question,
            Low,
            20,
            RuleKind::title_keywords(&["how do i", "how to", "is it possible", "question"]),
        ),
        ClassificationRule::new(
            "stale",
            Stale,
            Low,
            20,
            RuleKind::stale_after_days(DEFAULT_STALE_AFTER_DAYS),
        ),
    ]
}
