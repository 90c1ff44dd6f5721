// src/rules/registry.rs
// =============================================================================
// The domain rule registry: a read-only map from domain name to DomainRule.
//
// The registry is built once at startup (built-in rules, optionally overridden
// by rules from the config file) and then passed by reference to everything
// that needs it. Nothing mutates it during a crawl.
//
// Rust concepts:
// - HashMap: domain -> rule lookup
// - Option<&T>: "no rule for this domain" is an ordinary value, not an error
// - serde::Deserialize: rules can be written in TOML
// =============================================================================

use std::collections::HashMap;

use log::{debug, warn};
use regex::Regex;
use scraper::Selector;
use serde::Deserialize;

use crate::error::ConfigError;

/// Link pattern used for domains without a rule of their own.
pub const FALLBACK_LINK_PATTERN: &str = r"^/(?P<slug>[\w-]+)/$";

/// Where the main content of a page lives.
#[derive(Debug, Clone)]
pub struct ContentSelector {
    pub tag: String,
    pub class: Option<String>,
    // Compiled once from `tag` so extraction never re-parses it
    selector: Selector,
}

impl ContentSelector {
    pub fn new(domain: &str, tag: &str, class: Option<&str>) -> Result<Self, ConfigError> {
        let tag = tag.trim();
        let is_plain_name = !tag.is_empty()
            && tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');

        let selector = if is_plain_name {
            Selector::parse(tag).ok()
        } else {
            None
        };

        let selector = selector.ok_or_else(|| ConfigError::Tag {
            domain: domain.to_string(),
            tag: tag.to_string(),
        })?;

        Ok(Self {
            tag: tag.to_string(),
            class: class
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            selector,
        })
    }

    /// Selector matching every element with the rule's tag.
    pub fn tag_selector(&self) -> &Selector {
        &self.selector
    }
}

/// Crawl rule for one domain.
#[derive(Debug, Clone)]
pub struct DomainRule {
    pub domain: String,
    /// `None` means "use the whole body"
    pub content: Option<ContentSelector>,
    pub link_pattern: Regex,
}

impl DomainRule {
    pub fn new(
        domain: &str,
        content: Option<(&str, Option<&str>)>,
        link_pattern: &str,
    ) -> Result<Self, ConfigError> {
        let link_pattern = Regex::new(link_pattern).map_err(|source| ConfigError::Pattern {
            domain: domain.to_string(),
            source,
        })?;

        if !link_pattern.capture_names().flatten().any(|name| name == "slug") {
            warn!(
                "Link pattern for {} has no 'slug' group: {}",
                domain,
                link_pattern.as_str()
            );
        }

        let content = match content {
            Some((tag, class)) => Some(ContentSelector::new(domain, tag, class)?),
            None => None,
        };

        Ok(Self {
            domain: domain.to_string(),
            content,
            link_pattern,
        })
    }
}

/// A rule as written in the config file.
///
/// ```toml
/// [[rules]]
/// domain = "example.test"
/// tag = "div"
/// class = "content"
/// link_pattern = '^/blog/(?P<slug>[\w-]+)/$'
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RuleSpec {
    pub domain: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub link_pattern: Option<String>,
}

impl RuleSpec {
    fn compile(&self) -> Result<DomainRule, ConfigError> {
        let content = self
            .tag
            .as_deref()
            .map(|tag| (tag, self.class.as_deref()));
        let pattern = self
            .link_pattern
            .as_deref()
            .unwrap_or(FALLBACK_LINK_PATTERN);
        DomainRule::new(&self.domain, content, pattern)
    }
}

// Shape of a standalone rules file
#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    rules: Vec<RuleSpec>,
}

/// Read-only map from domain to its crawl rule.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: HashMap<String, DomainRule>,
    fallback: Regex,
}

impl RuleRegistry {
    /// Registry with no rules: every site gets body extraction and the
    /// fallback link pattern.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
            // FALLBACK_LINK_PATTERN is a constant, checked by the tests below
            fallback: Regex::new(FALLBACK_LINK_PATTERN).expect("fallback pattern is valid"),
        }
    }

    /// Registry with the sites this crawler ships rules for.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        let specs = builtin_specs();
        for spec in &specs {
            // Built-in specs are constants, covered by test_builtin_rules_compile
            let rule = spec.compile().expect("built-in rule is valid");
            registry.insert(rule);
        }
        registry
    }

    /// Parses a TOML document with a `[[rules]]` array into a registry.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: RulesFile = toml::from_str(text)?;
        Self::empty().with_specs(&file.rules)
    }

    /// Adds (or replaces) rules from config specs.
    pub fn with_specs(mut self, specs: &[RuleSpec]) -> Result<Self, ConfigError> {
        for spec in specs {
            let rule = spec.compile()?;
            if self.rules.contains_key(&rule.domain) {
                debug!("Overriding rule for {}", rule.domain);
            }
            self.insert(rule);
        }
        Ok(self)
    }

    pub fn insert(&mut self, rule: DomainRule) {
        debug!(
            "Registered rule for {} (pattern {})",
            rule.domain,
            rule.link_pattern.as_str()
        );
        self.rules.insert(rule.domain.clone(), rule);
    }

    pub fn lookup(&self, domain: &str) -> Option<&DomainRule> {
        self.rules.get(domain)
    }

    /// The link pattern for `domain`, or the fallback pattern.
    pub fn link_pattern(&self, domain: &str) -> &Regex {
        self.lookup(domain)
            .map(|rule| &rule.link_pattern)
            .unwrap_or(&self.fallback)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_specs() -> Vec<RuleSpec> {
    let spec = |domain: &str, tag: &str, class: &str, pattern: &str| RuleSpec {
        domain: domain.to_string(),
        tag: Some(tag.to_string()),
        class: Some(class.to_string()),
        link_pattern: Some(pattern.to_string()),
    };

    vec![
        spec(
            "tim.blog",
            "div",
            "content-area",
            r"^/(?P<year>\d+){4}/(?P<month>\d+){2}/(?P<day>\d+){2}/(?P<slug>[\w-]+)/$",
        ),
        spec(
            "a-blog-of-interest.com",
            "div",
            "main-container",
            r"^/blog/(?P<slug>[\w-]+)/$",
        ),
        spec(
            "www.nosolosig.com",
            "div",
            "t3-content",
            r"^/libros-geo/(?P<slug>[\w-]+)$",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_compile() {
        let registry = RuleRegistry::builtin();
        assert_eq!(registry.len(), 3);

        let rule = registry.lookup("a-blog-of-interest.com").unwrap();
        let content = rule.content.as_ref().unwrap();
        assert_eq!(content.tag, "div");
        assert_eq!(content.class.as_deref(), Some("main-container"));
    }

    #[test]
    fn test_lookup_unknown_domain() {
        let registry = RuleRegistry::builtin();
        assert!(registry.lookup("unknown.example").is_none());
        assert_eq!(
            registry.link_pattern("unknown.example").as_str(),
            FALLBACK_LINK_PATTERN
        );
    }

    #[test]
    fn test_tim_blog_pattern() {
        let registry = RuleRegistry::builtin();
        let pattern = registry.link_pattern("tim.blog");
        assert!(pattern.is_match("/2021/05/03/some-post/"));
        assert!(!pattern.is_match("/about/"));
    }

    #[test]
    fn test_from_toml_str() {
        let text = r#"
            [[rules]]
            domain = "example.test"
            tag = "div"
            class = "content"
            link_pattern = '^/blog/(?P<slug>[\w-]+)/$'

            [[rules]]
            domain = "plain.test"
        "#;
        let registry = RuleRegistry::from_toml_str(text).unwrap();
        assert_eq!(registry.len(), 2);

        let plain = registry.lookup("plain.test").unwrap();
        assert!(plain.content.is_none());
        assert_eq!(plain.link_pattern.as_str(), FALLBACK_LINK_PATTERN);
    }

    #[test]
    fn test_config_rules_override_builtin() {
        let spec = RuleSpec {
            domain: "tim.blog".to_string(),
            tag: Some("article".to_string()),
            class: None,
            link_pattern: Some(r"^/posts/(?P<slug>[\w-]+)$".to_string()),
        };
        let registry = RuleRegistry::builtin().with_specs(&[spec]).unwrap();
        assert_eq!(registry.len(), 3);

        let rule = registry.lookup("tim.blog").unwrap();
        assert_eq!(rule.content.as_ref().unwrap().tag, "article");
        assert!(rule.link_pattern.is_match("/posts/hello"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let spec = RuleSpec {
            domain: "bad.test".to_string(),
            tag: None,
            class: None,
            link_pattern: Some("^/(unclosed".to_string()),
        };
        let result = RuleRegistry::empty().with_specs(&[spec]);
        assert!(matches!(result, Err(ConfigError::Pattern { .. })));
    }

    #[test]
    fn test_invalid_tag_is_rejected() {
        let result = DomainRule::new("bad.test", Some(("div > p", None)), FALLBACK_LINK_PATTERN);
        assert!(matches!(result, Err(ConfigError::Tag { .. })));
    }
}
