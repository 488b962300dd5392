//! Rule fragment format
//!
//! A rule file starts with a `---`-delimited frontmatter block carrying
//! `description`, `globs` (comma-separated patterns), and `alwaysApply`,
//! followed by a free-form body:
//!
//! ```text
//! ---
//! description: Python style rules
//! globs: *.py,tools/**/*.py
//! alwaysApply: false
//! ---
//! Use snake_case everywhere.
//! ```

use std::collections::BTreeSet;

/// Parsed rule frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFrontmatter {
    pub description: Option<String>,
    pub globs: Option<Vec<String>>,
    pub always_apply: bool,
}

impl RuleFrontmatter {
    pub fn parse(frontmatter: &str) -> Self {
        let mut result = Self::default();
        for line in frontmatter.lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix("description:") {
                result.description = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix("globs:") {
                let rest = rest.trim();
                result.globs = Some(if rest.is_empty() {
                    Vec::new()
                } else {
                    rest.split(',').map(|glob| glob.trim().to_string()).collect()
                });
            } else if let Some(rest) = line.strip_prefix("alwaysApply:") {
                result.always_apply = rest.to_lowercase().contains("true");
            }
        }
        result
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("description: {description}"));
        }
        if let Some(globs) = &self.globs {
            lines.push(format!("globs: {}", globs.join(",")));
        }
        lines.push(format!("alwaysApply: {}", self.always_apply));
        lines.join("\n")
    }
}

/// A parsed rule fragment.
#[derive(Debug, Clone)]
pub struct Rule {
    pub frontmatter: RuleFrontmatter,
    pub body: String,
}

impl Rule {
    /// Parse a rule file. Returns `None` when no valid frontmatter block
    /// is present.
    pub fn parse(content: &str) -> Option<Self> {
        let parts: Vec<&str> = content.splitn(3, "---\n").collect();
        if parts.len() != 3 {
            return None;
        }
        Some(Self {
            frontmatter: RuleFrontmatter::parse(parts[1]),
            body: parts[2].to_string(),
        })
    }

    pub fn render(&self) -> String {
        format!("---\n{}\n---\n{}", self.frontmatter.render(), self.body)
    }

    /// Two rules carry the same content when description, body, and
    /// alwaysApply agree; globs are deliberately ignored.
    pub fn content_matches(&self, other: &Self) -> bool {
        self.frontmatter.description == other.frontmatter.description
            && self.body == other.body
            && self.frontmatter.always_apply == other.frontmatter.always_apply
    }

    /// Whether this rule is loaded on demand by the agent rather than
    /// applied by scope: no globs and no alwaysApply.
    pub fn is_agent_requested(&self) -> bool {
        !self.frontmatter.always_apply
            && self.frontmatter.globs.as_deref().is_none_or(|globs| globs.is_empty())
    }
}

/// Rewrite a fragment's applicability to its owning repository's
/// subdirectory.
///
/// `alwaysApply: true` becomes a repo-wide glob; existing globs are
/// prefixed with the repository name. Agent-requested fragments and
/// fragments without parseable frontmatter pass through unchanged.
pub fn rescope(content: &str, repo_name: &str) -> String {
    let Some(mut rule) = Rule::parse(content) else {
        return content.to_string();
    };

    if rule.is_agent_requested() {
        return content.to_string();
    }

    if rule.frontmatter.always_apply {
        rule.frontmatter.always_apply = false;
        rule.frontmatter.globs = Some(vec![format!("{repo_name}/**/*")]);
    } else if let Some(globs) = rule.frontmatter.globs.take() {
        rule.frontmatter.globs = Some(
            globs
                .into_iter()
                .map(|glob| format!("{repo_name}/{glob}"))
                .collect(),
        );
    }

    rule.render()
}

/// Combine same-named rules from several repositories when their content
/// is identical modulo globs.
///
/// Returns the combined fragment with the sorted, deduplicated union of
/// all globs, or `None` when the contents genuinely diverge.
pub fn combine_identical(contents: &[(String, String)]) -> Option<String> {
    let parsed: Vec<Rule> = contents
        .iter()
        .filter_map(|(_, content)| Rule::parse(content))
        .collect();
    if parsed.is_empty() {
        return None;
    }

    let reference = &parsed[0];
    if !parsed.iter().all(|rule| rule.content_matches(reference)) {
        return None;
    }

    let all_globs: BTreeSet<String> = parsed
        .iter()
        .filter_map(|rule| rule.frontmatter.globs.as_ref())
        .flatten()
        .cloned()
        .collect();

    let combined = Rule {
        frontmatter: RuleFrontmatter {
            description: reference.frontmatter.description.clone(),
            globs: if all_globs.is_empty() {
                None
            } else {
                Some(all_globs.into_iter().collect())
            },
            always_apply: reference.frontmatter.always_apply,
        },
        body: reference.body.clone(),
    };

    Some(combined.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STYLE_RULE: &str = "---\ndescription: Style rules\nglobs: *.py\nalwaysApply: false\n---\nUse snake_case.\n";

    #[test]
    fn test_parse_roundtrip() {
        let rule = Rule::parse(STYLE_RULE).unwrap();
        assert_eq!(rule.frontmatter.description.as_deref(), Some("Style rules"));
        assert_eq!(rule.frontmatter.globs, Some(vec!["*.py".to_string()]));
        assert!(!rule.frontmatter.always_apply);
        assert_eq!(rule.body, "Use snake_case.\n");
        assert_eq!(rule.render(), STYLE_RULE);
    }

    #[test]
    fn test_parse_without_frontmatter_is_none() {
        assert!(Rule::parse("just a body\n").is_none());
    }

    #[test]
    fn test_rescope_prefixes_globs() {
        let rescoped = rescope(STYLE_RULE, "api");
        let rule = Rule::parse(&rescoped).unwrap();
        assert_eq!(rule.frontmatter.globs, Some(vec!["api/*.py".to_string()]));
    }

    #[test]
    fn test_rescope_always_apply_becomes_repo_glob() {
        let content = "---\nalwaysApply: true\n---\nAlways.\n";
        let rescoped = rescope(content, "api");
        let rule = Rule::parse(&rescoped).unwrap();
        assert!(!rule.frontmatter.always_apply);
        assert_eq!(rule.frontmatter.globs, Some(vec!["api/**/*".to_string()]));
    }

    #[test]
    fn test_rescope_leaves_agent_requested_rules_alone() {
        let content = "---\ndescription: On demand\nalwaysApply: false\n---\nBody.\n";
        assert_eq!(rescope(content, "api"), content);
    }

    #[test]
    fn test_rescope_passes_through_unparseable_content() {
        let content = "no frontmatter here\n";
        assert_eq!(rescope(content, "api"), content);
    }

    #[test]
    fn test_combine_identical_unions_globs_sorted() {
        let contents = vec![
            (
                "repo0".to_string(),
                "---\ndescription: Style\nglobs: *.ts\nalwaysApply: false\n---\nBody.\n".to_string(),
            ),
            (
                "repo1".to_string(),
                "---\ndescription: Style\nglobs: *.py\nalwaysApply: false\n---\nBody.\n".to_string(),
            ),
        ];
        let combined = combine_identical(&contents).unwrap();
        let rule = Rule::parse(&combined).unwrap();
        assert_eq!(
            rule.frontmatter.globs,
            Some(vec!["*.py".to_string(), "*.ts".to_string()])
        );
    }

    #[test]
    fn test_combine_divergent_bodies_fails() {
        let contents = vec![
            (
                "repo0".to_string(),
                "---\nglobs: *.py\nalwaysApply: false\n---\nBody A.\n".to_string(),
            ),
            (
                "repo1".to_string(),
                "---\nglobs: *.py\nalwaysApply: false\n---\nBody B.\n".to_string(),
            ),
        ];
        assert!(combine_identical(&contents).is_none());
    }
}
