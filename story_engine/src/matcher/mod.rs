//! Trigger Matcher - first-match scan of free text over compiled rules.
//!
//! Rules are tested in declaration order. A rule matches when **any** of its
//! patterns occurs anywhere in the input; the first matching rule wins and the
//! scan stops. There is no scoring and no multi-rule firing.

mod pattern;

pub use pattern::*;

use story_graph::{Action, RuleDef, TriggerDocument};

/// A trigger rule with its patterns compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub id: Option<String>,
    pub patterns: Vec<TextPattern>,
    pub actions: Vec<Action>,
}

impl CompiledRule {
    /// Compile a rule, dropping patterns that fail to compile.
    ///
    /// `position` names the rule in errors when it has no identifier.
    pub fn compile(def: RuleDef, position: usize) -> (Self, Vec<MalformedPatternError>) {
        let label = def
            .id
            .clone()
            .unwrap_or_else(|| format!("#{}", position));

        let mut patterns = Vec::with_capacity(def.patterns.len());
        let mut rejected = Vec::new();

        for source in &def.patterns {
            match TextPattern::compile(source) {
                Ok(pattern) => patterns.push(pattern),
                Err(err) => {
                    tracing::warn!("Dropping pattern {:?} of rule {}: {}", source, label, err);
                    rejected.push(MalformedPatternError {
                        rule: label.clone(),
                        pattern: source.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let rule = Self {
            id: def.id,
            patterns,
            actions: def.actions,
        };
        (rule, rejected)
    }

    /// Whether any pattern occurs in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

/// Compiled rules in priority (declaration) order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// An empty rule set. Every lookup is a miss.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile every rule of a trigger document.
    ///
    /// Returns the rule set together with the patterns that were dropped.
    pub fn compile(doc: TriggerDocument) -> (Self, Vec<MalformedPatternError>) {
        let mut rules = Vec::with_capacity(doc.rules.len());
        let mut rejected = Vec::new();

        for (position, def) in doc.rules.into_iter().enumerate() {
            let (rule, errors) = CompiledRule::compile(def, position);
            rules.push(rule);
            rejected.extend(errors);
        }

        (Self { rules }, rejected)
    }

    /// Find the first rule matching `text`, or `None` on a miss.
    pub fn find_match(&self, text: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|rule| rule.matches(text))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }
}
