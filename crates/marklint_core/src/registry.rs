//! Rule registration and per-pass rule sets.
//!
//! A [`RuleRegistry`] maps qualified ids (`namespace:name`) to rule
//! implementations. A [`RuleSet`] is the ordered, option-bound list of rules
//! one lint pass runs; it is built either directly with
//! [`RuleSet::configure`] or from a [`LinterConfig`] with
//! [`RuleRegistry::resolve`].

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::{LinterConfig, LinterError, Rule, Severity};

/// A qualified rule identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId {
    namespace: String,
    name: String,
}

impl RuleId {
    /// Creates a rule id, rejecting empty segments, whitespace and `:`.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self, LinterError> {
        let namespace = namespace.into();
        let name = name.into();
        validate_segment(&namespace, "namespace")?;
        validate_segment(&name, "name")?;
        Ok(Self { namespace, name })
    }

    /// The namespace part.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The name part.
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn validate_segment(segment: &str, what: &str) -> Result<(), LinterError> {
    if segment.is_empty() {
        return Err(LinterError::config(format!("Rule {} must not be empty", what)));
    }
    if segment.contains(':') || segment.chars().any(char::is_whitespace) {
        return Err(LinterError::config(format!(
            "Rule {} '{}' must not contain ':' or whitespace",
            what, segment
        )));
    }
    Ok(())
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

impl FromStr for RuleId {
    type Err = LinterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, name) = s.split_once(':').ok_or_else(|| {
            LinterError::config(format!("Rule id '{}' must have the form namespace:name", s))
        })?;
        Self::new(namespace, name)
    }
}

/// A rule bound to its qualified id.
#[derive(Clone)]
pub struct RegisteredRule {
    id: RuleId,
    qualified: Arc<str>,
    rule: Arc<dyn Rule>,
}

impl RegisteredRule {
    /// Binds a rule implementation to an id without going through a registry.
    pub fn new(id: RuleId, rule: impl Rule + 'static) -> Self {
        Self::from_arc(id, Arc::new(rule))
    }

    fn from_arc(id: RuleId, rule: Arc<dyn Rule>) -> Self {
        let qualified = Arc::from(id.to_string());
        Self {
            id,
            qualified,
            rule,
        }
    }

    /// The rule's id.
    pub fn id(&self) -> &RuleId {
        &self.id
    }

    /// The rule's id as `namespace:name`.
    pub fn qualified_id(&self) -> &str {
        &self.qualified
    }

    /// The implementation.
    pub fn rule(&self) -> &dyn Rule {
        self.rule.as_ref()
    }
}

impl fmt::Debug for RegisteredRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredRule")
            .field("id", &self.qualified)
            .finish_non_exhaustive()
    }
}

/// Registry of available rules.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<RegisteredRule>,
    index: HashMap<RuleId, usize>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `rule` as `namespace:name`.
    ///
    /// Fails with [`LinterError::DuplicateRule`] if the qualified id is
    /// already taken.
    pub fn register(
        &mut self,
        namespace: &str,
        name: &str,
        rule: impl Rule + 'static,
    ) -> Result<RegisteredRule, LinterError> {
        let id = RuleId::new(namespace, name)?;
        if self.index.contains_key(&id) {
            return Err(LinterError::DuplicateRule(id.to_string()));
        }

        let registered = RegisteredRule::new(id.clone(), rule);
        debug!("Registered rule {}", registered.qualified_id());
        self.index.insert(id, self.rules.len());
        self.rules.push(registered.clone());
        Ok(registered)
    }

    /// Looks up a rule by qualified id.
    pub fn get(&self, id: &str) -> Option<&RegisteredRule> {
        let id = id.parse::<RuleId>().ok()?;
        self.index.get(&id).map(|&i| &self.rules[i])
    }

    /// Iterates rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredRule> {
        self.rules.iter()
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Builds the rule set described by `config`.
    ///
    /// Entries turned `off` are skipped, but must still name registered
    /// rules.
    pub fn resolve(&self, config: &LinterConfig) -> Result<RuleSet, LinterError> {
        let mut descriptors = Vec::with_capacity(config.rules.len());

        for definition in &config.rules {
            let rule = self
                .get(definition.id())
                .ok_or_else(|| LinterError::UnknownRule(definition.id().to_string()))?;

            if !definition.is_enabled() {
                debug!("Rule {} is turned off", rule.qualified_id());
                continue;
            }

            let mut descriptor = RuleDescriptor::new(rule.clone(), definition.options());
            if let Some(severity) = definition.severity() {
                descriptor = descriptor.with_severity(severity);
            }
            descriptors.push(descriptor);
        }

        RuleSet::from_descriptors(descriptors)
    }
}

/// One configured rule of a pass.
#[derive(Debug, Clone)]
pub struct RuleDescriptor {
    rule: RegisteredRule,
    options: Value,
    severity: Option<Severity>,
}

impl RuleDescriptor {
    /// Pairs a rule with its options.
    pub fn new(rule: RegisteredRule, options: Value) -> Self {
        Self {
            rule,
            options,
            severity: None,
        }
    }

    /// Forces every diagnostic this rule reports to `severity`.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// The qualified rule id.
    pub fn qualified_id(&self) -> &str {
        self.rule.qualified_id()
    }

    /// The implementation.
    pub fn rule(&self) -> &dyn Rule {
        self.rule.rule()
    }

    /// Options handed to the rule.
    pub fn options(&self) -> &Value {
        &self.options
    }

    /// Configured severity override.
    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }
}

/// The ordered rules one lint pass runs.
///
/// Cheap to clone and safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    descriptors: Arc<[RuleDescriptor]>,
}

impl RuleSet {
    /// A rule set that runs nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a rule set from `(rule, options)` pairs, keeping their order.
    pub fn configure<I>(rules: I) -> Result<Self, LinterError>
    where
        I: IntoIterator<Item = (RegisteredRule, Value)>,
    {
        Self::from_descriptors(
            rules
                .into_iter()
                .map(|(rule, options)| RuleDescriptor::new(rule, options))
                .collect(),
        )
    }

    /// Builds a rule set from descriptors, keeping their order.
    ///
    /// Fails if two descriptors share a qualified id or if a rule rejects
    /// its options. Nothing is built in either case.
    pub fn from_descriptors(descriptors: Vec<RuleDescriptor>) -> Result<Self, LinterError> {
        let mut seen = HashSet::with_capacity(descriptors.len());
        for descriptor in &descriptors {
            if !seen.insert(descriptor.qualified_id()) {
                return Err(LinterError::DuplicateRule(
                    descriptor.qualified_id().to_string(),
                ));
            }
        }

        for descriptor in &descriptors {
            descriptor
                .rule()
                .validate_options(descriptor.options())
                .map_err(|e| LinterError::InvalidOptions {
                    rule_id: descriptor.qualified_id().to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(Self {
            descriptors: descriptors.into(),
        })
    }

    /// Iterates descriptors in run order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleDescriptor> {
        self.descriptors.iter()
    }

    /// Qualified ids in run order.
    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(RuleDescriptor::qualified_id).collect()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if the set runs nothing.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
