//! Per-invocation rendering context.
//!
//! Holds the template variables and the subagent list used to render prompt
//! previews, plus the host's lifecycle hooks. One context is created per
//! palette invocation and dropped once the choice has been dispatched.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::types::Agent;

/// Host lifecycle hooks around a picker session.
pub trait ContextHooks: Send + Sync {
    /// Restore whatever state the host suspended to show the picker.
    fn resume(&self);

    /// Release captured state before a chosen action runs.
    fn clear(&self);
}

/// Hooks that do nothing.
pub struct NoopHooks;

impl ContextHooks for NoopHooks {
    fn resume(&self) {}

    fn clear(&self) {}
}

/// Shared state for rendering prompt templates.
#[derive(Clone)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
    agents: Vec<Agent>,
    hooks: Arc<dyn ContextHooks>,
}

impl RenderContext {
    /// Create a context with the given variables and hooks.
    pub fn new(variables: BTreeMap<String, String>, hooks: Arc<dyn ContextHooks>) -> Self {
        Self {
            variables,
            agents: Vec::new(),
            hooks,
        }
    }

    /// Value bound to `name`, if any.
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// All bound variables.
    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Agents attached for `@mention` resolution.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Whether `name` is an attached agent.
    pub fn has_agent(&self, name: &str) -> bool {
        self.agents.iter().any(|a| a.name == name)
    }

    /// Replace the attached agent list.
    pub fn set_agents(&mut self, agents: Vec<Agent>) {
        self.agents = agents;
    }

    /// Invoke the host's resume hook.
    pub fn resume(&self) {
        self.hooks.resume();
    }

    /// Invoke the host's clear hook.
    pub fn clear(&self) {
        self.hooks.clear();
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(BTreeMap::new(), Arc::new(NoopHooks))
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("variables", &self.variables)
            .field("agents", &self.agents)
            .finish_non_exhaustive()
    }
}
