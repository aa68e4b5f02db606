//! Route access policy: an ordered list of (path pattern, required access)
//! rules evaluated before a request reaches its handler. The first matching
//! rule wins; unmatched paths fall back to a configurable default.
//!
//! Role names map 1:1 to permission scopes; this module stores and evaluates
//! rules, it has no opinion on how routes are wired.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Access {
    PermitAll,
    Authenticated,
    HasRole(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessRule {
    /// Exact path, or a prefix ending in `/**`.
    pub pattern: String,
    pub access: Access,
}

#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
    fallback: Access,
}

impl AccessPolicy {
    pub fn new(fallback: Access) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    pub fn permit_all(mut self, pattern: &str) -> Self {
        self.rules.push(AccessRule {
            pattern: pattern.to_string(),
            access: Access::PermitAll,
        });
        self
    }

    pub fn require_role(mut self, pattern: &str, role: &str) -> Self {
        self.rules.push(AccessRule {
            pattern: pattern.to_string(),
            access: Access::HasRole(role.to_string()),
        });
        self
    }

    pub fn require_authenticated(mut self, pattern: &str) -> Self {
        self.rules.push(AccessRule {
            pattern: pattern.to_string(),
            access: Access::Authenticated,
        });
        self
    }

    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }

    /// Whether a principal (authenticated or not, holding `roles`) may reach
    /// `path`. Rules are checked in insertion order.
    pub fn allows(&self, path: &str, authenticated: bool, roles: &[String]) -> bool {
        let access = self
            .rules
            .iter()
            .find(|rule| pattern_matches(&rule.pattern, path))
            .map(|rule| &rule.access)
            .unwrap_or(&self.fallback);

        match access {
            Access::PermitAll => true,
            Access::Authenticated => authenticated,
            Access::HasRole(role) => authenticated && roles.iter().any(|r| r == role),
        }
    }
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/**") {
        Some(prefix) => path == prefix || path.starts_with(&format!("{prefix}/")),
        None => path == pattern,
    }
}

/// The rule table of the original deployment: static assets are public,
/// deletion and admin pages need ADMIN, user pages need USER, everything
/// else just needs an authenticated session.
pub fn default_policy() -> AccessPolicy {
    AccessPolicy::new(Access::Authenticated)
        .permit_all("/webjars/**")
        .permit_all("/login")
        .require_role("/deletePatient/**", "ADMIN")
        .require_role("/admin/**", "ADMIN")
        .require_role("/user/**", "USER")
}
