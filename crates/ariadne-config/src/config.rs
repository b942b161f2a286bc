//! Typed routing configuration.
//!
//! All structs deserialize strictly (`deny_unknown_fields`): a typo in a
//! configuration file is a startup failure, not a silently ignored field.

use serde::{Deserialize, Serialize};

use ariadne_core::NamespaceRoot;
use ariadne_router::{MethodSet, RouteEntry, RouteTable, RoutingMode, DEFAULT_ROUTE_PARAM};

use crate::error::ConfigError;

/// Top-level routing configuration.
///
/// # Example (TOML)
///
/// ```toml
/// implicit = true
///
/// [mode]
/// kind = "path_rewrite"
/// base_path = "/app"
///
/// [[routes]]
/// pattern = "/article/:id"
/// handler = "Article.Show"
/// methods = "GET"
///
/// [[routes]]
/// prefix = "/api"
/// routes = [
///     { pattern = "/users", handler = "User.List", methods = "GET" },
///     { pattern = "/users", handler = "User.Create", methods = "POST" },
/// ]
///
/// [[namespaces]]
/// prefix = "App.Handler"
/// handler_suffix = ""
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct RoutingConfig {
    /// Routing mode settings.
    pub mode: ModeConfig,
    /// Whether an unrouted path may resolve through the naming convention.
    pub implicit: bool,
    /// Ordered route entries; order encodes priority within a precedence
    /// class.
    pub routes: Vec<RouteDef>,
    /// Namespace roots in resolution priority order.
    pub namespaces: Vec<NamespaceDef>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            mode: ModeConfig::default(),
            implicit: true,
            routes: Vec::new(),
            namespaces: vec![NamespaceDef::default()],
        }
    }
}

impl RoutingConfig {
    /// Expands grouped entries and parses method constraints into the flat
    /// entry list consumed by `RouteTable::build`.
    pub fn route_entries(&self) -> Result<Vec<RouteEntry>, ConfigError> {
        let mut entries = Vec::new();
        for def in &self.routes {
            match def {
                RouteDef::Route(spec) => entries.push(spec.to_entry(None)?),
                RouteDef::Group(group) => {
                    for spec in &group.routes {
                        entries.push(spec.to_entry(Some(&group.prefix))?);
                    }
                }
            }
        }
        Ok(entries)
    }

    /// The typed namespace root list.
    #[must_use]
    pub fn namespace_roots(&self) -> Vec<NamespaceRoot> {
        self.namespaces
            .iter()
            .map(|ns| NamespaceRoot::new(ns.prefix.clone(), ns.handler_suffix.clone()))
            .collect()
    }

    /// Checks the configuration without building anything the caller keeps:
    /// every pattern must compile, every method constraint must parse, and
    /// mode fields must be coherent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mode.validate()?;
        let entries = self.route_entries()?;
        RouteTable::build(entries)?;
        Ok(())
    }

    /// Builds the route table from this configuration.
    pub fn build_table(&self) -> Result<RouteTable, ConfigError> {
        Ok(RouteTable::build(self.route_entries()?)?)
    }
}

/// Routing mode selection plus its mode-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct ModeConfig {
    /// Which transport convention is active.
    pub kind: ModeKind,
    /// Query-parameter mode: prefix prepended to generated URLs.
    pub base: String,
    /// Query-parameter mode: name of the parameter carrying the path.
    pub route_param: String,
    /// Path-rewrite mode: base prefix stripped on match and prepended on
    /// generation.
    pub base_path: String,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            kind: ModeKind::QueryParam,
            base: String::new(),
            route_param: DEFAULT_ROUTE_PARAM.to_string(),
            base_path: String::new(),
        }
    }
}

impl ModeConfig {
    /// Converts to the runtime [`RoutingMode`].
    #[must_use]
    pub fn to_mode(&self) -> RoutingMode {
        match self.kind {
            ModeKind::QueryParam => RoutingMode::QueryParam {
                base: self.base.clone(),
                route_param: self.route_param.clone(),
            },
            ModeKind::PathRewrite => RoutingMode::PathRewrite {
                base_path: self.base_path.clone(),
            },
            ModeKind::ArgumentVector => RoutingMode::ArgumentVector,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.kind {
            ModeKind::QueryParam if self.route_param.is_empty() => Err(ConfigError::validation(
                "mode.route_param must not be empty in query_param mode",
            )),
            ModeKind::PathRewrite
                if !self.base_path.is_empty() && !self.base_path.starts_with('/') =>
            {
                Err(ConfigError::validation(
                    "mode.base_path must start with '/' when set",
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Transport convention selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    /// Route path travels in a query parameter.
    QueryParam,
    /// Route path is the rewritten request path.
    PathRewrite,
    /// Route path is the first positional CLI argument.
    ArgumentVector,
}

/// A route entry: either a single route or a prefixed group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RouteDef {
    /// A single route.
    Route(RouteSpec),
    /// A group of routes sharing a pattern prefix.
    Group(RouteGroup),
}

/// A single configured route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouteSpec {
    /// The route pattern (e.g. `/article/:id`).
    pub pattern: String,
    /// The symbolic handler name the route targets.
    pub handler: String,
    /// Method constraint: `"Any"`, a verb, or a comma-separated verb list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<String>,
}

impl RouteSpec {
    fn to_entry(&self, prefix: Option<&str>) -> Result<RouteEntry, ConfigError> {
        let pattern = match prefix {
            Some(prefix) => format!(
                "{}/{}",
                prefix.trim_end_matches('/'),
                self.pattern.trim_start_matches('/')
            ),
            None => self.pattern.clone(),
        };
        let methods = match &self.methods {
            Some(spec) => MethodSet::parse(spec)?,
            None => MethodSet::Any,
        };
        Ok(RouteEntry::new(pattern, self.handler.clone()).with_methods(methods))
    }
}

/// A group of routes whose patterns share a prefix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouteGroup {
    /// Prefix prepended to every member pattern.
    pub prefix: String,
    /// Member routes.
    pub routes: Vec<RouteSpec>,
}

/// A configured namespace root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields, default)]
pub struct NamespaceDef {
    /// Symbolic prefix (e.g. `App.Command`); may be empty.
    pub prefix: String,
    /// Suffix appended to handler names (e.g. `Command`); may be empty.
    pub handler_suffix: String,
}
