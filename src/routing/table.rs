//! Enumerable route table mapping (method, path template) to a handler key

use axum::http::Method;
use std::collections::HashMap;

/// One registered route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry<H> {
    pub method: Method,
    /// Path template with `{param}` segments, always ending in `/`
    pub path: String,
    /// Reverse-lookup name, e.g. `messages-list`
    pub name: String,
    pub handler: H,
}

/// Outcome of resolving a request against a [`RouteTable`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<H> {
    Matched {
        handler: H,
        name: String,
        params: HashMap<String, String>,
    },
    MethodNotAllowed {
        allowed: Vec<Method>,
    },
    NotFound,
}

/// Explicit route table. Every route the service answers is listed here, so the
/// set can be enumerated and checked without starting a server.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    entries: Vec<RouteEntry<H>>,
}

impl<H: Clone> RouteTable<H> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a single route. `path` is normalised to start and end with `/`.
    pub fn route(mut self, method: Method, path: &str, name: &str, handler: H) -> Self {
        let path = normalize_template(path);
        debug_assert!(
            !self
                .entries
                .iter()
                .any(|e| e.method == method && e.path == path),
            "duplicate route {method} {path}"
        );
        self.entries.push(RouteEntry {
            method,
            path,
            name: name.to_string(),
            handler,
        });
        self
    }

    /// Mount every route of `other` under `prefix`
    pub fn nest(mut self, prefix: &str, other: RouteTable<H>) -> Self {
        let prefix = prefix.trim_matches('/');
        for entry in other.entries {
            let path = if prefix.is_empty() {
                entry.path
            } else {
                format!("/{}{}", prefix, entry.path)
            };
            self.entries.push(RouteEntry { path, ..entry });
        }
        self
    }

    /// All registered routes, in registration order
    pub fn routes(&self) -> &[RouteEntry<H>] {
        &self.entries
    }

    /// Distinct path templates, in registration order
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !paths.contains(&entry.path.as_str()) {
                paths.push(&entry.path);
            }
        }
        paths
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the template of a route by its name
    pub fn reverse(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.path.as_str())
    }

    /// Methods accepted on the template matching `path`. `HEAD` is implied by `GET`.
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        match self.best_template(path) {
            Some((template, _)) => self.methods_for(template),
            None => Vec::new(),
        }
    }

    /// Resolve a request. Literal segments take precedence over `{param}` segments.
    pub fn resolve(&self, method: &Method, path: &str) -> Resolution<H> {
        let Some((template, params)) = self.best_template(path) else {
            return Resolution::NotFound;
        };

        let lookup = if *method == Method::HEAD {
            Method::GET
        } else {
            method.clone()
        };

        match self
            .entries
            .iter()
            .find(|e| e.path == template && e.method == lookup)
        {
            Some(entry) => Resolution::Matched {
                handler: entry.handler.clone(),
                name: entry.name.clone(),
                params,
            },
            None => Resolution::MethodNotAllowed {
                allowed: self.methods_for(template),
            },
        }
    }

    fn methods_for(&self, template: &str) -> Vec<Method> {
        let mut methods: Vec<Method> = self
            .entries
            .iter()
            .filter(|e| e.path == template)
            .map(|e| e.method.clone())
            .collect();
        if methods.contains(&Method::GET) && !methods.contains(&Method::HEAD) {
            methods.push(Method::HEAD);
        }
        methods
    }

    fn best_template(&self, path: &str) -> Option<(&str, HashMap<String, String>)> {
        let mut best: Option<(&str, HashMap<String, String>, usize)> = None;
        for template in self.paths() {
            if let Some((params, literals)) = match_template(template, path) {
                let better = best.as_ref().map_or(true, |(_, _, l)| literals > *l);
                if better {
                    best = Some((template, params, literals));
                }
            }
        }
        best.map(|(template, params, _)| (template, params))
    }
}

impl<H: Clone> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ensure a template starts and ends with `/`
fn normalize_template(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Match `path` against `template`, returning captured params and the number of
/// literal segments matched. The trailing slash is significant.
pub fn match_template(template: &str, path: &str) -> Option<(HashMap<String, String>, usize)> {
    if template.ends_with('/') != path.ends_with('/') {
        return None;
    }

    let t_segments: Vec<&str> = template.trim_matches('/').split('/').collect();
    let p_segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    if t_segments.len() != p_segments.len() {
        return None;
    }

    let mut params = HashMap::new();
    let mut literals = 0;
    for (t, p) in t_segments.iter().zip(p_segments.iter()) {
        if let Some(name) = param_name(t) {
            if p.is_empty() || p.contains('.') {
                return None;
            }
            params.insert(name.to_string(), (*p).to_string());
        } else if t == p {
            literals += 1;
        } else {
            return None;
        }
    }

    Some((params, literals))
}

fn param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// Convert a `{param}` template into axum 0.7 `:param` syntax
pub fn to_axum_path(template: &str) -> String {
    template
        .split('/')
        .map(|segment| match param_name(segment) {
            Some(name) => format!(":{}", name),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
