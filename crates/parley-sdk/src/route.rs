//! REST routes and their compiled, parameter-substituted form.

use std::fmt;

use reqwest::Method;

/// An endpoint template such as `/servers/{server_id}/roles`.
#[derive(Debug, Clone)]
pub struct Route {
    method: Method,
    template: &'static str,
}

impl Route {
    pub const fn new(method: Method, template: &'static str) -> Self {
        Self { method, template }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Number of `{…}` placeholders in the template.
    pub fn param_count(&self) -> usize {
        self.template.matches('{').count()
    }

    /// Substitute `params` into the placeholders, in order.
    pub fn compile(&self, params: &[&str]) -> CompiledRoute {
        debug_assert_eq!(
            params.len(),
            self.param_count(),
            "wrong number of params for {}",
            self.template
        );

        let mut path = String::with_capacity(self.template.len() + 24);
        let mut params = params.iter();
        let mut rest = self.template;

        while let Some(open) = rest.find('{') {
            path.push_str(&rest[..open]);
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            if let Some(p) = params.next() {
                path.push_str(p);
            }
            rest = &rest[open + close + 1..];
        }
        path.push_str(rest);

        CompiledRoute {
            method: self.method.clone(),
            path,
        }
    }
}

/// A route with all parameters filled in, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRoute {
    pub method: Method,
    pub path: String,
}

impl fmt::Display for CompiledRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

// ── Servers ───────────────────────────────────────────────────────────────────

pub const GET_SERVER: Route = Route::new(Method::GET, "/servers/{server_id}");

pub const GET_SELF_MEMBER: Route = Route::new(Method::GET, "/servers/{server_id}/members/@me");

// ── Roles ─────────────────────────────────────────────────────────────────────

pub const CREATE_ROLE: Route = Route::new(Method::POST, "/servers/{server_id}/roles");
