// Route table: composed at startup, read-only during request handling

use crate::component::{ComponentKind, RouteDecl};
use crate::registry::BeanRegistry;
use std::collections::HashMap;
use tracing::debug;

/// A normalized path bound to a handler method and its owning bean.
pub struct RouteBinding {
    pub bean_name: String,
    /// Fully-qualified name of the owning handler group, for diagnostics.
    pub group: &'static str,
    pub decl: &'static RouteDecl,
}

/// Normalized path to route binding. Matched by exact string equality; no
/// pattern or wildcard matching.
#[derive(Default)]
pub struct RouteTable {
    routes: HashMap<String, RouteBinding>,
}

impl RouteTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compose every handler-group's class-level prefix with its route
    /// suffixes. A composed path registered again later silently overwrites
    /// the earlier entry (last write wins).
    pub fn build(registry: &BeanRegistry) -> Self {
        let mut table = Self::empty();
        for (bean_name, bean) in registry.iter() {
            let ComponentKind::HandlerGroup { prefix, routes } = &bean.descriptor.kind else {
                continue;
            };
            for decl in *routes {
                let path = normalize_path(&format!("{}{}", prefix, decl.path));
                if table.routes.contains_key(&path) {
                    debug!(path = %path, handler = decl.handler_name, "Route overwritten by later registration");
                }
                table.routes.insert(
                    path,
                    RouteBinding {
                        bean_name: bean_name.to_string(),
                        group: bean.descriptor.type_name,
                        decl,
                    },
                );
            }
        }
        table
    }

    pub fn lookup(&self, path: &str) -> Option<&RouteBinding> {
        self.routes.get(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered paths in sorted order
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

/// Collapse runs of path separators into one.
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_was_separator = false;
    for c in path.chars() {
        if c == '/' {
            if !previous_was_separator {
                out.push(c);
            }
            previous_was_separator = true;
        } else {
            out.push(c);
            previous_was_separator = false;
        }
    }
    out
}
