// Component catalog and package scanner
//
// The catalog replaces classpath walking: components submit descriptors at
// startup (`register_component!`, collected through `inventory`), or a test
// assembles an explicit catalog. `scan` then walks the declared package
// namespace the way the original scanner walked directories.

use crate::component::ComponentDescriptor;
use crate::error::Error;
use std::collections::HashMap;
use tracing::debug;

/// All component descriptors known to the process, keyed by
/// fully-qualified type name.
pub struct ComponentCatalog {
    descriptors: Vec<&'static ComponentDescriptor>,
    by_name: HashMap<&'static str, usize>,
}

impl ComponentCatalog {
    /// Build a catalog from an explicit descriptor list.
    pub fn with_descriptors(descriptors: Vec<&'static ComponentDescriptor>) -> Self {
        let by_name = descriptors
            .iter()
            .enumerate()
            .map(|(index, descriptor)| (descriptor.type_name, index))
            .collect();
        Self {
            descriptors,
            by_name,
        }
    }

    /// All descriptors submitted through `register_component!`.
    pub fn global() -> Self {
        Self::with_descriptors(inventory::iter::<ComponentDescriptor>.into_iter().collect())
    }

    /// Look up a descriptor by fully-qualified name.
    pub fn get(&self, type_name: &str) -> Option<&'static ComponentDescriptor> {
        self.by_name
            .get(type_name)
            .map(|&index| self.descriptors[index])
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Fully-qualified names of every component under `root`, recursing
    /// through sub-packages. A root under which nothing is cataloged cannot
    /// be resolved to a location and is a fatal startup misconfiguration.
    /// Order is registration order; callers must not depend on it.
    pub fn scan(&self, root: &str) -> Result<Vec<String>, Error> {
        let root = root.trim();
        if root.is_empty() {
            return Err(Error::Discovery("empty scan root".to_string()));
        }
        let names: Vec<String> = self
            .descriptors
            .iter()
            .filter(|descriptor| package_is_under(descriptor.package(), root))
            .map(|descriptor| descriptor.type_name.to_string())
            .collect();
        if names.is_empty() {
            return Err(Error::Discovery(format!(
                "scan root '{root}' does not resolve to any components"
            )));
        }
        debug!(root, count = names.len(), "Package scan complete");
        Ok(names)
    }
}

fn package_is_under(package: &str, root: &str) -> bool {
    package == root
        || package
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with("::"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{BeanRef, ComponentKind};
    use std::sync::Arc;

    fn unit_factory() -> Result<BeanRef, Error> {
        Ok(Arc::new(()) as BeanRef)
    }

    static ALPHA: ComponentDescriptor = ComponentDescriptor {
        type_name: "demo::web::AlphaController",
        kind: ComponentKind::HandlerGroup {
            prefix: "",
            routes: &[],
        },
        factory: unit_factory,
        injects: &[],
    };

    static BETA: ComponentDescriptor = ComponentDescriptor {
        type_name: "demo::service::impl_::BetaService",
        kind: ComponentKind::Service {
            name: "",
            capabilities: &[],
        },
        factory: unit_factory,
        injects: &[],
    };

    static OUTSIDE: ComponentDescriptor = ComponentDescriptor {
        type_name: "other::GammaService",
        kind: ComponentKind::Service {
            name: "",
            capabilities: &[],
        },
        factory: unit_factory,
        injects: &[],
    };

    fn catalog() -> ComponentCatalog {
        ComponentCatalog::with_descriptors(vec![&ALPHA, &BETA, &OUTSIDE])
    }

    #[test]
    fn test_scan_recurses_through_subpackages() {
        let names = catalog().scan("demo").unwrap();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"demo::web::AlphaController".to_string()));
        assert!(names.contains(&"demo::service::impl_::BetaService".to_string()));
    }

    #[test]
    fn test_scan_exact_package() {
        let names = catalog().scan("demo::web").unwrap();
        assert_eq!(names, vec!["demo::web::AlphaController".to_string()]);
    }

    #[test]
    fn test_scan_does_not_match_name_prefixes() {
        // "demo::we" is not a package, even though it prefixes "demo::web"
        assert!(matches!(
            catalog().scan("demo::we"),
            Err(Error::Discovery(_))
        ));
    }

    #[test]
    fn test_unresolvable_root_is_fatal() {
        assert!(matches!(
            catalog().scan("missing"),
            Err(Error::Discovery(_))
        ));
        assert!(matches!(catalog().scan("   "), Err(Error::Discovery(_))));
    }

    #[test]
    fn test_get_by_fully_qualified_name() {
        let catalog = catalog();
        assert!(catalog.get("demo::web::AlphaController").is_some());
        assert!(catalog.get("demo::web::Missing").is_none());
    }
}
