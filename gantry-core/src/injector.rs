// Dependency injection pass of the startup pipeline

use crate::registry::BeanRegistry;
use tracing::{debug, warn};

/// Populate every injectable field across the registry. Runs exactly once,
/// after all beans exist, so references resolve regardless of instantiation
/// order and cyclic pairs resolve without any detection logic.
///
/// An unresolvable target leaves the field at its zero value (weak
/// binding); it is not a hard failure.
pub fn autowire(registry: &BeanRegistry) {
    for (bean_name, bean) in registry.iter() {
        for point in bean.descriptor.injects {
            let target = point.target_bean_name();
            match registry.get(target) {
                Some(dependency) => {
                    if let Err(err) = (point.assign)(&bean.instance, dependency) {
                        warn!(
                            bean = bean_name,
                            field = point.field,
                            target,
                            error = %err,
                            "Failed to assign dependency"
                        );
                    } else {
                        debug!(
                            bean = bean_name,
                            field = point.field,
                            target,
                            "Dependency injected"
                        );
                    }
                }
                None => {
                    debug!(
                        bean = bean_name,
                        field = point.field,
                        target,
                        "No bean for injection target, leaving field at zero value"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ComponentCatalog;
    use crate::component::{
        BeanRef, ComponentDescriptor, ComponentKind, Inject, InjectionPoint,
    };
    use crate::error::Error;
    use crate::registry::RegisteredBean;
    use std::sync::Arc;

    #[derive(Default)]
    struct Left {
        right: Inject<Right>,
    }

    #[derive(Default)]
    struct Right {
        left: Inject<Left>,
    }

    fn new_left() -> Result<BeanRef, Error> {
        Ok(Arc::new(Left::default()))
    }

    fn new_right() -> Result<BeanRef, Error> {
        Ok(Arc::new(Right::default()))
    }

    fn wire_left_right(target: &BeanRef, dep: &RegisteredBean) -> Result<(), Error> {
        let left = target
            .downcast_ref::<Left>()
            .ok_or_else(|| Error::DependencyInjection("expected Left".into()))?;
        let right = dep
            .downcast::<Right>()
            .ok_or_else(|| Error::DependencyInjection("expected Right".into()))?;
        left.right.set(right);
        Ok(())
    }

    fn wire_right_left(target: &BeanRef, dep: &RegisteredBean) -> Result<(), Error> {
        let right = target
            .downcast_ref::<Right>()
            .ok_or_else(|| Error::DependencyInjection("expected Right".into()))?;
        let left = dep
            .downcast::<Left>()
            .ok_or_else(|| Error::DependencyInjection("expected Left".into()))?;
        right.left.set(left);
        Ok(())
    }

    static LEFT: ComponentDescriptor = ComponentDescriptor {
        type_name: "pair::Left",
        kind: ComponentKind::Service {
            name: "",
            capabilities: &[],
        },
        factory: new_left,
        injects: &[InjectionPoint {
            field: "right",
            name: "right",
            type_name: "pair::Right",
            assign: wire_left_right,
        }],
    };

    static RIGHT: ComponentDescriptor = ComponentDescriptor {
        type_name: "pair::Right",
        kind: ComponentKind::Service {
            name: "",
            capabilities: &[],
        },
        factory: new_right,
        injects: &[InjectionPoint {
            field: "left",
            name: "left",
            type_name: "pair::Left",
            assign: wire_right_left,
        }],
    };

    fn registry_of(descriptors: Vec<&'static ComponentDescriptor>) -> BeanRegistry {
        let catalog = ComponentCatalog::with_descriptors(descriptors.clone());
        let names: Vec<String> = descriptors
            .iter()
            .map(|d| d.type_name.to_string())
            .collect();
        BeanRegistry::instantiate(&catalog, &names).unwrap()
    }

    #[test]
    fn test_cyclic_pair_resolves_without_detection() {
        let registry = registry_of(vec![&LEFT, &RIGHT]);
        autowire(&registry);

        let left = registry.get("left").unwrap().downcast::<Left>().unwrap();
        let right = registry.get("right").unwrap().downcast::<Right>().unwrap();
        assert!(left.right.is_bound());
        assert!(right.left.is_bound());
    }

    #[test]
    fn test_missing_target_leaves_field_empty() {
        let registry = registry_of(vec![&LEFT]);
        autowire(&registry);

        let left = registry.get("left").unwrap().downcast::<Left>().unwrap();
        assert!(!left.right.is_bound());
    }
}
