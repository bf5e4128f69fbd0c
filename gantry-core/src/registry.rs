// Bean registry: the instantiation pass of the startup pipeline

use crate::catalog::ComponentCatalog;
use crate::component::{BeanRef, Capability, ComponentDescriptor, ComponentKind};
use crate::error::Error;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// An instantiated component together with its descriptor.
pub struct RegisteredBean {
    pub descriptor: &'static ComponentDescriptor,
    pub instance: BeanRef,
}

impl RegisteredBean {
    /// The bean instance as its concrete type.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.instance.clone().downcast::<T>().ok()
    }

    /// One of the bean's declared capabilities as `Arc<dyn Trait>`.
    pub fn as_capability<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        let capabilities: &[Capability] = match &self.descriptor.kind {
            ComponentKind::Service { capabilities, .. } => capabilities,
            ComponentKind::HandlerGroup { .. } => &[],
        };
        for capability in capabilities {
            if let Some(erased) = (capability.cast)(&self.instance) {
                if let Ok(cast) = erased.downcast::<Arc<T>>() {
                    return Some(*cast);
                }
            }
        }
        None
    }
}

/// Bean name to instance mapping. Populated once at startup, read-only
/// afterward.
pub struct BeanRegistry {
    beans: HashMap<String, RegisteredBean>,
}

impl BeanRegistry {
    pub fn empty() -> Self {
        Self {
            beans: HashMap::new(),
        }
    }

    /// Instantiate every scanned component carrying a handler-group or
    /// service marker, in scan order. A bean-name collision aborts startup;
    /// a failing constructor only skips that bean.
    pub fn instantiate(catalog: &ComponentCatalog, names: &[String]) -> Result<Self, Error> {
        let mut registry = Self::empty();
        for name in names {
            let Some(descriptor) = catalog.get(name) else {
                continue;
            };
            match &descriptor.kind {
                ComponentKind::HandlerGroup { .. } => {
                    let bean_name = lower_first(descriptor.simple_name());
                    registry.insert(bean_name, descriptor)?;
                }
                ComponentKind::Service {
                    name: explicit,
                    capabilities,
                } => {
                    let mut bean_name = if explicit.trim().is_empty() {
                        lower_first(descriptor.simple_name())
                    } else {
                        explicit.trim().to_string()
                    };
                    // A declared capability renames the bean to the
                    // capability's qualified name; the last declaration
                    // wins.
                    for capability in *capabilities {
                        bean_name = capability.name.to_string();
                    }
                    registry.insert(bean_name, descriptor)?;
                }
            }
        }
        Ok(registry)
    }

    fn insert(
        &mut self,
        bean_name: String,
        descriptor: &'static ComponentDescriptor,
    ) -> Result<(), Error> {
        if self.beans.contains_key(&bean_name) {
            return Err(Error::DuplicateBean(bean_name));
        }
        match (descriptor.factory)() {
            Ok(instance) => {
                debug!(
                    bean = %bean_name,
                    component = descriptor.type_name,
                    "Bean registered"
                );
                self.beans.insert(
                    bean_name,
                    RegisteredBean {
                        descriptor,
                        instance,
                    },
                );
            }
            Err(err) => {
                // Partial-failure policy: one broken component must not
                // block discovery of the rest.
                warn!(
                    bean = %bean_name,
                    component = descriptor.type_name,
                    error = %err,
                    "Failed to instantiate bean, skipping"
                );
            }
        }
        Ok(())
    }

    pub fn get(&self, bean_name: &str) -> Option<&RegisteredBean> {
        self.beans.get(bean_name)
    }

    pub fn contains(&self, bean_name: &str) -> bool {
        self.beans.contains_key(bean_name)
    }

    pub fn len(&self) -> usize {
        self.beans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegisteredBean)> {
        self.beans.iter().map(|(name, bean)| (name.as_str(), bean))
    }

    /// Bean names in sorted order
    pub fn bean_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.beans.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Lower-case the first character, the bean-name convention for simple
/// type names.
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
