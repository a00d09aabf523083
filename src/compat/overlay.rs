use crate::domain::{ApiSurface, ResolveError, Symbol};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Bindings stacked over a base surface.
///
/// Lookups hit the bindings first and fall through to the base, so a binding
/// shadows whatever the base defines under the same name.
#[derive(Clone)]
pub struct Overlay {
    base: Arc<dyn ApiSurface>,
    bindings: BTreeMap<String, Symbol>,
}

impl Overlay {
    pub fn new(base: Arc<dyn ApiSurface>) -> Self {
        Self {
            base,
            bindings: BTreeMap::new(),
        }
    }

    /// Bind `name` unconditionally.
    pub fn bind(&mut self, name: &str, symbol: Symbol) {
        self.bindings.insert(name.to_string(), symbol);
    }

    /// Bind `name` only if neither the base nor an earlier binding defines
    /// it. Returns whether the binding was added.
    pub fn bind_missing(&mut self, name: &str, symbol: Symbol) -> bool {
        if self.has(name) {
            return false;
        }
        self.bindings.insert(name.to_string(), symbol);
        true
    }

    pub fn bindings(&self) -> &BTreeMap<String, Symbol> {
        &self.bindings
    }
}

impl ApiSurface for Overlay {
    fn path(&self) -> &str {
        self.base.path()
    }

    fn resolve(&self, name: &str) -> Result<Symbol, ResolveError> {
        match self.bindings.get(name) {
            Some(symbol) => Ok(symbol.clone()),
            None => self.base.resolve(name),
        }
    }

    fn names(&self) -> Vec<String> {
        let mut names = self.base.names();
        names.extend(self.bindings.keys().cloned());
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Namespace;

    fn base() -> Arc<dyn ApiSurface> {
        Arc::new(Namespace::new("tf.train").class("Saver"))
    }

    #[test]
    fn falls_through_to_base() {
        let overlay = Overlay::new(base());
        assert_eq!(
            overlay.resolve("Saver").unwrap(),
            Symbol::Class("tf.train.Saver".to_string())
        );
        assert_eq!(overlay.path(), "tf.train");
    }

    #[test]
    fn bind_missing_never_shadows_base() {
        let mut overlay = Overlay::new(base());
        assert!(!overlay.bind_missing("Saver", Symbol::Class("other.Saver".to_string())));
        assert!(overlay.bind_missing("Hook", Symbol::Class("tf.estimator.Hook".to_string())));
        assert!(!overlay.bind_missing("Hook", Symbol::Class("again.Hook".to_string())));

        assert_eq!(
            overlay.resolve("Saver").unwrap(),
            Symbol::Class("tf.train.Saver".to_string())
        );
        assert_eq!(
            overlay.resolve("Hook").unwrap(),
            Symbol::Class("tf.estimator.Hook".to_string())
        );
        assert_eq!(overlay.names(), vec!["Hook", "Saver"]);
    }

    #[test]
    fn bind_shadows_base() {
        let mut overlay = Overlay::new(base());
        overlay.bind("Saver", Symbol::Constant("replaced".to_string()));
        assert_eq!(overlay.resolve("Saver").unwrap().as_constant(), Some("replaced"));
    }
}
