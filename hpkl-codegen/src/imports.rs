//! Qualified type names and import collection.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// A fully qualified, possibly nested, class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: String,
    /// Outermost first.
    names: Vec<String>,
}

impl ClassName {
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            names: vec![simple_name.into()],
        }
    }

    /// Parse `pkg.Outer$Inner` style names.
    ///
    /// The part before the last `.` is the package; `$` separates nested names.
    /// Returns `None` if there is no package or a segment is empty.
    pub fn best_guess(name: &str) -> Option<Self> {
        let (package, simple) = name.rsplit_once('.')?;
        if package.split('.').any(str::is_empty) {
            return None;
        }
        let names: Vec<String> = simple.split('$').map(str::to_string).collect();
        if names.iter().any(String::is_empty) {
            return None;
        }
        Some(Self {
            package: package.to_string(),
            names,
        })
    }

    /// A class nested in this one.
    pub fn nested(&self, simple_name: impl Into<String>) -> Self {
        let mut names = self.names.clone();
        names.push(simple_name.into());
        Self {
            package: self.package.clone(),
            names,
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_name(&self) -> &str {
        self.names.last().map(String::as_str).unwrap_or_default()
    }

    /// The outermost enclosing class, or this class if it is top-level.
    pub fn top_level(&self) -> Self {
        Self {
            package: self.package.clone(),
            names: self.names[..1].to_vec(),
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.names.len() == 1
    }

    /// Dotted nested path without the package, e.g. `Outer.Inner`.
    pub fn relative_name(&self) -> String {
        self.names.join(".")
    }

    /// e.g. `org.example.Outer.Inner`
    pub fn canonical(&self) -> String {
        if self.package.is_empty() {
            self.relative_name()
        } else {
            format!("{}.{}", self.package, self.relative_name())
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Decides how each class reference is written in one generated file, and
/// which imports that requires.
///
/// A file holds one top-level class with nested types. Nested types are written
/// by their nested path, other classes by their simple name plus an import.
/// A simple name that is already bound to a different class, or that a nested
/// type shadows, is written fully qualified instead.
///
/// ```
/// use hpkl_codegen::imports::{ClassName, ImportCollector};
///
/// let mut imports = ImportCollector::new(ClassName::new("com.acme", "Config"), &["java.lang"]);
/// assert_eq!(imports.reference(&ClassName::new("java.util", "List")), "List");
/// assert_eq!(imports.reference(&ClassName::new("java.lang", "String")), "String");
/// assert_eq!(imports.reference(&ClassName::new("java.awt", "List")), "java.awt.List");
/// assert_eq!(imports.imports(), vec!["java.util.List"]);
/// ```
#[derive(Debug, Clone)]
pub struct ImportCollector {
    file_class: ClassName,
    implicit_packages: &'static [&'static str],
    nested_names: HashSet<String>,
    /// Simple name to the top-level class it denotes in this file.
    bindings: BTreeMap<String, ClassName>,
    nested_scope: bool,
}

impl ImportCollector {
    /// Create a collector for the file declaring `file_class`.
    ///
    /// Classes in `implicit_packages` are never imported.
    pub fn new(file_class: ClassName, implicit_packages: &'static [&'static str]) -> Self {
        Self {
            file_class,
            implicit_packages,
            nested_names: HashSet::new(),
            bindings: BTreeMap::new(),
            nested_scope: true,
        }
    }

    pub fn file_class(&self) -> &ClassName {
        &self.file_class
    }

    /// Declare a type nested in the file class. Must happen before any reference
    /// that the nested name could shadow.
    pub fn declare_nested(&mut self, simple_name: &str) {
        self.nested_names.insert(simple_name.to_string());
    }

    /// Whether references are written from inside the file class (the default)
    /// or from the top level of the file.
    pub fn set_nested_scope(&mut self, nested: bool) {
        self.nested_scope = nested;
    }

    /// Text for a reference to `name`, registering an import if needed.
    pub fn reference(&mut self, name: &ClassName) -> String {
        let top = name.top_level();
        if top == self.file_class {
            if self.nested_scope && !name.is_top_level() {
                return name.names[1..].join(".");
            }
            return name.relative_name();
        }

        let first = &name.names[0];
        if self.nested_names.contains(first) || first == self.file_class.simple_name() {
            return name.canonical();
        }
        match self.bindings.get(first) {
            Some(bound) if *bound == top => name.relative_name(),
            Some(_) => name.canonical(),
            None => {
                self.bindings.insert(first.clone(), top);
                name.relative_name()
            }
        }
    }

    /// Canonical names to import, sorted.
    pub fn imports(&self) -> Vec<String> {
        let imports: BTreeSet<String> = self
            .bindings
            .values()
            .filter(|class| {
                class.package() != self.file_class.package()
                    && !self.implicit_packages.contains(&class.package())
            })
            .map(ClassName::canonical)
            .collect();
        imports.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector() -> ImportCollector {
        let mut imports = ImportCollector::new(ClassName::new("com.acme", "Config"), &["java.lang"]);
        imports.declare_nested("Address");
        imports
    }

    #[test]
    fn test_best_guess() {
        let name = ClassName::best_guess("org.pkl.core.Duration").unwrap();
        assert_eq!(name.package(), "org.pkl.core");
        assert_eq!(name.simple_name(), "Duration");

        let nested = ClassName::best_guess("com.acme.Outer$Inner").unwrap();
        assert_eq!(nested.canonical(), "com.acme.Outer.Inner");
        assert_eq!(nested.top_level(), ClassName::new("com.acme", "Outer"));

        assert_eq!(ClassName::best_guess("NonNull"), None);
        assert_eq!(ClassName::best_guess("a..B"), None);
        assert_eq!(ClassName::best_guess("a.B$"), None);
    }

    #[test]
    fn test_nested_types_are_relative() {
        let mut imports = collector();
        let address = ClassName::new("com.acme", "Config").nested("Address");
        assert_eq!(imports.reference(&address), "Address");
        let file_class = imports.file_class().clone();
        assert_eq!(imports.reference(&file_class), "Config");

        imports.set_nested_scope(false);
        assert_eq!(imports.reference(&address), "Config.Address");
        assert!(imports.imports().is_empty());
    }

    #[test]
    fn test_nested_name_shadows_import() {
        let mut imports = collector();
        let other = ClassName::new("org.geo", "Address");
        assert_eq!(imports.reference(&other), "org.geo.Address");
        assert!(imports.imports().is_empty());
    }

    #[test]
    fn test_conflicting_imports_use_canonical_names() {
        let mut imports = collector();
        assert_eq!(imports.reference(&ClassName::new("java.time", "Duration")), "Duration");
        assert_eq!(
            imports.reference(&ClassName::new("org.pkl.core", "Duration")),
            "org.pkl.core.Duration"
        );
        assert_eq!(imports.reference(&ClassName::new("java.time", "Duration")), "Duration");
        assert_eq!(imports.imports(), vec!["java.time.Duration"]);
    }

    #[test]
    fn test_other_module_nested_type_imports_top_level() {
        let mut imports = collector();
        let other = ClassName::new("com.acme", "Base").nested("Shape");
        assert_eq!(imports.reference(&other), "Base.Shape");
        let remote = ClassName::new("org.lib", "Lib").nested("Item");
        assert_eq!(imports.reference(&remote), "Lib.Item");
        assert_eq!(imports.imports(), vec!["org.lib.Lib"]);
    }

    #[test]
    fn test_implicit_package_not_imported() {
        let mut imports = collector();
        assert_eq!(imports.reference(&ClassName::new("java.lang", "Object")), "Object");
        assert!(imports.imports().is_empty());
    }
}
