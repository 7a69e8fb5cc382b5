//! Naming: module name mapping and reserved-word renaming.

use indexmap::{IndexMap, IndexSet};

/// Language-specific naming conventions.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Rename every key that is a reserved word.
    ///
    /// A reserved key becomes `"_" * k + key` for the smallest `k >= 1` that is
    /// neither a key of the map nor reserved itself. Order and values are preserved, and applying
    /// this to its own output changes nothing.
    pub fn rename_reserved<K, V, I>(&self, entries: I) -> IndexMap<String, V>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.rename_reserved_avoiding(entries, std::iter::empty::<String>())
    }

    /// Like [`rename_reserved`](Self::rename_reserved), but a renamed key also
    /// avoids every name in `taken`.
    pub fn rename_reserved_avoiding<K, V, I, T>(&self, entries: I, taken: T) -> IndexMap<String, V>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        let mut taken: IndexSet<String> = taken.into_iter().map(Into::into).collect();
        taken.extend(entries.iter().map(|(key, _)| key.as_ref().to_string()));

        let mut renamed = IndexMap::with_capacity(entries.len());
        for (key, value) in entries {
            let key = key.as_ref();
            if !self.is_reserved(key) {
                renamed.insert(key.to_string(), value);
                continue;
            }
            let mut candidate = format!("_{}", key);
            while taken.contains(&candidate) || self.is_reserved(&candidate) {
                candidate.insert(0, '_');
            }
            taken.insert(candidate.clone());
            renamed.insert(candidate, value);
        }
        renamed
    }
}

/// Uppercase the first character, e.g. `name` to `Name`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Maps dotted module names to a target package and top-level type name.
///
/// Applies the longest matching prefix of an ordered rename table. The part
/// before the last `.` of the result is the package and the rest is the type
/// name, capitalized unless the rename itself supplied it.
///
/// ```
/// use hpkl_codegen::naming::NameMapper;
///
/// let mapper = NameMapper::new([("org.example.", "com.acme.")]);
/// assert_eq!(
///     mapper.map("org.example.config"),
///     ("com.acme".to_string(), "Config".to_string())
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct NameMapper {
    /// Sorted longest prefix first.
    renames: Vec<(String, String)>,
}

impl NameMapper {
    pub fn new<I, K, V>(renames: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut renames: Vec<(String, String)> = renames
            .into_iter()
            .map(|(prefix, replacement)| (prefix.into(), replacement.into()))
            .collect();
        renames.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
        Self { renames }
    }

    /// Map a module name to `(package, type name)`.
    pub fn map(&self, module_name: &str) -> (String, String) {
        let (mapped, class_renamed) = self.rename(module_name);
        let (package, type_name) = match mapped.rsplit_once('.') {
            Some((package, type_name)) => (package.to_string(), type_name),
            None => (String::new(), mapped.as_str()),
        };
        let type_name = if class_renamed {
            type_name.to_string()
        } else {
            capitalize(type_name)
        };
        (package, type_name)
    }

    fn rename(&self, module_name: &str) -> (String, bool) {
        for (prefix, replacement) in &self.renames {
            if let Some(rest) = module_name.strip_prefix(prefix.as_str()) {
                let class_renamed = rest.is_empty() && !replacement.ends_with('.');
                return (format!("{}{}", replacement, rest), class_renamed);
            }
        }
        (module_name.to_string(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMING: NamingConvention = NamingConvention {
        reserved_words: &["class", "default", "_"],
    };

    #[test]
    fn test_rename_reserved() {
        let renamed = NAMING.rename_reserved([("class", 1), ("name", 2), ("default", 3)]);
        let keys: Vec<_> = renamed.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["_class", "name", "_default"]);
        assert_eq!(renamed["_default"], 3);
    }

    #[test]
    fn test_rename_reserved_skips_taken_keys() {
        let renamed = NAMING.rename_reserved([("default", 1), ("_default", 2)]);
        let keys: Vec<_> = renamed.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["__default", "_default"]);
    }

    #[test]
    fn test_rename_reserved_avoids_given_names() {
        let renamed = NAMING.rename_reserved_avoiding([("class", 1), ("x", 2)], ["_class"]);
        let keys: Vec<_> = renamed.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["__class", "x"]);
    }

    #[test]
    fn test_rename_reserved_is_idempotent() {
        let once = NAMING.rename_reserved([("_", 0), ("class", 1), ("x", 2)]);
        let twice = NAMING.rename_reserved(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("name"), "Name");
        assert_eq!(capitalize("Name"), "Name");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_identity_mapping() {
        let mapper = NameMapper::default();
        assert_eq!(
            mapper.map("org.example.config"),
            ("org.example".to_string(), "Config".to_string())
        );
        assert_eq!(mapper.map("config"), (String::new(), "Config".to_string()));
    }

    #[test]
    fn test_longest_prefix_wins() {
        let mapper = NameMapper::new([
            ("org.", "com."),
            ("org.example.", "io.acme."),
        ]);
        assert_eq!(
            mapper.map("org.example.config"),
            ("io.acme".to_string(), "Config".to_string())
        );
        assert_eq!(
            mapper.map("org.other.config"),
            ("com.other".to_string(), "Config".to_string())
        );
    }

    #[test]
    fn test_rename_of_whole_name_keeps_type_case() {
        let mapper = NameMapper::new([("org.example.config", "com.acme.appConfig")]);
        assert_eq!(
            mapper.map("org.example.config"),
            ("com.acme".to_string(), "appConfig".to_string())
        );
    }
}
