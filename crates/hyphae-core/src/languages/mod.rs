//! Pattern catalogue: which reference-extraction rules apply to which files.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};

use crate::error::{HyphaeError, Result};

pub mod c_cpp;
pub mod jvm;
pub mod markup;
pub mod python;
pub mod scripting;
pub mod systems;
pub mod web;

/// Extensions appended to extension-less non-relative references after the
/// source language's own list.
pub const GENERAL_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "json", "vue", "svelte", "py", "rb", "php", "lua",
    "go", "rs", "java", "kt", "scala", "cs", "c", "h", "cpp", "hpp", "css", "scss", "less",
    "html", "dart", "sh", "pm",
];

/// How references written in one language are turned into file paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    pub name: String,
    /// Extensions tried, in order, when a reference omits one.
    pub resolve_extensions: Vec<String>,
    /// Set for dotted-module languages (`a.b.c`, `A::B`).
    pub module_separator: Option<String>,
    /// Directory-module file stems tried in addition to `index`.
    pub index_stems: Vec<String>,
    /// Set for languages where `a/b.ext` declares modules under `a/b/`.
    /// Files with one of these stems declare them beside themselves instead.
    pub module_roots: Option<Vec<String>>,
}

impl LanguageProfile {
    pub fn new(name: impl Into<String>, resolve_extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            resolve_extensions: resolve_extensions.iter().map(|e| e.to_string()).collect(),
            module_separator: None,
            index_stems: Vec::new(),
            module_roots: None,
        }
    }

    pub fn with_module_separator(mut self, separator: &str) -> Self {
        self.module_separator = Some(separator.to_string());
        self
    }

    pub fn with_index_stems(mut self, stems: &[&str]) -> Self {
        self.index_stems = stems.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_module_roots(mut self, stems: &[&str]) -> Self {
        self.module_roots = Some(stems.iter().map(|s| s.to_string()).collect());
        self
    }
}

/// A regular expression plus the capture group(s) holding the referenced path.
///
/// With an inner pattern, the selected group is a block (a Go `import (...)`
/// list, say) and the references are group 1 of every inner match within it.
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    regex: Regex,
    primary: usize,
    secondary: Option<usize>,
    inner: Option<Regex>,
    relative: bool,
}

impl ExtractionRule {
    /// Compile a rule, reporting failures against the owning language.
    pub fn compile(language: &str, pattern: &str, group: usize) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| HyphaeError::InvalidPattern {
            language: language.to_string(),
            source,
        })?;
        Ok(Self::from_regex(regex, group))
    }

    pub fn from_regex(regex: Regex, group: usize) -> Self {
        Self {
            regex,
            primary: group,
            secondary: None,
            inner: None,
            relative: false,
        }
    }

    /// Prefer `group` over the primary group whenever it participates.
    pub fn with_secondary(mut self, group: usize) -> Self {
        self.secondary = Some(group);
        self
    }

    /// Treat bare captures as relative to the referencing file's directory.
    pub fn relative(mut self) -> Self {
        self.relative = true;
        self
    }

    /// Scan each selected block with `inner` and report its group 1.
    pub fn with_inner(mut self, inner: Regex) -> Self {
        self.inner = Some(inner);
        self
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Pick the reference out of one match: secondary group if it matched
    /// non-empty, else the primary group.
    pub fn select<'t>(&self, caps: &Captures<'t>) -> Option<&'t str> {
        let secondary = self
            .secondary
            .and_then(|g| caps.get(g))
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty());
        secondary.or_else(|| {
            caps.get(self.primary)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
        })
    }

    /// All non-empty references in `text`. Each call starts a fresh scan.
    pub fn references<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let selected = self
            .regex
            .captures_iter(text)
            .filter_map(|caps| self.select(&caps));
        match self.inner {
            Some(ref inner) => selected
                .flat_map(|block| {
                    inner
                        .captures_iter(block)
                        .filter_map(|caps| caps.get(1))
                        .map(|m| m.as_str())
                })
                .filter(|s| !s.is_empty())
                .collect(),
            None => selected.collect(),
        }
    }

    /// Anchor a bare capture to the source directory for relative rules.
    /// Captures carrying a scheme (`package:`, `http:`) are left untouched.
    pub fn anchor(&self, reference: &str) -> String {
        if self.relative
            && !reference.starts_with('.')
            && !reference.starts_with('/')
            && !reference.contains(':')
        {
            format!("./{}", reference)
        } else {
            reference.to_string()
        }
    }
}

struct LanguageEntry {
    profile: LanguageProfile,
    rules: Vec<ExtractionRule>,
}

/// Mapping from file extension to language profile and ordered rule list.
#[derive(Clone)]
pub struct PatternCatalogue {
    languages: Vec<Arc<LanguageEntry>>,
    extension_map: HashMap<String, usize>,
    general_extensions: Vec<String>,
}

impl std::fmt::Debug for PatternCatalogue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternCatalogue")
            .field("languages", &self.languages.len())
            .field("extensions", &self.extension_map.len())
            .finish()
    }
}

static BUILTIN: LazyLock<PatternCatalogue> = LazyLock::new(|| {
    let mut catalogue = PatternCatalogue::new();
    web::register(&mut catalogue);
    python::register(&mut catalogue);
    c_cpp::register(&mut catalogue);
    jvm::register(&mut catalogue);
    systems::register(&mut catalogue);
    scripting::register(&mut catalogue);
    markup::register(&mut catalogue);
    catalogue
});

impl PatternCatalogue {
    /// An empty catalogue using the default general extension list.
    pub fn new() -> Self {
        Self {
            languages: Vec::new(),
            extension_map: HashMap::new(),
            general_extensions: GENERAL_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// The catalogue of every supported language family.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Register a language. Later registrations win for shared extensions.
    pub fn add_language(
        &mut self,
        profile: LanguageProfile,
        extensions: &[&str],
        rules: Vec<ExtractionRule>,
    ) {
        let index = self.languages.len();
        self.languages.push(Arc::new(LanguageEntry { profile, rules }));
        for ext in extensions {
            self.extension_map.insert(ext.to_ascii_lowercase(), index);
        }
    }

    pub fn with_language(
        mut self,
        profile: LanguageProfile,
        extensions: &[&str],
        rules: Vec<ExtractionRule>,
    ) -> Self {
        self.add_language(profile, extensions, rules);
        self
    }

    pub fn with_general_extensions(mut self, extensions: &[&str]) -> Self {
        self.general_extensions = extensions.iter().map(|e| e.to_string()).collect();
        self
    }

    fn entry(&self, ext: &str) -> Option<&LanguageEntry> {
        self.extension_map
            .get(&ext.to_ascii_lowercase())
            .map(|&i| self.languages[i].as_ref())
    }

    /// Ordered rules for an extension; empty when the extension is unknown.
    pub fn patterns_for(&self, ext: &str) -> &[ExtractionRule] {
        self.entry(ext).map(|e| e.rules.as_slice()).unwrap_or(&[])
    }

    pub fn profile_for(&self, ext: &str) -> Option<&LanguageProfile> {
        self.entry(ext).map(|e| &e.profile)
    }

    /// Language name for an extension.
    pub fn language_for_extension(&self, ext: &str) -> Option<&str> {
        self.profile_for(ext).map(|p| p.name.as_str())
    }

    pub fn general_extensions(&self) -> &[String] {
        &self.general_extensions
    }

    /// All registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.extension_map.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }
}

impl Default for PatternCatalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Compile a built-in pattern. Built-in patterns are literals covered by tests.
pub(crate) fn pattern(source: &str) -> Regex {
    Regex::new(source).unwrap()
}

pub(crate) fn rule(source: &str, group: usize) -> ExtractionRule {
    ExtractionRule::from_regex(pattern(source), group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_has_no_patterns() {
        let catalogue = PatternCatalogue::builtin();
        assert!(catalogue.patterns_for("xyz").is_empty());
        assert!(catalogue.profile_for("xyz").is_none());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let catalogue = PatternCatalogue::builtin();
        assert!(!catalogue.patterns_for("TS").is_empty());
        assert_eq!(catalogue.language_for_extension("Py"), Some("Python"));
    }

    #[test]
    fn builtin_covers_a_dozen_families() {
        let catalogue = PatternCatalogue::builtin();
        let languages: std::collections::HashSet<_> = catalogue
            .extensions()
            .into_iter()
            .filter_map(|e| catalogue.language_for_extension(e))
            .collect();
        assert!(languages.len() >= 12, "only {} languages", languages.len());
    }

    #[test]
    fn secondary_group_wins_when_present() {
        let rule = ExtractionRule::compile("Test", r"(\w+)(?:=(\w+))?", 1)
            .unwrap()
            .with_secondary(2);
        assert_eq!(rule.references("alpha=beta gamma"), vec!["beta", "gamma"]);
    }

    #[test]
    fn empty_captures_are_skipped() {
        let rule = ExtractionRule::compile("Test", r#"use "([^"]*)""#, 1).unwrap();
        assert_eq!(rule.references(r#"use "" use "a""#), vec!["a"]);
    }

    #[test]
    fn invalid_pattern_names_language() {
        let err = ExtractionRule::compile("Broken", "(unclosed", 1).unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn relative_rules_anchor_bare_captures() {
        let rule = rule("x", 0).relative();
        assert_eq!(rule.anchor("lib/a.js"), "./lib/a.js");
        assert_eq!(rule.anchor("../a.js"), "../a.js");
        assert_eq!(rule.anchor("/static/a.js"), "/static/a.js");
        assert_eq!(rule.anchor("https://cdn/a.js"), "https://cdn/a.js");
        assert_eq!(super::rule("x", 0).anchor("lib/a.js"), "lib/a.js");
    }

    #[test]
    fn synthetic_catalogue_is_injectable() {
        let catalogue = PatternCatalogue::new().with_language(
            LanguageProfile::new("Toy", &["toy"]),
            &["toy"],
            vec![ExtractionRule::compile("Toy", r"load (\S+)", 1).unwrap()],
        );
        assert_eq!(catalogue.patterns_for("toy").len(), 1);
        assert!(catalogue.patterns_for("ts").is_empty());
        assert_eq!(catalogue.extensions(), vec!["toy"]);
    }

    #[test]
    fn later_registration_overrides_extension() {
        let catalogue = PatternCatalogue::new()
            .with_language(LanguageProfile::new("A", &[]), &["x"], vec![])
            .with_language(LanguageProfile::new("B", &[]), &["x"], vec![]);
        assert_eq!(catalogue.language_for_extension("x"), Some("B"));
    }
}
