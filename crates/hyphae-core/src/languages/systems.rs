//! Go imports and Rust module declarations.

use super::{pattern, rule, LanguageProfile, PatternCatalogue};

pub(super) fn register(catalogue: &mut PatternCatalogue) {
    catalogue.add_language(
        LanguageProfile::new("Go", &["go"]),
        &["go"],
        vec![
            // import "x" / import alias "x"
            rule(r#"(?m)^[ \t]*import[ \t]+(?:[\w.]+[ \t]+)?"([^"\n]+)""#, 1),
            // the lines of an import ( ... ) block
            rule(r"(?m)^[ \t]*import[ \t]*\(([^)]*)\)", 1)
                .with_inner(pattern(r#"(?m)^[ \t]*(?:[\w.]+[ \t]+)?"([^"\n]+)""#)),
        ],
    );
    // `mod foo;` in `lib.rs`, `main.rs` or `mod.rs` names a sibling `foo.rs`
    // or `foo/mod.rs`; anywhere else it names `<stem>/foo.rs`.
    catalogue.add_language(
        LanguageProfile::new("Rust", &["rs"])
            .with_index_stems(&["mod"])
            .with_module_roots(&["lib", "main", "mod"]),
        &["rs"],
        vec![rule(
            r"(?m)^[ \t]*(?:pub(?:\([^)]*\))?[ \t]+)?mod[ \t]+(\w+)[ \t]*;",
            1,
        )
        .relative()],
    );
}
