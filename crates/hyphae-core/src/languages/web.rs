//! JavaScript/TypeScript, component frameworks, stylesheets and Dart.

use super::{rule, ExtractionRule, LanguageProfile, PatternCatalogue};

const TS_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "d.ts", "js", "jsx", "mjs", "cjs", "json", "vue", "svelte",
];
const JS_EXTENSIONS: &[&str] = &[
    "js", "jsx", "mjs", "cjs", "ts", "tsx", "json", "vue", "svelte",
];

/// ES module, CommonJS and dynamic import forms.
pub fn ecmascript_rules() -> Vec<ExtractionRule> {
    vec![
        // import x from '…' / export { y } from '…'
        rule(
            r#"\b(?:import|export)\s[^'";]*?\bfrom\s*['"]([^'"\n]+)['"]"#,
            1,
        ),
        // import '…'
        rule(r#"\bimport\s*['"]([^'"\n]+)['"]"#, 1),
        // require('…')
        rule(r#"\brequire\s*\(\s*['"]([^'"\n]+)['"]\s*\)"#, 1),
        // import('…')
        rule(r#"\bimport\s*\(\s*['"]([^'"\n]+)['"]\s*\)"#, 1),
    ]
}

fn stylesheet_rules() -> Vec<ExtractionRule> {
    vec![rule(
        r#"@(?:import|use|forward)\s+(?:url\(\s*)?['"]([^'"\n]+)['"]"#,
        1,
    )]
}

pub(super) fn register(catalogue: &mut PatternCatalogue) {
    catalogue.add_language(
        LanguageProfile::new("TypeScript", TS_EXTENSIONS),
        &["ts", "tsx", "mts", "cts"],
        ecmascript_rules(),
    );
    catalogue.add_language(
        LanguageProfile::new("JavaScript", JS_EXTENSIONS),
        &["js", "jsx", "mjs", "cjs"],
        ecmascript_rules(),
    );
    catalogue.add_language(
        LanguageProfile::new("Vue", TS_EXTENSIONS),
        &["vue"],
        ecmascript_rules().into_iter().chain(stylesheet_rules()).collect(),
    );
    catalogue.add_language(
        LanguageProfile::new("Svelte", TS_EXTENSIONS),
        &["svelte"],
        ecmascript_rules().into_iter().chain(stylesheet_rules()).collect(),
    );
    catalogue.add_language(
        LanguageProfile::new("CSS", &["scss", "sass", "css", "less"]).with_index_stems(&["_index"]),
        &["css", "scss", "sass", "less"],
        stylesheet_rules(),
    );
    catalogue.add_language(
        LanguageProfile::new("Dart", &["dart"]),
        &["dart"],
        vec![rule(
            r#"(?m)^[ \t]*(?:import|export|part)[ \t]+['"]([^'"\n]+)['"]"#,
            1,
        )
        .relative()],
    );
}
