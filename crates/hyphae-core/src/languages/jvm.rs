//! Java, Kotlin, Scala and C#: dotted package imports.

use super::{rule, ExtractionRule, LanguageProfile, PatternCatalogue};

fn import_rules() -> Vec<ExtractionRule> {
    vec![rule(r"(?m)^[ \t]*import[ \t]+(?:static[ \t]+)?([\w.]+)", 1)]
}

pub(super) fn register(catalogue: &mut PatternCatalogue) {
    catalogue.add_language(
        LanguageProfile::new("Java", &["java", "kt", "scala"]).with_module_separator("."),
        &["java"],
        import_rules(),
    );
    catalogue.add_language(
        LanguageProfile::new("Kotlin", &["kt", "java"]).with_module_separator("."),
        &["kt", "kts"],
        import_rules(),
    );
    catalogue.add_language(
        LanguageProfile::new("Scala", &["scala", "java"]).with_module_separator("."),
        &["scala", "sc"],
        import_rules(),
    );
    catalogue.add_language(
        LanguageProfile::new("C#", &["cs"]).with_module_separator("."),
        &["cs"],
        vec![rule(
            r"(?m)^[ \t]*(?:global[ \t]+)?using[ \t]+(?:static[ \t]+)?([\w.]+)[ \t]*;",
            1,
        )],
    );
}
