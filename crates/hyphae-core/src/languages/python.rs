//! Python: dotted module imports, including relative `from .x import y`.

use super::{rule, LanguageProfile, PatternCatalogue};

pub(super) fn register(catalogue: &mut PatternCatalogue) {
    catalogue.add_language(
        LanguageProfile::new("Python", &["py", "pyi"])
            .with_module_separator(".")
            .with_index_stems(&["__init__"]),
        &["py", "pyi", "pyw"],
        vec![
            rule(r"(?m)^[ \t]*from[ \t]+(\.*[\w.]*)[ \t]+import\b", 1),
            rule(r"(?m)^[ \t]*import[ \t]+([\w.]+)", 1),
        ],
    );
}
