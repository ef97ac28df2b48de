//! C, C++ and Objective-C preprocessor includes.

use super::{rule, ExtractionRule, LanguageProfile, PatternCatalogue};

const HEADER_EXTENSIONS: &[&str] = &["h", "hpp", "hh", "hxx", "inl", "c", "cpp", "cc"];

fn include_rules() -> Vec<ExtractionRule> {
    // Both "quoted" and <angled> forms; system headers simply fail to resolve.
    vec![rule(
        r#"(?m)^[ \t]*#[ \t]*(?:include|import)[ \t]*["<]([^">\n]+)[">]"#,
        1,
    )]
}

pub(super) fn register(catalogue: &mut PatternCatalogue) {
    catalogue.add_language(
        LanguageProfile::new("C", HEADER_EXTENSIONS),
        &["c", "h"],
        include_rules(),
    );
    catalogue.add_language(
        LanguageProfile::new("C++", HEADER_EXTENSIONS),
        &["cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx", "ipp", "inl"],
        include_rules(),
    );
    catalogue.add_language(
        LanguageProfile::new("Objective-C", &["h", "m", "mm"]),
        &["m", "mm"],
        include_rules(),
    );
}
