//! Ruby, PHP, Lua, shell and Perl.

use super::{rule, LanguageProfile, PatternCatalogue};

pub(super) fn register(catalogue: &mut PatternCatalogue) {
    catalogue.add_language(
        LanguageProfile::new("Ruby", &["rb"]),
        &["rb", "rake", "gemspec"],
        vec![
            rule(r#"\brequire_relative\s*\(?\s*['"]([^'"\n]+)['"]"#, 1).relative(),
            rule(r#"\b(?:require|load)\s*\(?\s*['"]([^'"\n]+)['"]"#, 1),
        ],
    );
    catalogue.add_language(
        LanguageProfile::new("PHP", &["php", "inc", "phtml"]),
        &["php", "phtml", "php5", "php7"],
        vec![rule(
            r#"\b(?:include|require)(?:_once)?\s*\(?\s*(?:__DIR__\s*\.\s*)?['"]([^'"\n]+)['"]"#,
            1,
        )],
    );
    catalogue.add_language(
        LanguageProfile::new("Lua", &["lua"])
            .with_module_separator(".")
            .with_index_stems(&["init"]),
        &["lua"],
        vec![rule(r#"\brequire\s*\(?\s*['"]([^'"\n]+)['"]"#, 1)],
    );
    catalogue.add_language(
        LanguageProfile::new("Shell", &["sh", "bash"]),
        &["sh", "bash", "zsh", "ksh"],
        vec![rule(
            r#"(?m)^[ \t]*(?:source|\.)[ \t]+['"]?([^'"\s;]+)['"]?"#,
            1,
        )],
    );
    catalogue.add_language(
        LanguageProfile::new("Perl", &["pm", "pl"]).with_module_separator("::"),
        &["pl", "pm"],
        vec![
            rule(r"(?m)^[ \t]*(?:use|require)[ \t]+([A-Za-z_][\w:]*)", 1),
            rule(r#"\b(?:require|do)\s+['"]([^'"\n]+)['"]"#, 1),
        ],
    );
}
