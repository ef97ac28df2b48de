//! HTML, classic ASP and JSP include directives.
//!
//! Markup paths are relative to the page unless they start with `/`, in which
//! case they are site-root paths and fall through to suffix matching.

use super::{rule, ExtractionRule, LanguageProfile, PatternCatalogue};

fn asset_rules() -> Vec<ExtractionRule> {
    vec![
        rule(r#"(?i)<script\b[^>]*?\bsrc\s*=\s*["']([^"'\n]+)["']"#, 1).relative(),
        rule(r#"(?i)<link\b[^>]*?\bhref\s*=\s*["']([^"'\n]+)["']"#, 1).relative(),
    ]
}

/// `<!--#include "x"-->` or, with the keyword argument,
/// `<!--#include file="x"-->` / `<!--#include virtual="/x"-->`.
pub fn asp_include_rule() -> ExtractionRule {
    rule(
        r#"(?i)<!--\s*#include\s+(?:"([^"\n]+)"|(?:file|virtual)\s*=\s*"([^"\n]+)")"#,
        1,
    )
    .with_secondary(2)
    .relative()
}

/// `<%@ include file="x" %>` or `<jsp:include page="x" />`.
pub fn jsp_include_rule() -> ExtractionRule {
    rule(
        r#"(?i)<%@\s*include\s+file\s*=\s*"([^"\n]+)"|<jsp:include\s+page\s*=\s*"([^"\n]+)""#,
        1,
    )
    .with_secondary(2)
    .relative()
}

pub(super) fn register(catalogue: &mut PatternCatalogue) {
    catalogue.add_language(
        LanguageProfile::new("HTML", &["html", "js", "css"]),
        &["html", "htm", "xhtml"],
        asset_rules(),
    );
    catalogue.add_language(
        LanguageProfile::new("ASP", &["asp", "aspx", "ascx", "inc", "js", "css"]),
        &["asp", "aspx", "ascx", "asa", "asax", "master"],
        std::iter::once(asp_include_rule()).chain(asset_rules()).collect(),
    );
    catalogue.add_language(
        LanguageProfile::new("JSP", &["jsp", "jspf", "html", "js", "css"]),
        &["jsp", "jspf", "jspx", "tag"],
        std::iter::once(jsp_include_rule()).chain(asset_rules()).collect(),
    );
}
