//! Reference resolution: map a raw reference string to an indexed file path.
//!
//! Relative references (leading `.`) are joined to the source directory and
//! probed with extensions and index files. Everything else is matched as a
//! path suffix against the whole index, on segment boundaries.

use crate::graph::FileIndex;
use crate::languages::LanguageProfile;
use crate::tree::{base_name, file_extension, join_path, parent_dir};

const INDEX_STEM: &str = "index";

/// Resolve `raw`, found in `source_path`, to a file in `index`.
///
/// Returns `None` for references that match nothing (external packages,
/// templated paths) and for references back to the source file itself.
pub fn resolve_reference(
    source_path: &str,
    raw: &str,
    index: &FileIndex,
    profile: &LanguageProfile,
    general_extensions: &[String],
) -> Option<String> {
    let reference = clean_reference(raw)?;
    let reference = match profile.module_separator.as_deref() {
        Some(".") if reference.starts_with('.') && !reference.contains('/') => {
            dotted_to_relative(&reference)
        }
        _ => reference,
    };

    let resolved = if reference.starts_with('.') {
        resolve_relative(source_path, &reference, index, profile)
    } else {
        resolve_by_suffix(&reference, index, profile, general_extensions)
    };
    resolved.filter(|target| target != source_path)
}

/// Normalise a captured reference, rejecting ones that can never name a file
/// in the tree (URLs, template placeholders).
pub fn clean_reference(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.starts_with("//")
        || has_scheme(trimmed)
        || ["{{", "${", "<%", "`"].iter().any(|t| trimmed.contains(t))
    {
        return None;
    }
    let end = trimmed.find(['?', '#']).unwrap_or(trimmed.len());
    let cleaned = trimmed[..end].trim().replace('\\', "/");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn has_scheme(reference: &str) -> bool {
    match reference.split_once(':') {
        // `A::B` is a module path, not a scheme.
        Some((_, rest)) if rest.starts_with(':') => false,
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
                && !scheme.starts_with('.')
        }
        None => false,
    }
}

/// `.models` → `./models`, `..core.db` → `./../core/db`.
fn dotted_to_relative(reference: &str) -> String {
    let dots = reference.chars().take_while(|&c| c == '.').count();
    let mut out = String::from(".");
    for _ in 1..dots {
        out.push_str("/..");
    }
    let rest = &reference[dots..];
    if !rest.is_empty() {
        out.push('/');
        out.push_str(&rest.replace('.', "/"));
    }
    out
}

/// Join `reference` onto `dir`, applying `.` and `..` left to right.
/// `..` past the root is dropped.
pub fn join_relative(dir: &str, reference: &str) -> String {
    let mut parts: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in reference.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(segment),
        }
    }
    parts.join("/")
}

fn resolve_relative(
    source_path: &str,
    reference: &str,
    index: &FileIndex,
    profile: &LanguageProfile,
) -> Option<String> {
    let base = join_relative(&reference_dir(source_path, profile), reference);

    if !base.is_empty() {
        if index.contains(&base) {
            return Some(base);
        }
        for ext in &profile.resolve_extensions {
            let candidate = format!("{}.{}", base, ext);
            if index.contains(&candidate) {
                return Some(candidate);
            }
        }
    }

    for stem in index_stems(profile) {
        for ext in &profile.resolve_extensions {
            let candidate = join_path(&base, &format!("{}.{}", stem, ext));
            if index.contains(&candidate) {
                return Some(candidate);
            }
        }
    }

    None
}

/// Directory relative references are joined to: the source's own directory,
/// or `dir/stem` for a nested-module language file that is not a module root.
fn reference_dir(source_path: &str, profile: &LanguageProfile) -> String {
    let dir = parent_dir(source_path);
    let Some(ref roots) = profile.module_roots else {
        return dir.to_string();
    };
    let name = base_name(source_path);
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    if roots.iter().any(|root| root == stem) {
        dir.to_string()
    } else {
        join_path(dir, stem)
    }
}

fn resolve_by_suffix(
    reference: &str,
    index: &FileIndex,
    profile: &LanguageProfile,
    general_extensions: &[String],
) -> Option<String> {
    let reference = reference.trim_start_matches('/');
    if reference.is_empty() {
        return None;
    }

    let mut candidates: Vec<String> = Vec::new();
    match profile.module_separator.as_deref() {
        Some(separator) if !reference.contains('/') => {
            let path = reference.replace(separator, "/");
            let path = path.trim_matches('/');
            if path.is_empty() {
                return None;
            }
            for ext in &profile.resolve_extensions {
                candidates.push(format!("{}.{}", path, ext));
            }
            for stem in &profile.index_stems {
                for ext in &profile.resolve_extensions {
                    candidates.push(format!("{}/{}.{}", path, stem, ext));
                }
            }
        }
        _ => {
            candidates.push(reference.to_string());
            let last = reference.rsplit('/').next().unwrap_or(reference);
            if file_extension(last).is_none() {
                let extensions = profile.resolve_extensions.iter().chain(general_extensions);
                for ext in extensions.clone() {
                    candidates.push(format!("{}.{}", reference, ext));
                }
                for ext in extensions {
                    candidates.push(format!("{}/{}.{}", reference, INDEX_STEM, ext));
                }
            }
        }
    }

    let mut tried = std::collections::HashSet::new();
    candidates
        .into_iter()
        .filter(|c| tried.insert(c.clone()))
        .find_map(|c| index.find_suffix(&c).map(String::from))
}

/// `index` followed by the profile's own directory-module stems.
fn index_stems(profile: &LanguageProfile) -> Vec<&str> {
    let mut stems = vec![INDEX_STEM];
    for stem in &profile.index_stems {
        if stem != INDEX_STEM {
            stems.push(stem.as_str());
        }
    }
    stems
}
