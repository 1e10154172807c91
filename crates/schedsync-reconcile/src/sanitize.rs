//! Fallback path rewriting for the one known environment-specific failure.
//!
//! Some execution environments materialize scheduled files with spaces
//! rewritten to underscores, while the export manifest still records the
//! original spaced name. A first create attempt against such a backend fails
//! permanently. This module produces the fallback definition used for the
//! single retry: spaces in the leaf filename become underscores, and native
//! path separators are normalized to the repository's canonical `/`.

use schedsync_core::ScheduleDefinition;

/// Canonical separator of repository paths.
const REPOSITORY_SEPARATOR: char = '/';

/// Whether `definition` qualifies for the sanitized retry.
#[must_use]
pub fn needs_sanitizing(definition: &ScheduleDefinition) -> bool {
    definition.input_path.contains(' ') || definition.output_path.contains(' ')
}

/// Returns a copy of `definition` with both paths rewritten.
///
/// The parent directory segment is preserved as-is; only the leaf filename
/// has its spaces replaced. On hosts whose native separator is not `/`, all
/// native separators are rewritten to `/` so the repository can resolve the
/// path.
#[must_use]
pub fn sanitize(definition: &ScheduleDefinition) -> ScheduleDefinition {
    let mut sanitized = definition.clone();
    sanitized.input_path = sanitize_path(&definition.input_path, std::path::MAIN_SEPARATOR);
    sanitized.output_path = sanitize_path(&definition.output_path, std::path::MAIN_SEPARATOR);
    sanitized
}

/// Separator-injected core of [`sanitize`], so the non-`/` branch is
/// testable on any host.
fn sanitize_path(path: &str, native_separator: char) -> String {
    // Both separator candidates are ASCII, so byte indexing is safe.
    let rewritten = match path.rfind(|c| c == REPOSITORY_SEPARATOR || c == native_separator) {
        Some(idx) => {
            let parent = &path[..idx];
            let leaf = &path[idx + 1..];
            format!(
                "{parent}{REPOSITORY_SEPARATOR}{}",
                leaf.replace(' ', "_")
            )
        }
        None => path.replace(' ', "_"),
    };

    if native_separator == REPOSITORY_SEPARATOR {
        rewritten
    } else {
        rewritten.replace(native_separator, &REPOSITORY_SEPARATOR.to_string())
    }
}

#[cfg(test)]
mod tests {
    use schedsync_core::JobParam;

    use super::*;

    fn definition(input_path: &str, output_path: &str) -> ScheduleDefinition {
        ScheduleDefinition {
            job_name: Some("nightly".to_owned()),
            input_path: input_path.to_owned(),
            output_path: output_path.to_owned(),
            params: vec![JobParam::new("retries", 3i64)],
            trigger: serde_json::Value::Null,
        }
    }

    #[test]
    fn spaces_in_leaf_become_underscores() {
        assert_eq!(
            sanitize_path("/home/admin/scheduled Transform.ktr", '/'),
            "/home/admin/scheduled_Transform.ktr"
        );
    }

    #[test]
    fn parent_segment_is_preserved_verbatim() {
        assert_eq!(
            sanitize_path("/my reports/a b.ktr", '/'),
            "/my reports/a_b.ktr"
        );
    }

    #[test]
    fn path_without_separator_is_just_the_leaf() {
        assert_eq!(sanitize_path("a b.ktr", '/'), "a_b.ktr");
    }

    #[test]
    fn native_separators_are_canonicalized() {
        assert_eq!(
            sanitize_path("C:\\repo\\scheduled Transform.ktr", '\\'),
            "C:/repo/scheduled_Transform.ktr"
        );
    }

    #[test]
    fn mixed_separators_split_at_the_last_one() {
        assert_eq!(
            sanitize_path("/repo\\sub/a b.ktr", '\\'),
            "/repo/sub/a_b.ktr"
        );
    }

    #[test]
    fn sanitize_rewrites_both_paths_and_keeps_the_rest() {
        let def = definition("/home/admin/a b.ktr", "/home/admin/a b*");
        let sanitized = sanitize(&def);
        assert_eq!(sanitized.input_path, "/home/admin/a_b.ktr");
        assert_eq!(sanitized.output_path, "/home/admin/a_b*");
        assert_eq!(sanitized.job_name, def.job_name);
        assert_eq!(sanitized.params, def.params);
    }

    #[test]
    fn needs_sanitizing_when_either_path_has_a_space() {
        assert!(needs_sanitizing(&definition("/a b.ktr", "/out")));
        assert!(needs_sanitizing(&definition("/a.ktr", "/o ut")));
        assert!(!needs_sanitizing(&definition("/a.ktr", "/out")));
    }
}
