//! Property-based tests for import extraction.
//!
//! These tests use proptest to generate random file contents and verify that
//! extraction invariants hold regardless of surrounding text.

#[cfg(test)]
mod proptest_tests {
    use crate::imports::extract;
    use crate::repos::RepoSet;
    use proptest::prelude::*;

    fn repos() -> RepoSet {
        RepoSet::from_names(["repoA", "repoB"])
    }

    fn import_path() -> impl Strategy<Value = String> {
        ("repo[AB]", prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..4))
            .prop_map(|(repo, parts)| format!("{}/{}.proto", repo, parts.join("/")))
    }

    proptest! {
        /// Property: every well-formed import is returned, in order
        #[test]
        fn well_formed_imports_come_back_in_order(paths in prop::collection::vec(import_path(), 0..8)) {
            let content: String = paths
                .iter()
                .map(|p| format!("import \"{}\";\n", p))
                .collect();
            let imports = extract("root.proto", content.as_bytes(), &repos()).unwrap();
            prop_assert_eq!(imports, paths);
        }

        /// Property: lines that do not start with the keyword never produce imports
        #[test]
        fn non_import_lines_are_ignored(lines in prop::collection::vec("[a-hj-z ;\"/.]{0,40}", 0..20)) {
            let content = lines.join("\n");
            let imports = extract("root.proto", content.as_bytes(), &repos()).unwrap();
            prop_assert!(imports.is_empty());
        }

        /// Property: extraction never panics on arbitrary bytes
        #[test]
        fn arbitrary_bytes_do_not_panic(content in prop::collection::vec(any::<u8>(), 0..512)) {
            let _ = extract("root.proto", &content, &repos());
        }

        /// Property: every returned import starts with a known repository
        #[test]
        fn results_always_belong_to_a_repository(content in "(import \"[a-zA-Z/._]{1,20}\";\n){0,6}") {
            let repos = repos();
            if let Ok(imports) = extract("root.proto", content.as_bytes(), &repos) {
                for import in imports {
                    prop_assert!(repos.matches(&import));
                }
            }
        }
    }
}
