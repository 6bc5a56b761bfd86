#[cfg(test)]
mod tests {
    use super::super::*;
    use anyhow::anyhow;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeSource {
        fetch_fails: bool,
        diff: Option<Vec<&'static str>>,
        tracked: Vec<&'static str>,
        fetched: RefCell<Vec<String>>,
    }

    impl ChangeSource for FakeSource {
        fn fetch(&self, revision: &str) -> Result<()> {
            self.fetched.borrow_mut().push(revision.to_string());
            if self.fetch_fails {
                Err(anyhow!("fetch refused"))
            } else {
                Ok(())
            }
        }

        fn changed_files(&self, _base: &str, _head: &str) -> Result<Vec<String>> {
            self.diff
                .as_ref()
                .map(|files| files.iter().map(|f| f.to_string()).collect())
                .ok_or_else(|| anyhow!("bad revision"))
        }

        fn tracked_files(&self) -> Result<Vec<String>> {
            Ok(self.tracked.iter().map(|f| f.to_string()).collect())
        }
    }

    fn service(name: &str) -> Service {
        Service {
            name: name.to_string(),
            dir: name.to_string(),
            context: name.to_string(),
            dockerfile: format!("{}/Dockerfile", name),
            platforms: vec!["linux/amd64".to_string()],
        }
    }

    fn services() -> Vec<Service> {
        vec![service("api"), service("web"), service("worker")]
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn names(services: &[Service]) -> Vec<&str> {
        services.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_is_full_rebuild() {
        assert!(is_full_rebuild(None));
        assert!(is_full_rebuild(Some("")));
        assert!(is_full_rebuild(Some(
            "0000000000000000000000000000000000000000"
        )));
        assert!(!is_full_rebuild(Some("abc123")));
        assert!(!is_full_rebuild(Some("0000000")));
    }

    #[test]
    fn test_top_level_dirs() {
        let dirs = top_level_dirs([
            "api/main.go",
            "api/go.mod",
            "web/src/index.ts",
            "Makefile",
            "README.md",
            "README",
        ]);
        assert_eq!(dirs, set(&["Makefile", "api", "web"]));
    }

    #[test]
    fn test_top_level_dirs_readme_is_case_sensitive() {
        let dirs = top_level_dirs(["readme.md", "README.txt"]);
        assert_eq!(dirs, set(&["README.txt", "readme.md"]));
    }

    #[test]
    fn test_top_level_dirs_keeps_readme_inside_services() {
        let dirs = top_level_dirs(["api/README.md"]);
        assert_eq!(dirs, set(&["api"]));
    }

    #[test]
    fn test_select_empty_changed_selects_all() {
        let selected = select_services(&services(), &BTreeSet::new());
        assert_eq!(selected, services());
    }

    #[test]
    fn test_select_unmatched_changed_selects_all() {
        let selected = select_services(&services(), &set(&["docs", ".github"]));
        assert_eq!(selected, services());
    }

    #[test]
    fn test_select_single_match() {
        let selected = select_services(&services(), &set(&["web", "docs"]));
        assert_eq!(names(&selected), vec!["web"]);
    }

    #[test]
    fn test_select_multiple_matches_keeps_order() {
        let selected = select_services(&services(), &set(&["worker", "api"]));
        assert_eq!(names(&selected), vec!["api", "worker"]);
    }

    #[test]
    fn test_select_matches_top_level_dir() {
        let mut nested = service("billing");
        nested.dir = "services/billing".to_string();
        let all = vec![service("api"), nested];

        let selected = select_services(&all, &set(&["services"]));
        assert_eq!(names(&selected), vec!["billing"]);
    }

    #[test]
    fn test_select_no_services() {
        assert!(select_services(&[], &set(&["api"])).is_empty());
    }

    #[test]
    fn test_changed_dirs_sentinel_lists_tracked() {
        let source = FakeSource {
            tracked: vec!["api/main.go", "web/index.html", "README.md", "README"],
            ..Default::default()
        };

        let dirs = changed_dirs(
            &source,
            Some("0000000000000000000000000000000000000000"),
            "HEAD",
        )
        .unwrap();
        assert_eq!(dirs, set(&["api", "web"]));
        assert!(source.fetched.borrow().is_empty());
    }

    #[test]
    fn test_changed_dirs_absent_base_lists_tracked() {
        let source = FakeSource {
            tracked: vec!["api/main.go"],
            ..Default::default()
        };

        let dirs = changed_dirs(&source, None, "HEAD").unwrap();
        assert_eq!(dirs, set(&["api"]));
    }

    #[test]
    fn test_changed_dirs_uses_diff() {
        let source = FakeSource {
            diff: Some(vec!["web/index.html", "README.md"]),
            tracked: vec!["api/main.go", "web/index.html"],
            ..Default::default()
        };

        let dirs = changed_dirs(&source, Some("abc123"), "HEAD").unwrap();
        assert_eq!(dirs, set(&["web"]));
        assert_eq!(*source.fetched.borrow(), vec!["abc123".to_string()]);
    }

    #[test]
    fn test_changed_dirs_tolerates_fetch_failure() {
        let source = FakeSource {
            fetch_fails: true,
            diff: Some(vec!["api/main.go"]),
            ..Default::default()
        };

        let dirs = changed_dirs(&source, Some("abc123"), "HEAD").unwrap();
        assert_eq!(dirs, set(&["api"]));
    }

    #[test]
    fn test_changed_dirs_diff_failure_falls_back() {
        let source = FakeSource {
            diff: None,
            tracked: vec!["api/main.go", "web/index.html", "README"],
            ..Default::default()
        };

        let dirs = changed_dirs(&source, Some("abc123"), "HEAD").unwrap();
        assert_eq!(dirs, set(&["api", "web"]));
    }

    #[test]
    fn test_build_matrix_no_services() {
        let source = FakeSource::default();
        let output = build_matrix(&[], &source, Some("abc123"), "HEAD").unwrap();
        assert!(!output.has_work);
        assert!(output.matrix.include.is_empty());
    }

    #[test]
    fn test_build_matrix_selects_changed() {
        let source = FakeSource {
            diff: Some(vec!["worker/src/main.rs"]),
            ..Default::default()
        };

        let output = build_matrix(&services(), &source, Some("abc123"), "HEAD").unwrap();
        assert!(output.has_work);
        assert_eq!(names(&output.matrix.include), vec!["worker"]);
    }

    #[test]
    fn test_build_matrix_readme_only_builds_all() {
        let source = FakeSource {
            diff: Some(vec!["README.md"]),
            ..Default::default()
        };

        let output = build_matrix(&services(), &source, Some("abc123"), "HEAD").unwrap();
        assert_eq!(output.matrix.include, services());
    }

    #[test]
    fn test_matrix_output_json() {
        let output = MatrixOutput::new(vec![service("api")]);
        let json = serde_json::to_value(&output.matrix).unwrap();
        assert_eq!(json["include"][0]["name"], "api");
        assert_eq!(json["include"][0]["dockerfile"], "api/Dockerfile");
        assert!(output.has_work);
    }
}
