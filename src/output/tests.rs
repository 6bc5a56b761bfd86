#[cfg(test)]
mod tests {
    use super::super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_line() {
        assert_eq!(format_line("has_work", "true"), "has_work=true\n");
    }

    #[test]
    fn test_format_lines_empty() {
        assert_eq!(format_lines("extra_tags", &[]), "extra_tags=\n");
    }

    #[test]
    fn test_format_lines_heredoc() {
        let lines = vec!["app:v1".to_string(), "app:latest".to_string()];
        assert_eq!(
            format_lines("extra_tags", &lines),
            "extra_tags<<EOF\napp:v1\napp:latest\nEOF\n"
        );
    }

    #[test]
    fn test_sink_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output");
        fs::write(&path, "existing=1\n").unwrap();

        let sink = OutputSink::new(Some(path.clone()));
        sink.set("has_work", "false").unwrap();
        sink.set_lines("extra_tags", &["app:v1".to_string()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "existing=1\nhas_work=false\nextra_tags<<EOF\napp:v1\nEOF\n"
        );
    }

    #[test]
    fn test_sink_creates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("new-output");

        let sink = OutputSink::new(Some(path.clone()));
        sink.set("key", "value").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "key=value\n");
    }

    #[test]
    fn test_sink_unwritable_path_fails() {
        let dir = tempdir().unwrap();
        let sink = OutputSink::new(Some(dir.path().join("missing").join("output")));
        assert!(sink.set("key", "value").is_err());
    }
}
