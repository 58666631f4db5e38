use hearth::config::StaticFilesConfig;
use hearth::http::error::HttpError;
use hearth::http::parser::{ParseError, strip_traversal};
use hearth::http::status::StatusCode;
use hearth::static_files::StaticFiles;
use std::path::{Path, PathBuf};

fn files(root: &Path) -> StaticFiles {
    StaticFiles::new(&StaticFilesConfig {
        root: root.to_path_buf(),
        ..Default::default()
    })
}

#[test]
fn test_resolve_root_to_default_page() {
    let files = files(Path::new("/srv/www"));

    assert_eq!(files.resolve("/"), PathBuf::from("/srv/www/index.html"));
}

#[test]
fn test_resolve_nested_path() {
    let files = files(Path::new("/srv/www"));

    assert_eq!(files.resolve("/img/logo.png"), PathBuf::from("/srv/www/img/logo.png"));
}

#[test]
fn test_resolve_never_leaves_root() {
    let files = files(Path::new("/srv/www"));
    let attempts = [
        "/../etc/passwd",
        "/....//etc/passwd",
        "/a/../../../etc/passwd",
        "/..",
        "/./../x",
        "//etc/passwd",
    ];

    for attempt in attempts {
        let resolved = files.resolve(&strip_traversal(attempt));
        assert!(
            resolved.starts_with("/srv/www"),
            "{attempt} resolved to {}",
            resolved.display()
        );
        let resolved = files.resolve(attempt);
        assert!(resolved.starts_with("/srv/www"), "{attempt} unstripped");
    }
}

#[test]
fn test_is_params_page() {
    let files = files(Path::new("/srv/www"));

    assert!(files.is_params_page("/params_info.html"));
    assert!(!files.is_params_page("/other/params_info.html"));
    assert!(!files.is_params_page("params_info.html"));
}

#[tokio::test]
async fn test_read_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), b"<html>hi</html>").unwrap();
    let files = files(dir.path());

    let bytes = files.read(&files.resolve("/")).await.unwrap();

    assert_eq!(bytes, b"<html>hi</html>".to_vec());
}

#[tokio::test]
async fn test_read_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let files = files(dir.path());

    let err = files.read(&files.resolve("/nope.html")).await.unwrap_err();

    assert!(matches!(err, HttpError::NotFound(_)));
    assert_eq!(err.status(), StatusCode::NotFound);
}

#[tokio::test]
async fn test_read_directory_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("docs")).unwrap();
    let files = files(dir.path());

    let err = files.read(&files.resolve("/docs")).await.unwrap_err();

    assert!(matches!(err, HttpError::NotFound(_)));
}

#[test]
fn test_error_status_mapping() {
    let internal = HttpError::Internal {
        path: PathBuf::from("/srv/www/x"),
        source: std::io::Error::other("disk on fire"),
    };

    assert_eq!(
        HttpError::BadRequest(ParseError::Empty).status(),
        StatusCode::BadRequest
    );
    assert_eq!(
        HttpError::NotImplemented("DELETE".into()).status(),
        StatusCode::NotImplemented
    );
    assert_eq!(internal.status(), StatusCode::InternalServerError);
    assert!(internal.to_string().contains("disk on fire"));
}
