use super::*;
use std::sync::mpsc;
use std::time::Duration;

struct MapSource;

impl ContentSource for MapSource {
    fn fetch(&self, path: &str) -> BoxFuture<io::Result<String>> {
        let result = match path {
            "missing.js" => Err(io::Error::new(io::ErrorKind::NotFound, "missing")),
            other => Ok(format!("// {other}")),
        };
        Box::pin(async move { result })
    }
}

#[test]
fn test_load_batch_reports_contents_and_failures() {
    let (tx, rx) = mpsc::channel();
    let loader = ContentLoader::new(tx).unwrap();
    let request = ContentRequest {
        ticket: 7,
        items: vec![
            (FileId::new("a"), "a.js".to_string()),
            (FileId::new("b"), "missing.js".to_string()),
        ],
    };

    loader.load_batch(request, Arc::new(MapSource));
    let message = rx.recv_timeout(Duration::from_secs(5)).unwrap();

    let ContentMessage::BatchLoaded {
        ticket,
        contents,
        failed,
    } = message;
    assert_eq!(ticket, 7);
    assert_eq!(contents, vec![(FileId::new("a"), "// a.js".to_string())]);
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, FileId::new("b"));
}
