//! Bounded concurrency and local checkouts.

use async_trait::async_trait;
use rgc_engine::{Analyzer, AnalyzerOptions};
use rgc_provider::{ContentProvider, DirEntry, LocalProvider, MemoryProvider, ProviderError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Wraps a provider and records the highest number of requests in flight.
struct Gauge {
    inner: MemoryProvider,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl Gauge {
    fn new(inner: MemoryProvider) -> Self {
        Self {
            inner,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    async fn track<T>(&self, request: impl std::future::Future<Output = T>) -> T {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        let result = request.await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[async_trait]
impl ContentProvider for Gauge {
    async fn list_directory(&self, path: &str) -> Result<Vec<DirEntry>, ProviderError> {
        self.track(self.inner.list_directory(path)).await
    }

    async fn get_file_content(&self, path: &str) -> Result<String, ProviderError> {
        self.track(self.inner.get_file_content(path)).await
    }

    fn describe(&self) -> String {
        "gauge".to_string()
    }
}

#[tokio::test(start_paused = true)]
async fn test_requests_never_exceed_pool_size() {
    let files: Vec<(String, String)> = (0..40)
        .map(|i| {
            (
                format!("src/dir{}/C{}.tsx", i % 5, i),
                format!("export function C{i}() {{ return <C{} />; }}\n", i + 1),
            )
        })
        .collect();
    let gauge = Arc::new(Gauge::new(MemoryProvider::from_files(files)));

    let options = AnalyzerOptions {
        max_concurrency: 3,
        ..AnalyzerOptions::default()
    };
    let analyzer = Analyzer::new(gauge.clone(), options).unwrap();
    let result = analyzer.analyze("").await.unwrap();

    assert!(gauge.peak.load(Ordering::SeqCst) <= 3);
    assert!(gauge.peak.load(Ordering::SeqCst) >= 2);
    // C0 -> C1 -> ... -> C39: a single used root.
    assert_eq!(result.used_count, 1);
    assert_eq!(result.used[0].name, "C0");
    assert_eq!(result.used[0].depth(), 40);
}

#[tokio::test]
async fn test_local_checkout() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    std::fs::create_dir_all(src.join("components")).unwrap();
    std::fs::create_dir_all(temp_dir.path().join("node_modules/react")).unwrap();
    std::fs::write(
        src.join("App.jsx"),
        "export default function App() {\n  return <Layout><Button label=\"hi\"/></Layout>;\n}\n",
    )
    .unwrap();
    std::fs::write(
        src.join("components/Layout.tsx"),
        "export const Layout = ({ children }) => <main>{children}</main>;\n",
    )
    .unwrap();
    std::fs::write(
        src.join("components/Button.tsx"),
        "export const Button = (props) => <button {...props} />;\n",
    )
    .unwrap();
    std::fs::write(
        temp_dir.path().join("node_modules/react/index.js"),
        "export function Fragment() {}\n",
    )
    .unwrap();

    let provider = Arc::new(LocalProvider::new(temp_dir.path()).unwrap());
    let report = Analyzer::new(provider, AnalyzerOptions::default())
        .unwrap()
        .run("")
        .await
        .unwrap();

    assert!(report.complete);
    assert!(report.warnings.is_empty());
    assert_eq!(report.statistics.components, 3);
    assert_eq!(report.result.used_count, 1);
    let app = &report.result.used[0];
    assert_eq!(app.name, "App");
    assert_eq!(app.path, "src/App.jsx");
    let children: Vec<&str> = app.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(children, vec!["Layout", "Button"]);
}
