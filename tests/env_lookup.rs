//! `PROVIDER_STACK_DIR` fallback lookup. Kept in its own test binary because
//! the tests mutate the process environment.

use std::fs;
use std::io;
use std::sync::{Arc, Mutex};

use provider_stack::manifest::STACK_DIR_ENV;
use provider_stack::StackLoader;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Collects formatted log lines so the tests can assert on them.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, logs.contents())
}

#[test]
fn test_manifest_found_only_through_env_dir() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let env_dir = tempfile::tempdir().unwrap();
    fs::write(env_dir.path().join("shared.yaml"), "providers: [Theme, Counter]").unwrap();
    std::env::set_var(STACK_DIR_ENV, env_dir.path());

    let loader = StackLoader::new();
    assert_eq!(loader.search_dirs(), vec![env_dir.path().to_path_buf()]);
    let manifest = loader.load("shared").unwrap();
    assert_eq!(manifest.providers.len(), 2);

    let disabled = StackLoader::new().with_env_lookup(false);
    assert!(disabled.search_dirs().is_empty());
    assert!(disabled.load("shared").is_err());

    std::env::remove_var(STACK_DIR_ENV);
}

#[test]
fn test_missing_base_path_falls_through_to_env_dir() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let env_dir = tempfile::tempdir().unwrap();
    fs::write(env_dir.path().join("app.json"), r#"{"providers": [{"standalone": "Toaster"}]}"#).unwrap();
    std::env::set_var(STACK_DIR_ENV, env_dir.path());

    let missing = env_dir.path().join("does-not-exist");
    let loader = StackLoader::new().with_base_path(&missing);
    assert_eq!(
        loader.search_dirs(),
        vec![missing.clone(), env_dir.path().to_path_buf()]
    );

    let (loaded, logs) = with_captured_logs(|| loader.load("app"));
    let manifest = loaded.unwrap();
    assert_eq!(manifest.providers.len(), 1);
    assert!(logs.contains("WARN"), "{}", logs);
    assert!(logs.contains("skipping missing stack manifest directory"), "{}", logs);
    assert!(logs.contains("does-not-exist"), "{}", logs);

    std::env::remove_var(STACK_DIR_ENV);
}

#[test]
fn test_blank_env_var_is_ignored() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var(STACK_DIR_ENV, "   ");

    let loader = StackLoader::new();
    assert!(loader.search_dirs().is_empty());
    let msg = loader.load("app").unwrap_err().to_string();
    assert!(msg.contains(STACK_DIR_ENV), "{}", msg);

    std::env::remove_var(STACK_DIR_ENV);
}
