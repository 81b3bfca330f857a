use std::fs;
use std::path::{Path, PathBuf};

/// Load a .sc program from demos/
pub fn load_demo(name: &str) -> String {
    let path = demo_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load demo {}: {}", name, e))
}

/// Get path to a demo program
pub fn demo_path(name: &str) -> PathBuf {
    demos_dir().join(format!("{}.sc", name))
}

/// All .sc programs under demos/, sorted by name
pub fn discover_demos() -> Vec<PathBuf> {
    let mut demos: Vec<PathBuf> = fs::read_dir(demos_dir())
        .expect("Failed to read demos directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("sc"))
        .collect();
    demos.sort();
    demos
}

fn demos_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos")
}
