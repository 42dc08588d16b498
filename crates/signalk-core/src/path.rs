//! SignalK path parsing.
//!
//! SignalK paths are dot-separated strings like "navigation.speedOverGround".
//! The empty path addresses the context root itself; its values are objects
//! whose keys are top-level attributes such as `name` or `mmsi`.

/// A parsed SignalK path.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// The original path string
    raw: String,
    /// Path segments split by '.'
    segments: Vec<String>,
}

impl Path {
    /// Parse a path string into segments.
    pub fn new(path: &str) -> Self {
        let segments = if path.is_empty() {
            Vec::new()
        } else {
            path.split('.').map(String::from).collect()
        };
        Self {
            raw: path.to_string(),
            segments,
        }
    }

    /// Get the raw path string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Get the path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The root path (`""`).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// A single-segment path such as `mmsi` or `name`.
    pub fn is_top_level(&self) -> bool {
        self.segments.len() == 1
    }

    /// Walk a JSON tree along this path's segments.
    pub fn lookup<'a>(&self, root: &'a serde_json::Value) -> Option<&'a serde_json::Value> {
        self.segments
            .iter()
            .try_fold(root, |node, segment| node.as_object()?.get(segment))
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::new(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::new(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_parsing() {
        let path = Path::new("navigation.speedOverGround");
        assert_eq!(path.segments(), &["navigation", "speedOverGround"]);
        assert!(!path.is_top_level());
    }

    #[test]
    fn test_root_and_top_level() {
        assert!(Path::new("").is_root());
        assert!(Path::new("mmsi").is_top_level());
        assert!(!Path::new("mmsi").is_root());
    }

    #[test]
    fn test_lookup() {
        let tree = serde_json::json!({
            "design": {"beam": {"value": 7}},
            "name": "SOME BOAT"
        });

        assert_eq!(
            Path::new("design.beam").lookup(&tree),
            Some(&serde_json::json!({"value": 7}))
        );
        assert_eq!(Path::new("name").lookup(&tree), Some(&serde_json::json!("SOME BOAT")));
        assert_eq!(Path::new("design.length").lookup(&tree), None);
        assert_eq!(Path::new("name.first").lookup(&tree), None);
    }
}
