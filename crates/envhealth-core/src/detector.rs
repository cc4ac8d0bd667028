//! Ecosystem Detector (C3).
//!
//! Scores a project directory against every loaded descriptor and returns
//! the ones that match, each with a confidence in `[0.5, 1.0]`.

use crate::model::{DetectedEcosystem, EcosystemDescriptor};
use crate::paths;
use std::path::Path;
use std::sync::Arc;

const OPTIONAL_FILE_WEIGHT: f64 = 0.2;
const DIRECTORY_PATTERN_WEIGHT: f64 = 0.1;
const MATCH_THRESHOLD: f64 = 0.5;

/// Runs detection for one descriptor against one project root.
///
/// Returns `(matched, confidence)`. `confidence` is meaningful only when
/// `matched` is true; a non-match always carries `0.0`.
fn score(descriptor: &EcosystemDescriptor, root: &Path) -> (bool, f64) {
    let required = &descriptor.detection.required_files;
    if !required.is_empty() {
        let missing = required
            .iter()
            .any(|f| !paths::exists(&paths::resolve(root, f)));
        if missing {
            return (false, 0.0);
        }
    }

    let optional = &descriptor.detection.optional_files;
    let patterns = &descriptor.detection.directory_patterns;
    let optional_present = optional
        .iter()
        .filter(|f| paths::exists(&paths::resolve(root, f)))
        .count();
    let pattern_present = patterns
        .iter()
        .filter(|p| paths::resolve(root, p).is_dir())
        .count();

    let base = if !required.is_empty() {
        // Every required file is confirmed present above.
        1.0
    } else if optional.is_empty() && patterns.is_empty() {
        // No detection signal configured at all: trivially matches.
        1.0
    } else {
        // No required-file anchor, so the base itself must reflect
        // whether the optional/pattern signals actually fire — otherwise
        // a descriptor with only optional/pattern signals (e.g. the
        // infrastructure descriptors) would match every project.
        let total = optional.len() + patterns.len();
        let present = optional_present + pattern_present;
        present as f64 / total as f64
    };

    // Optional/pattern signals only act as a boost on top of the base
    // when required files already anchor the match; when there is no
    // such anchor they're folded into `base` above instead.
    let optional_boost = if required.is_empty() || optional.is_empty() {
        0.0
    } else {
        OPTIONAL_FILE_WEIGHT * (optional_present as f64 / optional.len() as f64)
    };

    let pattern_boost = if required.is_empty() || patterns.is_empty() {
        0.0
    } else {
        DIRECTORY_PATTERN_WEIGHT * (pattern_present as f64 / patterns.len() as f64)
    };

    let confidence = (base + optional_boost + pattern_boost).min(1.0);
    (confidence >= MATCH_THRESHOLD, confidence)
}

/// Detects every descriptor that matches `project_root`.
pub fn detect(project_root: &Path, descriptors: &[Arc<EcosystemDescriptor>]) -> Vec<DetectedEcosystem> {
    descriptors
        .iter()
        .filter_map(|descriptor| {
            let (matched, confidence) = score(descriptor, project_root);
            matched.then(|| DetectedEcosystem {
                descriptor: Arc::clone(descriptor),
                project_root: project_root.to_path_buf(),
                confidence,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DescriptorFile, EcosystemDescriptor};
    use tempfile::tempdir;

    fn descriptor(yaml: &str) -> Arc<EcosystemDescriptor> {
        let file: DescriptorFile = serde_yaml::from_str(yaml).unwrap();
        Arc::new(file.ecosystem)
    }

    const MAVEN: &str = r#"
ecosystem:
  id: java-maven
  manifest:
    primary_file: pom.xml
  detection:
    required_files: [pom.xml]
    optional_files: [mvnw]
"#;

    #[test]
    fn test_no_match_without_required_file() {
        let dir = tempdir().unwrap();
        let descriptors = vec![descriptor(MAVEN)];
        let result = detect(dir.path(), &descriptors);
        assert!(result.is_empty());
    }

    #[test]
    fn test_match_with_required_file_confidence_one() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("pom.xml"), "").unwrap();
        let descriptors = vec![descriptor(MAVEN)];
        let result = detect(dir.path(), &descriptors);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].confidence, 1.0);
    }

    #[test]
    fn test_optional_file_does_not_exceed_clamp() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("pom.xml"), "").unwrap();
        std::fs::write(dir.path().join("mvnw"), "").unwrap();
        let descriptors = vec![descriptor(MAVEN)];
        let result = detect(dir.path(), &descriptors);
        assert_eq!(result[0].confidence, 1.0);
    }

    #[test]
    fn test_removing_required_file_drops_match_even_with_optionals() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("mvnw"), "").unwrap();
        let descriptors = vec![descriptor(MAVEN)];
        let result = detect(dir.path(), &descriptors);
        assert!(result.is_empty());
    }

    #[test]
    fn test_directory_pattern_boosts_confidence_below_one() {
        let yaml = r#"
ecosystem:
  id: vite
  manifest:
    primary_file: package.json
  detection:
    optional_files: [vite.config.ts]
    directory_patterns: [node_modules/vite]
"#;
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        std::fs::write(dir.path().join("vite.config.ts"), "").unwrap();
        let descriptors = vec![descriptor(yaml)];
        let before = detect(dir.path(), &descriptors);
        assert_eq!(before.len(), 1);
        let low = before[0].confidence;

        std::fs::create_dir_all(dir.path().join("node_modules/vite")).unwrap();
        let after = detect(dir.path(), &descriptors);
        assert!(after[0].confidence >= low);
    }

    #[test]
    fn test_no_required_files_and_no_signals_present_does_not_match() {
        let yaml = r#"
ecosystem:
  id: docker
  manifest:
    primary_file: Dockerfile
  detection:
    optional_files: [Dockerfile, docker-compose.yml]
"#;
        let dir = tempdir().unwrap();
        let descriptors = vec![descriptor(yaml)];
        let result = detect(dir.path(), &descriptors);
        assert!(result.is_empty());
    }

    #[test]
    fn test_no_required_files_matches_when_optional_signal_present() {
        let yaml = r#"
ecosystem:
  id: docker
  manifest:
    primary_file: Dockerfile
  detection:
    optional_files: [Dockerfile, docker-compose.yml]
"#;
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("Dockerfile"), "").unwrap();
        let descriptors = vec![descriptor(yaml)];
        let result = detect(dir.path(), &descriptors);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_detection_monotonicity_adding_optional_file() {
        let yaml = r#"
ecosystem:
  id: npm
  manifest:
    primary_file: package.json
  detection:
    optional_files: [tsconfig.json, vite.config.ts]
"#;
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        let descriptors = vec![descriptor(yaml)];
        let (_, c0) = score(&descriptors[0], dir.path());

        std::fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();
        let (matched1, c1) = score(&descriptors[0], dir.path());
        assert!(matched1);
        assert!(c1 >= c0);
    }
}
