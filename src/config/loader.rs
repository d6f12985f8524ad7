//! Loading, saving and overriding YAML configurations

use crate::config::schema::{SampleSpec, TrainSpec};
use crate::config::validate::{validate_config, validate_sample_config};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Load and validate a training configuration
///
/// # Example
///
/// ```no_run
/// use pggan::config::load_config;
///
/// let spec = load_config("configs/celeba_hq_256.yaml")?;
/// println!("{} stages", spec.stage_count());
/// # Ok::<(), pggan::Error>(())
/// ```
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<TrainSpec> {
    let path = config_path.as_ref();
    let spec: TrainSpec = read_yaml(path)?;
    validate_config(&spec)?;

    tracing::debug!(
        path = %path.display(),
        model_id = %spec.model_id,
        stages = spec.stage_count(),
        "loaded training config"
    );
    Ok(spec)
}

/// Parse and validate a training configuration from a YAML string
pub fn parse_config(yaml: &str) -> Result<TrainSpec> {
    let spec: TrainSpec = serde_yaml::from_str(yaml).map_err(|e| Error::ConfigParsing {
        path: PathBuf::from("<string>"),
        message: e.to_string(),
    })?;
    validate_config(&spec)?;
    Ok(spec)
}

/// Load and validate a sampling configuration
pub fn load_sample_config<P: AsRef<Path>>(config_path: P) -> Result<SampleSpec> {
    let path = config_path.as_ref();
    let spec: SampleSpec = read_yaml(path)?;
    validate_sample_config(&spec)?;

    tracing::debug!(
        path = %path.display(),
        ckpt = %spec.ckpt_path.display(),
        "loaded sample config"
    );
    Ok(spec)
}

/// Write a training configuration as YAML
pub fn save_config<P: AsRef<Path>>(spec: &TrainSpec, path: P) -> Result<()> {
    let path = path.as_ref();
    let yaml = serde_yaml::to_string(spec).map_err(|e| Error::Serialization {
        message: e.to_string(),
    })?;
    fs::write(path, yaml).map_err(|e| Error::io(format!("writing {}", path.display()), e))
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::io(format!("reading {}", path.display()), e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| Error::ConfigParsing {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Command-line overrides applied on top of a loaded configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub batch_per_gpu: Option<usize>,
    pub max_step: Option<u64>,
    pub lr_g: Option<f64>,
    pub lr_d: Option<f64>,
    pub ckpt_id: Option<String>,
    pub ckpt_step: Option<u64>,
    /// Replaces the whole list when non-empty
    pub dataset_roots: Vec<PathBuf>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Apply overrides to a spec and re-validate it
///
/// The spec is only replaced once the overridden copy validates; on error it
/// is left as it was.
pub fn apply_overrides(spec: &mut TrainSpec, overrides: &ConfigOverrides) -> Result<()> {
    if overrides.is_empty() {
        return Ok(());
    }
    let mut updated = spec.clone();
    if let Some(batch) = overrides.batch_per_gpu {
        updated.batch_per_gpu = batch;
    }
    if let Some(max_step) = overrides.max_step {
        updated.max_step = max_step;
    }
    if let Some(lr) = overrides.lr_g {
        updated.lr_g = lr;
    }
    if let Some(lr) = overrides.lr_d {
        updated.lr_d = lr;
    }
    if let Some(id) = &overrides.ckpt_id {
        updated.ckpt_id = Some(id.clone());
    }
    if let Some(step) = overrides.ckpt_step {
        updated.ckpt_step = Some(step);
    }
    if !overrides.dataset_roots.is_empty() {
        updated.dataset_root_list = overrides.dataset_roots.clone();
    }

    validate_config(&updated)?;
    tracing::debug!(?overrides, "applied command-line overrides");
    *spec = updated;
    Ok(())
}

/// Section headers, keyed by the first key of each section
const TEMPLATE_SECTIONS: &[(&str, &str)] = &[
    ("model_id", "Model identity"),
    ("use_mGPU", "Multi-GPU"),
    ("use_wandb", "Experiment tracking"),
    ("dataset_root_list", "Dataset"),
    ("lr_G", "Learning rate"),
    ("W_adv", "Loss weights"),
    ("batch_per_gpu", "Batch and steps"),
    ("loss_cycle", "Logging cadence (steps)"),
    ("latent_dim", "Architecture"),
    ("max_step_at_scale", "Steps per scale"),
    ("alpha", "Alpha blending"),
    ("LReLU_slope", "Activation"),
    ("apply_pixel_norm", "Normalization"),
    ("ckpt_id", "Checkpoint resume (null starts fresh)"),
];

/// Commented YAML template with every key at its default
///
/// The body is the serialized default spec, so any id or path reads back
/// unchanged; section comments are inserted before the top-level keys that
/// open each group. With no dataset roots a `/path/to/images` placeholder is
/// written.
pub fn default_template(model_id: &str, dataset_roots: &[PathBuf]) -> Result<String> {
    let roots = if dataset_roots.is_empty() {
        vec![PathBuf::from("/path/to/images")]
    } else {
        dataset_roots.to_vec()
    };
    let body = serde_yaml::to_string(&TrainSpec::new(model_id, roots)).map_err(|e| {
        Error::Serialization {
            message: e.to_string(),
        }
    })?;

    let mut out = String::from("# Progressive-growing GAN training configuration\n");
    for line in body.lines() {
        let header = line.split_once(':').and_then(|(key, _)| {
            TEMPLATE_SECTIONS
                .iter()
                .find(|(section_key, _)| *section_key == key)
                .map(|(_, header)| header)
        });
        if let Some(header) = header {
            out.push_str("\n# ");
            out.push_str(header);
            out.push('\n');
        }
        out.push_str(line);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/pggan.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_config_malformed_yaml() {
        let file = write_temp("model_id: [unclosed\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParsing { .. }));
    }

    #[test]
    fn test_load_config_validation_failure() {
        let file = write_temp("model_id: run\ndataset_root_list: [/data]\nmax_depths: 9\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::StageCountMismatch { .. })
        ));
    }

    #[test]
    fn test_load_config_ok() {
        let file = write_temp("model_id: run\ndataset_root_list: [/data/a, /data/b]\n");
        let spec = load_config(file.path()).unwrap();
        assert_eq!(spec.dataset_root_list.len(), 2);
    }

    #[test]
    fn test_parse_config_reports_string_source() {
        let err = parse_config("model_id: 3\n").unwrap_err();
        match err {
            Error::ConfigParsing { path, .. } => assert_eq!(path, PathBuf::from("<string>")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.yaml");
        let mut spec = TrainSpec::new("run", vec![PathBuf::from("/data")]);
        spec.ckpt_id = Some("older_run".to_string());
        spec.ckpt_step = Some(96000);
        save_config(&spec, &path).unwrap();
        assert_eq!(load_config(&path).unwrap(), spec);
    }

    #[test]
    fn test_load_sample_config() {
        let file = write_temp("ckpt_path: train_result/run/ckpt/G_latest.pt\nn_samples: 4\n");
        let spec = load_sample_config(file.path()).unwrap();
        assert_eq!(spec.n_samples, 4);
    }

    #[test]
    fn test_apply_overrides() {
        let mut spec = TrainSpec::new("run", vec![PathBuf::from("/data")]);
        let overrides = ConfigOverrides {
            batch_per_gpu: Some(8),
            lr_g: Some(2e-4),
            ckpt_id: Some("run".to_string()),
            ckpt_step: Some(48000),
            dataset_roots: vec![PathBuf::from("/a"), PathBuf::from("/b")],
            ..Default::default()
        };
        apply_overrides(&mut spec, &overrides).unwrap();
        assert_eq!(spec.batch_per_gpu, 8);
        assert!((spec.lr_g - 2e-4).abs() < 1e-12);
        assert_eq!(spec.ckpt_step, Some(48000));
        assert_eq!(spec.dataset_root_list.len(), 2);
    }

    #[test]
    fn test_apply_overrides_revalidates() {
        let mut spec = TrainSpec::new("run", vec![PathBuf::from("/data")]);
        let overrides = ConfigOverrides {
            batch_per_gpu: Some(0),
            ..Default::default()
        };
        let err = apply_overrides(&mut spec, &overrides).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn test_failed_overrides_leave_spec_untouched() {
        let mut spec = TrainSpec::new("run", vec![PathBuf::from("/data")]);
        let before = spec.clone();
        let overrides = ConfigOverrides {
            max_step: Some(500),
            lr_g: Some(2e-4),
            lr_d: Some(0.0),
            ..Default::default()
        };
        assert!(apply_overrides(&mut spec, &overrides).is_err());
        assert_eq!(spec, before);
    }

    #[test]
    fn test_empty_overrides_leave_spec_untouched() {
        let mut spec = TrainSpec::new("run", vec![PathBuf::from("/data")]);
        let before = spec.clone();
        apply_overrides(&mut spec, &ConfigOverrides::default()).unwrap();
        assert_eq!(spec, before);
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let roots = vec![PathBuf::from("/data/ffhq")];
        let yaml = default_template("ffhq", &roots).unwrap();
        let spec = parse_config(&yaml).unwrap();
        assert_eq!(spec, TrainSpec::new("ffhq", roots));
        assert!(yaml.contains("# Alpha blending\nalpha:"));
        assert!(yaml.contains("# Checkpoint resume"));
    }

    #[test]
    fn test_default_template_keeps_yaml_special_characters() {
        let cases = [
            ("run: v2", PathBuf::from("/data/a: b")),
            ("#run", PathBuf::from("C:\\d #1")),
            ("- list", PathBuf::from("'quoted' \"path\"")),
        ];
        for (model_id, root) in cases {
            let yaml = default_template(model_id, &[root.clone()]).unwrap();
            let spec = parse_config(&yaml)
                .unwrap_or_else(|e| panic!("template for {model_id:?} failed to load: {e}"));
            assert_eq!(spec.model_id, model_id);
            assert_eq!(spec.dataset_root_list, vec![root]);
        }
    }

    #[test]
    fn test_default_template_placeholder_root() {
        let yaml = default_template("run", &[]).unwrap();
        let spec = parse_config(&yaml).unwrap();
        assert_eq!(
            spec.dataset_root_list,
            vec![PathBuf::from("/path/to/images")]
        );
    }
}
