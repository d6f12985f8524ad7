//! YAML schema for progressive-growing GAN training and sampling
//!
//! Keys keep the names the trainer has always read (`lr_G`, `W_gp`,
//! `alpha_jump_Ntimes`, ...); Rust fields are snake_case.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Deserialize a bool from either a YAML boolean (`true`) or a quoted string (`"true"`).
fn deserialize_bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 'true' or 'false', got '{other}'"
            ))),
        },
    }
}

/// Activation applied to the generator's RGB output
///
/// `null` in YAML means identity, which is what the trainer expects during
/// training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorActivation {
    /// Identity
    Linear,
    Tanh,
    Sigmoid,
}

impl std::fmt::Display for GeneratorActivation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorActivation::Linear => write!(f, "linear"),
            GeneratorActivation::Tanh => write!(f, "tanh"),
            GeneratorActivation::Sigmoid => write!(f, "sigmoid"),
        }
    }
}

/// Complete training specification
///
/// One flat namespace, immutable for the duration of a run. Only `model_id`
/// and `dataset_root_list` are required; every other key falls back to the
/// defaults of the 256x256 configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainSpec {
    // === Model identity ===
    /// Run name; checkpoints land under `save_root/model_id`
    pub model_id: String,

    /// Root directory holding all runs
    #[serde(default = "default_save_root")]
    pub save_root: PathBuf,

    // === Multi-GPU ===
    /// Train with one process per visible GPU
    #[serde(
        rename = "use_mGPU",
        default,
        deserialize_with = "deserialize_bool_lenient"
    )]
    pub use_mgpu: bool,

    // === Experiment tracking ===
    #[serde(default, deserialize_with = "deserialize_bool_lenient")]
    pub use_wandb: bool,

    // === Dataset ===
    /// Image folders, read in order
    pub dataset_root_list: Vec<PathBuf>,

    // === Learning rate ===
    #[serde(rename = "lr_G", default = "default_lr_g")]
    pub lr_g: f64,

    #[serde(rename = "lr_D", default = "default_lr_d")]
    pub lr_d: f64,

    /// Adam beta1
    #[serde(default)]
    pub beta1: f64,

    /// Adam beta2
    #[serde(default = "default_beta2")]
    pub beta2: f64,

    // === Loss weights ===
    #[serde(rename = "W_adv", default = "default_w_adv")]
    pub w_adv: f64,

    /// Gradient penalty weight
    #[serde(rename = "W_gp", default = "default_w_gp")]
    pub w_gp: f64,

    /// Drift penalty on the discriminator output
    #[serde(rename = "W_drift_D", default = "default_w_drift_d")]
    pub w_drift_d: f64,

    // === Batch and steps ===
    #[serde(default = "default_batch_per_gpu")]
    pub batch_per_gpu: usize,

    /// Hard cap on global steps, across all stages
    #[serde(default = "default_max_step")]
    pub max_step: u64,

    // === Logging cadence (in steps) ===
    #[serde(default = "default_loss_cycle")]
    pub loss_cycle: u64,

    #[serde(default = "default_test_cycle")]
    pub test_cycle: u64,

    #[serde(default = "default_ckpt_cycle")]
    pub ckpt_cycle: u64,

    // === Architecture ===
    #[serde(default = "default_latent_dim")]
    pub latent_dim: usize,

    #[serde(default = "default_image_dim")]
    pub input_dim: usize,

    #[serde(default = "default_image_dim")]
    pub output_dim: usize,

    #[serde(default = "default_true", deserialize_with = "deserialize_bool_lenient")]
    pub init_bias_to_zero: bool,

    /// Channel depth per stage; stage `s` works at `4 * 2^s` pixels
    #[serde(default = "default_depths")]
    pub depths: Vec<usize>,

    /// Declared stage count; must equal `depths.len()`
    #[serde(default = "default_max_depths")]
    pub max_depths: usize,

    #[serde(default = "default_decision_layer_size")]
    pub decision_layer_size: usize,

    // === Per-scale step budgets ===
    #[serde(default = "default_max_step_at_scale")]
    pub max_step_at_scale: Vec<u64>,

    // === Alpha blending ===
    /// Alpha held by stages that declare no fade
    #[serde(default)]
    pub alpha: f64,

    #[serde(default = "default_alpha_jump_start")]
    pub alpha_jump_start: Vec<u64>,

    #[serde(default = "default_alpha_jump_interval")]
    pub alpha_jump_interval: Vec<u64>,

    #[serde(rename = "alpha_jump_Ntimes", default = "default_alpha_jump_ntimes")]
    pub alpha_jump_ntimes: Vec<u64>,

    // === Activation ===
    #[serde(rename = "LReLU_slope", default = "default_lrelu_slope")]
    pub lrelu_slope: f64,

    #[serde(default)]
    pub generator_last_activation: Option<GeneratorActivation>,

    // === Normalization ===
    #[serde(default = "default_true", deserialize_with = "deserialize_bool_lenient")]
    pub apply_pixel_norm: bool,

    /// Minibatch standard deviation channel in the last discriminator block
    #[serde(default = "default_true", deserialize_with = "deserialize_bool_lenient")]
    pub apply_minibatch_norm: bool,

    #[serde(default = "default_true", deserialize_with = "deserialize_bool_lenient")]
    pub equalized_lr: bool,

    // === Checkpoint resume ===
    /// Run to resume from; `null` starts fresh
    #[serde(default)]
    pub ckpt_id: Option<String>,

    /// Step to resume from; `null` with a `ckpt_id` means the latest checkpoint
    #[serde(default)]
    pub ckpt_step: Option<u64>,
}

impl TrainSpec {
    /// A spec with every default filled in
    pub fn new(model_id: impl Into<String>, dataset_root_list: Vec<PathBuf>) -> Self {
        Self {
            model_id: model_id.into(),
            save_root: default_save_root(),
            use_mgpu: false,
            use_wandb: false,
            dataset_root_list,
            lr_g: default_lr_g(),
            lr_d: default_lr_d(),
            beta1: 0.0,
            beta2: default_beta2(),
            w_adv: default_w_adv(),
            w_gp: default_w_gp(),
            w_drift_d: default_w_drift_d(),
            batch_per_gpu: default_batch_per_gpu(),
            max_step: default_max_step(),
            loss_cycle: default_loss_cycle(),
            test_cycle: default_test_cycle(),
            ckpt_cycle: default_ckpt_cycle(),
            latent_dim: default_latent_dim(),
            input_dim: default_image_dim(),
            output_dim: default_image_dim(),
            init_bias_to_zero: true,
            depths: default_depths(),
            max_depths: default_max_depths(),
            decision_layer_size: default_decision_layer_size(),
            max_step_at_scale: default_max_step_at_scale(),
            alpha: 0.0,
            alpha_jump_start: default_alpha_jump_start(),
            alpha_jump_interval: default_alpha_jump_interval(),
            alpha_jump_ntimes: default_alpha_jump_ntimes(),
            lrelu_slope: default_lrelu_slope(),
            generator_last_activation: None,
            apply_pixel_norm: true,
            apply_minibatch_norm: true,
            equalized_lr: true,
            ckpt_id: None,
            ckpt_step: None,
        }
    }

    /// Number of progressive stages
    pub fn stage_count(&self) -> usize {
        self.depths.len()
    }

    /// Side length of the images produced at the final stage
    pub fn final_resolution(&self) -> usize {
        match self.depths.len() {
            0 => 0,
            n => stage_resolution(n - 1),
        }
    }

    /// Images per optimizer step across all workers
    pub fn effective_batch(&self, world_size: usize) -> usize {
        if self.use_mgpu {
            self.batch_per_gpu * world_size.max(1)
        } else {
            self.batch_per_gpu
        }
    }

    /// Sum of the per-stage budgets, `None` if it does not fit in a `u64`
    pub fn scheduled_steps(&self) -> Option<u64> {
        self.max_step_at_scale
            .iter()
            .try_fold(0u64, |total, &steps| total.checked_add(steps))
    }

    /// Whether the run resumes from a checkpoint
    pub fn is_resume(&self) -> bool {
        self.ckpt_id.is_some()
    }
}

/// Sampling (test) specification
///
/// Loads a trained generator and draws images from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleSpec {
    /// GPU index
    #[serde(default)]
    pub gpu: usize,

    #[serde(default = "default_n_samples")]
    pub n_samples: usize,

    #[serde(default = "default_sample_save_path")]
    pub save_path: PathBuf,

    /// Generator weights to load
    pub ckpt_path: PathBuf,

    #[serde(default = "default_latent_dim")]
    pub latent_dim: usize,

    #[serde(default = "default_image_dim")]
    pub input_dim: usize,

    #[serde(default = "default_image_dim")]
    pub output_dim: usize,

    #[serde(default = "default_true", deserialize_with = "deserialize_bool_lenient")]
    pub init_bias_to_zero: bool,

    /// Depths the checkpoint was trained up to
    #[serde(default = "default_sample_depths")]
    pub depths: Vec<usize>,

    #[serde(rename = "LReLU_slope", default = "default_lrelu_slope")]
    pub lrelu_slope: f64,

    #[serde(default)]
    pub generator_last_activation: Option<GeneratorActivation>,

    #[serde(default = "default_true", deserialize_with = "deserialize_bool_lenient")]
    pub apply_pixel_norm: bool,

    #[serde(default = "default_true", deserialize_with = "deserialize_bool_lenient")]
    pub equalized_lr: bool,
}

impl SampleSpec {
    pub fn new(ckpt_path: impl Into<PathBuf>) -> Self {
        Self {
            gpu: 0,
            n_samples: default_n_samples(),
            save_path: default_sample_save_path(),
            ckpt_path: ckpt_path.into(),
            latent_dim: default_latent_dim(),
            input_dim: default_image_dim(),
            output_dim: default_image_dim(),
            init_bias_to_zero: true,
            depths: default_sample_depths(),
            lrelu_slope: default_lrelu_slope(),
            generator_last_activation: None,
            apply_pixel_norm: true,
            equalized_lr: true,
        }
    }

    /// Side length of the sampled images
    pub fn resolution(&self) -> usize {
        match self.depths.len() {
            0 => 0,
            n => stage_resolution(n - 1),
        }
    }
}

/// Most stages a run may have (stage 15 is 131072 x 131072)
pub const MAX_STAGES: usize = 16;

/// Image side length at a 0-based stage, `4 * 2^stage`
///
/// Saturates at `usize::MAX` for stages whose side does not fit.
pub fn stage_resolution(stage: usize) -> usize {
    u32::try_from(stage)
        .ok()
        .and_then(|stage| stage.checked_add(2))
        .and_then(|shift| 1usize.checked_shl(shift))
        .unwrap_or(usize::MAX)
}

fn default_true() -> bool {
    true
}

fn default_save_root() -> PathBuf {
    PathBuf::from("train_result")
}

fn default_lr_g() -> f64 {
    1e-4
}

fn default_lr_d() -> f64 {
    4e-5
}

fn default_beta2() -> f64 {
    0.99
}

fn default_w_adv() -> f64 {
    1.0
}

fn default_w_gp() -> f64 {
    10.0
}

fn default_w_drift_d() -> f64 {
    0.001
}

fn default_batch_per_gpu() -> usize {
    16
}

fn default_max_step() -> u64 {
    1_100_000
}

fn default_loss_cycle() -> u64 {
    10
}

fn default_test_cycle() -> u64 {
    1000
}

fn default_ckpt_cycle() -> u64 {
    10000
}

fn default_latent_dim() -> usize {
    512
}

fn default_image_dim() -> usize {
    3
}

// 256 x 256
fn default_depths() -> Vec<usize> {
    vec![512, 512, 512, 512, 256, 128, 64]
}

fn default_max_depths() -> usize {
    7
}

fn default_decision_layer_size() -> usize {
    1
}

fn default_max_step_at_scale() -> Vec<u64> {
    vec![48000, 96000, 96000, 96000, 96000, 96000, 150000]
}

fn default_alpha_jump_start() -> Vec<u64> {
    vec![0, 500, 500, 500, 500, 500, 500]
}

fn default_alpha_jump_interval() -> Vec<u64> {
    vec![0, 32, 32, 32, 32, 32, 32]
}

fn default_alpha_jump_ntimes() -> Vec<u64> {
    vec![0, 600, 600, 600, 600, 600, 600]
}

fn default_lrelu_slope() -> f64 {
    0.2
}

fn default_n_samples() -> usize {
    10
}

fn default_sample_save_path() -> PathBuf {
    PathBuf::from("./test_result")
}

// 128 x 128
fn default_sample_depths() -> Vec<usize> {
    vec![512, 512, 512, 512, 256, 128]
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
model_id: celeba_hq
dataset_root_list:
  - /data/celeba_hq
"#;

    #[test]
    fn test_minimal_yaml_fills_defaults() {
        let spec: TrainSpec = serde_yaml::from_str(MINIMAL).unwrap();
        assert_eq!(spec, TrainSpec::new("celeba_hq", vec!["/data/celeba_hq".into()]));
        assert_eq!(spec.stage_count(), 7);
        assert_eq!(spec.final_resolution(), 256);
        assert!(spec.ckpt_id.is_none());
        assert!(spec.ckpt_step.is_none());
    }

    #[test]
    fn test_mixed_case_keys() {
        let yaml = r#"
model_id: run
dataset_root_list: [/data]
use_mGPU: true
lr_G: 0.0002
lr_D: 0.0001
W_gp: 5
W_drift_D: 0.01
LReLU_slope: 0.1
alpha_jump_Ntimes: [0, 10, 10, 10, 10, 10, 10]
"#;
        let spec: TrainSpec = serde_yaml::from_str(yaml).unwrap();
        assert!(spec.use_mgpu);
        assert!((spec.lr_g - 2e-4).abs() < 1e-12);
        assert!((spec.lr_d - 1e-4).abs() < 1e-12);
        assert!((spec.w_gp - 5.0).abs() < 1e-12);
        assert!((spec.w_drift_d - 0.01).abs() < 1e-12);
        assert!((spec.lrelu_slope - 0.1).abs() < 1e-12);
        assert_eq!(spec.alpha_jump_ntimes[1], 10);
    }

    #[test]
    fn test_lenient_bool_accepts_quoted() {
        let yaml = r#"
model_id: run
dataset_root_list: [/data]
use_wandb: "true"
apply_pixel_norm: "false"
"#;
        let spec: TrainSpec = serde_yaml::from_str(yaml).unwrap();
        assert!(spec.use_wandb);
        assert!(!spec.apply_pixel_norm);
    }

    #[test]
    fn test_lenient_bool_rejects_garbage() {
        let yaml = "model_id: run\ndataset_root_list: [/data]\nuse_wandb: maybe\n";
        let err = serde_yaml::from_str::<TrainSpec>(yaml).unwrap_err();
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn test_missing_required_field() {
        let err = serde_yaml::from_str::<TrainSpec>("model_id: run\n").unwrap_err();
        assert!(err.to_string().contains("dataset_root_list"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "model_id: run\ndataset_root_list: [/data]\nalpha_jump_ntimes: [0]\n";
        assert!(serde_yaml::from_str::<TrainSpec>(yaml).is_err());
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let yaml = "model_id: run\ndataset_root_list: [/data]\nbatch_per_gpu: sixteen\n";
        assert!(serde_yaml::from_str::<TrainSpec>(yaml).is_err());
    }

    #[test]
    fn test_negative_ckpt_step_rejected() {
        let yaml = "model_id: run\ndataset_root_list: [/data]\nckpt_id: old\nckpt_step: -5\n";
        assert!(serde_yaml::from_str::<TrainSpec>(yaml).is_err());
    }

    #[test]
    fn test_null_resume_pointers() {
        let yaml = "model_id: run\ndataset_root_list: [/data]\nckpt_id: null\nckpt_step: ~\n";
        let spec: TrainSpec = serde_yaml::from_str(yaml).unwrap();
        assert!(!spec.is_resume());
        assert!(spec.ckpt_step.is_none());
    }

    #[test]
    fn test_generator_activation() {
        let yaml = "model_id: run\ndataset_root_list: [/data]\ngenerator_last_activation: tanh\n";
        let spec: TrainSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.generator_last_activation, Some(GeneratorActivation::Tanh));
        assert_eq!(GeneratorActivation::Tanh.to_string(), "tanh");
    }

    #[test]
    fn test_yaml_roundtrip_keeps_mixed_case_keys() {
        let spec = TrainSpec::new("run", vec!["/a".into(), "/b".into()]);
        let yaml = serde_yaml::to_string(&spec).unwrap();
        assert!(yaml.contains("use_mGPU"));
        assert!(yaml.contains("alpha_jump_Ntimes"));
        assert!(yaml.contains("LReLU_slope"));
        let back: TrainSpec = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_effective_batch() {
        let mut spec = TrainSpec::new("run", vec!["/data".into()]);
        assert_eq!(spec.effective_batch(4), 16);
        spec.use_mgpu = true;
        assert_eq!(spec.effective_batch(4), 64);
        assert_eq!(spec.effective_batch(0), 16);
    }

    #[test]
    fn test_scheduled_steps() {
        let spec = TrainSpec::new("run", vec!["/data".into()]);
        assert_eq!(spec.scheduled_steps(), Some(48000 + 5 * 96000 + 150000));
    }

    #[test]
    fn test_scheduled_steps_overflow() {
        let mut spec = TrainSpec::new("run", vec!["/data".into()]);
        spec.max_step_at_scale = vec![10, u64::MAX];
        assert_eq!(spec.scheduled_steps(), None);
    }

    #[test]
    fn test_stage_resolution() {
        assert_eq!(stage_resolution(0), 4);
        assert_eq!(stage_resolution(6), 256);
        assert_eq!(stage_resolution(61), 1 << 63);
        assert_eq!(stage_resolution(62), usize::MAX);
        assert_eq!(stage_resolution(200), usize::MAX);
    }

    #[test]
    fn test_sample_spec_defaults() {
        let spec: SampleSpec =
            serde_yaml::from_str("ckpt_path: train_result/run/ckpt/G_latest.pt\n").unwrap();
        assert_eq!(spec, SampleSpec::new("train_result/run/ckpt/G_latest.pt"));
        assert_eq!(spec.resolution(), 128);
        assert_eq!(spec.n_samples, 10);
    }
}
