use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::assess;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub assess: AssessConfig,
    #[serde(default)]
    pub tremor: TremorConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssessConfig {
    /// 精度較正の上限エラー (これ以上でスコア0)
    #[serde(default = "default_max_error")]
    pub max_error: f32,
    /// ランドマーク別評価: これ未満は良好
    #[serde(default = "default_good_error")]
    pub good_error: f32,
    /// ランドマーク別評価: これ超過は不良
    #[serde(default = "default_poor_error")]
    pub poor_error: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TremorConfig {
    /// サンプル保持ウィンドウ（秒）
    #[serde(default = "default_window_secs")]
    pub window_secs: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// セッションCSVの出力先
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// 参照ムドラJSONの保存先
    #[serde(default = "default_mudra_dir")]
    pub mudra_dir: String,
    /// リプレイ時のフレーム処理間隔（ミリ秒、約30FPS）
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

fn default_max_error() -> f32 { assess::MAX_ERROR }
fn default_good_error() -> f32 { assess::GOOD_ERROR }
fn default_poor_error() -> f32 { assess::POOR_ERROR }
fn default_window_secs() -> f64 { assess::WINDOW_SECS }
fn default_output_dir() -> String { "logs".to_string() }
fn default_mudra_dir() -> String { "mudras".to_string() }
fn default_frame_interval_ms() -> u64 { 33 }

impl Default for AssessConfig {
    fn default() -> Self {
        Self {
            max_error: default_max_error(),
            good_error: default_good_error(),
            poor_error: default_poor_error(),
        }
    }
}

impl Default for TremorConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            mudra_dir: default_mudra_dir(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 設定ファイルがない・読めない場合はデフォルトで起動する
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
