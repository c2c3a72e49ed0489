//! 練習セッションのCSVロガー
//!
//! 1フレームごとに `timestamp,mudra,accuracy,stability_x,stability_y`
//! を追記する。ファイル名はローカル時刻で
//! `session_YYYYMMDD_HHMMSS.csv`。

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &str = "timestamp,mudra,accuracy,stability_x,stability_y";

pub struct SessionLogger {
    writer: Option<BufWriter<File>>,
    path: Option<PathBuf>,
}

impl SessionLogger {
    pub fn new() -> Self {
        Self {
            writer: None,
            path: None,
        }
    }

    /// 新しいセッションファイルを開きヘッダを書く
    ///
    /// 既にセッション中なら前のファイルを閉じてから開き直す。
    pub fn start(&mut self, dir: &Path) -> Result<PathBuf> {
        self.stop()?;

        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create session dir {}", dir.display()))?;
        let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("session_{}.csv", ts));

        let file = File::create(&path)
            .with_context(|| format!("Failed to create session file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", CSV_HEADER)?;
        writer.flush()?;

        self.writer = Some(writer);
        self.path = Some(path.clone());
        Ok(path)
    }

    /// 1フレーム分の記録を追記する
    ///
    /// セッション未開始なら何もしない（エラーではない）。
    pub fn log_frame(
        &mut self,
        timestamp: f64,
        mudra: &str,
        accuracy: f32,
        stability: (f32, f32),
    ) -> Result<()> {
        let writer = match self.writer.as_mut() {
            Some(writer) => writer,
            None => return Ok(()),
        };
        writeln!(
            writer,
            "{:.3},{},{:.4},{:.4},{:.4}",
            timestamp, mudra, accuracy, stability.0, stability.1
        )?;
        Ok(())
    }

    /// セッションを閉じる（フラッシュ込み）
    pub fn stop(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        self.path = None;
        Ok(())
    }

    pub fn is_recording(&self) -> bool {
        self.writer.is_some()
    }

    /// 現在のセッションファイルのパス
    pub fn current_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Default for SessionLogger {
    fn default() -> Self {
        Self::new()
    }
}
