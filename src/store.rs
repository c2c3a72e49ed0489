//! 参照ムドラの保存・読み込み
//!
//! ムドラごとに `<dir>/<name>.json` を1ファイル作る。名前の空白は
//! `_` に置換する。ファイル内容は `MudraPose` のJSON。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::mudra::MudraPose;

/// ムドラ名から保存先パスを決める
pub fn mudra_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.json", name.replace(' ', "_")))
}

/// ムドラを保存し、書き込んだパスを返す
pub fn save_mudra(dir: &Path, mudra: &MudraPose) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create mudra dir {}", dir.display()))?;
    let path = mudra_path(dir, &mudra.name);
    let json = serde_json::to_string_pretty(mudra)?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write mudra file {}", path.display()))?;
    Ok(path)
}

/// パス指定でムドラを読み込む
pub fn load_mudra(path: &Path) -> Result<MudraPose> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mudra file {}", path.display()))?;
    let mudra: MudraPose = serde_json::from_str(&content)?;
    Ok(mudra)
}

/// 名前指定でムドラを読み込む
pub fn load_mudra_named(dir: &Path, name: &str) -> Result<MudraPose> {
    load_mudra(&mudra_path(dir, name))
}

/// 保存済みムドラ名の一覧（ソート済み）
///
/// ディレクトリがまだ無い場合は空の一覧を返す。
pub fn list_mudras(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// 保存済みムドラを削除する
pub fn delete_mudra(dir: &Path, name: &str) -> Result<()> {
    let path = mudra_path(dir, name);
    fs::remove_file(&path)
        .with_context(|| format!("Failed to delete mudra file {}", path.display()))?;
    Ok(())
}
