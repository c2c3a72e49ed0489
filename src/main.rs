use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use mudra_coach::assess::{self, ErrorGrade, TremorAnalyzer};
use mudra_coach::config::Config;
use mudra_coach::hand::Landmark3;
use mudra_coach::mudra::MudraPose;
use mudra_coach::session::SessionLogger;
use mudra_coach::store;

const CONFIG_PATH: &str = "config.toml";

/// 録画ファイル（JSON Lines）の1フレーム
///
/// 外部の検出器が出力したランドマーク列とタイムスタンプ（秒）。
#[derive(Debug, Deserialize)]
struct RecordedFrame {
    timestamp: f64,
    landmarks: Vec<Landmark3>,
}

fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);

    println!("=== Mudra Coach ({}) ===", env!("GIT_VERSION"));
    println!("ムドラ保存先: {}", config.session.mudra_dir);
    println!("セッションログ: {}", config.session.output_dir);
    println!(
        "較正: max_error={}, 評価閾値=({}, {})",
        config.assess.max_error, config.assess.good_error, config.assess.poor_error
    );
    println!(
        "トレモア窓: {}秒, フレーム間隔: {}ms",
        config.tremor.window_secs, config.session.frame_interval_ms
    );
    println!();
    println!("コマンド:");
    println!("  ls            - 保存済みムドラの一覧");
    println!("  l <name>      - 参照ムドラを読み込む");
    println!("  p <file>      - 録画ファイル(JSONL)をリプレイして採点");
    println!("  rec           - セッション記録のON/OFF");
    println!("  q             - 終了");
    println!();

    let mudra_dir = Path::new(&config.session.mudra_dir);
    let mut target: Option<MudraPose> = None;
    let mut logger = SessionLogger::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let parts: Vec<&str> = input.trim().split_whitespace().collect();

        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "ls" => {
                let names = store::list_mudras(mudra_dir)?;
                if names.is_empty() {
                    println!("保存済みムドラはありません");
                } else {
                    for name in names {
                        println!("  {}", name);
                    }
                }
            }
            "l" if parts.len() == 2 => match store::load_mudra_named(mudra_dir, parts[1]) {
                Ok(mudra) => {
                    println!(
                        "参照ムドラ: {} ({}ランドマーク)",
                        mudra.name,
                        mudra.landmarks.len()
                    );
                    target = Some(mudra);
                }
                Err(e) => println!("読み込み失敗: {:#}", e),
            },
            "p" if parts.len() == 2 => {
                if let Err(e) = replay(parts[1], &config, target.as_ref(), &mut logger) {
                    println!("リプレイ失敗: {:#}", e);
                }
            }
            "rec" => {
                if logger.is_recording() {
                    logger.stop()?;
                    println!("記録停止");
                } else {
                    let path = logger.start(Path::new(&config.session.output_dir))?;
                    println!("記録開始: {}", path.display());
                }
            }
            "q" => {
                logger.stop()?;
                println!("終了します");
                break;
            }
            _ => {
                println!("不明なコマンド: {}", parts[0]);
            }
        }
    }

    Ok(())
}

/// 録画ファイルを1フレームずつ評価する
///
/// フレーム処理はライブカメラと同じ間隔（約30FPS）に間引く。
fn replay(
    path: &str,
    config: &Config,
    target: Option<&MudraPose>,
    logger: &mut SessionLogger,
) -> Result<()> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open recording {}", path))?;
    let reader = BufReader::new(file);

    let mut tremor = TremorAnalyzer::with_window(config.tremor.window_secs);
    let interval_secs = config.session.frame_interval_ms as f64 / 1000.0;
    let mut last_processed: Option<f64> = None;

    let target_name = target.map(|m| m.name.as_str()).unwrap_or("(未設定)");
    println!("リプレイ: {} (目標: {})", path, target_name);

    let mut processed = 0usize;
    let mut skipped = 0usize;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: RecordedFrame = serde_json::from_str(&line)
            .with_context(|| format!("Bad frame at line {}", lineno + 1))?;

        // 間引き: 前回処理から間隔未満のフレームは飛ばす
        if let Some(last) = last_processed {
            if frame.timestamp - last < interval_secs {
                skipped += 1;
                continue;
            }
        }
        last_processed = Some(frame.timestamp);
        processed += 1;

        if let Some(wrist) = frame.landmarks.first() {
            tremor.add_sample(*wrist, frame.timestamp);
        }
        let stability = tremor.stability();

        match target {
            Some(mudra) => {
                let error = assess::average_error(&frame.landmarks, &mudra.landmarks);
                let score = assess::accuracy_score_with(error, config.assess.max_error);

                let grades = assess::landmark_errors(&frame.landmarks, &mudra.landmarks)
                    .map(|errors| grade_counts(&errors, config));

                match grades {
                    Some((good, warn, poor)) => println!(
                        "t={:.3} error={:.4} score={:3.0}% tremor=({:.4}, {:.4}) 良{} 中{} 不{}",
                        frame.timestamp,
                        error,
                        score * 100.0,
                        stability.0,
                        stability.1,
                        good,
                        warn,
                        poor
                    ),
                    // ランドマーク数が参照と合わないフレームは採点対象外
                    None => println!(
                        "t={:.3} 比較不能 ({}ランドマーク) tremor=({:.4}, {:.4})",
                        frame.timestamp,
                        frame.landmarks.len(),
                        stability.0,
                        stability.1
                    ),
                }

                logger.log_frame(frame.timestamp, &mudra.name, score, stability)?;
            }
            None => println!(
                "t={:.3} tremor=({:.4}, {:.4})",
                frame.timestamp, stability.0, stability.1
            ),
        }
    }

    println!("処理 {} フレーム (間引き {})", processed, skipped);
    Ok(())
}

fn grade_counts(errors: &[f32], config: &Config) -> (usize, usize, usize) {
    let mut counts = (0, 0, 0);
    for &e in errors {
        match ErrorGrade::with_thresholds(e, config.assess.good_error, config.assess.poor_error) {
            ErrorGrade::Good => counts.0 += 1,
            ErrorGrade::Warn => counts.1 += 1,
            ErrorGrade::Poor => counts.2 += 1,
        }
    }
    counts
}
