use crate::hand::Landmark3;

/// デフォルトの保持ウィンドウ（秒）
pub const WINDOW_SECS: f64 = 2.0;

/// 1フレーム分の手首位置サンプル
#[derive(Debug, Clone, Copy)]
struct TremorSample {
    timestamp: f64,
    position: Landmark3,
}

/// 手の震え（トレモア）解析
///
/// 手首位置をスライディングウィンドウに蓄積し、X/Y座標の
/// 母標準偏差を返す。値が小さいほど安定。
///
/// スレッド安全性は持たない。複数スレッドから共有する場合は
/// 呼び出し側で直列化すること。
pub struct TremorAnalyzer {
    buffer: Vec<TremorSample>,
    window_secs: f64,
}

impl TremorAnalyzer {
    pub fn new() -> Self {
        Self::with_window(WINDOW_SECS)
    }

    pub fn with_window(window_secs: f64) -> Self {
        Self {
            buffer: Vec::new(),
            window_secs,
        }
    }

    /// サンプルを追加し、ウィンドウ外の古いサンプルを破棄する
    ///
    /// timestamp は単調非減少を想定（秒）。追加直後のサンプルは
    /// 必ずカットオフ以上になるため先頭走査で境界が見つかるが、
    /// 時計が逆行した場合に備えて全走査のフィルタにフォールバック
    /// する。
    pub fn add_sample(&mut self, position: Landmark3, timestamp: f64) {
        self.buffer.push(TremorSample {
            timestamp,
            position,
        });

        let cutoff = timestamp - self.window_secs;
        match self.buffer.iter().position(|s| s.timestamp >= cutoff) {
            Some(first) => {
                self.buffer.drain(..first);
            }
            None => {
                // 逆行タイムスタンプのバックストップ: 新しいカットオフ
                // 基準でウィンドウ内のサンプルだけ残す
                self.buffer.retain(|s| s.timestamp >= cutoff);
            }
        }
    }

    /// X/Y座標の母標準偏差 (Nで割る)
    ///
    /// サンプルが1個以下なら分散は定義できないため (0.0, 0.0)。
    /// Z（深度）はノイズが大きく視平面の震え指標に寄与しないため
    /// 対象外とする。
    pub fn stability(&self) -> (f32, f32) {
        if self.buffer.len() < 2 {
            return (0.0, 0.0);
        }

        let n = self.buffer.len() as f32;

        let sum_x: f32 = self.buffer.iter().map(|s| s.position.x).sum();
        let sum_y: f32 = self.buffer.iter().map(|s| s.position.y).sum();
        let mean_x = sum_x / n;
        let mean_y = sum_y / n;

        let var_x: f32 = self
            .buffer
            .iter()
            .map(|s| (s.position.x - mean_x).powi(2))
            .sum::<f32>()
            / n;
        let var_y: f32 = self
            .buffer
            .iter()
            .map(|s| (s.position.y - mean_y).powi(2))
            .sum::<f32>()
            / n;

        (var_x.sqrt(), var_y.sqrt())
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// バッファを空に戻す
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}

impl Default for TremorAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
