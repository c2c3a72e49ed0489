use crate::hand::Landmark3;

/// 精度スコア較正の上限エラー
///
/// error >= 0.2 でスコア0、error 0 でスコア1.0。
pub const MAX_ERROR: f32 = 0.2;

/// ランドマーク別評価: これ未満は良好
pub const GOOD_ERROR: f32 = 0.03;
/// ランドマーク別評価: これ超過は不良
pub const POOR_ERROR: f32 = 0.05;

/// 2つのポーズ間の平均ユークリッド距離
///
/// 両ポーズをそれぞれ手首（インデックス0）基準で正規化してから
/// インデックスごとの距離を平均する。手の全体位置の差はスコアに
/// 影響しない。
///
/// どちらかが空、または長さが一致しない場合は比較不能として
/// `f32::INFINITY` を返す。呼び出し側はスコア表示を抑制すること。
pub fn average_error(user: &[Landmark3], reference: &[Landmark3]) -> f32 {
    if user.is_empty() || reference.is_empty() || user.len() != reference.len() {
        return f32::INFINITY;
    }

    let user = normalize(user);
    let reference = normalize(reference);

    let total: f32 = user
        .iter()
        .zip(reference.iter())
        .map(|(u, r)| u.distance(r))
        .sum();

    total / user.len() as f32
}

/// ランドマークごとのユークリッド距離
///
/// 正規化は `average_error` と同一。入力と同じ順序・同じ長さの列を
/// 返す。比較不能（空・長さ不一致）の場合は `None`。
pub fn landmark_errors(user: &[Landmark3], reference: &[Landmark3]) -> Option<Vec<f32>> {
    if user.is_empty() || reference.is_empty() || user.len() != reference.len() {
        return None;
    }

    let user = normalize(user);
    let reference = normalize(reference);

    Some(
        user.iter()
            .zip(reference.iter())
            .map(|(u, r)| u.distance(r))
            .collect(),
    )
}

/// 手首（インデックス0）を原点に平行移動した列を返す
fn normalize(pose: &[Landmark3]) -> Vec<Landmark3> {
    let wrist = match pose.first() {
        Some(wrist) => *wrist,
        None => return Vec::new(),
    };
    pose.iter().map(|p| p.translated(&wrist)).collect()
}

/// エラー値から精度スコア (0.0〜1.0) を導く
///
/// `max(0, 1 - error / MAX_ERROR)`。error は非負なのでスコアが1.0を
/// 超えることはなく、上側のクランプは不要。比較不能の INFINITY は
/// そのまま0.0になる。
pub fn accuracy_score(error: f32) -> f32 {
    accuracy_score_with(error, MAX_ERROR)
}

/// 較正値を差し替えられる版（設定ファイル経由で使う）
pub fn accuracy_score_with(error: f32, max_error: f32) -> f32 {
    (1.0 - error / max_error).max(0.0)
}

/// ランドマーク別エラーの3段階評価
///
/// 表示側の色分け（良好=緑、中間=黄、不良=赤）に対応。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorGrade {
    Good,
    Warn,
    Poor,
}

impl ErrorGrade {
    pub fn of(error: f32) -> Self {
        Self::with_thresholds(error, GOOD_ERROR, POOR_ERROR)
    }

    pub fn with_thresholds(error: f32, good: f32, poor: f32) -> Self {
        if error < good {
            Self::Good
        } else if error > poor {
            Self::Poor
        } else {
            Self::Warn
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(points: &[(f32, f32, f32)]) -> Vec<Landmark3> {
        points
            .iter()
            .map(|&(x, y, z)| Landmark3::new(x, y, z))
            .collect()
    }

    fn shift(pose: &[Landmark3], dx: f32, dy: f32, dz: f32) -> Vec<Landmark3> {
        pose.iter()
            .map(|p| Landmark3::new(p.x + dx, p.y + dy, p.z + dz))
            .collect()
    }

    #[test]
    fn test_identical_pose_zero_error() {
        let p = pose(&[(0.1, 0.2, 0.3), (0.4, 0.5, 0.6), (0.7, 0.8, 0.9)]);
        assert_eq!(average_error(&p, &p), 0.0);
    }

    #[test]
    fn test_empty_inputs_incomparable() {
        let p = pose(&[(0.0, 0.0, 0.0)]);
        assert_eq!(average_error(&[], &p), f32::INFINITY);
        assert_eq!(average_error(&p, &[]), f32::INFINITY);
        // 両方空も比較不能扱い
        assert_eq!(average_error(&[], &[]), f32::INFINITY);
    }

    #[test]
    fn test_length_mismatch_incomparable() {
        let a = pose(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]);
        let b = pose(&[(0.0, 0.0, 0.0)]);
        assert_eq!(average_error(&a, &b), f32::INFINITY);
    }

    #[test]
    fn test_translation_invariance() {
        let a = pose(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)]);
        let b = pose(&[(0.0, 0.0, 0.0), (0.5, 0.5, 0.0), (0.0, 0.5, 0.5)]);
        let base = average_error(&a, &b);

        // 各ポーズ別々の全体オフセットをかけても結果は変わらない
        let a_shifted = shift(&a, 10.0, -3.0, 0.5);
        let b_shifted = shift(&b, -7.0, 2.0, 100.0);
        let shifted = average_error(&a_shifted, &b_shifted);

        assert!((base - shifted).abs() < 1e-5);
    }

    #[test]
    fn test_known_distance() {
        // アンカー正規化後: index 1 の距離 = sqrt(1^2 + 1^2) = sqrt(2)
        // 平均は全インデックス (アンカー含む) で割る: sqrt(2) / 2
        let user = pose(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]);
        let reference = pose(&[(0.0, 0.0, 0.0), (0.0, 1.0, 0.0)]);

        let sqrt2 = std::f32::consts::SQRT_2;
        let error = average_error(&user, &reference);
        assert!((error - sqrt2 / 2.0).abs() < 1e-6);

        let errors = landmark_errors(&user, &reference).unwrap();
        assert_eq!(errors.len(), 2);
        assert!((errors[0] - 0.0).abs() < 1e-6);
        assert!((errors[1] - sqrt2).abs() < 1e-6);
    }

    #[test]
    fn test_landmark_errors_none_on_invalid() {
        let p = pose(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]);
        assert_eq!(landmark_errors(&[], &p), None);
        assert_eq!(landmark_errors(&p, &[]), None);
        let short = pose(&[(0.0, 0.0, 0.0)]);
        assert_eq!(landmark_errors(&p, &short), None);
    }

    #[test]
    fn test_landmark_errors_mean_matches_average() {
        let a = pose(&[(0.0, 0.0, 0.0), (1.0, 2.0, 3.0), (-1.0, 0.5, 0.2)]);
        let b = pose(&[(0.5, 0.5, 0.5), (1.2, 1.8, 3.3), (-0.8, 0.4, 0.1)]);

        let errors = landmark_errors(&a, &b).unwrap();
        assert_eq!(errors.len(), a.len());

        let mean: f32 = errors.iter().sum::<f32>() / errors.len() as f32;
        assert!((mean - average_error(&a, &b)).abs() < 1e-6);
    }

    #[test]
    fn test_accuracy_score_boundaries() {
        assert_eq!(accuracy_score(0.0), 1.0);
        assert_eq!(accuracy_score(0.2), 0.0);
        // 0.2超でも負にはならない
        assert_eq!(accuracy_score(0.4), 0.0);
        assert_eq!(accuracy_score(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_accuracy_score_midpoint() {
        assert!((accuracy_score(0.1) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_error_grade_thresholds() {
        assert_eq!(ErrorGrade::of(0.0), ErrorGrade::Good);
        assert_eq!(ErrorGrade::of(0.029), ErrorGrade::Good);
        assert_eq!(ErrorGrade::of(0.03), ErrorGrade::Warn);
        assert_eq!(ErrorGrade::of(0.05), ErrorGrade::Warn);
        assert_eq!(ErrorGrade::of(0.051), ErrorGrade::Poor);
    }
}
