use serde::{Deserialize, Serialize};

use crate::hand::Landmark3;

/// 保存済みの参照ムドラ（目標ジェスチャー）
///
/// JSON形式 `{name, landmarks: [{x, y, z}, ...]}` と一対一。
/// 作成後は不変。ライブポーズとの比較時に参照側として渡す。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MudraPose {
    pub name: String,
    pub landmarks: Vec<Landmark3>,
}

impl MudraPose {
    /// ライブフレームのランドマーク列から参照ムドラを作る
    pub fn capture(name: impl Into<String>, landmarks: &[Landmark3]) -> Self {
        Self {
            name: name.into(),
            landmarks: landmarks.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_copies_landmarks() {
        let landmarks = vec![
            Landmark3::new(0.0, 0.0, 0.0),
            Landmark3::new(0.1, 0.2, 0.3),
        ];
        let mudra = MudraPose::capture("anjali", &landmarks);
        assert_eq!(mudra.name, "anjali");
        assert_eq!(mudra.landmarks, landmarks);
    }

    #[test]
    fn test_json_shape() {
        // 保存形式: {name, landmarks:[{x,y,z}...]}
        let mudra = MudraPose {
            name: "chin".to_string(),
            landmarks: vec![Landmark3::new(1.0, 2.0, 3.0)],
        };
        let json = serde_json::to_string(&mudra).unwrap();
        assert!(json.contains("\"name\":\"chin\""));
        assert!(json.contains("\"x\":1.0"));

        let back: MudraPose = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, mudra.name);
        assert_eq!(back.landmarks, mudra.landmarks);
    }
}
