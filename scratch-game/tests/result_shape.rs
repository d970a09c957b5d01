use scratch_game::{GameConfig, ScratchEngine, ScratchResult};
use serde_json::Value;

const CONFIG: &str = include_str!("fixtures/config.json");

fn seeded_result(seed: u64) -> ScratchResult {
    let config = GameConfig::from_json(CONFIG).expect("fixture config parses");
    ScratchEngine::new(config)
        .play_seeded(100, seed)
        .expect("round plays")
}

#[test]
fn result_json_has_public_field_set() {
    let json = seeded_result(7).to_json().unwrap();
    assert!(!json.contains('\n'));
    let positions: Vec<usize> = [
        "\"matrix\"",
        "\"reward\"",
        "\"applied_winning_combinations\"",
        "\"applied_bonus_symbol\"",
    ]
    .iter()
    .map(|key| json.find(key).expect("field present"))
    .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    let value: Value = serde_json::from_str(&json).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 4);

    let matrix = object["matrix"].as_array().unwrap();
    assert_eq!(matrix.len(), 3);
    assert!(matrix.iter().all(|row| row.as_array().map(Vec::len) == Some(3)));
    assert!(object["reward"].is_u64());
    assert!(object["applied_bonus_symbol"].is_string());

    for entry in object["applied_winning_combinations"].as_array().unwrap() {
        let entry = entry.as_object().unwrap();
        assert_eq!(entry.len(), 1);
        assert!(entry.values().all(Value::is_string));
    }
}

#[test]
fn serialized_results_round_trip() {
    for seed in 0..32 {
        let result = seeded_result(seed);
        let json = result.to_json().unwrap();
        let parsed: ScratchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.matrix, result.matrix);
        assert_eq!(parsed.reward, result.reward);
        assert_eq!(
            parsed.applied_winning_combinations,
            result.applied_winning_combinations
        );
        assert_eq!(parsed.applied_bonus_symbol, result.applied_bonus_symbol);
    }
}
