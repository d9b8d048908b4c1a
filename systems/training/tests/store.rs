use std::path::PathBuf;

use maze_chase_system_training::{Network, PolicyStoreError, SavedPolicy};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "maze-chase-store-{}-{name}.json",
        std::process::id()
    ))
}

#[test]
fn missing_file_is_reported_as_not_found() {
    let path = scratch("missing");
    let _ = std::fs::remove_file(&path);
    match SavedPolicy::load(&path) {
        Err(PolicyStoreError::NotFound { path: reported }) => assert_eq!(reported, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn garbage_is_reported_as_malformed() {
    let path = scratch("garbage");
    std::fs::write(&path, "{ not json").expect("write scratch file");
    let result = SavedPolicy::load(&path);
    let _ = std::fs::remove_file(&path);
    assert!(matches!(result, Err(PolicyStoreError::Malformed { .. })));
}

#[test]
fn saved_policy_loads_back() {
    let path = scratch("roundtrip");
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let policy = SavedPolicy {
        generation: 12,
        fitness: 3_450,
        network: Network::random(5, &mut rng),
    };

    policy.save(&path).expect("save policy");
    let loaded = SavedPolicy::load(&path).expect("load policy");
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, policy);
}

#[test]
fn inconsistent_dimensions_are_rejected() {
    let path = scratch("shape");
    let policy = SavedPolicy {
        generation: 0,
        fitness: 0,
        network: Network::zeroed(4),
    };
    let mut value = serde_json::to_value(&policy).expect("encode policy");
    value["network"]["hidden"] = serde_json::json!(5);
    std::fs::write(&path, value.to_string()).expect("write scratch file");

    let result = SavedPolicy::load(&path);
    let _ = std::fs::remove_file(&path);
    assert!(matches!(result, Err(PolicyStoreError::Shape { .. })));
}
