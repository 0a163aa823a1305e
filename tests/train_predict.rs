// End-to-end scenario: train on a tiny fixed corpus, persist the
// artifacts, reload them, and predict on raw text.

use std::fs;
use std::path::Path;

use text_sentiment::application::predict_use_case::PredictUseCase;
use text_sentiment::application::train_use_case::{TrainConfig, TrainUseCase};
use text_sentiment::domain::traits::SentimentPredictor;

const CORPUS: &str = "\
1 this movie was awesome
1 what a great film
0 this movie was terrible
0 what a boring film
";

fn train_into(dir: &Path) -> TrainConfig {
    let train_file = dir.join("train");
    let val_file = dir.join("test");
    fs::write(&train_file, CORPUS).unwrap();
    fs::write(&val_file, CORPUS).unwrap();

    let config = TrainConfig {
        train_file: train_file.to_string_lossy().into_owned(),
        val_file: val_file.to_string_lossy().into_owned(),
        model_dir: dir.join("model").to_string_lossy().into_owned(),
        batch_size: 2,
        // enough passes over four sentences to fit them
        epochs: 25,
        learning_rate: 0.05,
        embedding_size: 16,
        log_interval: 1,
        buckets: Some(vec![8]),
        min_count: 1,
        max_vocab: 100_000,
        seed: Some(42),
    };
    TrainUseCase::new(config.clone()).execute().unwrap();
    config
}

fn corpus_texts() -> Vec<String> {
    CORPUS
        .lines()
        .map(|line| line.splitn(2, ' ').nth(1).unwrap().to_string())
        .collect()
}

#[test]
fn train_saves_artifacts_and_predictions_beat_chance() {
    let dir = tempfile::tempdir().unwrap();
    let config = train_into(dir.path());

    // both halves of the artifact pair exist
    let model_dir = Path::new(&config.model_dir);
    assert!(model_dir.join("model.mpk").exists());
    assert!(model_dir.join("vocab.json").exists());
    assert!(model_dir.join("metrics.csv").exists());

    let predictor = PredictUseCase::new(&config.model_dir).unwrap();
    let labels = predictor.predict(&corpus_texts()).unwrap();

    assert_eq!(labels.len(), 4);
    assert!(labels.iter().all(|&l| l == 0 || l == 1));

    let truth = [1u8, 1, 0, 0];
    let correct = labels.iter().zip(truth).filter(|&(&p, t)| p == t).count();
    assert!(correct >= 2, "accuracy below chance: {labels:?}");
}

#[test]
fn reloading_artifacts_yields_identical_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let config = train_into(dir.path());
    let texts = corpus_texts();

    let first = PredictUseCase::new(&config.model_dir).unwrap();
    let second = PredictUseCase::new(&config.model_dir).unwrap();

    // no drift from serialisation, and predict is idempotent
    let a = first.predict(&texts).unwrap();
    let b = first.predict(&texts).unwrap();
    let c = second.predict(&texts).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn prediction_is_order_preserving_across_buckets() {
    let dir = tempfile::tempdir().unwrap();
    let config = train_into(dir.path());
    let predictor = PredictUseCase::new(&config.model_dir).unwrap();

    let texts: Vec<String> = vec![
        "awesome".to_string(),
        "what a very long and quite boring film this turned out to be".to_string(),
        "great film".to_string(),
    ];
    let forward = predictor.predict(&texts).unwrap();

    let reversed: Vec<String> = texts.iter().rev().cloned().collect();
    let mut backward = predictor.predict(&reversed).unwrap();
    backward.reverse();

    assert_eq!(forward.len(), 3);
    assert_eq!(forward, backward);
}

#[test]
fn empty_input_yields_empty_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = train_into(dir.path());
    let predictor = PredictUseCase::new(&config.model_dir).unwrap();
    assert_eq!(predictor.predict(&[]).unwrap(), Vec::<u8>::new());
}

#[test]
fn json_request_rejects_only_offending_elements() {
    let dir = tempfile::tempdir().unwrap();
    let config = train_into(dir.path());
    let predictor = PredictUseCase::new(&config.model_dir).unwrap();

    let response = predictor
        .respond(r#"["a great film", 17, "   ", "a boring film"]"#)
        .unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&response).unwrap();

    assert_eq!(parsed.len(), 4);
    assert!(parsed[0].is_u64(), "valid element was rejected: {parsed:?}");
    assert!(parsed[1].is_null(), "non-string element was accepted");
    assert!(parsed[2].is_null(), "token-free element was accepted");
    assert!(parsed[3].is_u64(), "valid element was rejected: {parsed:?}");
}
