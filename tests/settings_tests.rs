// SPDX-License-Identifier: PMPL-1.0-or-later

//! Settings files driving searches and reports

use enigma_breaker::report::{self, CrackReport, ReportOutputFormat, TextFileSink};
use enigma_breaker::{
    ConfigurationError, EncryptionEngine, EnigmaError, MatchSink, SearchEngine, Settings,
};
use std::fs;

const TASK1_JSON: &str = r#"{
    "label": "reflector hunt",
    "code": "DMEXBMKYCVPNQBEDHXVPZGKMTFFBJRPJTLHLCHOTKOYXGGHZ",
    "crib": "SECRETS",
    "rotors": "Beta Gamma V",
    "reflector": "UNKNOWN",
    "ring_settings": "04 02 14",
    "initial_positions": "MJM",
    "plugboard_pairs": "KI XN FL",
    "search": { "parallel": false }
}"#;

#[test]
fn test_crack_from_json_file_into_text_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("task1.json");
    fs::write(&settings_path, TASK1_JSON).unwrap();

    let settings = Settings::load(&settings_path).unwrap();
    assert!(!settings.search_options().parallel);
    let task = settings.to_task().unwrap();

    let results_path = dir.path().join("codebreak.txt");
    let mut text_file = TextFileSink::append(&results_path, "reflector hunt").unwrap();
    let mut collected = Vec::new();
    let summary = {
        let sinks: Vec<&mut dyn MatchSink> = vec![&mut text_file, &mut collected];
        SearchEngine::new(settings.search_options())
            .run(&task, &mut report::FanOut::new(sinks))
            .unwrap()
    };
    text_file.finish().unwrap();

    let text = fs::read_to_string(&results_path).unwrap();
    assert!(text.contains("  reflector: C\n"));
    assert!(text.contains("  output: NICEWORKYOUVEMANAGEDTODECODETHEFIRSTSECRETSTRING\n"));

    let crack = CrackReport::new("reflector hunt", &task, summary, collected);
    let report_path = dir.path().join("report.yaml");
    report::save_report(&crack, &report_path, ReportOutputFormat::Yaml).unwrap();
    let loaded = report::load_report(&report_path).unwrap();
    assert_eq!(loaded.matches.len(), 1);
    assert_eq!(loaded.summary.candidates_visited, 3);
}

#[test]
fn test_max_matches_from_settings() {
    let mut settings: Settings = serde_json::from_str(TASK1_JSON).unwrap();
    settings.crib = Some(enigma_breaker::search::CribCriterion::single("E"));
    settings.search.max_matches = Some(2);
    for parallel in [false, true] {
        settings.search.parallel = parallel;
        let task = settings.to_task().unwrap();
        let (summary, records) = SearchEngine::new(settings.search_options())
            .collect(&task)
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(summary.stopped_early);
    }
}

#[test]
fn test_manual_mode_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("machine.yml");
    fs::write(
        &path,
        "code: HELLOWORLD\nrotors: I II III\nreflector: B\nring_settings: 1 1 1\n\
         initial_positions: A A Z\nplugboard_pairs: HL MO AJ CX BZ SR NI YW DG PK\n",
    )
    .unwrap();
    let settings = Settings::load(&path).unwrap();
    let config = settings.to_configuration().unwrap();
    let output = EncryptionEngine::encode_message(&config, settings.code.as_deref().unwrap()).unwrap();
    assert_eq!(output.text, "RFKTMBXVVW");
}

#[test]
fn test_bad_settings_are_rejected_before_searching() {
    let mut settings: Settings = serde_json::from_str(TASK1_JSON).unwrap();
    settings.ring_settings = "04 02".to_string();
    assert!(matches!(
        settings.to_task(),
        Err(EnigmaError::Configuration(ConfigurationError::LengthMismatch { .. }))
    ));

    let mut settings: Settings = serde_json::from_str(TASK1_JSON).unwrap();
    settings.rotors = "Beta Gamma IX".to_string();
    assert!(matches!(
        settings.to_task(),
        Err(EnigmaError::Configuration(ConfigurationError::UnknownRotor(_)))
    ));

    let mut settings: Settings = serde_json::from_str(TASK1_JSON).unwrap();
    settings.ring_settings = "04 02 27".to_string();
    assert!(matches!(
        settings.to_task(),
        Err(EnigmaError::Configuration(ConfigurationError::RingSetting(27)))
    ));
}

#[test]
fn test_unreadable_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "rotors: [unterminated").unwrap();
    let err = Settings::load(&path).unwrap_err();
    assert!(err.to_string().contains("parsing yaml settings"));
    assert!(Settings::load(&dir.path().join("missing.json")).is_err());
}
