// SPDX-License-Identifier: PMPL-1.0-or-later

//! The built-in codebreaking tasks end to end

use enigma_breaker::search::Dimension;
use enigma_breaker::{tasks, MatchRecord, ReflectorChoice, SearchEngine, SearchOptions};

fn crack(number: usize) -> Vec<MatchRecord> {
    let task = tasks::load(number).unwrap().to_task().unwrap();
    let (summary, records) = SearchEngine::default().collect(&task).unwrap();
    assert!(!summary.stopped_early);
    assert_eq!(summary.matches, records.len());
    records
}

fn sequential() -> SearchEngine {
    SearchEngine::new(SearchOptions {
        parallel: false,
        max_matches: None,
    })
}

#[test]
fn test_task1_finds_reflector() {
    let records = crack(1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].configuration.reflector, ReflectorChoice::named("C"));
    assert!(records[0].output.ends_with("FIRSTSECRETSTRING"));
}

#[test]
fn test_task2_finds_positions() {
    let records = crack(2);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].configuration.positions, vec!['I', 'M', 'G']);
    assert_eq!(
        records[0].output,
        "IHOPEYOUAREENJOYINGTHEUNIVERSITYOFBATHEXPERIENCESOFAR"
    );
}

#[test]
fn test_task2_with_repeated_positions_finds_nothing_new() {
    let mut settings = tasks::load(2).unwrap();
    settings.search.allow_repeated_positions = true;
    let task = settings.to_task().unwrap();
    assert_eq!(
        task.dimensions(),
        &[Dimension::Positions {
            allow_repeats: true
        }]
    );
    let (summary, records) = SearchEngine::default().collect(&task).unwrap();
    assert_eq!(summary.candidates_visited, 26 * 26 * 26);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].configuration.positions, vec!['I', 'M', 'G']);
}

#[test]
fn test_task3_finds_rotors_reflector_and_rings() {
    let records = crack(3);
    assert_eq!(records.len(), 1);
    let config = &records[0].configuration;
    assert_eq!(config.rotors, vec!["II", "Gamma", "IV"]);
    assert_eq!(config.reflector, ReflectorChoice::named("C"));
    assert_eq!(config.ring_settings, vec![24, 8, 20]);
    assert_eq!(
        records[0].output,
        "SQUIRRELSPLANTTHOUSANDSOFNEWTREESEACHYEARBYMERELYFORGETTINGWHERETHEYPUTTHEIRACORNS"
    );
}

#[test]
fn test_task4_reports_every_plug_completion() {
    let records = crack(4);
    assert_eq!(records.len(), 9);
    for record in &records {
        let plugs = &record.configuration.plugboard;
        assert_eq!(plugs[2], "AT");
        let i_partner = plugs[4].chars().nth(1).unwrap();
        assert!("DEKLMQXYZ".contains(i_partner), "unexpected I partner {}", i_partner);
        assert!(record.output.contains("TUTOR"));
    }
    let intended = records
        .iter()
        .find(|record| record.configuration.plugboard[4] == "IK")
        .unwrap();
    assert_eq!(
        intended.output,
        "NOTUTORSWEREHARMEDNORIMPLICATEDOFCRIMESDURINGTHEMAKINGOFTHESEEXAMPLES"
    );
}

#[test]
fn test_task4_parallel_and_sequential_agree() {
    let task = tasks::load(4).unwrap().to_task().unwrap();
    let (_, parallel) = SearchEngine::default().collect(&task).unwrap();
    let (summary, serial) = sequential().collect(&task).unwrap();
    assert_eq!(summary.candidates_visited, 132);
    assert_eq!(parallel, serial);
}

#[test]
fn test_task5_finds_rewired_reflector_twice() {
    let records = crack(5);
    // The same pair of exchanges is found in both orders.
    assert_eq!(records.len(), 2);
    for record in &records {
        assert!(matches!(record.configuration.reflector, ReflectorChoice::Custom(_)));
        assert_eq!(record.crib, "INSTAGRAM");
        assert_eq!(
            record.output,
            "YOUCANFOLLOWMYDOGONINSTAGRAMATTALESOFHOFFMANN"
        );
        let label = record.label.as_deref().unwrap();
        assert!(label.starts_with("B rewired: "));
        assert!(label.contains("AY IP -> AP YI"));
        assert!(label.contains("BR EQ -> BQ RE"));
    }
    assert_eq!(records[0].configuration, records[1].configuration);
    assert_ne!(records[0].label, records[1].label);
}

#[test]
fn test_run_reports_through_sink() {
    let mut records: Vec<MatchRecord> = Vec::new();
    let outcome = tasks::run(1, None, &mut records).unwrap();
    assert_eq!(outcome.number, 1);
    assert_eq!(outcome.summary.candidates_visited, 3);
    assert_eq!(outcome.summary.matches, 1);
    assert_eq!(records.len(), 1);
}
