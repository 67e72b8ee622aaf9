// SPDX-License-Identifier: PMPL-1.0-or-later

//! Engine behaviour through the public API

use enigma_breaker::machine::Plugboard;
use enigma_breaker::{
    ConfigurationError, EncryptionEngine, EnigmaError, MachineConfiguration, ReflectorChoice,
};

fn machine(rotors: &[&str], reflector: &str, rings: &[u8], positions: &str) -> MachineConfiguration {
    let positions: Vec<char> = positions.chars().collect();
    MachineConfiguration::new(rotors, ReflectorChoice::named(reflector), rings, &positions)
}

fn encode(config: &MachineConfiguration, message: &str) -> String {
    EncryptionEngine::encode_message(config, message)
        .expect("configuration should be valid")
        .text
}

#[test]
fn test_single_letter_vectors() {
    let i_ii_iii = |positions| machine(&["I", "II", "III"], "B", &[1, 1, 1], positions);
    assert_eq!(encode(&i_ii_iii("AAZ"), "A"), "U");
    assert_eq!(encode(&i_ii_iii("AAA"), "A"), "B");
    assert_eq!(encode(&i_ii_iii("QEV"), "A"), "L");
    assert_eq!(
        encode(&machine(&["IV", "V", "Beta"], "B", &[14, 9, 24], "AAA"), "H"),
        "Y"
    );
    assert_eq!(
        encode(
            &machine(&["I", "II", "III", "IV"], "C", &[7, 11, 15, 19], "QEVZ"),
            "Z"
        ),
        "V"
    );
}

#[test]
fn test_plugged_message_and_final_positions() {
    let config = machine(&["I", "II", "III"], "B", &[1, 1, 1], "AAZ")
        .with_plugboard(&["HL", "MO", "AJ", "CX", "BZ", "SR", "NI", "YW", "DG", "PK"]);
    let output = EncryptionEngine::encode_message(&config, "HELLOWORLD").unwrap();
    assert_eq!(output.text, "RFKTMBXVVW");
    assert_eq!(output.final_positions, vec!['A', 'A', 'J']);
}

#[test]
fn test_fourth_rotor_never_moves() {
    let config = machine(&["IV", "V", "Beta", "I"], "A", &[18, 24, 3, 5], "EZGP")
        .with_plugboard(&["PC", "XZ", "FM", "QA", "ST", "NB", "HY", "OR", "EV", "IU"]);
    let output = EncryptionEngine::encode_message(
        &config,
        "BUPXWJCDPFASXBDHLBBIBSRNWCSZXQOLBNXYAXVHOGCUUIBCVMPUZYUUKHI",
    )
    .unwrap();
    assert_eq!(
        output.text,
        "CONGRATULATIONSONPRODUCINGYOURWORKINGENIGMAMACHINESIMULATOR"
    );
    assert_eq!(output.final_positions[0], 'E');
}

#[test]
fn test_double_step_sequence() {
    let mut engine = EncryptionEngine::new(&machine(&["I", "II", "III"], "B", &[1, 1, 1], "ADU")).unwrap();
    let mut seen = Vec::new();
    for _ in 0..3 {
        engine.step();
        seen.push(engine.positions().into_iter().collect::<String>());
    }
    assert_eq!(seen, vec!["ADV", "AEW", "BFX"]);
}

#[test]
fn test_self_reciprocity() {
    let config = machine(&["Beta", "Gamma", "V"], "C", &[4, 2, 14], "MJM").with_plugboard(&["KI", "XN", "FL"]);
    let plaintext = "NICEWORKYOUVEMANAGEDTODECODETHEFIRSTSECRETSTRING";
    let ciphertext = encode(&config, plaintext);
    assert_eq!(ciphertext, "DMEXBMKYCVPNQBEDHXVPZGKMTFFBJRPJTLHLCHOTKOYXGGHZ");
    assert_eq!(encode(&config, &ciphertext), plaintext);
}

#[test]
fn test_no_letter_encodes_to_itself() {
    let config = machine(&["I", "II", "III"], "B", &[1, 1, 1], "AAA");
    let message = "A".repeat(200);
    let output = encode(&config, &message);
    assert!(!output.contains('A'));
}

#[test]
fn test_plugboard_is_an_involution() {
    let board = Plugboard::from_pairs(&["HL", "MO", "AJ"]).unwrap();
    for index in 0..26u8 {
        assert_eq!(board.encode(board.encode(index)), index);
    }
    let empty = Plugboard::new();
    assert!((0..26u8).all(|index| empty.encode(index) == index));
}

#[test]
fn test_configuration_errors() {
    let mismatch = MachineConfiguration::new(
        &["I", "II", "III"],
        ReflectorChoice::named("B"),
        &[1, 1],
        &['A', 'A', 'A'],
    );
    assert!(matches!(
        EncryptionEngine::new(&mismatch),
        Err(EnigmaError::Configuration(ConfigurationError::LengthMismatch { .. }))
    ));

    let unknown = machine(&["I", "II", "IX"], "B", &[1, 1, 1], "AAA");
    assert!(matches!(
        EncryptionEngine::new(&unknown),
        Err(EnigmaError::Configuration(ConfigurationError::UnknownRotor(_)))
    ));

    let reused = machine(&["I", "II", "III"], "B", &[1, 1, 1], "AAA").with_plugboard(&["AB", "BC"]);
    assert!(matches!(
        EncryptionEngine::new(&reused),
        Err(EnigmaError::Configuration(ConfigurationError::PlugLetterInUse('B')))
    ));

    let too_many = machine(&["I", "II", "III"], "B", &[1, 1, 1], "AAA").with_plugboard(&[
        "AB", "CD", "EF", "GH", "IJ", "KL", "MN", "OP", "QR", "ST", "UV",
    ]);
    assert!(EncryptionEngine::new(&too_many).is_err());

    let two = machine(&["I", "II"], "B", &[1, 1], "AA");
    assert!(matches!(
        EncryptionEngine::new(&two),
        Err(EnigmaError::Configuration(ConfigurationError::RotorCount(2)))
    ));
}

#[test]
fn test_message_outside_alphabet_is_rejected() {
    let config = machine(&["I", "II", "III"], "B", &[1, 1, 1], "AAA");
    assert!(matches!(
        EncryptionEngine::encode_message(&config, "HELLO WORLD"),
        Err(EnigmaError::Alphabet(' '))
    ));
}
