// SPDX-License-Identifier: PMPL-1.0-or-later

//! Worked demonstrations with known answers.

use crate::error::Result;
use crate::machine::EncryptionEngine;
use crate::types::{EngineOutput, MachineConfiguration, ReflectorChoice};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoKind {
    /// Single key presses exercising the stepping rules.
    Rotor,
    /// Whole messages through a plugged machine.
    Machine,
}

#[derive(Debug, Clone, Serialize)]
pub struct Demonstration {
    pub title: &'static str,
    pub configuration: MachineConfiguration,
    pub input: &'static str,
    pub expected: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoResult {
    pub demonstration: Demonstration,
    pub output: EngineOutput,
}

impl DemoResult {
    pub fn passed(&self) -> bool {
        self.output.text == self.demonstration.expected
    }
}

fn machine(rotors: &[&str], reflector: &str, rings: &[u8], positions: &str) -> MachineConfiguration {
    let positions: Vec<char> = positions.chars().collect();
    MachineConfiguration::new(rotors, ReflectorChoice::named(reflector), rings, &positions)
}

fn demo(
    title: &'static str,
    configuration: MachineConfiguration,
    input: &'static str,
    expected: &'static str,
) -> Demonstration {
    Demonstration {
        title,
        configuration,
        input,
        expected,
    }
}

pub fn demonstrations(kind: DemoKind) -> Vec<Demonstration> {
    let i_ii_iii = |positions| machine(&["I", "II", "III"], "B", &[1, 1, 1], positions);
    match kind {
        DemoKind::Rotor => vec![
            demo("Demo 1", i_ii_iii("AAZ"), "A", "U"),
            demo("Demo 2", i_ii_iii("AAA"), "A", "B"),
            demo("Demo 3", i_ii_iii("QEV"), "A", "L"),
            demo("Demo 4", machine(&["IV", "V", "Beta"], "B", &[14, 9, 24], "AAA"), "H", "Y"),
            demo(
                "Demo 5",
                machine(&["I", "II", "III", "IV"], "C", &[7, 11, 15, 19], "QEVZ"),
                "Z",
                "V",
            ),
        ],
        DemoKind::Machine => vec![
            demo(
                "Machine example 1",
                i_ii_iii("AAZ")
                    .with_plugboard(&["HL", "MO", "AJ", "CX", "BZ", "SR", "NI", "YW", "DG", "PK"]),
                "HELLOWORLD",
                "RFKTMBXVVW",
            ),
            demo(
                "Machine example 2",
                machine(&["IV", "V", "Beta", "I"], "A", &[18, 24, 3, 5], "EZGP")
                    .with_plugboard(&["PC", "XZ", "FM", "QA", "ST", "NB", "HY", "OR", "EV", "IU"]),
                "BUPXWJCDPFASXBDHLBBIBSRNWCSZXQOLBNXYAXVHOGCUUIBCVMPUZYUUKHI",
                "CONGRATULATIONSONPRODUCINGYOURWORKINGENIGMAMACHINESIMULATOR",
            ),
        ],
    }
}

/// Encode every demonstration of `kind` on a fresh machine.
pub fn run(kind: DemoKind) -> Result<Vec<DemoResult>> {
    demonstrations(kind)
        .into_iter()
        .map(|demonstration| {
            let output =
                EncryptionEngine::encode_message(&demonstration.configuration, demonstration.input)?;
            Ok(DemoResult {
                demonstration,
                output,
            })
        })
        .collect()
}
