// SPDX-License-Identifier: PMPL-1.0-or-later

//! Reflector rewiring: unplug two reflector wires and plug their four ends
//! back in crosswise.
//!
//! Every exchange is applied to a private copy of the base wiring, never to
//! the catalogue table.

use crate::alphabet;
use crate::machine::Wiring;
use std::fmt;

type Wire = (u8, u8);

/// Two wires `(a, b)` and `(c, d)` replaced by a crosswise pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Exchange {
    pub removed: [Wire; 2],
    pub added: [Wire; 2],
}

impl Exchange {
    /// Both ways of cross-connecting two wires: `ac/bd` and `ad/bc`.
    pub fn between(first: Wire, second: Wire) -> [Exchange; 2] {
        let (a, b) = first;
        let (c, d) = second;
        let removed = [first, second];
        [
            Exchange {
                removed,
                added: [(a, c), (b, d)],
            },
            Exchange {
                removed,
                added: [(a, d), (b, c)],
            },
        ]
    }

    pub fn apply(&self, wiring: &mut Wiring) {
        for &(x, y) in &self.added {
            wiring.connect(x, y);
        }
    }
}

fn wire_letters((a, b): Wire) -> String {
    [alphabet::letter(a), alphabet::letter(b)].iter().collect()
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} {}",
            wire_letters(self.removed[0]),
            wire_letters(self.removed[1]),
            wire_letters(self.added[0]),
            wire_letters(self.added[1]),
        )
    }
}

/// Every exchange over every unordered pair of distinct wires in `wires`.
pub fn exchanges(wires: &[Wire]) -> Vec<Exchange> {
    let mut out = Vec::with_capacity(wires.len() * wires.len());
    for (i, &first) in wires.iter().enumerate() {
        for &second in &wires[i + 1..] {
            out.extend(Exchange::between(first, second));
        }
    }
    out
}

/// Two successive exchanges over four distinct wires, as a lazy sequence.
///
/// The second exchange is drawn from the wires the first left untouched.
/// Both orders of the same two exchanges are produced, so a hit is seen
/// twice.
pub fn double_exchanges(base: &Wiring) -> impl Iterator<Item = (Exchange, Exchange)> + Send {
    let wires = base.pairs();
    exchanges(&wires).into_iter().flat_map(move |first| {
        let rest: Vec<Wire> = wires
            .iter()
            .copied()
            .filter(|wire| !first.removed.contains(wire))
            .collect();
        exchanges(&rest)
            .into_iter()
            .map(move |second| (first, second))
    })
}

/// A private copy of `base` with both exchanges applied.
pub fn rewire(base: &Wiring, first: &Exchange, second: &Exchange) -> Wiring {
    let mut wiring = *base;
    first.apply(&mut wiring);
    second.apply(&mut wiring);
    wiring
}
