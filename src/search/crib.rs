// SPDX-License-Identifier: PMPL-1.0-or-later

//! Crib criteria: the known plaintext a candidate's output must contain.

use crate::alphabet;
use crate::error::{ConfigurationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One crib, or a set of cribs of which any may match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CribCriterion {
    Single(String),
    AnyOf(Vec<String>),
}

impl CribCriterion {
    pub fn single(crib: &str) -> Self {
        CribCriterion::Single(crib.to_string())
    }

    pub fn any_of(cribs: &[&str]) -> Self {
        CribCriterion::AnyOf(cribs.iter().map(|c| c.to_string()).collect())
    }

    pub fn terms(&self) -> &[String] {
        match self {
            CribCriterion::Single(crib) => std::slice::from_ref(crib),
            CribCriterion::AnyOf(cribs) => cribs,
        }
    }

    /// Upper-case every term and reject empty or non-alphabetic ones.
    pub fn normalized(&self) -> Result<Self> {
        if self.terms().is_empty() {
            return Err(ConfigurationError::UnsupportedSearch("no crib given".into()).into());
        }
        let mut terms = Vec::with_capacity(self.terms().len());
        for term in self.terms() {
            if term.is_empty() {
                return Err(ConfigurationError::UnsupportedSearch("empty crib".into()).into());
            }
            terms.push(alphabet::normalize(term)?);
        }
        Ok(match self {
            CribCriterion::Single(_) => CribCriterion::Single(terms.remove(0)),
            CribCriterion::AnyOf(_) => CribCriterion::AnyOf(terms),
        })
    }

    /// Terms occurring as contiguous substrings of `text`, in declaration order.
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.terms()
            .iter()
            .filter(move |term| text.contains(term.as_str()))
            .map(String::as_str)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matches(text).next().is_some()
    }
}

impl fmt::Display for CribCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.terms().join(" | "))
    }
}
