//! Person — the read-only identity record.
//!
//! Persons are created and maintained outside this core; the engines only
//! ever look them up by SSN.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── SSN ─────────────────────────────────────────────────────────────────────

/// A 10-digit national identity number (kennitala).
///
/// Validated on construction: a value of this type is always exactly ten
/// ASCII digits. Malformed input is rejected at the boundary, before any
/// engine is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Ssn(String);

#[derive(Debug, Error)]
#[error("SSN must be exactly 10 digits, got {0:?}")]
pub struct InvalidSsn(pub String);

impl Ssn {
  pub fn parse(s: &str) -> Result<Self, InvalidSsn> {
    if s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit()) {
      Ok(Self(s.to_owned()))
    } else {
      Err(InvalidSsn(s.to_owned()))
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Ssn {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for Ssn {
  type Err = InvalidSsn;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl<'de> Deserialize<'de> for Ssn {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ssn::parse(&s).map_err(serde::de::Error::custom)
  }
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// An identity record, unique by both `id` and `ssn`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub id:    i64,
  pub ssn:   Ssn,
  pub name:  String,
  pub email: String,
}

/// The caller-facing slice of a person returned by the assignment engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
  pub ssn:  Ssn,
  pub name: String,
}

impl From<Person> for PersonSummary {
  fn from(p: Person) -> Self {
    Self { ssn: p.ssn, name: p.name }
  }
}
