//! Fixed code listings shown next to a walkthrough
//!
//! Every algorithm ships one listing per language and mode. A listing maps a
//! step's listing key (its stage tag, or `update_max` for a find-max step that
//! replaced the maximum) to the 1-based source lines to highlight.

use crate::playback::session::Algorithm;
use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;

/// Language of the illustrative listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    Python,
}

impl Language {
    pub fn name(self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Language::JavaScript => Language::Python,
            Language::Python => Language::JavaScript,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "js" | "javascript" => Ok(Language::JavaScript),
            "py" | "python" => Ok(Language::Python),
            other => Err(format!("unknown language '{}'", other)),
        }
    }
}

const JS_FACTORS_OPTIMIZED: &str = "\
function findFactors(num) {
  const factors = [];
  const limit = Math.sqrt(num);
  for (let i = 1; i <= limit; i++) {
    if (num % i === 0) {
      factors.push(i);
      if (i !== num / i) {
        factors.push(num / i);
      }
    }
  }
  return factors.sort((a, b) => a - b);
}";

const JS_FACTORS_NAIVE: &str = "\
function findFactors(num) {
  const factors = [];
  for (let i = 1; i <= num; i++) {
    if (num % i === 0) {
      factors.push(i);
    }
  }
  return factors;
}";

const PY_FACTORS_OPTIMIZED: &str = "\
def find_factors(num):
    factors = []
    limit = math.isqrt(num)
    for i in range(1, limit + 1):
        if num % i == 0:
            factors.append(i)
            if i != num // i:
                factors.append(num // i)
    return sorted(factors)";

const PY_FACTORS_NAIVE: &str = "\
def find_factors(num):
    factors = []
    for i in range(1, num + 1):
        if num % i == 0:
            factors.append(i)
    return factors";

const JS_FIND_MAX: &str = "\
function findMax(arr) {
  let max = arr[0];
  for (let i = 1; i < arr.length; i++) {
    if (arr[i] > max) {
      max = arr[i];
    }
  }
  return max;
}";

const PY_FIND_MAX: &str = "\
def find_max(arr):
    max_value = arr[0]
    for i in range(1, len(arr)):
        if arr[i] > max_value:
            max_value = arr[i]
    return max_value";

/// A source listing with per-stage line highlights
#[derive(Debug, Clone)]
pub struct Listing {
    pub language: Language,
    pub source: &'static str,
    lines: FxHashMap<&'static str, Vec<usize>>,
}

impl Listing {
    fn new(
        language: Language,
        source: &'static str,
        map: Vec<(&'static str, Vec<usize>)>,
    ) -> Self {
        let lines: FxHashMap<&'static str, Vec<usize>> = map.into_iter().collect();
        Listing {
            language,
            source,
            lines,
        }
    }

    /// Lines to highlight for `key`; unknown keys highlight nothing
    pub fn highlighted(&self, key: &str) -> &[usize] {
        self.lines.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn line_count(&self) -> usize {
        self.source.lines().count()
    }
}

/// The listing for an algorithm, mode and language
pub fn listing(algorithm: Algorithm, optimized: bool, language: Language) -> Listing {
    match (algorithm, optimized, language) {
        (Algorithm::Factors, true, Language::JavaScript) => Listing::new(
            language,
            JS_FACTORS_OPTIMIZED,
            vec![
                ("init", vec![1, 2]),
                ("optimize", vec![3]),
                ("checking", vec![4]),
                ("dividing", vec![5]),
                ("found", vec![6, 7, 8]),
                ("not_found", vec![5]),
                ("result", vec![12]),
            ],
        ),
        (Algorithm::Factors, false, Language::JavaScript) => Listing::new(
            language,
            JS_FACTORS_NAIVE,
            vec![
                ("init", vec![1, 2]),
                ("checking", vec![3]),
                ("dividing", vec![4]),
                ("found", vec![5]),
                ("not_found", vec![4]),
                ("result", vec![8]),
            ],
        ),
        (Algorithm::Factors, true, Language::Python) => Listing::new(
            language,
            PY_FACTORS_OPTIMIZED,
            vec![
                ("init", vec![1, 2]),
                ("optimize", vec![3]),
                ("checking", vec![4]),
                ("dividing", vec![5]),
                ("found", vec![6, 7, 8]),
                ("not_found", vec![5]),
                ("result", vec![9]),
            ],
        ),
        (Algorithm::Factors, false, Language::Python) => Listing::new(
            language,
            PY_FACTORS_NAIVE,
            vec![
                ("init", vec![1, 2]),
                ("checking", vec![3]),
                ("dividing", vec![4]),
                ("found", vec![5]),
                ("not_found", vec![4]),
                ("result", vec![6]),
            ],
        ),
        (Algorithm::FindMax, _, Language::JavaScript) => Listing::new(
            language,
            JS_FIND_MAX,
            vec![
                ("init", vec![1, 2]),
                ("comparing", vec![3, 4]),
                ("update_max", vec![4, 5]),
                ("complete", vec![8]),
            ],
        ),
        (Algorithm::FindMax, _, Language::Python) => Listing::new(
            language,
            PY_FIND_MAX,
            vec![
                ("init", vec![1, 2]),
                ("comparing", vec![3, 4]),
                ("update_max", vec![4, 5]),
                ("complete", vec![6]),
            ],
        ),
    }
}
