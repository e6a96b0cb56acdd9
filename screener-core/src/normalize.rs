//! Value normalization — coercion of raw cells into canonical typed values.
//!
//! Every function here is total: unresolvable input degrades to a defined
//! "unknown" value (false for booleans, NaN for numerics) rather than
//! erroring. This fails closed — ambiguous data keeps a record out of BUY
//! states instead of crashing or wrongly admitting it.

use crate::table::Cell;

/// Affirmative spellings accepted by boolean coercion, lowercase.
/// Includes the Portuguese sim/s that upstream sheets use.
const AFFIRMATIVE: [&str; 7] = ["true", "1", "yes", "y", "sim", "s", "ok"];

/// Coerce a cell to a boolean.
///
/// Null is false. A native boolean is itself. Anything else goes through
/// lowercase-trimmed text and must match an affirmative spelling; there is
/// no "unknown" boolean state, so absence of evidence evaluates negative.
pub fn to_bool(cell: &Cell) -> bool {
    match cell {
        Cell::Null => false,
        Cell::Bool(b) => *b,
        Cell::Number(n) if n.is_nan() => false,
        Cell::Number(n) => AFFIRMATIVE.contains(&n.to_string().to_lowercase().as_str()),
        Cell::Text(s) => AFFIRMATIVE.contains(&s.trim().to_lowercase().as_str()),
    }
}

/// Coerce a cell to a number, NaN when unresolvable.
///
/// Text goes through trimming, a stripped trailing percent sign, and
/// comma-to-dot decimal conversion before parsing. Booleans coerce to
/// 1.0 / 0.0 as upstream numeric exports commonly encode them.
pub fn to_num(cell: &Cell) -> f64 {
    match cell {
        Cell::Null => f64::NAN,
        Cell::Number(n) => *n,
        Cell::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Cell::Text(s) => parse_num(s),
    }
}

fn parse_num(s: &str) -> f64 {
    let trimmed = s.trim();
    let stripped = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    stripped.replace(',', ".").parse::<f64>().unwrap_or(f64::NAN)
}

/// Normalize a drawdown figure to a negative fraction.
///
/// Values at or below -1 are whole-number percentage points (-25 means
/// -25%) and are divided by 100; values strictly between -1 and infinity
/// are already fractions and pass through. Exactly -1.0 maps to -0.01,
/// not to a -100% fraction; that cutoff is inherited from the upstream
/// sheet convention and deliberately left as is.
pub fn normalize_drawdown(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= -1.0 {
        x / 100.0
    } else {
        x
    }
}

/// Trim surrounding whitespace from a text cell. Non-text cells are
/// rendered to their text form; Null stays Null. No case normalization.
pub fn trim_text(cell: &Cell) -> Cell {
    match cell {
        Cell::Null => Cell::Null,
        Cell::Text(s) => Cell::Text(s.trim().to_string()),
        Cell::Bool(b) => Cell::Text(b.to_string()),
        Cell::Number(n) if n.is_nan() => Cell::Null,
        Cell::Number(n) => Cell::Text(n.to_string()),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
