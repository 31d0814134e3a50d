//! Selection verification.
//!
//! Matching is exact: order-sensitive, length-sensitive, no partial credit.
//! Case and whitespace never reach this point, because `CueLabel` normalizes
//! on construction, so registration input and login input are compared in
//! identical form. Decryption failures are a distinct outcome decided by the
//! login flow before verification runs; this function only ever answers
//! "same sequence or not".

use cuelock_types::CueLabel;

/// True when the collected selection equals the registered sequence.
pub fn selection_matches(selection: &[CueLabel], registered: &[CueLabel]) -> bool {
    selection == registered
}
