//! Fuzz target for Challenge.yaml parsing.
//!
//! Goal: The parser should **never panic** on any input.
//! A broken document becomes an unparsed outcome, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_yaml_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only valid UTF-8 reaches the parser in production; the read path
    // rejects everything else before parsing.
    if let Ok(text) = std::str::from_utf8(data) {
        // Should never panic - unparsed outcomes are fine
        let _ = chalguard_repo::fuzz::parse_challenge(text);
    }
});
