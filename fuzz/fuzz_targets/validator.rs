#![no_main]

use libfuzzer_sys::fuzz_target;

use credence::analysis::validator::validate;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);

    if let Ok(result) = validate(&raw) {
        assert!(result.score <= 100);
        assert!(!result.explanation.is_empty());
        if let Some(subscores) = result.subscores {
            assert!(!subscores.is_empty());
        }
    }
});
