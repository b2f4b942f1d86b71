//! Source-scanning lints for the toggler and its hosts.
//!
//! Storage write failures must reach the host as faults, never be dropped,
//! and library code propagates errors instead of panicking.

use std::fs;
use walkdir::WalkDir;

/// Library source before its `#[cfg(test)]` module
fn non_test_sources() -> Vec<(String, String)> {
    WalkDir::new("src")
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| {
            let path = e.path().display().to_string();
            let src = fs::read_to_string(e.path()).expect("Failed to read source file");
            let code = match src.find("#[cfg(test)]").or_else(|| src.find("#[cfg(all(test")) {
                Some(idx) => src[..idx].to_string(),
                None => src,
            };
            (path, code)
        })
        .collect()
}

#[test]
fn lint_no_unwrap_in_library_code() {
    let offenders: Vec<String> = non_test_sources()
        .into_iter()
        .filter(|(_, code)| code.contains(".unwrap()") || code.contains(".expect("))
        .map(|(path, _)| path)
        .collect();

    assert!(
        offenders.is_empty(),
        "Library code must propagate errors, found unwrap/expect in: {:?}",
        offenders
    );
}

#[test]
fn lint_storage_writes_not_discarded() {
    for (path, code) in non_test_sources() {
        for pattern in [
            "let _ = storage.set_item",
            "let _ = self.store.set",
            ".set_item(key, value).ok()",
        ] {
            assert!(
                !code.contains(pattern),
                "{path}: storage write result discarded ({pattern}).\n\
                 Return the error so the host sees it as a fault."
            );
        }
    }
}

#[test]
fn lint_handler_errors_reach_host() {
    let web = fs::read_to_string("src/web.rs").expect("Failed to read src/web.rs");
    assert!(
        !web.contains("let _ = handler()"),
        "Browser host must not swallow handler errors"
    );
    assert!(
        web.contains("throw_str"),
        "Browser host should raise handler errors as uncaught exceptions"
    );

    let sim = fs::read_to_string("src/sim.rs").expect("Failed to read src/sim.rs");
    assert!(
        sim.contains("record_fault"),
        "Simulated host should record handler errors as faults"
    );
}

#[test]
fn lint_toggle_sets_attribute_before_persisting() {
    let src = fs::read_to_string("src/toggler.rs").expect("Failed to read src/toggler.rs");
    let toggle = &src[src.find("pub fn toggle").expect("toggle not found")..];

    let attr = toggle.find("set_root_attribute").expect("toggle must set the attribute");
    let persist = toggle.find("self.store.set").expect("toggle must persist");

    assert!(attr < persist, "toggle must set the root attribute before persisting");
}
