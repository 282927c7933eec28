//! Tarama WASM bridge
//!
//! Exposes tarama-core search functions through a WASM-compatible ABI for use
//! from the browser or wazero. No WASI imports needed; all functions are
//! pure computation with shared memory string passing.
//!
//! # Memory Protocol
//!
//! Strings cross the WASM boundary as (ptr, len) pairs in linear memory.
//! The host allocates via [`wasm_alloc`], writes bytes, calls the function,
//! reads the result, then frees via [`wasm_free`].
//!
//! Return values pack pointer and length into a single [`Packed`] integer:
//! `(ptr << 32) | len` as a u64 on wasm32. An empty string comes back as
//! `0`. Boolean and count results are returned directly as `u32`.
//!
//! Pointers and lengths are `usize`, which is `i32` on the wire for wasm32.
//! Native builds use the same protocol with a wider [`Packed`], so the
//! exports can be driven from host-side tests.

use serde::{Deserialize, Serialize};
use tarama_core::{EngineConfig, ScoredMatch, SearchEngine};

/// Packed `(ptr, len)` result: two pointer-width halves.
#[cfg(target_pointer_width = "32")]
pub type Packed = u64;
#[cfg(not(target_pointer_width = "32"))]
pub type Packed = u128;

fn pack(ptr: usize, len: usize) -> Packed {
    ((ptr as Packed) << usize::BITS) | (len as Packed)
}

/// Split a packed result into `(ptr, len)`.
pub fn unpack(packed: Packed) -> (usize, usize) {
    ((packed >> usize::BITS) as usize, packed as usize)
}

// ============================================================================
// Memory management
// ============================================================================

/// Allocate `size` bytes in WASM linear memory. Returns a pointer.
/// The host must call `wasm_free` to release.
#[no_mangle]
pub extern "C" fn wasm_alloc(size: usize) -> usize {
    let layout = match std::alloc::Layout::from_size_align(size, 1) {
        Ok(l) => l,
        Err(_) => return 0,
    };
    if layout.size() == 0 {
        return 0;
    }
    let ptr = unsafe { std::alloc::alloc(layout) };
    if ptr.is_null() {
        return 0;
    }
    ptr as usize
}

/// Free a buffer previously allocated by `wasm_alloc` or returned by an
/// export function.
#[no_mangle]
pub extern "C" fn wasm_free(ptr: usize, size: usize) {
    if ptr == 0 || size == 0 {
        return;
    }
    let layout = match std::alloc::Layout::from_size_align(size, 1) {
        Ok(l) => l,
        Err(_) => return,
    };
    unsafe {
        std::alloc::dealloc(ptr as *mut u8, layout);
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Read a UTF-8 string from WASM linear memory at (ptr, len).
///
/// A zero length yields `""` without touching memory. Invalid UTF-8 is
/// replaced lossily rather than trusted.
unsafe fn read_str(ptr: usize, len: usize) -> String {
    if ptr == 0 || len == 0 {
        return String::new();
    }
    let slice = std::slice::from_raw_parts(ptr as *const u8, len);
    String::from_utf8_lossy(slice).into_owned()
}

/// Write a string into newly allocated WASM memory and return it packed.
/// The caller (host) is responsible for freeing via `wasm_free`.
fn write_result(s: &str) -> Packed {
    let bytes = s.as_bytes();
    let ptr = wasm_alloc(bytes.len());
    if ptr == 0 {
        return 0;
    }
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr as *mut u8, bytes.len());
    }
    pack(ptr, bytes.len())
}

/// Error JSON body: `{"error":"..."}`.
fn error_json(msg: &str) -> String {
    serde_json::json!({ "error": msg }).to_string()
}

// ============================================================================
// JSON request handling (pure, host-independent)
// ============================================================================

/// `multi_search` response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MultiSearchOutput {
    pub matched: bool,
}

/// `rank_candidates` request. Missing tuning fields fall back to the engine
/// defaults.
#[derive(Debug, Deserialize)]
pub struct RankInput {
    pub query: String,
    pub candidates: Vec<String>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub max_results: Option<usize>,
}

/// `rank_candidates` response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RankOutput {
    pub matches: Vec<ScoredMatch>,
}

/// Evaluate a multi-term search where `terms_json` is a JSON string array.
pub fn multi_search_json(text: &str, terms_json: &str) -> String {
    let terms: Vec<String> = match serde_json::from_str(terms_json) {
        Ok(t) => t,
        Err(e) => return error_json(&format!("invalid terms: {}", e)),
    };
    let output = MultiSearchOutput {
        matched: tarama_core::multi_search(text, terms.as_slice()),
    };
    serde_json::to_string(&output)
        .unwrap_or_else(|e| error_json(&format!("serialization failed: {}", e)))
}

/// Rank candidates from a JSON [`RankInput`].
pub fn rank_json(input: &str) -> String {
    let input: RankInput = match serde_json::from_str(input) {
        Ok(i) => i,
        Err(e) => return error_json(&format!("invalid request: {}", e)),
    };

    let defaults = EngineConfig::default();
    let engine = match SearchEngine::try_with_config(EngineConfig {
        threshold: input.threshold.unwrap_or(defaults.threshold),
        max_results: input.max_results.unwrap_or(defaults.max_results),
        ..defaults
    }) {
        Ok(engine) => engine,
        Err(e) => return error_json(&e.to_string()),
    };
    let output = RankOutput {
        matches: engine.rank(&input.query, input.candidates.as_slice()),
    };
    serde_json::to_string(&output)
        .unwrap_or_else(|e| error_json(&format!("serialization failed: {}", e)))
}

// ============================================================================
// Version info
// ============================================================================

/// Get the tarama-wasm version. Returns a packed (ptr, len) pointing to a
/// string containing the version (e.g., "0.1.0").
#[no_mangle]
pub extern "C" fn tarama_core_version() -> Packed {
    write_result(env!("CARGO_PKG_VERSION"))
}

// ============================================================================
// Search
// ============================================================================

/// Normalize diacritics in the UTF-8 string at (ptr, len).
#[no_mangle]
pub extern "C" fn normalize_text(ptr: usize, len: usize) -> Packed {
    let text = unsafe { read_str(ptr, len) };
    write_result(&tarama_core::normalize(&text))
}

/// Returns 1 if the term is contained in the text after normalization.
#[no_mangle]
pub extern "C" fn contains_normalized(
    text_ptr: usize,
    text_len: usize,
    term_ptr: usize,
    term_len: usize,
) -> u32 {
    let text = unsafe { read_str(text_ptr, text_len) };
    let term = unsafe { read_str(term_ptr, term_len) };
    tarama_core::contains_normalized(&text, &term) as u32
}

/// Returns 1 if text and term are at least `threshold` similar.
#[no_mangle]
pub extern "C" fn fuzzy_match(
    text_ptr: usize,
    text_len: usize,
    term_ptr: usize,
    term_len: usize,
    threshold: f64,
) -> u32 {
    let text = unsafe { read_str(text_ptr, text_len) };
    let term = unsafe { read_str(term_ptr, term_len) };
    tarama_core::fuzzy_match(&text, &term, threshold) as u32
}

/// Highlight query terms in text. Returns packed HTML fragment.
#[no_mangle]
pub extern "C" fn highlight_text(
    text_ptr: usize,
    text_len: usize,
    query_ptr: usize,
    query_len: usize,
) -> Packed {
    let text = unsafe { read_str(text_ptr, text_len) };
    let query = unsafe { read_str(query_ptr, query_len) };
    write_result(&tarama_core::highlight(&text, &query))
}

/// Multi-term OR search. `terms` is a JSON string array.
///
/// On success: `{"matched":true}`
/// On error: `{"error":"description"}`
#[no_mangle]
pub extern "C" fn multi_search(
    text_ptr: usize,
    text_len: usize,
    terms_ptr: usize,
    terms_len: usize,
) -> Packed {
    let text = unsafe { read_str(text_ptr, text_len) };
    let terms = unsafe { read_str(terms_ptr, terms_len) };
    write_result(&multi_search_json(&text, &terms))
}

/// Count (word, subterm) containment pairs.
#[no_mangle]
pub extern "C" fn word_frequency(
    text_ptr: usize,
    text_len: usize,
    term_ptr: usize,
    term_len: usize,
) -> u32 {
    let text = unsafe { read_str(text_ptr, text_len) };
    let term = unsafe { read_str(term_ptr, term_len) };
    tarama_core::word_frequency(&text, &term) as u32
}

/// Rank candidates. Takes a JSON request
/// `{"query":"zikir","candidates":["zikr","sohbet"],"threshold":0.7}`
/// and returns `{"matches":[{"value":"zikr","score":0.8}]}`.
#[no_mangle]
pub extern "C" fn rank_candidates(ptr: usize, len: usize) -> Packed {
    let input = unsafe { read_str(ptr, len) };
    write_result(&rank_json(&input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_multi_search_json() {
        assert_eq!(
            multi_search_json("rabıta ve zikir", r#"["zikir","nonexistent"]"#),
            r#"{"matched":true}"#
        );
        assert_eq!(multi_search_json("abc", "[]"), r#"{"matched":false}"#);
    }

    #[test]
    fn test_multi_search_bad_terms() {
        let out = multi_search_json("abc", "not json");
        assert!(out.starts_with(r#"{"error":"invalid terms"#), "{}", out);
    }

    #[test]
    fn test_rank_json() {
        let out = rank_json(r#"{"query":"zikir","candidates":["zikr","sohbet"]}"#);
        let parsed: RankOutput = serde_json::from_str(&out).unwrap();
        assert_eq!(
            parsed.matches,
            vec![ScoredMatch {
                value: "zikr".into(),
                score: 0.8
            }]
        );
    }

    #[test]
    fn test_rank_json_threshold_override() {
        let out = rank_json(r#"{"query":"zikir","candidates":["zikr"],"threshold":0.9}"#);
        assert_eq!(out, r#"{"matches":[]}"#);
    }

    #[test]
    fn test_rank_json_invalid() {
        let out = rank_json(r#"{"candidates":[]}"#);
        assert!(out.contains("error"));
    }

    /// Copy `s` into memory obtained from `wasm_alloc`, the way a host does.
    fn host_write(s: &str) -> (usize, usize) {
        let ptr = wasm_alloc(s.len());
        if ptr != 0 {
            unsafe { std::ptr::copy_nonoverlapping(s.as_ptr(), ptr as *mut u8, s.len()) };
        }
        (ptr, s.len())
    }

    /// Unpack a result, copy it out, and release it with `wasm_free`.
    fn host_read(packed: Packed) -> String {
        let (ptr, len) = unpack(packed);
        if ptr == 0 {
            return String::new();
        }
        let bytes = unsafe { std::slice::from_raw_parts(ptr as *const u8, len) }.to_vec();
        wasm_free(ptr, len);
        String::from_utf8(bytes).unwrap()
    }

    fn host_free((ptr, len): (usize, usize)) {
        wasm_free(ptr, len);
    }

    #[test]
    fn test_pack_unpack() {
        assert_eq!(unpack(pack(0x1000, 7)), (0x1000, 7));
        assert_eq!(unpack(pack(usize::MAX, usize::MAX)), (usize::MAX, usize::MAX));
        assert_eq!(pack(0, 0), 0);
    }

    #[test]
    fn test_normalize_text_export() {
        let (ptr, len) = host_write("füyûzât");
        let out = host_read(normalize_text(ptr, len));
        host_free((ptr, len));
        assert_eq!(out, "fuyuzat");
    }

    #[test]
    fn test_empty_result_is_zero() {
        assert_eq!(normalize_text(0, 0), 0);

        let (query_ptr, query_len) = host_write("dervis");
        assert_eq!(highlight_text(0, 0, query_ptr, query_len), 0);
        host_free((query_ptr, query_len));
    }

    #[test]
    fn test_highlight_text_export() {
        let text = host_write("Dervişler sohbet ediyordu");
        let query = host_write("dervis");
        let out = host_read(highlight_text(text.0, text.1, query.0, query.1));
        host_free(text);
        host_free(query);
        assert_eq!(
            out,
            r#"<mark class="search-highlight">Derviş</mark>ler sohbet ediyordu"#
        );
    }

    #[test]
    fn test_scalar_exports() {
        let text = host_write("Dervişler sohbet ediyordu");
        let term = host_write("dervis");
        assert_eq!(contains_normalized(text.0, text.1, term.0, term.1), 1);
        assert_eq!(word_frequency(text.0, text.1, term.0, term.1), 1);
        host_free(text);
        host_free(term);

        let a = host_write("zikir");
        let b = host_write("zikr");
        assert_eq!(fuzzy_match(a.0, a.1, b.0, b.1, 0.8), 1);
        assert_eq!(fuzzy_match(a.0, a.1, b.0, b.1, 0.9), 0);
        host_free(a);
        host_free(b);
    }

    #[test]
    fn test_json_exports() {
        let text = host_write("rabıta ve zikir");
        let terms = host_write(r#"["zikir"]"#);
        let out = host_read(multi_search(text.0, text.1, terms.0, terms.1));
        host_free(text);
        host_free(terms);
        assert_eq!(out, r#"{"matched":true}"#);

        let request = host_write(r#"{"query":"zikir","candidates":["zikr","sohbet"]}"#);
        let out = host_read(rank_candidates(request.0, request.1));
        host_free(request);
        assert_eq!(out, r#"{"matches":[{"value":"zikr","score":0.8}]}"#);

        assert_eq!(host_read(tarama_core_version()), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_error_json_escapes_quotes() {
        assert_eq!(error_json(r#"bad "x""#), r#"{"error":"bad \"x\""}"#);
    }
}
