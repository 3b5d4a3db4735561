// Dictionary query properties exercised through the public API:
// - insert/contains/frequency with overwrite (not accumulate) semantics
// - prefix completion ordering (frequency desc, word asc) and limits
// - fuzzy fallback surfacing close corrections
// - deterministic results for identical inputs

use libpredict_core::Dictionary;

fn sample() -> Dictionary {
    Dictionary::from_words([
        ("hello", 100u32),
        ("help", 100),
        ("hell", 40),
        ("hero", 10),
        ("heap", 60),
        ("world", 50),
    ])
}

#[test]
fn insert_contains_frequency_overwrite() {
    let mut dict = Dictionary::new();
    dict.insert("Rust", 10);

    assert!(dict.contains("rust"));
    assert_eq!(dict.frequency("rust"), 10);

    // Re-insertion overwrites, it does not sum.
    dict.insert("rust", 3);
    assert_eq!(dict.frequency("Rust"), 3);
}

#[test]
fn prefix_results_only_share_the_prefix() {
    let dict = sample();
    for s in dict.words_with_prefix("he", 10) {
        assert!(s.word.starts_with("he"), "unexpected word {}", s.word);
    }
}

#[test]
fn prefix_order_is_frequency_desc_then_alphabetical() {
    let dict = sample();
    let words: Vec<String> = dict
        .words_with_prefix("he", 10)
        .into_iter()
        .map(|s| s.word)
        .collect();
    // hello and help tie at 100 and sort alphabetically.
    assert_eq!(words, vec!["hello", "help", "heap", "hell", "hero"]);
}

#[test]
fn prefix_limit_is_respected() {
    let dict = sample();
    assert_eq!(dict.words_with_prefix("he", 3).len(), 3);
}

#[test]
fn misspelling_is_corrected_within_bound() {
    let mut dict = Dictionary::new();
    dict.insert("hello", 100);

    let suggestions = dict.suggestions("helo", 5, 2);
    assert!(
        suggestions.iter().any(|s| s.word == "hello"),
        "expected hello among {suggestions:?}"
    );
    let hello = suggestions.iter().find(|s| s.word == "hello").unwrap();
    assert_eq!(hello.edit_distance, 1);
    assert_eq!(hello.frequency, 100);
}

#[test]
fn fuzzy_fill_orders_by_distance_then_frequency() {
    let dict = Dictionary::from_words([("cart", 50u32), ("car", 200), ("cat", 10)]);
    let suggestions = dict.suggestions("cat", 5, 2);

    // "cat" is an exact prefix match, the corrections follow by distance.
    assert_eq!(suggestions[0].word, "cat");
    assert_eq!(suggestions[1].word, "car");
    assert_eq!(suggestions[2].word, "cart");
}

#[test]
fn suggestions_identical_across_calls() {
    let dict = sample();
    let a = dict.suggestions("hel", 5, 2);
    let b = dict.suggestions("hel", 5, 2);
    assert_eq!(a, b);
    let a_words: Vec<&str> = a.iter().map(|s| s.word.as_str()).collect();
    let b_words: Vec<&str> = b.iter().map(|s| s.word.as_str()).collect();
    assert_eq!(a_words, b_words);
}

#[test]
fn empty_input_and_empty_store_yield_nothing() {
    let dict = sample();
    assert!(dict.suggestions("", 5, 2).is_empty());

    let empty = Dictionary::new();
    assert!(empty.suggestions("hello", 5, 2).is_empty());
    assert!(empty.words_with_prefix("h", 5).is_empty());
}
