// End-to-end decoder properties over the built-in QWERTY layout:
// - corner-cutting: a path that never touches an intermediate key still
//   resolves to the intended word when frequency backs it up
// - empty/short paths decode to nothing
// - identical inputs decode to identical ordered results
// - swipe and typed candidates merge into one deduplicated strip

use libpredict_core::{ranker, Config, Dictionary};
use libswipe::{qwerty, GesturePoint, SwipeDecoder};

fn gesture(points: &[(f32, f32)]) -> Vec<GesturePoint> {
    points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| GesturePoint {
            x,
            y,
            t: i as u64 * 16,
        })
        .collect()
}

#[test]
fn corner_cutting_prefers_the_frequent_word() {
    let dict = Dictionary::from_words([("hello", 1000u32), ("hero", 10)]);
    let layout = qwerty();
    let decoder = SwipeDecoder::new(&Config::default());

    // Touch H and E, then drift straight toward O. The path never crosses
    // the L key, and passes close to R on the way; only the wait variants
    // keep the "hel"/"hell" branches alive long enough to reach "hello".
    let (hx, hy) = layout.key_center('h').unwrap();
    let (ex, ey) = layout.key_center('e').unwrap();
    let (ox, oy) = layout.key_center('o').unwrap();
    let path = gesture(&[
        (hx, hy),
        (ex, ey),
        (0.45, 0.30),
        (0.65, 0.35),
        (0.80, 0.30),
        (ox, oy),
    ]);

    let suggestions = decoder.decode(&dict, &layout, &path, 10);
    let hello = suggestions.iter().position(|s| s.word == "hello");
    let hero = suggestions.iter().position(|s| s.word == "hero");

    let hello = hello.expect("hello must be decodable from a corner-cut path");
    if let Some(hero) = hero {
        assert!(
            hello <= hero,
            "hello (rank {hello}) must not rank below hero (rank {hero})"
        );
    }
}

#[test]
fn empty_and_short_paths_decode_to_nothing() {
    let dict = Dictionary::from_words([("hello", 1000u32)]);
    let layout = qwerty();
    let decoder = SwipeDecoder::new(&Config::default());

    assert!(decoder.decode(&dict, &layout, &[], 10).is_empty());
    assert!(decoder
        .decode(&dict, &layout, &gesture(&[(0.5, 0.5)]), 10)
        .is_empty());
    assert!(decoder
        .decode(&dict, &layout, &gesture(&[(0.5, 0.5), (0.6, 0.5)]), 10)
        .is_empty());
}

#[test]
fn identical_paths_decode_identically() {
    let dict = Dictionary::from_words([
        ("hello", 1000u32),
        ("hero", 10),
        ("hell", 40),
        ("help", 80),
    ]);
    let layout = qwerty();
    let decoder = SwipeDecoder::new(&Config::default());

    let (hx, hy) = layout.key_center('h').unwrap();
    let (ex, ey) = layout.key_center('e').unwrap();
    let path = gesture(&[(hx, hy), (ex, ey), (0.5, 0.3), (0.7, 0.3), (0.85, 0.2)]);

    let first = decoder.decode(&dict, &layout, &path, 10);
    for _ in 0..5 {
        let again = decoder.decode(&dict, &layout, &path, 10);
        assert_eq!(again, first);
        let words: Vec<&str> = again.iter().map(|s| s.word.as_str()).collect();
        let expected: Vec<&str> = first.iter().map(|s| s.word.as_str()).collect();
        assert_eq!(words, expected);
    }
}

#[test]
fn swipe_and_typed_candidates_merge_into_one_strip() {
    let dict = Dictionary::from_words([("hello", 1000u32), ("hero", 10), ("help", 80)]);
    let layout = qwerty();
    let decoder = SwipeDecoder::new(&Config::default());

    let (hx, hy) = layout.key_center('h').unwrap();
    let (ex, ey) = layout.key_center('e').unwrap();
    let (ox, oy) = layout.key_center('o').unwrap();
    let swiped = decoder.decode(
        &dict,
        &layout,
        &gesture(&[(hx, hy), (ex, ey), (0.45, 0.30), (0.65, 0.35), (0.80, 0.30), (ox, oy)]),
        10,
    );
    let typed = dict.suggestions("hel", 10, 2);

    let merged = ranker::merge([swiped, typed], 10);
    assert!(!merged.is_empty());

    // No word appears twice, whatever mix of producers found it.
    let mut keys: Vec<String> = merged.iter().map(|s| s.key()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), merged.len());
}
