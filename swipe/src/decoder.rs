//! Beam-search swipe decoder.
//!
//! Walks the dictionary trie in lockstep with the gesture path. Each gesture
//! point either extends a hypothesis by one letter (scored by a Gaussian
//! falloff of the distance to that letter's key center) or leaves it waiting
//! at a fixed penalty. The wait variant is what makes corner-cutting work: a
//! path that swings from E toward O without touching the L key keeps the
//! "hel"/"hell" branches alive until the path arrives where L's letters can
//! be consumed.
//!
//! Hypotheses reaching the same trie node are recombined to the best score,
//! and the beam is pruned to `beam_width` after every point, so one decode
//! costs at most `points * beam_width * (alphabet + 1)` score evaluations.

use crate::layout::KeyboardLayout;
use crate::path::{GesturePoint, MIN_DECODE_POINTS};
use ahash::AHashMap;
use libpredict_core::{Config, Dictionary, NodeId, WordSuggestion};
use tracing::debug;

#[derive(Debug, Clone)]
struct Hypothesis {
    text: String,
    node: NodeId,
    score: f32,
}

/// Stateless decoder: `decode` is a pure function of the dictionary, layout
/// and path, so calls may run concurrently from worker threads and a stale
/// call can simply be ignored by the session layer.
#[derive(Debug, Clone)]
pub struct SwipeDecoder {
    beam_width: usize,
    sigma: f32,
    wait_penalty: f32,
}

impl SwipeDecoder {
    pub fn new(config: &Config) -> Self {
        Self {
            beam_width: config.beam_width.max(1),
            sigma: config.gaussian_sigma,
            wait_penalty: config.wait_penalty,
        }
    }

    /// Decode a normalized gesture path into ranked word suggestions.
    ///
    /// Paths shorter than [`MIN_DECODE_POINTS`] yield an empty list without
    /// running. An empty list also results when no hypothesis ends on a
    /// word: the caller decides any fallback.
    pub fn decode(
        &self,
        dict: &Dictionary,
        layout: &KeyboardLayout,
        path: &[GesturePoint],
        limit: usize,
    ) -> Vec<WordSuggestion> {
        if path.len() < MIN_DECODE_POINTS || limit == 0 {
            debug!(points = path.len(), "path too short, skipping decode");
            return Vec::new();
        }

        let mut beam = vec![Hypothesis {
            text: String::new(),
            node: dict.root(),
            score: 0.0,
        }];
        for point in path {
            beam = self.advance(dict, layout, &beam, *point);
        }
        let suggestions = self.finalize(dict, beam, limit);
        debug!(
            points = path.len(),
            suggestions = suggestions.len(),
            "decode finished"
        );
        suggestions
    }

    /// One beam step: extend every hypothesis through every reachable child
    /// plus its wait variant, recombine per trie node, prune to `beam_width`.
    fn advance(
        &self,
        dict: &Dictionary,
        layout: &KeyboardLayout,
        beam: &[Hypothesis],
        point: GesturePoint,
    ) -> Vec<Hypothesis> {
        let denom = 2.0 * self.sigma * self.sigma;
        let mut best: AHashMap<NodeId, Hypothesis> = AHashMap::with_capacity(beam.len() * 4);

        let mut offer = |candidate: Hypothesis| match best.get(&candidate.node) {
            Some(existing) if existing.score >= candidate.score => {}
            _ => {
                best.insert(candidate.node, candidate);
            }
        };

        for hyp in beam {
            offer(Hypothesis {
                text: hyp.text.clone(),
                node: hyp.node,
                score: hyp.score - self.wait_penalty,
            });
            for &(ch, child) in dict.children(hyp.node) {
                let Some((kx, ky)) = layout.key_center(ch) else {
                    continue;
                };
                let dx = point.x - kx;
                let dy = point.y - ky;
                let cost = -(dx * dx + dy * dy) / denom;
                let mut text = hyp.text.clone();
                text.push(ch);
                offer(Hypothesis {
                    text,
                    node: child,
                    score: hyp.score + cost,
                });
            }
        }

        let mut next: Vec<Hypothesis> = best.into_values().collect();
        next.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.text.cmp(&b.text))
        });
        next.truncate(self.beam_width);
        next
    }

    /// Keep hypotheses that ended on a word, rank by spatial score plus
    /// log frequency, and normalize confidences against the best survivor.
    fn finalize(&self, dict: &Dictionary, beam: Vec<Hypothesis>, limit: usize) -> Vec<WordSuggestion> {
        let mut ranked: Vec<(f32, String, u32)> = beam
            .into_iter()
            .filter_map(|hyp| {
                let freq = dict.frequency_at(hyp.node);
                if dict.is_terminal(hyp.node) && freq > 0 {
                    Some((hyp.score + (freq as f32).ln(), hyp.text, freq))
                } else {
                    None
                }
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });
        ranked.truncate(limit);

        let Some(&(best, _, _)) = ranked.first() else {
            return Vec::new();
        };
        ranked
            .into_iter()
            .map(|(rank, word, freq)| {
                let confidence = (rank - best).exp().min(1.0);
                WordSuggestion::new(word, freq, confidence, 0)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::qwerty;

    fn point_at(layout: &KeyboardLayout, ch: char, t: u64) -> GesturePoint {
        let (x, y) = layout.key_center(ch).unwrap();
        GesturePoint { x, y, t }
    }

    #[test]
    fn short_paths_decode_to_nothing() {
        let dict = Dictionary::from_words([("hi", 100u32)]);
        let layout = qwerty();
        let decoder = SwipeDecoder::new(&Config::default());

        assert!(decoder.decode(&dict, &layout, &[], 10).is_empty());
        let two = vec![point_at(&layout, 'h', 0), point_at(&layout, 'i', 50)];
        assert!(decoder.decode(&dict, &layout, &two, 10).is_empty());
    }

    #[test]
    fn beam_never_exceeds_width_after_any_point() {
        // Every letter is a child of the root, so one step fans out to the
        // full alphabet plus the wait variant.
        let dict = Dictionary::from_words(('a'..='z').map(|c| (c.to_string(), 10u32)));
        let layout = qwerty();
        let decoder = SwipeDecoder::new(&Config::default());

        let root = Hypothesis {
            text: String::new(),
            node: dict.root(),
            score: 0.0,
        };
        let mut beam = vec![root];
        let points = [
            GesturePoint { x: 0.5, y: 0.5, t: 0 },
            GesturePoint { x: 0.2, y: 0.2, t: 16 },
            GesturePoint { x: 0.8, y: 0.8, t: 32 },
        ];
        for point in points {
            beam = decoder.advance(&dict, &layout, &beam, point);
            assert!(
                beam.len() <= Config::default().beam_width,
                "beam grew to {}",
                beam.len()
            );
        }
    }

    #[test]
    fn decodes_a_word_traced_over_its_keys() {
        let dict = Dictionary::from_words([("hi", 100u32), ("no", 50)]);
        let layout = qwerty();
        let decoder = SwipeDecoder::new(&Config::default());

        let (hx, hy) = layout.key_center('h').unwrap();
        let (ix, iy) = layout.key_center('i').unwrap();
        let path = vec![
            GesturePoint { x: hx, y: hy, t: 0 },
            GesturePoint {
                x: (hx + ix) / 2.0,
                y: (hy + iy) / 2.0,
                t: 40,
            },
            GesturePoint { x: ix, y: iy, t: 80 },
        ];

        let suggestions = decoder.decode(&dict, &layout, &path, 10);
        assert_eq!(suggestions[0].word, "hi");
        assert!((suggestions[0].confidence - 1.0).abs() < 1e-6);
        assert_eq!(suggestions[0].edit_distance, 0);
    }

    #[test]
    fn path_that_cannot_reach_a_word_yields_empty() {
        // Three points can consume at most three letters, so a dictionary
        // holding only a five-letter word leaves no terminal hypothesis.
        let dict = Dictionary::from_words([("hello", 100u32)]);
        let layout = qwerty();
        let decoder = SwipeDecoder::new(&Config::default());

        let path = vec![
            point_at(&layout, 'z', 0),
            point_at(&layout, 'x', 40),
            point_at(&layout, 'c', 80),
        ];
        assert!(decoder.decode(&dict, &layout, &path, 10).is_empty());
    }

    #[test]
    fn letters_missing_from_the_layout_are_never_extended() {
        // "héllo" contains a key QWERTY does not have; the decoder should
        // simply never reach its terminal.
        let dict = Dictionary::from_words([("héllo", 100u32), ("hero", 10)]);
        let layout = qwerty();
        let decoder = SwipeDecoder::new(&Config::default());

        let path = vec![
            point_at(&layout, 'h', 0),
            point_at(&layout, 'e', 40),
            point_at(&layout, 'r', 80),
            point_at(&layout, 'o', 120),
        ];
        let suggestions = decoder.decode(&dict, &layout, &path, 10);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].word, "hero");
    }

    #[test]
    fn limit_truncates_results() {
        let dict = Dictionary::from_words([("hi", 100u32), ("h", 5)]);
        let layout = qwerty();
        let decoder = SwipeDecoder::new(&Config::default());

        let (hx, hy) = layout.key_center('h').unwrap();
        let (ix, iy) = layout.key_center('i').unwrap();
        let path = vec![
            GesturePoint { x: hx, y: hy, t: 0 },
            GesturePoint { x: ix, y: iy, t: 40 },
            GesturePoint { x: ix, y: iy, t: 80 },
        ];
        assert_eq!(decoder.decode(&dict, &layout, &path, 1).len(), 1);
    }
}
