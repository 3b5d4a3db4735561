//! Dictionary asset formats.
//!
//! Three interchangeable sources feed the same trie:
//! - plain word lists (`<word> [freq]` per line, `#` comments),
//! - the packed binary trie shipped with keyboard language packs,
//! - a bincode snapshot of `(word, freq)` entries.
//!
//! The packed format uses 10-byte nodes in left-child / right-sibling layout:
//! char as big-endian u16, frequency u8, first-child byte offset u24,
//! next-sibling byte offset u24, one padding byte. Nodes are written in
//! breadth-first order with children sorted by char; the root carries the
//! sentinel char `^` and a frequency greater than zero marks a terminal.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

/// Size of one packed node in bytes.
pub const NODE_SIZE: usize = 10;
/// Offsets are stored as unsigned 24-bit values, capping a dictionary at 16MB.
pub const MAX_OFFSET: u32 = 0x00FF_FFFF;
/// Word lists are capped to keep per-language dictionaries small.
pub const MAX_WORDS: usize = 50_000;
/// The packed node stores frequency in a single byte.
pub const MAX_PACKED_FREQUENCY: u32 = 255;

const ROOT_CHAR: char = '^';

/// One dictionary entry in the bincode snapshot format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub freq: u32,
}

/// Parse a plain word-list asset into `(word, frequency)` pairs.
///
/// Lines are `<word> [frequency]` with tabs and commas accepted as
/// separators; empty lines and `#` comments are skipped. A missing frequency
/// defaults to `1000 + line_index`; all frequencies are clamped to the packed
/// format's single byte. Parsing stops after [`MAX_WORDS`] entries.
pub fn parse_word_list(text: &str) -> Vec<(String, u32)> {
    let mut words = Vec::new();
    for raw in text.lines() {
        if words.len() >= MAX_WORDS {
            break;
        }
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cleaned = line.replace(['\t', ','], " ");
        let mut parts = cleaned.split_whitespace();
        let Some(word) = parts.next() else { continue };
        let freq = parts
            .next()
            .and_then(|f| f.parse::<u32>().ok())
            .unwrap_or(1000 + words.len() as u32)
            .min(MAX_PACKED_FREQUENCY);
        words.push((word.to_string(), freq));
    }
    words
}

#[derive(Default)]
struct BuildNode {
    ch: char,
    freq: u8,
    children: BTreeMap<char, usize>,
    offset: u32,
    first_child: Option<usize>,
    next_sibling: Option<usize>,
}

/// Serialize `(word, frequency)` pairs into the packed binary trie format.
///
/// Frequencies are clamped to one byte. Fails if a word contains a character
/// outside the Basic Multilingual Plane or the trie would exceed the 24-bit
/// offset range.
pub fn write_packed<W: Write>(words: &[(String, u32)], out: &mut W) -> Result<()> {
    let mut nodes: Vec<BuildNode> = vec![BuildNode {
        ch: ROOT_CHAR,
        ..BuildNode::default()
    }];

    for (word, freq) in words {
        if word.is_empty() {
            continue;
        }
        let mut node = 0usize;
        for ch in word.chars() {
            if ch as u32 > u16::MAX as u32 {
                bail!("character {ch:?} in {word:?} does not fit the packed format");
            }
            node = match nodes[node].children.get(&ch).copied() {
                Some(idx) => idx,
                None => {
                    let idx = nodes.len();
                    nodes.push(BuildNode {
                        ch,
                        ..BuildNode::default()
                    });
                    nodes[node].children.insert(ch, idx);
                    idx
                }
            };
        }
        nodes[node].freq = (*freq).min(MAX_PACKED_FREQUENCY) as u8;
    }

    // Breadth-first offset assignment; siblings linked in char order.
    let mut order = Vec::with_capacity(nodes.len());
    let mut queue = std::collections::VecDeque::from([0usize]);
    let mut offset: u32 = 0;
    while let Some(idx) = queue.pop_front() {
        if offset > MAX_OFFSET {
            bail!("dictionary exceeds the 16MB packed trie limit");
        }
        nodes[idx].offset = offset;
        offset += NODE_SIZE as u32;
        order.push(idx);

        let children: Vec<usize> = nodes[idx].children.values().copied().collect();
        nodes[idx].first_child = children.first().copied();
        for pair in children.windows(2) {
            nodes[pair[0]].next_sibling = Some(pair[1]);
        }
        queue.extend(children);
    }

    for &idx in &order {
        let node = &nodes[idx];
        out.write_all(&(node.ch as u16).to_be_bytes())?;
        out.write_all(&[node.freq])?;
        let child = node.first_child.map_or(0, |c| nodes[c].offset);
        let sibling = node.next_sibling.map_or(0, |s| nodes[s].offset);
        out.write_all(&child.to_be_bytes()[1..])?;
        out.write_all(&sibling.to_be_bytes()[1..])?;
        out.write_all(&[0])?;
    }
    Ok(())
}

struct PackedNode {
    ch: u16,
    freq: u8,
    first_child: u32,
    next_sibling: u32,
}

fn node_at(bytes: &[u8], offset: u32) -> Result<PackedNode> {
    if offset % NODE_SIZE as u32 != 0 || offset as usize + NODE_SIZE > bytes.len() {
        bail!("node offset {offset} out of bounds");
    }
    let b = &bytes[offset as usize..offset as usize + NODE_SIZE];
    Ok(PackedNode {
        ch: u16::from_be_bytes([b[0], b[1]]),
        freq: b[2],
        first_child: u32::from_be_bytes([0, b[3], b[4], b[5]]),
        next_sibling: u32::from_be_bytes([0, b[6], b[7], b[8]]),
    })
}

/// Decode a packed binary trie back into `(word, frequency)` pairs.
///
/// Validates the node grid and offset targets and refuses cyclic or truncated
/// input, so a corrupt asset surfaces as a recoverable error instead of
/// unbounded work.
pub fn read_packed(bytes: &[u8]) -> Result<Vec<(String, u32)>> {
    if bytes.is_empty() {
        bail!("empty dictionary asset");
    }
    if bytes.len() % NODE_SIZE != 0 {
        bail!(
            "dictionary asset length {} is not a multiple of the node size",
            bytes.len()
        );
    }
    let node_count = bytes.len() / NODE_SIZE;
    let root = node_at(bytes, 0)?;

    let mut words = Vec::new();
    let mut visited = 0usize;
    // (offset, prefix accumulated before this node)
    let mut stack: Vec<(u32, String)> = Vec::new();
    if root.first_child != 0 {
        stack.push((root.first_child, String::new()));
    }
    while let Some((offset, prefix)) = stack.pop() {
        visited += 1;
        if visited > node_count {
            bail!("dictionary asset contains cyclic node offsets");
        }
        let node = node_at(bytes, offset)?;
        let ch = char::from_u32(node.ch as u32)
            .with_context(|| format!("invalid character 0x{:04x} at offset {offset}", node.ch))?;
        let mut word = prefix.clone();
        word.push(ch);
        if node.freq > 0 {
            words.push((word.clone(), node.freq as u32));
        }
        if node.next_sibling != 0 {
            stack.push((node.next_sibling, prefix));
        }
        if node.first_child != 0 {
            stack.push((node.first_child, word));
        }
    }
    Ok(words)
}

/// Serialize entries as a bincode snapshot.
pub fn write_snapshot<W: Write>(words: &[(String, u32)], out: &mut W) -> Result<()> {
    let entries: Vec<WordEntry> = words
        .iter()
        .map(|(word, freq)| WordEntry {
            word: word.clone(),
            freq: *freq,
        })
        .collect();
    bincode::serialize_into(out, &entries).context("serialize snapshot")?;
    Ok(())
}

/// Decode a bincode snapshot back into `(word, frequency)` pairs.
pub fn read_snapshot(bytes: &[u8]) -> Result<Vec<(String, u32)>> {
    let entries: Vec<WordEntry> = bincode::deserialize(bytes).context("deserialize snapshot")?;
    Ok(entries.into_iter().map(|e| (e.word, e.freq)).collect())
}
