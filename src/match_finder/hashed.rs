//! The accelerated, hash-table-backed [`MatchFinder`].
//!
//! One open-hash table per match length, lazily populated as positions are
//! scanned, with a move-to-front heuristic on multi-entry buckets. Must agree
//! with [`super::brute_force::BruteForceMatchFinder`] at every position —
//! see `tests/finder_equivalence.rs`.
//!
//! The chained prefix hash (`fnv_step`) is a fixed FNV-1a-style mix rather
//! than a language-provided tuple hash, so that two runs over the same input
//! always build identical hash tables and, with them, identical results.

use super::MatchFinder;
use crate::config::hash_bits_for_length;
use crate::record::Match;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Extends a running hash by one more byte of the matched prefix.
#[inline]
fn fnv_step(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

/// One hash bucket. Starts `Empty`, becomes `Single` on its first occupant,
/// and only grows into a `Many` list once a second, distinct position
/// collides into it — the common case of an unambiguous prefix never pays
/// for a heap allocation.
#[derive(Debug, Clone)]
enum Bucket {
    Empty,
    Single(u32),
    Many(Vec<u32>),
}

impl Bucket {
    fn insert(&mut self, position: u32) {
        *self = match std::mem::replace(self, Bucket::Empty) {
            Bucket::Empty => Bucket::Single(position),
            Bucket::Single(existing) => Bucket::Many(vec![existing, position]),
            Bucket::Many(mut list) => {
                list.push(position);
                Bucket::Many(list)
            }
        };
    }

    fn contains(&self, position: u32) -> bool {
        match self {
            Bucket::Empty => false,
            Bucket::Single(p) => *p == position,
            Bucket::Many(list) => list.contains(&position),
        }
    }
}

/// One hash table per match length in `[min_match, max_match]`, each sized
/// per [`hash_bits_for_length`].
struct LevelTables {
    buckets: Vec<Vec<Bucket>>,
    masks: Vec<u64>,
}

impl LevelTables {
    fn new(max_match: u32) -> Self {
        let mut buckets = Vec::with_capacity(max_match as usize + 1);
        let mut masks = Vec::with_capacity(max_match as usize + 1);
        for length in 0..=max_match {
            let bits = hash_bits_for_length(length.max(1));
            let size = 1usize << bits;
            buckets.push(vec![Bucket::Empty; size]);
            masks.push((size as u64) - 1);
        }
        LevelTables { buckets, masks }
    }

    fn slot_index(&self, level: u32, hash: u64) -> usize {
        (hash & self.masks[level as usize]) as usize
    }

    fn bucket_mut(&mut self, level: u32, hash: u64) -> &mut Bucket {
        let idx = self.slot_index(level, hash);
        &mut self.buckets[level as usize][idx]
    }

    fn insert(&mut self, level: u32, hash: u64, position: u32) {
        self.bucket_mut(level, hash).insert(position);
    }

    fn contains(&self, level: u32, hash: u64, position: u32) -> bool {
        let idx = self.slot_index(level, hash);
        self.buckets[level as usize][idx].contains(position)
    }
}

/// Hash-accelerated match finder. Maintains one open-hash table per match
/// length; at each position it walks the tables from `min_match` upward,
/// following the chained prefix hash, until a length fails to find a
/// candidate. Any length range left unexplored by that walk (because the walk
/// ended early, against the true match length) is then populated lazily by
/// brute-force extension so future positions can reuse it.
pub struct HashedMatchFinder<'a> {
    input: &'a [u8],
    min_match: u32,
    max_match: u32,
    next_position: usize,
    tables: LevelTables,
}

impl<'a> HashedMatchFinder<'a> {
    pub fn new(input: &'a [u8], min_match: u32, max_match: u32) -> Self {
        assert!(1 <= min_match && min_match <= max_match && max_match <= 120);
        HashedMatchFinder {
            input,
            min_match,
            max_match,
            next_position: 0,
            tables: LevelTables::new(max_match),
        }
    }

    /// Looks up `position`'s length-`level` candidate in its bucket, promoting
    /// `last_matching_source` to the front of the bucket's list first (the
    /// move-to-front heuristic: a source that matched at `level - 1` is the
    /// most likely candidate to also match at `level`).
    fn probe(
        &mut self,
        level: u32,
        hash: u64,
        position: usize,
        last_matching_source: Option<usize>,
    ) -> Option<usize> {
        let bucket = self.tables.bucket_mut(level, hash);
        if let (Bucket::Many(list), Some(src)) = (&mut *bucket, last_matching_source) {
            if let Some(idx) = list.iter().position(|&x| x as usize == src) {
                if idx != 0 {
                    list.swap(0, idx);
                }
            }
        }

        let found = match bucket {
            Bucket::Empty => None,
            Bucket::Single(p) => {
                let candidate = *p as usize;
                let is_match = if last_matching_source == Some(candidate) {
                    self.input[candidate + level as usize - 1] == self.input[position + level as usize - 1]
                } else {
                    Match::compute_match_length(self.input, candidate, position, level) == level
                };
                is_match.then_some((candidate, None))
            }
            Bucket::Many(list) => {
                let mut hit = None;
                for (i, &candidate) in list.iter().enumerate() {
                    let candidate = candidate as usize;
                    let is_match = if last_matching_source == Some(candidate) {
                        self.input[candidate + level as usize - 1]
                            == self.input[position + level as usize - 1]
                    } else {
                        Match::compute_match_length(self.input, candidate, position, level) == level
                    };
                    if is_match {
                        hit = Some((candidate, Some(i)));
                        break;
                    }
                }
                hit
            }
        };

        match found {
            None => None,
            Some((candidate, many_index)) => {
                match bucket {
                    Bucket::Empty => unreachable!(),
                    Bucket::Single(p) => *p = position as u32,
                    Bucket::Many(list) => {
                        let i = many_index.expect("Many match always carries an index");
                        list[i] = position as u32;
                        // move-to-front-ish: halve the distance to the head so a
                        // repeatedly-matching source converges to front over a
                        // few hits rather than staying buried at the tail.
                        if i >= 2 {
                            list.swap(i / 2, i);
                        } else if i == 1 {
                            list.swap(0, 1);
                        }
                    }
                }
                Some(candidate)
            }
        }
    }
}

impl<'a> MatchFinder for HashedMatchFinder<'a> {
    fn collect_next(&mut self, out: &mut [u32]) -> u32 {
        let position = self.next_position;
        assert!(position < self.input.len(), "collect_next called past end of input");
        self.next_position += 1;

        for slot in out.iter_mut().take(self.max_match as usize + 1) {
            *slot = 0;
        }

        let max_match = self.max_match.min((self.input.len() - position) as u32);
        let mut current_max_match: u32 = 0;
        let mut prefix_hash = FNV_OFFSET_BASIS;
        let mut last_matching_length: Option<u32> = None;
        let mut last_matching_source: Option<usize> = None;
        let mut last_matching_hash: u64 = FNV_OFFSET_BASIS;

        let mut length = 1u32;
        while length <= max_match {
            let next_byte_index = position + length as usize - 1;
            prefix_hash = fnv_step(prefix_hash, self.input[next_byte_index]);

            if length >= self.min_match {
                let source = self.probe(length, prefix_hash, position, last_matching_source);
                match source {
                    Some(src) => {
                        current_max_match = length;
                        out[length as usize] = (position - src) as u32;
                        last_matching_length = Some(length);
                        last_matching_source = Some(src);
                        last_matching_hash = prefix_hash;
                    }
                    None => break,
                }
            }
            length += 1;
        }

        if last_matching_length.is_none() {
            if self.input.len() - position >= self.min_match as usize {
                self.tables.insert(self.min_match, prefix_hash, position as u32);
            }
        } else if current_max_match < max_match {
            let last_source = last_matching_source.expect("last_matching_length implies a source");
            let full_match_length = current_max_match
                + Match::compute_match_length(
                    self.input,
                    last_source + current_max_match as usize,
                    position + current_max_match as usize,
                    max_match - current_max_match,
                );

            if full_match_length < max_match {
                let mut extended_hash = last_matching_hash;
                for fill_length in (current_max_match + 1)..=full_match_length {
                    let next_byte_index = position + fill_length as usize - 1;
                    extended_hash = fnv_step(extended_hash, self.input[next_byte_index]);
                    self.tables.insert(fill_length, extended_hash, position as u32);
                }

                let branch_level = full_match_length + 1;

                let last_branch_byte = self.input[last_source + full_match_length as usize];
                let last_branch_hash = fnv_step(extended_hash, last_branch_byte);
                if full_match_length == current_max_match {
                    if !self.tables.contains(branch_level, last_branch_hash, last_source as u32) {
                        self.tables.insert(branch_level, last_branch_hash, last_source as u32);
                    }
                } else {
                    self.tables.insert(branch_level, last_branch_hash, last_source as u32);
                }

                let position_branch_byte = self.input[position + full_match_length as usize];
                let position_branch_hash = fnv_step(extended_hash, position_branch_byte);
                self.tables.insert(branch_level, position_branch_hash, position as u32);
            }

            let offset = (position - last_source) as u32;
            for fill_length in (current_max_match + 1)..=full_match_length {
                out[fill_length as usize] = offset;
            }
            current_max_match = full_match_length;
        }

        for slot in out.iter_mut().take(self.min_match as usize) {
            *slot = 0;
        }

        current_max_match
    }
}
