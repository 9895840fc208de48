use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use canonical::Token;
use fxhash::FxHashMap;

use crate::types::{MatchError, RawMatch};


/// Cooperative stop signal polled by the matcher.
///
/// The matcher checks it before every worklist step and once per DP row, so
/// a long alignment stops within one row of work after the signal fires.
pub trait Interrupt {
    fn should_stop(&self) -> bool;
}

impl Interrupt for () {
    fn should_stop(&self) -> bool {
        false
    }
}

impl Interrupt for AtomicBool {
    fn should_stop(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: Interrupt + ?Sized> Interrupt for &T {
    fn should_stop(&self) -> bool {
        (**self).should_stop()
    }
}

impl<T: Interrupt + ?Sized> Interrupt for Arc<T> {
    fn should_stop(&self) -> bool {
        (**self).should_stop()
    }
}

/// Half-open token ranges still to be matched on both sides.
#[derive(Debug, Clone, Copy)]
struct Region {
    a_start: usize,
    a_end: usize,
    b_start: usize,
    b_end: usize,
}

impl Region {
    fn is_empty(&self) -> bool {
        self.a_start >= self.a_end || self.b_start >= self.b_end
    }
}

/// Find all greedy maximal matching runs between two token sequences.
///
/// See [`match_tokens_interruptible`]; this variant never stops early.
pub fn match_tokens(tokens_a: &[Token], tokens_b: &[Token]) -> Vec<RawMatch> {
    // `()` never interrupts, so the error branch is unreachable.
    match_tokens_interruptible(tokens_a, tokens_b, &()).unwrap_or_default()
}

/// Find all greedy maximal matching runs between two token sequences.
///
/// Repeatedly takes the longest common contiguous run of keys inside the
/// current pair of ranges, records it, and queues the left and right
/// remainders. Ties go to the leftmost run in A, then the leftmost in B.
/// The result is sorted by position and strictly increasing on both sides;
/// runs are not filtered by length here.
pub fn match_tokens_interruptible<I>(
    tokens_a: &[Token],
    tokens_b: &[Token],
    interrupt: &I,
) -> Result<Vec<RawMatch>, MatchError>
where
    I: Interrupt + ?Sized,
{
    let (keys_a, keys_b) = intern_keys(tokens_a, tokens_b);

    let mut matches = Vec::new();
    let mut prev_row: Vec<u32> = Vec::with_capacity(keys_b.len() + 1);
    let mut cur_row: Vec<u32> = Vec::with_capacity(keys_b.len() + 1);

    // Explicit worklist; long documents would otherwise recurse once per match.
    let mut worklist = vec![Region {
        a_start: 0,
        a_end: keys_a.len(),
        b_start: 0,
        b_end: keys_b.len(),
    }];

    while let Some(region) = worklist.pop() {
        if region.is_empty() {
            continue;
        }
        if interrupt.should_stop() {
            return Err(MatchError::Interrupted);
        }

        let Some(found) = longest_common_run(
            &keys_a,
            &keys_b,
            region,
            interrupt,
            &mut prev_row,
            &mut cur_row,
        )?
        else {
            continue;
        };

        worklist.push(Region {
            a_start: found.a_start + found.length,
            a_end: region.a_end,
            b_start: found.b_start + found.length,
            b_end: region.b_end,
        });
        worklist.push(Region {
            a_start: region.a_start,
            a_end: found.a_start,
            b_start: region.b_start,
            b_end: found.b_start,
        });
        matches.push(found);
    }

    matches.sort_by_key(|m| (m.a_start, m.b_start));
    Ok(matches)
}

/// Map keys to dense integer ids shared by both sides.
fn intern_keys(tokens_a: &[Token], tokens_b: &[Token]) -> (Vec<u32>, Vec<u32>) {
    let mut ids: FxHashMap<&str, u32> = FxHashMap::default();
    let keys_a = intern_into(&mut ids, tokens_a);
    let keys_b = intern_into(&mut ids, tokens_b);
    (keys_a, keys_b)
}

fn intern_into<'a>(ids: &mut FxHashMap<&'a str, u32>, tokens: &'a [Token]) -> Vec<u32> {
    tokens
        .iter()
        .map(|token| {
            let next = ids.len() as u32;
            *ids.entry(token.key.as_str()).or_insert(next)
        })
        .collect()
}

/// Longest common contiguous run inside `region`, using two rolling DP rows.
///
/// `cur_row[j + 1]` holds the length of the common run ending at `a[i]` and
/// `b[b_start + j]`. Only strictly longer runs replace the best one, which
/// yields the leftmost-in-A, then leftmost-in-B tie break.
fn longest_common_run<I>(
    keys_a: &[u32],
    keys_b: &[u32],
    region: Region,
    interrupt: &I,
    prev_row: &mut Vec<u32>,
    cur_row: &mut Vec<u32>,
) -> Result<Option<RawMatch>, MatchError>
where
    I: Interrupt + ?Sized,
{
    let width = region.b_end - region.b_start;
    prev_row.clear();
    prev_row.resize(width + 1, 0);
    cur_row.clear();
    cur_row.resize(width + 1, 0);

    let b_slice = &keys_b[region.b_start..region.b_end];
    let mut best_len = 0u32;
    let mut best_a_end = 0usize;
    let mut best_b_end = 0usize;

    for i in region.a_start..region.a_end {
        if interrupt.should_stop() {
            return Err(MatchError::Interrupted);
        }
        let key = keys_a[i];
        for (offset, &other) in b_slice.iter().enumerate() {
            let run = if other == key { prev_row[offset] + 1 } else { 0 };
            cur_row[offset + 1] = run;
            if run > best_len {
                best_len = run;
                best_a_end = i + 1;
                best_b_end = region.b_start + offset + 1;
            }
        }
        std::mem::swap(prev_row, cur_row);
    }

    if best_len == 0 {
        return Ok(None);
    }
    let length = best_len as usize;
    Ok(Some(RawMatch {
        a_start: best_a_end - length,
        b_start: best_b_end - length,
        length,
    }))
}
