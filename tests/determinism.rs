use overlap::{align, AlignOptions, Aligner, BatchPair};

const A: &str = "Residents said the new ferry schedule, announced on Monday, \
would cut the morning commute by twenty minutes.";
const B: &str = "The new ferry schedule would cut the morning commute, residents said on Monday.";

#[test]
fn repeated_alignments_are_identical() {
    let first = align(A, B).expect("first alignment");
    for _ in 0..5 {
        assert_eq!(align(A, B).expect("repeat alignment"), first);
    }
}

#[test]
fn equivalent_inputs_share_colour_seeds() {
    // Differently cased and composed spellings of the same phrase.
    let left = align("Caf\u{00E9} au lait tonight", "cafe\u{0301} AU LAIT").expect("left");
    let right = align("We ordered CAFÉ au lait", "café au lait").expect("right");

    assert_eq!(left.pairs.len(), 1);
    assert_eq!(right.pairs.len(), 1);
    assert_eq!(left.pairs[0].color_seed, right.pairs[0].color_seed);
}

#[test]
fn parallel_batch_matches_sequential_results() {
    let aligner = Aligner::new(AlignOptions::default().with_min_match_tokens(2)).expect("opts");
    let pairs: Vec<BatchPair> = (0..16)
        .map(|i| BatchPair::new(format!("{A} extra {i}"), format!("{B} extra {i}")))
        .collect();

    let parallel = aligner.align_all(&pairs);
    for (pair, slot) in pairs.iter().zip(&parallel) {
        let (overlap::TextInput::Raw(a), overlap::TextInput::Raw(b)) = (&pair.a, &pair.b) else {
            unreachable!("raw inputs");
        };
        assert_eq!(slot.as_ref().ok(), Some(&aligner.align(a, b).expect("sequential")));
    }
}

#[test]
fn seeds_do_not_depend_on_the_other_text() {
    let a = align("the quick brown fox", "a quick brown fox").expect("a");
    let b = align("quick brown fox jumps", "slow quick brown fox").expect("b");
    assert_eq!(a.pairs[0].color_seed, b.pairs[0].color_seed);
    assert_eq!(a.pairs[0].color_seed.len(), 16);
}
