use webrag_core::chunker::{chunk_text, overlap_tail, split_sentences, ChunkPolicy};
use webrag_core::corpus::normalize_whitespace;

#[test]
fn normalize_collapses_runs_and_trims() {
    let input = "  Home \t loans\n\nare   offered.  ";
    let normalized = normalize_whitespace(input);
    assert_eq!(normalized, "Home loans are offered.");
    // Idempotent under re-application
    assert_eq!(normalize_whitespace(&normalized), normalized);
}

#[test]
fn default_policy_matches_documented_budgets() {
    let policy = ChunkPolicy::default();
    assert_eq!(policy.target_chars, 350);
    assert_eq!(policy.overlap_chars, 50);
}

#[test]
fn sentences_split_on_terminal_punctuation() {
    let sents = split_sentences("Home loans are offered. Gold loans require collateral.");
    assert_eq!(
        sents,
        vec![
            "Home loans are offered.",
            "Gold loans require collateral."
        ]
    );
}

#[test]
fn short_sentences_stay_within_budget() {
    let policy = ChunkPolicy {
        target_chars: 350,
        overlap_chars: 0,
    };
    let body = "One. Two. Three. Four.";
    let chunks = chunk_text(body, &policy);
    assert_eq!(chunks, vec!["One. Two. Three. Four."]);
}

#[test]
fn overlong_sentence_becomes_its_own_chunk() {
    let policy = ChunkPolicy {
        target_chars: 10,
        overlap_chars: 0,
    };
    let long = "This single sentence is far longer than the ten character budget.";
    let chunks = chunk_text(long, &policy);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], long);
}

#[test]
fn budget_overflow_seeds_next_chunk_with_tail() {
    let policy = ChunkPolicy {
        target_chars: 40,
        overlap_chars: 50,
    };
    let body =
        "Home loans are offered. Gold loans require collateral. Education loans support students.";
    let chunks = chunk_text(body, &policy);
    assert!(chunks.len() > 1, "body must split into multiple chunks");
    for pair in chunks.windows(2) {
        let tail = overlap_tail(&pair[0], policy.overlap_chars);
        assert!(
            pair[1].starts_with(tail),
            "chunk {:?} must start with tail {:?}",
            pair[1],
            tail
        );
    }
}

#[test]
fn overlap_tail_is_character_based() {
    assert_eq!(overlap_tail("abcdef", 3), "def");
    assert_eq!(overlap_tail("ab", 50), "ab");
    assert_eq!(overlap_tail("abc", 0), "");
    // Multi-byte characters count as one character each
    assert_eq!(overlap_tail("crème brûlée", 5), "rûlée");
}

#[test]
fn empty_body_yields_no_chunks() {
    let chunks = chunk_text("", &ChunkPolicy::default());
    assert!(chunks.is_empty());
}
