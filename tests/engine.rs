//! End-to-end scenarios over the public engine API.

use rocchio_recommender::{EngineError, Recommendation, RecommendationEngine};

fn corpus() -> Vec<String> {
    vec![
        "cat dog".to_string(),
        "dog bird".to_string(),
        "cat bird fish".to_string(),
    ]
}

fn loaded_engine() -> RecommendationEngine {
    let mut engine = RecommendationEngine::new();
    engine.initialize(corpus());
    engine
}

fn score_of(results: &[Recommendation], doc_index: usize) -> f64 {
    results
        .iter()
        .find(|r| r.doc_index == doc_index)
        .map(|r| r.score)
        .unwrap_or_else(|| panic!("document {doc_index} missing from results"))
}

#[test]
fn search_ranks_the_matching_document_first() {
    let mut engine = loaded_engine();
    let results = engine.search("cat dog", 3).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].doc_index, 0);
    assert_eq!(results[0].text, "cat dog");
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn search_results_carry_document_text_and_identity() {
    let mut engine = loaded_engine();
    let results = engine.search("fish", 3).unwrap();
    let top = &results[0];
    assert_eq!(top.doc_index, 2);
    assert_eq!(top.text, "cat bird fish");
    assert!(top.score > 0.0);
}

#[test]
fn out_of_vocabulary_query_returns_all_zero_scores() {
    let mut engine = loaded_engine();
    let results = engine.search("xylophone quasar", 3).unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.score == 0.0));
    // Zero scores tie, so documents come back in corpus order.
    let order: Vec<usize> = results.iter().map(|r| r.doc_index).collect();
    assert_eq!(order, vec![0, 1, 2]);
}

#[test]
fn out_of_bounds_top_n_falls_back_to_the_default() {
    let mut engine = loaded_engine();
    // 0 and anything above the corpus size substitute the default of 5,
    // capped at the corpus size on output.
    assert_eq!(engine.search("cat", 0).unwrap().len(), 3);
    assert_eq!(engine.search("cat", 50).unwrap().len(), 3);
    assert_eq!(engine.search("cat", 2).unwrap().len(), 2);
}

#[test]
fn relevance_feedback_moves_the_marked_document_upward() {
    let mut engine = loaded_engine();
    let before = engine.search("cat dog", 3).unwrap();
    let after = engine.refine(&[1], &[]).unwrap();

    // The refined query is strictly more similar to document 1.
    assert!(score_of(&after, 1) > score_of(&before, 1));
    assert_eq!(after.len(), 3);

    let rank_before = before.iter().position(|r| r.doc_index == 1).unwrap();
    let rank_after = after.iter().position(|r| r.doc_index == 1).unwrap();
    assert!(rank_after <= rank_before);
}

#[test]
fn negative_feedback_pushes_the_marked_document_down() {
    let mut engine = loaded_engine();
    let before = engine.search("cat bird", 3).unwrap();
    let after = engine.refine(&[], &[2]).unwrap();
    assert!(score_of(&after, 2) <= score_of(&before, 2));
}

#[test]
fn refine_with_empty_feedback_preserves_the_ranking() {
    let mut engine = loaded_engine();
    let before = engine.search("cat dog", 3).unwrap();
    let after = engine.refine(&[], &[]).unwrap();
    // TF-IDF queries are non-negative, so alpha-scaling plus clamping is an
    // identity and every score is unchanged.
    for r in &before {
        assert!((score_of(&after, r.doc_index) - r.score).abs() < 1e-12);
    }
}

#[test]
fn feedback_can_be_applied_iteratively() {
    let mut engine = loaded_engine();
    engine.search("cat dog", 3).unwrap();
    let first = engine.refine(&[1], &[]).unwrap();
    let second = engine.refine(&[1], &[0]).unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 3);
    assert!(score_of(&second, 0) <= score_of(&first, 0));
}

#[test]
fn reinitializing_invalidates_the_feedback_session() {
    let mut engine = loaded_engine();
    engine.search("cat dog", 3).unwrap();
    engine.initialize(vec!["whale song".to_string(), "deep sea".to_string()]);
    assert_eq!(engine.refine(&[0], &[]), Err(EngineError::NoActiveQuery));

    // A fresh search against the new corpus restores feedback.
    let results = engine.search("whale", 2).unwrap();
    assert_eq!(results[0].doc_index, 0);
    assert!(engine.refine(&[0], &[]).is_ok());
}

#[test]
fn reduction_projects_documents_and_queries_uniformly() {
    let mut engine = loaded_engine();
    engine.set_reduction(true, 10);
    assert!(engine.is_reduced());

    let results = engine.search("cat dog", 3).unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.score.is_finite()));
    // Latent space rank is bounded by the corpus size, well under the
    // clamped request of 10 dimensions.
    assert!(engine.active_query().unwrap().len() <= engine.doc_count());
}

#[test]
fn feedback_works_in_the_reduced_space() {
    let mut engine = loaded_engine();
    engine.set_reduction(true, 10);
    engine.search("cat dog", 3).unwrap();
    let results = engine.refine(&[1], &[]).unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.score.is_finite()));
}

#[test]
fn disabling_reduction_restores_term_space_vectors() {
    let mut engine = loaded_engine();
    engine.set_reduction(true, 10);
    engine.set_reduction(false, 10);
    assert!(!engine.is_reduced());

    engine.search("cat dog", 3).unwrap();
    assert_eq!(engine.active_query().unwrap().len(), engine.vocab_size());
}

#[test]
fn identical_corpora_produce_identical_rankings() {
    // Vocabulary ordering is deterministic, so two engines built from the
    // same corpus agree score-for-score.
    let mut a = loaded_engine();
    let mut b = loaded_engine();
    let ra = a.search("cat bird", 3).unwrap();
    let rb = b.search("cat bird", 3).unwrap();
    assert_eq!(ra, rb);
}

#[test]
fn accented_text_is_searchable() {
    let mut engine: RecommendationEngine = RecommendationEngine::new();
    engine.initialize(vec![
        "O coração da floresta".to_string(),
        "A cidade e as máquinas".to_string(),
    ]);
    let results = engine.search("Coração!", 2).unwrap();
    assert_eq!(results[0].doc_index, 0);
    assert!(results[0].score > 0.0);
}
