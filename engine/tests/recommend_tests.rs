use engine::{Catalog, Engine, EngineError, Movie};

fn movie(id: u32, title: &str, tag: &str) -> Movie {
    Movie {
        id,
        title: title.into(),
        overview: String::new(),
        genres: String::new(),
        keywords: String::new(),
        tag: tag.into(),
    }
}

fn space_catalog() -> Catalog {
    Catalog::new(vec![
        movie(1, "A", "space alien"),
        movie(2, "B", "space war"),
        movie(3, "C", "romance drama"),
    ])
}

#[test]
fn shared_terms_rank_first() {
    let engine = Engine::build(space_catalog(), 5000);
    let recs = engine.recommend("A", 2).unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].title, "B");
    assert_eq!(recs[1].title, "C");
    assert!(recs[0].score > recs[1].score);
}

#[test]
fn query_movie_is_never_recommended() {
    let engine = Engine::build(space_catalog(), 5000);
    let recs = engine.recommend("B", 10).unwrap();
    assert!(recs.iter().all(|r| r.title != "B"));
}

#[test]
fn small_catalog_returns_all_other_movies() {
    // 3 movies, k = 10: exactly 2 results, no padding, no truncation below M - 1.
    let engine = Engine::build(space_catalog(), 5000);
    let recs = engine.recommend("A", 10).unwrap();
    assert_eq!(recs.len(), 2);
}

#[test]
fn unknown_title_is_an_error() {
    let engine = Engine::build(space_catalog(), 5000);
    let err = engine.recommend("Unknown Movie", 5).unwrap_err();
    assert!(matches!(err, EngineError::TitleNotFound(_)));
}

#[test]
fn scores_descend_with_index_tiebreak() {
    // B and D share one term with A each; C shares nothing. The B/D tie must
    // resolve to the lower catalog index.
    let engine = Engine::build(
        Catalog::new(vec![
            movie(1, "A", "space alien"),
            movie(2, "B", "space distant"),
            movie(3, "C", "romance drama"),
            movie(4, "D", "alien remote"),
        ]),
        5000,
    );
    let recs = engine.recommend("A", 3).unwrap();
    assert_eq!(recs[0].title, "B");
    assert_eq!(recs[1].title, "D");
    assert_eq!(recs[2].title, "C");
    assert_eq!(recs[0].score, recs[1].score);
    for pair in recs.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn empty_tag_movie_scores_zero_and_never_outranks_overlap() {
    let engine = Engine::build(
        Catalog::new(vec![
            movie(1, "A", "space alien"),
            movie(2, "Blank", ""),
            movie(3, "B", "space war"),
        ]),
        5000,
    );

    // zero vector: similarity 0 against everything, itself included
    let sim = engine.similarity();
    for j in 0..3 {
        assert_eq!(sim.get(1, j), 0.0);
    }

    let recs = engine.recommend("A", 2).unwrap();
    assert_eq!(recs[0].title, "B");
    assert_eq!(recs[1].title, "Blank");
    assert_eq!(recs[1].score, 0.0);
}

#[test]
fn matrix_properties_hold() {
    let engine = Engine::build(
        Catalog::new(vec![
            movie(1, "A", "space alien invasion"),
            movie(2, "B", "space war"),
            movie(3, "C", "romance drama"),
            movie(4, "D", ""),
            movie(5, "E", "alien romance"),
        ]),
        5000,
    );
    let sim = engine.similarity();
    let n = sim.len();
    for i in 0..n {
        let tag = &engine.catalog().movies()[i].tag;
        let expected_diag = if tag.trim().is_empty() { 0.0 } else { 1.0 };
        assert_eq!(sim.get(i, i), expected_diag);
        for j in 0..n {
            assert_eq!(sim.get(i, j), sim.get(j, i));
            assert!((-1.0..=1.0).contains(&sim.get(i, j)));
        }
    }
}

#[test]
fn duplicate_titles_query_the_first_occurrence() {
    let engine = Engine::build(
        Catalog::new(vec![
            movie(1, "Twin", "space alien"),
            movie(2, "Twin", "romance drama"),
            movie(3, "B", "space war"),
            movie(4, "C", "romance comedy"),
        ]),
        5000,
    );
    // First "Twin" is the space one, so B must outrank C.
    let recs = engine.recommend("Twin", 3).unwrap();
    assert_eq!(recs[0].title, "B");
}

#[test]
fn vocabulary_cap_drops_rare_terms() {
    // With max_terms = 1 only "space" (frequency 2) survives, so C becomes
    // a zero vector and A/B become identical single-column vectors.
    let engine = Engine::build(space_catalog(), 1);
    assert_eq!(engine.vocabulary().len(), 1);
    let recs = engine.recommend("A", 2).unwrap();
    assert_eq!(recs[0].title, "B");
    assert!((recs[0].score - 1.0).abs() < 1e-6);
    assert_eq!(recs[1].score, 0.0);
}
