use hmmpos::{hmm, Corpus, Error, HmmModel, HmmOptions, Sentence, StateSpace, Tagger, UNK};

fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

fn sentence(pairs: &[(&str, &str)]) -> Sentence {
    pairs.iter().copied().collect()
}

#[test]
fn read_corpus_file() {
    init_logger();
    let corpus = Corpus::from_path("tests/data/train.txt").expect("failed to read corpus");
    assert_eq!(10, corpus.len(), "read count mismatch");
    assert_eq!(corpus.total_items(), 66);
    assert_eq!(corpus.max_length(), 9);
}

#[test]
fn missing_corpus_file() {
    let ret = Corpus::from_path("tests/data/does-not-exist.txt");
    match ret {
        Err(Error::Io(..)) => {}
        _ => panic!("test fail"),
    }
}

#[test]
fn every_context_sums_to_one() {
    init_logger();
    let corpus = Corpus::from_path("tests/data/train.txt").unwrap();
    for smoothing in [1e-5, 0.1, 1.0] {
        let options = HmmOptions { smoothing, ..Default::default() };
        let model = HmmModel::build_with(&corpus, options).unwrap();
        assert!((model.initial().total_mass() - 1.0).abs() < 1e-9);
        for tag in model.tags().iter() {
            let emission = model.emission(tag).expect("every tag emits");
            assert!((emission.total_mass() - 1.0).abs() < 1e-9, "emission {tag}");
            if let Some(transition) = model.transition(tag) {
                assert!((transition.total_mass() - 1.0).abs() < 1e-9, "transition {tag}");
            }
        }
    }
}

#[test]
fn most_common_initial_tag() {
    let corpus: Corpus = "The=DET dog=NOUN barks=VERB .=PUNCT".parse().unwrap();
    let model = hmm::build(&corpus).unwrap();
    let initial = model.initial();
    let best = initial
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(tag, _)| tag);
    assert_eq!(best, Some("DET"));
    assert!(initial.get("DET").unwrap() > initial.unknown());
}

#[test]
fn one_more_observation_raises_emission() {
    let base = vec![
        sentence(&[("I", "PRON"), ("run", "VERB")]),
        sentence(&[("I", "PRON"), ("walk", "VERB")]),
        sentence(&[("the", "DET"), ("run", "NOUN")]),
        sentence(&[("the", "DET"), ("walk", "NOUN")]),
    ];
    let margin = |sentences: Vec<Sentence>| {
        let model = hmm::build(&sentences.into_iter().collect()).unwrap();
        let verb = model.emission("VERB").unwrap().log_prob("run");
        let noun = model.emission("NOUN").unwrap().log_prob("run");
        verb - noun
    };
    let before = margin(base.clone());
    let mut more = base;
    more.push(sentence(&[("run", "VERB")]));
    let after = margin(more);
    assert!(after > before, "{after} <= {before}");
}

#[test]
fn predecessor_state_space_excludes_final_tags() {
    init_logger();
    let corpus = Corpus::from_path("tests/data/train.txt").unwrap();
    let model = hmm::build(&corpus).unwrap();
    /* every sentence of the corpus ends with PUNCT and PUNCT ends every sentence */
    assert!(model.tags().contains("PUNCT"));
    assert!(!model.states().contains("PUNCT"));
    assert_eq!(model.states().len(), model.tags().len() - 1);

    let options = HmmOptions { state_space: StateSpace::AllTags, ..Default::default() };
    let model = HmmModel::build_with(&corpus, options).unwrap();
    assert_eq!(model.states().len(), model.tags().len());
}

#[test]
fn invalid_corpus() {
    let ret = hmm::build(&Corpus::default());
    assert!(matches!(ret, Err(Error::InvalidCorpus(..))));

    let corpus: Corpus = vec![sentence(&[("a", "DET")]), Sentence::default()].into_iter().collect();
    assert!(matches!(hmm::build(&corpus), Err(Error::InvalidCorpus(..))));

    let corpus: Corpus = vec![sentence(&[("", "DET")])].into_iter().collect();
    assert!(matches!(hmm::build(&corpus), Err(Error::InvalidCorpus(..))));
}

#[test]
fn options_from_file() {
    let dir = std::env::temp_dir().join(format!("hmmpos-options-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("options.json");
    std::fs::write(&path, r#"{"smoothing": 0.01, "state_space": "all_tags"}"#).unwrap();
    let options = HmmOptions::from_path(&path).unwrap();
    assert_eq!(options.smoothing, 0.01);
    assert_eq!(options.state_space, StateSpace::AllTags);

    std::fs::write(&path, r#"{"smoothing": -1.0}"#).unwrap();
    assert!(matches!(HmmOptions::from_path(&path), Err(Error::InvalidParameter(..))));

    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(HmmOptions::from_path(&path), Err(Error::Json(..))));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn smoothing_must_keep_probabilities_finite() {
    init_logger();
    let corpus: Corpus = "The=DET dog=NOUN barks=VERB .=PUNCT".parse().unwrap();
    let mut options = HmmOptions::default();
    options.set("smoothing", "1e308").unwrap();
    let ret = HmmModel::build_with(&corpus, options);
    assert!(matches!(ret, Err(Error::InvalidParameter(..))));

    /* very large but representable: every known token still gets a real tag */
    let mut options = HmmOptions::default();
    options.set("smoothing", "1e300").unwrap();
    let model = HmmModel::build_with(&corpus, options).unwrap();
    let tags = model.greedy_tagger().tag(&["The", "dog"]).unwrap();
    assert!(tags.iter().all(|t| t != UNK), "{tags:?}");
    let path = model.viterbi_tagger().decode(&["The", "dog"]).unwrap();
    assert!(path.score.is_finite());
}
