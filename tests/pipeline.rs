// tests/pipeline.rs
//
// End-to-end pipeline scenarios: raw text -> scores -> deltas.
//
// Covered:
// - varied vs uniform sentence lengths (burstiness raw values)
// - AI-ism detection of opening/closing phrases
// - drift direction when a varied text is "edited" into a uniform one
// - range invariant, determinism, delta consistency
// - boundary errors (empty input, single sentence)

use voice_tracer::{
    AnalysisError, Analyzer, AnalyzerConfig, Direction, MetricKind, MetricScores, Polarity,
};

// Sentence lengths 5, 20, 4, 18.
const VARIED: &str = "The rain fell all night. \
By morning the river had swollen past the stone markers that my grandfather carved when he was ten years old. \
Nobody slept that night. \
We stacked sandbags along the porch and watched the brown water climb the wooden steps inch by inch.";

// Sentence lengths 12, 13, 12, 12.
const UNIFORM: &str = "The committee reviewed the proposal and approved the budget for next year. \
The members discussed the schedule and agreed on the dates for each meeting. \
The chair summarized the results and thanked the staff for their work. \
The secretary recorded the minutes and shared the notes with the group.";

const FORMULAIC: &str = "It is important to note that the results were consistent. \
Moreover, the data can be seen as reliable in the context of the study. \
The method is considered robust and is known to scale. \
In conclusion, the findings shed light on the problem.";

fn analyzer() -> Analyzer {
    Analyzer::new(AnalyzerConfig::default()).expect("built-in analyzer")
}

#[test]
fn varied_lengths_give_high_raw_burstiness() {
    let a = analyzer().analyze(VARIED).unwrap();
    assert_eq!(a.metadata.sentence_count, 4);
    assert_eq!(a.metadata.word_count, 47);
    assert!((a.metadata.avg_sentence_length - 11.75).abs() < 1e-9);
    // population stddev 7.29 / mean 11.75
    assert!((a.raw.burstiness - 0.621).abs() < 1e-3, "raw={}", a.raw.burstiness);
    assert!((a.scores.burstiness - 0.621 / 1.5).abs() < 1e-3);
}

#[test]
fn uniform_lengths_give_low_raw_burstiness() {
    let a = analyzer().analyze(UNIFORM).unwrap();
    assert_eq!(a.metadata.word_count, 49);
    assert!((a.raw.burstiness - 0.0353).abs() < 1e-3, "raw={}", a.raw.burstiness);
}

#[test]
fn formulaic_text_hits_opening_and_closing() {
    let a = analyzer().analyze(FORMULAIC).unwrap();
    let categories: Vec<&str> = a.ai_isms.iter().map(|d| d.category.as_str()).collect();
    assert!(categories.contains(&"opening"), "{categories:?}");
    assert!(categories.contains(&"closing"), "{categories:?}");
    assert!(a
        .ai_isms
        .iter()
        .any(|d| d.phrase == "in conclusion" && d.context.contains("findings")));
    assert!(a.scores.ai_ism_likelihood > 0.0);

    let plain = analyzer().analyze(VARIED).unwrap();
    assert!(a.scores.ai_ism_likelihood > plain.scores.ai_ism_likelihood);
}

#[test]
fn short_formulaic_pair_registers_opening_and_closing() {
    let text = "It is important to note that this demonstrates a significant paradigm shift. \
                In conclusion, further investigation is warranted.";
    let a = analyzer().analyze(text).unwrap();
    assert!(a.ai_isms.len() >= 2, "{:?}", a.ai_isms);
    assert!(a
        .ai_isms
        .iter()
        .any(|d| d.category == "opening" && d.phrase == "it is important to note that"));
    assert!(a.ai_isms.iter().any(|d| d.category == "closing" && d.phrase == "in conclusion"));
}

#[test]
fn editing_toward_uniform_lengths_is_drift_toward_ai() {
    let r = analyzer().compare_texts(VARIED, UNIFORM).unwrap();
    let d = r.deltas.burstiness;
    assert!(d.delta < 0.0);
    assert_eq!(d.direction, Direction::TowardAi);
    assert!((d.pct_change - d.delta / d.original.abs()).abs() < 1e-12);
}

#[test]
fn scores_stay_in_range() {
    for text in [VARIED, UNIFORM, FORMULAIC] {
        let s = analyzer().scores(text).unwrap();
        assert!(s.in_range(), "{s:?}");
        for (k, v) in s.iter() {
            let max = if k == MetricKind::AiIsmLikelihood { 100.0 } else { 1.0 };
            assert!((0.0..=max).contains(&v), "{k}: {v}");
        }
    }
}

#[test]
fn identical_text_scores_identically() {
    let an = analyzer();
    let a = an.scores(FORMULAIC).unwrap();
    let b = an.scores(FORMULAIC).unwrap();
    for (k, v) in a.iter() {
        assert_eq!(v.to_bits(), b.get(k).to_bits(), "{k}");
    }
}

#[test]
fn deltas_match_score_differences() {
    let an = analyzer();
    let r = an.compare_texts(VARIED, FORMULAIC).unwrap();
    for (k, d) in r.deltas.iter() {
        assert_eq!(d.delta, r.edited.get(k) - r.original.get(k), "{k}");
        match (k.polarity(), d.delta.partial_cmp(&0.0)) {
            (_, Some(std::cmp::Ordering::Equal)) => assert_eq!(d.direction, Direction::Unchanged),
            (Polarity::Human, Some(std::cmp::Ordering::Greater))
            | (Polarity::Ai, Some(std::cmp::Ordering::Less)) => {
                assert_eq!(d.direction, Direction::TowardHuman)
            }
            _ => assert_eq!(d.direction, Direction::TowardAi),
        }
    }
}

#[test]
fn comparing_a_text_with_itself_changes_nothing() {
    let r = analyzer().compare_texts(UNIFORM, UNIFORM).unwrap();
    assert_eq!(r.original, r.edited);
    assert!(r.deltas.iter().all(|(_, d)| d.direction == Direction::Unchanged));
}

#[test]
fn boundary_errors() {
    let an = analyzer();
    assert_eq!(an.scores("").unwrap_err(), AnalysisError::EmptyInput);
    assert_eq!(an.scores(" \n\t ").unwrap_err(), AnalysisError::EmptyInput);
    assert_eq!(
        an.scores("A single sentence is not enough.").unwrap_err(),
        AnalysisError::InsufficientData {
            sentences: 1,
            required: 2
        }
    );
}

#[test]
fn min_sentences_is_configurable() {
    let an = Analyzer::new(AnalyzerConfig {
        min_sentences: 1,
        ..AnalyzerConfig::default()
    })
    .unwrap();
    let s: MetricScores = an.scores("A single sentence is enough here.").unwrap();
    // one sentence: no variation
    assert_eq!(s.burstiness, 0.0);
}

#[test]
fn report_ranks_benchmarks_and_narrates() {
    let r = analyzer().report(VARIED, FORMULAIC).unwrap();
    assert_eq!(r.benchmarks.edited.len(), 3);
    assert!(r
        .benchmarks
        .edited
        .windows(2)
        .all(|w| w[0].distance <= w[1].distance));
    assert!(r.narratives[&MetricKind::AiIsmLikelihood].starts_with("AI-ism markers increased"));

    let json = serde_json::to_value(&r).unwrap();
    assert!(json["result"]["deltas"]["burstiness"]["direction"].is_string());
    assert!(json["interpretations"]["lexical_diversity"]["edited"]["level"].is_string());
}
