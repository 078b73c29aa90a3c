//! End-to-end exercises of the ancestral sampler on the rain → sprinkler →
//! grass_wet network, including statistical checks against analytically
//! propagated marginals.

use causalgraph::sampling::model::{BayesNetModel, CptRow, Distribution, NodeSpec};
use causalgraph::sampling::primitives::PrimitiveTable;
use causalgraph::sampling::sampler::sample;
use causalgraph::EngineError;

const K: usize = 1000;

fn sprinkler_model() -> BayesNetModel {
    BayesNetModel::from_nodes(vec![
        (
            "rain".into(),
            NodeSpec {
                state_space: vec!["raining".into(), "dry".into()],
                sample_function: "choice".into(),
                parents: vec![],
                distribution: Distribution::Marginal(vec![0.2, 0.8]),
            },
        ),
        (
            "sprinkler".into(),
            NodeSpec {
                state_space: vec!["on".into(), "off".into()],
                sample_function: "choice".into(),
                parents: vec!["rain".into()],
                distribution: Distribution::Conditional(vec![
                    CptRow {
                        given: vec![("rain".into(), "raining".into())],
                        probs: vec![0.01, 0.99],
                    },
                    CptRow {
                        given: vec![("rain".into(), "dry".into())],
                        probs: vec![0.4, 0.6],
                    },
                ]),
            },
        ),
        (
            "grass_wet".into(),
            NodeSpec {
                state_space: vec!["wet".into(), "notWet".into()],
                sample_function: "choice".into(),
                parents: vec!["rain".into(), "sprinkler".into()],
                distribution: Distribution::Conditional(vec![
                    CptRow {
                        given: vec![
                            ("rain".into(), "raining".into()),
                            ("sprinkler".into(), "on".into()),
                        ],
                        probs: vec![0.99, 0.01],
                    },
                    CptRow {
                        given: vec![
                            ("rain".into(), "raining".into()),
                            ("sprinkler".into(), "off".into()),
                        ],
                        probs: vec![0.8, 0.2],
                    },
                    CptRow {
                        given: vec![
                            ("rain".into(), "dry".into()),
                            ("sprinkler".into(), "on".into()),
                        ],
                        probs: vec![0.9, 0.1],
                    },
                    CptRow {
                        given: vec![
                            ("rain".into(), "dry".into()),
                            ("sprinkler".into(), "off".into()),
                        ],
                        probs: vec![0.0, 1.0],
                    },
                ]),
            },
        ),
    ])
    .unwrap()
}

fn frequency(outcomes: &[String], value: &str) -> f64 {
    outcomes.iter().filter(|v| *v == value).count() as f64 / outcomes.len() as f64
}

/// |p̂ - p| must fall within 3 standard errors of a Bernoulli(p) mean
/// estimated from K trials.
fn within_three_se(p_hat: f64, p: f64) -> bool {
    let se = (p * (1.0 - p) / K as f64).sqrt();
    (p_hat - p).abs() <= 3.0 * se
}

#[test]
fn dry_and_off_never_wets_the_grass() {
    // The (dry, off) table entry is [0, 1]: notWet with probability one,
    // so the conditional empirical frequency is exactly 1.0.
    let matrix = sample(&sprinkler_model(), K, &PrimitiveTable::default()).unwrap();
    let rain = matrix.outcomes("rain").unwrap();
    let sprinkler = matrix.outcomes("sprinkler").unwrap();
    let grass = matrix.outcomes("grass_wet").unwrap();

    let mut conditioned = 0;
    for i in 0..K {
        if rain[i] == "dry" && sprinkler[i] == "off" {
            assert_eq!(grass[i], "notWet", "trial {}", i);
            conditioned += 1;
        }
    }
    // P(dry, off) = 0.48; at K=1000 the conditioning set is never empty in
    // practice.
    assert!(conditioned > 0);
}

#[test]
fn rain_marginal_matches_its_prior() {
    let matrix = sample(&sprinkler_model(), K, &PrimitiveTable::default()).unwrap();
    let p_raining = frequency(matrix.outcomes("rain").unwrap(), "raining");
    assert!(
        within_three_se(p_raining, 0.2),
        "empirical P(raining) = {}",
        p_raining
    );
}

#[test]
fn grass_wet_marginal_matches_total_probability() {
    // P(wet) propagated over rain and sprinkler:
    //   0.2*(0.01*0.99 + 0.99*0.8) + 0.8*(0.4*0.9 + 0.6*0.0) = 0.44838
    let p_wet = 0.2 * (0.01 * 0.99 + 0.99 * 0.8) + 0.8 * (0.4 * 0.9);
    let matrix = sample(&sprinkler_model(), K, &PrimitiveTable::default()).unwrap();
    let p_hat = frequency(matrix.outcomes("grass_wet").unwrap(), "wet");
    assert!(
        within_three_se(p_hat, p_wet),
        "empirical P(wet) = {}, analytic = {}",
        p_hat,
        p_wet
    );
}

#[test]
fn sprinkler_marginal_matches_total_probability() {
    // P(on) = 0.2*0.01 + 0.8*0.4 = 0.322
    let matrix = sample(&sprinkler_model(), K, &PrimitiveTable::default()).unwrap();
    let p_hat = frequency(matrix.outcomes("sprinkler").unwrap(), "on");
    assert!(
        within_three_se(p_hat, 0.322),
        "empirical P(on) = {}",
        p_hat
    );
}

#[test]
fn two_cycle_raises_structural_error_before_sampling() {
    let model = BayesNetModel::from_nodes(vec![
        (
            "a".into(),
            NodeSpec {
                state_space: vec!["t".into(), "f".into()],
                sample_function: "choice".into(),
                parents: vec!["b".into()],
                distribution: Distribution::Conditional(vec![]),
            },
        ),
        (
            "b".into(),
            NodeSpec {
                state_space: vec!["t".into(), "f".into()],
                sample_function: "choice".into(),
                parents: vec!["a".into()],
                distribution: Distribution::Conditional(vec![]),
            },
        ),
    ])
    .unwrap();

    assert!(matches!(
        sample(&model, K, &PrimitiveTable::default()),
        Err(EngineError::Structural(_))
    ));
}

#[test]
fn model_authoring_format_round_trips_through_json() {
    let nodes = sprinkler_model().nodes().to_vec();
    let json = serde_json::to_string_pretty(&nodes).unwrap();
    let reloaded: Vec<(String, NodeSpec)> = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, nodes);

    let model = BayesNetModel::from_nodes(reloaded).unwrap();
    let matrix = sample(&model, 10, &PrimitiveTable::default()).unwrap();
    assert_eq!(matrix.trials(), 10);
}

#[test]
fn model_dependency_graph_survives_adjacency_interchange() {
    use causalgraph::graph::interchange::{from_adjacency_json, to_adjacency_json};

    let model = sprinkler_model();
    let json = to_adjacency_json(model.graph()).unwrap();
    let reloaded = from_adjacency_json(&json).unwrap();

    let mut original = model.graph().edges();
    let mut round_tripped = reloaded.edges();
    original.sort();
    round_tripped.sort();
    assert_eq!(original, round_tripped);
}

#[test]
fn caller_supplied_primitives_drive_every_draw() {
    // A cycling primitive makes the joint fully deterministic and exercises
    // the per-trial conditional lookup path.
    let mut table = PrimitiveTable::empty();
    table.insert(
        "choice",
        Box::new(|states: &[String], size: usize, probs: &[f64]| {
            // Pick the first state with nonzero probability.
            let idx = probs.iter().position(|&p| p > 0.0).unwrap_or(0);
            Ok(vec![states[idx].clone(); size])
        }),
    );

    let matrix = sample(&sprinkler_model(), 4, &table).unwrap();
    assert!(matrix.outcomes("rain").unwrap().iter().all(|v| v == "raining"));
    assert!(matrix.outcomes("sprinkler").unwrap().iter().all(|v| v == "on"));
    assert!(matrix.outcomes("grass_wet").unwrap().iter().all(|v| v == "wet"));
}
