//! Project a few synthetic embeddings to 2D and cluster them.
//!
//! Run with `RUST_LOG=embmap=debug` to see the epsilon search.

use embmap::{Embedding, Mapper, PowerIterationPca, NOISE};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three topics in a 6-dimensional embedding space.
    let topics: [(&str, [f64; 6]); 3] = [
        ("rust", [1.0, 0.0, 0.0, 0.2, 0.0, 0.1]),
        ("music", [0.0, 1.0, 0.0, 0.0, 0.3, 0.0]),
        ("cooking", [0.0, 0.0, 1.0, 0.1, 0.0, 0.4]),
    ];

    let mut embeddings = Vec::new();
    for (t, (topic, center)) in topics.iter().enumerate() {
        for i in 0..6 {
            let mut v = center.to_vec();
            v[(i + t) % 6] += 0.02 * i as f64;
            embeddings.push(
                Embedding::new(format!("{topic}-{i}"), v)
                    .with_label(format!("{topic} note {i}"))
                    .with_group(*topic),
            );
        }
    }
    // An outlier far from every topic.
    embeddings.push(Embedding::new("stray", vec![-1.0, -1.0, -1.0, 1.0, 1.0, 1.0]));

    let mapper = Mapper::new().with_reducer(PowerIterationPca::new().with_seed(42));
    let mut points = mapper
        .project_embeddings(&embeddings)
        .expect("projection failed");

    for target in [None, Some(3), Some(2)] {
        let result = mapper
            .cluster_points(&mut points, target)
            .expect("clustering failed");
        println!(
            "\n=== target {:?} => {:?} (eps={:?}) ===",
            target, result.outcome, result.epsilon
        );
        for p in &points {
            let tag = match p.cluster {
                Some(NOISE) => "NOISE".to_string(),
                Some(l) => format!("cluster {l}"),
                None => "-".to_string(),
            };
            println!(
                "  {:10} ({:5.2}, {:5.2}) => {}",
                p.id, p.coords[0], p.coords[1], tag
            );
        }
    }
}
