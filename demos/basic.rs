//! Basic Elman RNN Example
//!
//! Builds a two-layer network from named parameters, runs a forward pass and
//! prints the output shapes. Run with `RUST_LOG=elman=debug` to see the
//! forward-pass events.

use std::collections::HashMap;

use burn::backend::NdArray;
use burn::tensor::{Distribution, Tensor};
use elman::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

type Backend = NdArray<f64>;

fn shape_of(config: &ElmanConfig, kind: ParamKind, layer: usize) -> Vec<usize> {
    let h = config.hidden_size;
    match kind {
        ParamKind::Weight(Connection::Hidden) => vec![h, h],
        ParamKind::Weight(Connection::Input) => vec![h, config.layer_input_size(layer)],
        ParamKind::Bias(_) => vec![h],
    }
}

fn main() -> Result<(), RnnError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Elman RNN Example ===\n");

    let device = Default::default();
    let config = ElmanConfig::new(6, 4)
        .with_num_layers(2)
        .with_nonlinearity(Nonlinearity::Tanh);

    // Stand-in for a trained model: uniform in [-1/sqrt(H), 1/sqrt(H)]
    let mut rng = StdRng::seed_from_u64(42);
    let k = 1.0 / (config.hidden_size as f64).sqrt();
    let mut named = HashMap::new();
    for layer in 0..config.num_layers {
        for kind in ParamKind::ALL {
            let shape = shape_of(&config, kind, layer);
            let len: usize = shape.iter().product();
            let values = (0..len).map(|_| rng.random_range(-k..k)).collect();
            named.insert(kind.name(layer), ParamData::new(shape, values)?);
        }
    }

    let rnn = config.init::<Backend>(&named, &device)?;
    println!("Network:");
    println!("  - Input features: {}", rnn.input_size());
    println!("  - Hidden units: {}", rnn.hidden_size());
    println!("  - Layers: {}", rnn.num_layers());
    println!("  - Nonlinearity: {}", rnn.activation());
    println!();

    // [seq_len=13, batch=7, features=6]
    let input = Tensor::<Backend, 3>::random([13, 7, 6], Distribution::Uniform(-1.0, 1.0), &device);
    let (output, final_hidden) = rnn.forward(input.clone(), None)?;
    println!("Output shape: {:?}", output.dims());
    println!("Final hidden shape: {:?}", final_hidden.dims());

    // Continue the recurrence from the returned state
    let (_, next_hidden) = rnn.forward(input, Some(final_hidden))?;
    println!("Hidden shape after a second pass: {:?}", next_hidden.dims());

    Ok(())
}
