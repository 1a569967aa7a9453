//! Trains a two-layer perceptron on a synthetic two-class problem.
//!
//! `RUST_LOG=debug cargo run -p tapegrad-data --example mlp_training`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tapegrad_core::nn::{CrossEntropyLoss, Linear, Module, ReLU, Sequential};
use tapegrad_core::optim::{Optimizer, Sgd, SgdConfig};
use tapegrad_core::TapeGradError;
use tapegrad_data::{DataLoader, DataLoaderConfig, InMemoryDataset};

/// Points inside the unit circle are class 0, the ring around it class 1.
fn circles(n: usize, rng: &mut StdRng) -> Result<InMemoryDataset, TapeGradError> {
    let mut rows = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let label = i % 2;
        let radius = if label == 0 { rng.gen_range(0.0..0.8) } else { rng.gen_range(1.2..2.0) };
        let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        rows.push(vec![radius * angle.cos(), radius * angle.sin()]);
        labels.push(label);
    }
    InMemoryDataset::new(rows, labels)
}

fn main() -> Result<(), TapeGradError> {
    env_logger::init();
    let mut rng = StdRng::seed_from_u64(2024);

    let loader = DataLoader::new(
        circles(200, &mut rng)?,
        DataLoaderConfig {
            batch_size: 16,
            shuffle: true,
            seed: Some(7),
            drop_last: false,
        },
    )?;

    let model = Sequential::new()
        .with("fc1", Box::new(Linear::new(2, 16, true, &mut rng)?))
        .with("relu", Box::new(ReLU::new()))
        .with("fc2", Box::new(Linear::new(16, 2, true, &mut rng)?));
    for (name, param) in model.named_parameters() {
        println!("{:<12} {:?}", name, param.shape());
    }

    let loss_fn = CrossEntropyLoss::new();
    let mut optimizer = Sgd::new(
        model.parameter_tensors(),
        SgdConfig {
            lr: 0.1,
            momentum: 0.9,
            ..SgdConfig::default()
        },
    )?;

    for epoch in 0..30 {
        let mut total = 0.0;
        let mut batches = 0;
        for batch in loader.iter() {
            let batch = batch?;
            optimizer.zero_grad();
            let loss = loss_fn.forward(&model.forward(&batch.inputs)?, &batch.labels)?;
            loss.backward()?;
            optimizer.step()?;
            total += loss.item()?;
            batches += 1;
        }
        if epoch % 5 == 0 || epoch == 29 {
            println!("epoch {:>2}  mean loss {:.4}", epoch, total / batches as f64);
        }
    }
    Ok(())
}
