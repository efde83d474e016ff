//! # Scene Walkthrough
//!
//! Drives the runtime through a load / back / back sequence against a
//! recording loader and prints the stack and loader requests after each tick.
//!
//! Run with: cargo run --bin scene_walkthrough [-- path/to/herald.toml]

use std::process::ExitCode;
use std::sync::Arc;

use herald::scene::{GoBack, LoadScene, RecordingSceneLoader, SceneId};
use herald::{Runtime, RuntimeConfig};

fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match RuntimeConfig::from_toml_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("failed to load {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => RuntimeConfig::default(),
    };

    let loader = Arc::new(RecordingSceneLoader::new());
    let mut runtime = match Runtime::start(&config, loader.clone()) {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║                  HERALD SCENE WALKTHROUGH                ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!("start        stack={:?}", runtime.scenes().stack());

    let steps = [
        ("load gameplay", Some(SceneId::Gameplay)),
        ("load inventory", Some(SceneId::Inventory)),
        ("go back", None),
        ("go back", None),
        ("go back", None),
    ];

    for (label, target) in steps {
        let admitted = match target {
            Some(scene) => runtime.publish(LoadScene::new(scene)),
            None => runtime.publish(GoBack),
        };
        let report = runtime.tick();
        let requests: Vec<String> = loader
            .drain()
            .iter()
            .map(|op| format!("{:?}({})", op.kind, op.scene))
            .collect();

        println!(
            "{label:<14} admitted={admitted} dispatched={} stack={:?} requests=[{}]",
            report.dispatched,
            runtime.scenes().stack(),
            requests.join(", ")
        );
    }

    let stats = runtime.stats();
    println!();
    println!(
        "ticks={} dispatched={} stale={} stalls={}",
        stats.ticks, stats.dispatched, stats.stale, stats.stalls
    );

    runtime.shutdown();
    ExitCode::SUCCESS
}
