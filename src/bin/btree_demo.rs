//! Demo driver: fill a tree with random keys and print it level by level.
//!
//! Settings come from the environment, see [`ordered_btree::TreeConfig`].
//! Log verbosity follows `RUST_LOG` (default `ordered_btree=info`).

use ordered_btree::{BTree, TreeConfig};
use rand::Rng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ordered_btree=info,btree_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match TreeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        min_degree = config.min_degree,
        key_count = config.key_count,
        key_range = config.key_range,
        "building tree"
    );

    let mut tree = match BTree::new(config.min_degree) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::error!("Failed to create tree: {e}");
            std::process::exit(1);
        }
    };

    let mut rng = rand::rng();
    for _ in 0..config.key_count {
        let key: u32 = rng.random_range(0..config.key_range);
        if !tree.insert(key) {
            tracing::debug!(key, "skipped duplicate");
        }
    }

    print!("{}", tree.display_levels());

    tracing::info!(
        keys = tree.len(),
        height = tree.height(),
        "{}",
        tree.stats().snapshot()
    );
}
