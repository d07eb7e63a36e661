//! Fixed seed dataset for demo resilience.
//!
//! Substituted for an empty merged view only when the configured
//! [`SeedPolicy`](crate::SeedPolicy) allows it; the engine itself never
//! decides to show seeds.

use craftsync_model::{Fields, Record, RecordId, Stamp};
use serde_json::{json, Value};

const SEED_STAMP: Stamp = Stamp::Millis(1_700_000_000_000);

fn seed(id: &str, pairs: &[(&str, Value)]) -> Record {
    let fields: Fields = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect();
    Record::with_id(RecordId::remote(id), fields, SEED_STAMP, SEED_STAMP)
}

/// Returns the seed records for a collection, empty for collections
/// without seed content.
#[must_use]
pub fn seed_records(collection: &str) -> Vec<Record> {
    match collection {
        "products" => vec![
            seed(
                "seed-prod-1",
                &[
                    ("title", json!("Block-Printed Cotton Scarf")),
                    ("category", json!("Textiles")),
                    ("region", json!("Rajasthan")),
                    ("price", json!(45)),
                    (
                        "description",
                        json!("Hand-stamped indigo scarf dyed with natural pigments."),
                    ),
                    ("artisanId", json!("seed-artisan-1")),
                    ("artisanName", json!("Rina Devi")),
                ],
            ),
            seed(
                "seed-prod-2",
                &[
                    ("title", json!("Terracotta Water Pot")),
                    ("category", json!("Pottery")),
                    ("region", json!("Uttar Pradesh")),
                    ("price", json!(30)),
                    (
                        "description",
                        json!("Wheel-thrown terracotta pot with a burnished finish."),
                    ),
                    ("artisanId", json!("seed-artisan-2")),
                    ("artisanName", json!("Sanjay Verma")),
                ],
            ),
            seed(
                "seed-prod-3",
                &[
                    ("title", json!("Carved Walnut Jewelry Box")),
                    ("category", json!("Woodwork")),
                    ("region", json!("Kashmir")),
                    ("price", json!(120)),
                    (
                        "description",
                        json!("Chinar-leaf motifs hand-carved into seasoned walnut."),
                    ),
                    ("artisanId", json!("seed-artisan-1")),
                    ("artisanName", json!("Rina Devi")),
                ],
            ),
        ],
        "artisans" => vec![
            seed(
                "seed-artisan-1",
                &[
                    ("name", json!("Rina Devi")),
                    ("region", json!("Rajasthan")),
                    (
                        "bio",
                        json!("A master of block printing, carrying on a family tradition."),
                    ),
                ],
            ),
            seed(
                "seed-artisan-2",
                &[
                    ("name", json!("Sanjay Verma")),
                    ("region", json!("Uttar Pradesh")),
                    (
                        "bio",
                        json!("Expert potter shaping clay into timeless pieces of art."),
                    ),
                ],
            ),
        ],
        _ => Vec::new(),
    }
}
