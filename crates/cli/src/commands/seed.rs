//! Catalog seeding command.
//!
//! Inserts the stock banner products with their size and finish options.
//! Idempotent: a product whose media type tag already exists is skipped,
//! so reruns never duplicate the catalog.

use rust_decimal::Decimal;

use signcraft_core::{FinishOption, SizeOption, SizePricing};
use signcraft_server::config::database_url_from_env;
use signcraft_server::db::products::NewProduct;
use signcraft_server::db::{self, ProductRepository};

use super::CliError;

fn flat(id: &str, name: &str, amount: Decimal) -> SizeOption {
    SizeOption {
        id: id.to_owned(),
        name: name.to_owned(),
        pricing: SizePricing::Flat { amount },
    }
}

fn finish(id: &str, name: &str, price: Decimal) -> FinishOption {
    FinishOption {
        id: id.to_owned(),
        name: name.to_owned(),
        price,
    }
}

/// Seed the catalog with the stock products.
///
/// # Errors
///
/// Returns an error if the database URL is missing or an insert fails.
pub async fn run() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();

    let database_url = database_url_from_env()?;
    let pool = db::create_pool(&database_url).await?;
    let products = ProductRepository::new(&pool);

    let vinyl_sizes = [
        flat("2x4", "2' x 4'", Decimal::new(2999, 2)),
        flat("3x6", "3' x 6'", Decimal::new(4999, 2)),
        flat("4x8", "4' x 8'", Decimal::new(7999, 2)),
        SizeOption {
            id: "custom".to_owned(),
            name: "Custom size".to_owned(),
            pricing: SizePricing::PerArea {
                rate: Decimal::new(699, 2),
            },
        },
    ];
    let vinyl_finishes = [
        finish("hemmed", "Hemmed edges", Decimal::ZERO),
        finish("grommets", "Grommets", Decimal::new(5, 0)),
        finish("pole-pocket", "Pole pocket", Decimal::new(10, 0)),
    ];

    let stand_sizes = [
        flat("24x63", "24\" x 63\"", Decimal::new(8999, 2)),
        flat("33x78", "33\" x 78\"", Decimal::new(11999, 2)),
        flat("36x86", "36\" x 86\"", Decimal::new(14999, 2)),
    ];
    let stand_finishes = [
        finish("single", "Single-sided", Decimal::ZERO),
        finish("double", "Double-sided", Decimal::new(50, 0)),
    ];

    seed_product(
        &products,
        NewProduct {
            title: "13oz Vinyl Banner",
            description: Some(
                "Durable 13oz vinyl banner for indoor and outdoor use. \
                 Full-color printing, weather resistant.",
            ),
            base_price: Decimal::new(2999, 2),
            media_type: "vinyl-banner",
            category: "banners",
            image_url: Some("/images/vinyl-banner.jpg"),
            sizes: &vinyl_sizes,
            finish_options: &vinyl_finishes,
        },
    )
    .await?;

    seed_product(
        &products,
        NewProduct {
            title: "Retractable Banner Stand",
            description: Some(
                "Portable retractable banner stand with aluminum base and \
                 carrying case. Sets up in seconds.",
            ),
            base_price: Decimal::new(8999, 2),
            media_type: "banner-stand",
            category: "displays",
            image_url: Some("/images/banner-stand.jpg"),
            sizes: &stand_sizes,
            finish_options: &stand_finishes,
        },
    )
    .await?;

    tracing::info!("Seeding complete!");
    Ok(())
}

async fn seed_product(
    products: &ProductRepository<'_>,
    product: NewProduct<'_>,
) -> Result<(), CliError> {
    if products.media_type_exists(product.media_type).await? {
        tracing::info!(media_type = product.media_type, "already seeded, skipping");
        return Ok(());
    }

    let created = products.create(product).await?;
    tracing::info!(product_id = %created.id, title = created.title, "seeded product");
    Ok(())
}
