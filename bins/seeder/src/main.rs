//! Database seeder for Offertory development and testing.
//!
//! Seeds a handful of donation entries for local development. Skips seeding
//! when the entries table already has rows.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Local};
use rust_decimal::Decimal;
use sea_orm::{EntityTrait, PaginatorTrait};

use offertory_core::entry::{Category, NewEntry, PaymentMethod, PhoneInput};
use offertory_db::EntryRepository;
use offertory_db::entities::entries;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = offertory_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let existing = entries::Entity::find()
        .count(&db)
        .await
        .expect("Failed to count entries");
    if existing > 0 {
        println!("  Entries already present ({existing}), skipping...");
        return;
    }

    println!("Seeding sample entries...");
    let repo = EntryRepository::new(db);
    let today = Local::now().date_naive();

    let samples = [
        (
            today,
            "Maria Silva",
            Decimal::new(12050, 2),
            PaymentMethod::Pix,
            Category::Tithe,
            Some("maria@example.com"),
            PhoneInput::Formatted("(11) 98765-4321".to_string()),
        ),
        (
            today,
            "Joao Santos",
            Decimal::new(5000, 2),
            PaymentMethod::Cash,
            Category::Offering,
            None,
            PhoneInput::None,
        ),
        (
            today - Duration::days(40),
            "Ana Souza",
            Decimal::new(20000, 2),
            PaymentMethod::Transfer,
            Category::Tithe,
            None,
            PhoneInput::Parts {
                area_code: "21".to_string(),
                number: "912345678".to_string(),
            },
        ),
    ];

    for (date, payer, amount, method, category, email, phone) in samples {
        let entry = NewEntry {
            date,
            payer_name: payer.to_string(),
            amount,
            payment_method: method,
            category,
            email: email.map(str::to_string),
            phone,
            operator: None,
        };
        let id = repo
            .create(entry, "seeder")
            .await
            .expect("Failed to seed entry");
        println!("  Seeded entry {id} ({payer})");
    }

    println!("Seeding complete!");
}
