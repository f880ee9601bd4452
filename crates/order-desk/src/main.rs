//! Order desk command line.
//!
//! ```bash
//! # Parse a supplier catalog into a customer's favorites and print the result
//! order-desk import --customer "居酒屋たなか" catalog.txt --parser-config popcorn.json
//!
//! # Print the order link of a customer
//! order-desk order-url 7c0e4c1e-8f0e-4c55-9a43-2d5f6f0b8a11
//!
//! # Walk through import, ordering and the admin console against in-memory stores
//! RUST_LOG=info order-desk demo
//! ```

use chrono::Local;
use clap::{Parser, Subcommand};
use order_desk::admin::AdminConsole;
use order_desk::auth::{sign_in_notice, AuthProvider, StaticCredentials};
use order_desk::catalog::{CatalogImporter, ParserConfig};
use order_desk::config::AppConfig;
use order_desk::delivery::DeliveryCalendar;
use order_desk::lifecycle::{setup_tracing, StoreSystem};
use order_desk::model::Unit;
use order_desk::order::{customer_order_url, line_share_url, FreeItemField, OrderForm, OrderSummary};
use order_desk::speech::{Dictation, ScriptedSpeech};
use secrecy::ExposeSecret;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

const SAMPLE_CATALOG: &str = "\
【焼酎】 赤霧島 900ml
【焼酎】 黒霧島 一升瓶
【ビール】 アサヒスーパードライ生 10L タル
【ウイスキー】 山崎 2024
レモンサワーの素 1.8L";

#[derive(Parser)]
#[command(name = "order-desk")]
#[command(author, version, about = "Favorite-product ordering for wholesale customers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a supplier catalog as a customer's favorites
    Import {
        /// Customer the products belong to; created when missing
        #[arg(short, long)]
        customer: String,

        /// Catalog text file, one product per line
        file: PathBuf,

        /// JSON parser settings (unit keywords, category retention, translations)
        #[arg(short, long)]
        parser_config: Option<PathBuf>,
    },
    /// Print the order link of a customer
    OrderUrl {
        /// Customer id
        customer_id: Uuid,
    },
    /// Run an end-to-end walkthrough against in-memory stores
    Demo,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let cli = Cli::parse();
    let config = AppConfig::from_env().map_err(|e| e.to_string())?;

    match cli.command {
        Commands::Import {
            customer,
            file,
            parser_config,
        } => import(&config, &customer, file, parser_config).await,
        Commands::OrderUrl { customer_id } => {
            println!("{}", customer_order_url(&config.base_url, customer_id));
            Ok(())
        }
        Commands::Demo => demo(&config).await,
    }
}

async fn import(
    config: &AppConfig,
    customer: &str,
    file: PathBuf,
    parser_config: Option<PathBuf>,
) -> Result<(), String> {
    let raw_text = tokio::fs::read_to_string(&file)
        .await
        .map_err(|e| format!("Cannot read {}: {}", file.display(), e))?;
    let parser_config = match parser_config {
        Some(path) => {
            let json = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
            ParserConfig::from_json(&json).map_err(|e| e.to_string())?
        }
        None => ParserConfig::default(),
    };

    let system = StoreSystem::new(config);
    {
        let importer =
            CatalogImporter::new(system.customer_client.clone(), system.product_client.clone());
        let report = importer
            .import_catalog(customer, &raw_text, &parser_config)
            .await
            .map_err(|e| e.to_string())?;
        let imported = system
            .customer_client
            .fetch_customer(&report.customer_id.to_string())
            .await
            .map_err(|e| e.to_string())?;

        let out = serde_json::json!({ "report": report, "customer": imported });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?
        );
    }
    system.shutdown().await
}

async fn demo(config: &AppConfig) -> Result<(), String> {
    info!("Starting demo");
    let system = StoreSystem::new(config);

    {
        let importer =
            CatalogImporter::new(system.customer_client.clone(), system.product_client.clone());
        let span = tracing::info_span!("catalog_import");
        let report = importer
            .import_catalog("居酒屋たなか", SAMPLE_CATALOG, &ParserConfig::default())
            .instrument(span)
            .await
            .map_err(|e| e.to_string())?;
        info!(customer_id = %report.customer_id, inserted = report.inserted, "Catalog imported");

        // Customer side: open the order link and fill in the form
        let customer = system
            .customer_client
            .fetch_customer(&report.customer_id.to_string())
            .await
            .map_err(|e| e.to_string())?;
        let mut form = OrderForm::new(&customer);
        let ids: Vec<_> = customer.products.iter().map(|p| p.id).collect();
        if let [first, second, third, ..] = ids.as_slice() {
            form.set_quantity(*first, 2);
            form.increment(*second);
            form.set_unit(*second, Unit::Case);
            form.enter_quantity(*third, "3本");
        }

        // Free line dictated by voice
        let free = form.add_free_item();
        let (heard_tx, mut heard_rx) = tokio::sync::mpsc::unbounded_channel();
        let mut dictation = Dictation::new(ScriptedSpeech::new());
        let field_id = format!("free-{free}");
        if let Some(notice) = dictation.start(&field_id, move |text| {
            let _ = heard_tx.send(text);
        }) {
            println!("{notice}");
        }
        dictation.recognizer_mut().hear("おしぼり");
        if let Ok(text) = heard_rx.try_recv() {
            form.update_free_item(free, FreeItemField::Description(text));
        }
        form.update_free_item(free, FreeItemField::Quantity(50));

        let calendar = DeliveryCalendar::new(config.holidays.iter().copied());
        if let Some(date) = calendar.next_available(Local::now().date_naive()) {
            form.set_delivery_date(&date.format("%Y-%m-%d").to_string());
        }

        match form.summary() {
            OrderSummary::Ready { text, item_count } => {
                println!("{text}");
                info!(item_count, "Order ready to send");
                println!("{}", line_share_url(&text));
            }
            OrderSummary::NothingToOrder => warn!("Nothing to order"),
        }

        // Owner side: needs admin credentials
        match &config.admin {
            Some(credentials) => {
                let auth = Arc::new(StaticCredentials::new(credentials.clone()));
                let signed_in = auth
                    .sign_in(&credentials.email, credentials.password.expose_secret())
                    .await;
                println!("{}", sign_in_notice(&signed_in));

                let mut console = AdminConsole::open(
                    system.customer_client.clone(),
                    system.product_client.clone(),
                    auth,
                    config.base_url.clone(),
                )
                .await
                .map_err(|e| e.to_string())?;
                console
                    .select(report.customer_id)
                    .map_err(|e| e.to_string())?;
                console.reorder(2, 0).await.map_err(|e| e.to_string())?;
                console.copy_order_url(report.customer_id).await;
                console
                    .add_product("ハイボール樽", "19L タル")
                    .await
                    .map_err(|e| e.to_string())?;

                if let Some(selected) = console.selected() {
                    for product in &selected.products {
                        let position = product.display_order.unwrap_or(-1);
                        println!("{:>2} {} {}", position, product.name, product.volume);
                    }
                }
                for notice in console.sign_out().await.map_err(|e| e.to_string())? {
                    println!("{notice}");
                }
            }
            None => info!("No admin credentials configured, skipping admin console"),
        }
    }

    system.shutdown().await?;
    info!("Demo completed");
    Ok(())
}
