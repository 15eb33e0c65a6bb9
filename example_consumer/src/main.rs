//! Example consumer: a separate Rust project that uses gescom-sdk as a dependency.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Talks to the backend at `GESCOM_BASE_URL` (default http://localhost:8080).

use gescom_sdk::{
    Catalog, Config, EntityKind, FieldPath, FormSession, HttpTransport, ListColumn, ListSession,
    LoadState, Route, SubmitOutcome,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gescom_sdk=info")),
        )
        .init();

    let config = Config::from_env();
    let catalog = Catalog::new();
    catalog.validate()?;
    let transport = HttpTransport::new(&config)?;
    tracing::info!(base_url = %config.base_url, "gescom consumer starting");

    // Client list with pagination, the way a list screen drives it.
    let clients = catalog
        .entity(EntityKind::Client)
        .ok_or("client entity missing")?;
    let mut client_list = ListSession::new(clients);
    client_list.open(&transport).await;
    match client_list.state() {
        LoadState::Ready => {
            println!(
                "clients: {} record(s), {} page(s) of {}",
                client_list.pager().total(),
                client_list.pager().page_count(),
                client_list.pager().page_size(),
            );
            for index in client_list.page_indices() {
                let name = client_list.cell(index, ListColumn::Field(FieldPath::top("companyName")));
                let city = client_list.cell(index, ListColumn::Field(FieldPath::top("city")));
                println!("  - {name} ({city})");
            }
            if let Some(first) = client_list.rows().first() {
                let client: gescom_sdk::model::Client = serde_json::from_value(first.clone())?;
                println!("  first client typed: {} <{}>", client.company_name, client.email);
            }
        }
        LoadState::Failed(error) => {
            tracing::error!(%error, "backend unreachable; showing the offline surface only");
            demo_routes(&catalog);
            return Ok(());
        }
        LoadState::Loading => {}
    }

    // Create a product through a form session.
    let products = catalog
        .entity(EntityKind::Product)
        .ok_or("product entity missing")?;
    let mut form = FormSession::new(products, None, None);
    form.load_feeds(&transport).await;
    form.set_field(FieldPath::top("label"), "Standing desk")?;
    form.set_field(FieldPath::top("reference"), "SD-200")?;
    form.set_field(FieldPath::top("priceExclTax"), "249.9")?;
    form.set_field(FieldPath::top("unity"), "unit")?;
    form.set_field(FieldPath::top("qualification"), "furniture")?;
    form.set_field(FieldPath::top("tax"), "20")?;
    match form.submit(&transport).await {
        SubmitOutcome::Saved(route) => println!("product saved; navigate to {}", route.href()),
        SubmitOutcome::Rejected => println!("product draft rejected by validation"),
        SubmitOutcome::Failed(error) => tracing::error!(%error, "product submit failed"),
    }

    // Quotation statuses and the actions their status table allows.
    let quotations = catalog
        .entity(EntityKind::Quotation)
        .ok_or("quotation entity missing")?;
    let mut quotation_list = ListSession::new(quotations);
    quotation_list.open(&transport).await;
    if quotation_list.is_ready() {
        for index in quotation_list.page_indices() {
            let client = quotation_list.cell(index, ListColumn::Field(FieldPath::top("clientId")));
            let status = quotation_list.cell(index, ListColumn::Status);
            let actions = quotation_list.row_actions(index);
            println!("  quotation for {client}: {status}, actions {actions:?}");
        }
    }

    demo_routes(&catalog);
    Ok(())
}

fn demo_routes(catalog: &Catalog) {
    for href in [
        "/accountant-list",
        "/quotation/3?editMode=true",
        "/quotation-transform/3",
    ] {
        match Route::parse(href, catalog) {
            Some(route) => println!("route {href} -> {route:?}"),
            None => println!("route {href} -> unknown"),
        }
    }
}
