//! Quote generator front end
//!
//! Thin command-line caller of the quote store. The session store lives for
//! the lifetime of the process.

use parking_lot::Mutex;
use quote_generator::bin_common::{
    load_config_from_env, parse_args, BinaryRunner, Command, ConfigType, RunConfig,
};
use quote_generator::quote_store::store::EXPORT_FILE_NAME;
use quote_generator::quote_store::{
    init_tracing, FileStore, HttpQuoteSource, MemoryStore, Pick, QuoteConfig, QuoteStore,
    QuoteSyncService, SharedQuoteStore, ShutdownManager,
};
use std::sync::Arc;
use tracing::{info, warn};

const NO_QUOTES: &str = "No quotes available.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let command = Command::parse(&parse_args()).map_err(anyhow::Error::msg)?;

    let config_path = load_config_from_env(ConfigType::Quotes);
    let config = QuoteConfig::load(&config_path)?;
    init_tracing(&config.log_level);
    for notice in &config.notices {
        info!("{}", notice);
    }

    let store = QuoteStore::load(FileStore::new(&config.storage.path), MemoryStore::new());
    if let Some(last) = store.last_displayed() {
        println!("{}", last);
    }

    let store: SharedQuoteStore = Arc::new(Mutex::new(store));
    let source = HttpQuoteSource::new(&config.remote.base_url)
        .with_fetch_limit(config.remote.fetch_limit);
    let service = Arc::new(QuoteSyncService::new(Arc::clone(&store), Arc::new(source)));

    match command {
        Command::Help => println!("{}", Command::usage()),
        Command::Show(category) => {
            let mut store = store.lock();
            if let Some(category) = category {
                store.set_filter(&category)?;
            }
            let filter = store.filter().to_string();
            print_pick(&store.pick_random(&filter));
        }
        Command::Add { text, category } => {
            let (new_category, added) = {
                let mut store = store.lock();
                let new_category = store.add(&text, &category)?;
                (new_category, store.quotes().last().cloned())
            };

            println!("Quote added!");
            if let Some(added) = added {
                if new_category {
                    println!("New category: {}", added.category);
                }
                if config.remote.publish_on_add {
                    service.publish_in_background(added).await?;
                }
            }
        }
        Command::Categories => {
            let store = store.lock();
            for option in store.category_options() {
                let marker = if option == store.filter() { "*" } else { " " };
                println!("{} {}", marker, option);
            }
        }
        Command::Filter(category) => {
            let mut store = store.lock();
            store.set_filter(&category)?;
            let filter = store.filter().to_string();
            print_pick(&store.pick_random(&filter));
        }
        Command::Export(path) => {
            let path = path.unwrap_or_else(|| EXPORT_FILE_NAME.to_string());
            let count = store.lock().export_to_file(&path)?;
            println!("Exported {} quotes to {}", count, path);
        }
        Command::Import(path) => {
            store.lock().import_from_file(&path)?;
            println!("Quotes imported successfully!");
        }
        Command::Sync => match service.sync_once().await {
            Ok(stats) => println!(
                "Fetched {} quotes, {} new ({:?})",
                stats.fetched, stats.added, stats.duration
            ),
            Err(e) => warn!("Failed to fetch quotes from server: {}", e),
        },
        Command::Run => {
            let run_config = RunConfig::new("Quote Generator")
                .with_sync_interval(config.remote.sync_interval());
            let mut app = QuoteApp {
                config: run_config,
                store,
                service,
            };
            app.execute().await?;
        }
    }

    Ok(())
}

fn print_pick(pick: &Pick) {
    match pick {
        Pick::Quote(quote) => println!("\"{}\" ({})", quote.text, quote.category),
        Pick::NoQuotes => println!("{}", NO_QUOTES),
    }
}

/// Periodic sync with a fresh quote after every cycle
struct QuoteApp {
    config: RunConfig,
    store: SharedQuoteStore,
    service: Arc<QuoteSyncService>,
}

impl QuoteApp {
    fn show_filtered(&self) {
        let mut store = self.store.lock();
        let filter = store.filter().to_string();
        print_pick(&store.pick_random(&filter));
    }
}

impl BinaryRunner for QuoteApp {
    async fn run(&mut self) -> anyhow::Result<()> {
        let shutdown = ShutdownManager::new();
        shutdown.spawn_signal_handler();

        self.show_filtered();
        let handle = Arc::clone(&self.service).start(self.config.sync_interval);

        while shutdown.is_running() {
            shutdown.interruptible_sleep(self.config.sync_interval).await;
            if shutdown.is_running() {
                self.show_filtered();
            }
        }

        handle.cancel();
        handle.join().await;
        Ok(())
    }

    fn config(&self) -> &RunConfig {
        &self.config
    }

    fn summary(&self) -> Option<String> {
        Some(format!("{} quotes in collection", self.store.lock().len()))
    }
}
