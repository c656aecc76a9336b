use cart_widget::utils::{logger, validation::Validate};
use cart_widget::view::{format_usd, render::help_text, Command};
use cart_widget::{CliConfig, ConfigProvider, LocalStorage, MemoryStorage, Storage, Storefront};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting cart-widget");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let resolved = config
        .load_catalog_file()
        .and_then(|file| config.resolve(file.as_ref()));
    let (catalog, settings) = match resolved {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!(
                "Could not load configuration: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let storage: Box<dyn Storage> = if config.in_memory {
        tracing::info!("Cart kept in memory only");
        Box::new(MemoryStorage::new())
    } else {
        tracing::info!("Cart stored under {}", settings.storage_dir());
        Box::new(LocalStorage::new(settings.storage_dir().to_string()))
    };

    let mut storefront = Storefront::open(catalog, storage, &settings).await;
    run(&mut storefront).await
}

/// Redraws after every command and whenever the notification expires.
async fn run<S: Storage>(storefront: &mut Storefront<S>) -> anyhow::Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut notifications = storefront.subscribe_notifications();

    println!("{}", storefront.render());
    println!("{}", help_text());

    loop {
        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match storefront.handle_input(&line).await {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{}", help_text()),
                    _ => println!("{}", storefront.render()),
                }
            }
            changed = notifications.changed() => {
                if changed.is_err() {
                    break;
                }
                if notifications.borrow_and_update().is_none() {
                    println!("{}", storefront.render());
                }
            }
        }
    }

    tracing::info!(
        "Leaving with {} line(s), total {}",
        storefront.lines().len(),
        format_usd(storefront.total_price())
    );
    Ok(())
}
