use std::io::{self, BufRead, Write};

use shoply_catalog::{CatalogLoader, HttpCatalogSource};
use shoply_core::config::{AppConfig, LoadOptions};

use crate::commands::CommandResult;
use crate::session::Session;

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "shop",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "shop",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let source = match HttpCatalogSource::from_config(&config.catalog) {
        Ok(source) => source,
        Err(error) => {
            return CommandResult::failure(
                "shop",
                "catalog_client",
                format!("failed to build catalog client: {error}"),
                4,
            );
        }
    };

    let mut session = Session::new(CatalogLoader::new(Box::new(source)));

    runtime.block_on(async {
        println!("shoply storefront demo - type `help` for commands");

        let stdin = io::stdin();
        loop {
            print!("shoply> ");
            if io::stdout().flush().is_err() {
                break;
            }

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }

            let reply = session.handle(&line).await;
            if !reply.output.is_empty() {
                println!("{}", reply.output);
            }
            if reply.quit {
                break;
            }
        }
    });

    CommandResult::ok("session ended")
}
