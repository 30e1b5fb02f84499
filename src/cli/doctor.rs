//! Environment readiness check.

use crate::acquisition::AcquisitionService;
use crate::config::Config;
use crate::export::clipboard;
use crate::store::{FsStore, KvStore};
use anyhow::Result;

/// Check store writability, clipboard tooling, and endpoint reachability.
pub async fn run(config: &Config) -> Result<()> {
    println!("Quotedeck Doctor");
    println!("================");
    println!();

    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    println!("OS:   {os}");
    println!("Arch: {arch}");
    println!("Data: {}", config.data_dir.display());
    println!();

    // Store directory
    let store_ok = match FsStore::open(config.store_dir()) {
        Ok(store) => match store
            .set("doctorProbe", "ok")
            .and_then(|()| store.remove("doctorProbe"))
        {
            Ok(()) => {
                println!(
                    "[OK] Store directory writable: {}",
                    config.store_dir().display()
                );
                true
            }
            Err(e) => {
                println!("[!!] Store directory not writable: {e:#}");
                false
            }
        },
        Err(e) => {
            println!("[!!] Could not open store directory: {e:#}");
            false
        }
    };

    // Clipboard tooling
    match clipboard::detect() {
        Some(tool) => {
            let capability = if tool.supports_image() {
                "image capable"
            } else {
                "text only"
            };
            println!("[OK] Clipboard tool found: {} ({capability})", tool.name());
        }
        None => {
            println!("[!!] No clipboard tool found. Text copies fall back to OSC 52 escapes.")
        }
    }

    // Scraping endpoint
    let api_ok = match AcquisitionService::new(config) {
        Ok(service) => match service.probe().await {
            Ok(status) if (200..300).contains(&status) => {
                println!("[OK] API connection successful! (HTTP {status})");
                true
            }
            Ok(status) => {
                println!("[!!] API connection failed: HTTP {status}");
                false
            }
            Err(e) => {
                println!("[!!] API connection failed: {e}");
                false
            }
        },
        Err(e) => {
            println!("[!!] Invalid configuration: {e:#}");
            false
        }
    };

    println!();
    if store_ok && api_ok {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
        if !store_ok {
            println!("  Set QUOTEDECK_DATA_DIR to a writable directory.");
        }
        if !api_ok {
            println!("  The scraping endpoint is unreachable; fetches will fall back to bundled quotes.");
        }
    }

    Ok(())
}
