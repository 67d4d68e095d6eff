//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tiecal_core` linkage and store
//!   bootstrap against the `TIECAL_*` environment.
//! - Keep output deterministic for quick local sanity checks.

use chrono::Local;
use tiecal_core::{bootstrap_store, CalendarScreen, CoreConfig};

fn main() {
    let config = CoreConfig::from_env();
    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = tiecal_core::init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("tiecal logging disabled: {err}");
        }
    }

    println!("tiecal_core ping={}", tiecal_core::ping());
    println!("tiecal_core version={}", tiecal_core::core_version());

    let store = match bootstrap_store(&config) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("tiecal bootstrap failed: {err}");
            std::process::exit(1);
        }
    };
    let mut screen = match CalendarScreen::new(store, Local::now(), config.locale) {
        Ok(screen) => screen,
        Err(err) => {
            eprintln!("tiecal screen failed: {err}");
            std::process::exit(1);
        }
    };

    println!("month={}", screen.month_year_label());
    let week = screen
        .week_window()
        .iter()
        .map(|day| day.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>()
        .join(",");
    println!("week={week}");
    match screen.categories() {
        Ok(categories) => println!("categories={}", categories.len()),
        Err(err) => eprintln!("categories failed: {err}"),
    }
    match screen.note_listing() {
        Ok(listing) => println!("notes={}", listing.len()),
        Err(err) => eprintln!("notes failed: {err}"),
    }
}
